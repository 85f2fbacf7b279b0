//! Decomposition of bone names into components and reassembly under a
//! target convention.

use serde::{Deserialize, Serialize};

use crate::convention::{Convention, SideShape, SideType, WordCasing};

/// Left or right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Spelling length of a side marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideForm {
    /// `L` / `R`
    Short,
    /// `Left` / `Right`
    Long,
}

/// Whether the side marker came before or after the base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SidePlacement {
    Prefix,
    Suffix,
}

/// Side-length normalization requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideLength {
    /// Collapse `Left`/`Right` to `L`/`R`.
    #[default]
    Short,
    /// Expand `L`/`R` to `Left`/`Right`.
    Long,
    /// Keep the spelling found in the name.
    Preserve,
}

/// A side marker as found in a name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideMarker {
    pub side: Side,
    pub form: SideForm,
    /// Placement in the source name.
    pub placement: SidePlacement,
    /// Raw text between the marker and the base in the source name.
    pub delimiter: String,
}

impl SideMarker {
    /// Parses one of `L`, `R`, `Left`, `Right`.
    pub fn from_spelling(
        spelling: &str,
        placement: SidePlacement,
        delimiter: impl Into<String>,
    ) -> Option<Self> {
        let (side, form) = match spelling {
            "L" => (Side::Left, SideForm::Short),
            "R" => (Side::Right, SideForm::Short),
            "Left" => (Side::Left, SideForm::Long),
            "Right" => (Side::Right, SideForm::Long),
            _ => return None,
        };
        Some(Self {
            side,
            form,
            placement,
            delimiter: delimiter.into(),
        })
    }

    /// The marker text, e.g. `L` or `Right`.
    pub fn spelling(&self) -> &'static str {
        match (self.side, self.form) {
            (Side::Left, SideForm::Short) => "L",
            (Side::Right, SideForm::Short) => "R",
            (Side::Left, SideForm::Long) => "Left",
            (Side::Right, SideForm::Long) => "Right",
        }
    }
}

/// A bone name split into its semantic parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameComponents {
    /// Custom prefix stripped from the front, or empty.
    pub custom_prefix: String,
    /// Base name exactly as it appeared.
    pub base: String,
    /// Words recovered from `base`.
    pub base_words: Vec<String>,
    /// Side marker, if one was recognized.
    pub side: Option<SideMarker>,
    /// Trailing `.NNN`, or empty.
    pub ordinal_suffix: String,
    /// Convention the name was detected as.
    pub convention: Convention,
}

impl NameComponents {
    /// Parses a name, stripping the first configured prefix it starts with.
    ///
    /// Never fails: names no strict convention accepts are parsed as Generic.
    pub fn parse(name: &str, prefixes: &[String]) -> Self {
        let (custom_prefix, rest) = strip_custom_prefix(name, prefixes);
        let convention = Convention::detect(rest);
        let mut components = Self::parse_as(rest, convention)
            .unwrap_or_else(|| Self::from_parts(rest, None, "", Convention::Generic));
        components.custom_prefix = custom_prefix.to_string();
        components
    }

    /// Parses a name (without custom prefix) under a specific convention.
    ///
    /// Returns `None` if the convention does not accept the name, see
    /// [`Convention::accepts`].
    pub fn parse_as(name: &str, convention: Convention) -> Option<Self> {
        if !convention.accepts(name) {
            return None;
        }
        let caps = convention.regex().captures(name)?;
        let text = |i: usize| caps.get(i).map_or("", |m| m.as_str());
        let spec = convention.spec();

        let components = match spec.side_type {
            SideType::Suffix => {
                let delimiter = spec.side_template.replacen("{}", "", 1);
                let side = SideMarker::from_spelling(text(2), SidePlacement::Suffix, delimiter);
                Self::from_parts(text(1), side, text(3), convention)
            }
            SideType::Prefix => {
                let delimiter = spec.side_template.replacen("{}", "", 1);
                let side = SideMarker::from_spelling(text(1), SidePlacement::Prefix, delimiter);
                Self::from_parts(text(2), side, text(3), convention)
            }
            SideType::None => match SideShape::find(name) {
                Some(m) => {
                    let placement = match m.shape {
                        SideShape::DelimitedSuffix | SideShape::GluedSuffix => SidePlacement::Suffix,
                        SideShape::DelimitedPrefix | SideShape::GluedPrefix => SidePlacement::Prefix,
                    };
                    let side = SideMarker::from_spelling(m.side, placement, m.delimiter);
                    Self::from_parts(m.base, side, m.ordinal, convention)
                }
                None => Self::from_parts(text(1), None, text(2), convention),
            },
        };
        Some(components)
    }

    fn from_parts(base: &str, side: Option<SideMarker>, ordinal: &str, convention: Convention) -> Self {
        Self {
            custom_prefix: String::new(),
            base: base.to_string(),
            base_words: tokenize_words(base),
            side,
            ordinal_suffix: ordinal.to_string(),
            convention,
        }
    }

    /// Applies side-length normalization to the side marker.
    pub fn normalize_side(&mut self, length: SideLength) {
        if let Some(ref mut marker) = self.side {
            match length {
                SideLength::Short => marker.form = SideForm::Short,
                SideLength::Long => marker.form = SideForm::Long,
                SideLength::Preserve => {}
            }
        }
    }

    /// Renders the base under a target convention.
    pub fn render_base(&self, target: Convention) -> String {
        let spec = target.spec();
        let separator = match spec.word_separator {
            Some(sep) => sep,
            None => return self.base.clone(),
        };
        if self.base_words.is_empty() || !is_tokenizable(&self.base) {
            return self.base.clone();
        }
        match spec.word_casing {
            WordCasing::CapitalizeEach => self
                .base_words
                .iter()
                .map(|w| capitalize(w))
                .collect::<Vec<_>>()
                .join(separator),
            WordCasing::PreserveCase => self.base_words.join(separator),
        }
    }

    /// Reassembles the components into a name under `target`.
    ///
    /// A name without a side marker never gains one and keeps its base
    /// verbatim. Its custom prefix is kept as well: only prefix removal in
    /// conversion drops it, never the target convention.
    ///
    /// Under [`Convention::Generic`] the side keeps the placement and
    /// delimiter it was parsed with.
    pub fn render(&self, target: Convention) -> String {
        let Some(ref marker) = self.side else {
            return format!("{}{}{}", self.custom_prefix, self.base, self.ordinal_suffix);
        };

        let spec = target.spec();
        let base = self.render_base(target);

        let side = marker.spelling();
        let (head, tail) = match (spec.side_type, marker.placement) {
            (SideType::Suffix, _) => (base, spec.format_side(side)),
            (SideType::Prefix, _) => (spec.format_side(side), base),
            (SideType::None, SidePlacement::Suffix) => (base, format!("{}{}", marker.delimiter, side)),
            (SideType::None, SidePlacement::Prefix) => (format!("{}{}", side, marker.delimiter), base),
        };
        format!("{}{}{}{}", self.custom_prefix, head, tail, self.ordinal_suffix)
    }
}

/// Strips the first prefix in `prefixes` that `name` starts with.
///
/// Empty prefixes are ignored.
pub fn strip_custom_prefix<'a>(name: &'a str, prefixes: &[String]) -> (&'a str, &'a str) {
    prefixes
        .iter()
        .filter(|p| !p.is_empty())
        .find_map(|p| name.strip_prefix(p.as_str()).map(|rest| (&name[..p.len()], rest)))
        .unwrap_or(("", name))
}

fn is_word_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '_' | '-' | '.')
}

/// Whether case-based word splitting is meaningful for `s`.
///
/// Only cased letters, numerals and separators qualify; any caseless script
/// makes the whole base a single opaque word.
pub fn is_tokenizable(s: &str) -> bool {
    s.chars()
        .all(|c| c.is_uppercase() || c.is_lowercase() || c.is_numeric() || is_word_separator(c))
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Upper,
    Lower,
    Digit,
}

fn classify(c: char) -> CharClass {
    if c.is_numeric() {
        CharClass::Digit
    } else if c.is_lowercase() {
        CharClass::Lower
    } else {
        CharClass::Upper
    }
}

/// Splits a base name into words.
///
/// Separators (whitespace, `_`, `-`, `.`) split and are dropped. Inside a run,
/// words break on lower-to-upper transitions, on digit boundaries, and before
/// the last capital of an acronym followed by lowercase (`HTTPServer` ->
/// `HTTP`, `Server`).
pub fn tokenize_words(base: &str) -> Vec<String> {
    if !is_tokenizable(base) {
        return vec![base.to_string()];
    }

    let chars: Vec<char> = base.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if is_word_separator(c) {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let boundary = match (classify(prev), classify(c)) {
                (CharClass::Digit, CharClass::Digit) => false,
                (CharClass::Digit, _) | (_, CharClass::Digit) => true,
                (CharClass::Lower, CharClass::Upper) => true,
                (CharClass::Upper, CharClass::Upper) => {
                    chars.get(i + 1).is_some_and(|n| n.is_lowercase())
                }
                _ => false,
            };
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
