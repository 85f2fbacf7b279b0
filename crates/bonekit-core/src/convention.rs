//! Bone naming conventions and convention detection.
//!
//! The registry is closed: every convention is a [`Convention`] variant with a
//! static [`ConventionSpec`]. Detection tries the strict patterns in
//! [`Convention::PRIORITY`] order and falls back to [`Convention::Generic`],
//! which matches anything.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::RenameError;

/// Where a convention places the side marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideType {
    /// `UpperArm_L`
    Suffix,
    /// `L_UpperArm`
    Prefix,
    /// No side placement of its own.
    None,
}

/// How words of the base name are cased when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordCasing {
    /// First letter of each word uppercased, rest untouched.
    CapitalizeEach,
    /// Words keep the casing they were tokenized with.
    PreserveCase,
}

/// Static description of a naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConventionSpec {
    /// Convention id, also its canonical example name.
    pub id: &'static str,
    /// Side marker placement.
    pub side_type: SideType,
    /// Side decoration with a single `{}` placeholder.
    pub side_template: &'static str,
    /// Separator placed between base words. `None` keeps the base verbatim.
    pub word_separator: Option<&'static str>,
    /// Casing applied to base words.
    pub word_casing: WordCasing,
}

impl ConventionSpec {
    /// Formats a side spelling through `side_template`.
    pub fn format_side(&self, side: &str) -> String {
        self.side_template.replacen("{}", side, 1)
    }
}

/// The known naming conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Convention {
    /// `UpperArm_L`
    CamelUnderscore,
    /// `Upper Arm_L`
    SpacedUnderscore,
    /// `Upper_Arm_L`
    SnakeUnderscore,
    /// `UpperArm.L`
    CamelDot,
    /// `Upper Arm.L`
    SpacedDot,
    /// `Upper_Arm.L`
    SnakeDot,
    /// `L_UpperArm`
    SidePrefix,
    /// Anything else, including names without a side marker.
    Generic,
}

/// Side spellings accepted by every pattern.
const SIDE: &str = r"(Left|Right|L|R)";

/// Trailing ordinal such as `.001`.
const ORDINAL: &str = r"(\.[0-9]+)?";

/// Concatenated words, each starting with an uppercase letter or digit run.
const CONCAT_BASE: &str = r"(?:\p{Uppercase}[\p{Uppercase}\p{Lowercase}]*|\p{N}+)+";

/// One word as the tokenizer would produce it.
const WORD: &str = r"(?:\p{Uppercase}\p{Lowercase}+|\p{Lowercase}+|\p{Uppercase}+|\p{N}+)";

impl Convention {
    /// Detection priority, most specific first. Changing this order changes
    /// which convention wins for ambiguous names.
    pub const PRIORITY: [Convention; 8] = [
        Convention::CamelUnderscore,
        Convention::SpacedUnderscore,
        Convention::SnakeUnderscore,
        Convention::CamelDot,
        Convention::SpacedDot,
        Convention::SnakeDot,
        Convention::SidePrefix,
        Convention::Generic,
    ];

    /// Returns the static spec for this convention.
    pub fn spec(&self) -> &'static ConventionSpec {
        const fn suffix(
            id: &'static str,
            side_template: &'static str,
            sep: &'static str,
            word_casing: WordCasing,
        ) -> ConventionSpec {
            ConventionSpec {
                id,
                side_type: SideType::Suffix,
                side_template,
                word_separator: Some(sep),
                word_casing,
            }
        }

        static CAMEL_UNDERSCORE: ConventionSpec =
            suffix("UpperArm_L", "_{}", "", WordCasing::CapitalizeEach);
        static SPACED_UNDERSCORE: ConventionSpec =
            suffix("Upper Arm_L", "_{}", " ", WordCasing::PreserveCase);
        static SNAKE_UNDERSCORE: ConventionSpec =
            suffix("Upper_Arm_L", "_{}", "_", WordCasing::PreserveCase);
        static CAMEL_DOT: ConventionSpec = suffix("UpperArm.L", ".{}", "", WordCasing::CapitalizeEach);
        static SPACED_DOT: ConventionSpec = suffix("Upper Arm.L", ".{}", " ", WordCasing::PreserveCase);
        static SNAKE_DOT: ConventionSpec = suffix("Upper_Arm.L", ".{}", "_", WordCasing::PreserveCase);
        static SIDE_PREFIX: ConventionSpec = ConventionSpec {
            id: "L_UpperArm",
            side_type: SideType::Prefix,
            side_template: "{}_",
            word_separator: Some(""),
            word_casing: WordCasing::CapitalizeEach,
        };
        static GENERIC: ConventionSpec = ConventionSpec {
            id: "Generic",
            side_type: SideType::None,
            side_template: "{}",
            word_separator: None,
            word_casing: WordCasing::PreserveCase,
        };

        match self {
            Convention::CamelUnderscore => &CAMEL_UNDERSCORE,
            Convention::SpacedUnderscore => &SPACED_UNDERSCORE,
            Convention::SnakeUnderscore => &SNAKE_UNDERSCORE,
            Convention::CamelDot => &CAMEL_DOT,
            Convention::SpacedDot => &SPACED_DOT,
            Convention::SnakeDot => &SNAKE_DOT,
            Convention::SidePrefix => &SIDE_PREFIX,
            Convention::Generic => &GENERIC,
        }
    }

    /// Convention id (e.g., "UpperArm_L").
    pub fn id(&self) -> &'static str {
        self.spec().id
    }

    /// Regex pattern source for this convention's detection.
    ///
    /// Suffix conventions capture `(base)(side)(ordinal)`, the prefix
    /// convention `(side)(base)(ordinal)`, Generic `(base)(ordinal)`.
    pub fn pattern(&self) -> String {
        let spaced = format!("{WORD}(?: {WORD})*");
        let snake = format!("{WORD}(?:_{WORD})*");
        match self {
            Convention::CamelUnderscore => format!(r"^({CONCAT_BASE})_{SIDE}{ORDINAL}$"),
            Convention::SpacedUnderscore => format!(r"^({spaced})_{SIDE}{ORDINAL}$"),
            Convention::SnakeUnderscore => format!(r"^({snake})_{SIDE}{ORDINAL}$"),
            Convention::CamelDot => format!(r"^({CONCAT_BASE})\.{SIDE}{ORDINAL}$"),
            Convention::SpacedDot => format!(r"^({spaced})\.{SIDE}{ORDINAL}$"),
            Convention::SnakeDot => format!(r"^({snake})\.{SIDE}{ORDINAL}$"),
            Convention::SidePrefix => format!(r"^{SIDE}_({CONCAT_BASE}){ORDINAL}$"),
            Convention::Generic => format!(r"(?s)^(.+?){ORDINAL}$"),
        }
    }

    /// Compiled detection regex.
    pub fn regex(&self) -> &'static Regex {
        static REGEXES: OnceLock<Vec<Regex>> = OnceLock::new();
        let all = REGEXES.get_or_init(|| {
            Convention::PRIORITY
                .iter()
                .map(|c| Regex::new(&c.pattern()).expect("convention pattern is a valid regex"))
                .collect()
        });
        &all[self.priority_index()]
    }

    /// Whether `name` is accepted by this convention's detection pattern.
    pub fn matches(&self, name: &str) -> bool {
        self.regex().is_match(name)
    }

    /// Whether `name` parses under this convention.
    ///
    /// Stricter than [`Convention::matches`]: a sided convention also rejects
    /// a name whose base would itself be a side marker, as in `Left_L`.
    pub fn accepts(&self, name: &str) -> bool {
        let Some(caps) = self.regex().captures(name) else {
            return false;
        };
        let base_group = match self.spec().side_type {
            SideType::Suffix => 1,
            SideType::Prefix => 2,
            SideType::None => return true,
        };
        !is_side_spelling(caps.get(base_group).map_or("", |m| m.as_str()))
    }

    /// Returns the first convention in priority order that accepts `name`.
    ///
    /// Never fails: [`Convention::Generic`] is the catch-all.
    pub fn detect(name: &str) -> Convention {
        Convention::PRIORITY
            .into_iter()
            .find(|c| c.accepts(name))
            .unwrap_or(Convention::Generic)
    }

    fn priority_index(&self) -> usize {
        Convention::PRIORITY
            .iter()
            .position(|c| c == self)
            .unwrap_or(Convention::PRIORITY.len() - 1)
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Convention {
    type Err = RenameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Convention::PRIORITY
            .into_iter()
            .find(|c| c.id() == s)
            .ok_or_else(|| RenameError::UnrecognizedTargetConvention(s.to_string()))
    }
}

impl Serialize for Convention {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

impl<'de> Deserialize<'de> for Convention {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Whether `s` is exactly one of the side spellings `L`, `R`, `Left`, `Right`.
pub(crate) fn is_side_spelling(s: &str) -> bool {
    matches!(s, "L" | "R" | "Left" | "Right")
}

/// Side layouts recognized for names no strict convention accepts.
///
/// Tried in declaration order after strict detection returned Generic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SideShape {
    /// `(base)[._](side)(ordinal)`
    DelimitedSuffix,
    /// `(side)[._](base)(ordinal)`
    DelimitedPrefix,
    /// `(base)(Left|Right)(ordinal)`
    GluedSuffix,
    /// `(Left|Right)(base)(ordinal)`, base not starting lowercase
    GluedPrefix,
}

/// Raw captures of a side shape match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShapeMatch<'a> {
    pub shape: SideShape,
    pub base: &'a str,
    pub side: &'a str,
    pub delimiter: &'a str,
    pub ordinal: &'a str,
}

impl SideShape {
    const ALL: [SideShape; 4] = [
        SideShape::DelimitedSuffix,
        SideShape::DelimitedPrefix,
        SideShape::GluedSuffix,
        SideShape::GluedPrefix,
    ];

    fn regex(&self) -> &'static Regex {
        static REGEXES: OnceLock<[Regex; 4]> = OnceLock::new();
        let all = REGEXES.get_or_init(|| {
            let build = |p: &str| Regex::new(p).expect("side shape pattern is a valid regex");
            [
                build(&format!(r"(?s)^(.+)([._]){SIDE}{ORDINAL}$")),
                build(&format!(r"(?s)^{SIDE}([._])(.+?){ORDINAL}$")),
                build(&format!(r"(?s)^(.+)(Left|Right){ORDINAL}$")),
                build(&format!(r"(?s)^(Left|Right)([^\p{{Lowercase}}].*?){ORDINAL}$")),
            ]
        });
        &all[*self as usize]
    }

    /// Finds the first shape that matches `name` with a base that is not
    /// itself a side spelling.
    pub(crate) fn find(name: &str) -> Option<ShapeMatch<'_>> {
        SideShape::ALL.into_iter().find_map(|shape| {
            let caps = shape.regex().captures(name)?;
            let text = |i: usize| caps.get(i).map_or("", |m| m.as_str());
            let m = match shape {
                SideShape::DelimitedSuffix => ShapeMatch {
                    shape,
                    base: text(1),
                    delimiter: text(2),
                    side: text(3),
                    ordinal: text(4),
                },
                SideShape::DelimitedPrefix => ShapeMatch {
                    shape,
                    side: text(1),
                    delimiter: text(2),
                    base: text(3),
                    ordinal: text(4),
                },
                SideShape::GluedSuffix => ShapeMatch {
                    shape,
                    base: text(1),
                    delimiter: "",
                    side: text(2),
                    ordinal: text(3),
                },
                SideShape::GluedPrefix => ShapeMatch {
                    shape,
                    side: text(1),
                    delimiter: "",
                    base: text(2),
                    ordinal: text(3),
                },
            };
            (!is_side_spelling(m.base)).then_some(m)
        })
    }
}
