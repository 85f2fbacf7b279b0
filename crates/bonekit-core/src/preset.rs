//! Preset name tables for vendor humanoid rigs.
//!
//! A table is an ordered list of `(generic, vendor)` name pairs. Applying it
//! renames vendor names to generic ones, or the other way round when
//! reversed. Matching is exact; a bone not listed keeps its name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::strip_custom_prefix;
use crate::convert::{convert_name, ConvertOptions};
use crate::error::{PresetError, RenameResult};
use crate::plan::RenamePlan;
use crate::skeleton::Hierarchy;

/// Prefixes VRoid Studio puts in front of every humanoid bone.
pub const VROID_PREFIXES: [&str; 3] = ["J_Adj_", "J_Sec_", "J_Bip_"];

const VROID_CSV: &str = include_str!("../presets/vroid.csv");
const MMD_CSV: &str = include_str!("../presets/mmd.csv");

/// Built-in preset tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetKind {
    /// VRoid Studio exports.
    Vroid,
    /// MikuMikuDance standard bones.
    Mmd,
}

impl PresetKind {
    pub const ALL: [PresetKind; 2] = [PresetKind::Vroid, PresetKind::Mmd];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKind::Vroid => "vroid",
            PresetKind::Mmd => "mmd",
        }
    }

    /// Parses the built-in table.
    pub fn table(&self) -> PresetTable {
        let csv = match self {
            PresetKind::Vroid => VROID_CSV,
            PresetKind::Mmd => MMD_CSV,
        };
        PresetTable::from_csv(self.as_str(), csv).expect("built-in preset csv is well-formed")
    }

    /// Vendor prefixes stripped during a full conversion, if the preset has any.
    pub fn vendor_prefixes(&self) -> &'static [&'static str] {
        match self {
            PresetKind::Vroid => &VROID_PREFIXES,
            PresetKind::Mmd => &[],
        }
    }
}

impl fmt::Display for PresetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetKind {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| PresetError::UnknownPreset(s.to_string()))
    }
}

/// An ordered two-column name mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetTable {
    name: String,
    pairs: Vec<(String, String)>,
}

impl PresetTable {
    /// Creates a table from `(generic, vendor)` pairs.
    pub fn new(name: impl Into<String>, pairs: Vec<(String, String)>) -> Self {
        Self {
            name: name.into(),
            pairs,
        }
    }

    /// Parses a two-column CSV table.
    ///
    /// Blank lines and lines starting with `#` are skipped. Fields may be
    /// wrapped in double quotes; extra columns are ignored.
    pub fn from_csv(name: impl Into<String>, text: &str) -> Result<Self, PresetError> {
        let mut pairs = Vec::new();
        for (i, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields = split_csv_row(trimmed);
            match (fields.first(), fields.get(1)) {
                (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
                    pairs.push((a.clone(), b.clone()));
                }
                _ => {
                    return Err(PresetError::MalformedRow {
                        line: i + 1,
                        content: line.to_string(),
                    })
                }
            }
        }
        Ok(Self::new(name, pairs))
    }

    /// Parses a JSON table: `[["generic", "vendor"], ...]`.
    pub fn from_json(name: impl Into<String>, text: &str) -> Result<Self, PresetError> {
        let pairs: Vec<(String, String)> = serde_json::from_str(text)?;
        if let Some(pos) = pairs.iter().position(|(a, b)| a.is_empty() || b.is_empty()) {
            return Err(PresetError::MalformedRow {
                line: pos + 1,
                content: format!("{:?}", pairs[pos]),
            });
        }
        Ok(Self::new(name, pairs))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Pairs in table order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Name `name` maps to: vendor to generic, or generic to vendor when
    /// `reversed`. The first matching row wins.
    pub fn lookup(&self, name: &str, reversed: bool) -> Option<&str> {
        self.pairs.iter().find_map(|(generic, vendor)| {
            let (from, to) = if reversed { (generic, vendor) } else { (vendor, generic) };
            (from == name).then_some(to.as_str())
        })
    }

    /// Plans the table mapping over every bone, hidden ones included.
    pub fn plan<H: Hierarchy + ?Sized>(&self, hierarchy: &H, reversed: bool) -> RenameResult<RenamePlan> {
        let mut plan = RenamePlan::new();
        for bone in hierarchy.bone_ids() {
            let name = hierarchy.name(bone);
            if let Some(to) = self.lookup(name, reversed) {
                debug!(from = name, to, "preset");
                plan.push(name, to)?;
            }
        }
        plan.validate_against(hierarchy)?;
        info!(preset = %self.name, reversed, renames = plan.len(), "preset planned");
        Ok(plan)
    }
}

/// Plans a forward table mapping followed by prefix stripping and conversion.
///
/// The three stages are composed into a single plan from the current names,
/// so the whole conversion applies atomically. Prefixes are stripped from
/// every bone; conversion skips hidden bones.
pub fn plan_full_conversion<H: Hierarchy + ?Sized>(
    hierarchy: &H,
    table: &PresetTable,
    strip_prefixes: &[&str],
    options: &ConvertOptions,
) -> RenameResult<RenamePlan> {
    let strip: Vec<String> = strip_prefixes.iter().map(|p| p.to_string()).collect();
    let mut plan = RenamePlan::new();

    for bone in hierarchy.bone_ids() {
        let name = hierarchy.name(bone);
        let mapped = table.lookup(name, false).unwrap_or(name);
        let (_, stripped) = strip_custom_prefix(mapped, &strip);
        let converted = if hierarchy.is_hidden(bone) {
            stripped.to_string()
        } else {
            convert_name(stripped, options)
        };
        if converted != name {
            debug!(from = name, to = %converted, "full conversion");
        }
        plan.push(name, converted)?;
    }

    plan.validate_against(hierarchy)?;
    info!(preset = %table.name, renames = plan.len(), "full conversion planned");
    Ok(plan)
}

/// Splits one CSV row, honouring double-quoted fields.
fn split_csv_row(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field).trim().to_string()),
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
