//! Loading of skeleton documents, preset tables and configuration files.

use anyhow::{Context, Result};
use bonekit_core::{BonekitConfig, PresetKind, PresetTable, Skeleton};
use std::fs;
use std::path::Path;

/// Reads and validates a skeleton JSON document.
pub fn load_skeleton(path: &str) -> Result<Skeleton> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read skeleton file: {}", path))?;
    Skeleton::from_json(&text).with_context(|| format!("Invalid skeleton file: {}", path))
}

/// Writes a skeleton as pretty-printed JSON.
pub fn write_skeleton(skeleton: &Skeleton, path: &str) -> Result<()> {
    let json = skeleton
        .to_json_pretty()
        .context("Failed to serialize skeleton")?;
    fs::write(path, json).with_context(|| format!("Failed to write to: {}", path))
}

/// Loads the configuration file, or the defaults when none is given.
pub fn load_config(path: Option<&str>) -> Result<BonekitConfig> {
    match path {
        Some(p) => BonekitConfig::load(Path::new(p))
            .with_context(|| format!("Failed to load config: {}", p)),
        None => Ok(BonekitConfig::default()),
    }
}

/// Resolves a built-in preset name or a table file.
///
/// Files ending in `.json` are read as JSON pair lists, anything else as CSV.
/// Returns the built-in kind alongside the table when one was used.
pub fn load_preset(
    preset: Option<&str>,
    table_path: Option<&str>,
) -> Result<(PresetTable, Option<PresetKind>)> {
    match (preset, table_path) {
        (Some(name), None) => {
            let kind: PresetKind = name.parse()?;
            Ok((kind.table(), Some(kind)))
        }
        (None, Some(path)) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read preset table: {}", path))?;
            let name = Path::new(path)
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string());
            let is_json = Path::new(path)
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("json"));
            let table = if is_json {
                PresetTable::from_json(name, &text)
            } else {
                PresetTable::from_csv(name, &text)
            }
            .with_context(|| format!("Invalid preset table: {}", path))?;
            Ok((table, None))
        }
        (Some(_), Some(_)) => anyhow::bail!("--preset and --table cannot be used together"),
        (None, None) => anyhow::bail!("either --preset or --table is required"),
    }
}
