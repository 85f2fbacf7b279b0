//! Preset command implementation
//!
//! Renames bones through a built-in or user-supplied name table.

use anyhow::Result;
use bonekit_core::{plan_full_conversion, PresetKind};
use colored::Colorize;
use std::process::ExitCode;

use super::convert::ConvertArgs;
use super::reporting::{commit_plan, print_rename_error};
use super::OutputOptions;
use crate::input::{load_config, load_preset, load_skeleton};

/// Options for the preset command.
#[derive(Debug, Clone, Default)]
pub struct PresetArgs {
    /// Built-in preset name (`vroid`, `mmd`).
    pub preset: Option<String>,
    /// Path to a CSV or JSON table.
    pub table: Option<String>,
    /// Rename generic names back to vendor names.
    pub reversed: bool,
    /// Skip prefix stripping and conversion after a forward VRoid mapping.
    pub no_full_convert: bool,
    /// Overrides for the conversion stage.
    pub convert: ConvertArgs,
}

/// Whether the table mapping is followed by prefix stripping and conversion.
fn uses_full_conversion(kind: Option<PresetKind>, args: &PresetArgs) -> bool {
    kind == Some(PresetKind::Vroid) && !args.reversed && !args.no_full_convert
}

/// Run the preset command
///
/// # Arguments
/// * `skeleton_path` - Path to the skeleton JSON file
/// * `config_path` - Optional configuration file
/// * `args` - Preset selection and direction
/// * `out` - Output and reporting options
///
/// # Returns
/// Exit code: 0 success, 1 if the plan is rejected
pub fn run(
    skeleton_path: &str,
    config_path: Option<&str>,
    args: &PresetArgs,
    out: &OutputOptions,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let (table, kind) = load_preset(args.preset.as_deref(), args.table.as_deref())?;
    let skeleton = load_skeleton(skeleton_path)?;

    if !out.json {
        println!(
            "{} {} ({} pair(s){})",
            "Preset:".cyan().bold(),
            table.name(),
            table.len(),
            if args.reversed { ", reversed" } else { "" }
        );
    }

    let planned = match kind {
        Some(kind) if uses_full_conversion(Some(kind), args) => {
            let options = match args.convert.apply(config.convert) {
                Ok(options) => options,
                Err(err) => {
                    print_rename_error(&err);
                    return Ok(ExitCode::from(1));
                }
            };
            plan_full_conversion(&skeleton, &table, kind.vendor_prefixes(), &options)
        }
        _ => table.plan(&skeleton, args.reversed),
    };

    commit_plan("preset", skeleton_path, skeleton, planned, out)
}
