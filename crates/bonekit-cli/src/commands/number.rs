//! Number command implementation
//!
//! Numbers the bones of every chain in the current selection.

use anyhow::Result;
use bonekit_core::{plan_numbering, segment_chains, Delimiter, Hierarchy, NumberingOptions};
use colored::Colorize;
use std::process::ExitCode;

use super::reporting::commit_plan;
use super::OutputOptions;
use crate::input::{load_config, load_skeleton};

/// Command-line overrides for the `numbering` config section.
#[derive(Debug, Clone, Default)]
pub struct NumberArgs {
    pub delimiter: Option<Delimiter>,
    pub end_bone: bool,
    pub side_suffix: bool,
    /// Bone names to select instead of the document's selection.
    pub select: Vec<String>,
}

impl NumberArgs {
    /// Applies the overrides on top of configured options.
    pub fn apply(&self, mut options: NumberingOptions) -> NumberingOptions {
        if let Some(delimiter) = self.delimiter {
            options.delimiter = delimiter;
        }
        if self.end_bone {
            options.mark_end_bone = true;
        }
        if self.side_suffix {
            options.side_suffix_from_name = true;
        }
        options
    }
}

/// Run the number command
///
/// # Arguments
/// * `skeleton_path` - Path to the skeleton JSON file
/// * `config_path` - Optional configuration file
/// * `args` - Overrides for the configured numbering options
/// * `out` - Output and reporting options
///
/// # Returns
/// Exit code: 0 success, 1 if nothing is selected or the plan is rejected
pub fn run(
    skeleton_path: &str,
    config_path: Option<&str>,
    args: &NumberArgs,
    out: &OutputOptions,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let options = args.apply(config.numbering);
    let mut skeleton = load_skeleton(skeleton_path)?;

    if !args.select.is_empty() {
        let names: Vec<&str> = args.select.iter().map(String::as_str).collect();
        let missing = skeleton.select_only(&names);
        if !missing.is_empty() {
            anyhow::bail!("Unknown bone(s) in --select: {}", missing.join(", "));
        }
    }

    let chains = segment_chains(&skeleton, &skeleton.selected_bones());
    if !out.json {
        println!(
            "{} {} ({} chain(s), delimiter {})",
            "Numbering:".cyan().bold(),
            skeleton_path,
            chains.len(),
            options.delimiter
        );
    }

    let planned = plan_numbering(&skeleton, &chains, &options);
    commit_plan("number", skeleton_path, skeleton, planned, out)
}
