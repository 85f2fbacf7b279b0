//! Convert command implementation
//!
//! Converts every visible bone name to a target convention.

use anyhow::Result;
use bonekit_core::{plan_conversion, Convention, ConvertOptions, Hierarchy, SideLength};
use colored::Colorize;
use std::process::ExitCode;

use super::reporting::{commit_plan, print_rename_error};
use super::OutputOptions;
use crate::input::{load_config, load_skeleton};

/// Command-line overrides for the `convert` config section.
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    pub to: Option<String>,
    pub prefixes: Vec<String>,
    pub remove_prefix: bool,
    pub side_length: Option<SideLength>,
}

impl ConvertArgs {
    /// Applies the overrides on top of configured options.
    pub fn apply(&self, mut options: ConvertOptions) -> Result<ConvertOptions, bonekit_core::RenameError> {
        if let Some(ref to) = self.to {
            options.target = to.parse::<Convention>()?;
        }
        if !self.prefixes.is_empty() {
            options.prefixes = self.prefixes.clone();
        }
        if self.remove_prefix {
            options.remove_prefix = true;
        }
        if let Some(side_length) = self.side_length {
            options.side_length = side_length;
        }
        Ok(options)
    }
}

/// Run the convert command
///
/// # Arguments
/// * `skeleton_path` - Path to the skeleton JSON file
/// * `config_path` - Optional configuration file
/// * `args` - Overrides for the configured conversion options
/// * `out` - Output and reporting options
///
/// # Returns
/// Exit code: 0 success, 1 if the plan is rejected
pub fn run(
    skeleton_path: &str,
    config_path: Option<&str>,
    args: &ConvertArgs,
    out: &OutputOptions,
) -> Result<ExitCode> {
    let config = load_config(config_path)?;
    let options = match args.apply(config.convert) {
        Ok(options) => options,
        Err(err) => {
            print_rename_error(&err);
            return Ok(ExitCode::from(1));
        }
    };

    let skeleton = load_skeleton(skeleton_path)?;
    if !out.json {
        println!(
            "{} {} -> {}",
            "Converting:".cyan().bold(),
            skeleton_path,
            options.target
        );
    }

    let planned = plan_conversion(&skeleton, &skeleton.visible_bones(), &options);
    commit_plan("convert", skeleton_path, skeleton, planned, out)
}
