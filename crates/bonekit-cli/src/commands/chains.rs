//! Chains command implementation
//!
//! Prints the chains formed by the selected bones and their numbering order.

use anyhow::Result;
use bonekit_core::{segment_chains, traversal_order, Hierarchy, Skeleton};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use super::reporting::print_json;
use crate::input::load_skeleton;

#[derive(Debug, Serialize, PartialEq)]
struct ChainRow {
    /// Bones in selection order.
    bones: Vec<String>,
    /// Bones in numbering order.
    traversal: Vec<String>,
}

fn chain_rows(skeleton: &Skeleton) -> Vec<ChainRow> {
    let names = |ids: &[bonekit_core::BoneId]| -> Vec<String> {
        ids.iter().map(|&b| skeleton.name(b).to_string()).collect()
    };
    segment_chains(skeleton, &skeleton.selected_bones())
        .iter()
        .map(|chain| ChainRow {
            bones: names(chain.bones()),
            traversal: names(&traversal_order(skeleton, chain)),
        })
        .collect()
}

/// Run the chains command
///
/// # Arguments
/// * `skeleton_path` - Path to the skeleton JSON file
/// * `json` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 success, 1 if no bones are selected
pub fn run(skeleton_path: &str, json: bool) -> Result<ExitCode> {
    let skeleton = load_skeleton(skeleton_path)?;
    let rows = chain_rows(&skeleton);

    if json {
        print_json(&rows)?;
    } else if rows.is_empty() {
        println!("{} No bones selected", "WARNING".yellow().bold());
    } else {
        for (i, row) in rows.iter().enumerate() {
            println!(
                "{} {} ({} bone(s))",
                "Chain".cyan().bold(),
                i + 1,
                row.bones.len()
            );
            println!("  {} {}", "selection".dimmed(), row.bones.join(" -> "));
            println!("  {} {}", "traversal".dimmed(), row.traversal.join(" -> "));
        }
    }

    Ok(if rows.is_empty() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}
