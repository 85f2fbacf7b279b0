//! Shared plan reporting and commit logic for the mutating commands.

use anyhow::Result;
use bonekit_core::{apply_plan, RenameError, RenamePlan, RenameResult, Skeleton};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use super::OutputOptions;
use crate::input::write_skeleton;

/// Machine-readable result of a mutating command.
#[derive(Debug, Serialize)]
pub(crate) struct PlanOutput<'a> {
    pub command: &'a str,
    pub success: bool,
    pub renames: Option<&'a RenamePlan>,
    pub applied: bool,
    pub written_to: Option<&'a str>,
    pub error: Option<JsonError>,
}

/// A core error in JSON form.
#[derive(Debug, Serialize)]
pub(crate) struct JsonError {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub collisions: Vec<bonekit_core::Collision>,
}

impl From<&RenameError> for JsonError {
    fn from(err: &RenameError) -> Self {
        let collisions = match err {
            RenameError::CollisionDetected { collisions } => collisions.clone(),
            _ => Vec::new(),
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            collisions,
        }
    }
}

/// Reports a planned rename batch, applies it, and saves the skeleton.
///
/// Planning and apply failures are reported and turn into exit code 1; I/O
/// failures propagate as errors.
pub(crate) fn commit_plan(
    command: &str,
    skeleton_path: &str,
    mut skeleton: Skeleton,
    planned: RenameResult<RenamePlan>,
    out: &OutputOptions,
) -> Result<ExitCode> {
    let plan = match planned {
        Ok(plan) => plan,
        Err(err) => return report_failure(command, None, &err, out),
    };

    let destination = match (&out.output, out.write) {
        (Some(path), _) => Some(path.as_str()),
        (None, true) => Some(skeleton_path),
        (None, false) => None,
    };

    if !out.json {
        print_plan(&plan);
    }

    if out.dry_run {
        if out.json {
            print_json(&PlanOutput {
                command,
                success: true,
                renames: Some(&plan),
                applied: false,
                written_to: None,
                error: None,
            })?;
        } else {
            println!("{} Dry run, nothing renamed", "SUCCESS".green().bold());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let report = match apply_plan(&mut skeleton, &plan) {
        Ok(report) => report,
        Err(err) => return report_failure(command, Some(&plan), &err, out),
    };

    if let Some(path) = destination {
        write_skeleton(&skeleton, path)?;
    }

    if out.json {
        print_json(&PlanOutput {
            command,
            success: true,
            renames: Some(&plan),
            applied: true,
            written_to: destination,
            error: None,
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    match destination {
        Some(path) => println!(
            "{} Renamed {} bone(s), written to: {}",
            "SUCCESS".green().bold(),
            report.renamed,
            path
        ),
        None => {
            println!("{} Renamed {} bone(s)", "SUCCESS".green().bold(), report.renamed);
            println!(
                "{} Result not saved (use --output or --write)",
                "WARNING".yellow().bold()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn report_failure(
    command: &str,
    plan: Option<&RenamePlan>,
    err: &RenameError,
    out: &OutputOptions,
) -> Result<ExitCode> {
    if out.json {
        print_json(&PlanOutput {
            command,
            success: false,
            renames: plan,
            applied: false,
            written_to: None,
            error: Some(JsonError::from(err)),
        })?;
    } else {
        print_rename_error(err);
    }
    Ok(ExitCode::from(1))
}

/// Prints each planned rename.
pub(crate) fn print_plan(plan: &RenamePlan) {
    if plan.is_empty() {
        println!("{}", "No bones need renaming".dimmed());
        return;
    }
    println!("{} {} rename(s)", "Plan:".cyan().bold(), plan.len());
    for rename in plan {
        println!("  {} {} {}", rename.from, "->".dimmed(), rename.to);
    }
}

/// Prints a core error with its code.
pub(crate) fn print_rename_error(err: &RenameError) {
    match err {
        RenameError::CollisionDetected { collisions } => {
            println!(
                "{} [{}] {} colliding target name(s)",
                "ERROR".red().bold(),
                err.code(),
                collisions.len()
            );
            for collision in collisions {
                println!("  {} {}", "x".red(), collision);
            }
        }
        _ => println!("{} [{}] {}", "ERROR".red().bold(), err.code(), err),
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
