//! Detect command implementation
//!
//! Parses names and prints the detected convention and components.

use anyhow::Result;
use bonekit_core::NameComponents;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use super::reporting::print_json;

#[derive(Debug, Serialize)]
struct Detection<'a> {
    name: &'a str,
    components: NameComponents,
}

/// Run the detect command
///
/// # Arguments
/// * `names` - Bone names to parse
/// * `prefixes` - Custom prefixes to recognize, in priority order
/// * `json` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: always 0, since detection never fails
pub fn run(names: &[String], prefixes: &[String], json: bool) -> Result<ExitCode> {
    let detections: Vec<Detection> = names
        .iter()
        .map(|name| Detection {
            name,
            components: NameComponents::parse(name, prefixes),
        })
        .collect();

    if json {
        print_json(&detections)?;
        return Ok(ExitCode::SUCCESS);
    }

    for d in &detections {
        let c = &d.components;
        println!("{} {}", "Name:".cyan().bold(), d.name);
        println!("  {:<11} {}", "convention".dimmed(), c.convention);
        if !c.custom_prefix.is_empty() {
            println!("  {:<11} {}", "prefix".dimmed(), c.custom_prefix);
        }
        println!("  {:<11} {} [{}]", "base".dimmed(), c.base, c.base_words.join(", "));
        if let Some(ref side) = c.side {
            println!(
                "  {:<11} {:?} ({}, {:?})",
                "side".dimmed(),
                side.side,
                side.spelling(),
                side.placement
            );
        }
        if !c.ordinal_suffix.is_empty() {
            println!("  {:<11} {}", "ordinal".dimmed(), c.ordinal_suffix);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_accepts_any_name() {
        let names = vec!["UpperArm_L".to_string(), "腕".to_string(), String::new()];
        assert_eq!(run(&names, &[], false).unwrap(), ExitCode::SUCCESS);
        assert_eq!(run(&names, &["Twist_".to_string()], true).unwrap(), ExitCode::SUCCESS);
    }
}
