//! Conventions command implementation
//!
//! Lists the naming conventions in detection priority order.

use anyhow::Result;
use bonekit_core::{Convention, SideType, WordCasing};
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;

use super::reporting::print_json;

#[derive(Debug, Serialize)]
struct ConventionRow {
    priority: usize,
    id: &'static str,
    side_type: SideType,
    side_template: &'static str,
    word_separator: Option<&'static str>,
    word_casing: WordCasing,
}

fn rows() -> Vec<ConventionRow> {
    Convention::PRIORITY
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let spec = c.spec();
            ConventionRow {
                priority: i + 1,
                id: spec.id,
                side_type: spec.side_type,
                side_template: spec.side_template,
                word_separator: spec.word_separator,
                word_casing: spec.word_casing,
            }
        })
        .collect()
}

/// Run the conventions command
///
/// # Returns
/// Exit code: always 0
pub fn run(json: bool) -> Result<ExitCode> {
    let rows = rows();
    if json {
        print_json(&rows)?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Conventions (detection order):".cyan().bold());
    for row in &rows {
        let separator = match row.word_separator {
            Some("") => "none".to_string(),
            Some(sep) => format!("{:?}", sep),
            None => "verbatim".to_string(),
        };
        println!(
            "  {}. {:<12} {} {:<7} {} {:<5} {} {}",
            row.priority,
            row.id.bold(),
            "side:".dimmed(),
            format!("{:?}", row.side_type).to_lowercase(),
            "template:".dimmed(),
            row.side_template,
            "words:".dimmed(),
            separator
        );
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_follow_priority() {
        let rows = rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0].id, "UpperArm_L");
        assert_eq!(rows[6].id, "L_UpperArm");
        assert_eq!(rows[7].id, "Generic");
        assert_eq!(rows[7].word_separator, None);
    }

    #[test]
    fn test_rows_serialize() {
        let json = serde_json::to_value(rows()).unwrap();
        assert_eq!(json[6]["side_type"], "prefix");
        assert_eq!(json[0]["word_casing"], "capitalize_each");
    }
}
