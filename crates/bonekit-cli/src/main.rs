//! Bonekit CLI - bone-name conversion and collision-safe renaming
//!
//! This binary converts bone names between naming conventions, numbers bone
//! chains and applies preset name tables to skeleton JSON documents.

use clap::Parser;
use std::process::ExitCode;

use bonekit_cli::commands::convert::ConvertArgs;
use bonekit_cli::commands::number::NumberArgs;
use bonekit_cli::commands::preset::PresetArgs;
use bonekit_cli::commands::{self, OutputOptions};
use bonekit_core::SideLength;

mod cli_args;

use cli_args::{Cli, Commands, ConvertFlags, RenameArgs};

fn init_logging(verbose: bool) {
    let log_level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn side_length(side: Option<&str>) -> Option<SideLength> {
    match side {
        Some("short") => Some(SideLength::Short),
        Some("long") => Some(SideLength::Long),
        Some("preserve") => Some(SideLength::Preserve),
        _ => None,
    }
}

fn convert_args(to: Option<String>, flags: ConvertFlags) -> ConvertArgs {
    ConvertArgs {
        to,
        prefixes: flags.prefixes,
        remove_prefix: flags.remove_prefix,
        side_length: side_length(flags.side.as_deref()),
    }
}

fn output_options(common: &RenameArgs) -> OutputOptions {
    OutputOptions {
        output: common.output.clone(),
        write: common.write,
        dry_run: common.dry_run,
        json: common.json,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Conventions { json } => commands::conventions::run(json),
        Commands::Detect {
            names,
            prefixes,
            json,
        } => commands::detect::run(&names, &prefixes, json),
        Commands::Chains { skeleton, json } => commands::chains::run(&skeleton, json),
        Commands::Convert { common, to, flags } => commands::convert::run(
            &common.skeleton,
            common.config.as_deref(),
            &convert_args(to, flags),
            &output_options(&common),
        ),
        Commands::Number {
            common,
            delimiter,
            end_bone,
            side_suffix,
            select,
        } => commands::number::run(
            &common.skeleton,
            common.config.as_deref(),
            &NumberArgs {
                delimiter,
                end_bone,
                side_suffix,
                select,
            },
            &output_options(&common),
        ),
        Commands::Preset {
            common,
            preset,
            table,
            reversed,
            no_full_convert,
            to,
            flags,
        } => commands::preset::run(
            &common.skeleton,
            common.config.as_deref(),
            &PresetArgs {
                preset,
                table,
                reversed,
                no_full_convert,
                convert: convert_args(to, flags),
            },
            &output_options(&common),
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
