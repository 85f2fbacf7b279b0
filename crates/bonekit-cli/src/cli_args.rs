//! CLI argument definitions for the bonekit command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use bonekit_core::Delimiter;
use clap::{Args, Parser, Subcommand};

/// Bonekit - bone-name conversion and collision-safe renaming
#[derive(Parser)]
#[command(name = "bonekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by the commands that rename bones.
#[derive(Args, Debug)]
pub(crate) struct RenameArgs {
    /// Path to the skeleton JSON file
    #[arg(short, long)]
    pub skeleton: String,

    /// Path to a bonekit JSON config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Write the renamed skeleton to this file
    #[arg(short, long, conflicts_with = "write")]
    pub output: Option<String>,

    /// Overwrite the skeleton file in place
    #[arg(long)]
    pub write: bool,

    /// Print the plan without renaming anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output machine-readable JSON (no colored output)
    #[arg(long)]
    pub json: bool,
}

/// Conversion options shared by `convert` and `preset`.
#[derive(Args, Debug)]
pub(crate) struct ConvertFlags {
    /// Custom prefix to recognize (repeatable, first match wins)
    #[arg(short, long = "prefix")]
    pub prefixes: Vec<String>,

    /// Drop recognized prefixes from the converted names
    #[arg(long)]
    pub remove_prefix: bool,

    /// Side marker spelling (short: L/R, long: Left/Right, preserve)
    #[arg(long, value_parser = ["short", "long", "preserve"])]
    pub side: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List the naming conventions in detection order
    Conventions {
        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse bone names and show their components
    Detect {
        /// Bone name to parse (repeatable)
        #[arg(short, long = "name", required = true)]
        names: Vec<String>,

        /// Custom prefix to recognize (repeatable, first match wins)
        #[arg(short, long = "prefix")]
        prefixes: Vec<String>,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the chains formed by the selected bones
    Chains {
        /// Path to the skeleton JSON file
        #[arg(short, long)]
        skeleton: String,

        /// Output machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert visible bone names to a target convention
    Convert {
        #[command(flatten)]
        common: RenameArgs,

        /// Target convention id (e.g. "UpperArm_L", "Upper Arm.L", "L_UpperArm")
        #[arg(short, long)]
        to: Option<String>,

        #[command(flatten)]
        flags: ConvertFlags,
    },

    /// Number the bones of each selected chain
    Number {
        #[command(flatten)]
        common: RenameArgs,

        /// Separator before the ordinal (dot, underscore, space)
        #[arg(short, long)]
        delimiter: Option<Delimiter>,

        /// Name the last bone of each chain `<base><delim>end`
        #[arg(long)]
        end_bone: bool,

        /// Move a trailing _L/_R/.L/.R of the first name behind the ordinal
        #[arg(long)]
        side_suffix: bool,

        /// Select these bones instead of the file's selection (repeatable)
        #[arg(long = "select")]
        select: Vec<String>,
    },

    /// Rename bones through a preset name table
    Preset {
        #[command(flatten)]
        common: RenameArgs,

        /// Built-in preset (vroid, mmd)
        #[arg(long, conflicts_with = "table", required_unless_present = "table")]
        preset: Option<String>,

        /// Path to a two-column CSV or JSON table (generic, vendor)
        #[arg(long)]
        table: Option<String>,

        /// Rename generic names back to vendor names
        #[arg(long)]
        reversed: bool,

        /// Skip prefix stripping and conversion after a VRoid mapping
        #[arg(long)]
        no_full_convert: bool,

        /// Target convention for the conversion stage
        #[arg(short, long)]
        to: Option<String>,

        #[command(flatten)]
        flags: ConvertFlags,
    },
}
