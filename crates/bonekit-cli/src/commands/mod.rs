//! CLI command implementations

pub mod chains;
pub mod conventions;
pub mod convert;
pub mod detect;
pub mod number;
pub mod preset;

mod reporting;

/// Where and how a mutating command reports and saves its result.
#[derive(Debug, Clone, Default)]
pub struct OutputOptions {
    /// Write the renamed skeleton here.
    pub output: Option<String>,
    /// Overwrite the input skeleton file.
    pub write: bool,
    /// Print the plan without applying it.
    pub dry_run: bool,
    /// Print machine-readable JSON instead of colored text.
    pub json: bool,
}
