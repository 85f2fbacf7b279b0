//! Bonekit CLI library.
//!
//! Command implementations and input loading for the `bonekit` binary. Every
//! command reads a skeleton document, plans its renames with `bonekit-core`,
//! and reports the plan before anything is written.

pub mod commands;
pub mod input;
