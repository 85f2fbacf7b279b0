//! Bonekit End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the naming flows:
//!
//! - **CLI**: skeleton file -> plan -> renamed skeleton file
//! - **Laws**: round-trip and idempotence of conversion (property tests)
//! - **Collision safety**: two-phase application never leaves duplicates
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bonekit-tests
//! ```

pub mod fixtures;
pub mod harness;
