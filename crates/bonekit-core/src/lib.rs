//! Bonekit Core Library
//!
//! Bone-name convention detection, conversion between conventions, and
//! collision-safe batch renaming for skeletal rigs.
//!
//! # Overview
//!
//! - A name is parsed into [`NameComponents`] (custom prefix, base words,
//!   side marker, ordinal) and rendered back under any [`Convention`].
//! - Batch operations never rename directly. They produce a [`RenamePlan`]
//!   that is validated for collisions and then committed with
//!   [`apply_plan`], which goes through unique temporary names so no
//!   intermediate state holds a duplicate.
//!
//! # Example
//!
//! ```
//! use bonekit_core::{apply_plan, plan_conversion, BoneDef, Convention, ConvertOptions, Skeleton};
//! use bonekit_core::skeleton::Hierarchy;
//!
//! let mut skeleton = Skeleton::from_defs(vec![
//!     BoneDef::new("UpperArm_L", [0.0, 0.0, 0.0], [1.0, 0.0, 0.0]),
//!     BoneDef::new("Root", [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
//! ])
//! .unwrap();
//!
//! let options = ConvertOptions::new(Convention::SpacedDot);
//! let plan = plan_conversion(&skeleton, &skeleton.visible_bones(), &options).unwrap();
//! apply_plan(&mut skeleton, &plan).unwrap();
//!
//! assert_eq!(skeleton.names(), vec!["Upper Arm.L", "Root"]);
//! ```
//!
//! # Modules
//!
//! - [`skeleton`]: Host hierarchy traits and the in-memory [`Skeleton`]
//! - [`chain`]: Chain segmentation of a bone selection
//! - [`convention`]: The convention registry and detection
//! - [`components`]: Name parsing and rendering
//! - [`convert`]: Batch conversion to a target convention
//! - [`numbering`]: Sequential chain numbering
//! - [`plan`]: Rename plans and the two-phase applier
//! - [`preset`]: Vendor name tables
//! - [`config`]: JSON configuration
//! - [`error`]: Error types

pub mod chain;
pub mod components;
pub mod config;
pub mod convention;
pub mod convert;
pub mod error;
pub mod numbering;
pub mod plan;
pub mod preset;
pub mod skeleton;

// Re-export commonly used types at the crate root
pub use chain::{segment_chains, Chain};
pub use components::{NameComponents, Side, SideForm, SideLength, SideMarker, SidePlacement};
pub use config::BonekitConfig;
pub use convention::{Convention, ConventionSpec, SideType, WordCasing};
pub use convert::{convert_name, plan_conversion, ConvertOptions};
pub use error::{
    Collision, ConfigError, PresetError, RenameError, RenameRejected, RenameResult, SkeletonError,
};
pub use numbering::{plan_numbering, traversal_order, Delimiter, NumberingOptions};
pub use plan::{apply_plan, apply_plan_single_phase, ApplyReport, Rename, RenamePlan};
pub use preset::{plan_full_conversion, PresetKind, PresetTable, VROID_PREFIXES};
pub use skeleton::{BoneDef, BoneId, Hierarchy, NameTable, Skeleton};

#[cfg(test)]
mod integration_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// A left arm chain plus an unrelated tail, as a host would export it.
    fn rig_json() -> &'static str {
        r#"{
            "bones": [
                { "bone": "Hips", "head": [0, 0, 1], "tail": [0, 0, 1.1] },
                { "bone": "upper_arm.L", "head": [0.2, 0, 1.4], "tail": [0.4, 0, 1.4], "parent": "Hips", "selected": true },
                { "bone": "forearm.L", "head": [0.4, 0, 1.4], "tail": [0.6, 0, 1.4], "parent": "upper_arm.L", "selected": true },
                { "bone": "hand.L", "head": [0.6, 0, 1.4], "tail": [0.7, 0, 1.4], "parent": "forearm.L", "selected": true },
                { "bone": "Tail", "head": [0, 0.1, 1], "tail": [0, 0.3, 1], "parent": "Hips", "selected": true },
                { "bone": "Tail.x", "head": [0, 0.3, 1], "tail": [0, 0.5, 1], "parent": "Tail", "selected": true },
                { "bone": "IK_hand.L", "head": [0.6, 0, 1.4], "tail": [0.6, -0.2, 1.4], "hidden": true }
            ]
        }"#
    }

    #[test]
    fn test_convert_then_number() {
        let mut sk = Skeleton::from_json(rig_json()).unwrap();

        let options = ConvertOptions::new(Convention::CamelUnderscore);
        let plan = plan_conversion(&sk, &sk.bone_ids(), &options).unwrap();
        apply_plan(&mut sk, &plan).unwrap();
        assert_eq!(
            sk.names(),
            vec!["Hips", "UpperArm_L", "Forearm_L", "Hand_L", "Tail", "Tail.x", "IK_hand.L"]
        );

        let chains = segment_chains(&sk, &sk.selected_bones());
        assert_eq!(chains.len(), 2);
        let plan = plan_numbering(&sk, &chains, &NumberingOptions::default().with_end_bone(true)).unwrap();
        apply_plan(&mut sk, &plan).unwrap();
        assert_eq!(
            sk.names(),
            vec!["Hips", "UpperArm_L", "UpperArm_L.001", "UpperArm_L.end", "Tail", "Tail.end", "IK_hand.L"]
        );
    }

    #[test]
    fn test_detect_and_render_round_trip() {
        for name in ["UpperArm_L", "Upper Arm_L", "upper_arm_L", "UpperArm.L", "Upper Arm.L", "L_UpperArm"] {
            let c = NameComponents::parse(name, &[]);
            assert_eq!(c.render(c.convention), name);
        }
    }
}
