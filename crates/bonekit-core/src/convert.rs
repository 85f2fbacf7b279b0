//! Batch conversion of bone names to a target convention.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::components::{NameComponents, SideLength};
use crate::convention::Convention;
use crate::error::{RenameError, RenameResult};
use crate::plan::RenamePlan;
use crate::skeleton::{BoneId, Hierarchy};

/// Options for converting names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertOptions {
    /// Convention to render names in.
    #[serde(default = "default_target")]
    pub target: Convention,
    /// Custom prefixes recognized at the start of names, in priority order.
    #[serde(default)]
    pub prefixes: Vec<String>,
    /// Drop the recognized prefix from the output.
    #[serde(default)]
    pub remove_prefix: bool,
    /// Side marker spelling in the output.
    #[serde(default)]
    pub side_length: SideLength,
}

fn default_target() -> Convention {
    Convention::CamelUnderscore
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new(default_target())
    }
}

impl ConvertOptions {
    /// Creates options for `target` with no prefixes and short sides.
    pub fn new(target: Convention) -> Self {
        Self {
            target,
            prefixes: Vec::new(),
            remove_prefix: false,
            side_length: SideLength::default(),
        }
    }

    /// Sets the recognized custom prefixes.
    pub fn with_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Drops recognized prefixes from converted names.
    pub fn with_remove_prefix(mut self, remove: bool) -> Self {
        self.remove_prefix = remove;
        self
    }

    /// Sets the side marker spelling.
    pub fn with_side_length(mut self, side_length: SideLength) -> Self {
        self.side_length = side_length;
        self
    }
}

/// Converts a single name.
///
/// A name whose conversion would itself convert differently is returned
/// unchanged, so converting twice always equals converting once.
///
/// # Example
/// ```
/// use bonekit_core::convention::Convention;
/// use bonekit_core::convert::{convert_name, ConvertOptions};
///
/// let options = ConvertOptions::new(Convention::SpacedDot);
/// assert_eq!(convert_name("UpperArm_L", &options), "Upper Arm.L");
/// ```
pub fn convert_name(name: &str, options: &ConvertOptions) -> String {
    let converted = convert_once(name, options);
    if converted != name && convert_once(&converted, options) != converted {
        debug!(from = name, to = %converted, "ambiguous side split, name kept");
        return name.to_string();
    }
    converted
}

fn convert_once(name: &str, options: &ConvertOptions) -> String {
    let mut components = NameComponents::parse(name, &options.prefixes);
    if options.remove_prefix {
        components.custom_prefix.clear();
    }
    components.normalize_side(options.side_length);
    components.render(options.target)
}

/// Plans the conversion of `bones`, skipping hidden ones.
///
/// Bones whose name would not change are left out of the plan. Fails with
/// [`RenameError::NoHierarchySelected`] when `bones` is empty and with
/// [`RenameError::CollisionDetected`] when two bones would share a name.
pub fn plan_conversion<H: Hierarchy + ?Sized>(
    hierarchy: &H,
    bones: &[BoneId],
    options: &ConvertOptions,
) -> RenameResult<RenamePlan> {
    if bones.is_empty() {
        return Err(RenameError::NoHierarchySelected);
    }

    let mut plan = RenamePlan::new();
    for &bone in bones {
        if hierarchy.is_hidden(bone) {
            continue;
        }
        let name = hierarchy.name(bone);
        let converted = convert_name(name, options);
        if converted != name {
            debug!(from = name, to = %converted, "convert");
        }
        plan.push(name, converted)?;
    }

    plan.validate_against(hierarchy)?;
    info!(convention = %options.target, renames = plan.len(), "conversion planned");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::apply_plan;
    use crate::skeleton::{BoneDef, Skeleton};
    use pretty_assertions::assert_eq;

    fn skeleton(defs: Vec<BoneDef>) -> Skeleton {
        Skeleton::from_defs(defs).unwrap()
    }

    fn bone(name: &str) -> BoneDef {
        BoneDef::new(name, [0.0; 3], [0.0; 3])
    }

    #[test]
    fn test_convert_to_long_sides() {
        let opts = ConvertOptions::new(Convention::SpacedDot).with_side_length(SideLength::Long);
        assert_eq!(convert_name("UpperArm_L", &opts), "Upper Arm.Left");
    }

    #[test]
    fn test_convert_to_short_sides() {
        let opts = ConvertOptions::new(Convention::SpacedDot);
        assert_eq!(convert_name("Upper Arm.Left", &opts), "Upper Arm.L");
    }

    #[test]
    fn test_sideless_name_is_unchanged() {
        let opts = ConvertOptions::new(Convention::CamelDot);
        assert_eq!(convert_name("Root", &opts), "Root");
        assert_eq!(convert_name("Spine.002", &opts), "Spine.002");
    }

    #[test]
    fn test_ordinal_is_kept() {
        let opts = ConvertOptions::new(Convention::SnakeUnderscore);
        assert_eq!(convert_name("UpperArm.R.003", &opts), "Upper_Arm_R.003");
    }

    #[test]
    fn test_prefix_kept_or_removed() {
        let opts = ConvertOptions::new(Convention::CamelDot).with_prefixes(["J_Bip_"]);
        assert_eq!(convert_name("J_Bip_UpperArm_L", &opts), "J_Bip_UpperArm.L");
        let opts = opts.with_remove_prefix(true);
        assert_eq!(convert_name("J_Bip_UpperArm_L", &opts), "UpperArm.L");
    }

    #[test]
    fn test_conversion_is_idempotent() {
        let names = ["UpperArm_L", "upper_arm.Right", "L_Hand", "Root", "Thumb2_R.001", "腕_L"];
        for target in Convention::PRIORITY {
            for side_length in [SideLength::Short, SideLength::Long, SideLength::Preserve] {
                let opts = ConvertOptions::new(target).with_side_length(side_length);
                for name in names {
                    let once = convert_name(name, &opts);
                    assert_eq!(convert_name(&once, &opts), once, "{} via {}", name, target);
                }
            }
        }
    }

    #[test]
    fn test_side_token_bases_are_left_alone() {
        for name in ["LeftRight", "RightL", "LeftL", "Left_L", "R_Left", "L.R"] {
            for target in Convention::PRIORITY {
                for side_length in [SideLength::Short, SideLength::Long, SideLength::Preserve] {
                    let opts = ConvertOptions::new(target).with_side_length(side_length);
                    let once = convert_name(name, &opts);
                    assert_eq!(convert_name(&once, &opts), once, "{} via {} {:?}", name, target, side_length);
                }
            }
        }

        let short = ConvertOptions::new(Convention::Generic);
        assert_eq!(convert_name("LeftRight", &short), "LeftRight");
        let long = ConvertOptions::new(Convention::SidePrefix).with_side_length(SideLength::Long);
        assert_eq!(convert_name("LeftL", &long), "LeftL");
        assert_eq!(convert_name("RightL", &ConvertOptions::new(Convention::SidePrefix)), "RightL");
    }

    #[test]
    fn test_plan_skips_hidden_and_unchanged() {
        let sk = skeleton(vec![bone("UpperArm_L"), bone("Root"), bone("Hand_R").hidden()]);
        let opts = ConvertOptions::new(Convention::CamelDot);
        let plan = plan_conversion(&sk, &sk.bone_ids(), &opts).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.target_of("UpperArm_L"), Some("UpperArm.L"));
        assert_eq!(plan.target_of("Hand_R"), None);
    }

    #[test]
    fn test_plan_rejects_empty_selection() {
        let sk = skeleton(vec![bone("Root")]);
        let opts = ConvertOptions::default();
        assert_eq!(plan_conversion(&sk, &[], &opts), Err(RenameError::NoHierarchySelected));
    }

    #[test]
    fn test_plan_detects_collision() {
        let sk = skeleton(vec![bone("Arm.L"), bone("Arm_Left")]);
        let opts = ConvertOptions::new(Convention::CamelUnderscore);
        let err = plan_conversion(&sk, &sk.bone_ids(), &opts).unwrap_err();
        match err {
            RenameError::CollisionDetected { collisions } => {
                assert_eq!(collisions.len(), 1);
                assert_eq!(collisions[0].target, "Arm_L");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_plan_detects_collision_with_hidden_bone() {
        let sk = skeleton(vec![bone("Arm.L"), bone("Arm_L").hidden()]);
        let opts = ConvertOptions::new(Convention::CamelUnderscore);
        let err = plan_conversion(&sk, &sk.bone_ids(), &opts).unwrap_err();
        assert_eq!(err.code(), "BK003");
    }

    #[test]
    fn test_apply_converted_plan() {
        let mut sk = skeleton(vec![bone("UpperArm_L"), bone("UpperArm_R"), bone("Root")]);
        let opts = ConvertOptions::new(Convention::SidePrefix);
        let plan = plan_conversion(&sk, &sk.bone_ids(), &opts).unwrap();
        apply_plan(&mut sk, &plan).unwrap();
        assert_eq!(sk.names(), vec!["L_UpperArm", "R_UpperArm", "Root"]);
    }

    #[test]
    fn test_options_from_json_defaults() {
        let opts: ConvertOptions = serde_json::from_str(r#"{ "target": "Upper Arm.L" }"#).unwrap();
        assert_eq!(opts.target, Convention::SpacedDot);
        assert_eq!(opts.side_length, SideLength::Short);
        assert!(opts.prefixes.is_empty());
    }
}
