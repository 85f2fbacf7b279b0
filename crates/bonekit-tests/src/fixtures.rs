//! Skeleton fixtures shared by the integration tests.

use bonekit_core::{BoneDef, Skeleton};

/// A small humanoid arm rig in Blender-style `.L`/`.R` names.
///
/// The left arm chain and the tail chain are selected; `IK_hand.L` is hidden.
pub fn blender_arm_rig() -> Vec<BoneDef> {
    vec![
        BoneDef::new("Hips", [0.0, 0.0, 1.0], [0.0, 0.0, 1.1]),
        BoneDef::new("upper_arm.L", [0.2, 0.0, 1.4], [0.4, 0.0, 1.4])
            .with_parent("Hips")
            .selected(),
        BoneDef::new("forearm.L", [0.4, 0.0, 1.4], [0.6, 0.0, 1.4])
            .with_parent("upper_arm.L")
            .selected(),
        BoneDef::new("hand.L", [0.6, 0.0, 1.4], [0.7, 0.0, 1.4])
            .with_parent("forearm.L")
            .selected(),
        BoneDef::new("upper_arm.R", [-0.2, 0.0, 1.4], [-0.4, 0.0, 1.4]).with_parent("Hips"),
        BoneDef::new("Tail", [0.0, 0.1, 1.0], [0.0, 0.3, 1.0])
            .with_parent("Hips")
            .selected(),
        BoneDef::new("Tail.x", [0.0, 0.3, 1.0], [0.0, 0.5, 1.0])
            .with_parent("Tail")
            .selected(),
        BoneDef::new("IK_hand.L", [0.6, 0.0, 1.4], [0.6, -0.2, 1.4]).hidden(),
    ]
}

/// A VRoid Studio export fragment.
pub fn vroid_rig() -> Vec<BoneDef> {
    vec![
        BoneDef::new("J_Bip_C_Hips", [0.0, 0.0, 1.0], [0.0, 0.0, 1.1]),
        BoneDef::new("J_Bip_C_Spine", [0.0, 0.0, 1.1], [0.0, 0.0, 1.2]).with_parent("J_Bip_C_Hips"),
        BoneDef::new("J_Bip_L_UpperArm", [0.2, 0.0, 1.4], [0.4, 0.0, 1.4]).with_parent("J_Bip_C_Spine"),
        BoneDef::new("J_Bip_R_UpperArm", [-0.2, 0.0, 1.4], [-0.4, 0.0, 1.4]).with_parent("J_Bip_C_Spine"),
        BoneDef::new("J_Sec_L_Bust1", [0.1, 0.1, 1.3], [0.1, 0.2, 1.3]).with_parent("J_Bip_C_Spine"),
        BoneDef::new("J_Adj_L_FaceEye", [0.05, 0.1, 1.6], [0.05, 0.15, 1.6]),
    ]
}

/// A straight chain of `names`, each parented to the previous one, all selected.
pub fn straight_chain(names: &[&str]) -> Vec<BoneDef> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let def = BoneDef::new(*name, [0.0, i as f64, 0.0], [0.0, (i + 1) as f64, 0.0]).selected();
            if i == 0 {
                def
            } else {
                def.with_parent(names[i - 1])
            }
        })
        .collect()
}

/// Builds a skeleton from fixture definitions.
pub fn skeleton(defs: Vec<BoneDef>) -> Skeleton {
    Skeleton::from_defs(defs).expect("fixture skeleton is valid")
}

/// Serializes fixture definitions as a skeleton document.
pub fn skeleton_json(defs: Vec<BoneDef>) -> String {
    skeleton(defs)
        .to_json_pretty()
        .expect("fixture skeleton serializes")
}
