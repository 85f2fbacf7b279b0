//! Chain segmentation of an ordered bone selection.

use serde::Serialize;

use crate::skeleton::{BoneId, Hierarchy};

/// A maximal run of connected bones.
///
/// For every adjacent pair `(a, b)`, `tail(a) == head(b)`. Chains are built
/// fresh from the current selection for each operation and never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chain {
    bones: Vec<BoneId>,
}

impl Chain {
    /// Bones in selection order.
    pub fn bones(&self) -> &[BoneId] {
        &self.bones
    }

    /// The first bone of the chain.
    pub fn first(&self) -> BoneId {
        self.bones[0]
    }

    /// Number of bones (always at least one).
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Chains are never empty; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Whether `bone` belongs to this chain.
    pub fn contains(&self, bone: BoneId) -> bool {
        self.bones.contains(&bone)
    }
}

/// Splits an ordered selection into chains.
///
/// The selection order is preserved. A new chain starts whenever a bone's
/// head does not coincide exactly with the tail of the previous bone.
///
/// # Example
/// ```
/// use bonekit_core::chain::segment_chains;
/// use bonekit_core::skeleton::{BoneDef, Hierarchy, Skeleton};
///
/// let sk = Skeleton::from_defs(vec![
///     BoneDef::new("A", [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
///     BoneDef::new("B", [0.0, 1.0, 0.0], [0.0, 2.0, 0.0]),
///     BoneDef::new("C", [5.0, 0.0, 0.0], [5.0, 1.0, 0.0]),
/// ])
/// .unwrap();
///
/// let chains = segment_chains(&sk, &sk.bone_ids());
/// assert_eq!(chains.len(), 2);
/// assert_eq!(chains[0].len(), 2);
/// ```
pub fn segment_chains<H: Hierarchy + ?Sized>(hierarchy: &H, selection: &[BoneId]) -> Vec<Chain> {
    let mut chains = Vec::new();
    let mut current: Vec<BoneId> = Vec::new();

    for &bone in selection {
        let connected = current
            .last()
            .is_some_and(|&prev| hierarchy.tail(prev) == hierarchy.head(bone));
        if !current.is_empty() && !connected {
            chains.push(Chain {
                bones: std::mem::take(&mut current),
            });
        }
        current.push(bone);
    }

    if !current.is_empty() {
        chains.push(Chain { bones: current });
    }
    chains
}
