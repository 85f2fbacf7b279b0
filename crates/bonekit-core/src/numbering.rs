//! Sequential numbering of bone chains.
//!
//! Every chain is walked depth-first from its roots. The first selected bone
//! keeps its name; the others become `base{delim}NNN{suffix}`, where `NNN` is
//! the zero-padded traversal index.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::chain::Chain;
use crate::error::{RenameError, RenameResult};
use crate::plan::RenamePlan;
use crate::skeleton::{BoneId, Hierarchy};

/// Side suffixes moved behind the ordinal when `side_suffix_from_name` is set.
pub const SIDE_SUFFIXES: [&str; 4] = ["_L", "_R", ".L", ".R"];

/// Separator between base and ordinal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    /// `Spine.001`
    #[default]
    Dot,
    /// `Spine_001`
    Underscore,
    /// `Spine 001`
    Space,
}

impl Delimiter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Delimiter::Dot => ".",
            Delimiter::Underscore => "_",
            Delimiter::Space => " ",
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Delimiter::Dot => "dot",
            Delimiter::Underscore => "underscore",
            Delimiter::Space => "space",
        };
        f.write_str(name)
    }
}

impl FromStr for Delimiter {
    type Err = String;

    /// Accepts the delimiter names or the literal characters.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dot" | "." => Ok(Delimiter::Dot),
            "underscore" | "_" => Ok(Delimiter::Underscore),
            "space" | " " => Ok(Delimiter::Space),
            other => Err(format!(
                "unknown delimiter '{}', expected dot, underscore or space",
                other
            )),
        }
    }
}

/// Options for sequential numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberingOptions {
    #[serde(default)]
    pub delimiter: Delimiter,
    /// Name the last bone of each chain `base{delim}end`.
    #[serde(default)]
    pub mark_end_bone: bool,
    /// Keep a trailing `_L`/`_R`/`.L`/`.R` of the seed name after the ordinal.
    #[serde(default)]
    pub side_suffix_from_name: bool,
}

impl NumberingOptions {
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_end_bone(mut self, mark: bool) -> Self {
        self.mark_end_bone = mark;
        self
    }

    pub fn with_side_suffix(mut self, enabled: bool) -> Self {
        self.side_suffix_from_name = enabled;
        self
    }
}

/// Orders a chain's bones for numbering.
///
/// Members whose parent is outside the chain seed a depth-first walk that
/// follows children inside the chain. Seeds are taken in chain order and
/// each bone is visited once.
pub fn traversal_order<H: Hierarchy + ?Sized>(hierarchy: &H, chain: &Chain) -> Vec<BoneId> {
    let members: HashSet<BoneId> = chain.bones().iter().copied().collect();
    let mut visited: HashSet<BoneId> = HashSet::with_capacity(members.len());
    let mut order = Vec::with_capacity(members.len());

    for &bone in chain.bones() {
        let is_seed = hierarchy.parent(bone).map_or(true, |p| !members.contains(&p));
        if !is_seed {
            continue;
        }
        let mut stack = vec![bone];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            order.push(current);
            // Reverse so the first child is visited first.
            for &child in hierarchy.children(current).iter().rev() {
                if members.contains(&child) && !visited.contains(&child) {
                    stack.push(child);
                }
            }
        }
    }
    order
}

/// Splits the seed name into base and trailing side suffix.
fn split_side_suffix<'a>(name: &'a str, options: &NumberingOptions) -> (&'a str, &'a str) {
    if options.side_suffix_from_name {
        for suffix in SIDE_SUFFIXES {
            if let Some(base) = name.strip_suffix(suffix) {
                return (base, suffix);
            }
        }
    }
    (name, "")
}

/// Computes the new names for one chain, in traversal order.
pub fn number_chain<H: Hierarchy + ?Sized>(
    hierarchy: &H,
    chain: &Chain,
    options: &NumberingOptions,
) -> Vec<(BoneId, String)> {
    let seed = hierarchy.name(chain.first());
    let (base, suffix) = split_side_suffix(seed, options);
    let delim = options.delimiter.as_str();
    let order = traversal_order(hierarchy, chain);
    let last = order.len().saturating_sub(1);

    order
        .iter()
        .enumerate()
        .map(|(i, &bone)| {
            let name = if hierarchy.name(bone) == seed {
                seed.to_string()
            } else if options.mark_end_bone && i == last {
                format!("{}{}end{}", base, delim, suffix)
            } else {
                format!("{}{}{:03}{}", base, delim, i, suffix)
            };
            (bone, name)
        })
        .collect()
}

/// Plans numbering for every chain.
///
/// Hidden bones keep their names even when a chain contains them.
///
/// Fails with [`RenameError::NoHierarchySelected`] when there are no chains
/// and with [`RenameError::CollisionDetected`] when a generated name is
/// already used by another bone or another chain.
pub fn plan_numbering<H: Hierarchy + ?Sized>(
    hierarchy: &H,
    chains: &[Chain],
    options: &NumberingOptions,
) -> RenameResult<RenamePlan> {
    if chains.is_empty() {
        return Err(RenameError::NoHierarchySelected);
    }

    let mut plan = RenamePlan::new();
    for chain in chains {
        let names = number_chain(hierarchy, chain, options);
        debug!(seed = hierarchy.name(chain.first()), bones = names.len(), "numbering chain");
        for (bone, name) in names {
            if hierarchy.is_hidden(bone) {
                continue;
            }
            plan.push(hierarchy.name(bone), name)?;
        }
    }

    plan.validate_against(hierarchy)?;
    info!(chains = chains.len(), renames = plan.len(), "numbering planned");
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::segment_chains;
    use crate::plan::apply_plan;
    use crate::skeleton::{BoneDef, Skeleton};
    use pretty_assertions::assert_eq;

    /// A straight chain along Y with each bone parented to the previous one.
    fn spine(names: &[&str]) -> Skeleton {
        let defs = names
            .iter()
            .enumerate()
            .map(|(i, n)| {
                let def = BoneDef::new(*n, [0.0, i as f64, 0.0], [0.0, (i + 1) as f64, 0.0]);
                if i == 0 {
                    def
                } else {
                    def.with_parent(names[i - 1])
                }
            })
            .collect();
        Skeleton::from_defs(defs).unwrap()
    }

    fn numbered(sk: &mut Skeleton, options: &NumberingOptions) -> Vec<String> {
        let chains = segment_chains(&*sk, &sk.bone_ids());
        let plan = plan_numbering(&*sk, &chains, options).unwrap();
        apply_plan(sk, &plan).unwrap();
        sk.names().into_iter().map(String::from).collect()
    }

    #[test]
    fn test_end_bone_marked() {
        let mut sk = spine(&["Spine", "Spine.child1", "Spine.child1.child1"]);
        let opts = NumberingOptions::default().with_end_bone(true);
        assert_eq!(numbered(&mut sk, &opts), vec!["Spine", "Spine.001", "Spine.end"]);
    }

    #[test]
    fn test_plain_numbering_with_delimiters() {
        let mut sk = spine(&["Tail", "b", "c"]);
        assert_eq!(
            numbered(&mut sk, &NumberingOptions::default()),
            vec!["Tail", "Tail.001", "Tail.002"]
        );

        let mut sk = spine(&["Tail", "b", "c"]);
        let opts = NumberingOptions::default().with_delimiter(Delimiter::Underscore);
        assert_eq!(numbered(&mut sk, &opts), vec!["Tail", "Tail_001", "Tail_002"]);

        let mut sk = spine(&["Tail", "b"]);
        let opts = NumberingOptions::default().with_delimiter(Delimiter::Space);
        assert_eq!(numbered(&mut sk, &opts), vec!["Tail", "Tail 001"]);
    }

    #[test]
    fn test_side_suffix_moves_behind_ordinal() {
        let mut sk = spine(&["Hair_L", "x", "y"]);
        let opts = NumberingOptions::default().with_side_suffix(true).with_end_bone(true);
        assert_eq!(numbered(&mut sk, &opts), vec!["Hair_L", "Hair.001_L", "Hair.end_L"]);
    }

    #[test]
    fn test_side_suffix_ignored_when_disabled() {
        let mut sk = spine(&["Hair_L", "x"]);
        assert_eq!(numbered(&mut sk, &NumberingOptions::default()), vec!["Hair_L", "Hair_L.001"]);
    }

    #[test]
    fn test_renumbering_existing_names_uses_temporaries() {
        // Names already in reverse order would collide under naive renaming.
        let mut sk = spine(&["Bone", "Bone.002", "Bone.001"]);
        assert_eq!(
            numbered(&mut sk, &NumberingOptions::default()),
            vec!["Bone", "Bone.001", "Bone.002"]
        );
    }

    #[test]
    fn test_single_bone_chain_is_untouched() {
        let sk = spine(&["Solo"]);
        let chains = segment_chains(&sk, &sk.bone_ids());
        let plan = plan_numbering(&sk, &chains, &NumberingOptions::default()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_traversal_follows_parents_not_selection_order() {
        // Connected head-to-tail, but the hierarchy runs the other way.
        let sk = Skeleton::from_defs(vec![
            BoneDef::new("A", [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).with_parent("B"),
            BoneDef::new("B", [0.0, 1.0, 0.0], [0.0, 2.0, 0.0]),
        ])
        .unwrap();
        let chains = segment_chains(&sk, &sk.bone_ids());
        assert_eq!(chains.len(), 1);
        let order: Vec<&str> = traversal_order(&sk, &chains[0]).into_iter().map(|b| sk.name(b)).collect();
        assert_eq!(order, vec!["B", "A"]);

        // The seed keeps its name even when it is not visited first.
        let names = number_chain(&sk, &chains[0], &NumberingOptions::default());
        let names: Vec<&str> = names.iter().map(|(_, n)| n.as_str()).collect();
        assert_eq!(names, vec!["A.000", "A"]);
    }

    #[test]
    fn test_collision_with_unselected_bone() {
        let mut sk = spine(&["Spine", "b"]);
        let mut defs = sk.to_doc().bones;
        defs.push(BoneDef::new("Spine.001", [9.0; 3], [9.0; 3]));
        sk = Skeleton::from_defs(defs).unwrap();
        let selection = vec![sk.find("Spine").unwrap(), sk.find("b").unwrap()];
        let chains = segment_chains(&sk, &selection);
        let err = plan_numbering(&sk, &chains, &NumberingOptions::default()).unwrap_err();
        assert_eq!(err.code(), "BK003");
    }

    #[test]
    fn test_hidden_bone_keeps_its_name() {
        let sk = Skeleton::from_defs(vec![
            BoneDef::new("Tail", [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]).selected(),
            BoneDef::new("TailHidden", [0.0, 1.0, 0.0], [0.0, 2.0, 0.0])
                .with_parent("Tail")
                .selected()
                .hidden(),
        ])
        .unwrap();
        let options = NumberingOptions::default();

        let chains = segment_chains(&sk, &sk.selected_bones());
        let plan = plan_numbering(&sk, &chains, &options).unwrap();
        assert_eq!(plan.target_of("TailHidden"), None);
        assert!(plan.is_empty());

        // A chain built over every bone still leaves the hidden one alone.
        let chains = segment_chains(&sk, &sk.bone_ids());
        assert_eq!(chains[0].bones().len(), 2);
        let plan = plan_numbering(&sk, &chains, &options).unwrap();
        assert_eq!(plan.target_of("TailHidden"), None);
    }

    #[test]
    fn test_no_chains() {
        let sk = spine(&["Spine"]);
        assert_eq!(
            plan_numbering(&sk, &[], &NumberingOptions::default()),
            Err(RenameError::NoHierarchySelected)
        );
    }

    #[test]
    fn test_delimiter_parsing() {
        assert_eq!("_".parse::<Delimiter>(), Ok(Delimiter::Underscore));
        assert_eq!("space".parse::<Delimiter>(), Ok(Delimiter::Space));
        assert!("-".parse::<Delimiter>().is_err());
    }
}
