//! Host-side bone hierarchy model.
//!
//! The naming engine only ever reads a hierarchy through [`Hierarchy`] and
//! writes names through [`NameTable`]. [`Skeleton`] is the in-memory host used
//! by the CLI and the tests; other hosts implement the two traits directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RenameRejected, SkeletonError};

/// A bone end point `[x, y, z]`.
///
/// Points are compared with exact equality. Hosts share end point values
/// between anatomically connected bones, so no tolerance is applied.
pub type Point = [f64; 3];

/// Index of a bone inside a [`Skeleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoneId(pub usize);

/// Read-only view of a bone hierarchy.
pub trait Hierarchy {
    /// All bone ids in host order.
    fn bone_ids(&self) -> Vec<BoneId>;

    /// Current name of a bone.
    fn name(&self, bone: BoneId) -> &str;

    /// Parent of a bone, if any.
    fn parent(&self, bone: BoneId) -> Option<BoneId>;

    /// Children of a bone in host order.
    fn children(&self, bone: BoneId) -> &[BoneId];

    /// Start point of a bone.
    fn head(&self, bone: BoneId) -> Point;

    /// End point of a bone.
    fn tail(&self, bone: BoneId) -> Point;

    /// Hidden bones are excluded from batch operations.
    fn is_hidden(&self, bone: BoneId) -> bool;

    /// Whether the bone belongs to the current selection.
    fn is_selected(&self, bone: BoneId) -> bool;

    /// Looks up a bone by its current name.
    fn find(&self, name: &str) -> Option<BoneId>;

    /// Visible bones in host order.
    fn visible_bones(&self) -> Vec<BoneId> {
        self.bone_ids()
            .into_iter()
            .filter(|&b| !self.is_hidden(b))
            .collect()
    }

    /// Selected, visible bones in host order.
    fn selected_bones(&self) -> Vec<BoneId> {
        self.bone_ids()
            .into_iter()
            .filter(|&b| self.is_selected(b) && !self.is_hidden(b))
            .collect()
    }
}

/// The mutable bone-name namespace of a host.
///
/// Implementations must reject a rename whose target is held by another bone
/// instead of silently picking a different name.
pub trait NameTable {
    /// Whether any bone currently holds `name`.
    fn contains(&self, name: &str) -> bool;

    /// Renames the bone called `from` to `to`.
    fn rename(&mut self, from: &str, to: &str) -> Result<(), RenameRejected>;
}

/// A bone in a skeleton document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoneDef {
    /// Unique bone name.
    pub bone: String,
    /// Bone head position [X, Y, Z].
    #[serde(default)]
    pub head: Point,
    /// Bone tail position [X, Y, Z].
    #[serde(default)]
    pub tail: Point,
    /// Parent bone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Hidden bones are skipped by conversion.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Selected bones take part in numbering.
    #[serde(default, skip_serializing_if = "is_false")]
    pub selected: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl BoneDef {
    /// Creates a bone definition with a name and end points.
    pub fn new(bone: impl Into<String>, head: Point, tail: Point) -> Self {
        Self {
            bone: bone.into(),
            head,
            tail,
            parent: None,
            hidden: false,
            selected: false,
        }
    }

    /// Sets the parent bone name.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Marks the bone hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks the bone selected.
    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// Serialized form of a skeleton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SkeletonDoc {
    /// Bones in host order.
    pub bones: Vec<BoneDef>,
}

#[derive(Debug, Clone, PartialEq)]
struct Bone {
    name: String,
    head: Point,
    tail: Point,
    parent: Option<BoneId>,
    children: Vec<BoneId>,
    hidden: bool,
    selected: bool,
}

/// In-memory bone hierarchy with a unique-name namespace.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    bones: Vec<Bone>,
    by_name: HashMap<String, BoneId>,
}

impl Skeleton {
    /// Builds a skeleton from bone definitions, validating names and parents.
    pub fn from_defs(defs: Vec<BoneDef>) -> Result<Self, SkeletonError> {
        let mut by_name = HashMap::with_capacity(defs.len());
        for (i, def) in defs.iter().enumerate() {
            if def.bone.is_empty() {
                return Err(SkeletonError::EmptyBoneName(i));
            }
            if by_name.insert(def.bone.clone(), BoneId(i)).is_some() {
                return Err(SkeletonError::DuplicateBoneName(def.bone.clone()));
            }
        }

        let mut bones: Vec<Bone> = Vec::with_capacity(defs.len());
        for def in &defs {
            let parent = match def.parent {
                Some(ref p) => Some(*by_name.get(p).ok_or_else(|| SkeletonError::UnknownParent {
                    bone: def.bone.clone(),
                    parent: p.clone(),
                })?),
                None => None,
            };
            bones.push(Bone {
                name: def.bone.clone(),
                head: def.head,
                tail: def.tail,
                parent,
                children: Vec::new(),
                hidden: def.hidden,
                selected: def.selected,
            });
        }

        for i in 0..bones.len() {
            if let Some(parent) = bones[i].parent {
                bones[parent.0].children.push(BoneId(i));
            }
        }

        let skeleton = Self { bones, by_name };
        skeleton.check_acyclic()?;
        Ok(skeleton)
    }

    /// Parses a skeleton document from JSON.
    pub fn from_json(json: &str) -> Result<Self, SkeletonError> {
        let doc: SkeletonDoc = serde_json::from_str(json)?;
        Self::from_defs(doc.bones)
    }

    /// Converts the skeleton back into its document form.
    pub fn to_doc(&self) -> SkeletonDoc {
        let bones = self
            .bones
            .iter()
            .map(|b| BoneDef {
                bone: b.name.clone(),
                head: b.head,
                tail: b.tail,
                parent: b.parent.map(|p| self.bones[p.0].name.clone()),
                hidden: b.hidden,
                selected: b.selected,
            })
            .collect();
        SkeletonDoc { bones }
    }

    /// Serializes the skeleton to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, SkeletonError> {
        Ok(serde_json::to_string_pretty(&self.to_doc())?)
    }

    /// Number of bones.
    pub fn len(&self) -> usize {
        self.bones.len()
    }

    /// Returns true if the skeleton has no bones.
    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    /// Current bone names in host order.
    pub fn names(&self) -> Vec<&str> {
        self.bones.iter().map(|b| b.name.as_str()).collect()
    }

    /// Marks the named bones selected and everything else unselected.
    ///
    /// Returns the names that did not match any bone.
    pub fn select_only<'a>(&mut self, names: &[&'a str]) -> Vec<&'a str> {
        for bone in &mut self.bones {
            bone.selected = false;
        }
        let mut missing = Vec::new();
        for name in names {
            match self.by_name.get(*name) {
                Some(id) => self.bones[id.0].selected = true,
                None => missing.push(*name),
            }
        }
        missing
    }

    fn check_acyclic(&self) -> Result<(), SkeletonError> {
        for start in 0..self.bones.len() {
            let mut steps = 0;
            let mut current = self.bones[start].parent;
            while let Some(p) = current {
                steps += 1;
                if steps > self.bones.len() {
                    return Err(SkeletonError::ParentCycle(self.bones[start].name.clone()));
                }
                current = self.bones[p.0].parent;
            }
        }
        Ok(())
    }
}

impl Hierarchy for Skeleton {
    fn bone_ids(&self) -> Vec<BoneId> {
        (0..self.bones.len()).map(BoneId).collect()
    }

    fn name(&self, bone: BoneId) -> &str {
        &self.bones[bone.0].name
    }

    fn parent(&self, bone: BoneId) -> Option<BoneId> {
        self.bones[bone.0].parent
    }

    fn children(&self, bone: BoneId) -> &[BoneId] {
        &self.bones[bone.0].children
    }

    fn head(&self, bone: BoneId) -> Point {
        self.bones[bone.0].head
    }

    fn tail(&self, bone: BoneId) -> Point {
        self.bones[bone.0].tail
    }

    fn is_hidden(&self, bone: BoneId) -> bool {
        self.bones[bone.0].hidden
    }

    fn is_selected(&self, bone: BoneId) -> bool {
        self.bones[bone.0].selected
    }

    fn find(&self, name: &str) -> Option<BoneId> {
        self.by_name.get(name).copied()
    }
}

impl NameTable for Skeleton {
    fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<(), RenameRejected> {
        if to.is_empty() {
            return Err(RenameRejected::EmptyName);
        }
        let id = *self
            .by_name
            .get(from)
            .ok_or_else(|| RenameRejected::UnknownBone(from.to_string()))?;
        if from == to {
            return Ok(());
        }
        if self.by_name.contains_key(to) {
            return Err(RenameRejected::NameTaken(to.to_string()));
        }
        self.by_name.remove(from);
        self.by_name.insert(to.to_string(), id);
        self.bones[id.0].name = to.to_string();
        Ok(())
    }
}
