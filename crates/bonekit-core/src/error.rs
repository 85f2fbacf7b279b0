//! Error types for bone-name conversion, renaming, and host model loading.

use serde::Serialize;
use thiserror::Error;

/// Result type for rename operations.
pub type RenameResult<T> = Result<T, RenameError>;

/// A single target-name collision found while validating a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The name more than one bone would end up with.
    pub target: String,
    /// Source names that map onto `target`.
    pub sources: Vec<String>,
    /// Name of a bone outside the plan that already holds `target`, if any.
    pub held_by: Option<String>,
}

impl std::fmt::Display for Collision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' <- [{}]", self.target, self.sources.join(", "))?;
        if let Some(ref holder) = self.held_by {
            write!(f, " (already held by '{}')", holder)?;
        }
        Ok(())
    }
}

/// Errors that can occur while planning or applying a rename batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameError {
    /// No bones were supplied to the operation.
    #[error("No bone hierarchy selected")]
    NoHierarchySelected,

    /// The requested convention id is not in the registry.
    #[error("Unrecognized target convention '{0}'. Expected one of: UpperArm_L, Upper Arm_L, Upper_Arm_L, UpperArm.L, Upper Arm.L, Upper_Arm.L, L_UpperArm, Generic")]
    UnrecognizedTargetConvention(String),

    /// Two distinct sources (or a source and an untouched bone) share a target name.
    #[error("Rename plan has {} colliding target name(s): {}", .collisions.len(), format_collisions(.collisions))]
    CollisionDetected { collisions: Vec<Collision> },

    /// The host rejected a rename while the plan was being applied.
    #[error("Failed to rename '{from}' to '{to}': {reason} ({})", rollback_note(.rolled_back))]
    PartialPlanFailure {
        from: String,
        to: String,
        reason: String,
        rolled_back: bool,
    },

    /// The same source name was added to a plan twice.
    #[error("Bone '{0}' appears more than once in the rename plan")]
    DuplicateSource(String),
}

impl RenameError {
    /// Returns the stable error code (e.g., "BK003").
    pub fn code(&self) -> &'static str {
        match self {
            RenameError::NoHierarchySelected => "BK001",
            RenameError::UnrecognizedTargetConvention(_) => "BK002",
            RenameError::CollisionDetected { .. } => "BK003",
            RenameError::PartialPlanFailure { .. } => "BK004",
            RenameError::DuplicateSource(_) => "BK005",
        }
    }
}

fn rollback_note(rolled_back: &bool) -> &'static str {
    if *rolled_back {
        "batch rolled back"
    } else {
        "rollback incomplete"
    }
}

fn format_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Reason a [`NameTable`](crate::skeleton::NameTable) refused a single rename.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenameRejected {
    /// No bone currently has the source name.
    #[error("no bone named '{0}'")]
    UnknownBone(String),

    /// Another bone already holds the target name.
    #[error("name '{0}' is already taken")]
    NameTaken(String),

    /// The target name is empty.
    #[error("bone names cannot be empty")]
    EmptyName,
}

/// Errors that can occur when building or loading a [`Skeleton`](crate::skeleton::Skeleton).
#[derive(Debug, Error)]
pub enum SkeletonError {
    /// Two bones share a name.
    #[error("Duplicate bone name: {0}")]
    DuplicateBoneName(String),

    /// A bone has an empty name.
    #[error("Bone at index {0} has an empty name")]
    EmptyBoneName(usize),

    /// A bone references a parent that does not exist.
    #[error("Bone '{bone}' references unknown parent '{parent}'")]
    UnknownParent { bone: String, parent: String },

    /// Parent links form a cycle.
    #[error("Parent cycle detected at bone '{0}'")]
    ParentCycle(String),

    /// The skeleton document is not valid JSON.
    #[error("Failed to parse skeleton JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading a preset table.
#[derive(Debug, Error)]
pub enum PresetError {
    /// A CSV row does not have two non-empty columns.
    #[error("Preset row {line} is malformed: '{content}'")]
    MalformedRow { line: usize, content: String },

    /// The preset name is not a built-in table.
    #[error("Unknown preset '{0}'. Expected one of: vroid, mmd")]
    UnknownPreset(String),

    /// The JSON table is not a list of name pairs.
    #[error("Failed to parse preset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid configuration document.
    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
