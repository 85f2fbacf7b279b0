//! Rename plans and their collision-safe application.
//!
//! Planning is pure: conversion and numbering produce a [`RenamePlan`] without
//! touching the host. [`apply_plan`] then commits the plan in two phases,
//! moving every source to a unique temporary name before any final name is
//! assigned, so an intermediate state never holds a duplicate.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Collision, RenameError, RenameResult};
use crate::skeleton::{Hierarchy, NameTable};

/// Prefix of temporary names used between the two phases.
pub const TEMP_PREFIX: &str = "~bonekit";

/// One rename in a plan.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rename {
    pub from: String,
    pub to: String,
}

/// An ordered old-name to new-name mapping with distinct sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenamePlan {
    renames: Vec<Rename>,
}

impl RenamePlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rename. Identity renames are ignored.
    pub fn push(&mut self, from: impl Into<String>, to: impl Into<String>) -> RenameResult<()> {
        let from = from.into();
        let to = to.into();
        if self.renames.iter().any(|r| r.from == from) {
            return Err(RenameError::DuplicateSource(from));
        }
        if from != to {
            self.renames.push(Rename { from, to });
        }
        Ok(())
    }

    /// Iterates over renames in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rename> {
        self.renames.iter()
    }

    /// Number of renames.
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    /// Returns true if the plan renames nothing.
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    /// New name planned for `from`, if any.
    pub fn target_of(&self, from: &str) -> Option<&str> {
        self.renames
            .iter()
            .find(|r| r.from == from)
            .map(|r| r.to.as_str())
    }

    /// Finds targets shared by several sources, or already held by a name
    /// that `is_taken` reports and that the plan itself does not free.
    fn collisions_with(&self, is_taken: impl Fn(&str) -> bool) -> Vec<Collision> {
        let sources: HashSet<&str> = self.renames.iter().map(|r| r.from.as_str()).collect();
        let mut by_target: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for r in &self.renames {
            by_target.entry(r.to.as_str()).or_default().push(r.from.clone());
        }

        by_target
            .into_iter()
            .filter_map(|(target, sources_for_target)| {
                let held_by = (!sources.contains(target) && is_taken(target)).then(|| target.to_string());
                (sources_for_target.len() > 1 || held_by.is_some()).then(|| Collision {
                    target: target.to_string(),
                    sources: sources_for_target,
                    held_by,
                })
            })
            .collect()
    }

    /// Collisions against the current names of `hierarchy`.
    pub fn collisions<H: Hierarchy + ?Sized>(&self, hierarchy: &H) -> Vec<Collision> {
        self.collisions_with(|name| hierarchy.find(name).is_some())
    }

    /// Fails with [`RenameError::CollisionDetected`] if the plan would leave two
    /// bones with the same name.
    pub fn validate_against<H: Hierarchy + ?Sized>(&self, hierarchy: &H) -> RenameResult<()> {
        into_result(self.collisions(hierarchy))
    }

    /// Computes the temporary and final steps for applying this plan to `table`.
    ///
    /// Temporaries avoid every name in `table` and every final name in the
    /// plan.
    pub fn schedule<T: NameTable + ?Sized>(&self, table: &T) -> TwoPhaseSchedule {
        let mut used: HashSet<String> = self.renames.iter().map(|r| r.to.clone()).collect();
        let mut temporary = Vec::with_capacity(self.renames.len());
        let mut finals = Vec::with_capacity(self.renames.len());

        for (i, r) in self.renames.iter().enumerate() {
            let mut temp = format!("{}.{:03}.{}", TEMP_PREFIX, i, r.from);
            let mut salt = 0usize;
            while table.contains(&temp) || used.contains(&temp) {
                salt += 1;
                temp = format!("{}.{:03}.{}.{}", TEMP_PREFIX, i, salt, r.from);
            }
            used.insert(temp.clone());
            temporary.push(Rename {
                from: r.from.clone(),
                to: temp.clone(),
            });
            finals.push(Rename {
                from: temp,
                to: r.to.clone(),
            });
        }

        TwoPhaseSchedule { temporary, finals }
    }
}

impl<'a> IntoIterator for &'a RenamePlan {
    type Item = &'a Rename;
    type IntoIter = std::slice::Iter<'a, Rename>;

    fn into_iter(self) -> Self::IntoIter {
        self.renames.iter()
    }
}

fn into_result(collisions: Vec<Collision>) -> RenameResult<()> {
    if collisions.is_empty() {
        Ok(())
    } else {
        Err(RenameError::CollisionDetected { collisions })
    }
}

/// Ordered steps of a two-phase rename.
///
/// Every step in `temporary` must complete before the first step in `finals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwoPhaseSchedule {
    pub temporary: Vec<Rename>,
    pub finals: Vec<Rename>,
}

/// Outcome of a successful [`apply_plan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Bones that ended with a new name.
    pub renamed: usize,
    /// Temporary names used during the first phase.
    pub temporaries: Vec<String>,
}

/// Progress of one plan application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ApplyState {
    Idle,
    TraversalComputed,
    TempRenamed,
    FinalRenamed,
}

/// Renames applied so far, newest last, as `(current, previous)` pairs.
#[derive(Default)]
struct Journal {
    steps: Vec<(String, String)>,
}

impl Journal {
    fn record(&mut self, step: &Rename) {
        self.steps.push((step.to.clone(), step.from.clone()));
    }

    /// Undoes every recorded step in reverse order.
    fn rollback<T: NameTable + ?Sized>(self, table: &mut T) -> bool {
        let mut clean = true;
        for (current, previous) in self.steps.into_iter().rev() {
            if let Err(err) = table.rename(&current, &previous) {
                warn!(%current, %previous, %err, "rollback step failed");
                clean = false;
            }
        }
        clean
    }
}

/// Applies a plan to `table` with the two-phase protocol.
///
/// The plan is checked against `table` before anything is renamed. If the
/// host rejects any step, every completed step is undone and
/// [`RenameError::PartialPlanFailure`] is returned.
pub fn apply_plan<T: NameTable + ?Sized>(table: &mut T, plan: &RenamePlan) -> RenameResult<ApplyReport> {
    let mut state = ApplyState::Idle;
    if plan.is_empty() {
        return Ok(ApplyReport {
            renamed: 0,
            temporaries: Vec::new(),
        });
    }

    into_result(plan.collisions_with(|name| table.contains(name)))?;
    let schedule = plan.schedule(&*table);
    state = advance(state, ApplyState::TraversalComputed);

    let mut journal = Journal::default();
    for phase in [&schedule.temporary, &schedule.finals] {
        for step in phase {
            if let Err(err) = table.rename(&step.from, &step.to) {
                let rolled_back = journal.rollback(table);
                warn!(from = %step.from, to = %step.to, %err, rolled_back, "rename rejected by host");
                return Err(RenameError::PartialPlanFailure {
                    from: step.from.clone(),
                    to: step.to.clone(),
                    reason: err.to_string(),
                    rolled_back,
                });
            }
            debug!(from = %step.from, to = %step.to, "renamed");
            journal.record(step);
        }
        state = advance(
            state,
            match state {
                ApplyState::TraversalComputed => ApplyState::TempRenamed,
                _ => ApplyState::FinalRenamed,
            },
        );
    }

    info!(renamed = plan.len(), "rename plan applied");
    advance(state, ApplyState::Idle);
    Ok(ApplyReport {
        renamed: plan.len(),
        temporaries: schedule.temporary.into_iter().map(|r| r.to).collect(),
    })
}

fn advance(from: ApplyState, to: ApplyState) -> ApplyState {
    debug!(?from, ?to, "apply state");
    to
}

/// Applies a plan one rename at a time, in plan order.
///
/// Fails as soon as a target is still held by a bone that has not been
/// renamed yet, even when the finished plan would be collision-free. Kept to
/// exercise the hazard [`apply_plan`] avoids.
pub fn apply_plan_single_phase<T: NameTable + ?Sized>(
    table: &mut T,
    plan: &RenamePlan,
) -> RenameResult<ApplyReport> {
    let mut journal = Journal::default();
    for step in plan {
        if let Err(err) = table.rename(&step.from, &step.to) {
            let rolled_back = journal.rollback(table);
            return Err(RenameError::PartialPlanFailure {
                from: step.from.clone(),
                to: step.to.clone(),
                reason: err.to_string(),
                rolled_back,
            });
        }
        journal.record(step);
    }
    Ok(ApplyReport {
        renamed: plan.len(),
        temporaries: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenameRejected;
    use crate::skeleton::{BoneDef, Skeleton};
    use pretty_assertions::assert_eq;

    fn skeleton(names: &[&str]) -> Skeleton {
        Skeleton::from_defs(names.iter().map(|n| BoneDef::new(*n, [0.0; 3], [0.0; 3])).collect()).unwrap()
    }

    fn plan(pairs: &[(&str, &str)]) -> RenamePlan {
        let mut p = RenamePlan::new();
        for (from, to) in pairs {
            p.push(*from, *to).unwrap();
        }
        p
    }

    #[test]
    fn test_push_rejects_duplicate_source_and_skips_identity() {
        let mut p = RenamePlan::new();
        p.push("A", "A").unwrap();
        assert!(p.is_empty());
        p.push("A", "B").unwrap();
        assert_eq!(p.push("A", "C"), Err(RenameError::DuplicateSource("A".to_string())));
        assert_eq!(p.target_of("A"), Some("B"));
    }

    #[test]
    fn test_collision_between_sources() {
        let sk = skeleton(&["Arm.L", "Arm_Left"]);
        let p = plan(&[("Arm.L", "Arm_L"), ("Arm_Left", "Arm_L")]);
        let collisions = p.collisions(&sk);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].target, "Arm_L");
        assert_eq!(collisions[0].sources, vec!["Arm.L".to_string(), "Arm_Left".to_string()]);
        assert!(matches!(p.validate_against(&sk), Err(RenameError::CollisionDetected { .. })));
    }

    #[test]
    fn test_collision_with_bone_outside_plan() {
        let sk = skeleton(&["Hand.L", "Hand_L"]);
        let p = plan(&[("Hand.L", "Hand_L")]);
        let collisions = p.collisions(&sk);
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].held_by.as_deref(), Some("Hand_L"));
    }

    #[test]
    fn test_swap_is_not_a_collision() {
        let sk = skeleton(&["A", "B"]);
        let p = plan(&[("A", "B"), ("B", "A")]);
        assert!(p.validate_against(&sk).is_ok());
    }

    #[test]
    fn test_two_phase_swap_succeeds_where_single_phase_fails() {
        let p = plan(&[("A", "B"), ("B", "A")]);

        let mut naive = skeleton(&["A", "B"]);
        let err = apply_plan_single_phase(&mut naive, &p).unwrap_err();
        assert!(matches!(err, RenameError::PartialPlanFailure { rolled_back: true, .. }));
        assert_eq!(naive.names(), vec!["A", "B"]);

        let mut sk = skeleton(&["A", "B"]);
        let report = apply_plan(&mut sk, &p).unwrap();
        assert_eq!(report.renamed, 2);
        assert_eq!(sk.names(), vec!["B", "A"]);
    }

    #[test]
    fn test_apply_rejects_outside_collision_before_mutation() {
        let mut sk = skeleton(&["Hand.L", "Hand_L"]);
        let p = plan(&[("Hand.L", "Hand_L")]);
        assert!(matches!(apply_plan(&mut sk, &p), Err(RenameError::CollisionDetected { .. })));
        assert_eq!(sk.names(), vec!["Hand.L", "Hand_L"]);
    }

    #[test]
    fn test_temporary_names_avoid_existing_names() {
        let sk = skeleton(&["A", "~bonekit.000.A"]);
        let p = plan(&[("A", "B")]);
        let schedule = p.schedule(&sk);
        assert_eq!(schedule.temporary[0].to, "~bonekit.000.1.A");
        assert_eq!(schedule.finals[0].from, "~bonekit.000.1.A");
        assert_eq!(schedule.finals[0].to, "B");
    }

    #[test]
    fn test_temporary_names_avoid_plan_targets() {
        let mut sk = skeleton(&["A", "B"]);
        let p = plan(&[("A", "~bonekit.001.B"), ("B", "X")]);
        assert!(p.validate_against(&sk).is_ok());

        let schedule = p.schedule(&sk);
        assert_eq!(schedule.temporary[1].to, "~bonekit.001.1.B");

        apply_plan(&mut sk, &p).unwrap();
        assert_eq!(sk.names(), vec!["~bonekit.001.B", "X"]);
    }

    /// Host that refuses one specific target name.
    struct Flaky {
        inner: Skeleton,
        refuse: &'static str,
    }

    impl NameTable for Flaky {
        fn contains(&self, name: &str) -> bool {
            self.inner.contains(name)
        }

        fn rename(&mut self, from: &str, to: &str) -> Result<(), RenameRejected> {
            if to == self.refuse {
                return Err(RenameRejected::NameTaken(to.to_string()));
            }
            self.inner.rename(from, to)
        }
    }

    #[test]
    fn test_failure_in_final_phase_rolls_back_everything() {
        let mut host = Flaky {
            inner: skeleton(&["A", "B", "C"]),
            refuse: "Z",
        };
        let p = plan(&[("A", "X"), ("B", "Y"), ("C", "Z")]);
        let err = apply_plan(&mut host, &p).unwrap_err();
        assert_eq!(
            err,
            RenameError::PartialPlanFailure {
                from: "~bonekit.002.C".to_string(),
                to: "Z".to_string(),
                reason: "name 'Z' is already taken".to_string(),
                rolled_back: true,
            }
        );
        assert_eq!(host.inner.names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_plan_serializes_as_list() {
        let p = plan(&[("A", "B")]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"[{"from":"A","to":"B"}]"#);
    }
}
