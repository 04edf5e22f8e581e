//! Integrity rules evaluated against automaton snapshots.

use crate::checkpoint::AutomatonSnapshot;
use crate::core::StateId;
use crate::integrity::violations::IntegrityViolation;
use std::collections::{BTreeSet, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

type Check = Validation<(), NonEmptyVec<IntegrityViolation>>;

fn require(holds: bool, violation: impl FnOnce() -> IntegrityViolation) -> Check {
    if holds {
        Validation::success(())
    } else {
        Validation::fail(violation())
    }
}

/// Check every structural invariant, accumulating ALL violations.
///
/// Returns `Validation::Success(())` if the snapshot is consistent.
/// Returns `Validation::Failure` with every violation otherwise.
pub fn check_snapshot<Id: StateId, Sym>(snapshot: &AutomatonSnapshot<Id, Sym>) -> Check {
    let names: BTreeSet<&Id> = snapshot.states.iter().map(|state| &state.name).collect();
    let mut checks: Vec<Check> = Vec::new();

    checks.push(require(names.contains(&snapshot.start_state), || {
        IntegrityViolation::MissingStartState {
            state: format!("{:?}", snapshot.start_state),
        }
    }));

    checks.push(require(names.contains(&snapshot.current_state), || {
        IntegrityViolation::DanglingCurrent {
            state: format!("{:?}", snapshot.current_state),
        }
    }));

    let mut distinct = BTreeSet::new();
    for state in &snapshot.states {
        checks.push(require(distinct.insert(&state.name), || {
            IntegrityViolation::DuplicateState {
                state: format!("{:?}", state.name),
            }
        }));
    }

    let mut seen = HashSet::new();
    for transition in &snapshot.transitions {
        checks.push(require(names.contains(&transition.source), || {
            IntegrityViolation::DanglingSource {
                transition: transition.id,
                state: format!("{:?}", transition.source),
            }
        }));

        checks.push(require(names.contains(&transition.target), || {
            IntegrityViolation::DanglingTarget {
                transition: transition.id,
                state: format!("{:?}", transition.target),
            }
        }));

        checks.push(require(seen.insert(transition.id), || {
            IntegrityViolation::DuplicateTransitionId {
                transition: transition.id,
            }
        }));

        checks.push(require(
            transition.id.0 < snapshot.next_transition_id,
            || IntegrityViolation::StaleAllocator {
                transition: transition.id,
                next: snapshot.next_transition_id,
            },
        ));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Run [`check_snapshot`] and flatten the outcome into a plain list.
///
/// An empty list means the snapshot is consistent.
pub fn collect_violations<Id: StateId, Sym>(
    snapshot: &AutomatonSnapshot<Id, Sym>,
) -> Vec<IntegrityViolation> {
    match check_snapshot(snapshot) {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PredicateSummary, StateRecord, TransitionId, TransitionSummary};

    fn summary(id: u64, source: &str, target: &str) -> TransitionSummary<String, String> {
        TransitionSummary {
            id: TransitionId(id),
            source: source.to_string(),
            target: target.to_string(),
            predicate: PredicateSummary::Equals("x".to_string()),
            has_action: false,
            hits: 0,
            synthesized: false,
        }
    }

    fn snapshot(
        states: &[&str],
        transitions: Vec<TransitionSummary<String, String>>,
    ) -> AutomatonSnapshot<String, String> {
        AutomatonSnapshot {
            start_state: "START".to_string(),
            current_state: "START".to_string(),
            states: states
                .iter()
                .map(|name| StateRecord::new(name.to_string()))
                .collect(),
            next_transition_id: transitions.len() as u64,
            transitions,
        }
    }

    #[test]
    fn consistent_snapshot_passes() {
        let snapshot = snapshot(&["START", "FEVER"], vec![summary(0, "START", "FEVER")]);

        assert!(matches!(check_snapshot(&snapshot), Validation::Success(())));
        assert!(collect_violations(&snapshot).is_empty());
    }

    #[test]
    fn integrity_accumulates_all_violations() {
        let mut snapshot = snapshot(
            &["FEVER"],
            vec![summary(0, "START", "GHOST"), summary(0, "FEVER", "FEVER")],
        );
        snapshot.current_state = "LOST".to_string();

        let violations = collect_violations(&snapshot);

        assert!(violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::MissingStartState { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::DanglingCurrent { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::DanglingSource { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::DanglingTarget { .. })));
        assert!(violations
            .iter()
            .any(|v| matches!(v, IntegrityViolation::DuplicateTransitionId { .. })));
        assert_eq!(violations.len(), 5);
    }

    #[test]
    fn duplicate_state_names_are_reported() {
        let snapshot = snapshot(&["START", "FLU", "FLU"], Vec::new());

        let violations = collect_violations(&snapshot);

        assert_eq!(
            violations,
            vec![IntegrityViolation::DuplicateState {
                state: "\"FLU\"".to_string()
            }]
        );
    }

    #[test]
    fn stale_allocator_is_reported() {
        let mut snapshot = snapshot(&["START"], vec![summary(4, "START", "START")]);
        snapshot.next_transition_id = 2;

        let violations = collect_violations(&snapshot);
        assert_eq!(
            violations,
            vec![IntegrityViolation::StaleAllocator {
                transition: TransitionId(4),
                next: 2,
            }]
        );
    }

    #[test]
    fn violation_messages_name_the_state() {
        let mut snapshot = snapshot(&["START"], Vec::new());
        snapshot.current_state = "S9".to_string();

        let violations = collect_violations(&snapshot);
        assert_eq!(
            violations[0].to_string(),
            "Current state \"S9\" is missing from the state map"
        );
    }
}
