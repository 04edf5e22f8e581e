//! Usage-based pruning.
//!
//! Pruning is split into a pure planning step that decides what goes and
//! an apply step on the automaton, so a rejected prune leaves nothing
//! half-removed.

use crate::core::{StateId, StateRecord, Symbol, Transition, TransitionId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Outcome of a prune call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PruneReport<Id: StateId> {
    /// Removed state ids, in identifier order
    pub removed_states: Vec<Id>,
    /// Removed transition ids, in insertion order
    pub removed_transitions: Vec<TransitionId>,
    /// Whether the current pointer was moved back to the start state
    pub current_reset: bool,
}

impl<Id: StateId> PruneReport<Id> {
    pub fn is_empty(&self) -> bool {
        self.removed_states.is_empty() && self.removed_transitions.is_empty()
    }
}

/// What a prune would remove (pure).
#[derive(Debug)]
pub(crate) struct PrunePlan<Id: StateId> {
    pub(crate) states: BTreeSet<Id>,
    pub(crate) transitions: BTreeSet<TransitionId>,
}

/// Plan a prune without touching the automaton.
///
/// A state is removable when its visits are below `min_state_visits`,
/// unless it is the start state. A transition is removable when its hits
/// are below `min_transition_hits` or either endpoint is removable.
pub(crate) fn plan<Id: StateId, Sym: Symbol>(
    states: &BTreeMap<Id, StateRecord<Id>>,
    transitions: &[Transition<Id, Sym>],
    start_state: &Id,
    min_state_visits: u64,
    min_transition_hits: u64,
) -> PrunePlan<Id> {
    let removable: BTreeSet<Id> = states
        .values()
        .filter(|state| state.visits < min_state_visits && state.name != *start_state)
        .map(|state| state.name.clone())
        .collect();

    let doomed = transitions
        .iter()
        .filter(|transition| {
            transition.hits < min_transition_hits
                || removable.contains(&transition.source)
                || removable.contains(&transition.target)
        })
        .map(|transition| transition.id)
        .collect();

    PrunePlan {
        states: removable,
        transitions: doomed,
    }
}
