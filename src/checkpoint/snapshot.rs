//! Structural snapshots of an automaton.

use crate::core::{StateId, StateRecord, TransitionSummary};
use serde::{Deserialize, Serialize};

/// Data-only copy of an automaton's structure and counters.
///
/// Two snapshots compare equal when the automata they were taken from have
/// identical states, transitions (by id, endpoints, predicate summary and
/// hits) and current position.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "Sym: Serialize", deserialize = "Sym: Deserialize<'de>"))]
pub struct AutomatonSnapshot<Id: StateId, Sym> {
    pub start_state: Id,
    pub current_state: Id,
    /// States in identifier order
    pub states: Vec<StateRecord<Id>>,
    /// Transitions in insertion order
    pub transitions: Vec<TransitionSummary<Id, Sym>>,
    /// Id the next added transition will receive
    pub next_transition_id: u64,
}

impl<Id: StateId, Sym> AutomatonSnapshot<Id, Sym> {
    pub fn state(&self, name: &Id) -> Option<&StateRecord<Id>> {
        self.states.iter().find(|state| state.name == *name)
    }

    /// Total visits across all states.
    pub fn total_visits(&self) -> u64 {
        self.states.iter().map(|state| state.visits).sum()
    }

    /// Total hits across all transitions.
    pub fn total_hits(&self) -> u64 {
        self.transitions
            .iter()
            .map(|transition| transition.hits)
            .sum()
    }
}
