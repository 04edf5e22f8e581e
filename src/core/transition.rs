//! Transition records.

use super::predicate::{Action, CallbackError, Predicate, PredicateSummary, Symbol};
use super::state::{StateId, StateRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a transition within one automaton.
///
/// Ids are allocated in increasing order, so they also record insertion
/// order. Two transitions with the same endpoints and an equivalent
/// predicate are still distinct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionId(pub u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// A directed, predicated edge between two states.
#[derive(Clone, Debug)]
pub struct Transition<Id: StateId, Sym: Symbol> {
    pub id: TransitionId,
    pub source: Id,
    pub target: Id,
    pub predicate: Predicate<Id, Sym>,
    pub action: Option<Action<Id, Sym>>,
    pub hits: u64,
    /// Created by auto-extension rather than by the caller
    pub synthesized: bool,
}

impl<Id: StateId, Sym: Symbol> Transition<Id, Sym> {
    /// Whether this transition leaves the given state (pure)
    pub fn leaves(&self, state: &Id) -> bool {
        self.source == *state
    }

    /// Whether either endpoint is the given state (pure)
    pub fn touches(&self, state: &Id) -> bool {
        self.source == *state || self.target == *state
    }

    /// Whether the transition is learned-style data only: an exact symbol
    /// match with no action attached.
    pub fn is_plain(&self) -> bool {
        matches!(self.predicate, Predicate::Equals(_)) && self.action.is_none()
    }

    /// Data-only view of this transition.
    pub fn summary(&self) -> TransitionSummary<Id, Sym> {
        TransitionSummary {
            id: self.id,
            source: self.source.clone(),
            target: self.target.clone(),
            predicate: self.predicate.summary(),
            has_action: self.action.is_some(),
            hits: self.hits,
            synthesized: self.synthesized,
        }
    }

    pub(crate) fn matches(
        &self,
        symbol: &Sym,
        state: &StateRecord<Id>,
    ) -> Result<bool, CallbackError> {
        if !self.leaves(&state.name) {
            return Ok(false);
        }
        self.predicate.evaluate(symbol, state)
    }
}

/// Serializable description of a transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionSummary<Id, Sym> {
    pub id: TransitionId,
    pub source: Id,
    pub target: Id,
    pub predicate: PredicateSummary<Sym>,
    pub has_action: bool,
    pub hits: u64,
    #[serde(default)]
    pub synthesized: bool,
}
