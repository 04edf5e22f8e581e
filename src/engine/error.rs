//! Errors raised by automaton operations.

use crate::core::{CallbackError, TransitionId};
use crate::integrity::{self, IntegrityViolation};
use thiserror::Error;

/// Errors that can occur while operating an automaton.
///
/// State identifiers are rendered with their `Debug` form so the error
/// type does not depend on the identifier type.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AutomatonError {
    #[error("Unknown state {state}")]
    UnknownState { state: String },

    #[error("Pruning would remove the current state {state}")]
    CurrentStateRemoved { state: String },

    #[error("Predicate of transition {transition} failed in state {state}: {source}")]
    PredicateFailed {
        state: String,
        transition: TransitionId,
        #[source]
        source: CallbackError,
    },

    #[error("Action of transition {transition} failed in state {state}: {source}")]
    ActionFailed {
        state: String,
        transition: TransitionId,
        #[source]
        source: CallbackError,
    },

    #[error("Transition {transition} references unknown state {endpoint}")]
    DanglingTransition {
        transition: TransitionId,
        endpoint: String,
    },

    #[error("Automaton structure is corrupted: {}", integrity::render(.0))]
    Corrupted(Vec<IntegrityViolation>),
}

impl AutomatonError {
    pub(crate) fn unknown_state(state: &impl std::fmt::Debug) -> Self {
        AutomatonError::UnknownState {
            state: format!("{state:?}"),
        }
    }
}
