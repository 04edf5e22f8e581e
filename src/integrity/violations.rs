//! Structural integrity violations.

use crate::core::TransitionId;
use thiserror::Error;

/// A broken structural invariant of an automaton.
///
/// These are unreachable through the engine's own operations but can
/// appear in checkpoints loaded from elsewhere.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrityViolation {
    #[error("Start state {state} is missing from the state map")]
    MissingStartState { state: String },

    #[error("State {state} appears more than once")]
    DuplicateState { state: String },

    #[error("Current state {state} is missing from the state map")]
    DanglingCurrent { state: String },

    #[error("Transition {transition} leaves unknown state {state}")]
    DanglingSource {
        transition: TransitionId,
        state: String,
    },

    #[error("Transition {transition} enters unknown state {state}")]
    DanglingTarget {
        transition: TransitionId,
        state: String,
    },

    #[error("Transition id {transition} is used more than once")]
    DuplicateTransitionId { transition: TransitionId },

    #[error("Transition id {transition} is not below the next allocated id {next}")]
    StaleAllocator { transition: TransitionId, next: u64 },
}

/// Join violations into one message.
pub(crate) fn render(violations: &[IntegrityViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
