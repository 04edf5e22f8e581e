//! Build errors for automaton and transition builders.

use thiserror::Error;

/// Errors that can occur when building automata and transitions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Start state not specified. Call .start(state) before .build()")]
    MissingStartState,

    #[error("Transition source state not specified. Call .from(state)")]
    MissingSourceState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingTargetState,

    #[error("Transition predicate not specified. Call .on_symbol(symbol) or .when(predicate)")]
    MissingPredicate,
}
