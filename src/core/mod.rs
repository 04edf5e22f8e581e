//! Core automaton data model.
//!
//! This module contains the plain data the engine operates on:
//! - State identifiers and records via the `StateId` trait
//! - Predicates and actions attached to transitions
//! - Transition records and their serializable summaries
//! - Immutable step history
//!
//! Nothing in this module mutates an automaton; the engine owns that.

mod history;
mod predicate;
mod state;
mod transition;

pub use history::{StepEvent, StepHistory, StepKind};
pub use predicate::{
    Action, ActionFn, CallbackError, Predicate, PredicateFn, PredicateSummary, Symbol,
};
pub use state::{Metadata, StateAttributes, StateId, StateRecord};
pub use transition::{Transition, TransitionId, TransitionSummary};
