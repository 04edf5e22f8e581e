//! Step history tracking.
//!
//! Provides immutable tracking of the steps an automaton took, as reported
//! to a [`RecordingObserver`](crate::engine::RecordingObserver).

use super::state::StateId;
use super::transition::TransitionId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a step moved the automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum StepKind {
    /// An existing transition fired
    Fired { transition: TransitionId },

    /// No transition matched and a new state was synthesized
    Extended { transition: TransitionId },
}

/// Record of a single step.
///
/// The symbol is stored in its `Debug` rendering so that histories can be
/// serialized regardless of the symbol type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StepEvent<Id: StateId> {
    /// The state that was current when the step began
    pub from: Id,
    /// The state that became current
    pub to: Id,
    /// Debug rendering of the consumed symbol
    pub symbol: String,
    pub kind: StepKind,
    /// When the step completed
    pub timestamp: DateTime<Utc>,
}

impl<Id: StateId> StepEvent<Id> {
    pub fn is_extension(&self) -> bool {
        matches!(self.kind, StepKind::Extended { .. })
    }
}

/// Ordered history of steps.
///
/// History is immutable - the `record` method returns a new history
/// with the event added.
///
/// # Example
///
/// ```rust
/// use adaptive_automaton::core::{StepEvent, StepHistory, StepKind, TransitionId};
/// use chrono::Utc;
///
/// let history = StepHistory::new()
///     .record(StepEvent {
///         from: "START".to_string(),
///         to: "FEVER".to_string(),
///         symbol: "\"fever\"".to_string(),
///         kind: StepKind::Fired { transition: TransitionId(0) },
///         timestamp: Utc::now(),
///     })
///     .record(StepEvent {
///         from: "FEVER".to_string(),
///         to: "FLU".to_string(),
///         symbol: "\"cough\"".to_string(),
///         kind: StepKind::Fired { transition: TransitionId(1) },
///         timestamp: Utc::now(),
///     });
///
/// let path = history.get_path();
/// assert_eq!(path.len(), 3); // START -> FEVER -> FLU
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StepHistory<Id: StateId> {
    events: Vec<StepEvent<Id>>,
}

impl<Id: StateId> Default for StepHistory<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: StateId> StepHistory<Id> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Record an event, returning a new history.
    ///
    /// The existing history is left unchanged.
    pub fn record(&self, event: StepEvent<Id>) -> Self {
        let mut events = self.events.clone();
        events.push(event);
        Self { events }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the starting state of the first event, then the `to` state
    /// of each event in order.
    pub fn get_path(&self) -> Vec<&Id> {
        let mut path = Vec::new();
        if let Some(first) = self.events.first() {
            path.push(&first.from);
        }
        for event in &self.events {
            path.push(&event.to);
        }
        path
    }

    /// Calculate total duration from first to last event.
    ///
    /// Returns `None` if there are no events.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.events.first(), self.events.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all events in order.
    pub fn events(&self) -> &[StepEvent<Id>] {
        &self.events
    }

    /// Events where the automaton synthesized a new state.
    pub fn extensions(&self) -> impl Iterator<Item = &StepEvent<Id>> {
        self.events.iter().filter(|event| event.is_extension())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
