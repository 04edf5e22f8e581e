//! Observers of automaton execution.
//!
//! The engine never writes output itself. Drivers that want a trace attach
//! an [`Observer`]: [`TracingObserver`] forwards events to `tracing`, and
//! [`RecordingObserver`] collects them into a [`StepHistory`].

use crate::core::{StateId, StateRecord, StepEvent, StepHistory, StepKind, Symbol, TransitionId};
use crate::engine::prune::PruneReport;
use chrono::Utc;
use parking_lot::Mutex;
use std::fmt::Debug;

/// Listener for automaton events. All methods default to doing nothing.
pub trait Observer<Id: StateId, Sym: Symbol>: Send + Sync {
    /// A step began. `state` is the current state after its visit count
    /// was incremented.
    fn on_step(&self, _symbol: &Sym, _state: &StateRecord<Id>) {}

    /// An existing transition fired.
    fn on_transition_fired(
        &self,
        _transition: TransitionId,
        _source: &Id,
        _target: &Id,
        _symbol: &Sym,
    ) {
    }

    /// No transition matched, so `new_state` was synthesized.
    fn on_auto_extend(
        &self,
        _source: &Id,
        _new_state: &Id,
        _transition: TransitionId,
        _symbol: &Sym,
    ) {
    }

    /// A prune completed.
    fn on_prune(&self, _report: &PruneReport<Id>) {}
}

/// Emits every event as a `tracing` event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl<Id: StateId, Sym: Symbol> Observer<Id, Sym> for TracingObserver {
    fn on_step(&self, symbol: &Sym, state: &StateRecord<Id>) {
        tracing::debug!(
            symbol = ?symbol,
            state = ?state.name,
            visits = state.visits,
            "processing symbol"
        );
    }

    fn on_transition_fired(
        &self,
        transition: TransitionId,
        source: &Id,
        target: &Id,
        symbol: &Sym,
    ) {
        tracing::debug!(
            %transition,
            source = ?source,
            target = ?target,
            symbol = ?symbol,
            "transition fired"
        );
    }

    fn on_auto_extend(
        &self,
        source: &Id,
        new_state: &Id,
        transition: TransitionId,
        symbol: &Sym,
    ) {
        tracing::info!(
            %transition,
            source = ?source,
            new_state = ?new_state,
            symbol = ?symbol,
            "no transition matched, synthesized state"
        );
    }

    fn on_prune(&self, report: &PruneReport<Id>) {
        tracing::info!(
            removed_states = report.removed_states.len(),
            removed_transitions = report.removed_transitions.len(),
            current_reset = report.current_reset,
            "pruned automaton"
        );
    }
}

/// Collects step events into a [`StepHistory`].
///
/// # Example
///
/// ```rust
/// use adaptive_automaton::engine::{Automaton, RecordingObserver};
/// use std::sync::Arc;
///
/// let recorder = Arc::new(RecordingObserver::new());
/// let mut automaton: Automaton<String, &str> = Automaton::new("START".to_string());
/// automaton.observe(recorder.clone());
///
/// automaton.run(["rash", "sneeze"]).unwrap();
///
/// let history = recorder.history();
/// assert_eq!(history.extensions().count(), 2);
/// assert_eq!(history.get_path().len(), 3);
/// ```
#[derive(Debug)]
pub struct RecordingObserver<Id: StateId> {
    history: Mutex<StepHistory<Id>>,
    prunes: Mutex<Vec<PruneReport<Id>>>,
}

impl<Id: StateId> Default for RecordingObserver<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: StateId> RecordingObserver<Id> {
    pub fn new() -> Self {
        Self {
            history: Mutex::new(StepHistory::new()),
            prunes: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the steps recorded so far.
    pub fn history(&self) -> StepHistory<Id> {
        self.history.lock().clone()
    }

    /// Reports of the prunes recorded so far.
    pub fn prunes(&self) -> Vec<PruneReport<Id>> {
        self.prunes.lock().clone()
    }

    fn push(&self, from: &Id, to: &Id, symbol: &impl Debug, kind: StepKind) {
        let mut history = self.history.lock();
        *history = history.record(StepEvent {
            from: from.clone(),
            to: to.clone(),
            symbol: format!("{symbol:?}"),
            kind,
            timestamp: Utc::now(),
        });
    }
}

impl<Id: StateId, Sym: Symbol> Observer<Id, Sym> for RecordingObserver<Id> {
    fn on_transition_fired(
        &self,
        transition: TransitionId,
        source: &Id,
        target: &Id,
        symbol: &Sym,
    ) {
        self.push(source, target, symbol, StepKind::Fired { transition });
    }

    fn on_auto_extend(
        &self,
        source: &Id,
        new_state: &Id,
        transition: TransitionId,
        symbol: &Sym,
    ) {
        self.push(source, new_state, symbol, StepKind::Extended { transition });
    }

    fn on_prune(&self, report: &PruneReport<Id>) {
        self.prunes.lock().push(report.clone());
    }
}
