//! Thread-safe handle around an automaton.
//!
//! The state map, transitions and current pointer form one unit, so a
//! single `RwLock` guards the whole automaton. Mutating calls take the
//! write lock for their full duration. `simulate` clones under the read
//! lock and runs the sandbox after releasing it.

use crate::checkpoint::AutomatonSnapshot;
use crate::core::{Action, Predicate, StateAttributes, StateId, Symbol, TransitionId};
use crate::engine::automaton::{Automaton, Stats};
use crate::engine::error::AutomatonError;
use crate::engine::prune::PruneReport;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, lock-guarded automaton handle.
///
/// Clones of the handle share one automaton. Use
/// [`simulate`](Self::simulate) for an independent copy.
pub struct SharedAutomaton<Id: StateId, Sym: Symbol> {
    inner: Arc<RwLock<Automaton<Id, Sym>>>,
}

impl<Id: StateId, Sym: Symbol> Clone for SharedAutomaton<Id, Sym> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<Id: StateId, Sym: Symbol> From<Automaton<Id, Sym>> for SharedAutomaton<Id, Sym> {
    fn from(automaton: Automaton<Id, Sym>) -> Self {
        Self::new(automaton)
    }
}

impl<Id: StateId, Sym: Symbol> SharedAutomaton<Id, Sym> {
    pub fn new(automaton: Automaton<Id, Sym>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(automaton)),
        }
    }

    pub fn add_state(&self, name: Id, attributes: StateAttributes) -> bool {
        self.inner.write().add_state(name, attributes)
    }

    pub fn add_transition(
        &self,
        source: Id,
        target: Id,
        predicate: Predicate<Id, Sym>,
        action: Option<Action<Id, Sym>>,
    ) -> TransitionId {
        self.inner
            .write()
            .add_transition(source, target, predicate, action)
    }

    /// Step once and return the id of the new current state.
    pub fn step(&self, symbol: Sym) -> Result<Id, AutomatonError> {
        let mut automaton = self.inner.write();
        let name = automaton.step(symbol)?.name.clone();
        Ok(name)
    }

    /// Run a whole sequence under one write lock.
    pub fn run<I>(&self, symbols: I) -> Result<bool, AutomatonError>
    where
        I: IntoIterator<Item = Sym>,
    {
        self.inner.write().run(symbols)
    }

    pub fn simulate<I>(&self, symbols: I) -> Result<(bool, Automaton<Id, Sym>), AutomatonError>
    where
        I: IntoIterator<Item = Sym>,
    {
        let mut sandbox = self.inner.read().clone();
        let terminal = sandbox.run(symbols)?;
        Ok((terminal, sandbox))
    }

    pub fn prune(
        &self,
        min_state_visits: u64,
        min_transition_hits: u64,
    ) -> Result<PruneReport<Id>, AutomatonError> {
        self.inner
            .write()
            .prune(min_state_visits, min_transition_hits)
    }

    pub fn link_ontology(
        &self,
        state: &Id,
        concept: impl Into<String>,
    ) -> Result<(), AutomatonError> {
        self.inner.write().link_ontology(state, concept)
    }

    pub fn reset(&self) {
        self.inner.write().reset();
    }

    pub fn stats(&self) -> Result<Stats<Id>, AutomatonError> {
        self.inner.read().stats()
    }

    pub fn snapshot(&self) -> AutomatonSnapshot<Id, Sym> {
        self.inner.read().snapshot()
    }

    /// Run `f` with shared access.
    pub fn with_read<R>(&self, f: impl FnOnce(&Automaton<Id, Sym>) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access.
    pub fn with_write<R>(&self, f: impl FnOnce(&mut Automaton<Id, Sym>) -> R) -> R {
        f(&mut self.inner.write())
    }
}
