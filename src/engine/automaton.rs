//! Self-extending automaton.

use crate::checkpoint::AutomatonSnapshot;
use crate::core::{
    Action, Predicate, StateAttributes, StateId, StateRecord, Symbol, Transition, TransitionId,
};
use crate::engine::config::{AutomatonConfig, CurrentRemoval, ExtensionPolicy, PrunePolicy};
use crate::engine::error::AutomatonError;
use crate::engine::observer::Observer;
use crate::engine::prune::{self, PruneReport};
use crate::integrity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Read-only summary of an automaton.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct Stats<Id: StateId> {
    pub states: usize,
    pub transitions: usize,
    pub current_state: Id,
    pub current_is_terminal: bool,
}

/// A finite-state automaton that grows when it meets unmatched input.
///
/// `step` never rejects a symbol: when no transition out of the current
/// state accepts it, a fresh state and an exact-match transition to it
/// are created. Transitions are tried in insertion order and the first
/// match fires.
///
/// Cloning produces an independent copy. State and transition records are
/// copied by value; predicate and action closures are shared, which is
/// sound because they must be pure.
///
/// # Example
///
/// ```rust
/// use adaptive_automaton::core::{Predicate, StateAttributes};
/// use adaptive_automaton::engine::Automaton;
///
/// let mut automaton: Automaton<String, &str> = Automaton::new("START".to_string());
/// automaton.add_state("FLU".to_string(), StateAttributes::terminal());
/// automaton.add_transition("START".to_string(), "FEVER".to_string(), Predicate::equals("fever"), None);
/// automaton.add_transition("FEVER".to_string(), "FLU".to_string(), Predicate::equals("cough"), None);
///
/// assert!(automaton.run(["fever", "cough"]).unwrap());
/// assert_eq!(automaton.current_id(), "FLU");
/// ```
pub struct Automaton<Id: StateId, Sym: Symbol> {
    states: BTreeMap<Id, StateRecord<Id>>,
    transitions: Vec<Transition<Id, Sym>>,
    start_state: Id,
    current: Id,
    next_transition_id: u64,
    config: AutomatonConfig,
    observers: Vec<Arc<dyn Observer<Id, Sym>>>,
}

impl<Id: StateId, Sym: Symbol> Automaton<Id, Sym> {
    /// Create an automaton holding only the start state, which is current.
    pub fn new(start_state: Id) -> Self {
        Self::with_config(start_state, AutomatonConfig::default())
    }

    pub fn with_config(start_state: Id, config: AutomatonConfig) -> Self {
        let mut states = BTreeMap::new();
        states.insert(start_state.clone(), StateRecord::new(start_state.clone()));
        Self {
            states,
            transitions: Vec::new(),
            current: start_state.clone(),
            start_state,
            next_transition_id: 0,
            config,
            observers: Vec::new(),
        }
    }

    /// Assemble an automaton from restored parts. The caller has already
    /// checked the snapshot's integrity.
    pub(crate) fn from_parts(
        snapshot: &AutomatonSnapshot<Id, Sym>,
        states: BTreeMap<Id, StateRecord<Id>>,
        transitions: Vec<Transition<Id, Sym>>,
        config: AutomatonConfig,
    ) -> Self {
        Self {
            states,
            transitions,
            start_state: snapshot.start_state.clone(),
            current: snapshot.current_state.clone(),
            next_transition_id: snapshot.next_transition_id,
            config,
            observers: Vec::new(),
        }
    }

    /// Attach an observer. Observers are not carried into sandboxes.
    pub fn observe(&mut self, observer: Arc<dyn Observer<Id, Sym>>) {
        self.observers.push(observer);
    }

    /// Insert a state if it is not already present.
    ///
    /// Returns `false` and leaves the existing state untouched when `name`
    /// is already known.
    pub fn add_state(&mut self, name: Id, attributes: StateAttributes) -> bool {
        if self.states.contains_key(&name) {
            return false;
        }
        self.states
            .insert(name.clone(), StateRecord::with_attributes(name, attributes));
        true
    }

    /// Add a transition, creating either endpoint as a default state if it
    /// does not exist yet.
    ///
    /// Transitions are never deduplicated: adding an equivalent transition
    /// twice yields two distinct transitions, and the earlier one wins
    /// whenever both match.
    pub fn add_transition(
        &mut self,
        source: Id,
        target: Id,
        predicate: Predicate<Id, Sym>,
        action: Option<Action<Id, Sym>>,
    ) -> TransitionId {
        self.push_transition(source, target, predicate, action, false)
    }

    fn push_transition(
        &mut self,
        source: Id,
        target: Id,
        predicate: Predicate<Id, Sym>,
        action: Option<Action<Id, Sym>>,
        synthesized: bool,
    ) -> TransitionId {
        self.add_state(source.clone(), StateAttributes::default());
        self.add_state(target.clone(), StateAttributes::default());

        let id = TransitionId(self.next_transition_id);
        self.next_transition_id += 1;
        self.transitions.push(Transition {
            id,
            source,
            target,
            predicate,
            action,
            hits: 0,
            synthesized,
        });
        id
    }

    /// Consume one symbol and return the new current state.
    ///
    /// The current state's visit count is incremented before any predicate
    /// runs, so it stays incremented even when a predicate or action
    /// fails. A failing predicate or action leaves `current` and all hit
    /// counts unchanged.
    ///
    /// Under the default [`ExtensionPolicy::AlwaysGrow`] synthesized
    /// transitions never match again, so every unmatched occurrence of a
    /// symbol creates its own state.
    pub fn step(&mut self, symbol: Sym) -> Result<&StateRecord<Id>, AutomatonError> {
        let current_id = self.current.clone();
        self.states
            .get_mut(&current_id)
            .ok_or_else(|| AutomatonError::unknown_state(&current_id))?
            .visits += 1;
        let state = self
            .states
            .get(&current_id)
            .ok_or_else(|| AutomatonError::unknown_state(&current_id))?;

        for observer in &self.observers {
            observer.on_step(&symbol, state);
        }

        let reuse_learned = self.config.extension == ExtensionPolicy::ReuseLearned;
        let mut fired = None;
        for (index, transition) in self.transitions.iter().enumerate() {
            if transition.synthesized && !reuse_learned {
                continue;
            }
            let matched =
                transition
                    .matches(&symbol, state)
                    .map_err(|source| AutomatonError::PredicateFailed {
                        state: format!("{current_id:?}"),
                        transition: transition.id,
                        source,
                    })?;
            if matched {
                fired = Some(index);
                break;
            }
        }

        match fired {
            Some(index) => {
                let transition = &self.transitions[index];
                if !self.states.contains_key(&transition.target) {
                    return Err(AutomatonError::DanglingTransition {
                        transition: transition.id,
                        endpoint: format!("{:?}", transition.target),
                    });
                }
                if let Some(action) = &transition.action {
                    action
                        .invoke(&symbol, state)
                        .map_err(|source| AutomatonError::ActionFailed {
                            state: format!("{current_id:?}"),
                            transition: transition.id,
                            source,
                        })?;
                }

                let transition = &mut self.transitions[index];
                transition.hits += 1;
                self.current = transition.target.clone();

                let (id, target) = (transition.id, &transition.target);
                for observer in &self.observers {
                    observer.on_transition_fired(id, &current_id, target, &symbol);
                }
            }
            None => {
                let new_state = self.fresh_state_id();
                let id = self.push_transition(
                    current_id.clone(),
                    new_state.clone(),
                    Predicate::equals(symbol.clone()),
                    None,
                    true,
                );
                self.current = new_state;

                for observer in &self.observers {
                    observer.on_auto_extend(&current_id, &self.current, id, &symbol);
                }
            }
        }

        self.current()
    }

    /// Step through every symbol in order and report whether the final
    /// state is terminal.
    ///
    /// An empty input reports the current state's terminal flag without
    /// stepping.
    pub fn run<I>(&mut self, symbols: I) -> Result<bool, AutomatonError>
    where
        I: IntoIterator<Item = Sym>,
    {
        for symbol in symbols {
            self.step(symbol)?;
        }
        Ok(self.current()?.is_terminal)
    }

    /// Run `symbols` against an independent copy and return it.
    ///
    /// The original automaton is not modified. The sandbox keeps the
    /// configuration but no observers.
    pub fn simulate<I>(&self, symbols: I) -> Result<(bool, Self), AutomatonError>
    where
        I: IntoIterator<Item = Sym>,
    {
        let mut sandbox = self.clone();
        let terminal = sandbox.run(symbols)?;
        Ok((terminal, sandbox))
    }

    /// Like [`simulate`](Self::simulate), with `observer` attached to the
    /// sandbox before it runs.
    pub fn simulate_with<I>(
        &self,
        symbols: I,
        observer: Arc<dyn Observer<Id, Sym>>,
    ) -> Result<(bool, Self), AutomatonError>
    where
        I: IntoIterator<Item = Sym>,
    {
        let mut sandbox = self.clone();
        sandbox.observe(observer);
        let terminal = sandbox.run(symbols)?;
        Ok((terminal, sandbox))
    }

    /// Prune with explicit thresholds and the configured current-state
    /// policy.
    pub fn prune(
        &mut self,
        min_state_visits: u64,
        min_transition_hits: u64,
    ) -> Result<PruneReport<Id>, AutomatonError> {
        let policy = PrunePolicy {
            min_state_visits,
            min_transition_hits,
            on_current_removed: self.config.prune.on_current_removed,
        };
        self.prune_with(&policy)
    }

    /// Prune with the configured policy.
    pub fn prune_default(&mut self) -> Result<PruneReport<Id>, AutomatonError> {
        let policy = self.config.prune;
        self.prune_with(&policy)
    }

    /// Remove underused states and transitions.
    ///
    /// The start state always survives. Any transition touching a removed
    /// state is removed regardless of its hits. If the current state would
    /// be removed, `policy.on_current_removed` decides between failing
    /// without changes and resetting to the start state.
    pub fn prune_with(&mut self, policy: &PrunePolicy) -> Result<PruneReport<Id>, AutomatonError> {
        let plan = prune::plan(
            &self.states,
            &self.transitions,
            &self.start_state,
            policy.min_state_visits,
            policy.min_transition_hits,
        );

        let current_doomed = plan.states.contains(&self.current);
        if current_doomed && policy.on_current_removed == CurrentRemoval::Reject {
            return Err(AutomatonError::CurrentStateRemoved {
                state: format!("{:?}", self.current),
            });
        }

        self.states.retain(|name, _| !plan.states.contains(name));
        self.transitions
            .retain(|transition| !plan.transitions.contains(&transition.id));
        if current_doomed {
            self.current = self.start_state.clone();
        }

        let report = PruneReport {
            removed_states: plan.states.into_iter().collect(),
            removed_transitions: plan.transitions.into_iter().collect(),
            current_reset: current_doomed,
        };
        tracing::trace!(
            removed_states = report.removed_states.len(),
            removed_transitions = report.removed_transitions.len(),
            "prune applied"
        );
        for observer in &self.observers {
            observer.on_prune(&report);
        }
        Ok(report)
    }

    /// Link a state to an external concept identifier.
    ///
    /// Fails with [`AutomatonError::UnknownState`] instead of creating the
    /// state.
    pub fn link_ontology(
        &mut self,
        state: &Id,
        concept: impl Into<String>,
    ) -> Result<(), AutomatonError> {
        let record = self
            .states
            .get_mut(state)
            .ok_or_else(|| AutomatonError::unknown_state(state))?;
        record.metadata.concept = Some(concept.into());
        Ok(())
    }

    /// Set the terminal flag of an existing state.
    pub fn set_terminal(&mut self, state: &Id, is_terminal: bool) -> Result<(), AutomatonError> {
        let record = self
            .states
            .get_mut(state)
            .ok_or_else(|| AutomatonError::unknown_state(state))?;
        record.is_terminal = is_terminal;
        Ok(())
    }

    /// Move the current pointer back to the start state. Counters are
    /// left as they are.
    pub fn reset(&mut self) {
        self.current = self.start_state.clone();
    }

    pub fn stats(&self) -> Result<Stats<Id>, AutomatonError> {
        let current = self.current()?;
        Ok(Stats {
            states: self.states.len(),
            transitions: self.transitions.len(),
            current_state: current.name.clone(),
            current_is_terminal: current.is_terminal,
        })
    }

    /// Data-only copy of the full structure, usable for equality checks.
    pub fn snapshot(&self) -> AutomatonSnapshot<Id, Sym> {
        AutomatonSnapshot {
            start_state: self.start_state.clone(),
            current_state: self.current.clone(),
            states: self.states.values().cloned().collect(),
            transitions: self.transitions.iter().map(Transition::summary).collect(),
            next_transition_id: self.next_transition_id,
        }
    }

    /// Check every structural invariant and report all violations at once.
    pub fn verify_integrity(&self) -> Result<(), AutomatonError> {
        let violations = integrity::collect_violations(&self.snapshot());
        if violations.is_empty() {
            Ok(())
        } else {
            Err(AutomatonError::Corrupted(violations))
        }
    }

    pub fn current(&self) -> Result<&StateRecord<Id>, AutomatonError> {
        self.states
            .get(&self.current)
            .ok_or_else(|| AutomatonError::unknown_state(&self.current))
    }

    pub fn current_id(&self) -> &Id {
        &self.current
    }

    pub fn start_state(&self) -> &Id {
        &self.start_state
    }

    pub fn state(&self, name: &Id) -> Option<&StateRecord<Id>> {
        self.states.get(name)
    }

    /// States in identifier order.
    pub fn states(&self) -> impl Iterator<Item = &StateRecord<Id>> {
        self.states.values()
    }

    /// Transitions in insertion order, which is also match order.
    pub fn transitions(&self) -> &[Transition<Id, Sym>] {
        &self.transitions
    }

    /// Transitions leaving `state`, in match order.
    pub fn transitions_from<'a>(
        &'a self,
        state: &'a Id,
    ) -> impl Iterator<Item = &'a Transition<Id, Sym>> + 'a {
        self.transitions
            .iter()
            .filter(move |transition| transition.leaves(state))
    }

    pub fn transition(&self, id: TransitionId) -> Option<&Transition<Id, Sym>> {
        self.transitions.iter().find(|transition| transition.id == id)
    }

    pub fn config(&self) -> &AutomatonConfig {
        &self.config
    }

    pub fn is_terminal(&self) -> Result<bool, AutomatonError> {
        Ok(self.current()?.is_terminal)
    }

    /// First unused identifier, counting up from the number of states.
    fn fresh_state_id(&self) -> Id {
        let mut ordinal = self.states.len();
        loop {
            let candidate = Id::synthesize(ordinal);
            if !self.states.contains_key(&candidate) {
                return candidate;
            }
            ordinal += 1;
        }
    }
}

impl<Id: StateId, Sym: Symbol> Clone for Automaton<Id, Sym> {
    /// Deep copy of the data. Observers are not carried over.
    fn clone(&self) -> Self {
        Self {
            states: self.states.clone(),
            transitions: self.transitions.clone(),
            start_state: self.start_state.clone(),
            current: self.current.clone(),
            next_transition_id: self.next_transition_id,
            config: self.config.clone(),
            observers: Vec::new(),
        }
    }
}

impl<Id: StateId, Sym: Symbol> fmt::Debug for Automaton<Id, Sym> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("start_state", &self.start_state)
            .field("current", &self.current)
            .field("states", &self.states.len())
            .field("transitions", &self.transitions.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl<Id: StateId, Sym: Symbol> fmt::Display for Automaton<Id, Sym> {
    /// Multi-line listing of states and transitions with their counters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "States:")?;
        for state in self.states.values() {
            let terminal = if state.is_terminal { " (terminal)" } else { "" };
            let current = if state.name == self.current { " *" } else { "" };
            writeln!(
                f,
                "  {:?}{terminal}{current} [visits: {}]",
                state.name, state.visits
            )?;
        }
        writeln!(f, "Transitions:")?;
        for transition in &self.transitions {
            writeln!(
                f,
                "  {} {:?} -> {:?} {:?} [hits: {}]",
                transition.id,
                transition.source,
                transition.target,
                transition.predicate,
                transition.hits
            )?;
        }
        Ok(())
    }
}
