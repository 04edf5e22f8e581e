//! Builder for constructing automata.

use crate::builder::error::BuildError;
use crate::builder::transition::{TransitionBuilder, TransitionSpec};
use crate::core::{StateAttributes, StateId, Symbol};
use crate::engine::{Automaton, AutomatonConfig, Observer};
use std::sync::Arc;

/// Builder for constructing automata with a fluent API.
///
/// States are added before transitions, so attributes given here win over
/// the default states that transitions create for missing endpoints.
pub struct AutomatonBuilder<Id: StateId, Sym: Symbol> {
    start: Option<Id>,
    states: Vec<(Id, StateAttributes)>,
    transitions: Vec<TransitionSpec<Id, Sym>>,
    config: AutomatonConfig,
    observers: Vec<Arc<dyn Observer<Id, Sym>>>,
}

impl<Id: StateId, Sym: Symbol> AutomatonBuilder<Id, Sym> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            start: None,
            states: Vec::new(),
            transitions: Vec::new(),
            config: AutomatonConfig::default(),
            observers: Vec::new(),
        }
    }

    /// Set the start state (required).
    pub fn start(mut self, state: Id) -> Self {
        self.start = Some(state);
        self
    }

    /// Declare a state with attributes.
    pub fn state(mut self, state: Id, attributes: StateAttributes) -> Self {
        self.states.push((state, attributes));
        self
    }

    /// Declare a terminal state.
    pub fn terminal(self, state: Id) -> Self {
        self.state(state, StateAttributes::terminal())
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<Id, Sym>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionSpec<Id, Sym>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, specs: Vec<TransitionSpec<Id, Sym>>) -> Self {
        self.transitions.extend(specs);
        self
    }

    pub fn config(mut self, config: AutomatonConfig) -> Self {
        self.config = config;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn Observer<Id, Sym>>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Build the automaton.
    /// Returns an error if the start state is missing.
    pub fn build(self) -> Result<Automaton<Id, Sym>, BuildError> {
        let start = self.start.ok_or(BuildError::MissingStartState)?;

        let mut automaton = Automaton::with_config(start, self.config);
        for (state, attributes) in self.states {
            automaton.add_state(state, attributes);
        }
        for transition in self.transitions {
            automaton.add_transition(
                transition.source,
                transition.target,
                transition.predicate,
                transition.action,
            );
        }
        for observer in self.observers {
            automaton.observe(observer);
        }

        Ok(automaton)
    }
}

impl<Id: StateId, Sym: Symbol> Default for AutomatonBuilder<Id, Sym> {
    fn default() -> Self {
        Self::new()
    }
}
