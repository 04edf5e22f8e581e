//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, CallbackError, Predicate, StateId, StateRecord, Symbol};

/// A transition ready to be added to an automaton.
#[derive(Clone, Debug)]
pub struct TransitionSpec<Id: StateId, Sym: Symbol> {
    pub source: Id,
    pub target: Id,
    pub predicate: Predicate<Id, Sym>,
    pub action: Option<Action<Id, Sym>>,
}

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use adaptive_automaton::builder::TransitionBuilder;
///
/// let transition = TransitionBuilder::<String, &str>::new()
///     .from("START".to_string())
///     .to("FEVER".to_string())
///     .on_symbol("fever")
///     .build()
///     .unwrap();
///
/// assert_eq!(transition.target, "FEVER");
/// ```
pub struct TransitionBuilder<Id: StateId, Sym: Symbol> {
    source: Option<Id>,
    target: Option<Id>,
    predicate: Option<Predicate<Id, Sym>>,
    action: Option<Action<Id, Sym>>,
}

impl<Id: StateId, Sym: Symbol> TransitionBuilder<Id, Sym> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            predicate: None,
            action: None,
        }
    }

    /// Set the source state (required).
    pub fn from(mut self, state: Id) -> Self {
        self.source = Some(state);
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: Id) -> Self {
        self.target = Some(state);
        self
    }

    /// Fire on exactly this symbol.
    pub fn on_symbol(mut self, symbol: Sym) -> Self {
        self.predicate = Some(Predicate::equals(symbol));
        self
    }

    /// Set the predicate directly.
    pub fn predicate(mut self, predicate: Predicate<Id, Sym>) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Fire when the closure returns true.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Predicate::new(predicate));
        self
    }

    /// Fire when the closure returns `Ok(true)`; an `Err` aborts the step.
    pub fn when_fallible<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) -> Result<bool, CallbackError> + Send + Sync + 'static,
    {
        self.predicate = Some(Predicate::fallible(predicate));
        self
    }

    /// Add a side effect run when the transition fires (optional).
    pub fn action<F>(mut self, action: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) + Send + Sync + 'static,
    {
        self.action = Some(Action::new(action));
        self
    }

    /// Add a side effect that may fail (optional).
    pub fn action_fallible<F>(mut self, action: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        self.action = Some(Action::fallible(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionSpec<Id, Sym>, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSourceState)?;
        let target = self.target.ok_or(BuildError::MissingTargetState)?;
        let predicate = self.predicate.ok_or(BuildError::MissingPredicate)?;

        Ok(TransitionSpec {
            source,
            target,
            predicate,
            action: self.action,
        })
    }
}

impl<Id: StateId, Sym: Symbol> Default for TransitionBuilder<Id, Sym> {
    fn default() -> Self {
        Self::new()
    }
}
