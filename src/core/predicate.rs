//! Transition predicates and actions.
//!
//! Predicates decide whether a transition fires for a symbol from a state.
//! Actions run side effects when it does. Both are stored behind `Arc` so a
//! sandbox clone shares the closures with the original. Predicates must be
//! pure functions of their arguments and immutable captures.

use super::state::{StateId, StateRecord};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::sync::Arc;
use thiserror::Error;

/// Trait for input symbols.
///
/// Implemented for every type that is cloneable, comparable and thread-safe.
pub trait Symbol: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Symbol for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Failure reported by a caller-supplied predicate or action.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CallbackError {
    message: String,
}

impl CallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Type alias for custom predicate functions.
pub type PredicateFn<Id, Sym> =
    Arc<dyn Fn(&Sym, &StateRecord<Id>) -> Result<bool, CallbackError> + Send + Sync>;

/// Type alias for action functions.
pub type ActionFn<Id, Sym> =
    Arc<dyn Fn(&Sym, &StateRecord<Id>) -> Result<(), CallbackError> + Send + Sync>;

/// Decides whether a transition fires.
///
/// Learned transitions always use [`Predicate::Equals`], which keeps them
/// representable as plain data in checkpoints.
///
/// # Example
///
/// ```rust
/// use adaptive_automaton::core::{Predicate, StateRecord};
///
/// let state = StateRecord::new("START".to_string());
/// let exact = Predicate::<String, &str>::equals("fever");
/// let any_cough = Predicate::<String, &str>::new(|symbol, _| symbol.contains("cough"));
///
/// assert!(exact.evaluate(&"fever", &state).unwrap());
/// assert!(!exact.evaluate(&"rash", &state).unwrap());
/// assert!(any_cough.evaluate(&"dry cough", &state).unwrap());
/// ```
pub enum Predicate<Id: StateId, Sym: Symbol> {
    /// Fires on exactly this symbol
    Equals(Sym),

    /// Fires when the closure returns `Ok(true)`
    Custom(PredicateFn<Id, Sym>),
}

impl<Id: StateId, Sym: Symbol> Predicate<Id, Sym> {
    /// Exact-match predicate on a single symbol value.
    pub fn equals(symbol: Sym) -> Self {
        Predicate::Equals(symbol)
    }

    /// Create a predicate from an infallible pure function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) -> bool + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(move |symbol, state| Ok(predicate(symbol, state))))
    }

    /// Create a predicate that may report a failure.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) -> Result<bool, CallbackError> + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(predicate))
    }

    /// Evaluate the predicate.
    pub fn evaluate(&self, symbol: &Sym, state: &StateRecord<Id>) -> Result<bool, CallbackError> {
        match self {
            Predicate::Equals(expected) => Ok(expected == symbol),
            Predicate::Custom(predicate) => predicate(symbol, state),
        }
    }

    /// Data-only description of this predicate.
    pub fn summary(&self) -> PredicateSummary<Sym> {
        match self {
            Predicate::Equals(symbol) => PredicateSummary::Equals(symbol.clone()),
            Predicate::Custom(_) => PredicateSummary::Custom,
        }
    }
}

impl<Id: StateId, Sym: Symbol> Clone for Predicate<Id, Sym> {
    fn clone(&self) -> Self {
        match self {
            Predicate::Equals(symbol) => Predicate::Equals(symbol.clone()),
            Predicate::Custom(predicate) => Predicate::Custom(Arc::clone(predicate)),
        }
    }
}

impl<Id: StateId, Sym: Symbol> Debug for Predicate<Id, Sym> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Equals(symbol) => f.debug_tuple("Equals").field(symbol).finish(),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Serializable description of a predicate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateSummary<Sym> {
    Equals(Sym),
    Custom,
}

/// Side effect run when a transition fires, before the automaton moves.
pub struct Action<Id: StateId, Sym: Symbol> {
    action: ActionFn<Id, Sym>,
}

impl<Id: StateId, Sym: Symbol> Action<Id, Sym> {
    /// Create an action that cannot fail.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(move |symbol, state| {
                action(symbol, state);
                Ok(())
            }),
        }
    }

    /// Create an action that may report a failure.
    pub fn fallible<F>(action: F) -> Self
    where
        F: Fn(&Sym, &StateRecord<Id>) -> Result<(), CallbackError> + Send + Sync + 'static,
    {
        Self {
            action: Arc::new(action),
        }
    }

    pub fn invoke(&self, symbol: &Sym, state: &StateRecord<Id>) -> Result<(), CallbackError> {
        (self.action)(symbol, state)
    }
}

impl<Id: StateId, Sym: Symbol> Clone for Action<Id, Sym> {
    fn clone(&self) -> Self {
        Self {
            action: Arc::clone(&self.action),
        }
    }
}

impl<Id: StateId, Sym: Symbol> Debug for Action<Id, Sym> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn state(name: &str) -> StateRecord<String> {
        StateRecord::new(name.to_string())
    }

    #[test]
    fn equals_matches_exact_symbol() {
        let predicate = Predicate::<String, String>::equals("fever".to_string());

        assert!(predicate.evaluate(&"fever".to_string(), &state("START")).unwrap());
        assert!(!predicate.evaluate(&"Fever".to_string(), &state("START")).unwrap());
    }

    #[test]
    fn custom_predicate_sees_state() {
        let predicate = Predicate::<String, u32>::new(|symbol, state| {
            state.visits > 0 && *symbol > 10
        });

        let mut visited = state("A");
        assert!(!predicate.evaluate(&20, &visited).unwrap());

        visited.visits = 1;
        assert!(predicate.evaluate(&20, &visited).unwrap());
        assert!(!predicate.evaluate(&5, &visited).unwrap());
    }

    #[test]
    fn fallible_predicate_reports_error() {
        let predicate = Predicate::<String, i32>::fallible(|symbol, _| {
            if *symbol < 0 {
                Err(CallbackError::new("negative symbol"))
            } else {
                Ok(true)
            }
        });

        let error = predicate.evaluate(&-1, &state("A")).unwrap_err();
        assert_eq!(error.message(), "negative symbol");
        assert!(predicate.evaluate(&1, &state("A")).unwrap());
    }

    #[test]
    fn predicate_is_deterministic() {
        let predicate = Predicate::<String, i32>::new(|symbol, _| symbol % 2 == 0);
        let current = state("A");

        assert_eq!(
            predicate.evaluate(&4, &current).unwrap(),
            predicate.evaluate(&4, &current).unwrap()
        );
    }

    #[test]
    fn summary_exposes_symbol_for_equals_only() {
        let exact = Predicate::<String, &str>::equals("cough");
        let custom = Predicate::<String, &str>::new(|_, _| true);

        assert_eq!(exact.summary(), PredicateSummary::Equals("cough"));
        assert_eq!(custom.summary(), PredicateSummary::Custom);
    }

    #[test]
    fn cloned_action_shares_closure() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = Action::<String, &str>::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let cloned = action.clone();

        action.invoke(&"fever", &state("START")).unwrap();
        cloned.invoke(&"fever", &state("START")).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn fallible_action_propagates_error() {
        let action =
            Action::<String, &str>::fallible(|symbol, _| Err(CallbackError::new(*symbol)));

        let error = action.invoke(&"boom", &state("A")).unwrap_err();
        assert_eq!(error.to_string(), "boom");
    }
}
