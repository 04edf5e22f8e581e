//! Builder API for ergonomic automaton construction.
//!
//! This module provides fluent builders for creating automata and
//! transitions with validation of required fields.

pub mod automaton;
pub mod error;
pub mod transition;

pub use automaton::AutomatonBuilder;
pub use error::BuildError;
pub use transition::{TransitionBuilder, TransitionSpec};

use crate::core::{StateId, Symbol};

/// Create an exact-match transition.
///
/// # Example
///
/// ```
/// use adaptive_automaton::builder::symbol_transition;
///
/// let transition =
///     symbol_transition::<String, &str>("START".to_string(), "FEVER".to_string(), "fever");
/// assert_eq!(transition.source, "START");
/// ```
pub fn symbol_transition<Id, Sym>(source: Id, target: Id, symbol: Sym) -> TransitionSpec<Id, Sym>
where
    Id: StateId,
    Sym: Symbol,
{
    TransitionSpec {
        source,
        target,
        predicate: crate::core::Predicate::equals(symbol),
        action: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Predicate, StateRecord};

    #[test]
    fn symbol_transition_builds() {
        let transition = symbol_transition::<String, u8>("A".to_string(), "B".to_string(), 7);

        assert_eq!(transition.target, "B");
        assert!(matches!(transition.predicate, Predicate::Equals(7)));
        assert!(transition
            .predicate
            .evaluate(&7, &StateRecord::new("A".to_string()))
            .unwrap());
    }
}
