//! Structural integrity checks for automata.
//!
//! Uses Stillwater's `Validation` to accumulate ALL violations instead of
//! stopping at the first one, so a corrupted checkpoint is reported in a
//! single pass.
//!
//! # Example
//!
//! ```rust
//! use adaptive_automaton::engine::Automaton;
//! use adaptive_automaton::integrity::check_snapshot;
//! use stillwater::validation::Validation;
//!
//! let automaton: Automaton<String, &str> = Automaton::new("START".to_string());
//! assert!(matches!(
//!     check_snapshot(&automaton.snapshot()),
//!     Validation::Success(())
//! ));
//! ```

pub mod rules;
pub mod violations;

pub use rules::{check_snapshot, collect_violations};
pub use violations::IntegrityViolation;
pub(crate) use violations::render;
