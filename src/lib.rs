//! Adaptive automaton: a finite-state automaton that grows itself.
//!
//! Where a classic automaton rejects input it has no transition for, this
//! one learns: an unmatched symbol synthesizes a fresh state plus an
//! exact-match transition to it, and execution continues. Usage counters
//! on states and transitions let rarely used structure be pruned later.
//!
//! # Core Concepts
//!
//! - **States**: named nodes with a terminal flag, metadata and a visit count
//! - **Transitions**: ordered edges guarded by a [`Predicate`], optionally
//!   running an [`Action`] when they fire
//! - **Auto-extension**: unmatched symbols grow the automaton
//! - **Simulation**: dry runs against an independent deep copy
//! - **Pruning**: frequency-based removal that keeps the start state and
//!   referential integrity
//! - **Checkpoints**: serializable snapshots of learned structure
//!
//! # Example
//!
//! ```rust
//! use adaptive_automaton::core::{Predicate, StateAttributes};
//! use adaptive_automaton::Automaton;
//!
//! let mut automaton: Automaton<String, &str> = Automaton::new("START".to_string());
//! automaton.add_state("FLU".to_string(), StateAttributes::terminal());
//! automaton.add_transition(
//!     "START".to_string(),
//!     "FEVER".to_string(),
//!     Predicate::equals("fever"),
//!     None,
//! );
//! automaton.add_transition(
//!     "FEVER".to_string(),
//!     "FLU".to_string(),
//!     Predicate::equals("cough"),
//!     None,
//! );
//!
//! assert!(automaton.run(["fever", "cough"]).unwrap());
//!
//! // Unknown input is learned rather than rejected.
//! automaton.reset();
//! let (terminal, sandbox) = automaton.simulate(["rash"]).unwrap();
//! assert!(!terminal);
//! assert_eq!(sandbox.stats().unwrap().states, 4);
//! assert_eq!(automaton.stats().unwrap().states, 3);
//! ```

pub mod builder;
pub mod checkpoint;
pub mod core;
pub mod engine;
pub mod integrity;

// Re-export commonly used types
pub use builder::{AutomatonBuilder, BuildError, TransitionBuilder};
pub use checkpoint::{AutomatonSnapshot, Checkpoint, CheckpointError};
pub use core::{
    Action, CallbackError, Metadata, Predicate, StateAttributes, StateId, StateRecord, Symbol,
    TransitionId,
};
pub use engine::{
    Automaton, AutomatonConfig, AutomatonError, CurrentRemoval, ExtensionPolicy, Observer,
    PrunePolicy, PruneReport, SharedAutomaton, Stats, TracingObserver,
};
