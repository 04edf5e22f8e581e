//! The automaton engine.
//!
//! Owns states, transitions and the current position, and implements
//! stepping with auto-extension, sandboxed simulation and usage-based
//! pruning.
//!
//! # Key Concepts
//!
//! - **Auto-extension**: an unmatched symbol creates a new state and an
//!   exact-match transition to it instead of failing
//! - **Sandbox**: `simulate` runs input against a deep copy
//! - **Pruning**: states and transitions below usage thresholds are removed,
//!   keeping the start state and referential integrity
//! - **Observers**: execution events are reported to injectable listeners

mod automaton;
pub mod config;
mod error;
pub mod observer;
mod prune;
pub mod shared;

pub use automaton::{Automaton, Stats};
pub use config::{AutomatonConfig, CurrentRemoval, ExtensionPolicy, PrunePolicy};
pub use error::AutomatonError;
pub use observer::{Observer, RecordingObserver, TracingObserver};
pub use prune::PruneReport;
pub use shared::SharedAutomaton;
