//! Checkpoint and restore for automata.
//!
//! A checkpoint captures the structure and usage counters of an automaton
//! so learned state survives process restarts. Closures cannot be
//! serialized, so only automata whose transitions are exact-match
//! predicates without actions (everything auto-extension produces) can be
//! restored. Any automaton can be checkpointed for inspection.

use crate::core::{Predicate, PredicateSummary, StateId, Symbol, Transition};
use crate::engine::{Automaton, AutomatonConfig};
use crate::integrity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;
mod snapshot;

pub use error::{CheckpointError, Encoding};
pub use snapshot::AutomatonSnapshot;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable checkpoint of an automaton.
/// Does NOT include predicate closures or actions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "Sym: Serialize", deserialize = "Sym: Deserialize<'de>"))]
pub struct Checkpoint<Id: StateId, Sym> {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Structure and counters at checkpoint time
    pub snapshot: AutomatonSnapshot<Id, Sym>,
}

impl<Id: StateId, Sym> Checkpoint<Id, Sym>
where
    Sym: Serialize + for<'de> Deserialize<'de>,
{
    pub fn new(snapshot: AutomatonSnapshot<Id, Sym>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            snapshot,
        }
    }

    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self).map_err(|e| CheckpointError::encode(Encoding::Json, e))
    }

    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        serde_json::from_str(json).map_err(|e| CheckpointError::decode(Encoding::Json, e))
    }

    /// Compact binary encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::encode(Encoding::Binary, e))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CheckpointError> {
        bincode::deserialize(bytes).map_err(|e| CheckpointError::decode(Encoding::Binary, e))
    }
}

impl<Id: StateId, Sym: Symbol> Automaton<Id, Sym> {
    /// Capture the current structure and counters.
    pub fn checkpoint(&self) -> Checkpoint<Id, Sym>
    where
        Sym: Serialize + for<'de> Deserialize<'de>,
    {
        Checkpoint::new(self.snapshot())
    }

    /// Rebuild an automaton from a checkpoint.
    ///
    /// Counters, the current position and transition ids are preserved.
    /// Observers are not part of a checkpoint and must be re-attached.
    pub fn from_checkpoint(
        checkpoint: Checkpoint<Id, Sym>,
        config: AutomatonConfig,
    ) -> Result<Self, CheckpointError> {
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: checkpoint.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Self::from_snapshot(checkpoint.snapshot, config)
    }

    /// Rebuild an automaton from a snapshot whose transitions are all
    /// plain exact-match transitions.
    pub fn from_snapshot(
        snapshot: AutomatonSnapshot<Id, Sym>,
        config: AutomatonConfig,
    ) -> Result<Self, CheckpointError> {
        let violations = integrity::collect_violations(&snapshot);
        if !violations.is_empty() {
            return Err(CheckpointError::Inconsistent(violations));
        }

        let mut transitions = Vec::with_capacity(snapshot.transitions.len());
        for summary in &snapshot.transitions {
            let symbol = match (&summary.predicate, summary.has_action) {
                (PredicateSummary::Equals(symbol), false) => symbol.clone(),
                _ => {
                    return Err(CheckpointError::OpaqueBehavior {
                        transition: summary.id,
                    })
                }
            };
            transitions.push(Transition {
                id: summary.id,
                source: summary.source.clone(),
                target: summary.target.clone(),
                predicate: Predicate::Equals(symbol),
                action: None,
                hits: summary.hits,
                synthesized: summary.synthesized,
            });
        }

        let states = snapshot
            .states
            .iter()
            .map(|state| (state.name.clone(), state.clone()))
            .collect();

        Ok(Automaton::from_parts(&snapshot, states, transitions, config))
    }
}
