//! Checkpoint error types.

use crate::core::TransitionId;
use crate::integrity::{self, IntegrityViolation};
use std::fmt;
use thiserror::Error;

/// Wire encoding of a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Encoding {
    Json,
    Binary,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Json => f.write_str("JSON"),
            Encoding::Binary => f.write_str("binary"),
        }
    }
}

/// Errors raised while saving or restoring a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Could not encode checkpoint as {encoding}: {message}")]
    Encode { encoding: Encoding, message: String },

    #[error("Could not decode {encoding} checkpoint: {message}")]
    Decode { encoding: Encoding, message: String },

    #[error("Checkpoint format version {found} is not supported (expected {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Every broken invariant found in the checkpointed structure.
    #[error("Checkpoint describes an inconsistent automaton: {}", integrity::render(.0))]
    Inconsistent(Vec<IntegrityViolation>),

    /// A custom predicate or an action cannot be rebuilt from data.
    #[error("Transition {transition} has behavior that cannot be restored from data")]
    OpaqueBehavior { transition: TransitionId },
}

impl CheckpointError {
    pub(crate) fn encode(encoding: Encoding, error: impl fmt::Display) -> Self {
        CheckpointError::Encode {
            encoding,
            message: error.to_string(),
        }
    }

    pub(crate) fn decode(encoding: Encoding, error: impl fmt::Display) -> Self {
        CheckpointError::Decode {
            encoding,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_encoding() {
        let error = CheckpointError::decode(Encoding::Binary, "unexpected end of input");
        assert_eq!(
            error.to_string(),
            "Could not decode binary checkpoint: unexpected end of input"
        );
    }

    #[test]
    fn inconsistent_lists_every_violation() {
        let error = CheckpointError::Inconsistent(vec![
            IntegrityViolation::DuplicateTransitionId {
                transition: TransitionId(1),
            },
            IntegrityViolation::DanglingCurrent {
                state: "\"GONE\"".to_string(),
            },
        ]);

        let message = error.to_string();
        assert!(message.contains("t1 is used more than once"));
        assert!(message.contains("Current state \"GONE\" is missing"));
    }
}
