//! State identifiers and state records.
//!
//! A state is a named node carrying a terminal flag, typed metadata and a
//! visit counter. Identifiers are opaque to the engine apart from the
//! ability to synthesize fresh ones during auto-extension.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Identifiers must be orderable so that the state map iterates
/// deterministically, and serializable so that snapshots and checkpoints
/// can carry them.
///
/// # Example
///
/// ```rust
/// use adaptive_automaton::core::StateId;
///
/// assert_eq!(String::synthesize(3), "S3");
/// assert_eq!(u64::synthesize(3), 3);
/// ```
pub trait StateId:
    Clone + Ord + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Produce a candidate identifier for the given ordinal.
    ///
    /// The engine calls this with increasing ordinals until it finds one
    /// that is not already in use, so implementations only need to be
    /// injective over ordinals.
    fn synthesize(ordinal: usize) -> Self;
}

impl StateId for String {
    fn synthesize(ordinal: usize) -> Self {
        format!("S{ordinal}")
    }
}

impl StateId for u64 {
    fn synthesize(ordinal: usize) -> Self {
        ordinal as u64
    }
}

impl StateId for usize {
    fn synthesize(ordinal: usize) -> Self {
        ordinal
    }
}

/// Metadata attached to a state.
///
/// `concept` holds the ontology link set by
/// [`Automaton::link_ontology`](crate::engine::Automaton::link_ontology).
/// `label` is a free-form display name. Anything else goes in
/// `annotations`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// External concept identifier (e.g. an ontology URI)
    #[serde(default)]
    pub concept: Option<String>,

    /// Human-readable label
    #[serde(default)]
    pub label: Option<String>,

    /// Additional string annotations
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
}

impl Metadata {
    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn annotate(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.concept.is_none() && self.label.is_none() && self.annotations.is_empty()
    }
}

/// Attributes supplied when adding a state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateAttributes {
    pub is_terminal: bool,
    pub metadata: Metadata,
}

impl StateAttributes {
    /// Attributes for a terminal state with empty metadata.
    pub fn terminal() -> Self {
        Self {
            is_terminal: true,
            metadata: Metadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A node of the automaton.
///
/// `visits` counts the `step` calls that started while this state was
/// current, including the call that moved away from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateRecord<Id: StateId> {
    pub name: Id,
    pub is_terminal: bool,
    #[serde(default)]
    pub metadata: Metadata,
    pub visits: u64,
}

impl<Id: StateId> StateRecord<Id> {
    /// Create a fresh, non-terminal state with no visits.
    pub fn new(name: Id) -> Self {
        Self::with_attributes(name, StateAttributes::default())
    }

    pub fn with_attributes(name: Id, attributes: StateAttributes) -> Self {
        Self {
            name,
            is_terminal: attributes.is_terminal,
            metadata: attributes.metadata,
            visits: 0,
        }
    }

    /// The linked ontology concept, if any.
    pub fn concept(&self) -> Option<&str> {
        self.metadata.concept.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_ids_are_prefixed() {
        assert_eq!(String::synthesize(0), "S0");
        assert_eq!(String::synthesize(12), "S12");
    }

    #[test]
    fn numeric_ids_use_ordinal() {
        assert_eq!(u64::synthesize(7), 7);
        assert_eq!(usize::synthesize(7), 7);
    }

    #[test]
    fn new_state_has_defaults() {
        let state = StateRecord::new("START".to_string());
        assert_eq!(state.name, "START");
        assert!(!state.is_terminal);
        assert!(state.metadata.is_empty());
        assert_eq!(state.visits, 0);
    }

    #[test]
    fn attributes_are_applied() {
        let attributes =
            StateAttributes::terminal().with_metadata(Metadata::default().with_label("Flu"));
        let state = StateRecord::with_attributes(1u64, attributes);

        assert!(state.is_terminal);
        assert_eq!(state.metadata.label.as_deref(), Some("Flu"));
        assert!(state.concept().is_none());
    }

    #[test]
    fn metadata_builders_compose() {
        let metadata = Metadata::default()
            .with_concept("http://purl.obolibrary.org/obo/DOID_8469")
            .annotate("source", "triage");

        assert_eq!(
            metadata.concept.as_deref(),
            Some("http://purl.obolibrary.org/obo/DOID_8469")
        );
        assert_eq!(metadata.annotations.get("source").map(String::as_str), Some("triage"));
        assert!(!metadata.is_empty());
    }

    #[test]
    fn state_serializes_correctly() {
        let mut state = StateRecord::new("FEVER".to_string());
        state.visits = 4;
        state.metadata = Metadata::default().with_concept("fever");

        let json = serde_json::to_string(&state).unwrap();
        let deserialized: StateRecord<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }

    #[test]
    fn missing_metadata_defaults_to_empty() {
        let state: StateRecord<u64> =
            serde_json::from_str(r#"{"name": 3, "is_terminal": true, "visits": 2}"#).unwrap();

        assert!(state.is_terminal);
        assert_eq!(state.visits, 2);
        assert!(state.metadata.is_empty());
    }
}
