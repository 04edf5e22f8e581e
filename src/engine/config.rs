//! Automaton configuration.

use serde::{Deserialize, Serialize};

/// What pruning does when the current state falls below the visit
/// threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrentRemoval {
    /// Fail the prune call before anything is removed
    #[default]
    Reject,

    /// Prune, then move the current pointer back to the start state
    ResetToStart,
}

/// How auto-extension treats transitions it synthesized earlier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPolicy {
    /// Synthesized transitions are recorded but never matched, so each
    /// unmatched symbol grows the automaton by one state
    #[default]
    AlwaysGrow,

    /// Synthesized transitions match like caller-added ones, so a learned
    /// symbol is replayed instead of growing the automaton again
    ReuseLearned,
}

/// Thresholds and policy for usage-based pruning.
///
/// States with fewer than `min_state_visits` visits and transitions with
/// fewer than `min_transition_hits` hits are removed. The start state is
/// always kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrunePolicy {
    pub min_state_visits: u64,
    pub min_transition_hits: u64,
    pub on_current_removed: CurrentRemoval,
}

impl Default for PrunePolicy {
    fn default() -> Self {
        Self {
            min_state_visits: 2,
            min_transition_hits: 2,
            on_current_removed: CurrentRemoval::Reject,
        }
    }
}

impl PrunePolicy {
    pub fn new(min_state_visits: u64, min_transition_hits: u64) -> Self {
        Self {
            min_state_visits,
            min_transition_hits,
            ..Self::default()
        }
    }

    pub fn on_current_removed(mut self, strategy: CurrentRemoval) -> Self {
        self.on_current_removed = strategy;
        self
    }
}

/// Configuration carried by an automaton and inherited by its sandboxes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomatonConfig {
    pub prune: PrunePolicy,
    pub extension: ExtensionPolicy,
}

impl AutomatonConfig {
    pub fn with_prune(mut self, prune: PrunePolicy) -> Self {
        self.prune = prune;
        self
    }

    pub fn with_extension(mut self, extension: ExtensionPolicy) -> Self {
        self.extension = extension;
        self
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_are_two() {
        let policy = PrunePolicy::default();
        assert_eq!(policy.min_state_visits, 2);
        assert_eq!(policy.min_transition_hits, 2);
        assert_eq!(policy.on_current_removed, CurrentRemoval::Reject);
    }

    #[test]
    fn empty_json_uses_defaults() {
        let config = AutomatonConfig::from_json("{}").unwrap();
        assert_eq!(config, AutomatonConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = AutomatonConfig::from_json(
            r#"{"prune": {"min_state_visits": 5, "on_current_removed": "reset_to_start"}}"#,
        )
        .unwrap();

        assert_eq!(config.prune.min_state_visits, 5);
        assert_eq!(config.prune.min_transition_hits, 2);
        assert_eq!(config.prune.on_current_removed, CurrentRemoval::ResetToStart);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AutomatonConfig::default()
            .with_prune(PrunePolicy::new(3, 1).on_current_removed(CurrentRemoval::ResetToStart))
            .with_extension(ExtensionPolicy::ReuseLearned);

        let json = config.to_json().unwrap();
        assert_eq!(AutomatonConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn extension_policy_defaults_to_always_grow() {
        let config = AutomatonConfig::from_json(r#"{"extension": "reuse_learned"}"#).unwrap();

        assert_eq!(AutomatonConfig::default().extension, ExtensionPolicy::AlwaysGrow);
        assert_eq!(config.extension, ExtensionPolicy::ReuseLearned);
        assert_eq!(config.prune, PrunePolicy::default());
    }

    #[test]
    fn unknown_strategy_is_rejected() {
        let result =
            AutomatonConfig::from_json(r#"{"prune": {"on_current_removed": "ignore"}}"#);
        assert!(result.is_err());
    }
}
