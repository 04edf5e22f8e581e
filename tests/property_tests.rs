//! Property-based tests for the automaton engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use adaptive_automaton::core::{Predicate, StateAttributes};
use adaptive_automaton::engine::RecordingObserver;
use adaptive_automaton::{
    Automaton, AutomatonConfig, Checkpoint, CurrentRemoval, ExtensionPolicy, PrunePolicy,
};
use proptest::prelude::*;
use std::sync::Arc;

fn seeded() -> Automaton<String, u8> {
    let mut automaton = Automaton::new("START".to_string());
    automaton.add_state("DONE".to_string(), StateAttributes::terminal());
    automaton.add_transition(
        "START".to_string(),
        "A".to_string(),
        Predicate::equals(0),
        None,
    );
    automaton.add_transition(
        "A".to_string(),
        "DONE".to_string(),
        Predicate::equals(1),
        None,
    );
    automaton
}

prop_compose! {
    fn arbitrary_input()(symbols in prop::collection::vec(0..4u8, 0..24)) -> Vec<u8> {
        symbols
    }
}

proptest! {
    #[test]
    fn start_state_survives_any_prune(
        input in arbitrary_input(),
        min_visits in 0..6u64,
        min_hits in 0..6u64,
    ) {
        let mut automaton = seeded();
        automaton.run(input).unwrap();

        let policy = PrunePolicy::new(min_visits, min_hits)
            .on_current_removed(CurrentRemoval::ResetToStart);
        automaton.prune_with(&policy).unwrap();

        prop_assert!(automaton.state(&"START".to_string()).is_some());
        prop_assert!(automaton.verify_integrity().is_ok());
    }

    #[test]
    fn pruned_transitions_never_dangle(
        input in arbitrary_input(),
        min_visits in 0..4u64,
        min_hits in 0..4u64,
    ) {
        let mut automaton = seeded();
        automaton.run(input).unwrap();
        automaton.reset();

        automaton.prune(min_visits, min_hits).unwrap();

        for transition in automaton.transitions() {
            prop_assert!(automaton.state(&transition.source).is_some());
            prop_assert!(automaton.state(&transition.target).is_some());
            prop_assert!(transition.hits >= min_hits);
        }
    }

    #[test]
    fn simulate_leaves_original_unchanged(
        history in arbitrary_input(),
        probe in arbitrary_input(),
    ) {
        let mut automaton = seeded();
        automaton.run(history).unwrap();
        let before = automaton.snapshot();

        let (terminal, sandbox) = automaton.simulate(probe.clone()).unwrap();

        prop_assert_eq!(automaton.snapshot(), before);
        prop_assert_eq!(terminal, sandbox.is_terminal().unwrap());

        // Running for real reproduces the sandbox exactly.
        automaton.run(probe).unwrap();
        prop_assert_eq!(automaton.snapshot(), sandbox.snapshot());
    }

    #[test]
    fn counters_are_monotonic(input in arbitrary_input()) {
        let mut automaton = seeded();

        for symbol in input {
            let before = automaton.snapshot();
            automaton.step(symbol).unwrap();
            let after = automaton.snapshot();

            prop_assert_eq!(after.total_visits(), before.total_visits() + 1);
            // Synthesized transitions start at zero hits.
            prop_assert!(after.total_hits() >= before.total_hits());
            prop_assert!(after.total_hits() <= before.total_hits() + 1);
            for state in &before.states {
                let visits = after.state(&state.name).map(|s| s.visits);
                prop_assert!(visits >= Some(state.visits));
            }
        }
    }

    #[test]
    fn each_unmatched_step_adds_one_state_and_transition(input in arbitrary_input()) {
        let mut automaton = seeded();

        for symbol in input {
            let states = automaton.stats().unwrap().states;
            let transitions = automaton.transitions().len();
            let matched = automaton
                .transitions_from(automaton.current_id())
                .filter(|transition| !transition.synthesized)
                .any(|transition| {
                    matches!(transition.predicate, Predicate::Equals(known) if known == symbol)
                });

            automaton.step(symbol).unwrap();

            let grown = usize::from(!matched);
            prop_assert_eq!(automaton.stats().unwrap().states, states + grown);
            prop_assert_eq!(automaton.transitions().len(), transitions + grown);
        }
    }

    #[test]
    fn reused_learning_replays_without_growth(input in arbitrary_input()) {
        let config = AutomatonConfig::default().with_extension(ExtensionPolicy::ReuseLearned);
        let mut automaton = Automaton::with_config("START".to_string(), config);
        automaton.run(input.clone()).unwrap();
        let learned = automaton.stats().unwrap();

        automaton.reset();
        automaton.run(input).unwrap();

        prop_assert_eq!(automaton.stats().unwrap(), learned);
    }

    #[test]
    fn add_state_is_idempotent(name in "[A-Z]{1,6}", terminal in any::<bool>()) {
        let mut automaton = seeded();
        let attributes = StateAttributes { is_terminal: terminal, ..Default::default() };

        let first = automaton.add_state(name.clone(), attributes.clone());
        let snapshot = automaton.snapshot();
        let seeded_name = ["START", "A", "DONE"].contains(&name.as_str());
        let second = automaton.add_state(name, attributes);

        prop_assert!(!second);
        prop_assert_eq!(first, !seeded_name);
        prop_assert_eq!(automaton.snapshot(), snapshot);
    }

    #[test]
    fn execution_is_deterministic(input in arbitrary_input()) {
        let mut left = seeded();
        let mut right = seeded();

        let left_terminal = left.run(input.clone()).unwrap();
        let right_terminal = right.run(input).unwrap();

        prop_assert_eq!(left_terminal, right_terminal);
        prop_assert_eq!(left.snapshot(), right.snapshot());
    }

    #[test]
    fn recorded_path_follows_every_step(input in arbitrary_input()) {
        let recorder = Arc::new(RecordingObserver::new());
        let mut automaton = seeded();
        automaton.observe(recorder.clone());

        automaton.run(input.clone()).unwrap();

        let history = recorder.history();
        prop_assert_eq!(history.len(), input.len());
        if let Some(last) = history.get_path().last() {
            prop_assert_eq!(*last, automaton.current_id());
        }
    }

    #[test]
    fn checkpoint_roundtrip_preserves_snapshot(input in arbitrary_input()) {
        let mut automaton = seeded();
        automaton.run(input).unwrap();

        let bytes = automaton.checkpoint().to_bytes().unwrap();
        let checkpoint = Checkpoint::<String, u8>::from_bytes(&bytes).unwrap();
        let restored = Automaton::from_checkpoint(checkpoint, Default::default()).unwrap();

        prop_assert_eq!(restored.snapshot(), automaton.snapshot());
    }
}
