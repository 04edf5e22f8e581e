//! Symptom Diagnosis
//!
//! This example walks a small symptom automaton through known and unknown
//! input, showing how it learns and forgets.
//!
//! Key concepts:
//! - Known paths reach terminal diagnoses
//! - Unknown symptoms synthesize new states instead of failing
//! - Simulation explores input without touching the real automaton
//! - Pruning removes structure that was rarely used
//! - Checkpoints persist what was learned
//!
//! Run with: RUST_LOG=debug cargo run --example diagnosis

use adaptive_automaton::builder::{AutomatonBuilder, TransitionBuilder};
use adaptive_automaton::core::Metadata;
use adaptive_automaton::engine::RecordingObserver;
use adaptive_automaton::{
    Automaton, AutomatonConfig, Checkpoint, CurrentRemoval, PrunePolicy, StateAttributes,
    TracingObserver,
};
use std::error::Error;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn symptoms(input: &[&str]) -> Vec<String> {
    input.iter().map(|s| s.to_string()).collect()
}

fn build() -> Result<Automaton<String, String>, Box<dyn Error>> {
    let config = AutomatonConfig::default()
        .with_prune(PrunePolicy::new(2, 2).on_current_removed(CurrentRemoval::ResetToStart));
    let flu =
        StateAttributes::terminal().with_metadata(Metadata::default().with_label("Influenza"));

    let automaton = AutomatonBuilder::new()
        .start("START".to_string())
        .state("FLU".to_string(), flu)
        .transition(
            TransitionBuilder::new()
                .from("START".to_string())
                .to("FEVER".to_string())
                .on_symbol("fever".to_string()),
        )?
        .transition(
            TransitionBuilder::new()
                .from("FEVER".to_string())
                .to("FLU".to_string())
                .on_symbol("cough".to_string()),
        )?
        .config(config)
        .observer(Arc::new(TracingObserver))
        .build()?;
    Ok(automaton)
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("=== Symptom Diagnosis Example ===\n");

    let mut automaton = build()?;
    automaton.link_ontology(&"FLU".to_string(), "http://purl.obolibrary.org/obo/DOID_8469")?;
    println!("Initial automaton:\n{automaton}");

    // Run 1: a known path
    let terminal = automaton.run(symptoms(&["fever", "cough"]))?;
    println!("fever, cough -> {} (terminal: {terminal})", automaton.current_id());
    automaton.reset();

    // Run 2: a dry run with unknown symptoms
    let (terminal, sandbox) = automaton.simulate(symptoms(&["fever", "rash"]))?;
    println!(
        "simulated fever, rash -> {} (terminal: {terminal}), sandbox has {} states, real automaton has {}",
        sandbox.current_id(),
        sandbox.stats()?.states,
        automaton.stats()?.states
    );

    // Run 3: learning for real, with every step recorded
    let recorder = Arc::new(RecordingObserver::new());
    automaton.observe(recorder.clone());
    automaton.run(symptoms(&["rash", "headache", "fatigue"]))?;
    let stats = automaton.stats()?;
    println!(
        "after learning: {} states, {} transitions, current {}",
        stats.states, stats.transitions, stats.current_state
    );

    let history = recorder.history();
    println!(
        "learned path {:?} in {:?} ({} extensions)",
        history.get_path(),
        history.duration().unwrap_or_default(),
        history.extensions().count()
    );

    // Persist what was learned
    let json = automaton.checkpoint().to_json()?;
    let restored = Automaton::from_checkpoint(
        Checkpoint::<String, String>::from_json(&json)?,
        automaton.config().clone(),
    )?;
    println!("checkpoint restored with {} states", restored.stats()?.states);

    // Forget rarely used structure
    let report = automaton.prune_default()?;
    println!(
        "pruned {} states and {} transitions (current reset: {})",
        report.removed_states.len(),
        report.removed_transitions.len(),
        report.current_reset
    );
    println!("\nFinal automaton:\n{automaton}");

    println!("=== Example Complete ===");
    Ok(())
}
