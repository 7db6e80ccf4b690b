//! Integration tests for the simulation driver.
//!
//! These tests run the full pipeline end-to-end with the shared data
//! fixtures: events and interactions flow in, personality and
//! connection state shifts, and every change lands in the JSONL log.

use std::fs;

use tempfile::tempdir;

use driver::{Driver, DriverConfig};
use psyche_core::emotion::{effects, EmotionKind};
use psyche_events::{fixtures, StateChange, StateSnapshot, Tick, Topic};

/// The four agents the fixture data refers to.
const FIXTURE_CAST: [&str; 4] = ["agent_corin", "agent_mira", "agent_sage", "agent_voss"];

/// Spawn the fixture cast on a driver, templates round-robin.
fn spawn_fixture_cast(driver: &mut Driver) {
    let templates = ["friendly", "analytical", "creative"];
    for (i, agent_id) in FIXTURE_CAST.iter().enumerate() {
        driver.spawn_agent(*agent_id, Some(templates[i % templates.len()]));
    }
}

/// Sanity-check the shared fixtures before leaning on them.
#[test]
fn test_fixtures_load() {
    let events = fixtures::sample_events();
    let interactions = fixtures::sample_interactions();

    assert_eq!(events.len(), 10, "Expected 10 sample events");
    assert_eq!(interactions.len(), 6, "Expected 6 sample interactions");
    assert!(
        events.iter().any(|e| e.source.is_none()),
        "Expected a sourceless event"
    );
}

/// Feed every fixture event and interaction through the driver and
/// verify state moved and every change reached the log.
#[test]
fn test_full_pipeline() {
    let dir = tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("changes.jsonl");

    let mut config = DriverConfig::default();
    config.output.change_log = Some(log_path.clone());
    let mut driver = Driver::new(config).expect("Failed to create driver");

    spawn_fixture_cast(&mut driver);
    for source in FIXTURE_CAST {
        for target in FIXTURE_CAST {
            if source != target {
                driver.connect(source, target);
            }
        }
    }

    // Everything happens to Corin; the other three are the sources
    for event in fixtures::sample_events() {
        let update = driver.emit_event("agent_corin", &event);
        assert!(update.is_some(), "Known agent should produce an update");
    }
    for interaction in fixtures::sample_interactions() {
        driver.record_interaction(&interaction);
    }
    let summary = driver.process_tick().expect("Tick should process");

    assert!(summary.changes_logged > 0, "Expected logged changes");
    assert_eq!(driver.pending_changes(), 0);

    // Corin's emotional memory holds all ten events
    assert_eq!(
        driver
            .updater()
            .get_emotional_memory("agent_corin", None)
            .len(),
        10
    );

    // The betrayal (voss -> mira, strength -0.5) dragged that connection down
    let damaged = driver
        .connections()
        .get_connection("agent_voss", "agent_mira")
        .expect("Connection should exist");
    assert!(
        damaged.value < 0.0,
        "Betrayal should leave a negative connection"
    );

    driver.flush().expect("Flush should succeed");
    let content = fs::read_to_string(&log_path).expect("Failed to read change log");
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len() as u64, driver.changes_logged());
    for line in lines {
        let change: StateChange = serde_json::from_str(line).expect("Invalid change line");
        assert!(Topic::all().contains(&change.topic()));
    }
}

/// A strong negative conflict should raise stress and leave the agent
/// visibly angry.
#[test]
fn test_conflict_event_raises_stress_and_anger() {
    let mut driver = Driver::with_defaults();
    spawn_fixture_cast(&mut driver);

    let before = driver
        .store()
        .get_personality("agent_corin")
        .expect("Corin should exist")
        .mood
        .stress;

    let event = fixtures::conflict_event();
    driver
        .emit_event("agent_corin", &event)
        .expect("Corin should produce an update");

    let after = driver
        .store()
        .get_personality("agent_corin")
        .expect("Corin should exist")
        .mood
        .stress;
    assert!(after > before, "Conflict should raise stress");

    let dominant = driver
        .emotions()
        .dominant("agent_corin")
        .expect("Expected an active emotion");
    assert_eq!(dominant.kind, EmotionKind::Anger);

    let expression = effects::expression(driver.emotions(), "agent_corin");
    assert_eq!(expression.label, "angry");
}

/// The betrayal fixture should floor trust and push value negative.
#[test]
fn test_betrayal_damages_connection() {
    let mut driver = Driver::with_defaults();
    spawn_fixture_cast(&mut driver);
    driver.connect("agent_voss", "agent_mira");

    let betrayal = fixtures::betrayal_interaction();
    driver.record_interaction(&betrayal);

    let conn = driver
        .connections()
        .get_connection("agent_voss", "agent_mira")
        .expect("Connection should exist");
    assert!((conn.value + 0.5).abs() < 1e-6);
    assert_eq!(conn.trust, 0.0, "Trust should floor at zero");
    assert_eq!(
        conn.familiarity, 0.0,
        "Negative rule leaves familiarity alone"
    );
    assert_eq!(conn.last_interaction, Tick::new(300));
}

/// With decay every tick, a disturbed personality drifts back toward
/// its template baseline.
#[test]
fn test_decay_restores_baseline() {
    let mut config = DriverConfig::default();
    config.simulation.decay_interval = 1;
    let mut driver = Driver::new(config).expect("Failed to create driver");
    spawn_fixture_cast(&mut driver);

    // Mira is analytical: sociability starts at 0.4
    for event in fixtures::sample_events() {
        driver.emit_event("agent_mira", &event);
    }
    let disturbed = driver
        .store()
        .get_personality("agent_mira")
        .expect("Mira should exist")
        .adaptive_traits["sociability"]
        .value;
    assert!(
        (disturbed - 0.4).abs() > 1e-3,
        "Events should move sociability off baseline"
    );

    for _ in 0..200 {
        driver.process_tick().expect("Tick should process");
    }

    let settled = driver
        .store()
        .get_personality("agent_mira")
        .expect("Mira should exist");
    assert!(
        (settled.adaptive_traits["sociability"].value - 0.4).abs() < 1e-3,
        "Sociability should settle back near baseline"
    );
    assert!(
        (settled.mood.stress - 0.5).abs() < 1e-3,
        "Stress should settle back toward neutral"
    );
}

/// A written snapshot parses back with the same agents and connections.
#[test]
fn test_snapshot_round_trip() {
    let mut driver = Driver::with_defaults();
    spawn_fixture_cast(&mut driver);
    driver.connect("agent_mira", "agent_corin");
    driver.process_tick().expect("Tick should process");

    let snapshot = driver.snapshot();
    let json = serde_json::to_string_pretty(&snapshot).expect("Failed to serialize snapshot");
    let parsed: StateSnapshot = serde_json::from_str(&json).expect("Failed to parse snapshot");

    assert_eq!(parsed.snapshot_id, snapshot.snapshot_id);
    assert_eq!(parsed.tick, snapshot.tick);
    assert_eq!(parsed.agents.len(), 4);
    assert_eq!(parsed.connections.len(), 1);

    let mira = parsed.find_agent("agent_mira").expect("Mira should be present");
    assert_eq!(mira.mood.stress, 0.4);
    assert_eq!(mira.expression.as_deref(), Some("neutral expression"));
}
