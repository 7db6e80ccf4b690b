//! Psyche Simulation Demo
//!
//! Spawns a small cast of agents from the stock templates, wires them
//! into a ring of connections, then drives random events, interactions,
//! and emotional fluctuations through the driver for a fixed number of
//! ticks, logging every state change to JSONL.

use clap::Parser;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use driver::{Driver, DriverConfig};
use psyche_core::emotion::{effects, EmotionKind};
use psyche_events::{EmotionalEvent, EventKind, InteractionImpact, InteractionKind, StateSnapshot};

/// Templates assigned round-robin at spawn
const TEMPLATE_ROTATION: [&str; 3] = ["friendly", "analytical", "creative"];

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "psyche_sim")]
#[command(about = "An agent psychology simulation")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Number of agents to spawn
    #[arg(long, default_value_t = 4)]
    agents: usize,

    /// Interval between state snapshots (in ticks)
    #[arg(long, default_value_t = 50)]
    snapshot_interval: u64,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for snapshots and the change log
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

fn main() {
    let args = Args::parse();

    println!("Psyche Simulation");
    println!("=================");
    println!("Seed: {}", args.seed);
    println!("Ticks: {}", args.ticks);
    println!("Agents: {}", args.agents);
    println!("Snapshot interval: {}", args.snapshot_interval);
    println!();

    if args.agents < 2 {
        eprintln!("Error: need at least 2 agents");
        process::exit(1);
    }

    // Ensure output directories exist
    fs::create_dir_all(args.output_dir.join("snapshots")).unwrap_or_else(|e| {
        eprintln!("Warning: Could not create output directories: {}", e);
    });

    let mut config = match &args.config {
        Some(path) => match DriverConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => DriverConfig::default(),
    };
    if config.output.change_log.is_none() {
        config.output.change_log = Some(args.output_dir.join("changes.jsonl"));
    }

    let mut driver = match Driver::new(config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };
    let mut rng = SmallRng::seed_from_u64(args.seed);

    // Spawn agents round-robin across the stock templates
    println!("Spawning agents...");
    let mut agent_ids = Vec::with_capacity(args.agents);
    for i in 0..args.agents {
        let agent_id = format!("agent_{:02}", i);
        let template = TEMPLATE_ROTATION[i % TEMPLATE_ROTATION.len()];
        driver.spawn_agent(agent_id.clone(), Some(template));
        println!("  {} ({})", agent_id, template);
        agent_ids.push(agent_id);
    }
    println!("  Spawned {} agents", agent_ids.len());

    // Connect agents in a ring, both directions
    let ring = if agent_ids.len() == 2 { 1 } else { agent_ids.len() };
    for i in 0..ring {
        let next = (i + 1) % agent_ids.len();
        driver.connect(&agent_ids[i], &agent_ids[next]);
        driver.connect(&agent_ids[next], &agent_ids[i]);
    }
    println!(
        "  Opened {} connections",
        driver.connections().connection_count()
    );

    println!();
    println!("Starting simulation...");
    println!();

    // Main simulation loop
    for tick in 0..args.ticks {
        let mut events = 0;
        let mut interactions = 0;

        for i in 0..agent_ids.len() {
            // Something happens to this agent
            if rng.gen_bool(0.3) {
                let event = random_event(&mut rng, &agent_ids, i);
                driver.emit_event(&agent_ids[i], &event);
                events += 1;
            }
            // Emotions sometimes flare without an external cause
            if rng.gen_bool(0.1) {
                let kind = *EmotionKind::all().choose(&mut rng).unwrap();
                let intensity = rng.gen_range(0.1..0.4);
                driver.feel(&agent_ids[i], kind, intensity, "spontaneous fluctuation");
            }
        }

        // Occasionally two agents interact directly
        if rng.gen_bool(0.4) {
            let source = rng.gen_range(0..agent_ids.len());
            let target = (source + rng.gen_range(1..agent_ids.len())) % agent_ids.len();
            let kind = *InteractionKind::all().choose(&mut rng).unwrap();
            let magnitude = rng.gen_range(0.05..0.3);
            let impact = match kind {
                InteractionKind::Conflict | InteractionKind::Betrayal => {
                    InteractionImpact::negative(magnitude)
                }
                _ => InteractionImpact::positive(magnitude),
            };
            driver.interact(kind, &agent_ids[source], &agent_ids[target], impact);
            interactions += 1;
        }

        let summary = match driver.process_tick() {
            Ok(summary) => summary,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };

        // Report changes this tick (summary every 10 ticks)
        if summary.changes_logged > 0 && tick % 10 == 0 {
            println!(
                "[Tick {:>4}] {} changes (events: {}, interactions: {})",
                tick, summary.changes_logged, events, interactions
            );
        }

        // Generate periodic snapshots
        if tick > 0 && tick % args.snapshot_interval == 0 {
            let snapshot = driver.snapshot();
            if let Err(e) = write_snapshot(&snapshot, &args.output_dir) {
                eprintln!("Warning: Could not write snapshot at tick {}: {}", tick, e);
            }
            if let Err(e) = write_current_state(&snapshot, &args.output_dir) {
                eprintln!("Warning: Could not write current state at tick {}: {}", tick, e);
            }
        }

        // Print progress every 100 ticks
        if tick > 0 && tick % 100 == 0 {
            println!("Tick {} / {}", tick, args.ticks);
        }
    }

    // Generate final snapshot
    let final_snapshot = driver.snapshot();
    if let Err(e) = write_snapshot(&final_snapshot, &args.output_dir) {
        eprintln!("Warning: Could not write final snapshot: {}", e);
    }
    if let Err(e) = write_current_state(&final_snapshot, &args.output_dir) {
        eprintln!("Warning: Could not write final current state: {}", e);
    }
    if let Err(e) = driver.flush() {
        eprintln!("Warning: Could not flush change log: {}", e);
    }

    println!();
    println!(
        "Simulation complete. Ran {} ticks, logged {} changes.",
        args.ticks,
        driver.changes_logged()
    );
    println!("Generated {} snapshots.", driver.snapshots_generated());

    println!();
    println!("Final agent states:");
    for agent_id in driver.store().agent_ids() {
        let expression = effects::expression(driver.emotions(), &agent_id);
        let happiness = driver
            .store()
            .get_personality(&agent_id)
            .map(|p| p.mood.happiness)
            .unwrap_or(0.5);
        println!(
            "  {}: {} (happiness {:.2})",
            agent_id, expression.description, happiness
        );
    }
}

/// Build a random event aimed at `recipient`, sourced from another agent
/// where the kind calls for one
fn random_event(rng: &mut SmallRng, agent_ids: &[String], recipient: usize) -> EmotionalEvent {
    let kind = *EventKind::all().choose(rng).unwrap();
    let intensity = rng.gen_range(0.2..1.0);
    let valence = match kind {
        EventKind::SocialInteraction | EventKind::Learning | EventKind::Cooperation => {
            rng.gen_range(0.1..0.9)
        }
        EventKind::Conflict | EventKind::Threat => rng.gen_range(-0.9..-0.1),
        EventKind::Challenge => rng.gen_range(-0.4..0.8),
        EventKind::Surprise => rng.gen_range(-1.0..1.0),
    };
    let event = EmotionalEvent::new(kind, intensity, valence);
    match kind {
        EventKind::Challenge | EventKind::Learning => event,
        _ => {
            let offset = rng.gen_range(1..agent_ids.len());
            let source = (recipient + offset) % agent_ids.len();
            event.with_source(agent_ids[source].as_str())
        }
    }
}

/// Write a snapshot into the snapshots directory, named by its id
fn write_snapshot(snapshot: &StateSnapshot, output_dir: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    let path = output_dir
        .join("snapshots")
        .join(format!("{}.json", snapshot.snapshot_id));
    fs::write(path, json)
}

/// Overwrite the rolling current-state file
fn write_current_state(snapshot: &StateSnapshot, output_dir: &Path) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(snapshot)?;
    fs::write(output_dir.join("current_state.json"), json)
}
