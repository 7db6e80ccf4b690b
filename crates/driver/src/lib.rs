//! Simulation driver: the composition root for the psychology core.
//!
//! The driver owns the stateful components, wires both observer hubs
//! into one change stream, stamps every operation with the current
//! tick, and flushes accumulated changes to a JSONL log.
//!
//! # Architecture
//!
//! ```text
//! EmotionalEvent ──▶ PersonalityUpdater ──▶ PersonalityStore ─┐
//!              └───▶ EmotionEngine                            │ StateChange
//! Interaction ─────▶ ConnectionManager ───────────────────────┤
//!                                                             ▼
//!                                       PendingChanges ──▶ ChangeLog
//! ```
//!
//! # Modules
//!
//! - [`config`]: TOML configuration with validation

pub mod config;

// Re-export config types
pub use config::{
    default_config_toml, ConfigError, ConnectionsConfig, DriverConfig, EmotionsConfig,
    OutputConfig, SimulationConfig, UpdaterConfig,
};

use std::path::Path;

use thiserror::Error;

use psyche_core::connections::ConnectionManager;
use psyche_core::emotion::{effects, EmotionEngine, EmotionKind};
use psyche_core::log::{ChangeLog, PendingChanges};
use psyche_core::observe::Observers;
use psyche_core::store::PersonalityStore;
use psyche_core::templates::builtin_templates;
use psyche_core::updater::PersonalityUpdater;
use psyche_events::{
    generate_snapshot_id, EmotionalEvent, Interaction, InteractionImpact, InteractionKind,
    PersonalityUpdate, StateSnapshot, Tick,
};

/// Base traits given adaptive copies at spawn so event-driven drift has
/// somewhere to land.
const DRIFTING_TRAITS: [&str; 3] = ["sociability", "resilience", "curiosity"];

/// Errors surfaced at the driver boundary.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Invalid or unreadable configuration
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// Change log I/O failure
    #[error("change log error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bookkeeping returned by [`Driver::process_tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick that was just processed
    pub tick: Tick,
    /// Changes drained to the log this tick
    pub changes_logged: usize,
    /// Whether a personality decay pass ran this tick
    pub decay_applied: bool,
}

/// The main driver coordinating all psychology components.
///
/// Events route through the updater (slow personality drift) and the
/// emotion engine (fast expressive state) at once; interactions route
/// through the connection manager. Every notification either hub emits
/// lands in a shared pending queue that `process_tick` drains into the
/// change log.
pub struct Driver {
    /// Configuration settings
    config: DriverConfig,
    /// Canonical personality records and templates
    store: PersonalityStore,
    /// Event-to-delta computation and emotional memory
    updater: PersonalityUpdater,
    /// Directed relationship graph with interaction history
    connections: ConnectionManager,
    /// Active emotions and dimensional mood per agent
    emotions: EmotionEngine,
    /// Changes captured from both observer hubs since the last tick
    pending: PendingChanges,
    /// JSONL sink for drained changes
    change_log: ChangeLog,
    /// Current simulation tick
    tick: Tick,
    /// Snapshots generated so far
    snapshot_count: u64,
}

impl Driver {
    /// Creates a new driver from a validated configuration.
    pub fn new(config: DriverConfig) -> Result<Self, DriverError> {
        config.validate()?;

        let observers = Observers::new();
        let pending = PendingChanges::new();
        pending.attach(&observers);

        let mut store = PersonalityStore::with_observers(observers.clone());
        for (name, template) in builtin_templates() {
            store.add_template(name, template);
        }

        let updater = PersonalityUpdater::new()
            .with_adaptation_rate(config.updater.adaptation_rate)
            .with_decay_rate(config.updater.decay_rate)
            .with_memory_cap(config.updater.emotional_memory_cap);

        let connections = ConnectionManager::with_observers(observers)
            .with_history_cap(config.connections.history_cap);

        let emotions = EmotionEngine::new()
            .with_decay_rate(config.emotions.decay_rate)
            .with_inertia(config.emotions.mood_inertia)
            .with_history_cap(config.emotions.history_cap);

        let change_log = match &config.output.change_log {
            Some(path) => ChangeLog::new(path)?,
            None => ChangeLog::null(),
        };

        tracing::info!(
            logging = config.output.change_log.is_some(),
            "driver initialized"
        );

        Ok(Self {
            config,
            store,
            updater,
            connections,
            emotions,
            pending,
            change_log,
            tick: Tick::ZERO,
            snapshot_count: 0,
        })
    }

    /// Creates a driver from a configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, DriverError> {
        let config = DriverConfig::from_file(path)?;
        Self::new(config)
    }

    /// Creates a driver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(DriverConfig::default()).expect("default config should always validate")
    }

    /// Create an agent from an optional template and make its
    /// drift-prone traits adaptive.
    ///
    /// Trait updates only land on slots that already exist, so the
    /// driver installs adaptive copies of the base traits the updater
    /// steers (sociability, resilience, curiosity).
    pub fn spawn_agent(&mut self, agent_id: impl Into<String>, template: Option<&str>) {
        let agent_id = agent_id.into();
        self.store.create_personality(agent_id.clone(), template);

        for name in DRIFTING_TRAITS {
            let seed = self
                .store
                .get_personality(&agent_id)
                .and_then(|p| p.base_traits.get(name))
                .cloned();
            if let Some(t) = seed {
                self.store.install_trait(&agent_id, t, true);
            }
        }
    }

    /// Remove an agent everywhere: personality, connections, emotional
    /// state. Interaction history and emotional memory stay behind as
    /// audit records.
    pub fn remove_agent(&mut self, agent_id: &str) {
        self.store.remove_personality(agent_id);
        self.connections.remove_agent(agent_id);
        self.emotions.remove_agent(agent_id);
    }

    /// Route an event through the updater and the emotion engine,
    /// applying the personality deltas immediately. Returns the computed
    /// update, or `None` for an unknown agent.
    pub fn emit_event(
        &mut self,
        agent_id: &str,
        event: &EmotionalEvent,
    ) -> Option<PersonalityUpdate> {
        let update = {
            let personality = self.store.get_personality(agent_id)?;
            let update = self.updater.process_event(personality, event);
            self.emotions.react(agent_id, event, personality, self.tick);
            update
        };
        self.apply_update(agent_id, &update);
        Some(update)
    }

    /// Apply a computed update through the store.
    ///
    /// Trait deltas are offsets onto existing adaptive traits; mood
    /// deltas become clamped absolutes; relationship entries are already
    /// absolute. Entries are applied in sorted key order so notification
    /// order is reproducible.
    pub fn apply_update(&mut self, agent_id: &str, update: &PersonalityUpdate) {
        let personality = match self.store.get_personality(agent_id) {
            Some(p) => p,
            None => return,
        };

        let mut trait_targets: Vec<(String, f32)> = update
            .trait_updates
            .iter()
            .filter_map(|(name, delta)| {
                personality
                    .adaptive_traits
                    .get(name)
                    .map(|t| (name.clone(), t.value + delta))
            })
            .collect();
        trait_targets.sort_by(|a, b| a.0.cmp(&b.0));

        let mood_absolute = personality.mood.resolve_deltas(&update.mood_updates);

        let mut relationship_targets: Vec<(String, f32)> = update
            .relationship_updates
            .iter()
            .map(|(other, value)| (other.clone(), *value))
            .collect();
        relationship_targets.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, value) in trait_targets {
            self.store.update_trait(agent_id, &name, value, true);
        }
        if !mood_absolute.is_empty() {
            self.store.update_mood(agent_id, &mood_absolute);
        }
        for (other, value) in relationship_targets {
            self.store.update_relationship(agent_id, &other, value);
        }
    }

    /// Open a directed connection at the current tick.
    pub fn connect(&mut self, source_id: &str, target_id: &str) {
        self.connections.connect(source_id, target_id, self.tick);
    }

    /// Remove a directed connection.
    pub fn disconnect(&mut self, source_id: &str, target_id: &str) -> bool {
        self.connections.disconnect(source_id, target_id)
    }

    /// Record a fully built interaction against the connection graph.
    pub fn record_interaction(&mut self, interaction: &Interaction) {
        self.connections.record_interaction(interaction);
    }

    /// Build and record an interaction between two agents at the
    /// current tick.
    pub fn interact(
        &mut self,
        kind: InteractionKind,
        source_id: &str,
        target_id: &str,
        impact: InteractionImpact,
    ) {
        let interaction = Interaction::new(kind, source_id, target_id, self.tick, impact);
        self.connections.record_interaction(&interaction);
    }

    /// Trigger an emotion directly, outside the event mapping. Returns
    /// the effective intensity, or `None` for an unknown agent.
    pub fn feel(
        &mut self,
        agent_id: &str,
        kind: EmotionKind,
        intensity: f32,
        cause: impl Into<String>,
    ) -> Option<f32> {
        let personality = self.store.get_personality(agent_id)?;
        Some(
            self.emotions
                .feel(agent_id, kind, intensity, cause, personality, self.tick),
        )
    }

    /// Advance the clock one tick: emotions decay, personalities pull
    /// back toward baseline on the configured interval, and accumulated
    /// changes are flushed to the log.
    pub fn process_tick(&mut self) -> Result<TickSummary, DriverError> {
        self.tick = self.tick.next();
        let agent_ids = self.store.agent_ids();

        for agent_id in &agent_ids {
            self.emotions.advance(agent_id, self.tick);
        }

        let interval = self.config.simulation.decay_interval;
        let decay_applied = interval > 0 && self.tick.value() % interval == 0;
        if decay_applied {
            tracing::debug!(
                tick = self.tick.value(),
                agents = agent_ids.len(),
                "decay pass"
            );
            for agent_id in &agent_ids {
                let update = match self.store.get_personality(agent_id) {
                    Some(p) => self.updater.decay_personality(p),
                    None => continue,
                };
                self.apply_update(agent_id, &update);
            }
        }

        let drained = self.pending.drain();
        self.change_log.log_batch(&drained)?;

        Ok(TickSummary {
            tick: self.tick,
            changes_logged: drained.len(),
            decay_applied,
        })
    }

    /// Flattened view of every agent and connection, with expression
    /// labels filled from the emotion engine.
    pub fn snapshot(&mut self) -> StateSnapshot {
        self.snapshot_count += 1;
        let mut snapshot = StateSnapshot::new(generate_snapshot_id(self.snapshot_count), self.tick);

        for agent_id in self.store.agent_ids() {
            let personality = match self.store.get_personality(&agent_id) {
                Some(p) => p,
                None => continue,
            };
            let mut agent = personality.to_snapshot();
            agent.expression = Some(effects::expression(&self.emotions, &agent_id).description);
            snapshot.agents.push(agent);
        }
        for (source_id, target_id, connection) in self.connections.all_connections() {
            snapshot
                .connections
                .push(connection.to_snapshot(source_id, target_id));
        }
        snapshot
    }

    /// Flush buffered changes to disk.
    pub fn flush(&mut self) -> Result<(), DriverError> {
        self.change_log.flush()?;
        Ok(())
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn store(&self) -> &PersonalityStore {
        &self.store
    }

    pub fn updater(&self) -> &PersonalityUpdater {
        &self.updater
    }

    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    pub fn emotions(&self) -> &EmotionEngine {
        &self.emotions
    }

    /// Changes captured but not yet drained to the log.
    pub fn pending_changes(&self) -> usize {
        self.pending.len()
    }

    /// Total changes written to the log so far.
    pub fn changes_logged(&self) -> u64 {
        self.change_log.change_count()
    }

    /// Snapshots generated so far.
    pub fn snapshots_generated(&self) -> u64 {
        self.snapshot_count
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::with_defaults()
    }
}
