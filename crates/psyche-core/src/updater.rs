//! Personality Updater
//!
//! Stateless rule engine over personality records: computes trait, mood,
//! and relationship deltas from emotional events, plus periodic decay
//! toward baseline. Never mutates a record itself; the caller feeds the
//! resulting update back through the store. Holds only tunable rates and
//! the bounded per-agent emotional memory.

use std::collections::HashMap;

use psyche_events::{EmotionalEvent, EventKind, MoodUpdate, PersonalityUpdate};

use crate::components::Personality;

/// Tunable constants for event-driven adaptation
pub mod update_constants {
    /// Fraction of valence/intensity applied as a trait or relationship nudge
    pub const ADAPTATION_RATE: f32 = 0.05;
    /// Fraction of the gap to baseline removed per decay pass
    pub const DECAY_RATE: f32 = 0.1;
    /// Extra stress delta layered on by conflict events
    pub const CONFLICT_STRESS_BONUS: f32 = 0.2;
    /// Dominance delta magnitude from conflict events
    pub const CONFLICT_DOMINANCE_SHIFT: f32 = 0.1;
    /// Most recent emotional events retained per agent
    pub const EMOTIONAL_MEMORY_CAP: usize = 100;
}

pub struct PersonalityUpdater {
    adaptation_rate: f32,
    decay_rate: f32,
    memory_cap: usize,
    memory: HashMap<String, Vec<EmotionalEvent>>,
}

impl Default for PersonalityUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalityUpdater {
    pub fn new() -> Self {
        Self {
            adaptation_rate: update_constants::ADAPTATION_RATE,
            decay_rate: update_constants::DECAY_RATE,
            memory_cap: update_constants::EMOTIONAL_MEMORY_CAP,
            memory: HashMap::new(),
        }
    }

    pub fn with_adaptation_rate(mut self, rate: f32) -> Self {
        self.adaptation_rate = rate;
        self
    }

    pub fn with_decay_rate(mut self, rate: f32) -> Self {
        self.decay_rate = rate;
        self
    }

    pub fn with_memory_cap(mut self, cap: usize) -> Self {
        self.memory_cap = cap;
        self
    }

    /// Compute the deltas an emotional event produces for one agent.
    ///
    /// The event is appended to the agent's emotional memory first, so it
    /// is remembered even when no rule matches. Trait and mood entries are
    /// deltas; relationship entries are new absolute values, already
    /// clamped against the current strength.
    pub fn process_event(
        &mut self,
        personality: &Personality,
        event: &EmotionalEvent,
    ) -> PersonalityUpdate {
        self.remember(&personality.id, event.clone());

        let mut update = PersonalityUpdate::new();

        match event.kind {
            EventKind::SocialInteraction => {
                update.trait_updates.insert(
                    "sociability".to_string(),
                    event.valence * self.adaptation_rate,
                );
            }
            EventKind::Challenge => {
                update.trait_updates.insert(
                    "resilience".to_string(),
                    event.intensity * self.adaptation_rate,
                );
            }
            EventKind::Learning => {
                update
                    .trait_updates
                    .insert("curiosity".to_string(), event.valence * self.adaptation_rate);
            }
            _ => {}
        }

        let mut mood = MoodUpdate::new()
            .with_happiness(event.valence * event.intensity)
            .with_energy(event.intensity * if event.valence > 0.0 { 1.0 } else { -0.5 })
            .with_stress(event.intensity * if event.valence < 0.0 { 1.0 } else { -0.5 });
        if event.kind == EventKind::Conflict {
            let stress = mood.stress.unwrap_or(0.0);
            mood.stress = Some((stress + update_constants::CONFLICT_STRESS_BONUS).min(1.0));
            mood.dominance = Some(if event.valence > 0.0 {
                update_constants::CONFLICT_DOMINANCE_SHIFT
            } else {
                -update_constants::CONFLICT_DOMINANCE_SHIFT
            });
        }
        update.mood_updates = mood;

        if let Some(source) = &event.source {
            if source != &personality.id {
                let current = personality.relationship(source);
                let value = (current + event.valence * event.intensity * self.adaptation_rate)
                    .clamp(-1.0, 1.0);
                update.relationship_updates.insert(source.clone(), value);
            }
        }

        update
    }

    /// Compute decay deltas pulling adaptive traits toward their base
    /// values and mood toward the neutral midpoint.
    ///
    /// Pure with respect to the updater's own state; intended to run on a
    /// fixed interval. A missed pass only delays convergence. Adaptive
    /// traits with no base counterpart are left alone.
    pub fn decay_personality(&self, personality: &Personality) -> PersonalityUpdate {
        let mut update = PersonalityUpdate::new();

        for (name, adaptive) in &personality.adaptive_traits {
            let base = match personality.base_traits.get(name) {
                Some(t) => t.value,
                None => continue,
            };
            update
                .trait_updates
                .insert(name.clone(), (base - adaptive.value) * self.decay_rate);
        }

        let mood = personality.mood;
        update.mood_updates = MoodUpdate {
            happiness: Some((0.5 - mood.happiness) * self.decay_rate),
            energy: Some((0.5 - mood.energy) * self.decay_rate),
            stress: Some((0.5 - mood.stress) * self.decay_rate),
            dominance: Some((0.5 - mood.dominance) * self.decay_rate),
        };

        update
    }

    /// The agent's emotional memory, oldest first; `limit` keeps only the
    /// most recent entries.
    pub fn get_emotional_memory(&self, agent_id: &str, limit: Option<usize>) -> &[EmotionalEvent] {
        let events = self.memory.get(agent_id).map(Vec::as_slice).unwrap_or(&[]);
        match limit {
            Some(n) => &events[events.len().saturating_sub(n)..],
            None => events,
        }
    }

    pub fn clear_emotional_memory(&mut self, agent_id: &str) {
        self.memory.remove(agent_id);
    }

    fn remember(&mut self, agent_id: &str, event: EmotionalEvent) {
        let log = self.memory.entry(agent_id.to_string()).or_default();
        log.push(event);
        if log.len() > self.memory_cap {
            let excess = log.len() - self.memory_cap;
            log.drain(..excess);
        }
    }
}
