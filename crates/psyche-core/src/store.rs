//! Personality Store
//!
//! Canonical owner of per-agent personality records and named templates.
//! All mutation goes through clamping methods here; unknown agents or
//! traits are silent no-ops so a hot simulation loop never trips on a
//! stale id.

use std::collections::HashMap;

use psyche_events::{MoodUpdate, StateChange, Topic};

use crate::components::{Personality, Trait};
use crate::observe::{ObserverId, Observers};
use crate::templates::Template;

pub struct PersonalityStore {
    personalities: HashMap<String, Personality>,
    templates: HashMap<String, Template>,
    observers: Observers,
}

impl Default for PersonalityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonalityStore {
    pub fn new() -> Self {
        Self::with_observers(Observers::new())
    }

    /// Build a store that notifies through a shared hub.
    pub fn with_observers(observers: Observers) -> Self {
        Self {
            personalities: HashMap::new(),
            templates: HashMap::new(),
            observers,
        }
    }

    /// Create (or silently overwrite) the record for an agent.
    ///
    /// If `template` names a registered template its base traits and mood
    /// are copied in, with unnamed mood fields at the neutral 0.5. An
    /// unknown template name falls back to plain defaults. Adaptive traits
    /// always start empty.
    pub fn create_personality(
        &mut self,
        agent_id: impl Into<String>,
        template: Option<&str>,
    ) -> &Personality {
        let agent_id = agent_id.into();
        let mut personality = Personality::new(agent_id.clone());

        let resolved = template
            .and_then(|name| self.templates.get(name).map(|t| (name.to_string(), t.clone())));
        if let Some((_, t)) = &resolved {
            personality.base_traits = t.base_traits.clone();
            personality.mood.apply(&t.mood);
        }

        self.personalities.insert(agent_id.clone(), personality);
        self.observers.emit(&StateChange::PersonalityCreated {
            agent_id: agent_id.clone(),
            template: resolved.map(|(name, _)| name),
        });
        &self.personalities[&agent_id]
    }

    pub fn get_personality(&self, agent_id: &str) -> Option<&Personality> {
        self.personalities.get(agent_id)
    }

    pub fn contains(&self, agent_id: &str) -> bool {
        self.personalities.contains_key(agent_id)
    }

    /// Set a trait to an absolute value, clamped into [0.0, 1.0].
    ///
    /// Writes into the adaptive or base map per the flag. Silent no-op if
    /// the agent is unknown or the named trait does not already exist in
    /// the target map; use `install_trait` to create the slot first.
    pub fn update_trait(&mut self, agent_id: &str, name: &str, value: f32, adaptive: bool) {
        let value = value.clamp(0.0, 1.0);
        let personality = match self.personalities.get_mut(agent_id) {
            Some(p) => p,
            None => return,
        };
        let target = if adaptive {
            &mut personality.adaptive_traits
        } else {
            &mut personality.base_traits
        };
        match target.get_mut(name) {
            Some(t) => t.set_value(value),
            None => return,
        }
        self.observers.emit(&StateChange::TraitUpdated {
            agent_id: agent_id.to_string(),
            trait_name: name.to_string(),
            value,
            adaptive,
        });
    }

    /// Insert a trait record, creating or replacing the slot.
    pub fn install_trait(&mut self, agent_id: &str, t: Trait, adaptive: bool) {
        let personality = match self.personalities.get_mut(agent_id) {
            Some(p) => p,
            None => return,
        };
        let value = t.value;
        let trait_name = t.name.clone();
        if adaptive {
            personality.adaptive_traits.insert(t.name.clone(), t);
        } else {
            personality.base_traits.insert(t.name.clone(), t);
        }
        self.observers.emit(&StateChange::TraitUpdated {
            agent_id: agent_id.to_string(),
            trait_name,
            value,
            adaptive,
        });
    }

    /// Overwrite each mood field present in the update, clamped into
    /// [0.0, 1.0]. Silent no-op if the agent is unknown.
    pub fn update_mood(&mut self, agent_id: &str, update: &MoodUpdate) {
        let mood = match self.personalities.get_mut(agent_id) {
            Some(p) => {
                p.mood.apply(update);
                p.mood
            }
            None => return,
        };
        self.observers.emit(&StateChange::MoodUpdated {
            agent_id: agent_id.to_string(),
            happiness: mood.happiness,
            energy: mood.energy,
            stress: mood.stress,
            dominance: mood.dominance,
        });
    }

    /// Set a directed relationship strength, clamped into [-1.0, 1.0].
    /// Silent no-op if the agent is unknown; the target needs no record.
    pub fn update_relationship(&mut self, agent_id: &str, other_id: &str, strength: f32) {
        if let Some(personality) = self.personalities.get_mut(agent_id) {
            personality.set_relationship(other_id, strength);
        }
    }

    /// Remove an agent's record and prune every relationship pointing at
    /// it from the remaining records.
    pub fn remove_personality(&mut self, agent_id: &str) -> Option<Personality> {
        let removed = self.personalities.remove(agent_id)?;
        for personality in self.personalities.values_mut() {
            personality.relationships.remove(agent_id);
        }
        self.observers.emit(&StateChange::PersonalityRemoved {
            agent_id: agent_id.to_string(),
        });
        Some(removed)
    }

    pub fn add_template(&mut self, name: impl Into<String>, template: Template) {
        self.templates.insert(name.into(), template);
    }

    pub fn template(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    /// Registered template names, sorted.
    pub fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.keys().cloned().collect();
        names.sort();
        names
    }

    /// Agent ids with a record, sorted.
    pub fn agent_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.personalities.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.personalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personalities.is_empty()
    }

    /// Handle to the shared notification hub.
    pub fn observers(&self) -> Observers {
        self.observers.clone()
    }

    /// Register an observer for one topic.
    pub fn observe(&self, topic: Topic, callback: impl Fn(&StateChange) + 'static) -> ObserverId {
        self.observers.observe(topic, callback)
    }
}
