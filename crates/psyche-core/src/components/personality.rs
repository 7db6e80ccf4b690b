//! Personality Components
//!
//! Per-agent psychological state: traits, mood, and relationship strengths.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use psyche_events::{AgentSnapshot, MoodSnapshot, MoodUpdate};

/// Category a trait belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitCategory {
    Emotional,
    Behavioral,
    Cognitive,
    Social,
}

impl TraitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraitCategory::Emotional => "emotional",
            TraitCategory::Behavioral => "behavioral",
            TraitCategory::Cognitive => "cognitive",
            TraitCategory::Social => "social",
        }
    }

    pub fn all() -> &'static [TraitCategory] {
        &[
            TraitCategory::Emotional,
            TraitCategory::Behavioral,
            TraitCategory::Cognitive,
            TraitCategory::Social,
        ]
    }
}

/// A single named personality trait
/// Values are 0.0 to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trait {
    pub name: String,
    pub value: f32,
    pub category: TraitCategory,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Trait {
    pub fn new(name: impl Into<String>, value: f32, category: TraitCategory) -> Self {
        Self {
            name: name.into(),
            value: value.clamp(0.0, 1.0),
            category,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the value, clamped into [0.0, 1.0]
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(0.0, 1.0);
    }
}

/// Mood state - four dimensions, each 0.0 to 1.0, neutral at 0.5
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mood {
    pub happiness: f32,
    pub energy: f32,
    pub stress: f32,
    pub dominance: f32,
}

impl Default for Mood {
    fn default() -> Self {
        Self {
            happiness: 0.5,
            energy: 0.5,
            stress: 0.5,
            dominance: 0.5,
        }
    }
}

impl Mood {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite each field present in the update, clamped into [0.0, 1.0].
    /// Absent fields are left untouched.
    pub fn apply(&mut self, update: &MoodUpdate) {
        if let Some(happiness) = update.happiness {
            self.happiness = happiness.clamp(0.0, 1.0);
        }
        if let Some(energy) = update.energy {
            self.energy = energy.clamp(0.0, 1.0);
        }
        if let Some(stress) = update.stress {
            self.stress = stress.clamp(0.0, 1.0);
        }
        if let Some(dominance) = update.dominance {
            self.dominance = dominance.clamp(0.0, 1.0);
        }
    }

    /// Convert a partial map of deltas into a partial map of absolute
    /// values against this mood. Clamping happens when the result is
    /// applied, keeping the store the single enforcement point.
    pub fn resolve_deltas(&self, deltas: &MoodUpdate) -> MoodUpdate {
        MoodUpdate {
            happiness: deltas.happiness.map(|d| self.happiness + d),
            energy: deltas.energy.map(|d| self.energy + d),
            stress: deltas.stress.map(|d| self.stress + d),
            dominance: deltas.dominance.map(|d| self.dominance + d),
        }
    }

    pub fn to_snapshot(&self) -> MoodSnapshot {
        MoodSnapshot {
            happiness: self.happiness,
            energy: self.energy,
            stress: self.stress,
            dominance: self.dominance,
        }
    }
}

/// Modifiers shaping how an agent phrases a response, derived from
/// personality and current mood
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseModifiers {
    pub enthusiasm: f32,
    pub positivity: f32,
    pub detail: f32,
}

/// Complete psychological state for one agent
///
/// `base_traits` are the stable personality; `adaptive_traits` drift with
/// experience and decay back toward their base counterparts. Relationship
/// strengths are directed and range -1.0 to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Personality {
    pub id: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub base_traits: HashMap<String, Trait>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub adaptive_traits: HashMap<String, Trait>,
    #[serde(default)]
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub relationships: HashMap<String, f32>,
}

impl Personality {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            base_traits: HashMap::new(),
            adaptive_traits: HashMap::new(),
            mood: Mood::default(),
            relationships: HashMap::new(),
        }
    }

    /// Current value of a trait: adaptive wins over base.
    pub fn trait_value(&self, name: &str) -> Option<f32> {
        self.adaptive_traits
            .get(name)
            .or_else(|| self.base_traits.get(name))
            .map(|t| t.value)
    }

    pub fn trait_value_or(&self, name: &str, default: f32) -> f32 {
        self.trait_value(name).unwrap_or(default)
    }

    /// Relationship strength toward another agent; 0.0 if none recorded.
    pub fn relationship(&self, agent_id: &str) -> f32 {
        self.relationships.get(agent_id).copied().unwrap_or(0.0)
    }

    /// Set a relationship strength, clamped into [-1.0, 1.0].
    pub fn set_relationship(&mut self, agent_id: impl Into<String>, strength: f32) {
        self.relationships
            .insert(agent_id.into(), strength.clamp(-1.0, 1.0));
    }

    /// Modifiers for response generation: extraverted agents with energy
    /// respond enthusiastically, agreeable happy agents positively, and
    /// conscientious unstressed agents in detail. Missing traits read as
    /// the 0.5 midpoint.
    pub fn response_modifiers(&self) -> ResponseModifiers {
        ResponseModifiers {
            enthusiasm: self.trait_value_or("extraversion", 0.5) * self.mood.energy,
            positivity: self.trait_value_or("agreeableness", 0.5) * self.mood.happiness,
            detail: self.trait_value_or("conscientiousness", 0.5) * (1.0 - self.mood.stress),
        }
    }

    pub fn to_snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            agent_id: self.id.clone(),
            base_traits: self
                .base_traits
                .iter()
                .map(|(name, t)| (name.clone(), t.value))
                .collect(),
            adaptive_traits: self
                .adaptive_traits
                .iter()
                .map(|(name, t)| (name.clone(), t.value))
                .collect(),
            relationships: self
                .relationships
                .iter()
                .map(|(id, strength)| (id.clone(), *strength))
                .collect(),
            mood: self.mood.to_snapshot(),
            expression: None,
        }
    }
}
