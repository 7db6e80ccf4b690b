//! Personality Updates
//!
//! The computed diff an updater hands back to the caller. Never stored;
//! the store stays the single point of clamping, so everything in here
//! is raw material for its mutation methods.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A partial write to the four mood fields.
///
/// Absent fields are left alone. Depending on where the struct travels
/// it carries either absolute values (store input) or offsets to the
/// current mood (updater output); the caller converting between the two
/// is what keeps the updater side-effect-free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MoodUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub happiness: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominance: Option<f32>,
}

impl MoodUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_happiness(mut self, value: f32) -> Self {
        self.happiness = Some(value);
        self
    }

    pub fn with_energy(mut self, value: f32) -> Self {
        self.energy = Some(value);
        self
    }

    pub fn with_stress(mut self, value: f32) -> Self {
        self.stress = Some(value);
        self
    }

    pub fn with_dominance(mut self, value: f32) -> Self {
        self.dominance = Some(value);
        self
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.happiness.is_none()
            && self.energy.is_none()
            && self.stress.is_none()
            && self.dominance.is_none()
    }
}

/// The deltas an event or decay pass produced for one personality.
///
/// `trait_updates` are raw deltas against adaptive traits;
/// `mood_updates` are offsets to current mood; `relationship_updates`
/// are already-clamped absolute strengths keyed by the other agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonalityUpdate {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub trait_updates: HashMap<String, f32>,
    #[serde(default, skip_serializing_if = "MoodUpdate::is_empty")]
    pub mood_updates: MoodUpdate,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub relationship_updates: HashMap<String, f32>,
}

impl PersonalityUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.trait_updates.is_empty()
            && self.mood_updates.is_empty()
            && self.relationship_updates.is_empty()
    }
}
