//! Connection Components
//!
//! Directed pairwise relationship records. `A -> B` and `B -> A` are
//! independent: each side keeps its own view of the relationship.

use serde::{Deserialize, Serialize};

use psyche_events::{ConnectionSnapshot, Tick};

/// Default trust for a freshly created connection. New acquaintances get
/// a small benefit of the doubt rather than none at all.
pub const INITIAL_TRUST: f32 = 0.1;

/// A directed relationship record from one agent to another
///
/// `value` is overall affinity (-1.0 to 1.0), `trust` and `familiarity`
/// range 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub value: f32,
    pub trust: f32,
    pub familiarity: f32,
    pub last_interaction: Tick,
}

impl Connection {
    pub fn new(now: Tick) -> Self {
        Self {
            value: 0.0,
            trust: INITIAL_TRUST,
            familiarity: 0.0,
            last_interaction: now,
        }
    }

    /// Apply a partial update, clamping every touched field into range.
    pub fn patch(&mut self, patch: &ConnectionPatch) {
        if let Some(value) = patch.value {
            self.value = value.clamp(-1.0, 1.0);
        }
        if let Some(trust) = patch.trust {
            self.trust = trust.clamp(0.0, 1.0);
        }
        if let Some(familiarity) = patch.familiarity {
            self.familiarity = familiarity.clamp(0.0, 1.0);
        }
    }

    pub fn to_snapshot(
        &self,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
    ) -> ConnectionSnapshot {
        ConnectionSnapshot {
            source_id: source_id.into(),
            target_id: target_id.into(),
            value: self.value,
            trust: self.trust,
            familiarity: self.familiarity,
            last_interaction: self.last_interaction,
        }
    }
}

/// Partial `Connection`: fields left `None` are not touched when applied.
///
/// Used both as the initial-value override for `connect` and as the output
/// of impact rules.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ConnectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub familiarity: Option<f32>,
}

impl ConnectionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, value: f32) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_trust(mut self, trust: f32) -> Self {
        self.trust = Some(trust);
        self
    }

    pub fn with_familiarity(mut self, familiarity: f32) -> Self {
        self.familiarity = Some(familiarity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.trust.is_none() && self.familiarity.is_none()
    }
}
