//! Interactions
//!
//! A recorded exchange between two agents, carrying the raw impact the
//! caller computed. The connection rule engine decides whether and how
//! the impact lands; the record itself is append-only history.

use serde::{Deserialize, Serialize};

use crate::Tick;

/// The closed set of interaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Conversation,
    Cooperation,
    Conflict,
    Assistance,
    Betrayal,
    Trade,
}

impl InteractionKind {
    /// Returns the snake_case wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Conversation => "conversation",
            InteractionKind::Cooperation => "cooperation",
            InteractionKind::Conflict => "conflict",
            InteractionKind::Assistance => "assistance",
            InteractionKind::Betrayal => "betrayal",
            InteractionKind::Trade => "trade",
        }
    }

    /// Returns all interaction kind variants.
    pub fn all() -> &'static [InteractionKind] {
        &[
            InteractionKind::Conversation,
            InteractionKind::Cooperation,
            InteractionKind::Conflict,
            InteractionKind::Assistance,
            InteractionKind::Betrayal,
            InteractionKind::Trade,
        ]
    }
}

/// Raw impact magnitudes pre-computed by the caller.
///
/// The rule engine interprets these; positive and negative
/// `connection_strength` select different default rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionImpact {
    pub trust: f32,
    pub familiarity: f32,
    pub connection_strength: f32,
}

impl InteractionImpact {
    pub fn new(trust: f32, familiarity: f32, connection_strength: f32) -> Self {
        Self {
            trust,
            familiarity,
            connection_strength,
        }
    }

    /// A mildly positive impact, the common case for friendly exchanges.
    pub fn positive(magnitude: f32) -> Self {
        Self {
            trust: magnitude * 0.5,
            familiarity: magnitude * 0.5,
            connection_strength: magnitude,
        }
    }

    /// A negative impact; familiarity is carried but the default negative
    /// rule ignores it.
    pub fn negative(magnitude: f32) -> Self {
        Self {
            trust: -magnitude * 0.5,
            familiarity: 0.0,
            connection_strength: -magnitude,
        }
    }

    pub fn is_positive(&self) -> bool {
        self.connection_strength > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.connection_strength < 0.0
    }
}

/// A discrete recorded exchange between two agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub kind: InteractionKind,
    pub source_id: String,
    pub target_id: String,
    pub timestamp: Tick,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub impact: InteractionImpact,
}

impl Interaction {
    pub fn new(
        kind: InteractionKind,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        timestamp: Tick,
        impact: InteractionImpact,
    ) -> Self {
        Self {
            kind,
            source_id: source_id.into(),
            target_id: target_id.into(),
            timestamp,
            content: None,
            impact,
        }
    }

    /// Attaches free-form content (what was said, what was traded).
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// History key for the ordered pair, `"source-target"`.
    pub fn pair_key(&self) -> String {
        pair_key(&self.source_id, &self.target_id)
    }

    /// Serializes the interaction to a JSON line (for JSONL format).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an interaction from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

/// History key for an ordered pair of agents.
pub fn pair_key(source_id: &str, target_id: &str) -> String {
    format!("{}-{}", source_id, target_id)
}
