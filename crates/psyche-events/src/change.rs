//! State Change Notifications
//!
//! Every outbound notification the core emits, as one closed tagged
//! union. Observers subscribe per topic; the change log writes these
//! records verbatim as JSONL.

use serde::{Deserialize, Serialize};

/// A notification emitted after a successful mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StateChange {
    PersonalityCreated {
        agent_id: String,
        /// The template that was actually applied, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        template: Option<String>,
    },
    TraitUpdated {
        agent_id: String,
        trait_name: String,
        value: f32,
        adaptive: bool,
    },
    MoodUpdated {
        agent_id: String,
        happiness: f32,
        energy: f32,
        stress: f32,
        dominance: f32,
    },
    PersonalityRemoved {
        agent_id: String,
    },
    Connected {
        source_id: String,
        target_id: String,
    },
    Disconnected {
        source_id: String,
        target_id: String,
    },
    ConnectionUpdated {
        source_id: String,
        target_id: String,
        value: f32,
        trust: f32,
        familiarity: f32,
    },
}

impl StateChange {
    /// The topic this change belongs to.
    pub fn topic(&self) -> Topic {
        match self {
            StateChange::PersonalityCreated { .. } => Topic::PersonalityCreated,
            StateChange::TraitUpdated { .. } => Topic::TraitUpdated,
            StateChange::MoodUpdated { .. } => Topic::MoodUpdated,
            StateChange::PersonalityRemoved { .. } => Topic::PersonalityRemoved,
            StateChange::Connected { .. } => Topic::Connected,
            StateChange::Disconnected { .. } => Topic::Disconnected,
            StateChange::ConnectionUpdated { .. } => Topic::ConnectionUpdated,
        }
    }

    /// The agent the change is about (the source side for connections).
    pub fn subject(&self) -> &str {
        match self {
            StateChange::PersonalityCreated { agent_id, .. }
            | StateChange::TraitUpdated { agent_id, .. }
            | StateChange::MoodUpdated { agent_id, .. }
            | StateChange::PersonalityRemoved { agent_id } => agent_id,
            StateChange::Connected { source_id, .. }
            | StateChange::Disconnected { source_id, .. }
            | StateChange::ConnectionUpdated { source_id, .. } => source_id,
        }
    }
}

/// Observer registration topics, one per `StateChange` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    PersonalityCreated,
    TraitUpdated,
    MoodUpdated,
    PersonalityRemoved,
    Connected,
    Disconnected,
    ConnectionUpdated,
}

impl Topic {
    /// Returns all topics.
    pub fn all() -> &'static [Topic] {
        &[
            Topic::PersonalityCreated,
            Topic::TraitUpdated,
            Topic::MoodUpdated,
            Topic::PersonalityRemoved,
            Topic::Connected,
            Topic::Disconnected,
            Topic::ConnectionUpdated,
        ]
    }
}
