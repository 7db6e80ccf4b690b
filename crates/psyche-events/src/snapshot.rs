//! Snapshot Types
//!
//! Flattened serialization structs for state output. Snapshots capture
//! the whole psychology state at a point in time for analysis and
//! debugging; the live types keep their own serde derives for exact
//! data-model persistence. Maps are sorted so identical states always
//! serialize to identical JSON.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Tick;

/// Generates a snapshot ID with the given sequence number.
pub fn generate_snapshot_id(sequence: u64) -> String {
    format!("snap_{:06}", sequence)
}

/// The four mood fields, flattened.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub happiness: f32,
    pub energy: f32,
    pub stress: f32,
    pub dominance: f32,
}

impl Default for MoodSnapshot {
    fn default() -> Self {
        Self {
            happiness: 0.5,
            energy: 0.5,
            stress: 0.5,
            dominance: 0.5,
        }
    }
}

/// One agent's psychological state, values only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_traits: BTreeMap<String, f32>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub adaptive_traits: BTreeMap<String, f32>,
    #[serde(default)]
    pub mood: MoodSnapshot,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, f32>,
    /// Surface expression label from the emotion layer, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
}

impl AgentSnapshot {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            base_traits: BTreeMap::new(),
            adaptive_traits: BTreeMap::new(),
            mood: MoodSnapshot::default(),
            relationships: BTreeMap::new(),
            expression: None,
        }
    }
}

/// One directed connection, flattened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSnapshot {
    pub source_id: String,
    pub target_id: String,
    pub value: f32,
    pub trust: f32,
    pub familiarity: f32,
    pub last_interaction: Tick,
}

/// Full state at one tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub snapshot_id: String,
    pub tick: Tick,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<ConnectionSnapshot>,
}

impl StateSnapshot {
    pub fn new(snapshot_id: impl Into<String>, tick: Tick) -> Self {
        Self {
            snapshot_id: snapshot_id.into(),
            tick,
            agents: Vec::new(),
            connections: Vec::new(),
        }
    }

    /// Finds an agent row by id.
    pub fn find_agent(&self, agent_id: &str) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Finds a connection row by ordered pair.
    pub fn find_connection(&self, source_id: &str, target_id: &str) -> Option<&ConnectionSnapshot> {
        self.connections
            .iter()
            .find(|c| c.source_id == source_id && c.target_id == target_id)
    }
}
