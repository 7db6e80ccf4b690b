//! Emotional Events
//!
//! Discrete stimuli delivered to an agent's psychology. Events are
//! transient input: the updater reads them, derives deltas, and keeps a
//! copy in emotional memory, but they are never part of canonical state.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The closed set of event kinds the core understands.
///
/// Kinds outside a consumer's match arms simply produce no effect there;
/// they are never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    SocialInteraction,
    Challenge,
    Learning,
    Conflict,
    Threat,
    Cooperation,
    Surprise,
}

impl EventKind {
    /// Returns the snake_case wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::SocialInteraction => "social_interaction",
            EventKind::Challenge => "challenge",
            EventKind::Learning => "learning",
            EventKind::Conflict => "conflict",
            EventKind::Threat => "threat",
            EventKind::Cooperation => "cooperation",
            EventKind::Surprise => "surprise",
        }
    }

    /// Returns all event kind variants.
    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::SocialInteraction,
            EventKind::Challenge,
            EventKind::Learning,
            EventKind::Conflict,
            EventKind::Threat,
            EventKind::Cooperation,
            EventKind::Surprise,
        ]
    }
}

/// A discrete emotional stimulus.
///
/// `intensity` is taken as given (typically >= 0, but unclamped);
/// `valence` is clamped into [-1, 1] at construction. `source` names the
/// agent the event originated from, when there is one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalEvent {
    pub kind: EventKind,
    pub intensity: f32,
    pub valence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Opaque caller-supplied context, carried but never interpreted.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl EmotionalEvent {
    /// Creates an event with no source.
    pub fn new(kind: EventKind, intensity: f32, valence: f32) -> Self {
        Self {
            kind,
            intensity,
            valence: valence.clamp(-1.0, 1.0),
            source: None,
            context: HashMap::new(),
        }
    }

    /// Sets the originating agent.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attaches a context entry.
    pub fn with_context(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// True when the event carries positive valence.
    pub fn is_positive(&self) -> bool {
        self.valence > 0.0
    }

    /// Serializes the event to a JSON line (for JSONL format).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes an event from a JSON line.
    pub fn from_jsonl(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_serialization() {
        let json = serde_json::to_string(&EventKind::SocialInteraction).unwrap();
        assert_eq!(json, r#""social_interaction""#);

        let kind: EventKind = serde_json::from_str(r#""challenge""#).unwrap();
        assert_eq!(kind, EventKind::Challenge);
    }

    #[test]
    fn test_event_kind_as_str_matches_serde() {
        for kind in EventKind::all() {
            let json = serde_json::to_string(kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_event_construction() {
        let event = EmotionalEvent::new(EventKind::Learning, 0.8, 0.4).with_source("agent_tutor");

        assert_eq!(event.kind, EventKind::Learning);
        assert_eq!(event.intensity, 0.8);
        assert_eq!(event.valence, 0.4);
        assert_eq!(event.source.as_deref(), Some("agent_tutor"));
        assert!(event.context.is_empty());
    }

    #[test]
    fn test_valence_clamped_at_construction() {
        let hot = EmotionalEvent::new(EventKind::Conflict, 1.0, 3.5);
        assert_eq!(hot.valence, 1.0);

        let cold = EmotionalEvent::new(EventKind::Conflict, 1.0, -2.0);
        assert_eq!(cold.valence, -1.0);
    }

    #[test]
    fn test_intensity_not_clamped() {
        let event = EmotionalEvent::new(EventKind::Challenge, 4.2, 0.0);
        assert_eq!(event.intensity, 4.2);
    }

    #[test]
    fn test_event_jsonl_round_trip() {
        let event = EmotionalEvent::new(EventKind::Surprise, 0.9, -0.5)
            .with_source("agent_rival")
            .with_context("location", serde_json::json!("market"));

        let line = event.to_jsonl().unwrap();
        assert!(!line.contains('\n'));

        let parsed = EmotionalEvent::from_jsonl(&line).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_event_without_source_omits_field() {
        let event = EmotionalEvent::new(EventKind::Learning, 0.5, 0.5);
        let line = event.to_jsonl().unwrap();
        assert!(!line.contains("source"));
        assert!(!line.contains("context"));
    }

    #[test]
    fn test_from_jsonl_rejects_unknown_kind() {
        let line = r#"{"kind":"existential_dread","intensity":1.0,"valence":0.0}"#;
        assert!(EmotionalEvent::from_jsonl(line).is_err());
    }
}
