//! Sample data fixtures for testing.
//!
//! This module provides ready-made test data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // psyche-events = { path = "../psyche-events", features = ["test-fixtures"] }
//!
//! use psyche_events::fixtures;
//!
//! let events = fixtures::sample_events();
//! let interactions = fixtures::sample_interactions();
//! ```

use crate::{EmotionalEvent, EventKind, Interaction, InteractionKind};

/// Returns sample events from the fixtures file.
///
/// Contains 10 diverse events: two social interactions (one negative),
/// a challenge, two learning events (one sourceless), two conflicts
/// (one with positive valence), a threat, a cooperation, and a surprise.
pub fn sample_events() -> Vec<EmotionalEvent> {
    let jsonl = include_str!("../tests/fixtures/sample_events.jsonl");
    jsonl
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            EmotionalEvent::from_jsonl(l)
                .unwrap_or_else(|e| panic!("Failed to parse event line: {}\nError: {}", l, e))
        })
        .collect()
}

/// Returns sample interactions from the fixtures file.
///
/// Contains 6 interactions covering every kind, four positive and two
/// negative, between four agents.
pub fn sample_interactions() -> Vec<Interaction> {
    let jsonl = include_str!("../tests/fixtures/sample_interactions.jsonl");
    jsonl
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            Interaction::from_jsonl(l)
                .unwrap_or_else(|e| panic!("Failed to parse interaction line: {}\nError: {}", l, e))
        })
        .collect()
}

/// Returns the high-intensity negative conflict event from samples.
pub fn conflict_event() -> EmotionalEvent {
    sample_events()
        .into_iter()
        .find(|e| e.kind == EventKind::Conflict && e.valence < 0.0)
        .expect("Negative conflict event should exist in fixtures")
}

/// Returns the betrayal interaction from samples.
pub fn betrayal_interaction() -> Interaction {
    sample_interactions()
        .into_iter()
        .find(|i| i.kind == InteractionKind::Betrayal)
        .expect("Betrayal interaction should exist in fixtures")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_events_load() {
        let events = sample_events();
        assert_eq!(events.len(), 10, "Should have 10 sample events");

        // Verify event kinds are diverse
        assert!(events.iter().any(|e| e.kind == EventKind::SocialInteraction));
        assert!(events.iter().any(|e| e.kind == EventKind::Threat));
        assert!(events.iter().any(|e| e.kind == EventKind::Surprise));
    }

    #[test]
    fn test_sample_events_include_sourceless() {
        let events = sample_events();
        assert!(events.iter().any(|e| e.source.is_none()));
    }

    #[test]
    fn test_sample_interactions_load() {
        let interactions = sample_interactions();
        assert_eq!(interactions.len(), 6, "Should have 6 sample interactions");

        for kind in InteractionKind::all() {
            assert!(
                interactions.iter().any(|i| i.kind == *kind),
                "Missing interaction kind {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_conflict_event_helper() {
        let event = conflict_event();
        assert_eq!(event.kind, EventKind::Conflict);
        assert!(event.valence < 0.0);
        assert!(event.intensity > 0.5);
    }

    #[test]
    fn test_betrayal_interaction_helper() {
        let interaction = betrayal_interaction();
        assert_eq!(interaction.kind, InteractionKind::Betrayal);
        assert!(interaction.impact.is_negative());
        assert_eq!(interaction.impact.familiarity, 0.0);
    }

    #[test]
    fn test_interactions_timestamps_ascend() {
        let interactions = sample_interactions();
        for pair in interactions.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }
}
