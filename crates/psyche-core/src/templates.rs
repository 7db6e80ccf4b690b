//! Personality Templates
//!
//! Named presets of base traits and mood used to seed new agents.
//! Templates are registered explicitly on a store; nothing registers them
//! implicitly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use psyche_events::MoodUpdate;

use crate::components::{Trait, TraitCategory};

/// A named preset: partial personality applied at creation time.
/// Mood fields left out of the preset fall back to the neutral 0.5.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Template {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub base_traits: HashMap<String, Trait>,
    #[serde(default, skip_serializing_if = "MoodUpdate::is_empty")]
    pub mood: MoodUpdate,
}

impl Template {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trait(mut self, t: Trait) -> Self {
        self.base_traits.insert(t.name.clone(), t);
        self
    }

    pub fn with_mood(mut self, mood: MoodUpdate) -> Self {
        self.mood = mood;
        self
    }
}

fn big_five(
    openness: f32,
    conscientiousness: f32,
    extraversion: f32,
    agreeableness: f32,
    neuroticism: f32,
) -> Template {
    Template::new()
        .with_trait(
            Trait::new("openness", openness, TraitCategory::Cognitive)
                .with_description("Openness to unfamiliar ideas and experiences"),
        )
        .with_trait(
            Trait::new("conscientiousness", conscientiousness, TraitCategory::Behavioral)
                .with_description("Discipline and attention to detail"),
        )
        .with_trait(
            Trait::new("extraversion", extraversion, TraitCategory::Social)
                .with_description("Comfort seeking out social stimulation"),
        )
        .with_trait(
            Trait::new("agreeableness", agreeableness, TraitCategory::Social)
                .with_description("Warmth and willingness to cooperate"),
        )
        .with_trait(
            Trait::new("neuroticism", neuroticism, TraitCategory::Emotional)
                .with_description("Tendency toward negative emotional states"),
        )
}

fn adaptive_seeds(sociability: f32, resilience: f32, curiosity: f32) -> [Trait; 3] {
    [
        Trait::new("sociability", sociability, TraitCategory::Social)
            .with_description("Frequency of voluntary interaction"),
        Trait::new("resilience", resilience, TraitCategory::Emotional)
            .with_description("Speed of recovery from setbacks"),
        Trait::new("curiosity", curiosity, TraitCategory::Cognitive)
            .with_description("Drive to seek out new information"),
    ]
}

/// The three stock templates: friendly, analytical, creative.
///
/// Each carries the Big Five plus the three experience-driven traits
/// (sociability, resilience, curiosity) that event processing nudges.
pub fn builtin_templates() -> Vec<(&'static str, Template)> {
    let friendly = {
        let mut template = big_five(0.7, 0.6, 0.8, 0.9, 0.3)
            .with_mood(MoodUpdate::new().with_happiness(0.7).with_energy(0.6));
        for t in adaptive_seeds(0.9, 0.6, 0.6) {
            template = template.with_trait(t);
        }
        template
    };

    let analytical = {
        let mut template = big_five(0.8, 0.9, 0.4, 0.6, 0.3)
            .with_mood(MoodUpdate::new().with_stress(0.4));
        for t in adaptive_seeds(0.4, 0.7, 0.8) {
            template = template.with_trait(t);
        }
        template
    };

    let creative = {
        let mut template =
            big_five(0.9, 0.5, 0.6, 0.7, 0.4).with_mood(MoodUpdate::new().with_energy(0.7));
        for t in adaptive_seeds(0.6, 0.5, 0.9) {
            template = template.with_trait(t);
        }
        template
    };

    vec![
        ("friendly", friendly),
        ("analytical", analytical),
        ("creative", creative),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_template_names() {
        let names: Vec<&str> = builtin_templates().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["friendly", "analytical", "creative"]);
    }

    #[test]
    fn test_friendly_template_values() {
        let templates = builtin_templates();
        let (_, friendly) = &templates[0];

        assert_eq!(friendly.base_traits["agreeableness"].value, 0.9);
        assert_eq!(friendly.base_traits["extraversion"].value, 0.8);
        assert_eq!(friendly.base_traits["neuroticism"].value, 0.3);
        assert_eq!(friendly.mood.happiness, Some(0.7));
    }

    #[test]
    fn test_every_builtin_has_adaptive_seed_traits() {
        for (name, template) in builtin_templates() {
            for trait_name in ["sociability", "resilience", "curiosity"] {
                assert!(
                    template.base_traits.contains_key(trait_name),
                    "{} template missing {}",
                    name,
                    trait_name
                );
            }
        }
    }

    #[test]
    fn test_template_builder() {
        let template = Template::new()
            .with_trait(Trait::new("patience", 0.8, TraitCategory::Behavioral))
            .with_mood(MoodUpdate::new().with_stress(0.2));

        assert_eq!(template.base_traits["patience"].value, 0.8);
        assert_eq!(template.mood.stress, Some(0.2));
        assert!(template.mood.happiness.is_none());
    }

    #[test]
    fn test_trait_categories_are_assigned() {
        let templates = builtin_templates();
        let (_, analytical) = &templates[1];

        assert_eq!(
            analytical.base_traits["neuroticism"].category,
            TraitCategory::Emotional
        );
        assert_eq!(
            analytical.base_traits["conscientiousness"].category,
            TraitCategory::Behavioral
        );
        assert_eq!(
            analytical.base_traits["curiosity"].category,
            TraitCategory::Cognitive
        );
        assert_eq!(
            analytical.base_traits["sociability"].category,
            TraitCategory::Social
        );
    }
}
