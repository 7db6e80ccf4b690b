//! Emotion Types
//!
//! The closed set of discrete emotions and their positions in
//! valence/arousal/dominance space.

use serde::{Deserialize, Serialize};

use psyche_events::Tick;

/// A discrete emotion an agent can feel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmotionKind {
    Joy,
    Sadness,
    Anger,
    Fear,
    Disgust,
    Surprise,
    Anticipation,
    Trust,
    // Blended emotions
    Love,
    Guilt,
    Jealousy,
    Hope,
    Disappointment,
}

impl EmotionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionKind::Joy => "joy",
            EmotionKind::Sadness => "sadness",
            EmotionKind::Anger => "anger",
            EmotionKind::Fear => "fear",
            EmotionKind::Disgust => "disgust",
            EmotionKind::Surprise => "surprise",
            EmotionKind::Anticipation => "anticipation",
            EmotionKind::Trust => "trust",
            EmotionKind::Love => "love",
            EmotionKind::Guilt => "guilt",
            EmotionKind::Jealousy => "jealousy",
            EmotionKind::Hope => "hope",
            EmotionKind::Disappointment => "disappointment",
        }
    }

    pub fn all() -> &'static [EmotionKind] {
        &[
            EmotionKind::Joy,
            EmotionKind::Sadness,
            EmotionKind::Anger,
            EmotionKind::Fear,
            EmotionKind::Disgust,
            EmotionKind::Surprise,
            EmotionKind::Anticipation,
            EmotionKind::Trust,
            EmotionKind::Love,
            EmotionKind::Guilt,
            EmotionKind::Jealousy,
            EmotionKind::Hope,
            EmotionKind::Disappointment,
        ]
    }

    /// Dimensional profile for this emotion. Surprise sits near neutral
    /// valence; the secondary emotion triggered alongside it carries the
    /// positive or negative charge.
    pub fn profile(&self) -> EmotionProfile {
        match self {
            EmotionKind::Joy => EmotionProfile::new(1.0, 0.7, 0.6),
            EmotionKind::Sadness => EmotionProfile::new(-0.8, 0.3, 0.2),
            EmotionKind::Anger => EmotionProfile::new(-0.7, 0.9, 0.8),
            EmotionKind::Fear => EmotionProfile::new(-0.9, 0.8, 0.1),
            EmotionKind::Disgust => EmotionProfile::new(-0.8, 0.6, 0.5),
            EmotionKind::Surprise => EmotionProfile::new(0.1, 0.9, 0.5),
            EmotionKind::Anticipation => EmotionProfile::new(0.3, 0.7, 0.6),
            EmotionKind::Trust => EmotionProfile::new(0.7, 0.3, 0.5),
            EmotionKind::Love => EmotionProfile::new(1.0, 0.6, 0.7),
            EmotionKind::Guilt => EmotionProfile::new(-0.8, 0.5, 0.1),
            EmotionKind::Jealousy => EmotionProfile::new(-0.7, 0.8, 0.4),
            EmotionKind::Hope => EmotionProfile::new(0.8, 0.6, 0.7),
            EmotionKind::Disappointment => EmotionProfile::new(-0.7, 0.4, 0.3),
        }
    }

    /// Whether the emotion's profile sits on the negative side.
    pub fn is_negative(&self) -> bool {
        self.profile().valence < 0.0
    }
}

/// Position in valence/arousal/dominance space
///
/// Valence runs -1.0 to 1.0; arousal and dominance 0.0 to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EmotionProfile {
    pub valence: f32,
    pub arousal: f32,
    pub dominance: f32,
}

impl EmotionProfile {
    pub fn new(valence: f32, arousal: f32, dominance: f32) -> Self {
        Self {
            valence,
            arousal,
            dominance,
        }
    }
}

/// Slow-moving dimensional mood, pulled around by active emotions and
/// drifting back to baseline (valence 0.0, arousal and dominance 0.5)
/// between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionalMood {
    pub valence: f32,
    pub arousal: f32,
    pub dominance: f32,
}

impl Default for DimensionalMood {
    fn default() -> Self {
        Self {
            valence: 0.0,
            arousal: 0.5,
            dominance: 0.5,
        }
    }
}

impl DimensionalMood {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One currently-felt emotion
///
/// The profile is stored per instance because personality scales the
/// arousal dimension at trigger time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEmotion {
    pub kind: EmotionKind,
    pub intensity: f32,
    pub profile: EmotionProfile,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub cause: String,
    pub felt_at: Tick,
}
