//! Emotion Effects
//!
//! Read-only projections of an agent's emotional state onto behavior:
//! how they would communicate, analyze, and decide right now, plus an
//! outward expression label for observers.

use serde::{Deserialize, Serialize};

use super::engine::EmotionEngine;
use super::types::EmotionKind;

/// How emotional state colors outgoing communication
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CommunicationParams {
    /// Emotional coloring from hostile (-1.0) to warm (1.0)
    pub tone: f32,
    /// Multiplier on message length, centered on 1.0
    pub verbosity: f32,
    /// How assertive the delivery is (0.0 to 1.0)
    pub forcefulness: f32,
}

/// How emotional state skews analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisParams {
    /// Bias toward favorable interpretations (-1.0 to 1.0)
    pub optimism_bias: f32,
    /// High arousal favors broad scanning over deep focus (0.0 to 1.0)
    pub breadth_vs_depth: f32,
}

/// How emotional state shapes decision making
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionParams {
    /// Reluctance to take risky options (0.0 to 2.0)
    pub risk_aversion: f32,
    /// How quickly the agent commits (0.0 to 1.0)
    pub speed: f32,
    /// Certainty in the chosen option (0.0 to 1.0)
    pub confidence: f32,
}

/// Outward emotional expression visible to other agents
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expression {
    /// Single-word label for the dominant emotion
    pub label: &'static str,
    /// Intensity of the dominant emotion, 0.0 when neutral
    pub intensity: f32,
    /// Human-readable phrase like "moderately angry"
    pub description: String,
}

/// Communication parameters from the blended emotional state. A
/// dominant anger above 0.7 overrides tone and forcefulness outright.
pub fn communicate_params(engine: &EmotionEngine, agent_id: &str) -> CommunicationParams {
    let blend = engine.blend(agent_id);
    let mut params = CommunicationParams {
        tone: blend.valence,
        verbosity: 1.0 + (blend.arousal - 0.5) * 0.5,
        forcefulness: blend.dominance,
    };
    if let Some(dominant) = engine.dominant(agent_id) {
        if dominant.kind == EmotionKind::Anger && dominant.intensity > 0.7 {
            params.tone = -0.8;
            params.forcefulness = 0.9;
        }
    }
    params
}

/// Analysis parameters from the blended emotional state.
pub fn analyze_params(engine: &EmotionEngine, agent_id: &str) -> AnalysisParams {
    let blend = engine.blend(agent_id);
    AnalysisParams {
        optimism_bias: blend.valence,
        breadth_vs_depth: 2.0 * (blend.arousal - 0.5).abs(),
    }
}

/// Decision parameters from the blended emotional state. A dominant
/// fear above 0.7 pins risk aversion high.
pub fn decide_params(engine: &EmotionEngine, agent_id: &str) -> DecisionParams {
    let blend = engine.blend(agent_id);
    let mut params = DecisionParams {
        risk_aversion: 1.0 - blend.valence,
        speed: blend.arousal,
        confidence: 0.5 + blend.dominance * 0.5,
    };
    if let Some(dominant) = engine.dominant(agent_id) {
        if dominant.kind == EmotionKind::Fear && dominant.intensity > 0.7 {
            params.risk_aversion = 0.9;
        }
    }
    params
}

/// The expression an observer would read off the agent's face.
pub fn expression(engine: &EmotionEngine, agent_id: &str) -> Expression {
    match engine.dominant(agent_id) {
        Some(dominant) => {
            let label = expression_label(dominant.kind);
            Expression {
                label,
                intensity: dominant.intensity,
                description: format!("{} {}", intensity_descriptor(dominant.intensity), label),
            }
        }
        None => Expression {
            label: "neutral",
            intensity: 0.0,
            description: "neutral expression".to_string(),
        },
    }
}

/// Observable label for an emotion kind.
pub fn expression_label(kind: EmotionKind) -> &'static str {
    match kind {
        EmotionKind::Joy => "happy",
        EmotionKind::Sadness => "sad",
        EmotionKind::Anger => "angry",
        EmotionKind::Fear => "fearful",
        EmotionKind::Disgust => "disgusted",
        EmotionKind::Surprise => "surprised",
        EmotionKind::Anticipation => "interested",
        EmotionKind::Trust => "relaxed",
        EmotionKind::Love => "loving",
        EmotionKind::Guilt => "ashamed",
        EmotionKind::Jealousy => "envious",
        EmotionKind::Hope => "hopeful",
        EmotionKind::Disappointment => "disappointed",
    }
}

/// Adverb describing an intensity level.
pub fn intensity_descriptor(intensity: f32) -> &'static str {
    if intensity < 0.3 {
        "slightly"
    } else if intensity < 0.6 {
        "moderately"
    } else if intensity < 0.8 {
        "very"
    } else {
        "extremely"
    }
}
