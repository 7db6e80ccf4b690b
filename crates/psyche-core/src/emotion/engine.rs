//! Emotion Engine
//!
//! Short-lived discrete emotions layered over the slower dimensional
//! mood. Emotions trigger from stimulus events, blend when re-triggered,
//! decay linearly over ticks, and pull the mood toward their profile
//! while it drifts back to baseline between triggers.

use std::collections::HashMap;

use psyche_events::{EmotionalEvent, EventKind, Tick};

use super::types::{ActiveEmotion, DimensionalMood, EmotionKind, EmotionProfile};
use crate::components::Personality;

/// Tunable constants for emotion dynamics
pub mod emotion_constants {
    /// Intensity an active emotion loses per elapsed tick
    pub const DECAY_RATE: f32 = 0.1;
    /// Intensity at or below which an emotion expires
    pub const EXPIRY_THRESHOLD: f32 = 0.01;
    /// Fraction of a repeated trigger's intensity added onto the existing emotion
    pub const RETRIGGER_BLEND: f32 = 0.5;
    /// Resistance of the dimensional mood to change (0.0 to 1.0)
    pub const MOOD_INERTIA: f32 = 0.8;
    /// Most recent emotion triggers retained per agent
    pub const EMOTION_HISTORY_CAP: usize = 100;
}

/// Per-agent emotional state
#[derive(Default)]
struct EmotionalState {
    active: Vec<ActiveEmotion>,
    mood: DimensionalMood,
    history: Vec<ActiveEmotion>,
    last_update: Tick,
}

/// Engine tracking active emotions and dimensional mood for every agent
pub struct EmotionEngine {
    states: HashMap<String, EmotionalState>,
    decay_rate: f32,
    inertia: f32,
    history_cap: usize,
}

impl Default for EmotionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl EmotionEngine {
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            decay_rate: emotion_constants::DECAY_RATE,
            inertia: emotion_constants::MOOD_INERTIA,
            history_cap: emotion_constants::EMOTION_HISTORY_CAP,
        }
    }

    pub fn with_decay_rate(mut self, rate: f32) -> Self {
        self.decay_rate = rate.max(0.0);
        self
    }

    pub fn with_inertia(mut self, inertia: f32) -> Self {
        self.inertia = inertia.clamp(0.0, 1.0);
        self
    }

    pub fn with_history_cap(mut self, cap: usize) -> Self {
        self.history_cap = cap;
        self
    }

    /// Trigger an emotion for an agent and pull their mood toward it.
    ///
    /// Personality shapes the result: neuroticism amplifies negative
    /// emotions, extraversion scales the arousal dimension, and
    /// agreeableness tempers anger. Re-triggering an already active
    /// emotion intensifies it instead of stacking a duplicate. Returns
    /// the effective intensity after modifiers.
    pub fn feel(
        &mut self,
        agent_id: &str,
        kind: EmotionKind,
        intensity: f32,
        cause: impl Into<String>,
        personality: &Personality,
        now: Tick,
    ) -> f32 {
        let raw = intensity.min(1.0);
        let mut profile = kind.profile();
        let mut effective = raw;

        if profile.valence < 0.0 {
            if let Some(neuroticism) = personality.trait_value("neuroticism") {
                effective *= 1.0 + neuroticism * 0.5;
            }
        }
        if let Some(extraversion) = personality.trait_value("extraversion") {
            profile.arousal = (profile.arousal * (1.0 + extraversion * 0.3)).min(1.0);
        }
        if kind == EmotionKind::Anger {
            if let Some(agreeableness) = personality.trait_value("agreeableness") {
                effective *= 1.0 - agreeableness * 0.4;
            }
        }
        let effective = effective.min(1.0);

        let inertia = self.inertia;
        let history_cap = self.history_cap;
        // A fresh state starts its decay clock now, not at tick zero.
        let state = self
            .states
            .entry(agent_id.to_string())
            .or_insert_with(|| EmotionalState {
                last_update: now,
                ..EmotionalState::default()
            });
        let cause = cause.into();

        match state.active.iter_mut().find(|e| e.kind == kind) {
            Some(existing) => {
                existing.intensity =
                    (existing.intensity + effective * emotion_constants::RETRIGGER_BLEND).min(1.0);
                existing.cause = cause.clone();
                existing.felt_at = now;
            }
            None => {
                state.active.push(ActiveEmotion {
                    kind,
                    intensity: effective,
                    profile,
                    cause: cause.clone(),
                    felt_at: now,
                });
            }
        }

        let weight = effective * (1.0 - inertia);
        state.mood.valence += (profile.valence - state.mood.valence) * weight;
        state.mood.arousal += (profile.arousal - state.mood.arousal) * weight;
        state.mood.dominance += (profile.dominance - state.mood.dominance) * weight;

        state.history.push(ActiveEmotion {
            kind,
            intensity: effective,
            profile,
            cause,
            felt_at: now,
        });
        if state.history.len() > history_cap {
            let excess = state.history.len() - history_cap;
            state.history.drain(..excess);
        }

        effective
    }

    /// React to a stimulus event: maps the event kind to one or two
    /// emotions, scaled by how the agent feels about the source.
    ///
    /// Only threat, cooperation, conflict, and surprise events carry an
    /// emotional charge here; the rest shape personality through the
    /// updater instead. Returns the triggered emotions with their
    /// effective intensities.
    pub fn react(
        &mut self,
        agent_id: &str,
        event: &EmotionalEvent,
        personality: &Personality,
        now: Tick,
    ) -> Vec<(EmotionKind, f32)> {
        let source = event.source.clone().unwrap_or_else(|| "unknown".to_string());
        let relationship = event
            .source
            .as_deref()
            .map(|s| personality.relationship(s))
            .unwrap_or(0.0);
        let intensity = event.intensity * (1.0 + relationship * 0.5);

        let mut felt = Vec::new();
        match event.kind {
            EventKind::Threat => {
                felt.push((
                    EmotionKind::Fear,
                    self.feel(
                        agent_id,
                        EmotionKind::Fear,
                        intensity,
                        format!("threat from {}", source),
                        personality,
                        now,
                    ),
                ));
                if relationship < 0.0 {
                    felt.push((
                        EmotionKind::Anger,
                        self.feel(
                            agent_id,
                            EmotionKind::Anger,
                            intensity * 0.7,
                            format!("threat from disliked {}", source),
                            personality,
                            now,
                        ),
                    ));
                }
            }
            EventKind::Cooperation => {
                felt.push((
                    EmotionKind::Trust,
                    self.feel(
                        agent_id,
                        EmotionKind::Trust,
                        intensity,
                        format!("cooperation with {}", source),
                        personality,
                        now,
                    ),
                ));
                if relationship > 0.0 {
                    felt.push((
                        EmotionKind::Joy,
                        self.feel(
                            agent_id,
                            EmotionKind::Joy,
                            intensity * 0.5,
                            format!("cooperation with liked {}", source),
                            personality,
                            now,
                        ),
                    ));
                }
            }
            EventKind::Conflict => {
                felt.push((
                    EmotionKind::Anger,
                    self.feel(
                        agent_id,
                        EmotionKind::Anger,
                        intensity,
                        format!("conflict with {}", source),
                        personality,
                        now,
                    ),
                ));
            }
            EventKind::Surprise => {
                felt.push((
                    EmotionKind::Surprise,
                    self.feel(
                        agent_id,
                        EmotionKind::Surprise,
                        intensity,
                        format!("unexpected event from {}", source),
                        personality,
                        now,
                    ),
                ));
                if event.valence > 0.3 {
                    felt.push((
                        EmotionKind::Joy,
                        self.feel(
                            agent_id,
                            EmotionKind::Joy,
                            intensity * event.valence,
                            format!("positive surprise from {}", source),
                            personality,
                            now,
                        ),
                    ));
                } else if event.valence < -0.3 {
                    felt.push((
                        EmotionKind::Fear,
                        self.feel(
                            agent_id,
                            EmotionKind::Fear,
                            intensity * -event.valence,
                            format!("negative surprise from {}", source),
                            personality,
                            now,
                        ),
                    ));
                }
            }
            _ => {}
        }
        felt
    }

    /// Decay active emotions by elapsed ticks, expire the spent ones, and
    /// drift the mood toward baseline. The drift never overshoots the
    /// baseline regardless of how many ticks passed.
    pub fn advance(&mut self, agent_id: &str, now: Tick) {
        let state = match self.states.get_mut(agent_id) {
            Some(s) => s,
            None => return,
        };
        let elapsed = now.elapsed_since(state.last_update) as f32;
        state.last_update = now;

        for emotion in &mut state.active {
            emotion.intensity = (emotion.intensity - self.decay_rate * elapsed).max(0.0);
        }
        state
            .active
            .retain(|e| e.intensity > emotion_constants::EXPIRY_THRESHOLD);

        let drift = ((1.0 - self.inertia) * elapsed).min(1.0);
        state.mood.valence += (0.0 - state.mood.valence) * drift;
        state.mood.arousal += (0.5 - state.mood.arousal) * drift;
        state.mood.dominance += (0.5 - state.mood.dominance) * drift;
    }

    /// The most intense active emotion, if any. Ties go to the earliest
    /// triggered.
    pub fn dominant(&self, agent_id: &str) -> Option<&ActiveEmotion> {
        self.states.get(agent_id).and_then(|state| {
            state
                .active
                .iter()
                .reduce(|best, e| if e.intensity > best.intensity { e } else { best })
        })
    }

    /// Intensity-weighted average profile of all active emotions; all
    /// zeros when nothing is active.
    pub fn blend(&self, agent_id: &str) -> EmotionProfile {
        let active = self.active(agent_id);
        let total: f32 = active.iter().map(|e| e.intensity).sum();
        if total <= 0.0 {
            return EmotionProfile::default();
        }

        let mut blend = EmotionProfile::default();
        for emotion in active {
            blend.valence += emotion.profile.valence * emotion.intensity;
            blend.arousal += emotion.profile.arousal * emotion.intensity;
            blend.dominance += emotion.profile.dominance * emotion.intensity;
        }
        blend.valence /= total;
        blend.arousal /= total;
        blend.dominance /= total;
        blend
    }

    pub fn mood(&self, agent_id: &str) -> DimensionalMood {
        self.states
            .get(agent_id)
            .map(|state| state.mood)
            .unwrap_or_default()
    }

    pub fn active(&self, agent_id: &str) -> &[ActiveEmotion] {
        self.states
            .get(agent_id)
            .map(|state| state.active.as_slice())
            .unwrap_or(&[])
    }

    /// Past emotion triggers, oldest first, bounded by the history cap.
    pub fn history(&self, agent_id: &str) -> &[ActiveEmotion] {
        self.states
            .get(agent_id)
            .map(|state| state.history.as_slice())
            .unwrap_or(&[])
    }

    pub fn remove_agent(&mut self, agent_id: &str) {
        self.states.remove(agent_id);
    }
}
