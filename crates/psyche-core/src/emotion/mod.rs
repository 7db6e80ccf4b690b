//! Emotion Module
//!
//! Discrete emotions with decay, a slow-moving dimensional mood, and
//! projections of both onto observable behavior.

pub mod effects;
pub mod engine;
pub mod types;

pub use effects::*;
pub use engine::*;
pub use types::*;
