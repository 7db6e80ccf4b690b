//! Core psychology logic: personalities, templates, connections, emotions.

pub mod components;
pub mod templates;
pub mod store;
pub mod updater;
pub mod connections;
pub mod emotion;
pub mod observe;
pub mod log;

pub use components::Personality;
pub use connections::ConnectionManager;
pub use emotion::EmotionEngine;
pub use store::PersonalityStore;
pub use updater::PersonalityUpdater;
