//! Shared data types for the agent psychology simulation.
//!
//! This crate holds the pure data structures passed between the driver and
//! psyche-core: emotional events, interactions, update payloads, state-change
//! records, and snapshots. Nothing here has behavior beyond constructors,
//! clamping, and serialization.

pub mod change;
pub mod event;
pub mod interaction;
pub mod snapshot;
pub mod timestamp;
pub mod update;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export timestamp types
pub use timestamp::Tick;

// Re-export event types
pub use event::{EmotionalEvent, EventKind};

// Re-export interaction types
pub use interaction::{pair_key, Interaction, InteractionImpact, InteractionKind};

// Re-export update payload types
pub use update::{MoodUpdate, PersonalityUpdate};

// Re-export change notification types
pub use change::{StateChange, Topic};

// Re-export snapshot types
pub use snapshot::{
    generate_snapshot_id, AgentSnapshot, ConnectionSnapshot, MoodSnapshot, StateSnapshot,
};
