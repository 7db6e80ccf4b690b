//! State Components
//!
//! Data records for per-agent psychology and pairwise connections.

pub mod connection;
pub mod personality;

pub use connection::*;
pub use personality::*;
