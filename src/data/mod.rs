//! Scoring-service integration: wire contracts and a thin blocking client.

pub mod client;
pub mod wire;

pub use client::*;
pub use wire::*;
