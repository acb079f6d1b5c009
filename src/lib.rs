//! `loan-scout` library crate.
//!
//! The binary (`scout`) is a thin wrapper around this library so that:
//!
//! - the scoring core is testable without spawning processes
//! - the same rules serve the CLI, exports and the live assessment
//! - code stays easy to navigate as the project grows

pub mod advisory;
pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod scoring;
