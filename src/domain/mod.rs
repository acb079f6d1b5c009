//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - validated inputs (`RiskScore`) and derived enums (`RiskTier`, `Severity`, ...)
//! - applicant and portfolio records (`Applicant`, `AssetAllocation`, ...)
//! - run configurations built from CLI flags (`ApplicantsConfig`, `PortfolioConfig`)

pub mod types;

pub use types::*;
