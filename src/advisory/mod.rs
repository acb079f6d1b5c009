//! Applicant advisory rules layered on top of the scoring core.
//!
//! - `features`: behavioural features from raw statement/payment history
//! - `health`: financial health score and band
//! - `investment`: risk tolerance, horizon and model allocation

pub mod features;
pub mod health;
pub mod investment;

pub use features::*;
pub use health::*;
pub use investment::*;
