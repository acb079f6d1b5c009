//! Input/output helpers.
//!
//! - CSV ingest + validation of applicant books (`ingest`)
//! - JSON inputs and outputs (`json`)
//! - CSV export of scored applicants (`export`)

pub mod export;
pub mod ingest;
pub mod json;

pub use export::*;
pub use ingest::*;
pub use json::*;
