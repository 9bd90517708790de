//! Shared domain types for the LabSafe server.
//!
//! This crate holds the values that cross crate boundaries:
//! - The PPE compliance verdict model ([`ComplianceVerdict`] and friends)
//! - User and report records
//! - The verification pipeline error taxonomy ([`VerifyError`])

pub mod errors;
pub mod models;
pub mod verdict;

// Re-exports for convenience
pub use errors::{VerifyError, VerifyResult};
pub use models::{Report, ReportStatus, User};
pub use verdict::{ComplianceVerdict, ItemStatus, OverallStatus};
