//! # TC-02 Report Submission Flow
//!
//! Owns the report draft and turns it into exactly one submission.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Local Checks (before any network call, in order)
//!
//! 1. A session is present
//! 2. A photo is attached
//! 3. Reporter email and phone are filled in
//! 4. Volunteers give the address the child was found at
//!
//! Blank birthmarks are dropped. A successful submission (match or not) resets
//! the draft; a failed one keeps it for another attempt. Nothing is retried
//! automatically.

#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::ReportSubmissionFlow;
pub use domain::{
    validate_draft, ChildDescribed, ChildDraft, PhotoRef, Report, ReportDraft, ReporterContact,
    SubmissionError, SubmissionOutcome, SubmitReportResponse,
};
pub use ports::{MockReportGateway, ReportGateway, ReportSubmissionApi};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
