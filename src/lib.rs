//! FlowScore: credit-risk assessment for trade-credit underwriting.
//!
//! The pipeline runs encode -> predict -> grade -> explain for each submitted
//! applicant. The classifier artifact is loaded once at startup and shared
//! read-only; every other value is recomputed wholesale per submission.

pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod report;
pub mod routes;
pub mod scoring;
pub mod telemetry;
