//! # emailspan-core
//!
//! Core logic for the `EmailSpan` email deliverability tester.
//!
//! This crate provides:
//! - **API client** - identify, create, fetch, process and send against the backend
//! - **Domain models** - tests, per-inbox results and lenient decoding of both
//! - **Workflow** - the three-phase create, send and report state machine
//! - **Reports** - placement counts, score and share links derived from a test
//! - **Configuration** - backend URL, report origin and timeout resolution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
mod error;
pub mod model;
pub mod probe;
pub mod report;
pub mod validation;
pub mod workflow;

pub use api::{ApiClient, SendEmailRequest};
pub use config::ApiConfig;
pub use error::{Error, GENERIC_CREATE_FAILURE, Result, creation_error_message};
pub use model::{ResultStatus, SpamTest, SpamTestPatch, TestResult, TestStatus};
pub use probe::{ProbeEmail, resolve_recipient};
pub use report::{ReportSummary, StatusCounts, share_url};
pub use validation::is_valid_email;
pub use workflow::{AUTO_CHECK_INTERVAL, Phase, StepState, Workflow};
