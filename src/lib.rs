// src/lib.rs
//! Resume ATS scoring and tailoring client.
//!
//! The [`core`] module holds the session store, the workflow controller that
//! serializes the four remote operations, and the typed HTTP client for the
//! resume service. [`cli`] is the terminal front end built on top of it.

#[macro_use]
pub mod logging;

pub mod cli;
pub mod config;
pub mod core;
pub mod types;

pub use crate::config::AppConfig;
pub use crate::core::{
    AnalysisConfig, MissingInput, Operation, ResumeFile, ResumeFormat, ResumeService,
    ServiceClient, ServiceFailure, SessionState, SessionStore, WorkflowController, WorkflowError,
    WorkflowStatus,
};
pub use crate::types::results::{AtsResult, ChangeLogEntry, DocumentArtifact, TailoredResult};
