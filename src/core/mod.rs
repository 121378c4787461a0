// src/core/mod.rs
//! Session store, workflow controller and the resume service client

pub mod error;
pub mod fs_ops;
pub mod service_client;
pub mod session;
pub mod workflow;

pub use error::{MissingInput, Operation, ServiceFailure, WorkflowError};
pub use fs_ops::FsOps;
pub use service_client::{ResumeService, ServiceClient};
pub use session::{
    AnalysisConfig, Committed, ResultProvenance, ResumeSource, SessionState, SessionStore,
    WorkflowStatus,
};
pub use workflow::WorkflowController;

pub use crate::types::{ResumeFile, ResumeFormat, SelectionError};
