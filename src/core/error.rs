// src/core/error.rs
//! Error taxonomy shared by the workflow controller and the service client.

use std::fmt;
use thiserror::Error;

/// The four workflow operations; used to tag `Busy` and to name failed steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Parse,
    Score,
    Tailor,
    Download,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse_resume",
            Self::Score => "score_against_job",
            Self::Tailor => "tailor_for_job",
            Self::Download => "download_tailored",
        }
    }

    /// Label used in user-facing notifications
    pub fn label(self) -> &'static str {
        match self {
            Self::Parse => "Resume parsing",
            Self::Score => "ATS scoring",
            Self::Tailor => "Resume tailoring",
            Self::Download => "Document download",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input that must be present before an operation may call the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    ResumeFile,
    ResumeText,
    JobDescription,
    Model,
    TailoredResult,
}

impl fmt::Display for MissingInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::ResumeFile => "Upload a PDF/DOCX resume first",
            Self::ResumeText => "Parse the resume first",
            Self::JobDescription => "Paste a job description",
            Self::Model => "Set a model name",
            Self::TailoredResult => "Tailor the resume first",
        };
        f.write_str(msg)
    }
}

/// A failed round trip to the resume service. The payload is the
/// diagnostic text of whatever went wrong on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceFailure {
    #[error("Parse failed: {0}")]
    Parse(String),

    #[error("Score failed: {0}")]
    Score(String),

    #[error("Tailor failed: {0}")]
    Tailor(String),

    #[error("Render failed: {0}")]
    Render(String),

    #[error("Health check failed: {0}")]
    Health(String),
}

impl ServiceFailure {
    pub fn message(&self) -> &str {
        match self {
            Self::Parse(msg)
            | Self::Score(msg)
            | Self::Tailor(msg)
            | Self::Render(msg)
            | Self::Health(msg) => msg,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    #[error("Missing input: {0}")]
    Precondition(MissingInput),

    #[error("Cannot start {requested}: {in_flight} is still running")]
    Busy {
        requested: Operation,
        in_flight: Operation,
    },

    #[error("{} failed: {}", .operation.label(), .failure.message())]
    Remote {
        operation: Operation,
        #[source]
        failure: ServiceFailure,
    },
}

impl From<MissingInput> for WorkflowError {
    fn from(missing: MissingInput) -> Self {
        Self::Precondition(missing)
    }
}
