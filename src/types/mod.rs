// src/types/mod.rs
pub mod request;
pub mod response;
pub mod resume_file;
pub mod results;

pub use resume_file::{ResumeFile, ResumeFormat, SelectionError};
pub use results::{AtsResult, ChangeLogEntry, DocumentArtifact, ParsedResume, TailoredResult};
