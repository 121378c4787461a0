// src/types/results.rs
//! Typed results of the remote operations, as committed to the session store.

pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const DEFAULT_ARTIFACT_NAME: &str = "tailored_resume.docx";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedResume {
    pub text: String,
}

/// Scores are whatever the service returned; nothing is clamped or rounded.
#[derive(Debug, Clone, PartialEq)]
pub struct AtsResult {
    pub ats_score: f64,
    pub keyword_match_score: f64,
    pub matches: Vec<String>,
    pub missing: Vec<String>,
    pub extracted_job_keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry {
    pub section: String,
    pub change: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailoredResult {
    pub markdown: String,
    pub change_log: Vec<ChangeLogEntry>,
    pub skills_to_learn: Vec<String>,
}

/// Rendered office document ready to be saved locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl DocumentArtifact {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
