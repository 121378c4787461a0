// src/types/response.rs
//! Wire shapes returned by the resume service.

use serde::Deserialize;

use crate::types::results::{AtsResult, ChangeLogEntry, ParsedResume, TailoredResult};

#[derive(Debug, Deserialize)]
pub struct ParseResumeResponse {
    #[serde(default)]
    pub resume_text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AtsScoreResponse {
    pub ats_score: f64,
    pub keyword_match_score: f64,
    pub matches: Vec<String>,
    pub missing: Vec<String>,
    #[serde(default)]
    pub extracted_job_keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangeLogItem {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub change: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Debug, Deserialize)]
pub struct TailorResumeResponse {
    pub tailored_resume_markdown: String,
    #[serde(default)]
    pub change_log: Vec<ChangeLogItem>,
    #[serde(default)]
    pub missing_skills_recommended_to_learn: Vec<String>,
}

/// Returned with a 2xx status by the download endpoint when it refuses to render.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl From<ParseResumeResponse> for ParsedResume {
    fn from(response: ParseResumeResponse) -> Self {
        Self {
            text: response.resume_text.unwrap_or_default(),
        }
    }
}

impl From<AtsScoreResponse> for AtsResult {
    fn from(response: AtsScoreResponse) -> Self {
        Self {
            ats_score: response.ats_score,
            keyword_match_score: response.keyword_match_score,
            matches: response.matches,
            missing: response.missing,
            extracted_job_keywords: response.extracted_job_keywords,
        }
    }
}

impl From<ChangeLogItem> for ChangeLogEntry {
    fn from(item: ChangeLogItem) -> Self {
        Self {
            section: item.section,
            change: item.change,
            reason: item.reason,
        }
    }
}

impl From<TailorResumeResponse> for TailoredResult {
    fn from(response: TailorResumeResponse) -> Self {
        Self {
            markdown: response.tailored_resume_markdown,
            change_log: response.change_log.into_iter().map(Into::into).collect(),
            skills_to_learn: response.missing_skills_recommended_to_learn,
        }
    }
}
