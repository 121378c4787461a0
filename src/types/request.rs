// src/types/request.rs
//! JSON bodies sent to the resume service.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRequest {
    pub job_description: String,
    pub resume_text: String,
    pub llm_model: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailorRequest {
    pub job_description: String,
    pub resume_text: String,
    pub llm_model: String,
    pub strict_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub markdown: String,
}
