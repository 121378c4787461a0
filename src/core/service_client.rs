// src/core/service_client.rs
//! Typed HTTP client for the resume service.
//!
//! One method per endpoint, one round trip per call. Transport errors,
//! non-2xx statuses and undecodable bodies all come back as the matching
//! [`ServiceFailure`] variant with the underlying diagnostic text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::ServiceFailure;
use crate::types::request::{RenderRequest, ScoreRequest, TailorRequest};
use crate::types::response::{
    AtsScoreResponse, ErrorEnvelope, HealthResponse, ParseResumeResponse, TailorResumeResponse,
};
use crate::types::results::{DEFAULT_ARTIFACT_NAME, DOCX_CONTENT_TYPE};
use crate::types::{AtsResult, DocumentArtifact, ParsedResume, ResumeFile, TailoredResult};

const HEALTH_ENDPOINT: &str = "/";
const PARSE_ENDPOINT: &str = "/parse_resume";
const SCORE_ENDPOINT: &str = "/ats_score";
const TAILOR_ENDPOINT: &str = "/tailor_resume";
const DOWNLOAD_ENDPOINT: &str = "/download_resume";

/// Boundary the workflow controller talks to.
#[async_trait]
pub trait ResumeService: Send + Sync {
    async fn parse(&self, file: &ResumeFile) -> Result<ParsedResume, ServiceFailure>;

    async fn score(&self, request: &ScoreRequest) -> Result<AtsResult, ServiceFailure>;

    async fn tailor(&self, request: &TailorRequest) -> Result<TailoredResult, ServiceFailure>;

    async fn render_document(
        &self,
        request: &RenderRequest,
    ) -> Result<DocumentArtifact, ServiceFailure>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create a client for the service at `base_url`. Timeouts are the transport defaults.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// GET / - returns the service's status string
    pub async fn health(&self) -> Result<String, ServiceFailure> {
        let url = self.url(HEALTH_ENDPOINT);
        app_log!(debug, "Checking resume service health: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceFailure::Health(transport_message(&url, &e)))?;

        let body: HealthResponse = read_json(response)
            .await
            .map_err(ServiceFailure::Health)?;
        Ok(body.status)
    }

    /// POST a JSON payload and decode a JSON reply, failures as plain text
    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R, String>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        app_log!(info, "Calling resume service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| transport_message(&url, &e))?;

        read_json(response).await
    }
}

#[async_trait]
impl ResumeService for ServiceClient {
    async fn parse(&self, file: &ResumeFile) -> Result<ParsedResume, ServiceFailure> {
        let url = self.url(PARSE_ENDPOINT);

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(file.format.content_type())
            .map_err(|e| ServiceFailure::Parse(format!("Failed to create multipart: {}", e)))?;
        let form = Form::new().part("file", part);

        app_log!(
            info,
            "Calling resume parser: {} ({}, {} bytes)",
            url,
            file.format,
            file.bytes.len()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ServiceFailure::Parse(transport_message(&url, &e)))?;

        let body: ParseResumeResponse = read_json(response)
            .await
            .map_err(ServiceFailure::Parse)?;
        Ok(body.into())
    }

    async fn score(&self, request: &ScoreRequest) -> Result<AtsResult, ServiceFailure> {
        let body: AtsScoreResponse = self
            .post_json(SCORE_ENDPOINT, request)
            .await
            .map_err(ServiceFailure::Score)?;
        Ok(body.into())
    }

    async fn tailor(&self, request: &TailorRequest) -> Result<TailoredResult, ServiceFailure> {
        let body: TailorResumeResponse = self
            .post_json(TAILOR_ENDPOINT, request)
            .await
            .map_err(ServiceFailure::Tailor)?;
        Ok(body.into())
    }

    async fn render_document(
        &self,
        request: &RenderRequest,
    ) -> Result<DocumentArtifact, ServiceFailure> {
        let url = self.url(DOWNLOAD_ENDPOINT);
        app_log!(info, "Calling document renderer: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| ServiceFailure::Render(transport_message(&url, &e)))?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);
        if !status.is_success() {
            return Err(ServiceFailure::Render(error_status_message(response).await));
        }

        let content_type = header_str(&response, CONTENT_TYPE.as_str());
        let file_name = header_str(&response, CONTENT_DISPOSITION.as_str())
            .as_deref()
            .and_then(disposition_file_name)
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ServiceFailure::Render(format!("Failed to read response body: {}", e)))?;

        // The renderer reports refusals as a 2xx JSON envelope
        if content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("application/json"))
        {
            let message = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
                Ok(envelope) => envelope.error,
                Err(_) => format!(
                    "Expected a document, got JSON: {}",
                    String::from_utf8_lossy(&bytes)
                ),
            };
            app_log!(error, "Document renderer refused: {}", message);
            return Err(ServiceFailure::Render(message));
        }

        if bytes.is_empty() {
            return Err(ServiceFailure::Render("Empty document body".to_string()));
        }

        app_log!(info, "Received document {} ({} bytes)", file_name, bytes.len());

        Ok(DocumentArtifact {
            file_name,
            content_type: content_type.unwrap_or_else(|| DOCX_CONTENT_TYPE.to_string()),
            bytes: bytes.to_vec(),
        })
    }
}

fn transport_message(url: &str, err: &reqwest::Error) -> String {
    app_log!(error, "Request to {} failed: {}", url, err);
    format!("Request to {} failed: {}", url, err)
}

async fn error_status_message(response: reqwest::Response) -> String {
    let status = response.status();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    app_log!(error, "Resume service error response: {} {}", status, error_text);
    format!("Service returned error status {}: {}", status, error_text)
}

/// Decode a 2xx JSON body, or describe why that was not possible.
async fn read_json<R: DeserializeOwned>(response: reqwest::Response) -> Result<R, String> {
    let status = response.status();
    app_log!(trace, "Response status: {}", status);

    if !status.is_success() {
        return Err(error_status_message(response).await);
    }

    let response_text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response text: {}", e))?;

    app_log!(debug, "Response body: {} bytes", response_text.len());

    serde_json::from_str(&response_text).map_err(|e| {
        app_log!(error, "Malformed response body: {}", response_text);
        format!("Malformed response body: {}", e)
    })
}

fn header_str(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// `attachment; filename="x.docx"` -> `x.docx`
fn disposition_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}
