// src/core/workflow.rs
//! Workflow controller.
//!
//! Every operation runs the same protocol: check preconditions, refuse if
//! another operation is in flight, mark the store `Busy`, make exactly one
//! service call, then either commit the result and go `Idle` in one update or
//! go `Idle` with nothing else touched.

use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::core::error::{Operation, ServiceFailure, WorkflowError};
use crate::core::service_client::ResumeService;
use crate::core::session::{SessionState, SessionStore};
use crate::types::request::{RenderRequest, ScoreRequest, TailorRequest};
use crate::types::{AtsResult, DocumentArtifact, TailoredResult};

/// Holds the store `Busy` for one operation. Dropping it without a commit
/// (failure, or the caller abandoning the future) returns the store to `Idle`.
struct BusyGuard<'a> {
    store: &'a SessionStore,
    armed: bool,
}

impl<'a> BusyGuard<'a> {
    fn new(store: &'a SessionStore) -> Self {
        Self { store, armed: true }
    }

    fn commit(mut self, commit: impl FnOnce(&mut SessionState)) {
        self.armed = false;
        self.store.commit(commit);
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.store.finish();
        }
    }
}

pub struct WorkflowController<S> {
    store: Arc<SessionStore>,
    service: S,
}

impl<S: ResumeService> WorkflowController<S> {
    pub fn new(store: Arc<SessionStore>, service: S) -> Self {
        Self { store, service }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Send the selected file to the parser and replace the resume text.
    /// Any ATS or tailored result is dropped along with the old text.
    pub async fn parse_resume(&self) -> Result<String, WorkflowError> {
        let operation = Operation::Parse;
        let file = self.store.begin(operation, |state| {
            let file = state.require_resume_file()?;
            state.require_model()?;
            Ok(file)
        })?;
        let guard = BusyGuard::new(&self.store);

        async move {
            app_log!(info, "Parsing {} ({})", file.file_name, file.format);

            let parsed = self
                .service
                .parse(&file)
                .await
                .map_err(|failure| remote_error(operation, failure))?;

            let text = parsed.text;
            app_log!(info, "Extracted {} characters of resume text", text.len());
            guard.commit(|state| state.apply_parsed(text.clone()));
            Ok(text)
        }
        .instrument(operation_span(operation))
        .await
    }

    pub async fn score_against_job(&self) -> Result<AtsResult, WorkflowError> {
        let operation = Operation::Score;
        let (request, provenance) = self.store.begin(operation, |state| {
            state.require_analysis_inputs()?;
            let request = ScoreRequest {
                job_description: state.job_description.clone(),
                resume_text: state.resume.text.clone(),
                llm_model: state.config.model.clone(),
            };
            Ok((request, state.current_provenance(None)))
        })?;
        let guard = BusyGuard::new(&self.store);

        async move {
            app_log!(info, "Scoring resume with model {}", request.llm_model);

            let result = self
                .service
                .score(&request)
                .await
                .map_err(|failure| remote_error(operation, failure))?;

            app_log!(
                info,
                "ATS score {} (keyword match {}), {} matched, {} missing",
                result.ats_score,
                result.keyword_match_score,
                result.matches.len(),
                result.missing.len()
            );
            guard.commit(|state| state.apply_ats(result.clone(), provenance));
            Ok(result)
        }
        .instrument(operation_span(operation))
        .await
    }

    /// Strict mode is forwarded as-is; the service decides what it means.
    pub async fn tailor_for_job(&self) -> Result<TailoredResult, WorkflowError> {
        let operation = Operation::Tailor;
        let (request, provenance) = self.store.begin(operation, |state| {
            state.require_analysis_inputs()?;
            let strict_mode = state.config.strict_mode;
            let request = TailorRequest {
                job_description: state.job_description.clone(),
                resume_text: state.resume.text.clone(),
                llm_model: state.config.model.clone(),
                strict_mode,
            };
            Ok((request, state.current_provenance(Some(strict_mode))))
        })?;
        let guard = BusyGuard::new(&self.store);

        async move {
            app_log!(
                info,
                "Tailoring resume with model {} (strict: {})",
                request.llm_model,
                request.strict_mode
            );

            let result = self
                .service
                .tailor(&request)
                .await
                .map_err(|failure| remote_error(operation, failure))?;

            app_log!(
                info,
                "Tailored resume: {} characters, {} changes",
                result.markdown.len(),
                result.change_log.len()
            );
            guard.commit(|state| state.apply_tailored(result.clone(), provenance));
            Ok(result)
        }
        .instrument(operation_span(operation))
        .await
    }

    /// Render the current tailored markdown into a document. The store only
    /// changes status; saving the artifact is up to the caller.
    pub async fn download_tailored(&self) -> Result<DocumentArtifact, WorkflowError> {
        let operation = Operation::Download;
        let (tailored, current) = self.store.begin(operation, |state| {
            let tailored = state.require_tailored()?;
            state.require_model()?;
            Ok((tailored, state.is_tailored_current()))
        })?;
        let guard = BusyGuard::new(&self.store);

        async move {
            if !current {
                app_log!(warn, "Rendering a tailored resume whose inputs have since changed");
            }

            let request = RenderRequest {
                markdown: tailored.markdown,
            };
            let artifact = self
                .service
                .render_document(&request)
                .await
                .map_err(|failure| remote_error(operation, failure))?;

            guard.commit(|_| {});
            Ok(artifact)
        }
        .instrument(operation_span(operation))
        .await
    }
}

fn operation_span(operation: Operation) -> tracing::Span {
    let run_id = Uuid::new_v4();
    app_span!("workflow", operation = %operation, run_id = %run_id)
}

fn remote_error(operation: Operation, failure: ServiceFailure) -> WorkflowError {
    app_log!(error, "{} failed: {}", operation, failure);
    WorkflowError::Remote { operation, failure }
}
