// src/core/session.rs
//! Session state store.
//!
//! The store owns every piece of session state. The presentation layer reads
//! snapshots (or subscribes to them) and edits its own inputs directly; remote
//! results only ever arrive through the crate-private commit entry points used
//! by the workflow controller. Each write is one `watch` update, so observers
//! never see a half-applied commit.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::core::error::{MissingInput, Operation, WorkflowError};
use crate::types::{AtsResult, ResumeFile, TailoredResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowStatus {
    #[default]
    Idle,
    Busy(Operation),
}

impl WorkflowStatus {
    pub fn is_busy(self) -> bool {
        matches!(self, Self::Busy(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub model: String,
    pub strict_mode: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            strict_mode: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeSource {
    pub file: Option<ResumeFile>,
    pub text: String,
}

/// Inputs a result was computed from. `strict_mode` is only recorded for
/// tailoring, the one operation it affects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultProvenance {
    pub resume_text: String,
    pub job_description: String,
    pub model: String,
    pub strict_mode: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Committed<T> {
    pub value: T,
    pub provenance: ResultProvenance,
    pub committed_at: DateTime<Utc>,
}

impl<T> Committed<T> {
    fn new(value: T, provenance: ResultProvenance) -> Self {
        Self {
            value,
            provenance,
            committed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub resume: ResumeSource,
    pub job_description: String,
    pub config: AnalysisConfig,
    pub ats: Option<Committed<AtsResult>>,
    pub tailored: Option<Committed<TailoredResult>>,
    pub status: WorkflowStatus,
}

impl SessionState {
    pub fn ats_result(&self) -> Option<&AtsResult> {
        self.ats.as_ref().map(|c| &c.value)
    }

    pub fn tailored_result(&self) -> Option<&TailoredResult> {
        self.tailored.as_ref().map(|c| &c.value)
    }

    /// The provenance a result would get if computed from the current inputs.
    pub fn current_provenance(&self, strict_mode: Option<bool>) -> ResultProvenance {
        ResultProvenance {
            resume_text: self.resume.text.clone(),
            job_description: self.job_description.clone(),
            model: self.config.model.clone(),
            strict_mode,
        }
    }

    /// False once the resume text, job description or model changed since scoring.
    pub fn is_ats_current(&self) -> bool {
        self.ats
            .as_ref()
            .is_some_and(|c| c.provenance == self.current_provenance(None))
    }

    pub fn is_tailored_current(&self) -> bool {
        self.tailored.as_ref().is_some_and(|c| {
            c.provenance == self.current_provenance(Some(self.config.strict_mode))
        })
    }

    pub(crate) fn require_resume_file(&self) -> Result<ResumeFile, MissingInput> {
        self.resume.file.clone().ok_or(MissingInput::ResumeFile)
    }

    /// Every remote call needs a non-blank model, whether or not it sends one.
    pub(crate) fn require_model(&self) -> Result<(), MissingInput> {
        if self.config.model.trim().is_empty() {
            return Err(MissingInput::Model);
        }
        Ok(())
    }

    /// Resume text, job description and model, all non-blank.
    pub(crate) fn require_analysis_inputs(&self) -> Result<(), MissingInput> {
        if self.resume.text.trim().is_empty() {
            return Err(MissingInput::ResumeText);
        }
        if self.job_description.trim().is_empty() {
            return Err(MissingInput::JobDescription);
        }
        self.require_model()
    }

    pub(crate) fn require_tailored(&self) -> Result<TailoredResult, MissingInput> {
        self.tailored_result()
            .cloned()
            .ok_or(MissingInput::TailoredResult)
    }
}

pub struct SessionStore {
    tx: watch::Sender<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl SessionStore {
    pub fn new(config: AnalysisConfig) -> Self {
        let (tx, _rx) = watch::channel(SessionState {
            config,
            ..SessionState::default()
        });
        Self { tx }
    }

    /// Copy of the most recently committed state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.tx.borrow().status
    }

    /// Observe every committed change. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }

    // ---- presentation edit entry points ----

    /// Replace the selected file. Extracted text is untouched until the next parse.
    pub fn select_file(&self, file: ResumeFile) {
        app_log!(debug, "Selected resume file {:?}", file);
        self.tx.send_modify(|state| state.resume.file = Some(file));
    }

    pub fn set_resume_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.tx.send_modify(|state| state.resume.text = text);
    }

    pub fn set_job_description(&self, text: impl Into<String>) {
        let text = text.into();
        self.tx.send_modify(|state| state.job_description = text);
    }

    pub fn set_model(&self, model: impl Into<String>) {
        let model = model.into();
        self.tx.send_modify(|state| state.config.model = model);
    }

    pub fn set_strict_mode(&self, strict_mode: bool) {
        self.tx
            .send_modify(|state| state.config.strict_mode = strict_mode);
    }

    // ---- controller commit entry points ----

    /// Validate preconditions and flip to `Busy(operation)` in one update.
    ///
    /// `prepare` runs against the current state first; its error wins over a
    /// busy rejection. Nothing is written unless the transition happens.
    pub(crate) fn begin<T>(
        &self,
        operation: Operation,
        prepare: impl FnOnce(&SessionState) -> Result<T, MissingInput>,
    ) -> Result<T, WorkflowError> {
        let mut outcome = None;
        self.tx.send_if_modified(|state| {
            let result = prepare(state).map_err(WorkflowError::Precondition).and_then(|inputs| {
                match state.status {
                    WorkflowStatus::Busy(in_flight) => Err(WorkflowError::Busy {
                        requested: operation,
                        in_flight,
                    }),
                    WorkflowStatus::Idle => Ok(inputs),
                }
            });
            let started = result.is_ok();
            if started {
                state.status = WorkflowStatus::Busy(operation);
            }
            outcome = Some(result);
            started
        });

        match outcome {
            Some(result) => result,
            None => unreachable!("send_if_modified always runs its closure"),
        }
    }

    /// Back to `Idle` with no other change.
    pub(crate) fn finish(&self) {
        self.tx.send_modify(|state| state.status = WorkflowStatus::Idle);
    }

    /// Apply `commit` and return to `Idle` as a single update.
    pub(crate) fn commit(&self, commit: impl FnOnce(&mut SessionState)) {
        self.tx.send_modify(|state| {
            commit(state);
            state.status = WorkflowStatus::Idle;
        });
    }
}

impl SessionState {
    /// New resume text invalidates every result computed from the old one.
    pub(crate) fn apply_parsed(&mut self, text: String) {
        self.resume.text = text;
        self.ats = None;
        self.tailored = None;
    }

    pub(crate) fn apply_ats(&mut self, value: AtsResult, provenance: ResultProvenance) {
        self.ats = Some(Committed::new(value, provenance));
    }

    pub(crate) fn apply_tailored(&mut self, value: TailoredResult, provenance: ResultProvenance) {
        self.tailored = Some(Committed::new(value, provenance));
    }
}
