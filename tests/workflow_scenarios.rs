mod common;

use common::{Canned, TestServer, DOCX_CONTENT_TYPE};
use resume_tailor::{
    AtsResult, MissingInput, Operation, ResumeFile, ServiceClient, ServiceFailure, SessionStore,
    WorkflowController, WorkflowError, WorkflowStatus,
};
use serde_json::json;
use std::sync::Arc;

fn controller(server: &TestServer) -> WorkflowController<ServiceClient> {
    let store = Arc::new(SessionStore::default());
    let client = ServiceClient::new(&server.base_url).unwrap();
    WorkflowController::new(store, client)
}

fn tailor_reply(markdown: &str) -> Canned {
    Canned::json(json!({
        "tailored_resume_markdown": markdown,
        "change_log": [
            { "section": "Summary", "change": "Rewrote summary", "reason": "Match the role" }
        ],
        "missing_skills_recommended_to_learn": ["kubernetes"]
    }))
}

#[tokio::test]
async fn parse_commits_extracted_text() {
    let server = TestServer::start().await;
    server.reply(
        "/parse_resume",
        Canned::json(json!({ "resume_text": "John Doe, Engineer" })),
    );
    let controller = controller(&server);
    controller
        .store()
        .select_file(ResumeFile::new("john.pdf", b"%PDF-1.7".to_vec()).unwrap());

    controller.parse_resume().await.unwrap();

    let state = controller.store().snapshot();
    assert_eq!(state.resume.text, "John Doe, Engineer");
    assert_eq!(state.status, WorkflowStatus::Idle);
}

#[tokio::test]
async fn score_result_matches_service_exactly() {
    let server = TestServer::start().await;
    server.reply(
        "/ats_score",
        Canned::json(json!({
            "ats_score": 72,
            "keyword_match_score": 65,
            "matches": ["python"],
            "missing": ["kubernetes"]
        })),
    );
    let controller = controller(&server);
    controller.store().set_resume_text("John Doe, Engineer. Python.");
    controller.store().set_job_description("Python and Kubernetes");

    controller.score_against_job().await.unwrap();

    let state = controller.store().snapshot();
    assert_eq!(
        state.ats_result(),
        Some(&AtsResult {
            ats_score: 72.0,
            keyword_match_score: 65.0,
            matches: vec!["python".to_string()],
            missing: vec!["kubernetes".to_string()],
            extracted_job_keywords: vec![],
        })
    );
    assert!(state.is_ats_current());
}

#[tokio::test]
async fn sequential_tailoring_keeps_only_latest() {
    let server = TestServer::start().await;
    server.reply("/tailor_resume", tailor_reply("# John Doe\nBackend"));
    server.reply("/tailor_resume", tailor_reply("# John Doe\nData"));
    let controller = controller(&server);
    controller.store().set_resume_text("John Doe, Engineer");

    controller.store().set_job_description("Backend engineer");
    controller.tailor_for_job().await.unwrap();
    controller.store().set_job_description("Data engineer");
    controller.tailor_for_job().await.unwrap();

    let state = controller.store().snapshot();
    let tailored = state.tailored_result().unwrap();
    assert_eq!(tailored.markdown, "# John Doe\nData");
    assert!(state.is_tailored_current());

    let requests = server.requests_to("/tailor_resume");
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[1].json()["job_description"], "Data engineer");
    assert_eq!(requests[1].json()["strict_mode"], true);
}

#[tokio::test]
async fn download_without_tailored_result_makes_no_call() {
    let server = TestServer::start().await;
    let controller = controller(&server);
    controller.store().set_resume_text("John Doe, Engineer");
    controller.store().set_job_description("Backend engineer");

    let err = controller.download_tailored().await.unwrap_err();

    assert_eq!(err, WorkflowError::Precondition(MissingInput::TailoredResult));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn blank_inputs_make_no_call() {
    let server = TestServer::start().await;
    let controller = controller(&server);
    controller.store().set_job_description("Backend engineer");

    assert_eq!(
        controller.score_against_job().await.unwrap_err(),
        WorkflowError::Precondition(MissingInput::ResumeText)
    );
    assert_eq!(
        controller.tailor_for_job().await.unwrap_err(),
        WorkflowError::Precondition(MissingInput::ResumeText)
    );
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn full_run_then_reparse_invalidates() {
    let server = TestServer::start().await;
    server.reply(
        "/parse_resume",
        Canned::json(json!({ "resume_text": "John Doe, Engineer" })),
    );
    server.reply(
        "/ats_score",
        Canned::json(json!({
            "ats_score": 58, "keyword_match_score": 40,
            "matches": [], "missing": ["rust"]
        })),
    );
    server.reply("/tailor_resume", tailor_reply("# John Doe"));
    server.reply(
        "/download_resume",
        Canned::raw(200, DOCX_CONTENT_TYPE, b"PK\x03\x04"),
    );
    server.reply(
        "/parse_resume",
        Canned::json(json!({ "resume_text": "John Doe, Senior Engineer" })),
    );
    let controller = controller(&server);
    controller
        .store()
        .select_file(ResumeFile::new("john.pdf", b"%PDF".to_vec()).unwrap());
    controller.store().set_job_description("Rust engineer");

    controller.parse_resume().await.unwrap();
    controller.score_against_job().await.unwrap();
    controller.tailor_for_job().await.unwrap();
    let artifact = controller.download_tailored().await.unwrap();
    assert_eq!(artifact.file_name, "tailored_resume.docx");
    assert_eq!(artifact.bytes, b"PK\x03\x04");

    let state = controller.store().snapshot();
    assert!(state.ats.is_some());
    assert!(state.tailored.is_some());

    controller.parse_resume().await.unwrap();

    let state = controller.store().snapshot();
    assert_eq!(state.resume.text, "John Doe, Senior Engineer");
    assert!(state.ats.is_none());
    assert!(state.tailored.is_none());
}

#[tokio::test]
async fn remote_failure_keeps_previous_result() {
    let server = TestServer::start().await;
    server.reply(
        "/ats_score",
        Canned::json(json!({
            "ats_score": 72, "keyword_match_score": 65,
            "matches": ["python"], "missing": []
        })),
    );
    server.reply(
        "/ats_score",
        Canned::with_status(500, json!({ "detail": "GEMINI_API_KEY is missing" })),
    );
    let controller = controller(&server);
    controller.store().set_resume_text("John Doe, Python");
    controller.store().set_job_description("Python engineer");

    controller.score_against_job().await.unwrap();
    let before = controller.store().snapshot();

    let err = controller.score_against_job().await.unwrap_err();

    match err {
        WorkflowError::Remote {
            operation: Operation::Score,
            failure: ServiceFailure::Score(msg),
        } => assert!(msg.contains("GEMINI_API_KEY")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(controller.store().snapshot(), before);
    assert_eq!(controller.store().status(), WorkflowStatus::Idle);
}
