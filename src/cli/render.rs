// src/cli/render.rs
//! Terminal rendering of session state.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::core::{Committed, SessionState, SessionStore, WorkflowStatus};

/// Matched and missing keyword lists are cut off after this many entries.
pub const KEYWORD_DISPLAY_LIMIT: usize = 30;

const COMMITTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";
const STALE_NOTE: &str = "(inputs changed since this was computed; run it again to refresh)";

/// `72.0` -> `72`, `65.5` -> `65.5`
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{:.0}", score)
    } else {
        format!("{}", score)
    }
}

pub fn status_line(status: WorkflowStatus) -> String {
    match status {
        WorkflowStatus::Idle => "Ready".to_string(),
        WorkflowStatus::Busy(op) => format!("Working: {}...", op.label()),
    }
}

fn keyword_list(lines: &mut Vec<String>, title: &str, items: &[String]) {
    lines.push(format!("{} ({})", title, items.len()));
    lines.extend(
        items
            .iter()
            .take(KEYWORD_DISPLAY_LIMIT)
            .map(|item| format!("  - {}", item)),
    );
    if items.len() > KEYWORD_DISPLAY_LIMIT {
        lines.push(format!("  ... {} more", items.len() - KEYWORD_DISPLAY_LIMIT));
    }
}

fn header<T>(lines: &mut Vec<String>, title: &str, committed: &Committed<T>, current: bool) {
    lines.push(format!("== {} ==", title));
    lines.push(format!(
        "Computed at {}",
        committed.committed_at.format(COMMITTED_AT_FORMAT)
    ));
    if !current {
        lines.push(STALE_NOTE.to_string());
    }
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn format_ats(state: &SessionState) -> Option<String> {
    let committed = state.ats.as_ref()?;
    let ats = &committed.value;
    let mut lines = Vec::new();

    header(&mut lines, "ATS Result", committed, state.is_ats_current());
    lines.push(format!("ATS Score: {}/100", format_score(ats.ats_score)));
    lines.push(format!(
        "Keyword Match: {}/100",
        format_score(ats.keyword_match_score)
    ));
    lines.push(String::new());
    keyword_list(&mut lines, "Matches", &ats.matches);
    keyword_list(&mut lines, "Missing", &ats.missing);

    Some(finish(lines))
}

pub fn format_tailored(state: &SessionState) -> Option<String> {
    let committed = state.tailored.as_ref()?;
    let tailored = &committed.value;
    let mut lines = Vec::new();

    header(&mut lines, "Tailored Resume", committed, state.is_tailored_current());
    lines.push(tailored.markdown.trim_end().to_string());

    lines.push(String::new());
    lines.push("== Change Log ==".to_string());
    for entry in &tailored.change_log {
        lines.push(format!("- {}: {}", entry.section, entry.change));
        if !entry.reason.is_empty() {
            lines.push(format!("    {}", entry.reason));
        }
    }

    lines.push(String::new());
    lines.push("== Missing skills recommended to learn ==".to_string());
    lines.extend(tailored.skills_to_learn.iter().map(|skill| format!("- {}", skill)));

    Some(finish(lines))
}

/// Print a line on every status transition until the store goes away.
pub fn spawn_status_reporter(store: &Arc<SessionStore>) -> JoinHandle<()> {
    let mut rx = store.subscribe();
    tokio::spawn(async move {
        let mut last = rx.borrow_and_update().status;
        while rx.changed().await.is_ok() {
            let status = rx.borrow_and_update().status;
            if status != last {
                if status.is_busy() {
                    eprintln!("⏳ {}", status_line(status));
                }
                last = status;
            }
        }
    })
}
