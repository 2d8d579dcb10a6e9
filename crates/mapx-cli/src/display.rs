//! Terminal rendering of location status, answers, and sources.

use std::sync::LazyLock;

use mapx_core::{render, LocationState, LocationStatus, QueryState, RowKind, SourceRow};
use regex::Regex;

pub(crate) const LOADING_MESSAGE: &str = "Searching with Google Maps...";

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const RESET: &str = "\x1b[0m";

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,3} (.*)$").expect("valid regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*\n]+?)\*").expect("valid regex"));
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[-*] (.*)$").expect("valid regex"));

/// Light terminal formatting for the few markdown forms the model tends to
/// emit. With `styled == false` the markers are stripped instead.
pub(crate) fn format_answer(markdown: &str, styled: bool) -> String {
    let (bold, italic, reset) = if styled {
        (BOLD, ITALIC, RESET)
    } else {
        ("", "", "")
    };

    let text = LIST_ITEM_RE.replace_all(markdown, "  • ${1}");
    let text = HEADING_RE.replace_all(&text, format!("{bold}${{1}}{reset}").as_str());
    let text = BOLD_RE.replace_all(&text, format!("{bold}${{1}}{reset}").as_str());
    let text = ITALIC_RE.replace_all(&text, format!("{italic}${{1}}{reset}").as_str());
    text.into_owned()
}

pub(crate) fn format_sources(rows: &[SourceRow]) -> String {
    let mut out = String::from("Sources:\n");
    for row in rows {
        let indent = match row.kind {
            RowKind::Place | RowKind::Web => "  - ",
            RowKind::Review => "      ",
        };
        out.push_str(&format!("{indent}{} <{}>\n", row.label, row.link));
    }
    out
}

/// Everything the display region shows for the current query state.
pub(crate) fn format_outcome(state: &QueryState, styled: bool) -> String {
    let mut out = String::new();

    if let Some(message) = state.error_message() {
        out.push_str(&format!("Error: {message}\n"));
    }

    if let Some(result) = state.result() {
        if !result.text.is_empty() {
            out.push_str("Gemini's Response:\n");
            out.push_str(&format_answer(&result.text, styled));
            out.push('\n');
        }
        let rows = render(&result.citations);
        if !rows.is_empty() {
            out.push('\n');
            out.push_str(&format_sources(&rows));
        }
    }

    out
}

/// Lines to show when the location status moves past `last_shown`.
pub(crate) fn location_update(state: &LocationState, last_shown: LocationStatus) -> Vec<String> {
    if state.status() == last_shown {
        return Vec::new();
    }
    let mut lines: Vec<String> = state
        .status()
        .banner()
        .map(str::to_string)
        .into_iter()
        .collect();
    if let Some(message) = state.message() {
        lines.push(message.to_string());
    }
    lines
}
