//! Markdown helpers for generated documents.
//!
//! Untrusted repository text (names, descriptions, commit subjects) is
//! neutralized before it is spliced into Markdown so it can never open a
//! heading, list, table cell, link, emphasis run, or raw HTML block. Finished
//! documents are passed through a cleanup pipeline that normalizes
//! whitespace.
//!
//! Strategy:
//! - inline text: backslash-escape `` \ ` * _ ~ [ ] < > | & ``, escape a leading
//!   block marker (`#`, `+`, `-`, `=`, `N.`/`N)`), flatten line breaks
//! - tags/topics: code spans with a fence longer than any inner backtick run
//! - link targets: percent-encode spaces, parentheses, and angle brackets

mod cleanup;

use std::sync::LazyLock;

use regex::Regex;

/// Characters that carry inline meaning anywhere in a Markdown line.
const INLINE_SPECIALS: &[char] = &['\\', '`', '*', '_', '~', '[', ']', '<', '>', '|', '&'];

/// Characters that start a block construct when they open a line.
const LEADING_SPECIALS: &[char] = &['#', '+', '-', '='];

/// Escape untrusted text for use inside a Markdown line.
///
/// The output renders as the original text (minus line breaks, which are
/// folded to single spaces) on any CommonMark/GFM renderer.
pub fn escape_inline(text: &str) -> String {
    static ORDERED_MARKER_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^(\d+)([.)])").expect("valid regex"));

    let flat = flatten_lines(text);
    let mut out = String::with_capacity(flat.len() + 8);

    for ch in flat.chars() {
        if INLINE_SPECIALS.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }

    if out.starts_with(LEADING_SPECIALS) {
        out.insert(0, '\\');
    }

    ORDERED_MARKER_RE.replace(&out, "$1\\$2").into_owned()
}

/// Wrap `text` in a code span, choosing a fence that cannot be closed early.
pub fn code_span(text: &str) -> String {
    let flat = flatten_lines(text);
    let longest_run = flat
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run + 1);

    if flat.starts_with('`') || flat.ends_with('`') {
        format!("{fence} {flat} {fence}")
    } else {
        format!("{fence}{flat}{fence}")
    }
}

/// Fenced code block whose fence is longer than any backtick run in `body`.
pub fn code_block(lang: &str, body: &str) -> String {
    let longest_run = body
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat((longest_run + 1).max(3));
    format!("{fence}{lang}\n{}\n{fence}\n", body.trim_end_matches('\n'))
}

/// Untrusted text flattened onto one line, otherwise unchanged.
pub fn single_line(text: &str) -> String {
    flatten_lines(text)
}

/// Make a URL safe to use as a Markdown link destination.
pub fn link_target(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for ch in url.trim().chars() {
        match ch {
            ' ' => out.push_str("%20"),
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '<' => out.push_str("%3C"),
            '>' => out.push_str("%3E"),
            other => out.push(other),
        }
    }
    out
}

/// Inline link with escaped label and sanitized destination.
pub fn link(label: &str, url: &str) -> String {
    format!("[{}]({})", escape_inline(label), link_target(url))
}

/// Run the cleanup pipeline over a finished document.
pub fn finish(md: &str) -> String {
    cleanup::run_pipeline(md)
}

/// Fold CR/LF runs (and the whitespace around them) into single spaces.
fn flatten_lines(text: &str) -> String {
    static LINE_BREAK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[ \t]*[\r\n]+[ \t]*").expect("valid regex"));

    LINE_BREAK_RE.replace_all(text.trim(), " ").into_owned()
}
