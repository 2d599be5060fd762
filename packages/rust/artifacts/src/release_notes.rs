//! Release notes draft generator.
//!
//! Commits arrive most-recent-first and stay in that order inside each
//! group. The release date comes from the newest commit (or the last push
//! when there are no commits) so the draft is reproducible.

use repocard_markdown::{code_block, code_span, escape_inline, finish, link, single_line};
use repocard_shared::{CommitRecord, RepositoryMetadata, StyleOptions, format_date};
use tracing::{debug, instrument};

use crate::{append_attribution, clone_commands};

/// Version label used when none is supplied.
pub const UNRELEASED_LABEL: &str = "Unreleased";

/// Body of the change section when there are no commits.
pub const NO_CHANGES_PLACEHOLDER: &str = "_No recent changes._";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ChangeKind {
    Feature,
    Fix,
    Docs,
    Maintenance,
    Other,
}

impl ChangeKind {
    const ORDER: [ChangeKind; 5] = [
        Self::Feature,
        Self::Fix,
        Self::Docs,
        Self::Maintenance,
        Self::Other,
    ];

    fn heading(self) -> &'static str {
        match self {
            Self::Feature => "### ✨ Features",
            Self::Fix => "### 🐛 Bug Fixes",
            Self::Docs => "### 📚 Documentation",
            Self::Maintenance => "### 🔧 Maintenance",
            Self::Other => "### 📝 Other Changes",
        }
    }

    /// Classify by the leading word of the subject (`feat(x)!:` → `feat`).
    fn classify(message: &str) -> Self {
        let kind: String = message
            .trim_start()
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();

        if kind.starts_with("feat") {
            Self::Feature
        } else if kind.starts_with("fix") || kind.starts_with("bug") || kind == "hotfix" {
            Self::Fix
        } else if kind.starts_with("doc") {
            Self::Docs
        } else if matches!(kind.as_str(), "chore" | "ci" | "build") {
            Self::Maintenance
        } else {
            Self::Other
        }
    }
}

/// Render a release notes draft from recent commits.
///
/// `version` replaces the [`UNRELEASED_LABEL`] placeholder when given.
#[instrument(skip_all, fields(repo = %meta.full_name, commits = commits.len()))]
pub fn release_notes(
    meta: &RepositoryMetadata,
    commits: &[CommitRecord],
    style: &StyleOptions,
    version: Option<&str>,
) -> String {
    let version = version.map(str::trim).filter(|v| !v.is_empty());
    let label = version.map_or_else(|| UNRELEASED_LABEL.to_string(), escape_inline);
    let released = commits
        .first()
        .map_or_else(|| format_date(&meta.pushed_at), |c| format_date(&c.date));

    let mut doc = String::with_capacity(512 + commits.len() * 96);
    doc.push_str(&format!("# {} {label}\n\n", escape_inline(&meta.name)));
    doc.push_str(&format!("**Release Date**: {}\n\n", escape_inline(&released)));
    doc.push_str("## What's Changed\n\n");

    if commits.is_empty() {
        doc.push_str(NO_CHANGES_PLACEHOLDER);
        doc.push_str("\n\n");
    } else {
        for kind in ChangeKind::ORDER {
            let group: Vec<&CommitRecord> = commits
                .iter()
                .filter(|c| ChangeKind::classify(&c.message) == kind)
                .collect();
            if group.is_empty() {
                continue;
            }
            debug!(?kind, count = group.len(), "release notes group");

            doc.push_str(kind.heading());
            doc.push_str("\n\n");
            for commit in group {
                doc.push_str(&bullet(commit));
            }
            doc.push('\n');
        }
    }

    let mut install = clone_commands(meta);
    if let Some(version) = version {
        install.push_str(&format!("\ngit checkout {}", single_line(version)));
    }
    doc.push_str("## 📦 Installation\n\n");
    doc.push_str(&code_block("bash", &install));

    let base = meta.url.trim_end_matches('/');
    let changelog = format!("{base}/commits/{}", meta.default_branch);
    doc.push_str("\n## 🔗 Links\n\n");
    doc.push_str(&format!("- **Full Changelog**: {}\n", link(&changelog, &changelog)));
    doc.push_str(&format!("- **Repository**: {}\n", link(base, base)));

    append_attribution(&mut doc, style);
    finish(&doc)
}

fn bullet(commit: &CommitRecord) -> String {
    let subject = escape_inline(commit.message.lines().next().unwrap_or_default());
    let hash = code_span(commit.short_sha());
    let author = commit.author_name.trim();

    if author.is_empty() {
        format!("- {subject} ({hash})\n")
    } else {
        format!("- {subject} ({hash}) — {}\n", escape_inline(author))
    }
}
