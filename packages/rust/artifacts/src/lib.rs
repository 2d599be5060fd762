//! Markdown document generators for the share kit.
//!
//! Three independent, pure generators:
//! - [`readme_snippet`]: header, badges, stats table, links, quick start
//! - [`release_notes`]: commits grouped by conventional-commit type
//! - [`press_kit`]: one-page overview for press and directories
//!
//! Every generator takes the same [`StyleOptions`](repocard_shared::StyleOptions)
//! value and appends the attribution block iff its flag is set. All
//! repository-supplied text goes through `repocard_markdown` neutralization,
//! and every document is finished by the markdown cleanup pipeline.

mod press_kit;
mod readme;
mod release_notes;

pub use press_kit::press_kit;
pub use readme::readme_snippet;
pub use release_notes::{NO_CHANGES_PLACEHOLDER, UNRELEASED_LABEL, release_notes};

use repocard_shared::{ATTRIBUTION_TEXT, RepositoryMetadata, StyleOptions};

/// Shown in documents when a field has no value.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Shown when the repository has no description.
pub const FALLBACK_DESCRIPTION: &str = "No description provided";

/// The exact attribution block appended to a document.
pub fn attribution_block() -> String {
    format!("\n---\n\n<sub>{ATTRIBUTION_TEXT}</sub>\n")
}

fn append_attribution(doc: &mut String, style: &StyleOptions) {
    if style.include_attribution {
        doc.push_str(&attribution_block());
    }
}

fn description(meta: &RepositoryMetadata) -> String {
    meta.description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(repocard_markdown::escape_inline)
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string())
}

fn language(meta: &RepositoryMetadata) -> String {
    non_empty(meta.language.as_deref())
}

fn license_name(meta: &RepositoryMetadata) -> String {
    non_empty(meta.license.as_ref().map(|l| l.name.as_str()))
}

fn non_empty(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(repocard_markdown::escape_inline)
        .unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

/// `git clone` + `cd` lines for a quick-start code block.
fn clone_commands(meta: &RepositoryMetadata) -> String {
    format!(
        "git clone {}.git\ncd {}",
        repocard_markdown::single_line(meta.url.trim_end_matches('/')),
        repocard_markdown::single_line(&meta.name),
    )
}


#[cfg(test)]
mod tests {
    use super::test_support::{commit, sample_metadata};
    use super::*;

    fn all_documents(style: &StyleOptions) -> Vec<String> {
        let meta = sample_metadata();
        let commits = vec![commit("abcdef0123", "feat: add cards", "2024-06-02T00:00:00Z")];
        vec![
            readme_snippet(&meta, style),
            release_notes(&meta, &commits, style, None),
            press_kit(&meta, style),
        ]
    }

    #[test]
    fn attribution_present_iff_flag_set() {
        let on = StyleOptions::default();
        for doc in all_documents(&on) {
            assert!(doc.ends_with(&format!("<sub>{ATTRIBUTION_TEXT}</sub>\n")));
            assert_eq!(doc.matches(ATTRIBUTION_TEXT).count(), 1);
        }

        let off = StyleOptions {
            include_attribution: false,
            ..StyleOptions::default()
        };
        for doc in all_documents(&off) {
            assert!(!doc.contains(ATTRIBUTION_TEXT));
            assert!(!doc.contains("<sub>"));
        }
    }

    #[test]
    fn documents_end_with_single_newline() {
        for doc in all_documents(&StyleOptions::default()) {
            assert!(doc.ends_with('\n'));
            assert!(!doc.ends_with("\n\n"));
            assert!(!doc.contains("\n\n\n\n"));
        }
    }

    #[test]
    fn template_choice_does_not_change_documents() {
        let modern = all_documents(&StyleOptions::default());
        let minimal = all_documents(
            &StyleOptions::default().with_template(repocard_shared::TemplateId::Minimal),
        );
        assert_eq!(modern, minimal);
    }

    #[test]
    fn missing_fields_fall_back() {
        let mut meta = sample_metadata();
        meta.description = Some("  ".into());
        meta.language = None;
        meta.license = None;
        assert_eq!(description(&meta), FALLBACK_DESCRIPTION);
        assert_eq!(language(&meta), NOT_SPECIFIED);
        assert_eq!(license_name(&meta), NOT_SPECIFIED);
    }
}
