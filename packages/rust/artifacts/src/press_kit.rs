//! Press kit overview generator.

use repocard_markdown::{code_span, escape_inline, finish, link};
use repocard_shared::{RepositoryMetadata, StyleOptions, format_count, format_date_long};
use tracing::instrument;

use crate::{append_attribution, description, language, license_name};

/// Shown in the topics section when the repository has none.
const NO_TOPICS: &str = "No topics specified";

/// Render the one-page press kit overview.
#[instrument(skip_all, fields(repo = %meta.full_name))]
pub fn press_kit(meta: &RepositoryMetadata, style: &StyleOptions) -> String {
    let name = escape_inline(&meta.name);
    let description = description(meta);
    let language = language(meta);
    let license = license_name(meta);
    let updated = escape_inline(&format_date_long(&meta.updated_at));

    let mut doc = String::with_capacity(2048);

    doc.push_str(&format!("# {name} — Press Kit\n\n"));

    doc.push_str("## Overview\n\n");
    doc.push_str(&format!("**{name}**: {description}\n\n"));

    doc.push_str("## Quick Facts\n\n");
    doc.push_str("| | |\n|---|---|\n");
    doc.push_str(&format!("| **Name** | {name} |\n"));
    doc.push_str(&format!(
        "| **Author** | {} |\n",
        link(&meta.owner.login, &meta.owner.url)
    ));
    doc.push_str(&format!(
        "| **Repository** | {} |\n",
        link(&meta.full_name, &meta.url)
    ));
    doc.push_str(&format!("| **Language** | {language} |\n"));
    doc.push_str(&format!("| **License** | {license} |\n"));
    doc.push_str(&format!("| **Stars** | {} |\n", format_count(meta.stars)));
    doc.push_str(&format!("| **Forks** | {} |\n", format_count(meta.forks)));
    doc.push_str(&format!(
        "| **Created** | {} |\n\n",
        escape_inline(&format_date_long(&meta.created_at))
    ));

    doc.push_str("## Description\n\n");
    doc.push_str(&format!("{description}\n\n"));

    doc.push_str("## Key Features\n\n");
    doc.push_str(&format!("- Primary language: **{language}**\n"));
    doc.push_str(&format!(
        "- Active development with **{}** open issues\n",
        format_count(meta.open_issues)
    ));
    doc.push_str(&format!("- Last updated: **{updated}**\n\n"));

    doc.push_str("## Topics / Tags\n\n");
    if meta.topics.is_empty() {
        doc.push_str(NO_TOPICS);
    } else {
        let tags: Vec<String> = meta.topics.iter().map(|t| code_span(t)).collect();
        doc.push_str(&tags.join(", "));
    }
    doc.push_str("\n\n");

    doc.push_str("## Assets\n\n");
    doc.push_str("The following assets are included in this press kit:\n\n");
    doc.push_str("- `repo-card.svg`: vector social card (editable)\n");
    doc.push_str("- `repo-card.png`: raster social card, 1200×630 (when generated)\n");
    doc.push_str("- `README-snippet.md`: ready-to-use README section\n");
    doc.push_str("- `release-notes-draft.md`: release notes template\n\n");

    doc.push_str("## Screenshots\n\n");
    doc.push_str("Place screenshots in the `screenshots/` folder.\n\n");

    doc.push_str("## Contact\n\n");
    doc.push_str(&format!("- **Repository**: {}\n", link(&meta.url, &meta.url)));
    doc.push_str(&format!(
        "- **Owner**: {}\n\n",
        link(&meta.owner.url, &meta.owner.url)
    ));

    doc.push_str("## License\n\n");
    if meta.license.is_some() {
        doc.push_str(&format!("This project is licensed under **{license}**.\n"));
    } else {
        doc.push_str("No license has been specified for this project.\n");
    }

    append_attribution(&mut doc, style);
    finish(&doc)
}
