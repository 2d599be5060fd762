//! README snippet generator.

use repocard_markdown::{code_block, escape_inline, finish, link, link_target};
use repocard_shared::{RepositoryMetadata, StyleOptions, format_count};
use tracing::instrument;

use crate::{append_attribution, clone_commands, description, language, license_name};

/// Render a ready-to-paste README section.
#[instrument(skip_all, fields(repo = %meta.full_name))]
pub fn readme_snippet(meta: &RepositoryMetadata, style: &StyleOptions) -> String {
    let mut doc = String::with_capacity(1024);

    doc.push_str(&format!("# {}\n\n", escape_inline(&meta.name)));
    doc.push_str(&format!("{}\n\n", description(meta)));

    doc.push_str(&format!(
        "[![Stars]({})]({})\n",
        link_target(&format!(
            "https://img.shields.io/github/stars/{}?style=social",
            meta.full_name
        )),
        link_target(&meta.url),
    ));
    doc.push_str(&format!(
        "[![Forks]({})]({})\n",
        link_target(&format!(
            "https://img.shields.io/github/forks/{}?style=social",
            meta.full_name
        )),
        link_target(&format!("{}/fork", meta.url.trim_end_matches('/'))),
    ));
    if let Some(license) = &meta.license {
        doc.push_str(&format!(
            "![License]({})\n",
            link_target(&format!(
                "https://img.shields.io/badge/license-{}-blue.svg",
                shields_escape(license.badge_id())
            )),
        ));
    }

    doc.push_str("\n## 📊 Stats\n\n");
    doc.push_str("| Metric | Count |\n");
    doc.push_str("|--------|-------|\n");
    doc.push_str(&format!("| ⭐ Stars | {} |\n", format_count(meta.stars)));
    doc.push_str(&format!("| 🍴 Forks | {} |\n", format_count(meta.forks)));
    doc.push_str(&format!("| 👀 Watchers | {} |\n", format_count(meta.watchers)));
    doc.push_str(&format!("| 🔓 Issues | {} |\n", format_count(meta.open_issues)));

    doc.push_str("\n## 🔗 Links\n\n");
    doc.push_str(&format!("- **Repository**: {}\n", link(&meta.full_name, &meta.url)));
    doc.push_str(&format!("- **Language**: {}\n", language(meta)));
    doc.push_str(&format!("- **License**: {}\n", license_name(meta)));

    doc.push_str("\n## 🚀 Quick Start\n\n");
    doc.push_str(&code_block("bash", &clone_commands(meta)));

    append_attribution(&mut doc, style);
    finish(&doc)
}

/// Escape a value for a shields.io static badge path segment.
fn shields_escape(value: &str) -> String {
    value
        .trim()
        .replace('-', "--")
        .replace('_', "__")
        .replace(' ', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_metadata;

    #[test]
    fn has_header_badges_and_sections() {
        let md = readme_snippet(&sample_metadata(), &StyleOptions::default());
        assert!(md.starts_with("# test-repo\n\nA test repository\n"));
        assert!(md.contains(
            "[![Stars](https://img.shields.io/github/stars/owner/test-repo?style=social)](https://github.com/owner/test-repo)"
        ));
        assert!(md.contains("https://img.shields.io/github/forks/owner/test-repo?style=social"));
        assert!(md.contains("![License](https://img.shields.io/badge/license-MIT-blue.svg)"));
        assert!(md.contains("## 📊 Stats"));
        assert!(md.contains("| ⭐ Stars | 1.2K |"));
        assert!(md.contains("| 🍴 Forks | 56 |"));
        assert!(md.contains("## 🔗 Links"));
        assert!(md.contains("- **Repository**: [owner/test-repo](https://github.com/owner/test-repo)"));
        assert!(md.contains("- **Language**: Rust"));
        assert!(md.contains("- **License**: MIT License"));
        assert!(md.contains("```bash\ngit clone https://github.com/owner/test-repo.git\ncd test-repo\n```"));
    }

    #[test]
    fn no_license_badge_without_license() {
        let mut meta = sample_metadata();
        meta.license = None;
        let md = readme_snippet(&meta, &StyleOptions::default());
        assert!(!md.contains("![License]"));
        assert!(md.contains("- **License**: Not specified"));
    }

    #[test]
    fn hostile_description_cannot_break_structure() {
        let mut meta = sample_metadata();
        meta.description = Some("# Owned\n\n| a | b |\n<img src=x>".into());
        let md = readme_snippet(&meta, &StyleOptions::default());
        assert!(md.contains("\\# Owned \\| a \\| b \\| \\<img src=x\\>"));
        assert!(!md.lines().any(|l| l == "# Owned"));
    }

    #[test]
    fn shields_escape_doubles_separators() {
        assert_eq!(shields_escape("Apache-2.0"), "Apache--2.0");
        assert_eq!(shields_escape("BSD_3"), "BSD__3");
        assert_eq!(shields_escape("My License"), "My%20License");
    }
}
