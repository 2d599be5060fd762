//! Social-preview card renderer for RepoCard Studio.
//!
//! [`render_card`] turns a [`RepositoryMetadata`] snapshot and a
//! [`StyleOptions`] value into a self-contained SVG document on a fixed
//! 1200×630 canvas. Rendering is pure: no I/O, and the same inputs always
//! produce the same bytes.
//!
//! Templates:
//! - `modern`: two-tone background, topic pills (description budget 100)
//! - `minimal`: fixed light palette, ignores supplied colors, no pills,
//!   shows open issues (description budget 80)
//! - `gradient`: primary→secondary blend under the modern content layer,
//!   plus license and last-updated date (description budget 100)

mod gradient;
mod layout;
mod minimal;
mod modern;
mod palette;

use repocard_shared::{RepositoryMetadata, StyleOptions, TemplateId};
use tracing::{debug, instrument};

pub const CANVAS_WIDTH: u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 630;

/// Shown when the repository has no description.
pub const FALLBACK_DESCRIPTION: &str = "No description provided";

/// Shown when the repository has no primary language.
pub const FALLBACK_LANGUAGE: &str = "Unknown";

/// Shown when the repository has no license.
pub const FALLBACK_LICENSE: &str = "No license";

/// Description character budget for a template.
pub fn description_budget(template: TemplateId) -> usize {
    match template {
        TemplateId::Modern => modern::DESCRIPTION_BUDGET,
        TemplateId::Minimal => minimal::DESCRIPTION_BUDGET,
        TemplateId::Gradient => gradient::DESCRIPTION_BUDGET,
    }
}

/// Render the social card as an SVG document.
#[instrument(skip_all, fields(repo = %meta.full_name, template = %style.template))]
pub fn render_card(meta: &RepositoryMetadata, style: &StyleOptions) -> String {
    let svg = match style.template {
        TemplateId::Modern => modern::render(meta, style),
        TemplateId::Minimal => minimal::render(meta, style),
        TemplateId::Gradient => gradient::render(meta, style),
    };
    debug!(bytes = svg.len(), "card rendered");
    svg
}

#[cfg(test)]
pub(crate) mod test_support {
    use repocard_shared::{LicenseInfo, OwnerInfo, RepositoryMetadata};

    pub(crate) fn sample_metadata() -> RepositoryMetadata {
        RepositoryMetadata {
            name: "test-repo".into(),
            full_name: "owner/test-repo".into(),
            description: Some("A test repository".into()),
            url: "https://github.com/owner/test-repo".into(),
            stars: 1234,
            forks: 56,
            watchers: 100,
            open_issues: 10,
            language: Some("Rust".into()),
            topics: vec!["testing".into(), "rust".into()],
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-06-01T00:00:00Z".into(),
            pushed_at: "2024-06-01T00:00:00Z".into(),
            default_branch: "main".into(),
            license: Some(LicenseInfo {
                key: "mit".into(),
                name: "MIT License".into(),
                spdx_id: Some("MIT".into()),
            }),
            owner: OwnerInfo {
                login: "owner".into(),
                avatar_url: "https://github.com/owner.png".into(),
                url: "https://github.com/owner".into(),
            },
        }
    }

    /// A snapshot with every optional field empty.
    pub(crate) fn bare_metadata() -> RepositoryMetadata {
        RepositoryMetadata {
            description: None,
            language: None,
            topics: vec![],
            license: None,
            ..sample_metadata()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{bare_metadata, sample_metadata};
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;
    use repocard_shared::ATTRIBUTION_TEXT;

    /// Stream the document through an XML reader and check tag balance.
    fn assert_well_formed(svg: &str) {
        let mut reader = Reader::from_str(svg);
        let mut depth = 0i32;
        let mut saw_root = false;
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    if depth == 0 {
                        assert_eq!(e.name().as_ref(), b"svg");
                        saw_root = true;
                    }
                    depth += 1;
                }
                Ok(Event::End(_)) => depth -= 1,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("malformed SVG at {}: {e}", reader.buffer_position()),
            }
            assert!(depth >= 0, "unbalanced closing tag");
        }
        assert!(saw_root, "no <svg> root element");
        assert_eq!(depth, 0, "unclosed tags");
    }

    fn all_styles() -> Vec<StyleOptions> {
        TemplateId::ALL
            .iter()
            .map(|t| StyleOptions::default().with_template(*t))
            .collect()
    }

    #[test]
    fn every_template_uses_the_fixed_canvas() {
        for style in all_styles() {
            let svg = render_card(&sample_metadata(), &style);
            assert!(svg.starts_with("<svg "), "{}", style.template);
            assert!(svg.contains(r#"width="1200" height="630" viewBox="0 0 1200 630""#));
            assert_well_formed(&svg);
        }
    }

    #[test]
    fn missing_optional_fields_use_fallbacks() {
        for style in all_styles() {
            let svg = render_card(&bare_metadata(), &style);
            assert_well_formed(&svg);
            assert!(svg.contains(FALLBACK_DESCRIPTION), "{}", style.template);
            assert!(svg.contains(FALLBACK_LANGUAGE), "{}", style.template);
        }
        let svg = render_card(
            &bare_metadata(),
            &StyleOptions::default().with_template(TemplateId::Gradient),
        );
        assert!(svg.contains(FALLBACK_LICENSE));
    }

    #[test]
    fn minimal_never_contains_supplied_colors() {
        let style = StyleOptions::parse("minimal", "#ff00aa", "#00aaff", true).unwrap();
        let svg = render_card(&sample_metadata(), &style);
        assert!(!svg.to_ascii_lowercase().contains("#ff00aa"));
        assert!(!svg.to_ascii_lowercase().contains("#00aaff"));

        let modern = render_card(&sample_metadata(), &style.with_template(TemplateId::Modern));
        assert!(modern.contains("#ff00aa"));
    }

    #[test]
    fn minimal_ignores_colors_matching_its_own_palette() {
        // White matches the minimal background and #dea584 the Rust dot.
        let pairs = [
            ("#ffffff", "#dea584"),
            ("#111827", "#6e7681"),
            ("#f3f4f6", "#9ca3af"),
        ];
        for (primary, secondary) in pairs {
            let style = StyleOptions::parse("minimal", primary, secondary, true).unwrap();
            let svg = render_card(&sample_metadata(), &style).to_ascii_lowercase();
            assert!(!svg.contains(primary), "minimal contains {primary}");
            assert!(!svg.contains(secondary), "minimal contains {secondary}");
        }
    }

    #[test]
    fn hostile_text_is_escaped() {
        let mut meta = sample_metadata();
        meta.name = "<script>alert('x')</script>".into();
        meta.full_name = format!("owner/{}", meta.name);
        meta.description = Some("Tom & \"Jerry\" <b>".into());
        meta.language = Some("C<>".into());
        meta.topics = vec!["a&b".into(), "</g>".into()];
        meta.url = "https://example.com/?a=1&b=2".into();

        for style in all_styles() {
            let svg = render_card(&meta, &style);
            assert_well_formed(&svg);
            assert!(!svg.contains("<script>"));
            assert!(svg.contains("&lt;script&gt;alert(&apos;x&apos;)&lt;/script&gt;"));
            assert!(svg.contains("Tom &amp; &quot;Jerry&quot; &lt;b&gt;"));
            assert!(svg.contains("?a=1&amp;b=2"));
        }
    }

    #[test]
    fn descriptions_respect_template_budgets() {
        let mut meta = sample_metadata();
        meta.description = Some("d".repeat(150));

        for style in all_styles() {
            let svg = render_card(&meta, &style);
            let budget = description_budget(style.template);
            let expected = format!(">{}...<", "d".repeat(budget - 3));
            assert!(svg.contains(&expected), "{}", style.template);
            assert!(!svg.contains(&"d".repeat(budget - 2)));
        }
        assert_eq!(description_budget(TemplateId::Minimal), 80);
    }

    #[test]
    fn attribution_iff_flag() {
        for style in all_styles() {
            let on = render_card(&sample_metadata(), &style);
            assert_eq!(on.matches(ATTRIBUTION_TEXT).count(), 1, "{}", style.template);

            let off_style = StyleOptions {
                include_attribution: false,
                ..style
            };
            let off = render_card(&sample_metadata(), &off_style);
            assert!(!off.contains("RepoCard Studio"));
            assert_well_formed(&off);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        for style in all_styles() {
            let a = render_card(&sample_metadata(), &style);
            let b = render_card(&sample_metadata(), &style);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn footer_shows_repository_url() {
        for style in all_styles() {
            let svg = render_card(&sample_metadata(), &style);
            assert!(svg.contains(">https://github.com/owner/test-repo<"));
        }
    }
}
