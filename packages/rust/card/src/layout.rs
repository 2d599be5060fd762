//! SVG fragments shared by the card templates.
//!
//! Every fragment takes already-resolved values and escapes untrusted text
//! itself, so templates only decide *where* things go and *which* colors
//! they use.

use repocard_shared::{ATTRIBUTION_TEXT, RepositoryMetadata, escape_markup, format_count, truncate_text};

use crate::palette::language_color;
use crate::{CANVAS_HEIGHT, CANVAS_WIDTH, FALLBACK_DESCRIPTION, FALLBACK_LANGUAGE};

pub(crate) const FONT: &str = "system-ui, -apple-system, sans-serif";

/// Maximum number of topic pills before the overflow indicator.
pub(crate) const MAX_TOPIC_PILLS: usize = 5;

/// Longest topic label drawn inside a pill. Five full-length pills plus the
/// overflow text stay inside the right margin.
const MAX_PILL_LABEL: usize = 18;

/// Left edge of the pill row.
const PILL_ROW_X: usize = 80;

/// Horizontal gap between pills.
const PILL_GAP: usize = 10;

/// Text colors and fills for the modern content layer.
pub(crate) struct Theme {
    pub heading: &'static str,
    pub muted: &'static str,
    pub body: &'static str,
    pub avatar: &'static str,
    pub pill_fill: &'static str,
    pub pill_text: &'static str,
    pub footer: &'static str,
}

pub(crate) fn open_svg(out: &mut String) {
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CANVAS_WIDTH}" height="{CANVAS_HEIGHT}" viewBox="0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}">"#
    ));
    out.push('\n');
}

pub(crate) fn close_svg(out: &mut String) {
    out.push_str("</svg>\n");
}

/// Description text, truncated before escaping so entities are never split.
pub(crate) fn description(meta: &RepositoryMetadata, budget: usize) -> String {
    let text = meta
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(FALLBACK_DESCRIPTION);
    escape_markup(&truncate_text(text, budget))
}

pub(crate) fn language(meta: &RepositoryMetadata) -> String {
    let name = meta
        .language
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .unwrap_or(FALLBACK_LANGUAGE);
    escape_markup(name)
}

/// Uppercased first character of the owner login, `?` if there is none.
pub(crate) fn owner_initial(meta: &RepositoryMetadata) -> String {
    let initial: String = meta
        .owner
        .login
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".into());
    escape_markup(&initial)
}

/// Avatar placeholder plus `owner / repo` headline, top-left.
pub(crate) fn header(out: &mut String, meta: &RepositoryMetadata, theme: &Theme) {
    out.push_str(&format!(
        r#"  <g transform="translate(80, 80)">
    <circle cx="40" cy="40" r="40" fill="{avatar}"/>
    <text x="40" y="49" text-anchor="middle" font-size="26" fill="{muted}" font-family="{FONT}">{initial}</text>
    <text x="100" y="32" font-size="32" font-weight="bold" fill="{heading}" font-family="{FONT}">{owner}</text>
    <text x="100" y="68" font-size="28" fill="{muted}" font-family="{FONT}">/ {repo}</text>
  </g>
"#,
        avatar = theme.avatar,
        muted = theme.muted,
        heading = theme.heading,
        initial = owner_initial(meta),
        owner = escape_markup(&meta.owner.login),
        repo = escape_markup(&meta.name),
    ));
}

pub(crate) fn description_line(out: &mut String, text: &str, theme: &Theme) {
    out.push_str(&format!(
        r#"  <text x="80" y="220" font-size="22" fill="{body}" font-family="{FONT}">{text}</text>
"#,
        body = theme.body,
    ));
}

/// Stars, forks, and language dot in one row.
pub(crate) fn stats_row(out: &mut String, meta: &RepositoryMetadata, theme: &Theme) {
    out.push_str(&format!(
        r#"  <g transform="translate(80, 290)" font-size="18" fill="{heading}" font-family="{FONT}">
    <text x="0" y="16">★ {stars}</text>
    <text x="140" y="16">⑂ {forks}</text>
    <circle cx="288" cy="10" r="7" fill="{dot}"/>
    <text x="304" y="16">{language}</text>
  </g>
"#,
        heading = theme.heading,
        stars = format_count(meta.stars),
        forks = format_count(meta.forks),
        dot = language_color(meta.language.as_deref()),
        language = language(meta),
    ));
}

/// Up to [`MAX_TOPIC_PILLS`] topic pills, then a `+N more` indicator.
///
/// Pill width grows with the label's character count.
pub(crate) fn topic_pills(out: &mut String, topics: &[String], theme: &Theme) {
    if topics.is_empty() {
        return;
    }

    out.push_str(&format!("  <g transform=\"translate({PILL_ROW_X}, 360)\">\n"));

    let mut x = 0;
    for topic in topics.iter().take(MAX_TOPIC_PILLS) {
        let label = truncate_text(topic, MAX_PILL_LABEL);
        let width = pill_width(&label);
        out.push_str(&format!(
            r#"    <g transform="translate({x}, 0)"><rect width="{width}" height="30" rx="15" fill="{fill}"/><text x="{center}" y="20" text-anchor="middle" font-size="13" fill="{text}" font-family="{FONT}">{label}</text></g>
"#,
            center = width / 2,
            fill = theme.pill_fill,
            text = theme.pill_text,
            label = escape_markup(&label),
        ));
        x += width + PILL_GAP;
    }

    if topics.len() > MAX_TOPIC_PILLS {
        out.push_str(&format!(
            r#"    <text x="{x}" y="20" font-size="13" fill="{muted}" font-family="{FONT}">+{hidden} more</text>
"#,
            muted = theme.muted,
            hidden = topics.len() - MAX_TOPIC_PILLS,
        ));
    }

    out.push_str("  </g>\n");
}

pub(crate) fn pill_width(label: &str) -> usize {
    label.chars().count() * 8 + 24
}

/// Canonical repository URL, bottom-left.
pub(crate) fn footer(out: &mut String, meta: &RepositoryMetadata, color: &str) {
    out.push_str(&format!(
        r#"  <text x="80" y="560" font-size="16" fill="{color}" font-family="{FONT}">{url}</text>
"#,
        url = escape_markup(&meta.url),
    ));
}

/// Attribution line anchored to the bottom-right corner.
pub(crate) fn attribution(out: &mut String, include: bool, color: &str) {
    if !include {
        return;
    }
    out.push_str(&format!(
        r#"  <text x="1160" y="610" text-anchor="end" font-size="12" fill="{color}" font-family="{FONT}">{text}</text>
"#,
        text = escape_markup(ATTRIBUTION_TEXT),
    ));
}

/// The content layer shared by `modern` and `gradient`.
pub(crate) fn content_layer(
    out: &mut String,
    meta: &RepositoryMetadata,
    theme: &Theme,
    description_budget: usize,
) {
    header(out, meta, theme);
    description_line(out, &description(meta, description_budget), theme);
    stats_row(out, meta, theme);
    topic_pills(out, &meta.topics, theme);
    footer(out, meta, theme.footer);
}
