//! `minimal`: fixed light palette, text only, no pills.
//!
//! The user's colors are never read here, and the fixed palette is written
//! in `rgb()` form so no supplied `#rrggbb` value can appear in the output.

use repocard_shared::{RepositoryMetadata, StyleOptions, escape_markup, format_count};

use crate::layout::{self, FONT};
use crate::palette::language_color;

pub(crate) const DESCRIPTION_BUDGET: usize = 80;

const BACKGROUND: &str = "rgb(255, 255, 255)";
const INK: &str = "rgb(17, 24, 39)";
const SUBTLE: &str = "rgb(107, 114, 128)";
const BODY: &str = "rgb(75, 85, 99)";
const BADGE: &str = "rgb(243, 244, 246)";
const FAINT: &str = "rgb(156, 163, 175)";

pub(crate) fn render(meta: &RepositoryMetadata, style: &StyleOptions) -> String {
    let mut out = String::with_capacity(3072);

    layout::open_svg(&mut out);
    out.push_str(&format!(
        r#"  <rect width="1200" height="630" fill="{BACKGROUND}"/>
  <g transform="translate(100, 180)" font-family="{FONT}">
    <text font-size="48" font-weight="bold" fill="{INK}"><tspan fill="{SUBTLE}">{owner}</tspan><tspan> / {repo}</tspan></text>
    <text y="80" font-size="24" fill="{BODY}">{description}</text>
    <text y="160" font-size="20" fill="{SUBTLE}"><tspan font-weight="bold" fill="{INK}">{stars}</tspan> stars  <tspan font-weight="bold" fill="{INK}">{forks}</tspan> forks  <tspan font-weight="bold" fill="{INK}">{issues}</tspan> issues</text>
    <g transform="translate(0, 200)">
      <rect width="{badge_width}" height="32" rx="16" fill="{BADGE}"/>
      <circle cx="20" cy="16" r="6" fill="{dot}"/>
      <text x="36" y="21" font-size="14" fill="{BODY}">{language}</text>
    </g>
  </g>
"#,
        owner = escape_markup(&meta.owner.login),
        repo = escape_markup(&meta.name),
        description = layout::description(meta, DESCRIPTION_BUDGET),
        stars = format_count(meta.stars),
        forks = format_count(meta.forks),
        issues = format_count(meta.open_issues),
        badge_width = badge_width(meta),
        dot = language_color(meta.language.as_deref()),
        language = layout::language(meta),
    ));
    layout::footer(&mut out, meta, FAINT);
    layout::attribution(&mut out, style.include_attribution, FAINT);
    layout::close_svg(&mut out);

    out
}

fn badge_width(meta: &RepositoryMetadata) -> usize {
    let chars = meta.language.as_deref().map_or(7, |l| l.chars().count());
    (chars * 8 + 52).max(100)
}
