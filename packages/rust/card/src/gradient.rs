//! `gradient`: diagonal blend from primary to secondary behind the modern
//! content layer, plus a license and last-updated line.

use repocard_shared::{RepositoryMetadata, StyleOptions, escape_markup, format_date};

use crate::FALLBACK_LICENSE;
use crate::layout::{self, FONT, Theme};

pub(crate) const DESCRIPTION_BUDGET: usize = 100;

const THEME: Theme = Theme {
    heading: "#ffffff",
    muted: "rgba(255,255,255,0.75)",
    body: "rgba(255,255,255,0.9)",
    avatar: "rgba(255,255,255,0.2)",
    pill_fill: "rgba(255,255,255,0.2)",
    pill_text: "#ffffff",
    footer: "rgba(255,255,255,0.7)",
};

pub(crate) fn render(meta: &RepositoryMetadata, style: &StyleOptions) -> String {
    let mut out = String::with_capacity(4096);

    layout::open_svg(&mut out);
    out.push_str(&format!(
        r#"  <defs>
    <linearGradient id="bg-gradient" x1="0%" y1="0%" x2="100%" y2="100%">
      <stop offset="0%" stop-color="{primary}"/>
      <stop offset="100%" stop-color="{secondary}"/>
    </linearGradient>
  </defs>
  <rect width="1200" height="630" fill="url(#bg-gradient)"/>
  <circle cx="100" cy="100" r="200" fill="rgba(255,255,255,0.05)"/>
  <circle cx="1100" cy="530" r="250" fill="rgba(255,255,255,0.05)"/>
"#,
        primary = style.primary_color,
        secondary = style.secondary_color,
    ));
    layout::content_layer(&mut out, meta, &THEME, DESCRIPTION_BUDGET);
    out.push_str(&format!(
        r#"  <text x="80" y="440" font-size="16" fill="{muted}" font-family="{FONT}">{license} • Updated {updated}</text>
"#,
        muted = THEME.muted,
        license = escape_markup(license_name(meta)),
        updated = escape_markup(&format_date(&meta.updated_at)),
    ));
    layout::attribution(&mut out, style.include_attribution, THEME.footer);
    layout::close_svg(&mut out);

    out
}

fn license_name(meta: &RepositoryMetadata) -> &str {
    meta.license
        .as_ref()
        .map(|l| l.name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_LICENSE)
}
