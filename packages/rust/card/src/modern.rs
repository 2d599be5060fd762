//! `modern`: two-tone background, headline, stats, topic pills.

use repocard_shared::{RepositoryMetadata, StyleOptions};

use crate::layout::{self, Theme};

pub(crate) const DESCRIPTION_BUDGET: usize = 100;

pub(crate) const THEME: Theme = Theme {
    heading: "#f0f6fc",
    muted: "#8b949e",
    body: "#c9d1d9",
    avatar: "#30363d",
    pill_fill: "#30363d",
    pill_text: "#c9d1d9",
    footer: "#6e7681",
};

pub(crate) fn render(meta: &RepositoryMetadata, style: &StyleOptions) -> String {
    let mut out = String::with_capacity(4096);

    layout::open_svg(&mut out);
    out.push_str(&format!(
        r#"  <rect width="1200" height="630" fill="{primary}"/>
  <rect x="40" y="40" width="1120" height="550" rx="16" fill="{secondary}"/>
"#,
        primary = style.primary_color,
        secondary = style.secondary_color,
    ));
    layout::content_layer(&mut out, meta, &THEME, DESCRIPTION_BUDGET);
    layout::attribution(&mut out, style.include_attribution, THEME.footer);
    layout::close_svg(&mut out);

    out
}
