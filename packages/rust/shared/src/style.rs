//! Style options threaded through one generation pass.
//!
//! A [`StyleOptions`] value is built once (from config and CLI flags) and
//! passed by reference to the card renderer and every document generator,
//! so all artifacts of one pass share the same template, colors, and
//! attribution choice.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RepoCardError, Result};

/// Fixed promotional credit line appended when attribution is enabled.
pub const ATTRIBUTION_TEXT: &str =
    "Generated with RepoCard Studio — LAZYFROG (creator of KZ) — kindware.dev";

/// Default primary color for the colored templates.
pub const DEFAULT_PRIMARY_COLOR: &str = "#0d1117";

/// Default secondary color for the colored templates.
pub const DEFAULT_SECONDARY_COLOR: &str = "#161b22";

// ---------------------------------------------------------------------------
// TemplateId
// ---------------------------------------------------------------------------

/// Visual layout of the social card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Modern,
    Minimal,
    Gradient,
}

impl TemplateId {
    /// All templates, in menu order.
    pub const ALL: [TemplateId; 3] = [Self::Modern, Self::Minimal, Self::Gradient];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Minimal => "minimal",
            Self::Gradient => "gradient",
        }
    }

    /// Whether the template paints with the user-supplied colors.
    pub fn uses_colors(&self) -> bool {
        !matches!(self, Self::Minimal)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = RepoCardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "modern" => Ok(Self::Modern),
            "minimal" => Ok(Self::Minimal),
            "gradient" => Ok(Self::Gradient),
            other => Err(RepoCardError::validation(format!(
                "unknown template '{other}': expected modern, minimal, or gradient"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// HexColor
// ---------------------------------------------------------------------------

/// A validated 6-digit hex color, stored as lowercase `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&self.0[range], 16).unwrap_or_default()
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl FromStr for HexColor {
    type Err = RepoCardError;

    fn from_str(s: &str) -> Result<Self> {
        static HEX_RE: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid regex"));

        let trimmed = s.trim();
        HEX_RE
            .captures(trimmed)
            .map(|c| Self(format!("#{}", c[1].to_ascii_lowercase())))
            .ok_or_else(|| {
                RepoCardError::validation(format!(
                    "invalid color '{trimmed}': expected 6-digit hex like #0d1117"
                ))
            })
    }
}

impl TryFrom<String> for HexColor {
    type Error = RepoCardError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// StyleOptions
// ---------------------------------------------------------------------------

/// Template, colors, and attribution flag for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleOptions {
    pub template: TemplateId,
    /// Ignored by [`TemplateId::Minimal`].
    pub primary_color: HexColor,
    /// Ignored by [`TemplateId::Minimal`].
    pub secondary_color: HexColor,
    pub include_attribution: bool,
}

impl StyleOptions {
    /// Build options from raw strings, validating template and colors.
    pub fn parse(
        template: &str,
        primary_color: &str,
        secondary_color: &str,
        include_attribution: bool,
    ) -> Result<Self> {
        Ok(Self {
            template: template.parse()?,
            primary_color: primary_color.parse()?,
            secondary_color: secondary_color.parse()?,
            include_attribution,
        })
    }

    /// Copy of these options with a different template.
    pub fn with_template(&self, template: TemplateId) -> Self {
        Self {
            template,
            ..self.clone()
        }
    }
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            template: TemplateId::default(),
            primary_color: HexColor(DEFAULT_PRIMARY_COLOR.into()),
            secondary_color: HexColor(DEFAULT_SECONDARY_COLOR.into()),
            include_attribution: true,
        }
    }
}
