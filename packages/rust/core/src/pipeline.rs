//! One generation pass: card + three documents from a single style value.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::{info, instrument};

use repocard_shared::{CommitRecord, RepoCardError, RepositoryMetadata, Result, StyleOptions};

/// The four rendered artifacts of one generation pass.
///
/// All four are produced from the same [`StyleOptions`] value, which is kept
/// alongside them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareKit {
    pub style: StyleOptions,
    pub card_svg: String,
    pub readme_snippet: String,
    pub release_notes: String,
    pub press_kit: String,
}

impl ShareKit {
    pub fn artifact(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Card => &self.card_svg,
            ArtifactKind::Readme => &self.readme_snippet,
            ArtifactKind::ReleaseNotes => &self.release_notes,
            ArtifactKind::PressKit => &self.press_kit,
        }
    }
}

/// Selects one artifact of a [`ShareKit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Card,
    Readme,
    ReleaseNotes,
    PressKit,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        Self::Card,
        Self::Readme,
        Self::ReleaseNotes,
        Self::PressKit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Card => "card",
            Self::Readme => "readme",
            Self::ReleaseNotes => "release",
            Self::PressKit => "press",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = RepoCardError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "card" | "svg" => Ok(Self::Card),
            "readme" => Ok(Self::Readme),
            "release" | "release-notes" => Ok(Self::ReleaseNotes),
            "press" | "press-kit" => Ok(Self::PressKit),
            other => Err(RepoCardError::validation(format!(
                "unknown artifact '{other}': expected card, readme, release, or press"
            ))),
        }
    }
}

/// Render the card and generate all three documents.
///
/// Pure and deterministic: no I/O, and identical inputs give identical
/// output.
#[instrument(skip_all, fields(repo = %meta.full_name, template = %style.template, commits = commits.len()))]
pub fn generate_share_kit(
    meta: &RepositoryMetadata,
    commits: &[CommitRecord],
    style: &StyleOptions,
    release_version: Option<&str>,
) -> ShareKit {
    let kit = ShareKit {
        style: style.clone(),
        card_svg: repocard_card::render_card(meta, style),
        readme_snippet: repocard_artifacts::readme_snippet(meta, style),
        release_notes: repocard_artifacts::release_notes(meta, commits, style, release_version),
        press_kit: repocard_artifacts::press_kit(meta, style),
    };

    info!(
        card_bytes = kit.card_svg.len(),
        readme_bytes = kit.readme_snippet.len(),
        "share kit generated"
    );
    kit
}
