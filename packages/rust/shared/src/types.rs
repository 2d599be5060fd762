//! Core domain types for repository snapshots.

use serde::{Deserialize, Serialize};

use crate::error::{RepoCardError, Result};

/// Number of commits fetched for a default generation session.
pub const DEFAULT_COMMIT_COUNT: u32 = 20;

// ---------------------------------------------------------------------------
// RepositoryMetadata
// ---------------------------------------------------------------------------

/// Immutable snapshot of a repository's metadata.
///
/// A snapshot is replaced wholesale on every fetch; nothing in the pipeline
/// mutates one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryMetadata {
    /// Repository name without the owner.
    pub name: String,
    /// Always `owner.login + "/" + name`.
    pub full_name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical web URL of the repository.
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub open_issues: u64,
    #[serde(default)]
    pub language: Option<String>,
    /// Topic tags in display order.
    #[serde(default)]
    pub topics: Vec<String>,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
    /// ISO 8601 last-updated timestamp.
    pub updated_at: String,
    /// ISO 8601 last-pushed timestamp.
    pub pushed_at: String,
    pub default_branch: String,
    #[serde(default)]
    pub license: Option<LicenseInfo>,
    pub owner: OwnerInfo,
}

impl RepositoryMetadata {
    /// The `owner/name` pair this snapshot must carry as `full_name`.
    pub fn expected_full_name(&self) -> String {
        format!("{}/{}", self.owner.login, self.name)
    }

    /// Check the data-model invariants the generators rely on.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(RepoCardError::validation("repository name is empty"));
        }
        if self.owner.login.trim().is_empty() {
            return Err(RepoCardError::validation("repository owner is empty"));
        }
        let expected = self.expected_full_name();
        if self.full_name != expected {
            return Err(RepoCardError::validation(format!(
                "full_name '{}' does not match owner/name '{expected}'",
                self.full_name
            )));
        }
        Ok(())
    }
}

/// License attached to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfo {
    /// Short key, e.g. `mit`.
    pub key: String,
    /// Display name, e.g. `MIT License`.
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

impl LicenseInfo {
    /// SPDX identifier when known, otherwise the short key.
    pub fn badge_id(&self) -> &str {
        self.spdx_id.as_deref().unwrap_or(&self.key)
    }
}

/// Repository owner (user or organization).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerInfo {
    pub login: String,
    pub avatar_url: String,
    /// Owner profile URL.
    pub url: String,
}

// ---------------------------------------------------------------------------
// CommitRecord
// ---------------------------------------------------------------------------

/// A single commit, as consumed by the release-notes generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full-length content hash.
    pub sha: String,
    /// First line of the commit message.
    pub message: String,
    pub author_name: String,
    pub author_email: String,
    /// ISO 8601 commit timestamp.
    pub date: String,
}

impl CommitRecord {
    /// Short form of the content hash (first 7 characters).
    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(7) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A saved fetch: metadata plus recent commits (most-recent-first).
///
/// Lets the pipeline run offline from JSON written by `repocard fetch --save`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub metadata: RepositoryMetadata,
    #[serde(default)]
    pub commits: Vec<CommitRecord>,
}

impl Snapshot {
    /// Parse a snapshot from JSON and validate its metadata.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)
            .map_err(|e| RepoCardError::parse(format!("invalid snapshot: {e}")))?;
        snapshot.metadata.validate()?;
        Ok(snapshot)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| RepoCardError::parse(format!("snapshot serialization failed: {e}")))
    }
}
