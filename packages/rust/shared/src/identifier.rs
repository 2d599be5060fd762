//! Repository identifier parsing (`owner/repo` or a github.com URL).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RepoCardError;

const URL_PREFIXES: [&str; 2] = ["https://github.com/", "http://github.com/"];

/// An `owner/repo` pair identifying a repository on the metadata source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepositoryId {
    pub owner: String,
    pub repo: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepositoryId {
    type Err = RepoCardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(RepoCardError::validation("repository identifier is empty"));
        }
        parse_repository_identifier(s).ok_or_else(|| {
            RepoCardError::validation(format!(
                "invalid repository '{}': expected owner/repo or https://github.com/owner/repo",
                s.trim()
            ))
        })
    }
}

/// Parse a repository identifier.
///
/// Accepts `https://github.com/<owner>/<repo>[/...]`, the same with `http://`,
/// or the bare short form `<owner>/<repo>` with exactly one slash. Surrounding
/// whitespace is ignored. In the URL form, extra path segments are ignored and
/// a trailing `.git` is dropped from the repository name.
///
/// Returns `None` when no non-empty owner/repo pair can be found.
pub fn parse_repository_identifier(input: &str) -> Option<RepositoryId> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(path) = URL_PREFIXES
        .iter()
        .find_map(|prefix| trimmed.strip_prefix(prefix))
    {
        let mut parts = path.trim_matches('/').split('/');
        let owner = parts.next()?;
        let repo = parts.next()?;
        let repo = repo.strip_suffix(".git").unwrap_or(repo);
        return non_empty_pair(owner, repo);
    }

    if trimmed.contains("://") {
        return None;
    }

    let (owner, repo) = trimmed.split_once('/')?;
    if repo.contains('/') {
        return None;
    }
    non_empty_pair(owner, repo)
}

fn non_empty_pair(owner: &str, repo: &str) -> Option<RepositoryId> {
    if owner.is_empty() || repo.is_empty() {
        return None;
    }
    Some(RepositoryId::new(owner, repo))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(input: &str) -> Option<(String, String)> {
        parse_repository_identifier(input).map(|id| (id.owner, id.repo))
    }

    fn some(owner: &str, repo: &str) -> Option<(String, String)> {
        Some((owner.to_string(), repo.to_string()))
    }

    #[test]
    fn parses_https_url() {
        assert_eq!(
            pair("https://github.com/microsoft/vscode"),
            some("microsoft", "vscode")
        );
    }

    #[test]
    fn parses_http_url() {
        assert_eq!(pair("http://github.com/facebook/react"), some("facebook", "react"));
    }

    #[test]
    fn parses_short_form() {
        assert_eq!(pair("rust-lang/rust"), some("rust-lang", "rust"));
    }

    #[test]
    fn tolerates_trailing_slash_and_whitespace() {
        assert_eq!(pair("https://github.com/owner/repo/"), some("owner", "repo"));
        assert_eq!(pair("  owner/repo  "), some("owner", "repo"));
    }

    #[test]
    fn url_uses_first_two_segments() {
        assert_eq!(
            pair("https://github.com/tokio-rs/tokio/tree/master/tokio"),
            some("tokio-rs", "tokio")
        );
        assert_eq!(pair("https://github.com/owner/repo.git"), some("owner", "repo"));
    }

    #[test]
    fn rejects_invalid_input() {
        for input in [
            "",
            "   ",
            "invalid",
            "not-a-url",
            "a/b/c",
            "/repo",
            "owner/",
            "https://github.com/owner",
            "https://gitlab.com/owner/repo",
            "ftp://github.com/owner/repo",
        ] {
            assert_eq!(pair(input), None, "accepted {input:?}");
        }
    }

    #[test]
    fn from_str_reports_validation_errors() {
        let err = "".parse::<RepositoryId>().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("empty"));

        let err = "a/b/c".parse::<RepositoryId>().unwrap_err();
        assert!(err.to_string().contains("a/b/c"));
    }

    #[test]
    fn display_is_short_form() {
        let id: RepositoryId = "https://github.com/rust-lang/cargo".parse().unwrap();
        assert_eq!(id.to_string(), "rust-lang/cargo");
    }
}
