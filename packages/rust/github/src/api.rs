//! GitHub REST response shapes and their conversion into domain types.

use serde::Deserialize;

use repocard_shared::{CommitRecord, LicenseInfo, OwnerInfo, RepositoryMetadata};

#[derive(Debug, Deserialize)]
pub(crate) struct ApiRepository {
    name: String,
    description: Option<String>,
    html_url: String,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
    #[serde(default)]
    watchers_count: u64,
    #[serde(default)]
    open_issues_count: u64,
    language: Option<String>,
    #[serde(default)]
    topics: Option<Vec<String>>,
    created_at: String,
    updated_at: String,
    #[serde(default)]
    pushed_at: Option<String>,
    default_branch: String,
    license: Option<ApiLicense>,
    owner: ApiOwner,
}

#[derive(Debug, Deserialize)]
struct ApiLicense {
    key: String,
    name: String,
    spdx_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiOwner {
    login: String,
    avatar_url: String,
    html_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCommit {
    sha: String,
    commit: ApiCommitDetails,
}

#[derive(Debug, Deserialize)]
struct ApiCommitDetails {
    message: String,
    author: Option<ApiCommitAuthor>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiCommitAuthor {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    date: String,
}

impl From<ApiRepository> for RepositoryMetadata {
    fn from(repo: ApiRepository) -> Self {
        // `full_name` is rebuilt so it always matches owner/name, even when
        // the API reports a renamed or differently-cased repository.
        let full_name = format!("{}/{}", repo.owner.login, repo.name);
        let pushed_at = repo.pushed_at.unwrap_or_else(|| repo.updated_at.clone());

        RepositoryMetadata {
            name: repo.name,
            full_name,
            description: repo.description,
            url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.watchers_count,
            open_issues: repo.open_issues_count,
            language: repo.language,
            topics: repo.topics.unwrap_or_default(),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
            pushed_at,
            default_branch: repo.default_branch,
            license: repo.license.map(|l| LicenseInfo {
                key: l.key,
                name: l.name,
                spdx_id: l.spdx_id.filter(|id| id != "NOASSERTION"),
            }),
            owner: OwnerInfo {
                login: repo.owner.login,
                avatar_url: repo.owner.avatar_url,
                url: repo.owner.html_url,
            },
        }
    }
}

impl From<ApiCommit> for CommitRecord {
    fn from(commit: ApiCommit) -> Self {
        let author = commit.commit.author.unwrap_or_default();
        CommitRecord {
            sha: commit.sha,
            message: commit
                .commit
                .message
                .lines()
                .next()
                .unwrap_or_default()
                .trim_end()
                .to_string(),
            author_name: author.name,
            author_email: author.email,
            date: author.date,
        }
    }
}
