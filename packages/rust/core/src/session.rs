//! The working state behind one generation session.

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use repocard_shared::{
    CommitRecord, DEFAULT_COMMIT_COUNT, MetadataSource, RepoCardError, RepositoryId,
    RepositoryMetadata, Result, Snapshot, StyleOptions,
};

use crate::export::{DEFAULT_RASTER_WIDTH, ExportRequest};
use crate::pipeline::{ShareKit, generate_share_kit};

/// Current metadata, commits and style.
///
/// Metadata and commits are replaced together; a failed refresh leaves the
/// session empty rather than holding data for a different repository.
#[derive(Debug, Clone)]
pub struct Session {
    metadata: Option<RepositoryMetadata>,
    commits: Vec<CommitRecord>,
    style: StyleOptions,
    commit_count: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(StyleOptions::default(), DEFAULT_COMMIT_COUNT)
    }
}

impl Session {
    pub fn new(style: StyleOptions, commit_count: u32) -> Self {
        Self {
            metadata: None,
            commits: Vec::new(),
            style,
            commit_count,
        }
    }

    /// Fetch metadata and commits for `identifier`.
    ///
    /// An unparseable identifier is rejected before any fetch and leaves the
    /// loaded data alone. Any fetch failure clears it.
    #[instrument(skip_all, fields(identifier = %identifier.trim(), count = self.commit_count))]
    pub async fn refresh<S: MetadataSource>(&mut self, source: &S, identifier: &str) -> Result<()> {
        let id: RepositoryId = identifier.parse()?;

        let (metadata, commits) = tokio::join!(
            source.fetch_metadata(&id),
            source.fetch_commits(&id, self.commit_count),
        );

        match metadata.and_then(|m| m.validate().map(|()| m)) {
            Ok(metadata) => match commits {
                Ok(commits) => {
                    info!(repo = %metadata.full_name, commits = commits.len(), "session refreshed");
                    self.metadata = Some(metadata);
                    self.commits = commits;
                    Ok(())
                }
                Err(e) => self.fail(e),
            },
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, err: RepoCardError) -> Result<()> {
        warn!(error = %err, "refresh failed, clearing session");
        self.clear();
        Err(err)
    }

    pub fn clear(&mut self) {
        self.metadata = None;
        self.commits.clear();
    }

    /// Replace the loaded data with a saved snapshot.
    pub fn load_snapshot(&mut self, snapshot: Snapshot) -> Result<()> {
        snapshot.metadata.validate()?;
        self.metadata = Some(snapshot.metadata);
        self.commits = snapshot.commits;
        Ok(())
    }

    /// The loaded data as a snapshot, if any.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.metadata.as_ref().map(|metadata| Snapshot {
            metadata: metadata.clone(),
            commits: self.commits.clone(),
        })
    }

    pub fn metadata(&self) -> Option<&RepositoryMetadata> {
        self.metadata.as_ref()
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn style(&self) -> &StyleOptions {
        &self.style
    }

    pub fn set_style(&mut self, style: StyleOptions) {
        self.style = style;
    }

    /// Generate every artifact from the loaded data. `None` before a
    /// successful refresh.
    pub fn share_kit(&self, release_version: Option<&str>) -> Option<ShareKit> {
        let metadata = self.metadata.as_ref()?;
        Some(generate_share_kit(metadata, &self.commits, &self.style, release_version))
    }

    /// Build an export request for the loaded data.
    pub fn export_request(
        &self,
        output_dir: impl Into<PathBuf>,
        release_version: Option<String>,
    ) -> Result<ExportRequest> {
        let metadata = self
            .metadata
            .clone()
            .ok_or_else(|| RepoCardError::validation("no repository loaded"))?;
        Ok(ExportRequest {
            metadata,
            commits: self.commits.clone(),
            style: self.style.clone(),
            output_dir: output_dir.into(),
            release_version,
            raster_width: DEFAULT_RASTER_WIDTH,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::test_support::{sample_commits, sample_metadata};
    use repocard_shared::TemplateId;

    #[derive(Default)]
    struct FakeSource {
        missing: bool,
        fail_commits: bool,
        calls: AtomicUsize,
    }

    impl MetadataSource for FakeSource {
        async fn fetch_metadata(&self, id: &RepositoryId) -> Result<RepositoryMetadata> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.missing {
                return Err(RepoCardError::NotFound(format!("repository {id} not found")));
            }
            Ok(sample_metadata())
        }

        async fn fetch_commits(&self, _id: &RepositoryId, count: u32) -> Result<Vec<CommitRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_commits {
                return Err(RepoCardError::Network("connection reset".into()));
            }
            Ok(sample_commits().into_iter().take(count as usize).collect())
        }
    }

    #[tokio::test]
    async fn refresh_loads_metadata_and_commits() {
        let mut session = Session::default();
        session.refresh(&FakeSource::default(), "owner/test-repo").await.unwrap();

        assert_eq!(session.metadata().unwrap().full_name, "owner/test-repo");
        assert_eq!(session.commits().len(), sample_commits().len());
        assert!(session.share_kit(None).is_some());
    }

    #[tokio::test]
    async fn commit_count_is_passed_through() {
        let mut session = Session::new(StyleOptions::default(), 1);
        session.refresh(&FakeSource::default(), "owner/test-repo").await.unwrap();
        assert_eq!(session.commits().len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_clears_previous_data() {
        let mut session = Session::default();
        session.refresh(&FakeSource::default(), "owner/test-repo").await.unwrap();

        let missing = FakeSource {
            missing: true,
            ..FakeSource::default()
        };
        let err = session.refresh(&missing, "owner/gone").await.unwrap_err();
        assert!(matches!(err, RepoCardError::NotFound(_)));
        assert!(session.metadata().is_none());
        assert!(session.commits().is_empty());
        assert!(session.share_kit(None).is_none());
    }

    #[tokio::test]
    async fn commit_failure_also_clears() {
        let mut session = Session::default();
        session.refresh(&FakeSource::default(), "owner/test-repo").await.unwrap();

        let flaky = FakeSource {
            fail_commits: true,
            ..FakeSource::default()
        };
        let err = session.refresh(&flaky, "owner/test-repo").await.unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert!(session.metadata().is_none());
    }

    #[tokio::test]
    async fn empty_identifier_fails_before_fetching() {
        let source = FakeSource::default();
        let mut session = Session::default();
        session.refresh(&source, "owner/test-repo").await.unwrap();
        source.calls.store(0, Ordering::SeqCst);

        let err = session.refresh(&source, "   ").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert!(session.metadata().is_some());
    }

    #[test]
    fn style_change_applies_to_every_artifact() {
        let mut session = Session::default();
        session
            .load_snapshot(Snapshot {
                metadata: sample_metadata(),
                commits: sample_commits(),
            })
            .unwrap();

        session.set_style(StyleOptions::default().with_template(TemplateId::Minimal));
        let kit = session.share_kit(Some("v2.0.0")).unwrap();
        assert_eq!(kit.style.template, TemplateId::Minimal);
        assert!(kit.release_notes.starts_with("# test-repo v2.0.0"));
    }

    #[test]
    fn export_request_requires_loaded_data() {
        let session = Session::default();
        assert!(session.export_request("out", None).unwrap_err().is_validation());

        let mut session = Session::default();
        session
            .load_snapshot(Snapshot {
                metadata: sample_metadata(),
                commits: vec![],
            })
            .unwrap();
        let request = session.export_request("out", Some("v1".into())).unwrap();
        assert_eq!(request.output_dir, PathBuf::from("out"));
        assert_eq!(request.release_version.as_deref(), Some("v1"));
        assert_eq!(session.snapshot().unwrap().metadata, request.metadata);
    }
}
