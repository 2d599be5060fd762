//! The metadata source capability consumed by the pipeline.

use std::future::Future;

use crate::error::Result;
use crate::identifier::RepositoryId;
use crate::types::{CommitRecord, RepositoryMetadata};

/// Something that can look up repository metadata and recent commits.
///
/// Retries, authentication and rate limiting are the implementor's concern;
/// callers only see the typed result or an error whose message is shown
/// verbatim.
pub trait MetadataSource: Send + Sync {
    /// Fetch the metadata snapshot for `id`.
    fn fetch_metadata(
        &self,
        id: &RepositoryId,
    ) -> impl Future<Output = Result<RepositoryMetadata>> + Send;

    /// Fetch up to `count` commits, most-recent-first. Returns fewer when the
    /// repository has fewer; never pads.
    fn fetch_commits(
        &self,
        id: &RepositoryId,
        count: u32,
    ) -> impl Future<Output = Result<Vec<CommitRecord>>> + Send;
}
