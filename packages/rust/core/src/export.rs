//! Share kit export orchestrator.
//!
//! Renders a [`ShareKit`](crate::pipeline::ShareKit) and writes it under the
//! requested directory:
//!
//! ```text
//! <output_dir>/
//! ├── repo-card.svg
//! ├── repo-card.png            (only when a raster converter succeeded)
//! ├── README-snippet.md
//! ├── release-notes-draft.md
//! └── press-kit/
//!     ├── overview.md
//!     └── screenshots/
//!         └── .gitkeep
//! ```
//!
//! Export never returns `Err`. Every outcome, including validation and I/O
//! failures, is an [`ExportResult`] whose `files` list holds only what was
//! confirmed written.

use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use repocard_shared::{CommitRecord, RepoCardError, RepositoryMetadata, Result, StyleOptions};

use crate::pipeline::generate_share_kit;
use crate::raster::RasterConverter;

pub const CARD_SVG: &str = "repo-card.svg";
pub const CARD_PNG: &str = "repo-card.png";
pub const README_SNIPPET: &str = "README-snippet.md";
pub const RELEASE_NOTES: &str = "release-notes-draft.md";
pub const PRESS_KIT_OVERVIEW: &str = "press-kit/overview.md";
pub const SCREENSHOTS_PLACEHOLDER: &str = "press-kit/screenshots/.gitkeep";

const SCREENSHOTS_DIR: &str = "press-kit/screenshots";

/// Default PNG width, matching the card canvas.
pub const DEFAULT_RASTER_WIDTH: u32 = repocard_card::CANVAS_WIDTH;

// ---------------------------------------------------------------------------
// Request / result
// ---------------------------------------------------------------------------

/// Everything one export needs. Consumed once; nothing is retained.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    pub metadata: RepositoryMetadata,
    /// Most-recent-first.
    pub commits: Vec<CommitRecord>,
    pub style: StyleOptions,
    pub output_dir: PathBuf,
    /// Replaces the "Unreleased" label in the release notes.
    pub release_version: Option<String>,
    /// Target width for `repo-card.png`.
    pub raster_width: u32,
}

impl ExportRequest {
    pub fn new(
        metadata: RepositoryMetadata,
        commits: Vec<CommitRecord>,
        style: StyleOptions,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            metadata,
            commits,
            style,
            output_dir: output_dir.into(),
            release_version: None,
            raster_width: DEFAULT_RASTER_WIDTH,
        }
    }
}

/// Checksum and size of one written file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactMeta {
    /// Path relative to the output directory, `/`-separated.
    pub path: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// A file intentionally not produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Outcome of [`export_share_kit`].
#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub success: bool,
    /// Absolute output directory (as given when it could not be resolved).
    pub output_path: PathBuf,
    /// Relative paths confirmed written, in write order.
    pub files: Vec<String>,
    pub error: Option<String>,
    /// One entry per path in `files`.
    pub artifacts: Vec<ArtifactMeta>,
    pub skipped: Vec<SkippedFile>,
}

impl ExportResult {
    fn new(output_path: PathBuf) -> Self {
        Self {
            success: false,
            output_path,
            files: Vec::new(),
            error: None,
            artifacts: Vec::new(),
            skipped: Vec::new(),
        }
    }

    fn fail(mut self, err: &RepoCardError) -> Self {
        self.success = false;
        self.error = Some(err.to_string());
        self
    }

    fn record(&mut self, meta: ArtifactMeta) {
        self.files.push(meta.path.clone());
        self.artifacts.push(meta);
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Progress callback for reporting export status.
pub trait ExportProgress: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each file is written.
    fn file_written(&self, path: &str);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ExportProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn file_written(&self, _path: &str) {}
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Generate the share kit and write it to `request.output_dir`.
///
/// 1. Validate the output directory and metadata (no writes on failure)
/// 2. Create the directory tree, including `press-kit/screenshots/`
/// 3. Write `repo-card.svg`, then `repo-card.png` if a converter is given
///    (conversion failure is recorded in `skipped`, not fatal)
/// 4. Write the three Markdown documents and the screenshots placeholder
///
/// Stops at the first write failure. Re-running the same request rewrites
/// the same bytes.
#[instrument(skip_all, fields(repo = %request.metadata.full_name, dir = %request.output_dir.display()))]
pub fn export_share_kit(
    request: &ExportRequest,
    raster: Option<&dyn RasterConverter>,
    progress: &dyn ExportProgress,
) -> ExportResult {
    let result = ExportResult::new(request.output_dir.clone());

    if let Err(e) = validate(request) {
        debug!(error = %e, "export request rejected");
        return result.fail(&e);
    }

    progress.phase("Creating directories");
    let root = request.output_dir.as_path();
    if let Err(e) = create_dirs(root) {
        warn!(error = %e, "could not create export directory");
        return result.fail(&e);
    }
    let mut result = ExportResult::new(resolve(root));

    progress.phase("Rendering share kit");
    let kit = generate_share_kit(
        &request.metadata,
        &request.commits,
        &request.style,
        request.release_version.as_deref(),
    );

    progress.phase("Writing files");
    if let Err(e) = write_and_record(root, CARD_SVG, kit.card_svg.as_bytes(), &mut result, progress) {
        return result.fail(&e);
    }

    if let Some(raster) = raster {
        progress.phase("Rasterizing card");
        match raster.convert(&kit.card_svg, request.raster_width) {
            Ok(png) => {
                if let Err(e) = write_and_record(root, CARD_PNG, &png, &mut result, progress) {
                    return result.fail(&e);
                }
            }
            Err(e) => {
                warn!(error = %e, "skipping {CARD_PNG}");
                result.skipped.push(SkippedFile {
                    path: CARD_PNG.into(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let documents: [(&str, &[u8]); 4] = [
        (README_SNIPPET, kit.readme_snippet.as_bytes()),
        (RELEASE_NOTES, kit.release_notes.as_bytes()),
        (PRESS_KIT_OVERVIEW, kit.press_kit.as_bytes()),
        (SCREENSHOTS_PLACEHOLDER, b""),
    ];
    for (path, content) in documents {
        if let Err(e) = write_and_record(root, path, content, &mut result, progress) {
            return result.fail(&e);
        }
    }

    result.success = true;
    info!(
        files = result.files.len(),
        skipped = result.skipped.len(),
        path = %result.output_path.display(),
        "share kit exported"
    );
    result
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate(request: &ExportRequest) -> Result<()> {
    if request.output_dir.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(RepoCardError::validation("output directory is empty"));
    }
    request.metadata.validate()
}

/// Create the output directory and the screenshots subdirectory.
fn create_dirs(root: &Path) -> Result<()> {
    let screenshots = root.join(SCREENSHOTS_DIR);
    std::fs::create_dir_all(&screenshots).map_err(|e| RepoCardError::io(&screenshots, e))?;
    debug!(path = %root.display(), "directory structure created");
    Ok(())
}

/// Absolute form of `root`, falling back to the path as given.
fn resolve(root: &Path) -> PathBuf {
    std::fs::canonicalize(root)
        .or_else(|_| std::path::absolute(root))
        .unwrap_or_else(|_| root.to_path_buf())
}

fn write_and_record(
    root: &Path,
    relative: &str,
    content: &[u8],
    result: &mut ExportResult,
    progress: &dyn ExportProgress,
) -> Result<()> {
    let meta = write_atomic(root, relative, content)?;
    progress.file_written(relative);
    result.record(meta);
    Ok(())
}

/// Write `content` to `root/relative` via a temp file and rename, so a
/// failure never leaves a half-written file behind.
fn write_atomic(root: &Path, relative: &str, content: &[u8]) -> Result<ArtifactMeta> {
    let target = root.join(relative);
    let dir = target.parent().unwrap_or(root);
    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = dir.join(format!(".{file_name}.tmp"));

    std::fs::write(&temp, content).map_err(|e| RepoCardError::io(&temp, e))?;

    if let Err(e) = std::fs::rename(&temp, &target) {
        let _ = std::fs::remove_file(&temp);
        return Err(RepoCardError::io(&target, e));
    }

    let mut hasher = Sha256::new();
    hasher.update(content);
    let hash = format!("{:x}", hasher.finalize());

    debug!(file = %relative, size = content.len(), "wrote file");

    Ok(ArtifactMeta {
        path: relative.to_string(),
        sha256: hash,
        size_bytes: content.len(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
