//! Core pipeline orchestration for RepoCard Studio.
//!
//! This crate ties together card rendering, document generation and export
//! into end-to-end workflows:
//! - [`generate_share_kit`]: one pure generation pass
//! - [`PreviewCoordinator`]: last-write-wins preview state
//! - [`Session`]: fetched data plus the current style
//! - [`export_share_kit`]: writes the share kit to disk with a manifest

pub mod export;
pub mod pipeline;
pub mod preview;
pub mod raster;
pub mod session;

pub use export::{
    ArtifactMeta, ExportProgress, ExportRequest, ExportResult, SilentProgress, SkippedFile,
    export_share_kit,
};
pub use pipeline::{ArtifactKind, ShareKit, generate_share_kit};
pub use preview::{PreviewCoordinator, PreviewTicket};
pub use raster::{CommandRasterizer, RasterConverter};
pub use session::Session;
