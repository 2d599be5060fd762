//! Shared types, primitives, error model, and configuration for RepoCard Studio.
//!
//! This crate is the foundation depended on by all other RepoCard crates.
//! It provides:
//! - [`RepoCardError`] — the unified error type
//! - Domain types ([`RepositoryMetadata`], [`CommitRecord`], [`Snapshot`])
//! - The style model ([`StyleOptions`], [`TemplateId`], [`HexColor`])
//! - Formatting primitives ([`format_count`], [`truncate_text`], [`escape_markup`], ...)
//! - Repository identifier parsing ([`RepositoryId`])
//! - Configuration ([`AppConfig`], config loading)
//! - The [`MetadataSource`] capability

pub mod config;
pub mod error;
pub mod format;
pub mod identifier;
pub mod source;
pub mod style;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GitHubConfig, RasterConfig, config_dir, config_file_path,
    default_export_dir, github_token, init_config, load_config, load_config_from,
};
pub use error::{RepoCardError, Result};
pub use format::{ELLIPSIS, escape_markup, format_count, format_date, format_date_long, truncate_text};
pub use identifier::{RepositoryId, parse_repository_identifier};
pub use source::MetadataSource;
pub use style::{
    ATTRIBUTION_TEXT, DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, HexColor, StyleOptions,
    TemplateId,
};
pub use types::{
    CommitRecord, DEFAULT_COMMIT_COUNT, LicenseInfo, OwnerInfo, RepositoryMetadata, Snapshot,
};
