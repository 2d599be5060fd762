//! Application configuration for RepoCard Studio.
//!
//! User config lives at `~/.repocard/repocard.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RepoCardError, Result};
use crate::style::{DEFAULT_PRIMARY_COLOR, DEFAULT_SECONDARY_COLOR, StyleOptions};
use crate::types::DEFAULT_COMMIT_COUNT;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "repocard.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".repocard";

/// Directory name used when no platform export directory can be found.
const FALLBACK_EXPORT_DIR: &str = "share-kit";

// ---------------------------------------------------------------------------
// Config structs (matching repocard.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generation and export defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Metadata source settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// External raster conversion.
    #[serde(default)]
    pub raster: RasterConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Export directory. Empty means "pick a platform default".
    #[serde(default)]
    pub output_dir: String,

    /// Card template id.
    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default = "default_secondary_color")]
    pub secondary_color: String,

    /// Append the attribution line to generated artifacts.
    #[serde(default = "default_true")]
    pub include_attribution: bool,

    /// Number of recent commits fetched for release notes.
    #[serde(default = "default_commit_count")]
    pub commit_count: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            output_dir: String::new(),
            template: default_template(),
            primary_color: default_primary_color(),
            secondary_color: default_secondary_color(),
            include_attribution: true,
            commit_count: default_commit_count(),
        }
    }
}

fn default_template() -> String {
    "modern".into()
}
fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.into()
}
fn default_secondary_color() -> String {
    DEFAULT_SECONDARY_COLOR.into()
}
fn default_true() -> bool {
    true
}
fn default_commit_count() -> u32 {
    DEFAULT_COMMIT_COUNT
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL (overridable for GitHub Enterprise or tests).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Name of the env var holding an access token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com".into()
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    15
}

/// `[raster]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Produce `repo-card.png` alongside the SVG.
    #[serde(default)]
    pub enabled: bool,

    /// External converter reading SVG on stdin and writing PNG to stdout.
    /// `{width}` in the command is replaced with [`RasterConfig::width`].
    #[serde(default = "default_raster_command")]
    pub command: String,

    /// Output width in pixels.
    #[serde(default = "default_raster_width")]
    pub width: u32,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: default_raster_command(),
            width: default_raster_width(),
        }
    }
}

fn default_raster_command() -> String {
    "rsvg-convert --format png --width {width}".into()
}
fn default_raster_width() -> u32 {
    1200
}

impl TryFrom<&DefaultsConfig> for StyleOptions {
    type Error = RepoCardError;

    fn try_from(defaults: &DefaultsConfig) -> Result<Self> {
        StyleOptions::parse(
            &defaults.template,
            &defaults.primary_color,
            &defaults.secondary_color,
            defaults.include_attribution,
        )
        .map_err(|e| RepoCardError::config(format!("[defaults] {e}")))
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.repocard/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| RepoCardError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.repocard/repocard.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| RepoCardError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| RepoCardError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| RepoCardError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| RepoCardError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| RepoCardError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Read the access token named by `[github] token_env`, if set and non-empty.
pub fn github_token(config: &AppConfig) -> Option<String> {
    std::env::var(&config.github.token_env)
        .ok()
        .filter(|token| !token.trim().is_empty())
}

/// Resolve the export directory: configured value, else the platform
/// downloads or documents directory, else `./share-kit`.
pub fn default_export_dir(config: &AppConfig) -> PathBuf {
    let configured = config.defaults.output_dir.trim();
    if !configured.is_empty() {
        return expand_home(configured);
    }

    dirs::download_dir()
        .or_else(dirs::document_dir)
        .map(|dir| dir.join(FALLBACK_EXPORT_DIR))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_EXPORT_DIR))
}

/// Expand a leading `~/` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
