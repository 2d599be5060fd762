//! Raster conversion capability.
//!
//! The pipeline never encodes bitmaps itself. When PNG output is wanted, a
//! [`RasterConverter`] is injected into the export; [`CommandRasterizer`]
//! is the built-in one and shells out to an external converter.

use std::io::{ErrorKind, Read, Write};
use std::process::{Command, Stdio};

use tracing::{debug, instrument};

use repocard_shared::{RasterConfig, RepoCardError, Result};

/// First eight bytes of every PNG file.
const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Placeholder in the command line replaced with the target width.
const WIDTH_PLACEHOLDER: &str = "{width}";

/// Turns an SVG document into PNG bytes.
pub trait RasterConverter: Send + Sync {
    fn convert(&self, svg: &str, width: u32) -> Result<Vec<u8>>;
}

/// Runs an external program with the SVG on stdin and reads PNG from stdout.
#[derive(Debug, Clone)]
pub struct CommandRasterizer {
    program: String,
    args: Vec<String>,
}

impl CommandRasterizer {
    /// Parse a whitespace-separated command line such as
    /// `rsvg-convert --format png --width {width}`.
    pub fn new(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| RepoCardError::config("[raster] command is empty"))?;
        Ok(Self {
            program,
            args: parts.collect(),
        })
    }

    /// The converter described by `[raster]`, or `None` when disabled.
    pub fn from_config(config: &RasterConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(&config.command).map(Some)
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl RasterConverter for CommandRasterizer {
    #[instrument(skip_all, fields(program = %self.program, width = width))]
    fn convert(&self, svg: &str, width: u32) -> Result<Vec<u8>> {
        let width_arg = width.to_string();
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace(WIDTH_PLACEHOLDER, &width_arg))
            .collect();

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RepoCardError::Raster(format!("failed to start {}: {e}", self.program)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RepoCardError::Raster("converter stdin unavailable".into()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| RepoCardError::Raster("converter stdout unavailable".into()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| RepoCardError::Raster("converter stderr unavailable".into()))?;

        // stdin and stderr get their own threads; a converter blocked on any
        // one full pipe would otherwise never close stdout.
        let (png, stderr) = std::thread::scope(|scope| {
            scope.spawn(move || {
                if let Err(e) = stdin.write_all(svg.as_bytes()) {
                    if e.kind() != ErrorKind::BrokenPipe {
                        debug!(error = %e, "failed to write SVG to converter");
                    }
                }
            });
            let errors = scope.spawn(move || {
                let mut buf = Vec::new();
                let _ = stderr.read_to_end(&mut buf);
                buf
            });
            let mut png = Vec::new();
            let read = stdout.read_to_end(&mut png).map(|_| png);
            (read, errors.join().unwrap_or_default())
        });
        let png = png
            .map_err(|e| RepoCardError::Raster(format!("failed to read converter output: {e}")))?;

        let status = child
            .wait()
            .map_err(|e| RepoCardError::Raster(format!("{} did not exit: {e}", self.program)))?;

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            let reason = stderr.lines().next().unwrap_or_default().trim();
            return Err(RepoCardError::Raster(format!(
                "{} exited with {}{}{reason}",
                self.program,
                status,
                if reason.is_empty() { "" } else { ": " },
            )));
        }
        if !png.starts_with(PNG_SIGNATURE) {
            return Err(RepoCardError::Raster(format!(
                "{} did not produce PNG output",
                self.program
            )));
        }

        debug!(bytes = png.len(), "rasterized card");
        Ok(png)
    }
}
