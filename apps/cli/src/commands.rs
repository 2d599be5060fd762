//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use repocard_core::{
    ArtifactKind, CommandRasterizer, ExportProgress, ExportResult, RasterConverter, Session,
    export_share_kit,
};
use repocard_github::{GitHubClient, GitHubOptions};
use repocard_shared::{
    AppConfig, HexColor, Snapshot, StyleOptions, TemplateId, default_export_dir, format_count,
    init_config, load_config,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// RepoCard — social cards and launch docs for your repository.
#[derive(Parser)]
#[command(
    name = "repocard",
    version,
    about = "Generate a social card, README snippet, release notes and press kit for a GitHub repository.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch repository metadata and recent commits.
    Fetch {
        /// Repository as owner/repo or a github.com URL.
        repo: String,

        /// Number of recent commits to fetch (defaults to config).
        #[arg(long)]
        commits: Option<u32>,

        /// Save the fetch as a JSON snapshot instead of printing a summary.
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Print one rendered artifact to stdout.
    Preview {
        #[command(flatten)]
        input: InputArgs,

        /// Artifact to print: card, readme, release, or press.
        #[arg(long, default_value = "card")]
        artifact: String,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Write the full share kit to a directory.
    Export {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory (defaults to config, then Downloads/share-kit).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Version label for the release notes heading.
        #[arg(long)]
        release_version: Option<String>,

        /// Also rasterize the card to PNG with the configured converter.
        #[arg(long)]
        png: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Where repository data comes from.
#[derive(Args)]
pub(crate) struct InputArgs {
    /// Repository as owner/repo or a github.com URL.
    #[arg(required_unless_present = "snapshot")]
    pub repo: Option<String>,

    /// Use a snapshot saved by `repocard fetch --save` instead of fetching.
    #[arg(long, conflicts_with = "repo")]
    pub snapshot: Option<PathBuf>,
}

/// Style overrides; unset flags fall back to `[defaults]`.
#[derive(Args, Default)]
pub(crate) struct StyleArgs {
    /// Card template: modern, minimal, or gradient.
    #[arg(long)]
    pub template: Option<String>,

    /// Primary color as #rrggbb.
    #[arg(long)]
    pub primary: Option<String>,

    /// Secondary color as #rrggbb.
    #[arg(long)]
    pub secondary: Option<String>,

    /// Leave out the attribution line.
    #[arg(long)]
    pub no_attribution: bool,
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "repocard=info",
        1 => "repocard=debug",
        _ => "repocard=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Fetch {
            repo,
            commits,
            save,
        } => cmd_fetch(&repo, commits, save.as_deref()).await,
        Command::Preview {
            input,
            artifact,
            style,
        } => cmd_preview(&input, &artifact, &style).await,
        Command::Export {
            input,
            out,
            release_version,
            png,
            style,
        } => cmd_export(&input, out, release_version, png, &style).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_fetch(repo: &str, commits: Option<u32>, save: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let count = commits.unwrap_or(config.defaults.commit_count);
    let mut session = Session::new(StyleOptions::default(), count);

    let progress = CliProgress::new();
    progress.phase(&format!("Fetching {}", repo.trim()));
    let fetched = fetch_into(&mut session, &config, repo).await;
    progress.finish();
    fetched?;

    let snapshot = session
        .snapshot()
        .ok_or_else(|| eyre!("no repository data after fetch"))?;

    if let Some(path) = save {
        std::fs::write(path, snapshot.to_json()?)
            .wrap_err_with(|| format!("failed to write snapshot to {}", path.display()))?;
        println!("Snapshot saved to {}", path.display());
        return Ok(());
    }

    let meta = &snapshot.metadata;
    println!();
    println!("  {}", meta.full_name);
    if let Some(description) = &meta.description {
        println!("  {description}");
    }
    println!("  Stars:    {}", format_count(meta.stars));
    println!("  Forks:    {}", format_count(meta.forks));
    println!("  Language: {}", meta.language.as_deref().unwrap_or("-"));
    println!("  Commits:  {}", snapshot.commits.len());
    println!();

    Ok(())
}

async fn cmd_preview(input: &InputArgs, artifact: &str, style: &StyleArgs) -> Result<()> {
    let config = load_config()?;
    let kind: ArtifactKind = artifact.parse()?;

    let mut session = Session::new(resolve_style(&config, style)?, config.defaults.commit_count);
    load_input(&mut session, &config, input).await?;

    let kit = session
        .share_kit(None)
        .ok_or_else(|| eyre!("no repository data loaded"))?;
    print!("{}", kit.artifact(kind));
    Ok(())
}

async fn cmd_export(
    input: &InputArgs,
    out: Option<PathBuf>,
    release_version: Option<String>,
    png: bool,
    style: &StyleArgs,
) -> Result<()> {
    let config = load_config()?;

    let mut session = Session::new(resolve_style(&config, style)?, config.defaults.commit_count);
    load_input(&mut session, &config, input).await?;

    let output_dir = out.unwrap_or_else(|| default_export_dir(&config));
    let mut request = session.export_request(output_dir, release_version)?;
    request.raster_width = config.raster.width;

    let rasterizer = if png {
        Some(CommandRasterizer::new(&config.raster.command)?)
    } else {
        CommandRasterizer::from_config(&config.raster)?
    };

    info!(
        repo = %request.metadata.full_name,
        out = %request.output_dir.display(),
        png = rasterizer.is_some(),
        "exporting share kit"
    );

    let progress = CliProgress::new();
    let result = export_share_kit(
        &request,
        rasterizer.as_ref().map(|r| r as &dyn RasterConverter),
        &progress,
    );
    progress.finish();

    print_export_result(&result);

    match result.error {
        Some(error) => Err(eyre!("export failed: {error}")),
        None => Ok(()),
    }
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn fetch_into(session: &mut Session, config: &AppConfig, repo: &str) -> Result<()> {
    let client = GitHubClient::new(&GitHubOptions::from_config(config))?;
    session.refresh(&client, repo).await?;
    Ok(())
}

async fn load_input(session: &mut Session, config: &AppConfig, input: &InputArgs) -> Result<()> {
    match (&input.snapshot, &input.repo) {
        (Some(path), _) => {
            let json = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read snapshot {}", path.display()))?;
            session.load_snapshot(Snapshot::from_json(&json)?)?;
            Ok(())
        }
        (None, Some(repo)) => {
            let progress = CliProgress::new();
            progress.phase(&format!("Fetching {}", repo.trim()));
            let fetched = fetch_into(session, config, repo).await;
            progress.finish();
            fetched
        }
        (None, None) => Err(eyre!("pass a repository or --snapshot FILE")),
    }
}

/// Merge style flags over `[defaults]`.
fn resolve_style(config: &AppConfig, args: &StyleArgs) -> Result<StyleOptions> {
    let base = StyleOptions::try_from(&config.defaults)?;
    let template = match &args.template {
        Some(t) => t.parse::<TemplateId>()?,
        None => base.template,
    };
    let primary_color = match &args.primary {
        Some(c) => c.parse::<HexColor>()?,
        None => base.primary_color,
    };
    let secondary_color = match &args.secondary {
        Some(c) => c.parse::<HexColor>()?,
        None => base.secondary_color,
    };
    Ok(StyleOptions {
        template,
        primary_color,
        secondary_color,
        include_attribution: base.include_attribution && !args.no_attribution,
    })
}

fn print_export_result(result: &ExportResult) {
    println!();
    if result.success {
        println!("  Share kit exported!");
    } else {
        println!("  Export failed.");
    }
    println!("  Path: {}", result.output_path.display());
    for artifact in &result.artifacts {
        println!(
            "    {:<32} {:>8} B  {}",
            artifact.path,
            artifact.size_bytes,
            &artifact.sha256[..12.min(artifact.sha256.len())]
        );
    }
    for skipped in &result.skipped {
        println!("    {:<32} skipped: {}", skipped.path, skipped.reason);
    }
    if let Some(error) = &result.error {
        println!("  Error: {error}");
    }
    println!();
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ExportProgress for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn file_written(&self, path: &str) {
        self.spinner.set_message(format!("Wrote {path}"));
    }
}
