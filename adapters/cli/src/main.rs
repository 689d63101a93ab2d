#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that renders Contribution Canon documents.

mod config;
mod github;

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use contribution_canon_core::RenderOptions;
use contribution_canon_rendering::{render_error_document, DocumentRenderer};
use contribution_canon_system_analytics::{ActivityStats, Analytics};
use contribution_canon_system_contribution_source::{
    demo_contributions, ContributionSource, DataOrigin, SourcedContributions,
};
use contribution_canon_system_layout::LayoutEngine;
use contribution_canon_system_trajectory::TrajectoryScheduler;
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    config::{CanonConfig, RenderDefaults, DEFAULT_CONFIG_PATH},
    github::GitHubClient,
};

#[derive(Parser, Debug)]
#[command(name = "contribution-canon", version, about)]
struct Cli {
    /// Configuration file; missing files fall back to defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log filter directive, e.g. `warn` or `contribution_canon=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animated document for a user.
    Render(RenderArgs),
    /// Render the built-in sample activity without network access.
    Demo(DocumentArgs),
    /// Print activity statistics for a user as JSON.
    Stats(StatsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// GitHub login to render.
    username: String,

    #[command(flatten)]
    document: DocumentArgs,
}

#[derive(Args, Debug)]
struct DocumentArgs {
    /// Colour theme: light, dark, neon or retro.
    #[arg(long)]
    theme: Option<String>,

    /// Projectile speed: slow, normal or fast.
    #[arg(long)]
    speed: Option<String>,

    /// Turret shape: classic, tank or spaceship.
    #[arg(long)]
    canon: Option<String>,

    /// Turret body colour as six hex digits.
    #[arg(long)]
    color: Option<String>,

    /// Write the document here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl DocumentArgs {
    fn options(&self, config: &CanonConfig) -> RenderOptions {
        config.render.resolve(&RenderDefaults {
            theme: self.theme.clone(),
            speed: self.speed.clone(),
            canon: self.canon.clone(),
            color: self.color.clone(),
        })
    }
}

#[derive(Args, Debug)]
struct StatsArgs {
    /// GitHub login to analyse.
    username: String,
}

#[derive(Serialize)]
struct StatsReport<'a> {
    username: &'a str,
    origin: DataOrigin,
    week_count: usize,
    #[serde(flatten)]
    stats: ActivityStats,
}

/// Entry point for the Contribution Canon command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = CanonConfig::load(&cli.config)?;
    match cli.command {
        Command::Render(args) => cmd_render(&config, &args),
        Command::Demo(args) => cmd_demo(&config, &args),
        Command::Stats(args) => cmd_stats(&config, &args),
    }
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive)
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn source(config: &CanonConfig) -> Result<ContributionSource<GitHubClient>> {
    let upstream = &config.upstream;
    let client = GitHubClient::new(&upstream.api_base_url, upstream.token())?;
    Ok(ContributionSource::new(client, upstream.source_config()))
}

fn cmd_render(config: &CanonConfig, args: &RenderArgs) -> Result<()> {
    let options = args.document.options(config);
    let contributions = source(config)?.fetch(&args.username);
    info!(
        username = %args.username,
        origin = ?contributions.origin,
        "rendering document"
    );
    let document = compose(&contributions, &options);
    write_document(args.document.output.as_deref(), &document)
}

fn cmd_demo(config: &CanonConfig, args: &DocumentArgs) -> Result<()> {
    let options = args.options(config);
    let document = compose(&demo_contributions(), &options);
    write_document(args.output.as_deref(), &document)
}

fn cmd_stats(config: &CanonConfig, args: &StatsArgs) -> Result<()> {
    let contributions = source(config)?.fetch(&args.username);
    let report = StatsReport {
        username: contributions.summary.username(),
        origin: contributions.origin,
        week_count: contributions.summary.week_count(),
        stats: Analytics::new().compute(&contributions.grid),
    };

    let json = serde_json::to_string_pretty(&report)
        .context("failed to encode statistics")?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")
        .context("failed to write statistics to stdout")
}

/// Runs layout, scheduling and rendering, substituting the error document
/// when the inputs cannot be drawn.
fn compose(contributions: &SourcedContributions, options: &RenderOptions) -> String {
    let grid = &contributions.grid;
    let geometry = LayoutEngine::default().layout_grid(grid);
    let schedule = TrajectoryScheduler::new()
        .schedule(grid, &geometry, options.speed);

    DocumentRenderer::new()
        .render(grid, &contributions.summary, &geometry, &schedule, options)
        .unwrap_or_else(|failure| {
            error!(%failure, "document generation failed; emitting error document");
            render_error_document(&failure.to_string())
        })
}

fn write_document(output: Option<&Path>, document: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, document)
            .with_context(|| format!("failed to write document to {}", path.display())),
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|()| stdout.write_all(b"\n"))
                .context("failed to write document to stdout")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use contribution_canon_core::{ContributionGrid, Summary, Theme};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags_parse() {
        let cli = Cli::try_parse_from([
            "contribution-canon",
            "--log-level",
            "debug",
            "render",
            "octocat",
            "--theme",
            "dark",
            "--canon",
            "tank",
        ])
        .expect("valid invocation");

        let Command::Render(args) = cli.command else {
            panic!("render subcommand expected");
        };
        assert_eq!(args.username, "octocat");
        let options = args.document.options(&CanonConfig::default());
        assert_eq!(options.theme, Theme::Dark);
    }

    #[test]
    fn demo_document_composes() {
        let document = compose(&demo_contributions(), &RenderOptions::default());
        assert!(document.starts_with("<svg"));
        assert!(document.contains("demo-user's Contribution Canon"));
    }

    #[test]
    fn inconsistent_inputs_produce_error_document() {
        let demo = demo_contributions();
        let broken = SourcedContributions {
            summary: Summary::from_grid("octocat", &ContributionGrid::empty()),
            ..demo
        };

        let document = compose(&broken, &RenderOptions::default());
        assert!(document.contains(r#"width="480" height="120""#));
        assert!(document.contains("Error: summary reports 0 contributions"));
    }
}
