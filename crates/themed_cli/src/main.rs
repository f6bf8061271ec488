//! Themed Text CLI
//!
//! Drive a headless themed text widget through a scripted interaction
//! scenario and print what the widget looks like along the way.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use themed_theme::{StyleEngine, ThemeConfig};
use themed_text::Host;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod scenario;
mod session;

use scenario::Scenario;
use session::Session;

#[derive(Parser)]
#[command(name = "themed-text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run interaction scenarios against a themed text widget", long_about = None)]
struct Cli {
    /// Extra theme definitions (TOML)
    #[arg(long)]
    themes: Option<PathBuf>,

    /// Theme to start with
    #[arg(short, long)]
    theme: Option<String>,

    /// Scenario file (JSON); a built-in scenario runs when omitted
    #[arg(short, long)]
    scenario: Option<PathBuf>,

    /// Add a horizontal scrollbar below the text
    #[arg(long)]
    horizontal: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr, snapshots to stdout
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut engine = StyleEngine::with_presets();
    if let Some(path) = &cli.themes {
        let config = ThemeConfig::from_path(path)
            .with_context(|| format!("Failed to load themes from {}", path.display()))?;
        config
            .apply(&mut engine)
            .with_context(|| format!("Failed to apply themes from {}", path.display()))?;
        info!(path = %path.display(), "themes loaded");
    }

    let mut host = Host::with_style_engine(engine);
    if let Some(theme) = &cli.theme {
        host.theme_use(theme)
            .with_context(|| format!("Cannot switch to theme '{theme}'"))?;
    }

    let scenario = match &cli.scenario {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Scenario::from_json(&raw)
                .with_context(|| format!("Invalid scenario in {}", path.display()))?
        }
        None => Scenario::builtin(),
    };

    let mut session = Session::new(host, cli.horizontal).context("Failed to build the widget")?;
    let snapshots = session.run(&scenario);
    info!(
        steps = scenario.steps.len(),
        snapshots = snapshots.len(),
        theme = session.theme(),
        "scenario finished"
    );

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
