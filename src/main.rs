//! Mathsprout - Entry Point
//!
//! Parses the command line, loads optional tuning overrides, installs
//! the global tuning and hands control to the terminal app loop.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use mathsprout::core::config::{self, SessionTuning};
use mathsprout::core::error::{Result, SproutError};
use mathsprout::core::types::Avatar;
use mathsprout::exercises::ExerciseKind;
use mathsprout::ui::App;

#[derive(Parser, Debug)]
#[command(name = "mathsprout", version, about = "Terminal math practice for kids")]
struct Cli {
    /// Jump straight into an exercise instead of the menu
    #[arg(long, value_enum)]
    exercise: Option<ExerciseKind>,

    /// Stars needed to finish an exercise
    #[arg(long, default_value_t = 5)]
    stars: u32,

    /// Seed for a reproducible challenge stream
    #[arg(long)]
    seed: Option<u64>,

    /// Companion shown in the header
    #[arg(long, value_enum, default_value = "fox")]
    avatar: Avatar,

    /// TOML file overriding lives and timing
    #[arg(long)]
    config: Option<PathBuf>,

    /// List the exercises and exit
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout belongs to the terminal UI
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mathsprout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.list {
        for kind in ExerciseKind::all() {
            println!("{:<16} {}", kind.id(), kind.title());
        }
        return Ok(());
    }

    let mut tuning = SessionTuning::new();
    if let Some(path) = &cli.config {
        let overrides = config::load_overrides(path)?;
        tuning.apply(&overrides);
        tracing::info!(path = %path.display(), "tuning overrides loaded");
    }
    tuning.validate().map_err(SproutError::InvalidConfig)?;
    // First set wins; in the binary nothing has set it before us
    let _ = config::set_tuning(tuning);

    tracing::info!(stars = cli.stars, "mathsprout starting");

    let mut app = App::new(cli.stars, cli.avatar, cli.seed);
    if let Some(kind) = cli.exercise {
        app.launch(kind, 0);
    }
    app.run()
}
