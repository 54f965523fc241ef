use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use drivelab::core::LANDING_TARGET;
use drivelab::ui::components::PROJECT_FILES;
use drivelab::ui::terminal_guard::install_panic_hook;
use drivelab::{util, App, Config, FeatureKey, NominatimGeocoder};
use tracing_subscriber::EnvFilter;

/// drivelab - terminal workspace for AV test and simulation tooling
#[derive(Parser)]
#[command(name = "drivelab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Data directory (defaults to ~/.drivelab)
    #[arg(long, value_name = "PATH")]
    data_dir: Option<PathBuf>,

    /// Config file (defaults to <data-dir>/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `drivelab=debug`
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Feature to open on startup, e.g. `drive-lab`
    #[arg(long, value_name = "FEATURE")]
    open: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as TOML
    PrintConfig,
    /// List navigable features and project files
    Features,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());
    init_logging(cli.log_level.as_deref())?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    match cli.command {
        Some(Commands::PrintConfig) => {
            print!("{}", config.to_toml()?);
            return Ok(());
        }
        Some(Commands::Features) => {
            print_features();
            return Ok(());
        }
        None => {}
    }

    let open = cli.open.as_deref().map(resolve_target).transpose()?;
    install_panic_hook();

    let geocoder = NominatimGeocoder::new(&config.geocoding)?;
    let mut app = App::new(config, Arc::new(geocoder));
    if let Some(target) = open {
        app.navigate(target);
    }
    app.run().await
}

/// Log to ~/.drivelab/logs/drivelab.log; stdout belongs to the TUI
fn init_logging(level: Option<&str>) -> Result<()> {
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    let filter = match level {
        Some(level) => EnvFilter::try_new(level).context("invalid --log-level")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(log_file)
        .with_ansi(false)
        .init();
    Ok(())
}

fn resolve_target(input: &str) -> Result<&'static str> {
    if input.trim().eq_ignore_ascii_case(LANDING_TARGET) {
        return Ok(LANDING_TARGET);
    }
    match FeatureKey::parse_loose(input) {
        Some(key) => Ok(key.display_name()),
        None => bail!("unknown feature '{}', see `drivelab features`", input),
    }
}

fn print_features() {
    println!("Features:");
    for key in FeatureKey::ALL {
        println!(
            "  {} {:<22} .{}",
            key.icon(),
            key.display_name(),
            key.file_extension()
        );
    }
    println!();
    println!("Project files:");
    for file in PROJECT_FILES {
        let opens = FeatureKey::from_file_name(file)
            .map(FeatureKey::display_name)
            .unwrap_or("(document)");
        println!("  {:<22} {}", file, opens);
    }
}
