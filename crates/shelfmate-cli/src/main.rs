//! shelfmate: command-line front end for the book recommendation engine.
//!
//! Loads the configured artifacts once, builds the engine, runs a single
//! subcommand and prints its result as JSON on stdout. Logs go to stderr (or
//! `LOG_FILE`) so the output stays machine-readable.

use anyhow::{ensure, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shelfmate_data::{load_artifacts, ShelfConfig};
use shelfmate_search::EngineContext;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "shelfmate")]
#[command(author, version, about = "Item-item book recommendations from precomputed artifacts")]
#[command(propagate_version = true)]
struct Cli {
    /// TOML configuration file (overrides SHELFMATE_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the artifacts (overrides the configured data_dir)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the hydrated popular-books list
    Popular {
        /// Print at most this many cards
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Recommend books similar to a title
    Recommend {
        /// Title to look up (case-insensitive)
        title: String,

        /// Number of neighbors (default: configured top_k)
        #[arg(short)]
        k: Option<usize>,
    },

    /// List every recommendable title, sorted
    Titles,

    /// Show catalog and recommender sizes
    Stats,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _file_guard = init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(subsystem = "cli", error = %e, "Command failed");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing with configurable output.
///
/// Environment variables:
///   LOG_FORMAT  - "json" or "text" (default: "text")
///   LOG_FILE    - path to log file (optional, enables file logging)
///   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
///   RUST_LOG    - standard env filter (default: "shelfmate=info")
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "shelfmate=info,shelfmate_data=info,shelfmate_search=info".into()
    });

    let registry = tracing_subscriber::registry().with(env_filter);

    if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("shelfmate.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console output on stderr; stdout carries the JSON result
        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config =
        ShelfConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.artifacts.data_dir = dir;
    }

    info!(
        subsystem = "cli",
        data_dir = %config.artifacts.data_dir.display(),
        top_k = config.engine.top_k,
        self_exclusion = %config.engine.self_exclusion,
        "Starting shelfmate"
    );

    let artifacts = load_artifacts(&config.artifacts)?;
    let engine = EngineContext::build(
        artifacts.books,
        &artifacts.popular,
        artifacts.titles,
        artifacts.similarity,
        &config.engine,
    )?;

    match cli.command {
        Commands::Popular { limit } => {
            let cards = engine.popular_cards();
            let shown = limit.map_or(cards.len(), |l| l.min(cards.len()));
            print_json(&cards[..shown])?;
        }
        Commands::Recommend { title, k } => {
            let outcome = match k {
                Some(k) => {
                    ensure!(k > 0, "-k must be at least 1");
                    engine.recommend_top(&title, k)
                }
                None => engine.recommend_detailed(&title),
            };
            print_json(&outcome)?;
        }
        Commands::Titles => print_json(&engine.titles())?,
        Commands::Stats => print_json(&engine.stats())?,
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_recommend_with_k() {
        let cli = Cli::try_parse_from(["shelfmate", "recommend", "The Hobbit", "-k", "3"]).unwrap();
        match cli.command {
            Commands::Recommend { title, k } => {
                assert_eq!(title, "The Hobbit");
                assert_eq!(k, Some(3));
            }
            _ => panic!("expected recommend"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shelfmate",
            "popular",
            "--limit",
            "10",
            "--data-dir",
            "/srv/books",
        ])
        .unwrap();

        assert_eq!(cli.data_dir, Some(PathBuf::from("/srv/books")));
        assert!(matches!(cli.command, Commands::Popular { limit: Some(10) }));
    }

    #[test]
    fn test_recommend_requires_title() {
        assert!(Cli::try_parse_from(["shelfmate", "recommend"]).is_err());
    }

    #[test]
    fn test_missing_artifacts_fail() {
        let dir = std::env::temp_dir().join("shelfmate-cli-missing-artifacts");
        let cli = Cli::try_parse_from([
            "shelfmate",
            "stats",
            "--data-dir",
            dir.to_str().unwrap(),
        ])
        .unwrap();

        assert!(run(cli).is_err());
    }
}
