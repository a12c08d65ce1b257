//! parley CLI: a single-page chat widget in the terminal

use clap::{Parser, Subcommand};
use parley_engine::{ChatConfig, ConfigError};
use parley_tui::headless;
use parley_tui::theme::{IconMode, ThemeName};
use parley_tui::UiConfig;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Chat with the WebScraper AI assistant
#[derive(Parser)]
#[command(name = "parley")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Chat settings file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Start with an empty transcript instead of the welcome exchange
    #[arg(long, global = true)]
    no_seed: bool,

    /// Color theme: mocha, latte or high-contrast
    #[arg(long, global = true, value_parser = parse_theme)]
    theme: Option<ThemeName>,

    /// Icon set: nerd, unicode or ascii
    #[arg(long, global = true, value_parser = parse_icons)]
    icons: Option<IconMode>,

    /// Write logs to this file (the TUI owns the terminal)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat widget (default when no command specified)
    Tui,

    /// Send one message without a terminal and print the transcript
    Send {
        /// Message text
        text: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_theme(name: &str) -> Result<ThemeName, String> {
    ThemeName::from_name(name).ok_or_else(|| format!("unknown theme '{name}'"))
}

fn parse_icons(name: &str) -> Result<IconMode, String> {
    IconMode::from_name(name).ok_or_else(|| format!("unknown icon set '{name}'"))
}

fn main() {
    let cli = Cli::parse();
    let headless = matches!(cli.command, Some(Commands::Send { .. }));

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref(), headless) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    info!(version = env!("CARGO_PKG_VERSION"), headless, "parley starting");

    let config = match load_config(cli.config.as_deref(), cli.no_seed) {
        Ok(config) => {
            debug!(?config, "configuration loaded");
            config
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        None | Some(Commands::Tui) => {
            let ui = UiConfig::from_env()
                .with_theme(cli.theme)
                .with_icons(cli.icons);
            if let Err(e) = rt.block_on(parley_tui::run_tui(config, &ui)) {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Send { text, json }) => {
            let transcript = rt.block_on(headless::run_send(&config, &text));
            if json {
                match transcript.to_json() {
                    Ok(out) => println!("{out}"),
                    Err(e) => {
                        eprintln!("Error: {e}");
                        std::process::exit(1);
                    }
                }
            } else {
                println!("{}", transcript.to_text());
            }
        }
    }
}

fn load_config(path: Option<&Path>, no_seed: bool) -> Result<ChatConfig, ConfigError> {
    let mut config = ChatConfig::load_or_default(path)?;
    if no_seed {
        config.seed_welcome = false;
    }
    Ok(config)
}

/// Install the tracing subscriber.
///
/// Headless runs log to stderr. The TUI logs only to `--log-file`, and not
/// at all without one.
fn init_logging(verbose: bool, log_file: Option<&Path>, headless: bool) -> std::io::Result<()> {
    let default_filter = if verbose { "parley=debug" } else { "parley=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(std::sync::Mutex::new(file)),
                )
                .init();
        }
        None if headless => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        None => {}
    }
    Ok(())
}
