mod cli;
mod clipboard;
mod input;
mod preview;
mod render;
mod runtime;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gostr_core::app::AppState;
use gostr_core::config::{Config, CoreConfig};
use gostr_core::nostr::NostrTransport;
use gostr_core::runtime::CommandRunner;
use gostr_core::tracing_setup::{init_cli_tracing, init_tracing};
use tracing::info;

use crate::cli::FeedArgs;
use crate::clipboard::SystemClipboard;
use crate::preview::HttpPreviewer;
use crate::runtime::run_app;

#[derive(Parser)]
#[command(name = "gostr")]
#[command(about = "Nostr feeds and threads in the terminal")]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream notes from followed authors
    Home(FeedArgs),
    /// Stream direct messages addressed to you
    Inbox(FeedArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = match &cli.config {
        Some(path) => CoreConfig::with_config_path(path),
        None => CoreConfig::default(),
    };
    let config = Config::load(&paths.config_path)
        .with_context(|| format!("loading {}", paths.config_path.display()))?;

    match cli.command {
        Some(Commands::Home(args)) => {
            init_cli_tracing(args.verbose);
            cli::run_feed(config, args, false).await
        }
        Some(Commands::Inbox(args)) => {
            init_cli_tracing(args.verbose);
            cli::run_feed(config, args, true).await
        }
        None => run_interactive(paths, config).await,
    }
}

async fn run_interactive(paths: CoreConfig, config: Config) -> Result<()> {
    let log_path = init_tracing(&paths.log_path())?;
    info!("starting, logging to {}", log_path.display());

    // Set up panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ui::terminal::restore();
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let transport = NostrTransport::connect(&config.active_relays()).await?;
    let runner = CommandRunner::new(
        Arc::new(transport.clone()),
        Arc::new(HttpPreviewer::new()),
        Arc::new(SystemClipboard),
        paths.config_path.clone(),
    );
    let mut app = AppState::new(config);
    let mut terminal = ui::terminal::init()?;

    let result = run_app(&mut terminal, &mut app, &runner).await;

    ui::terminal::restore()?;
    transport.disconnect().await;

    if let Err(err) = &result {
        eprintln!("Error: {err}");
    }
    result
}
