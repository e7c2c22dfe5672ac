//! ConnectPy hot-seat terminal client.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use connect_session::terminal::{self, Terminal};
use connect_session::{AppConfig, GameRoom};

/// Play ConnectPy with two players on one terminal.
#[derive(Parser)]
#[command(name = "connect-play", about = "ConnectPy terminal client")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short = 'c', long = "config")]
    config_path: Option<PathBuf>,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    columns: Option<usize>,

    /// Override the run length needed to win
    #[arg(long)]
    win_zone: Option<usize>,

    /// Override the idle timeout in seconds
    #[arg(long)]
    wait_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the board
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config_path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => {
            info!("No config specified, defaults will be used");
            AppConfig::default()
        }
    };
    if let Some(rows) = cli.rows {
        config.game.rows = rows;
    }
    if let Some(columns) = cli.columns {
        config.game.columns = columns;
    }
    if let Some(win_zone) = cli.win_zone {
        config.game.win_length = win_zone;
    }
    if let Some(wait_timeout) = cli.wait_timeout {
        config.client.wait_timeout = wait_timeout;
    }
    config.validate()?;

    info!(
        rows = config.game.rows,
        columns = config.game.columns,
        win_zone = config.game.win_length,
        "Starting ConnectPy"
    );

    let wait_timeout = config.client.wait_timeout();
    let mut room = GameRoom::new(config.game, Some(wait_timeout))?;
    let mut terminal = Terminal::new(wait_timeout);

    terminal::run_client(&mut room, &mut terminal).await
}
