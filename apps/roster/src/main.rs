use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{CommandCoordinator, HttpUserStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod supervisor;

use commands::{dispatch, parse_line, Flow};
use config::{load_settings, parse_page_size};
use render::render_view;
use supervisor::render_guarded;

#[derive(Parser, Debug)]
#[command(about = "Browse and edit the remote user roster")]
struct Args {
    /// Base URL of the user collection (the service exposing /users).
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    page_size: Option<String>,
    /// Settings file; defaults to ./roster.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref());
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(raw) = args.page_size.as_deref() {
        settings.page_size = parse_page_size(raw)
            .with_context(|| format!("--page-size must be a positive integer, got '{raw}'"))?;
    }

    let store = HttpUserStore::new(&settings.base_url)
        .with_context(|| format!("cannot use '{}' as the user service", settings.base_url))?;
    let coordinator = CommandCoordinator::with_page_size(Arc::new(store), settings.page_size);

    coordinator.initialize().await;
    show(&coordinator, None).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let notice = match parse_line(&line) {
            Ok(command) => match dispatch(&coordinator, command).await {
                Flow::Continue(notice) => notice,
                Flow::Quit => break,
            },
            Err(err) => Some(err.to_string()),
        };
        show(&coordinator, notice.as_deref()).await?;
    }

    coordinator.unmount().await;
    Ok(())
}

async fn show(coordinator: &CommandCoordinator, notice: Option<&str>) -> Result<()> {
    let Some(state) = coordinator.snapshot().await else {
        return Ok(());
    };
    let screen = render_guarded(|| render_view(&state));

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{screen}")?;
    if let Some(notice) = notice {
        writeln!(stdout, "{notice}")?;
    }
    write!(stdout, "> ")?;
    stdout.flush()?;
    Ok(())
}
