//! Nostalgia - browse and search songs by year or decade.
//!
//! A small web application over the Spotify catalog: registered users search
//! songs by text, exact year, or decade range, and collect results into
//! playlists. Search can also be run directly from the CLI.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod users;
pub mod web;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("nostalgia=info".parse().unwrap()))
        .init();

    let config = config::load();
    cli::run(args, config).await?;
    Ok(())
}
