//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed
//! arguments and returns a `Result<()>`. With no subcommand the web server
//! is started.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{
    CatalogApi, SearchService, SpotifyClient, SpotifyTokenProvider, Track, DEFAULT_TEXT_LIMIT,
    DEFAULT_YEAR_LIMIT,
};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::web::server::DynSearchService;
use crate::{db, web};

/// Nostalgia CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (the default when no command is given)
    Serve {
        /// Address to listen on (overrides config)
        #[arg(short, long)]
        bind: Option<String>,
        /// Database file path (overrides config)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Search songs from one exact year
    Year {
        /// The year to search
        year: u16,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_YEAR_LIMIT)]
        limit: u32,
    },
    /// Free-text search, optionally restricted to a year
    Search {
        /// Song or artist text
        query: String,
        /// Restrict results to one year
        #[arg(short, long)]
        year: Option<u16>,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_TEXT_LIMIT)]
        limit: u32,
    },
    /// Search an inclusive decade range
    Decade {
        /// First year of the range
        start_year: u16,
        /// Last year of the range
        end_year: u16,
        /// Maximum number of results
        #[arg(short, long, default_value_t = DEFAULT_TEXT_LIMIT)]
        limit: u32,
    },
}

/// Dispatch the parsed command.
pub async fn run(args: Cli, config: Config) -> Result<()> {
    let command = args.command.unwrap_or(Commands::Serve {
        bind: None,
        db: None,
    });

    match command {
        Commands::Serve { bind, db } => serve(&config, bind, db).await,
        Commands::Year { year, limit } => {
            let tracks = build_service(&config).search_by_year(year, limit).await?;
            print_tracks(&tracks);
            Ok(())
        }
        Commands::Search { query, year, limit } => {
            let service = build_service(&config);
            let tracks = match year {
                Some(year) => service.search_by_text_and_year(&query, year, limit).await?,
                None => service.search_by_text(&query, limit).await?,
            };
            print_tracks(&tracks);
            Ok(())
        }
        Commands::Decade {
            start_year,
            end_year,
            limit,
        } => {
            if start_year > end_year {
                return Err(Error::invalid_request(
                    "start year must not be after end year",
                ));
            }
            let tracks = build_service(&config)
                .search_by_decade(start_year, end_year, limit)
                .await?;
            print_tracks(&tracks);
            Ok(())
        }
    }
}

/// Initialize the database and run the web server.
async fn serve(config: &Config, bind: Option<String>, db_path: Option<PathBuf>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let db_path = db_path.or_else(|| config.server.db_path.clone());

    let pool = db::init_db(&db::db_url(db_path.as_deref())).await?;
    let state = web::AppState::new(build_service(config), pool);

    web::run(state, &bind).await
}

/// Wire the catalog service from configured credentials.
fn build_service(config: &Config) -> DynSearchService {
    let credentials = config.resolve_credentials();
    if !credentials.is_configured() {
        tracing::warn!("catalog credentials not configured; searches will fail");
    }

    let client: Box<dyn CatalogApi> =
        Box::new(SpotifyClient::new(Box::new(SpotifyTokenProvider::new(credentials))));
    SearchService::with_market(client, config.search.market.clone())
}

/// Print ranked results, one line per track.
fn print_tracks(tracks: &[Track]) {
    if tracks.is_empty() {
        println!("No tracks found.");
        return;
    }

    for (i, track) in tracks.iter().enumerate() {
        println!(
            "{:>3}. [{:>3}] {} - {} ({}, {})",
            i + 1,
            track.popularity,
            track.artist,
            track.title,
            track.album,
            track.release_date
        );
    }
}
