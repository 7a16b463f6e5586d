//! HTTP server setup and routing
//!
//! Sets up the Axum server: public routes (health, login, register) and the
//! guarded routes behind the login middleware. `build_router` is separate
//! from `run` so tests can drive the full router in process.

use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::catalog::{CatalogApi, SearchService};
use crate::error::{Error, Result};
use crate::web::session::SessionStore;
use crate::web::{handlers, session};

/// The search service as the router sees it: any catalog behind the trait.
pub type DynSearchService = SearchService<Box<dyn CatalogApi>>;

/// Shared application context passed to all handlers.
///
/// Clone is cheap: the service is behind an Arc, the pool and session store
/// are internally shared.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<DynSearchService>,
    pub db_pool: SqlitePool,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(search: DynSearchService, db_pool: SqlitePool) -> Self {
        Self {
            search: Arc::new(search),
            db_pool,
            sessions: SessionStore::new(),
        }
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    // Everything a visitor needs a session for: the search page, the search
    // API, and playlist management.
    let guarded = Router::new()
        .route("/", get(handlers::index))
        .route("/api/logout", post(handlers::logout))
        .route("/api/search", get(handlers::search_text))
        .route("/api/search/year/:year", get(handlers::search_year))
        .route(
            "/api/search/decade/:start_year/:end_year",
            get(handlers::search_decade),
        )
        .route(
            "/api/playlists",
            get(handlers::list_playlists).post(handlers::create_playlist),
        )
        .route(
            "/api/playlists/:id/tracks",
            get(handlers::playlist_tracks).post(handlers::add_playlist_track),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_login,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .route("/login", get(handlers::login_page))
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .merge(guarded)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the HTTP server until ctrl-c.
pub async fn run(state: AppState, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::server(e.to_string()))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
