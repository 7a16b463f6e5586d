//! HTTP request handlers
//!
//! Implements the JSON API for account, search, and playlist endpoints,
//! plus the two embedded pages. Search endpoints delegate straight to the
//! catalog service; failures map onto status codes in [`ApiError`].

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, Track, DEFAULT_TEXT_LIMIT, DEFAULT_YEAR_LIMIT};
use crate::db;
use crate::model::{Playlist, PlaylistTrack};
use crate::users::{self, UserError};
use crate::web::server::AppState;
use crate::web::session::{self, CurrentUser};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    name: String,
    version: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct TextSearchParams {
    pub q: String,
    pub year: Option<u16>,
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct LimitParam {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub year: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}

// ============================================================================
// Error Mapping
// ============================================================================

/// A handler failure with its HTTP mapping.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_request", message)
    }

    fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", "no such playlist")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{}: {}", self.code, self.message);
        }
        (
            self.status,
            Json(ErrorResponse {
                error: self.code,
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let code = match err {
            CatalogError::Auth(_) | CatalogError::TokenRejected => "catalog_auth",
            CatalogError::Unavailable(_) => "catalog_unavailable",
            CatalogError::Parse(_) | CatalogError::MalformedTrack { .. } => "catalog_contract",
        };
        Self::new(StatusCode::BAD_GATEWAY, code, err.to_string())
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Duplicate => Self::new(StatusCode::CONFLICT, "account_exists", err.to_string()),
            UserError::Invalid(_) => Self::bad_request(err.to_string()),
            UserError::Database(e) => e.into(),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "database", err.to_string())
    }
}

// ============================================================================
// Pages
// ============================================================================

/// Search page (guarded).
pub async fn index() -> Html<&'static str> {
    Html(include_str!("pages/index.html"))
}

/// Login/register page (public).
pub async fn login_page() -> Html<&'static str> {
    Html(include_str!("pages/login.html"))
}

/// Service health and identity.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Accounts
// ============================================================================

/// Create an account and start a session for it.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let user_id =
        users::create_user(&state.db_pool, &body.username, &body.email, &body.password).await?;
    tracing::info!("registered user `{}`", body.username);

    let token = state.sessions.create(user_id);
    let response = (
        StatusCode::CREATED,
        [(header::SET_COOKIE, session::session_cookie(&token))],
        Json(SessionResponse {
            user_id,
            username: body.username,
        }),
    );
    Ok(response.into_response())
}

/// Verify credentials and start a session.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let user = users::authenticate(&state.db_pool, &body.username, &body.password)
        .await?
        .ok_or_else(|| {
            ApiError::new(
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "unknown username or wrong password",
            )
        })?;

    let token = state.sessions.create(user.id);
    let response = (
        [(header::SET_COOKIE, session::session_cookie(&token))],
        Json(SessionResponse {
            user_id: user.id,
            username: user.username,
        }),
    );
    Ok(response.into_response())
}

/// End the current session.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session::session_token(&headers) {
        state.sessions.remove(&token);
    }
    (
        [(header::SET_COOKIE, session::clear_session_cookie())],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}

// ============================================================================
// Search
// ============================================================================

/// Songs from one exact year, most popular first.
pub async fn search_year(
    State(state): State<AppState>,
    Path(year): Path<u16>,
    Query(params): Query<LimitParam>,
) -> Result<Json<SearchResults>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_YEAR_LIMIT);
    let tracks = state.search.search_by_year(year, limit).await?;
    Ok(Json(SearchResults {
        count: tracks.len(),
        tracks,
    }))
}

/// Free-text search, optionally restricted to a year.
pub async fn search_text(
    State(state): State<AppState>,
    Query(params): Query<TextSearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    if params.q.trim().is_empty() {
        return Err(ApiError::bad_request("query parameter `q` must not be empty"));
    }

    let limit = params.limit.unwrap_or(DEFAULT_TEXT_LIMIT);
    let tracks = match params.year {
        Some(year) => {
            state
                .search
                .search_by_text_and_year(&params.q, year, limit)
                .await?
        }
        None => state.search.search_by_text(&params.q, limit).await?,
    };
    Ok(Json(SearchResults {
        count: tracks.len(),
        tracks,
    }))
}

/// Songs from an inclusive year window.
pub async fn search_decade(
    State(state): State<AppState>,
    Path((start_year, end_year)): Path<(u16, u16)>,
    Query(params): Query<LimitParam>,
) -> Result<Json<SearchResults>, ApiError> {
    if start_year > end_year {
        return Err(ApiError::bad_request(
            "start year must not be after end year",
        ));
    }

    let limit = params.limit.unwrap_or(DEFAULT_TEXT_LIMIT);
    let tracks = state
        .search
        .search_by_decade(start_year, end_year, limit)
        .await?;
    Ok(Json(SearchResults {
        count: tracks.len(),
        tracks,
    }))
}

// ============================================================================
// Playlists
// ============================================================================

/// Create a playlist owned by the current user.
pub async fn create_playlist(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<Playlist>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("playlist name must not be empty"));
    }

    let playlist_id = db::create_playlist(&state.db_pool, user.0, body.year, &body.name).await?;
    let playlist = db::get_playlist(&state.db_pool, playlist_id)
        .await?
        .ok_or_else(|| ApiError::from(sqlx::Error::RowNotFound))?;

    Ok((StatusCode::CREATED, Json(playlist)))
}

/// List the current user's playlists.
pub async fn list_playlists(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Vec<Playlist>>, ApiError> {
    Ok(Json(db::list_playlists(&state.db_pool, user.0).await?))
}

/// Append a catalog track to one of the current user's playlists.
pub async fn add_playlist_track(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(playlist_id): Path<i64>,
    Json(track): Json<Track>,
) -> Result<(StatusCode, Json<PlaylistTrack>), ApiError> {
    owned_playlist(&state, playlist_id, user).await?;

    let row_id = db::add_playlist_track(&state.db_pool, playlist_id, &track).await?;
    let saved = db::playlist_tracks(&state.db_pool, playlist_id)
        .await?
        .into_iter()
        .find(|t| t.id == row_id)
        .ok_or_else(|| ApiError::from(sqlx::Error::RowNotFound))?;

    Ok((StatusCode::CREATED, Json(saved)))
}

/// List a playlist's tracks in playlist order.
pub async fn playlist_tracks(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(playlist_id): Path<i64>,
) -> Result<Json<Vec<PlaylistTrack>>, ApiError> {
    owned_playlist(&state, playlist_id, user).await?;
    Ok(Json(db::playlist_tracks(&state.db_pool, playlist_id).await?))
}

/// Fetch a playlist the current user owns.
///
/// Another user's playlist reports not-found, the same as a missing one.
async fn owned_playlist(
    state: &AppState,
    playlist_id: i64,
    user: CurrentUser,
) -> Result<Playlist, ApiError> {
    let playlist = db::get_playlist(&state.db_pool, playlist_id)
        .await?
        .filter(|p| p.user_id == user.0)
        .ok_or_else(ApiError::not_found)?;
    Ok(playlist)
}
