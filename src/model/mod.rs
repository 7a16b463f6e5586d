//! Core data models for accounts and playlists.
//!
//! Defines the persistent entities: [`User`], [`Playlist`], and
//! [`PlaylistTrack`]. These are derived from SQLx for database mapping.
//!
//! # Database Schema
//!
//! The models map to the following tables:
//! - `users` - Local accounts with unique username and email
//! - `playlists` - Per-user, per-year track collections
//! - `playlist_tracks` - Saved catalog tracks in playlist order

use serde::Serialize;
use sqlx::FromRow;

/// A registered account.
///
/// `password_hash` never leaves the process; API responses use
/// purpose-built structs instead of serializing this type.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Login name (unique)
    pub username: String,
    /// Contact address (unique)
    pub email: String,
    /// Salted digest, `v1$<salt>$<digest>` format
    pub password_hash: String,
    /// Row creation timestamp (SQLite CURRENT_TIMESTAMP)
    pub created_at: String,
}

/// A user's playlist for one year.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Playlist {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    /// The year this playlist collects
    pub year: i64,
    /// Display name (e.g., "My 1995 Hits")
    pub name: String,
    /// Row creation timestamp (SQLite CURRENT_TIMESTAMP)
    pub created_at: String,
}

/// A catalog track saved into a playlist.
///
/// Column names keep the provider-specific spelling the schema has always
/// used (`spotify_id`, `album_art`, `spotify_url`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistTrack {
    /// Database ID (auto-generated)
    pub id: i64,
    /// Owning playlist
    pub playlist_id: i64,
    /// Catalog identifier of the saved track
    pub spotify_id: String,
    /// Track title
    pub title: String,
    /// First credited artist
    pub artist: String,
    /// Preview clip URL, when the catalog had one
    pub preview_url: Option<String>,
    /// Album art URL, when the catalog had one
    pub album_art: Option<String>,
    /// Link to the track on the provider
    pub spotify_url: Option<String>,
    /// 1-based order within the playlist
    pub position: Option<i64>,
}
