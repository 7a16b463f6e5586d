//! Database module for account and playlist persistence.
//!
//! Uses SQLx with SQLite for lightweight, embedded database storage.
//! Provides async operations for:
//! - User account rows (creation and lookup live in `crate::users`)
//! - Playlist CRUD operations
//! - Saved playlist tracks in position order
//!
//! # Example
//!
//! ```ignore
//! use nostalgia::db::{init_db, list_playlists};
//!
//! let pool = init_db("sqlite:nostalgia.db").await?;
//! let playlists = list_playlists(&pool, user_id).await?;
//! ```

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::catalog::Track;
use crate::model::{Playlist, PlaylistTrack};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "nostalgia.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Create a playlist for a user.
///
/// # Returns
///
/// The database ID of the new playlist.
pub async fn create_playlist(
    pool: &SqlitePool,
    user_id: i64,
    year: i64,
    name: &str,
) -> sqlx::Result<i64> {
    let result = sqlx::query("INSERT INTO playlists (user_id, year, name) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(year)
        .bind(name)
        .execute(pool)
        .await?;
    Ok(result.last_insert_rowid())
}

/// Get one playlist by ID.
pub async fn get_playlist(pool: &SqlitePool, playlist_id: i64) -> sqlx::Result<Option<Playlist>> {
    sqlx::query_as("SELECT id, user_id, year, name, created_at FROM playlists WHERE id = ?")
        .bind(playlist_id)
        .fetch_optional(pool)
        .await
}

/// List a user's playlists, newest first.
pub async fn list_playlists(pool: &SqlitePool, user_id: i64) -> sqlx::Result<Vec<Playlist>> {
    sqlx::query_as(
        "SELECT id, user_id, year, name, created_at FROM playlists \
         WHERE user_id = ? ORDER BY id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Append a catalog track to a playlist.
///
/// The track takes the next free position at the end of the playlist.
///
/// # Returns
///
/// The database ID of the new playlist_tracks row.
pub async fn add_playlist_track(
    pool: &SqlitePool,
    playlist_id: i64,
    track: &Track,
) -> sqlx::Result<i64> {
    let next_position: i64 = sqlx::query_scalar(
        "SELECT COALESCE(MAX(position), 0) + 1 FROM playlist_tracks WHERE playlist_id = ?",
    )
    .bind(playlist_id)
    .fetch_one(pool)
    .await?;

    let result = sqlx::query(
        "INSERT INTO playlist_tracks \
         (playlist_id, spotify_id, title, artist, preview_url, album_art, spotify_url, position) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(playlist_id)
    .bind(&track.catalog_id)
    .bind(&track.title)
    .bind(&track.artist)
    .bind(&track.preview_url)
    .bind(&track.album_art_url)
    .bind(&track.external_url)
    .bind(next_position)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// List a playlist's tracks in playlist order.
pub async fn playlist_tracks(
    pool: &SqlitePool,
    playlist_id: i64,
) -> sqlx::Result<Vec<PlaylistTrack>> {
    sqlx::query_as(
        "SELECT id, playlist_id, spotify_id, title, artist, preview_url, album_art, \
                spotify_url, position \
         FROM playlist_tracks WHERE playlist_id = ? ORDER BY position",
    )
    .bind(playlist_id)
    .fetch_all(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users;

    /// In-memory pool with the full schema applied.
    ///
    /// One connection only: every connection to `:memory:` opens its own
    /// database.
    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    fn sample_track(id: &str, popularity: u8) -> Track {
        Track {
            catalog_id: id.to_string(),
            title: format!("Song {id}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            preview_url: Some(format!("https://p.example.com/{id}.mp3")),
            album_art_url: None,
            external_url: format!("https://open.spotify.com/track/{id}"),
            release_date: "1995-06-01".to_string(),
            popularity,
        }
    }

    #[test]
    fn test_db_url_default() {
        assert_eq!(db_url(None), "sqlite:nostalgia.db");
    }

    #[test]
    fn test_db_url_with_path() {
        let path = std::path::Path::new("/tmp/test.db");
        assert_eq!(db_url(Some(path)), "sqlite:/tmp/test.db");
    }

    #[tokio::test]
    async fn test_playlist_round_trip() {
        let pool = test_pool().await;
        let user_id = users::create_user(&pool, "alice", "alice@example.com", "hunter2")
            .await
            .unwrap();

        let playlist_id = create_playlist(&pool, user_id, 1995, "My 1995 Hits")
            .await
            .unwrap();

        let playlists = list_playlists(&pool, user_id).await.unwrap();
        assert_eq!(playlists.len(), 1);
        assert_eq!(playlists[0].id, playlist_id);
        assert_eq!(playlists[0].year, 1995);
        assert_eq!(playlists[0].name, "My 1995 Hits");

        let found = get_playlist(&pool, playlist_id).await.unwrap().unwrap();
        assert_eq!(found.user_id, user_id);
    }

    #[tokio::test]
    async fn test_playlist_tracks_keep_insertion_order() {
        let pool = test_pool().await;
        let user_id = users::create_user(&pool, "bob", "bob@example.com", "pw")
            .await
            .unwrap();
        let playlist_id = create_playlist(&pool, user_id, 1988, "Late Eighties")
            .await
            .unwrap();

        add_playlist_track(&pool, playlist_id, &sample_track("t1", 80))
            .await
            .unwrap();
        add_playlist_track(&pool, playlist_id, &sample_track("t2", 95))
            .await
            .unwrap();
        add_playlist_track(&pool, playlist_id, &sample_track("t3", 10))
            .await
            .unwrap();

        let tracks = playlist_tracks(&pool, playlist_id).await.unwrap();
        let ids: Vec<&str> = tracks.iter().map(|t| t.spotify_id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t2", "t3"]);
        assert_eq!(tracks[0].position, Some(1));
        assert_eq!(tracks[2].position, Some(3));
    }

    #[tokio::test]
    async fn test_track_fields_survive_the_round_trip() {
        let pool = test_pool().await;
        let user_id = users::create_user(&pool, "carol", "carol@example.com", "pw")
            .await
            .unwrap();
        let playlist_id = create_playlist(&pool, user_id, 1971, "Seventies")
            .await
            .unwrap();

        let track = sample_track("t9", 42);
        add_playlist_track(&pool, playlist_id, &track).await.unwrap();

        let saved = &playlist_tracks(&pool, playlist_id).await.unwrap()[0];
        assert_eq!(saved.spotify_id, "t9");
        assert_eq!(saved.title, "Song t9");
        assert_eq!(saved.artist, "Artist");
        assert_eq!(saved.preview_url.as_deref(), Some("https://p.example.com/t9.mp3"));
        assert!(saved.album_art.is_none());
        assert_eq!(
            saved.spotify_url.as_deref(),
            Some("https://open.spotify.com/track/t9")
        );
    }
}
