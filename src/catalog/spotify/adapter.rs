//! Adapter layer: Convert Spotify DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if Spotify changes their response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::catalog::domain::{CatalogError, Track};

/// Convert one raw search result item into a [`Track`].
///
/// Pure and deterministic. Fails with [`CatalogError::MalformedTrack`] when a
/// field the provider always sends is absent; defaults are never synthesized.
/// Two fields are genuinely optional and pass through as `None`:
/// `preview_url` (null for many tracks) and the album image list (empty for
/// some local/bootleg albums).
///
/// A multi-artist track keeps only the first credited artist.
pub fn normalize(raw: dto::RawTrack) -> Result<Track, CatalogError> {
    let catalog_id = raw.id.ok_or(CatalogError::missing("id"))?;
    let title = raw.name.ok_or(CatalogError::missing("name"))?;

    let artist = raw
        .artists
        .into_iter()
        .next()
        .and_then(|a| a.name)
        .ok_or(CatalogError::missing("artists"))?;

    let album = raw.album.ok_or(CatalogError::missing("album"))?;
    let album_name = album.name.ok_or(CatalogError::missing("album.name"))?;
    let release_date = album
        .release_date
        .ok_or(CatalogError::missing("album.release_date"))?;
    let album_art_url = album.images.into_iter().next().map(|img| img.url);

    let external_url = raw
        .external_urls
        .spotify
        .ok_or(CatalogError::missing("external_urls.spotify"))?;

    let popularity = raw.popularity.ok_or(CatalogError::missing("popularity"))?;

    Ok(Track {
        catalog_id,
        title,
        artist,
        album: album_name,
        preview_url: raw.preview_url,
        album_art_url,
        external_url,
        release_date,
        popularity,
    })
}
