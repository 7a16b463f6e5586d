//! Spotify Web API Data Transfer Objects
//!
//! These types match EXACTLY what the Spotify API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the spotify module - convert to domain types.
//!
//! API Reference: https://developer.spotify.com/documentation/web-api/reference/search
//!
//! We use the /v1/search endpoint with `type=track`, so only the `tracks`
//! page of the response is modeled. Per-item fields that the provider always
//! sends are still declared optional here; the adapter is where absence
//! becomes an error, so a single bad item fails item-by-item rather than
//! failing the whole response parse.

use serde::{Deserialize, Serialize};

/// Top-level search response (`type=track` requests)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Paging object holding the track results
    pub tracks: Option<TrackPage>,
}

/// One page of track results
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackPage {
    /// The result items, at most `limit` of them
    #[serde(default)]
    pub items: Vec<RawTrack>,
    /// Total matches on the provider side (may exceed `items.len()`)
    pub total: Option<u64>,
}

/// One raw track result item
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTrack {
    /// Spotify track ID
    pub id: Option<String>,
    /// Track title
    pub name: Option<String>,
    /// Contributing artists, first one is the primary credit
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    /// The album the track appears on
    pub album: Option<RawAlbum>,
    /// 30-second MP3 preview, null for many tracks
    pub preview_url: Option<String>,
    /// Known external URLs for this track
    #[serde(default)]
    pub external_urls: ExternalUrls,
    /// Popularity ranking, 0-100
    pub popularity: Option<u8>,
}

/// Simplified artist object
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawArtist {
    /// Spotify artist ID
    pub id: Option<String>,
    /// Artist name
    pub name: Option<String>,
}

/// Simplified album object
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAlbum {
    /// Album title
    pub name: Option<String>,
    /// Cover art in several sizes, widest first; may be empty
    #[serde(default)]
    pub images: Vec<RawImage>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub release_date: Option<String>,
}

/// One cover art image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawImage {
    /// Image source URL
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// External URL map (only the provider's own link is used)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ExternalUrls {
    /// Link to the item on open.spotify.com
    pub spotify: Option<String>,
}

/// Token endpoint response (client-credentials grant)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenResponse {
    /// The bearer token to send on search requests
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: Option<String>,
    /// Seconds until expiry (unused - a fresh token is fetched per call)
    pub expires_in: Option<u64>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Test parsing a full track item as the search endpoint returns it
    #[test]
    fn test_parse_search_response() {
        let json = r#"{
            "tracks": {
                "href": "https://api.spotify.com/v1/search?query=year%3A1995&type=track&offset=0&limit=2",
                "items": [{
                    "id": "4uLU6hMCjMI75M1A2tKUQC",
                    "name": "Gangsta's Paradise",
                    "artists": [
                        {"id": "0zN9Cf3GuHw6ZwHW8tXpcL", "name": "Coolio"},
                        {"id": "3M5aUsJJemRDHCdE2w6mvQ", "name": "L.V."}
                    ],
                    "album": {
                        "name": "Gangsta's Paradise",
                        "images": [
                            {"url": "https://i.scdn.co/image/ab67616d0000b273c0e",  "height": 640, "width": 640},
                            {"url": "https://i.scdn.co/image/ab67616d00001e02c0e", "height": 300, "width": 300}
                        ],
                        "release_date": "1995-11-02"
                    },
                    "preview_url": "https://p.scdn.co/mp3-preview/1ab",
                    "external_urls": {"spotify": "https://open.spotify.com/track/4uLU6hMCjMI75M1A2tKUQC"},
                    "popularity": 85
                }],
                "limit": 2,
                "offset": 0,
                "total": 10000
            }
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse search response");

        let page = response.tracks.expect("tracks page present");
        assert_eq!(page.total, Some(10000));
        assert_eq!(page.items.len(), 1);

        let item = &page.items[0];
        assert_eq!(item.id.as_deref(), Some("4uLU6hMCjMI75M1A2tKUQC"));
        assert_eq!(item.name.as_deref(), Some("Gangsta's Paradise"));
        assert_eq!(item.artists.len(), 2);
        assert_eq!(item.artists[0].name.as_deref(), Some("Coolio"));
        assert_eq!(item.popularity, Some(85));

        let album = item.album.as_ref().unwrap();
        assert_eq!(album.release_date.as_deref(), Some("1995-11-02"));
        assert_eq!(album.images.len(), 2);
        assert_eq!(album.images[0].height, Some(640));
    }

    /// Test parsing a track with a null preview and no album art
    #[test]
    fn test_parse_track_with_nulls() {
        let json = r#"{
            "id": "track-1",
            "name": "Obscure B-Side",
            "artists": [{"id": "a1", "name": "Someone"}],
            "album": {"name": "Rarities", "images": [], "release_date": "1971"},
            "preview_url": null,
            "external_urls": {"spotify": "https://open.spotify.com/track/track-1"},
            "popularity": 0
        }"#;

        let item: RawTrack = serde_json::from_str(json).expect("Should parse track");

        assert!(item.preview_url.is_none());
        assert!(item.album.as_ref().unwrap().images.is_empty());
        assert_eq!(item.popularity, Some(0));
    }

    /// Unknown fields in the response must not break parsing
    #[test]
    fn test_extra_fields_are_ignored() {
        let json = r#"{
            "id": "track-2",
            "name": "Song",
            "artists": [{"id": "a1", "name": "Artist", "uri": "spotify:artist:a1"}],
            "album": {"name": "Album", "album_type": "album", "images": [], "release_date": "1999"},
            "disc_number": 1,
            "duration_ms": 201000,
            "explicit": false,
            "external_urls": {"spotify": "https://open.spotify.com/track/track-2"},
            "popularity": 42
        }"#;

        let item: RawTrack = serde_json::from_str(json).expect("Should ignore unknown fields");
        assert_eq!(item.name.as_deref(), Some("Song"));
    }

    /// A response without the tracks page still parses; the client turns it
    /// into a parse error rather than an empty result
    #[test]
    fn test_parse_response_missing_tracks_page() {
        let response: SearchResponse =
            serde_json::from_str("{}").expect("Should parse empty object");
        assert!(response.tracks.is_none());
    }

    /// Test parsing the token endpoint response
    #[test]
    fn test_parse_token_response() {
        let json = r#"{
            "access_token": "BQDWk0BA5lM",
            "token_type": "Bearer",
            "expires_in": 3600
        }"#;

        let token: TokenResponse = serde_json::from_str(json).expect("Should parse token");
        assert_eq!(token.access_token, "BQDWk0BA5lM");
        assert_eq!(token.expires_in, Some(3600));
    }
}
