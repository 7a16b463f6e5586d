//! Search aggregation service - the public entry point of the catalog layer.
//!
//! Four operations, one per [`SearchQuery`] variant, each following the same
//! pipeline: build the provider query string, run one bounded search through
//! the [`CatalogApi`], normalize every raw item, apply the result policy,
//! and return the ranked list.

use crate::catalog::domain::{CatalogError, SearchQuery, Track};
use crate::catalog::spotify::adapter;
use crate::catalog::traits::CatalogApi;

/// Default page size for exact-year searches
pub const DEFAULT_YEAR_LIMIT: u32 = 40;
/// Default page size for the other search modes
pub const DEFAULT_TEXT_LIMIT: u32 = 20;

/// Market pinned for exact-year searches when none is configured
const DEFAULT_MARKET: &str = "US";

/// Exact-year results with popularity at or below this are dropped
const YEAR_POPULARITY_FLOOR: u8 = 1;

/// High-level search API over a catalog implementation.
///
/// Holds no mutable state; one instance serves concurrent callers.
pub struct SearchService<C> {
    catalog: C,
    market: Option<String>,
}

impl<C: CatalogApi> SearchService<C> {
    /// Create a service over the given catalog.
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            market: None,
        }
    }

    /// Override the market code applied to exact-year searches.
    pub fn with_market(catalog: C, market: Option<String>) -> Self {
        Self { catalog, market }
    }

    /// Songs from one exact year, most popular first.
    ///
    /// Unlike the other three operations, this one drops results with
    /// popularity at or below 1: exact-year queries surface obscure reissues
    /// and compilations that near-zero popularity identifies.
    pub async fn search_by_year(&self, year: u16, limit: u32) -> Result<Vec<Track>, CatalogError> {
        self.execute(SearchQuery::ByYear { year, limit }).await
    }

    /// Free-text search over titles and artists, most popular first.
    pub async fn search_by_text(&self, text: &str, limit: u32) -> Result<Vec<Track>, CatalogError> {
        self.execute(SearchQuery::ByText {
            text: text.to_string(),
            limit,
        })
        .await
    }

    /// Free-text search restricted to one year, most popular first.
    pub async fn search_by_text_and_year(
        &self,
        text: &str,
        year: u16,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError> {
        self.execute(SearchQuery::ByTextAndYear {
            text: text.to_string(),
            year,
            limit,
        })
        .await
    }

    /// Songs from an inclusive year window, most popular first.
    pub async fn search_by_decade(
        &self,
        start_year: u16,
        end_year: u16,
        limit: u32,
    ) -> Result<Vec<Track>, CatalogError> {
        self.execute(SearchQuery::ByDecadeRange {
            start_year,
            end_year,
            limit,
        })
        .await
    }

    /// Shared pipeline behind the four entry points.
    ///
    /// Errors from the catalog or the normalizer propagate unchanged; a
    /// single malformed item aborts the whole call rather than being dropped,
    /// so upstream contract breaks stay visible.
    async fn execute(&self, query: SearchQuery) -> Result<Vec<Track>, CatalogError> {
        // The market applies to exact-year searches only; the other modes
        // search without one.
        let market = match query {
            SearchQuery::ByYear { .. } => Some(self.market.as_deref().unwrap_or(DEFAULT_MARKET)),
            _ => None,
        };

        let query_string = query.query_string();
        let raw = self
            .catalog
            .search(&query_string, query.limit(), market)
            .await?;

        let tracks = raw
            .into_iter()
            .map(adapter::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        let floor = match query {
            SearchQuery::ByYear { .. } => Some(YEAR_POPULARITY_FLOOR),
            _ => None,
        };

        let ranked = rank(tracks, floor);
        tracing::debug!("search `{}` returned {} tracks", query_string, ranked.len());
        Ok(ranked)
    }
}

/// Apply the result policy: optional popularity floor, then rank by
/// descending popularity. The sort is stable, so ties keep the provider's
/// original relative order.
fn rank(mut tracks: Vec<Track>, popularity_floor: Option<u8>) -> Vec<Track> {
    if let Some(floor) = popularity_floor {
        tracks.retain(|t| t.popularity > floor);
    }
    tracks.sort_by(|a, b| b.popularity.cmp(&a.popularity));
    tracks
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn track_with_popularity(index: usize, popularity: u8) -> Track {
        Track {
            catalog_id: format!("t{index}"),
            title: format!("Track {index}"),
            artist: "Artist".to_string(),
            album: "Album".to_string(),
            preview_url: None,
            album_art_url: None,
            external_url: format!("https://open.spotify.com/track/t{index}"),
            release_date: "1995".to_string(),
            popularity,
        }
    }

    proptest! {
        /// Ranked results are non-increasing in popularity
        #[test]
        fn rank_orders_by_descending_popularity(values in prop::collection::vec(0u8..=100, 0..40)) {
            let tracks: Vec<Track> = values
                .iter()
                .enumerate()
                .map(|(i, &p)| track_with_popularity(i, p))
                .collect();

            let ranked = rank(tracks, None);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].popularity >= pair[1].popularity);
            }
        }

        /// A popularity floor never leaks an at-or-below item through
        #[test]
        fn rank_floor_is_strict(values in prop::collection::vec(0u8..=100, 0..40)) {
            let tracks: Vec<Track> = values
                .iter()
                .enumerate()
                .map(|(i, &p)| track_with_popularity(i, p))
                .collect();

            let ranked = rank(tracks, Some(1));
            prop_assert!(ranked.iter().all(|t| t.popularity > 1));
        }

        /// Ties keep their original relative order (stable sort)
        #[test]
        fn rank_is_stable_for_ties(count in 2usize..20) {
            let tracks: Vec<Track> = (0..count).map(|i| track_with_popularity(i, 50)).collect();

            let ranked = rank(tracks.clone(), None);
            prop_assert_eq!(ranked, tracks);
        }
    }
}
