//! Internal domain models for catalog search.
//!
//! These types are OUR types - they don't change when the provider API
//! changes. All provider responses get converted into these types via the
//! adapter layer.

use serde::{Deserialize, Serialize};

/// A normalized song result from the catalog.
///
/// Immutable once constructed; one instance per raw search result item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique external identifier on the provider
    pub catalog_id: String,
    /// Track title
    pub title: String,
    /// First listed artist only (other contributors are dropped)
    pub artist: String,
    /// Album title
    pub album: String,
    /// 30-second preview URL, when the provider supplies one
    pub preview_url: Option<String>,
    /// First album image, when the album has any
    pub album_art_url: Option<String>,
    /// Link to the track on the provider
    pub external_url: String,
    /// Provider-formatted release date (year or full date)
    pub release_date: String,
    /// Provider ranking signal, 0-100
    pub popularity: u8,
}

/// One search request, consumed within a single aggregator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Songs from one exact year
    ByYear { year: u16, limit: u32 },
    /// Free-text search over titles and artists
    ByText { text: String, limit: u32 },
    /// Free-text search restricted to one year
    ByTextAndYear { text: String, year: u16, limit: u32 },
    /// Songs from an inclusive start-end year window
    ByDecadeRange {
        start_year: u16,
        end_year: u16,
        limit: u32,
    },
}

impl SearchQuery {
    /// Build the provider query string for this request.
    ///
    /// Uses the provider's `year:` field filter syntax; free text is passed
    /// through verbatim.
    pub fn query_string(&self) -> String {
        match self {
            SearchQuery::ByYear { year, .. } => format!("year:{year}"),
            SearchQuery::ByText { text, .. } => text.clone(),
            SearchQuery::ByTextAndYear { text, year, .. } => format!("{text} year:{year}"),
            SearchQuery::ByDecadeRange {
                start_year,
                end_year,
                ..
            } => format!("year:{start_year}-{end_year}"),
        }
    }

    /// Requested result count (the client clamps to the provider cap).
    pub fn limit(&self) -> u32 {
        match self {
            SearchQuery::ByYear { limit, .. }
            | SearchQuery::ByText { limit, .. }
            | SearchQuery::ByTextAndYear { limit, .. }
            | SearchQuery::ByDecadeRange { limit, .. } => *limit,
        }
    }
}

/// Errors that can occur during catalog search.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    /// Client credentials missing/rejected, or the token exchange failed
    #[error("catalog authorization failed: {0}")]
    Auth(String),

    /// The search endpoint rejected our bearer token
    #[error("catalog rejected the access token")]
    TokenRejected,

    /// Network failure, timeout, or a non-success status from the provider
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    /// The response body did not have the expected shape
    #[error("failed to parse catalog response: {0}")]
    Parse(String),

    /// A single result item is missing a field the provider always sends
    #[error("catalog item missing required field `{field}`")]
    MalformedTrack { field: &'static str },
}

impl CatalogError {
    /// Create a malformed-track error naming the missing field.
    pub fn missing(field: &'static str) -> Self {
        Self::MalformedTrack { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_query_string() {
        let query = SearchQuery::ByYear {
            year: 1995,
            limit: 40,
        };
        assert_eq!(query.query_string(), "year:1995");
        assert_eq!(query.limit(), 40);
    }

    #[test]
    fn test_text_query_passes_through_verbatim() {
        let query = SearchQuery::ByText {
            text: "dancing queen abba".to_string(),
            limit: 20,
        };
        assert_eq!(query.query_string(), "dancing queen abba");
    }

    #[test]
    fn test_text_and_year_query_string() {
        let query = SearchQuery::ByTextAndYear {
            text: "queen".to_string(),
            year: 1977,
            limit: 20,
        };
        assert_eq!(query.query_string(), "queen year:1977");
    }

    #[test]
    fn test_decade_query_string() {
        let query = SearchQuery::ByDecadeRange {
            start_year: 1980,
            end_year: 1989,
            limit: 50,
        };
        assert_eq!(query.query_string(), "year:1980-1989");
    }

    #[test]
    fn test_error_display_names_field() {
        let err = CatalogError::missing("id");
        assert!(err.to_string().contains("`id`"));
    }
}
