//! Inbound request models.

use serde::{Deserialize, Serialize};

/// The search form submitted by `POST /search`.
///
/// Starts a new search; the page is always the first.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchForm {
    /// The card name the user typed.
    #[serde(default)]
    pub search_query: String,
    /// The optional card type filter.
    #[serde(default)]
    pub card_type: String,
}

/// The query string of `GET /search`, used to page through a previous search.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SearchQuery {
    /// The literal search text of the original search.
    #[serde(default)]
    pub search_query: String,
    /// The card type filter of the original search.
    #[serde(default)]
    pub card_type: String,
    /// The requested page.
    ///
    /// Kept as text so that garbage coerces to the first page instead of
    /// rejecting the request; see [`parse_page`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl SearchQuery {
    /// Creates a `SearchQuery` pointing at a page of a search.
    pub fn new(
        search_query: impl Into<String>,
        card_type: impl Into<String>,
        page: u32,
    ) -> SearchQuery {
        SearchQuery {
            search_query: search_query.into(),
            card_type: card_type.into(),
            page: Some(page.to_string()),
        }
    }

    /// The requested page, coerced to a positive integer.
    pub fn page(&self) -> u32 {
        parse_page(self.page.as_deref())
    }

    /// Encodes the query as `application/x-www-form-urlencoded`, ready to be
    /// put after the `?` of a URL.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }

    /// Decodes a query string produced by [`SearchQuery::to_query_string`].
    pub fn from_query_string(query: &str) -> Result<SearchQuery, serde_urlencoded::de::Error> {
        serde_urlencoded::from_str(query)
    }
}

/// The query string of `GET /autocomplete`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AutocompleteQuery {
    /// The partial card name.
    #[serde(default)]
    pub q: String,
}

/// Parses a page number.
///
/// Anything that is not a positive integer (missing, empty, zero, negative,
/// non-numeric) is the first page. There is no upper bound; the remote
/// service decides whether a page exists.
pub fn parse_page(page: Option<&str>) -> u32 {
    page.and_then(|page| page.trim().parse::<u32>().ok())
        .filter(|&page| page > 0)
        .unwrap_or(1)
}
