//! Card search.
//!
//! Turns what the user typed into one or two remote queries. A new search
//! first asks for autocomplete suggestions; when the top suggestion is not
//! what the user typed, the search is *ambiguous* and the suggestion is
//! looked up by its exact name next to the user's own broad query. Paging
//! through results only ever repeats the broad query.

use derive_more::{Display, Error, From};

use mtgfinder_model::{
    ValidationError,
    request::{SearchForm, SearchQuery},
    response::CardResultPage,
};

use crate::request::validate::{ValidatedQuery, strip_exact_marker, validate_search_input};
use crate::scryfall::Client;

/// Autocomplete prefixes shorter than this get no suggestions.
pub const MIN_SUGGESTION_PREFIX: usize = 2;

/// Whether a request starts a search or pages through one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    New,
    Paginated,
}

/// A search, as requested by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRequest {
    /// The card name, untrimmed.
    pub name: String,
    /// The card type filter, untrimmed. May be empty.
    pub card_type: String,
    /// The page to fetch, starting at 1.
    pub page: u32,
    pub kind: RequestKind,
}

impl SearchRequest {
    /// Creates a new search for the first page.
    pub fn new(name: impl Into<String>, card_type: impl Into<String>) -> SearchRequest {
        SearchRequest {
            name: name.into(),
            card_type: card_type.into(),
            page: 1,
            kind: RequestKind::New,
        }
    }

    /// Creates a request for another page of a previous search.
    pub fn paginated(
        name: impl Into<String>,
        card_type: impl Into<String>,
        page: u32,
    ) -> SearchRequest {
        SearchRequest {
            name: name.into(),
            card_type: card_type.into(),
            page: page.max(1),
            kind: RequestKind::Paginated,
        }
    }
}

impl From<SearchForm> for SearchRequest {
    fn from(form: SearchForm) -> Self {
        SearchRequest::new(form.search_query, form.card_type)
    }
}

impl From<SearchQuery> for SearchRequest {
    fn from(query: SearchQuery) -> Self {
        let page = query.page();
        SearchRequest::paginated(query.search_query, query.card_type, page)
    }
}

/// A search that did not produce results.
#[derive(Debug, Display, Error, From)]
pub enum SearchError {
    /// The input was rejected.
    #[display("{_0}")]
    Validation(ValidationError),
    /// The remote service had no cards, or could not be reached.
    #[display("Sorry, no cards matching your search for '{query}' were found.")]
    #[from(ignore)]
    NotFound { query: String },
}

/// Searches for cards.
///
/// Cheaply cloneable.
#[derive(Clone, Debug)]
pub struct SearchService {
    client: Client,
}

impl SearchService {
    /// Creates a new `SearchService` over a remote client.
    pub fn new(client: Client) -> SearchService {
        SearchService { client }
    }

    /// The remote client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Runs a search.
    pub async fn execute(&self, request: SearchRequest) -> Result<CardResultPage, SearchError> {
        let ValidatedQuery { name, card_type } =
            validate_search_input(&request.name, &request.card_type)?;

        let suggestion = match request.kind {
            RequestKind::New => self.ambiguous_suggestion(&name).await,
            RequestKind::Paginated => None,
        };

        let broad = broad_query(&name, &card_type);
        tracing::debug!(%broad, ?suggestion, page = request.page, "searching");

        let Some(list) = self.client.search(&broad).page(request.page).await else {
            let query = if name.is_empty() { broad } else { name };
            return Err(SearchError::NotFound { query });
        };

        let exact_cards = match suggestion.as_deref() {
            Some(suggestion) => self
                .client
                .search(exact_query(suggestion, &card_type))
                .await
                .map(|list| list.data)
                .unwrap_or_default(),
            None => Vec::new(),
        };

        Ok(CardResultPage {
            query: name,
            card_type,
            cards: list.data,
            has_more: list.has_more,
            total_cards: list.total_cards,
            page: request.page,
            ambiguous: suggestion.is_some(),
            suggestion,
            exact_cards,
        })
    }

    /// Gets card name suggestions for the search box.
    pub async fn suggestions(&self, prefix: &str) -> Vec<String> {
        if prefix.chars().count() < MIN_SUGGESTION_PREFIX {
            return Vec::new();
        }

        self.client.autocomplete(prefix).await
    }

    /// Gets the top suggestion for a name, if it is not the name itself.
    async fn ambiguous_suggestion(&self, name: &str) -> Option<String> {
        // names already wrapped for an exact match are not ambiguous
        if name.is_empty() || strip_exact_marker(name) != name {
            return None;
        }

        self.client
            .autocomplete(name)
            .await
            .into_iter()
            .next()
            .filter(|suggestion| suggestion.to_lowercase() != name.to_lowercase())
    }
}

/// Builds the query for the user's literal text.
pub fn broad_query(name: &str, card_type: &str) -> String {
    with_type(name.to_owned(), card_type)
}

/// Builds a query matching only a card with exactly this name.
pub fn exact_query(name: &str, card_type: &str) -> String {
    with_type(format!("!\"{}\"", name), card_type)
}

fn with_type(query: String, card_type: &str) -> String {
    if card_type.is_empty() {
        return query;
    }

    let filter = if card_type.contains(' ') {
        format!("type:\"{}\"", card_type)
    } else {
        format!("type:{}", card_type)
    };

    if query.is_empty() {
        filter
    } else {
        format!("{} {}", query, filter)
    }
}
