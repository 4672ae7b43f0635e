//! Search routes.

use axum::{debug_handler, extract::State, response::Html};

use minijinja::context;

use mtgfinder_model::{
    card::Card,
    request::{AutocompleteQuery, SearchForm, SearchQuery},
    response::CardResultPage,
};

use serde::Serialize;

use crate::{
    app::{AppError, AppForm, AppJson, AppQuery, AppState},
    routes::Pagination,
    search::SearchRequest,
};

/// A card, as shown on the results page.
#[derive(Debug, Serialize)]
struct CardView<'a> {
    name: &'a str,
    mana_cost: Option<&'a str>,
    type_line: Option<&'a str>,
    oracle_text: Option<&'a str>,
    image_url: Option<&'a str>,
    edhrec_link: Option<&'a str>,
    scryfall_uri: Option<&'a str>,
}

impl<'a> From<&'a Card> for CardView<'a> {
    fn from(card: &'a Card) -> Self {
        CardView {
            name: &card.name,
            mana_cost: card.display_mana_cost(),
            type_line: card.type_line.as_deref(),
            oracle_text: card.display_oracle_text(),
            image_url: card.image_url(),
            edhrec_link: card.edhrec_link(),
            scryfall_uri: card.scryfall_uri.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultsPage<'a> {
    query: &'a str,
    card_type: &'a str,
    total_cards: u32,
    ambiguous: bool,
    suggestion: Option<&'a str>,
    cards: Vec<CardView<'a>>,
    exact_cards: Vec<CardView<'a>>,
    pagination: Pagination,
}

/// Shows the search form.
#[debug_handler]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    state.render("index.html", context! {})
}

/// Suggests card names for the search box.
#[debug_handler]
pub async fn autocomplete(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AutocompleteQuery>,
) -> AppJson<Vec<String>> {
    AppJson(state.search.suggestions(&query.q).await)
}

/// Starts a new search from the search form.
#[debug_handler]
pub async fn search(
    State(state): State<AppState>,
    AppForm(form): AppForm<SearchForm>,
) -> Result<Html<String>, AppError> {
    let results = state.search.execute(SearchRequest::from(form)).await?;
    render_results(&state, &results)
}

/// Shows another page of a previous search.
#[debug_handler]
pub async fn paginate(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<SearchQuery>,
) -> Result<Html<String>, AppError> {
    let results = state.search.execute(SearchRequest::from(query)).await?;
    render_results(&state, &results)
}

fn render_results(state: &AppState, results: &CardResultPage) -> Result<Html<String>, AppError> {
    state.render(
        "results.html",
        ResultsPage {
            query: &results.query,
            card_type: &results.card_type,
            total_cards: results.total_cards,
            ambiguous: results.ambiguous,
            suggestion: results.suggestion.as_deref(),
            cards: results.cards.iter().map(CardView::from).collect(),
            exact_cards: results.exact_cards.iter().map(CardView::from).collect(),
            pagination: Pagination::new(results)?,
        },
    )
}
