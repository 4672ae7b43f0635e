mod common;

use common::FakeScryfall;

use mtgfinder_model::{ValidationError, error::Field};

use mtgfinder_server::{
    scryfall::Client,
    search::{SearchError, SearchRequest, SearchService},
};

fn service(fake: &FakeScryfall) -> SearchService {
    SearchService::new(Client::new(&fake.config().scryfall).unwrap())
}

fn names(cards: &[mtgfinder_model::card::Card]) -> Vec<&str> {
    cards.iter().map(|card| card.name.as_str()).collect()
}

#[tokio::test]
async fn differing_suggestion_makes_search_ambiguous() {
    let fake = FakeScryfall::spawn().await;

    let results = service(&fake)
        .execute(SearchRequest::new("sol", ""))
        .await
        .unwrap();

    assert!(results.ambiguous);
    assert_eq!(results.suggestion.as_deref(), Some("Sol Ring"));
    assert_eq!(names(&results.exact_cards), ["Sol Ring"]);
    assert_eq!(names(&results.cards), ["Sol Ring", "Sol Talisman"]);
    assert_eq!(results.total_cards, 3);
    assert!(results.has_more);
    assert_eq!(results.page, 1);
    assert_eq!(results.query, "sol");

    assert_eq!(fake.autocomplete_calls(), 1);
    assert_eq!(
        fake.search_queries(),
        ["sol lang:en", r#"!"Sol Ring" lang:en"#]
    );

    // the exact query always asks for the first page
    let searches = fake.searches();
    assert_eq!(searches[1]["page"], "1");
}

#[tokio::test]
async fn matching_suggestion_is_not_ambiguous() {
    let fake = FakeScryfall::spawn().await;

    let results = service(&fake)
        .execute(SearchRequest::new("  sol ring ", ""))
        .await
        .unwrap();

    assert!(!results.ambiguous);
    assert_eq!(results.suggestion, None);
    assert!(results.exact_cards.is_empty());
    assert_eq!(names(&results.cards), ["Sol Ring"]);
    assert_eq!(results.query, "sol ring");
    assert_eq!(fake.search_queries(), ["sol ring lang:en"]);
}

#[tokio::test]
async fn type_filter_is_added_to_both_queries() {
    let fake = FakeScryfall::spawn().await;

    let results = service(&fake)
        .execute(SearchRequest::new("sol", "artifact"))
        .await
        .unwrap();

    assert!(results.ambiguous);
    assert_eq!(results.card_type, "artifact");
    assert_eq!(
        fake.search_queries(),
        [
            "sol type:artifact lang:en",
            r#"!"Sol Ring" type:artifact lang:en"#
        ]
    );
}

#[tokio::test]
async fn type_only_search_skips_autocomplete() {
    let fake = FakeScryfall::spawn().await;

    let results = service(&fake)
        .execute(SearchRequest::new("", "instant"))
        .await
        .unwrap();

    assert!(!results.ambiguous);
    assert_eq!(names(&results.cards), ["Lightning Bolt", "Counterspell"]);
    assert_eq!(fake.autocomplete_calls(), 0);
    assert_eq!(fake.search_queries(), ["type:instant lang:en"]);
}

#[tokio::test]
async fn pagination_reuses_literal_text_without_autocomplete() {
    let fake = FakeScryfall::spawn().await;

    let results = service(&fake)
        .execute(SearchRequest::paginated("sol", "", 2))
        .await
        .unwrap();

    assert!(!results.ambiguous);
    assert_eq!(results.page, 2);
    assert_eq!(names(&results.cards), ["Solemn Simulacrum"]);
    assert!(!results.has_more);
    assert_eq!(results.previous_page(), Some(1));

    assert_eq!(fake.autocomplete_calls(), 0);
    assert_eq!(fake.search_queries(), ["sol lang:en"]);
    assert_eq!(fake.searches()[0]["page"], "2");
}

#[tokio::test]
async fn exact_names_are_not_ambiguous() {
    let fake = FakeScryfall::spawn().await;

    let results = service(&fake)
        .execute(SearchRequest::new(r#"!"Counterspell""#, ""))
        .await
        .unwrap();

    assert!(!results.ambiguous);
    assert_eq!(names(&results.cards), ["Counterspell"]);
    assert_eq!(fake.autocomplete_calls(), 0);
}

#[tokio::test]
async fn nothing_found_reports_the_query() {
    let fake = FakeScryfall::spawn().await;

    let err = service(&fake)
        .execute(SearchRequest::new("Sol Rong", ""))
        .await
        .unwrap_err();

    assert!(matches!(&err, SearchError::NotFound { query } if query == "Sol Rong"));
    assert_eq!(
        err.to_string(),
        "Sorry, no cards matching your search for 'Sol Rong' were found."
    );
}

#[tokio::test]
async fn pages_past_the_end_are_not_found() {
    let fake = FakeScryfall::spawn().await;

    let err = service(&fake)
        .execute(SearchRequest::paginated("sol", "", 40))
        .await
        .unwrap_err();

    assert!(matches!(err, SearchError::NotFound { .. }));
}

#[tokio::test]
async fn invalid_input_never_reaches_the_remote_service() {
    let fake = FakeScryfall::spawn().await;
    let service = service(&fake);

    let err = service
        .execute(SearchRequest::new("Sol Ring #", ""))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Validation(ValidationError::InvalidCharacter {
            field: Field::Name,
            character: '#'
        })
    ));

    let err = service
        .execute(SearchRequest::new(" ", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Validation(ValidationError::Empty)));

    assert_eq!(fake.autocomplete_calls(), 0);
    assert!(fake.searches().is_empty());
}

#[tokio::test]
async fn short_prefixes_get_no_suggestions() {
    let fake = FakeScryfall::spawn().await;
    let service = service(&fake);

    assert!(service.suggestions("s").await.is_empty());
    assert_eq!(fake.autocomplete_calls(), 0);

    assert_eq!(service.suggestions("so").await.len(), 3);
    assert_eq!(fake.autocomplete_calls(), 1);
}
