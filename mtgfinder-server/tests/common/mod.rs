//! A fake Scryfall API for tests.
//!
//! Serves a handful of cards with two cards per page so pagination can be
//! exercised, and records every request it receives.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};

use mtgfinder_server::{app::AppState, config::Config, routes};

use serde_json::{Value, json};

use tokio::net::TcpListener;

/// Cards per page.
pub const PAGE_SIZE: usize = 2;

const CARDS: &[(&str, &str, &str, &str)] = &[
    ("Sol Ring", "{1}", "Artifact", "{T}: Add {C}{C}."),
    ("Sol Talisman", "{2}", "Artifact", "Suspend 3—{1}\n{T}: Add {C}{C}."),
    (
        "Solemn Simulacrum",
        "{4}",
        "Artifact Creature — Golem",
        "When Solemn Simulacrum enters, you may search your library for a basic land card.",
    ),
    ("Lightning Bolt", "{R}", "Instant", "Lightning Bolt deals 3 damage to any target."),
    ("Counterspell", "{U}{U}", "Instant", "Counter target spell."),
    ("Llanowar Elves", "{G}", "Creature — Elf Druid", "{T}: Add {G}."),
];

#[derive(Clone, Default)]
struct FakeState {
    autocomplete_calls: Arc<AtomicUsize>,
    searches: Arc<Mutex<Vec<HashMap<String, String>>>>,
}

/// A running fake Scryfall.
pub struct FakeScryfall {
    pub base_url: String,
    state: FakeState,
}

impl FakeScryfall {
    /// Starts a fake on an ephemeral port.
    pub async fn spawn() -> FakeScryfall {
        let state = FakeState::default();

        let app = Router::new()
            .route("/cards/search", get(search))
            .route("/cards/autocomplete", get(autocomplete))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeScryfall {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    /// How many autocomplete requests were received.
    pub fn autocomplete_calls(&self) -> usize {
        self.state.autocomplete_calls.load(Ordering::SeqCst)
    }

    /// The query parameters of every search received, in order.
    pub fn searches(&self) -> Vec<HashMap<String, String>> {
        self.state.searches.lock().unwrap().clone()
    }

    /// The `q` parameter of every search received, in order.
    pub fn search_queries(&self) -> Vec<String> {
        self.searches()
            .into_iter()
            .map(|params| params.get("q").cloned().unwrap_or_default())
            .collect()
    }

    /// A config pointing at this fake.
    pub fn config(&self) -> Config {
        let mut config = Config::default();
        config.scryfall.base_url = self.base_url.clone();
        config.scryfall.search_timeout = 1;
        config.scryfall.autocomplete_timeout = 1;
        config
    }

    /// The app, searching this fake.
    pub fn app(&self) -> Router {
        routes::router(AppState::new(&self.config()).unwrap())
    }
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}", addr)
}

fn card_json(&(name, mana_cost, type_line, oracle_text): &(&str, &str, &str, &str)) -> Value {
    let slug = name.to_lowercase().replace(' ', "-");

    json!({
        "object": "card",
        "name": name,
        "mana_cost": mana_cost,
        "type_line": type_line,
        "oracle_text": oracle_text,
        "image_uris": { "normal": format!("https://cards.example/{}.jpg", slug) },
        "related_uris": { "edhrec": format!("https://edhrec.example/cards/{}", slug) },
        "scryfall_uri": format!("https://scryfall.example/card/{}", slug),
    })
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "object": "error",
            "status": 404,
            "code": "not_found",
            "details": "Your query didn't match any cards. Adjust your search terms or refer to the syntax guide.",
        })),
    )
        .into_response()
}

async fn search(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.searches.lock().unwrap().push(params.clone());

    let q = params.get("q").cloned().unwrap_or_default();
    let Some(q) = q.strip_suffix(" lang:en") else {
        return (StatusCode::BAD_REQUEST, "missing language").into_response();
    };

    match q {
        "boom" => return (StatusCode::INTERNAL_SERVER_ERROR, "<h1>oops</h1>").into_response(),
        "slow" => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            return not_found();
        }
        _ => (),
    }

    let (name, card_type) = match q.find("type:") {
        Some(idx) => (q[..idx].trim(), Some(q[idx + 5..].trim_matches('"').to_lowercase())),
        None => (q.trim(), None),
    };

    let matches: Vec<_> = CARDS
        .iter()
        .filter(|(card_name, _, type_line, _)| {
            let card_name = card_name.to_lowercase();

            let name_matches = match name
                .strip_prefix("!\"")
                .and_then(|rest| rest.strip_suffix('"'))
            {
                Some(exact) => card_name == exact.to_lowercase(),
                None => name
                    .split_whitespace()
                    .all(|word| card_name.contains(&word.to_lowercase())),
            };
            let type_matches = card_type
                .as_ref()
                .is_none_or(|card_type| type_line.to_lowercase().contains(card_type));

            name_matches && type_matches
        })
        .collect();

    let page: usize = params
        .get("page")
        .and_then(|page| page.parse().ok())
        .unwrap_or(1);
    let start = (page - 1) * PAGE_SIZE;

    if start >= matches.len() {
        return not_found();
    }

    let end = (start + PAGE_SIZE).min(matches.len());
    let data: Vec<_> = matches[start..end].iter().map(|card| card_json(card)).collect();

    Json(json!({
        "object": "list",
        "total_cards": matches.len(),
        "has_more": end < matches.len(),
        "data": data,
    }))
    .into_response()
}

async fn autocomplete(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state.autocomplete_calls.fetch_add(1, Ordering::SeqCst);

    let q = params.get("q").cloned().unwrap_or_default().to_lowercase();
    if q == "boom" {
        return (StatusCode::SERVICE_UNAVAILABLE, "down").into_response();
    }

    let mut names: Vec<&str> = CARDS
        .iter()
        .map(|(name, ..)| *name)
        .filter(|name| name.to_lowercase().contains(&q))
        .collect();
    names.sort_by_key(|name| (!name.to_lowercase().starts_with(&q), *name));

    Json(json!({
        "object": "catalog",
        "total_values": names.len(),
        "data": names,
    }))
    .into_response()
}
