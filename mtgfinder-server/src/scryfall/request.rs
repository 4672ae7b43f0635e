//! Card queries.

use anyhow::Error;

use futures_util::future::BoxFuture;

use mtgfinder_model::scryfall::{CardList, Catalog, ScryfallError};

use serde::Serialize;

use super::Client;

#[derive(Serialize)]
struct SearchParams<'a> {
    q: String,
    order: &'a str,
    page: u32,
}

/// Searches for cards.
///
/// Resolves to `None` when the search found nothing or failed.
#[derive(Debug)]
pub struct SearchCards {
    client: Client,
    query: String,
    page: u32,
}

impl SearchCards {
    /// Creates a new `SearchCards`.
    pub fn new(client: Client, query: String) -> SearchCards {
        SearchCards {
            client,
            query,
            page: 1,
        }
    }

    /// Requests a later page of results.
    pub fn page(self, page: u32) -> SearchCards {
        SearchCards { page, ..self }
    }

    async fn try_execute(&self) -> Result<CardList, Error> {
        let state = self.client.state();

        let params = SearchParams {
            q: format!("{} lang:{}", self.query, state.language),
            order: &state.order,
            page: self.page,
        };

        let res = self
            .client
            .get("/cards/search", state.search_timeout)
            .query(&params)
            .send()
            .await?;

        Ok(res.json().await?)
    }
}

impl IntoFuture for SearchCards {
    type Output = Option<CardList>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.try_execute().await {
                Ok(list) if list.is_empty() => {
                    tracing::warn!(query = %self.query, page = self.page, "no cards found");
                    None
                }
                Ok(list) => {
                    tracing::info!(
                        query = %self.query,
                        page = self.page,
                        count = list.data.len(),
                        total = list.total_cards,
                        "fetched cards"
                    );
                    Some(list)
                }
                Err(err) => {
                    match err.downcast_ref::<ScryfallError>() {
                        Some(err) if err.status == 404 => {
                            tracing::warn!(query = %self.query, page = self.page, "no cards found")
                        }
                        _ => {
                            tracing::warn!(query = %self.query, page = self.page, %err, "search failed")
                        }
                    }
                    None
                }
            }
        })
    }
}

/// Gets autocomplete suggestions for a partial card name.
///
/// Resolves to an empty list when the request failed.
#[derive(Debug)]
pub struct Autocomplete {
    client: Client,
    prefix: String,
}

impl Autocomplete {
    /// Creates a new `Autocomplete`.
    pub fn new(client: Client, prefix: String) -> Autocomplete {
        Autocomplete { client, prefix }
    }

    async fn try_execute(&self) -> Result<Catalog, Error> {
        let res = self
            .client
            .get("/cards/autocomplete", self.client.state().autocomplete_timeout)
            .query(&[("q", self.prefix.as_str())])
            .send()
            .await?;

        Ok(res.json().await?)
    }
}

impl IntoFuture for Autocomplete {
    type Output = Vec<String>;
    type IntoFuture = BoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            match self.try_execute().await {
                Ok(catalog) => {
                    tracing::info!(
                        prefix = %self.prefix,
                        count = catalog.data.len(),
                        "fetched suggestions"
                    );
                    catalog.data
                }
                Err(err) => {
                    tracing::warn!(prefix = %self.prefix, %err, "autocomplete failed");
                    Vec::new()
                }
            }
        })
    }
}
