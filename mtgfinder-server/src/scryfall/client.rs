//! Scryfall HTTP client.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;

use derive_more::{Display, Error};

use http::{HeaderMap, HeaderValue, StatusCode, header};

use mtgfinder_model::scryfall::ScryfallError;

use serde::Serialize;

use crate::config::ScryfallConfig;

use super::request::{Autocomplete, SearchCards};

/// A client used to access the Scryfall API.
///
/// Cheaply cloneable, as it uses an `Arc` to track internal state and manage
/// connections. Holds nothing specific to a single request, so one client is
/// shared by every request the server handles.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    state: Arc<ClientState>,
}

#[derive(Debug)]
pub(super) struct ClientState {
    pub(super) base_url: String,
    pub(super) search_timeout: Duration,
    pub(super) autocomplete_timeout: Duration,
    pub(super) language: String,
    pub(super) order: String,
}

impl Client {
    /// Creates a new client.
    pub fn new(config: &ScryfallConfig) -> Result<Client, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .deflate(true)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        let state = ClientState {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            search_timeout: config.search_timeout(),
            autocomplete_timeout: config.autocomplete_timeout(),
            language: config.language.to_owned(),
            order: config.order.to_owned(),
        };

        Ok(Client {
            http,
            state: Arc::new(state),
        })
    }

    /// Searches for cards with a full-text query.
    ///
    /// The query may use any of the remote search syntax, such as `type:` or
    /// the exact-match wrapper `!"Name"`.
    pub fn search(&self, query: impl Into<String>) -> SearchCards {
        SearchCards::new(self.clone(), query.into())
    }

    /// Gets card names starting with, or resembling, a prefix.
    pub fn autocomplete(&self, prefix: impl Into<String>) -> Autocomplete {
        Autocomplete::new(self.clone(), prefix.into())
    }

    pub(super) fn state(&self) -> &ClientState {
        &self.state
    }

    /// Makes a generic `GET` request to the API.
    pub(super) fn get(&self, path: impl AsRef<str>, timeout: Duration) -> Request {
        Request::new(self.clone(), path, timeout)
    }
}

/// A HTTP client request.
#[derive(Debug)]
pub struct Request {
    request: reqwest::RequestBuilder,
}

impl Request {
    /// Creates a new `Request`.
    ///
    /// The path is appended to the API endpoint.
    pub fn new(client: Client, path: impl AsRef<str>, timeout: Duration) -> Request {
        let url = format!("{}{}", client.state.base_url, path.as_ref());

        Request {
            request: client.http.get(url).timeout(timeout),
        }
    }

    /// Serializes query parameters into the URL.
    pub fn query<T>(self, query: &T) -> Request
    where
        T: Serialize + ?Sized,
    {
        Request {
            request: self.request.query(query),
        }
    }

    /// Sends the request.
    ///
    /// Anything but a `200 OK` is an error. If the remote service explained
    /// itself, the error is a [`ScryfallError`].
    pub async fn send(self) -> Result<reqwest::Response, Error> {
        let res = self.request.send().await?;
        let status = res.status();

        if status == StatusCode::OK {
            Ok(res)
        } else {
            match res.json::<ScryfallError>().await {
                Ok(error) => Err(error.into()),
                Err(_) => Err(UnexpectedStatus(status).into()),
            }
        }
    }
}

/// The remote service responded with something other than `200 OK` and no
/// error object.
#[derive(Debug, Display, Error)]
#[display("unexpected status {_0}")]
pub struct UnexpectedStatus(#[error(not(source))] pub StatusCode);
