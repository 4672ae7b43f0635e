//! Payloads returned by the Scryfall API.

use std::fmt::{self, Display, Formatter};

use derive_more::Error;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// A page of cards returned by `/cards/search`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CardList {
    /// The cards on this page.
    #[serde(default)]
    pub data: Vec<Card>,
    /// If there is a page after this one.
    #[serde(default)]
    pub has_more: bool,
    /// The total number of cards matched by the query, over all pages.
    #[serde(default)]
    pub total_cards: u32,
}

impl CardList {
    /// Checks if the page has no cards.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A list of strings returned by `/cards/autocomplete`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Catalog {
    #[serde(default)]
    pub data: Vec<String>,
}

/// An error object the remote service returns with non-200 responses.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, Error)]
pub struct ScryfallError {
    pub status: u16,
    pub code: String,
    pub details: String,
}

impl Display for ScryfallError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.status, self.code, self.details)
    }
}
