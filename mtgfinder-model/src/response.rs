//! Outbound response models.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// A page of search results, ready to be presented.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CardResultPage {
    /// The literal search text the user entered.
    pub query: String,
    /// The card type filter, empty if none.
    pub card_type: String,
    /// The cards matched by the broad query on this page.
    pub cards: Vec<Card>,
    /// If the remote service has another page for the broad query.
    pub has_more: bool,
    /// The total number of cards the broad query matched.
    pub total_cards: u32,
    /// The page number, starting at 1.
    pub page: u32,
    /// Whether the top autocomplete suggestion differed from the search text.
    pub ambiguous: bool,
    /// The suggested canonical name, when the search was ambiguous.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Cards matching the suggestion exactly, when the search was ambiguous.
    #[serde(default)]
    pub exact_cards: Vec<Card>,
}

impl CardResultPage {
    /// The page before this one, if any.
    pub fn previous_page(&self) -> Option<u32> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// The page after this one, if the remote service has one.
    pub fn next_page(&self) -> Option<u32> {
        self.has_more.then(|| self.page.saturating_add(1))
    }
}
