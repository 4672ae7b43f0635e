//! Errors a user can correct by changing their search.

use derive_more::{Display, Error};

/// The input field a [`ValidationError`] is about.
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq)]
pub enum Field {
    #[display("Card name")]
    Name,
    #[display("Card type")]
    Type,
}

/// Search input was rejected before it reached the remote service.
///
/// The [`Display`] output is shown to the user verbatim.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Neither a card name nor a card type was given.
    #[display("Please enter a card name or select a card type to search.")]
    Empty,
    /// The field has more characters than allowed.
    #[display("{_0} is too long.")]
    TooLong(#[error(not(source))] Field),
    /// The field contains a character outside of the allowed set.
    #[display("{field} contains an invalid character: '{character}'")]
    InvalidCharacter { field: Field, character: char },
}
