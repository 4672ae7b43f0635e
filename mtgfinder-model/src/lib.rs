//! MTG card finder data representations.
//!
//! Everything in here is a plain value: cards as the remote service returns
//! them, the shapes of inbound search requests and the page of results handed
//! to the presentation layer.

pub mod card;
pub mod error;
pub mod request;
pub mod response;
pub mod scryfall;

pub use error::ValidationError;
