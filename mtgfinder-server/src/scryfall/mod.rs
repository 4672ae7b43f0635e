//! Scryfall API client.
//!
//! Every request made through here either succeeds or collapses into an
//! empty result; transport and status failures are logged and never handed
//! to the caller.

mod client;
mod request;

pub use client::{Client, Request, UnexpectedStatus};
pub use request::{Autocomplete, SearchCards};
