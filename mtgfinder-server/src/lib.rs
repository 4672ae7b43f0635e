//! MTG card finder web front-end.
//!
//! Searches the Scryfall card database and renders the results, with name
//! autocomplete and pagination.

pub mod app;
pub mod cli;
pub mod config;
pub mod render;
pub mod request;
pub mod routes;
pub mod scryfall;
pub mod search;
