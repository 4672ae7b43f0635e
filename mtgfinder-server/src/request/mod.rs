//! Inbound request handling.

pub mod validate;
