//! Client core for an audiobook catalog served by a remote REST API.
//!
//! The backend owns all durable state (audiobooks, categories, favorites,
//! user accounts); this crate is the consuming side: a typed [`api::ApiClient`],
//! the paginated collection loader ([`pagination`] holds the state machine,
//! [`loader`] the async driver), a shared [`store::CategoryStore`], a
//! cookie-session [`auth::AuthSession`], and a [`favorites::FavoritesController`].
//! The `cli` module renders listings in a terminal.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod favorites;
pub mod loader;
pub mod notify;
pub mod pagination;
pub mod render;
pub mod schemas;
pub mod sentinel;
pub mod store;
