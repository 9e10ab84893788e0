pub mod auth;
pub mod browse;
pub mod categories;
pub mod favorites;
pub mod show;

use std::sync::Arc;

use anyhow::Result;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::loader::{CatalogFetcher, PagedLoader};
use crate::notify::{Notifier, TracingNotifier};
use crate::render;

pub(crate) fn notifier() -> Arc<dyn Notifier> {
    Arc::new(TracingNotifier)
}

pub(crate) fn client(settings: &Settings) -> Result<ApiClient> {
    Ok(ApiClient::new(settings)?)
}

/// Print the accumulated listing: rows, then an empty-state or end-of-list
/// marker. Errors were already surfaced through the notifier.
pub(crate) fn print_listing(loader: &PagedLoader<CatalogFetcher>) {
    if loader.state().last_error().is_some() {
        return;
    }
    if loader.state().is_empty_terminal() {
        println!("No audiobooks found.");
        return;
    }
    for book in loader.items() {
        println!("{}", render::audiobook_row(book));
    }
    if let Some(total) = loader.state().total() {
        println!("({} of {} shown)", loader.items().len(), total);
    }
    if loader.has_next() {
        println!("More available; rerun with a higher --pages to keep going.");
    } else {
        println!("End of list.");
    }
}
