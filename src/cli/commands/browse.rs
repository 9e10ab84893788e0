use anyhow::Result;

use super::{client, notifier, print_listing};
use crate::config::Settings;
use crate::loader::{CatalogFetcher, PagedLoader};
use crate::pagination::QueryContext;
use crate::store::CategoryStore;

pub async fn browse(settings: &Settings, category: Option<i32>, pages: u32) -> Result<()> {
    let client = client(settings)?;
    let context = match category {
        Some(id) => {
            // The shared store also resolves the heading without an extra
            // round trip on later commands in the same process.
            let store = CategoryStore::new(client.clone());
            match store.category(id).await? {
                Some(category) => println!("== {} ==", category.name),
                None => {
                    println!("Category {id} not found.");
                    return Ok(());
                }
            }
            QueryContext::Category(id)
        }
        None => QueryContext::All,
    };

    let mut loader = PagedLoader::new(CatalogFetcher::new(client), notifier(), settings.per_page);
    loader.initialize(context).await;
    loader.drain(Some(pages.saturating_sub(1))).await;
    print_listing(&loader);
    Ok(())
}

pub async fn search(settings: &Settings, query: &str, pages: u32) -> Result<()> {
    if query.trim().is_empty() {
        println!("Search query is required.");
        return Ok(());
    }
    let mut loader = PagedLoader::new(
        CatalogFetcher::new(client(settings)?),
        notifier(),
        settings.per_page,
    );
    loader
        .initialize(QueryContext::Search(query.to_string()))
        .await;
    loader.drain(Some(pages.saturating_sub(1))).await;
    print_listing(&loader);
    Ok(())
}
