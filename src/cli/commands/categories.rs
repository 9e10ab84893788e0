use anyhow::Result;

use super::client;
use crate::config::Settings;
use crate::render;
use crate::store::CategoryStore;

pub async fn list(settings: &Settings) -> Result<()> {
    let store = CategoryStore::new(client(settings)?);
    let categories = store.categories().await?;
    if categories.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }
    for category in categories.iter() {
        println!("{}", render::category_row(category));
    }
    Ok(())
}
