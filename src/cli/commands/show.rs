use anyhow::Result;

use super::client;
use crate::config::Settings;
use crate::error::ApiError;
use crate::render;

pub async fn show(settings: &Settings, id: i32) -> Result<()> {
    match client(settings)?.audiobook(id).await {
        Ok(book) => print!("{}", render::audiobook_detail(&book)),
        Err(ApiError::Api { status: 404, .. }) => println!("Audiobook {id} not found."),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

pub async fn random(settings: &Settings, number: u32) -> Result<()> {
    let picks = client(settings)?.random_audiobooks(number).await?;
    if picks.audiobooks.is_empty() {
        println!("The catalog is empty.");
        return Ok(());
    }
    for book in &picks.audiobooks {
        println!("{}", render::audiobook_row(book));
    }
    Ok(())
}

pub async fn count(settings: &Settings) -> Result<()> {
    let total = client(settings)?.audiobook_count().await?;
    println!("{total} audiobooks in the catalog");
    Ok(())
}
