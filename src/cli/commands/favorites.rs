use anyhow::Result;

use super::auth::ensure_session;
use super::{client, notifier, print_listing};
use crate::cli::FavoritesAction;
use crate::config::Settings;
use crate::favorites::{FavoritesController, ToggleOutcome};
use crate::loader::{CatalogFetcher, PagedLoader};
use crate::pagination::QueryContext;

pub async fn run(settings: &Settings, action: FavoritesAction) -> Result<()> {
    let client = client(settings)?;
    // Favorites endpoints all require a session.
    let _session = ensure_session(settings, &client).await?;
    let controller = FavoritesController::new(client.clone(), notifier());

    match action {
        FavoritesAction::List { pages } => {
            let mut loader =
                PagedLoader::new(CatalogFetcher::new(client), notifier(), settings.per_page);
            loader.initialize(QueryContext::Favorites).await;
            loader.drain(Some(pages.saturating_sub(1))).await;
            print_listing(&loader);
        }
        FavoritesAction::Add { id } => {
            controller.add(id).await?;
            println!("Added #{id} to favorites.");
        }
        FavoritesAction::Remove { id } => {
            controller.remove(id).await?;
            println!("Removed #{id} from favorites.");
        }
        FavoritesAction::Toggle { id } => match controller.toggle(id).await? {
            ToggleOutcome::Added => println!("Added #{id} to favorites."),
            ToggleOutcome::Removed => println!("Removed #{id} from favorites."),
            ToggleOutcome::InFlight => println!("A toggle for #{id} is already running."),
        },
        FavoritesAction::Check { id } => {
            if controller.is_favorite(id).await? {
                println!("#{id} is a favorite.");
            } else {
                println!("#{id} is not a favorite.");
            }
        }
    }
    Ok(())
}
