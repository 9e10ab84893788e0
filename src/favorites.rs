use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notify::{NoticeLevel, Notifier};

/// What a toggle request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Dropped: a toggle for the same audiobook was already outstanding.
    InFlight,
}

/// Favorite membership operations, with toggles serialized per audiobook.
///
/// Rapid repeated toggling of one item used to race the backend (the second
/// request could read state the first had not committed yet); here a toggle
/// arriving while one for the same id is outstanding is dropped. Toggles for
/// distinct audiobooks proceed independently.
pub struct FavoritesController {
    client: ApiClient,
    notifier: Arc<dyn Notifier>,
    in_flight: Mutex<HashSet<i32>>,
}

impl FavoritesController {
    pub fn new(client: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            notifier,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub async fn is_favorite(&self, audiobook_id: i32) -> Result<bool, ApiError> {
        Ok(self.client.check_favorite(audiobook_id).await?.is_favorite)
    }

    pub async fn add(&self, audiobook_id: i32) -> Result<(), ApiError> {
        self.client.add_favorite(audiobook_id).await?;
        Ok(())
    }

    pub async fn remove(&self, audiobook_id: i32) -> Result<(), ApiError> {
        self.client.remove_favorite(audiobook_id).await?;
        Ok(())
    }

    /// Flip favorite membership for one audiobook.
    #[instrument(skip(self))]
    pub async fn toggle(&self, audiobook_id: i32) -> Result<ToggleOutcome, ApiError> {
        {
            let mut in_flight = self.in_flight.lock().await;
            if !in_flight.insert(audiobook_id) {
                debug!(audiobook_id, "toggle dropped: already in flight");
                return Ok(ToggleOutcome::InFlight);
            }
        }

        let result = self.toggle_inner(audiobook_id).await;
        self.in_flight.lock().await.remove(&audiobook_id);

        match &result {
            Ok(ToggleOutcome::Added) => self
                .notifier
                .notify(NoticeLevel::Success, "Added to favorites"),
            Ok(ToggleOutcome::Removed) => self
                .notifier
                .notify(NoticeLevel::Success, "Removed from favorites"),
            Ok(ToggleOutcome::InFlight) => {}
            Err(_) => self
                .notifier
                .notify(NoticeLevel::Error, "Failed to update favorites"),
        }
        result
    }

    async fn toggle_inner(&self, audiobook_id: i32) -> Result<ToggleOutcome, ApiError> {
        if self.is_favorite(audiobook_id).await? {
            self.client.remove_favorite(audiobook_id).await?;
            Ok(ToggleOutcome::Removed)
        } else {
            self.client.add_favorite(audiobook_id).await?;
            Ok(ToggleOutcome::Added)
        }
    }
}
