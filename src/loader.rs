//! Async driver for the paginated collection loader.
//!
//! [`PagedLoader`] glues a [`LoaderState`] to a [`PageFetcher`], a
//! [`Notifier`], and the end-of-list sentinel. Category listings, search
//! results, full-catalog browsing, and the favorites view all instantiate it
//! with the same [`CatalogFetcher`] and differ only in their query context.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notify::{NoticeLevel, Notifier};
use crate::pagination::{Applied, LoaderState, PageRequest, PageResult, QueryContext};
use crate::schemas::{Audiobook, Pagination};
use crate::sentinel::EdgeTrigger;

/// Supplies one page of a collection for a query context.
pub trait PageFetcher {
    type Item;

    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = Result<PageResult<Self::Item>, ApiError>> + Send;
}

/// Fetches catalog pages from the remote API for every query context.
#[derive(Debug, Clone)]
pub struct CatalogFetcher {
    client: ApiClient,
}

impl CatalogFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn into_page_result(items: Vec<Audiobook>, pagination: Pagination) -> PageResult<Audiobook> {
    PageResult {
        items,
        page: pagination.page,
        has_next: pagination.has_next,
        total: Some(pagination.total),
    }
}

impl PageFetcher for CatalogFetcher {
    type Item = Audiobook;

    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<Audiobook>, ApiError> {
        let (page, per_page) = (request.page, request.per_page);
        match &request.context {
            QueryContext::All => {
                let result = self.client.all_audiobooks(page, per_page).await?;
                Ok(into_page_result(result.audiobooks, result.pagination))
            }
            QueryContext::Category(id) => {
                let result = self.client.category_audiobooks(*id, page, per_page).await?;
                Ok(into_page_result(result.audiobooks, result.pagination))
            }
            QueryContext::Search(query) => {
                let result = self.client.search(query, page, per_page).await?;
                Ok(into_page_result(result.audiobooks, result.pagination))
            }
            QueryContext::Favorites => {
                let result = self.client.favorites(page, per_page).await?;
                Ok(into_page_result(result.audiobooks, result.pagination))
            }
        }
    }
}

/// Fetches and accumulates pages for one query context.
///
/// Each view owns its own instance; there is no shared mutable state between
/// loaders. Fetches are never concurrent with themselves: the phase guard in
/// the underlying state admits at most one outstanding request.
pub struct PagedLoader<F: PageFetcher> {
    state: LoaderState<F::Item>,
    fetcher: F,
    notifier: Arc<dyn Notifier>,
    sentinel: EdgeTrigger,
}

impl<F: PageFetcher> PagedLoader<F> {
    pub fn new(fetcher: F, notifier: Arc<dyn Notifier>, per_page: u32) -> Self {
        Self {
            state: LoaderState::new(per_page),
            fetcher,
            notifier,
            sentinel: EdgeTrigger::new(),
        }
    }

    pub fn state(&self) -> &LoaderState<F::Item> {
        &self.state
    }

    pub fn items(&self) -> &[F::Item] {
        self.state.items()
    }

    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// Reset to a new query context and fetch page 1.
    ///
    /// Must be called again whenever the context changes; a result still in
    /// flight for the superseded context is discarded when it arrives.
    pub async fn initialize(&mut self, context: QueryContext) {
        let request = self.state.begin_initial(context);
        self.sentinel.reset();
        self.run(request).await;
    }

    /// Fetch the next page, appending to the accumulated items.
    ///
    /// A no-op while a load is in flight or once `has_next` is false. After a
    /// failure the same next page is re-attempted on the next call.
    pub async fn load_more(&mut self) {
        let Some(request) = self.state.begin_load_more() else {
            debug!("load_more skipped: in flight, finished, or uninitialized");
            return;
        };
        self.run(request).await;
    }

    /// Adapter for the visibility sentinel: the last rendered item entered
    /// the viewport. Safe to call repeatedly; re-entrant signals while a load
    /// is in flight are dropped by the phase guard.
    pub async fn on_sentinel_visible(&mut self) {
        self.load_more().await;
    }

    /// Feed a raw visibility sample for the sentinel element. Only the
    /// hidden-to-visible transition triggers a fetch; once a page is applied
    /// the trigger re-arms, because the sentinel moved to the new last item.
    pub async fn sentinel_sample(&mut self, visible: bool) {
        if self.sentinel.sample(visible) {
            self.on_sentinel_visible().await;
        }
    }

    /// Load pages until the sequence terminates, an error stops progress, or
    /// `max_more_pages` additional pages were fetched. Returns the number of
    /// pages fetched beyond what was already loaded.
    pub async fn drain(&mut self, max_more_pages: Option<u32>) -> u32 {
        let mut fetched = 0;
        while self.state.has_next() {
            if let Some(limit) = max_more_pages
                && fetched >= limit
            {
                break;
            }
            self.load_more().await;
            if self.state.last_error().is_some() {
                break;
            }
            fetched += 1;
        }
        fetched
    }

    async fn run(&mut self, request: PageRequest) {
        let outcome = self.fetcher.fetch_page(&request).await;
        match self.state.apply(&request, outcome) {
            Applied::Loaded => {
                debug!(page = request.page, context = %request.context, "page applied");
                self.sentinel.reset();
            }
            Applied::Stale => {
                debug!(page = request.page, context = %request.context, "stale completion discarded");
            }
            Applied::Failed => {
                warn!(page = request.page, context = %request.context, "page fetch failed");
                self.notifier.notify(NoticeLevel::Error, &failure_message(&request));
            }
        }
    }
}

fn failure_message(request: &PageRequest) -> String {
    let noun = match &request.context {
        QueryContext::Category(_) => "category",
        QueryContext::Favorites => "favorites",
        QueryContext::All | QueryContext::Search(_) => "audiobooks",
    };
    if request.page == 1 {
        format!("Failed to load {noun}")
    } else {
        format!("Failed to load more {noun}")
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notify::NoticeLevel;
    use crate::test_utils::test_utils::{RecordingNotifier, ScriptedFetcher};

    fn loader(
        fetcher: ScriptedFetcher,
    ) -> (PagedLoader<ScriptedFetcher>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let loader = PagedLoader::new(fetcher, notifier.clone(), 12);
        (loader, notifier)
    }

    #[tokio::test]
    async fn full_drain_accumulates_every_page() {
        let fetcher = ScriptedFetcher::with_pages(vec![
            Ok(((0..12).collect(), true)),
            Ok(((12..24).collect(), true)),
            Ok((vec![24], false)),
        ]);
        let (mut loader, notifier) = loader(fetcher);

        loader.initialize(QueryContext::Category(3)).await;
        let fetched = loader.drain(None).await;

        assert_eq!(fetched, 2);
        assert_eq!(loader.items().len(), 25);
        assert_eq!(loader.items(), (0..25).collect::<Vec<_>>().as_slice());
        assert!(!loader.has_next());
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn fetcher_never_sees_concurrent_requests() {
        let fetcher = ScriptedFetcher::with_pages(vec![
            Ok((vec![1], true)),
            Ok((vec![2], true)),
            Ok((vec![3], false)),
        ]);
        let (mut loader, _) = loader(fetcher);

        loader.initialize(QueryContext::All).await;
        loader.drain(None).await;

        assert_eq!(loader.state().phase(), crate::pagination::Phase::Idle);
        // The scripted fetcher records overlap; one outstanding call at most.
        assert_eq!(loader.fetcher.max_in_flight(), 1);
        assert_eq!(loader.fetcher.calls(), 3);
    }

    #[tokio::test]
    async fn load_more_after_terminal_page_never_calls_fetcher() {
        let fetcher = ScriptedFetcher::with_pages(vec![Ok((vec![1, 2], false))]);
        let (mut loader, _) = loader(fetcher);

        loader.initialize(QueryContext::All).await;
        loader.load_more().await;
        loader.on_sentinel_visible().await;

        assert_eq!(loader.fetcher.calls(), 1);
        assert_eq!(loader.items(), &[1, 2]);
    }

    #[tokio::test]
    async fn load_more_failure_keeps_page_one_and_notifies_once() {
        let fetcher = ScriptedFetcher::with_pages(vec![
            Ok(((0..12).collect(), true)),
            Err(ApiError::Api {
                status: 500,
                message: "Internal server error".to_string(),
            }),
        ]);
        let (mut loader, notifier) = loader(fetcher);

        loader.initialize(QueryContext::All).await;
        loader.load_more().await;

        assert_eq!(loader.items().len(), 12);
        assert!(!loader.state().is_loading());
        assert_eq!(notifier.count(), 1);
        assert_eq!(
            notifier.last(),
            Some((NoticeLevel::Error, "Failed to load more audiobooks".to_string()))
        );
    }

    #[tokio::test]
    async fn initial_failure_notifies_with_context_noun() {
        let fetcher = ScriptedFetcher::with_pages(vec![Err(ApiError::Api {
            status: 502,
            message: "Bad gateway".to_string(),
        })]);
        let (mut loader, notifier) = loader(fetcher);

        loader.initialize(QueryContext::Category(9)).await;

        assert!(loader.items().is_empty());
        assert_eq!(
            notifier.last(),
            Some((NoticeLevel::Error, "Failed to load category".to_string()))
        );
    }

    #[tokio::test]
    async fn empty_catalog_is_a_quiet_terminal_state() {
        let fetcher = ScriptedFetcher::with_pages(vec![Ok((vec![], false))]);
        let (mut loader, notifier) = loader(fetcher);

        loader.initialize(QueryContext::All).await;

        assert!(loader.state().is_empty_terminal());
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test]
    async fn drain_resumes_after_a_recovered_failure() {
        let fetcher = ScriptedFetcher::with_pages(vec![
            Ok((vec![1], true)),
            Err(ApiError::Api {
                status: 500,
                message: "Internal server error".to_string(),
            }),
            Ok((vec![2], true)),
            Ok((vec![3], false)),
        ]);
        let (mut loader, notifier) = loader(fetcher);

        loader.initialize(QueryContext::All).await;
        assert_eq!(loader.drain(None).await, 0);
        assert_eq!(loader.items(), &[1]);

        // Once a retried page lands, the old error must not stop the drain
        // or hide the recovered listing.
        let fetched = loader.drain(None).await;
        assert_eq!(fetched, 2);
        assert_eq!(loader.items(), &[1, 2, 3]);
        assert!(loader.state().last_error().is_none());
        assert!(!loader.has_next());
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test]
    async fn sentinel_fires_only_on_visibility_transitions() {
        let fetcher = ScriptedFetcher::with_pages(vec![
            Ok((vec![1], true)),
            Ok((vec![2], true)),
            Ok((vec![3], true)),
        ]);
        let (mut loader, _) = loader(fetcher);

        loader.initialize(QueryContext::All).await;
        // Repeated "still visible" samples are one transition, one fetch;
        // the applied page re-arms the trigger for the new last item.
        loader.sentinel_sample(true).await;
        loader.sentinel_sample(true).await;
        assert_eq!(loader.fetcher.calls(), 3);

        loader.sentinel_sample(false).await;
        loader.sentinel_sample(true).await;
        assert_eq!(loader.fetcher.calls(), 4);
    }

    #[tokio::test]
    async fn sentinel_retries_next_page_after_failure() {
        let fetcher = ScriptedFetcher::with_pages(vec![
            Ok((vec![1], true)),
            Err(ApiError::Api {
                status: 500,
                message: "Internal server error".to_string(),
            }),
            Ok((vec![2], false)),
        ]);
        let (mut loader, notifier) = loader(fetcher);

        loader.initialize(QueryContext::All).await;
        loader.on_sentinel_visible().await;
        assert_eq!(loader.items(), &[1]);
        assert_eq!(notifier.count(), 1);

        // The next visibility event re-attempts the same page.
        loader.on_sentinel_visible().await;
        assert_eq!(loader.items(), &[1, 2]);
        assert_eq!(loader.fetcher.page_log(), vec![1, 2, 2]);
    }
}
