//! Pagination state for the collection loader.
//!
//! This is the pure half of the loader: a guarded accumulator with a single
//! reset transition. It issues [`PageRequest`]s and consumes completions, but
//! performs no I/O itself; the async driver in [`crate::loader`] owns that.

use std::fmt;

use crate::error::ApiError;

/// The parameters that define which collection a loader is fetching.
///
/// Staleness of in-flight requests is decided by value, not by reference:
/// every [`LoaderState::begin_initial`] bumps an epoch, so even re-initializing
/// with an equal context invalidates whatever was outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryContext {
    /// The whole catalog.
    All,
    /// One category by id.
    Category(i32),
    /// Free-text search.
    Search(String),
    /// The logged-in user's favorites.
    Favorites,
}

impl fmt::Display for QueryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryContext::All => write!(f, "catalog"),
            QueryContext::Category(id) => write!(f, "category {id}"),
            QueryContext::Search(q) => write!(f, "search \"{q}\""),
            QueryContext::Favorites => write!(f, "favorites"),
        }
    }
}

/// One outstanding page fetch. Immutable once issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub context: QueryContext,
    /// 1-based page number.
    pub page: u32,
    pub per_page: u32,
    epoch: u64,
}

/// One fetched page: items plus the pagination metadata the loader consumes.
#[derive(Debug, Clone)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_next: bool,
    pub total: Option<i64>,
}

/// What the loader is currently doing. At most one load is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    LoadingInitial,
    LoadingMore,
}

/// Outcome of applying a completed fetch to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The page was accepted and the items stored or appended.
    Loaded,
    /// The fetch failed; the error was recorded and the items left untouched.
    Failed,
    /// The completion belonged to a superseded context and was discarded.
    Stale,
}

/// Accumulated state of one paginated collection.
///
/// Invariants:
/// - `items` is appended to in arrival order while loading more, and fully
///   replaced on a new query context; never reordered or deduplicated.
/// - no request is issued while `has_next` is false or a load is in flight.
#[derive(Debug)]
pub struct LoaderState<T> {
    context: Option<QueryContext>,
    items: Vec<T>,
    current_page: u32,
    has_next: bool,
    total: Option<i64>,
    phase: Phase,
    last_error: Option<ApiError>,
    per_page: u32,
    epoch: u64,
}

impl<T> LoaderState<T> {
    pub fn new(per_page: u32) -> Self {
        Self {
            context: None,
            items: Vec::new(),
            current_page: 1,
            has_next: false,
            total: None,
            phase: Phase::Idle,
            last_error: None,
            per_page,
            epoch: 0,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn context(&self) -> Option<&QueryContext> {
        self.context.as_ref()
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Server-reported total, when a page carried one.
    pub fn total(&self) -> Option<i64> {
        self.total
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }

    /// An initialized loader that finished with nothing to show and nothing
    /// left to fetch. Rendered as "no items", not as an error.
    pub fn is_empty_terminal(&self) -> bool {
        self.context.is_some()
            && self.phase == Phase::Idle
            && self.items.is_empty()
            && !self.has_next
            && self.last_error.is_none()
    }

    /// Full reset for a new query context; always requests page 1.
    ///
    /// Bumping the epoch here is what discards results of requests that were
    /// still outstanding for the previous context when they eventually arrive.
    pub fn begin_initial(&mut self, context: QueryContext) -> PageRequest {
        self.epoch += 1;
        self.items.clear();
        self.current_page = 1;
        self.has_next = false;
        self.total = None;
        self.last_error = None;
        self.phase = Phase::LoadingInitial;
        self.context = Some(context.clone());
        PageRequest {
            context,
            page: 1,
            per_page: self.per_page,
            epoch: self.epoch,
        }
    }

    /// Request the next page, or `None` when the sequence is finished, a load
    /// is already in flight, or the loader was never initialized.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.phase != Phase::Idle || !self.has_next {
            return None;
        }
        let context = self.context.clone()?;
        self.phase = Phase::LoadingMore;
        Some(PageRequest {
            context,
            page: self.current_page + 1,
            per_page: self.per_page,
            epoch: self.epoch,
        })
    }

    /// Apply the completion of `request`.
    ///
    /// Completions from a superseded epoch, or arriving while nothing is in
    /// flight, are dropped without touching the state.
    pub fn apply(&mut self, request: &PageRequest, outcome: Result<PageResult<T>, ApiError>) -> Applied {
        if request.epoch != self.epoch || self.phase == Phase::Idle {
            return Applied::Stale;
        }
        match outcome {
            Ok(page) => {
                match self.phase {
                    Phase::LoadingInitial => self.items = page.items,
                    Phase::LoadingMore => self.items.extend(page.items),
                    Phase::Idle => unreachable!("checked above"),
                }
                self.current_page = page.page;
                self.has_next = page.has_next;
                if page.total.is_some() {
                    self.total = page.total;
                }
                self.phase = Phase::Idle;
                // A recorded failure is history once a page lands; keeping it
                // would make a recovered loader still look broken.
                self.last_error = None;
                Applied::Loaded
            }
            Err(err) => {
                // No partial append: on a load-more failure the accumulated
                // items stay exactly as they were.
                self.phase = Phase::Idle;
                self.last_error = Some(err);
                Applied::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(items: Vec<i32>, page: u32, has_next: bool) -> PageResult<i32> {
        PageResult {
            items,
            page,
            has_next,
            total: None,
        }
    }

    fn reject() -> ApiError {
        ApiError::Api {
            status: 500,
            message: "Internal server error".to_string(),
        }
    }

    #[test]
    fn fresh_state_issues_no_load_more() {
        let mut state: LoaderState<i32> = LoaderState::new(12);
        assert_eq!(state.begin_load_more(), None);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn initial_load_replaces_items() {
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        assert_eq!(req.page, 1);
        assert_eq!(state.phase(), Phase::LoadingInitial);

        let applied = state.apply(&req, Ok(page(vec![1, 2, 3], 1, true)));
        assert_eq!(applied, Applied::Loaded);
        assert_eq!(state.items(), &[1, 2, 3]);
        assert_eq!(state.current_page(), 1);
        assert!(state.has_next());
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn drain_accumulates_all_pages_in_arrival_order() {
        // Page sizes 12, 12, 1 with has_next [true, true, false]: 25 items.
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::Category(7));
        state.apply(&req, Ok(page((0..12).collect(), 1, true)));

        let req = state.begin_load_more().expect("page 2 expected");
        assert_eq!(req.page, 2);
        state.apply(&req, Ok(page((12..24).collect(), 2, true)));

        let req = state.begin_load_more().expect("page 3 expected");
        assert_eq!(req.page, 3);
        state.apply(&req, Ok(page(vec![24], 3, false)));

        assert_eq!(state.items().len(), 25);
        assert_eq!(state.items(), (0..25).collect::<Vec<_>>().as_slice());
        assert!(!state.has_next());
        assert_eq!(state.begin_load_more(), None);
    }

    #[test]
    fn load_more_is_guarded_while_in_flight() {
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        state.apply(&req, Ok(page(vec![1], 1, true)));

        let first = state.begin_load_more();
        assert!(first.is_some());
        // Re-entrant sentinel signal while page 2 is outstanding.
        assert_eq!(state.begin_load_more(), None);
        assert_eq!(state.phase(), Phase::LoadingMore);
    }

    #[test]
    fn load_more_never_fires_after_terminal_page() {
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        state.apply(&req, Ok(page(vec![1, 2], 1, false)));
        assert_eq!(state.begin_load_more(), None);
    }

    #[test]
    fn failure_keeps_accumulated_items() {
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        state.apply(&req, Ok(page(vec![1, 2, 3], 1, true)));

        let req = state.begin_load_more().unwrap();
        let applied = state.apply(&req, Err(reject()));
        assert_eq!(applied, Applied::Failed);
        assert_eq!(state.items(), &[1, 2, 3]);
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.last_error().is_some());
        // The sequence is retriable: has_next was never cleared.
        assert!(state.has_next());
        assert_eq!(state.begin_load_more().map(|r| r.page), Some(2));
    }

    #[test]
    fn success_after_failure_clears_the_recorded_error() {
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        state.apply(&req, Ok(page(vec![1], 1, true)));

        let req = state.begin_load_more().unwrap();
        state.apply(&req, Err(reject()));
        assert!(state.last_error().is_some());

        let req = state.begin_load_more().unwrap();
        assert_eq!(state.apply(&req, Ok(page(vec![2], 2, true))), Applied::Loaded);
        assert_eq!(state.items(), &[1, 2]);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn initial_failure_leaves_items_empty() {
        let mut state: LoaderState<i32> = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::Search("q".into()));
        let applied = state.apply(&req, Err(reject()));
        assert_eq!(applied, Applied::Failed);
        assert!(state.items().is_empty());
        assert!(!state.is_empty_terminal());
    }

    #[test]
    fn context_change_discards_stale_completion() {
        let mut state = LoaderState::new(12);
        let stale = state.begin_initial(QueryContext::Search("first".into()));
        // The user retypes before the first request resolves.
        let fresh = state.begin_initial(QueryContext::Search("second".into()));

        assert_eq!(state.apply(&stale, Ok(page(vec![1, 2], 1, true))), Applied::Stale);
        assert!(state.items().is_empty());
        assert_eq!(state.phase(), Phase::LoadingInitial);

        assert_eq!(state.apply(&fresh, Ok(page(vec![9], 1, false))), Applied::Loaded);
        assert_eq!(state.items(), &[9]);
    }

    #[test]
    fn reinitializing_same_context_still_invalidates() {
        let mut state = LoaderState::new(12);
        let stale = state.begin_initial(QueryContext::All);
        let fresh = state.begin_initial(QueryContext::All);
        assert_eq!(state.apply(&stale, Ok(page(vec![1], 1, true))), Applied::Stale);
        assert_eq!(state.apply(&fresh, Ok(page(vec![2], 1, false))), Applied::Loaded);
        assert_eq!(state.items(), &[2]);
    }

    #[test]
    fn empty_first_page_is_terminal_not_error() {
        let mut state: LoaderState<i32> = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        let applied = state.apply(
            &req,
            Ok(PageResult {
                items: vec![],
                page: 1,
                has_next: false,
                total: Some(0),
            }),
        );
        assert_eq!(applied, Applied::Loaded);
        assert!(state.is_empty_terminal());
        assert_eq!(state.total(), Some(0));
        assert_eq!(state.begin_load_more(), None);
    }

    #[test]
    fn late_duplicate_completion_is_dropped() {
        let mut state = LoaderState::new(12);
        let req = state.begin_initial(QueryContext::All);
        state.apply(&req, Ok(page(vec![1], 1, true)));
        // Same request completing twice: the second arrival hits Idle.
        assert_eq!(state.apply(&req, Ok(page(vec![1], 1, true))), Applied::Stale);
        assert_eq!(state.items(), &[1]);
    }
}
