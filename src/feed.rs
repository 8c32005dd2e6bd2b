//! Paginated photo feed (home listing or search results)
//!
//! A [`FeedFetcher`] accumulates photos across refreshes. Each call to
//! [`FeedFetcher::fetch`] requests `fan_out` consecutive pages in parallel,
//! waits for all of them, and appends every photo whose ID is not already in
//! the feed. Calls made while a refresh is still running are dropped.
//!
//! State lives in a [`watch`] channel: readers subscribe and see a new
//! [`FeedState`] after every change, and the in-flight check-and-set happens
//! under the channel's lock.

use futures::future::join_all;
use tokio::sync::watch;

use crate::api::{FetchError, PageRequest, PhotoSource};
use crate::models::ImageRecord;

/// Observable feed state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedState {
    /// Accumulated photos, in arrival order, unique by ID
    pub images: Vec<ImageRecord>,
    /// Next page to request (1-based)
    pub page: u32,
    /// Whether a refresh is running
    pub in_flight: bool,
    /// Search term of the current session (`None` for the listing)
    pub query: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            images: Vec::new(),
            page: 1,
            in_flight: false,
            query: None,
        }
    }
}

impl FeedState {
    /// Append photos whose IDs are not yet present. Returns how many were added.
    fn merge(&mut self, batch: Vec<ImageRecord>) -> usize {
        let before = self.images.len();
        for image in batch {
            // Checked against the growing list so duplicates within and
            // across batches collapse to the first copy.
            if !self.images.iter().any(|existing| existing.id == image.id) {
                self.images.push(image);
            }
        }
        self.images.len() - before
    }
}

/// A page that came back empty because its request failed
#[derive(Debug)]
pub struct PageFailure {
    /// Page number
    pub page: u32,
    /// What went wrong
    pub error: FetchError,
}

/// Summary of one completed refresh
#[derive(Debug, Default)]
pub struct FetchReport {
    /// First page requested in this refresh
    pub first_page: u32,
    /// Photos appended to the feed
    pub added: usize,
    /// Pages that failed (their photos are simply missing)
    pub failures: Vec<PageFailure>,
}

/// Result of a [`FeedFetcher::fetch`] call
#[derive(Debug)]
pub enum FetchOutcome {
    /// Another refresh was running; nothing happened
    Skipped,
    /// The refresh ran to completion
    Completed(FetchReport),
}

impl FetchOutcome {
    /// The report, if the refresh ran
    pub fn report(&self) -> Option<&FetchReport> {
        match self {
            Self::Skipped => None,
            Self::Completed(report) => Some(report),
        }
    }
}

/// Clears `in_flight` if a refresh future is dropped before it finishes.
/// The page counter is left where it was.
struct InFlightGuard<'a> {
    state: &'a watch::Sender<FeedState>,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("Refresh cancelled, releasing in-flight flag");
            self.state.send_modify(|state| state.in_flight = false);
        }
    }
}

/// Fetches and accumulates photo pages from a [`PhotoSource`]
pub struct FeedFetcher<S> {
    source: S,
    page_size: u32,
    fan_out: u32,
    state: watch::Sender<FeedState>,
}

impl<S> std::fmt::Debug for FeedFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedFetcher")
            .field("page_size", &self.page_size)
            .field("fan_out", &self.fan_out)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl<S: PhotoSource> FeedFetcher<S> {
    /// Create a fetcher. `fan_out` is clamped to at least one page.
    pub fn new(source: S, page_size: u32, fan_out: u32) -> Self {
        let (state, _) = watch::channel(FeedState::default());
        Self {
            source,
            page_size,
            fan_out: fan_out.max(1),
            state,
        }
    }

    /// The underlying photo source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current state
    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Watch for state changes
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Run one refresh.
    ///
    /// With `new_search` the feed is cleared and paging restarts at 1.
    /// A non-empty `query` hits the search endpoint, otherwise the listing.
    /// Failed pages are logged and contribute nothing; the feed never
    /// carries an error state.
    pub async fn fetch(&self, query: Option<&str>, new_search: bool) -> FetchOutcome {
        let query = query.filter(|q| !q.is_empty()).map(str::to_string);

        let mut first_page = 0;
        let started = self.state.send_if_modified(|state| {
            if state.in_flight {
                return false;
            }
            state.in_flight = true;
            if new_search {
                state.page = 1;
                state.images.clear();
            }
            state.query.clone_from(&query);
            first_page = state.page;
            true
        });

        if !started {
            tracing::debug!("Refresh already running, dropping fetch request");
            return FetchOutcome::Skipped;
        }

        let guard = InFlightGuard {
            state: &self.state,
            armed: true,
        };

        let requests: Vec<PageRequest> = (0..self.fan_out)
            .map(|offset| PageRequest {
                query: query.clone(),
                page: first_page + offset,
                per_page: self.page_size,
            })
            .collect();

        let results = join_all(requests.iter().map(|request| self.source.page(request))).await;

        let mut report = FetchReport {
            first_page,
            ..FetchReport::default()
        };

        self.state.send_modify(|state| {
            for (request, result) in requests.iter().zip(results) {
                match result {
                    Ok(batch) => report.added += state.merge(batch),
                    Err(error) => {
                        tracing::warn!(page = request.page, %error, "Page fetch failed");
                        report.failures.push(PageFailure {
                            page: request.page,
                            error,
                        });
                    }
                }
            }
            state.in_flight = false;
            state.page += self.fan_out;
        });
        guard.disarm();

        tracing::info!(
            first_page,
            added = report.added,
            failed = report.failures.len(),
            "Feed refreshed"
        );

        FetchOutcome::Completed(report)
    }
}
