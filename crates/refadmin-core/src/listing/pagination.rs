use std::future::Future;

use crate::error::ApiError;

use super::filters::{FilterMap, FilterRows};

/// Records per backend page, used only for row numbering.
pub const PAGE_SIZE: u32 = 100;

/// What happens to the visible records when a fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    KeepRecords,
    ClearRecords,
}

/// One issued list request. `generation` identifies the request that
/// is allowed to update the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub generation: u64,
    pub page: u32,
    /// `None` when no filters are applied.
    pub filters: Option<FilterMap>,
}

/// Page number, applied filters and the records of the current page.
///
/// There is no total count: `has_more` only says the last fetched page had
/// at least one record, so the user can step one page past the end.
#[derive(Debug)]
pub struct ListingState<T> {
    page: u32,
    applied: FilterMap,
    records: Vec<T>,
    has_more: bool,
    loading: bool,
    error: Option<String>,
    generation: u64,
    error_policy: ErrorPolicy,
    error_message: &'static str,
}

impl<T> ListingState<T> {
    /// `error_message` is the banner shown when a fetch fails.
    pub fn new(error_policy: ErrorPolicy, error_message: &'static str) -> Self {
        Self {
            page: 1,
            applied: FilterMap::new(),
            records: Vec::new(),
            has_more: true,
            loading: false,
            error: None,
            generation: 0,
            error_policy,
            error_message,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn applied(&self) -> &FilterMap {
        &self.applied
    }

    pub fn records(&self) -> &[T] {
        &self.records
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Start a fetch for the current page and filters.
    /// Any earlier query still in flight becomes stale.
    pub fn begin(&mut self) -> PageQuery {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        PageQuery {
            generation: self.generation,
            page: self.page,
            filters: (!self.applied.is_empty()).then(|| self.applied.clone()),
        }
    }

    /// Apply a response. Returns false if `query` was superseded and the
    /// response was discarded.
    pub fn complete(&mut self, query: &PageQuery, result: Result<Vec<T>, ApiError>) -> bool {
        if query.generation != self.generation {
            tracing::debug!(
                stale = query.generation,
                current = self.generation,
                "Discarding superseded page response"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(records) => {
                self.has_more = !records.is_empty();
                tracing::debug!(page = query.page, records = records.len(), "Page loaded");
                self.records = records;
            }
            Err(e) => {
                tracing::error!(page = query.page, error = %e, "Page fetch failed");
                if self.error_policy == ErrorPolicy::ClearRecords {
                    self.records.clear();
                }
                self.error = Some(self.error_message.to_string());
            }
        }
        true
    }

    pub fn can_go_next(&self) -> bool {
        self.has_more && !self.loading
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1 && !self.loading
    }

    /// Advance one page. Returns true when a fetch is needed.
    pub fn next(&mut self) -> bool {
        if !self.can_go_next() {
            return false;
        }
        match self.page.checked_add(1) {
            Some(page) => {
                self.page = page;
                true
            }
            None => false,
        }
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Jump to `page`. Pages below 1 and the current page are ignored.
    pub fn go_to(&mut self, page: u32) -> bool {
        if page < 1 || page == self.page {
            return false;
        }
        self.page = page;
        true
    }

    /// Replace the applied filters with the collapsed rows and return to
    /// page 1. Always requires a fetch.
    pub fn apply_filters(&mut self, rows: &FilterRows) -> bool {
        self.applied = rows.to_mapping();
        self.page = 1;
        true
    }

    /// 1-based row number of `index` on the current page.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.page - 1) * u64::from(PAGE_SIZE) + index as u64 + 1
    }
}

/// Issue one fetch for the listing's current page and apply the result.
pub async fn load_page<T, F, Fut>(state: &mut ListingState<T>, fetch: F) -> bool
where
    F: FnOnce(PageQuery) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ApiError>>,
{
    let query = state.begin();
    let result = fetch(query.clone()).await;
    state.complete(&query, result)
}
