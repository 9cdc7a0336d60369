//! Pagination, search and loading state for the todo list.
//!
//! All transitions are plain functions on [`ListController`]. A transition
//! that needs the network returns the [`FetchRequest`] to run; the caller
//! performs it and reports back through [`ListController::on_fetch_settled`].
//! Every request carries the generation it was issued under, and only the
//! newest generation may settle, so overlapping fetches resolve to the one
//! issued last.

use crate::error::ScrollError;
use crate::types::{Item, PageQuery};

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub page: u32,
    pub search: String,
    pub generation: u64,
}

impl FetchRequest {
    pub fn query(&self, limit: u32) -> PageQuery {
        PageQuery {
            page: self.page,
            limit,
            search: self.search.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ListController {
    items: Vec<Item>,
    page_number: u32,
    search_term: String,
    loading: bool,
    refreshing: bool,
    has_more: bool,
    generation: u64,
    torn_down: bool,
}

impl ListController {
    /// Create the initial state and the first fetch (page 1, no filter).
    pub fn mount() -> (Self, FetchRequest) {
        let mut controller = Self {
            items: Vec::new(),
            page_number: 1,
            search_term: String::new(),
            loading: true,
            refreshing: false,
            has_more: true,
            generation: 0,
            torn_down: false,
        };
        let request = controller.issue();
        (controller, request)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    fn issue(&mut self) -> FetchRequest {
        self.generation += 1;
        self.loading = true;
        let request = FetchRequest {
            page: self.page_number,
            search: self.search_term.clone(),
            generation: self.generation,
        };
        tracing::debug!(
            page = request.page,
            search = %request.search,
            generation = request.generation,
            "issuing fetch"
        );
        request
    }

    /// The search debounce fired with `term`.
    pub fn on_search(&mut self, term: &str) -> Option<FetchRequest> {
        if self.torn_down {
            return None;
        }
        if term == self.search_term && self.page_number == 1 {
            return None;
        }
        self.search_term = term.to_string();
        self.page_number = 1;
        self.has_more = true;
        Some(self.issue())
    }

    /// The load-more debounce fired.
    pub fn on_scroll_end(&mut self) -> Option<FetchRequest> {
        if self.torn_down || !self.has_more || self.loading {
            return None;
        }
        self.page_number += 1;
        Some(self.issue())
    }

    /// Explicit refresh: restart the current search at page 1, even while
    /// another fetch is outstanding.
    pub fn on_refresh(&mut self) -> Option<FetchRequest> {
        if self.torn_down {
            return None;
        }
        self.refreshing = true;
        self.page_number = 1;
        self.has_more = true;
        Some(self.issue())
    }

    /// Apply the outcome of `request`. Returns `false` when the result was
    /// discarded because a newer request superseded it.
    pub fn on_fetch_settled(
        &mut self,
        request: &FetchRequest,
        result: Result<Vec<Item>, ScrollError>,
    ) -> bool {
        if self.torn_down || request.generation != self.generation {
            tracing::debug!(
                page = request.page,
                generation = request.generation,
                current = self.generation,
                "dropping stale fetch result"
            );
            return false;
        }

        match result {
            Ok(items) => {
                self.has_more = !items.is_empty();
                if request.page == 1 {
                    self.items = items;
                } else {
                    self.items.extend(items);
                }
            }
            Err(e) => {
                tracing::error!(
                    page = request.page,
                    search = %request.search,
                    "fetch failed: {}",
                    e
                );
            }
        }

        self.loading = false;
        self.refreshing = false;
        true
    }

    /// Stop accepting results; anything still in flight is discarded.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.generation += 1;
        self.loading = false;
        self.refreshing = false;
    }
}
