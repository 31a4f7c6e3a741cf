//! Cursor over the paginated, filtered customer list.

use serde::{Deserialize, Serialize};

use crate::domain::customer::Customer;

/// Number of customers requested per page.
pub const RESULTS_PER_PAGE: usize = 5;

/// One page of customers as returned by the list endpoint.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListResponse {
    #[serde(rename = "clientes", default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub total_pages: usize,
}

/// Client-held pagination state for the loaded view.
///
/// Only query submission and the pagination controls mutate it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageState {
    current_page: usize,
    page_size: usize,
    total_pages: usize,
    last_query: String,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(RESULTS_PER_PAGE)
    }
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current_page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
            last_query: String::new(),
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    /// Starts a new search from the first page.
    pub fn reset(&mut self, query: impl Into<String>) {
        self.last_query = query.into();
        self.current_page = 1;
    }

    /// Records the page count reported by the backend.
    ///
    /// The current page is left untouched even when it now lies past the end.
    pub fn set_total_pages(&mut self, total_pages: usize) {
        self.total_pages = total_pages;
        if self.is_past_end() {
            log::warn!(
                "Current page {} is past the last page {}",
                self.current_page,
                self.total_pages
            );
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// True when the backend shrank the result set below the current page.
    pub fn is_past_end(&self) -> bool {
        self.total_pages >= 1 && self.current_page > self.total_pages
    }

    /// Moves a cursor left past the end back onto the last page.
    ///
    /// Returns `true` if the page changed and has to be fetched again.
    pub fn clamp_to_last(&mut self) -> bool {
        if !self.is_past_end() {
            return false;
        }
        self.current_page = self.total_pages;
        true
    }

    /// Advances one page. Returns `false` without moving on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Goes back one page. Returns `false` without moving on the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_page -= 1;
        true
    }
}
