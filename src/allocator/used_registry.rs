//! Used registry - pages checked out by in-flight requests.

use std::collections::HashMap;

use crate::allocator::page::PageCell;
use crate::common::RequestOrderId;

/// Per-request ledger of checked-out pages.
///
/// An entry for a request exists only while it owns at least one page:
/// entries are created on first `record` and removed whole by `drain`.
#[derive(Default)]
pub(crate) struct UsedRegistry {
    /// Request → size class → pages.
    requests: HashMap<RequestOrderId, HashMap<usize, Vec<PageCell>>>,
}

impl UsedRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            requests: HashMap::new(),
        }
    }

    /// Record a page as owned by `request`.
    pub fn record(&mut self, request: RequestOrderId, size: usize, page: PageCell) {
        self.requests
            .entry(request)
            .or_default()
            .entry(size)
            .or_default()
            .push(page);
    }

    /// Remove and return everything `request` owns.
    ///
    /// An unknown request yields an empty map.
    pub fn drain(&mut self, request: RequestOrderId) -> HashMap<usize, Vec<PageCell>> {
        self.requests.remove(&request).unwrap_or_default()
    }

    /// Whether `request` currently owns any page.
    pub fn contains(&self, request: RequestOrderId) -> bool {
        self.requests.contains_key(&request)
    }

    /// Pages `request` owns in one size class.
    pub fn pages_for(&self, request: RequestOrderId, size: usize) -> usize {
        self.requests
            .get(&request)
            .and_then(|classes| classes.get(&size))
            .map_or(0, Vec::len)
    }

    /// Pages `request` owns across all size classes.
    pub fn pages_owned(&self, request: RequestOrderId) -> usize {
        self.requests
            .get(&request)
            .map_or(0, |classes| classes.values().map(Vec::len).sum())
    }

    /// Whether any request owns a page of this size class.
    pub fn has_size(&self, size: usize) -> bool {
        self.requests
            .values()
            .any(|classes| classes.contains_key(&size))
    }

    /// Total number of checked-out pages.
    pub fn page_count(&self) -> usize {
        self.requests
            .values()
            .flat_map(HashMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Number of requests that own pages.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Forget every entry, returning how many requests were abandoned.
    pub fn clear(&mut self) -> usize {
        let abandoned = self.requests.len();
        self.requests.clear();
        abandoned
    }
}
