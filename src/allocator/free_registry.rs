//! Free registry - pages no request currently owns.

use std::collections::HashMap;

use crate::allocator::page::PageCell;

/// Unowned pages grouped by size class.
///
/// Each class is a stack: the most recently returned page is handed out
/// first, which keeps recently touched memory hot.
#[derive(Default)]
pub(crate) struct FreeRegistry {
    /// Size class → pages of exactly that length.
    pages: HashMap<usize, Vec<PageCell>>,
}

impl FreeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
        }
    }

    /// Pop one page of the given size class, if any is free.
    pub fn take(&mut self, size: usize) -> Option<PageCell> {
        self.pages.get_mut(&size)?.pop()
    }

    /// Push a batch of pages onto a size class.
    ///
    /// The batch is consumed, so the caller keeps no reference to it.
    pub fn put(&mut self, size: usize, mut batch: Vec<PageCell>) {
        self.pages.entry(size).or_default().append(&mut batch);
    }

    /// Return pages to the bottom of a size class.
    ///
    /// Used for pages that cannot be handed out yet, so that the next
    /// `take` does not pop them straight back.
    pub fn defer(&mut self, size: usize, batch: Vec<PageCell>) {
        let class = self.pages.entry(size).or_default();
        class.splice(0..0, batch);
    }

    /// Number of free pages in one size class.
    pub fn pages_for(&self, size: usize) -> usize {
        self.pages.get(&size).map_or(0, Vec::len)
    }

    /// Total number of free pages.
    pub fn page_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    /// Number of size classes that currently hold at least one page.
    pub fn size_classes(&self) -> usize {
        self.pages.values().filter(|class| !class.is_empty()).count()
    }

    /// Drop every free page, returning how many were discarded.
    pub fn clear(&mut self) -> usize {
        let discarded = self.page_count();
        self.pages.clear();
        discarded
    }
}
