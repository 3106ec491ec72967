//! Single-size page allocator.
//!
//! Some callers never need anything but one standard page: every inbound
//! packet is read into a buffer of the protocol's maximum message length.
//! [`FixedPageAllocator`] serves exactly that size class.

use crate::allocator::{AllocatorSnapshot, AllocatorStats, Page, PageAllocator};
use crate::common::config::MAX_MSG_LENGTH;
use crate::common::{AllocatorConfig, RequestOrderId, Result};

/// Page allocator whose pages all share one size.
///
/// # Example
/// ```
/// use pagepool::{FixedPageAllocator, RequestOrderId};
///
/// let allocator = FixedPageAllocator::new(512);
/// let page = allocator.acquire(RequestOrderId::new(1));
/// assert_eq!(page.len(), 512);
/// ```
#[derive(Debug)]
pub struct FixedPageAllocator {
    inner: PageAllocator,
    page_size: usize,
}

impl FixedPageAllocator {
    /// Create an allocator serving pages of `page_size` bytes.
    ///
    /// # Panics
    /// Panics if `page_size` is 0.
    pub fn new(page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be > 0");
        Self {
            inner: PageAllocator::new(),
            page_size,
        }
    }

    /// Create an allocator serving `config.max_message_length` pages.
    ///
    /// # Errors
    /// - `Error::InvalidPageSize` if the config does not validate
    pub fn from_config(config: &AllocatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config.max_message_length))
    }

    /// Size of every page this allocator serves.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Check out one standard page for `request`.
    pub fn acquire(&self, request: RequestOrderId) -> Page<'_> {
        self.inner.acquire(self.page_size, request)
    }

    /// Return every page `request` owns. No-op for unknown requests.
    pub fn release(&self, request: RequestOrderId) {
        self.inner.release(request);
    }

    /// Clear both registries. See [`PageAllocator::reset_all`].
    pub fn reset_all(&self) {
        self.inner.reset_all();
    }

    /// Clear both registries unless a request is in flight.
    ///
    /// # Errors
    /// - `Error::RequestsInFlight` if any request still owns pages
    pub fn try_reset(&self) -> Result<()> {
        self.inner.try_reset()
    }

    /// Number of pages currently owned by requests.
    pub fn used_count(&self) -> usize {
        self.inner.used_count()
    }

    /// Number of free pages.
    pub fn available_count(&self) -> usize {
        self.inner.available_count()
    }

    /// Number of requests that currently own pages.
    pub fn request_count(&self) -> usize {
        self.inner.request_count()
    }

    /// Whether `request` currently owns any page.
    pub fn contains(&self, request: RequestOrderId) -> bool {
        self.inner.contains(request)
    }

    /// Consistent view of both registries.
    pub fn snapshot(&self) -> AllocatorSnapshot {
        self.inner.snapshot()
    }

    /// Get allocator statistics.
    pub fn stats(&self) -> &AllocatorStats {
        self.inner.stats()
    }
}

impl Default for FixedPageAllocator {
    fn default() -> Self {
        Self::new(MAX_MSG_LENGTH)
    }
}
