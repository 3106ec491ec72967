//! Page Allocator - the acquire/release protocol.
//!
//! The [`PageAllocator`] provides:
//! - Size-classed recycling of fixed-length pages
//! - Per-request ownership with bulk release
//! - Full reset for session teardown
//! - Read-only diagnostics

use std::fmt;
use std::sync::atomic::Ordering;

use parking_lot::Mutex;
use tracing::{debug, info, trace, warn};

use crate::allocator::free_registry::FreeRegistry;
use crate::allocator::page::{self, PageCell, PageLock};
use crate::allocator::used_registry::UsedRegistry;
use crate::allocator::{AllocatorStats, Page, RequestPages};
use crate::common::{Error, RequestOrderId, Result};

/// Both registries, guarded together.
struct Registries {
    free: FreeRegistry,
    used: UsedRegistry,
}

/// Recycles byte pages between in-flight requests.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────────────┐
/// │                       PageAllocator                          │
/// │  ┌──────────────────────────────────────────────────────┐    │
/// │  │                Mutex<Registries>                     │    │
/// │  │  ┌────────────────────┐   ┌───────────────────────┐  │    │
/// │  │  │   FreeRegistry     │   │     UsedRegistry      │  │    │
/// │  │  │ size → [page, ..]  │◀──│ id → size → [page,..] │  │    │
/// │  │  └─────────┬──────────┘   └───────────▲───────────┘  │    │
/// │  │            └──────── acquire ─────────┘              │    │
/// │  └──────────────────────────────────────────────────────┘    │
/// │  ┌──────────────┐                                            │
/// │  │AllocatorStats│  atomic counters, no lock                  │
/// │  └──────────────┘                                            │
/// └──────────────────────────────────────────────────────────────┘
/// ```
///
/// # Thread Safety
/// One `Mutex` covers both registries, so every ownership transition is a
/// single short critical section and all operations are linearizable.
/// Fresh pages are allocated outside the lock. The allocator is
/// `Send + Sync`; share it with `Arc`.
///
/// # Usage
/// ```
/// use pagepool::{PageAllocator, RequestOrderId};
///
/// let allocator = PageAllocator::new();
/// let id = RequestOrderId::new(1);
///
/// let mut page = allocator.acquire(4, id);
/// page[0] = 0xAB;
/// drop(page);
///
/// allocator.release(id);
/// assert_eq!(allocator.used_count(), 0);
/// assert_eq!(allocator.available_count(), 1);
/// ```
pub struct PageAllocator {
    /// Free and used registries behind one lock.
    registries: Mutex<Registries>,

    /// Reuse statistics.
    stats: AllocatorStats,
}

impl PageAllocator {
    /// Create an allocator with both registries empty.
    pub fn new() -> Self {
        Self {
            registries: Mutex::new(Registries {
                free: FreeRegistry::new(),
                used: UsedRegistry::new(),
            }),
            stats: AllocatorStats::new(),
        }
    }

    // ========================================================================
    // Public API: Acquire and release
    // ========================================================================

    /// Check out a page of exactly `size` bytes for `request`.
    ///
    /// Pops a free page of that size class if one exists, otherwise
    /// allocates a fresh one. Either way the page is recorded as owned by
    /// `request` until [`release`](Self::release) is called for it.
    ///
    /// The page's contents are unspecified: a recycled page keeps the
    /// bytes its previous owner left. Overwrite before reading.
    pub fn acquire(&self, size: usize, request: RequestOrderId) -> Page<'_> {
        {
            let mut reg = self.registries.lock();
            if let Some((cell, lock)) = Self::take_ready(&mut reg.free, size) {
                reg.used.record(request, size, cell);
                drop(reg);

                self.stats.recycled.fetch_add(1, Ordering::Relaxed);
                trace!(size, %request, "recycled page");
                return Page::new(lock, request);
            }
        }

        // Miss: allocate before touching the registries again
        let cell = page::allocate(size);
        let lock = cell.lock_arc();
        self.registries.lock().used.record(request, size, cell);

        self.stats.allocated.fetch_add(1, Ordering::Relaxed);
        trace!(size, %request, "allocated fresh page");
        Page::new(lock, request)
    }

    /// Return every page `request` owns to the free registry.
    ///
    /// Releasing a request that owns nothing is a no-op. Callers must not
    /// keep using pages after releasing their request; a handle that does
    /// outlive the release keeps its page out of circulation until dropped.
    pub fn release(&self, request: RequestOrderId) {
        let (pages, size_classes) = {
            let mut reg = self.registries.lock();
            let owned = reg.used.drain(request);
            let size_classes = owned.len();
            let mut pages = 0;
            for (size, batch) in owned {
                pages += batch.len();
                reg.free.put(size, batch);
            }
            (pages, size_classes)
        };

        if pages == 0 {
            return;
        }

        self.stats.releases.fetch_add(1, Ordering::Relaxed);
        self.stats
            .pages_released
            .fetch_add(pages as u64, Ordering::Relaxed);
        debug!(%request, pages, size_classes, "released request pages");
    }

    /// Open a scope that acquires pages for `request`.
    ///
    /// The scope releases the request when it is dropped, and its pages
    /// borrow it, so none of them can be used after the release.
    pub fn request(&self, request: RequestOrderId) -> RequestPages<'_> {
        RequestPages::new(self, request)
    }

    // ========================================================================
    // Public API: Reset
    // ========================================================================

    /// Clear both registries.
    ///
    /// Intended for session teardown when no request is in flight. If some
    /// request still owns pages, the reset proceeds anyway: those pages stay
    /// valid for whoever holds them, but the allocator forgets them and
    /// they are never recycled. Use [`try_reset`](Self::try_reset) to
    /// refuse instead.
    pub fn reset_all(&self) {
        let (abandoned, discarded) = {
            let mut reg = self.registries.lock();
            (reg.used.clear(), reg.free.clear())
        };

        self.stats.resets.fetch_add(1, Ordering::Relaxed);
        if abandoned > 0 {
            warn!(abandoned, "reset abandoned requests still in flight");
        }
        info!(discarded, "page allocator reset");
    }

    /// Clear both registries, but only if no request is in flight.
    ///
    /// # Errors
    /// - `Error::RequestsInFlight` if any request still owns pages; the
    ///   registries are left untouched
    pub fn try_reset(&self) -> Result<()> {
        let discarded = {
            let mut reg = self.registries.lock();
            let in_flight = reg.used.request_count();
            if in_flight > 0 {
                return Err(Error::RequestsInFlight(in_flight));
            }
            reg.free.clear()
        };

        self.stats.resets.fetch_add(1, Ordering::Relaxed);
        info!(discarded, "page allocator reset");
        Ok(())
    }

    // ========================================================================
    // Public API: Diagnostics
    // ========================================================================

    /// Number of pages currently owned by requests.
    pub fn used_count(&self) -> usize {
        self.registries.lock().used.page_count()
    }

    /// Number of free pages across all size classes.
    pub fn available_count(&self) -> usize {
        self.registries.lock().free.page_count()
    }

    /// Whether any request owns a page of this size class.
    pub fn has_used_size(&self, size: usize) -> bool {
        self.registries.lock().used.has_size(size)
    }

    /// Number of requests that currently own pages.
    pub fn request_count(&self) -> usize {
        self.registries.lock().used.request_count()
    }

    /// Whether `request` currently owns any page.
    pub fn contains(&self, request: RequestOrderId) -> bool {
        self.registries.lock().used.contains(request)
    }

    /// Pages `request` owns in one size class.
    pub fn used_pages(&self, request: RequestOrderId, size: usize) -> usize {
        self.registries.lock().used.pages_for(request, size)
    }

    /// Pages `request` owns across all size classes.
    pub fn pages_owned(&self, request: RequestOrderId) -> usize {
        self.registries.lock().used.pages_owned(request)
    }

    /// Free pages in one size class.
    pub fn available_pages(&self, size: usize) -> usize {
        self.registries.lock().free.pages_for(size)
    }

    /// Consistent view of both registries, taken under one lock.
    pub fn snapshot(&self) -> AllocatorSnapshot {
        let reg = self.registries.lock();
        AllocatorSnapshot {
            requests: reg.used.request_count(),
            used_pages: reg.used.page_count(),
            available_pages: reg.free.page_count(),
            available_size_classes: reg.free.size_classes(),
        }
    }

    /// Get allocator statistics.
    pub fn stats(&self) -> &AllocatorStats {
        &self.stats
    }

    // ========================================================================
    // Internal: Free registry lookup
    // ========================================================================

    /// Pop a free page of `size` that no stale handle still holds.
    ///
    /// Pages whose handle outlived their request's release are put back
    /// at the bottom of the class rather than handed to a new owner.
    fn take_ready(free: &mut FreeRegistry, size: usize) -> Option<(PageCell, PageLock)> {
        let mut held = Vec::new();
        let ready = loop {
            match free.take(size) {
                Some(cell) => match cell.try_lock_arc() {
                    Some(lock) => break Some((cell, lock)),
                    None => held.push(cell),
                },
                None => break None,
            }
        };

        if !held.is_empty() {
            warn!(size, pages = held.len(), "skipped pages still held after release");
            free.defer(size, held);
        }
        ready
    }
}

impl Default for PageAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PageAllocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageAllocator")
            .field("registries", &self.snapshot())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}

/// Counts from both registries at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocatorSnapshot {
    /// Requests that own pages.
    pub requests: usize,
    /// Pages owned by requests.
    pub used_pages: usize,
    /// Free pages.
    pub available_pages: usize,
    /// Size classes holding at least one free page.
    pub available_size_classes: usize,
}

impl AllocatorSnapshot {
    /// Every page the allocator tracks.
    pub fn tracked_pages(&self) -> usize {
        self.used_pages + self.available_pages
    }
}
