//! Request scope - RAII release of a request's pages.

use crate::allocator::{Page, PageAllocator};
use crate::common::RequestOrderId;

/// Pages acquired on behalf of one in-flight request.
///
/// Every page handed out borrows the scope, and the scope releases its
/// request when dropped (or when [`release`](Self::release) consumes it).
/// Using a page after its request is released is therefore a compile
/// error rather than a caller obligation.
///
/// # Example
/// ```
/// use pagepool::{PageAllocator, RequestOrderId};
///
/// let allocator = PageAllocator::new();
/// {
///     let request = allocator.request(RequestOrderId::new(7));
///     let mut header = request.acquire(13);
///     let mut body = request.acquire(4096);
///     header[0] = 1;
///     body[0] = 2;
///     assert_eq!(request.page_count(), 2);
/// } // pages dropped, then request 7 released
///
/// assert_eq!(allocator.used_count(), 0);
/// assert_eq!(allocator.available_count(), 2);
/// ```
///
/// ```compile_fail
/// use pagepool::{PageAllocator, RequestOrderId};
///
/// let allocator = PageAllocator::new();
/// let request = allocator.request(RequestOrderId::new(1));
/// let page = request.acquire(4);
/// request.release();
/// let _ = page[0]; // page outlives its request
/// ```
pub struct RequestPages<'a> {
    /// Allocator that owns the registries.
    allocator: &'a PageAllocator,
    /// Request the pages are recorded under.
    request: RequestOrderId,
}

impl<'a> RequestPages<'a> {
    /// Create a scope. Called by `PageAllocator::request()`.
    pub(crate) fn new(allocator: &'a PageAllocator, request: RequestOrderId) -> Self {
        Self { allocator, request }
    }

    /// Request this scope acquires for.
    #[inline]
    pub fn id(&self) -> RequestOrderId {
        self.request
    }

    /// Check out a page of exactly `size` bytes for this request.
    ///
    /// Same contents contract as [`PageAllocator::acquire`].
    pub fn acquire(&self, size: usize) -> Page<'_> {
        self.allocator.acquire(size, self.request)
    }

    /// Pages this request currently owns.
    pub fn page_count(&self) -> usize {
        self.allocator.pages_owned(self.request)
    }

    /// Release the request now. Equivalent to dropping the scope.
    pub fn release(self) {}
}

impl Drop for RequestPages<'_> {
    fn drop(&mut self) {
        self.allocator.release(self.request);
    }
}
