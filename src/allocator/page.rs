//! Page storage and the exclusive handle handed to callers.

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use parking_lot::{ArcMutexGuard, Mutex, RawMutex};

use crate::common::RequestOrderId;

/// Shared storage cell for one page.
///
/// The registries hold the cell; a live [`Page`] holds its lock.
pub(crate) type PageCell = Arc<Mutex<Box<[u8]>>>;

/// Owned lock over a page's bytes.
pub(crate) type PageLock = ArcMutexGuard<RawMutex, Box<[u8]>>;

/// Allocate a fresh page of exactly `size` bytes.
///
/// Allocation failure aborts the process, as it does for any `Vec`.
pub(crate) fn allocate(size: usize) -> PageCell {
    Arc::new(Mutex::new(vec![0u8; size].into_boxed_slice()))
}

/// Exclusive access to one page checked out by a request.
///
/// Derefs to a byte slice whose length is the page's size class. The bytes
/// are NOT cleared between owners: a recycled page still holds whatever
/// its previous request wrote, so overwrite the region before reading it.
///
/// The lifetime ties the handle to whatever it was acquired from. Pages
/// taken through a [`RequestPages`](super::RequestPages) scope cannot
/// outlive that scope's release.
///
/// # Example
/// ```
/// use pagepool::{PageAllocator, RequestOrderId};
///
/// let allocator = PageAllocator::new();
/// let mut page = allocator.acquire(8, RequestOrderId::new(1));
/// page.copy_from_slice(b"payload!");
/// assert_eq!(&page[..], b"payload!");
/// ```
pub struct Page<'a> {
    /// Lock guard providing access to the bytes.
    lock: PageLock,
    /// Request that owns the page.
    request: RequestOrderId,
    _owner: PhantomData<&'a ()>,
}

impl Page<'_> {
    pub(crate) fn new(lock: PageLock, request: RequestOrderId) -> Self {
        Self {
            lock,
            request,
            _owner: PhantomData,
        }
    }

    /// Request that owns this page.
    #[inline]
    pub fn request(&self) -> RequestOrderId {
        self.request
    }

    /// Size class of the page, in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.lock.len()
    }
}

impl Deref for Page<'_> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.lock
    }
}

impl DerefMut for Page<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.lock
    }
}

impl fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("request", &self.request)
            .field("size", &self.size())
            .finish()
    }
}
