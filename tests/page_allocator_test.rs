//! Page Allocator Tests
//!
//! Walks the allocator through full request lifecycles and checks the
//! registry bookkeeping after every step.

use pagepool::{PageAllocator, RequestOrderId};
use proptest::prelude::*;

fn id(n: u32) -> RequestOrderId {
    RequestOrderId::new(n)
}

// ============================================================================
// Request lifecycle
// ============================================================================

/// Two requests share the same pages one after the other.
#[test]
fn test_recycle_between_requests() {
    let allocator = PageAllocator::new();

    let mut page = allocator.acquire(4, id(1));
    page[1] = 1;
    assert_eq!(page.len(), 4);
    drop(page);
    assert_eq!(allocator.used_pages(id(1), 4), 1);

    let mut page = allocator.acquire(4, id(1));
    page[0] = 2;
    drop(page);
    drop(allocator.acquire(2, id(1)));
    assert_eq!(allocator.used_pages(id(1), 4), 2);
    assert_eq!(allocator.used_pages(id(1), 2), 1);

    allocator.release(id(1));
    assert!(!allocator.contains(id(1)));
    assert_eq!(allocator.available_pages(4), 2);
    assert_eq!(allocator.available_pages(2), 1);

    // Most recently released 4-byte page comes back first
    let page = allocator.acquire(4, id(2));
    assert_eq!(page[0], 2);
    drop(page);
    let page = allocator.acquire(4, id(2));
    assert_eq!(page[1], 1);
    drop(page);

    assert!(allocator.contains(id(2)));
    assert_eq!(allocator.used_pages(id(2), 4), 2);
    assert_eq!(allocator.available_pages(4), 0);
    assert_eq!(allocator.available_pages(2), 1);
}

/// Continues past the first recycle: unknown releases, interleaved
/// requests and a final reset.
#[test]
fn test_full_session_cycle() {
    let allocator = PageAllocator::new();

    {
        let mut page = allocator.acquire(4, id(1));
        page[1] = 1;
    }
    drop(allocator.acquire(4, id(1)));
    drop(allocator.acquire(2, id(1)));
    allocator.release(id(1));

    drop(allocator.acquire(4, id(2)));
    drop(allocator.acquire(4, id(2)));

    // Releasing a request that owns nothing changes nothing
    let before = allocator.snapshot();
    allocator.release(id(3));
    assert_eq!(allocator.snapshot(), before);
    assert_eq!(allocator.used_pages(id(2), 4), 2);

    allocator.release(id(2));
    assert_eq!(allocator.request_count(), 0);
    assert_eq!(allocator.used_count(), 0);
    assert_eq!(allocator.available_count(), 3);
    assert_eq!(allocator.snapshot().available_size_classes, 2);

    let page = allocator.acquire(4, id(3));
    assert_eq!(page[1], 1);
    drop(page);
    drop(allocator.acquire(2, id(4)));
    allocator.release(id(3));

    assert!(allocator.contains(id(4)));
    assert_eq!(allocator.request_count(), 1);
    assert_eq!(allocator.available_pages(4), 2);
    assert_eq!(allocator.available_pages(2), 0);
    assert!(allocator.has_used_size(2));
    assert!(!allocator.has_used_size(4));

    allocator.reset_all();
    assert_eq!(allocator.used_count(), 0);
    assert_eq!(allocator.available_count(), 0);
    assert!(!allocator.contains(id(4)));
}

/// A page handle that survives reset stays usable but is never recycled.
#[test]
fn test_reset_abandons_held_pages() {
    let allocator = PageAllocator::new();

    let mut held = allocator.acquire(8, id(1));
    allocator.reset_all();

    held.copy_from_slice(b"stillok!");
    assert_eq!(&held[..], b"stillok!");

    // Nothing to release: the allocator forgot request 1
    allocator.release(id(1));
    drop(held);
    assert_eq!(allocator.available_count(), 0);
}

/// Scoped requests release on drop and keep stale bytes across owners.
#[test]
fn test_scoped_requests() {
    let allocator = PageAllocator::new();

    for n in 0..10u32 {
        let request = allocator.request(id(n));
        let mut small = request.acquire(64);
        let mut large = request.acquire(4096);

        if n > 0 {
            // Stale bytes from the previous request
            assert_eq!(small[0], (n - 1) as u8);
            assert_eq!(large[4095], (n - 1) as u8);
        }
        small[0] = n as u8;
        large[4095] = n as u8;
    }

    assert_eq!(allocator.used_count(), 0);
    assert_eq!(allocator.available_count(), 2);

    let stats = allocator.stats().snapshot();
    assert_eq!(stats.allocated, 2);
    assert_eq!(stats.recycled, 18);
    assert_eq!(stats.releases, 10);
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Every acquired page has exactly the requested length.
    #[test]
    fn prop_acquire_exact_length(sizes in prop::collection::vec(0usize..512, 1..32)) {
        let allocator = PageAllocator::new();
        for (n, &size) in sizes.iter().enumerate() {
            let page = allocator.acquire(size, id(n as u32 % 4));
            prop_assert_eq!(page.len(), size);
        }
    }

    /// Releasing requests never creates or loses pages.
    #[test]
    fn prop_release_conserves_pages(
        ops in prop::collection::vec((0u32..6, 1usize..5, any::<bool>()), 1..64)
    ) {
        let allocator = PageAllocator::new();
        let mut acquired = 0;

        for (request, size_class, release) in ops {
            if release {
                allocator.release(id(request));
                prop_assert!(!allocator.contains(id(request)));
            } else {
                let page = allocator.acquire(size_class * 16, id(request));
                prop_assert_eq!(page.len(), size_class * 16);
                acquired += 1;
            }

            let snapshot = allocator.snapshot();
            let stats = allocator.stats().snapshot();
            prop_assert_eq!(snapshot.tracked_pages() as u64, stats.allocated);
            prop_assert_eq!(stats.acquisitions(), acquired);
        }

        for request in 0..6 {
            allocator.release(id(request));
        }
        prop_assert_eq!(allocator.used_count(), 0);
        prop_assert_eq!(allocator.request_count(), 0);
    }

    /// k acquisitions of one size under one request are all recorded.
    #[test]
    fn prop_used_entry_counts(k in 1usize..20, size in 1usize..256) {
        let allocator = PageAllocator::new();
        for _ in 0..k {
            drop(allocator.acquire(size, id(1)));
        }
        prop_assert_eq!(allocator.used_pages(id(1), size), k);
        prop_assert!(allocator.has_used_size(size));

        allocator.release(id(1));
        prop_assert_eq!(allocator.available_pages(size), k);
        prop_assert!(!allocator.has_used_size(size));
    }
}
