//! Per-request page allocation.
//!
//! Pages are fixed-length byte buffers. While no request owns them they
//! sit in the free registry, grouped by size class. Once acquired they are
//! recorded in the used registry under the owning request, and they all
//! return to the free registry in one step when that request is released.
//!
//! # Components
//! - [`PageAllocator`] - The acquire/release protocol over both registries
//! - [`FixedPageAllocator`] - Single-size variant for standard message pages
//! - [`Page`] - Exclusive RAII handle over one page's bytes
//! - [`RequestPages`] - Request scope that releases its pages on drop
//! - [`AllocatorStats`] - Reuse statistics

mod fixed;
mod free_registry;
mod page;
mod page_allocator;
mod request;
mod stats;
mod used_registry;

pub use fixed::FixedPageAllocator;
pub use page::Page;
pub use page_allocator::{AllocatorSnapshot, PageAllocator};
pub use request::RequestPages;
pub use stats::{AllocatorStats, StatsSnapshot};
