//! pagepool - per-request page recycling for binary-protocol servers.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Request dispatch (caller)                      │
//! │     assigns RequestOrderId → acquire(size, id) … release(id)    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               ↓
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  Page Allocator (allocator/)                    │
//! │  ┌──────────────────────┐        ┌──────────────────────────┐   │
//! │  │    Free Registry     │ ◀───── │      Used Registry       │   │
//! │  │ size → [page, ...]   │ release│ id → size → [page, ...]  │   │
//! │  └──────────┬───────────┘        └────────────▲─────────────┘   │
//! │             └─────────────── acquire ─────────┘                 │
//! │      PageAllocator + FixedPageAllocator + Page + Stats          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (RequestOrderId, Error, config)
//! - [`allocator`] - Registries, acquire/release protocol and page handles
//!
//! # Quick Start
//! ```
//! use pagepool::{PageAllocator, RequestOrderId};
//!
//! let allocator = PageAllocator::new();
//!
//! // One scope per in-flight request; pages return when it drops
//! {
//!     let request = allocator.request(RequestOrderId::new(1));
//!     let mut packet = request.acquire(1024);
//!     packet[..4].copy_from_slice(&[0, 0, 0, 5]);
//! }
//!
//! assert_eq!(allocator.available_count(), 1);
//! ```

pub mod allocator;
pub mod common;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DOWNLOAD_PAGE_SIZE, MAX_MSG_LENGTH, MAX_TX_PACKET};
pub use common::{AllocatorConfig, Error, RequestOrderId, Result};

pub use allocator::{
    AllocatorSnapshot, AllocatorStats, FixedPageAllocator, Page, PageAllocator, RequestPages,
    StatsSnapshot,
};
