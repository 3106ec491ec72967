//! Common types and utilities shared across pagepool.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants and [`AllocatorConfig`]
//! - Error types
//! - Identifiers ([`RequestOrderId`])

pub mod config;
pub mod error;
mod request_id;

pub use config::AllocatorConfig;
pub use error::{Error, Result};
pub use request_id::RequestOrderId;
