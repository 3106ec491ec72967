//! Error types for pagepool.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in pagepool.
///
/// The allocator's own acquire/release path is total and never produces
/// one of these. They come from configuration and from the checked reset.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A configured page size is zero or violates the message limit.
    #[error("Invalid page size: {0}")]
    InvalidPageSize(usize),

    /// A checked reset was refused because requests still own pages.
    ///
    /// Carries the number of request ids still in flight.
    #[error("Cannot reset allocator: {0} request(s) still in flight")]
    RequestsInFlight(usize),
}
