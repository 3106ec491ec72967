//! Configuration constants for pagepool.
//!
//! The constants mirror the limits of the binary protocol the allocator
//! serves. The protocol layer owns them; the allocator only needs them to
//! size the pages of the single-size variant and the benchmarks.

use crate::common::{Error, Result};

/// Largest inbound packet the protocol accepts (256KB).
///
/// Every inbound packet is read into a page of this size, so it is the
/// size class that dominates allocation traffic.
pub const MAX_MSG_LENGTH: usize = 256 * 1024;

/// Largest payload carried by one outbound data packet (32KB).
pub const MAX_TX_PACKET: usize = 32 * 1024;

/// Bytes a data response needs in front of its payload.
///
/// 4 bytes of length prefix, 1 byte of packet type, 4 bytes of request
/// id and 4 bytes of payload length.
pub const DATA_PACKET_OVERHEAD: usize = 9 + 4;

/// Page size used when serving a download chunk.
pub const DOWNLOAD_PAGE_SIZE: usize = MAX_TX_PACKET + DATA_PACKET_OVERHEAD;

/// Tunable limits for an allocator instance.
///
/// # Example
/// ```
/// use pagepool::AllocatorConfig;
///
/// let config = AllocatorConfig::default().with_max_message_length(64 * 1024);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.max_message_length, 64 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorConfig {
    /// Size of the standard page served by the single-size variant.
    pub max_message_length: usize,

    /// Largest outbound payload; sizes download pages.
    pub max_packet_length: usize,
}

impl AllocatorConfig {
    /// Create a config with the protocol defaults.
    pub fn new() -> Self {
        Self {
            max_message_length: MAX_MSG_LENGTH,
            max_packet_length: MAX_TX_PACKET,
        }
    }

    /// Set the standard page size.
    #[must_use]
    pub fn with_max_message_length(mut self, len: usize) -> Self {
        self.max_message_length = len;
        self
    }

    /// Set the largest outbound payload.
    #[must_use]
    pub fn with_max_packet_length(mut self, len: usize) -> Self {
        self.max_packet_length = len;
        self
    }

    /// Page size a download response needs under this config.
    pub fn download_page_size(&self) -> usize {
        self.max_packet_length + DATA_PACKET_OVERHEAD
    }

    /// Check that the limits describe usable pages.
    ///
    /// # Errors
    /// - `Error::InvalidPageSize` if either length is zero, or a download
    ///   page would not fit inside one message
    pub fn validate(&self) -> Result<()> {
        if self.max_message_length == 0 {
            return Err(Error::InvalidPageSize(self.max_message_length));
        }
        if self.max_packet_length == 0 {
            return Err(Error::InvalidPageSize(self.max_packet_length));
        }
        if self.download_page_size() > self.max_message_length {
            return Err(Error::InvalidPageSize(self.download_page_size()));
        }
        Ok(())
    }
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
