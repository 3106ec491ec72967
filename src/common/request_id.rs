//! Request order identifier type.

use std::fmt;

/// Names one in-flight logical request.
///
/// Issued by the request-dispatch layer before the request touches the
/// allocator. Unique only while the request is in flight: once released,
/// the allocator keeps no state for the id and it may be handed out again.
///
/// # Example
/// ```
/// use pagepool::RequestOrderId;
///
/// let id = RequestOrderId::new(42);
/// assert_eq!(id.0, 42);
/// assert_eq!(id.next(), RequestOrderId::new(43));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestOrderId(pub u32);

impl RequestOrderId {
    /// Create a new RequestOrderId.
    #[inline]
    pub fn new(id: u32) -> Self {
        RequestOrderId(id)
    }

    /// The id that follows this one, wrapping at `u32::MAX`.
    #[inline]
    pub fn next(&self) -> Self {
        RequestOrderId(self.0.wrapping_add(1))
    }
}

impl From<u32> for RequestOrderId {
    fn from(id: u32) -> Self {
        RequestOrderId(id)
    }
}

impl fmt::Display for RequestOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({})", self.0)
    }
}
