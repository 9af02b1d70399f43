//! Unified error types for the crate.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
///
/// Extraction itself is infallible: degenerate inputs (empty array, skip
/// beyond the end) normalize to an empty result. Errors can only arise when
/// adopting a raw handle from the core's C boundary.
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum Error {
    /// The core handed over a null array handle.
    #[error("unexpected null array handle from core")]
    NullPointer,

    /// An accessor table entry required by the adapter was missing.
    #[error("missing core accessor: {0}")]
    NullFunction(&'static str),
}
