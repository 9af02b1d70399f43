//! Option structs for the extraction operations.

/// Options for extracting a trailing window from a core-owned array.
///
/// Selects the contiguous run of elements ending `skip_end` positions before
/// the newest element and extending backwards by `length` elements (or to the
/// start of the array when unbounded).
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowOptions {
    /// Requested number of elements. `None` and `Some(0)` both mean
    /// unbounded: the window extends to the start of the array. The zero
    /// alias is kept for compatibility with callers that pass a plain count
    /// with `0` as "no limit".
    pub length: Option<usize>,
    /// Number of newest elements to exclude before the window is counted.
    pub skip_end: usize,
    /// Legacy paging cursor. Accepted for interface compatibility and echoed
    /// in trace output, but not used by the window computation.
    pub from: usize,
}

impl WindowOptions {
    /// Unbounded window over the whole array.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            length: None,
            skip_end: 0,
            from: 0,
        }
    }

    /// The last `length` elements, newest `skip_end` excluded.
    #[must_use]
    pub const fn trailing(length: usize, skip_end: usize) -> Self {
        Self {
            length: Some(length),
            skip_end,
            from: 0,
        }
    }
}
