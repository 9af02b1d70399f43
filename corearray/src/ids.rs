//! Core-owned id arrays: the boundary trait, the RAII guard, and the
//! extraction operations.
//!
//! The chat core answers queries with handles to arrays it allocated itself.
//! The contract is narrow: the length may be read any number of times, each
//! element may be read by index, and the handle must be released exactly once,
//! after which it must never be touched again. [`IdArray`] encodes that
//! contract in ownership: release happens in `Drop`, and every extraction
//! consumes the array by value, so neither use-after-release nor
//! double-release can be written in safe code.

use tracing::trace;

use crate::types::WindowOptions;

/// An identifier handed out by the core (message id, chat id, contact id).
///
/// The core stores ids as unsigned 32-bit values; they are opaque to this
/// crate either way.
pub type Id = u32;

/// Read-side contract of a core-owned id array.
///
/// Implementations are adapters over whatever the core actually hands out;
/// see [`RawIdArray`](crate::ffi::RawIdArray) for the C-boundary one. `len`
/// and `id_at` must be side-effect free and repeatable; `release` frees the
/// core allocation and is called exactly once, by [`IdArray`]'s `Drop` impl.
pub trait IdSource {
    /// Number of elements in the array.
    fn len(&self) -> usize;

    /// Element at `index`. Only called with `index < self.len()`.
    fn id_at(&self, index: usize) -> Id;

    /// Whether the array holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the array to the core. Called exactly once, from `Drop`.
    fn release(&mut self);
}

/// RAII guard for a core-owned id array. Releases the array on drop.
///
/// Extraction methods consume the guard, copy the requested elements into an
/// owned `Vec<Id>`, and release the handle on the way out, on every branch,
/// including the degenerate ones that copy nothing.
#[derive(Debug)]
pub struct IdArray<S: IdSource> {
    source: S,
}

impl<S: IdSource> IdArray<S> {
    /// Take ownership of a core-owned array.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Number of elements currently in the array.
    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Whether the array holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.len() == 0
    }

    /// Copy every element, in original order, then release the handle.
    #[must_use]
    pub fn into_vec(self) -> Vec<Id> {
        let total = self.source.len();
        (0..total).map(|i| self.source.id_at(i)).collect()
    }

    /// Copy the last `min(n, len)` elements in original order (oldest of the
    /// selected elements first), then release the handle.
    ///
    /// `n == 0` means "no limit" and yields the full array, mirroring callers
    /// that pass a plain count with zero as the unset value.
    #[must_use]
    pub fn into_last(self, n: usize) -> Vec<Id> {
        let total = self.source.len();
        let take = if n == 0 { total } else { n.min(total) };
        (total - take..total).map(|i| self.source.id_at(i)).collect()
    }

    /// Copy the trailing window selected by `options`, in original order,
    /// then release the handle.
    ///
    /// With `total` elements and `skip_end` newest ones excluded, the highest
    /// eligible index is `start = total - 1 - skip_end`. A bounded request
    /// for `n` elements covers indices `max(0, start - n) + 1 ..= start`; an
    /// unbounded one covers `0 ..= start`. Note the bounded form can reach
    /// index 0 only via the unbounded alias (`length` of `None` or
    /// `Some(0)`); a bounded window over a short array stops one element
    /// early. Long-standing behavior that paging callers rely on.
    ///
    /// If the array is empty, or `skip_end` consumes it entirely, no element
    /// is read and the result is empty. The handle is released regardless.
    #[must_use]
    pub fn into_window(self, options: &WindowOptions) -> Vec<Id> {
        let total = self.source.len();
        if total == 0 || total <= options.skip_end {
            return Vec::new();
        }

        let start = total - 1 - options.skip_end;
        let ids: Vec<Id> = match options.length {
            Some(n) if n > 0 => {
                let end = start.saturating_sub(n);
                (end + 1..=start).map(|i| self.source.id_at(i)).collect()
            }
            _ => (0..=start).map(|i| self.source.id_at(i)).collect(),
        };

        trace!(
            from = options.from,
            skip_end = options.skip_end,
            length = ?options.length,
            total,
            count = ids.len(),
            "copied window from core array"
        );
        ids
    }
}

impl<S: IdSource> Drop for IdArray<S> {
    fn drop(&mut self) {
        self.source.release();
    }
}
