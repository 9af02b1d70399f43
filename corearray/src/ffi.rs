#![allow(unsafe_code)]
//! C-boundary adapter: [`IdSource`] over an opaque core handle plus the
//! core's accessor function pointers.

use std::ffi::c_void;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::ids::{Id, IdSource};

/// Accessor table for a core-owned id array handle.
///
/// Entries are optional the way bindgen renders C function pointers;
/// [`RawIdArray::from_raw`] rejects a table with a missing entry before the
/// handle is adopted.
#[derive(Debug, Clone, Copy)]
pub struct RawArrayFns {
    /// Element count. Pure; valid until release.
    pub len: Option<unsafe extern "C" fn(array: *const c_void) -> usize>,
    /// Element by zero-based index. Valid for `index < len(array)`.
    pub id_at: Option<unsafe extern "C" fn(array: *const c_void, index: usize) -> Id>,
    /// Returns the array to the core. Invalidates the handle.
    pub release: Option<unsafe extern "C" fn(array: *mut c_void)>,
}

/// A core-owned id array adopted from the C boundary.
///
/// Wrap it in [`IdArray`](crate::ids::IdArray) to extract ids; the guard's
/// `Drop` calls the table's `release` exactly once.
// Owning handle; a Copy impl would break the single-release contract.
#[allow(missing_copy_implementations)]
pub struct RawIdArray {
    handle: NonNull<c_void>,
    len: unsafe extern "C" fn(*const c_void) -> usize,
    id_at: unsafe extern "C" fn(*const c_void, usize) -> Id,
    release: unsafe extern "C" fn(*mut c_void),
}

// The core's arrays are plain allocations; the handle carries no thread
// affinity, only the single-release obligation the guard already enforces.
unsafe impl Send for RawIdArray {}

impl RawIdArray {
    /// Adopt a raw array handle. Takes ownership on success.
    ///
    /// Returns [`Error::NullPointer`] for a null handle and
    /// [`Error::NullFunction`] for an incomplete table; in both cases nothing
    /// is released (there is nothing this crate could safely release).
    ///
    /// # Safety
    ///
    /// `handle` must be a live array handle produced by the core, not yet
    /// released, and not shared with any other owner. The entries of `fns`
    /// must be the core's accessors for that handle type.
    ///
    /// # Errors
    ///
    /// See above; only null inputs fail.
    pub unsafe fn from_raw(handle: *mut c_void, fns: RawArrayFns) -> Result<Self> {
        let handle = NonNull::new(handle).ok_or(Error::NullPointer)?;
        Ok(Self {
            handle,
            len: fns.len.ok_or(Error::NullFunction("len"))?,
            id_at: fns.id_at.ok_or(Error::NullFunction("id_at"))?,
            release: fns.release.ok_or(Error::NullFunction("release"))?,
        })
    }
}

impl IdSource for RawIdArray {
    fn len(&self) -> usize {
        unsafe { (self.len)(self.handle.as_ptr()) }
    }

    fn id_at(&self, index: usize) -> Id {
        unsafe { (self.id_at)(self.handle.as_ptr(), index) }
    }

    fn release(&mut self) {
        unsafe { (self.release)(self.handle.as_ptr()) };
    }
}

impl std::fmt::Debug for RawIdArray {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawIdArray")
            .field("handle", &self.handle)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::ids::IdArray;
    use crate::types::WindowOptions;

    /// Stand-in for a core allocation, reached only through the C shims.
    struct CoreArray {
        ids: Vec<Id>,
        frees: Arc<AtomicUsize>,
    }

    unsafe extern "C" fn core_len(array: *const c_void) -> usize {
        unsafe { &*array.cast::<CoreArray>() }.ids.len()
    }

    unsafe extern "C" fn core_id_at(array: *const c_void, index: usize) -> Id {
        unsafe { &*array.cast::<CoreArray>() }.ids[index]
    }

    unsafe extern "C" fn core_release(array: *mut c_void) {
        let arr = unsafe { Box::from_raw(array.cast::<CoreArray>()) };
        arr.frees.fetch_add(1, Ordering::SeqCst);
    }

    const FNS: RawArrayFns = RawArrayFns {
        len: Some(core_len),
        id_at: Some(core_id_at),
        release: Some(core_release),
    };

    fn core_array(ids: Vec<Id>) -> (*mut c_void, Arc<AtomicUsize>) {
        let frees = Arc::new(AtomicUsize::new(0));
        let arr = Box::new(CoreArray {
            ids,
            frees: Arc::clone(&frees),
        });
        (Box::into_raw(arr).cast::<c_void>(), frees)
    }

    #[test]
    fn null_handle_is_rejected() {
        let err = unsafe { RawIdArray::from_raw(std::ptr::null_mut(), FNS) };
        assert!(matches!(err, Err(Error::NullPointer)));
    }

    #[test]
    fn incomplete_table_is_rejected_without_release() {
        let (handle, frees) = core_array(vec![1, 2]);
        let fns = RawArrayFns { id_at: None, ..FNS };
        let err = unsafe { RawIdArray::from_raw(handle, fns) };
        assert!(matches!(err, Err(Error::NullFunction("id_at"))));
        assert_eq!(frees.load(Ordering::SeqCst), 0);

        // Adopt properly so the allocation is returned.
        let raw = unsafe { RawIdArray::from_raw(handle, FNS) }.unwrap();
        drop(IdArray::new(raw));
        assert_eq!(frees.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn window_through_the_c_boundary() {
        let (handle, frees) = core_array((0..10).collect());
        let raw = unsafe { RawIdArray::from_raw(handle, FNS) }.unwrap();
        let ids = IdArray::new(raw).into_window(&WindowOptions::trailing(3, 2));
        assert_eq!(ids, vec![5, 6, 7]);
        assert_eq!(frees.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_core_array_is_freed_exactly_once() {
        let (handle, frees) = core_array(vec![]);
        let raw = unsafe { RawIdArray::from_raw(handle, FNS) }.unwrap();
        assert!(IdArray::new(raw).into_vec().is_empty());
        assert_eq!(frees.load(Ordering::SeqCst), 1);
    }
}
