//! Shared output buffers written in place by concurrent tasks.
//!
//! Matrix rows and DFT frequency slices are the only shared mutable state in
//! the harness, and they are written without locks or atomics. Safety rests
//! entirely on disjoint index ownership: every task writes a region no other
//! task touches, and the buffer is only read back after the join.
//!
//! The buffer is a slice of `UnsafeCell`s rather than a cell around the whole
//! slice, so handing a task its region never materializes a reference to
//! anyone else's cells. Each view is carved out through raw pointers; two
//! live views may coexist only while they do not overlap.

use std::cell::UnsafeCell;
use std::ops::Range;
use std::sync::Arc;

pub struct SharedOutput<T> {
    cells: Box<[UnsafeCell<T>]>,
}

// Concurrent access is confined to non-overlapping regions; see `slice_mut`.
unsafe impl<T: Send> Sync for SharedOutput<T> {}

impl<T> SharedOutput<T> {
    pub fn new(data: Vec<T>) -> Arc<Self> {
        Arc::new(SharedOutput {
            cells: data.into_iter().map(UnsafeCell::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Hands out a mutable view of `range`. Panics if `range` is out of
    /// bounds.
    ///
    /// # Safety
    ///
    /// The caller must guarantee that no two live views overlap and that the
    /// buffer is not read while any view exists. The kernels uphold this by
    /// construction: each task receives exactly one region, regions are
    /// pairwise disjoint, and [`into_inner`](Self::into_inner) only succeeds
    /// once every task has dropped its reference.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn slice_mut(&self, range: Range<usize>) -> &mut [T] {
        let cells: &[UnsafeCell<T>] = &self.cells[range];
        // `UnsafeCell<T>` is layout-compatible with `T`, and the caller
        // vouches for exclusive access to exactly these cells.
        std::slice::from_raw_parts_mut(cells.as_ptr() as *mut T, cells.len())
    }

    /// Reclaims the buffer once all writers are done. Returns `None` while a
    /// straggler task still holds a reference, which is exactly the case
    /// where reading the buffer would race with a late write.
    pub fn into_inner(this: Arc<Self>) -> Option<Vec<T>> {
        Arc::try_unwrap(this).ok().map(|shared| {
            shared
                .cells
                .into_vec()
                .into_iter()
                .map(UnsafeCell::into_inner)
                .collect()
        })
    }
}
