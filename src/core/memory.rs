//! Memory management utilities for bag storage.
//!
//! Bag arrays are allocated through [`AlignedBuffer`], a fixed-length,
//! 32-byte aligned array that reports allocation failure as an error instead
//! of aborting. An optional [`MemoryBudget`] caps the number of bytes a group
//! of buffers may hold at once; every buffer refunds its budget when dropped.

use crate::core::constants::ALIGNED_SIZE;
use crate::core::error::MemoryError;
use std::alloc::{alloc, dealloc, Layout};
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Thread-safe memory usage tracker for monitoring and debugging.
static TOTAL_ALLOCATED: AtomicUsize = AtomicUsize::new(0);

/// Get total allocated memory across all live AlignedBuffer instances.
pub fn total_allocated_memory() -> usize {
    TOTAL_ALLOCATED.load(Ordering::Relaxed)
}

/// Byte limit shared by every buffer allocated against it.
#[derive(Debug)]
pub struct MemoryBudget {
    limit: usize,
    in_use: AtomicUsize,
    peak: AtomicUsize,
}

impl MemoryBudget {
    /// Create a budget that admits at most `limit` bytes at a time.
    pub fn new(limit: usize) -> Arc<Self> {
        Arc::new(MemoryBudget {
            limit,
            in_use: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    /// Create a budget with no effective limit, useful for tracking only.
    pub fn unlimited() -> Arc<Self> {
        Self::new(usize::MAX)
    }

    /// Reserve `bytes` against the budget.
    pub fn try_acquire(&self, bytes: usize) -> Result<(), MemoryError> {
        let limit = self.limit;
        let previous = self
            .in_use
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                current
                    .checked_add(bytes)
                    .filter(|&total| total <= limit)
            })
            .map_err(|current| MemoryError::BudgetExceeded {
                requested: bytes,
                available: limit.saturating_sub(current),
            })?;
        self.peak.fetch_max(previous + bytes, Ordering::Relaxed);
        Ok(())
    }

    /// Reserve `bytes` and tie the reservation to the returned guard.
    ///
    /// The bytes are returned to the budget when the guard is dropped.
    pub fn reserve(self: &Arc<Self>, bytes: usize) -> Result<MemoryReservation, MemoryError> {
        self.try_acquire(bytes)?;
        Ok(MemoryReservation {
            budget: Arc::clone(self),
            bytes,
        })
    }

    /// Return `bytes` previously reserved with [`MemoryBudget::try_acquire`].
    pub fn release(&self, bytes: usize) {
        let previous = self.in_use.fetch_sub(bytes, Ordering::AcqRel);
        debug_assert!(previous >= bytes, "memory budget released more than it acquired");
    }

    /// Configured limit in bytes.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Bytes currently reserved.
    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Acquire)
    }

    /// Bytes still available.
    pub fn available(&self) -> usize {
        self.limit.saturating_sub(self.in_use())
    }

    /// Highest number of bytes reserved at any one time.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::Relaxed)
    }
}

/// Bytes held against a [`MemoryBudget`], refunded on drop.
#[derive(Debug)]
pub struct MemoryReservation {
    budget: Arc<MemoryBudget>,
    bytes: usize,
}

impl MemoryReservation {
    /// Number of reserved bytes.
    pub fn bytes(&self) -> usize {
        self.bytes
    }
}

impl Drop for MemoryReservation {
    fn drop(&mut self) {
        self.budget.release(self.bytes);
    }
}

/// SIMD-aligned, fixed-length array with automatic memory management.
///
/// The buffer is fully initialised on construction and exclusively owns its
/// memory. Dropping it deallocates and refunds the budget it was charged to.
pub struct AlignedBuffer<T: Copy> {
    ptr: NonNull<T>,
    len: usize,
    layout: Layout,
    _reservation: Option<MemoryReservation>,
    _marker: PhantomData<T>,
}

impl<T: Copy> AlignedBuffer<T> {
    /// Allocate `len` elements, all set to `value`.
    pub fn filled(
        len: usize,
        value: T,
        budget: Option<&Arc<MemoryBudget>>,
    ) -> Result<Self, MemoryError> {
        Self::from_fn(len, budget, |_| value)
    }

    /// Allocate `len` elements, element `i` initialised to `f(i)`.
    pub fn from_fn<F>(
        len: usize,
        budget: Option<&Arc<MemoryBudget>>,
        mut f: F,
    ) -> Result<Self, MemoryError>
    where
        F: FnMut(usize) -> T,
    {
        let buffer = Self::allocate(len, budget)?;
        for i in 0..len {
            // SAFETY: `i < len` and the allocation holds `len` elements.
            unsafe { buffer.ptr.as_ptr().add(i).write(f(i)) };
        }
        Ok(buffer)
    }

    /// Allocate a copy of `values`.
    pub fn from_slice(
        values: &[T],
        budget: Option<&Arc<MemoryBudget>>,
    ) -> Result<Self, MemoryError> {
        let buffer = Self::allocate(values.len(), budget)?;
        // SAFETY: the fresh allocation holds `values.len()` elements and cannot overlap `values`.
        unsafe {
            std::ptr::copy_nonoverlapping(values.as_ptr(), buffer.ptr.as_ptr(), values.len());
        }
        Ok(buffer)
    }

    // Elements are left uninitialised; callers must write all `len` of them
    // before handing out a slice. `T: Copy` means nothing is read on drop.
    fn allocate(len: usize, budget: Option<&Arc<MemoryBudget>>) -> Result<Self, MemoryError> {
        let element_size = std::mem::size_of::<T>();
        let layout = Layout::array::<T>(len)
            .and_then(|layout| layout.align_to(ALIGNED_SIZE))
            .map_err(|_| MemoryError::LayoutOverflow {
                elements: len,
                element_size,
            })?;

        if layout.size() == 0 {
            return Ok(AlignedBuffer {
                ptr: NonNull::dangling(),
                len,
                layout,
                _reservation: None,
                _marker: PhantomData,
            });
        }

        let reservation = budget
            .map(|budget| budget.reserve(layout.size()))
            .transpose()?;

        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc(layout) as *mut T };
        let ptr = NonNull::new(raw).ok_or(MemoryError::AllocationFailed {
            size: layout.size(),
        })?;

        TOTAL_ALLOCATED.fetch_add(layout.size(), Ordering::Relaxed);

        Ok(AlignedBuffer {
            ptr,
            len,
            layout,
            _reservation: reservation,
            _marker: PhantomData,
        })
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes held by this buffer's allocation.
    pub fn allocated_bytes(&self) -> usize {
        self.layout.size()
    }

    /// Check if the buffer's memory is properly aligned.
    pub fn is_aligned(&self) -> bool {
        self.len == 0 || self.ptr.as_ptr() as usize % ALIGNED_SIZE == 0
    }

    /// Get a slice view of the buffer content.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: all `len` elements were initialised on construction.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Get a mutable slice view of the buffer content.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: all `len` elements were initialised and `&mut self` is exclusive.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }
}

unsafe impl<T: Copy + Send> Send for AlignedBuffer<T> {}
unsafe impl<T: Copy + Sync> Sync for AlignedBuffer<T> {}

impl<T: Copy> Deref for AlignedBuffer<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Copy> DerefMut for AlignedBuffer<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Copy> Drop for AlignedBuffer<T> {
    fn drop(&mut self) {
        if self.layout.size() > 0 {
            // SAFETY: allocated in `allocate` with this exact layout.
            unsafe {
                dealloc(self.ptr.as_ptr() as *mut u8, self.layout);
            }

            TOTAL_ALLOCATED.fetch_sub(self.layout.size(), Ordering::Relaxed);
        }
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for AlignedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedBuffer")
            .field("len", &self.len)
            .field("alignment", &self.layout.align())
            .field("data", &self.as_slice())
            .finish()
    }
}
