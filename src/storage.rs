//! Owned buffer backing an [`ArrayContainer`](crate::ArrayContainer) and the
//! policy that decides how far it grows.

use alloc::{boxed::Box, vec::Vec};
use core::ops::{Deref, Index};

use crate::ReserveError;

/// Capacity used by [`ArrayContainer::new`](crate::ArrayContainer::new) and
/// by the growth policy when starting from an empty buffer.
pub const DEFAULT_CAPACITY: usize = 16;

/// Number of distinct values in the 16-bit domain. No container ever needs
/// more slots than this.
pub const DOMAIN_SIZE: usize = 1 << 16;

/// Returns the next candidate capacity for a buffer of `capacity` slots.
///
/// Growth slows down as the buffer gets larger: doubling below 64 slots,
/// 1.5x below 1024 and 1.25x beyond that. An empty buffer jumps straight to
/// [`DEFAULT_CAPACITY`].
///
/// # Examples
///
/// ```
/// use smol_container::storage::grow_capacity;
///
/// assert_eq!(grow_capacity(0), 16);
/// assert_eq!(grow_capacity(16), 32);
/// assert_eq!(grow_capacity(64), 96);
/// assert_eq!(grow_capacity(1024), 1280);
/// ```
#[inline]
#[must_use]
pub const fn grow_capacity(capacity: usize) -> usize {
    match capacity {
        0 => DEFAULT_CAPACITY,
        1..64 => capacity * 2,
        64..1024 => capacity.saturating_add(capacity / 2),
        _ => capacity.saturating_add(capacity / 4),
    }
}

/// Restricts `val` to `[min, max]`. The lower bound wins when `min > max`.
#[inline]
#[must_use]
pub const fn clamp(val: usize, min: usize, max: usize) -> usize {
    if val < min {
        min
    } else if val > max {
        max
    } else {
        val
    }
}

/// Computes the capacity [`ArrayStorage::grow`] settles on.
///
/// Once the candidate lands within one sixteenth of `max` it snaps to `max`
/// so that a container approaching the ceiling does not keep reallocating.
#[inline]
pub(crate) const fn next_capacity(current: usize, min: usize, max: usize) -> usize {
    let new_capacity = clamp(grow_capacity(current), min, max);
    if new_capacity > max - max / 16 {
        max
    } else {
        new_capacity
    }
}

/// Allocates `n` zeroed slots, reporting allocator failure instead of
/// aborting.
///
/// Slots are always zero-filled, even for a discarding
/// [`grow`](ArrayStorage::grow): the buffer never holds uninitialized
/// memory, so scratch slots past `len` can be handed out as `&mut [u16]`.
fn alloc_slots(n: usize) -> Result<Box<[u16]>, ReserveError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(n)
        .map_err(|_| ReserveError::OutOfMemory { requested: n })?;
    slots.resize(n, 0);
    Ok(slots.into_boxed_slice())
}

/// Sorted `u16` storage with explicit length and capacity.
///
/// The slot count of `buf` is the capacity. Only `buf[..len]` carries
/// meaning; the remaining slots are scratch space that set operations write
/// into before publishing a new length.
///
/// Reallocation only happens through [`grow`](Self::grow) and
/// [`shrink_to_fit`](Self::shrink_to_fit), both of which take `&mut self`, so
/// no borrow of the old buffer can survive them.
pub(crate) struct ArrayStorage {
    buf: Box<[u16]>,
    len: usize,
}

impl ArrayStorage {
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, ReserveError> {
        Ok(Self {
            buf: alloc_slots(capacity)?,
            len: 0,
        })
    }

    /// Copies the meaningful prefix into a fresh buffer of the same capacity.
    pub(crate) fn try_clone(&self) -> Result<Self, ReserveError> {
        let mut buf = alloc_slots(self.capacity())?;
        buf[..self.len].copy_from_slice(self.as_slice());
        Ok(Self { buf, len: self.len })
    }

    #[inline(always)]
    pub(crate) const fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline(always)]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub(crate) fn as_slice(&self) -> &[u16] {
        &self.buf[..self.len]
    }

    #[inline(always)]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.buf[..self.len]
    }

    /// The full buffer, including slots past `len`. Callers publish what they
    /// wrote with [`set_len`](Self::set_len).
    #[inline(always)]
    pub(crate) fn slots_mut(&mut self) -> &mut [u16] {
        &mut self.buf
    }

    #[inline(always)]
    pub(crate) fn set_len(&mut self, len: usize) {
        debug_assert!(len <= self.capacity(), "len {len} exceeds capacity");
        self.len = len;
    }

    #[inline]
    pub(crate) fn truncate(&mut self, len: usize) {
        self.len = self.len.min(len);
    }

    /// Appends `value`. The caller must have made room first.
    #[inline]
    pub(crate) fn push(&mut self, value: u16) {
        self.buf[self.len] = value;
        self.len += 1;
    }

    /// Shifts `[idx, len)` one slot right and writes `value` at `idx`. The
    /// caller must have made room first.
    #[inline]
    pub(crate) fn insert(&mut self, idx: usize, value: u16) {
        let len = self.len;
        self.buf.copy_within(idx..len, idx + 1);
        self.buf[idx] = value;
        self.len = len + 1;
    }

    /// Shifts `(idx, len)` one slot left over `idx`.
    #[inline]
    pub(crate) fn remove(&mut self, idx: usize) {
        let len = self.len;
        self.buf.copy_within(idx + 1..len, idx);
        self.len = len - 1;
    }

    /// Replaces the buffer with one sized by the growth policy.
    ///
    /// When `preserve` is set the meaningful prefix is carried over (cut to
    /// the new capacity if it shrank). Otherwise the old contents are dropped
    /// and the length resets to zero, for callers about to overwrite
    /// everything anyway.
    ///
    /// The storage is untouched when an error is returned.
    pub(crate) fn grow(
        &mut self,
        min: usize,
        max: usize,
        preserve: bool,
    ) -> Result<(), ReserveError> {
        if min > max {
            return Err(ReserveError::CapacityOverflow {
                requested: min,
                max,
            });
        }

        let new_capacity = next_capacity(self.capacity(), min, max);
        let mut buf = alloc_slots(new_capacity)?;
        if preserve {
            let keep = self.len.min(new_capacity);
            buf[..keep].copy_from_slice(&self.buf[..keep]);
            self.len = keep;
        } else {
            self.len = 0;
        }
        self.buf = buf;
        Ok(())
    }

    /// Reallocates down to exactly `len` slots.
    pub(crate) fn shrink_to_fit(&mut self) -> Result<(), ReserveError> {
        if self.capacity() == self.len {
            return Ok(());
        }
        let mut buf = alloc_slots(self.len)?;
        buf.copy_from_slice(self.as_slice());
        self.buf = buf;
        Ok(())
    }
}

impl Deref for ArrayStorage {
    type Target = [u16];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl Index<usize> for ArrayStorage {
    type Output = u16;

    fn index(&self, index: usize) -> &Self::Output {
        &self.as_slice()[index]
    }
}
