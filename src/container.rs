//! `ArrayContainer` struct and core implementation.

use core::fmt;

use crate::{
    FromSortedError, ReserveError,
    iter::{AbsoluteIter, Iter},
    kernel,
    storage::{ArrayStorage, DEFAULT_CAPACITY, DOMAIN_SIZE},
};

/// Number of bytes a serialized array container with `cardinality` values
/// occupies: a two byte header followed by two bytes per value.
///
/// # Examples
///
/// ```
/// use smol_container::serialized_size_in_bytes;
///
/// assert_eq!(serialized_size_in_bytes(0), 2);
/// assert_eq!(serialized_size_in_bytes(100), 202);
/// ```
#[inline]
#[must_use]
pub const fn serialized_size_in_bytes(cardinality: usize) -> usize {
    2 + cardinality * 2
}

/// Unwraps the result of a growth step for the convenience APIs that behave
/// like `Vec` and abort on allocation failure.
#[cold]
#[inline(never)]
pub(crate) fn capacity_failure(err: ReserveError) -> ! {
    panic!("array container growth failed: {err}")
}

/// A set of `u16` values stored as a strictly increasing array.
///
/// # Overview
///
/// `ArrayContainer` is the representation a compressed bitmap uses for a
/// sparse 65536-value block. Values are kept sorted and unique in a buffer
/// whose capacity follows a slowing growth schedule (see
/// [`storage::grow_capacity`](crate::storage::grow_capacity)).
///
/// # Capacity Model
///
/// Capacity is tracked explicitly and only changes through
/// [`grow`](Self::grow), [`shrink_to_fit`](Self::shrink_to_fit) or an
/// operation that needs more room. Growth is fallible: the `try_*` and
/// `*_into` methods report [`ReserveError`] instead of aborting, while
/// [`add`](Self::add), [`union`](Self::union) and friends panic on allocator
/// failure the way `Vec::push` does.
///
/// # Examples
///
/// ```
/// use smol_container::ArrayContainer;
///
/// let mut container = ArrayContainer::new();
/// assert!(container.add(42));
/// assert!(container.add(7));
/// assert!(!container.add(42)); // already present
///
/// assert!(container.contains(7));
/// assert_eq!(container.as_slice(), &[7, 42]);
/// assert_eq!(container.to_string(), "{7,42}");
/// ```
pub struct ArrayContainer {
    pub(crate) storage: ArrayStorage,
}

impl ArrayContainer {
    /// Creates an empty container with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let container = ArrayContainer::new();
    /// assert_eq!(container.capacity(), 16);
    /// assert!(container.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty container with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if the allocation fails. Use
    /// [`try_with_capacity`](Self::try_with_capacity) to handle that case.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).unwrap_or_else(|err| capacity_failure(err))
    }

    /// Creates an empty container with exactly `capacity` slots, reporting
    /// allocation failure.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::OutOfMemory`] if the buffer cannot be
    /// allocated. Nothing is leaked in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let container = ArrayContainer::try_with_capacity(100)?;
    /// assert_eq!(container.capacity(), 100);
    /// # Ok::<(), smol_container::ReserveError>(())
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, ReserveError> {
        Ok(Self {
            storage: ArrayStorage::try_with_capacity(capacity)?,
        })
    }

    /// Builds a container from values that are already strictly increasing.
    /// The capacity matches the number of values.
    ///
    /// # Errors
    ///
    /// Returns [`FromSortedError::NotStrictlyIncreasing`] naming the first
    /// offending position, or [`FromSortedError::Reserve`] if the allocation
    /// fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_container::{ArrayContainer, FromSortedError};
    ///
    /// let container = ArrayContainer::from_sorted(&[1, 2, 10])?;
    /// assert_eq!(container.len(), 3);
    ///
    /// let err = ArrayContainer::from_sorted(&[1, 5, 5]).unwrap_err();
    /// assert_eq!(err, FromSortedError::NotStrictlyIncreasing { index: 2 });
    /// # Ok::<(), FromSortedError>(())
    /// ```
    pub fn from_sorted(values: &[u16]) -> Result<Self, FromSortedError> {
        if let Some(pos) = values.windows(2).position(|w| w[0] >= w[1]) {
            return Err(FromSortedError::NotStrictlyIncreasing { index: pos + 1 });
        }
        let mut storage = ArrayStorage::try_with_capacity(values.len())?;
        storage.slots_mut().copy_from_slice(values);
        storage.set_len(values.len());
        Ok(Self { storage })
    }

    /// Clones the container, reporting allocation failure. The clone has the
    /// same capacity and its own buffer.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::OutOfMemory`] if the buffer cannot be
    /// allocated.
    pub fn try_clone(&self) -> Result<Self, ReserveError> {
        Ok(Self {
            storage: self.storage.try_clone()?,
        })
    }

    /// Overwrites the contents of `self` with those of `src`.
    ///
    /// The buffer is only replaced when it is too small to hold `src`; since
    /// everything is overwritten, the old contents are not carried over.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if growing fails, leaving `self` unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let src: ArrayContainer = (0..100).collect();
    /// let mut dst = ArrayContainer::with_capacity(4);
    /// dst.add(7);
    ///
    /// dst.copy_from(&src)?;
    /// assert_eq!(dst, src);
    /// # Ok::<(), smol_container::ReserveError>(())
    /// ```
    pub fn copy_from(&mut self, src: &Self) -> Result<(), ReserveError> {
        let cardinality = src.len();
        self.ensure_output_capacity(cardinality)?;
        self.storage.slots_mut()[..cardinality].copy_from_slice(src.as_slice());
        self.storage.set_len(cardinality);
        Ok(())
    }

    /// Makes sure the buffer has at least `required` slots ahead of a full
    /// overwrite. Existing contents are not preserved when it has to grow.
    #[inline]
    pub(crate) fn ensure_output_capacity(&mut self, required: usize) -> Result<(), ReserveError> {
        if self.capacity() < required {
            self.storage.grow(required, DOMAIN_SIZE, false)?;
        }
        Ok(())
    }

    /// Replaces the buffer with one of at least `min` and at most `max`
    /// slots, sized by the growth policy.
    ///
    /// When `preserve` is true the current values are kept (the largest
    /// ones are dropped if the new capacity is smaller than the length).
    /// When false the container is emptied, which saves a copy for callers
    /// about to overwrite it.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::CapacityOverflow`] when `min > max` and
    /// [`ReserveError::OutOfMemory`] when the allocation fails. The
    /// container is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let mut container = ArrayContainer::with_capacity(16);
    /// container.add(3);
    ///
    /// container.grow(17, 1000, true)?;
    /// assert_eq!(container.capacity(), 32);
    /// assert!(container.contains(3));
    /// # Ok::<(), smol_container::ReserveError>(())
    /// ```
    pub fn grow(&mut self, min: usize, max: usize, preserve: bool) -> Result<(), ReserveError> {
        self.storage.grow(min, max, preserve)
    }

    /// Reallocates the buffer to exactly [`len`](Self::len) slots.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError::OutOfMemory`] if the smaller buffer cannot be
    /// allocated; the container is unchanged in that case.
    pub fn shrink_to_fit(&mut self) -> Result<(), ReserveError> {
        self.storage.shrink_to_fit()
    }

    /// Number of slots in the buffer.
    #[must_use]
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Number of values in the container.
    #[must_use]
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Number of values in the container. Same as [`len`](Self::len).
    #[must_use]
    #[inline(always)]
    pub fn cardinality(&self) -> usize {
        self.len()
    }

    /// Returns `true` if the container holds no values.
    #[must_use]
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the container holds at least one value.
    #[must_use]
    #[inline(always)]
    pub fn nonzero_cardinality(&self) -> bool {
        !self.is_empty()
    }

    /// Returns `true` if every slot of the buffer is in use, so the next
    /// insertion has to grow it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let mut container = ArrayContainer::with_capacity(2);
    /// container.add(1);
    /// assert!(!container.is_full());
    /// container.add(2);
    /// assert!(container.is_full());
    /// ```
    #[must_use]
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Removes every value, keeping the buffer.
    pub fn clear(&mut self) {
        self.storage.set_len(0);
    }

    /// The values in ascending order.
    #[must_use]
    #[inline(always)]
    pub fn as_slice(&self) -> &[u16] {
        self.storage.as_slice()
    }

    /// Smallest value, if any.
    #[must_use]
    pub fn first(&self) -> Option<u16> {
        self.as_slice().first().copied()
    }

    /// Largest value, if any.
    #[must_use]
    pub fn last(&self) -> Option<u16> {
        self.as_slice().last().copied()
    }

    /// Returns an iterator over the values in ascending order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        self.as_slice().iter().copied()
    }

    /// Returns `true` if `value` is in the container.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let container: ArrayContainer = [5, 10].into_iter().collect();
    /// assert!(container.contains(10));
    /// assert!(!container.contains(11));
    /// ```
    #[must_use]
    #[inline]
    pub fn contains(&self, value: u16) -> bool {
        kernel::search(self.as_slice(), value).is_ok()
    }

    /// Inserts `value`, returning `true` if it was not already present.
    ///
    /// Appending a value larger than the current maximum is O(1) amortized,
    /// so filling a container in ascending order is cheap. Anything else
    /// shifts the tail of the buffer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer needs to grow and the allocation fails. Use
    /// [`try_add`](Self::try_add) to handle that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let mut container = ArrayContainer::new();
    /// assert!(container.add(10));
    /// assert!(!container.add(10));
    /// ```
    #[inline]
    pub fn add(&mut self, value: u16) -> bool {
        self.try_add(value).unwrap_or_else(|err| capacity_failure(err))
    }

    /// Inserts `value`, returning `Ok(true)` if it was not already present.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if the buffer is full and growing it fails.
    /// The container is unchanged in that case.
    pub fn try_add(&mut self, value: u16) -> Result<bool, ReserveError> {
        if self.last().is_none_or(|max| max < value) {
            self.reserve_one()?;
            self.storage.push(value);
            return Ok(true);
        }

        match kernel::search(self.as_slice(), value) {
            Ok(_) => Ok(false),
            Err(idx) => {
                self.reserve_one()?;
                self.storage.insert(idx, value);
                Ok(true)
            }
        }
    }

    #[inline]
    fn reserve_one(&mut self) -> Result<(), ReserveError> {
        if self.is_full() {
            self.storage.grow(self.capacity() + 1, DOMAIN_SIZE, true)?;
        }
        Ok(())
    }

    /// Removes `value`, returning `true` if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let mut container: ArrayContainer = [1, 2, 3].into_iter().collect();
    /// assert!(container.remove(2));
    /// assert!(!container.remove(2));
    /// assert_eq!(container.as_slice(), &[1, 3]);
    /// ```
    pub fn remove(&mut self, value: u16) -> bool {
        match kernel::search(self.as_slice(), value) {
            Ok(idx) => {
                self.storage.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Writes every value plus `base` into the front of `out`, in ascending
    /// order, and returns how many were written.
    ///
    /// `base` carries the high bits of the block this container represents.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`len`](Self::len).
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let container: ArrayContainer = [1, 5].into_iter().collect();
    /// let mut out = [0u32; 4];
    /// let n = container.write_absolute(&mut out, 3 << 16);
    /// assert_eq!(&out[..n], &[196609, 196613]);
    /// ```
    pub fn write_absolute(&self, out: &mut [u32], base: u32) -> usize {
        let values = self.as_slice();
        assert!(
            out.len() >= values.len(),
            "output holds {} values but the container has {}",
            out.len(),
            values.len()
        );
        for (dst, &v) in out.iter_mut().zip(values) {
            *dst = base.wrapping_add(u32::from(v));
        }
        values.len()
    }

    /// Returns an iterator over the values plus `base`, in ascending order.
    #[must_use]
    pub fn iter_absolute(&self, base: u32) -> AbsoluteIter<'_> {
        AbsoluteIter::new(self.iter(), base)
    }

    /// Counts the maximal runs of consecutive values.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let container = ArrayContainer::from_sorted(&[1, 2, 3, 7, 8, 10])?;
    /// assert_eq!(container.number_of_runs(), 3);
    /// # Ok::<(), smol_container::FromSortedError>(())
    /// ```
    #[must_use]
    pub fn number_of_runs(&self) -> usize {
        let values = self.as_slice();
        if values.is_empty() {
            return 0;
        }
        // w[0] < w[1] <= u16::MAX, so w[0] + 1 cannot overflow
        1 + values.windows(2).filter(|w| w[1] != w[0] + 1).count()
    }

    /// Number of bytes this container would occupy serialized. See
    /// [`serialized_size_in_bytes`].
    #[must_use]
    pub fn serialized_size(&self) -> usize {
        serialized_size_in_bytes(self.len())
    }

    /// Returns a [`Display`](fmt::Display) adapter printing the values plus
    /// `base`, comma separated and without braces.
    ///
    /// Meant for diagnostics; the format is not stable.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let container: ArrayContainer = [1, 2].into_iter().collect();
    /// assert_eq!(container.display_absolute(65536).to_string(), "65537,65538");
    /// ```
    #[must_use]
    pub fn display_absolute(&self, base: u32) -> DisplayAbsolute<'_> {
        DisplayAbsolute {
            container: self,
            base,
        }
    }
}

/// Helper returned by [`ArrayContainer::display_absolute`].
#[derive(Clone, Copy)]
pub struct DisplayAbsolute<'a> {
    container: &'a ArrayContainer,
    base: u32,
}

impl fmt::Display for DisplayAbsolute<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.container.iter_absolute(self.base);
        let Some(first) = iter.next() else {
            return Ok(());
        };
        write!(f, "{first}")?;
        for v in iter {
            write!(f, ",{v}")?;
        }
        Ok(())
    }
}
