//! Trait implementations for `ArrayContainer`.

use crate::{ArrayContainer, container::capacity_failure};
use alloc::vec::Vec;
use core::{
    borrow::Borrow,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::{BitAnd, BitAndAssign, BitOr, BitXor, Sub},
};

/// Errors that can occur when a container's buffer has to be replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveError {
    /// The requested minimum capacity is above the allowed maximum.
    CapacityOverflow {
        /// Minimum number of slots asked for
        requested: usize,
        /// Maximum number of slots allowed
        max: usize,
    },

    /// The allocator could not provide the buffer.
    OutOfMemory {
        /// Number of slots that were being allocated
        requested: usize,
    },
}

impl fmt::Display for ReserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { requested, max } => {
                write!(
                    f,
                    "requested capacity {requested} exceeds the maximum of {max} slots"
                )
            }
            Self::OutOfMemory { requested } => {
                write!(f, "failed to allocate a buffer of {requested} slots")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ReserveError {}

/// Errors that can occur when building an [`ArrayContainer`] from a slice
/// that is expected to be sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FromSortedError {
    /// The value at `index` is not greater than the one before it.
    NotStrictlyIncreasing {
        /// Position of the first out-of-order value
        index: usize,
    },

    /// The buffer could not be allocated.
    Reserve(ReserveError),
}

impl fmt::Display for FromSortedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStrictlyIncreasing { index } => {
                write!(f, "value at position {index} is not strictly increasing")
            }
            Self::Reserve(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl From<ReserveError> for FromSortedError {
    fn from(err: ReserveError) -> Self {
        Self::Reserve(err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromSortedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reserve(err) => Some(err),
            Self::NotStrictlyIncreasing { .. } => None,
        }
    }
}

impl Default for ArrayContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ArrayContainer {
    fn clone(&self) -> Self {
        self.try_clone().unwrap_or_else(|err| capacity_failure(err))
    }

    /// Overwrites `self` in place, reusing its buffer when it is large
    /// enough. See [`ArrayContainer::copy_from`].
    fn clone_from(&mut self, source: &Self) {
        self.copy_from(source)
            .unwrap_or_else(|err| capacity_failure(err));
    }
}

impl From<ArrayContainer> for Vec<u16> {
    fn from(container: ArrayContainer) -> Self {
        container.as_slice().to_vec()
    }
}

impl TryFrom<&[u16]> for ArrayContainer {
    type Error = crate::FromSortedError;

    fn try_from(values: &[u16]) -> Result<Self, Self::Error> {
        Self::from_sorted(values)
    }
}

impl<const N: usize> TryFrom<&[u16; N]> for ArrayContainer {
    type Error = crate::FromSortedError;

    fn try_from(values: &[u16; N]) -> Result<Self, Self::Error> {
        Self::from_sorted(values)
    }
}

impl Borrow<[u16]> for ArrayContainer {
    fn borrow(&self) -> &[u16] {
        self.as_slice()
    }
}

impl AsRef<[u16]> for ArrayContainer {
    fn as_ref(&self) -> &[u16] {
        self.as_slice()
    }
}

impl fmt::Display for ArrayContainer {
    /// Formats the container in set notation, e.g. `{1,5,9}`.
    ///
    /// Meant for diagnostics; the format is not stable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, rest @ ..] = self.as_slice() else {
            return f.write_str("{}");
        };
        write!(f, "{{{first}")?;
        for v in rest {
            write!(f, ",{v}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for ArrayContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl PartialEq for ArrayContainer {
    /// Compares the values only; capacity is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ArrayContainer {}

impl PartialOrd for ArrayContainer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArrayContainer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl Hash for ArrayContainer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// ============================================================================
// Set Operator Implementations
// ============================================================================

impl BitAnd for &ArrayContainer {
    type Output = ArrayContainer;

    /// Intersection of two containers.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_container::ArrayContainer;
    ///
    /// let a: ArrayContainer = [0, 1].into_iter().collect();
    /// let b: ArrayContainer = [1, 2].into_iter().collect();
    ///
    /// let c = &a & &b;
    /// assert_eq!(c.as_slice(), &[1]);
    /// ```
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl BitAndAssign<&Self> for ArrayContainer {
    /// In-place intersection.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_container::ArrayContainer;
    ///
    /// let mut a: ArrayContainer = [0, 1].into_iter().collect();
    /// let b: ArrayContainer = [1, 2].into_iter().collect();
    ///
    /// a &= &b;
    /// assert_eq!(a.as_slice(), &[1]);
    /// ```
    #[inline]
    fn bitand_assign(&mut self, rhs: &Self) {
        self.intersection_with(rhs);
    }
}

impl BitOr for &ArrayContainer {
    type Output = ArrayContainer;

    /// Union of two containers.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_container::ArrayContainer;
    ///
    /// let a: ArrayContainer = [0, 1].into_iter().collect();
    /// let b: ArrayContainer = [1, 2].into_iter().collect();
    ///
    /// let c = &a | &b;
    /// assert_eq!(c.as_slice(), &[0, 1, 2]);
    /// ```
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl BitXor for &ArrayContainer {
    type Output = ArrayContainer;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

impl Sub for &ArrayContainer {
    type Output = ArrayContainer;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{format, string::ToString};

    #[test]
    fn test_display_and_debug() {
        let empty = ArrayContainer::new();
        assert_eq!(empty.to_string(), "{}");
        assert_eq!(format!("{empty:?}"), "{}");

        let container = ArrayContainer::from_sorted(&[1, 5, 9]).unwrap();
        assert_eq!(container.to_string(), "{1,5,9}");
        assert_eq!(format!("{container:?}"), "{1, 5, 9}");
    }

    #[test]
    fn test_eq_ignores_capacity() {
        let mut a = ArrayContainer::with_capacity(4);
        let mut b = ArrayContainer::with_capacity(400);
        a.add(3);
        b.add(3);
        assert_eq!(a, b);
        b.add(4);
        assert!(a < b);
    }

    #[test]
    fn test_clone_from_reuses_buffer() {
        let src = ArrayContainer::from_sorted(&[1, 2, 3]).unwrap();
        let mut dst = ArrayContainer::with_capacity(50);
        dst.clone_from(&src);
        assert_eq!(dst.capacity(), 50);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_try_from_slice() {
        assert!(ArrayContainer::try_from(&[1u16, 2, 3]).is_ok());
        let err = ArrayContainer::try_from(&[3u16, 2][..]).unwrap_err();
        assert_eq!(err, FromSortedError::NotStrictlyIncreasing { index: 1 });
        assert_eq!(
            err.to_string(),
            "value at position 1 is not strictly increasing"
        );
    }

    #[test]
    fn test_reserve_error_display() {
        let err = ReserveError::CapacityOverflow {
            requested: 10,
            max: 5,
        };
        assert_eq!(
            err.to_string(),
            "requested capacity 10 exceeds the maximum of 5 slots"
        );
        let err = FromSortedError::from(ReserveError::OutOfMemory { requested: 8 });
        assert_eq!(err.to_string(), "failed to allocate a buffer of 8 slots");
    }

    #[test]
    fn test_operators() {
        let a = ArrayContainer::from_sorted(&[1, 2, 3]).unwrap();
        let b = ArrayContainer::from_sorted(&[3, 4]).unwrap();
        assert_eq!((&a ^ &b).as_slice(), &[1, 2, 4]);
        assert_eq!((&a - &b).as_slice(), &[1, 2]);
        assert_eq!(Vec::from(&a | &b), [1, 2, 3, 4]);
    }
}
