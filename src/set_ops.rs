//! Implementations of set operations for `ArrayContainer`.
//!
//! The `*_into` forms write into a caller-provided output container, reusing
//! its buffer when it is large enough. The output is borrowed mutably while
//! the inputs are borrowed shared, so it can never alias an input.

use crate::{
    ArrayContainer, ReserveError,
    container::capacity_failure,
    kernel::{self, DefaultKernel, Kernel},
    notice::{Notice, NoticeSink},
    storage::DOMAIN_SIZE,
};

/// Size ratio beyond which [`Strategy::Auto`] switches to the skewed
/// intersection.
pub const SKEW_THRESHOLD: usize = 64;

/// How [`ArrayContainer::intersection_into_using`] intersects two arrays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Skewed when one side is more than [`SKEW_THRESHOLD`] times larger than
    /// the other, balanced otherwise.
    #[default]
    Auto,
    /// Gallop through the larger array for each value of the smaller one.
    Skewed,
    /// Linear merge of both arrays.
    Balanced,
}

impl Strategy {
    #[inline]
    fn is_skewed(self, a: usize, b: usize) -> bool {
        match self {
            Self::Auto => {
                a.saturating_mul(SKEW_THRESHOLD) < b || b.saturating_mul(SKEW_THRESHOLD) < a
            }
            Self::Skewed => true,
            Self::Balanced => false,
        }
    }
}

impl ArrayContainer {
    /// Writes `self ∪ other` into `out`.
    ///
    /// `out` is resized for the worst case (`self.len() + other.len()`, at
    /// most 65536) if needed; its previous contents are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if `out` has to grow and the allocation
    /// fails. `out` is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let a = ArrayContainer::from_sorted(&[1, 3, 5]).unwrap();
    /// let b = ArrayContainer::from_sorted(&[3, 4, 5]).unwrap();
    /// let mut out = ArrayContainer::new();
    ///
    /// a.union_into(&b, &mut out)?;
    /// assert_eq!(out.as_slice(), &[1, 3, 4, 5]);
    /// # Ok::<(), smol_container::ReserveError>(())
    /// ```
    pub fn union_into(&self, other: &Self, out: &mut Self) -> Result<(), ReserveError> {
        self.union_into_with::<DefaultKernel>(other, out)
    }

    /// [`union_into`](Self::union_into) with an explicit [`Kernel`].
    ///
    /// # Errors
    ///
    /// Same as [`union_into`](Self::union_into).
    pub fn union_into_with<K: Kernel>(
        &self,
        other: &Self,
        out: &mut Self,
    ) -> Result<(), ReserveError> {
        let (a, b) = (self.as_slice(), other.as_slice());
        out.ensure_output_capacity((a.len() + b.len()).min(DOMAIN_SIZE))?;

        // smaller side first
        let (small, large) = if a.len() < b.len() { (a, b) } else { (b, a) };
        let n = K::union(small, large, out.storage.slots_mut());
        out.storage.set_len(n);
        Ok(())
    }

    /// Creates a new container holding `self ∪ other`.
    ///
    /// # Panics
    ///
    /// Panics if allocating the result fails.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(0);
        self.union_into(other, &mut out).unwrap_or_else(|err| capacity_failure(err));
        out
    }

    /// Writes `self ∩ other` into `out`, choosing the algorithm from the
    /// relative sizes of the inputs.
    ///
    /// `out` is resized to `min(self.len(), other.len())` if needed; its
    /// previous contents are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if `out` has to grow and the allocation
    /// fails. `out` is unchanged in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let a = ArrayContainer::from_sorted(&[1, 3, 5]).unwrap();
    /// let b = ArrayContainer::from_sorted(&[3, 4, 5]).unwrap();
    /// let mut out = ArrayContainer::new();
    ///
    /// a.intersection_into(&b, &mut out)?;
    /// assert_eq!(out.as_slice(), &[3, 5]);
    /// # Ok::<(), smol_container::ReserveError>(())
    /// ```
    pub fn intersection_into(&self, other: &Self, out: &mut Self) -> Result<(), ReserveError> {
        self.intersection_into_using(other, out, Strategy::Auto)
    }

    /// [`intersection_into`](Self::intersection_into) with a fixed
    /// [`Strategy`]. Every strategy yields the same result.
    ///
    /// # Errors
    ///
    /// Same as [`intersection_into`](Self::intersection_into).
    pub fn intersection_into_using(
        &self,
        other: &Self,
        out: &mut Self,
        strategy: Strategy,
    ) -> Result<(), ReserveError> {
        self.intersection_into_with::<DefaultKernel>(other, out, strategy)
    }

    /// [`intersection_into_using`](Self::intersection_into_using) with an
    /// explicit [`Kernel`].
    ///
    /// # Errors
    ///
    /// Same as [`intersection_into`](Self::intersection_into).
    pub fn intersection_into_with<K: Kernel>(
        &self,
        other: &Self,
        out: &mut Self,
        strategy: Strategy,
    ) -> Result<(), ReserveError> {
        let (a, b) = (self.as_slice(), other.as_slice());
        out.ensure_output_capacity(a.len().min(b.len()))?;

        let slots = out.storage.slots_mut();
        let n = if !strategy.is_skewed(a.len(), b.len()) {
            K::intersect(a, b, slots)
        } else if a.len() <= b.len() {
            K::intersect_skewed(a, b, slots)
        } else {
            K::intersect_skewed(b, a, slots)
        };
        out.storage.set_len(n);
        Ok(())
    }

    /// Creates a new container holding `self ∩ other`.
    ///
    /// # Panics
    ///
    /// Panics if allocating the result fails.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(0);
        self.intersection_into(other, &mut out).unwrap_or_else(|err| capacity_failure(err));
        out
    }

    /// Keeps only the values also present in `other`.
    ///
    /// Works in place with a plain linear merge; the buffer is never
    /// reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let mut a = ArrayContainer::from_sorted(&[1, 2, 3, 4]).unwrap();
    /// let b = ArrayContainer::from_sorted(&[2, 4, 6]).unwrap();
    ///
    /// a.intersection_with(&b);
    /// assert_eq!(a.as_slice(), &[2, 4]);
    /// ```
    pub fn intersection_with(&mut self, other: &Self) {
        self.intersection_with_notify(other, &());
    }

    /// [`intersection_with`](Self::intersection_with), reporting
    /// [`Notice::NaiveInplaceIntersection`] to `sink` first.
    ///
    /// The notice is sent on every call. Wrap the sink in
    /// [`Once`](crate::notice::Once) to only hear about it the first time.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::cell::Cell;
    /// use smol_container::{ArrayContainer, notice::{Notice, Once}};
    ///
    /// let seen = Cell::new(0);
    /// let sink = Once::new(|_: Notice| seen.set(seen.get() + 1));
    ///
    /// let mut a = ArrayContainer::from_sorted(&[1, 2, 3]).unwrap();
    /// let b = ArrayContainer::from_sorted(&[2, 3]).unwrap();
    /// a.intersection_with_notify(&b, &sink);
    /// a.intersection_with_notify(&b, &sink);
    ///
    /// assert_eq!(seen.get(), 1);
    /// assert_eq!(a.as_slice(), &[2, 3]);
    /// ```
    pub fn intersection_with_notify<S: NoticeSink + ?Sized>(&mut self, other: &Self, sink: &S) {
        sink.notice(Notice::NaiveInplaceIntersection);
        // TODO: gallop here too when the sizes are skewed, as intersection_into does
        let n = kernel::intersect_in_place(self.storage.as_mut_slice(), other.as_slice());
        self.storage.truncate(n);
    }

    /// Writes the values of `self` that are not in `other` into `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if `out` has to grow and the allocation
    /// fails.
    pub fn difference_into(&self, other: &Self, out: &mut Self) -> Result<(), ReserveError> {
        self.difference_into_with::<DefaultKernel>(other, out)
    }

    /// [`difference_into`](Self::difference_into) with an explicit
    /// [`Kernel`].
    ///
    /// # Errors
    ///
    /// Same as [`difference_into`](Self::difference_into).
    pub fn difference_into_with<K: Kernel>(
        &self,
        other: &Self,
        out: &mut Self,
    ) -> Result<(), ReserveError> {
        let (a, b) = (self.as_slice(), other.as_slice());
        out.ensure_output_capacity(a.len())?;
        let n = K::difference(a, b, out.storage.slots_mut());
        out.storage.set_len(n);
        Ok(())
    }

    /// Creates a new container holding the values of `self` that are not in
    /// `other`.
    ///
    /// # Panics
    ///
    /// Panics if allocating the result fails.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(0);
        self.difference_into(other, &mut out).unwrap_or_else(|err| capacity_failure(err));
        out
    }

    /// Writes the values present in exactly one of `self` and `other` into
    /// `out`.
    ///
    /// # Errors
    ///
    /// Returns [`ReserveError`] if `out` has to grow and the allocation
    /// fails.
    pub fn symmetric_difference_into(
        &self,
        other: &Self,
        out: &mut Self,
    ) -> Result<(), ReserveError> {
        self.symmetric_difference_into_with::<DefaultKernel>(other, out)
    }

    /// [`symmetric_difference_into`](Self::symmetric_difference_into) with an
    /// explicit [`Kernel`].
    ///
    /// # Errors
    ///
    /// Same as [`symmetric_difference_into`](Self::symmetric_difference_into).
    pub fn symmetric_difference_into_with<K: Kernel>(
        &self,
        other: &Self,
        out: &mut Self,
    ) -> Result<(), ReserveError> {
        let (a, b) = (self.as_slice(), other.as_slice());
        out.ensure_output_capacity((a.len() + b.len()).min(DOMAIN_SIZE))?;
        let n = K::symmetric_difference(a, b, out.storage.slots_mut());
        out.storage.set_len(n);
        Ok(())
    }

    /// Creates a new container holding the values present in exactly one of
    /// `self` and `other`.
    ///
    /// # Panics
    ///
    /// Panics if allocating the result fails.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut out = Self::with_capacity(0);
        self.symmetric_difference_into(other, &mut out).unwrap_or_else(|err| capacity_failure(err));
        out
    }

    /// Number of values shared with `other`, without building the
    /// intersection.
    #[must_use]
    pub fn intersection_len(&self, other: &Self) -> usize {
        DefaultKernel::intersect_len(self.as_slice(), other.as_slice())
    }

    /// Returns `true` if the two containers share no value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_container::ArrayContainer;
    /// let a: ArrayContainer = [1, 2].into_iter().collect();
    /// let b: ArrayContainer = [3, 4].into_iter().collect();
    /// assert!(a.is_disjoint(&b));
    /// ```
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.intersection_len(other) == 0
    }

    /// Returns `true` if every value of `self` is in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.intersection_len(other) == self.len()
    }

    /// Returns `true` if every value of `other` is in `self`.
    #[must_use]
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }
}
