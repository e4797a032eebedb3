//! Iterator implementations for `ArrayContainer`.

use core::iter::{Copied, FusedIterator};
use core::slice;

use crate::{ArrayContainer, storage::ArrayStorage};

/// An iterator over the values of an [`ArrayContainer`], in ascending order.
///
/// Created by [`ArrayContainer::iter`].
pub type Iter<'a> = Copied<slice::Iter<'a, u16>>;

/// An iterator over the values of an [`ArrayContainer`] offset by a block
/// base, yielding `u32`.
///
/// Created by [`ArrayContainer::iter_absolute`].
///
/// # Examples
///
/// ```
/// use smol_container::ArrayContainer;
///
/// let container: ArrayContainer = [3, 4].into_iter().collect();
/// let values: Vec<u32> = container.iter_absolute(1 << 16).collect();
/// assert_eq!(values, vec![65539, 65540]);
/// ```
#[derive(Clone)]
pub struct AbsoluteIter<'a> {
    inner: Iter<'a>,
    base: u32,
}

impl<'a> AbsoluteIter<'a> {
    pub(crate) fn new(inner: Iter<'a>, base: u32) -> Self {
        Self { inner, base }
    }
}

impl Iterator for AbsoluteIter<'_> {
    type Item = u32;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|v| self.base.wrapping_add(u32::from(v)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for AbsoluteIter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner
            .next_back()
            .map(|v| self.base.wrapping_add(u32::from(v)))
    }
}

impl ExactSizeIterator for AbsoluteIter<'_> {}

impl FusedIterator for AbsoluteIter<'_> {}

/// An owning iterator over the values of an [`ArrayContainer`].
///
/// Created by the [`IntoIterator`] implementation for [`ArrayContainer`].
/// It consumes the container and yields its values in ascending order.
pub struct IntoIter {
    storage: ArrayStorage,
    pos: usize,  // next index from the front
    rpos: usize, // one past the next index from the back
}

impl Iterator for IntoIter {
    type Item = u16;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.rpos {
            return None;
        }
        let v = self.storage[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl ExactSizeIterator for IntoIter {
    fn len(&self) -> usize {
        self.rpos - self.pos
    }
}

impl DoubleEndedIterator for IntoIter {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.pos >= self.rpos {
            return None;
        }
        self.rpos -= 1;
        Some(self.storage[self.rpos])
    }
}

impl FusedIterator for IntoIter {}

impl<'a> IntoIterator for &'a ArrayContainer {
    type IntoIter = Iter<'a>;
    type Item = u16;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for ArrayContainer {
    type IntoIter = IntoIter;
    type Item = u16;

    fn into_iter(self) -> Self::IntoIter {
        let rpos = self.len();
        IntoIter {
            storage: self.storage,
            pos: 0,
            rpos,
        }
    }
}

impl FromIterator<u16> for ArrayContainer {
    /// Collects values in any order. Ascending input takes the append path
    /// for every value.
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        let mut container = Self::new();
        container.extend(iter);
        container
    }
}

impl Extend<u16> for ArrayContainer {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<'a> Extend<&'a u16> for ArrayContainer {
    fn extend<I: IntoIterator<Item = &'a u16>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}
