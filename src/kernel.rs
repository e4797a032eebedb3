//! Search and merge primitives over strictly increasing `u16` slices.
//!
//! Every set operation on [`ArrayContainer`](crate::ArrayContainer) is
//! expressed in terms of a [`Kernel`]. Two implementations are provided:
//!
//! - [`Scalar`]: plain two-pointer merges.
//! - [`Wide`]: processes blocks of [`LANES`] values at a time, comparing a
//!   whole block against another in one step. The fixed-width inner loops are
//!   shaped so the compiler can lower them to vector compares.
//!
//! Both produce identical output for identical input. [`DefaultKernel`]
//! picks one at build time through the `wide` cargo feature, and every set
//! operation also has a generic form taking the kernel as a type parameter.
//!
//! All functions require their inputs to be strictly increasing. Output
//! slices must be long enough for the worst case result (documented per
//! method); a short output slice panics.

/// Number of values the [`Wide`] kernel compares per step.
pub const LANES: usize = 8;

/// Kernel used by the non-generic set operations.
#[cfg(feature = "wide")]
pub type DefaultKernel = Wide;

/// Kernel used by the non-generic set operations.
#[cfg(not(feature = "wide"))]
pub type DefaultKernel = Scalar;

/// Locates `key` in a strictly increasing slice.
///
/// Returns `Ok(index)` on a hit and `Err(insertion_point)` on a miss, where
/// inserting `key` at `insertion_point` keeps the slice sorted.
///
/// # Examples
///
/// ```
/// use smol_container::kernel::search;
///
/// assert_eq!(search(&[2, 4, 6], 4), Ok(1));
/// assert_eq!(search(&[2, 4, 6], 5), Err(2));
/// assert_eq!(search(&[], 5), Err(0));
/// ```
#[inline]
pub fn search(slice: &[u16], key: u16) -> Result<usize, usize> {
    slice.binary_search(&key)
}

/// Returns the smallest index `i >= from` with `slice[i] >= min`, or
/// `slice.len()` if there is none.
///
/// Probes at exponentially growing distances from `from` before finishing
/// with a binary search, so the cost is logarithmic in the distance skipped
/// rather than in the slice length.
///
/// # Examples
///
/// ```
/// use smol_container::kernel::gallop;
///
/// let values = [1, 3, 5, 7, 9, 11, 13];
/// assert_eq!(gallop(&values, 0, 8), 4);
/// assert_eq!(gallop(&values, 5, 2), 5);
/// assert_eq!(gallop(&values, 0, 100), values.len());
/// ```
pub fn gallop(slice: &[u16], from: usize, min: u16) -> usize {
    let len = slice.len();
    if from >= len || slice[from] >= min {
        return from;
    }

    // slice[lo] < min holds throughout
    let mut lo = from;
    let mut step = 1;
    let mut hi = from + step;
    while hi < len && slice[hi] < min {
        lo = hi;
        step <<= 1;
        hi = from + step;
    }
    let hi = hi.min(len);

    lo + 1 + slice[lo + 1..hi].partition_point(|&v| v < min)
}

/// In-place intersection: keeps the values of `a` that also occur in `b`,
/// compacted to the front of `a`, and returns how many were kept.
///
/// The write cursor never passes the read cursor on `a`, so overwriting the
/// input as we go is safe.
pub fn intersect_in_place(a: &mut [u16], b: &[u16]) -> usize {
    let (mut read, mut other, mut write) = (0, 0, 0);
    while read < a.len() && other < b.len() {
        let (va, vb) = (a[read], b[other]);
        if va < vb {
            read += 1;
        } else if va > vb {
            other += 1;
        } else {
            a[write] = va;
            write += 1;
            read += 1;
            other += 1;
        }
    }
    write
}

/// Copies `src` into the front of `out[n..]` and returns the new write
/// position.
#[inline(always)]
fn emit_all(out: &mut [u16], n: usize, src: &[u16]) -> usize {
    out[n..n + src.len()].copy_from_slice(src);
    n + src.len()
}

/// Merge primitives the set operations are built on.
///
/// Implementations must agree bit for bit with [`Scalar`]; only
/// [`union`](Self::union) and [`intersect`](Self::intersect) are required,
/// the remaining operations have scalar defaults.
pub trait Kernel {
    /// Writes `a ∪ b` in ascending order into `out` and returns its length.
    ///
    /// `out` must hold at least `a.len() + b.len()` values, or 65536,
    /// whichever is smaller.
    fn union(a: &[u16], b: &[u16], out: &mut [u16]) -> usize;

    /// Writes `a ∩ b` in ascending order into `out` and returns its length.
    ///
    /// `out` must hold at least `min(a.len(), b.len())` values.
    fn intersect(a: &[u16], b: &[u16], out: &mut [u16]) -> usize;

    /// Intersection tuned for `small.len()` much lower than `large.len()`:
    /// each value of `small` is located in `large` by galloping forward from
    /// the previous match.
    ///
    /// `out` must hold at least `small.len()` values.
    fn intersect_skewed(small: &[u16], large: &[u16], out: &mut [u16]) -> usize {
        let (mut pos, mut n) = (0, 0);
        for &v in small {
            pos = gallop(large, pos, v);
            if pos == large.len() {
                break;
            }
            if large[pos] == v {
                out[n] = v;
                n += 1;
                pos += 1;
            }
        }
        n
    }

    /// Size of `a ∩ b`, without materializing it.
    fn intersect_len(a: &[u16], b: &[u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            let (va, vb) = (a[i], b[j]);
            i += usize::from(va <= vb);
            j += usize::from(vb <= va);
            n += usize::from(va == vb);
        }
        n
    }

    /// Writes `a \ b` in ascending order into `out` and returns its length.
    ///
    /// `out` must hold at least `a.len()` values.
    fn difference(a: &[u16], b: &[u16], out: &mut [u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            let (va, vb) = (a[i], b[j]);
            if va < vb {
                out[n] = va;
                n += 1;
                i += 1;
            } else if va > vb {
                j += 1;
            } else {
                i += 1;
                j += 1;
            }
        }
        emit_all(out, n, &a[i..])
    }

    /// Writes the values found in exactly one of `a` and `b`, ascending, into
    /// `out` and returns its length.
    ///
    /// `out` has the same size requirement as [`union`](Self::union).
    fn symmetric_difference(a: &[u16], b: &[u16], out: &mut [u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            let (va, vb) = (a[i], b[j]);
            if va < vb {
                out[n] = va;
                n += 1;
                i += 1;
            } else if va > vb {
                out[n] = vb;
                n += 1;
                j += 1;
            } else {
                i += 1;
                j += 1;
            }
        }
        let n = emit_all(out, n, &a[i..]);
        emit_all(out, n, &b[j..])
    }
}

/// Element-at-a-time merges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Scalar;

impl Kernel for Scalar {
    fn union(a: &[u16], b: &[u16], out: &mut [u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            let (va, vb) = (a[i], b[j]);
            if va < vb {
                out[n] = va;
                i += 1;
            } else if va > vb {
                out[n] = vb;
                j += 1;
            } else {
                out[n] = va;
                i += 1;
                j += 1;
            }
            n += 1;
        }
        let n = emit_all(out, n, &a[i..]);
        emit_all(out, n, &b[j..])
    }

    fn intersect(a: &[u16], b: &[u16], out: &mut [u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            let (va, vb) = (a[i], b[j]);
            if va < vb {
                i += 1;
            } else if va > vb {
                j += 1;
            } else {
                out[n] = va;
                n += 1;
                i += 1;
                j += 1;
            }
        }
        n
    }
}

/// Block-at-a-time merges over [`LANES`]-wide windows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Wide;

#[inline(always)]
fn block(slice: &[u16], at: usize) -> &[u16; LANES] {
    slice[at..at + LANES]
        .try_into()
        .unwrap_or_else(|_| unreachable!("block bounds checked by caller"))
}

impl Kernel for Wide {
    fn union(a: &[u16], b: &[u16], out: &mut [u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i < a.len() && j < b.len() {
            // A whole block strictly below the other side's head can be
            // copied without comparing its lanes individually.
            if i + LANES <= a.len() && a[i + LANES - 1] < b[j] {
                n = emit_all(out, n, block(a, i));
                i += LANES;
                continue;
            }
            if j + LANES <= b.len() && b[j + LANES - 1] < a[i] {
                n = emit_all(out, n, block(b, j));
                j += LANES;
                continue;
            }

            let (va, vb) = (a[i], b[j]);
            out[n] = va.min(vb);
            n += 1;
            i += usize::from(va <= vb);
            j += usize::from(vb <= va);
        }
        let n = emit_all(out, n, &a[i..]);
        emit_all(out, n, &b[j..])
    }

    fn intersect(a: &[u16], b: &[u16], out: &mut [u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i + LANES <= a.len() && j + LANES <= b.len() {
            let (va, vb) = (block(a, i), block(b, j));
            if va[LANES - 1] < vb[0] {
                i += LANES;
                continue;
            }
            if vb[LANES - 1] < va[0] {
                j += LANES;
                continue;
            }
            for &v in va {
                // all-pairs lane compare; at most one lane of vb can match
                if vb.iter().fold(false, |acc, &w| acc | (w == v)) {
                    out[n] = v;
                    n += 1;
                }
            }

            let (amax, bmax) = (va[LANES - 1], vb[LANES - 1]);
            if amax <= bmax {
                i += LANES;
            }
            if bmax <= amax {
                j += LANES;
            }
        }
        n + Scalar::intersect(&a[i..], &b[j..], &mut out[n..])
    }

    fn intersect_len(a: &[u16], b: &[u16]) -> usize {
        let (mut i, mut j, mut n) = (0, 0, 0);
        while i + LANES <= a.len() && j + LANES <= b.len() {
            let (va, vb) = (block(a, i), block(b, j));
            if va[LANES - 1] < vb[0] {
                i += LANES;
                continue;
            }
            if vb[LANES - 1] < va[0] {
                j += LANES;
                continue;
            }
            n += va
                .iter()
                .map(|&v| vb.iter().filter(|&&w| w == v).count())
                .sum::<usize>();

            let (amax, bmax) = (va[LANES - 1], vb[LANES - 1]);
            if amax <= bmax {
                i += LANES;
            }
            if bmax <= amax {
                j += LANES;
            }
        }
        n + Scalar::intersect_len(&a[i..], &b[j..])
    }
}
