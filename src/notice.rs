//! Diagnostic notices raised by container operations.
//!
//! Operations that want to tell the caller something (without affecting
//! their result) take a [`NoticeSink`]. Nothing is global: the caller owns
//! the sink and decides what to do with each [`Notice`].
//!
//! - `()` discards every notice.
//! - Any `Fn(Notice)` closure is a sink.
//! - [`Once`] forwards only the first notice it sees.
//! - [`TracingSink`] (feature `tracing`) logs through the `tracing` crate.

use core::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

/// Something an operation reports to its [`NoticeSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Notice {
    /// An in-place intersection ran with the plain linear merge, which does
    /// not take advantage of skewed input sizes.
    NaiveInplaceIntersection,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NaiveInplaceIntersection => {
                f.write_str("array x array in-place intersection uses a naive merge")
            }
        }
    }
}

/// Receiver for [`Notice`]s.
pub trait NoticeSink {
    /// Handles one notice.
    fn notice(&self, notice: Notice);
}

impl NoticeSink for () {
    #[inline(always)]
    fn notice(&self, _: Notice) {}
}

impl<F: Fn(Notice)> NoticeSink for F {
    #[inline]
    fn notice(&self, notice: Notice) {
        self(notice)
    }
}

/// Wraps a sink so that only the first notice gets through.
///
/// # Examples
///
/// ```
/// use core::cell::Cell;
/// use smol_container::notice::{Notice, NoticeSink, Once};
///
/// let count = Cell::new(0);
/// let sink = Once::new(|_: Notice| count.set(count.get() + 1));
/// assert!(!sink.has_fired());
///
/// sink.notice(Notice::NaiveInplaceIntersection);
/// sink.notice(Notice::NaiveInplaceIntersection);
/// assert!(sink.has_fired());
/// assert_eq!(count.get(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Once<S> {
    sink: S,
    fired: AtomicBool,
}

impl<S> Once<S> {
    /// Wraps `sink`.
    pub const fn new(sink: S) -> Self {
        Self {
            sink,
            fired: AtomicBool::new(false),
        }
    }

    /// Returns `true` once a notice has been forwarded.
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::Relaxed)
    }

    /// Re-arms the latch so the next notice is forwarded again.
    pub fn reset(&self) {
        self.fired.store(false, Ordering::Relaxed);
    }

    /// Unwraps the inner sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: NoticeSink> NoticeSink for Once<S> {
    fn notice(&self, notice: Notice) {
        if !self.fired.swap(true, Ordering::Relaxed) {
            self.sink.notice(notice);
        }
    }
}

/// Emits every notice as a `tracing` warning under the `smol_container`
/// target.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl NoticeSink for TracingSink {
    fn notice(&self, notice: Notice) {
        tracing::warn!(target: "smol_container", ?notice, "{notice}");
    }
}
