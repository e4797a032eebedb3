//! A sorted-array container for the sparse blocks of a compressed bitmap.
//!
//! Compressed bitmaps split the 32-bit integer space into blocks of 65536
//! values and store each block in whichever representation is smallest for
//! its density. This crate provides [`ArrayContainer`], the representation
//! for sparse blocks: a strictly increasing array of the low 16 bits of each
//! member.
//!
//! # Features
//!
//! - **Explicit capacity management** with a growth schedule that slows down
//!   as the container gets larger
//! - **Fallible growth**: every operation that may allocate has a form that
//!   returns [`ReserveError`] instead of aborting
//! - **Set operations** (union, intersection, difference, symmetric
//!   difference) into reusable output containers
//! - **Skewed intersection** that gallops through the larger input when the
//!   sizes are very unbalanced
//! - **Interchangeable merge kernels** ([`kernel::Scalar`],
//!   [`kernel::Wide`]) with identical results
//! - **Serialization support** via serde (optional)
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use smol_container::ArrayContainer;
//!
//! let mut a = ArrayContainer::new();
//! a.add(1);
//! a.add(3);
//! a.add(5);
//!
//! let b: ArrayContainer = [3, 4, 5].into_iter().collect();
//!
//! assert_eq!(a.union(&b).as_slice(), &[1, 3, 4, 5]);
//! assert_eq!(a.intersection(&b).as_slice(), &[3, 5]);
//!
//! // Expand to absolute values for block 2
//! let absolute: Vec<u32> = a.iter_absolute(2 << 16).collect();
//! assert_eq!(absolute, vec![131073, 131075, 131077]);
//! ```
//!
//! # Cargo Features
//!
//! - `std` (default): implements `std::error::Error` for the error types
//! - `tracing` (default): provides [`notice::TracingSink`]
//! - `serde`: `Serialize`/`Deserialize` as an ascending sequence of `u16`
//! - `wide`: makes [`kernel::Wide`] the [`kernel::DefaultKernel`]

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
mod container;
mod iter;
pub mod kernel;
pub mod notice;
mod set_ops;
pub mod storage;
mod traits;

#[cfg(feature = "serde")]
mod serde;

// Re-exports
pub use container::{ArrayContainer, DisplayAbsolute, serialized_size_in_bytes};
pub use iter::{AbsoluteIter, IntoIter, Iter};
pub use set_ops::{SKEW_THRESHOLD, Strategy};
pub use storage::{DEFAULT_CAPACITY, DOMAIN_SIZE};
pub use traits::{FromSortedError, ReserveError};
