//! # SARX - Suffix Arrays by Prefix Doubling
//!
//! SARX builds the suffix array of a symbol sequence together with its LCP
//! array, and keeps the equivalence classes of every doubling round so
//! that any two equal-length substrings can be compared in O(1).
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Suffix array construction, storage and per-file indexes
//! - [`output`] - Suffix table and query result formatting
//! - [`utils`] - App data directory, config, encoding, progress bars
//!
//! ## Quick Start
//!
//! ```
//! use sarx::index::SuffixArray;
//! use std::cmp::Ordering;
//!
//! let sa = SuffixArray::new(b"banana").unwrap();
//!
//! // a, ana, anana, banana, na, nana
//! assert_eq!(sa.order(), &[5, 3, 1, 0, 4, 2]);
//! assert_eq!(sa.lcp(), &[1, 3, 0, 0, 2, 0]);
//!
//! // "ban" < "nan"
//! assert_eq!(sa.compare(0, 2, 3).unwrap(), Ordering::Less);
//! ```
//!
//! ## Semantics
//!
//! By default a virtual terminator, smaller than every symbol, is appended
//! internally so the order ranks true suffixes. With
//! [`Semantics::Rotations`](index::suffix_array::Semantics) the order ranks
//! cyclic rotations instead, and comparison windows wrap around the end.

pub mod index;
pub mod output;
pub mod utils;
