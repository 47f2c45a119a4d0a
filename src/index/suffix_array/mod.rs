//! Suffix array module
//!
//! This module builds suffix arrays by prefix doubling, derives the LCP
//! array with Kasai's algorithm, and keeps every round's equivalence
//! classes so that any two equal-length substrings can be ranked in O(1).
//!
//! ## Architecture
//!
//! - `alphabet`: Dense, order-preserving symbol ranks
//! - `builder`: Initial partition and doubling rounds
//! - `history`: Per-round class tables and window comparison
//! - `lcp`: Kasai's algorithm and class-table lifting
//! - `array`: The built, read-only suffix array
//! - `queries`: Query trait shared with the reader
//! - `writer`: Persists suffix arrays to disk
//! - `reader`: Memory-mapped reading and querying
//! - `types`: Core type definitions
//!
//! ## File Format
//!
//! Per index directory, four files are created:
//! - `text.bin`: The text the array was built over
//! - `sa.bin`: Header, sorted order and LCP array (u64 entries)
//! - `classes.bin`: Header and every round's class table (u32 entries)
//! - `meta.json`: Build metadata

pub mod alphabet;
pub mod array;
pub mod builder;
pub mod error;
pub mod history;
pub mod lcp;
pub mod queries;
pub mod reader;
pub mod types;
pub mod writer;

// Re-exports for convenience
pub use array::SuffixArray;
pub use builder::{BuiltSuffixArray, SuffixArrayBuilder};
pub use error::SuffixArrayError;
pub use history::{ClassHistory, ClassLookup, ClassTable};
pub use queries::SuffixQueries;
pub use reader::{SuffixArrayReader, SuffixArrayStats};
pub use types::{Semantics, SourceInfo, SuffixArrayConfig, SuffixArrayMeta};
pub use writer::SuffixArrayWriter;
