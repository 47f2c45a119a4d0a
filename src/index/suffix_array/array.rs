//! The built suffix array
//!
//! Owns the sorted order, the LCP array and the full class history. All
//! of it is computed once by [`SuffixArrayBuilder`](super::SuffixArrayBuilder)
//! and read-only afterwards, so a `SuffixArray` can be shared across threads.

use super::builder::SuffixArrayBuilder;
use super::error::Result;
use super::history::{ClassHistory, ClassLookup};
use super::queries::{self, SuffixQueries};
use super::types::*;
use std::cmp::Ordering;

/// Suffix array with LCP array and constant-time window comparison
#[derive(Debug, Clone)]
pub struct SuffixArray {
    semantics: Semantics,
    alphabet_size: usize,
    order: Vec<TextPosition>,
    lcp: Vec<usize>,
    history: ClassHistory,
}

impl SuffixArray {
    /// Build the suffix array of a byte string with default configuration
    pub fn new(text: &[u8]) -> Result<Self> {
        SuffixArrayBuilder::with_defaults()
            .build(text)
            .map(|built| built.array)
    }

    /// Build over any totally ordered symbols with default configuration
    pub fn from_symbols<T: Ord>(text: &[T]) -> Result<Self> {
        SuffixArrayBuilder::with_defaults().build_symbols(text)
    }

    pub(crate) fn from_parts(
        semantics: Semantics,
        alphabet_size: usize,
        order: Vec<TextPosition>,
        lcp: Vec<usize>,
        history: ClassHistory,
    ) -> Self {
        debug_assert_eq!(order.len(), lcp.len());
        Self {
            semantics,
            alphabet_size,
            order,
            lcp,
            history,
        }
    }

    /// Number of symbols in the text
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false: construction rejects empty input
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn semantics(&self) -> Semantics {
        self.semantics
    }

    /// Number of distinct symbols in the text
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Positions covered by the class tables (text plus terminator)
    pub fn working_len(&self) -> usize {
        self.history.working_len()
    }

    /// Start positions in sorted order
    pub fn order(&self) -> &[TextPosition] {
        &self.order
    }

    /// Adjacent common prefix lengths, `lcp()[len - 1] == 0`
    pub fn lcp(&self) -> &[usize] {
        &self.lcp
    }

    /// Every round's class table, widest last
    pub fn class_tables(&self) -> &ClassHistory {
        &self.history
    }

    /// Inverse of the order: rank of every text position
    pub fn ranks(&self) -> Vec<usize> {
        let mut rank = vec![0; self.order.len()];
        for (r, &pos) in self.order.iter().enumerate() {
            rank[pos] = r;
        }
        rank
    }

    /// Start position of the suffix ranked `rank`
    pub fn order_at(&self, rank: usize) -> Result<TextPosition> {
        queries::check_index(rank, self.len())?;
        Ok(self.order[rank])
    }

    /// Common prefix of the suffixes ranked `rank` and `rank + 1`
    pub fn lcp_at(&self, rank: usize) -> Result<usize> {
        queries::check_index(rank, self.len())?;
        Ok(self.lcp[rank])
    }

    /// Order of the length-`len` windows starting at `i` and `j`.
    ///
    /// Requires `i, j < len()` and `1 <= len <= len()`. Under
    /// [`Semantics::Suffixes`] a window running past the end compares as
    /// its clamped prefix; under [`Semantics::Rotations`] it wraps around.
    pub fn compare(&self, i: TextPosition, j: TextPosition, len: usize) -> Result<Ordering> {
        queries::compare_checked(&self.history, self.len(), i, j, len)
    }

    /// Common prefix length of the suffixes (or rotations) at `i` and `j`,
    /// in `O(log n)`
    pub fn longest_common_prefix(&self, i: TextPosition, j: TextPosition) -> Result<usize> {
        queries::common_prefix_checked(&self.history, self.semantics, self.len(), i, j)
    }
}

impl SuffixQueries for SuffixArray {
    fn len(&self) -> usize {
        SuffixArray::len(self)
    }

    fn semantics(&self) -> Semantics {
        self.semantics
    }

    fn order_at(&self, rank: usize) -> Result<TextPosition> {
        SuffixArray::order_at(self, rank)
    }

    fn lcp_at(&self, rank: usize) -> Result<usize> {
        SuffixArray::lcp_at(self, rank)
    }

    fn compare(&self, i: TextPosition, j: TextPosition, len: usize) -> Result<Ordering> {
        SuffixArray::compare(self, i, j, len)
    }

    fn longest_common_prefix(&self, i: TextPosition, j: TextPosition) -> Result<usize> {
        SuffixArray::longest_common_prefix(self, i, j)
    }
}
