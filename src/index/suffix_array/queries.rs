//! Read-only queries shared by in-memory and memory-mapped suffix arrays.

use super::error::{Result, SuffixArrayError};
use super::history::ClassLookup;
use super::types::{Semantics, TextPosition};
use std::cmp::Ordering;

/// Queries answered by a built suffix array
pub trait SuffixQueries {
    /// Number of symbols in the text
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn semantics(&self) -> Semantics;

    /// Start position of the suffix ranked `rank`
    fn order_at(&self, rank: usize) -> Result<TextPosition>;

    /// Common prefix length of the suffixes ranked `rank` and `rank + 1`
    /// (0 for the last rank)
    fn lcp_at(&self, rank: usize) -> Result<usize>;

    /// Lexicographic order of the length-`len` windows at `i` and `j`
    fn compare(&self, i: TextPosition, j: TextPosition, len: usize) -> Result<Ordering>;

    /// Common prefix length of the suffixes (or rotations) at `i` and `j`
    fn longest_common_prefix(&self, i: TextPosition, j: TextPosition) -> Result<usize>;
}

#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(SuffixArrayError::IndexOutOfRange { index, len })
    }
}

/// Bounds-checked window comparison over a class table stack
pub(crate) fn compare_checked<C: ClassLookup + ?Sized>(
    classes: &C,
    text_len: usize,
    i: TextPosition,
    j: TextPosition,
    len: usize,
) -> Result<Ordering> {
    check_index(i, text_len)?;
    check_index(j, text_len)?;
    if len == 0 || len > text_len {
        return Err(SuffixArrayError::InvalidLength { len, max: text_len });
    }

    Ok(classes.compare_windows(i, j, len))
}

/// Bounds-checked common prefix over a class table stack
pub(crate) fn common_prefix_checked<C: ClassLookup + ?Sized>(
    classes: &C,
    semantics: Semantics,
    text_len: usize,
    i: TextPosition,
    j: TextPosition,
) -> Result<usize> {
    check_index(i, text_len)?;
    check_index(j, text_len)?;

    let cap = match semantics {
        Semantics::Suffixes => text_len - i.max(j),
        Semantics::Rotations => text_len,
    };
    if i == j {
        return Ok(cap);
    }

    Ok(classes.common_prefix(i, j, cap))
}
