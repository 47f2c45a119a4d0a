//! Longest-common-prefix arrays
//!
//! `lcp[i]` is the length of the common prefix of the entries ranked `i`
//! and `i + 1`; the last entry has no successor and is always 0.

use super::history::ClassLookup;
use super::types::TextPosition;

/// Kasai's algorithm over a suffix order.
///
/// Walks positions in text order carrying the match length `k`: when the
/// suffix at `i` shares `k` symbols with its successor, the suffix at
/// `i + 1` shares at least `k - 1` with its own, so matching resumes from
/// there. At most `2n` symbol comparisons in total.
///
/// `order` must be the true suffix order of `text` (all suffixes distinct).
pub fn kasai<S: Eq>(text: &[S], order: &[TextPosition]) -> Vec<usize> {
    let n = text.len();
    let mut rank = vec![0usize; n];
    for (r, &pos) in order.iter().enumerate() {
        rank[pos] = r;
    }

    let mut lcp = vec![0usize; n];
    let mut k = 0usize;
    for i in 0..n {
        if rank[i] == n - 1 {
            k = 0;
            lcp[rank[i]] = 0;
            continue;
        }

        let j = order[rank[i] + 1];
        while i + k < n && j + k < n && text[i + k] == text[j + k] {
            k += 1;
        }
        lcp[rank[i]] = k;
        k = k.saturating_sub(1);
    }

    lcp
}

/// LCP of adjacent rotations, lifted from the class tables.
///
/// Identical rotations may be ranked in any relative order, which breaks the
/// carry argument Kasai relies on, so each entry is computed independently
/// in `O(log n)`. Values are capped at the text length.
pub fn lifted<C: ClassLookup>(classes: &C, order: &[TextPosition]) -> Vec<usize> {
    let n = order.len();
    let mut lcp: Vec<usize> = order
        .windows(2)
        .map(|pair| classes.common_prefix(pair[0], pair[1], n))
        .collect();
    lcp.push(0);
    lcp
}
