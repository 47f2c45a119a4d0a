//! Alphabet normalization
//!
//! Maps input symbols to dense, order-preserving ranks so the initial
//! counting sort needs exactly one bucket per distinct symbol.

use super::types::Semantics;

/// Rank reserved for the virtual terminator under [`Semantics::Suffixes`]
pub const TERMINATOR_RANK: usize = 0;

/// Text rewritten as dense symbol ranks
#[derive(Debug, Clone)]
pub struct Alphabet {
    /// One rank per working position (terminator included, if any)
    ranks: Vec<usize>,
    /// Number of distinct ranks, terminator included
    size: usize,
    /// Number of symbols in the original text
    text_len: usize,
}

impl Alphabet {
    /// Normalize a byte string using a dense 256-entry table
    pub fn from_bytes(text: &[u8], semantics: Semantics) -> Self {
        let mut present = [false; 256];
        for &byte in text {
            present[byte as usize] = true;
        }

        let mut dense = [0usize; 256];
        let mut next = semantics.terminator_len();
        for (byte, &seen) in present.iter().enumerate() {
            if seen {
                dense[byte] = next;
                next += 1;
            }
        }

        Self::assemble(text.iter().map(|&b| dense[b as usize]), text.len(), next, semantics)
    }

    /// Normalize any totally ordered symbols
    pub fn from_symbols<T: Ord>(text: &[T], semantics: Semantics) -> Self {
        let mut distinct: Vec<&T> = text.iter().collect();
        distinct.sort_unstable();
        distinct.dedup();

        let offset = semantics.terminator_len();
        let size = distinct.len() + offset;
        let ranks = text
            .iter()
            .map(|symbol| offset + distinct.binary_search(&symbol).unwrap_or_else(|at| at));

        Self::assemble(ranks, text.len(), size, semantics)
    }

    fn assemble(
        ranks: impl Iterator<Item = usize>,
        text_len: usize,
        size: usize,
        semantics: Semantics,
    ) -> Self {
        let mut out = Vec::with_capacity(text_len + semantics.terminator_len());
        out.extend(ranks);
        if semantics == Semantics::Suffixes {
            out.push(TERMINATOR_RANK);
        }

        Self {
            ranks: out,
            size,
            text_len,
        }
    }

    /// Ranks for every working position
    #[inline]
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Ranks of the original text only
    #[inline]
    pub fn text_ranks(&self) -> &[usize] {
        &self.ranks[..self.text_len]
    }

    /// Number of buckets the initial counting sort needs
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of distinct symbols in the original text
    pub fn symbol_count(&self) -> usize {
        self.size - (self.ranks.len() - self.text_len)
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Text length plus the virtual terminator, if any
    pub fn working_len(&self) -> usize {
        self.ranks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dense_order_preserving() {
        let alphabet = Alphabet::from_bytes(b"banana", Semantics::Rotations);
        // a < b < n
        assert_eq!(alphabet.ranks(), &[1, 0, 2, 0, 2, 0]);
        assert_eq!(alphabet.size(), 3);
        assert_eq!(alphabet.symbol_count(), 3);
        assert_eq!(alphabet.working_len(), 6);
    }

    #[test]
    fn test_terminator_is_smallest() {
        let alphabet = Alphabet::from_bytes(b"\x00ab", Semantics::Suffixes);
        // Byte 0 still ranks above the terminator
        assert_eq!(alphabet.ranks(), &[1, 2, 3, TERMINATOR_RANK]);
        assert_eq!(alphabet.size(), 4);
        assert_eq!(alphabet.symbol_count(), 3);
        assert_eq!(alphabet.text_ranks(), &[1, 2, 3]);
        assert_eq!(alphabet.working_len(), 4);
    }

    #[test]
    fn test_symbols_match_bytes() {
        let text = "mississippi";
        let from_bytes = Alphabet::from_bytes(text.as_bytes(), Semantics::Suffixes);
        let chars: Vec<char> = text.chars().collect();
        let from_chars = Alphabet::from_symbols(&chars, Semantics::Suffixes);

        assert_eq!(from_bytes.ranks(), from_chars.ranks());
        assert_eq!(from_bytes.size(), from_chars.size());
    }

    #[test]
    fn test_wide_symbols() {
        let text = [1_000_000u32, 7, 1_000_000, 42];
        let alphabet = Alphabet::from_symbols(&text, Semantics::Rotations);
        assert_eq!(alphabet.ranks(), &[2, 0, 2, 1]);
        assert_eq!(alphabet.size(), 3);
    }
}
