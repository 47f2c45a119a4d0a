//! Per-round equivalence classes
//!
//! Every doubling round produces a table mapping each working position to
//! the class of the window of length `2^h` starting there. Class ids are
//! order preserving: `class(i) < class(j)` iff window `i` sorts before
//! window `j`. The whole history is kept for the lifetime of the array, so
//! any two equal-length windows can be ranked from two lookups per side.

use super::types::{ClassId, TextPosition};
use std::cmp::Ordering;

/// Equivalence classes for one window length
#[derive(Debug, Clone)]
pub struct ClassTable {
    classes: Vec<ClassId>,
    count: usize,
    window: usize,
}

impl ClassTable {
    pub fn new(classes: Vec<ClassId>, count: usize, window: usize) -> Self {
        Self {
            classes,
            count,
            window,
        }
    }

    #[inline]
    pub fn class_of(&self, pos: TextPosition) -> ClassId {
        self.classes[pos]
    }

    /// Number of distinct classes
    pub fn count(&self) -> usize {
        self.count
    }

    /// Window length these classes describe
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn as_slice(&self) -> &[ClassId] {
        &self.classes
    }
}

/// All class tables, indexed by round
#[derive(Debug, Clone)]
pub struct ClassHistory {
    tables: Vec<ClassTable>,
}

impl ClassHistory {
    /// Start a history from the single-symbol partition
    pub fn new(initial: ClassTable) -> Self {
        Self {
            tables: vec![initial],
        }
    }

    pub fn push(&mut self, table: ClassTable) {
        self.tables.push(table);
    }

    /// The most recent round
    pub fn last(&self) -> &ClassTable {
        // Never empty: construction seeds the initial partition
        &self.tables[self.tables.len() - 1]
    }

    pub fn level(&self, level: usize) -> Option<&ClassTable> {
        self.tables.get(level)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassTable> {
        self.tables.iter()
    }
}

/// Read access to a stack of class tables, in memory or mapped from disk
pub trait ClassLookup {
    /// Positions covered by each table
    fn working_len(&self) -> usize;

    /// Number of retained tables
    fn levels(&self) -> usize;

    fn class_at(&self, level: usize, pos: TextPosition) -> ClassId;

    /// Order of the cyclic windows of length `len` at `i` and `j`.
    ///
    /// Two overlapping windows of length `2^k`, `k = floor(log2 len)`, cover
    /// the whole window, so their class pair decides it. `len` must be at
    /// least 1 and `2^k` must be a retained level.
    fn compare_windows(&self, i: TextPosition, j: TextPosition, len: usize) -> Ordering {
        let m = self.working_len();
        let k = len.ilog2() as usize;
        let tail = len - (1 << k);

        let a = (self.class_at(k, i), self.class_at(k, (i + tail) % m));
        let b = (self.class_at(k, j), self.class_at(k, (j + tail) % m));
        a.cmp(&b)
    }

    /// Length of the common prefix of the cyclic windows at `i` and `j`,
    /// capped at `cap`. Lifts greedily from the widest table down.
    fn common_prefix(&self, i: TextPosition, j: TextPosition, cap: usize) -> usize {
        let m = self.working_len();
        let mut matched = 0;

        for level in (0..self.levels()).rev() {
            let step = 1usize << level;
            if matched + step <= cap
                && self.class_at(level, (i + matched) % m) == self.class_at(level, (j + matched) % m)
            {
                matched += step;
            }
        }

        matched
    }
}

impl ClassLookup for ClassHistory {
    fn working_len(&self) -> usize {
        self.last().as_slice().len()
    }

    fn levels(&self) -> usize {
        self.tables.len()
    }

    #[inline]
    fn class_at(&self, level: usize, pos: TextPosition) -> ClassId {
        self.tables[level].class_of(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tables for the rotations of "abab", built by hand
    fn abab() -> ClassHistory {
        let mut history = ClassHistory::new(ClassTable::new(vec![0, 1, 0, 1], 2, 1));
        history.push(ClassTable::new(vec![0, 1, 0, 1], 2, 2));
        history.push(ClassTable::new(vec![0, 1, 0, 1], 2, 4));
        history
    }

    #[test]
    fn test_history_accessors() {
        let history = abab();
        assert_eq!(history.len(), 3);
        assert_eq!(history.working_len(), 4);
        assert_eq!(history.last().window(), 4);
        assert_eq!(history.level(1).map(|t| t.count()), Some(2));
        assert!(history.level(3).is_none());
    }

    #[test]
    fn test_compare_windows() {
        let history = abab();
        assert_eq!(history.compare_windows(0, 2, 3), Ordering::Equal);
        assert_eq!(history.compare_windows(0, 1, 3), Ordering::Less);
        assert_eq!(history.compare_windows(1, 0, 1), Ordering::Greater);
    }

    #[test]
    fn test_common_prefix_capped() {
        let history = abab();
        assert_eq!(history.common_prefix(0, 2, 4), 4);
        assert_eq!(history.common_prefix(0, 2, 3), 3);
        assert_eq!(history.common_prefix(0, 1, 4), 0);
    }
}
