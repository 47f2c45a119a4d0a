//! Suffix array builder
//!
//! Builds a suffix array by prefix doubling:
//! 1. Normalize the alphabet to dense ranks
//! 2. Counting-sort single symbols into the initial partition
//! 3. Double the sorted window length each round, re-keying the previous
//!    order by the class of the preceding half-window
//! 4. Derive the LCP array from the final order
//!
//! Every round's class table is retained for constant-time window
//! comparison after the build.

use super::alphabet::Alphabet;
use super::array::SuffixArray;
use super::error::{Result, SuffixArrayError};
use super::history::{ClassHistory, ClassTable};
use super::lcp;
use super::types::*;
use crate::utils::progress::ProgressBar;
use log::{debug, info};
use rayon::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

/// Builder for constructing suffix arrays
pub struct SuffixArrayBuilder {
    config: SuffixArrayConfig,
    /// Ticked once per doubling round
    progress: Option<ProgressBar>,
}

impl SuffixArrayBuilder {
    /// Create a new suffix array builder with the given configuration
    pub fn new(config: SuffixArrayConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::new(SuffixArrayConfig::default())
    }

    /// Report each doubling round on a progress bar
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &SuffixArrayConfig {
        &self.config
    }

    /// Number of doubling rounds a text of `text_len` symbols will take
    pub fn round_count(&self, text_len: usize) -> u64 {
        let working = text_len + self.config.semantics.terminator_len();
        if working <= 1 {
            0
        } else {
            u64::from(working.next_power_of_two().trailing_zeros())
        }
    }

    /// Build the suffix array of a byte string
    ///
    /// The text is case-folded first if configured. Fails on empty input.
    pub fn build(&self, content: &[u8]) -> Result<BuiltSuffixArray> {
        self.check_len(content.len())?;

        let text: Vec<u8> = if self.config.case_insensitive {
            content.iter().map(|b| b.to_ascii_lowercase()).collect()
        } else {
            content.to_vec()
        };

        let alphabet = Alphabet::from_bytes(&text, self.config.semantics);
        let array = self.construct(alphabet);

        Ok(BuiltSuffixArray {
            text,
            array,
            config: self.config.clone(),
            source: None,
        })
    }

    /// Build the suffix array of any totally ordered symbol sequence
    pub fn build_symbols<T: Ord>(&self, text: &[T]) -> Result<SuffixArray> {
        self.check_len(text.len())?;

        let alphabet = Alphabet::from_symbols(text, self.config.semantics);
        Ok(self.construct(alphabet))
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len == 0 {
            return Err(SuffixArrayError::EmptyInput);
        }
        let max = MAX_WORKING_LEN - self.config.semantics.terminator_len();
        if len > max {
            return Err(SuffixArrayError::InputTooLong { len, max });
        }
        Ok(())
    }

    fn construct(&self, alphabet: Alphabet) -> SuffixArray {
        let semantics = self.config.semantics;
        let m = alphabet.working_len();
        let parallel = m >= self.config.parallel_threshold;

        info!(
            "building suffix array: {} symbols, alphabet {}, {:?}{}",
            alphabet.text_len(),
            alphabet.symbol_count(),
            semantics,
            if parallel { ", parallel" } else { "" }
        );

        let (mut order, initial) = initial_partition(&alphabet);
        let mut history = ClassHistory::new(initial);

        let mut window = 1;
        while window < m {
            let (next_order, next) = doubling_round(&order, history.last(), window, parallel);
            debug!(
                "round {}: window {} has {} classes",
                history.len(),
                next.window(),
                next.count()
            );

            order = next_order;
            history.push(next);
            if let Some(progress) = &self.progress {
                progress.inc(1);
            }
            window <<= 1;
        }

        // The terminator is the unique smallest suffix and always ranks first
        let order = order.split_off(semantics.terminator_len());

        let lcp = match semantics {
            Semantics::Suffixes => lcp::kasai(alphabet.text_ranks(), &order),
            Semantics::Rotations => lcp::lifted(&history, &order),
        };

        SuffixArray::from_parts(semantics, alphabet.symbol_count(), order, lcp, history)
    }
}

/// Result of building a suffix array over bytes
pub struct BuiltSuffixArray {
    /// Text the array was built over (case-folded if configured)
    pub text: Vec<u8>,
    /// The suffix array with its LCP array and class history
    pub array: SuffixArray,
    /// Configuration used for building
    pub config: SuffixArrayConfig,
    /// File the text came from, if any
    pub source: Option<SourceInfo>,
}

impl BuiltSuffixArray {
    /// Record the file this array was built from
    pub fn with_source(mut self, source: SourceInfo) -> Self {
        self.source = Some(source);
        self
    }

    /// Get metadata about this suffix array
    pub fn meta(&self) -> SuffixArrayMeta {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        SuffixArrayMeta {
            semantics: self.array.semantics(),
            text_len: self.array.len() as u64,
            working_len: self.array.working_len() as u64,
            table_count: self.array.class_tables().len() as u32,
            alphabet_size: self.array.alphabet_size() as u32,
            case_insensitive: self.config.case_insensitive,
            created_at,
            source: self.source.clone(),
        }
    }
}

/// Stable counting sort of `items` by `key`, with `buckets` distinct keys
fn counting_sort(items: &[usize], buckets: usize, key: impl Fn(usize) -> usize) -> Vec<usize> {
    let mut counts = vec![0usize; buckets];
    for &item in items {
        counts[key(item)] += 1;
    }
    for b in 1..buckets {
        counts[b] += counts[b - 1];
    }

    let mut sorted = vec![0usize; items.len()];
    for &item in items.iter().rev() {
        let slot = &mut counts[key(item)];
        *slot -= 1;
        sorted[*slot] = item;
    }
    sorted
}

/// Evaluate `f` for every index, on the rayon pool if `parallel`
fn collect_indexed<T, F>(len: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..len).into_par_iter().map(f).collect()
    } else {
        (0..len).map(f).collect()
    }
}

/// Round 0: order by single symbol, one class per distinct symbol
fn initial_partition(alphabet: &Alphabet) -> (Vec<TextPosition>, ClassTable) {
    let ranks = alphabet.ranks();
    let positions: Vec<usize> = (0..ranks.len()).collect();
    let order = counting_sort(&positions, alphabet.size(), |pos| ranks[pos]);

    let mut classes: Vec<ClassId> = vec![0; ranks.len()];
    let mut count = 1;
    for w in 1..order.len() {
        if ranks[order[w]] != ranks[order[w - 1]] {
            count += 1;
        }
        classes[order[w]] = (count - 1) as ClassId;
    }

    (order, ClassTable::new(classes, count, 1))
}

/// Derive the order and classes for windows of `2 * window` from those for
/// `window`.
///
/// Shifting every sorted position back by `window` yields positions already
/// ordered by their second half; a stable sort on the class of the first
/// half completes the order.
fn doubling_round(
    order: &[TextPosition],
    prev: &ClassTable,
    window: usize,
    parallel: bool,
) -> (Vec<TextPosition>, ClassTable) {
    let m = order.len();

    let candidates = collect_indexed(m, parallel, |w| (order[w] + m - window) % m);
    let sorted = counting_sort(&candidates, prev.count(), |pos| prev.class_of(pos) as usize);

    let pair = |pos: usize| (prev.class_of(pos), prev.class_of((pos + window) % m));
    let starts_class = collect_indexed(m, parallel, |w| {
        w == 0 || pair(sorted[w]) != pair(sorted[w - 1])
    });

    let mut classes: Vec<ClassId> = vec![0; m];
    let mut count = 0;
    for (w, &pos) in sorted.iter().enumerate() {
        if starts_class[w] {
            count += 1;
        }
        classes[pos] = (count - 1) as ClassId;
    }

    (sorted, ClassTable::new(classes, count, window * 2))
}
