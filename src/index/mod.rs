pub mod build;
pub mod stats;
pub mod suffix_array;

pub use build::{build_index, build_index_with_progress, open_index};
pub use suffix_array::{SuffixArray, SuffixArrayBuilder, SuffixArrayReader, SuffixQueries};
