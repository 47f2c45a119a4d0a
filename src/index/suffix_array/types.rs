//! Types for suffix array construction and storage
//!
//! This module defines the configuration, metadata and on-disk headers
//! shared by the builder, writer and reader.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Position in the text
pub type TextPosition = usize;

/// Equivalence class id within one doubling round
pub type ClassId = u32;

/// Longest working length whose class ids fit in a `ClassId`
pub const MAX_WORKING_LEN: usize = ClassId::MAX as usize;

/// Magic number for suffix array files
pub const SA_MAGIC: u32 = 0x58524153; // "SARX" in little-endian

/// Current version of the on-disk format
pub const SA_VERSION: u32 = 1;

/// Header flag: the array ranks cyclic rotations instead of suffixes
pub const FLAG_ROTATIONS: u32 = 1 << 0;

/// Inputs at least this long run the per-round passes on the rayon pool
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100_000;

/// What the sorted order ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Semantics {
    /// True suffixes. A virtual terminator smaller than every symbol is
    /// appended internally, so windows past the end compare as their
    /// clamped prefix.
    #[default]
    Suffixes,
    /// Cyclic rotations of the text. Windows wrap around the end.
    Rotations,
}

impl Semantics {
    /// Number of virtual positions appended to the text
    pub fn terminator_len(self) -> usize {
        match self {
            Semantics::Suffixes => 1,
            Semantics::Rotations => 0,
        }
    }

    pub fn flags(self) -> u32 {
        match self {
            Semantics::Suffixes => 0,
            Semantics::Rotations => FLAG_ROTATIONS,
        }
    }

    pub fn from_flags(flags: u32) -> Self {
        if flags & FLAG_ROTATIONS != 0 {
            Semantics::Rotations
        } else {
            Semantics::Suffixes
        }
    }
}

/// Configuration for suffix array building
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuffixArrayConfig {
    /// Rank suffixes or cyclic rotations (default: suffixes)
    pub semantics: Semantics,
    /// Lowercase ASCII bytes before building (default: false)
    pub case_insensitive: bool,
    /// Minimum working length for parallel rounds
    pub parallel_threshold: usize,
}

impl Default for SuffixArrayConfig {
    fn default() -> Self {
        Self {
            semantics: Semantics::default(),
            case_insensitive: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// The file an index was built from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    /// Canonical path of the source file
    pub path: PathBuf,
    /// Size in bytes at build time
    pub size: u64,
    /// Modification time (seconds since the epoch) at build time
    pub modified: u64,
}

/// Suffix array metadata stored in meta.json
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SuffixArrayMeta {
    pub semantics: Semantics,
    /// Number of symbols in the text
    pub text_len: u64,
    /// Text length plus the virtual terminator, if any
    pub working_len: u64,
    /// Number of retained class tables
    pub table_count: u32,
    /// Number of distinct symbols
    pub alphabet_size: u32,
    /// Whether the text was case-folded before building
    pub case_insensitive: bool,
    /// Build time (seconds since the epoch)
    pub created_at: u64,
    /// Source file, when built from one
    #[serde(default)]
    pub source: Option<SourceInfo>,
}

/// Header for sa.bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuffixArrayHeader {
    /// Magic number (SA_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Semantics flags
    pub flags: u32,
    /// Number of symbols in the text
    pub text_len: u64,
    /// Number of positions the class tables cover
    pub working_len: u64,
    /// Number of class tables in classes.bin
    pub table_count: u32,
}

impl SuffixArrayHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 4 + 8 + 8 + 4; // 32 bytes

    pub fn new(semantics: Semantics, text_len: u64, working_len: u64, table_count: u32) -> Self {
        Self {
            magic: SA_MAGIC,
            version: SA_VERSION,
            flags: semantics.flags(),
            text_len,
            working_len,
            table_count,
        }
    }

    pub fn semantics(&self) -> Semantics {
        Semantics::from_flags(self.flags)
    }

    /// Expected sa.bin size: header, order entries, LCP entries
    ///
    /// `None` if the header's length does not fit in memory.
    pub fn file_size(&self) -> Option<usize> {
        usize::try_from(self.text_len)
            .ok()?
            .checked_mul(2 * 8)?
            .checked_add(Self::SIZE)
    }
}

/// Header for classes.bin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassTableHeader {
    /// Magic number (SA_MAGIC)
    pub magic: u32,
    /// Version number
    pub version: u32,
    /// Positions per table
    pub working_len: u64,
    /// Number of tables
    pub table_count: u32,
    /// Flags (reserved)
    pub flags: u32,
}

impl ClassTableHeader {
    /// Size of header in bytes
    pub const SIZE: usize = 4 + 4 + 8 + 4 + 4; // 24 bytes

    /// Size of one stored class id
    pub const ENTRY_SIZE: usize = 4;

    pub fn new(working_len: u64, table_count: u32) -> Self {
        Self {
            magic: SA_MAGIC,
            version: SA_VERSION,
            working_len,
            table_count,
            flags: 0,
        }
    }

    /// Expected classes.bin size, `None` on overflow
    pub fn file_size(&self) -> Option<usize> {
        usize::try_from(self.working_len)
            .ok()?
            .checked_mul(self.table_count as usize)?
            .checked_mul(Self::ENTRY_SIZE)?
            .checked_add(Self::SIZE)
    }
}
