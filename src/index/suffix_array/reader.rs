//! Suffix array reader
//!
//! Provides memory-mapped access to stored suffix arrays. Order, LCP and
//! window comparisons are answered straight from the mapped files.

use super::error::SuffixArrayError;
use super::history::ClassLookup;
use super::queries::{self, SuffixQueries};
use super::types::*;
use crate::utils::encoding::{read_u32_le, read_u64_le, u32_le_at, u64_le_at};
use anyhow::{Context, Result};
use log::info;
use memmap2::Mmap;
use std::cmp::Ordering;
use std::fs::File;
use std::path::Path;

/// Class tables mapped from classes.bin
struct MappedClasses {
    mmap: Mmap,
    working_len: usize,
    levels: usize,
}

impl ClassLookup for MappedClasses {
    fn working_len(&self) -> usize {
        self.working_len
    }

    fn levels(&self) -> usize {
        self.levels
    }

    #[inline]
    fn class_at(&self, level: usize, pos: TextPosition) -> ClassId {
        let offset = ClassTableHeader::SIZE
            + (level * self.working_len + pos) * ClassTableHeader::ENTRY_SIZE;
        u32_le_at(&self.mmap, offset)
    }
}

/// Reader for a stored suffix array
///
/// Uses memory-mapped files so opening is cheap regardless of text size.
pub struct SuffixArrayReader {
    /// Memory-mapped text
    text_mmap: Mmap,
    /// Memory-mapped order and LCP arrays
    sa_mmap: Mmap,
    /// Memory-mapped class tables
    classes: MappedClasses,
    header: SuffixArrayHeader,
    meta: SuffixArrayMeta,
}

impl SuffixArrayReader {
    /// Open a suffix array from an index directory
    ///
    /// Returns `Ok(None)` if the index files do not exist
    pub fn open(index_path: &Path) -> Result<Option<Self>> {
        let meta_path = index_path.join("meta.json");
        let text_path = index_path.join("text.bin");
        let sa_path = index_path.join("sa.bin");
        let classes_path = index_path.join("classes.bin");

        if !meta_path.exists() || !text_path.exists() || !sa_path.exists() || !classes_path.exists()
        {
            return Ok(None);
        }

        let meta: SuffixArrayMeta = serde_json::from_reader(
            File::open(&meta_path).context("Failed to open meta.json")?,
        )
        .context("Failed to parse meta.json")?;

        // Memory-map the text
        let text_file = File::open(&text_path).context("Failed to open text.bin")?;
        let text_mmap = unsafe { Mmap::map(&text_file)? };

        // Memory-map the order and LCP arrays
        let sa_file = File::open(&sa_path).context("Failed to open sa.bin")?;
        let sa_mmap = unsafe { Mmap::map(&sa_file)? };
        let header = Self::read_header(&sa_mmap)?;

        if text_mmap.len() as u64 != header.text_len {
            anyhow::bail!(
                "Invalid text.bin: expected {} bytes, found {}",
                header.text_len,
                text_mmap.len()
            );
        }

        // Order entries index the text directly
        if let Some(rank) = (0..header.text_len as usize).find(|&rank| {
            u64_le_at(&sa_mmap, SuffixArrayHeader::SIZE + rank * 8) >= header.text_len
        }) {
            anyhow::bail!("Invalid sa.bin: order entry {} is past the end of the text", rank);
        }

        let expected_working =
            header.text_len + header.semantics().terminator_len() as u64;
        if header.working_len != expected_working {
            anyhow::bail!(
                "Invalid sa.bin: working length {} does not match text length {}",
                header.working_len,
                header.text_len
            );
        }

        // Memory-map the class tables
        let classes_file = File::open(&classes_path).context("Failed to open classes.bin")?;
        let classes_mmap = unsafe { Mmap::map(&classes_file)? };
        let classes_header = Self::read_classes_header(&classes_mmap)?;

        if classes_header.working_len != header.working_len
            || classes_header.table_count != header.table_count
        {
            anyhow::bail!("Invalid classes.bin: does not match sa.bin");
        }

        // Every window length up to the text length needs its table
        let required = if header.working_len <= 1 {
            1
        } else {
            header.working_len.next_power_of_two().trailing_zeros() + 1
        };
        if header.table_count < required {
            anyhow::bail!(
                "Invalid classes.bin: {} tables, {} required",
                header.table_count,
                required
            );
        }

        info!(
            "opened suffix array: {} symbols, {} class tables",
            header.text_len, header.table_count
        );

        Ok(Some(Self {
            text_mmap,
            sa_mmap,
            classes: MappedClasses {
                mmap: classes_mmap,
                working_len: classes_header.working_len as usize,
                levels: classes_header.table_count as usize,
            },
            header,
            meta,
        }))
    }

    /// Validate and read the sa.bin header
    fn read_header(data: &[u8]) -> Result<SuffixArrayHeader> {
        if data.len() < SuffixArrayHeader::SIZE {
            anyhow::bail!("Invalid sa.bin: file too small");
        }

        let mut cursor = &data[..SuffixArrayHeader::SIZE];
        let header = SuffixArrayHeader {
            magic: read_u32_le(&mut cursor)?,
            version: read_u32_le(&mut cursor)?,
            flags: read_u32_le(&mut cursor)?,
            text_len: read_u64_le(&mut cursor)?,
            working_len: read_u64_le(&mut cursor)?,
            table_count: read_u32_le(&mut cursor)?,
        };

        if header.magic != SA_MAGIC {
            anyhow::bail!("Invalid sa.bin: bad magic number");
        }
        if header.version != SA_VERSION {
            anyhow::bail!("Unsupported sa.bin version: {}", header.version);
        }
        if header.text_len == 0 {
            anyhow::bail!("Invalid sa.bin: empty text");
        }
        if header.text_len > data.len() as u64 {
            anyhow::bail!(
                "Invalid sa.bin: {} symbols cannot fit in {} bytes",
                header.text_len,
                data.len()
            );
        }
        let Some(expected) = header.file_size() else {
            anyhow::bail!("Invalid sa.bin: size overflows");
        };
        if data.len() != expected {
            anyhow::bail!(
                "Invalid sa.bin: expected {} bytes, found {}",
                expected,
                data.len()
            );
        }

        Ok(header)
    }

    /// Validate and read the classes.bin header
    fn read_classes_header(data: &[u8]) -> Result<ClassTableHeader> {
        if data.len() < ClassTableHeader::SIZE {
            anyhow::bail!("Invalid classes.bin: file too small");
        }

        let mut cursor = &data[..ClassTableHeader::SIZE];
        let header = ClassTableHeader {
            magic: read_u32_le(&mut cursor)?,
            version: read_u32_le(&mut cursor)?,
            working_len: read_u64_le(&mut cursor)?,
            table_count: read_u32_le(&mut cursor)?,
            flags: read_u32_le(&mut cursor)?,
        };

        if header.magic != SA_MAGIC {
            anyhow::bail!("Invalid classes.bin: bad magic number");
        }
        if header.version != SA_VERSION {
            anyhow::bail!("Unsupported classes.bin version: {}", header.version);
        }
        if header.working_len > data.len() as u64 {
            anyhow::bail!(
                "Invalid classes.bin: {} positions cannot fit in {} bytes",
                header.working_len,
                data.len()
            );
        }
        let Some(expected) = header.file_size() else {
            anyhow::bail!("Invalid classes.bin: size overflows");
        };
        if data.len() != expected {
            anyhow::bail!(
                "Invalid classes.bin: expected {} bytes, found {}",
                expected,
                data.len()
            );
        }

        Ok(header)
    }

    /// Get the full text slice
    #[inline]
    pub fn text(&self) -> &[u8] {
        &self.text_mmap
    }

    /// Metadata stored alongside the index
    pub fn meta(&self) -> &SuffixArrayMeta {
        &self.meta
    }

    #[inline]
    fn order_entry(&self, rank: usize) -> TextPosition {
        u64_le_at(&self.sa_mmap, SuffixArrayHeader::SIZE + rank * 8) as TextPosition
    }

    #[inline]
    fn lcp_entry(&self, rank: usize) -> usize {
        let offset = SuffixArrayHeader::SIZE + (self.len() + rank) * 8;
        u64_le_at(&self.sa_mmap, offset) as usize
    }

    /// Get statistics about this suffix array
    pub fn stats(&self) -> SuffixArrayStats {
        SuffixArrayStats {
            text_size: self.text_mmap.len(),
            suffix_count: self.header.text_len,
            table_count: self.header.table_count,
            sa_bytes: self.sa_mmap.len(),
            class_bytes: self.classes.mmap.len(),
        }
    }
}

impl SuffixQueries for SuffixArrayReader {
    fn len(&self) -> usize {
        self.header.text_len as usize
    }

    fn semantics(&self) -> Semantics {
        self.header.semantics()
    }

    fn order_at(&self, rank: usize) -> std::result::Result<TextPosition, SuffixArrayError> {
        queries::check_index(rank, self.len())?;
        Ok(self.order_entry(rank))
    }

    fn lcp_at(&self, rank: usize) -> std::result::Result<usize, SuffixArrayError> {
        queries::check_index(rank, self.len())?;
        Ok(self.lcp_entry(rank))
    }

    fn compare(
        &self,
        i: TextPosition,
        j: TextPosition,
        len: usize,
    ) -> std::result::Result<Ordering, SuffixArrayError> {
        queries::compare_checked(&self.classes, self.len(), i, j, len)
    }

    fn longest_common_prefix(
        &self,
        i: TextPosition,
        j: TextPosition,
    ) -> std::result::Result<usize, SuffixArrayError> {
        queries::common_prefix_checked(&self.classes, self.semantics(), self.len(), i, j)
    }
}

/// Statistics about a stored suffix array
#[derive(Debug, Clone)]
pub struct SuffixArrayStats {
    pub text_size: usize,
    pub suffix_count: u64,
    pub table_count: u32,
    pub sa_bytes: usize,
    pub class_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_array::builder::SuffixArrayBuilder;
    use crate::index::suffix_array::writer::SuffixArrayWriter;
    use std::fs;
    use tempfile::tempdir;

    fn setup_test_sa(text: &[u8], semantics: Semantics) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp_dir = tempdir().unwrap();
        let index_path = temp_dir.path().join("idx");

        let builder = SuffixArrayBuilder::new(SuffixArrayConfig {
            semantics,
            ..Default::default()
        });
        let built = builder.build(text).unwrap();
        SuffixArrayWriter::write(&index_path, &built).unwrap();

        (temp_dir, index_path)
    }

    #[test]
    fn test_open_reader() {
        let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
        let reader = SuffixArrayReader::open(&index_path).unwrap().unwrap();

        assert_eq!(reader.len(), 6);
        assert_eq!(reader.text(), b"banana");
        assert_eq!(reader.semantics(), Semantics::Suffixes);
        assert_eq!(reader.meta().text_len, 6);
    }

    #[test]
    fn test_queries_match_in_memory() {
        let text = b"abracadabra abracadabra";
        for semantics in [Semantics::Suffixes, Semantics::Rotations] {
            let (_temp_dir, index_path) = setup_test_sa(text, semantics);
            let reader = SuffixArrayReader::open(&index_path).unwrap().unwrap();
            let array = SuffixArrayBuilder::new(SuffixArrayConfig {
                semantics,
                ..Default::default()
            })
            .build(text)
            .unwrap()
            .array;

            let n = text.len();
            for rank in 0..n {
                assert_eq!(reader.order_at(rank), array.order_at(rank));
                assert_eq!(reader.lcp_at(rank), array.lcp_at(rank));
            }
            for i in 0..n {
                for j in 0..n {
                    for len in [1, 2, 3, 5, 11, n] {
                        assert_eq!(reader.compare(i, j, len), array.compare(i, j, len));
                    }
                    assert_eq!(
                        reader.longest_common_prefix(i, j),
                        array.longest_common_prefix(i, j)
                    );
                }
            }
        }
    }

    #[test]
    fn test_out_of_range() {
        let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
        let reader = SuffixArrayReader::open(&index_path).unwrap().unwrap();

        assert_eq!(
            reader.order_at(6),
            Err(SuffixArrayError::IndexOutOfRange { index: 6, len: 6 })
        );
        assert_eq!(
            reader.compare(0, 0, 0),
            Err(SuffixArrayError::InvalidLength { len: 0, max: 6 })
        );
    }

    #[test]
    fn test_missing_index() {
        let temp_dir = tempdir().unwrap();

        // No index files - should return None (not error)
        let reader = SuffixArrayReader::open(temp_dir.path()).unwrap();
        assert!(reader.is_none());
    }

    #[test]
    fn test_bad_magic() {
        let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
        let sa_path = index_path.join("sa.bin");
        let mut data = fs::read(&sa_path).unwrap();
        data[0] ^= 0xFF;
        fs::write(&sa_path, data).unwrap();

        let err = SuffixArrayReader::open(&index_path).err().unwrap();
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_truncated_classes() {
        let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
        let classes_path = index_path.join("classes.bin");
        let data = fs::read(&classes_path).unwrap();
        fs::write(&classes_path, &data[..data.len() - 4]).unwrap();

        assert!(SuffixArrayReader::open(&index_path).is_err());
    }

    fn patch_u64(path: &Path, offset: usize, value: u64) {
        let mut data = fs::read(path).unwrap();
        data[offset..offset + 8].copy_from_slice(&value.to_le_bytes());
        fs::write(path, data).unwrap();
    }

    #[test]
    fn test_huge_text_len() {
        for text_len in [1u64 << 61, u64::MAX] {
            let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
            patch_u64(&index_path.join("sa.bin"), 12, text_len);

            let err = SuffixArrayReader::open(&index_path).err().unwrap();
            assert!(err.to_string().contains("Invalid sa.bin"), "{}", err);
        }
    }

    #[test]
    fn test_huge_working_len() {
        for working_len in [1u64 << 62, u64::MAX] {
            let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
            patch_u64(&index_path.join("classes.bin"), 8, working_len);

            let err = SuffixArrayReader::open(&index_path).err().unwrap();
            assert!(err.to_string().contains("Invalid classes.bin"), "{}", err);
        }
    }

    #[test]
    fn test_order_entry_past_text() {
        let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
        patch_u64(&index_path.join("sa.bin"), SuffixArrayHeader::SIZE + 3 * 8, 6);

        let err = SuffixArrayReader::open(&index_path).err().unwrap();
        assert!(err.to_string().contains("order entry 3"), "{}", err);
    }

    #[test]
    fn test_stats() {
        let (_temp_dir, index_path) = setup_test_sa(b"banana", Semantics::Suffixes);
        let reader = SuffixArrayReader::open(&index_path).unwrap().unwrap();
        let stats = reader.stats();

        assert_eq!(stats.text_size, 6);
        assert_eq!(stats.suffix_count, 6);
        assert_eq!(stats.table_count, 4);
        assert_eq!(stats.sa_bytes, SuffixArrayHeader::SIZE + 96);
        assert_eq!(stats.class_bytes, ClassTableHeader::SIZE + 4 * 7 * 4);
    }
}
