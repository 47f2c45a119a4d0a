//! Suffix array writer
//!
//! Writes suffix array data structures to disk in a format optimized for
//! memory-mapped reading.

use super::builder::BuiltSuffixArray;
use super::history::ClassHistory;
use super::types::*;
use crate::utils::encoding::{write_u32_le, write_u32s_le, write_u64_le, write_u64s_le};
use anyhow::{Context, Result};
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes suffix array files to an index directory
pub struct SuffixArrayWriter;

impl SuffixArrayWriter {
    /// Write all suffix array files to an index directory
    ///
    /// Creates:
    /// - text.bin: The text
    /// - sa.bin: Order and LCP arrays
    /// - classes.bin: Every round's class table
    /// - meta.json: Build metadata
    pub fn write(index_path: &Path, built: &BuiltSuffixArray) -> Result<()> {
        let array = &built.array;
        let history = array.class_tables();
        let working_len = array.working_len();

        fs::create_dir_all(index_path)
            .with_context(|| format!("Failed to create {}", index_path.display()))?;

        // meta.json goes last: its presence marks a complete index
        let meta_path = index_path.join("meta.json");
        if meta_path.exists() {
            fs::remove_file(&meta_path).context("Failed to remove stale meta.json")?;
        }

        Self::write_text(index_path, &built.text)?;

        let header = SuffixArrayHeader::new(
            array.semantics(),
            array.len() as u64,
            working_len as u64,
            history.len() as u32,
        );
        Self::write_suffix_array(index_path, &header, array.order(), array.lcp())?;

        Self::write_classes(index_path, working_len, history)?;

        let meta = built.meta();
        let file = File::create(&meta_path).context("Failed to create meta.json")?;
        serde_json::to_writer_pretty(BufWriter::new(file), &meta)
            .context("Failed to write meta.json")?;

        info!(
            "wrote suffix array to {} ({} symbols, {} class tables)",
            index_path.display(),
            array.len(),
            history.len()
        );

        Ok(())
    }

    /// Write the text to text.bin
    fn write_text(index_path: &Path, text: &[u8]) -> Result<()> {
        let path = index_path.join("text.bin");
        let mut file = BufWriter::with_capacity(65536, File::create(&path)?);
        file.write_all(text)?;
        file.flush()?;
        Ok(())
    }

    /// Write the header, order and LCP arrays to sa.bin
    fn write_suffix_array(
        index_path: &Path,
        header: &SuffixArrayHeader,
        order: &[TextPosition],
        lcp: &[usize],
    ) -> Result<()> {
        let path = index_path.join("sa.bin");
        let mut file = BufWriter::with_capacity(65536, File::create(&path)?);

        write_u32_le(&mut file, header.magic)?;
        write_u32_le(&mut file, header.version)?;
        write_u32_le(&mut file, header.flags)?;
        write_u64_le(&mut file, header.text_len)?;
        write_u64_le(&mut file, header.working_len)?;
        write_u32_le(&mut file, header.table_count)?;

        write_u64s_le(&mut file, order.iter().map(|&pos| pos as u64))?;
        write_u64s_le(&mut file, lcp.iter().map(|&len| len as u64))?;

        file.flush()?;
        Ok(())
    }

    /// Write every class table to classes.bin, narrowest first
    fn write_classes(index_path: &Path, working_len: usize, history: &ClassHistory) -> Result<()> {
        let path = index_path.join("classes.bin");
        let mut file = BufWriter::with_capacity(65536, File::create(&path)?);

        let header = ClassTableHeader::new(working_len as u64, history.len() as u32);
        write_u32_le(&mut file, header.magic)?;
        write_u32_le(&mut file, header.version)?;
        write_u64_le(&mut file, header.working_len)?;
        write_u32_le(&mut file, header.table_count)?;
        write_u32_le(&mut file, header.flags)?;

        for table in history.iter() {
            write_u32s_le(&mut file, table.as_slice().iter().copied())?;
        }

        file.flush()?;
        Ok(())
    }
}
