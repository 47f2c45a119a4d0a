use crate::index::build::open_index;
use crate::index::suffix_array::SuffixQueries;
use crate::utils::{get_index_dir, list_indexed_sources};
use anyhow::Result;
use std::path::Path;

/// Display index statistics
pub fn show_stats(source: &Path) -> Result<()> {
    let reader = open_index(source)?;
    let index_path = get_index_dir(&source.canonicalize()?)?;
    let meta = reader.meta();
    let stats = reader.stats();

    println!("Index Statistics");
    println!("================");
    println!();
    if let Some(src) = &meta.source {
        println!("Source:           {}", src.path.display());
    }
    println!("Index location:   {}", index_path.display());
    println!("Semantics:        {:?}", reader.semantics());
    println!("Case-insensitive: {}", meta.case_insensitive);
    println!("Symbols:          {}", stats.suffix_count);
    println!("Alphabet size:    {}", meta.alphabet_size);
    println!("Class tables:     {}", stats.table_count);

    let max_lcp = (0..reader.len())
        .filter_map(|rank| reader.lcp_at(rank).ok())
        .max()
        .unwrap_or(0);
    println!("Longest repeat:   {}", max_lcp);

    println!();
    println!("Text size:        {}", format_size(stats.text_size as u64));
    println!("Order + LCP:      {}", format_size(stats.sa_bytes as u64));
    println!("Class tables:     {}", format_size(stats.class_bytes as u64));

    // Index size
    if let Ok(size) = dir_size(&index_path) {
        println!("Index size:       {}", format_size(size));
    }

    println!();
    println!("Created:          {}", format_timestamp(meta.created_at));

    Ok(())
}

/// List all indexed source files
pub fn list_indexes() -> Result<()> {
    let sources = list_indexed_sources()?;

    if sources.is_empty() {
        println!("No indexed files found.");
        return Ok(());
    }

    println!("Indexed Files");
    println!("=============");
    println!();

    for source in sources {
        let exists = source.source_path.exists();
        let status = if exists { "" } else { " [missing]" };
        println!("  {}{}", source.source_path.display(), status);
        println!("    Index: {}", source.index_dir.display());
        println!();
    }

    Ok(())
}

/// Calculate directory size
fn dir_size(path: &Path) -> std::io::Result<u64> {
    let mut size = 0;
    if path.is_dir() {
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if entry.path().is_file() {
                size += entry.metadata()?.len();
            }
        }
    }
    Ok(size)
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Format unix timestamp
fn format_timestamp(ts: u64) -> String {
    use std::time::{Duration, UNIX_EPOCH};
    let datetime = UNIX_EPOCH + Duration::from_secs(ts);
    format!("{:?}", datetime)
}
