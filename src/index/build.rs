use crate::index::suffix_array::types::{SourceInfo, SuffixArrayConfig, SuffixArrayMeta};
use crate::index::suffix_array::{SuffixArrayBuilder, SuffixArrayReader, SuffixArrayWriter};
use crate::utils::progress::round_progress;
use crate::utils::{get_index_dir, remove_index};
use anyhow::{Context, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, UNIX_EPOCH};

/// Size and modification time of a source file
pub fn source_info(source: &Path) -> Result<SourceInfo> {
    let metadata = fs::metadata(source)
        .with_context(|| format!("Failed to stat {}", source.display()))?;
    let modified = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Ok(SourceInfo {
        path: source.to_path_buf(),
        size: metadata.len(),
        modified,
    })
}

/// Read meta.json from an index directory, if present
fn read_meta(index_path: &Path) -> Result<Option<SuffixArrayMeta>> {
    let meta_path = index_path.join("meta.json");
    if !meta_path.exists() {
        return Ok(None);
    }

    let file = fs::File::open(&meta_path).context("Failed to open meta.json")?;
    Ok(serde_json::from_reader(file).ok())
}

/// Build or rebuild the index for a source file
pub fn build_index(source: &Path, config: &SuffixArrayConfig, force: bool) -> Result<PathBuf> {
    build_index_with_progress(source, config, force, false)
}

/// Build or rebuild the index with optional silent mode
///
/// An existing index built from the same file contents and configuration is
/// reused unless `force` is set.
pub fn build_index_with_progress(
    source: &Path,
    config: &SuffixArrayConfig,
    force: bool,
    silent: bool,
) -> Result<PathBuf> {
    let source = source.canonicalize().context("Invalid path")?;
    let index_path = get_index_dir(&source)?;
    let info = source_info(&source)?;

    if !force {
        if let Some(meta) = read_meta(&index_path)? {
            let unchanged = meta.source.as_ref() == Some(&info)
                && meta.semantics == config.semantics
                && meta.case_insensitive == config.case_insensitive;
            if unchanged {
                if !silent {
                    println!("Index up to date: {}", source.display());
                }
                return Ok(index_path);
            }
        }
    }

    let content = fs::read(&source)
        .with_context(|| format!("Failed to read {}", source.display()))?;

    if !silent {
        println!("Indexing: {}", source.display());
    }

    let start = Instant::now();
    let builder = SuffixArrayBuilder::new(config.clone());
    let progress = round_progress(builder.round_count(content.len()), silent);
    let built = builder
        .with_progress(progress.clone())
        .build(&content)
        .with_context(|| format!("Failed to index {}", source.display()))?
        .with_source(info);
    progress.finish_and_clear();

    // The old index survives a failed build
    if index_path.exists() {
        remove_index(&source).context("Failed to remove existing index")?;
    }
    SuffixArrayWriter::write(&index_path, &built)?;

    if !silent {
        println!(
            "Indexed {} symbols ({} class tables) in {:.2?}",
            built.array.len(),
            built.array.class_tables().len(),
            start.elapsed()
        );
    }

    Ok(index_path)
}

/// Open the stored index for a source file
pub fn open_index(source: &Path) -> Result<SuffixArrayReader> {
    let source = source.canonicalize().context("Invalid path")?;
    let index_path = get_index_dir(&source)?;

    let Some(reader) = SuffixArrayReader::open(&index_path)? else {
        anyhow::bail!("No index found. Run 'sarx build' first.");
    };

    if let Ok(info) = source_info(&source) {
        if reader.meta().source.as_ref() != Some(&info) {
            warn!(
                "index for {} is stale; run 'sarx build' to refresh it",
                source.display()
            );
        }
    }

    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::suffix_array::{Semantics, SuffixArray, SuffixQueries};
    use std::sync::OnceLock;
    use tempfile::{tempdir, TempDir};

    static DATA_HOME: OnceLock<TempDir> = OnceLock::new();

    /// Point the app data directory at one temp dir shared by every test.
    /// Index dirs are keyed by source path, so tests do not collide.
    fn isolated_data_home() {
        DATA_HOME.get_or_init(|| {
            let dir = tempdir().unwrap();
            // Set once, before any test reads it
            unsafe {
                std::env::set_var("XDG_DATA_HOME", dir.path());
                std::env::set_var("HOME", dir.path());
            }
            dir
        });
    }

    fn write_source(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Drop a file into the index dir; it only survives if the index is reused
    fn mark(index_path: &Path) -> PathBuf {
        let marker = index_path.join("marker");
        fs::write(&marker, b"").unwrap();
        marker
    }

    #[test]
    fn test_source_info() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("corpus.txt");
        fs::write(&path, b"mississippi").unwrap();

        let info = source_info(&path).unwrap();
        assert_eq!(info.path, path);
        assert_eq!(info.size, 11);
        assert!(info.modified > 0);
    }

    #[test]
    fn test_source_info_missing() {
        let temp_dir = tempdir().unwrap();
        assert!(source_info(&temp_dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_read_meta_absent() {
        let temp_dir = tempdir().unwrap();
        assert!(read_meta(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_open_index_missing() {
        isolated_data_home();
        let sources = tempdir().unwrap();
        let path = write_source(&sources, "unbuilt.txt", b"banana");

        let err = open_index(&path).err().unwrap();
        assert_eq!(err.to_string(), "No index found. Run 'sarx build' first.");
    }

    #[test]
    fn test_build_then_open() {
        isolated_data_home();
        let sources = tempdir().unwrap();
        let text = b"abracadabra";
        let path = write_source(&sources, "corpus.txt", text);

        build_index_with_progress(&path, &SuffixArrayConfig::default(), false, true).unwrap();
        let reader = open_index(&path).unwrap();
        let array = SuffixArray::new(text).unwrap();

        assert_eq!(reader.text(), text);
        assert_eq!(reader.meta().source.as_ref().map(|s| s.size), Some(11));
        for rank in 0..text.len() {
            assert_eq!(reader.order_at(rank), array.order_at(rank));
            assert_eq!(reader.lcp_at(rank), array.lcp_at(rank));
        }
        for i in 0..text.len() {
            for j in 0..text.len() {
                assert_eq!(reader.compare(i, j, 4), array.compare(i, j, 4));
                assert_eq!(
                    reader.longest_common_prefix(i, j),
                    array.longest_common_prefix(i, j)
                );
            }
        }
    }

    #[test]
    fn test_unchanged_index_reused() {
        isolated_data_home();
        let sources = tempdir().unwrap();
        let path = write_source(&sources, "reuse.txt", b"mississippi");
        let config = SuffixArrayConfig::default();

        let index_path = build_index_with_progress(&path, &config, false, true).unwrap();
        let marker = mark(&index_path);

        let again = build_index_with_progress(&path, &config, false, true).unwrap();
        assert_eq!(again, index_path);
        assert!(marker.exists());

        build_index_with_progress(&path, &config, true, true).unwrap();
        assert!(!marker.exists());
        assert!(open_index(&path).is_ok());
    }

    #[test]
    fn test_config_change_rebuilds() {
        isolated_data_home();
        let sources = tempdir().unwrap();
        let path = write_source(&sources, "config.txt", b"banana");

        let index_path =
            build_index_with_progress(&path, &SuffixArrayConfig::default(), false, true).unwrap();
        let marker = mark(&index_path);

        let rotations = SuffixArrayConfig {
            semantics: Semantics::Rotations,
            ..Default::default()
        };
        build_index_with_progress(&path, &rotations, false, true).unwrap();
        assert!(!marker.exists());
        assert_eq!(open_index(&path).unwrap().semantics(), Semantics::Rotations);
    }

    #[test]
    fn test_stale_index() {
        isolated_data_home();
        let sources = tempdir().unwrap();
        let path = write_source(&sources, "stale.txt", b"banana");
        let config = SuffixArrayConfig::default();
        let index_path = build_index_with_progress(&path, &config, false, true).unwrap();

        // A changed source still opens, serving the indexed text
        fs::write(&path, b"bananas and more").unwrap();
        let reader = open_index(&path).unwrap();
        assert_eq!(reader.text(), b"banana");
        drop(reader);

        // ...and the next build picks up the change
        let marker = mark(&index_path);
        build_index_with_progress(&path, &config, false, true).unwrap();
        assert!(!marker.exists());
        assert_eq!(open_index(&path).unwrap().text(), b"bananas and more");
    }

    #[test]
    fn test_failed_build_keeps_index() {
        isolated_data_home();
        let sources = tempdir().unwrap();
        let path = write_source(&sources, "truncated.txt", b"banana");
        let config = SuffixArrayConfig::default();
        build_index_with_progress(&path, &config, false, true).unwrap();

        fs::write(&path, b"").unwrap();
        assert!(build_index_with_progress(&path, &config, false, true).is_err());

        let reader = open_index(&path).unwrap();
        assert_eq!(reader.text(), b"banana");
    }
}
