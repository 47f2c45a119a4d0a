use crate::index::suffix_array::types::SuffixArrayConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "sarx";
const CONFIG_FILE: &str = "config.json";

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Defaults for `sarx build`; command-line flags override them
    #[serde(default)]
    pub build: SuffixArrayConfig,

    /// Rows printed by `sarx show` when no limit is given
    #[serde(default = "default_show_limit")]
    pub show_limit: usize,

    /// Bytes of each suffix printed by `sarx show`
    #[serde(default = "default_preview_width")]
    pub preview_width: usize,
}

fn default_show_limit() -> usize {
    50
}

fn default_preview_width() -> usize {
    40
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            build: SuffixArrayConfig::default(),
            show_limit: default_show_limit(),
            preview_width: default_preview_width(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let config_path = get_config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: AppConfig = serde_json::from_str(&content)
                .context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the app data directory
    pub fn save(&self) -> Result<()> {
        let config_path = get_config_path()?;
        let content = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        fs::write(&config_path, content)
            .context("Failed to write config file")?;
        Ok(())
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    Ok(app_dir.join(CONFIG_FILE))
}

/// Get the application data directory for storing indexes
pub fn get_app_data_dir() -> Result<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir()
            .map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_DATA_HOME or ~/.local/share
        dirs::data_dir()
    };

    let base = base.context("Could not determine app data directory")?;
    let app_dir = base.join(APP_NAME);

    fs::create_dir_all(&app_dir)?;
    Ok(app_dir)
}

/// Get the index directory for a specific source file
pub fn get_index_dir(source_path: &Path) -> Result<PathBuf> {
    let app_data = get_app_data_dir()?;
    let indexes_dir = app_data.join("indexes");
    fs::create_dir_all(&indexes_dir)?;

    Ok(indexes_dir.join(hash_path(source_path)))
}

/// Hash a path to create a unique folder name
/// Format: first 16 chars of file name + hash
fn hash_path(path: &Path) -> String {
    let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let path_str = canonical.to_string_lossy();

    // Get file name for readability
    let file_name = canonical
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    // Sanitize file name (remove special chars, truncate)
    let sanitized: String = file_name
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(16)
        .collect();

    // Hash the full path
    let mut hasher = DefaultHasher::new();
    path_str.hash(&mut hasher);
    let hash = hasher.finish();

    format!("{}-{:016x}", sanitized, hash)
}

/// List all indexed source files
pub fn list_indexed_sources() -> Result<Vec<IndexLocation>> {
    let app_data = get_app_data_dir()?;
    let indexes_dir = app_data.join("indexes");

    if !indexes_dir.exists() {
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();

    for entry in fs::read_dir(&indexes_dir)? {
        let path = entry?.path();
        let meta_path = path.join("meta.json");
        if !path.is_dir() || !meta_path.exists() {
            continue;
        }

        // Read the meta.json to get the source path
        let Ok(file) = fs::File::open(&meta_path) else {
            continue;
        };
        if let Ok(meta) = serde_json::from_reader::<_, serde_json::Value>(file) {
            if let Some(source) = meta
                .get("source")
                .and_then(|s| s.get("path"))
                .and_then(|v| v.as_str())
            {
                sources.push(IndexLocation {
                    source_path: PathBuf::from(source),
                    index_dir: path,
                });
            }
        }
    }

    sources.sort_by(|a, b| a.source_path.cmp(&b.source_path));
    Ok(sources)
}

/// Remove the index for a source file
pub fn remove_index(source_path: &Path) -> Result<bool> {
    let index_dir = get_index_dir(source_path)?;
    if index_dir.exists() {
        fs::remove_dir_all(&index_dir)?;
        return Ok(true);
    }
    Ok(false)
}

/// Information about an indexed source file
#[derive(Debug, Clone)]
pub struct IndexLocation {
    pub source_path: PathBuf,
    pub index_dir: PathBuf,
}
