//! Utility functions shared by the index and the CLI.
//!
//! ## Modules
//!
//! - [`app_data`] - Application data directory and config (XDG-compliant)
//! - [`encoding`] - Little-endian integer encoding for index files
//! - [`progress`] - Progress bars, no-op without the `progress` feature

pub mod app_data;
pub mod encoding;
pub mod progress;

pub use app_data::*;
pub use encoding::*;
