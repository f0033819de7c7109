//! Storage implementations
//!
//! Filesystem-backed implementation of the `FileStore` trait, used by the
//! config layer to persist theme and connection settings.

use crate::traits::FileStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Standard filesystem implementation
///
/// Implements the FileStore trait using the standard library's `std::fs` module.
pub struct StdFileStore;

impl FileStore for StdFileStore {
    fn read(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content).with_context(|| format!("Failed to write to {:?}", path))
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path).with_context(|| format!("Failed to create directory {:?}", path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
