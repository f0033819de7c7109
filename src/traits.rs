//! Common trait definitions
//!
//! Seams for dependency injection and testing: file I/O for the config
//! layer and the account source behind the account cache. Production code
//! uses `StdFileStore` and `ApiClient`; tests supply their own doubles.

use crate::api::Account;
use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Trait for file system operations
///
/// Abstracts file I/O operations for dependency injection and testing.
/// Production code uses `StdFileStore`, tests can use mock implementations.
pub trait FileStore: Send + Sync {
    /// Read a whole file as UTF-8
    fn read(&self, path: &Path) -> Result<String>;

    /// Write content to a file
    fn write(&self, path: &Path, content: &str) -> Result<()>;

    /// Create directory
    fn create_dir_all(&self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Trait for loading the account list
///
/// The account cache only needs a way to fetch the full list; the HTTP
/// client implements it against `GET /api/accounts`.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Fetch every account visible to the current user
    async fn fetch_accounts(&self) -> Result<Vec<Account>>;
}
