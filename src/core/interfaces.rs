use crate::core::models::*;
use crate::utils::Result;
use async_trait::async_trait;
use std::path::Path;

/// File system operations interface
#[async_trait]
pub trait FileSystemService: Send + Sync {
    /// Immediate children of `path`, sorted by file name
    async fn list_directory(&self, path: &Path) -> Result<Vec<TreeEntry>>;
    async fn read_file(&self, path: &Path) -> Result<String>;
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;
    /// Byte-for-byte copy; returns the number of bytes written
    async fn copy_file(&self, from: &Path, to: &Path) -> Result<u64>;
    /// Create `path` and any missing parents
    async fn create_directory(&self, path: &Path) -> Result<()>;
    /// Create `path` only; its parent must already exist
    async fn create_root(&self, path: &Path) -> Result<()>;
    async fn exists(&self, path: &Path) -> bool;
}

/// HTML minification interface
#[async_trait]
pub trait HtmlProcessor: Send + Sync {
    async fn process_html(&self, content: &str, path: &Path) -> Result<String>;
}

/// CSS minification interface
#[async_trait]
pub trait CssProcessor: Send + Sync {
    async fn process_css(&self, content: &str, path: &Path) -> Result<String>;
}

/// JavaScript minification interface
#[async_trait]
pub trait JsProcessor: Send + Sync {
    async fn process_js(&self, content: &str, path: &Path) -> Result<String>;
}

/// Build service interface
#[async_trait]
pub trait BuildService: Send + Sync {
    async fn build(&self, config: &BuildConfig) -> Result<BuildResult>;
}
