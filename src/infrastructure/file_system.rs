use crate::core::{interfaces::FileSystemService, models::*};
use crate::utils::{Result, ShrinkError};
use std::path::Path;
use tokio::fs;

pub struct TokioFileSystemService;

#[async_trait::async_trait]
impl FileSystemService for TokioFileSystemService {
    async fn list_directory(&self, path: &Path) -> Result<Vec<TreeEntry>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(path)
            .await
            .map_err(|e| ShrinkError::fs(path, e))?;

        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| ShrinkError::fs(path, e))?
        {
            let entry_path = entry.path();

            // stat, not lstat: a symlink takes the kind of its target
            let metadata = fs::metadata(&entry_path)
                .await
                .map_err(|e| ShrinkError::fs(&entry_path, e))?;

            if metadata.is_dir() {
                entries.push(TreeEntry::directory(entry_path));
            } else {
                entries.push(TreeEntry::file(entry_path));
            }
        }

        entries.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
        Ok(entries)
    }

    async fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .map_err(|e| ShrinkError::fs(path, e))
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        fs::write(path, content)
            .await
            .map_err(|e| ShrinkError::fs(path, e))
    }

    async fn copy_file(&self, from: &Path, to: &Path) -> Result<u64> {
        match fs::copy(from, to).await {
            Ok(bytes) => Ok(bytes),
            // Blame the source only when it is the side that cannot be read
            Err(e) => match fs::metadata(from).await {
                Err(_) => Err(ShrinkError::fs(from, e)),
                Ok(_) => Err(ShrinkError::fs(to, e)),
            },
        }
    }

    async fn create_directory(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .await
            .map_err(|e| ShrinkError::fs(path, e))
    }

    async fn create_root(&self, path: &Path) -> Result<()> {
        fs::create_dir(path)
            .await
            .map_err(|e| ShrinkError::fs(path, e))
    }

    async fn exists(&self, path: &Path) -> bool {
        fs::try_exists(path).await.unwrap_or(false)
    }
}
