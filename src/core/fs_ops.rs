// src/core/fs_ops.rs
//! File system helpers for loading inputs and saving results.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::types::DocumentArtifact;

pub struct FsOps;

impl FsOps {
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            app_log!(info, "Created directory: {}", path.display());
        }
        Ok(())
    }

    pub async fn read_file_safe(path: &Path) -> Result<String> {
        fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub async fn write_file_safe(path: &Path, content: &str) -> Result<()> {
        Self::write_bytes(path, content.as_bytes()).await
    }

    pub async fn write_bytes(path: &Path, content: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir_exists(parent).await?;
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        app_log!(info, "Written file: {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    /// Save a rendered document. A directory target gets the artifact's own file name.
    pub async fn save_artifact(artifact: &DocumentArtifact, target: &Path) -> Result<PathBuf> {
        let path = if target.is_dir() {
            target.join(&artifact.file_name)
        } else {
            target.to_path_buf()
        };

        Self::write_bytes(&path, &artifact.bytes).await?;
        Ok(path)
    }

}
