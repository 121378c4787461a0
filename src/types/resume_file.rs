// src/types/resume_file.rs
//! A resume file selected by the user, held in memory until it is parsed.

use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
}

impl ResumeFormat {
    /// Derive the declared format from a file name's extension.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match get_file_extension(file_name).as_deref() {
            Some("pdf") => Some(Self::Pdf),
            Some("docx") => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => super::results::DOCX_CONTENT_TYPE,
        }
    }
}

impl fmt::Display for ResumeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Docx => write!(f, "DOCX"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("Unsupported resume format: {0}. Use a .pdf or .docx file")]
    UnsupportedFormat(String),

    #[error("Failed to read resume file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub format: ResumeFormat,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, SelectionError> {
        let file_name = file_name.into();
        let format = ResumeFormat::from_file_name(&file_name)
            .ok_or_else(|| SelectionError::UnsupportedFormat(file_name.clone()))?;

        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    pub async fn from_path(path: &Path) -> Result<Self, SelectionError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        // Extension is checked before the file is read
        if ResumeFormat::from_file_name(&file_name).is_none() {
            return Err(SelectionError::UnsupportedFormat(file_name));
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| SelectionError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Self::new(file_name, bytes)
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
