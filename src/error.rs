//! Error types for content loading and rendering

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ContentError`
pub type Result<T> = std::result::Result<T, ContentError>;

/// Errors raised by the content store and the markup transformer
#[derive(Error, Debug)]
pub enum ContentError {
    /// No document backs the requested slug
    #[error("post not found: {slug}")]
    NotFound { slug: String },

    /// The header block could not be read as key-value data
    #[error("malformed header in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// The body could not be turned into markup
    #[error("render error at line {line}: {message}")]
    Render { line: usize, message: String },

    /// File system I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ContentError {
    pub fn not_found(slug: impl Into<String>) -> Self {
        Self::NotFound { slug: slug.into() }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn render(line: usize, message: impl Into<String>) -> Self {
        Self::Render {
            line,
            message: message.into(),
        }
    }

    /// Whether the caller should answer with a "not found" page
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
