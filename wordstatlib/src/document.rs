//! Documents as seen by the statistics calculator.

use std::fs;
use std::path::Path;

use crate::error::WordstatError;
use crate::Result;

/// The kind of a document, decided from its file extension.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// `.md`, `.markdown`
    Markdown,
    /// `.txt`, `.text`
    PlainText,
    /// Anything else (canvas files, images, PDFs, ...)
    Other,
}

impl DocumentKind {
    /// Determine the kind from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        match ext.as_deref() {
            Some("md") | Some("markdown") => Self::Markdown,
            Some("txt") | Some("text") => Self::PlainText,
            _ => Self::Other,
        }
    }

    /// Only markdown and plain-text documents are counted.
    pub fn is_countable(self) -> bool {
        matches!(self, Self::Markdown | Self::PlainText)
    }
}

/// The content of the active document at one point in time.
///
/// A fresh snapshot is taken for every recompute; snapshots are never
/// updated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// Full text of the document
    pub raw_text: String,
    /// Whether the document is of a kind that gets counted
    pub is_countable: bool,
}

impl DocumentSnapshot {
    /// A countable document with the given text.
    pub fn countable(text: impl Into<String>) -> Self {
        Self {
            raw_text: text.into(),
            is_countable: true,
        }
    }

    /// The snapshot for "no document" or a document of the wrong kind.
    pub fn not_countable() -> Self {
        Self::default()
    }

    /// A snapshot whose countability follows `kind`.
    pub fn with_kind(text: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            raw_text: text.into(),
            is_countable: kind.is_countable(),
        }
    }

    /// Read a document from disk.
    ///
    /// Files of a non-countable kind are not read at all.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let kind = DocumentKind::from_path(path);
        if !kind.is_countable() {
            return Ok(Self::not_countable());
        }

        let raw_text = fs::read_to_string(path).map_err(|e| WordstatError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self {
            raw_text,
            is_countable: true,
        })
    }
}
