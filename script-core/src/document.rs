//! Document state: the script text the editing surface owns.
//!
//! The document is the one shared resource of the system. The editor writes
//! it, the preview pipeline only reads it, and every recomputation rebuilds
//! the story from the raw text. Uploads and exports always pass through the
//! canonical serialization so the buffer stays consistently formatted.

use crate::story::{StoryTree, SyntaxError};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// File name offered for a downloaded export.
pub const EXPORT_FILE_NAME: &str = "剧本.json";

/// Content type of a downloaded export.
pub const EXPORT_MIME: &str = "application/json";

/// Default script seeded into a fresh document, in canonical form.
const SAMPLE_SCRIPT: &str = r#"{
    "故事起点": {
        "选项 A": "结局 A",
        "选项 B": "结局 B",
        "选项 C": {
            "故事新分支": {
                "选项 E": "结局 C",
                "选项 F": "结局 A"
            }
        },
        "选项 D": {
            "故事新分支": {
                "选项 G": "结局 A",
                "选项 H": "结局 D"
            }
        }
    }
}"#;

/// Errors from document operations.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document syntax: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The current script document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            text: SAMPLE_SCRIPT.to_string(),
        }
    }
}

impl Document {
    /// Create a document from raw text, as-is.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw text of the document.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the raw text (editor keystroke handoff). No validation here;
    /// the next preview cycle reports any error.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Parse the current text into a story tree.
    pub fn parse(&self) -> Result<StoryTree, SyntaxError> {
        StoryTree::parse(&self.text)
    }

    /// Upload path: validate `content` and replace the current text with its
    /// canonical form. The document is untouched on failure.
    pub fn load_str(&mut self, content: &str) -> Result<(), DocumentError> {
        let tree = StoryTree::parse(content)?;
        self.text = tree.to_canonical_json()?;
        Ok(())
    }

    /// Upload from a file on disk.
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let content = fs::read_to_string(path).await?;
        self.load_str(&content)
    }

    /// Canonical serialization of the current document, with download
    /// metadata attached.
    pub fn export(&self) -> Result<Export, DocumentError> {
        let tree = self.parse()?;
        Ok(Export {
            file_name: EXPORT_FILE_NAME.to_string(),
            mime: EXPORT_MIME.to_string(),
            data: tree.to_canonical_json()?,
        })
    }

    /// Write the canonical export to a file on disk.
    pub async fn export_to(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let export = self.export()?;
        fs::write(path, export.data).await?;
        Ok(())
    }
}

/// A downloadable export of the current document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub mime: String,
    pub data: String,
}
