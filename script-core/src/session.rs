//! EditorSession — the primary public API of the engine.
//!
//! A session owns the current document and the editor widget settings, and
//! runs the preview pipeline: parse the raw text, flatten the story, project
//! the chart data. Every cycle recomputes from scratch; a failure anywhere
//! aborts the cycle and leaves the document untouched for the user to fix.

use crate::chart::ChartData;
use crate::document::{Document, DocumentError, Export};
use crate::flatten::{flatten, FlattenError};
use crate::story::SyntaxError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Generic message shown to the user for any failed preview cycle.
pub const FORMAT_ERROR_MESSAGE: &str = "格式错误，请对照下方说明和编辑器提示修正";

/// Errors from session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The raw text is not valid structured data.
    #[error("document syntax: {0}")]
    Syntax(#[from] SyntaxError),

    /// The document parsed but does not match the story shape.
    #[error("story shape: {0}")]
    Shape(#[from] FlattenError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl SessionError {
    /// The user-facing message for this error. Intentionally generic: the
    /// editor's own gutter hints carry the detail.
    pub fn user_message(&self) -> &'static str {
        FORMAT_ERROR_MESSAGE
    }
}

/// Editor widget settings.
///
/// Plain data consumed by the external editing surface; the engine never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Color theme name.
    pub theme: String,
    /// Keybinding scheme name.
    pub keybinding: String,
    /// Font size in points.
    pub font_size: u8,
    /// Indent width in spaces.
    pub tab_size: u8,
    /// Soft-wrap long lines.
    pub wrap: bool,
    /// Show the line-number gutter.
    pub show_gutter: bool,
    /// Minimum editor height in lines.
    pub min_lines: u16,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            theme: "monokai".to_string(),
            keybinding: "vscode".to_string(),
            font_size: 16,
            tab_size: 4,
            wrap: true,
            show_gutter: true,
            min_lines: 24,
        }
    }
}

impl EditorConfig {
    /// Set the color theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Set the keybinding scheme.
    pub fn with_keybinding(mut self, keybinding: impl Into<String>) -> Self {
        self.keybinding = keybinding.into();
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: u8) -> Self {
        self.font_size = size;
        self
    }

    /// Enable or disable soft wrapping.
    pub fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Show or hide the line-number gutter.
    pub fn with_show_gutter(mut self, show: bool) -> Self {
        self.show_gutter = show;
        self
    }
}

/// An editing session: the current document plus editor settings.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    document: Document,
    config: EditorConfig,
}

impl EditorSession {
    /// Create a session seeded with the default sample script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session with custom editor settings.
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::default(),
            config,
        }
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for the editing surface.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// The editor settings.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Mutable access to the editor settings.
    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    /// Run one full preview cycle over the current text.
    ///
    /// Parse, flatten, and project the chart data, rebuilt from scratch.
    /// Any failure aborts the cycle; nothing is rendered from a bad
    /// document.
    pub fn preview(&self) -> Result<ChartData, SessionError> {
        let tree = self.document.parse()?;
        let graph = flatten(&tree)?;
        Ok(graph.chart_data())
    }

    /// Upload: replace the document with the canonical form of `content`.
    pub fn load_str(&mut self, content: &str) -> Result<(), SessionError> {
        self.document.load_str(content)?;
        Ok(())
    }

    /// Upload from a file on disk.
    pub async fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        self.document.load_file(path).await?;
        Ok(())
    }

    /// Export the current document for download.
    pub fn export(&self) -> Result<Export, SessionError> {
        Ok(self.document.export()?)
    }

    /// Export the current document to a file on disk.
    pub async fn export_to(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        self.document.export_to(path).await?;
        Ok(())
    }
}
