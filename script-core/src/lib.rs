//! TRPG branching-script engine.
//!
//! This crate is the core of a tabletop-RPG script editor:
//! - A story parser decoding `{event: {option: outcome}}` JSON documents
//! - A graph flattener turning the nested script into a flat flow graph,
//!   deduplicating repeated events and tagging every occurrence with a
//!   stable path id
//! - The parallel-array chart handoff consumed by an external flow renderer
//! - Document state with canonical upload/export serialization
//!
//! # Quick Start
//!
//! ```
//! use script_core::EditorSession;
//!
//! let mut session = EditorSession::new();
//! session
//!     .document_mut()
//!     .set_text(r#"{"起点": {"走左边": "生还", "走右边": "遇袭"}}"#);
//! let chart = session.preview()?;
//! assert_eq!(chart.events, ["起点", "生还", "遇袭"]);
//! # Ok::<(), script_core::SessionError>(())
//! ```

pub mod chart;
pub mod document;
pub mod flatten;
pub mod session;
pub mod story;
pub mod testing;

// Primary public API
pub use chart::ChartData;
pub use document::{Document, DocumentError, Export, EXPORT_FILE_NAME, EXPORT_MIME};
pub use flatten::{flatten, FlattenError, Link, StoryGraph};
pub use session::{EditorConfig, EditorSession, SessionError, FORMAT_ERROR_MESSAGE};
pub use story::{Branch, Outcome, StoryTree, SyntaxError};
