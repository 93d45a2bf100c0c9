//! Story document model and parser.
//!
//! A script is a JSON document shaped `{event: {option: outcome}}`, where an
//! outcome is either a terminal event name or a nested branch of the same
//! shape. Key order is significant throughout: it drives node seeding and
//! path-id assignment in the flattener, so every map preserves insertion
//! order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for text that does not decode into a script document.
///
/// Deliberately opaque beyond the underlying decode failure; user-facing
/// messaging is the caller's responsibility.
#[derive(Debug, Error)]
#[error("invalid document: {0}")]
pub struct SyntaxError(#[from] serde_json::Error);

/// The options leading out of one event, in document order.
pub type Branch = IndexMap<String, Outcome>;

/// What choosing an option leads to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    /// A new branch of the story, keyed by the event(s) it opens.
    Nested(StoryTree),
    /// A terminal event name: an ending, or a jump to an existing event.
    Terminal(String),
}

/// A branching script: ordered map from event name to that event's options.
///
/// Serializes transparently as the inner map, so the wire form is exactly
/// the `{event: {option: outcome}}` document shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoryTree(IndexMap<String, Branch>);

impl StoryTree {
    /// Create an empty story tree.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Decode a script document from JSON text.
    ///
    /// Pure function of the input. Any value that is not a mapping of
    /// mappings whose leaves are strings or further such mappings is
    /// rejected here, including empty input and a non-object top level.
    pub fn parse(text: &str) -> Result<Self, SyntaxError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize to the canonical document form: 4-space indent, non-ASCII
    /// characters left unescaped.
    pub fn to_canonical_json(&self) -> Result<String, serde_json::Error> {
        to_canonical_json(self)
    }

    /// Number of top-level events.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the tree has no top-level events.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level `(event, branch)` entries in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Branch)> {
        self.0.iter()
    }

    /// Look up a top-level event's branch.
    pub fn get(&self, event: &str) -> Option<&Branch> {
        self.0.get(event)
    }

    /// Insert a top-level event, replacing any existing branch of that name.
    pub fn insert(&mut self, event: impl Into<String>, branch: Branch) {
        self.0.insert(event.into(), branch);
    }
}

/// Canonical 4-space-indented JSON used for the editor buffer and exports.
pub(crate) fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    // The serializer only ever writes valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
