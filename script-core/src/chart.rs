//! Handoff to the external flow-chart renderer.
//!
//! The renderer wants parallel arrays: edge endpoints as indices into the
//! node list, a weight per edge, and display strings for nodes and edges.
//! Nothing here knows how the chart is laid out or drawn.

use crate::flatten::StoryGraph;
use serde::{Deserialize, Serialize};

/// Parallel-array form of a [`StoryGraph`] for the chart renderer.
///
/// `sources[i]` and `targets[i]` index into `events`; `values` weights every
/// edge equally. `slugs` are the node display labels, `events` the node
/// hover text, and `options[i]` the hover text of edge `i`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartData {
    pub events: Vec<String>,
    pub slugs: Vec<String>,
    pub sources: Vec<usize>,
    pub targets: Vec<usize>,
    pub values: Vec<u32>,
    pub options: Vec<String>,
}

impl StoryGraph {
    /// Project the graph into the renderer's parallel-array form.
    pub fn chart_data(&self) -> ChartData {
        let mut sources = Vec::with_capacity(self.links.len());
        let mut targets = Vec::with_capacity(self.links.len());
        let mut options = Vec::with_capacity(self.links.len());
        for link in &self.links {
            // Flattening registers both endpoints of every link; an
            // unregistered name here would be a bug, so skip rather than
            // panic.
            let (Some(source), Some(target)) = (
                self.event_index(&link.source),
                self.event_index(&link.target),
            ) else {
                continue;
            };
            sources.push(source);
            targets.push(target);
            options.push(link.option.clone());
        }
        let values = vec![1; options.len()];
        ChartData {
            events: self.events.clone(),
            slugs: self.slugs(),
            sources,
            targets,
            values,
            options,
        }
    }
}
