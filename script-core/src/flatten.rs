//! Tree-to-graph flattening.
//!
//! Walks a parsed [`StoryTree`] and produces the flat graph model the chart
//! layer consumes:
//! - `events`: distinct event/ending names in first-seen order
//! - `labels`: per event, the path ids of every tree occurrence of it
//! - `links`: option-annotated edges in traversal order
//!
//! The same event name may occur at several places in the tree (a branch can
//! jump back to an earlier event). Path ids exist to tell those occurrences
//! apart: top-level events get letter ids by position, descendants append a
//! branch-local index per nesting step, and terminal occurrences append
//! `-end`.

use crate::story::{Branch, Outcome, StoryTree};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from graph flattening.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FlattenError {
    /// The document decoded, but its top level has no events to walk.
    #[error("story has no top-level events")]
    EmptyRoot,
}

/// One option edge of the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Event the option hangs off.
    pub source: String,
    /// Option text displayed on the edge.
    pub option: String,
    /// Event or ending the option leads to.
    pub target: String,
}

impl Link {
    fn new(source: &str, option: &str, target: &str) -> Self {
        Self {
            source: source.to_string(),
            option: option.to_string(),
            target: target.to_string(),
        }
    }
}

/// The flattened story graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoryGraph {
    /// Distinct event and ending names, in first-seen order.
    pub events: Vec<String>,
    /// For each entry of `events` (same index), the path ids of all tree
    /// occurrences that resolved to that name. Never empty.
    pub labels: Vec<Vec<String>>,
    /// One edge per option, in traversal order.
    pub links: Vec<Link>,
}

impl StoryGraph {
    /// Index of an event name, if registered.
    pub fn event_index(&self, name: &str) -> Option<usize> {
        self.events.iter().position(|event| event == name)
    }

    /// Sorted, comma-joined path ids per event: the chart node labels.
    pub fn slugs(&self) -> Vec<String> {
        self.labels
            .iter()
            .map(|ids| {
                let mut ids = ids.clone();
                ids.sort();
                ids.join(",")
            })
            .collect()
    }

    /// Record one occurrence of `name` under `path_id`, registering the
    /// event on first sight.
    fn register(&mut self, name: &str, path_id: String) {
        match self.event_index(name) {
            Some(idx) => self.labels[idx].push(path_id),
            None => {
                self.events.push(name.to_string());
                self.labels.push(vec![path_id]);
            }
        }
    }
}

/// A pending visit during the tree walk.
struct TreeNode<'a> {
    name: &'a str,
    children: &'a Branch,
    path_id: String,
}

/// Flatten a story tree into its graph model.
///
/// The walk is an explicit LIFO stack seeded with the top-level events in
/// document order, so visit order is depth-first with the last sibling
/// first. That ordering shapes `events` and `links` and is part of the
/// output contract, not an implementation accident.
pub fn flatten(tree: &StoryTree) -> Result<StoryGraph, FlattenError> {
    if tree.is_empty() {
        return Err(FlattenError::EmptyRoot);
    }

    let mut stack: Vec<TreeNode> = tree
        .iter()
        .enumerate()
        .map(|(idx, (event, children))| TreeNode {
            name: event,
            children,
            path_id: top_level_id(idx),
        })
        .collect();

    let mut graph = StoryGraph::default();
    while let Some(node) = stack.pop() {
        graph.register(node.name, node.path_id.clone());

        // Offset keeping child indices distinct across this node's nested
        // branches.
        let mut branch_offset = 0;
        for (option, outcome) in node.children {
            match outcome {
                Outcome::Nested(subtree) => {
                    for (idx, (sub_event, sub_children)) in subtree.iter().enumerate() {
                        graph.links.push(Link::new(node.name, option, sub_event));
                        stack.push(TreeNode {
                            name: sub_event,
                            children: sub_children,
                            path_id: format!("{}-{}", node.path_id, idx + branch_offset),
                        });
                    }
                    branch_offset += subtree.len();
                }
                Outcome::Terminal(target) => {
                    graph.links.push(Link::new(node.name, option, target));
                    graph.register(target, format!("{}-end", node.path_id));
                }
            }
        }
    }

    Ok(graph)
}

/// Path id for the `idx`-th top-level event: `A`..`Z`, then `AA`, `AB`, …
/// (spreadsheet column style), so the scheme is not capped at 26 events.
fn top_level_id(mut idx: usize) -> String {
    let mut id = String::new();
    loop {
        id.insert(0, (b'A' + (idx % 26) as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::StoryTree;
    use crate::testing::sample_tree;

    fn parse(text: &str) -> StoryTree {
        StoryTree::parse(text).unwrap()
    }

    #[test]
    fn test_flat_story() {
        let graph = flatten(&parse(r#"{"S": {"A": "E1", "B": "E2"}}"#)).unwrap();
        assert_eq!(graph.events, ["S", "E1", "E2"]);
        assert_eq!(
            graph.labels,
            [vec!["A".to_string()], vec!["A-end".to_string()], vec!["A-end".to_string()]]
        );
        assert_eq!(
            graph.links,
            [Link::new("S", "A", "E1"), Link::new("S", "B", "E2")]
        );
    }

    #[test]
    fn test_nested_story() {
        let graph =
            flatten(&parse(r#"{"S": {"A": {"T": {"C": "E1"}}, "B": "E2"}}"#)).unwrap();
        for name in ["S", "T", "E1", "E2"] {
            assert_eq!(
                graph.events.iter().filter(|event| *event == name).count(),
                1,
                "{name} should appear exactly once"
            );
        }
        for link in [
            Link::new("S", "A", "T"),
            Link::new("T", "C", "E1"),
            Link::new("S", "B", "E2"),
        ] {
            assert!(graph.links.contains(&link), "missing {link:?}");
        }
    }

    #[test]
    fn test_recurring_event_collects_path_ids() {
        // "S" reappears as a nested branch target; both occurrences land on
        // one node with two distinct path ids.
        let graph = flatten(&parse(r#"{"S": {"A": {"S": {"B": "E1"}}}}"#)).unwrap();
        assert_eq!(graph.events, ["S", "E1"]);
        assert_eq!(graph.labels[0], ["A", "A-0"]);
    }

    #[test]
    fn test_empty_root_fails() {
        assert_eq!(flatten(&StoryTree::new()), Err(FlattenError::EmptyRoot));
    }

    #[test]
    fn test_nested_path_ids_accumulate_across_sibling_branches() {
        // Two nested branches under one parent: the second branch's child
        // indices continue where the first left off, so path ids stay
        // distinct.
        let graph = flatten(&parse(
            r#"{"S": {"A": {"T1": {"C": "E1"}}, "B": {"T2": {"D": "E2"}}}}"#,
        ))
        .unwrap();
        let t1 = graph.event_index("T1").unwrap();
        let t2 = graph.event_index("T2").unwrap();
        assert_eq!(graph.labels[t1], ["A-0"]);
        assert_eq!(graph.labels[t2], ["A-1"]);
    }

    #[test]
    fn test_terminal_path_ids_follow_parent_depth() {
        let graph = flatten(&parse(r#"{"S": {"A": {"T": {"C": "E1"}}}}"#)).unwrap();
        let e1 = graph.event_index("E1").unwrap();
        assert_eq!(graph.labels[e1], ["A-0-end"]);
    }

    #[test]
    fn test_lifo_visit_order() {
        // Two top-level events: the second is popped (and registered) first.
        let graph = flatten(&parse(r#"{"S1": {"A": "E1"}, "S2": {"B": "E2"}}"#)).unwrap();
        assert_eq!(graph.events, ["S2", "E2", "S1", "E1"]);
        let s1 = graph.event_index("S1").unwrap();
        let s2 = graph.event_index("S2").unwrap();
        assert_eq!(graph.labels[s1], ["A"]);
        assert_eq!(graph.labels[s2], ["B"]);
    }

    #[test]
    fn test_links_closed_over_events() {
        let graph = flatten(&sample_tree()).unwrap();
        for link in &graph.links {
            assert!(graph.event_index(&link.source).is_some(), "orphan source in {link:?}");
            assert!(graph.event_index(&link.target).is_some(), "orphan target in {link:?}");
        }
    }

    #[test]
    fn test_no_orphan_labels() {
        let graph = flatten(&sample_tree()).unwrap();
        assert_eq!(graph.events.len(), graph.labels.len());
        assert!(graph.labels.iter().all(|ids| !ids.is_empty()));
    }

    #[test]
    fn test_deterministic() {
        let tree = sample_tree();
        assert_eq!(flatten(&tree).unwrap(), flatten(&tree).unwrap());
    }

    #[test]
    fn test_sample_tree_shared_ending() {
        // 结局 A is reachable from three places in the sample script; it is
        // one node with three occurrence labels.
        let graph = flatten(&sample_tree()).unwrap();
        let idx = graph.event_index("结局 A").unwrap();
        assert_eq!(graph.labels[idx].len(), 3);
    }

    #[test]
    fn test_slugs_sorted_and_joined() {
        let graph = flatten(&parse(r#"{"S": {"A": {"S": {"B": "E1"}}}}"#)).unwrap();
        assert_eq!(graph.slugs()[0], "A,A-0");
    }

    #[test]
    fn test_top_level_id_alphabet() {
        assert_eq!(top_level_id(0), "A");
        assert_eq!(top_level_id(25), "Z");
        assert_eq!(top_level_id(26), "AA");
        assert_eq!(top_level_id(27), "AB");
        assert_eq!(top_level_id(51), "AZ");
        assert_eq!(top_level_id(52), "BA");
        assert_eq!(top_level_id(701), "ZZ");
        assert_eq!(top_level_id(702), "AAA");
    }

    #[test]
    fn test_more_than_26_top_level_events() {
        let mut tree = StoryTree::new();
        for i in 0..30 {
            let mut branch = Branch::new();
            branch.insert("option".to_string(), Outcome::Terminal(format!("end {i}")));
            tree.insert(format!("event {i}"), branch);
        }
        let graph = flatten(&tree).unwrap();
        let first = graph.event_index("event 26").unwrap();
        assert_eq!(graph.labels[first], ["AA"]);
    }
}
