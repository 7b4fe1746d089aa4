//! Tree assembly from a resolved script graph
//!
//! The graph may contain cycles (`"a": "npm run b"`, `"b": "npm run a"`). The tree is
//! materialized by walking names from each top-level entry while tracking the
//! current path: a child already on the path becomes a cycle marker leaf, and
//! nesting is capped at [`MAX_DEPTH`]. Shared sub-graphs are expanded again under
//! every parent, so the total number of nodes is capped at [`MAX_NODES`].

use log::warn;
use serde::Serialize;

use crate::scripts::entry::ScriptEntry;
use crate::scripts::graph::ScriptGraph;
use crate::scripts::prune;

/// Deepest nesting materialized below a top-level script
pub const MAX_DEPTH: usize = 64;

/// Most script nodes materialized in one tree
pub const MAX_NODES: usize = 10_000;

/// A labelled node with ordered children, as consumed by a tree renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub label: String,
    pub nodes: Vec<TreeNode>,
}

impl TreeNode {
    #[must_use]
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            nodes: Vec::new(),
        }
    }
}

/// Root label text for `count` top-level scripts
#[must_use]
pub fn count_label(count: usize) -> String {
    if count == 1 {
        "1 script".to_string()
    } else {
        format!("{count} scripts")
    }
}

/// Produces the labels of a tree. The defaults are plain text.
pub trait Labeler {
    fn root(&self, count: usize) -> String {
        count_label(count)
    }

    fn script(&self, entry: &ScriptEntry) -> String {
        entry.label.clone()
    }

    fn cycle(&self, name: &str) -> String {
        format!("{name} ↻ (cycle)")
    }

    fn truncated(&self, name: &str) -> String {
        format!("{name} …")
    }
}

/// Undecorated labels
pub struct PlainLabels;

impl Labeler for PlainLabels {}

/// Names on the current root-to-node path and the count of expanded scripts
#[derive(Default)]
struct Walk<'a> {
    path: Vec<&'a str>,
    expanded: usize,
    over_budget: bool,
}

pub struct TreeBuilder<'a> {
    graph: &'a ScriptGraph,
    labeler: &'a dyn Labeler,
    alpha: bool,
    prune: bool,
}

impl<'a> TreeBuilder<'a> {
    #[must_use]
    pub fn new(graph: &'a ScriptGraph) -> Self {
        Self {
            graph,
            labeler: &PlainLabels,
            alpha: false,
            prune: false,
        }
    }

    /// Sort top-level scripts by name instead of declaration order
    #[must_use]
    pub fn alpha(mut self, alpha: bool) -> Self {
        self.alpha = alpha;
        self
    }

    /// Hide hooks and namespaced sub-scripts from the top level
    #[must_use]
    pub fn prune(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    #[must_use]
    pub fn labeler(mut self, labeler: &'a dyn Labeler) -> Self {
        self.labeler = labeler;
        self
    }

    #[must_use]
    pub fn build(&self) -> TreeNode {
        let mut top: Vec<&ScriptEntry> = if self.prune {
            prune::prune(self.graph.entries())
        } else {
            self.graph.entries().collect()
        };
        if self.alpha {
            top.sort_by(|a, b| a.name.cmp(&b.name));
        }

        let mut walk = Walk::default();
        let nodes: Vec<TreeNode> = top
            .into_iter()
            .map(|entry| self.node(entry, &mut walk))
            .collect();
        if walk.over_budget {
            warn!("Tree truncated after {MAX_NODES} nodes");
        }
        TreeNode {
            label: self.labeler.root(nodes.len()),
            nodes,
        }
    }

    fn node(&self, entry: &'a ScriptEntry, walk: &mut Walk<'a>) -> TreeNode {
        walk.path.push(&entry.name);
        walk.expanded += 1;
        let mut nodes = Vec::with_capacity(entry.nodes.len());
        for child in entry.nodes.iter().filter_map(|name| self.graph.get(name)) {
            if walk.path.contains(&child.name.as_str()) {
                nodes.push(TreeNode::leaf(self.labeler.cycle(&child.name)));
            } else if walk.path.len() >= MAX_DEPTH {
                nodes.push(TreeNode::leaf(self.labeler.truncated(&child.name)));
            } else if walk.expanded >= MAX_NODES {
                walk.over_budget = true;
                nodes.push(TreeNode::leaf(self.labeler.truncated(&child.name)));
            } else {
                nodes.push(self.node(child, walk));
            }
        }
        walk.path.pop();
        TreeNode {
            label: self.labeler.script(entry),
            nodes,
        }
    }
}
