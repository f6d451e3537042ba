//! Indented tree views.
//!
//! A tree is a flat list of `(level, value)` nodes in depth-first order. The
//! first node is at level 0 and each node is at most one level deeper than
//! the node before it.
//!
//! ```rust
//! use glance_render::tree::{render_tree, TreeNode, TreeOptions, TreeStyle};
//!
//! let nodes = vec![
//!     TreeNode::new(0, "src"),
//!     TreeNode::new(1, "lib.rs"),
//!     TreeNode::new(1, "tree.rs"),
//! ];
//! let output = render_tree(&nodes, &TreeOptions::new().style(TreeStyle::Directory)).unwrap();
//!
//! assert_eq!(output, "src\n|-- lib.rs\n`-- tree.rs");
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TreeError;
use crate::tabular::stringify;

/// Default spaces per level for basic and numbered trees.
pub const DEFAULT_INDENT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStyle {
    /// Plain indentation.
    #[default]
    Basic,
    /// Indentation plus a per-level counter: `1. `, `2. `, ...
    Number,
    /// `|-- ` branches, like the `tree` command.
    Directory,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeOptions {
    pub style: TreeStyle,
    pub indent: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        TreeOptions {
            style: TreeStyle::Basic,
            indent: DEFAULT_INDENT,
        }
    }
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// One node of a tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub level: usize,
    pub value: String,
}

impl TreeNode {
    pub fn new(level: usize, value: impl Into<String>) -> Self {
        TreeNode {
            level,
            value: value.into(),
        }
    }
}

/// Reads nodes from a JSON list of `[level, value]` pairs or
/// `{"level": .., "value": ..}` objects.
pub fn nodes_from_value(value: &Value) -> Result<Vec<TreeNode>, TreeError> {
    let items = value.as_array().ok_or(TreeError::NotAList)?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let (level, value) = match item {
                Value::Array(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
                Value::Object(map) => match (map.get("level"), map.get("value")) {
                    (Some(level), Some(value)) => (level, value),
                    _ => return Err(TreeError::InvalidNode { index }),
                },
                _ => return Err(TreeError::InvalidNode { index }),
            };
            let level = level
                .as_u64()
                .ok_or(TreeError::InvalidNode { index })? as usize;
            Ok(TreeNode::new(level, stringify(value)))
        })
        .collect()
}

fn validate(nodes: &[TreeNode]) -> Result<(), TreeError> {
    let mut max_level = 0;
    for (index, node) in nodes.iter().enumerate() {
        if node.level > max_level {
            return Err(TreeError::ParentlessNode {
                index,
                level: node.level,
            });
        }
        max_level = node.level + 1;
    }
    Ok(())
}

/// Renders nodes as a tree. An empty node list renders as an empty string.
pub fn render_tree(nodes: &[TreeNode], options: &TreeOptions) -> Result<String, TreeError> {
    validate(nodes)?;
    let lines = match options.style {
        TreeStyle::Basic => nodes
            .iter()
            .map(|node| format!("{}{}", " ".repeat(options.indent * node.level), node.value))
            .collect(),
        TreeStyle::Number => number_lines(nodes, options.indent),
        TreeStyle::Directory => directory_lines(nodes),
    };
    Ok(lines.join("\n"))
}

fn number_lines(nodes: &[TreeNode], indent: usize) -> Vec<String> {
    let mut counters: Vec<usize> = Vec::new();
    nodes
        .iter()
        .map(|node| {
            counters.truncate(node.level + 1);
            if counters.len() <= node.level {
                counters.push(0);
            }
            counters[node.level] += 1;
            format!(
                "{}{}. {}",
                " ".repeat(indent * node.level),
                counters[node.level],
                node.value
            )
        })
        .collect()
}

// Whether a later node shares this node's parent.
fn has_next_sibling(nodes: &[TreeNode], index: usize) -> bool {
    let level = nodes[index].level;
    nodes[index + 1..]
        .iter()
        .find(|node| node.level <= level)
        .is_some_and(|node| node.level == level)
}

fn directory_lines(nodes: &[TreeNode]) -> Vec<String> {
    // ancestors[k] is the index of the open node at level k
    let mut ancestors: Vec<usize> = Vec::new();
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| {
            ancestors.truncate(node.level);
            let mut line = String::new();
            if node.level > 0 {
                for &ancestor in ancestors.iter().skip(1) {
                    line.push_str(if has_next_sibling(nodes, ancestor) {
                        "|   "
                    } else {
                        "    "
                    });
                }
                line.push_str(if has_next_sibling(nodes, index) {
                    "|-- "
                } else {
                    "`-- "
                });
            }
            line.push_str(&node.value);
            ancestors.push(index);
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<TreeNode> {
        vec![
            TreeNode::new(0, "a"),
            TreeNode::new(1, "b"),
            TreeNode::new(2, "c"),
            TreeNode::new(1, "d"),
        ]
    }

    #[test]
    fn basic_indents_by_level() {
        let out = render_tree(&sample(), &TreeOptions::new().indent(2)).unwrap();
        assert_eq!(out, "a\n  b\n    c\n  d");
    }

    #[test]
    fn numbered_counters_restart_per_parent() {
        let mut nodes = sample();
        nodes.push(TreeNode::new(2, "e"));
        nodes.push(TreeNode::new(0, "f"));
        let out = render_tree(&nodes, &TreeOptions::new().style(TreeStyle::Number)).unwrap();
        assert_eq!(
            out,
            "1. a\n    1. b\n        1. c\n    2. d\n        1. e\n2. f"
        );
    }

    #[test]
    fn directory_branches() {
        let out = render_tree(&sample(), &TreeOptions::new().style(TreeStyle::Directory)).unwrap();
        assert_eq!(out, "a\n|-- b\n|   `-- c\n`-- d");
    }

    #[test]
    fn directory_closed_branch_leaves_blank_column() {
        let nodes = vec![
            TreeNode::new(0, "root"),
            TreeNode::new(1, "x"),
            TreeNode::new(1, "y"),
            TreeNode::new(2, "z"),
        ];
        let out = render_tree(&nodes, &TreeOptions::new().style(TreeStyle::Directory)).unwrap();
        assert_eq!(out, "root\n|-- x\n`-- y\n    `-- z");
    }

    #[test]
    fn level_jump_is_rejected() {
        let nodes = vec![TreeNode::new(0, "a"), TreeNode::new(2, "b")];
        assert_eq!(
            render_tree(&nodes, &TreeOptions::new()),
            Err(TreeError::ParentlessNode { index: 1, level: 2 })
        );
        let rootless = vec![TreeNode::new(1, "a")];
        assert!(render_tree(&rootless, &TreeOptions::new()).is_err());
    }

    #[test]
    fn empty_tree() {
        assert_eq!(render_tree(&[], &TreeOptions::new()).unwrap(), "");
    }

    #[test]
    fn nodes_from_pairs_and_objects() {
        let nodes = nodes_from_value(&json!([[0, "a"], {"level": 1, "value": 2}])).unwrap();
        assert_eq!(nodes, vec![TreeNode::new(0, "a"), TreeNode::new(1, "2")]);
    }

    #[test]
    fn nodes_from_invalid_input() {
        assert_eq!(nodes_from_value(&json!({"a": 1})), Err(TreeError::NotAList));
        assert_eq!(
            nodes_from_value(&json!([[0, "a"], ["x", "b"]])),
            Err(TreeError::InvalidNode { index: 1 })
        );
        assert_eq!(
            nodes_from_value(&json!([{"level": 0}])),
            Err(TreeError::InvalidNode { index: 0 })
        );
    }
}
