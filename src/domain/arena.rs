//! Arena storage for the tree under construction.
//!
//! The builder links nodes through arena indices while the ancestor stack
//! is still moving; only when parsing finishes does [`TreeArena::into_nodes`]
//! produce the owned, self-contained hierarchy handed to callers.

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{NodeKind, TreeNode};

/// Node as stored in the arena, children linked by index.
#[derive(Debug)]
struct ArenaNode {
    name: String,
    kind: NodeKind,
    children: Vec<Index>,
}

/// Arena-backed forest: multiple top-level nodes, each a tree.
#[derive(Debug)]
pub struct TreeArena {
    arena: Arena<ArenaNode>,
    roots: Vec<Index>,
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            roots: Vec::new(),
        }
    }

    /// Insert a node under `parent`, or as a new top-level root for `None`.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, name: String, kind: NodeKind, parent: Option<Index>) -> Index {
        let idx = self.arena.insert(ArenaNode {
            name,
            kind,
            children: Vec::new(),
        });

        match parent {
            Some(parent_idx) => {
                if let Some(parent_node) = self.arena.get_mut(parent_idx) {
                    parent_node.children.push(idx);
                }
            }
            None => self.roots.push(idx),
        }

        idx
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Consume the arena into owned top-level nodes, children resolved.
    pub fn into_nodes(self) -> Vec<TreeNode> {
        self.roots
            .iter()
            .map(|&root| to_owned_node(&self.arena, root))
            .collect()
    }
}

fn to_owned_node(arena: &Arena<ArenaNode>, idx: Index) -> TreeNode {
    match arena.get(idx) {
        Some(node) => TreeNode {
            name: node.name.clone(),
            kind: node.kind,
            children: node
                .children
                .iter()
                .map(|&child| to_owned_node(arena, child))
                .collect(),
        },
        // Indices come only from insert_node on this arena.
        None => TreeNode::folder(String::new(), Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_linked_nodes_when_converting_then_owns_nested_tree() {
        // Arrange
        let mut arena = TreeArena::new();
        let root = arena.insert_node("src".into(), NodeKind::Folder, None);
        arena.insert_node("lib.rs".into(), NodeKind::File, Some(root));
        arena.insert_node("docs".into(), NodeKind::Folder, None);

        // Act
        let nodes = arena.into_nodes();

        // Assert
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].name, "src");
        assert_eq!(nodes[0].children.len(), 1);
        assert_eq!(nodes[0].children[0], TreeNode::file("lib.rs"));
        assert!(nodes[1].children.is_empty());
    }
}
