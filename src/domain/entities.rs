//! Domain entities: core data structures

use serde::Serialize;

/// A single input line after normalization.
///
/// `raw` holds the line after line-ending, separator and marker repair but
/// before any structural stripping; it is kept for indent measurement and
/// debug traces only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    /// The repaired line, decorations still attached
    pub raw: String,
    /// Length of the structural prefix in characters.
    /// Only meaningful relative to adjacent lines, never as an absolute level.
    pub indent: usize,
    /// Cleaned entry name; normalization drops lines where this would be empty
    pub name: String,
    /// The line ended with a path separator, overriding all name heuristics
    pub explicit_folder: bool,
}

/// Kind of a tree entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Folder,
    File,
}

/// A node in the parsed hierarchy.
///
/// Names are unique only within their sibling list. Children keep the order
/// of appearance in the input and are always empty for files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub name: String,
    pub kind: NodeKind,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn folder(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Folder,
            children,
        }
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            children: Vec::new(),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Number of folders in this subtree, including self.
    pub fn folder_count(&self) -> usize {
        let own = usize::from(self.is_folder());
        own + self
            .children
            .iter()
            .map(TreeNode::folder_count)
            .sum::<usize>()
    }

    /// Number of files in this subtree.
    pub fn file_count(&self) -> usize {
        let own = usize::from(!self.is_folder());
        own + self
            .children
            .iter()
            .map(TreeNode::file_count)
            .sum::<usize>()
    }
}
