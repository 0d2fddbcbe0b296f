//! Tree previews for the terminal, via termtree.

use termtree::Tree;

use crate::domain::TreeNode;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for TreeNode {
    fn to_tree_string(&self) -> Tree<String> {
        // Folders get a trailing slash, the same signal the parser reads.
        let label = if self.is_folder() {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        };

        let leaves: Vec<_> = self.children.iter().map(|c| c.to_tree_string()).collect();

        Tree::new(label).with_leaves(leaves)
    }
}

/// Render top-level nodes as one display tree rooted at `root_label`.
pub fn render_forest(root_label: &str, nodes: &[TreeNode]) -> String {
    let leaves: Vec<_> = nodes.iter().map(|n| n.to_tree_string()).collect();
    Tree::new(root_label.to_string())
        .with_leaves(leaves)
        .to_string()
}
