//! Indentation-driven tree construction.
//!
//! Consumes the normalized line records in one left-to-right pass with an
//! explicit ancestor stack. Classification looks at most one line ahead:
//! a deeper-indented successor forces the current line to be a folder.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::classify::NameClassifier;
use crate::domain::entities::{NodeKind, NormalizedLine, TreeNode};
use crate::domain::normalizer::LineNormalizer;

/// Parse a textual tree sketch into folder and file nodes.
///
/// The sole entry point of the core pipeline, and total over its input:
/// any string yields a (possibly empty) ordered list of top-level nodes.
/// Empty and whitespace-only input yields an empty list; the same text
/// always yields the same tree.
pub fn parse_tree(input: &str) -> Vec<TreeNode> {
    TreeParser::new().parse(input)
}

/// Reusable parser holding the compiled normalization and classification
/// machinery.
pub struct TreeParser {
    normalizer: LineNormalizer,
    classifier: NameClassifier,
}

impl Default for TreeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeParser {
    pub fn new() -> Self {
        Self {
            normalizer: LineNormalizer::new(),
            classifier: NameClassifier::new(),
        }
    }

    #[instrument(level = "debug", skip(self, input))]
    pub fn parse(&self, input: &str) -> Vec<TreeNode> {
        let lines = self.normalizer.normalize(input);
        debug!("normalized {} content lines", lines.len());

        let mut arena = TreeArena::new();
        // Ancestor stack of (arena index, indent); the sentinel sits below
        // any measurable indent so it is never popped.
        let mut stack: Vec<(Option<Index>, isize)> = vec![(None, -1)];

        let mut iter = lines.iter().peekable();
        while let Some(line) = iter.next() {
            let kind = self.classify(line, iter.peek().copied());

            // Equal indents are siblings, so ties pop as well.
            while stack
                .last()
                .map_or(false, |&(_, depth)| depth >= line.indent as isize)
            {
                stack.pop();
            }

            let (parent, _) = *stack.last().unwrap_or(&(None, -1));
            let idx = arena.insert_node(line.name.clone(), kind, parent);
            trace!(name = %line.name, indent = line.indent, ?kind, "placed node");

            if kind == NodeKind::Folder {
                stack.push((Some(idx), line.indent as isize));
            }
        }

        debug!("built {} nodes", arena.len());
        arena.into_nodes()
    }

    fn classify(&self, line: &NormalizedLine, next: Option<&NormalizedLine>) -> NodeKind {
        if line.explicit_folder {
            return NodeKind::Folder;
        }
        // A deeper successor can only be a child, so this line must be
        // able to hold it.
        if let Some(next_line) = next {
            if next_line.indent > line.indent {
                return NodeKind::Folder;
            }
        }
        if self.classifier.is_file(&line.name) {
            NodeKind::File
        } else {
            NodeKind::Folder
        }
    }
}
