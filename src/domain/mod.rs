//! Domain layer: the text-to-tree pipeline
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading) and is total over its input: parsing never fails.

pub mod arena;
pub mod classify;
pub mod entities;
pub mod normalizer;
pub mod parser;

pub use arena::TreeArena;
pub use classify::NameClassifier;
pub use entities::{NodeKind, NormalizedLine, TreeNode};
pub use normalizer::LineNormalizer;
pub use parser::{parse_tree, TreeParser};
