//! treefs: generate real directory structures from text-based tree sketches.
//!
//! The crate turns a loosely-formatted, human-authored drawing of a
//! directory tree (box-drawing output of `tree`, markdown bullets, plain
//! indentation, emoji-annotated or commented variants) into a hierarchy of
//! folder and file nodes, and materializes that hierarchy on disk.
//!
//! Layers:
//! - [`domain`]: the pure text-to-tree pipeline. No I/O, total over its
//!   input: every string parses to some (possibly empty) tree.
//! - [`application`]: input capture and filesystem materialization.
//! - [`cli`]: argument surface and command dispatch for the binary.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::materialize::{
    MaterializeOptions, MaterializeReport, Materializer, OnExists,
};
pub use domain::{parse_tree, NodeKind, TreeNode};
