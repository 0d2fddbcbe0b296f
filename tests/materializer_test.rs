//! Integration tests for filesystem materialization: creation, dry-run,
//! overwrite policy, root collapse, and the traversal guard.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use treefs::application::materialize::{MaterializeOptions, Materializer, OnExists};
use treefs::domain::{parse_tree, TreeNode};
use treefs::util::testing;

fn materialize_into(
    dest: &Path,
    nodes: &[TreeNode],
    options: MaterializeOptions,
) -> treefs::MaterializeReport {
    testing::init_test_setup();
    Materializer::new(dest, options)
        .materialize(nodes)
        .expect("materialize")
}

#[test]
fn given_parsed_sketch_when_materializing_then_entries_exist_on_disk() {
    // Arrange
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let nodes = parse_tree("project/\n  src/\n    index.js\n  README");

    // Act
    let report = materialize_into(&dest, &nodes, MaterializeOptions::default());

    // Assert
    assert!(dest.join("project/src").is_dir());
    assert!(dest.join("project/src/index.js").is_file());
    assert!(dest.join("project/README").is_file());
    assert_eq!(report.dirs_created, 2);
    assert_eq!(report.files_created, 2);
    assert!(report.skipped.is_empty());
    assert!(report.unsafe_paths.is_empty());
}

#[test]
fn given_created_files_when_reading_then_empty_placeholders() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let nodes = parse_tree("a.txt");

    materialize_into(&dest, &nodes, MaterializeOptions::default());

    assert_eq!(fs::read_to_string(dest.join("a.txt")).unwrap(), "");
}

#[test]
fn given_dry_run_when_materializing_then_counts_but_no_writes() {
    // Arrange
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let nodes = parse_tree("project/\n  src/\n    index.js");

    // Act
    let report = materialize_into(
        &dest,
        &nodes,
        MaterializeOptions {
            dry_run: true,
            ..Default::default()
        },
    );

    // Assert: destination itself is untouched
    assert!(!dest.exists());
    assert_eq!(report.dirs_created, 2);
    assert_eq!(report.files_created, 1);
}

#[test]
fn given_existing_file_when_skip_policy_then_content_preserved() {
    // Arrange
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().to_path_buf();
    fs::write(dest.join("keep.txt"), "precious").unwrap();
    let nodes = parse_tree("keep.txt\nnew.txt");

    // Act
    let report = materialize_into(&dest, &nodes, MaterializeOptions::default());

    // Assert
    assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "precious");
    assert!(dest.join("new.txt").is_file());
    assert_eq!(report.files_created, 1);
    assert_eq!(report.skipped, vec![dest.join("keep.txt")]);
}

#[test]
fn given_existing_file_when_overwrite_policy_then_truncated() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().to_path_buf();
    fs::write(dest.join("stale.txt"), "old contents").unwrap();
    let nodes = parse_tree("stale.txt");

    let report = materialize_into(
        &dest,
        &nodes,
        MaterializeOptions {
            on_exists: OnExists::Overwrite,
            ..Default::default()
        },
    );

    assert_eq!(fs::read_to_string(dest.join("stale.txt")).unwrap(), "");
    assert_eq!(report.files_created, 1);
    assert!(report.skipped.is_empty());
}

#[test]
fn given_single_top_folder_when_collapse_root_then_children_land_in_dest() {
    // Arrange
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let nodes = parse_tree("project/\n  src/\n  README");

    // Act
    materialize_into(
        &dest,
        &nodes,
        MaterializeOptions {
            collapse_root: true,
            ..Default::default()
        },
    );

    // Assert: "project" itself is not created
    assert!(!dest.join("project").exists());
    assert!(dest.join("src").is_dir());
    assert!(dest.join("README").is_file());
}

#[test]
fn given_multiple_top_nodes_when_collapse_root_then_nothing_collapses() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let nodes = parse_tree("a/\nb/");

    materialize_into(
        &dest,
        &nodes,
        MaterializeOptions {
            collapse_root: true,
            ..Default::default()
        },
    );

    assert!(dest.join("a").is_dir());
    assert!(dest.join("b").is_dir());
}

#[test]
fn given_escaping_node_name_when_materializing_then_skipped_and_reported() {
    // Arrange: node names never come out of the parser with "..", but the
    // materializer guards its own contract anyway.
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");
    let nodes = vec![
        TreeNode::file("../escape.txt"),
        TreeNode::file("inside.txt"),
    ];

    // Act
    let report = materialize_into(&dest, &nodes, MaterializeOptions::default());

    // Assert
    assert!(!tmp.path().join("escape.txt").exists());
    assert!(dest.join("inside.txt").is_file());
    assert_eq!(report.unsafe_paths, vec!["../escape.txt".to_string()]);
    assert_eq!(report.files_created, 1);
}

#[test]
fn given_no_nodes_when_materializing_then_dest_not_even_created() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().join("out");

    let report = materialize_into(&dest, &[], MaterializeOptions::default());

    assert!(!dest.exists());
    assert_eq!(report, treefs::MaterializeReport::default());
}

#[test]
fn given_existing_folder_when_materializing_then_not_counted_again() {
    let tmp = TempDir::new().unwrap();
    let dest = tmp.path().to_path_buf();
    fs::create_dir(dest.join("src")).unwrap();
    let nodes = parse_tree("src/\n  lib.rs");

    let report = materialize_into(&dest, &nodes, MaterializeOptions::default());

    assert_eq!(report.dirs_created, 0);
    assert_eq!(report.files_created, 1);
    assert!(dest.join("src/lib.rs").is_file());
}
