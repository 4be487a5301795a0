//! Integration tests for tree structure and full-name assembly

use nametree::name::Name;
use nametree::tree::NodeTree;

/// Test that a fresh tree is a lone self-parented root
#[test]
fn test_fresh_tree_is_a_lone_root() {
    let tree = NodeTree::new();
    let root = tree.root();

    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.parent(root).unwrap(), root);
    assert!(tree.is_directory(root).unwrap());
    assert_eq!(tree.base_name(root).unwrap(), "");
    assert!(tree.full_name(root).unwrap().is_empty());
}

/// Test building a small filesystem-shaped hierarchy
#[test]
fn test_builds_a_nested_hierarchy() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let usr = tree.create_directory(root, "usr").unwrap();
    let local = tree.create_directory(usr, "local").unwrap();
    let bin = tree.create_directory(local, "bin").unwrap();
    let cargo = tree.create_file(bin, "cargo").unwrap();

    assert_eq!(tree.node_count(), 5);
    assert!(tree.has_child(bin, cargo).unwrap());
    assert_eq!(tree.parent(cargo).unwrap(), bin);
    assert!(!tree.is_directory(cargo).unwrap());
    assert_eq!(tree.children(root).unwrap(), vec![usr]);
}

/// Test that full names compose the base names from the root down
#[test]
fn test_full_names_compose_base_names() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let usr = tree.create_directory(root, "usr").unwrap();
    let local = tree.create_directory(usr, "local").unwrap();
    let bin = tree.create_directory(local, "bin").unwrap();

    let full = tree.full_name(bin).unwrap();
    assert_eq!(full.component_count(), 3);
    assert_eq!(full.as_string(), "usr.local.bin");
    assert_eq!(tree.full_name(usr).unwrap().as_string(), "usr");
}

/// Test that moves and renames show up in full names
#[test]
fn test_structure_changes_show_in_full_names() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let projects = tree.create_directory(root, "projects").unwrap();
    let archive = tree.create_directory(root, "archive").unwrap();
    let demo = tree.create_directory(projects, "demo").unwrap();
    let notes = tree.create_file(demo, "notes").unwrap();

    assert_eq!(tree.full_name(notes).unwrap().as_string(), "projects.demo.notes");

    tree.move_node(demo, archive).unwrap();
    assert_eq!(tree.full_name(notes).unwrap().as_string(), "archive.demo.notes");
    assert!(!tree.has_child(projects, demo).unwrap());
    assert!(tree.has_child(archive, demo).unwrap());

    tree.rename(demo, "retired").unwrap();
    assert_eq!(tree.full_name(notes).unwrap().as_string(), "archive.retired.notes");
}

/// Test that base names may carry escaped delimiters
#[test]
fn test_escaped_base_names_render_unescaped() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let var = tree.create_directory(root, "var").unwrap();
    let logs = tree.create_directory(var, r"logs\.old").unwrap();

    let full = tree.full_name(logs).unwrap();
    assert_eq!(full.component_count(), 2);
    assert_eq!(full.as_string(), "var.logs.old");
    assert_eq!(full.as_data_string(), r"var.logs\.old");
}

/// Test that a base name with an unescaped delimiter is rejected
#[test]
fn test_base_names_must_be_escaped() {
    let mut tree = NodeTree::new();
    let root = tree.root();

    assert!(tree.create_directory(root, "a.b").is_err());
    assert!(tree.create_file(root, "").is_err());
    assert!(tree.create_directory(root, r"a\.b").is_ok());
}

/// Test that ids from one tree do not resolve in another
#[test]
fn test_foreign_ids_do_not_resolve() {
    let mut donor = NodeTree::new();
    let donor_root = donor.root();
    let foreign = donor.create_directory(donor_root, "only").unwrap();

    let tree = NodeTree::new();
    assert!(!tree.contains(foreign));
    assert!(tree.base_name(foreign).is_err());
    assert!(tree.full_name(foreign).is_err());
}
