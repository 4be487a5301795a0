//! Integration tests for recursive search and service failure wrapping

use nametree::error::TreeError;
use nametree::contract::ContractKind;
use nametree::name::Name;
use nametree::tree::NodeTree;
use std::collections::HashSet;

/// Test that search unions matches across a mixed hierarchy
#[test]
fn test_search_unions_matches_across_depths() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let src = tree.create_directory(root, "src").unwrap();
    let tests = tree.create_directory(root, "tests").unwrap();
    let nested = tree.create_directory(src, "nested").unwrap();

    let a = tree.create_file(src, "config").unwrap();
    let b = tree.create_file(nested, "config").unwrap();
    let c = tree.create_directory(tests, "config").unwrap();
    tree.create_file(tests, "other").unwrap();

    let matches = tree.find_nodes(root, "config").unwrap();
    assert_eq!(matches, HashSet::from([a, b, c]));

    // scoped search sees only its subtree
    let scoped = tree.find_nodes(src, "config").unwrap();
    assert_eq!(scoped, HashSet::from([a, b]));
}

/// Test that matches resolve to the full names their placement implies
#[test]
fn test_matches_resolve_to_full_names() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let first = tree.create_directory(root, "first").unwrap();
    let second = tree.create_directory(first, "second").unwrap();
    tree.create_file(first, "target").unwrap();
    tree.create_file(second, "target").unwrap();

    let mut paths: Vec<String> = tree
        .find_nodes(root, "target")
        .unwrap()
        .into_iter()
        .map(|id| tree.full_name(id).unwrap().as_string())
        .collect();
    paths.sort();

    assert_eq!(paths, vec!["first.second.target", "first.target"]);
}

/// Test that a search that matches nothing yields the empty set
#[test]
fn test_search_without_matches_is_empty() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    tree.create_directory(root, "etc").unwrap();

    assert!(tree.find_nodes(root, "missing").unwrap().is_empty());
}

/// Test that a corrupted subtree fails the search with one service wrapper
#[test]
fn test_corruption_surfaces_as_one_service_failure() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let outer = tree.create_directory(root, "outer").unwrap();
    let inner = tree.create_directory(outer, "inner").unwrap();
    let stray = tree.create_file(root, "stray").unwrap();

    // membership that disagrees with the parent link
    tree.add_child(inner, stray).unwrap();

    let err = tree.find_nodes(root, "anything").unwrap_err();
    match &err {
        TreeError::Service { cause, .. } => {
            assert!(matches!(**cause, TreeError::Contract(_)));
        }
        other => panic!("expected a service failure, got {other}"),
    }
    assert_eq!(err.contract_kind(), Some(ContractKind::Invariant));
}

/// Test that searching from an unknown id is wrapped the same way
#[test]
fn test_unknown_start_is_wrapped_as_service_failure() {
    let mut donor = NodeTree::new();
    let donor_root = donor.root();
    let foreign = donor.create_directory(donor_root, "only").unwrap();

    let tree = NodeTree::new();
    let err = tree.find_nodes(foreign, "x").unwrap_err();

    assert!(matches!(err, TreeError::Service { .. }));
    assert_eq!(err.contract_kind(), Some(ContractKind::Precondition));
}
