//! Integration tests for the file state machine

use nametree::contract::ContractKind;
use nametree::tree::{FileState, NodeTree};

/// Test that files are created closed
#[test]
fn test_files_start_closed() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let file = tree.create_file(root, "journal").unwrap();

    assert_eq!(tree.file_state(file).unwrap(), FileState::Closed);
}

/// Test the open-read-close cycle
#[test]
fn test_open_read_close_cycle() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let file = tree.create_file(root, "journal").unwrap();

    tree.open(file).unwrap();
    assert_eq!(tree.file_state(file).unwrap(), FileState::Open);

    let bytes = tree.read(file, 64).unwrap();
    assert!(bytes.is_empty());

    tree.close(file).unwrap();
    assert_eq!(tree.file_state(file).unwrap(), FileState::Closed);
}

/// Test that every transition checks the state it starts from
#[test]
fn test_transitions_check_their_starting_state() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let file = tree.create_file(root, "journal").unwrap();

    // closed files cannot be read or closed again
    assert!(tree.read(file, 1).is_err());
    assert!(tree.close(file).is_err());

    tree.open(file).unwrap();
    // open files cannot be opened again
    let err = tree.open(file).unwrap_err();
    assert_eq!(err.contract_kind(), Some(ContractKind::Precondition));

    // a failed transition leaves the state alone
    assert_eq!(tree.file_state(file).unwrap(), FileState::Open);
}

/// Test that directories refuse file operations
#[test]
fn test_directories_refuse_file_operations() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let dir = tree.create_directory(root, "etc").unwrap();

    assert!(tree.file_state(dir).is_err());
    assert!(tree.open(dir).is_err());
    assert!(tree.read(root, 8).is_err());
}

/// Test that files refuse structural directory operations
#[test]
fn test_files_refuse_directory_operations() {
    let mut tree = NodeTree::new();
    let root = tree.root();
    let file = tree.create_file(root, "journal").unwrap();
    let dir = tree.create_directory(root, "etc").unwrap();

    assert!(tree.create_file(file, "inner").is_err());
    assert!(tree.children(file).is_err());
    assert!(tree.move_node(dir, file).is_err());
}
