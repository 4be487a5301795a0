//! Integration tests for hierarchical names and the node tree

mod file_lifecycle;
mod name_contracts;
mod search_service;
mod tree_structure;
