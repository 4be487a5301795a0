//! Node Tree
//!
//! An in-memory tree of named nodes (directories and files) behind an
//! id-keyed arena. Full names compose from base names along the parent
//! chain; search recurses through directory children and reports any
//! failure as a single service failure.

mod arena;
mod search;

pub mod node;

pub use arena::NodeTree;
pub use node::{FileState, NodeId};
