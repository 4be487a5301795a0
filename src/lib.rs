//! Nametree: Contract-Checked Hierarchical Names and Node Trees
//!
//! Hierarchical names (delimited components with an escape convention) in
//! two interchangeable backings, and an in-memory tree of named nodes whose
//! full paths compose from those names. Every public operation checks its
//! preconditions, postconditions, and class invariants through one central
//! dispatcher.

pub mod config;
pub mod contract;
pub mod error;
pub mod logging;
pub mod name;
pub mod tree;
