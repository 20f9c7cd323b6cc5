//! Turning authored JSON into typed topic trees, and composing independently authored fragments.

mod merge;
mod parsing;

pub use merge::merge_subtrees;
pub use parsing::parse_node;
