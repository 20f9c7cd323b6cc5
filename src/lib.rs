#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod handle;
pub mod index;
pub mod loader;
pub mod logging;
pub mod models;
pub mod resolver;
pub mod route_paths;
pub mod selection;
pub mod tree;

pub use config::{ResolverConfig, ZeroContentPolicy};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{BuildError, MergeConflict, MergeError};
pub use handle::IndexHandle;
pub use index::Index;
pub use models::{Branch, ChildSummary, ContentId, NavigationNode, Node, NodeKind, Page};
pub use resolver::{BuildResult, Built, TreeResolver};
pub use selection::{BranchInclusion, BranchSelection};
pub use tree::{merge_subtrees, parse_node};
