//! Fatal errors raised while building or merging topic trees.

use std::fmt;

use thiserror::Error;

use crate::diagnostics::trail;

/// Conditions that abort a build. Per-node problems are reported as diagnostics instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
  /// Nesting went deeper than the configured limit, which only happens for cyclic or
  /// runaway programmatic trees.
  #[error("traversal exceeded the depth limit of {limit} at {}", trail(.breadcrumb))]
  CycleDetected {
    /// Configured depth limit.
    limit: usize,
    /// Titles leading to the node that tripped the guard.
    breadcrumb: Vec<String>,
  },
  /// The tree holds more nodes than the configured limit.
  #[error("traversal visited more than {limit} nodes")]
  NodeLimitExceeded {
    /// Configured node limit.
    limit: usize,
  },
}

/// Errors raised when composing independently authored fragments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
  /// A fragment was a placeholder instead of a branch.
  #[error("fragment `{fragment}` is not a branch")]
  NotABranch {
    /// Label of the offending fragment.
    fragment: String,
  },
  /// Fragments define the same keys.
  #[error("{} merge conflict(s): {}", .conflicts.len(), join_conflicts(.conflicts))]
  Conflict {
    /// Every collision found, in fragment order.
    conflicts: Vec<MergeConflict>,
  },
}

/// A key defined by more than one fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConflict {
  /// Title or reserved attribute defined twice.
  pub key: String,
  /// Fragment that defined the key first.
  pub first: String,
  /// Fragment that defined it again.
  pub second: String,
}

impl fmt::Display for MergeConflict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "`{}` defined by both `{}` and `{}`",
      self.key, self.first, self.second
    )
  }
}

fn join_conflicts(conflicts: &[MergeConflict]) -> String {
  conflicts
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("; ")
}
