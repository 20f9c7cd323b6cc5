//! Data-quality warnings collected while parsing and indexing a topic tree.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::models::ContentId;

/// A recoverable data-quality issue. None of these abort a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Diagnostic {
  /// A value had an unexpected type or shape and was ignored.
  #[error("malformed node at {}: {reason}", trail(.breadcrumb))]
  MalformedNode {
    /// Titles leading to the offending node.
    breadcrumb: Vec<String>,
    /// Reserved attribute that was rejected, if any.
    attribute: Option<String>,
    /// Human readable description of the problem.
    reason: String,
  },
  /// More than one node references the same document.
  #[error("content id {content_id} is referenced {} times: {}", .breadcrumbs.len(), trails(.breadcrumbs))]
  DuplicateContentId {
    /// Shared document id.
    content_id: ContentId,
    /// Titles leading to every occurrence, in traversal order.
    breadcrumbs: Vec<Vec<String>>,
    /// Resolved path of every occurrence, parallel to `breadcrumbs`.
    ///
    /// Nodes without a URL segment of their own share their parent's path here.
    paths: Vec<String>,
  },
  /// A node used `0` as its content id.
  #[error("content id 0 at {}", trail(.breadcrumb))]
  ZeroContentId {
    /// Titles leading to the node.
    breadcrumb: Vec<String>,
  },
  /// A content node has no URL segment of its own and cannot be reverse resolved.
  #[error("content id {content_id} at {} has no url of its own", trail(.breadcrumb))]
  UnroutableContent {
    /// Document id carried by the node.
    content_id: ContentId,
    /// Titles leading to the node.
    breadcrumb: Vec<String>,
  },
  /// A node defines a URL that an earlier node already resolves to.
  #[error("path `{path}` at {} is already owned by {}", trail(.breadcrumb), trail(.owner))]
  DuplicatePath {
    /// Contested resolved path.
    path: String,
    /// Titles leading to the losing node.
    breadcrumb: Vec<String>,
    /// Titles leading to the node that owns the path.
    owner: Vec<String>,
  },
  /// Two siblings share a title.
  #[error("duplicate sibling title at {}", trail(.breadcrumb))]
  DuplicateTitle {
    /// Titles leading to the second sibling.
    breadcrumb: Vec<String>,
  },
}

/// Kind of a [`Diagnostic`], used for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
  /// See [`Diagnostic::MalformedNode`].
  MalformedNode,
  /// See [`Diagnostic::DuplicateContentId`].
  DuplicateContentId,
  /// See [`Diagnostic::ZeroContentId`].
  ZeroContentId,
  /// See [`Diagnostic::UnroutableContent`].
  UnroutableContent,
  /// See [`Diagnostic::DuplicatePath`].
  DuplicatePath,
  /// See [`Diagnostic::DuplicateTitle`].
  DuplicateTitle,
}

impl DiagnosticKind {
  /// Stable name used in logs.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::MalformedNode => "malformed-node",
      Self::DuplicateContentId => "duplicate-content-id",
      Self::ZeroContentId => "zero-content-id",
      Self::UnroutableContent => "unroutable-content",
      Self::DuplicatePath => "duplicate-path",
      Self::DuplicateTitle => "duplicate-title",
    }
  }
}

impl Diagnostic {
  /// Kind of this diagnostic.
  pub fn kind(&self) -> DiagnosticKind {
    match self {
      Self::MalformedNode { .. } => DiagnosticKind::MalformedNode,
      Self::DuplicateContentId { .. } => DiagnosticKind::DuplicateContentId,
      Self::ZeroContentId { .. } => DiagnosticKind::ZeroContentId,
      Self::UnroutableContent { .. } => DiagnosticKind::UnroutableContent,
      Self::DuplicatePath { .. } => DiagnosticKind::DuplicatePath,
      Self::DuplicateTitle { .. } => DiagnosticKind::DuplicateTitle,
    }
  }
}

/// Ordered report of every diagnostic raised by a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
  items: Vec<Diagnostic>,
}

impl Diagnostics {
  /// Empty report.
  pub fn new() -> Self {
    Self::default()
  }

  /// Record a diagnostic and emit it as a debug event.
  pub fn push(&mut self, diagnostic: Diagnostic) {
    debug!(kind = diagnostic.kind().as_str(), "{diagnostic}");
    self.items.push(diagnostic);
  }

  /// Append every diagnostic from another report without logging them again.
  pub fn extend(&mut self, other: Diagnostics) {
    self.items.extend(other.items);
  }

  /// Returns `true` when no issue was recorded.
  pub fn is_clean(&self) -> bool {
    self.items.is_empty()
  }

  /// Number of recorded diagnostics.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Returns `true` when the report is empty.
  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Number of diagnostics of a given kind.
  pub fn count(&self, kind: DiagnosticKind) -> usize {
    self.items.iter().filter(|item| item.kind() == kind).count()
  }

  /// Iterate over recorded diagnostics in the order they were raised.
  pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
    self.items.iter()
  }

  /// Consume the report.
  pub fn into_vec(self) -> Vec<Diagnostic> {
    self.items
  }
}

impl fmt::Display for Diagnostics {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for item in &self.items {
      writeln!(f, "{}: {}", item.kind().as_str(), item)?;
    }
    Ok(())
  }
}

pub(crate) fn trail(breadcrumb: &[String]) -> String {
  if breadcrumb.is_empty() {
    "<root>".to_string()
  } else {
    breadcrumb.join(" > ")
  }
}

fn trails(breadcrumbs: &[Vec<String>]) -> String {
  breadcrumbs
    .iter()
    .map(|breadcrumb| trail(breadcrumb))
    .collect::<Vec<_>>()
    .join("; ")
}
