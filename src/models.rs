//! Data structures describing authored topic trees and the records produced from them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a markdown document held by the external content store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentId(pub u64);

impl fmt::Display for ContentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// A single entry of the authored topic tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  /// Topic stub authored as the literal `true`.
  Placeholder,
  /// Navigation grouping without a page of its own.
  Grouping(Branch),
  /// Rendered page backed by a markdown document.
  Content {
    /// Document rendered for this node.
    content_id: ContentId,
    /// Routing attributes and nested topics.
    branch: Branch,
  },
}

/// Routing attributes and ordered children shared by groupings and content nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Branch {
  /// Single path segment contributed to the resolved URL.
  pub url_path: Option<String>,
  /// Child topics in authoring order.
  pub children: Vec<(String, Node)>,
}

/// Discriminant of [`Node`] used in index records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
  /// See [`Node::Placeholder`].
  Placeholder,
  /// See [`Node::Grouping`].
  Grouping,
  /// See [`Node::Content`].
  Content,
}

impl Node {
  /// Create a grouping node from a branch.
  pub fn grouping(branch: Branch) -> Self {
    Node::Grouping(branch)
  }

  /// Create a content node from a branch.
  pub fn content(content_id: u64, branch: Branch) -> Self {
    Node::Content {
      content_id: ContentId(content_id),
      branch,
    }
  }

  /// Branch carried by the node, if it is not a placeholder.
  pub fn branch(&self) -> Option<&Branch> {
    match self {
      Node::Placeholder => None,
      Node::Grouping(branch) | Node::Content { branch, .. } => Some(branch),
    }
  }

  /// Content identifier carried by the node.
  pub fn content_id(&self) -> Option<ContentId> {
    match self {
      Node::Content { content_id, .. } => Some(*content_id),
      _ => None,
    }
  }

  /// Segment the node contributes to its resolved URL.
  pub fn url_path(&self) -> Option<&str> {
    self.branch().and_then(|branch| branch.url_path.as_deref())
  }

  /// Kind of the node.
  pub fn kind(&self) -> NodeKind {
    match self {
      Node::Placeholder => NodeKind::Placeholder,
      Node::Grouping(_) => NodeKind::Grouping,
      Node::Content { .. } => NodeKind::Content,
    }
  }
}

impl Branch {
  /// Empty branch without a URL segment.
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the URL segment contributed by this branch.
  pub fn with_url_path(mut self, segment: impl Into<String>) -> Self {
    self.url_path = Some(segment.into());
    self
  }

  /// Append a child topic, keeping authoring order.
  pub fn with_child(mut self, title: impl Into<String>, node: Node) -> Self {
    self.children.push((title.into(), node));
    self
  }

  /// First child with the given title.
  pub fn child(&self, title: &str) -> Option<&Node> {
    self
      .children
      .iter()
      .find(|(name, _)| name == title)
      .map(|(_, node)| node)
  }
}

/// Resolved view of an indexed node returned by lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a> {
  /// Title of the node; empty for the root.
  pub title: &'a str,
  /// Resolved path without leading slash.
  pub path: &'a str,
  /// Titles from the root down to and including this node.
  pub breadcrumb: &'a [String],
  /// Document rendered for this node.
  pub content_id: Option<ContentId>,
  /// Kind of the underlying node.
  pub kind: NodeKind,
  /// Whether the node defines its own URL segment.
  pub has_own_url: bool,
  /// Child titles in authoring order.
  pub children: Vec<&'a str>,
}

/// Child listing entry used by navigation sidebars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildSummary<'a> {
  /// Title of the child.
  pub title: &'a str,
  /// Whether the child defines its own URL segment.
  pub has_own_url: bool,
  /// Whether the child is a rendered page.
  pub has_content: bool,
  /// Resolved path of the child; equal to the parent path when the child has no URL.
  pub path: &'a str,
}

/// Owned navigation tree serialised for sidebar rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationNode {
  /// Title of the node; empty for the root.
  pub title: String,
  /// Link target when the node owns a resolvable path.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub href: Option<String>,
  /// Document rendered for this node.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub content_id: Option<ContentId>,
  /// Kind of the underlying node.
  pub kind: NodeKind,
  /// Nested topics in authoring order.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub children: Vec<NavigationNode>,
}

/// Summary counts describing a built index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
  /// Number of indexed nodes, root included.
  pub nodes: usize,
  /// Number of placeholder leaves.
  pub placeholders: usize,
  /// Number of navigation groupings, root included.
  pub groupings: usize,
  /// Number of content nodes.
  pub content_pages: usize,
  /// Number of distinct resolvable paths.
  pub routable_paths: usize,
  /// Number of content ids reachable through `reverse_resolve`.
  pub routable_content: usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exposes_branch_attributes_through_node() {
    let node = Node::content(
      7,
      Branch::new()
        .with_url_path("intro")
        .with_child("Setup", Node::Placeholder),
    );

    assert_eq!(node.kind(), NodeKind::Content);
    assert_eq!(node.content_id(), Some(ContentId(7)));
    assert_eq!(node.url_path(), Some("intro"));
    assert_eq!(
      node.branch().and_then(|branch| branch.child("Setup")),
      Some(&Node::Placeholder)
    );
  }

  #[test]
  fn placeholder_has_no_branch() {
    assert!(Node::Placeholder.branch().is_none());
    assert!(Node::Placeholder.url_path().is_none());
    assert_eq!(Node::Placeholder.content_id(), None);
  }

  #[test]
  fn navigation_node_omits_empty_fields() {
    let node = NavigationNode {
      title: "Stub".into(),
      href: None,
      content_id: None,
      kind: NodeKind::Placeholder,
      children: Vec::new(),
    };

    let json = serde_json::to_string(&node).unwrap();
    assert_eq!(json, r#"{"title":"Stub","kind":"placeholder"}"#);
  }
}
