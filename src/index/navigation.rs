//! Export the indexed tree as an owned navigation structure for sidebar rendering.

use crate::index::{EntryId, Index};
use crate::models::NavigationNode;
use crate::route_paths::href;

impl Index {
  /// Owned navigation tree rooted at the index root.
  ///
  /// Only nodes owning a path get an `href`; transparent groupings and placeholders are
  /// listed without one.
  pub fn navigation(&self) -> Option<NavigationNode> {
    if self.entries.is_empty() {
      return None;
    }
    Some(self.navigation_node(0))
  }

  /// Navigation tree serialised as prettified JSON.
  pub fn navigation_json(&self) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&self.navigation())
  }

  fn navigation_node(&self, id: EntryId) -> NavigationNode {
    let entry = &self.entries[id];
    NavigationNode {
      title: entry.title.clone(),
      href: entry.owns_path.then(|| href(&entry.resolved_path)),
      content_id: entry.content_id,
      kind: entry.kind,
      children: entry
        .children
        .iter()
        .map(|child| self.navigation_node(*child))
        .collect(),
    }
  }
}
