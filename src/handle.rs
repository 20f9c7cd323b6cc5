//! Shared index with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads. A rebuild assembles the complete replacement first
//! and swaps it in with a single store, so readers see either the old or the new index.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use tracing::info;

use crate::diagnostics::Diagnostics;
use crate::index::Index;
use crate::loader::load_index;
use crate::models::Node;
use crate::resolver::{BuildResult, Built, TreeResolver};

/// Holder of the current index, passed explicitly to whatever serves queries.
#[derive(Debug)]
pub struct IndexHandle {
  current: ArcSwap<Index>,
}

impl Default for IndexHandle {
  fn default() -> Self {
    Self::new(Index::empty())
  }
}

impl IndexHandle {
  /// Wrap an already built index.
  pub fn new(index: Index) -> Self {
    Self {
      current: ArcSwap::from_pointee(index),
    }
  }

  /// Snapshot of the current index. Later swaps do not affect the snapshot.
  #[inline]
  pub fn load(&self) -> Arc<Index> {
    self.current.load_full()
  }

  /// Replace the current index.
  pub fn store(&self, index: Index) {
    self.current.store(Arc::new(index));
  }

  /// Rebuild from `root` and swap the result in.
  ///
  /// On error the current index stays in place.
  pub fn rebuild(&self, resolver: &TreeResolver, root: &Node) -> BuildResult<Diagnostics> {
    let Built { index, diagnostics } = resolver.build(root)?;
    self.swap_in(index);
    Ok(diagnostics)
  }

  /// Reload the configured fragments from `data_dir` and swap the result in.
  ///
  /// On error the current index stays in place.
  pub fn reload(&self, data_dir: &Path) -> Result<Diagnostics> {
    let Built { index, diagnostics } = load_index(data_dir)?;
    self.swap_in(index);
    Ok(diagnostics)
  }

  fn swap_in(&self, index: Index) {
    let nodes = index.len();
    self.store(index);
    info!(nodes, "swapped in rebuilt topic index");
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ResolverConfig;
  use crate::models::{Branch, ContentId};
  use std::fs;
  use tempfile::tempdir;

  fn tree(content_id: u64) -> Node {
    Node::grouping(Branch::new().with_child(
      "Page",
      Node::content(content_id, Branch::new().with_url_path("page")),
    ))
  }

  #[test]
  fn snapshots_survive_swaps() {
    let handle = IndexHandle::default();
    let resolver = TreeResolver::default();
    assert!(handle.load().is_empty());

    handle.rebuild(&resolver, &tree(1)).unwrap();
    let before = handle.load();

    handle.rebuild(&resolver, &tree(2)).unwrap();
    let after = handle.load();

    assert_eq!(before.resolve("page").unwrap().content_id, Some(ContentId(1)));
    assert_eq!(after.resolve("page").unwrap().content_id, Some(ContentId(2)));
  }

  #[test]
  fn failed_rebuild_keeps_current_index() {
    let handle = IndexHandle::default();
    handle.rebuild(&TreeResolver::default(), &tree(1)).unwrap();

    let strict = TreeResolver::new(ResolverConfig {
      max_nodes: 1,
      ..ResolverConfig::default()
    });
    assert!(handle.rebuild(&strict, &tree(2)).is_err());
    assert_eq!(
      handle.load().reverse_resolve(ContentId(1)),
      Some("page")
    );
  }

  #[test]
  fn reloads_from_data_directory() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join("mapper.json"),
      r#"{"Page": {"___urlPath___": "page", "___md___": 5}}"#,
    )
    .unwrap();

    let handle = IndexHandle::default();
    let diagnostics = handle.reload(dir.path()).unwrap();
    assert!(diagnostics.is_clean());
    assert_eq!(handle.load().reverse_resolve(ContentId(5)), Some("page"));

    fs::write(dir.path().join("mapper.json"), "{ broken").unwrap();
    assert!(handle.reload(dir.path()).is_err());
    assert_eq!(handle.load().reverse_resolve(ContentId(5)), Some("page"));
  }
}
