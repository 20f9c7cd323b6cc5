//! Immutable, queryable index built from a topic tree.
//!
//! Entries live in a flat arena in traversal order, the root first. Lookups go through
//! path and content-id maps built once during the traversal, so no query re-walks the tree.

mod building;
mod lookup;
mod navigation;

use std::collections::{BTreeMap, HashMap};

use crate::models::{ContentId, NodeKind};

pub(crate) use building::build_index;

pub(crate) type EntryId = usize;

#[derive(Debug)]
pub(crate) struct Entry {
  pub(crate) title: String,
  pub(crate) breadcrumb: Vec<String>,
  pub(crate) kind: NodeKind,
  pub(crate) has_own_url: bool,
  pub(crate) resolved_path: String,
  pub(crate) owns_path: bool,
  pub(crate) content_id: Option<ContentId>,
  pub(crate) children: Vec<EntryId>,
}

/// Read-only index answering navigation queries.
///
/// Nothing is mutable after construction; share it behind an `Arc` or an
/// [`IndexHandle`](crate::IndexHandle) for concurrent readers.
#[derive(Debug, Default)]
pub struct Index {
  entries: Vec<Entry>,
  by_path: HashMap<String, EntryId>,
  by_content: HashMap<ContentId, EntryId>,
  occurrences: BTreeMap<ContentId, Vec<EntryId>>,
}

impl Index {
  /// Index without any entries; every query returns `None`.
  pub fn empty() -> Self {
    Self::default()
  }

  /// Number of indexed nodes, root included.
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  /// Returns `true` when nothing was indexed.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}
