use crate::index::{Entry, EntryId, Index};
use crate::models::{ChildSummary, ContentId, IndexStats, NodeKind, Page};
use crate::route_paths::normalise_path;

impl Index {
  /// Resolve a URL path to the node that owns it.
  ///
  /// Only the root and nodes defining their own URL segment own a path; transparent
  /// groupings and placeholders are reachable through [`Index::list_children`] or
  /// [`Index::find_by_breadcrumb`].
  pub fn resolve(&self, path: &str) -> Option<Page<'_>> {
    let id = *self.by_path.get(&normalise_path(path))?;
    Some(self.page(id))
  }

  /// Path of the first routable node rendering `content_id`.
  pub fn reverse_resolve(&self, content_id: ContentId) -> Option<&str> {
    let id = *self.by_content.get(&content_id)?;
    Some(self.entries[id].resolved_path.as_str())
  }

  /// Children of the node owning `path`, in authoring order.
  pub fn list_children(&self, path: &str) -> Option<Vec<ChildSummary<'_>>> {
    let id = *self.by_path.get(&normalise_path(path))?;
    Some(self.child_summaries(id))
  }

  /// Locate a node by its title trail from the root.
  ///
  /// An empty trail addresses the root. When programmatic trees repeat a sibling title the
  /// first sibling wins.
  pub fn find_by_breadcrumb(&self, breadcrumb: &[&str]) -> Option<Page<'_>> {
    self.locate(breadcrumb).map(|id| self.page(id))
  }

  /// Children of the node addressed by `breadcrumb`, in authoring order.
  pub fn list_children_at(&self, breadcrumb: &[&str]) -> Option<Vec<ChildSummary<'_>>> {
    self.locate(breadcrumb).map(|id| self.child_summaries(id))
  }

  /// Every node carrying `content_id`, routable or not, in traversal order.
  pub fn entries_for_content(&self, content_id: ContentId) -> Vec<Page<'_>> {
    self
      .occurrences
      .get(&content_id)
      .map(|ids| ids.iter().map(|id| self.page(*id)).collect())
      .unwrap_or_default()
  }

  /// Summary counts for the indexed tree.
  pub fn stats(&self) -> IndexStats {
    let mut stats = IndexStats {
      nodes: self.entries.len(),
      routable_paths: self.by_path.len(),
      routable_content: self.by_content.len(),
      ..IndexStats::default()
    };
    for entry in &self.entries {
      match entry.kind {
        NodeKind::Placeholder => stats.placeholders += 1,
        NodeKind::Grouping => stats.groupings += 1,
        NodeKind::Content => stats.content_pages += 1,
      }
    }
    stats
  }

  fn locate<T: AsRef<str>>(&self, breadcrumb: &[T]) -> Option<EntryId> {
    if self.entries.is_empty() {
      return None;
    }
    let mut current = 0;
    for title in breadcrumb {
      let title: &str = title.as_ref();
      current = self.entries[current]
        .children
        .iter()
        .copied()
        .find(|child| self.entries[*child].title == title)?;
    }
    Some(current)
  }

  pub(super) fn page(&self, id: EntryId) -> Page<'_> {
    let entry = &self.entries[id];
    Page {
      title: &entry.title,
      path: &entry.resolved_path,
      breadcrumb: &entry.breadcrumb,
      content_id: entry.content_id,
      kind: entry.kind,
      has_own_url: entry.has_own_url,
      children: entry
        .children
        .iter()
        .map(|child| self.entries[*child].title.as_str())
        .collect(),
    }
  }

  fn child_summaries(&self, id: EntryId) -> Vec<ChildSummary<'_>> {
    self.entries[id]
      .children
      .iter()
      .map(|child| summarise(&self.entries[*child]))
      .collect()
  }
}

fn summarise(entry: &Entry) -> ChildSummary<'_> {
  ChildSummary {
    title: &entry.title,
    has_own_url: entry.has_own_url,
    has_content: entry.content_id.is_some(),
    path: &entry.resolved_path,
  }
}
