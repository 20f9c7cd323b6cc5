//! Single-pass traversal that turns a topic tree into an [`Index`].

use std::collections::HashSet;

use tracing::{debug, trace};

use crate::config::ResolverConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::BuildError;
use crate::index::{Entry, EntryId, Index};
use crate::models::Node;
use crate::route_paths::join_segment;
use crate::selection::BranchInclusion;

struct Frame<'n> {
  title: &'n str,
  node: &'n Node,
  parent: Option<EntryId>,
}

/// Walk `root` depth first with an explicit stack and index every node.
///
/// Children are pushed in reverse so they pop, and are attached to their parent, in
/// authoring order. Per-node problems go to `diagnostics`; only the depth and node-count
/// guards abort.
pub(crate) fn build_index<S: BranchInclusion + ?Sized>(
  root: &Node,
  config: &ResolverConfig,
  selection: &S,
  diagnostics: &mut Diagnostics,
) -> Result<Index, BuildError> {
  let mut index = Index::default();
  let mut stack = vec![Frame {
    title: "",
    node: root,
    parent: None,
  }];

  while let Some(frame) = stack.pop() {
    let (parent_path, mut breadcrumb) = match frame.parent {
      Some(parent) => {
        let parent = &index.entries[parent];
        (parent.resolved_path.clone(), parent.breadcrumb.clone())
      }
      None => (String::new(), Vec::new()),
    };
    let is_root = frame.parent.is_none();
    if !is_root {
      breadcrumb.push(frame.title.to_string());
    }

    if breadcrumb.len() > config.max_depth {
      return Err(BuildError::CycleDetected {
        limit: config.max_depth,
        breadcrumb,
      });
    }

    let own_segment = frame.node.url_path();
    let resolved_path = match own_segment {
      Some(segment) => join_segment(&parent_path, segment),
      None => parent_path,
    };

    if !is_root && !selection.is_included(&resolved_path) {
      trace!(path = %resolved_path, title = frame.title, "skipping unselected branch");
      continue;
    }

    if index.entries.len() >= config.max_nodes {
      return Err(BuildError::NodeLimitExceeded {
        limit: config.max_nodes,
      });
    }

    let id = index.entries.len();
    let owns_path = if is_root {
      index.by_path.insert(resolved_path.clone(), id);
      true
    } else if own_segment.is_some() {
      match index.by_path.get(&resolved_path) {
        Some(&owner) => {
          diagnostics.push(Diagnostic::DuplicatePath {
            path: resolved_path.clone(),
            breadcrumb: breadcrumb.clone(),
            owner: index.entries[owner].breadcrumb.clone(),
          });
          false
        }
        None => {
          index.by_path.insert(resolved_path.clone(), id);
          true
        }
      }
    } else {
      false
    };

    let content_id = frame.node.content_id();
    if let Some(content_id) = content_id {
      index.occurrences.entry(content_id).or_default().push(id);
      if owns_path {
        index.by_content.entry(content_id).or_insert(id);
      } else if own_segment.is_none() {
        diagnostics.push(Diagnostic::UnroutableContent {
          content_id,
          breadcrumb: breadcrumb.clone(),
        });
      }
    }

    if let Some(branch) = frame.node.branch() {
      let mut seen = HashSet::with_capacity(branch.children.len());
      for (title, _) in &branch.children {
        if !seen.insert(title.as_str()) {
          let mut duplicate = breadcrumb.clone();
          duplicate.push(title.clone());
          diagnostics.push(Diagnostic::DuplicateTitle {
            breadcrumb: duplicate,
          });
        }
      }

      for (title, child) in branch.children.iter().rev() {
        stack.push(Frame {
          title: title.as_str(),
          node: child,
          parent: Some(id),
        });
      }
    }

    index.entries.push(Entry {
      title: frame.title.to_string(),
      breadcrumb,
      kind: frame.node.kind(),
      has_own_url: own_segment.is_some(),
      resolved_path,
      owns_path,
      content_id,
      children: Vec::new(),
    });
    if let Some(parent) = frame.parent {
      index.entries[parent].children.push(id);
    }
  }

  for (content_id, ids) in &index.occurrences {
    if ids.len() > 1 {
      let occurrences = ids.iter().map(|id| &index.entries[*id]);
      diagnostics.push(Diagnostic::DuplicateContentId {
        content_id: *content_id,
        breadcrumbs: occurrences
          .clone()
          .map(|entry| entry.breadcrumb.clone())
          .collect(),
        paths: occurrences
          .map(|entry| entry.resolved_path.clone())
          .collect(),
      });
    }
  }

  debug!(
    nodes = index.entries.len(),
    paths = index.by_path.len(),
    content = index.by_content.len(),
    "built topic index"
  );

  Ok(index)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::diagnostics::DiagnosticKind;
  use crate::models::{Branch, ContentId};
  use crate::selection::BranchSelection;

  fn build(root: &Node) -> (Index, Diagnostics) {
    build_with(root, &ResolverConfig::default(), &BranchSelection::default())
  }

  fn build_with(
    root: &Node,
    config: &ResolverConfig,
    selection: &BranchSelection,
  ) -> (Index, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let index = build_index(root, config, selection, &mut diagnostics).unwrap();
    (index, diagnostics)
  }

  fn sample() -> Node {
    Node::grouping(
      Branch::new()
        .with_child(
          "Web",
          Node::grouping(
            Branch::new()
              .with_url_path("web")
              .with_child(
                "HTML",
                Node::content(1, Branch::new().with_url_path("html")),
              )
              .with_child("Basics", Node::grouping(Branch::new().with_child("Stub", Node::Placeholder))),
          ),
        )
        .with_child("Data", Node::content(2, Branch::new().with_url_path("data"))),
    )
  }

  #[test]
  fn indexes_entries_in_preorder() {
    let (index, diagnostics) = build(&sample());
    assert!(diagnostics.is_clean());

    let titles: Vec<&str> = index.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["", "Web", "HTML", "Basics", "Stub", "Data"]);
    assert_eq!(index.entries[0].children, vec![1, 5]);
    assert_eq!(index.entries[1].children, vec![2, 3]);
  }

  #[test]
  fn transparent_nodes_inherit_parent_path() {
    let (index, _) = build(&sample());

    let basics = &index.entries[3];
    assert_eq!(basics.resolved_path, "web");
    assert!(!basics.has_own_url);
    assert!(!basics.owns_path);

    let stub = &index.entries[4];
    assert_eq!(stub.resolved_path, "web");
    assert_eq!(stub.breadcrumb, vec!["Web", "Basics", "Stub"]);
    assert!(stub.children.is_empty());

    assert_eq!(index.by_path.get("web"), Some(&1));
    assert_eq!(index.by_path.get("web/html"), Some(&2));
    assert_eq!(index.by_path.get(""), Some(&0));
  }

  #[test]
  fn reports_unroutable_content() {
    let root = Node::grouping(
      Branch::new().with_child("Loose", Node::content(8, Branch::new())),
    );
    let (index, diagnostics) = build(&root);

    assert_eq!(diagnostics.count(DiagnosticKind::UnroutableContent), 1);
    assert!(index.by_content.is_empty());
    assert_eq!(index.occurrences.get(&ContentId(8)), Some(&vec![1]));
  }

  #[test]
  fn duplicate_content_ids_name_every_occurrence_by_breadcrumb() {
    let root = Node::grouping(
      Branch::new()
        .with_child(
          "G",
          Node::grouping(Branch::new().with_child("Loose", Node::content(9, Branch::new()))),
        )
        .with_child("R", Node::content(9, Branch::new().with_url_path("r")))
        .with_child("Top", Node::content(9, Branch::new())),
    );
    let (_, diagnostics) = build(&root);

    let duplicate = diagnostics
      .iter()
      .find(|item| item.kind() == DiagnosticKind::DuplicateContentId)
      .unwrap();
    assert_eq!(
      duplicate,
      &Diagnostic::DuplicateContentId {
        content_id: ContentId(9),
        breadcrumbs: vec![
          vec!["G".into(), "Loose".into()],
          vec!["R".into()],
          vec!["Top".into()],
        ],
        paths: vec!["".into(), "r".into(), "".into()],
      }
    );
    assert_eq!(
      duplicate.to_string(),
      "content id 9 is referenced 3 times: G > Loose; R; Top"
    );
  }

  #[test]
  fn first_owner_keeps_contested_paths() {
    let root = Node::grouping(
      Branch::new()
        .with_child("One", Node::content(1, Branch::new().with_url_path("same")))
        .with_child(
          "Group",
          Node::grouping(
            Branch::new().with_child("Two", Node::content(2, Branch::new().with_url_path("same"))),
          ),
        ),
    );
    let (index, diagnostics) = build(&root);

    assert_eq!(index.by_path.get("same"), Some(&1));
    assert_eq!(index.by_content.get(&ContentId(1)), Some(&1));
    assert!(index.by_content.get(&ContentId(2)).is_none());
    assert_eq!(
      diagnostics.iter().next(),
      Some(&Diagnostic::DuplicatePath {
        path: "same".into(),
        breadcrumb: vec!["Group".into(), "Two".into()],
        owner: vec!["One".into()],
      })
    );
  }

  #[test]
  fn reports_duplicate_titles_from_programmatic_trees() {
    let root = Node::grouping(
      Branch::new()
        .with_child("Twin", Node::Placeholder)
        .with_child("Twin", Node::Placeholder),
    );
    let (index, diagnostics) = build(&root);

    assert_eq!(index.len(), 3);
    assert_eq!(diagnostics.count(DiagnosticKind::DuplicateTitle), 1);
  }

  #[test]
  fn prunes_unselected_branches() {
    let selection = BranchSelection::new(Vec::new(), vec!["web/html".into()]);
    let (index, _) = build_with(&sample(), &ResolverConfig::default(), &selection);

    assert!(index.by_path.get("web/html").is_none());
    assert!(index.by_content.get(&ContentId(1)).is_none());
    assert_eq!(index.entries[1].children.len(), 1);
  }

  #[test]
  fn aborts_past_node_limit() {
    let config = ResolverConfig {
      max_nodes: 3,
      ..ResolverConfig::default()
    };
    let mut diagnostics = Diagnostics::new();
    let error = build_index(
      &sample(),
      &config,
      &BranchSelection::default(),
      &mut diagnostics,
    )
    .unwrap_err();
    assert_eq!(error, BuildError::NodeLimitExceeded { limit: 3 });
  }

  #[test]
  fn aborts_past_depth_limit() {
    let mut node = Node::Placeholder;
    for level in 0..10 {
      node = Node::grouping(Branch::new().with_child(format!("L{level}"), node));
    }
    let config = ResolverConfig {
      max_depth: 4,
      ..ResolverConfig::default()
    };
    let mut diagnostics = Diagnostics::new();
    let error =
      build_index(&node, &config, &BranchSelection::default(), &mut diagnostics).unwrap_err();

    let BuildError::CycleDetected { limit, breadcrumb } = error else {
      panic!("expected depth guard");
    };
    assert_eq!(limit, 4);
    assert_eq!(breadcrumb.len(), 5);
  }
}
