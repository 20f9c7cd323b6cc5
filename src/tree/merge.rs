//! Compose independently authored sub-trees into a single root.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{MergeConflict, MergeError};
use crate::models::{Branch, ContentId, Node};

/// Shallow-merge labelled fragments into one root node.
///
/// Top-level titles are appended in fragment order. Unlike an object spread, a title or
/// routing attribute defined by two fragments is an error instead of a silent overwrite.
/// Every conflict is collected before failing.
pub fn merge_subtrees<I, L>(fragments: I) -> Result<Node, MergeError>
where
  I: IntoIterator<Item = (L, Node)>,
  L: Into<String>,
{
  let mut merged = Branch::new();
  let mut url_owner: Option<String> = None;
  let mut content: Option<(ContentId, String)> = None;
  let mut title_owners: HashMap<String, String> = HashMap::new();
  let mut conflicts = Vec::new();

  for (label, node) in fragments {
    let label = label.into();
    let (content_id, branch) = match node {
      Node::Placeholder => return Err(MergeError::NotABranch { fragment: label }),
      Node::Grouping(branch) => (None, branch),
      Node::Content { content_id, branch } => (Some(content_id), branch),
    };
    debug!(
      fragment = %label,
      topics = branch.children.len(),
      "merging fragment"
    );

    if let Some(segment) = branch.url_path {
      match &url_owner {
        Some(first) => conflicts.push(MergeConflict {
          key: "url path".into(),
          first: first.clone(),
          second: label.clone(),
        }),
        None => {
          merged.url_path = Some(segment);
          url_owner = Some(label.clone());
        }
      }
    }

    if let Some(content_id) = content_id {
      match &content {
        Some((_, first)) => conflicts.push(MergeConflict {
          key: "content id".into(),
          first: first.clone(),
          second: label.clone(),
        }),
        None => content = Some((content_id, label.clone())),
      }
    }

    for (title, child) in branch.children {
      if let Some(first) = title_owners.get(&title) {
        conflicts.push(MergeConflict {
          key: title,
          first: first.clone(),
          second: label.clone(),
        });
        continue;
      }
      title_owners.insert(title.clone(), label.clone());
      merged.children.push((title, child));
    }
  }

  if !conflicts.is_empty() {
    return Err(MergeError::Conflict { conflicts });
  }

  Ok(match content {
    Some((content_id, _)) => Node::Content {
      content_id,
      branch: merged,
    },
    None => Node::Grouping(merged),
  })
}
