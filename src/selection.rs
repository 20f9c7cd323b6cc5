//! Helpers used to filter which branches of the topic tree are indexed.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::route_paths::{normalise_path, scope_contains};

/// Trait describing selection filters applied while indexing.
pub trait BranchInclusion {
  /// Returns `true` when a node resolving to `path` should be indexed.
  fn is_included(&self, path: &str) -> bool;
}

/// Default selection file name searched for next to the topic data.
pub const DEFAULT_SELECTION_FILE: &str = "topic_index.local.json";

/// Configuration file layout for selecting which branches to index.
#[derive(Debug, Default, Deserialize)]
struct BranchSelectionFile {
  #[serde(default)]
  include: Vec<String>,
  #[serde(default)]
  exclude: Vec<String>,
}

/// Selection helper scoping a build to parts of the tree by resolved path.
#[derive(Debug, Clone, Default)]
pub struct BranchSelection {
  include: Option<BTreeSet<String>>,
  exclude: BTreeSet<String>,
}

/// Errors that can occur while loading the selection configuration.
#[derive(Debug, Error)]
pub enum SelectionError {
  /// Failed to read the selection file from disk.
  #[error("failed to read {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON selection file.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl BranchSelection {
  /// Load configuration from the selection file if present.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, SelectionError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(SelectionError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    let file: BranchSelectionFile =
      serde_json::from_str(&contents).map_err(|err| SelectionError::Parse {
        path: path.to_path_buf(),
        source: err,
      })?;
    Ok(Self::from(file))
  }

  /// Build a selection from explicit scope lists.
  pub fn new(
    include: impl IntoIterator<Item = String>,
    exclude: impl IntoIterator<Item = String>,
  ) -> Self {
    Self::from(BranchSelectionFile {
      include: include.into_iter().collect(),
      exclude: exclude.into_iter().collect(),
    })
  }

  /// Determine whether a node resolving to `path` should be indexed.
  ///
  /// Ancestors of an included scope stay reachable so the included branch keeps its
  /// breadcrumb trail.
  pub fn is_included(&self, path: &str) -> bool {
    if self
      .exclude
      .iter()
      .any(|scope| scope_contains(scope, path))
    {
      return false;
    }

    match &self.include {
      Some(include) => include
        .iter()
        .any(|scope| scope_contains(scope, path) || scope_contains(path, scope)),
      None => true,
    }
  }

  /// Returns true when no filtering rules are active.
  pub fn is_unfiltered(&self) -> bool {
    self.include.as_ref().is_none() && self.exclude.is_empty()
  }
}

impl BranchInclusion for BranchSelection {
  fn is_included(&self, path: &str) -> bool {
    BranchSelection::is_included(self, path)
  }
}

impl From<BranchSelectionFile> for BranchSelection {
  fn from(file: BranchSelectionFile) -> Self {
    let include = normalise_list(file.include);
    let exclude = normalise_list(file.exclude);

    Self {
      include: (!include.is_empty()).then_some(include),
      exclude,
    }
  }
}

/// Convert a list of raw scopes into a sorted, de-duplicated set.
///
/// Values are trimmed and empty entries are discarded; an empty scope would otherwise match
/// the whole tree.
fn normalise_list(values: impl IntoIterator<Item = String>) -> BTreeSet<String> {
  values
    .into_iter()
    .map(|value| normalise_path(value.trim()))
    .filter(|value| !value.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_to_including_all_branches() {
    let selection = BranchSelection::default();
    assert!(selection.is_included("any"));
    assert!(selection.is_included(""));
    assert!(selection.is_unfiltered());
  }

  #[test]
  fn excludes_nested_branches_with_parent_scope() {
    let selection = BranchSelection::new(Vec::new(), vec!["drafts".into()]);

    assert!(!selection.is_included("drafts"));
    assert!(!selection.is_included("drafts/module-a"));
    assert!(selection.is_included("draftsman"));
    assert!(selection.is_included(""));
  }

  #[test]
  fn keeps_ancestors_of_included_scopes() {
    let selection = BranchSelection::new(vec!["web/html".into()], Vec::new());

    assert!(selection.is_included(""));
    assert!(selection.is_included("web"));
    assert!(selection.is_included("web/html"));
    assert!(selection.is_included("web/html/forms"));
    assert!(!selection.is_included("web/css"));
    assert!(!selection.is_included("data"));
  }

  #[test]
  fn exclusion_wins_over_inclusion() {
    let selection = BranchSelection::new(
      vec!["web".into()],
      vec!["web/legacy".into(), " /web/drafts/ ".into()],
    );

    assert!(selection.is_included("web/html"));
    assert!(!selection.is_included("web/legacy"));
    assert!(!selection.is_included("web/drafts/one"));
  }

  #[test]
  fn normalises_whitespace_slashes_and_duplicates() {
    let normalised: Vec<String> = normalise_list(vec![
      "  a  ".into(),
      "/b/".into(),
      "a".into(),
      String::new(),
      "/".into(),
    ])
    .into_iter()
    .collect();

    assert_eq!(normalised, vec![String::from("a"), String::from("b")]);
  }

  #[test]
  fn load_from_path_returns_default_for_missing_file() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_SELECTION_FILE);

    let selection = BranchSelection::load_from_path(&path)
      .expect("missing files should not produce an error");

    assert!(selection.is_unfiltered());
  }

  #[test]
  fn load_from_path_reads_configuration() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_SELECTION_FILE);
    std::fs::write(&path, r#"{"include": ["web"], "exclude": ["web/old", ""]}"#)
      .expect("failed to write selection file");

    let selection =
      BranchSelection::load_from_path(&path).expect("configuration should load successfully");

    assert!(!selection.is_unfiltered());
    assert!(selection.is_included("web/html"));
    assert!(!selection.is_included("web/old"));
    assert!(!selection.is_included("data"));
  }

  #[test]
  fn load_from_path_reports_parse_errors() {
    let temp = tempdir().expect("failed to create temp dir");
    let path = temp.path().join(DEFAULT_SELECTION_FILE);
    std::fs::write(&path, "[1, 2").expect("failed to write selection file");

    let error = BranchSelection::load_from_path(&path).unwrap_err();
    assert!(matches!(error, SelectionError::Parse { .. }));
    assert!(error.to_string().starts_with("failed to parse"));
  }
}
