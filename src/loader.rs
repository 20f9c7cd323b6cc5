//! Loading authored mapper fragments from disk.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::diagnostics::Diagnostics;
use crate::models::Node;
use crate::resolver::{Built, TreeResolver};
use crate::selection::BranchSelection;
use crate::tree::{merge_subtrees, parse_node};

/// Root node assembled from fragment files, with the warnings raised while parsing them.
#[derive(Debug)]
pub struct LoadedTree {
  /// Merged root node.
  pub root: Node,
  /// Parse warnings, in fragment order.
  pub diagnostics: Diagnostics,
}

/// Read and parse a single JSON fragment.
pub fn read_fragment(path: &Path) -> Result<Value> {
  let content = fs::read_to_string(path)
    .with_context(|| format!("mapper fragment not found at {}", path.display()))?;
  serde_json::from_str(&content)
    .with_context(|| format!("failed to parse mapper fragment {}", path.display()))
}

/// Parse every configured fragment and merge them into one root.
pub fn load_root(config: &ResolverConfig, data_dir: &Path) -> Result<LoadedTree> {
  let paths = config.fragment_paths(data_dir);
  if paths.is_empty() {
    bail!("no mapper fragments configured");
  }

  let mut diagnostics = Diagnostics::new();
  let mut fragments = Vec::with_capacity(paths.len());
  for path in &paths {
    let value = read_fragment(path)?;
    let node = parse_node(&value, config, &mut diagnostics)
      .with_context(|| format!("failed to parse mapper fragment {}", path.display()))?;
    debug!(fragment = %path.display(), "loaded mapper fragment");
    fragments.push((fragment_label(path), node));
  }

  let root = if fragments.len() == 1 {
    fragments.remove(0).1
  } else {
    merge_subtrees(fragments).context("failed to merge mapper fragments")?
  };

  Ok(LoadedTree { root, diagnostics })
}

/// Discover configuration and selection in `data_dir`, then load and index the mapper.
pub fn load_index(data_dir: &Path) -> Result<Built> {
  let config = ResolverConfig::discover(data_dir);
  let selection = BranchSelection::load_from_path(config.selection_path(data_dir))?;
  let LoadedTree {
    root,
    mut diagnostics,
  } = load_root(&config, data_dir)?;

  let resolver = TreeResolver::new(config);
  let built = resolver
    .build_with(&root, &selection)
    .context("failed to build topic index")?;
  diagnostics.extend(built.diagnostics);

  Ok(Built {
    index: built.index,
    diagnostics,
  })
}

fn fragment_label(path: &Path) -> String {
  path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.display().to_string())
}
