//! Build orchestrator turning authored topic trees into a queryable index.

use serde_json::Value;
use tracing::debug;

use crate::config::ResolverConfig;
use crate::diagnostics::Diagnostics;
use crate::error::BuildError;
use crate::index::{Index, build_index};
use crate::models::Node;
use crate::selection::{BranchInclusion, BranchSelection};
use crate::tree::parse_node;

/// Generic build result type used across the crate.
pub type BuildResult<T> = Result<T, BuildError>;

/// A successfully built index together with every data-quality issue found on the way.
#[derive(Debug)]
pub struct Built {
  /// The immutable index.
  pub index: Index,
  /// Warnings collected while parsing and indexing.
  pub diagnostics: Diagnostics,
}

/// High-level helper for building indexes from topic trees.
#[derive(Debug, Clone, Default)]
pub struct TreeResolver {
  config: ResolverConfig,
}

impl TreeResolver {
  /// Create a resolver for the provided configuration.
  pub fn new(config: ResolverConfig) -> Self {
    Self { config }
  }

  /// Configuration the resolver builds with.
  pub fn config(&self) -> &ResolverConfig {
    &self.config
  }

  /// Index every node of `root`.
  pub fn build(&self, root: &Node) -> BuildResult<Built> {
    self.build_with(root, &BranchSelection::default())
  }

  /// Index the nodes of `root` accepted by `selection`.
  pub fn build_with<S: BranchInclusion + ?Sized>(
    &self,
    root: &Node,
    selection: &S,
  ) -> BuildResult<Built> {
    let mut diagnostics = Diagnostics::new();
    let index = build_index(root, &self.config, selection, &mut diagnostics)?;
    Ok(Built { index, diagnostics })
  }

  /// Parse an authored JSON mapper and index it.
  ///
  /// Parse warnings come first in the returned report, followed by indexing warnings.
  pub fn build_json(&self, value: &Value) -> BuildResult<Built> {
    self.build_json_with(value, &BranchSelection::default())
  }

  /// Parse an authored JSON mapper and index the nodes accepted by `selection`.
  pub fn build_json_with<S: BranchInclusion + ?Sized>(
    &self,
    value: &Value,
    selection: &S,
  ) -> BuildResult<Built> {
    let mut diagnostics = Diagnostics::new();
    let root = parse_node(value, &self.config, &mut diagnostics)?;
    debug!(warnings = diagnostics.len(), "parsed topic mapper");

    let Built {
      index,
      diagnostics: indexing,
    } = self.build_with(&root, selection)?;
    diagnostics.extend(indexing);
    Ok(Built { index, diagnostics })
  }
}
