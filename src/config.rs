//! Resolver configuration describing reserved keys, traversal limits and input layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::selection::DEFAULT_SELECTION_FILE;

/// File name searched for next to the authored topic data.
pub const DEFAULT_CONFIG_FILE: &str = "topic_index.config.json";

/// How a literal `0` content id is interpreted.
///
/// Authored data uses `0` both as a "no content yet" sentinel and, possibly, as a real
/// document id. The owner of the content store decides; either way every occurrence is
/// reported as a diagnostic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroContentPolicy {
    /// Treat the node as a navigation grouping.
    #[default]
    NoContent,
    /// Treat `0` as a regular document id.
    Content,
}

/// Discoverable resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// JSON files holding the top-level sub-trees, merged in order.
    pub fragments: Vec<String>,
    /// Optional JSON file restricting which branches are indexed.
    pub selection_file: String,
    /// Reserved key holding a node's URL segment.
    pub url_path_key: String,
    /// Reserved key holding a node's markdown content id.
    pub content_id_key: String,
    /// Maximum nesting depth before the build is aborted.
    pub max_depth: usize,
    /// Maximum number of indexed nodes before the build is aborted.
    pub max_nodes: usize,
    /// Interpretation of `0` content ids.
    pub zero_content_id: ZeroContentPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fragments: vec!["mapper.json".into()],
            selection_file: DEFAULT_SELECTION_FILE.into(),
            url_path_key: "___urlPath___".into(),
            content_id_key: "___md___".into(),
            max_depth: 64,
            max_nodes: 500_000,
            zero_content_id: ZeroContentPolicy::NoContent,
        }
    }
}

impl ResolverConfig {
    /// Attempt to load configuration from the provided directory.
    ///
    /// When the configuration file does not exist or fails to parse we fall back to default
    /// values so a bare data directory still builds.
    pub fn discover(data_dir: &Path) -> Self {
        let candidate = data_dir.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Returns `true` when `key` names a reserved attribute rather than a child topic.
    pub fn is_reserved(&self, key: &str) -> bool {
        key == self.url_path_key || key == self.content_id_key
    }
}

impl ResolverConfig {
    /// Fragment files resolved against the data directory.
    pub fn fragment_paths(&self, data_dir: &Path) -> Vec<PathBuf> {
        self.fragments
            .iter()
            .map(|fragment| data_dir.join(fragment))
            .collect()
    }

    /// Path to the local selection file.
    pub fn selection_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.selection_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let config = ResolverConfig::discover(dir.path());
        assert_eq!(config, ResolverConfig::default());
        assert_eq!(
            config.selection_path(dir.path()),
            dir.path().join(DEFAULT_SELECTION_FILE)
        );
        assert!(config.is_reserved("___md___"));
        assert!(config.is_reserved("___urlPath___"));
        assert!(!config.is_reserved("HTML"));
    }

    #[test]
    fn discover_reads_partial_configuration() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            r#"{"fragments": ["web.json", "data.json"], "max_depth": 12, "zero_content_id": "content"}"#,
        )
        .unwrap();

        let config = ResolverConfig::discover(dir.path());
        assert_eq!(config.fragments, vec!["web.json", "data.json"]);
        assert_eq!(config.max_depth, 12);
        assert_eq!(config.zero_content_id, ZeroContentPolicy::Content);
        assert_eq!(config.url_path_key, "___urlPath___");
        assert_eq!(
            config.fragment_paths(dir.path()),
            vec![dir.path().join("web.json"), dir.path().join("data.json")]
        );
    }

    #[test]
    fn discover_ignores_invalid_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(DEFAULT_CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(ResolverConfig::discover(dir.path()), ResolverConfig::default());
    }
}
