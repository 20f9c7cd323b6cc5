//! Interpret authored JSON values as typed topic nodes.

use serde_json::Value;

use crate::config::{ResolverConfig, ZeroContentPolicy};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::BuildError;
use crate::models::{Branch, ContentId, Node};
use crate::route_paths::validate_segment;

/// Parse an authored mapper value into a [`Node`].
///
/// Malformed values never abort parsing: a rejected reserved attribute is dropped and a
/// child of an unexpected type becomes a placeholder, each with a diagnostic. Only nesting
/// deeper than `max_depth` fails.
pub fn parse_node(
  value: &Value,
  config: &ResolverConfig,
  diagnostics: &mut Diagnostics,
) -> Result<Node, BuildError> {
  let mut breadcrumb = Vec::new();
  parse_at(value, &mut breadcrumb, config, diagnostics)
}

fn parse_at(
  value: &Value,
  breadcrumb: &mut Vec<String>,
  config: &ResolverConfig,
  diagnostics: &mut Diagnostics,
) -> Result<Node, BuildError> {
  let map = match value {
    Value::Bool(true) => return Ok(Node::Placeholder),
    Value::Object(map) => map,
    other => {
      diagnostics.push(Diagnostic::MalformedNode {
        breadcrumb: breadcrumb.clone(),
        attribute: None,
        reason: format!("expected `true` or an object, found {}", describe(other)),
      });
      return Ok(Node::Placeholder);
    }
  };

  if breadcrumb.len() > config.max_depth {
    return Err(BuildError::CycleDetected {
      limit: config.max_depth,
      breadcrumb: breadcrumb.clone(),
    });
  }

  let mut branch = Branch::new();
  let mut content_id = None;

  for (key, child) in map {
    if config.is_reserved(key) {
      if *key == config.url_path_key {
        branch.url_path = parse_url_path(child, key, breadcrumb, diagnostics);
      } else {
        content_id = parse_content_id(child, key, breadcrumb, config, diagnostics);
      }
      continue;
    }

    breadcrumb.push(key.clone());
    let node = parse_at(child, breadcrumb, config, diagnostics);
    breadcrumb.pop();
    branch.children.push((key.clone(), node?));
  }

  Ok(match content_id {
    Some(content_id) => Node::Content { content_id, branch },
    None => Node::Grouping(branch),
  })
}

fn parse_url_path(
  value: &Value,
  key: &str,
  breadcrumb: &[String],
  diagnostics: &mut Diagnostics,
) -> Option<String> {
  let reason = match value {
    Value::String(raw) => match validate_segment(raw) {
      Ok(segment) => return Some(segment),
      Err(err) => err.to_string(),
    },
    other => format!("expected a string url segment, found {}", describe(other)),
  };

  diagnostics.push(Diagnostic::MalformedNode {
    breadcrumb: breadcrumb.to_vec(),
    attribute: Some(key.to_string()),
    reason,
  });
  None
}

fn parse_content_id(
  value: &Value,
  key: &str,
  breadcrumb: &[String],
  config: &ResolverConfig,
  diagnostics: &mut Diagnostics,
) -> Option<ContentId> {
  match value.as_u64() {
    Some(0) => {
      diagnostics.push(Diagnostic::ZeroContentId {
        breadcrumb: breadcrumb.to_vec(),
      });
      match config.zero_content_id {
        ZeroContentPolicy::NoContent => None,
        ZeroContentPolicy::Content => Some(ContentId(0)),
      }
    }
    Some(id) => Some(ContentId(id)),
    None => {
      let reason = match value {
        Value::Number(number) => format!("content id {number} is not a non-negative integer"),
        other => format!("expected an integer content id, found {}", describe(other)),
      };
      diagnostics.push(Diagnostic::MalformedNode {
        breadcrumb: breadcrumb.to_vec(),
        attribute: Some(key.to_string()),
        reason,
      });
      None
    }
  }
}

fn describe(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(true) => "`true`",
    Value::Bool(false) => "`false`",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
