/// Normalise a requested path into the form used as an index key.
///
/// Leading, trailing and repeated slashes carry no meaning, so `/a//b/` and `a/b` address the
/// same node. The root is the empty string.
pub fn normalise_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Append a validated segment to an already normalised path.
pub fn join_segment(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}/{segment}")
    }
}

/// Produce the absolute link target for a resolved path.
pub fn href(path: &str) -> String {
    format!("/{path}")
}

/// Returns `true` when `candidate` is `scope` itself or lies below it.
///
/// Matching is segment aware: `web` contains `web/html` but not `webassembly`. The empty scope
/// is the root and contains every path.
pub fn scope_contains(scope: &str, candidate: &str) -> bool {
    if scope.is_empty() || candidate == scope {
        return true;
    }

    candidate
        .strip_prefix(scope)
        .is_some_and(|suffix| suffix.starts_with('/'))
}
