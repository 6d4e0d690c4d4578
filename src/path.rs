//! Path expressions and their resolution against a schema tree.
//!
//! A path such as `properties.items[0].name` is split on runs of `.`, `[`
//! and `]` into segments. The last segment names the value being edited;
//! the segments before it are walked to find the container that holds it.

use std::fmt;

use serde_json::{Map, Value};

use crate::types::PROPERTIES_KEY;

/// A parsed path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPath {
    raw: String,
    segments: Vec<String>,
}

impl SchemaPath {
    /// Parse a dotted/bracketed path.
    ///
    /// Empty segments are dropped, so `a..b`, `a[b]` and `a.b` are the same path.
    pub fn parse(raw: &str) -> Self {
        let segments = raw
            .split(|c| matches!(c, '.' | '[' | ']'))
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    /// The path as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments walked to reach the container (all but the last).
    pub fn navigation(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, init)) => init,
            None => &[],
        }
    }

    /// The key or index of the edited value inside its container.
    pub fn terminal(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }
}

impl fmt::Display for SchemaPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for SchemaPath {
    fn from(raw: &str) -> Self {
        SchemaPath::parse(raw)
    }
}

/// Result of resolving a path: where the terminal value lives and which
/// mapping owns the `required` list for it.
///
/// The properties holder is an ancestor of the container, so the handle
/// keeps positions in the path rather than borrows into the tree. Each
/// accessor walks the tree again.
#[derive(Debug, Clone, Copy)]
pub struct Handle<'p> {
    path: &'p SchemaPath,
    holder_depth: Option<usize>,
}

/// Resolve a path into a [`Handle`].
///
/// The properties holder is the node reached just before the last
/// navigation segment literally named `properties`, i.e. the mapping that
/// contains `properties`, not the `properties` mapping itself.
///
/// Returns `None` for a path with no segments.
pub fn resolve(path: &SchemaPath) -> Option<Handle<'_>> {
    if path.is_empty() {
        return None;
    }

    let holder_depth = path
        .navigation()
        .iter()
        .rposition(|segment| segment == PROPERTIES_KEY);

    Some(Handle { path, holder_depth })
}

impl<'p> Handle<'p> {
    pub fn path(&self) -> &'p SchemaPath {
        self.path
    }

    pub fn terminal(&self) -> &'p str {
        // resolve() only builds handles for non-empty paths
        self.path.terminal().unwrap_or_default()
    }

    /// Whether a `properties` segment was traversed.
    pub fn has_holder(&self) -> bool {
        self.holder_depth.is_some()
    }

    /// The node directly holding the terminal value, if the walk reaches one.
    pub fn container<'t>(&self, tree: &'t Value) -> Option<&'t Value> {
        self.path
            .navigation()
            .iter()
            .try_fold(tree, |node, segment| descend(node, segment))
    }

    pub fn container_mut<'t>(&self, tree: &'t mut Value) -> Option<&'t mut Value> {
        walk_mut(tree, self.path.navigation())
    }

    /// The properties holder, if one was traversed and it is a mapping.
    pub fn holder_mut<'t>(&self, tree: &'t mut Value) -> Option<&'t mut Map<String, Value>> {
        let depth = self.holder_depth?;
        walk_mut(tree, &self.path.navigation()[..depth])?.as_object_mut()
    }
}

/// Parse a segment as an array index.
///
/// Only plain decimal digits are accepted; signs and whitespace are not.
/// An index too large for `usize` saturates to `usize::MAX`, which is past
/// the end of every array.
pub fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(segment.parse().unwrap_or(usize::MAX))
}

fn descend<'t>(node: &'t Value, segment: &str) -> Option<&'t Value> {
    match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => parse_index(segment).and_then(|i| items.get(i)),
        _ => None,
    }
}

fn descend_mut<'t>(node: &'t mut Value, segment: &str) -> Option<&'t mut Value> {
    match node {
        Value::Object(map) => map.get_mut(segment),
        Value::Array(items) => parse_index(segment).and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

fn walk_mut<'t>(tree: &'t mut Value, segments: &[String]) -> Option<&'t mut Value> {
    segments
        .iter()
        .try_fold(tree, |node, segment| descend_mut(node, segment))
}
