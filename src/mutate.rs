//! Structural edits on a schema tree: delete, set, require and optional.
//!
//! Every operation resolves its path once. Paths that run into missing
//! structure degrade to no-ops so overlays can mention optional parts of a
//! schema without checking for them first. The only errors are array
//! indices that cannot be used as such.

use std::cmp::Ordering;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::PathError;
use crate::path::{parse_index, resolve, Handle, SchemaPath};
use crate::required::set_required;
use crate::types::json_type_name;

/// Remove the value at `path`.
///
/// Array elements are spliced out, so later indices shift down. The field
/// is then removed from its holder's `required` list, whether or not it
/// was listed there.
///
/// # Errors
///
/// Returns `PathError::InvalidIndex` if the container is an array and the
/// terminal segment is not a number.
pub fn delete(tree: &mut Value, path: &str) -> Result<(), PathError> {
    let path = SchemaPath::parse(path);
    let Some(handle) = resolve(&path) else {
        return Ok(());
    };
    let key = handle.terminal();

    match handle.container_mut(tree) {
        Some(Value::Array(items)) => {
            let index = array_index(&handle)?;
            if index < items.len() {
                items.remove(index);
            } else {
                debug!(%path, index, len = items.len(), "index past end, nothing to delete");
            }
        }
        Some(Value::Object(map)) => {
            if map.shift_remove(key).is_none() {
                debug!(%path, "key absent, nothing to delete");
            }
        }
        Some(other) => {
            debug!(%path, container = json_type_name(other), "cannot delete from scalar");
        }
        None => debug!(%path, "path not found, nothing to delete"),
    }

    set_required(handle.holder_mut(tree), key, false);
    Ok(())
}

/// Assign `value` at `path`, replacing or creating the terminal entry.
///
/// For arrays an index equal to the length appends. Missing intermediate
/// structure is not created; the call is then a no-op.
///
/// # Errors
///
/// Returns `PathError::InvalidIndex` for a non-numeric index into an array
/// and `PathError::IndexOutOfRange` for an index past the end.
pub fn set(tree: &mut Value, path: &str, value: Value) -> Result<(), PathError> {
    let path = SchemaPath::parse(path);
    let Some(handle) = resolve(&path) else {
        return Ok(());
    };

    match handle.container_mut(tree) {
        Some(Value::Object(map)) => {
            map.insert(handle.terminal().to_string(), value);
        }
        Some(Value::Array(items)) => {
            let index = array_index(&handle)?;
            match index.cmp(&items.len()) {
                Ordering::Less => items[index] = value,
                Ordering::Equal => items.push(value),
                Ordering::Greater => {
                    return Err(PathError::IndexOutOfRange {
                        path: path.to_string(),
                        index,
                        len: items.len(),
                    })
                }
            }
        }
        Some(other) => {
            warn!(%path, container = json_type_name(other), "cannot set a value inside a scalar");
        }
        None => warn!(%path, "container not found, value not set"),
    }

    Ok(())
}

/// Mark the field at `path` as required on its properties holder.
///
/// The value at the path is not touched and need not exist.
pub fn require(tree: &mut Value, path: &str) {
    mark(tree, path, true);
}

/// Remove the field at `path` from its holder's `required` list.
pub fn optional(tree: &mut Value, path: &str) {
    mark(tree, path, false);
}

fn mark(tree: &mut Value, path: &str, is_required: bool) {
    let path = SchemaPath::parse(path);
    let Some(handle) = resolve(&path) else {
        return;
    };

    if !handle.has_holder() {
        debug!(%path, "no properties segment, required list untouched");
    }
    set_required(handle.holder_mut(tree), handle.terminal(), is_required);
}

fn array_index(handle: &Handle<'_>) -> Result<usize, PathError> {
    let segment = handle.terminal();
    parse_index(segment).ok_or_else(|| PathError::InvalidIndex {
        path: handle.path().to_string(),
        segment: segment.to_string(),
    })
}
