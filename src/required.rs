//! Bookkeeping for the `required` list of a properties holder.
//!
//! The list behaves as an insertion-ordered set. Adding a name also
//! collapses any repeats already in the list onto their first occurrence.
//! Removing drops the first occurrence only, and a list that ends up empty
//! is removed from the holder altogether.

use serde_json::{Map, Value};

use crate::types::REQUIRED_KEY;

/// Add `key` to, or remove it from, the holder's `required` list.
///
/// A `None` holder is a no-op: fields outside a `properties` subtree have
/// nothing to be required by. A `required` value that is not an array is
/// replaced when adding and left alone when removing.
pub fn set_required(holder: Option<&mut Map<String, Value>>, key: &str, is_required: bool) {
    let Some(holder) = holder else {
        return;
    };

    let name = Value::String(key.to_string());

    if is_required {
        match holder.get_mut(REQUIRED_KEY) {
            Some(Value::Array(list)) => {
                list.push(name);
                dedup_in_order(list);
            }
            _ => {
                holder.insert(REQUIRED_KEY.to_string(), Value::Array(vec![name]));
            }
        }
    } else if let Some(Value::Array(list)) = holder.get_mut(REQUIRED_KEY) {
        if let Some(index) = list.iter().position(|entry| *entry == name) {
            list.remove(index);
        }
    }

    let emptied = matches!(holder.get(REQUIRED_KEY), Some(Value::Array(list)) if list.is_empty());
    if emptied {
        holder.shift_remove(REQUIRED_KEY);
    }
}

/// Keep the first occurrence of each entry.
fn dedup_in_order(list: &mut Vec<Value>) {
    let mut seen: Vec<Value> = Vec::with_capacity(list.len());
    list.retain(|entry| {
        if seen.contains(entry) {
            false
        } else {
            seen.push(entry.clone());
            true
        }
    });
}

/// Names currently listed in the holder's `required` array.
pub fn required_names(holder: &Map<String, Value>) -> Vec<&str> {
    holder
        .get(REQUIRED_KEY)
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn holder(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn require_creates_list() {
        let mut h = holder(json!({ "type": "object", "properties": {} }));
        set_required(Some(&mut h), "name", true);
        assert_eq!(h["required"], json!(["name"]));
    }

    #[test]
    fn require_appends_in_order() {
        let mut h = holder(json!({ "required": ["a"] }));
        set_required(Some(&mut h), "b", true);
        set_required(Some(&mut h), "c", true);
        assert_eq!(required_names(&h), ["a", "b", "c"]);
    }

    #[test]
    fn require_is_idempotent() {
        let mut h = holder(json!({ "required": ["a", "b"] }));
        set_required(Some(&mut h), "a", true);
        set_required(Some(&mut h), "a", true);
        assert_eq!(h["required"], json!(["a", "b"]));
    }

    #[test]
    fn require_collapses_existing_duplicates() {
        let mut h = holder(json!({ "required": ["a", "a"] }));
        set_required(Some(&mut h), "a", true);
        assert_eq!(h["required"], json!(["a"]));

        let mut h = holder(json!({ "required": ["a", "b", "a", 1, 1] }));
        set_required(Some(&mut h), "c", true);
        assert_eq!(h["required"], json!(["a", "b", 1, "c"]));
    }

    #[test]
    fn readd_after_removal_goes_to_end() {
        let mut h = holder(json!({ "required": ["a", "b", "c"] }));
        set_required(Some(&mut h), "a", false);
        set_required(Some(&mut h), "a", true);
        assert_eq!(h["required"], json!(["b", "c", "a"]));
    }

    #[test]
    fn unrequire_removes_first_occurrence() {
        let mut h = holder(json!({ "required": ["a", "b", "a"] }));
        set_required(Some(&mut h), "a", false);
        assert_eq!(h["required"], json!(["b", "a"]));
    }

    #[test]
    fn unrequire_missing_name_is_noop() {
        let mut h = holder(json!({ "required": ["a"] }));
        set_required(Some(&mut h), "zzz", false);
        assert_eq!(h["required"], json!(["a"]));
    }

    #[test]
    fn unrequire_last_name_drops_key() {
        let mut h = holder(json!({ "type": "object", "required": ["a"], "properties": {} }));
        set_required(Some(&mut h), "a", false);
        assert!(!h.contains_key("required"));
        // remaining keys keep their order
        assert_eq!(h.keys().collect::<Vec<_>>(), ["type", "properties"]);
    }

    #[test]
    fn unrequire_without_list_leaves_no_list() {
        let mut h = holder(json!({ "properties": {} }));
        set_required(Some(&mut h), "a", false);
        assert!(!h.contains_key("required"));
    }

    #[test]
    fn empty_list_is_removed_on_any_call() {
        let mut h = holder(json!({ "required": [] }));
        set_required(Some(&mut h), "a", false);
        assert!(!h.contains_key("required"));
    }

    #[test]
    fn non_array_required_replaced_on_add() {
        let mut h = holder(json!({ "required": true }));
        set_required(Some(&mut h), "a", true);
        assert_eq!(h["required"], json!(["a"]));
    }

    #[test]
    fn non_array_required_kept_on_remove() {
        let mut h = holder(json!({ "required": true }));
        set_required(Some(&mut h), "a", false);
        assert_eq!(h["required"], json!(true));
    }

    #[test]
    fn none_holder_is_noop() {
        set_required(None, "a", true);
        set_required(None, "a", false);
    }

    #[test]
    fn required_names_skips_non_strings() {
        let h = holder(json!({ "required": ["a", 1, "b"] }));
        assert_eq!(required_names(&h), ["a", "b"]);
    }
}
