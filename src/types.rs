//! Core types shared by the overlay engine.

use serde_json::Value;

/// Key whose parent owns the `required` list.
pub const PROPERTIES_KEY: &str = "properties";

/// Key of the list of mandatory property names.
pub const REQUIRED_KEY: &str = "required";

/// Returns the JSON type name for log and error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A single structural edit, borrowed from an [`Overlay`](crate::Overlay).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mutation<'a> {
    /// Add the field to its holder's `required` list.
    Require(&'a str),
    /// Remove the field from its holder's `required` list.
    Optional(&'a str),
    /// Delete the field (and unrequire it).
    Omit(&'a str),
    /// Assign a fragment at the path.
    Include(&'a str, &'a Value),
}

impl Mutation<'_> {
    /// Name of the overlay group this mutation belongs to.
    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Require(_) => "require",
            Mutation::Optional(_) => "optional",
            Mutation::Omit(_) => "omit",
            Mutation::Include(..) => "include",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Mutation::Require(path)
            | Mutation::Optional(path)
            | Mutation::Omit(path)
            | Mutation::Include(path, _) => path,
        }
    }
}
