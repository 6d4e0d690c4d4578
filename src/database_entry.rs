//! Common database bookkeeping fields for a model's `properties`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::loader::{indent_block, to_yaml};

/// Type of the `id` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    /// `type: string` with `format: uuid`.
    #[default]
    Uuid,
    Number,
    String,
}

impl IdKind {
    /// The JSON Schema `type` of the id.
    pub fn schema_type(&self) -> &'static str {
        match self {
            IdKind::Number => "number",
            IdKind::Uuid | IdKind::String => "string",
        }
    }
}

/// Options for [`database_entry`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseEntryOptions {
    pub id: IdKind,
    /// Adds a `deletedAt` timestamp.
    pub soft_deletion: bool,
}

impl DatabaseEntryOptions {
    pub fn new(id: IdKind) -> Self {
        Self {
            id,
            soft_deletion: false,
        }
    }

    pub fn soft_deletion(mut self, soft_deletion: bool) -> Self {
        self.soft_deletion = soft_deletion;
        self
    }
}

/// Build the `id`, `createdAt`, `updatedAt` (and optionally `deletedAt`)
/// property definitions.
pub fn database_entry(options: &DatabaseEntryOptions) -> Value {
    let mut id = Map::new();
    id.insert("type".into(), json!(options.id.schema_type()));
    if options.id == IdKind::Uuid {
        id.insert("format".into(), json!("uuid"));
    }

    let mut fields = Map::new();
    fields.insert("id".into(), Value::Object(id));
    fields.insert("createdAt".into(), timestamp());
    fields.insert("updatedAt".into(), timestamp());
    if options.soft_deletion {
        fields.insert("deletedAt".into(), timestamp());
    }

    Value::Object(fields)
}

/// [`database_entry`] as YAML indented to sit under a `properties:` key.
pub fn database_entry_yaml(options: &DatabaseEntryOptions) -> Result<String, serde_yaml::Error> {
    let yaml = to_yaml(&database_entry(options))?;
    Ok(indent_block(&yaml, 2))
}

fn timestamp() -> Value {
    json!({ "type": "string", "format": "date-time" })
}
