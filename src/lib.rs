//! Schema Overlay
//!
//! Structural edits and fragment generators for OpenAPI-style schema documents.
//!
//! A base model is loaded into a `serde_json::Value` tree and an [`Overlay`]
//! of edits is applied to derive a variant of it without copying its
//! definition. Paths are dotted or bracketed (`properties.tags[0]`).
//!
//! # Example
//!
//! ```
//! use schema_overlay::{apply_overlay, Overlay};
//! use serde_json::json;
//!
//! let model = json!({
//!     "type": "object",
//!     "required": ["deletedAt"],
//!     "properties": {
//!         "id": { "type": "string", "format": "uuid" },
//!         "deletedAt": { "type": "string", "format": "date-time" },
//!         "name": { "type": "string" }
//!     }
//! });
//!
//! let overlay = Overlay::new()
//!     .omit("properties.id")
//!     .require("properties.name")
//!     .optional("properties.deletedAt")
//!     .include("properties.codename", json!({ "type": "string" }));
//!
//! let post = apply_overlay(model, &overlay).unwrap();
//!
//! assert!(post["properties"].get("id").is_none());
//! assert_eq!(post["required"], json!(["name"]));
//! assert_eq!(post["properties"]["codename"]["type"], "string");
//! ```
//!
//! # Edit Rules
//!
//! | Group | Effect on the value | Effect on `required` |
//! |-------|---------------------|----------------------|
//! | `require` | None | Add field name |
//! | `optional` | None | Remove field name |
//! | `omit` | Delete key / splice array element | Remove field name |
//! | `include` | Assign fragment | None |
//!
//! Groups run in that order. The `required` list belongs to the mapping
//! that contains the last `properties` segment of the path; it never holds
//! duplicates and is removed once empty. Paths into missing structure are
//! silently ignored.

mod database_entry;
mod error;
mod extend;
mod loader;
mod mutate;
mod overlay;
mod pagination;
mod path;
mod required;
mod template;
mod types;

pub use database_entry::{database_entry, database_entry_yaml, DatabaseEntryOptions, IdKind};
pub use error::{ExtendError, LoadError, PathError};
pub use extend::{extend, extend_to_yaml, ExtendContext};
pub use loader::{
    indent_block, is_url, load_schema, load_schema_str, to_yaml, FileSource, SchemaSource,
};
pub use mutate::{delete, optional, require, set};
pub use overlay::{apply_mutation, apply_overlay, Overlay};
pub use pagination::{
    pagination, pagination_yaml, PaginationOptions, DEFAULT_ITEMS_REF, DEFAULT_PAGINATION_MODEL,
};
pub use path::{parse_index, resolve, Handle, SchemaPath};
pub use required::{required_names, set_required};
pub use template::{render_fn, RenderFn, Renderer, Verbatim};
pub use types::{json_type_name, Mutation, PROPERTIES_KEY, REQUIRED_KEY};

#[cfg(feature = "remote")]
pub use loader::{fetch_text, RemoteSource};
