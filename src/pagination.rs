//! Paginated list responses: a `meta` block plus a `data` array.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{ExtendError, LoadError};
use crate::loader::{load_schema_str, to_yaml};
use crate::template::Renderer;

/// Default reference for the `meta` block.
pub const DEFAULT_PAGINATION_MODEL: &str = "#/components/schemas/Meta";

/// Items reference used when neither a path nor a template is given.
pub const DEFAULT_ITEMS_REF: &str = "./model.yml";

/// Options for [`pagination`].
///
/// A bare string is shorthand for `path`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaginationOptions {
    /// Reference for `data.items`.
    pub path: Option<String>,
    /// Template rendered and inlined as `data.items` when `path` is unset.
    pub template: Option<String>,
    /// Reference for `meta`.
    pub pagination_model: Option<String>,
    /// Required top-level fields; `None` means `[meta, data]`.
    pub required: Option<Vec<String>>,
}

impl PaginationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn pagination_model(mut self, reference: impl Into<String>) -> Self {
        self.pagination_model = Some(reference.into());
        self
    }

    pub fn required<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// The required list after defaulting.
    pub fn required_fields(&self) -> Vec<String> {
        match &self.required {
            Some(fields) => fields.clone(),
            None => vec!["meta".to_string(), "data".to_string()],
        }
    }
}

impl From<&str> for PaginationOptions {
    fn from(path: &str) -> Self {
        PaginationOptions::new().path(path)
    }
}

/// Build a paginated object schema.
///
/// # Errors
///
/// Only the template path can fail: rendering errors and YAML parse errors
/// of the rendered template are returned as-is.
pub fn pagination(
    options: &PaginationOptions,
    renderer: &dyn Renderer,
) -> Result<Value, LoadError> {
    let items = match (&options.path, &options.template) {
        (Some(path), _) => reference(path),
        (None, Some(template)) => load_schema_str(&renderer.render(template)?)?,
        (None, None) => reference(DEFAULT_ITEMS_REF),
    };

    let meta = reference(
        options
            .pagination_model
            .as_deref()
            .unwrap_or(DEFAULT_PAGINATION_MODEL),
    );

    let mut schema = Map::new();
    schema.insert("type".into(), json!("object"));

    let required = options.required_fields();
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }

    schema.insert(
        "properties".into(),
        json!({
            "meta": meta,
            "data": {
                "type": "array",
                "items": items
            }
        }),
    );

    Ok(Value::Object(schema))
}

/// [`pagination`] dumped as YAML.
pub fn pagination_yaml(
    options: &PaginationOptions,
    renderer: &dyn Renderer,
) -> Result<String, ExtendError> {
    let schema = pagination(options, renderer)?;
    to_yaml(&schema).map_err(|source| ExtendError::Serialize { source })
}

fn reference(target: &str) -> Value {
    json!({ "$ref": target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{render_fn, Verbatim};

    #[test]
    fn path_shorthand_with_defaults() {
        let schema = pagination(&PaginationOptions::from("./model.yml"), &Verbatim).unwrap();

        assert_eq!(
            schema,
            json!({
                "type": "object",
                "required": ["meta", "data"],
                "properties": {
                    "meta": { "$ref": "#/components/schemas/Meta" },
                    "data": {
                        "type": "array",
                        "items": { "$ref": "./model.yml" }
                    }
                }
            })
        );
    }

    #[test]
    fn empty_required_is_omitted() {
        let options = PaginationOptions::from("#/components/schemas/Pagination")
            .required(Vec::<String>::new());
        let schema = pagination(&options, &Verbatim).unwrap();

        assert!(schema.get("required").is_none());
        assert_eq!(
            schema["properties"]["data"]["items"],
            json!({ "$ref": "#/components/schemas/Pagination" })
        );
    }

    #[test]
    fn custom_required_and_meta() {
        let options = PaginationOptions::new()
            .path("#/components/schemas/Pagination")
            .pagination_model("#/components/schemas/PaginationAlt")
            .required(["data"]);
        let schema = pagination(&options, &Verbatim).unwrap();

        assert_eq!(schema["required"], json!(["data"]));
        assert_eq!(
            schema["properties"]["meta"],
            json!({ "$ref": "#/components/schemas/PaginationAlt" })
        );
    }

    #[test]
    fn no_path_or_template_uses_default_ref() {
        let schema = pagination(&PaginationOptions::new(), &Verbatim).unwrap();
        assert_eq!(
            schema["properties"]["data"]["items"],
            json!({ "$ref": "./model.yml" })
        );
    }

    #[test]
    fn template_is_rendered_and_inlined() {
        let options = PaginationOptions::new()
            .template("type: object\nproperties:\n  asdf:\n    type: {{ t }}\n    format: uuid\n");
        let renderer = render_fn(|text| Ok(text.replace("{{ t }}", "number")));
        let schema = pagination(&options, &renderer).unwrap();

        assert_eq!(
            schema["properties"]["data"]["items"],
            json!({
                "type": "object",
                "properties": {
                    "asdf": { "type": "number", "format": "uuid" }
                }
            })
        );
    }

    #[test]
    fn path_wins_over_template() {
        let options = PaginationOptions::new()
            .path("#/components/schemas/A")
            .template("type: string");
        let schema = pagination(&options, &Verbatim).unwrap();
        assert_eq!(
            schema["properties"]["data"]["items"],
            json!({ "$ref": "#/components/schemas/A" })
        );
    }

    #[test]
    fn broken_template_errors() {
        let options = PaginationOptions::new().template("type: [oops");
        let result = pagination(&options, &Verbatim);
        assert!(matches!(result, Err(LoadError::InvalidYaml { .. })));
    }

    #[test]
    fn options_from_template_record() {
        let options: PaginationOptions = serde_json::from_value(json!({
            "path": "#/components/schemas/Pagination",
            "paginationModel": "#/components/schemas/PaginationAlt",
            "required": []
        }))
        .unwrap();

        assert_eq!(
            options.pagination_model.as_deref(),
            Some("#/components/schemas/PaginationAlt")
        );
        assert!(options.required_fields().is_empty());
    }

    #[test]
    fn yaml_keeps_field_order() {
        let yaml = pagination_yaml(&PaginationOptions::from("./user.yml"), &Verbatim).unwrap();
        let type_at = yaml.find("type: object").unwrap();
        let required_at = yaml.find("required:").unwrap();
        let properties_at = yaml.find("properties:").unwrap();
        assert!(type_at < required_at && required_at < properties_at);
    }
}
