//! The `extend` helper: derive a schema from a referenced base model.
//!
//! ```text
//! {{ extend('./model.yml', { omit: ['properties.id'], require: ['properties.name'] }) }}
//! ```
//!
//! The base model is read through a [`SchemaSource`], rendered, parsed,
//! overlaid and dumped back to YAML for the host template to splice in.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::{ExtendError, LoadError};
use crate::loader::{load_schema_str, to_yaml, SchemaSource};
use crate::overlay::Overlay;
use crate::template::Renderer;

/// Everything `extend` needs from the file being templated.
#[derive(Clone, Copy)]
pub struct ExtendContext<'a> {
    base_dir: &'a Path,
    source: &'a dyn SchemaSource,
    renderer: &'a dyn Renderer,
}

impl<'a> ExtendContext<'a> {
    /// Resolve model references against `base_dir`.
    pub fn new(
        base_dir: &'a Path,
        source: &'a dyn SchemaSource,
        renderer: &'a dyn Renderer,
    ) -> Self {
        Self {
            base_dir,
            source,
            renderer,
        }
    }

    /// Resolve model references against the directory of `current_file`.
    pub fn for_file(
        current_file: &'a Path,
        source: &'a dyn SchemaSource,
        renderer: &'a dyn Renderer,
    ) -> Self {
        Self::new(
            current_file.parent().unwrap_or(Path::new(".")),
            source,
            renderer,
        )
    }

    pub fn base_dir(&self) -> &Path {
        self.base_dir
    }

    /// Where `model_path` points, relative to the base directory.
    pub fn model_location(&self, model_path: &str) -> PathBuf {
        self.base_dir.join(model_path)
    }
}

/// Load the model at `model_path` and apply `overlay` to it.
///
/// # Errors
///
/// Read, render and parse failures are returned as `ExtendError::Load`;
/// an unusable array index in the overlay as `ExtendError::Path`.
pub fn extend(
    ctx: &ExtendContext<'_>,
    model_path: &str,
    overlay: &Overlay,
) -> Result<Value, ExtendError> {
    let mut model = load_model(ctx, model_path)?;

    debug!(
        model = %ctx.model_location(model_path).display(),
        edits = overlay.mutations().count(),
        "extending model"
    );
    overlay.apply(&mut model)?;

    Ok(model)
}

/// Like [`extend`], dumping the result as YAML text.
pub fn extend_to_yaml(
    ctx: &ExtendContext<'_>,
    model_path: &str,
    overlay: &Overlay,
) -> Result<String, ExtendError> {
    let model = extend(ctx, model_path, overlay)?;
    to_yaml(&model).map_err(|source| ExtendError::Serialize { source })
}

fn load_model(ctx: &ExtendContext<'_>, model_path: &str) -> Result<Value, LoadError> {
    let raw = ctx.source.read(model_path, ctx.base_dir)?;
    let rendered = ctx.renderer.render(&raw)?;
    load_schema_str(&rendered)
}
