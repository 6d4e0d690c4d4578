//! The rendering step that runs over schema text before it is parsed.
//!
//! Template expressions are evaluated by the host tool; this crate only
//! needs a way to hand it text and get text back.

use crate::error::LoadError;

/// Renders embedded template expressions in schema text.
pub trait Renderer {
    fn render(&self, template: &str) -> Result<String, LoadError>;
}

/// Returns the text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl Renderer for Verbatim {
    fn render(&self, template: &str) -> Result<String, LoadError> {
        Ok(template.to_string())
    }
}

/// A [`Renderer`] backed by a closure. Build one with [`render_fn`].
#[derive(Clone, Copy)]
pub struct RenderFn<F>(F);

/// Wrap a closure as a [`Renderer`].
pub fn render_fn<F>(f: F) -> RenderFn<F>
where
    F: Fn(&str) -> Result<String, LoadError>,
{
    RenderFn(f)
}

impl<F> Renderer for RenderFn<F>
where
    F: Fn(&str) -> Result<String, LoadError>,
{
    fn render(&self, template: &str) -> Result<String, LoadError> {
        (self.0)(template)
    }
}
