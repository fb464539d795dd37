use crate::context::PrettyContext;
use crate::doc::Doc;
use crate::helpers::place_comment;
use crate::infra::span;
use crate::options::{get_defaults, ConfigError, RenderOptions};
use crate::pretty_printing::pretty_print;
use crate::registry::{global_registry, PrinterError, Registry};
use crate::style::emit;
use crate::value::Inspect;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("invalid render options: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Printer(#[from] PrinterError),
}

/// Render `value` with the global registry.
pub fn render(value: &dyn Inspect, options: &RenderOptions) -> Result<String, RenderError> {
    render_with(global_registry(), value, options)
}

/// Render `value` with the global registry and the [default options](crate::get_defaults).
pub fn pformat(value: &dyn Inspect) -> Result<String, RenderError> {
    render(value, &get_defaults())
}

/// Render `value` with the printers of `registry`.
pub fn render_with(
    registry: &Registry,
    value: &dyn Inspect,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    span!("render");

    options.validate()?;
    let doc = PrettyContext::new(registry, options).pretty(value)?;
    render_doc(&place_comment(doc), options)
}

/// Lay out and display a doc.
pub fn render_doc(doc: &Doc, options: &RenderOptions) -> Result<String, RenderError> {
    options.validate()?;
    let layout = pretty_print(doc, options.max_width, options.ribbon_width);
    match &options.style_encoder {
        Some(encoder) => Ok(emit(&layout, encoder.as_ref())?),
        None => Ok(layout.to_string()),
    }
}
