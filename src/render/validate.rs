use crate::foundation::error::{VizError, VizResult};
use crate::model::object::{Mode, VisualizableObject};
use crate::render::config::RendererConfig;
use crate::render::format::{AUTO, NONE, OutputFormat, ResolvedFormat, allowed_formats};
use crate::runtime::backend::{PlotContext, RenderRuntime};
use crate::runtime::handle::PlotHandle;

/// Result of [`FormatValidator::validate`].
#[derive(Debug)]
pub enum Validated {
    /// Object bound to a fresh handle, ready for output in `format`.
    Bound {
        /// Handle owned by the current render call.
        handle: PlotHandle,
        /// Concrete format to produce.
        format: OutputFormat,
    },
    /// `none` was requested; nothing is bound or produced.
    Skipped,
}

/// Resolve `requested` against the format table of `mode`.
///
/// `auto` resolves to `html` for static objects and to `widget_default` for composite objects.
pub fn resolve_format(
    mode: Mode,
    requested: &str,
    widget_default: OutputFormat,
) -> VizResult<ResolvedFormat> {
    let allowed = allowed_formats(mode);
    if !allowed.iter().any(|f| *f == requested) {
        return Err(VizError::unsupported_format(requested, mode));
    }

    let resolved = match requested {
        NONE => return Ok(ResolvedFormat::Skip),
        AUTO => match mode {
            Mode::Static => OutputFormat::Html,
            Mode::Composite => widget_default,
        },
        name => name.parse()?,
    };
    if !allowed.iter().any(|f| *f == resolved.as_str()) {
        return Err(VizError::unsupported_format(resolved.as_str(), mode));
    }
    Ok(ResolvedFormat::Render(resolved))
}

/// Checks a requested format against an object's mode and binds the object for output.
pub struct FormatValidator<'a> {
    runtime: &'a dyn RenderRuntime,
    ctx: PlotContext<'a>,
    config: &'a RendererConfig,
}

impl<'a> FormatValidator<'a> {
    /// Validator binding through `runtime`.
    pub fn new(
        runtime: &'a dyn RenderRuntime,
        ctx: PlotContext<'a>,
        config: &'a RendererConfig,
    ) -> Self {
        Self {
            runtime,
            ctx,
            config,
        }
    }

    /// Resolve the format for `object` and bind it to a fresh [`PlotHandle`].
    ///
    /// A missing `requested` format falls back to the configured format for the object's mode.
    /// The format is resolved before binding, so an unsupported format never reaches the runtime.
    pub fn validate(
        &self,
        object: &VisualizableObject,
        requested: Option<&str>,
    ) -> VizResult<Validated> {
        object.validate()?;
        let mode = object.mode();
        let requested = requested.unwrap_or(match mode {
            Mode::Static => self.config.fig.as_str(),
            Mode::Composite => self.config.holomap.as_str(),
        });

        let format = match resolve_format(mode, requested, self.config.widget_default.into())? {
            ResolvedFormat::Skip => {
                tracing::debug!(%mode, "render skipped");
                return Ok(Validated::Skipped);
            }
            ResolvedFormat::Render(format) => format,
        };
        tracing::debug!(%mode, requested, %format, "format resolved");

        let handle = self.runtime.bind(object, self.ctx)?;
        Ok(Validated::Bound { handle, format })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/validate.rs"]
mod tests;
