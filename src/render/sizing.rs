use serde_json::json;

use crate::foundation::error::VizResult;
use crate::model::object::VisualizableObject;
use crate::model::options::{OptionsMapping, pixel_option};
use crate::runtime::backend::PlotContext;

/// Display-size heuristic.
///
/// Scaling a multi-panel object linearly multiplies its footprint per panel, so animated objects
/// are sized by their most recent frame alone. Explicit `width`/`height` plot options on the
/// object always take precedence over the plot type's defaults.
pub struct SizeHeuristic<'a> {
    ctx: PlotContext<'a>,
}

impl<'a> SizeHeuristic<'a> {
    /// Heuristic reading plot types and options from `ctx`.
    pub fn new(ctx: PlotContext<'a>) -> Self {
        Self { ctx }
    }

    /// Resolved plot options for `object` with `width`/`height` scaled by `percent_size / 100`.
    ///
    /// Scaled dimensions are truncated towards zero.
    pub fn compute_options(
        &self,
        object: &VisualizableObject,
        percent_size: u32,
    ) -> VizResult<OptionsMapping> {
        let factor = f64::from(percent_size) / 100.0;
        let view = object.representative()?;
        let mut options = self.ctx.options.plot_options(view);
        let (default_w, default_h) = self.ctx.registry.default_size(&view.type_tag);

        let width = pixel_option(&options, "width")?.unwrap_or(f64::from(default_w)) * factor;
        let height = pixel_option(&options, "height")?.unwrap_or(f64::from(default_h)) * factor;
        options.insert("width".to_string(), json!(width.trunc() as u64));
        options.insert("height".to_string(), json!(height.trunc() as u64));
        Ok(options)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sizing.rs"]
mod tests;
