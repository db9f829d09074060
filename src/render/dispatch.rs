use serde_json::json;

use crate::foundation::error::{VizError, VizResult};
use crate::model::options::OptionsMapping;
use crate::render::format::{OutputFormat, RenderResult};
use crate::runtime::backend::RenderRuntime;
use crate::runtime::handle::PlotHandle;

/// Produces the payload for a validated `(handle, format)` pair.
///
/// Read-only with respect to the handle and the runtime.
pub struct OutputProducer<'a> {
    runtime: &'a dyn RenderRuntime,
}

impl<'a> OutputProducer<'a> {
    /// Producer rendering through `runtime`.
    pub fn new(runtime: &'a dyn RenderRuntime) -> Self {
        Self { runtime }
    }

    /// Render `handle` as `format`.
    pub fn dispatch(&self, handle: &PlotHandle, format: OutputFormat) -> VizResult<RenderResult> {
        let payload = if let Some(kind) = format.widget_kind() {
            self.runtime.widget(kind, handle)?.render()?
        } else {
            match format {
                OutputFormat::Html => format!("<center>{}</center>", self.figure_data(handle)?),
                OutputFormat::Json => change_set_json(handle)?,
                other => {
                    return Err(VizError::unhandled_format(format!(
                        "'{other}' passed validation but has no output branch"
                    )));
                }
            }
        };
        Ok(RenderResult::new(payload, format))
    }

    /// Embeddable markup for the handle's root state, without the centering container.
    pub fn figure_data(&self, handle: &PlotHandle) -> VizResult<String> {
        self.runtime.embed(handle)
    }
}

/// Collect `{id -> {type, data}}` change-sets over the plot tree, depth-first.
pub fn change_sets(handle: &PlotHandle) -> OptionsMapping {
    let mut data = OptionsMapping::new();
    for model in handle.root().all_models() {
        data.insert(
            model.id().to_string(),
            json!({
                "type": model.type_name(),
                "data": model.serialize(true),
            }),
        );
    }
    data
}

fn change_set_json(handle: &PlotHandle) -> VizResult<String> {
    serde_json::to_string(&change_sets(handle))
        .map_err(|e| VizError::serde(format!("serialize change-sets: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/dispatch.rs"]
mod tests;
