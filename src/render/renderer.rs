use std::sync::Arc;

use crate::foundation::error::{VizError, VizResult};
use crate::model::object::VisualizableObject;
use crate::model::options::{InMemoryOptionStore, OptionStore, OptionsMapping};
use crate::model::registry::PlotTypeRegistry;
use crate::render::config::RendererConfig;
use crate::render::dispatch::OutputProducer;
use crate::render::format::RenderResult;
use crate::render::sizing::SizeHeuristic;
use crate::render::validate::{FormatValidator, Validated};
use crate::runtime::backend::{PlotContext, RenderRuntime};
use crate::runtime::handle::PlotHandle;
use crate::runtime::lifecycle::BackendLifecycle;

/// Entry point tying format validation, output production, sizing and runtime lifecycle together.
///
/// A `Renderer` is `Send + Sync`; each render call binds its own [`PlotHandle`] and drops it before
/// returning.
pub struct Renderer {
    config: RendererConfig,
    runtime: Arc<dyn RenderRuntime>,
    registry: PlotTypeRegistry,
    options: Box<dyn OptionStore>,
    lifecycle: BackendLifecycle,
}

impl Renderer {
    /// Renderer over `runtime` with default config, the built-in plot types and no plot options.
    pub fn new(runtime: Arc<dyn RenderRuntime>) -> Self {
        Self {
            config: RendererConfig::default(),
            runtime,
            registry: PlotTypeRegistry::with_builtin(),
            options: Box::new(InMemoryOptionStore::new()),
            lifecycle: BackendLifecycle::new(),
        }
    }

    /// Replace the config.
    pub fn with_config(mut self, config: RendererConfig) -> Self {
        self.config = config;
        self
    }

    /// Replace the plot-type registry.
    pub fn with_registry(mut self, registry: PlotTypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the option store.
    pub fn with_option_store(mut self, options: impl OptionStore + 'static) -> Self {
        self.options = Box::new(options);
        self
    }

    /// Active config.
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Runtime lifecycle.
    pub fn lifecycle(&self) -> &BackendLifecycle {
        &self.lifecycle
    }

    fn ctx(&self) -> PlotContext<'_> {
        PlotContext {
            registry: &self.registry,
            options: self.options.as_ref(),
        }
    }

    /// Render `object` as `format` (`None` uses the configured per-mode format).
    ///
    /// Returns `Ok(None)` when composite rendering is switched off with `none`.
    #[tracing::instrument(skip(self, object), fields(mode = %object.mode()))]
    pub fn render(
        &self,
        object: &VisualizableObject,
        format: Option<&str>,
    ) -> VizResult<Option<RenderResult>> {
        let validator = FormatValidator::new(self.runtime.as_ref(), self.ctx(), &self.config);
        match validator.validate(object, format)? {
            Validated::Skipped => Ok(None),
            Validated::Bound { handle, format } => {
                let out = OutputProducer::new(self.runtime.as_ref()).dispatch(&handle, format)?;
                Ok(Some(out))
            }
        }
    }

    /// Bind `object` to a plot handle without rendering it.
    pub fn plot(&self, object: &VisualizableObject) -> VizResult<PlotHandle> {
        object.validate()?;
        self.runtime.bind(object, self.ctx())
    }

    /// Embeddable markup for a bound plot, without the centering container.
    pub fn figure_data(&self, handle: &PlotHandle) -> VizResult<String> {
        OutputProducer::new(self.runtime.as_ref()).figure_data(handle)
    }

    /// Display size `(width, height)` of a bound plot.
    pub fn plot_size(&self, handle: &PlotHandle) -> VizResult<(u32, u32)> {
        handle.size()
    }

    /// Plot options for `object` with display size scaled to `percent_size` percent.
    #[tracing::instrument(skip(self, object))]
    pub fn compute_options(
        &self,
        object: &VisualizableObject,
        percent_size: u32,
    ) -> VizResult<OptionsMapping> {
        SizeHeuristic::new(self.ctx()).compute_options(object, percent_size)
    }

    /// Resolve the runtime and run its one-time bootstrap.
    pub fn ensure_backend_ready(&self, options: &OptionsMapping) -> VizResult<()> {
        self.lifecycle.validate(self.runtime.as_ref(), options)
    }

    /// Save `object` to disk. Always fails: persistence is not supported.
    pub fn save(
        &self,
        _object: &VisualizableObject,
        basename: &str,
        format: Option<&str>,
        _key: &OptionsMapping,
        _info: &OptionsMapping,
        _options: Option<&OptionsMapping>,
    ) -> VizResult<()> {
        Err(VizError::not_implemented(format!(
            "saving '{basename}' as {} is not supported by the {} backend",
            format.unwrap_or("auto"),
            self.runtime.name()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
