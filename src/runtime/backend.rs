use crate::foundation::error::VizResult;
use crate::model::object::VisualizableObject;
use crate::model::options::{OptionStore, OptionsMapping};
use crate::model::registry::PlotTypeRegistry;
use crate::runtime::handle::PlotHandle;

/// Object-model lookups a runtime may consult while binding an object.
#[derive(Clone, Copy)]
pub struct PlotContext<'a> {
    /// Plot-type descriptors by type tag.
    pub registry: &'a PlotTypeRegistry,
    /// Currently set plot options.
    pub options: &'a dyn OptionStore,
}

/// Interactive navigation control for animated plots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    /// Slider with playback over the frame keys.
    Scrubber,
    /// Drop-down selection of a frame key.
    Selection,
}

/// A widget bound to one plot handle.
pub trait Widget {
    /// Render the widget together with the frames it navigates as an HTML fragment.
    fn render(&self) -> VizResult<String>;
}

/// External rendering runtime.
///
/// Implementations must be cheap to share between threads; all per-render state lives in the
/// [`PlotHandle`] returned by [`RenderRuntime::bind`].
pub trait RenderRuntime: Send + Sync {
    /// Short backend name, e.g. `"document"`.
    fn name(&self) -> &str;

    /// Resolve the runtime. Fails with [`VizError::BackendUnavailable`] when it cannot be loaded.
    ///
    /// [`VizError::BackendUnavailable`]: crate::VizError::BackendUnavailable
    fn probe(&self) -> VizResult<()>;

    /// One-time bootstrap of the interactive host environment.
    fn bootstrap(&self, options: &OptionsMapping) -> VizResult<()>;

    /// Bind `object` to a fresh plot handle.
    fn bind(&self, object: &VisualizableObject, ctx: PlotContext<'_>) -> VizResult<PlotHandle>;

    /// Embeddable markup for the handle's root state.
    fn embed(&self, handle: &PlotHandle) -> VizResult<String>;

    /// Construct the widget of `kind` bound to `handle`.
    fn widget<'h>(
        &self,
        kind: WidgetKind,
        handle: &'h PlotHandle,
    ) -> VizResult<Box<dyn Widget + 'h>>;
}
