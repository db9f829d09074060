//! vizrender renders visualization objects for display inside a notebook-style host document.
//!
//! An object is either a single view or an animated sequence of keyed frames. Rendering goes
//! through three steps:
//!
//! 1. **Validate**: resolve the requested format against the object's mode and bind the object to
//!    a fresh [`PlotHandle`] through a [`RenderRuntime`].
//! 2. **Dispatch**: produce the payload for the resolved format (`html`, `json`, `scrubber`,
//!    `widgets`).
//! 3. **Return** an immutable [`RenderResult`] carrying the payload and its MIME metadata.
//!
//! | Mode | Formats | `auto` |
//! |---|---|---|
//! | static | `html`, `json`, `auto` | `html` |
//! | composite | `scrubber`, `widgets`, `auto`, `none` | configured widget |
//!
//! [`Renderer::compute_options`] sizes objects for display and
//! [`Renderer::ensure_backend_ready`] runs the runtime's one-time bootstrap.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Visualization object model.
pub mod model;
/// Render dispatch.
pub mod render;
/// Rendering runtime seam and the built-in document runtime.
pub mod runtime;

pub use crate::foundation::error::{VizError, VizResult};
pub use crate::foundation::ids::ModelId;
pub use crate::model::object::{Frame, Frames, Mode, View, VisualizableObject};
pub use crate::model::options::{InMemoryOptionStore, OptionStore, OptionsMapping};
pub use crate::model::registry::{PlotTypeDescriptor, PlotTypeRegistry};
pub use crate::render::config::RendererConfig;
pub use crate::render::dispatch::{OutputProducer, change_sets};
pub use crate::render::format::{
    MIME_HTML, MIME_JSON, OutputFormat, RenderMetadata, RenderResult, ResolvedFormat,
    WidgetChoice, allowed_formats,
};
pub use crate::render::renderer::Renderer;
pub use crate::render::sizing::SizeHeuristic;
pub use crate::render::validate::{FormatValidator, Validated, resolve_format};
pub use crate::runtime::backend::{PlotContext, RenderRuntime, Widget, WidgetKind};
pub use crate::runtime::document::DocumentRuntime;
pub use crate::runtime::handle::{PlotHandle, PlotModel, PlotNode};
pub use crate::runtime::lifecycle::{BackendLifecycle, LifecycleState};
