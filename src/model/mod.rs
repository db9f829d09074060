//! Visualization object model consumed by the renderer.
//!
//! The renderer never owns these types' semantics beyond what is needed to dispatch: the variant
//! decides the [`Mode`](object::Mode), the type tag selects a plot-type descriptor and the option
//! store supplies per-object overrides.

/// Objects, views and their structural mode.
pub mod object;
/// Plot option mappings and stores.
pub mod options;
/// Plot-type descriptors keyed by type tag.
pub mod registry;
