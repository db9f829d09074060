//! Render dispatch: format resolution, output production and sizing.

/// Renderer settings.
pub mod config;
/// Output production per resolved format.
pub mod dispatch;
/// Output formats, the per-mode format table and render results.
pub mod format;
/// Primary renderer entry point.
pub mod renderer;
/// Display-size heuristic.
pub mod sizing;
/// Format validation against an object's mode.
pub mod validate;
