//! Rendering runtime seam.
//!
//! The renderer talks to the concrete plotting engine only through [`backend::RenderRuntime`].
//! [`document::DocumentRuntime`] is the built-in implementation.

/// Runtime and widget traits.
pub mod backend;
/// Built-in HTML document runtime.
pub mod document;
/// Plot handles and their scene-graph model tree.
pub mod handle;
/// One-time runtime bootstrap tracking.
pub mod lifecycle;
