/// Error taxonomy shared by every renderer API.
pub mod error;
/// Stable identifiers for scene-graph models.
pub mod ids;
