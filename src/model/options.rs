use std::collections::HashMap;

use crate::foundation::error::{VizError, VizResult};
use crate::model::object::View;

/// Mapping from plot option name to value.
///
/// Backed by an insertion-ordered `serde_json::Map`.
pub type OptionsMapping = serde_json::Map<String, serde_json::Value>;

/// Source of the plot options currently set on a view.
pub trait OptionStore: Send + Sync {
    /// Resolved plot options for `view` (type-level defaults merged with per-object overrides).
    fn plot_options(&self, view: &View) -> OptionsMapping;
}

/// In-memory option store with type-level and object-level layers.
///
/// Object-level options (keyed by view id) override type-level options (keyed by type tag).
#[derive(Clone, Debug, Default)]
pub struct InMemoryOptionStore {
    by_type: HashMap<String, OptionsMapping>,
    by_object: HashMap<String, OptionsMapping>,
}

impl InMemoryOptionStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` for every view with `type_tag`.
    pub fn set_type_option(
        &mut self,
        type_tag: impl Into<String>,
        name: impl Into<String>,
        value: serde_json::Value,
    ) {
        self.by_type
            .entry(type_tag.into())
            .or_default()
            .insert(name.into(), value);
    }

    /// Set `name` for the view with `object_id` only.
    pub fn set_object_option(
        &mut self,
        object_id: impl Into<String>,
        name: impl Into<String>,
        value: serde_json::Value,
    ) {
        self.by_object
            .entry(object_id.into())
            .or_default()
            .insert(name.into(), value);
    }
}

impl OptionStore for InMemoryOptionStore {
    fn plot_options(&self, view: &View) -> OptionsMapping {
        let mut out = self.by_type.get(&view.type_tag).cloned().unwrap_or_default();
        if let Some(local) = self.by_object.get(&view.id) {
            for (k, v) in local {
                out.insert(k.clone(), v.clone());
            }
        }
        out
    }
}

/// Read a non-negative pixel dimension from `options`.
///
/// Returns `Ok(None)` when `name` is unset. Integers and floats are accepted; anything else is a
/// validation error.
pub(crate) fn pixel_option(options: &OptionsMapping, name: &str) -> VizResult<Option<f64>> {
    let Some(value) = options.get(name) else {
        return Ok(None);
    };
    match value.as_f64() {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err(VizError::validation(format!(
            "plot option '{name}' must be a non-negative number, got {value}"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/options.rs"]
mod tests;
