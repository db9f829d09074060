use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{VizError, VizResult};
use crate::render::format::{AUTO, WidgetChoice};

/// Renderer settings.
///
/// `fig` and `holomap` are the formats used when a render call passes no format, for static and
/// composite objects respectively. They are checked against the format table at render time, so
/// an invalid value surfaces as an unsupported-format error on the first render that uses it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Fallback format for static objects.
    pub fig: String,
    /// Fallback format for composite objects.
    pub holomap: String,
    /// Widget format `auto` resolves to for composite objects.
    pub widget_default: WidgetChoice,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            fig: AUTO.to_string(),
            holomap: AUTO.to_string(),
            widget_default: WidgetChoice::default(),
        }
    }
}

impl RendererConfig {
    /// Parse a config from a JSON reader; missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| VizError::validation(format!("parse renderer config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VizError::validation(format!("open renderer config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/config.rs"]
mod tests;
