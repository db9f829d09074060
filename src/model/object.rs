use std::fmt;

use crate::foundation::error::{VizError, VizResult};

/// One renderable view.
///
/// `type_tag` selects the plot-type descriptor in a
/// [`PlotTypeRegistry`](crate::model::registry::PlotTypeRegistry); `id` keys per-object options
/// in an [`OptionStore`](crate::model::options::OptionStore).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct View {
    /// Stable type tag, e.g. `"Curve"`.
    pub type_tag: String,
    /// Object identifier.
    pub id: String,
    /// Human readable label, used as the plot title.
    #[serde(default)]
    pub label: String,
    /// Data payload handed to the rendering runtime untouched.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl View {
    /// Construct a view with an empty label and no data.
    pub fn new(type_tag: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            type_tag: type_tag.into(),
            id: id.into(),
            label: String::new(),
            data: serde_json::Value::Null,
        }
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the data payload.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = data;
        self
    }
}

/// One keyed frame of an animated object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frame {
    /// Frame key along the animation dimension.
    pub key: String,
    /// View shown for this key.
    pub view: View,
}

/// Ordered frames of an animated object.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frames {
    /// Name of the dimension the frames are keyed on.
    #[serde(default)]
    pub key_dim: String,
    /// Frames in key order.
    pub frames: Vec<Frame>,
}

impl Frames {
    /// Build a frame sequence; rejects empty sequences.
    pub fn new(key_dim: impl Into<String>, frames: Vec<Frame>) -> VizResult<Self> {
        let out = Self {
            key_dim: key_dim.into(),
            frames,
        };
        out.validate()?;
        Ok(out)
    }

    /// Most recent frame.
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Frame keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.frames.iter().map(|f| f.key.as_str())
    }

    pub(crate) fn validate(&self) -> VizResult<()> {
        if self.frames.is_empty() {
            return Err(VizError::validation(
                "animated object must have at least one frame",
            ));
        }
        Ok(())
    }
}

/// Entity handed to the renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualizableObject {
    /// A single-frame view.
    Single(View),
    /// A time-ordered collection of views.
    Animated(Frames),
}

/// Structural classification of a [`VisualizableObject`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Single-frame objects.
    Static,
    /// Animated objects.
    Composite,
}

impl Mode {
    /// Lowercase mode name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Composite => "composite",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VisualizableObject {
    /// Resolve the structural mode of this object.
    pub fn mode(&self) -> Mode {
        match self {
            Self::Single(_) => Mode::Static,
            Self::Animated(_) => Mode::Composite,
        }
    }

    /// View used to stand in for the whole object when sizing.
    ///
    /// Animated objects are represented by their most recent frame.
    pub fn representative(&self) -> VizResult<&View> {
        match self {
            Self::Single(view) => Ok(view),
            Self::Animated(frames) => frames
                .last()
                .map(|f| &f.view)
                .ok_or_else(|| VizError::validation("animated object has no frames")),
        }
    }

    /// Check structural invariants that deserialization cannot enforce.
    pub fn validate(&self) -> VizResult<()> {
        match self {
            Self::Single(_) => Ok(()),
            Self::Animated(frames) => frames.validate(),
        }
    }

    /// Parse an object from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        let obj: Self = serde_json::from_reader(r)
            .map_err(|e| VizError::validation(format!("parse object JSON: {e}")))?;
        obj.validate()?;
        Ok(obj)
    }

    /// Parse an object from a JSON file on disk.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            VizError::validation(format!("open object JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }
}

impl From<View> for VisualizableObject {
    fn from(view: View) -> Self {
        Self::Single(view)
    }
}

impl From<Frames> for VisualizableObject {
    fn from(frames: Frames) -> Self {
        Self::Animated(frames)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/object.rs"]
mod tests;
