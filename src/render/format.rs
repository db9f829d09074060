use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{VizError, VizResult};
use crate::model::object::Mode;
use crate::runtime::backend::WidgetKind;

/// MIME type of markup payloads.
pub const MIME_HTML: &str = "text/html";
/// MIME type of change-set payloads.
pub const MIME_JSON: &str = "application/json";

/// Pseudo-format resolved to the mode's default.
pub const AUTO: &str = "auto";
/// Pseudo-format meaning "do not render" (composite mode only).
pub const NONE: &str = "none";

const STATIC_FORMATS: &[&str] = &["html", "json", AUTO];
const COMPOSITE_FORMATS: &[&str] = &["scrubber", "widgets", AUTO, NONE];

/// Format names accepted for `mode`, pseudo-formats included.
pub fn allowed_formats(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Static => STATIC_FORMATS,
        Mode::Composite => COMPOSITE_FORMATS,
    }
}

/// Concrete output representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Embeddable markup.
    Html,
    /// Serialized scene-graph change-set.
    Json,
    /// Markup with a frame scrubber.
    Scrubber,
    /// Markup with a frame selection control.
    Widgets,
}

impl OutputFormat {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Scrubber => "scrubber",
            Self::Widgets => "widgets",
        }
    }

    /// MIME type of the produced payload.
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Json => MIME_JSON,
            Self::Html | Self::Scrubber | Self::Widgets => MIME_HTML,
        }
    }

    /// File extension of the produced payload, without a leading dot.
    pub fn file_ext(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html | Self::Scrubber | Self::Widgets => "html",
        }
    }

    /// Widget collaborator backing this format, if any.
    pub fn widget_kind(self) -> Option<WidgetKind> {
        match self {
            Self::Scrubber => Some(WidgetKind::Scrubber),
            Self::Widgets => Some(WidgetKind::Selection),
            Self::Html | Self::Json => None,
        }
    }

    /// Metadata describing payloads of this format.
    pub fn metadata(self) -> RenderMetadata {
        RenderMetadata {
            file_ext: self.file_ext(),
            mime_type: self.mime_type(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = VizError;

    fn from_str(s: &str) -> VizResult<Self> {
        match s {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "scrubber" => Ok(Self::Scrubber),
            "widgets" => Ok(Self::Widgets),
            other => Err(VizError::validation(format!(
                "unknown output format '{other}'"
            ))),
        }
    }
}

/// Widget format `auto` resolves to for composite objects.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetChoice {
    /// Frame scrubber.
    Scrubber,
    /// Frame selection control.
    #[default]
    Widgets,
}

impl From<WidgetChoice> for OutputFormat {
    fn from(choice: WidgetChoice) -> Self {
        match choice {
            WidgetChoice::Scrubber => Self::Scrubber,
            WidgetChoice::Widgets => Self::Widgets,
        }
    }
}

/// Outcome of format resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResolvedFormat {
    /// Produce output in this format.
    Render(OutputFormat),
    /// `none` was requested: produce nothing.
    Skip,
}

/// Metadata attached to every [`RenderResult`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderMetadata {
    /// File extension, without a leading dot.
    pub file_ext: &'static str,
    /// MIME type of the payload.
    pub mime_type: &'static str,
}

/// Immutable payload plus metadata returned by a successful render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderResult {
    payload: String,
    metadata: RenderMetadata,
}

impl RenderResult {
    /// Pair `payload` with the metadata of `format`.
    pub fn new(payload: String, format: OutputFormat) -> Self {
        Self {
            payload,
            metadata: format.metadata(),
        }
    }

    /// Rendered payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Payload metadata.
    pub fn metadata(&self) -> RenderMetadata {
        self.metadata
    }

    /// Split into payload and metadata.
    pub fn into_parts(self) -> (String, RenderMetadata) {
        (self.payload, self.metadata)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/format.rs"]
mod tests;
