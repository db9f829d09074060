use std::collections::BTreeMap;

/// Display defaults declared by a plot type.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlotTypeDescriptor {
    /// Plot class name, e.g. `"CurvePlot"`.
    pub name: String,
    /// Default width in pixels, if the plot type declares one.
    #[serde(default)]
    pub width: Option<u32>,
    /// Default height in pixels, if the plot type declares one.
    #[serde(default)]
    pub height: Option<u32>,
}

impl PlotTypeDescriptor {
    /// Width of the base plot type.
    pub const BASE_WIDTH: u32 = 300;
    /// Height of the base plot type.
    pub const BASE_HEIGHT: u32 = 300;

    /// Descriptor with declared default size.
    pub fn sized(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Descriptor of the base plot type every other plot type derives from.
    pub fn base() -> Self {
        Self::sized("Plot", Self::BASE_WIDTH, Self::BASE_HEIGHT)
    }

    /// Declared `(width, height)` when both are present.
    pub fn declared_size(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}

/// Explicit mapping from view type tags to plot-type descriptors.
///
/// Populated once at startup; lookups go by tag only.
#[derive(Clone, Debug, Default)]
pub struct PlotTypeRegistry {
    types: BTreeMap<String, PlotTypeDescriptor>,
}

impl PlotTypeRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the built-in element plot types.
    pub fn with_builtin() -> Self {
        let mut reg = Self::new();
        for tag in [
            "Curve",
            "Scatter",
            "Points",
            "Area",
            "Histogram",
            "Bars",
            "Spikes",
            "ErrorBars",
            "Path",
            "Contours",
            "Polygons",
            "Image",
            "Raster",
            "RGB",
            "HeatMap",
            "Text",
        ] {
            reg.register(tag, PlotTypeDescriptor::sized(format!("{tag}Plot"), 300, 300));
        }
        reg.register("Table", PlotTypeDescriptor::sized("TablePlot", 400, 300));
        reg
    }

    /// Register (or replace) the descriptor for `tag`, returning the previous one.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        descriptor: PlotTypeDescriptor,
    ) -> Option<PlotTypeDescriptor> {
        self.types.insert(tag.into(), descriptor)
    }

    /// Descriptor registered for `tag`.
    pub fn get(&self, tag: &str) -> Option<&PlotTypeDescriptor> {
        self.types.get(tag)
    }

    /// Default `(width, height)` for `tag`.
    ///
    /// Unregistered tags and descriptors without a declared size fall back to the base plot.
    pub fn default_size(&self, tag: &str) -> (u32, u32) {
        self.get(tag)
            .and_then(PlotTypeDescriptor::declared_size)
            .unwrap_or((PlotTypeDescriptor::BASE_WIDTH, PlotTypeDescriptor::BASE_HEIGHT))
    }

    /// Registered tags in sorted order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/registry.rs"]
mod tests;
