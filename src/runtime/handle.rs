use std::collections::BTreeSet;

use crate::foundation::error::{VizError, VizResult};
use crate::foundation::ids::ModelId;
use crate::model::options::OptionsMapping;

/// One serializable scene-graph object.
///
/// Tracks which properties were mutated since the last time it was marked clean so that
/// incremental change-sets can be produced.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotModel {
    id: ModelId,
    type_name: String,
    props: OptionsMapping,
    changed: BTreeSet<String>,
}

impl PlotModel {
    /// New model with no properties.
    pub fn new(id: ModelId, type_name: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            props: OptionsMapping::new(),
            changed: BTreeSet::new(),
        }
    }

    /// Builder form of [`PlotModel::set`].
    pub fn with(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.set(name, value);
        self
    }

    /// Set a property and record it as changed.
    pub fn set(&mut self, name: impl Into<String>, value: serde_json::Value) {
        let name = name.into();
        self.changed.insert(name.clone());
        self.props.insert(name, value);
    }

    /// Stable identifier.
    pub fn id(&self) -> &ModelId {
        &self.id
    }

    /// Scene-graph type name, e.g. `"Figure"`.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Current value of a property.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.props.get(name)
    }

    /// Whether any property changed since the last [`PlotModel::mark_clean`].
    pub fn is_dirty(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Serialize properties in insertion order.
    ///
    /// With `changed_only`, only properties mutated since the last [`PlotModel::mark_clean`] are
    /// included. The pending change set is left untouched.
    pub fn serialize(&self, changed_only: bool) -> OptionsMapping {
        self.props
            .iter()
            .filter(|(k, _)| !changed_only || self.changed.contains(k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Forget pending changes.
    pub fn mark_clean(&mut self) {
        self.changed.clear();
    }
}

/// A node of the plot tree: the models it currently displays plus nested subplots.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotNode {
    models: Vec<PlotModel>,
    subplots: Vec<PlotNode>,
}

impl PlotNode {
    /// Node displaying `models` with no subplots.
    pub fn new(models: Vec<PlotModel>) -> Self {
        Self {
            models,
            subplots: Vec::new(),
        }
    }

    /// Append a subplot.
    pub fn with_subplot(mut self, node: PlotNode) -> Self {
        self.subplots.push(node);
        self
    }

    /// Models currently displayed by this node.
    pub fn models(&self) -> &[PlotModel] {
        &self.models
    }

    /// Mutable access to the node's models.
    pub fn models_mut(&mut self) -> &mut [PlotModel] {
        &mut self.models
    }

    /// Nested subplots in order.
    pub fn subplots(&self) -> &[PlotNode] {
        &self.subplots
    }

    /// Visit this node and every descendant, depth-first, parents before children.
    pub fn traverse<'a>(&'a self, visit: &mut impl FnMut(&'a PlotNode)) {
        visit(self);
        for sub in &self.subplots {
            sub.traverse(visit);
        }
    }

    /// Every model in the tree, in traversal order.
    pub fn all_models(&self) -> Vec<&PlotModel> {
        let mut out = Vec::new();
        self.traverse(&mut |node| out.extend(node.models.iter()));
        out
    }

    /// Clear pending changes on every model in the tree.
    pub fn mark_clean(&mut self) {
        for m in &mut self.models {
            m.mark_clean();
        }
        for sub in &mut self.subplots {
            sub.mark_clean();
        }
    }
}

/// Runtime-bound plot created for a single render call.
///
/// The first model of the root node is the root state: the object embedded by `html` output and
/// the source of the plot's display size.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotHandle {
    root: PlotNode,
    keys: Vec<String>,
}

impl PlotHandle {
    /// Wrap a plot tree; `keys` lists the frame keys of animated plots (empty for static plots).
    pub fn new(root: PlotNode, keys: Vec<String>) -> VizResult<Self> {
        if root.models.is_empty() {
            return Err(VizError::validation("plot root must hold a root state model"));
        }
        Ok(Self { root, keys })
    }

    /// Root node of the plot tree.
    pub fn root(&self) -> &PlotNode {
        &self.root
    }

    /// Mutable root node.
    pub fn root_mut(&mut self) -> &mut PlotNode {
        &mut self.root
    }

    /// Root state model.
    pub fn state(&self) -> &PlotModel {
        &self.root.models[0]
    }

    /// Frame keys of an animated plot.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Display size `(width, height)` of the root state before rendering to any format.
    pub fn size(&self) -> VizResult<(u32, u32)> {
        let dim = |name: &str| -> VizResult<u32> {
            self.state()
                .get(name)
                .and_then(serde_json::Value::as_u64)
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    VizError::validation(format!("plot state has no integer '{name}'"))
                })
        };
        Ok((dim("width")?, dim("height")?))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/handle.rs"]
mod tests;
