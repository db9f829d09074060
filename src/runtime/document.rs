//! Reference runtime that renders plots as self-describing HTML documents.
//!
//! Each view binds to a `Figure` model plus a `ColumnDataSource` holding the view data. Animated
//! objects bind to a `FrameStack` root with one figure subplot per frame. Embedded markup is a
//! sized `<div>` followed by a JSON script block carrying the full model state, which a client
//! script can pick up to draw the plot.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use crate::foundation::error::{VizError, VizResult};
use crate::foundation::ids::IdAllocator;
use crate::model::object::{View, VisualizableObject};
use crate::model::options::{OptionsMapping, pixel_option};
use crate::runtime::backend::{PlotContext, RenderRuntime, Widget, WidgetKind};
use crate::runtime::handle::{PlotHandle, PlotModel, PlotNode};

const WIDGET_SCRIPT: &str = r#"<script>(function(){var w=document.currentScript.parentElement;var f=w.querySelectorAll('.vizrender-frame');var k=w.querySelector('.vizrender-key');var c=w.querySelector('input,select');c.addEventListener('input',function(){var i=parseInt(c.value,10);f.forEach(function(e,j){e.hidden=j!==i;});if(k){k.textContent=f[i].dataset.key;}});})();</script>"#;

/// Built-in [`RenderRuntime`] producing HTML documents with embedded JSON state.
#[derive(Debug, Default)]
pub struct DocumentRuntime {
    bootstraps: AtomicUsize,
}

impl DocumentRuntime {
    /// Backend name reported by [`RenderRuntime::name`].
    pub const NAME: &'static str = "document";

    /// New runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the host bootstrap ran.
    pub fn bootstrap_count(&self) -> usize {
        self.bootstraps.load(Ordering::SeqCst)
    }
}

impl RenderRuntime for DocumentRuntime {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn probe(&self) -> VizResult<()> {
        Ok(())
    }

    fn bootstrap(&self, options: &OptionsMapping) -> VizResult<()> {
        self.bootstraps.fetch_add(1, Ordering::SeqCst);
        tracing::info!(options = options.len(), "document runtime bootstrapped");
        Ok(())
    }

    #[tracing::instrument(skip(self, object, ctx), fields(mode = %object.mode()))]
    fn bind(&self, object: &VisualizableObject, ctx: PlotContext<'_>) -> VizResult<PlotHandle> {
        let mut ids = IdAllocator::new("p");
        match object {
            VisualizableObject::Single(view) => {
                PlotHandle::new(figure_node(view, ctx, &mut ids)?, Vec::new())
            }
            VisualizableObject::Animated(frames) => {
                frames.validate()?;
                let stack_id = ids.next_id();
                let mut subplots = Vec::with_capacity(frames.frames.len());
                for frame in &frames.frames {
                    subplots.push(figure_node(&frame.view, ctx, &mut ids)?);
                }
                let keys: Vec<String> = frames.keys().map(str::to_string).collect();
                let current = subplots
                    .last()
                    .map(|node| &node.models()[0])
                    .ok_or_else(|| VizError::validation("animated object has no frames"))?;

                let stack = PlotModel::new(stack_id, "FrameStack")
                    .with("key_dim", json!(frames.key_dim))
                    .with("keys", json!(keys))
                    .with(
                        "width",
                        current.get("width").cloned().unwrap_or(json!(null)),
                    )
                    .with(
                        "height",
                        current.get("height").cloned().unwrap_or(json!(null)),
                    )
                    .with("active", json!(keys.len() - 1))
                    .with(
                        "frames",
                        json!(
                            subplots
                                .iter()
                                .map(|n| json!({ "id": n.models()[0].id() }))
                                .collect::<Vec<_>>()
                        ),
                    );

                let root = subplots
                    .into_iter()
                    .fold(PlotNode::new(vec![stack]), PlotNode::with_subplot);
                PlotHandle::new(root, keys)
            }
        }
    }

    fn embed(&self, handle: &PlotHandle) -> VizResult<String> {
        node_markup(handle.root())
    }

    fn widget<'h>(
        &self,
        kind: WidgetKind,
        handle: &'h PlotHandle,
    ) -> VizResult<Box<dyn Widget + 'h>> {
        if handle.keys().is_empty() {
            return Err(VizError::validation(
                "frame widgets require an animated plot",
            ));
        }
        Ok(Box::new(FrameWidget { kind, handle }))
    }
}

fn figure_node(view: &View, ctx: PlotContext<'_>, ids: &mut IdAllocator) -> VizResult<PlotNode> {
    let options = ctx.options.plot_options(view);
    let (default_w, default_h) = ctx.registry.default_size(&view.type_tag);
    let width = pixel_option(&options, "width")?.map_or(default_w, |w| w as u32);
    let height = pixel_option(&options, "height")?.map_or(default_h, |h| h as u32);
    let plot_type = ctx
        .registry
        .get(&view.type_tag)
        .map_or("Plot", |d| d.name.as_str());

    let figure_id = ids.next_id();
    let source_id = ids.next_id();
    let figure = PlotModel::new(figure_id, "Figure")
        .with("title", json!(view.label))
        .with("plot_type", json!(plot_type))
        .with("width", json!(width))
        .with("height", json!(height))
        .with("source", json!({ "id": source_id }));
    let source = PlotModel::new(source_id, "ColumnDataSource")
        .with("name", json!(view.id))
        .with("data", view.data.clone());
    Ok(PlotNode::new(vec![figure, source]))
}

/// Markup for `node`'s root model with the full state of the node's subtree.
fn node_markup(node: &PlotNode) -> VizResult<String> {
    let state = node
        .models()
        .first()
        .ok_or_else(|| VizError::validation("plot node has no models"))?;

    let docs: Vec<serde_json::Value> = node
        .all_models()
        .into_iter()
        .map(|m| {
            json!({
                "id": m.id(),
                "type": m.type_name(),
                "attributes": m.serialize(false),
            })
        })
        .collect();
    let docs = serde_json::to_string(&docs)
        .map_err(|e| VizError::serde(format!("serialize plot document: {e}")))?
        .replace("</", "<\\/");

    let style = match (
        state.get("width").and_then(serde_json::Value::as_u64),
        state.get("height").and_then(serde_json::Value::as_u64),
    ) {
        (Some(w), Some(h)) => format!(" style=\"width: {w}px; height: {h}px;\""),
        _ => String::new(),
    };
    let id = escape_html(state.id().as_str());
    Ok(format!(
        "<div class=\"vizrender-plot\" id=\"{id}\"{style}></div>\n\
         <script type=\"application/json\" data-root-id=\"{id}\">{docs}</script>"
    ))
}

struct FrameWidget<'h> {
    kind: WidgetKind,
    handle: &'h PlotHandle,
}

impl Widget for FrameWidget<'_> {
    fn render(&self) -> VizResult<String> {
        let keys = self.handle.keys();
        let frames = self.handle.root().subplots();
        if frames.len() != keys.len() {
            return Err(VizError::validation(format!(
                "plot has {} frame keys but {} frame subplots",
                keys.len(),
                frames.len()
            )));
        }
        let active = keys.len() - 1;
        let key_dim = self
            .handle
            .state()
            .get("key_dim")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        let (class, control) = match self.kind {
            WidgetKind::Scrubber => (
                "vizrender-scrubber",
                format!(
                    "<input type=\"range\" min=\"0\" max=\"{active}\" step=\"1\" value=\"{active}\">\n\
                     <span class=\"vizrender-key\">{}</span>",
                    escape_html(&keys[active])
                ),
            ),
            WidgetKind::Selection => {
                let options: String = keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| {
                        let selected = if i == active { " selected" } else { "" };
                        format!("<option value=\"{i}\"{selected}>{}</option>", escape_html(key))
                    })
                    .collect();
                ("vizrender-selection", format!("<select>{options}</select>"))
            }
        };

        let mut out = format!(
            "<div class=\"vizrender-widget {class}\" data-plot-id=\"{}\" data-key-dim=\"{}\">\n{control}\n",
            escape_html(self.handle.state().id().as_str()),
            escape_html(key_dim),
        );
        for (i, (key, node)) in keys.iter().zip(frames).enumerate() {
            let hidden = if i == active { "" } else { " hidden" };
            out.push_str(&format!(
                "<div class=\"vizrender-frame\" data-key=\"{}\"{hidden}>{}</div>\n",
                escape_html(key),
                node_markup(node)?
            ));
        }
        out.push_str(WIDGET_SCRIPT);
        out.push_str("\n</div>");
        Ok(out)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/document.rs"]
mod tests;
