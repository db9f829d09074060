use super::*;
use crate::model::object::{Frame, Frames};
use crate::model::options::InMemoryOptionStore;
use crate::model::registry::PlotTypeRegistry;

fn ctx<'a>(registry: &'a PlotTypeRegistry, options: &'a InMemoryOptionStore) -> PlotContext<'a> {
    PlotContext { registry, options }
}

fn animated(keys: &[&str]) -> VisualizableObject {
    let frames = keys
        .iter()
        .map(|k| Frame {
            key: k.to_string(),
            view: View::new("Curve", format!("c{k}")).with_data(json!({ "x": [1, 2] })),
        })
        .collect();
    VisualizableObject::Animated(Frames::new("time", frames).unwrap())
}

#[test]
fn single_view_binds_figure_and_source() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();
    let obj = VisualizableObject::Single(View::new("Table", "t").with_label("Prices"));

    let handle = rt.bind(&obj, ctx(&reg, &opts)).unwrap();
    let models = handle.root().models();
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].type_name(), "Figure");
    assert_eq!(models[0].get("title"), Some(&json!("Prices")));
    assert_eq!(models[0].get("plot_type"), Some(&json!("TablePlot")));
    assert_eq!(models[1].type_name(), "ColumnDataSource");
    assert_eq!(handle.size().unwrap(), (400, 300));
    assert!(handle.keys().is_empty());
}

#[test]
fn bind_applies_object_size_overrides() {
    let reg = PlotTypeRegistry::with_builtin();
    let mut opts = InMemoryOptionStore::new();
    opts.set_object_option("c", "width", json!(640.9));
    let rt = DocumentRuntime::new();
    let obj = VisualizableObject::Single(View::new("Curve", "c"));

    let handle = rt.bind(&obj, ctx(&reg, &opts)).unwrap();
    assert_eq!(handle.size().unwrap(), (640, 300));
}

#[test]
fn bind_is_deterministic() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();
    let obj = animated(&["0", "1"]);

    let a = rt.bind(&obj, ctx(&reg, &opts)).unwrap();
    let b = rt.bind(&obj, ctx(&reg, &opts)).unwrap();
    assert_eq!(a, b);
    assert_eq!(rt.embed(&a).unwrap(), rt.embed(&b).unwrap());
}

#[test]
fn animated_binds_frame_stack_with_subplots() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();

    let handle = rt.bind(&animated(&["0", "1", "2"]), ctx(&reg, &opts)).unwrap();
    assert_eq!(handle.state().type_name(), "FrameStack");
    assert_eq!(handle.keys(), ["0", "1", "2"]);
    assert_eq!(handle.root().subplots().len(), 3);
    assert_eq!(handle.state().get("active"), Some(&json!(2)));
    assert_eq!(handle.size().unwrap(), (300, 300));
    // stack + (figure, source) per frame
    assert_eq!(handle.root().all_models().len(), 7);
}

#[test]
fn embed_escapes_script_terminators() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();
    let obj = VisualizableObject::Single(View::new("Curve", "c").with_label("</script><b>"));

    let html = rt.embed(&rt.bind(&obj, ctx(&reg, &opts)).unwrap()).unwrap();
    assert!(html.starts_with("<div class=\"vizrender-plot\" id=\"p1001\""));
    assert!(html.contains("width: 300px; height: 300px;"));
    assert_eq!(html.matches("</script>").count(), 1);
}

#[test]
fn scrubber_shows_last_frame() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();
    let handle = rt.bind(&animated(&["a", "b"]), ctx(&reg, &opts)).unwrap();

    let html = rt
        .widget(WidgetKind::Scrubber, &handle)
        .unwrap()
        .render()
        .unwrap();
    assert!(html.contains("vizrender-scrubber"));
    assert!(html.contains("type=\"range\" min=\"0\" max=\"1\""));
    assert!(html.contains("data-key=\"a\" hidden"));
    assert!(html.contains("data-key=\"b\">"));
    assert!(html.contains("data-key-dim=\"time\""));
}

#[test]
fn selection_lists_every_key() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();
    let handle = rt
        .bind(&animated(&["x<y", "2"]), ctx(&reg, &opts))
        .unwrap();

    let html = rt
        .widget(WidgetKind::Selection, &handle)
        .unwrap()
        .render()
        .unwrap();
    assert!(html.contains("<option value=\"0\">x&lt;y</option>"));
    assert!(html.contains("<option value=\"1\" selected>2</option>"));
}

#[test]
fn widgets_reject_static_plots() {
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let rt = DocumentRuntime::new();
    let handle = rt
        .bind(
            &VisualizableObject::Single(View::new("Curve", "c")),
            ctx(&reg, &opts),
        )
        .unwrap();
    assert!(rt.widget(WidgetKind::Scrubber, &handle).is_err());
}

#[test]
fn bootstrap_counts_calls() {
    let rt = DocumentRuntime::new();
    rt.bootstrap(&OptionsMapping::new()).unwrap();
    assert_eq!(rt.bootstrap_count(), 1);
    assert_eq!(rt.name(), "document");
}

#[test]
fn escape_html_covers_attribute_characters() {
    assert_eq!(escape_html("a&b<\"'>"), "a&amp;b&lt;&quot;&#x27;&gt;");
}
