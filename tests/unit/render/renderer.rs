use super::*;
use crate::model::object::{Frame, Frames, View};
use crate::model::registry::PlotTypeDescriptor;
use crate::render::format::WidgetChoice;
use crate::runtime::document::DocumentRuntime;
use serde_json::json;

fn renderer() -> (Arc<DocumentRuntime>, Renderer) {
    let rt = Arc::new(DocumentRuntime::new());
    let renderer = Renderer::new(rt.clone());
    (rt, renderer)
}

fn animated() -> VisualizableObject {
    Frames::new(
        "t",
        vec![
            Frame {
                key: "0".to_string(),
                view: View::new("Curve", "a"),
            },
            Frame {
                key: "1".to_string(),
                view: View::new("Curve", "b"),
            },
        ],
    )
    .unwrap()
    .into()
}

#[test]
fn static_auto_matches_html() {
    let (_, r) = renderer();
    let obj: VisualizableObject = View::new("Curve", "c").with_label("x").into();
    let auto = r.render(&obj, Some("auto")).unwrap().unwrap();
    let html = r.render(&obj, Some("html")).unwrap().unwrap();
    assert_eq!(auto, html);
    assert_eq!(r.render(&obj, None).unwrap().unwrap(), html);
}

#[test]
fn composite_auto_uses_configured_widget() {
    let (_, r) = renderer();
    let selection = r.render(&animated(), Some("auto")).unwrap().unwrap();
    assert_eq!(selection, r.render(&animated(), Some("widgets")).unwrap().unwrap());

    let r = r.with_config(RendererConfig {
        widget_default: WidgetChoice::Scrubber,
        ..RendererConfig::default()
    });
    let scrubber = r.render(&animated(), Some("auto")).unwrap().unwrap();
    assert_eq!(scrubber, r.render(&animated(), Some("scrubber")).unwrap().unwrap());
}

#[test]
fn composite_rejects_static_formats() {
    let (_, r) = renderer();
    for fmt in ["html", "json", "png", "AUTO"] {
        assert!(matches!(
            r.render(&animated(), Some(fmt)),
            Err(VizError::UnsupportedFormat { .. })
        ));
    }
}

#[test]
fn composite_none_renders_nothing() {
    let (_, r) = renderer();
    assert!(r.render(&animated(), Some("none")).unwrap().is_none());
}

#[test]
fn ensure_backend_ready_bootstraps_once() {
    let (rt, r) = renderer();
    r.ensure_backend_ready(&OptionsMapping::new()).unwrap();
    r.ensure_backend_ready(&OptionsMapping::new()).unwrap();
    assert_eq!(rt.bootstrap_count(), 1);
    assert!(r.lifecycle().is_initialized());
}

#[test]
fn compute_options_example() {
    let mut reg = PlotTypeRegistry::new();
    reg.register("Box", PlotTypeDescriptor::sized("BoxPlot", 400, 300));
    let (_, r) = renderer();
    let r = r.with_registry(reg);
    let obj: VisualizableObject = View::new("Box", "b").into();

    let out = r.compute_options(&obj, 50).unwrap();
    assert_eq!(out["width"], json!(200));
    assert_eq!(out["height"], json!(150));
}

#[test]
fn option_store_feeds_binding_and_sizing() {
    let mut store = InMemoryOptionStore::new();
    store.set_object_option("c", "height", json!(120));
    let (_, r) = renderer();
    let r = r.with_option_store(store);
    let obj: VisualizableObject = View::new("Curve", "c").into();

    let handle = r.plot(&obj).unwrap();
    assert_eq!(r.plot_size(&handle).unwrap(), (300, 120));
    assert_eq!(r.compute_options(&obj, 100).unwrap()["height"], json!(120));
    assert!(r.figure_data(&handle).unwrap().contains("height: 120px;"));
}

#[test]
fn save_is_not_implemented() {
    let (_, r) = renderer();
    let err = r
        .save(
            &View::new("Curve", "c").into(),
            "out",
            Some("html"),
            &OptionsMapping::new(),
            &OptionsMapping::new(),
            None,
        )
        .unwrap_err();
    assert!(matches!(err, VizError::NotImplemented(_)));
}

#[test]
fn renderer_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Renderer>();
}
