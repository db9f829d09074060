use super::*;
use crate::model::object::{Frame, Frames, View};
use crate::model::options::{InMemoryOptionStore, OptionsMapping};
use crate::model::registry::PlotTypeRegistry;
use crate::render::format::WidgetChoice;
use crate::runtime::backend::{Widget, WidgetKind};
use crate::runtime::document::DocumentRuntime;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct CountingRuntime {
    inner: DocumentRuntime,
    binds: AtomicUsize,
}

impl RenderRuntime for CountingRuntime {
    fn name(&self) -> &str {
        "counting"
    }

    fn probe(&self) -> VizResult<()> {
        self.inner.probe()
    }

    fn bootstrap(&self, options: &OptionsMapping) -> VizResult<()> {
        self.inner.bootstrap(options)
    }

    fn bind(&self, object: &VisualizableObject, ctx: PlotContext<'_>) -> VizResult<PlotHandle> {
        self.binds.fetch_add(1, Ordering::SeqCst);
        self.inner.bind(object, ctx)
    }

    fn embed(&self, handle: &PlotHandle) -> VizResult<String> {
        self.inner.embed(handle)
    }

    fn widget<'h>(
        &self,
        kind: WidgetKind,
        handle: &'h PlotHandle,
    ) -> VizResult<Box<dyn Widget + 'h>> {
        self.inner.widget(kind, handle)
    }
}

fn single() -> VisualizableObject {
    VisualizableObject::Single(View::new("Curve", "c"))
}

fn animated() -> VisualizableObject {
    VisualizableObject::Animated(
        Frames::new(
            "t",
            vec![Frame {
                key: "0".to_string(),
                view: View::new("Curve", "c0"),
            }],
        )
        .unwrap(),
    )
}

#[test]
fn auto_resolves_per_mode() {
    assert_eq!(
        resolve_format(Mode::Static, "auto", OutputFormat::Widgets).unwrap(),
        ResolvedFormat::Render(OutputFormat::Html)
    );
    assert_eq!(
        resolve_format(Mode::Composite, "auto", OutputFormat::Scrubber).unwrap(),
        ResolvedFormat::Render(OutputFormat::Scrubber)
    );
    assert_eq!(
        resolve_format(Mode::Composite, "none", OutputFormat::Widgets).unwrap(),
        ResolvedFormat::Skip
    );
}

#[test]
fn formats_outside_the_mode_table_are_unsupported() {
    for (mode, fmt) in [
        (Mode::Static, "scrubber"),
        (Mode::Static, "widgets"),
        (Mode::Static, "none"),
        (Mode::Composite, "html"),
        (Mode::Composite, "json"),
        (Mode::Composite, "png"),
        (Mode::Static, ""),
    ] {
        let err = resolve_format(mode, fmt, OutputFormat::Widgets).unwrap_err();
        assert!(
            matches!(err, VizError::UnsupportedFormat { .. }),
            "{mode} {fmt}"
        );
    }
}

#[test]
fn auto_must_resolve_inside_the_table() {
    let err = resolve_format(Mode::Composite, "auto", OutputFormat::Json).unwrap_err();
    assert!(matches!(
        err,
        VizError::UnsupportedFormat { ref format, .. } if format == "json"
    ));
}

#[test]
fn validate_binds_once_for_supported_format() {
    let rt = CountingRuntime::default();
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let cfg = RendererConfig::default();
    let validator = FormatValidator::new(
        &rt,
        PlotContext {
            registry: &reg,
            options: &opts,
        },
        &cfg,
    );

    let Validated::Bound { handle, format } = validator.validate(&single(), Some("json")).unwrap()
    else {
        panic!("expected a bound handle");
    };
    assert_eq!(format, OutputFormat::Json);
    assert_eq!(handle.state().type_name(), "Figure");
    assert_eq!(rt.binds.load(Ordering::SeqCst), 1);
}

#[test]
fn unsupported_format_never_binds() {
    let rt = CountingRuntime::default();
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let cfg = RendererConfig::default();
    let validator = FormatValidator::new(
        &rt,
        PlotContext {
            registry: &reg,
            options: &opts,
        },
        &cfg,
    );

    assert!(validator.validate(&animated(), Some("html")).is_err());
    assert!(matches!(
        validator.validate(&animated(), Some("none")).unwrap(),
        Validated::Skipped
    ));
    assert_eq!(rt.binds.load(Ordering::SeqCst), 0);
}

#[test]
fn missing_format_uses_configured_fallback() {
    let rt = CountingRuntime::default();
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let cfg = RendererConfig {
        fig: "json".to_string(),
        holomap: "auto".to_string(),
        widget_default: WidgetChoice::Scrubber,
    };
    let validator = FormatValidator::new(
        &rt,
        PlotContext {
            registry: &reg,
            options: &opts,
        },
        &cfg,
    );

    let Validated::Bound { format, .. } = validator.validate(&single(), None).unwrap() else {
        panic!("expected a bound handle");
    };
    assert_eq!(format, OutputFormat::Json);

    let Validated::Bound { format, .. } = validator.validate(&animated(), None).unwrap() else {
        panic!("expected a bound handle");
    };
    assert_eq!(format, OutputFormat::Scrubber);
}

#[test]
fn invalid_configured_fallback_is_unsupported() {
    let rt = CountingRuntime::default();
    let reg = PlotTypeRegistry::with_builtin();
    let opts = InMemoryOptionStore::new();
    let cfg = RendererConfig {
        fig: "scrubber".to_string(),
        ..RendererConfig::default()
    };
    let validator = FormatValidator::new(
        &rt,
        PlotContext {
            registry: &reg,
            options: &opts,
        },
        &cfg,
    );
    assert!(matches!(
        validator.validate(&single(), None),
        Err(VizError::UnsupportedFormat { .. })
    ));
}
