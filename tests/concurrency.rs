use pretty_values::helpers::pretty_call;
use pretty_values::{
    render_with, Doc, Inspect, PrettyContext, PrinterError, Registry, RenderOptions, TypeInfo,
    OBJECT,
};
use std::any::Any;
use std::sync::Barrier;
use std::thread;

static GADGET: TypeInfo = TypeInfo {
    module: "workshop",
    name: "Gadget",
    bases: &[&OBJECT],
};
static WIDGET: TypeInfo = TypeInfo {
    module: "workshop",
    name: "Widget",
    bases: &[&GADGET],
};
static GIZMO: TypeInfo = TypeInfo {
    module: "workshop",
    name: "Gizmo",
    bases: &[&OBJECT],
};

struct Widget {
    size: u32,
}

struct Gizmo {
    parts: Vec<u32>,
}

impl Inspect for Widget {
    fn type_info(&self) -> &'static TypeInfo {
        &WIDGET
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

impl Inspect for Gizmo {
    fn type_info(&self) -> &'static TypeInfo {
        &GIZMO
    }

    fn as_any(&self) -> Option<&dyn Any> {
        Some(self)
    }
}

fn pretty_gadget(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    let widget = value
        .downcast_ref::<Widget>()
        .ok_or_else(|| PrinterError::new("not a widget"))?;
    pretty_call(ctx, "Widget", &[], &[("size", &widget.size)])
}

fn pretty_gizmo(value: &dyn Inspect, ctx: &PrettyContext<'_>) -> Result<Doc, PrinterError> {
    let gizmo = value
        .downcast_ref::<Gizmo>()
        .ok_or_else(|| PrinterError::new("not a gizmo"))?;
    pretty_call(ctx, "Gizmo", &[&gizmo.parts], &[])
}

fn expected(n: u32) -> String {
    format!("[Widget(size={}), Gizmo([{}, {}])]", n, n, n + 1)
}

#[test]
fn parallel_renders_bind_deferred_printers_once() {
    const THREADS: u32 = 8;

    for _ in 0..100 {
        let registry = Registry::with_builtins();
        registry.register_deferred("workshop.Gadget", pretty_gadget);
        registry.register_deferred("workshop.Gizmo", pretty_gizmo);
        let barrier = Barrier::new(THREADS as usize);

        let outputs = thread::scope(|scope| {
            let handles = (0..THREADS)
                .map(|n| {
                    let registry = &registry;
                    let barrier = &barrier;
                    scope.spawn(move || {
                        let value: (Widget, Gizmo) = (
                            Widget { size: n },
                            Gizmo {
                                parts: vec![n, n + 1],
                            },
                        );
                        let items: Vec<&dyn Inspect> = vec![&value.0, &value.1];
                        barrier.wait();
                        render_with(registry, &items, &RenderOptions::default()).unwrap()
                    })
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect::<Vec<_>>()
        });

        for (n, output) in (0..THREADS).zip(outputs) {
            assert_eq!(output, expected(n));
        }
        assert!(registry.is_registered(&GADGET, false));
        assert!(!registry.is_registered(&WIDGET, false));
        assert!(registry.is_registered(&WIDGET, true));
    }
}

#[test]
fn parallel_renders_do_not_share_state() {
    let registry = Registry::with_builtins();
    registry.register_deferred("workshop.Gadget", pretty_gadget);
    let narrow = RenderOptions::default().with_width(12);

    thread::scope(|scope| {
        for n in 0..8u32 {
            let registry = &registry;
            let narrow = &narrow;
            scope.spawn(move || {
                for _ in 0..50 {
                    let widget = Widget { size: n };
                    let wide = render_with(registry, &widget, &RenderOptions::default()).unwrap();
                    assert_eq!(wide, format!("Widget(size={})", n));
                    let broken = render_with(registry, &widget, narrow).unwrap();
                    assert_eq!(broken, format!("Widget(\n    size={}\n)", n));
                }
            });
        }
    });
}
