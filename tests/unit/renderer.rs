use std::{cell::Cell, rc::Rc};

use super::*;
use crate::{
    foundation::core::NodeId,
    reconcile::message::decode_batch,
    render::surface::{RecordingSurface, SurfaceCommand},
    scene::path_op::PathOp,
};

fn batch(json: &str) -> Vec<Message> {
    decode_batch(json).unwrap().messages
}

#[test]
fn default_config_is_valid_and_documents_defaults() {
    let config = RendererConfig::default();
    config.validate().unwrap();
    assert_eq!(config.origin_offset(), Vec2::new(0.5, 0.0));
    assert_eq!(RendererConfig::from_json_str("{}").unwrap(), config);
}

#[test]
fn config_rejects_bad_values() {
    for json in [
        r#"{"canvas":{"width":0,"height":10}}"#,
        r#"{"canvas":{"width":70000,"height":10}}"#,
        r#"{"flatten_tolerance":0}"#,
        r#"{"flatten_tolerance":-1}"#,
    ] {
        assert!(
            matches!(
                RendererConfig::from_json_str(json),
                Err(SprigError::Validation(_))
            ),
            "{json}"
        );
    }
    assert!(matches!(
        RendererConfig::from_json_str("[]"),
        Err(SprigError::Serde(_))
    ));
    assert!(RendererConfig::from_path("does/not/exist.json").is_err());
}

#[test]
fn render_applies_then_draws() {
    let mut renderer = Renderer::new(RendererConfig {
        origin_offset: [0.0, 0.0],
        ..RendererConfig::default()
    })
    .unwrap();
    let mut surface = RecordingSurface::new();
    let report = renderer.render(
        &mut surface,
        batch(r#"[{"id":1,"type":"Path","data":[["moveTo",3,4]]},{"id":1,"parent":0}]"#),
    );
    assert_eq!(report.apply.created, 1);
    assert_eq!(report.apply.moved, 1);
    assert_eq!(report.draw.paths, 1);
    assert!(
        surface
            .commands()
            .contains(&SurfaceCommand::MoveTo(crate::foundation::core::Point::new(
                3.0, 4.0
            )))
    );
    assert!(renderer.graph().contains(NodeId(1)));
}

#[test]
fn arc_memoization_survives_across_frames_until_data_changes() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let flattener = move |_: &[PathOp]| {
        counter.set(counter.get() + 1);
        vec![PathOp::line_to(10.0, 0.0)]
    };
    let mut renderer = Renderer::with_flattener(RendererConfig::default(), flattener).unwrap();
    let mut surface = RecordingSurface::new();

    let arc = r#"[{"id":1,"type":"Path","parent":0,
                   "data":[["moveTo",0,0],["arcTo",5,5,0,0,1,10,0]]}]"#;
    renderer.render(&mut surface, batch(arc));
    let first = surface.take_commands();
    renderer.render(&mut surface, Vec::new());
    assert_eq!(first, surface.take_commands());
    assert_eq!(calls.get(), 1);

    let stored = renderer.graph().get(NodeId(1)).unwrap().data().unwrap();
    assert_eq!(
        stored.ops(),
        &[PathOp::move_to(0.0, 0.0), PathOp::line_to(10.0, 0.0)][..]
    );

    // Attribute-only updates keep the memo; new data invalidates it.
    renderer.render(&mut surface, batch(r#"[{"id":1,"attributes":{"x":1}}]"#));
    assert_eq!(calls.get(), 1);
    renderer.render(&mut surface, batch(arc));
    assert_eq!(calls.get(), 2);
}

#[test]
fn cpu_surface_follows_config() {
    let renderer = Renderer::new(RendererConfig {
        canvas: Canvas {
            width: 8,
            height: 4,
        },
        ..RendererConfig::default()
    })
    .unwrap();
    let surface = renderer.cpu_surface().unwrap();
    assert_eq!(
        surface.canvas(),
        Canvas {
            width: 8,
            height: 4
        }
    );
}
