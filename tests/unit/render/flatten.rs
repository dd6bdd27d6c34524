use super::*;
use crate::scene::path_op::ArcTo;

fn arc(rx: f64, ry: f64, x: f64, y: f64) -> PathOp {
    PathOp::ArcTo(ArcTo {
        rx,
        ry,
        rotation_deg: 0.0,
        large_arc: false,
        sweep: true,
        x,
        y,
    })
}

fn end_point(op: &PathOp) -> Point {
    match *op {
        PathOp::CurveTo { x, y, .. } | PathOp::LineTo { x, y } => Point::new(x, y),
        ref other => panic!("unexpected op {other:?}"),
    }
}

#[test]
fn half_circle_becomes_curves_ending_at_the_arc_end() {
    let f = KurboArcFlattener::default();
    let out = f.flatten(&[PathOp::move_to(0.0, 0.0), arc(10.0, 10.0, 20.0, 0.0)]);
    assert!(!out.is_empty());
    assert!(out.iter().all(|op| matches!(op, PathOp::CurveTo { .. })));
    let end = end_point(out.last().unwrap());
    assert!((end.x - 20.0).abs() < 1e-6, "{end:?}");
    assert!(end.y.abs() < 1e-6, "{end:?}");
}

#[test]
fn tighter_tolerance_never_uses_fewer_segments() {
    let ctx = [PathOp::move_to(0.0, 0.0), arc(100.0, 100.0, 200.0, 0.0)];
    let coarse = KurboArcFlattener::new(10.0).flatten(&ctx);
    let fine = KurboArcFlattener::new(0.001).flatten(&ctx);
    assert!(fine.len() >= coarse.len());
}

#[test]
fn zero_radius_degrades_to_a_line() {
    let f = KurboArcFlattener::default();
    let out = f.flatten(&[PathOp::move_to(1.0, 1.0), arc(0.0, 5.0, 4.0, 5.0)]);
    assert_eq!(out, vec![PathOp::line_to(4.0, 5.0)]);
}

#[test]
fn zero_length_arc_draws_nothing() {
    let f = KurboArcFlattener::default();
    let out = f.flatten(&[PathOp::move_to(3.0, 3.0), arc(5.0, 5.0, 3.0, 3.0)]);
    assert!(out.is_empty());
}

#[test]
fn malformed_context_yields_nothing() {
    let f = KurboArcFlattener::default();
    assert!(f.flatten(&[arc(5.0, 5.0, 3.0, 3.0)]).is_empty());
    assert!(
        f.flatten(&[PathOp::line_to(0.0, 0.0), arc(5.0, 5.0, 3.0, 3.0)])
            .is_empty()
    );
}

#[test]
fn closures_are_flatteners() {
    let f = |ctx: &[PathOp]| vec![ctx[0].clone()];
    let out = f.flatten(&[PathOp::move_to(1.0, 2.0), arc(1.0, 1.0, 0.0, 0.0)]);
    assert_eq!(out, vec![PathOp::move_to(1.0, 2.0)]);
}
