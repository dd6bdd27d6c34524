use kurbo::PathEl;

use crate::{
    foundation::core::{Point, Vec2},
    scene::path_op::PathOp,
};

/// Turns an arc into drawable operations.
///
/// `context` is `[moveTo(current point), arcTo(..)]`. The returned ops replace the arc in the
/// node's operation list and must not include a leading `moveTo` for the start point.
pub trait ArcFlattener {
    fn flatten(&self, context: &[PathOp]) -> Vec<PathOp>;
}

impl<F> ArcFlattener for F
where
    F: Fn(&[PathOp]) -> Vec<PathOp>,
{
    fn flatten(&self, context: &[PathOp]) -> Vec<PathOp> {
        self(context)
    }
}

/// Flattens SVG-style elliptical arcs into cubic `curveTo`s using kurbo's arc approximation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KurboArcFlattener {
    tolerance: f64,
}

impl KurboArcFlattener {
    pub const DEFAULT_TOLERANCE: f64 = 0.1;

    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for KurboArcFlattener {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TOLERANCE)
    }
}

impl ArcFlattener for KurboArcFlattener {
    fn flatten(&self, context: &[PathOp]) -> Vec<PathOp> {
        let [PathOp::MoveTo { x, y }, PathOp::ArcTo(arc)] = context else {
            tracing::warn!(len = context.len(), "arc context is not [moveTo, arcTo]; dropping");
            return Vec::new();
        };
        let from = Point::new(*x, *y);
        let to = arc.end();
        let svg = kurbo::SvgArc {
            from,
            to,
            radii: Vec2::new(arc.rx.abs(), arc.ry.abs()),
            x_rotation: arc.rotation_deg.to_radians(),
            large_arc: arc.large_arc,
            sweep: arc.sweep,
        };

        // Degenerate radii collapse to a straight segment; a zero-length arc draws nothing.
        let Some(ellipse_arc) = kurbo::Arc::from_svg_arc(&svg) else {
            if from == to {
                return Vec::new();
            }
            return vec![PathOp::line_to(to.x, to.y)];
        };

        ellipse_arc
            .append_iter(self.tolerance)
            .filter_map(|el| match el {
                PathEl::CurveTo(c1, c2, p) => {
                    Some(PathOp::curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y))
                }
                PathEl::LineTo(p) => Some(PathOp::line_to(p.x, p.y)),
                PathEl::MoveTo(_) | PathEl::QuadTo(..) | PathEl::ClosePath => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/flatten.rs"]
mod tests;
