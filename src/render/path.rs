use crate::{
    foundation::core::Point,
    render::{color::decode_color, flatten::ArcFlattener, surface::Surface},
    scene::{
        attributes::{Attributes, FILL_COLOR, STROKE_COLOR, STROKE_WIDTH},
        node::PathData,
        path_op::PathOp,
    },
};

/// Counters from interpreting one or more paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PathStats {
    /// Operations executed against the surface.
    pub ops: usize,
    /// Unknown or malformed operations skipped.
    pub skipped: usize,
    /// Arcs handed to the flattener.
    pub arcs_flattened: usize,
}

impl std::ops::AddAssign for PathStats {
    fn add_assign(&mut self, rhs: Self) {
        self.ops += rhs.ops;
        self.skipped += rhs.skipped;
        self.arcs_flattened += rhs.arcs_flattened;
    }
}

/// Draw one path: set up paint from `attributes`, execute the operations, then fill and stroke.
///
/// The first draw that meets an `arcTo` expands it through `flattener` and stores the expanded
/// sequence on `data`; later draws execute that sequence directly.
pub fn draw_path<S: Surface + ?Sized>(
    surface: &mut S,
    attributes: &Attributes,
    data: &mut PathData,
    flattener: &dyn ArcFlattener,
) -> PathStats {
    surface.begin_path();
    apply_paint(surface, attributes);

    let mut pen = Pen {
        surface: &mut *surface,
        at: Point::ORIGIN,
        stats: PathStats::default(),
    };

    if data.needs_flattening() {
        let mut flattened = Vec::with_capacity(data.raw().len());
        for op in data.raw() {
            let PathOp::ArcTo(_) = op else {
                pen.exec(op);
                flattened.push(op.clone());
                continue;
            };
            let context = [PathOp::move_to(pen.at.x, pen.at.y), op.clone()];
            pen.stats.arcs_flattened += 1;
            for expanded in flattener.flatten(&context) {
                if expanded.is_arc() {
                    tracing::warn!("arc flattener returned an arcTo; dropping it");
                    pen.stats.skipped += 1;
                    continue;
                }
                pen.exec(&expanded);
                flattened.push(expanded);
            }
        }
        data.set_flattened(flattened);
    } else {
        for op in data.ops() {
            pen.exec(op);
        }
    }
    let stats = pen.stats;

    if attributes.is_truthy(FILL_COLOR) {
        surface.fill();
    }
    if attributes.is_truthy(STROKE_WIDTH) && attributes.is_truthy(STROKE_COLOR) {
        surface.stroke();
    }
    stats
}

fn apply_paint<S: Surface + ?Sized>(surface: &mut S, attributes: &Attributes) {
    surface.set_fill_style(decode_color(attributes.fill_color().unwrap_or(0)));
    surface.set_stroke_style(decode_color(attributes.stroke_color().unwrap_or(0)));
    if let Some(cap) = attributes.line_cap() {
        surface.set_line_cap(cap);
    }
    if let Some(join) = attributes.line_join() {
        surface.set_line_join(join);
    }
    // Canvas assignment rules: non-positive widths and out-of-range alpha are ignored.
    if let Some(width) = attributes.stroke_width().filter(|w| w.is_finite() && *w > 0.0) {
        surface.set_line_width(width);
    }
    if let Some(opacity) = attributes.opacity() {
        let alpha = surface.global_alpha() * opacity;
        if (0.0..=1.0).contains(&alpha) {
            surface.set_global_alpha(alpha);
        }
    }
}

struct Pen<'s, S: Surface + ?Sized> {
    surface: &'s mut S,
    at: Point,
    stats: PathStats,
}

impl<S: Surface + ?Sized> Pen<'_, S> {
    fn exec(&mut self, op: &PathOp) {
        match *op {
            PathOp::MoveTo { x, y } => {
                self.at = Point::new(x, y);
                self.surface.move_to(self.at);
            }
            PathOp::LineTo { x, y } => {
                self.at = Point::new(x, y);
                self.surface.line_to(self.at);
            }
            PathOp::LineBy { dx, dy } => {
                self.at = Point::new(self.at.x + dx, self.at.y + dy);
                self.surface.line_to(self.at);
            }
            PathOp::CurveTo {
                c1x,
                c1y,
                c2x,
                c2y,
                x,
                y,
            } => {
                self.at = Point::new(x, y);
                self.surface
                    .bezier_curve_to(Point::new(c1x, c1y), Point::new(c2x, c2y), self.at);
            }
            PathOp::ClosePath => self.surface.close_path(),
            PathOp::ArcTo(_) | PathOp::Unknown(_) => {
                tracing::warn!(op = %op.to_value(), "skipping undrawable path operation");
                self.stats.skipped += 1;
                return;
            }
        }
        self.stats.ops += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/path.rs"]
mod tests;
