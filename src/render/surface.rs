use crate::{
    foundation::core::{Affine, Point},
    render::color::Paint,
};

/// Stroke end-cap style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "butt" => Some(LineCap::Butt),
            "round" => Some(LineCap::Round),
            "square" => Some(LineCap::Square),
            _ => None,
        }
    }
}

/// Stroke corner style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "miter" => Some(LineJoin::Miter),
            "round" => Some(LineJoin::Round),
            "bevel" => Some(LineJoin::Bevel),
            _ => None,
        }
    }
}

/// Drawing capabilities the scene renderer needs from a target.
///
/// The model is an immediate-mode 2D canvas: one current path, a current transform, and paint
/// state, all of which `save`/`restore` push and pop together.
pub trait Surface {
    /// Erase the whole surface. Transform and paint state are untouched.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);

    /// Concatenate `m` onto the current transform.
    fn transform(&mut self, m: Affine);

    fn begin_path(&mut self);
    fn move_to(&mut self, p: Point);
    fn line_to(&mut self, p: Point);
    fn bezier_curve_to(&mut self, c1: Point, c2: Point, p: Point);
    fn close_path(&mut self);

    fn fill(&mut self);
    fn stroke(&mut self);

    fn set_fill_style(&mut self, paint: Paint);
    fn set_stroke_style(&mut self, paint: Paint);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_line_join(&mut self, join: LineJoin);

    fn global_alpha(&self) -> f64;
    fn set_global_alpha(&mut self, alpha: f64);
}

/// One call recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCommand {
    Clear,
    Save,
    Restore,
    Transform(Affine),
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    BezierCurveTo(Point, Point, Point),
    ClosePath,
    Fill,
    Stroke,
    FillStyle(Paint),
    StrokeStyle(Paint),
    LineWidth(f64),
    LineCap(LineCap),
    LineJoin(LineJoin),
    GlobalAlpha(f64),
}

/// A surface that draws nothing and remembers every call.
///
/// Global alpha is tracked (including across `save`/`restore`) so alpha compounding behaves as
/// it would on a real canvas.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    commands: Vec<SurfaceCommand>,
    alpha: f64,
    saved: Vec<f64>,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            alpha: 1.0,
            saved: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[SurfaceCommand] {
        &self.commands
    }

    pub fn take_commands(&mut self) -> Vec<SurfaceCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Depth of unmatched `save` calls.
    pub fn save_depth(&self) -> usize {
        self.saved.len()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.push(SurfaceCommand::Clear);
    }

    fn save(&mut self) {
        self.saved.push(self.alpha);
        self.commands.push(SurfaceCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(alpha) = self.saved.pop() {
            self.alpha = alpha;
        }
        self.commands.push(SurfaceCommand::Restore);
    }

    fn transform(&mut self, m: Affine) {
        self.commands.push(SurfaceCommand::Transform(m));
    }

    fn begin_path(&mut self) {
        self.commands.push(SurfaceCommand::BeginPath);
    }

    fn move_to(&mut self, p: Point) {
        self.commands.push(SurfaceCommand::MoveTo(p));
    }

    fn line_to(&mut self, p: Point) {
        self.commands.push(SurfaceCommand::LineTo(p));
    }

    fn bezier_curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.commands.push(SurfaceCommand::BezierCurveTo(c1, c2, p));
    }

    fn close_path(&mut self) {
        self.commands.push(SurfaceCommand::ClosePath);
    }

    fn fill(&mut self) {
        self.commands.push(SurfaceCommand::Fill);
    }

    fn stroke(&mut self) {
        self.commands.push(SurfaceCommand::Stroke);
    }

    fn set_fill_style(&mut self, paint: Paint) {
        self.commands.push(SurfaceCommand::FillStyle(paint));
    }

    fn set_stroke_style(&mut self, paint: Paint) {
        self.commands.push(SurfaceCommand::StrokeStyle(paint));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(SurfaceCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.commands.push(SurfaceCommand::LineCap(cap));
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.commands.push(SurfaceCommand::LineJoin(join));
    }

    fn global_alpha(&self) -> f64 {
        self.alpha
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
        self.commands.push(SurfaceCommand::GlobalAlpha(alpha));
    }
}
