use std::path::Path;

use crate::{
    foundation::core::{Canvas, Vec2},
    foundation::error::{SprigError, SprigResult},
    reconcile::{
        apply::{ApplyReport, apply_messages},
        message::Message,
    },
    render::{
        cpu::CpuSurface,
        draw::{DrawStats, draw_scene},
        flatten::{ArcFlattener, KurboArcFlattener},
        surface::Surface,
    },
    scene::graph::SceneGraph,
};

/// Renderer settings. Every field has a default, so `{}` is a valid config document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Raster surface size.
    pub canvas: Canvas,
    /// Translation applied at the start of every frame.
    pub origin_offset: [f64; 2],
    /// Maximum deviation allowed when flattening arcs.
    pub flatten_tolerance: f64,
    /// Colour the raster surface is filled with on clear; transparent when unset.
    pub background_rgba: Option<[u8; 4]>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            origin_offset: [0.5, 0.0],
            flatten_tolerance: KurboArcFlattener::DEFAULT_TOLERANCE,
            background_rgba: None,
        }
    }
}

impl RendererConfig {
    pub fn from_json_str(json: &str) -> SprigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SprigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SprigError::validation(format!("failed to read config '{}': {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> SprigResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(SprigError::validation("canvas dimensions must be non-zero"));
        }
        if self.canvas.width > u32::from(u16::MAX) || self.canvas.height > u32::from(u16::MAX) {
            return Err(SprigError::validation("canvas dimensions must fit in u16"));
        }
        if !(self.flatten_tolerance.is_finite() && self.flatten_tolerance > 0.0) {
            return Err(SprigError::validation(
                "flatten_tolerance must be finite and > 0",
            ));
        }
        if !self.origin_offset.iter().all(|v| v.is_finite()) {
            return Err(SprigError::validation("origin_offset must be finite"));
        }
        Ok(())
    }

    pub fn origin_offset(&self) -> Vec2 {
        Vec2::new(self.origin_offset[0], self.origin_offset[1])
    }
}

/// Counters from one apply-then-draw frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub apply: ApplyReport,
    pub draw: DrawStats,
}

/// Owns a scene graph and turns message batches into frames.
///
/// The caller drives it once per frame: [`Renderer::render`] applies the batch and redraws the
/// whole scene onto the given surface.
pub struct Renderer {
    config: RendererConfig,
    graph: SceneGraph,
    flattener: Box<dyn ArcFlattener>,
}

impl Renderer {
    pub fn new(config: RendererConfig) -> SprigResult<Self> {
        let flattener = KurboArcFlattener::new(config.flatten_tolerance);
        Self::with_flattener(config, flattener)
    }

    pub fn with_flattener(
        config: RendererConfig,
        flattener: impl ArcFlattener + 'static,
    ) -> SprigResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            graph: SceneGraph::new(),
            flattener: Box::new(flattener),
        })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// A raster surface sized and cleared according to the config.
    pub fn cpu_surface(&self) -> SprigResult<CpuSurface> {
        CpuSurface::new(self.config.canvas, self.config.background_rgba)
    }

    pub fn apply(&mut self, messages: Vec<Message>) -> ApplyReport {
        apply_messages(&mut self.graph, messages)
    }

    pub fn draw<S: Surface + ?Sized>(&mut self, surface: &mut S) -> DrawStats {
        draw_scene(
            &mut self.graph,
            surface,
            self.flattener.as_ref(),
            self.config.origin_offset(),
        )
    }

    /// Apply one batch, then redraw the frame.
    pub fn render<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        messages: Vec<Message>,
    ) -> FrameReport {
        let apply = self.apply(messages);
        let draw = self.draw(surface);
        FrameReport { apply, draw }
    }
}

#[cfg(test)]
#[path = "../tests/unit/renderer.rs"]
mod tests;
