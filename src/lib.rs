//! Sprig is a retained-mode 2D vector scene renderer driven by incremental update messages.
//!
//! A producer sends batches of [`Message`]s describing node creation, attribute and path
//! changes, detachment and re-parenting. The renderer keeps a [`SceneGraph`] in sync with those
//! batches and redraws the whole scene onto a [`Surface`] each frame:
//!
//! - Decode a batch with [`decode_batch`]
//! - Apply it with [`apply_messages`] (or [`Renderer::apply`])
//! - Draw with [`draw_scene`] (or [`Renderer::draw`]) onto a [`CpuSurface`] or
//!   [`RecordingSurface`]
#![forbid(unsafe_code)]

mod foundation;
mod reconcile;
mod render;
mod renderer;
mod scene;

pub use crate::foundation::core::{Affine, Canvas, Matrix, NodeId, Point, Vec2};
pub use crate::foundation::error::{SprigError, SprigResult};

pub use crate::scene::attributes::{
    AttrValue, Attributes, CAP, FILL_COLOR, JOIN, MATRIX, OPACITY, STROKE_COLOR, STROKE_WIDTH,
};
pub use crate::scene::graph::{Children, SceneGraph};
pub use crate::scene::node::{Node, PATH_KIND, PathData};
pub use crate::scene::path_op::{ArcTo, PathOp};

pub use crate::reconcile::apply::{ApplyReport, apply_messages};
pub use crate::reconcile::message::{Batch, Message, decode_batch, decode_frames};

pub use crate::render::color::{Paint, decode_color};
pub use crate::render::cpu::{CpuSurface, FrameRGBA};
pub use crate::render::draw::{DrawStats, draw_scene};
pub use crate::render::flatten::{ArcFlattener, KurboArcFlattener};
pub use crate::render::path::{PathStats, draw_path};
pub use crate::render::surface::{LineCap, LineJoin, RecordingSurface, Surface, SurfaceCommand};

pub use crate::renderer::{FrameReport, Renderer, RendererConfig};
