use crate::{
    foundation::core::{Affine, NodeId, Vec2},
    render::{
        flatten::ArcFlattener,
        path::{PathStats, draw_path},
        surface::Surface,
    },
    scene::{
        graph::SceneGraph,
        node::{Node, PathData},
    },
};

/// Counters from one full-scene draw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Nodes visited, root included.
    pub nodes: usize,
    /// Drawable nodes interpreted.
    pub paths: usize,
    /// Aggregated interpreter counters.
    pub path: PathStats,
}

/// Redraw the whole scene.
///
/// Clears the surface, then walks the tree in pre-order from the root. A node with a `matrix`
/// attribute concatenates it onto the current transform for its own subtree; drawable nodes are
/// handed to [`draw_path`]. The frame runs inside one `save`/`restore` pair, translated by
/// `origin_offset`.
#[tracing::instrument(skip_all, fields(nodes = graph.node_count()))]
pub fn draw_scene<S: Surface + ?Sized>(
    graph: &mut SceneGraph,
    surface: &mut S,
    flattener: &dyn ArcFlattener,
    origin_offset: Vec2,
) -> DrawStats {
    surface.clear();
    surface.save();
    if origin_offset != Vec2::ZERO {
        surface.transform(Affine::translate(origin_offset));
    }

    let mut stats = DrawStats::default();
    walk(graph, surface, flattener, &mut stats);

    surface.restore();
    tracing::debug!(?stats, "frame drawn");
    stats
}

enum Step {
    Enter(NodeId),
    Leave { id: NodeId, restore: bool },
}

fn walk<S: Surface + ?Sized>(
    graph: &mut SceneGraph,
    surface: &mut S,
    flattener: &dyn ArcFlattener,
    stats: &mut DrawStats,
) {
    // Leaving a node enters its next sibling, so the stack grows with depth only.
    let mut stack = vec![Step::Enter(NodeId::ROOT)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                let Some(node) = graph.get_mut(id) else {
                    continue;
                };
                stats.nodes += 1;

                let matrix = node.attributes.matrix();
                if let Some(m) = matrix {
                    surface.save();
                    surface.transform(m.to_affine());
                }

                if node.is_drawable() {
                    stats.paths += 1;
                    stats.path += match node.data.as_mut() {
                        Some(data) => draw_path(surface, &node.attributes, data, flattener),
                        None => draw_path(
                            surface,
                            &node.attributes,
                            &mut PathData::default(),
                            flattener,
                        ),
                    };
                }

                let first_child = node.first_child;
                stack.push(Step::Leave {
                    id,
                    restore: matrix.is_some(),
                });
                if let Some(child) = first_child {
                    stack.push(Step::Enter(child));
                }
            }
            Step::Leave { id, restore } => {
                if restore {
                    surface.restore();
                }
                if id.is_root() {
                    continue;
                }
                if let Some(next) = graph.get(id).and_then(Node::next) {
                    stack.push(Step::Enter(next));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/draw.rs"]
mod tests;
