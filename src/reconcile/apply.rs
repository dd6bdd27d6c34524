use crate::{
    foundation::core::NodeId,
    reconcile::message::Message,
    scene::{graph::SceneGraph, node::Node},
};

/// What one batch did to the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub created: usize,
    pub updated: usize,
    pub detached: usize,
    pub moved: usize,
    /// Structural moves skipped because the node or parent was missing or the move was invalid.
    pub dropped_moves: usize,
}

struct Move {
    node: NodeId,
    parent: NodeId,
    next: Option<NodeId>,
}

/// Apply a batch of messages in two passes.
///
/// Pass one applies content in arrival order: detach, create, attribute merge and data
/// replacement. Pass two performs every requested move against the index as it stands after
/// pass one, so a batch may mention a child before its parent. Bad entries are logged and
/// skipped; the rest of the batch still applies.
#[tracing::instrument(skip_all, fields(messages = messages.len()))]
pub fn apply_messages(graph: &mut SceneGraph, messages: Vec<Message>) -> ApplyReport {
    let mut report = ApplyReport::default();
    let mut moves = Vec::new();

    for message in messages {
        let Message {
            id,
            kind,
            attributes,
            data,
            detach,
            parent,
            next,
        } = message;

        if detach {
            if id.is_root() {
                tracing::warn!("ignoring detach of the root node");
            } else if graph.detach(id).is_some() {
                report.detached += 1;
            }
        } else {
            match graph.get_mut(id) {
                Some(node) => {
                    if let Some(attributes) = attributes {
                        node.attributes_mut().merge(attributes);
                    }
                    if let Some(data) = data {
                        node.set_data(data);
                    }
                    report.updated += 1;
                }
                None => match graph.create(id, kind, attributes.unwrap_or_default()) {
                    Ok(node) => {
                        if let Some(data) = data {
                            node.set_data(data);
                        }
                        report.created += 1;
                    }
                    Err(err) => tracing::warn!(%id, %err, "could not create node"),
                },
            }
        }

        if let Some(parent) = parent {
            moves.push(Move {
                node: id,
                parent,
                next,
            });
        }
    }

    for Move { node, parent, next } in moves {
        if !graph.contains(node) {
            tracing::warn!(%node, %parent, "dropping move of a node that is not indexed");
            report.dropped_moves += 1;
            continue;
        }
        if !graph.contains(parent) {
            tracing::warn!(%node, %parent, "dropping move under a missing parent");
            report.dropped_moves += 1;
            continue;
        }

        // A `next` that is not currently a child of `parent` means "append".
        let before =
            next.filter(|&b| b != node && graph.get(b).and_then(Node::parent) == Some(parent));
        if let (Some(next), None) = (next, before) {
            tracing::debug!(%node, %parent, %next, "next sibling not under parent; appending");
        }

        match graph.insert(parent, node, before) {
            Ok(()) => report.moved += 1,
            Err(err) => {
                tracing::warn!(%node, %parent, %err, "dropping move");
                report.dropped_moves += 1;
            }
        }
    }

    tracing::debug!(?report, "batch applied");
    report
}

#[cfg(test)]
#[path = "../../tests/unit/reconcile/apply.rs"]
mod tests;
