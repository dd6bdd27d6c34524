use serde_json::Value;

use crate::{
    foundation::core::NodeId,
    foundation::error::{SprigError, SprigResult},
    scene::{attributes::Attributes, path_op::PathOp},
};

/// One incremental scene update.
///
/// Without `detach`, a message creates the node on first sight of its id and updates it
/// afterwards. A present `parent` (with optional `next` sibling) asks for the node to be moved
/// once the whole batch's content has been applied.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Target node.
    pub id: NodeId,
    /// Node type tag, used only when the node is created.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Attributes to seed a new node with, or to merge into an existing one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    /// Replacement operation list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<PathOp>>,
    /// Detach the node and drop it from the index.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub detach: bool,
    /// New parent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    /// Sibling to insert before; append when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NodeId>,
}

impl Message {
    /// A create-or-update message carrying a type tag.
    pub fn create(id: NodeId, kind: impl Into<String>) -> Self {
        Self {
            id,
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// A create-or-update message without a type tag.
    pub fn update(id: NodeId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn detach(id: NodeId) -> Self {
        Self {
            id,
            detach: true,
            ..Self::default()
        }
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_data(mut self, data: Vec<PathOp>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_next(mut self, next: NodeId) -> Self {
        self.next = Some(next);
        self
    }
}

/// Messages decoded from one producer batch.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    /// Decoded messages in arrival order.
    pub messages: Vec<Message>,
    /// Entries that could not be decoded and were skipped.
    pub rejected: usize,
}

/// Decode one batch: a JSON array of messages.
///
/// Individual entries that fail to decode are skipped and counted; only a document that is not
/// an array at all is an error.
pub fn decode_batch(json: &str) -> SprigResult<Batch> {
    let value: Value = serde_json::from_str(json)?;
    batch_from_value(value)
}

/// Decode a sequence of batches: either an array of batches or a single batch.
pub fn decode_frames(json: &str) -> SprigResult<Vec<Batch>> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(items) if !items.is_empty() && items.iter().all(Value::is_array) => {
            items.into_iter().map(batch_from_value).collect()
        }
        other => Ok(vec![batch_from_value(other)?]),
    }
}

fn batch_from_value(value: Value) -> SprigResult<Batch> {
    let Value::Array(items) = value else {
        return Err(SprigError::message("a message batch must be a JSON array"));
    };
    let mut batch = Batch {
        messages: Vec::with_capacity(items.len()),
        rejected: 0,
    };
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<Message>(item) {
            Ok(message) => batch.messages.push(message),
            Err(err) => {
                tracing::warn!(index, %err, "skipping undecodable message");
                batch.rejected += 1;
            }
        }
    }
    Ok(batch)
}

#[cfg(test)]
#[path = "../../tests/unit/reconcile/message.rs"]
mod tests;
