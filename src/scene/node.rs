use crate::{
    foundation::core::NodeId,
    scene::{attributes::Attributes, path_op::PathOp},
};

/// Node type tag that marks a node as drawable.
pub const PATH_KIND: &str = "Path";

/// Operation list of a drawable node in one of two states.
///
/// `raw` is what the producer sent. `flattened` is the memoized form with every `arcTo` expanded,
/// filled in by the first draw that meets an arc and reused until [`PathData::replace`] installs
/// new raw operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    raw: Vec<PathOp>,
    flattened: Option<Vec<PathOp>>,
}

impl PathData {
    pub fn new(raw: Vec<PathOp>) -> Self {
        Self {
            raw,
            flattened: None,
        }
    }

    pub fn raw(&self) -> &[PathOp] {
        &self.raw
    }

    pub fn flattened(&self) -> Option<&[PathOp]> {
        self.flattened.as_deref()
    }

    /// The sequence a draw executes: the flattened form once it exists, the raw form before.
    pub fn ops(&self) -> &[PathOp] {
        self.flattened.as_deref().unwrap_or(&self.raw)
    }

    pub fn is_flattened(&self) -> bool {
        self.flattened.is_some()
    }

    pub fn needs_flattening(&self) -> bool {
        self.flattened.is_none() && self.raw.iter().any(PathOp::is_arc)
    }

    /// Install new raw operations and drop any memoized flattening.
    pub fn replace(&mut self, raw: Vec<PathOp>) {
        self.raw = raw;
        self.flattened = None;
    }

    pub(crate) fn set_flattened(&mut self, ops: Vec<PathOp>) {
        self.flattened = Some(ops);
    }
}

/// One element of the scene tree.
///
/// Structural links are plain ids into the owning [`crate::SceneGraph`]; they are only changed
/// through the graph so the sibling-chain invariants hold after every call.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub(crate) id: NodeId,
    pub(crate) kind: Option<String>,
    pub(crate) attributes: Attributes,
    pub(crate) data: Option<PathData>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) previous: Option<NodeId>,
    pub(crate) next: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId, kind: Option<String>, attributes: Attributes) -> Self {
        Self {
            id,
            kind,
            attributes,
            data: None,
            parent: None,
            first_child: None,
            last_child: None,
            previous: None,
            next: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn is_drawable(&self) -> bool {
        self.kind() == Some(PATH_KIND)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }

    pub fn data(&self) -> Option<&PathData> {
        self.data.as_ref()
    }

    /// Replace the operation list wholesale; a memoized flattening is discarded.
    pub fn set_data(&mut self, raw: Vec<PathOp>) {
        match &mut self.data {
            Some(data) => data.replace(raw),
            None => self.data = Some(PathData::new(raw)),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn last_child(&self) -> Option<NodeId> {
        self.last_child
    }

    pub fn previous(&self) -> Option<NodeId> {
        self.previous
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }
}
