pub(crate) mod attributes;
pub(crate) mod graph;
pub(crate) mod node;
pub(crate) mod path_op;
