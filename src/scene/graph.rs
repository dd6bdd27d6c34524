use std::collections::HashMap;

use crate::{
    foundation::core::NodeId,
    foundation::error::{SprigError, SprigResult},
    scene::{attributes::Attributes, node::Node},
};

/// The scene tree plus the single id index covering every live node.
///
/// Nodes live in an arena keyed by [`NodeId`]; the arena doubles as the index. Parent, child and
/// sibling links are ids, so splicing a node into a sibling chain is O(1) and the tree holds no
/// reference cycles.
///
/// Invariants for attached nodes (checked by [`SceneGraph::check_invariants`]):
/// - `previous == None` iff the node is its parent's `first_child`
/// - `next == None` iff the node is its parent's `last_child`
/// - a node without a parent has neither `previous` nor `next`
#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::ROOT,
            Node::new(NodeId::ROOT, None, Attributes::new()),
        );
        Self { nodes }
    }

    pub fn root(&self) -> &Node {
        &self.nodes[&NodeId::ROOT]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of indexed nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Create an unattached node and index it.
    pub fn create(
        &mut self,
        id: NodeId,
        kind: Option<String>,
        attributes: Attributes,
    ) -> SprigResult<&mut Node> {
        if self.nodes.contains_key(&id) {
            return Err(SprigError::structure(format!("node {id} already exists")));
        }
        Ok(self
            .nodes
            .entry(id)
            .or_insert_with(|| Node::new(id, kind, attributes)))
    }

    /// Splice `node` into `parent`'s child chain immediately before `before`, or at the end when
    /// `before` is `None`. An attached node is first unlinked from its current parent.
    pub fn insert(
        &mut self,
        parent: NodeId,
        node: NodeId,
        before: Option<NodeId>,
    ) -> SprigResult<()> {
        if node.is_root() {
            return Err(SprigError::structure("the root node cannot be re-parented"));
        }
        if !self.contains(parent) {
            return Err(SprigError::structure(format!(
                "parent {parent} is not in the graph"
            )));
        }
        if !self.contains(node) {
            return Err(SprigError::structure(format!(
                "node {node} is not in the graph"
            )));
        }
        // Only a node with children can be an ancestor of `parent`.
        let has_children = self.get(node).and_then(Node::first_child).is_some();
        if parent == node || (has_children && self.is_ancestor(node, parent)) {
            return Err(SprigError::structure(format!(
                "inserting {node} under {parent} would create a cycle"
            )));
        }
        if let Some(before) = before {
            if before == node {
                return Err(SprigError::structure(format!(
                    "node {node} cannot be inserted before itself"
                )));
            }
            if self.get(before).and_then(Node::parent) != Some(parent) {
                return Err(SprigError::structure(format!(
                    "{before} is not a child of {parent}"
                )));
            }
        }

        if self.get(node).is_some_and(Node::is_attached) {
            self.unlink(node);
        }

        let previous = match before {
            Some(b) => self.get(b).and_then(Node::previous),
            None => self.get(parent).and_then(Node::last_child),
        };

        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = Some(parent);
            n.previous = previous;
            n.next = before;
        }
        match previous.and_then(|p| self.nodes.get_mut(&p)) {
            Some(prev) => prev.next = Some(node),
            None => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.first_child = Some(node);
                }
            }
        }
        match before.and_then(|b| self.nodes.get_mut(&b)) {
            Some(next) => next.previous = Some(node),
            None => {
                if let Some(p) = self.nodes.get_mut(&parent) {
                    p.last_child = Some(node);
                }
            }
        }
        Ok(())
    }

    /// Unlink an attached node from its parent's chain. The node stays indexed.
    pub fn remove(&mut self, node: NodeId) -> SprigResult<()> {
        match self.get(node) {
            None => Err(SprigError::structure(format!(
                "node {node} is not in the graph"
            ))),
            Some(n) if !n.is_attached() => Err(SprigError::structure(format!(
                "node {node} is not attached"
            ))),
            Some(_) => {
                self.unlink(node);
                Ok(())
            }
        }
    }

    /// Unlink `id` if attached and drop it from the index, returning the removed node.
    ///
    /// Descendants are not removed: the node's direct children become parentless and keep their
    /// own subtrees and index entries. The root is never detached.
    pub fn detach(&mut self, id: NodeId) -> Option<Node> {
        if id.is_root() {
            return None;
        }
        if self.get(id)?.is_attached() {
            self.unlink(id);
        }
        let mut removed = self.nodes.remove(&id)?;

        let mut child = removed.first_child.take();
        removed.last_child = None;
        while let Some(c) = child {
            let Some(n) = self.nodes.get_mut(&c) else {
                break;
            };
            child = n.next;
            n.parent = None;
            n.previous = None;
            n.next = None;
        }
        Some(removed)
    }

    /// Children of `id`, left to right.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            graph: self,
            next: self.get(id).and_then(Node::first_child),
        }
    }

    /// Whether `ancestor` is on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.get(node).and_then(Node::parent);
        let mut steps = 0;
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            steps += 1;
            if steps > self.nodes.len() {
                return false;
            }
            current = self.get(id).and_then(Node::parent);
        }
        false
    }

    /// Ids reachable from the root in pre-order (the draw order).
    pub fn traversal_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![NodeId::ROOT];
        while let Some(id) = stack.pop() {
            out.push(id);
            let start = stack.len();
            stack.extend(self.children(id).map(Node::id));
            stack[start..].reverse();
        }
        out
    }

    /// Verify the structural invariants over every indexed node.
    pub fn check_invariants(&self) -> SprigResult<()> {
        let fail = |msg: String| Err(SprigError::validation(msg));
        let limit = self.nodes.len();

        if self.root().parent.is_some() {
            return fail("root has a parent".to_string());
        }

        for (&id, node) in &self.nodes {
            if node.id != id {
                return fail(format!("node indexed as {id} carries id {}", node.id));
            }
            for link in [
                node.parent,
                node.first_child,
                node.last_child,
                node.previous,
                node.next,
            ]
            .into_iter()
            .flatten()
            {
                if !self.contains(link) {
                    return fail(format!("{id} links to unindexed node {link}"));
                }
            }

            match node.parent {
                None => {
                    if node.previous.is_some() || node.next.is_some() {
                        return fail(format!("parentless {id} has sibling links"));
                    }
                }
                Some(p) => {
                    let parent = &self.nodes[&p];
                    if node.previous.is_none() != (parent.first_child == Some(id)) {
                        return fail(format!("{id}: previous/first_child mismatch under {p}"));
                    }
                    if node.next.is_none() != (parent.last_child == Some(id)) {
                        return fail(format!("{id}: next/last_child mismatch under {p}"));
                    }
                    if let Some(prev) = node.previous {
                        let prev = &self.nodes[&prev];
                        if prev.next != Some(id) || prev.parent != Some(p) {
                            return fail(format!("{id}: previous sibling does not link back"));
                        }
                    }
                    if let Some(next) = node.next {
                        let next = &self.nodes[&next];
                        if next.previous != Some(id) || next.parent != Some(p) {
                            return fail(format!("{id}: next sibling does not link back"));
                        }
                    }
                }
            }

            if node.first_child.is_some() != node.last_child.is_some() {
                return fail(format!("{id}: first_child/last_child disagree"));
            }
            let mut steps = 0;
            let mut last = None;
            for child in self.children(id) {
                if child.parent != Some(id) {
                    return fail(format!("{} is chained under {id} but not parented", child.id));
                }
                steps += 1;
                if steps > limit {
                    return fail(format!("child chain of {id} loops"));
                }
                last = Some(child.id);
            }
            if last != node.last_child {
                return fail(format!("child chain of {id} does not end at last_child"));
            }

            let mut up = node.parent;
            let mut depth = 0;
            while let Some(p) = up {
                depth += 1;
                if depth > limit {
                    return fail(format!("parent chain of {id} loops"));
                }
                up = self.nodes[&p].parent;
            }
        }
        Ok(())
    }

    fn unlink(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(&id) else {
            return;
        };
        let parent = node.parent.take();
        let previous = node.previous.take();
        let next = node.next.take();

        if let Some(prev) = previous.and_then(|p| self.nodes.get_mut(&p)) {
            prev.next = next;
        }
        if let Some(after) = next.and_then(|n| self.nodes.get_mut(&n)) {
            after.previous = previous;
        }
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            if parent.first_child == Some(id) {
                parent.first_child = next;
            }
            if parent.last_child == Some(id) {
                parent.last_child = previous;
            }
        }
    }
}

/// Iterator over a node's children, following the sibling chain.
pub struct Children<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.graph.get(self.next?)?;
        self.next = node.next;
        Some(node)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
