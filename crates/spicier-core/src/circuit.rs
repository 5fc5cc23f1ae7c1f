//! Node registry shared by the devices of one circuit.

use indexmap::IndexMap;

use crate::node::{Node, NodeId, NodeKind};

/// Hands out node handles to devices during setup.
///
/// Devices never number nodes themselves; they ask the host for the pins
/// they are wired to and for any internal nodes their equivalent network
/// needs, then keep the returned handles for stamping.
pub trait NodeAllocator {
    /// Resolve an external pin by name, creating it on first use.
    fn bind(&mut self, name: &str) -> NodeId;

    /// Create a fresh internal node owned by `owner`.
    fn create_internal(&mut self, owner: &str, suffix: &str) -> NodeId;
}

/// A circuit node table. Node `k` is the `k`-th entry; ground is entry 0.
#[derive(Debug)]
pub struct Circuit {
    nodes: Vec<Node>,
    /// Lower-cased name lookup for pins and internal nodes.
    by_name: IndexMap<String, NodeId>,
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

impl Circuit {
    /// Create a new circuit holding only the ground node.
    pub fn new() -> Self {
        let mut by_name = IndexMap::new();
        for alias in ["0", "gnd"] {
            by_name.insert(alias.to_string(), NodeId::GROUND);
        }
        Self {
            nodes: vec![Node::pin("0")],
            by_name,
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.by_name.insert(node.name().to_ascii_lowercase(), id);
        self.nodes.push(node);
        id
    }

    /// Look up a node by name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Iterate over the nodes created by devices.
    pub fn internal_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|n| n.kind() == NodeKind::Internal)
    }

    /// Number of nodes, excluding ground.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }
}

impl NodeAllocator for Circuit {
    fn bind(&mut self, name: &str) -> NodeId {
        match self.find(name) {
            Some(id) => id,
            None => self.push(Node::pin(name)),
        }
    }

    fn create_internal(&mut self, owner: &str, suffix: &str) -> NodeId {
        self.push(Node::internal(owner, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_circuit_has_ground() {
        let circuit = Circuit::new();
        assert_eq!(circuit.node_count(), 0);
        assert_eq!(circuit.find("0"), Some(NodeId::GROUND));
        assert_eq!(circuit.node(NodeId::GROUND).map(Node::name), Some("0"));
    }

    #[test]
    fn test_bind_is_idempotent() {
        let mut circuit = Circuit::new();
        let d = circuit.bind("d");
        let g = circuit.bind("g");
        assert_eq!(circuit.bind("D"), d);
        assert_ne!(d, g);
        assert_eq!(circuit.node_count(), 2);
        assert_eq!((d, g), (NodeId::new(1), NodeId::new(2)));
    }

    #[test]
    fn test_bind_ground_alias() {
        let mut circuit = Circuit::new();
        assert_eq!(circuit.bind("gnd"), NodeId::GROUND);
        assert_eq!(circuit.node_count(), 0);
    }

    #[test]
    fn test_internal_nodes() {
        let mut circuit = Circuit::new();
        circuit.bind("d");
        let dp = circuit.create_internal("M1", "drain");
        let sp = circuit.create_internal("M1", "source");

        assert_ne!(dp, sp);
        assert_eq!(circuit.find("m1#drain"), Some(dp));
        assert_eq!(circuit.internal_nodes().count(), 2);
        assert_eq!(circuit.node(sp).map(Node::name), Some("M1#source"));
    }
}
