//! Node handles and the nodes a device network is built from.

use std::fmt;

/// Handle of a circuit node. Ground is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub const GROUND: NodeId = NodeId(0);

    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    pub fn is_ground(self) -> bool {
        self.0 == 0
    }

    /// Row/column of this node in a nodal matrix.
    ///
    /// Ground has no row, every other node `n` maps to `n - 1`.
    pub fn matrix_index(self) -> Option<usize> {
        self.0.checked_sub(1).map(|i| i as usize)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// Where a node came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// A device pin bound by name.
    Pin,
    /// A node created by a device for its own internal network.
    Internal,
}

/// A named node.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    kind: NodeKind,
}

impl Node {
    pub fn pin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Pin,
        }
    }

    /// A device-internal node named `owner#suffix`.
    pub fn internal(owner: &str, suffix: &str) -> Self {
        Self {
            name: format!("{owner}#{suffix}"),
            kind: NodeKind::Internal,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_has_no_matrix_row() {
        assert!(NodeId::GROUND.is_ground());
        assert_eq!(NodeId::GROUND.to_string(), "GND");
        assert_eq!(NodeId::GROUND.matrix_index(), None);
    }

    #[test]
    fn test_matrix_index_is_shifted() {
        let id = NodeId::new(42);
        assert!(!id.is_ground());
        assert_eq!(id.to_string(), "42");
        assert_eq!(id.matrix_index(), Some(41));
    }

    #[test]
    fn test_internal_node_name() {
        let node = Node::internal("M1", "drain");
        assert_eq!(node.name(), "M1#drain");
        assert_eq!(node.kind(), NodeKind::Internal);
        assert_eq!(Node::pin("d").kind(), NodeKind::Pin);
    }
}
