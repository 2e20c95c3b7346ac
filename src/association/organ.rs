//! Key event → organ association.

use std::hash::{Hash, Hasher};

use super::{Expand, Fragment};
use crate::model::{Edge, EdgeId, EdgeKind, Node, NodeId, NodeKind};

/// Carries a pre-built organ node. The node id decides which form the
/// organ takes: bare short id for organs inlined in AOP records,
/// `organ_<shortId>` for organ batches.
#[derive(Debug, Clone)]
pub struct OrganAssociation {
    pub ke_uri: String,
    pub organ_node: Node,
    pub edge: Edge,
}

impl OrganAssociation {
    pub fn new(ke_uri: impl Into<String>, organ_node: Node) -> Self {
        let ke_uri = ke_uri.into();
        let edge = Edge::new(NodeId::new(ke_uri.clone()), organ_node.id.clone(), EdgeKind::AssociatedWith);
        Self { ke_uri, organ_node, edge }
    }

    /// Organ node with the canonical organ properties.
    pub fn organ(id: NodeId, organ_id: &str, name: &str) -> Node {
        let label = if name.is_empty() { organ_id } else { name };
        Node::new(id, label, NodeKind::Organ)
            .with_property("organ_id", organ_id)
            .with_property("organ_name", name)
    }
}

impl OrganAssociation {
    fn identity(&self) -> (&str, &NodeId, &EdgeId) {
        (&self.ke_uri, &self.organ_node.id, &self.edge.id)
    }
}

// Identity of the fact, not of the carried property maps.
impl PartialEq for OrganAssociation {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for OrganAssociation {}

impl Hash for OrganAssociation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl Expand for OrganAssociation {
    fn expand(&self) -> Fragment {
        Fragment {
            nodes: vec![self.organ_node.clone()],
            edges: vec![self.edge.clone()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_then_edge() {
        let node = OrganAssociation::organ(NodeId::from("organ_UBERON_0002107"), "UBERON_0002107", "liver");
        let fragment = OrganAssociation::new("KE1", node).expand();
        assert_eq!(fragment.nodes[0].label, "liver");
        assert_eq!(fragment.edges[0].source.as_str(), "KE1");
        assert_eq!(fragment.edges[0].target.as_str(), "organ_UBERON_0002107");
        assert_eq!(fragment.edges[0].label, "associated with");
    }

    #[test]
    fn test_equality_ignores_organ_name_spelling() {
        let id = NodeId::from("organ_UBERON_0000955");
        let a = OrganAssociation::new("KE1", OrganAssociation::organ(id.clone(), "UBERON_0000955", "brain"));
        let b = OrganAssociation::new("KE1", OrganAssociation::organ(id, "UBERON_0000955", "Brain"));
        assert_eq!(a, b);

        let mut graph = crate::graph::NetworkGraph::new();
        assert!(graph.add_organ_association(a));
        assert!(!graph.add_organ_association(b));
        assert_eq!(graph.summary().organ_association_count, 1);
    }
}
