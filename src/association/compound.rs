//! Chemical stressor → molecular initiating event association.

use serde::{Deserialize, Serialize};

use super::{flat_row, Expand, FlatRow, Fragment};
use crate::model::identity::PUBCHEM_PREFIX;
use crate::model::{short_id, Edge, EdgeKind, Node, NodeId, NodeKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompoundAssociation {
    pub aop_uri: String,
    /// Empty when the stressor is not linked to an MIE.
    pub mie_uri: String,
    pub chemical_uri: String,
    pub chemical_label: String,
    /// PubChem compound URI or bare CID.
    pub pubchem_compound: String,
    pub compound_name: String,
    pub cas_id: Option<String>,
}

impl CompoundAssociation {
    /// PubChem CID: suffix after the last `/`.
    pub fn pubchem_id(&self) -> &str {
        short_id(&self.pubchem_compound)
    }

    pub fn chemical_node_id(&self) -> NodeId {
        NodeId::prefixed(PUBCHEM_PREFIX, self.pubchem_id())
    }

    fn display_label(&self) -> &str {
        [&self.compound_name, &self.chemical_label]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(String::as_str)
            .unwrap_or_else(|| self.pubchem_id())
    }
}

impl Expand for CompoundAssociation {
    fn expand(&self) -> Fragment {
        let mut fragment = Fragment::new();
        let chemical = self.chemical_node_id();

        let mut node = Node::new(chemical.clone(), self.display_label(), NodeKind::Chemical)
            .with_property("pubchem_id", self.pubchem_id())
            .with_property("pubchem_compound", &self.pubchem_compound)
            .with_property("chemical_uri", &self.chemical_uri)
            .with_property("chemical_label", &self.chemical_label)
            .with_property("compound_name", &self.compound_name);
        if let Some(cas) = &self.cas_id {
            node = node.with_property("cas_id", cas);
        }
        fragment.push_node(node);

        if !self.mie_uri.is_empty() {
            fragment.push_edge(
                Edge::new(chemical, NodeId::new(self.mie_uri.clone()), EdgeKind::IsStressorOf)
                    .with_property("aop_uri", &self.aop_uri),
            );
        }
        fragment
    }

    fn to_row(&self) -> Option<FlatRow> {
        Some(flat_row([
            ("aop_uri", self.aop_uri.as_str()),
            ("mie_uri", self.mie_uri.as_str()),
            ("chemical_uri", self.chemical_uri.as_str()),
            ("chemical_label", self.chemical_label.as_str()),
            ("pubchem_id", self.pubchem_id()),
            ("compound_name", self.compound_name.as_str()),
            ("cas_id", self.cas_id.as_deref().unwrap_or_default()),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(mie: &str) -> CompoundAssociation {
        CompoundAssociation {
            aop_uri: "https://identifiers.org/aop/3".into(),
            mie_uri: mie.into(),
            chemical_uri: "https://identifiers.org/aop.stressor/11".into(),
            chemical_label: "Rotenone".into(),
            pubchem_compound: "https://identifiers.org/pubchem.compound/6758".into(),
            compound_name: "rotenone".into(),
            cas_id: Some("83-79-4".into()),
        }
    }

    #[test]
    fn test_chemical_keyed_by_pubchem_suffix() {
        let fragment = compound("MIE1").expand();
        assert_eq!(fragment.nodes.len(), 1);
        assert_eq!(fragment.nodes[0].id.as_str(), "pubchem_6758");
        assert_eq!(fragment.nodes[0].label, "rotenone");
        assert_eq!(fragment.nodes[0].get_str("cas_id"), Some("83-79-4"));
        assert_eq!(fragment.edges.len(), 1);
        assert_eq!(fragment.edges[0].label, "is stressor of");
        assert_eq!(fragment.edges[0].target.as_str(), "MIE1");
    }

    #[test]
    fn test_no_mie_no_edge() {
        let fragment = compound("").expand();
        assert_eq!(fragment.nodes.len(), 1);
        assert!(fragment.edges.is_empty());
    }
}
