//! Gene → key event association.

use serde::{Deserialize, Serialize};

use super::{flat_row, Expand, FlatRow, Fragment};
use crate::model::identity::{ENSEMBL_PREFIX, UNIPROT_PREFIX};
use crate::model::{is_available, Edge, EdgeKind, Node, NodeId, NodeKind, UNAVAILABLE};

/// A gene (Ensembl transcript id) taking part in a key event, optionally
/// through a UniProt protein.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneAssociation {
    pub ke_uri: String,
    pub ensembl_id: String,
    pub uniprot_id: Option<String>,
}

impl GeneAssociation {
    pub fn new(ke_uri: impl Into<String>, ensembl_id: impl Into<String>, uniprot_id: Option<String>) -> Self {
        Self { ke_uri: ke_uri.into(), ensembl_id: ensembl_id.into(), uniprot_id }
    }

    pub fn transcript_id(&self) -> NodeId {
        NodeId::prefixed(ENSEMBL_PREFIX, &self.ensembl_id)
    }

    /// Protein node id, unless the protein is absent or the sentinel.
    pub fn protein_id(&self) -> Option<NodeId> {
        self.uniprot_id
            .as_deref()
            .filter(|id| is_available(Some(*id)))
            .map(|id| NodeId::prefixed(UNIPROT_PREFIX, id.trim()))
    }
}

impl Expand for GeneAssociation {
    fn expand(&self) -> Fragment {
        let mut fragment = Fragment::new();
        let transcript = self.transcript_id();
        let ke = NodeId::new(self.ke_uri.clone());

        fragment.push_node(
            Node::new(transcript.clone(), self.ensembl_id.clone(), NodeKind::Transcript)
                .with_property("ensembl_id", &self.ensembl_id),
        );

        match self.protein_id() {
            Some(protein) => {
                let uniprot = self.uniprot_id.as_deref().unwrap_or_default().trim();
                fragment.push_node(
                    Node::new(protein.clone(), uniprot, NodeKind::Protein)
                        .with_property("uniprot_id", uniprot),
                );
                fragment.push_edge(Edge::new(transcript, protein.clone(), EdgeKind::TranslatesTo));
                fragment.push_edge(Edge::new(protein, ke, EdgeKind::PartOf));
            }
            None => {
                fragment.push_edge(Edge::new(transcript, ke, EdgeKind::PartOf));
            }
        }
        fragment
    }

    fn to_row(&self) -> Option<FlatRow> {
        let uniprot = self
            .uniprot_id
            .as_deref()
            .filter(|id| is_available(Some(*id)))
            .unwrap_or(UNAVAILABLE);
        Some(flat_row([
            ("ke_uri", self.ke_uri.as_str()),
            ("ensembl_id", self.ensembl_id.as_str()),
            ("uniprot_id", uniprot),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids(fragment: &Fragment) -> (Vec<&str>, Vec<(&str, &str, &str)>) {
        (
            fragment.nodes.iter().map(|n| n.id.as_str()).collect(),
            fragment
                .edges
                .iter()
                .map(|e| (e.source.as_str(), e.target.as_str(), e.label.as_str()))
                .collect(),
        )
    }

    #[test]
    fn test_protein_absent_branch() {
        let fragment = GeneAssociation::new("KE1", "ENSG1", None).expand();
        let (nodes, edges) = ids(&fragment);
        assert_eq!(nodes, vec!["ensembl_ENSG1"]);
        assert_eq!(edges, vec![("ensembl_ENSG1", "KE1", "part of")]);
    }

    #[test]
    fn test_protein_present_branch() {
        let fragment = GeneAssociation::new("KE1", "ENSG1", Some("P1".into())).expand();
        let (nodes, edges) = ids(&fragment);
        assert_eq!(nodes, vec!["ensembl_ENSG1", "uniprot_P1"]);
        assert_eq!(
            edges,
            vec![
                ("ensembl_ENSG1", "uniprot_P1", "translates to"),
                ("uniprot_P1", "KE1", "part of"),
            ]
        );
    }

    #[test]
    fn test_sentinel_protein_is_absent() {
        let fragment = GeneAssociation::new("KE1", "ENSG1", Some(UNAVAILABLE.into())).expand();
        assert_eq!(fragment.nodes.len(), 1);
        assert_eq!(fragment.edges[0].kind, EdgeKind::PartOf);
        assert_eq!(fragment.edges[0].source.as_str(), "ensembl_ENSG1");
    }

    #[test]
    fn test_row() {
        let row = GeneAssociation::new("KE1", "ENSG1", None).to_row().unwrap();
        assert_eq!(row.get("uniprot_id").map(String::as_str), Some(UNAVAILABLE));
    }
}
