//! Gene / protein pairing table.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::MULTI_VALUE_SEPARATOR;
use crate::graph::NetworkGraph;
use crate::model::{Edge, EdgeKind, Node, NodeId, NodeKind, UNAVAILABLE};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneTableRow {
    pub gene_id: String,
    pub gene_label: String,
    pub protein_id: String,
    pub protein_label: String,
    pub uniprot_id: String,
    pub expression_organs: String,
    pub expression_levels: String,
    pub confidence_levels: String,
    pub expression_ids: String,
}

impl GeneTableRow {
    fn new(gene: Option<&Node>, protein: Option<&Node>) -> Self {
        let (gene_id, gene_label) = match gene {
            Some(n) => (n.id.to_string(), n.label.clone()),
            None => (UNAVAILABLE.to_owned(), UNAVAILABLE.to_owned()),
        };
        let (protein_id, protein_label, uniprot_id) = match protein {
            Some(n) => (
                n.id.to_string(),
                n.label.clone(),
                n.get_str("uniprot_id").unwrap_or(&n.label).to_owned(),
            ),
            None => (UNAVAILABLE.to_owned(), UNAVAILABLE.to_owned(), UNAVAILABLE.to_owned()),
        };
        Self {
            gene_id,
            gene_label,
            protein_id,
            protein_label,
            uniprot_id,
            expression_organs: String::new(),
            expression_levels: String::new(),
            confidence_levels: String::new(),
            expression_ids: String::new(),
        }
    }

    fn key(&self) -> (String, String, String) {
        (self.gene_label.clone(), self.protein_label.clone(), self.uniprot_id.clone())
    }
}

/// One row per transcript/protein pairing, plus one orphan row for every
/// transcript or protein no pairing covers.
pub fn build_gene_table(graph: &NetworkGraph) -> Vec<GeneTableRow> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();
    let mut paired: HashSet<&NodeId> = HashSet::new();

    let mut push = |row: GeneTableRow, rows: &mut Vec<GeneTableRow>| {
        if seen.insert(row.key()) {
            rows.push(row);
        }
    };

    for edge in graph.edges_of_kind(EdgeKind::TranslatesTo) {
        let Some((gene, protein)) = resolve_pair(graph, edge) else { continue };
        paired.insert(&gene.id);
        paired.insert(&protein.id);
        push(GeneTableRow::new(Some(gene), Some(protein)), &mut rows);
    }

    for gene in graph.nodes_of_kind(NodeKind::Transcript) {
        if !paired.contains(&gene.id) {
            push(GeneTableRow::new(Some(gene), None), &mut rows);
        }
    }
    for protein in graph.nodes_of_kind(NodeKind::Protein) {
        if !paired.contains(&protein.id) {
            push(GeneTableRow::new(None, Some(protein)), &mut rows);
        }
    }

    attach_expression(graph, &mut rows);
    rows
}

/// Transcript and protein ends of a "translates to" edge, decided by node
/// kind rather than edge direction.
fn resolve_pair<'g>(graph: &'g NetworkGraph, edge: &Edge) -> Option<(&'g Node, &'g Node)> {
    let a = graph.node(edge.source.as_str())?;
    let b = graph.node(edge.target.as_str())?;
    match (a.kind, b.kind) {
        (NodeKind::Transcript, NodeKind::Protein) => Some((a, b)),
        (NodeKind::Protein, NodeKind::Transcript) => Some((b, a)),
        _ => None,
    }
}

fn attach_expression(graph: &NetworkGraph, rows: &mut [GeneTableRow]) {
    let outgoing = graph.outgoing_index();
    for row in rows.iter_mut().filter(|r| r.gene_id != UNAVAILABLE) {
        let Some(edges) = outgoing.get(&NodeId::new(row.gene_id.clone())) else { continue };
        let expressed: Vec<&Edge> = edges
            .iter()
            .copied()
            .filter(|e| e.kind == EdgeKind::ExpressedIn)
            .collect();
        if expressed.is_empty() {
            continue;
        }

        let organ = |e: &Edge| {
            graph
                .node(e.target.as_str())
                .map(|n| n.label.clone())
                .unwrap_or_else(|| e.target.to_string())
        };
        row.expression_organs = join(expressed.iter().map(|e| organ(*e)));
        row.expression_levels = join(expressed.iter().map(|e| prop(e, "expression_level")));
        row.confidence_levels = join(expressed.iter().map(|e| prop(e, "confidence_level")));
        row.expression_ids = join(expressed.iter().map(|e| prop(e, "expression_id")));
    }
}

fn prop(edge: &Edge, key: &str) -> String {
    edge.get_str(key).unwrap_or_default().to_owned()
}

fn join(values: impl Iterator<Item = String>) -> String {
    values.collect::<Vec<_>>().join(MULTI_VALUE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::{GeneAssociation, GeneExpressionAssociation};
    use crate::model::{KeyEvent, KeyEventType};
    use pretty_assertions::assert_eq;

    fn graph_with_ke() -> NetworkGraph {
        let mut graph = NetworkGraph::new();
        graph.add_key_event(KeyEvent::new("KE1", "Event", KeyEventType::Ke));
        graph
    }

    #[test]
    fn test_paired_and_orphans() {
        let mut graph = graph_with_ke();
        graph.add_gene_association(GeneAssociation::new("KE1", "ENSG1", Some("P1".into())));
        graph.add_gene_association(GeneAssociation::new("KE1", "ENSG2", None));
        // a protein reached only through the whole-graph path
        graph.add_node(Node::new("uniprot_P9", "P9", NodeKind::Protein).with_property("uniprot_id", "P9"));

        let rows = build_gene_table(&graph);
        let view: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.gene_label.as_str(), r.protein_label.as_str(), r.uniprot_id.as_str()))
            .collect();
        assert_eq!(
            view,
            vec![("ENSG1", "P1", "P1"), ("ENSG2", UNAVAILABLE, UNAVAILABLE), (UNAVAILABLE, "P9", "P9")]
        );
    }

    #[test]
    fn test_reversed_edge_resolved_by_kind() {
        let mut graph = NetworkGraph::new();
        graph.add_node(Node::new("ensembl_G", "G", NodeKind::Transcript));
        graph.add_node(Node::new("uniprot_Q", "Q", NodeKind::Protein));
        graph.add_edge(Edge::new(NodeId::from("uniprot_Q"), NodeId::from("ensembl_G"), EdgeKind::TranslatesTo));
        let rows = build_gene_table(&graph);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].gene_label, "G");
        assert_eq!(rows[0].protein_label, "Q");
    }

    #[test]
    fn test_expression_fields_joined() {
        let mut graph = graph_with_ke();
        graph.add_gene_association(GeneAssociation::new("KE1", "ENSG1", None));
        for (organ, level) in [("UBERON_1", "90.1"), ("UBERON_2", "12.0")] {
            graph.add_gene_expression_association(GeneExpressionAssociation {
                ensembl_id: "ENSG1".into(),
                anatomical_id: organ.into(),
                anatomical_name: format!("{organ} name"),
                expression_level: level.into(),
                confidence_id: "CIO_1".into(),
                confidence_name: "high".into(),
                developmental_id: String::new(),
                developmental_stage_name: String::new(),
                expr_id: format!("e_{organ}"),
            });
        }
        let rows = build_gene_table(&graph);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].expression_organs, "UBERON_1 name; UBERON_2 name");
        assert_eq!(rows[0].expression_levels, "90.1; 12.0");
        assert_eq!(rows[0].confidence_levels, "high; high");
        assert_eq!(rows[0].expression_ids, "e_UBERON_1; e_UBERON_2");
    }
}
