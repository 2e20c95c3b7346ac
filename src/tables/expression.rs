//! Gene → organ expression table.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::graph::NetworkGraph;
use crate::model::{Edge, EdgeKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneExpressionRow {
    pub gene_id: String,
    pub gene_label: String,
    pub organ_id: String,
    pub organ_name: String,
    pub expression_level: String,
    pub confidence_id: String,
    pub confidence_level: String,
    pub developmental_stage_id: String,
    pub developmental_stage: String,
    pub expression_id: String,
}

/// One row per distinct (gene node, organ node) pair joined by an
/// "expressed in" edge. Each expression call is its own edge; the first
/// call for a pair supplies the values.
pub fn build_gene_expression_table(graph: &NetworkGraph) -> Vec<GeneExpressionRow> {
    let mut seen = HashSet::new();
    graph
        .edges_of_kind(EdgeKind::ExpressedIn)
        .filter(|e| seen.insert((e.source.as_str(), e.target.as_str())))
        .map(|edge| {
            let label = |id: &str| graph.node(id).map_or_else(|| id.to_owned(), |n| n.label.clone());
            GeneExpressionRow {
                gene_id: edge.source.to_string(),
                gene_label: label(edge.source.as_str()),
                organ_id: edge.get_str("anatomical_id").unwrap_or(edge.target.as_str()).to_owned(),
                organ_name: label(edge.target.as_str()),
                expression_level: prop(edge, "expression_level"),
                confidence_id: prop(edge, "confidence_id"),
                confidence_level: prop(edge, "confidence_level"),
                developmental_stage_id: prop(edge, "developmental_stage_id"),
                developmental_stage: prop(edge, "developmental_stage"),
                expression_id: prop(edge, "expression_id"),
            }
        })
        .collect()
}

fn prop(edge: &Edge, key: &str) -> String {
    edge.get_str(key).unwrap_or_default().to_owned()
}
