//! Gene expression in an anatomical entity (Bgee-style calls).

use serde::{Deserialize, Serialize};

use super::{flat_row, Expand, FlatRow, Fragment};
use crate::model::identity::{synthesize, ENSEMBL_PREFIX, EXPRESSION_PREFIX, ORGAN_PREFIX};
use crate::model::{is_available, Edge, EdgeId, EdgeKind, NodeId};
use super::OrganAssociation;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeneExpressionAssociation {
    pub ensembl_id: String,
    pub anatomical_id: String,
    pub anatomical_name: String,
    pub expression_level: String,
    pub confidence_id: String,
    pub confidence_name: String,
    pub developmental_id: String,
    pub developmental_stage_name: String,
    pub expr_id: String,
}

impl GeneExpressionAssociation {
    pub fn gene_node_id(&self) -> NodeId {
        NodeId::prefixed(ENSEMBL_PREFIX, &self.ensembl_id)
    }

    pub fn organ_node_id(&self) -> NodeId {
        NodeId::prefixed(ORGAN_PREFIX, &self.anatomical_id)
    }

    /// `expression_{expr_id}` when the call carries an id, so distinct calls
    /// for one gene/organ pair stay distinct edges.
    pub fn edge_id(&self) -> EdgeId {
        if is_available(Some(&self.expr_id)) {
            EdgeId::new(synthesize(EXPRESSION_PREFIX, &self.expr_id))
        } else {
            EdgeId::between(&self.gene_node_id(), &self.organ_node_id())
        }
    }
}

impl Expand for GeneExpressionAssociation {
    fn expand(&self) -> Fragment {
        let organ = self.organ_node_id();
        let edge = Edge::new(self.gene_node_id(), organ.clone(), EdgeKind::ExpressedIn)
            .with_id(self.edge_id())
            .with_label(format!("expressed in ({})", self.expression_level))
            .with_property("expression_level", &self.expression_level)
            .with_property("confidence_id", &self.confidence_id)
            .with_property("confidence_level", &self.confidence_name)
            .with_property("developmental_stage_id", &self.developmental_id)
            .with_property("developmental_stage", &self.developmental_stage_name)
            .with_property("expression_id", &self.expr_id)
            .with_property("anatomical_id", &self.anatomical_id);

        Fragment {
            nodes: vec![OrganAssociation::organ(organ, &self.anatomical_id, &self.anatomical_name)],
            edges: vec![edge],
        }
    }

    fn to_row(&self) -> Option<FlatRow> {
        Some(flat_row([
            ("ensembl_id", self.ensembl_id.as_str()),
            ("anatomical_id", self.anatomical_id.as_str()),
            ("anatomical_name", self.anatomical_name.as_str()),
            ("expression_level", self.expression_level.as_str()),
            ("confidence_id", self.confidence_id.as_str()),
            ("confidence_level", self.confidence_name.as_str()),
            ("developmental_stage_id", self.developmental_id.as_str()),
            ("developmental_stage", self.developmental_stage_name.as_str()),
            ("expression_id", self.expr_id.as_str()),
        ]))
    }
}
