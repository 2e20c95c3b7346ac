//! Summary counts over a [`NetworkGraph`](super::NetworkGraph).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Named counts, recomputed on demand. Serializes as a flat map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub total_key_events: usize,
    pub mie_count: usize,
    pub ke_count: usize,
    pub ao_count: usize,
    pub ker_count: usize,
    pub aop_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub gene_association_count: usize,
    pub compound_association_count: usize,
    pub component_association_count: usize,
    pub organ_association_count: usize,
    pub gene_expression_association_count: usize,
}

impl GraphSummary {
    pub fn to_map(&self) -> IndexMap<&'static str, usize> {
        IndexMap::from([
            ("total_key_events", self.total_key_events),
            ("mie_count", self.mie_count),
            ("ke_count", self.ke_count),
            ("ao_count", self.ao_count),
            ("ker_count", self.ker_count),
            ("aop_count", self.aop_count),
            ("node_count", self.node_count),
            ("edge_count", self.edge_count),
            ("gene_association_count", self.gene_association_count),
            ("compound_association_count", self.compound_association_count),
            ("component_association_count", self.component_association_count),
            ("organ_association_count", self.organ_association_count),
            ("gene_expression_association_count", self.gene_expression_association_count),
        ])
    }

    /// MIE + KE + AO add up to the total.
    pub fn is_consistent(&self) -> bool {
        self.mie_count + self.ke_count + self.ao_count == self.total_key_events
    }
}
