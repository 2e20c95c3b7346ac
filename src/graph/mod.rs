//! # Network Graph Aggregate
//!
//! Owns the node and edge collections plus the pathway entities (key
//! events, AOP metadata, relationships) and the typed association lists.
//!
//! ## Merge semantics
//!
//! - Node and edge identity is the id. Re-inserting an id leaves the
//!   element in its original position and unions its properties.
//! - An edge whose endpoint is not a known node is dropped. Fragments
//!   merge nodes first, so an association's own nodes are always in place
//!   before its edges.
//! - Association lists are insertion-ordered sets kept for provenance.
//!   Every read method answers from the node/edge collections.
//!
//! One `NetworkGraph` belongs to one assembly session. It has no interior
//! locking; share it read-only once built.

mod summary;

pub use summary::GraphSummary;

use hashbrown::HashMap;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::association::{
    Association, AssociationKind, ComponentAssociation, CompoundAssociation, Expand, FlatRow,
    Fragment, GeneAssociation, GeneExpressionAssociation, OrganAssociation,
};
use crate::model::identity::{ENSEMBL_PREFIX, ORGAN_PREFIX};
use crate::model::*;
use crate::{Error, Result};

/// The assembled pathway network.
#[derive(Debug, Clone, Default)]
pub struct NetworkGraph {
    nodes: IndexMap<NodeId, Node>,
    edges: IndexMap<EdgeId, Edge>,
    key_events: IndexMap<String, KeyEvent>,
    aop_info: IndexMap<String, AopInfo>,
    relationships: IndexMap<String, KeyEventRelationship>,
    gene_associations: IndexSet<GeneAssociation>,
    compound_associations: IndexSet<CompoundAssociation>,
    component_associations: IndexSet<ComponentAssociation>,
    organ_associations: IndexSet<OrganAssociation>,
    expression_associations: IndexSet<GeneExpressionAssociation>,
}

impl NetworkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Element merge
    // ========================================================================

    /// Insert or merge a node. Returns true if the id was new.
    pub fn add_node(&mut self, node: Node) -> bool {
        match self.nodes.get_mut(&node.id) {
            Some(existing) => {
                existing.merge_from(&node);
                false
            }
            None => {
                self.nodes.insert(node.id.clone(), node);
                true
            }
        }
    }

    /// Insert or merge an edge, failing on an unknown endpoint.
    pub fn try_add_edge(&mut self, edge: Edge) -> Result<bool> {
        for endpoint in [&edge.source, &edge.target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(Error::DanglingReference(format!(
                    "edge {} endpoint {endpoint} is not a known node",
                    edge.id
                )));
            }
        }
        match self.edges.get_mut(&edge.id) {
            Some(existing) => {
                existing.merge_from(&edge);
                Ok(false)
            }
            None => {
                self.edges.insert(edge.id.clone(), edge);
                Ok(true)
            }
        }
    }

    /// Insert or merge an edge; a dangling edge is dropped and logged.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        match self.try_add_edge(edge) {
            Ok(added) => added,
            Err(err) => {
                debug!(%err, "dropping edge");
                false
            }
        }
    }

    /// Merge an expansion: all nodes first, then all edges.
    pub fn merge_fragment(&mut self, fragment: Fragment) {
        let Fragment { nodes, edges } = fragment;
        for node in nodes {
            self.add_node(node);
        }
        for edge in edges {
            self.add_edge(edge);
        }
    }

    /// Presentation toggle. Returns false for an unknown id.
    pub fn set_visible(&mut self, id: &str, visible: bool) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                node.visible = visible;
                true
            }
            None => false,
        }
    }

    // ========================================================================
    // Key events and relationships
    // ========================================================================

    /// Register a key event, or enrich an existing one with any new AOP
    /// associations. Title and type of an existing event never change.
    pub fn add_key_event(&mut self, key_event: KeyEvent) {
        for aop in &key_event.aops {
            self.aop_info.entry(aop.aop_id.clone()).or_insert_with(|| aop.clone());
        }

        let node = match self.key_events.get_mut(&key_event.uri) {
            Some(existing) => {
                let mut changed = false;
                for aop in key_event.aops {
                    if existing.add_aop(aop) {
                        changed = true;
                    }
                }
                if !changed {
                    return;
                }
                debug!(uri = %existing.uri, aops = existing.aops.len(), "merged AOP associations onto key event");
                existing.to_node()
            }
            None => {
                let node = key_event.to_node();
                self.key_events.insert(key_event.uri.clone(), key_event);
                node
            }
        };
        self.add_node(node);
    }

    pub fn contains_key_event(&self, uri: &str) -> bool {
        self.key_events.contains_key(uri)
    }

    pub fn key_event(&self, uri: &str) -> Option<&KeyEvent> {
        self.key_events.get(uri)
    }

    /// Add a relationship, registering both endpoints first.
    /// Returns false if the relationship was already present.
    pub fn add_relationship(
        &mut self,
        relationship: KeyEventRelationship,
        upstream: KeyEvent,
        downstream: KeyEvent,
    ) -> bool {
        debug_assert_eq!(relationship.upstream, upstream.uri);
        debug_assert_eq!(relationship.downstream, downstream.uri);
        self.add_key_event(upstream);
        self.add_key_event(downstream);
        self.insert_relationship(relationship)
    }

    /// Add a relationship between already-registered key events. Nothing
    /// is created for an unregistered endpoint.
    pub fn link_key_events(&mut self, relationship: KeyEventRelationship) -> Result<bool> {
        for uri in [&relationship.upstream, &relationship.downstream] {
            if !self.key_events.contains_key(uri) {
                return Err(Error::DanglingReference(format!(
                    "relationship {} endpoint {uri} is not a registered key event",
                    relationship.key()
                )));
            }
        }
        Ok(self.insert_relationship(relationship))
    }

    fn insert_relationship(&mut self, relationship: KeyEventRelationship) -> bool {
        let fragment = relationship.expand();
        let added = !self.relationships.contains_key(&relationship.key());
        if added {
            self.relationships.insert(relationship.key(), relationship);
        }
        self.merge_fragment(fragment);
        added
    }

    // ========================================================================
    // Associations
    // ========================================================================

    pub fn add_gene_association(&mut self, association: GeneAssociation) -> bool {
        let fragment = association.expand();
        let added = self.gene_associations.insert(association);
        self.merge_fragment(fragment);
        added
    }

    pub fn add_compound_association(&mut self, association: CompoundAssociation) -> bool {
        let fragment = association.expand();
        let added = self.compound_associations.insert(association);
        self.merge_fragment(fragment);
        added
    }

    pub fn add_component_association(&mut self, association: ComponentAssociation) -> bool {
        if !association.has_process() {
            debug!(ke = %association.ke_uri, "component without process contributes nothing");
        }
        let fragment = association.expand();
        let added = self.component_associations.insert(association);
        self.merge_fragment(fragment);
        added
    }

    pub fn add_organ_association(&mut self, association: OrganAssociation) -> bool {
        let fragment = association.expand();
        let added = self.organ_associations.insert(association);
        self.merge_fragment(fragment);
        added
    }

    pub fn add_gene_expression_association(&mut self, association: GeneExpressionAssociation) -> bool {
        let fragment = association.expand();
        let added = self.expression_associations.insert(association);
        self.merge_fragment(fragment);
        added
    }

    /// Dispatch over the association sum type. A relationship goes through
    /// [`link_key_events`](Self::link_key_events); a dangling one is dropped.
    pub fn add_association(&mut self, association: Association) -> bool {
        match association {
            Association::Gene(a) => self.add_gene_association(a),
            Association::Compound(a) => self.add_compound_association(a),
            Association::Component(a) => self.add_component_association(a),
            Association::Organ(a) => self.add_organ_association(a),
            Association::GeneExpression(a) => self.add_gene_expression_association(a),
            Association::KeyEventRelationship(a) => self.link_key_events(a).unwrap_or_else(|err| {
                debug!(%err, "dropping relationship");
                false
            }),
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.values().filter(move |n| n.kind == kind)
    }

    pub fn edges_of_kind(&self, kind: EdgeKind) -> impl Iterator<Item = &Edge> {
        self.edges.values().filter(move |e| e.kind == kind)
    }

    /// Outgoing adjacency, in edge insertion order.
    pub fn outgoing_index(&self) -> HashMap<&NodeId, Vec<&Edge>> {
        let mut index: HashMap<&NodeId, Vec<&Edge>> = HashMap::new();
        for edge in self.edges.values() {
            index.entry(&edge.source).or_default().push(edge);
        }
        index
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn key_events(&self) -> impl Iterator<Item = &KeyEvent> {
        self.key_events.values()
    }

    pub fn relationships(&self) -> impl Iterator<Item = &KeyEventRelationship> {
        self.relationships.values()
    }

    pub fn aop_info(&self) -> &IndexMap<String, AopInfo> {
        &self.aop_info
    }

    pub fn gene_associations(&self) -> impl Iterator<Item = &GeneAssociation> {
        self.gene_associations.iter()
    }

    pub fn compound_associations(&self) -> impl Iterator<Item = &CompoundAssociation> {
        self.compound_associations.iter()
    }

    pub fn component_associations(&self) -> impl Iterator<Item = &ComponentAssociation> {
        self.component_associations.iter()
    }

    pub fn organ_associations(&self) -> impl Iterator<Item = &OrganAssociation> {
        self.organ_associations.iter()
    }

    pub fn gene_expression_associations(&self) -> impl Iterator<Item = &GeneExpressionAssociation> {
        self.expression_associations.iter()
    }

    /// Provenance rows of one association kind, in insertion order.
    pub fn association_rows(&self, kind: AssociationKind) -> Vec<FlatRow> {
        fn rows<'a, T: Expand + 'a>(items: impl Iterator<Item = &'a T>) -> Vec<FlatRow> {
            items.filter_map(|item| item.to_row()).collect()
        }
        match kind {
            AssociationKind::Gene => rows(self.gene_associations.iter()),
            AssociationKind::Compound => rows(self.compound_associations.iter()),
            AssociationKind::Component => rows(self.component_associations.iter()),
            AssociationKind::Organ => rows(self.organ_associations.iter()),
            AssociationKind::GeneExpression => rows(self.expression_associations.iter()),
            AssociationKind::KeyEventRelationship => rows(self.relationships.values()),
        }
    }

    // ========================================================================
    // Identifier listings
    // ========================================================================

    pub fn ke_uris(&self) -> Vec<&str> {
        self.key_events.keys().map(String::as_str).collect()
    }

    pub fn aop_uris(&self) -> Vec<&str> {
        self.aop_info
            .values()
            .map(|aop| aop.uri.as_str())
            .filter(|uri| !uri.is_empty())
            .collect()
    }

    /// Ensembl ids from transcript nodes, then any only the gene
    /// association list knows about. Covers graphs restored from an export
    /// as well as graphs built from associations.
    pub fn ensembl_ids(&self) -> Vec<String> {
        let mut ids: IndexSet<String> = self
            .nodes_of_kind(NodeKind::Transcript)
            .map(|n| {
                n.get_str("ensembl_id")
                    .map(str::to_owned)
                    .unwrap_or_else(|| strip_prefix(n.id.as_str(), ENSEMBL_PREFIX))
            })
            .collect();
        ids.extend(self.gene_associations.iter().map(|a| a.ensembl_id.clone()));
        ids.into_iter().collect()
    }

    /// Anatomical ids from organ nodes, then any only the organ or
    /// expression association lists know about.
    pub fn organ_ids(&self) -> Vec<String> {
        let mut ids: IndexSet<String> = self
            .nodes_of_kind(NodeKind::Organ)
            .map(|n| {
                n.get_str("organ_id")
                    .map(str::to_owned)
                    .unwrap_or_else(|| strip_prefix(n.id.as_str(), ORGAN_PREFIX))
            })
            .collect();
        ids.extend(self.organ_associations.iter().filter_map(|a| {
            a.organ_node.get_str("organ_id").map(str::to_owned)
        }));
        ids.extend(self.expression_associations.iter().map(|a| a.anatomical_id.clone()));
        ids.into_iter().collect()
    }

    /// Labels carried by more than one node id. Diagnostic only; distinct
    /// ids are never unified.
    pub fn duplicate_labels(&self) -> Vec<(String, Vec<NodeId>)> {
        let mut by_label: IndexMap<String, Vec<NodeId>> = IndexMap::new();
        for node in self.nodes.values().filter(|n| !n.label.is_empty()) {
            by_label.entry(node.label.to_lowercase()).or_default().push(node.id.clone());
        }
        by_label.into_iter().filter(|(_, ids)| ids.len() > 1).collect()
    }

    // ========================================================================
    // Summary
    // ========================================================================

    /// Counts derived from the current collections.
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            total_key_events: self.key_events.len(),
            ker_count: self.relationships.len(),
            aop_count: self.aop_info.len(),
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            gene_association_count: self.gene_associations.len(),
            compound_association_count: self.compound_associations.len(),
            component_association_count: self.component_associations.len(),
            organ_association_count: self.organ_associations.len(),
            gene_expression_association_count: self.expression_associations.len(),
            ..GraphSummary::default()
        };
        for ke in self.key_events.values() {
            match ke.ke_type {
                KeyEventType::Mie => summary.mie_count += 1,
                KeyEventType::Ke => summary.ke_count += 1,
                KeyEventType::Ao => summary.ao_count += 1,
            }
        }
        summary
    }
}

fn strip_prefix(id: &str, prefix: &str) -> String {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(id)
        .to_owned()
}
