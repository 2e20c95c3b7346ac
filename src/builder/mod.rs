//! # Network Builder
//!
//! Ingestion front end. Reads raw binding records batch by batch, extracts
//! typed entities and associations, and feeds them to the
//! [`NetworkGraph`]. Batches may arrive in any order and may be re-fed;
//! the graph's identity merge absorbs repeats.
//!
//! A malformed record (required field missing or empty) is skipped with a
//! warning and noted in the session's [`IngestReport`](crate::session::IngestReport).
//! Nothing in a batch aborts the pass.

mod record;

pub use record::{parse_sparql_json, BindingRecord, BindingValue, RecordKind};

use tracing::{debug, info, warn};

use crate::association::{
    ComponentAssociation, CompoundAssociation, GeneAssociation, GeneExpressionAssociation,
    OrganAssociation,
};
use crate::graph::NetworkGraph;
use crate::model::identity::ORGAN_PREFIX;
use crate::model::*;
use crate::session::Session;
use crate::{Error, Result};

/// Binding variable names per batch kind.
pub mod fields {
    pub const AOP: &str = "aop";
    pub const AOP_ID: &str = "aop_id";
    pub const AOP_TITLE: &str = "aop_title";
    pub const MIE: &str = "mie";
    pub const AO: &str = "ao";
    pub const KE_UPSTREAM: &str = "ke_upstream";
    pub const KE_DOWNSTREAM: &str = "ke_downstream";
    pub const KER: &str = "ker";
    pub const KER_ID: &str = "ker_id";

    pub const KE: &str = "ke";
    pub const KE_NAME: &str = "ke_name";
    pub const ENSEMBL: &str = "ensembl";
    pub const UNIPROT: &str = "uniprot";

    pub const CHEMICAL: &str = "chemical";
    pub const CHEMICAL_LABEL: &str = "chemical_label";
    pub const PUBCHEM_COMPOUND: &str = "pubchem_compound";
    pub const COMPOUND_NAME: &str = "compound_name";
    pub const CAS_ID: &str = "cas_id";

    pub const PROCESS: &str = "process";
    pub const PROCESS_NAME: &str = "process_name";
    pub const OBJECT: &str = "object";
    pub const OBJECT_NAME: &str = "object_name";
    pub const ACTION: &str = "action";

    pub const ORGAN: &str = "organ";
    pub const ORGAN_NAME: &str = "organ_name";

    pub const GENE: &str = "gene";
    pub const ANATOMICAL_ENTITY: &str = "anatomical_entity";
    pub const ANATOMICAL_NAME: &str = "anatomical_name";
    pub const EXPRESSION_LEVEL: &str = "expression_level";
    pub const CONFIDENCE_LEVEL: &str = "confidence_level";
    pub const CONFIDENCE_LEVEL_NAME: &str = "confidence_level_name";
    pub const DEVELOPMENTAL_STAGE: &str = "developmental_stage";
    pub const DEVELOPMENTAL_STAGE_NAME: &str = "developmental_stage_name";
    pub const EXPRESSION: &str = "expression";
}

/// Key event roles in an AOP record, in registration order. Intermediate
/// roles come after MIE and AO so an endpoint is never duplicated as a KE.
const KE_ROLES: [(&str, KeyEventType); 4] = [
    (fields::MIE, KeyEventType::Mie),
    (fields::AO, KeyEventType::Ao),
    (fields::KE_UPSTREAM, KeyEventType::Ke),
    (fields::KE_DOWNSTREAM, KeyEventType::Ke),
];

type Apply = fn(&mut NetworkBuilder, &BindingRecord) -> Result<()>;

/// Builds one [`NetworkGraph`] for one [`Session`].
#[derive(Debug)]
pub struct NetworkBuilder {
    graph: NetworkGraph,
    session: Session,
}

impl NetworkBuilder {
    pub fn new(session: Session) -> Self {
        Self { graph: NetworkGraph::new(), session }
    }

    pub fn graph(&self) -> &NetworkGraph {
        &self.graph
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Hand over the graph and the session with its report.
    pub fn finish(self) -> (NetworkGraph, Session) {
        (self.graph, self.session)
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new(Session::default())
    }
}

impl NetworkBuilder {

    // ========================================================================
    // Batches
    // ========================================================================

    /// AOP network records: AOP metadata, MIE/KE/AO key events, the KER
    /// between upstream and downstream, inline organs.
    pub fn ingest_aop_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Aop, records, Self::apply_aop_record)
    }

    /// Relationship-only records. Endpoints must already be registered
    /// unless `strict_relationships` is off.
    pub fn ingest_relationship_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Relationship, records, Self::apply_relationship_record)
    }

    pub fn ingest_gene_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Gene, records, Self::apply_gene_record)
    }

    pub fn ingest_compound_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Compound, records, Self::apply_compound_record)
    }

    pub fn ingest_component_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Component, records, Self::apply_component_record)
    }

    pub fn ingest_organ_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Organ, records, Self::apply_organ_record)
    }

    pub fn ingest_expression_records(&mut self, records: &[BindingRecord]) -> usize {
        self.ingest(RecordKind::Expression, records, Self::apply_expression_record)
    }

    /// Apply every record; count the accepted ones.
    fn ingest(&mut self, kind: RecordKind, records: &[BindingRecord], apply: Apply) -> usize {
        let mut accepted = 0;
        for (index, record) in records.iter().enumerate() {
            match apply(self, record) {
                Ok(()) => {
                    accepted += 1;
                    self.session.report.record_accepted(kind);
                }
                Err(err) => {
                    warn!(session = %self.session.id, %kind, index, %err, "skipping binding record");
                    self.session.report.record_skipped(kind, index, err.to_string());
                }
            }
        }
        info!(
            session = %self.session.id,
            %kind,
            accepted,
            skipped = records.len() - accepted,
            "ingested batch"
        );
        accepted
    }

    // ========================================================================
    // Record extraction
    // ========================================================================

    fn apply_aop_record(&mut self, record: &BindingRecord) -> Result<()> {
        if KE_ROLES.iter().all(|(role, _)| record.get_opt(role).is_none()) {
            return Err(Error::MalformedRecord {
                kind: RecordKind::Aop,
                field: "mie|ao|ke_upstream|ke_downstream".into(),
            });
        }

        let aop = record.get_opt(fields::AOP).map(|uri| {
            let aop_id = record.get_opt(fields::AOP_ID).unwrap_or_else(|| short_id(uri));
            AopInfo::new(aop_id, record.get(fields::AOP_TITLE), uri)
        });
        let mie_uri = record.get(fields::MIE);
        let ao_uri = record.get(fields::AO);

        for (role, ke_type) in KE_ROLES {
            let Some(uri) = record.get_opt(role) else { continue };
            if ke_type == KeyEventType::Ke && (uri == mie_uri || uri == ao_uri) {
                continue;
            }
            let mut key_event = key_event_from(record, role, uri, ke_type);
            if let Some(aop) = &aop {
                key_event.add_aop(aop.clone());
            }
            self.graph.add_key_event(key_event);

            if self.session.config.include_inline_organs {
                self.inline_organ(record, role, uri);
            }
        }

        if let Some(ker_uri) = record.get_opt(fields::KER) {
            let (up, down) = (record.get(fields::KE_UPSTREAM), record.get(fields::KE_DOWNSTREAM));
            if !up.is_empty() && !down.is_empty() {
                let relationship = relationship_from(record, ker_uri, up, down);
                if let Err(err) = self.graph.link_key_events(relationship) {
                    debug!(%err, "relationship not materialized");
                }
            }
        }
        Ok(())
    }

    /// Organ bound next to a key event in the same record. Uses the bare
    /// short id so it never collides with `organ_`-prefixed batch organs.
    fn inline_organ(&mut self, record: &BindingRecord, role: &str, ke_uri: &str) {
        let Some(organ_uri) = record.get_opt(&format!("{role}_organ")) else { return };
        let organ_id = short_id(organ_uri);
        let name = record.get(&format!("{role}_organ_name"));
        let node = OrganAssociation::organ(NodeId::new(organ_id), organ_id, name);
        self.graph.add_organ_association(OrganAssociation::new(ke_uri, node));
    }

    fn apply_relationship_record(&mut self, record: &BindingRecord) -> Result<()> {
        let kind = RecordKind::Relationship;
        let ker_uri = record.require(fields::KER, kind)?;
        let up = record.require(fields::KE_UPSTREAM, kind)?;
        let down = record.require(fields::KE_DOWNSTREAM, kind)?;
        let relationship = relationship_from(record, ker_uri, up, down);

        if self.session.config.strict_relationships {
            if let Err(err) = self.graph.link_key_events(relationship) {
                debug!(%err, "relationship not materialized");
            }
        } else {
            let upstream = key_event_from(record, fields::KE_UPSTREAM, up, KeyEventType::Ke);
            let downstream = key_event_from(record, fields::KE_DOWNSTREAM, down, KeyEventType::Ke);
            self.graph.add_relationship(relationship, upstream, downstream);
        }
        Ok(())
    }

    fn apply_gene_record(&mut self, record: &BindingRecord) -> Result<()> {
        let kind = RecordKind::Gene;
        let ke_uri = record.require(fields::KE, kind)?;
        let ensembl = short_id(record.require(fields::ENSEMBL, kind)?);
        let uniprot = record
            .get_opt(fields::UNIPROT)
            .filter(|raw| is_available(Some(*raw)))
            .map(short_id)
            .map(str::to_owned);

        self.graph.add_gene_association(GeneAssociation::new(ke_uri, ensembl, uniprot));
        Ok(())
    }

    fn apply_compound_record(&mut self, record: &BindingRecord) -> Result<()> {
        let pubchem = record.require(fields::PUBCHEM_COMPOUND, RecordKind::Compound)?;
        self.graph.add_compound_association(CompoundAssociation {
            aop_uri: record.get(fields::AOP).to_owned(),
            mie_uri: record.get(fields::MIE).to_owned(),
            chemical_uri: record.get(fields::CHEMICAL).to_owned(),
            chemical_label: record.get(fields::CHEMICAL_LABEL).to_owned(),
            pubchem_compound: pubchem.to_owned(),
            compound_name: record.get(fields::COMPOUND_NAME).to_owned(),
            cas_id: record.get_opt(fields::CAS_ID).map(str::to_owned),
        });
        Ok(())
    }

    fn apply_component_record(&mut self, record: &BindingRecord) -> Result<()> {
        let ke_uri = record.require(fields::KE, RecordKind::Component)?;
        self.graph.add_component_association(ComponentAssociation {
            ke_uri: ke_uri.to_owned(),
            ke_name: record.get(fields::KE_NAME).to_owned(),
            process: record.get(fields::PROCESS).to_owned(),
            process_name: record.get(fields::PROCESS_NAME).to_owned(),
            object: record.get(fields::OBJECT).to_owned(),
            object_name: record.get(fields::OBJECT_NAME).to_owned(),
            action: record.get(fields::ACTION).to_owned(),
        });
        Ok(())
    }

    fn apply_organ_record(&mut self, record: &BindingRecord) -> Result<()> {
        let kind = RecordKind::Organ;
        let ke_uri = record.require(fields::KE, kind)?;
        let organ_id = short_id(record.require(fields::ORGAN, kind)?);
        let node = OrganAssociation::organ(
            NodeId::prefixed(ORGAN_PREFIX, organ_id),
            organ_id,
            record.get(fields::ORGAN_NAME),
        );
        self.graph.add_organ_association(OrganAssociation::new(ke_uri, node));
        Ok(())
    }

    fn apply_expression_record(&mut self, record: &BindingRecord) -> Result<()> {
        let kind = RecordKind::Expression;
        let gene = short_id(record.require(fields::GENE, kind)?);
        let anatomical = short_id(record.require(fields::ANATOMICAL_ENTITY, kind)?);
        self.graph.add_gene_expression_association(GeneExpressionAssociation {
            ensembl_id: gene.to_owned(),
            anatomical_id: anatomical.to_owned(),
            anatomical_name: record.get(fields::ANATOMICAL_NAME).to_owned(),
            expression_level: record.get(fields::EXPRESSION_LEVEL).to_owned(),
            confidence_id: short_id(record.get(fields::CONFIDENCE_LEVEL)).to_owned(),
            confidence_name: record.get(fields::CONFIDENCE_LEVEL_NAME).to_owned(),
            developmental_id: short_id(record.get(fields::DEVELOPMENTAL_STAGE)).to_owned(),
            developmental_stage_name: record.get(fields::DEVELOPMENTAL_STAGE_NAME).to_owned(),
            expr_id: short_id(record.get(fields::EXPRESSION)).to_owned(),
        });
        Ok(())
    }
}

/// Key event for `role`, reading `<role>_id` and `<role>_title` when bound.
fn key_event_from(record: &BindingRecord, role: &str, uri: &str, ke_type: KeyEventType) -> KeyEvent {
    let mut key_event = KeyEvent::new(uri, record.get(&format!("{role}_title")), ke_type);
    if let Some(id) = record.get_opt(&format!("{role}_id")) {
        key_event = key_event.with_id(id);
    }
    key_event
}

fn relationship_from(record: &BindingRecord, ker_uri: &str, up: &str, down: &str) -> KeyEventRelationship {
    let relationship = KeyEventRelationship::new(ker_uri, up, down);
    match record.get_opt(fields::KER_ID) {
        Some(id) => relationship.with_id(id),
        None => relationship,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::BuildConfig;

    fn builder() -> NetworkBuilder {
        NetworkBuilder::new(Session::new("test", BuildConfig::default()))
    }

    fn aop_record() -> BindingRecord {
        BindingRecord::new()
            .with("aop", "https://identifiers.org/aop/1")
            .with("aop_title", "AOP one")
            .with("mie", "https://identifiers.org/aop.events/10")
            .with("mie_title", "Binding")
            .with("ao", "https://identifiers.org/aop.events/30")
            .with("ao_title", "Death")
            .with("ke_upstream", "https://identifiers.org/aop.events/10")
            .with("ke_downstream", "https://identifiers.org/aop.events/20")
            .with("ke_downstream_title", "Stress")
            .with("ker", "https://identifiers.org/aop.relationships/100")
    }

    #[test]
    fn test_upstream_equal_to_mie_is_not_duplicated() {
        let mut b = builder();
        assert_eq!(b.ingest_aop_records(&[aop_record()]), 1);
        let summary = b.graph().summary();
        assert_eq!(summary.total_key_events, 3);
        assert_eq!(summary.mie_count, 1);
        assert_eq!(summary.ke_count, 1);
        assert_eq!(summary.ao_count, 1);
        assert_eq!(summary.ker_count, 1);
        let ker = b.graph().relationships().next().unwrap();
        assert_eq!(ker.ker_id, "100");
        assert_eq!(b.graph().aop_uris(), vec!["https://identifiers.org/aop/1"]);
    }

    #[test]
    fn test_aop_record_without_key_events_is_skipped() {
        let mut b = builder();
        let bad = BindingRecord::new().with("aop", "https://identifiers.org/aop/1");
        assert_eq!(b.ingest_aop_records(&[bad, aop_record()]), 1);
        assert_eq!(b.session().report.stats(RecordKind::Aop).skipped, 1);
    }

    #[test]
    fn test_gene_record_shortens_uris() {
        let mut b = builder();
        b.ingest_aop_records(&[aop_record()]);
        let gene = BindingRecord::new()
            .with("ke", "https://identifiers.org/aop.events/20")
            .with("ensembl", "http://identifiers.org/ensembl/ENSG00000141510")
            .with("uniprot", "http://purl.uniprot.org/uniprot/P04637");
        assert_eq!(b.ingest_gene_records(&[gene]), 1);
        assert!(b.graph().contains_node("ensembl_ENSG00000141510"));
        assert!(b.graph().contains_node("uniprot_P04637"));
    }

    #[test]
    fn test_unavailable_uniprot_means_no_protein() {
        let mut b = builder();
        b.ingest_aop_records(&[aop_record()]);
        let gene = BindingRecord::new()
            .with("ke", "https://identifiers.org/aop.events/20")
            .with("ensembl", "ENSG00000132170")
            .with("uniprot", "N/A");
        assert_eq!(b.ingest_gene_records(&[gene]), 1);
        assert!(!b.graph().contains_node("uniprot_A"));
        assert_eq!(b.graph().nodes_of_kind(NodeKind::Protein).count(), 0);
        assert_eq!(b.graph().edges_of_kind(EdgeKind::TranslatesTo).count(), 0);
        let part_of = "ensembl_ENSG00000132170_https://identifiers.org/aop.events/20";
        assert!(b.graph().edge(part_of).is_some());
    }

    #[test]
    fn test_refeed_recovers_edges_dropped_before_key_events() {
        let gene = BindingRecord::new()
            .with("ke", "https://identifiers.org/aop.events/20")
            .with("ensembl", "ENSG00000141510");
        let part_of = "ensembl_ENSG00000141510_https://identifiers.org/aop.events/20";

        let mut b = builder();
        b.ingest_gene_records(std::slice::from_ref(&gene));
        assert!(b.graph().edge(part_of).is_none());

        b.ingest_aop_records(&[aop_record()]);
        b.ingest_gene_records(std::slice::from_ref(&gene));
        assert!(b.graph().edge(part_of).is_some());
        assert_eq!(b.graph().gene_associations().count(), 1);
    }

    #[test]
    fn test_relationship_batch_strict_and_lenient() {
        let record = BindingRecord::new()
            .with("ker", "https://identifiers.org/aop.relationships/7")
            .with("ke_upstream", "https://identifiers.org/aop.events/1")
            .with("ke_downstream", "https://identifiers.org/aop.events/2");

        let mut strict = builder();
        assert_eq!(strict.ingest_relationship_records(&[record.clone()]), 1);
        assert_eq!(strict.graph().summary().ker_count, 0);
        assert_eq!(strict.graph().summary().total_key_events, 0);

        let config = BuildConfig { strict_relationships: false, ..BuildConfig::default() };
        let mut lenient = NetworkBuilder::new(Session::new("lenient", config));
        lenient.ingest_relationship_records(&[record]);
        assert_eq!(lenient.graph().summary().ker_count, 1);
        assert_eq!(lenient.graph().summary().ke_count, 2);
    }

    #[test]
    fn test_inline_organ_toggle() {
        let record = aop_record()
            .with("ao_organ", "http://purl.obolibrary.org/obo/UBERON_0002107")
            .with("ao_organ_name", "liver");

        let mut with = builder();
        with.ingest_aop_records(&[record.clone()]);
        assert!(with.graph().contains_node("UBERON_0002107"));

        let config = BuildConfig { include_inline_organs: false, ..BuildConfig::default() };
        let mut without = NetworkBuilder::new(Session::new("no-organs", config));
        without.ingest_aop_records(&[record]);
        assert!(!without.graph().contains_node("UBERON_0002107"));
    }
}
