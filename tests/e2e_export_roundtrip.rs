//! Export round-trip tests: build a graph → export → JSON → import into a
//! fresh graph → verify the restored graph answers the same questions.
//!
//! The restored graph has nodes, edges, key events and relationships but no
//! association lists, so it exercises the whole-graph path of the
//! identifier listings and tables.

use aop_network::{
    build_gene_table, BindingRecord, GraphExport, NetworkBuilder, NetworkGraph, NodeKind,
};
use pretty_assertions::assert_eq;

const MIE: &str = "https://identifiers.org/aop.events/18";
const AO: &str = "https://identifiers.org/aop.events/459";

fn seed_graph() -> NetworkGraph {
    let mut builder = NetworkBuilder::default();
    builder.ingest_aop_records(&[BindingRecord::new()
        .with("aop", "https://identifiers.org/aop/21")
        .with("aop_title", "AhR activation leading to early life stage mortality")
        .with("mie", MIE)
        .with("mie_title", "Activation, AhR")
        .with("ao", AO)
        .with("ao_title", "Increased, Mortality")
        .with("ke_upstream", MIE)
        .with("ke_downstream", AO)
        .with("ker", "https://identifiers.org/aop.relationships/2240")]);
    builder.ingest_gene_records(&[
        BindingRecord::new()
            .with("ke", MIE)
            .with("ensembl", "ENSG00000106546")
            .with("uniprot", "P35869"),
        BindingRecord::new().with("ke", AO).with("ensembl", "ENSG00000140465"),
    ]);
    builder.ingest_organ_records(&[BindingRecord::new()
        .with("ke", AO)
        .with("organ", "http://purl.obolibrary.org/obo/UBERON_0000948")
        .with("organ_name", "heart")]);
    builder.finish().0
}

// ============================================================================
// Export shape
// ============================================================================

#[test]
fn test_export_lists_nodes_then_edges() {
    let graph = seed_graph();
    let export = graph.to_export();

    assert_eq!(export.nodes().count(), graph.node_count());
    assert_eq!(export.edges().count(), graph.edge_count());
    let first_edge = export.elements.iter().position(|e| e.is_edge()).unwrap();
    assert!(export.elements[first_edge..].iter().all(|e| e.is_edge()));
    assert_eq!(export.summary, graph.summary());
}

#[test]
fn test_export_json_shape() {
    let json = seed_graph().to_export().to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let elements = value["elements"].as_array().unwrap();
    let mie = &elements[0];
    assert_eq!(mie["data"]["id"], MIE);
    assert_eq!(mie["data"]["type"], "mie");
    assert_eq!(mie["data"]["curie"], "aop.events:18");
    assert_eq!(mie["classes"], "mie-node");

    let ker = elements.iter().find(|e| e["data"]["type"] == "ker").unwrap();
    assert_eq!(ker["data"]["source"], MIE);
    assert_eq!(ker["data"]["target"], AO);
    assert_eq!(ker["data"]["label"], "2240");

    assert_eq!(value["summary"]["ker_count"], 1);
    assert!(value["style"].as_array().is_some_and(|s| !s.is_empty()));
}

// ============================================================================
// Round trip
// ============================================================================

#[test]
fn test_round_trip_through_json() {
    let original = seed_graph();
    let json = original.to_export().to_json_pretty().unwrap();
    let parsed = GraphExport::from_json(&json).unwrap();

    let mut restored = NetworkGraph::new();
    let added = restored.import_elements(&parsed.elements).unwrap();
    assert_eq!(added, original.node_count() + original.edge_count());

    let ids = |g: &NetworkGraph| g.nodes().map(|n| n.id.to_string()).collect::<Vec<_>>();
    assert_eq!(ids(&restored), ids(&original));
    assert_eq!(restored.to_export().elements, original.to_export().elements);
}

#[test]
fn test_restored_graph_answers_from_nodes() {
    let original = seed_graph();
    let mut restored = NetworkGraph::new();
    restored.import_elements(&original.to_export().elements).unwrap();

    // no association lists, same answers
    assert_eq!(restored.summary().gene_association_count, 0);
    assert_eq!(restored.ensembl_ids(), original.ensembl_ids());
    assert_eq!(restored.organ_ids(), vec!["UBERON_0000948"]);
    assert_eq!(build_gene_table(&restored), build_gene_table(&original));
    assert_eq!(restored.nodes_of_kind(NodeKind::MolecularInitiatingEvent).count(), 1);

    // key events and relationships are registered again
    let (before, after) = (original.summary(), restored.summary());
    assert_eq!(after.total_key_events, 2);
    assert_eq!(after.total_key_events, before.total_key_events);
    assert_eq!(after.mie_count, before.mie_count);
    assert_eq!(after.ao_count, before.ao_count);
    assert_eq!(after.ker_count, 1);
    assert_eq!(restored.ke_uris(), vec![MIE, AO]);
    assert_eq!(restored.aop_uris(), vec!["https://identifiers.org/aop/21"]);
    let mie = restored.key_event(MIE).unwrap();
    assert_eq!(mie.ke_id, "18");
    assert_eq!(mie.aops[0].title, "AhR activation leading to early life stage mortality");
}

#[test]
fn test_import_twice_is_idempotent() {
    let export = seed_graph().to_export();
    let mut restored = NetworkGraph::new();
    restored.import_elements(&export.elements).unwrap();
    assert_eq!(restored.import_elements(&export.elements).unwrap(), 0);
    assert_eq!(restored.node_count() + restored.edge_count(), export.elements.len());
}
