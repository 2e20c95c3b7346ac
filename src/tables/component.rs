//! Key event → process → object component table.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::graph::NetworkGraph;
use crate::model::{canonical_key_event_id, EdgeKind, Node, UNAVAILABLE};

const NO_OBJECT: &str = "no_object";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTableRow {
    pub ke_id: String,
    pub ke_name: String,
    pub process_id: String,
    pub process_name: String,
    pub object_id: String,
    pub object_name: String,
    pub action: String,
}

/// One row per (key event, process, object) triple, or per (key event,
/// process) when the process involves no object.
pub fn build_component_table(graph: &NetworkGraph) -> Vec<ComponentTableRow> {
    let outgoing = graph.outgoing_index();
    let mut rows = Vec::new();
    let mut seen: HashSet<(String, String, String)> = HashSet::new();

    for ke in graph.nodes().filter(|n| n.kind.is_key_event()) {
        let ke_id = canonical_key_event_id(ke.id.as_str());
        let Some(ke_edges) = outgoing.get(&ke.id) else { continue };

        for has_process in ke_edges.iter().filter(|e| e.kind == EdgeKind::HasProcess) {
            let Some(process) = graph.node(has_process.target.as_str()) else { continue };
            let action = has_process.get_str("action").unwrap_or_default();

            let objects: Vec<&Node> = outgoing
                .get(&process.id)
                .into_iter()
                .flatten()
                .filter(|e| e.kind == EdgeKind::Involves)
                .filter_map(|e| graph.node(e.target.as_str()))
                .collect();

            let row = |object: Option<&Node>| ComponentTableRow {
                ke_id: ke_id.clone(),
                ke_name: ke.label.clone(),
                process_id: property_or_id(process, "process_id"),
                process_name: process.label.clone(),
                object_id: object.map_or_else(|| UNAVAILABLE.to_owned(), |o| property_or_id(o, "object_id")),
                object_name: object.map_or_else(|| UNAVAILABLE.to_owned(), |o| o.label.clone()),
                action: action.to_owned(),
            };

            if objects.is_empty() {
                let key = (ke_id.clone(), process.id.to_string(), NO_OBJECT.to_owned());
                if seen.insert(key) {
                    rows.push(row(None));
                }
            }
            for object in objects {
                let key = (ke_id.clone(), process.id.to_string(), object.id.to_string());
                if seen.insert(key) {
                    rows.push(row(Some(object)));
                }
            }
        }
    }
    rows
}

fn property_or_id(node: &Node, key: &str) -> String {
    node.get_str(key).unwrap_or(node.id.as_str()).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::association::ComponentAssociation;
    use crate::model::{KeyEvent, KeyEventType};
    use pretty_assertions::assert_eq;

    const KE: &str = "https://identifiers.org/aop.events/888";

    fn component(process: &str, object: &str) -> ComponentAssociation {
        ComponentAssociation {
            ke_uri: KE.into(),
            ke_name: "Inhibition, AChE".into(),
            process: process.into(),
            process_name: format!("{} name", process),
            object: object.into(),
            object_name: if object.is_empty() { String::new() } else { format!("{} name", object) },
            action: "decreased".into(),
        }
    }

    fn graph() -> NetworkGraph {
        let mut graph = NetworkGraph::new();
        graph.add_key_event(KeyEvent::new(KE, "Inhibition, AChE", KeyEventType::Mie));
        graph
    }

    #[test]
    fn test_rows_per_triple() {
        let mut graph = graph();
        graph.add_component_association(component("http://purl.obolibrary.org/obo/GO_0001", "http://purl.obolibrary.org/obo/PR_1"));
        graph.add_component_association(component("http://purl.obolibrary.org/obo/GO_0001", "http://purl.obolibrary.org/obo/PR_2"));
        graph.add_component_association(component("http://purl.obolibrary.org/obo/GO_0002", ""));

        let rows = build_component_table(&graph);
        let view: Vec<(&str, &str, &str)> = rows
            .iter()
            .map(|r| (r.ke_id.as_str(), r.process_id.as_str(), r.object_id.as_str()))
            .collect();
        assert_eq!(
            view,
            vec![
                ("aop.events_888", "GO_0001", "PR_1"),
                ("aop.events_888", "GO_0001", "PR_2"),
                ("aop.events_888", "GO_0002", UNAVAILABLE),
            ]
        );
        assert_eq!(rows[0].action, "decreased");
        assert_eq!(rows[0].ke_name, "Inhibition, AChE");
        assert_eq!(rows[2].object_name, UNAVAILABLE);
    }

    #[test]
    fn test_empty_process_contributes_no_row() {
        let mut graph = graph();
        graph.add_component_association(component("", "http://purl.obolibrary.org/obo/PR_1"));
        assert!(build_component_table(&graph).is_empty());
    }

    #[test]
    fn test_repeat_is_deduplicated() {
        let mut graph = graph();
        for _ in 0..3 {
            graph.add_component_association(component("http://purl.obolibrary.org/obo/GO_0001", ""));
        }
        assert_eq!(build_component_table(&graph).len(), 1);
    }
}
