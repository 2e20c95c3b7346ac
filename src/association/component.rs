//! Key event component (biological process / object / action) association.

use serde::{Deserialize, Serialize};

use super::{flat_row, Expand, FlatRow, Fragment};
use crate::model::identity::{OBJECT_PREFIX, PROCESS_PREFIX};
use crate::model::{short_id, Edge, EdgeKind, Node, NodeId, NodeKind};

/// Actions that become the KE → process edge label. Anything else falls
/// back to "has process".
pub const RECOGNIZED_ACTIONS: &[&str] = &[
    "increased",
    "decreased",
    "delayed",
    "premature",
    "arrested",
    "abnormal",
    "disrupted",
    "occurrence",
    "functional change",
    "morphological change",
    "pathological",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentAssociation {
    pub ke_uri: String,
    pub ke_name: String,
    /// Process IRI. Empty means the record carries no component.
    pub process: String,
    pub process_name: String,
    pub object: String,
    pub object_name: String,
    pub action: String,
}

impl ComponentAssociation {
    pub fn has_process(&self) -> bool {
        !self.process.trim().is_empty()
    }

    pub fn has_object(&self) -> bool {
        !self.object.trim().is_empty()
    }

    pub fn process_node_id(&self) -> NodeId {
        NodeId::prefixed(PROCESS_PREFIX, short_id(&self.process))
    }

    pub fn object_node_id(&self) -> NodeId {
        NodeId::prefixed(OBJECT_PREFIX, short_id(&self.object))
    }

    /// The recognized action, normalized, if any.
    pub fn recognized_action(&self) -> Option<&'static str> {
        let action = self.action.trim().to_lowercase();
        RECOGNIZED_ACTIONS.iter().copied().find(|a| *a == action)
    }
}

impl Expand for ComponentAssociation {
    fn expand(&self) -> Fragment {
        let mut fragment = Fragment::new();
        if !self.has_process() {
            return fragment;
        }

        let process = self.process_node_id();
        let process_label = if self.process_name.is_empty() {
            short_id(&self.process)
        } else {
            self.process_name.as_str()
        };
        fragment.push_node(
            Node::new(process.clone(), process_label, NodeKind::Process)
                .with_property("process_iri", &self.process)
                .with_property("process_id", short_id(&self.process)),
        );

        let mut has_process = Edge::new(NodeId::new(self.ke_uri.clone()), process.clone(), EdgeKind::HasProcess);
        if let Some(action) = self.recognized_action() {
            has_process = has_process.with_label(action);
        }
        if !self.action.is_empty() {
            has_process = has_process.with_property("action", &self.action);
        }
        fragment.push_edge(has_process);

        if self.has_object() {
            let object = self.object_node_id();
            let object_label = if self.object_name.is_empty() {
                short_id(&self.object)
            } else {
                self.object_name.as_str()
            };
            fragment.push_node(
                Node::new(object.clone(), object_label, NodeKind::Object)
                    .with_property("object_iri", &self.object)
                    .with_property("object_id", short_id(&self.object)),
            );
            fragment.push_edge(Edge::new(process, object, EdgeKind::Involves));
        }
        fragment
    }

    fn to_row(&self) -> Option<FlatRow> {
        if !self.has_process() {
            return None;
        }
        Some(flat_row([
            ("ke_uri", self.ke_uri.as_str()),
            ("ke_name", self.ke_name.as_str()),
            ("process", self.process.as_str()),
            ("process_name", self.process_name.as_str()),
            ("object", self.object.as_str()),
            ("object_name", self.object_name.as_str()),
            ("action", self.action.as_str()),
        ]))
    }
}
