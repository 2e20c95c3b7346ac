//! Pathway entities: AOP metadata, key events and key event relationships.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::identity::short_id;
use super::{Edge, EdgeId, EdgeKind, Node, NodeId, NodeKind, Value};

/// Metadata for one Adverse Outcome Pathway. Equality is by `aop_id` only.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct AopInfo {
    pub aop_id: String,
    pub title: String,
    pub uri: String,
}

impl AopInfo {
    pub fn new(aop_id: impl Into<String>, title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self { aop_id: aop_id.into(), title: title.into(), uri: uri.into() }
    }

    /// Derive the id from the URI's short form.
    pub fn from_uri(uri: &str, title: impl Into<String>) -> Self {
        Self::new(short_id(uri), title, uri)
    }
}

impl PartialEq for AopInfo {
    fn eq(&self, other: &Self) -> bool {
        self.aop_id == other.aop_id
    }
}

/// Position of a key event in the causal chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyEventType {
    #[serde(rename = "MIE")]
    Mie,
    #[serde(rename = "KE")]
    Ke,
    #[serde(rename = "AO")]
    Ao,
}

impl KeyEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyEventType::Mie => "MIE",
            KeyEventType::Ke => "KE",
            KeyEventType::Ao => "AO",
        }
    }

    pub fn node_kind(&self) -> NodeKind {
        match self {
            KeyEventType::Mie => NodeKind::MolecularInitiatingEvent,
            KeyEventType::Ke => NodeKind::KeyEvent,
            KeyEventType::Ao => NodeKind::AdverseOutcome,
        }
    }
}

impl fmt::Display for KeyEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A key event, keyed by `uri` inside the graph. Never deleted, only
/// enriched with further AOP associations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub ke_id: String,
    pub uri: String,
    pub title: String,
    pub ke_type: KeyEventType,
    /// Ordered set, unique by `aop_id`.
    pub aops: SmallVec<[AopInfo; 2]>,
}

impl KeyEvent {
    pub fn new(uri: impl Into<String>, title: impl Into<String>, ke_type: KeyEventType) -> Self {
        let uri = uri.into();
        Self {
            ke_id: short_id(&uri).to_owned(),
            uri,
            title: title.into(),
            ke_type,
            aops: SmallVec::new(),
        }
    }

    pub fn with_id(mut self, ke_id: impl Into<String>) -> Self {
        self.ke_id = ke_id.into();
        self
    }

    pub fn with_aop(mut self, aop: AopInfo) -> Self {
        self.add_aop(aop);
        self
    }

    /// Union-add. Returns false when an AOP with the same id is already present.
    pub fn add_aop(&mut self, aop: AopInfo) -> bool {
        if self.aops.contains(&aop) {
            return false;
        }
        self.aops.push(aop);
        true
    }

    pub fn node_id(&self) -> NodeId {
        NodeId::new(self.uri.clone())
    }

    pub fn display_label(&self) -> String {
        if self.title.is_empty() {
            format!("KE {}", self.ke_id)
        } else {
            self.title.clone()
        }
    }

    /// Node carrying this key event's current AOP membership.
    pub fn to_node(&self) -> Node {
        let aop_ids: Vec<Value> = self.aops.iter().map(|a| Value::from(&a.aop_id)).collect();
        let aop_titles: Vec<Value> = self.aops.iter().map(|a| Value::from(&a.title)).collect();
        let aop_uris: Vec<Value> = self.aops.iter().map(|a| Value::from(&a.uri)).collect();
        Node::new(self.node_id(), self.display_label(), self.ke_type.node_kind())
            .with_property("uri", &self.uri)
            .with_property("ke_id", &self.ke_id)
            .with_property("curie", format!("aop.events:{}", self.ke_id))
            .with_property("ke_type", self.ke_type.as_str())
            .with_property("aop_ids", Value::List(aop_ids))
            .with_property("aop_titles", Value::List(aop_titles))
            .with_property("aop_uris", Value::List(aop_uris))
    }
}

/// Directed relationship between two key events, held by reference
/// (their URIs), never by owned copy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEventRelationship {
    pub ker_id: String,
    pub ker_uri: String,
    pub upstream: String,
    pub downstream: String,
}

impl KeyEventRelationship {
    pub fn new(
        ker_uri: impl Into<String>,
        upstream: impl Into<String>,
        downstream: impl Into<String>,
    ) -> Self {
        let ker_uri = ker_uri.into();
        Self {
            ker_id: short_id(&ker_uri).to_owned(),
            ker_uri,
            upstream: upstream.into(),
            downstream: downstream.into(),
        }
    }

    pub fn with_id(mut self, ker_id: impl Into<String>) -> Self {
        self.ker_id = ker_id.into();
        self
    }

    /// Identity within the graph: the URI, or the endpoint pair when absent.
    pub fn key(&self) -> String {
        if self.ker_uri.is_empty() {
            format!("{}_{}", self.upstream, self.downstream)
        } else {
            self.ker_uri.clone()
        }
    }

    /// Exactly one edge between the two key event nodes. The id is explicit
    /// because several relationships may join the same pair.
    pub fn to_edge(&self) -> Edge {
        Edge::new(
            NodeId::new(self.upstream.clone()),
            NodeId::new(self.downstream.clone()),
            EdgeKind::KeyEventRelationship,
        )
        .with_id(EdgeId::new(self.key()))
        .with_label(self.ker_id.clone())
        .with_property("curie", format!("aop.relationships:{}", self.ker_id))
        .with_property("ker_uri", &self.ker_uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aop_equality_by_id() {
        let a = AopInfo::new("1", "Title A", "https://identifiers.org/aop/1");
        let b = AopInfo::new("1", "Other", "http://elsewhere/1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_add_aop_is_union() {
        let mut ke = KeyEvent::new("https://identifiers.org/aop.events/55", "Cell death", KeyEventType::Ke);
        assert_eq!(ke.ke_id, "55");
        assert!(ke.add_aop(AopInfo::new("1", "A", "")));
        assert!(!ke.add_aop(AopInfo::new("1", "A again", "")));
        assert!(ke.add_aop(AopInfo::new("2", "B", "")));
        assert_eq!(ke.aops.len(), 2);
    }

    #[test]
    fn test_key_event_node() {
        let ke = KeyEvent::new("https://identifiers.org/aop.events/18", "", KeyEventType::Mie)
            .with_aop(AopInfo::new("3", "AOP 3", ""));
        let node = ke.to_node();
        assert_eq!(node.id.as_str(), "https://identifiers.org/aop.events/18");
        assert_eq!(node.label, "KE 18");
        assert_eq!(node.kind, NodeKind::MolecularInitiatingEvent);
        assert_eq!(node.get_str("curie"), Some("aop.events:18"));
        assert_eq!(node.get("aop_ids"), Some(&Value::from(vec!["3"])));
    }

    #[test]
    fn test_relationship_edge() {
        let ker = KeyEventRelationship::new("https://identifiers.org/aop.relationships/2010", "KE1", "KE2");
        let edge = ker.to_edge();
        assert_eq!(edge.source.as_str(), "KE1");
        assert_eq!(edge.target.as_str(), "KE2");
        assert_eq!(edge.label, "2010");
        assert_eq!(edge.kind, EdgeKind::KeyEventRelationship);
        assert_eq!(edge.get_str("curie"), Some("aop.relationships:2010"));
        assert_eq!(edge.id.as_str(), "https://identifiers.org/aop.relationships/2010");
    }
}
