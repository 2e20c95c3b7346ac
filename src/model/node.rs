//! Node in the pathway graph.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{merge_properties, PropertyMap, Value};
use crate::Error;

/// Stable node identifier. Identity is this string and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Synthesized `{prefix}_{local}` id, e.g. `ensembl_ENSG00000141510`.
    pub fn prefixed(prefix: &str, local: &str) -> Self {
        Self(super::identity::synthesize(prefix, local))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str { &self.0 }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str { &self.0 }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self { Self(s) }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "mie")]
    MolecularInitiatingEvent,
    #[serde(rename = "key-event")]
    KeyEvent,
    #[serde(rename = "adverse-outcome")]
    AdverseOutcome,
    #[serde(rename = "chemical")]
    Chemical,
    #[serde(rename = "transcript")]
    Transcript,
    #[serde(rename = "protein")]
    Protein,
    #[serde(rename = "organ")]
    Organ,
    #[serde(rename = "process")]
    Process,
    #[serde(rename = "object")]
    Object,
    #[serde(rename = "custom")]
    Custom,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::MolecularInitiatingEvent,
        NodeKind::KeyEvent,
        NodeKind::AdverseOutcome,
        NodeKind::Chemical,
        NodeKind::Transcript,
        NodeKind::Protein,
        NodeKind::Organ,
        NodeKind::Process,
        NodeKind::Object,
        NodeKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::MolecularInitiatingEvent => "mie",
            NodeKind::KeyEvent => "key-event",
            NodeKind::AdverseOutcome => "adverse-outcome",
            NodeKind::Chemical => "chemical",
            NodeKind::Transcript => "transcript",
            NodeKind::Protein => "protein",
            NodeKind::Organ => "organ",
            NodeKind::Process => "process",
            NodeKind::Object => "object",
            NodeKind::Custom => "custom",
        }
    }

    /// Style class attached to nodes of this kind.
    pub fn class(&self) -> &'static str {
        match self {
            NodeKind::MolecularInitiatingEvent => "mie-node",
            NodeKind::KeyEvent => "ke-node",
            NodeKind::AdverseOutcome => "ao-node",
            NodeKind::Chemical => "chemical-node",
            NodeKind::Transcript => "ensembl-node",
            NodeKind::Protein => "uniprot-node",
            NodeKind::Organ => "organ-node",
            NodeKind::Process => "process-node",
            NodeKind::Object => "object-node",
            NodeKind::Custom => "custom-node",
        }
    }

    /// MIE, KE or AO.
    pub fn is_key_event(&self) -> bool {
        matches!(
            self,
            NodeKind::MolecularInitiatingEvent | NodeKind::KeyEvent | NodeKind::AdverseOutcome
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| Error::UnknownKind(format!("node kind '{s}'")))
    }
}

fn visible_default() -> bool { true }

/// A node in the pathway graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub kind: NodeKind,
    /// Space-separated style classes.
    pub classes: String,
    pub properties: PropertyMap,
    /// Presentation flag only; hidden nodes stay in the graph.
    #[serde(default = "visible_default")]
    pub visible: bool,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            classes: kind.class().to_owned(),
            properties: PropertyMap::new(),
            visible: true,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        if !self.has_class(class) {
            self.classes.push(' ');
            self.classes.push_str(class);
        }
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.split_whitespace().any(|c| c == class)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// String property, if present and a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Absorb a re-inserted node with the same id: properties union
    /// (last write wins), first non-empty label and first kind are kept.
    pub fn merge_from(&mut self, other: &Node) {
        debug_assert_eq!(self.id, other.id);
        if self.label.is_empty() {
            self.label = other.label.clone();
        }
        merge_properties(&mut self.properties, &other.properties);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in NodeKind::ALL {
            assert_eq!(kind.as_str().parse::<NodeKind>().unwrap(), kind);
        }
        assert!("gene".parse::<NodeKind>().is_err());
    }

    #[test]
    fn test_merge_keeps_first_label_and_kind() {
        let mut a = Node::new("n1", "first", NodeKind::Organ).with_property("x", 1);
        let b = Node::new("n1", "second", NodeKind::Custom).with_property("y", 2);
        a.merge_from(&b);
        assert_eq!(a.label, "first");
        assert_eq!(a.kind, NodeKind::Organ);
        assert_eq!(a.get("x"), Some(&Value::Int(1)));
        assert_eq!(a.get("y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_classes() {
        let node = Node::new("p", "P", NodeKind::Process).with_class("highlight");
        assert!(node.has_class("process-node"));
        assert!(node.has_class("highlight"));
        assert_eq!(node.clone().with_class("highlight").classes, node.classes);
    }
}
