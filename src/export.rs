//! Graph export: the flat element list handed to visualization sinks.
//!
//! ```text
//! NetworkGraph → to_export() → {elements: [{data, classes?}], summary, style}
//!   → serialize, or feed back through import_elements()
//! ```
//!
//! Node entries carry `id`, `label`, `type` plus their properties in
//! `data`; edge entries additionally carry `source` and `target`, which is
//! how a consumer tells them apart.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::graph::{GraphSummary, NetworkGraph};
use crate::model::*;
use crate::{Error, Result};

/// Class added to nodes whose `visible` flag is off.
pub const HIDDEN_CLASS: &str = "hidden";

const RESERVED_KEYS: [&str; 5] = ["id", "label", "type", "source", "target"];

/// One node or edge entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub data: Map<String, Json>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<String>,
}

impl Element {
    pub fn is_edge(&self) -> bool {
        self.data.contains_key("source") && self.data.contains_key("target")
    }

    pub fn id(&self) -> Option<&str> {
        self.field("id")
    }

    fn field(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Json::as_str)
    }
}

/// Selector → style properties, consumed opaquely by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRule {
    pub selector: String,
    pub style: IndexMap<String, String>,
}

impl StyleRule {
    fn new<'a>(selector: impl Into<String>, style: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            selector: selector.into(),
            style: style.into_iter().map(|(k, v)| (k.to_owned(), v.to_owned())).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphExport {
    pub elements: Vec<Element>,
    pub summary: GraphSummary,
    #[serde(default)]
    pub style: Vec<StyleRule>,
}

impl GraphExport {
    pub fn nodes(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| !e.is_edge())
    }

    pub fn edges(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.is_edge())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Default style sheet: one rule per node class plus the edge rules.
pub fn default_style() -> Vec<StyleRule> {
    let mut rules: Vec<StyleRule> = NodeKind::ALL
        .into_iter()
        .map(|kind| {
            let (color, shape) = match kind {
                NodeKind::MolecularInitiatingEvent => ("#ccffcc", "ellipse"),
                NodeKind::KeyEvent => ("#ffffff", "ellipse"),
                NodeKind::AdverseOutcome => ("#ffe6e6", "ellipse"),
                NodeKind::Chemical => ("#93d5f6", "triangle"),
                NodeKind::Transcript => ("#ffcc99", "rectangle"),
                NodeKind::Protein => ("#ffe4b5", "round-rectangle"),
                NodeKind::Organ => ("#8b4513", "diamond"),
                NodeKind::Process => ("#a3c1ad", "hexagon"),
                NodeKind::Object => ("#d8bfd8", "octagon"),
                NodeKind::Custom => ("#e0e0e0", "ellipse"),
            };
            StyleRule::new(
                format!("node.{}", kind.class()),
                [("background-color", color), ("shape", shape), ("label", "data(label)")],
            )
        })
        .collect();
    rules.push(StyleRule::new(
        "edge",
        [("curve-style", "bezier"), ("target-arrow-shape", "triangle"), ("label", "data(label)")],
    ));
    rules.push(StyleRule::new(
        format!("edge.{}", EdgeKind::KeyEventRelationship.as_str()),
        [("line-color", "#93d5f6"), ("width", "3")],
    ));
    rules.push(StyleRule::new(format!("node.{HIDDEN_CLASS}"), [("display", "none")]));
    rules
}

// ============================================================================
// Graph → elements
// ============================================================================

impl NetworkGraph {
    /// Every node and edge, nodes first, plus summary counts and style.
    pub fn to_export(&self) -> GraphExport {
        self.export_where(|_| true)
    }

    /// Like [`to_export`](Self::to_export) without hidden nodes and the
    /// edges touching them.
    pub fn to_visible_export(&self) -> GraphExport {
        self.export_where(|node| node.visible)
    }

    fn export_where(&self, keep: impl Fn(&Node) -> bool) -> GraphExport {
        let mut elements = Vec::with_capacity(self.node_count() + self.edge_count());
        let mut kept = hashbrown::HashSet::new();
        for node in self.nodes().filter(|n| keep(n)) {
            kept.insert(&node.id);
            elements.push(node_element(node));
        }
        for edge in self.edges() {
            if kept.contains(&edge.source) && kept.contains(&edge.target) {
                elements.push(edge_element(edge));
            }
        }
        GraphExport { elements, summary: self.summary(), style: default_style() }
    }

    /// Restore nodes and edges from exported elements with the usual merge
    /// rules. Nodes go in before edges, whatever the input order. Key event
    /// nodes and relationship edges are registered again, so the summary
    /// and identifier listings of the restored graph match the original.
    /// Returns the number of elements that were new.
    pub fn import_elements(&mut self, elements: &[Element]) -> Result<usize> {
        let mut added = 0;
        for element in elements.iter().filter(|e| !e.is_edge()) {
            let node = element_node(element)?;
            let key_event = node_key_event(&node);
            added += usize::from(self.add_node(node));
            if let Some(key_event) = key_event {
                self.add_key_event(key_event);
            }
        }
        for element in elements.iter().filter(|e| e.is_edge()) {
            let edge = element_edge(element)?;
            let relationship = (edge.kind == EdgeKind::KeyEventRelationship).then(|| edge_relationship(&edge));
            added += usize::from(self.add_edge(edge));
            if let Some(relationship) = relationship {
                self.link_key_events(relationship)?;
            }
        }
        Ok(added)
    }
}

fn node_element(node: &Node) -> Element {
    let mut data = Map::new();
    data.insert("id".into(), Json::String(node.id.to_string()));
    data.insert("label".into(), Json::String(node.label.clone()));
    data.insert("type".into(), Json::String(node.kind.as_str().to_owned()));
    insert_properties(&mut data, &node.properties);

    let classes = if node.visible {
        node.classes.clone()
    } else {
        format!("{} {HIDDEN_CLASS}", node.classes)
    };
    Element { data, classes: Some(classes) }
}

fn edge_element(edge: &Edge) -> Element {
    let mut data = Map::new();
    data.insert("id".into(), Json::String(edge.id.to_string()));
    data.insert("source".into(), Json::String(edge.source.to_string()));
    data.insert("target".into(), Json::String(edge.target.to_string()));
    data.insert("label".into(), Json::String(edge.label.clone()));
    data.insert("type".into(), Json::String(edge.kind.as_str().to_owned()));
    insert_properties(&mut data, &edge.properties);
    Element { data, classes: Some(edge.kind.as_str().to_owned()) }
}

fn insert_properties(data: &mut Map<String, Json>, properties: &PropertyMap) {
    for (key, value) in properties {
        // Element fields win over same-named properties
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }
        data.insert(key.clone(), to_json(value));
    }
}

fn to_json(value: &Value) -> Json {
    match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Int(i) => Json::from(*i),
        Value::Float(f) => serde_json::Number::from_f64(*f).map_or(Json::Null, Json::Number),
        Value::String(s) => Json::String(s.clone()),
        Value::List(items) => Json::Array(items.iter().map(to_json).collect()),
    }
}

// ============================================================================
// Elements → graph
// ============================================================================

fn element_node(element: &Element) -> Result<Node> {
    let id = element
        .id()
        .ok_or_else(|| Error::InvalidElement("node entry without id".into()))?;
    let kind = match element.field("type") {
        Some(kind) => kind.parse()?,
        None => NodeKind::Custom,
    };
    let mut node = Node::new(id, element.field("label").unwrap_or_default(), kind);
    node.properties = element_properties(element);
    if let Some(classes) = &element.classes {
        let mut visible = true;
        node.classes = classes
            .split_whitespace()
            .filter(|c| {
                let hidden = *c == HIDDEN_CLASS;
                visible &= !hidden;
                !hidden
            })
            .collect::<Vec<_>>()
            .join(" ");
        node.visible = visible;
    }
    Ok(node)
}

fn element_edge(element: &Element) -> Result<Edge> {
    let endpoint = |key: &str| {
        element
            .field(key)
            .map(NodeId::from)
            .ok_or_else(|| Error::InvalidElement(format!("edge entry without {key}")))
    };
    let (source, target) = (endpoint("source")?, endpoint("target")?);
    let kind = match element.field("type") {
        Some(kind) => kind.parse()?,
        None => EdgeKind::Custom,
    };
    let mut edge = Edge::new(source, target, kind);
    if let Some(id) = element.id() {
        edge = edge.with_id(id);
    }
    if let Some(label) = element.field("label") {
        edge = edge.with_label(label);
    }
    edge.properties = element_properties(element);
    Ok(edge)
}

/// Key event described by an MIE, KE or AO node, AOP membership included.
fn node_key_event(node: &Node) -> Option<KeyEvent> {
    let ke_type = match node.kind {
        NodeKind::MolecularInitiatingEvent => KeyEventType::Mie,
        NodeKind::KeyEvent => KeyEventType::Ke,
        NodeKind::AdverseOutcome => KeyEventType::Ao,
        _ => return None,
    };
    let uri = node.get_str("uri").unwrap_or(node.id.as_str());
    let mut key_event = KeyEvent::new(uri, node.label.clone(), ke_type);
    if let Some(ke_id) = node.get_str("ke_id") {
        key_event = key_event.with_id(ke_id);
    }

    let list = |key: &str| -> Vec<String> {
        node.get(key)
            .and_then(Value::as_list)
            .map(|items| items.iter().map(Value::to_text).collect())
            .unwrap_or_default()
    };
    let (titles, uris) = (list("aop_titles"), list("aop_uris"));
    for (i, aop_id) in list("aop_ids").into_iter().enumerate() {
        let title = titles.get(i).cloned().unwrap_or_default();
        let uri = uris.get(i).cloned().unwrap_or_default();
        key_event.add_aop(AopInfo::new(aop_id, title, uri));
    }
    Some(key_event)
}

fn edge_relationship(edge: &Edge) -> KeyEventRelationship {
    KeyEventRelationship::new(
        edge.get_str("ker_uri").unwrap_or_default(),
        edge.source.as_str(),
        edge.target.as_str(),
    )
    .with_id(edge.label.clone())
}

fn element_properties(element: &Element) -> PropertyMap {
    element
        .data
        .iter()
        .filter(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
        .map(|(key, json)| (key.clone(), from_json(json)))
        .collect()
}

fn from_json(json: &Json) -> Value {
    match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(*b),
        Json::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .or_else(|| n.as_f64().map(Value::Float))
            .unwrap_or(Value::Null),
        Json::String(s) => Value::String(s.clone()),
        Json::Array(items) => Value::List(items.iter().map(from_json).collect()),
        Json::Object(_) => Value::String(json.to_string()),
    }
}
