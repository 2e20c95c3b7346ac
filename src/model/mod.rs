//! # Pathway Graph Model
//!
//! Plain DTOs shared by every other module: graph elements, their
//! identity rules, property values and the pathway entities (AOPs, key
//! events, key event relationships).
//!
//! Design rule: this module is pure data. No I/O, no logging.

pub mod node;
pub mod edge;
pub mod value;
pub mod property_map;
pub mod identity;
pub mod key_event;

pub use node::{Node, NodeId, NodeKind};
pub use edge::{Edge, EdgeId, EdgeKind};
pub use value::Value;
pub use property_map::{PropertyMap, merge_properties};
pub use identity::{short_id, canonical_key_event_id, is_available, UNAVAILABLE};
pub use key_event::{AopInfo, KeyEvent, KeyEventType, KeyEventRelationship};
