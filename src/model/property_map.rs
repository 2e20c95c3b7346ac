//! PropertyMap: the key-value store on nodes and edges.

use indexmap::IndexMap;
use super::Value;

/// A map of property names to values, in insertion order.
pub type PropertyMap = IndexMap<String, Value>;

/// Merge `incoming` into `target`. Last write wins per key; a `Null`
/// incoming value never erases an existing one.
pub fn merge_properties(target: &mut PropertyMap, incoming: &PropertyMap) {
    for (key, value) in incoming {
        if value.is_null() && target.contains_key(key) {
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_last_write_wins() {
        let mut target = PropertyMap::new();
        target.insert("level".into(), Value::from("low"));
        target.insert("uri".into(), Value::from("http://a"));

        let mut incoming = PropertyMap::new();
        incoming.insert("level".into(), Value::from("high"));
        incoming.insert("stage".into(), Value::from("adult"));
        incoming.insert("uri".into(), Value::Null);

        merge_properties(&mut target, &incoming);

        assert_eq!(target.get("level"), Some(&Value::from("high")));
        assert_eq!(target.get("stage"), Some(&Value::from("adult")));
        assert_eq!(target.get("uri"), Some(&Value::from("http://a")));
        // existing keys keep their position
        assert_eq!(target.get_index(0).map(|(k, _)| k.as_str()), Some("level"));
    }
}
