//! AttrMap: the key-value store on nodes, edges and graphs.

use std::collections::BTreeMap;

use super::{NodeKey, Value};

/// A map of attribute keys to values.
///
/// Keys are [`NodeKey`]s rather than plain strings: programmatically built
/// graphs may carry tuple or integer keys until they are normalized.
pub type AttrMap = BTreeMap<NodeKey, Value>;

/// Build an [`AttrMap`] from `(key, value)` pairs.
pub fn attrs<I, K, V>(pairs: I) -> AttrMap
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<NodeKey>,
    V: Into<Value>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// True iff every key at every nesting depth is a string.
pub fn has_only_string_keys(map: &AttrMap) -> bool {
    map.iter().all(|(k, v)| {
        k.is_str() && v.as_map().is_none_or(has_only_string_keys)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_builder() {
        let m = attrs([("label", "x"), ("shape", "box")]);
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&NodeKey::from("label")), Some(&Value::from("x")));
    }

    #[test]
    fn test_has_only_string_keys_detects_nested() {
        let inner = attrs([(NodeKey::from(("a", "b")), Value::from(1))]);
        let outer = attrs([("contraction", Value::Map(inner))]);
        assert!(!has_only_string_keys(&outer));
        assert!(has_only_string_keys(&attrs([("k", 1)])));
    }
}
