//! Attribute key normalization.
//!
//! Rewrites every non-string key of an [`AttrMap`], at every nesting depth,
//! to its string form so the map can be handed to consumers that only
//! accept string keys (JSON, renderers). Tuple keys become their elements
//! joined by `",\n"`.

use crate::model::{AttrMap, Graph, NodeKey, Value};

/// Return a copy of `map` with every key, at every depth, turned into a
/// string key.
///
/// If a renamed key collides with an existing string key, the renamed
/// entry wins.
pub fn normalize_attrs(map: &AttrMap) -> AttrMap {
    let mut out = map.clone();
    normalize_in_place(&mut out);
    out
}

/// In-place variant of [`normalize_attrs`].
pub fn normalize_in_place(map: &mut AttrMap) {
    let renamed: Vec<NodeKey> = map.keys().filter(|k| !k.is_str()).cloned().collect();
    for old in renamed {
        if let Some(value) = map.remove(&old) {
            map.insert(NodeKey::Str(old.into_rendered()), value);
        }
    }

    for value in map.values_mut() {
        if let Value::Map(inner) = value {
            normalize_in_place(inner);
        }
    }
}

/// Normalize the attribute map of every edge in `graph`.
pub fn normalize_edge_attrs(graph: &mut Graph) {
    let mut touched = 0usize;
    for attrs in graph.edge_attrs_mut() {
        normalize_in_place(attrs);
        touched += 1;
    }
    tracing::debug!(edges = touched, "Normalized edge attribute keys");
}
