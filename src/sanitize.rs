//! Render-compatible graph copies.
//!
//! Rendering libraries want string node ids and string attribute keys.
//! [`to_render_compatible`] builds such a copy:
//!
//! - node ids become their string form (tuples joined by `",\n"`)
//! - top-level attribute entries with a non-string key are **dropped**
//! - maps nested inside the kept values are normalized (keys renamed)

use crate::model::{AttrMap, Graph, NodeKey};
use crate::normalize::normalize_in_place;

/// Build a copy of `graph` whose node ids and attribute keys are all strings.
///
/// Two distinct ids with the same string form collapse into one node; their
/// attributes merge in insertion order.
pub fn to_render_compatible(graph: &Graph) -> Graph {
    let mut out = match graph.name() {
        Some(name) => Graph::with_name(name),
        None => Graph::new(),
    };
    *out.attrs_mut() = string_keyed(graph.attrs());

    for (key, attrs) in graph.nodes() {
        let id = render_id(key);
        if out.contains_node(&id) {
            tracing::debug!(node = %key, "Sanitized node id collides with an existing node, merging");
        }
        out.add_node(id, string_keyed(attrs));
    }

    for (u, v, attrs) in graph.edges() {
        out.add_edge(render_id(u), render_id(v), string_keyed(attrs));
    }

    tracing::debug!(
        nodes = out.node_count(),
        edges = out.edge_count(),
        "Built render-compatible graph"
    );
    out
}

fn render_id(key: &NodeKey) -> NodeKey {
    NodeKey::Str(key.render())
}

/// Keep only string-keyed entries; normalize any nested maps.
fn string_keyed(attrs: &AttrMap) -> AttrMap {
    let mut kept: AttrMap = attrs
        .iter()
        .filter(|(k, _)| k.is_str())
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    normalize_in_place(&mut kept);
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{attrs, has_only_string_keys, Value};
    use pretty_assertions::assert_eq;

    fn tuple_graph() -> Graph {
        let mut g = Graph::with_name("contracted");
        g.add_node(("X", "Y"), attrs([
            (NodeKey::from("label"), Value::from("xy")),
            (NodeKey::from(0), Value::from("dropped")),
        ]));
        g.add_edge(("X", "Y"), "Z", attrs([
            (NodeKey::from("contraction"), Value::from(attrs([(NodeKey::from(("X", "Y")), 1)]))),
            (NodeKey::from(("p", "q")), Value::from("dropped")),
        ]));
        g
    }

    #[test]
    fn test_tuple_node_rendered() {
        let out = to_render_compatible(&tuple_graph());
        let keys: Vec<_> = out.node_keys().cloned().collect();
        assert_eq!(keys, vec![NodeKey::from("X,\nY"), NodeKey::from("Z")]);
        assert_eq!(out.name(), Some("contracted"));
    }

    #[test]
    fn test_non_string_keys_dropped_at_top_level() {
        let out = to_render_compatible(&tuple_graph());
        assert_eq!(out.node_attrs(&"X,\nY".into()), Some(&attrs([("label", "xy")])));

        let edge = out.edge_attrs(&"X,\nY".into(), &"Z".into()).unwrap();
        assert_eq!(edge.len(), 1);
        assert!(has_only_string_keys(edge));
        let nested = edge.get(&"contraction".into()).and_then(Value::as_map).unwrap();
        assert_eq!(nested, &attrs([("X,\nY", 1)]));
    }

    #[test]
    fn test_deterministic() {
        let g = tuple_graph();
        assert_eq!(to_render_compatible(&g), to_render_compatible(&g));
    }

    #[test]
    fn test_colliding_ids_merge() {
        let mut g = Graph::new();
        g.add_node(1, attrs([("a", "int")]));
        g.add_node("1", attrs([("b", "str")]));
        let out = to_render_compatible(&g);
        assert_eq!(out.node_count(), 1);
        assert_eq!(out.node_attrs(&"1".into()), Some(&attrs([("a", "int"), ("b", "str")])));
    }

    #[test]
    fn test_bool_ids_render_capitalized() {
        let mut g = Graph::new();
        g.add_edge(true, ("Cached", false), AttrMap::new());
        let out = to_render_compatible(&g);
        assert!(out.contains_edge(&"True".into(), &"Cached,\nFalse".into()));
    }

    #[test]
    fn test_string_graph_unchanged() {
        let g = Graph::from_edges([("a", "b"), ("b", "c")]);
        assert_eq!(to_render_compatible(&g), g);
    }
}
