//! Export: hand graphs and similarity scores to consumers.
//!
//! - [`to_numeric_matrix`]: dense `n × n` score array in a fixed node order
//! - [`to_node_link_json`]: node-link JSON document for the renderer
//!
//! ```text
//! Graph → to_render_compatible() → to_node_link_json() → renderer
//! ```

use serde_json::{json, Map};

use crate::model::{AttrMap, Graph, NodeKey, Value};
use crate::semantic::SimilarityMatrix;
use crate::{Error, Result};

/// Nodes of `matrix` sorted by their string form.
///
/// Fails if two distinct nodes share a string form, since the order (and
/// therefore the exported rows) would be ambiguous.
pub fn sorted_nodes(matrix: &SimilarityMatrix) -> Result<Vec<NodeKey>> {
    let mut keyed: Vec<(String, &NodeKey)> =
        matrix.nodes().iter().map(|n| (n.render(), n)).collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    if let Some(pair) = keyed.windows(2).find(|w| w[0].0 == w[1].0) {
        return Err(Error::AmbiguousNodeOrder(format!(
            "{} and {} both render as {:?}",
            pair[0].1, pair[1].1, pair[0].0
        )));
    }

    Ok(keyed.into_iter().map(|(_, n)| n.clone()).collect())
}

/// Dense score array: cell `(i, j)` is the similarity of the `i`-th and
/// `j`-th node in [`sorted_nodes`] order.
pub fn to_numeric_matrix(matrix: &SimilarityMatrix) -> Result<Vec<Vec<f64>>> {
    let nodes = sorted_nodes(matrix)?;
    let mut rows = Vec::with_capacity(nodes.len());
    for a in &nodes {
        let mut row = Vec::with_capacity(nodes.len());
        for b in &nodes {
            let score = matrix
                .get(a, b)
                .ok_or_else(|| Error::NotFound(format!("similarity of {a} and {b}")))?;
            row.push(score);
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Node-link JSON:
///
/// ```json
/// {"directed": true, "name": "G", "graph": {..},
///  "nodes": [{"id": "a", ..attrs}], "links": [{"source": "a", "target": "b", ..attrs}]}
/// ```
///
/// The graph must already be render-compatible: any non-string node id or
/// attribute key yields [`Error::NonStringKey`].
pub fn to_node_link_json(graph: &Graph) -> Result<serde_json::Value> {
    let mut nodes = Vec::with_capacity(graph.node_count());
    for (key, attrs) in graph.nodes() {
        let mut obj = attrs_to_json(attrs)?;
        obj.insert("id".into(), json!(string_id(key)?));
        nodes.push(serde_json::Value::Object(obj));
    }

    let mut links = Vec::with_capacity(graph.edge_count());
    for (u, v, attrs) in graph.edges() {
        let mut obj = attrs_to_json(attrs)?;
        obj.insert("source".into(), json!(string_id(u)?));
        obj.insert("target".into(), json!(string_id(v)?));
        links.push(serde_json::Value::Object(obj));
    }

    Ok(json!({
        "directed": true,
        "name": graph.name(),
        "graph": attrs_to_json(graph.attrs())?,
        "nodes": nodes,
        "links": links,
    }))
}

fn string_id(key: &NodeKey) -> Result<&str> {
    key.as_str()
        .ok_or_else(|| Error::NonStringKey(format!("node id {key}")))
}

fn attrs_to_json(attrs: &AttrMap) -> Result<Map<String, serde_json::Value>> {
    let mut out = Map::new();
    for (k, v) in attrs {
        let key = k
            .as_str()
            .ok_or_else(|| Error::NonStringKey(format!("attribute key {k}")))?;
        out.insert(key.to_string(), value_to_json(v)?);
    }
    Ok(out)
}

fn value_to_json(value: &Value) -> Result<serde_json::Value> {
    Ok(match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        // non-finite floats have no JSON form
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::String(s) => json!(s),
        Value::List(items) => serde_json::Value::Array(
            items.iter().map(value_to_json).collect::<Result<_>>()?,
        ),
        Value::Map(m) => serde_json::Value::Object(attrs_to_json(m)?),
    })
}
