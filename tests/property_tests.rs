use proptest::prelude::*;
use query_dag::model::has_only_string_keys;
use query_dag::semantic::{cluster, build_similarity};
use query_dag::{
    colorize_with, is_valid_dag, normalize_attrs, to_render_compatible, AttrMap,
    CategoryRandomModel, ClusterConfig, Graph, NodeKey, Value,
};

fn arb_key() -> impl Strategy<Value = NodeKey> {
    let leaf = prop_oneof![
        "[a-zA-Z]{1,6}".prop_map(NodeKey::Str),
        (-50i64..50).prop_map(NodeKey::Int),
        any::<bool>().prop_map(NodeKey::Bool),
    ];
    leaf.prop_recursive(2, 8, 3, |inner| {
        prop::collection::vec(inner, 1..3).prop_map(NodeKey::Tuple)
    })
}

fn arb_attrs() -> impl Strategy<Value = AttrMap> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<i64>().prop_map(Value::Int),
        "[a-z]{0,4}".prop_map(Value::String),
    ];
    let value = leaf.prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map(arb_key(), inner, 0..4).prop_map(Value::Map)
    });
    prop::collection::btree_map(arb_key(), value, 0..5)
}

const LABELS: [&str; 8] = [
    "QueryTemplate", "ExecTime", "PlanTime", "NumJoins",
    "ReturnedRows", "NumTables", "Foo", "Bar",
];

proptest! {
    #[test]
    fn prop_forward_edges_are_acyclic(edges in prop::collection::vec((0u8..12, 0u8..12), 0..30)) {
        // only i < j edges: always a DAG
        let forward: Vec<(String, String)> = edges
            .iter()
            .filter(|(a, b)| a < b)
            .map(|(a, b)| (format!("n{a:02}"), format!("n{b:02}")))
            .collect();
        let mut g = Graph::from_edges(forward.iter().map(|(a, b)| (a.as_str(), b.as_str())));
        prop_assert!(is_valid_dag(&g));

        if let Some((a, b)) = forward.first() {
            g.add_edge(b.as_str(), a.as_str(), AttrMap::new());
            prop_assert!(!is_valid_dag(&g));
        }
    }

    #[test]
    fn prop_normalizer_idempotent(map in arb_attrs()) {
        let once = normalize_attrs(&map);
        prop_assert!(has_only_string_keys(&once));
        prop_assert_eq!(normalize_attrs(&once), once);
    }

    #[test]
    fn prop_sanitizer_string_keys_and_deterministic(
        edges in prop::collection::vec((arb_key(), arb_key(), arb_attrs()), 0..8)
    ) {
        let mut g = Graph::new();
        for (u, v, a) in edges {
            g.add_edge(u, v, a);
        }
        let out = to_render_compatible(&g);
        for (k, a) in out.nodes() {
            prop_assert!(k.is_str());
            prop_assert!(has_only_string_keys(a));
        }
        for (_, _, a) in out.edges() {
            prop_assert!(has_only_string_keys(a));
        }
        prop_assert_eq!(to_render_compatible(&g), out);
    }

    #[test]
    fn prop_clusters_partition_nodes(
        picks in prop::collection::vec(0usize..LABELS.len(), 0..16),
        seed in any::<u64>(),
        threshold in 0.0f64..=1.0,
    ) {
        let nodes: Vec<&str> = picks.iter().map(|&i| LABELS[i]).collect();
        let matrix = build_similarity(nodes.iter().copied(), &mut CategoryRandomModel::seeded(seed));
        let clusters = cluster(&matrix, threshold);

        let mut flattened: Vec<NodeKey> = clusters.iter().flat_map(|c| c.members().to_vec()).collect();
        let mut expected: Vec<NodeKey> = matrix.nodes().to_vec();
        flattened.sort();
        expected.sort();
        prop_assert_eq!(flattened, expected);
    }

    #[test]
    fn prop_color_map_total(
        picks in prop::collection::vec(0usize..LABELS.len(), 0..16),
        seed in any::<u64>(),
    ) {
        let nodes: Vec<&str> = picks.iter().map(|&i| LABELS[i]).collect();
        let out = colorize_with(nodes.iter().copied(), &mut CategoryRandomModel::seeded(seed), &ClusterConfig::default()).unwrap();

        prop_assert_eq!(out.colors.len(), out.similarity.len());
        for node in &nodes {
            let color = &out.colors[&NodeKey::from(*node)];
            let inner = color.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')'));
            prop_assert!(inner.is_some(), "bad color format: {}", color);
            let channels: Vec<u16> = inner.unwrap().split(',').map(|c| c.parse().unwrap()).collect();
            prop_assert_eq!(channels.len(), 3);
            prop_assert!(channels.iter().all(|&c| c <= 255));
        }
    }
}
