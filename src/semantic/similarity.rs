//! Pairwise similarity between nodes.
//!
//! [`SimilarityModel`] is the seam for a real semantic model. The only
//! implementation today is [`CategoryRandomModel`], a placeholder that draws
//! random scores from a band chosen by whether two nodes share a
//! [`Category`].

use hashbrown::HashMap;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::model::NodeKey;
use super::category::{categorize, Category};

/// Score band for two nodes in the same category.
pub const SAME_CATEGORY_RANGE: (f64, f64) = (0.8, 1.0);
/// Score band for two nodes in different categories.
pub const CROSS_CATEGORY_RANGE: (f64, f64) = (0.0, 0.6);

/// Scores a pair of distinct nodes. Scores are expected in `[0, 1]`.
pub trait SimilarityModel {
    fn score(&mut self, a: &NodeKey, b: &NodeKey) -> f64;
}

impl<M: SimilarityModel + ?Sized> SimilarityModel for &mut M {
    fn score(&mut self, a: &NodeKey, b: &NodeKey) -> f64 {
        (**self).score(a, b)
    }
}

impl<M: SimilarityModel + ?Sized> SimilarityModel for Box<M> {
    fn score(&mut self, a: &NodeKey, b: &NodeKey) -> f64 {
        (**self).score(a, b)
    }
}

/// Adapts a closure into a [`SimilarityModel`].
pub struct FnModel<F>(pub F);

impl<F: FnMut(&NodeKey, &NodeKey) -> f64> SimilarityModel for FnModel<F> {
    fn score(&mut self, a: &NodeKey, b: &NodeKey) -> f64 {
        (self.0)(a, b)
    }
}

/// Placeholder model: uniform in [0.8, 1.0] for same-category pairs
/// (two `Other` nodes count as the same category), uniform in [0.0, 0.6]
/// otherwise. Non-string nodes are `Other`.
#[derive(Debug, Clone)]
pub struct CategoryRandomModel<R> {
    rng: R,
}

impl<R: Rng> CategoryRandomModel<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl CategoryRandomModel<StdRng> {
    /// Deterministic model for reproducible clusterings.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl CategoryRandomModel<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> SimilarityModel for CategoryRandomModel<R> {
    fn score(&mut self, a: &NodeKey, b: &NodeKey) -> f64 {
        let (lo, hi) = if category_of(a) == category_of(b) {
            SAME_CATEGORY_RANGE
        } else {
            CROSS_CATEGORY_RANGE
        };
        self.rng.gen_range(lo..=hi)
    }
}

fn category_of(node: &NodeKey) -> Category {
    node.as_str().map_or(Category::Other, categorize)
}

// ============================================================================
// SimilarityMatrix
// ============================================================================

/// Symmetric node × node score table with a unit diagonal.
///
/// Remembers the order in which nodes were first given; clustering walks
/// nodes in that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimilarityMatrix {
    nodes: Vec<NodeKey>,
    scores: HashMap<NodeKey, HashMap<NodeKey, f64>>,
}

impl SimilarityMatrix {
    /// Nodes in input order (duplicates collapsed to their first occurrence).
    pub fn nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Score of the pair, or `None` if either node is unknown.
    pub fn get(&self, a: &NodeKey, b: &NodeKey) -> Option<f64> {
        self.scores.get(a)?.get(b).copied()
    }
}

/// Score every unordered pair of `nodes` once with `model` and mirror it.
/// Self-similarity is fixed at 1.0 and never asks the model.
pub fn build_similarity<I, K, M>(nodes: I, model: &mut M) -> SimilarityMatrix
where
    I: IntoIterator<Item = K>,
    K: Into<NodeKey>,
    M: SimilarityModel + ?Sized,
{
    let mut matrix = SimilarityMatrix::default();
    for node in nodes {
        let node = node.into();
        if !matrix.scores.contains_key(&node) {
            matrix.scores.insert(node.clone(), HashMap::new());
            matrix.nodes.push(node);
        }
    }

    let n = matrix.nodes.len();
    for i in 0..n {
        for j in i..n {
            let (a, b) = (&matrix.nodes[i], &matrix.nodes[j]);
            let score = if i == j { 1.0 } else { model.score(a, b) };
            let (a, b) = (a.clone(), b.clone());
            matrix.scores.entry(a.clone()).or_default().insert(b.clone(), score);
            matrix.scores.entry(b).or_default().insert(a, score);
        }
    }

    tracing::debug!(nodes = n, "Built similarity matrix");
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODES: [&str; 5] = ["ExecTime", "PlanTime", "NumJoins", "Foo", "Bar"];

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let m = build_similarity(NODES, &mut CategoryRandomModel::seeded(7));
        for a in m.nodes() {
            assert_eq!(m.get(a, a), Some(1.0));
            for b in m.nodes() {
                assert_eq!(m.get(a, b), m.get(b, a));
            }
        }
    }

    #[test]
    fn test_score_bands() {
        let m = build_similarity(NODES, &mut CategoryRandomModel::seeded(11));
        let s = |a: &str, b: &str| m.get(&a.into(), &b.into()).unwrap();
        assert!((0.8..=1.0).contains(&s("ExecTime", "PlanTime")));
        assert!((0.8..=1.0).contains(&s("Foo", "Bar")));
        assert!((0.0..=0.6).contains(&s("ExecTime", "NumJoins")));
        assert!((0.0..=0.6).contains(&s("NumJoins", "Foo")));
    }

    #[test]
    fn test_duplicates_collapse_to_first_occurrence() {
        let m = build_similarity(["b", "a", "b"], &mut CategoryRandomModel::seeded(1));
        assert_eq!(m.nodes(), &[NodeKey::from("b"), NodeKey::from("a")]);
    }

    #[test]
    fn test_model_called_once_per_pair() {
        let mut calls = 0;
        let m = build_similarity(["a", "b", "c", "d"], &mut FnModel(|_: &NodeKey, _: &NodeKey| {
            calls += 1;
            0.5
        }));
        assert_eq!(m.len(), 4);
        assert_eq!(calls, 6);
    }

    #[test]
    fn test_same_seed_same_matrix() {
        let a = build_similarity(NODES, &mut CategoryRandomModel::seeded(3));
        let b = build_similarity(NODES, &mut CategoryRandomModel::seeded(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_non_string_nodes_are_other() {
        let m = build_similarity(
            [NodeKey::from(1), NodeKey::from("Foo")],
            &mut CategoryRandomModel::seeded(5),
        );
        let s = m.get(&NodeKey::from(1), &NodeKey::from("Foo")).unwrap();
        assert!((0.8..=1.0).contains(&s));
    }

    #[test]
    fn test_empty_input() {
        let m = build_similarity(Vec::<NodeKey>::new(), &mut CategoryRandomModel::seeded(0));
        assert!(m.is_empty());
    }
}
