//! Greedy threshold clustering.

use smallvec::SmallVec;

use crate::model::NodeKey;
use super::similarity::SimilarityMatrix;

/// An ordered group of nodes. The first member is the representative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    members: SmallVec<[NodeKey; 4]>,
}

impl Cluster {
    fn singleton(node: NodeKey) -> Self {
        let mut members = SmallVec::new();
        members.push(node);
        Self { members }
    }

    /// The node every later candidate is compared against.
    pub fn representative(&self) -> &NodeKey {
        &self.members[0]
    }

    pub fn members(&self) -> &[NodeKey] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false: a cluster is created with its representative.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Single greedy pass over the matrix's nodes in input order.
///
/// Each node joins the first cluster (in creation order) whose
/// representative scores at least `threshold` against it; otherwise it
/// starts a new cluster. Order-dependent and not globally optimal.
pub fn cluster(matrix: &SimilarityMatrix, threshold: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for node in matrix.nodes() {
        let target = clusters.iter().position(|c| {
            matrix.get(node, c.representative()).unwrap_or(0.0) >= threshold
        });
        match target {
            Some(idx) => clusters[idx].members.push(node.clone()),
            None => clusters.push(Cluster::singleton(node.clone())),
        }
    }

    tracing::debug!(nodes = matrix.len(), clusters = clusters.len(), threshold, "Clustered nodes");
    clusters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::similarity::{build_similarity, FnModel};

    /// Scores 0.9 when both labels share a first letter, 0.1 otherwise.
    fn first_letter_matrix(nodes: &[&str]) -> SimilarityMatrix {
        build_similarity(nodes.iter().copied(), &mut FnModel(|a: &NodeKey, b: &NodeKey| {
            let first = |k: &NodeKey| k.as_str().and_then(|s| s.chars().next());
            if first(a) == first(b) { 0.9 } else { 0.1 }
        }))
    }

    fn labels(clusters: &[Cluster]) -> Vec<Vec<String>> {
        clusters
            .iter()
            .map(|c| c.members().iter().map(NodeKey::render).collect())
            .collect()
    }

    #[test]
    fn test_groups_by_representative() {
        let m = first_letter_matrix(&["a1", "b1", "a2", "c1", "b2"]);
        let clusters = cluster(&m, 0.7);
        assert_eq!(labels(&clusters), vec![
            vec!["a1", "a2"],
            vec!["b1", "b2"],
            vec!["c1"],
        ]);
        assert_eq!(clusters[1].representative(), &NodeKey::from("b1"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let m = build_similarity(["x", "y"], &mut FnModel(|_: &NodeKey, _: &NodeKey| 0.7));
        assert_eq!(cluster(&m, 0.7).len(), 1);
        assert_eq!(cluster(&m, 0.71).len(), 2);
    }

    #[test]
    fn test_first_matching_cluster_wins() {
        // "z" scores above threshold with both representatives; it joins the older one.
        let m = build_similarity(["p", "q", "z"], &mut FnModel(|a: &NodeKey, b: &NodeKey| {
            let pair = (a.render(), b.render());
            match (pair.0.as_str(), pair.1.as_str()) {
                ("p", "q") | ("q", "p") => 0.0,
                _ => 0.95,
            }
        }));
        let clusters = cluster(&m, 0.7);
        assert_eq!(labels(&clusters), vec![vec!["p", "z"], vec!["q"]]);
    }

    #[test]
    fn test_empty_matrix() {
        assert!(cluster(&SimilarityMatrix::default(), 0.7).is_empty());
    }
}
