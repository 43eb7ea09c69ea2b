//! Synthetic DAG generators.
//!
//! Both generators are placeholders standing in for a future analysis
//! pipeline. They are exposed through [`DagGenerator`] so a real
//! implementation can be swapped in without touching callers.

use crate::model::Graph;

/// Produces a DAG, optionally from a raw dataset upload.
pub trait DagGenerator {
    /// A DAG that does not depend on any input.
    fn generate(&self) -> Graph;

    /// A DAG derived from `dataset`.
    fn generate_from_dataset(&self, dataset: &[u8]) -> Graph;
}

/// Stub generator returning fixed graphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderGenerator;

impl DagGenerator for PlaceholderGenerator {
    fn generate(&self) -> Graph {
        generate_placeholder()
    }

    fn generate_from_dataset(&self, dataset: &[u8]) -> Graph {
        generate_from_dataset(dataset)
    }
}

/// Placeholder: the fixed path `A → B → C`.
pub fn generate_placeholder() -> Graph {
    tracing::debug!("Generating a placeholder DAG (no dataset)");
    let g = Graph::from_edges([("A", "B"), ("B", "C")]);
    tracing::info!(nodes = g.node_count(), edges = g.edge_count(), "Placeholder DAG generated");
    g
}

/// Placeholder: ignores `dataset` and returns `DatasetNode1 → DatasetNode2`.
pub fn generate_from_dataset(dataset: &[u8]) -> Graph {
    tracing::debug!(bytes = dataset.len(), "Generating DAG from dataset (placeholder)");
    let g = Graph::from_edges([("DatasetNode1", "DatasetNode2")]);
    tracing::info!(nodes = g.node_count(), edges = g.edge_count(), "DAG from dataset generated");
    g
}
