//! # query-dag: Query-Metric DAGs for Dashboards
//!
//! Loads DOT uploads describing query-execution metric graphs, checks them
//! for cycles, makes them safe to hand to a renderer, and colors their nodes
//! by a (placeholder) semantic similarity.
//!
//! ## Pipeline
//!
//! ```text
//! DOT bytes ─ DagLoader ─ Graph ─ to_render_compatible ─ to_node_link_json ─▶ renderer
//!                           └──── node keys ─ colorize_nodes_by_similarity ─▶ ColorMap
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use query_dag::{load_dag_from_file, to_render_compatible, colorize_nodes_by_similarity};
//! use query_dag::loader::TracingNotifier;
//!
//! let dot = b"digraph { QueryTemplate -> ExecTime -> NumJoins }";
//! let graph = load_dag_from_file(dot, &TracingNotifier).expect("valid DOT");
//! let safe = to_render_compatible(&graph);
//! let coloring = colorize_nodes_by_similarity(safe.node_keys().cloned());
//! assert_eq!(coloring.colors.len(), 3);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod dot;
pub mod normalize;
pub mod sanitize;
pub mod loader;
pub mod generator;
pub mod export;
pub mod semantic;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{AttrMap, Graph, NodeKey, Value, attrs};

// ============================================================================
// Re-exports: Pipeline entry points
// ============================================================================

pub use loader::{load_dag_from_file, is_valid_dag, DagLoader, Notifier};
pub use generator::{generate_placeholder, generate_from_dataset, DagGenerator, PlaceholderGenerator};
pub use normalize::{normalize_attrs, normalize_edge_attrs};
pub use sanitize::to_render_compatible;
pub use export::{to_numeric_matrix, to_node_link_json};
pub use semantic::{
    colorize_nodes_by_similarity, colorize_with, Colorization,
    Cluster, ColorMap, SimilarityMatrix, SimilarityModel, CategoryRandomModel,
};
pub use config::{ClusterConfig, LoaderConfig};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("DOT syntax error at position {position}: {message}")]
    SyntaxError { position: usize, message: String },

    #[error("Input is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Ambiguous node order: {0}")]
    AmbiguousNodeOrder(String),

    #[error("Non-string key: {0}")]
    NonStringKey(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
