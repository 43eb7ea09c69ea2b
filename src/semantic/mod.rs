//! # Semantic Coloring
//!
//! Groups metric nodes by a similarity score and colors each group:
//!
//! ```text
//! nodes → build_similarity (model) → cluster (threshold) → assign_colors
//! ```
//!
//! Every step is a pure function; randomness only enters through the
//! [`SimilarityModel`] passed in.

pub mod category;
pub mod similarity;
pub mod cluster;
pub mod color;

pub use category::{categorize, Category};
pub use similarity::{
    build_similarity, CategoryRandomModel, FnModel, SimilarityMatrix, SimilarityModel,
};
pub use cluster::{cluster, Cluster};
pub use color::{assign_colors, shade, ColorMap, Rgb, BASE_COLORS};

use crate::config::ClusterConfig;
use crate::model::NodeKey;
use crate::Result;

/// Output of a full coloring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorization {
    pub similarity: SimilarityMatrix,
    pub clusters: Vec<Cluster>,
    pub colors: ColorMap,
}

/// Color `nodes` with the placeholder model on the thread-local RNG and the
/// default threshold.
pub fn colorize_nodes_by_similarity<I, K>(nodes: I) -> Colorization
where
    I: IntoIterator<Item = K>,
    K: Into<NodeKey>,
{
    run(nodes, &mut CategoryRandomModel::thread_local(), &ClusterConfig::default())
}

/// Similarity → clustering → coloring with an explicit model and config.
///
/// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) before
/// the model is consulted if `config` does not validate.
pub fn colorize_with<I, K, M>(nodes: I, model: &mut M, config: &ClusterConfig) -> Result<Colorization>
where
    I: IntoIterator<Item = K>,
    K: Into<NodeKey>,
    M: SimilarityModel + ?Sized,
{
    config.validate()?;
    Ok(run(nodes, model, config))
}

fn run<I, K, M>(nodes: I, model: &mut M, config: &ClusterConfig) -> Colorization
where
    I: IntoIterator<Item = K>,
    K: Into<NodeKey>,
    M: SimilarityModel + ?Sized,
{
    let similarity = build_similarity(nodes, model);
    let clusters = cluster(&similarity, config.threshold);
    let colors = assign_colors(&clusters, config.shade_step);
    tracing::info!(
        nodes = similarity.len(),
        clusters = clusters.len(),
        "Colorized nodes by similarity"
    );
    Colorization { similarity, clusters, colors }
}
