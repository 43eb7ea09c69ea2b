//! # DOT Language
//!
//! Graphviz DOT reader producing a [`Graph`]. The lexer and parser are pure
//! functions; [`read_dot`] is the only entry point that touches the
//! filesystem.

pub mod lexer;
pub mod parser;

use std::path::Path;

use crate::model::Graph;
use crate::Result;

/// Parse DOT source text into a directed graph.
///
/// Undirected input is returned as a directed graph holding both directions
/// of every edge.
pub fn parse(source: &str) -> Result<Graph> {
    let tokens = lexer::tokenize(source)?;
    parser::parse_graph(&tokens)
}

/// Read and parse a DOT file.
pub fn read_dot(path: &Path) -> Result<Graph> {
    let source = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "Parsing DOT file");
    parse(&source)
}
