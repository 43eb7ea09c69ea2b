//! # Graph Model
//!
//! Plain DTOs shared by every stage: loader → sanitizer → clusterer →
//! exporter. This module is pure data: no I/O, no randomness.

pub mod key;
pub mod value;
pub mod attr_map;
pub mod graph;

pub use key::{NodeKey, TUPLE_SEPARATOR};
pub use value::Value;
pub use attr_map::{AttrMap, attrs, has_only_string_keys};
pub use graph::{Graph, GraphNode};
