//! Node identifiers and attribute keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator placed between the elements of a tuple key when it is
/// rendered as a single string.
pub const TUPLE_SEPARATOR: &str = ",\n";

/// Opaque identifier used for graph nodes and attribute-map keys.
///
/// Graphs produced by contraction or quotient operations commonly carry
/// tuple identifiers; DOT input only ever produces `Str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NodeKey {
    Str(String),
    Int(i64),
    Bool(bool),
    Tuple(Vec<NodeKey>),
}

impl NodeKey {
    /// Build a tuple key from anything convertible into keys.
    pub fn tuple<I, K>(parts: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<NodeKey>,
    {
        NodeKey::Tuple(parts.into_iter().map(Into::into).collect())
    }

    pub fn is_str(&self) -> bool {
        matches!(self, NodeKey::Str(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            NodeKey::Str(s) => Some(s),
            _ => None,
        }
    }

    /// String form used wherever a key must become a string.
    ///
    /// Strings pass through unchanged, tuples are the string forms of their
    /// elements joined by [`TUPLE_SEPARATOR`], everything else uses its
    /// `Display` form.
    pub fn render(&self) -> String {
        match self {
            NodeKey::Str(s) => s.clone(),
            NodeKey::Tuple(parts) => parts
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(TUPLE_SEPARATOR),
            other => other.to_string(),
        }
    }

    /// Consume the key, returning its string form without cloning strings.
    pub fn into_rendered(self) -> String {
        match self {
            NodeKey::Str(s) => s,
            other => other.render(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Str(s) => write!(f, "{s}"),
            NodeKey::Int(i) => write!(f, "{i}"),
            NodeKey::Bool(b) => f.write_str(if *b { "True" } else { "False" }),
            NodeKey::Tuple(parts) => {
                write!(f, "(")?;
                for (i, p) in parts.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{p}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<&str> for NodeKey { fn from(v: &str) -> Self { NodeKey::Str(v.to_owned()) } }
impl From<String> for NodeKey { fn from(v: String) -> Self { NodeKey::Str(v) } }
impl From<&String> for NodeKey { fn from(v: &String) -> Self { NodeKey::Str(v.clone()) } }
impl From<i64> for NodeKey { fn from(v: i64) -> Self { NodeKey::Int(v) } }
impl From<i32> for NodeKey { fn from(v: i32) -> Self { NodeKey::Int(v as i64) } }
impl From<bool> for NodeKey { fn from(v: bool) -> Self { NodeKey::Bool(v) } }
impl<A: Into<NodeKey>, B: Into<NodeKey>> From<(A, B)> for NodeKey {
    fn from((a, b): (A, B)) -> Self { NodeKey::Tuple(vec![a.into(), b.into()]) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tuple() {
        let key = NodeKey::from(("X", "Y"));
        assert_eq!(key.render(), "X,\nY");
    }

    #[test]
    fn test_render_scalars() {
        assert_eq!(NodeKey::from("abc").render(), "abc");
        assert_eq!(NodeKey::from(42).render(), "42");
        assert_eq!(NodeKey::from(true).render(), "True");
        assert_eq!(NodeKey::from(false).render(), "False");
    }

    #[test]
    fn test_render_tuple_with_bool() {
        let key = NodeKey::from(("Cached", true));
        assert_eq!(key.render(), "Cached,\nTrue");
    }

    #[test]
    fn test_render_nested_tuple() {
        let key = NodeKey::tuple([NodeKey::from("a"), NodeKey::from(("b", 1))]);
        assert_eq!(key.render(), "a,\n(b, 1)");
    }

    #[test]
    fn test_into_rendered_matches_render() {
        let key = NodeKey::tuple([1, 2, 3]);
        assert_eq!(key.clone().into_rendered(), key.render());
    }
}
