//! Cluster coloring.

use std::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::NodeKey;
use super::cluster::Cluster;

/// Node → `rgb(r,g,b)` string.
pub type ColorMap = HashMap<NodeKey, String>;

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Subtract `amount` from every channel, clamping at 0.
    pub fn darken(self, amount: u32) -> Self {
        let ch = |c: u8| u32::from(c).saturating_sub(amount).min(255) as u8;
        Self { r: ch(self.r), g: ch(self.g), b: ch(self.b) }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// Base colors, cycled by cluster index.
pub const BASE_COLORS: [Rgb; 6] = [
    Rgb::new(0, 128, 0),     // green
    Rgb::new(255, 69, 0),    // orange-red
    Rgb::new(30, 144, 255),  // dodger blue
    Rgb::new(128, 0, 128),   // purple
    Rgb::new(220, 20, 60),   // crimson
    Rgb::new(255, 215, 0),   // gold
];

/// Color of the member at `position` within the cluster at `cluster_index`.
pub fn shade(cluster_index: usize, position: usize, step: u8) -> Rgb {
    let base = BASE_COLORS[cluster_index % BASE_COLORS.len()];
    let amount = u32::try_from(position)
        .unwrap_or(u32::MAX)
        .saturating_mul(u32::from(step));
    base.darken(amount)
}

/// Give each cluster a base color and darken it by `step` per member.
pub fn assign_colors(clusters: &[Cluster], step: u8) -> ColorMap {
    let mut colors = ColorMap::new();
    for (i, cluster) in clusters.iter().enumerate() {
        for (pos, node) in cluster.members().iter().enumerate() {
            colors.insert(node.clone(), shade(i, pos, step).to_string());
        }
    }
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Rgb::new(0, 128, 0).to_string(), "rgb(0,128,0)");
    }

    #[test]
    fn test_shade_darkens_and_clamps() {
        assert_eq!(shade(0, 0, 30), Rgb::new(0, 128, 0));
        assert_eq!(shade(0, 1, 30), Rgb::new(0, 98, 0));
        assert_eq!(shade(1, 2, 30), Rgb::new(195, 9, 0));
        assert_eq!(shade(5, 9, 30), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_base_colors_cycle() {
        assert_eq!(shade(6, 0, 30), BASE_COLORS[0]);
        assert_eq!(shade(13, 0, 30), BASE_COLORS[1]);
    }

    #[test]
    fn test_huge_position_saturates() {
        assert_eq!(shade(2, usize::MAX, 30), Rgb::new(0, 0, 0));
    }
}
