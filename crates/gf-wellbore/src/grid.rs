//! Depth discretisation of the wellbore.

use crate::error::{WellboreError, WellboreResult};
use gf_core::numeric::ensure_positive;
use gf_core::units::{Length, m};

/// Relative tolerance for `depth_total / dz` being an integer.
const STEP_DIVISIBILITY_TOL: f64 = 1e-9;

/// Depth coordinates from bottomhole (`depth_total`) to wellhead (`0`).
///
/// Strictly decreasing, reservoir node first, last node exactly at the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthGrid {
    depths: Vec<f64>,
}

impl DepthGrid {
    /// Fixed step: `depth_total / dz + 1` nodes.
    ///
    /// `dz` must divide `depth_total`; a partial last step is rejected rather
    /// than silently stretched.
    pub fn from_step(depth_total: Length, dz: Length) -> WellboreResult<Self> {
        let depth = ensure_positive(depth_total.value, "total depth must be positive")?;
        let dz = ensure_positive(dz.value, "depth step must be positive")?;

        let ratio = depth / dz;
        let steps = ratio.round();
        if steps < 1.0 || (ratio - steps).abs() > STEP_DIVISIBILITY_TOL * ratio.max(1.0) {
            return Err(WellboreError::InvalidArg {
                what: "depth step must divide total depth",
            });
        }

        let steps = steps as usize;
        let mut depths: Vec<f64> = (0..=steps).map(|i| depth - i as f64 * dz).collect();
        depths[steps] = 0.0;
        Ok(Self { depths })
    }

    /// Fixed node count, evenly spaced (at least two nodes).
    pub fn from_count(depth_total: Length, count: usize) -> WellboreResult<Self> {
        let depth = ensure_positive(depth_total.value, "total depth must be positive")?;
        if count < 2 {
            return Err(WellboreError::InvalidArg {
                what: "depth grid needs at least two nodes",
            });
        }

        let last = (count - 1) as f64;
        let mut depths: Vec<f64> = (0..count)
            .map(|i| depth * (1.0 - i as f64 / last))
            .collect();
        depths[0] = depth;
        depths[count - 1] = 0.0;
        Ok(Self { depths })
    }

    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Depth of node `i` below the surface.
    pub fn depth(&self, i: usize) -> Length {
        m(self.depths[i])
    }

    /// Total depth (the reservoir node).
    pub fn total_depth(&self) -> Length {
        m(self.depths[0])
    }

    /// Vertical distance between node `i - 1` and node `i` (zero for node 0).
    pub fn spacing(&self, i: usize) -> Length {
        if i == 0 {
            return m(0.0);
        }
        m((self.depths[i - 1] - self.depths[i]).abs())
    }

    /// Raw depths [m].
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    pub fn iter(&self) -> impl Iterator<Item = Length> + '_ {
        self.depths.iter().map(|&d| m(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_grid_node_count_and_ends() {
        let grid = DepthGrid::from_step(m(2500.0), m(1.0)).unwrap();
        assert_eq!(grid.len(), 2501);
        assert_eq!(grid.total_depth().value, 2500.0);
        assert_eq!(grid.depth(2500).value, 0.0);
        assert!((grid.spacing(1).value - 1.0).abs() < 1e-12);
        assert_eq!(grid.spacing(0).value, 0.0);
    }

    #[test]
    fn step_must_divide_depth() {
        assert!(DepthGrid::from_step(m(2500.0), m(7.0)).is_err());
        assert!(DepthGrid::from_step(m(2500.0), m(0.0)).is_err());
        assert!(DepthGrid::from_step(m(-10.0), m(1.0)).is_err());
        assert!(DepthGrid::from_step(m(10.0), m(20.0)).is_err());
    }

    #[test]
    fn count_grid_is_linspace() {
        let grid = DepthGrid::from_count(m(2500.0), 100).unwrap();
        assert_eq!(grid.len(), 100);
        assert_eq!(grid.depth(0).value, 2500.0);
        assert_eq!(grid.depth(99).value, 0.0);
        let dz = 2500.0 / 99.0;
        for i in 1..grid.len() {
            assert!((grid.spacing(i).value - dz).abs() < 1e-9);
        }
    }

    #[test]
    fn count_grid_needs_two_nodes() {
        assert!(DepthGrid::from_count(m(100.0), 1).is_err());
        assert_eq!(DepthGrid::from_count(m(100.0), 2).unwrap().len(), 2);
    }

    #[test]
    fn depths_strictly_decrease() {
        let grid = DepthGrid::from_step(m(300.0), m(0.1)).unwrap();
        assert_eq!(grid.len(), 3001);
        assert!(grid.depths().windows(2).all(|w| w[1] < w[0]));
    }
}
