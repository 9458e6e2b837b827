//! Swept parameter ranges.

use crate::error::{PlantError, PlantResult};
use std::fmt;

/// Spacing of the points in a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepSpacing {
    /// Uniformly spaced points
    #[default]
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Closed range of SI values sampled at `points` positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub points: usize,
    pub spacing: SweepSpacing,
}

impl SweepRange {
    pub fn linear(start: f64, end: f64, points: usize) -> PlantResult<Self> {
        Self::new(start, end, points, SweepSpacing::Linear)
    }

    pub fn logarithmic(start: f64, end: f64, points: usize) -> PlantResult<Self> {
        Self::new(start, end, points, SweepSpacing::Logarithmic)
    }

    /// `start, start + step, …` up to and including the last value not past `end`.
    pub fn stepped(start: f64, end: f64, step: f64) -> PlantResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(PlantError::InvalidArg {
                what: "sweep step must be positive and finite",
            });
        }
        if !start.is_finite() || !end.is_finite() || end <= start {
            return Err(PlantError::InvalidArg {
                what: "stepped sweep needs finite start < end",
            });
        }
        let intervals = ((end - start) / step + 1e-9).floor() as usize;
        Self::linear(start, start + intervals as f64 * step, intervals + 1)
    }

    pub fn new(start: f64, end: f64, points: usize, spacing: SweepSpacing) -> PlantResult<Self> {
        let range = Self {
            start,
            end,
            points,
            spacing,
        };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> PlantResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(PlantError::InvalidArg {
                what: "sweep bounds must be finite",
            });
        }
        if self.points < 2 {
            return Err(PlantError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if (self.start - self.end).abs() < 1e-12 {
            return Err(PlantError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        if self.spacing == SweepSpacing::Logarithmic && (self.start <= 0.0 || self.end <= 0.0) {
            return Err(PlantError::InvalidArg {
                what: "logarithmic sweep bounds must be positive",
            });
        }
        Ok(())
    }

    /// Generate all points, endpoints exact.
    pub fn values(&self) -> Vec<f64> {
        let n = self.points.max(2);
        let last = (n - 1) as f64;
        let mut values: Vec<f64> = match self.spacing {
            SweepSpacing::Linear => {
                let delta = (self.end - self.start) / last;
                (0..n).map(|i| self.start + i as f64 * delta).collect()
            }
            SweepSpacing::Logarithmic => {
                let log_start = self.start.ln();
                let log_delta = (self.end.ln() - log_start) / last;
                (0..n).map(|i| (log_start + i as f64 * log_delta).exp()).collect()
            }
        };
        values[0] = self.start;
        values[n - 1] = self.end;
        values
    }
}

impl fmt::Display for SweepSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Logarithmic => write!(f, "logarithmic"),
        }
    }
}

impl fmt::Display for SweepRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} ({} points, {})",
            self.start, self.end, self.points, self.spacing
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_sweep_generation() {
        let sweep = SweepRange::linear(3.0e5, 12.0e5, 20).unwrap();
        let values = sweep.values();
        assert_eq!(values.len(), 20);
        assert_eq!(values[0], 3.0e5);
        assert_eq!(values[19], 12.0e5);
        assert!((values[1] - values[0] - 9.0e5 / 19.0).abs() < 1e-6);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = SweepRange::logarithmic(1e5, 1e6, 3).unwrap();
        let values = sweep.values();
        let expected_mid = (1e5_f64 * 1e6_f64).sqrt();
        assert!((values[1] - expected_mid).abs() / expected_mid < 1e-9);
        assert_eq!(values[2], 1e6);
    }

    #[test]
    fn stepped_mass_flow_sweep() {
        let sweep = SweepRange::stepped(1.0, 300.0, 10.0).unwrap();
        let values = sweep.values();
        assert_eq!(values.len(), 30);
        assert_eq!(values[0], 1.0);
        assert!((values[1] - 11.0).abs() < 1e-9);
        assert_eq!(values[29], 291.0);
    }

    #[test]
    fn invalid_sweeps_rejected() {
        assert!(SweepRange::linear(1.0, 2.0, 1).is_err());
        assert!(SweepRange::linear(1.0, 1.0, 5).is_err());
        assert!(SweepRange::logarithmic(0.0, 2.0, 5).is_err());
        assert!(SweepRange::linear(f64::NAN, 2.0, 5).is_err());
        assert!(SweepRange::stepped(1.0, 300.0, 0.0).is_err());
    }

    #[test]
    fn display_mentions_spacing() {
        let sweep = SweepRange::logarithmic(1.0, 10.0, 4).unwrap();
        assert!(sweep.to_string().contains("logarithmic"));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sweep_values_are_ordered_and_bounded(
            start in 1.0_f64..1e6,
            span in 1.0_f64..1e6,
            points in 2_usize..60,
            log in any::<bool>(),
        ) {
            let spacing = if log { SweepSpacing::Logarithmic } else { SweepSpacing::Linear };
            let end = start + span;
            let values = SweepRange::new(start, end, points, spacing).unwrap().values();
            prop_assert_eq!(values.len(), points);
            for pair in values.windows(2) {
                prop_assert!(pair[1] >= pair[0]);
            }
            for v in &values {
                prop_assert!(*v >= start * (1.0 - 1e-12) && *v <= end * (1.0 + 1e-12));
            }
        }
    }
}
