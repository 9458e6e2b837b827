use crate::GfError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GfError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, GfError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(GfError::InvalidArg { what })
    }
}

/// Finite and inside `[min, max]`.
pub fn ensure_in_range(v: Real, min: Real, max: Real, what: &'static str) -> Result<Real, GfError> {
    let v = ensure_finite(v, what)?;
    if (min..=max).contains(&v) {
        Ok(v)
    } else {
        Err(GfError::OutOfRange {
            what,
            value: v,
            min,
            max,
        })
    }
}

/// Clip to the unit interval. NaN maps to 0.
pub fn clip_unit(v: Real) -> Real {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(1.2, "c0").is_ok());
        assert!(matches!(
            ensure_positive(0.0, "c0"),
            Err(GfError::InvalidArg { what: "c0" })
        ));
        assert!(ensure_positive(Real::INFINITY, "c0").is_err());
    }

    #[test]
    fn ensure_in_range_bounds() {
        assert!(ensure_in_range(0.03, 0.0, 1.0, "ejector").is_ok());
        assert!(ensure_in_range(1.0, 0.0, 1.0, "ejector").is_ok());
        assert!(matches!(
            ensure_in_range(1.5, 0.0, 1.0, "ejector"),
            Err(GfError::OutOfRange { .. })
        ));
    }

    #[test]
    fn clip_unit_handles_extremes() {
        assert_eq!(clip_unit(-0.2), 0.0);
        assert_eq!(clip_unit(0.4), 0.4);
        assert_eq!(clip_unit(3.0), 1.0);
        assert_eq!(clip_unit(Real::NAN), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn clip_unit_stays_in_interval(v in -1e6_f64..1e6_f64) {
            let c = clip_unit(v);
            prop_assert!((0.0..=1.0).contains(&c));
        }
    }
}
