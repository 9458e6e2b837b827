//! Case validation.

use crate::compile::compile_case;
use crate::schema::Case;
use crate::units::UnitError;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Bad quantity in {field}: {source}")]
    Unit {
        field: String,
        #[source]
        source: UnitError,
    },

    #[error("Rejected by {field}: {reason}")]
    Model { field: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

/// Check that `case` is loadable and compiles into runnable models.
pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", case.name),
            reason: "case name must not be empty".to_string(),
        });
    }

    compile_case(case).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;
    use crate::units::QuantityDef;

    #[test]
    fn reference_case_is_valid() {
        validate_case(&reference_case()).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let mut case = reference_case();
        case.version = 99;
        assert_eq!(
            validate_case(&case),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        );
    }

    #[test]
    fn empty_name_rejected() {
        let mut case = reference_case();
        case.name = "  ".to_string();
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn bad_unit_names_the_field() {
        let mut case = reference_case();
        case.reservoir.pressure = QuantityDef::text("45 parsecs");
        match validate_case(&case) {
            Err(ValidationError::Unit { field, .. }) => assert_eq!(field, "reservoir.pressure"),
            other => panic!("expected unit error, got {other:?}"),
        }
    }

    #[test]
    fn negative_slip_rejected() {
        let mut case = reference_case();
        case.march.slip = Some(-1.0);
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::Model { .. })
        ));
    }

    #[test]
    fn single_node_grid_rejected() {
        let mut case = reference_case();
        case.grid = GridDef::Count { nodes: 1 };
        assert!(validate_case(&case).is_err());
    }

    #[test]
    fn non_dividing_step_rejected() {
        let mut case = reference_case();
        case.grid = GridDef::Step {
            step: QuantityDef::text("7 m"),
        };
        assert!(validate_case(&case).is_err());
    }
}
