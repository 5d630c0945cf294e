//! Parameter validation shared by every component and simulation entry point
//!
//! Validation always runs before any simulation state is created. Every error
//! names the field it rejects so a caller can point the user at the right input.

use serde::Serialize;

/// Validation result for component configuration
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Errors that can occur while validating simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Field '{field}' must be {constraint}")]
    ConstraintViolation { field: String, constraint: String },

    #[error("Field '{field}' expects {expected}, got '{input}'")]
    NotANumber {
        field: String,
        expected: String,
        input: String,
    },

    #[error("Expected {expected} parameters for {kind}, got {actual}")]
    WrongArity {
        kind: String,
        expected: usize,
        actual: usize,
    },

    #[error("{kind} is a {family} simulation, not a {requested} one")]
    WrongFamily {
        kind: String,
        family: String,
        requested: String,
    },
}

impl ValidationError {
    /// Name of the offending field, when the error is about a single field.
    pub fn field(&self) -> Option<&str> {
        match self {
            ValidationError::InvalidValue { field, .. }
            | ValidationError::ConstraintViolation { field, .. }
            | ValidationError::NotANumber { field, .. } => Some(field),
            ValidationError::WrongArity { .. } | ValidationError::WrongFamily { .. } => None,
        }
    }
}

/// Trait for validating configurations
pub trait Validate {
    /// Check that all field values are valid and consistent with each other.
    ///
    /// # Errors
    ///
    /// Returns a `ValidationError` naming the first offending field.
    fn validate(&self) -> ValidationResult<()>;
}

/// Reject NaN and infinities.
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.to_string(),
            reason: format!("{value} is not a finite number"),
        })
    }
}

/// Helper for validating numeric ranges
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    field: &str,
    value: T,
    min: T,
    max: T,
) -> ValidationResult<()> {
    if value < min || value > max {
        Err(ValidationError::ConstraintViolation {
            field: field.to_string(),
            constraint: format!("between {min} and {max}"),
        })
    } else {
        Ok(())
    }
}

/// Helper for validating finite, non-negative values
pub fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;
    if value < 0.0 {
        Err(ValidationError::ConstraintViolation {
            field: field.to_string(),
            constraint: format!("non-negative (got {value})"),
        })
    } else {
        Ok(())
    }
}

/// Helper for validating finite, strictly positive values
pub fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    validate_finite(field, value)?;
    if value <= 0.0 {
        Err(ValidationError::ConstraintViolation {
            field: field.to_string(),
            constraint: format!("positive (got {value})"),
        })
    } else {
        Ok(())
    }
}

/// Helper for validating counts that must be at least `min`
pub fn validate_at_least(field: &str, value: usize, min: usize) -> ValidationResult<()> {
    if value < min {
        Err(ValidationError::ConstraintViolation {
            field: field.to_string(),
            constraint: format!("at least {min} (got {value})"),
        })
    } else {
        Ok(())
    }
}

/// Helper for validating that `low <= high`; the error names the upper field.
pub fn validate_ordered(
    low_field: &str,
    low: f64,
    high_field: &str,
    high: f64,
) -> ValidationResult<()> {
    if low > high {
        Err(ValidationError::ConstraintViolation {
            field: high_field.to_string(),
            constraint: format!("greater than or equal to {low_field} ({high} < {low})"),
        })
    } else {
        Ok(())
    }
}

/// Helper for validating that a uniform draw over `[low, high]` has a finite
/// scale; the error names the upper field. Both bounds must already be finite.
pub fn validate_finite_span(
    low_field: &str,
    low: f64,
    high_field: &str,
    high: f64,
) -> ValidationResult<()> {
    // Uniform sampling scales the span by 1 / (1 - EPSILON).
    if ((high - low) / (1.0 - f64::EPSILON)).is_finite() {
        Ok(())
    } else {
        Err(ValidationError::ConstraintViolation {
            field: high_field.to_string(),
            constraint: format!("close enough to {low_field} for a finite range (got {high})"),
        })
    }
}

/// Helper for validating a mean whose reciprocal is used as a rate
pub fn validate_invertible(field: &str, value: f64) -> ValidationResult<()> {
    validate_positive(field, value)?;
    if value.recip().is_finite() {
        Ok(())
    } else {
        Err(ValidationError::ConstraintViolation {
            field: field.to_string(),
            constraint: format!("large enough to invert (got {value})"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("x", 5, 1, 10).is_ok());
        let err = validate_range("x", 11, 1, 10).unwrap_err();
        assert_eq!(err.field(), Some("x"));
        assert_eq!(err.to_string(), "Field 'x' must be between 1 and 10");
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("min_service", 0.0).is_ok());
        assert!(validate_non_negative("min_service", -0.5).is_err());
        assert!(matches!(
            validate_non_negative("min_service", f64::NAN),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("mean_interarrival", 0.1).is_ok());
        assert!(validate_positive("mean_interarrival", 0.0).is_err());
        assert!(validate_positive("mean_interarrival", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_at_least() {
        assert!(validate_at_least("server_count", 1, 1).is_ok());
        let err = validate_at_least("server_count", 0, 1).unwrap_err();
        assert_eq!(err.field(), Some("server_count"));
    }

    #[test]
    fn test_validate_ordered_names_upper_field() {
        assert!(validate_ordered("min", 1.0, "max", 1.0).is_ok());
        let err = validate_ordered("min", 3.0, "max", 2.0).unwrap_err();
        assert_eq!(err.field(), Some("max"));
    }

    #[test]
    fn test_validate_finite_span() {
        assert!(validate_finite_span("min", -1e300, "max", 1e300).is_ok());
        assert!(validate_finite_span("min", 0.0, "max", 1e308).is_ok());
        assert!(validate_finite_span("min", 0.0, "max", f64::MAX).is_err());
        let err = validate_finite_span("min", -1e308, "max", 1e308).unwrap_err();
        assert_eq!(err.field(), Some("max"));
        let err = validate_finite_span("min", -f64::MAX, "max", 0.5).unwrap_err();
        assert_eq!(err.field(), Some("max"));
    }

    #[test]
    fn test_validate_invertible() {
        assert!(validate_invertible("mean", 1e-300).is_ok());
        assert!(validate_invertible("mean", 0.0).is_err());
        let err = validate_invertible("mean", 5e-324).unwrap_err();
        assert!(matches!(err, ValidationError::ConstraintViolation { .. }));
        assert_eq!(err.field(), Some("mean"));
    }
}
