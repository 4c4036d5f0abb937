//! # Error Types
//!
//! Domain-specific error types for inventa-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inventa-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  inventa-cli errors (app)                                              │
//! │  └── CliError         - What the operator sees (+ exit code)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pricing itself never fails: degenerate inputs degrade to zero or to the
//! purchase-price floor. These errors cover user input and table editing.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors from table editing and audit export.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A conversion for the given unit does not exist in the table.
    #[error("Conversion not found for unit: {0}")]
    ConversionNotFound(String),

    /// Rendering audit entries as CSV failed.
    #[error("CSV export failed: {0}")]
    CsvExport(String),

    /// A field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl From<csv::Error> for CoreError {
    fn from(err: csv::Error) -> Self {
        CoreError::CsvExport(err.to_string())
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level input errors.
///
/// The `Display` text of each variant is the field-level message a form
/// shows next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field holds a negative number.
    #[error("{field} cannot be negative")]
    Negative { field: String },

    /// Invalid format (e.g. too many decimals, letters in a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value (e.g. two conversions for the same unit).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A range whose lower bound is after its upper bound.
    #[error("{field}: start must not be after end")]
    InvalidRange { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of fallible inventa-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_not_found_names_unit() {
        let err = CoreError::ConversionNotFound("box".to_string());
        assert_eq!(err.to_string(), "Conversion not found for unit: box");
    }

    #[test]
    fn test_field_messages_shown_in_forms() {
        let cases = [
            (
                ValidationError::Required {
                    field: "value".to_string(),
                },
                "value is required",
            ),
            (
                ValidationError::Negative {
                    field: "value".to_string(),
                },
                "value cannot be negative",
            ),
            (
                ValidationError::Duplicate {
                    field: "unit".to_string(),
                    value: "Box".to_string(),
                },
                "unit 'Box' already exists",
            ),
            (
                ValidationError::InvalidRange {
                    field: "date".to_string(),
                },
                "date: start must not be after end",
            ),
        ];

        for (err, message) in cases {
            assert_eq!(err.to_string(), message);
        }
    }

    #[test]
    fn test_csv_and_validation_wrap_into_core_error() {
        let wrapped: CoreError = ValidationError::MustBePositive {
            field: "factor".to_string(),
        }
        .into();
        assert_eq!(wrapped.to_string(), "Validation error: factor must be positive");

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let csv_err: CoreError = csv::Error::from(io).into();
        assert!(matches!(csv_err, CoreError::CsvExport(_)));
    }
}
