//! # Error Types
//!
//! Domain-specific error types for tab-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tab-core errors (this file)                                           │
//! │  ├── CoreError        - Bill/claim domain errors                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  API errors (apps/api)                                                 │
//! │  └── ApiError         - What the client sees (serialized)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Client                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (index, id, limits)
//! 3. Errors are enum variants, never String
//!
//! Note what is deliberately NOT an error: computing a summary over an
//! empty bill (all-zero summary), removing a person who does not exist
//! (no-op), and unparseable tax/tip input (coerced to zero by the parse
//! helpers). A calculator forgives sloppy input; it only refuses
//! operations that would corrupt the split.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These represent operations that would corrupt the bill state if they
/// were allowed to proceed. State is never mutated when one is returned.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A claim referenced an item index outside the item sequence.
    ///
    /// ## When This Occurs
    /// - Client toggles a claim against a stale item list
    /// - Client sends a hand-crafted out-of-range index
    ///
    /// The claim is rejected outright; clamping or ignoring it would
    /// silently misattribute money.
    #[error("Item index {index} is out of range (bill has {len} items)")]
    InvalidItemIndex { index: usize, len: usize },

    /// A claim or rename referenced a person id not on this bill.
    #[error("Person not found: {0}")]
    PersonNotFound(u32),

    /// Item list exceeds the maximum supported size.
    #[error("Bill cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Roster exceeds the maximum supported size.
    #[error("Bill cannot have more than {max} people")]
    TooManyPeople { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements. Used for early
/// validation before state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidItemIndex { index: 5, len: 2 };
        assert_eq!(
            err.to_string(),
            "Item index 5 is out of range (bill has 2 items)"
        );

        let err = CoreError::PersonNotFound(7);
        assert_eq!(err.to_string(), "Person not found: 7");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
