//! # Validation Module
//!
//! Input validation utilities for TabSplit.
//!
//! Validation here is the second line of defense: the frontend gives
//! immediate feedback, then these checks run before any state mutation.
//! Claim-index validation lives with the bill itself (`Bill::toggle_claim`)
//! because it depends on the current item sequence.

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a person's display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 100 characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use tab_core::validation::validate_person_name;
///
/// assert!(validate_person_name("Alice").is_ok());
/// assert!(validate_person_name("   ").is_err());
/// ```
pub fn validate_person_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 100,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
