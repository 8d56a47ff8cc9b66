//! Error types for rule parsing and validator configuration.
//!
//! Every variant here is a configuration or parse-time failure. Matcher
//! evaluation never produces an error: a rule that does not match is data
//! (it lands in the failed-rule collections), and malformed numeric or date
//! input inside a matcher is swallowed as a non-match.

use thiserror::Error;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Errors raised while registering fields or wiring a validation pass.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Blank field name or blank rule-string passed to `add_field`.
    #[error("bad argument: {message}")]
    BadArgument { message: String },

    /// A rule token names a rule the registry does not know.
    #[error("rule '{name}' is not a recognized validation rule")]
    UnknownRule { name: String },

    /// A parameterized rule token has no parameter section, or a `same`
    /// rule carries no target field name.
    #[error("no parameters provided for rule '{rule}'")]
    MissingParameters { rule: String },

    /// A `same` rule names a field that was never registered.
    #[error("field '{field}' must match '{target}', but no field named '{target}' is registered")]
    UnknownFieldReference { field: String, target: String },
}

impl ValidationError {
    /// Get a stable error code for categorization.
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadArgument { .. } => "RULES:BAD_ARGUMENT",
            Self::UnknownRule { .. } => "RULES:UNKNOWN_RULE",
            Self::MissingParameters { .. } => "RULES:MISSING_PARAMS",
            Self::UnknownFieldReference { .. } => "RULES:UNKNOWN_FIELD_REF",
        }
    }

    // ========================================================================
    // Convenience Constructors
    // ========================================================================

    /// Create a bad-argument error.
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument {
            message: message.into(),
        }
    }

    /// Create an unknown-rule error.
    pub fn unknown_rule(name: impl Into<String>) -> Self {
        Self::UnknownRule { name: name.into() }
    }

    /// Create a missing-parameters error.
    pub fn missing_parameters(rule: impl Into<String>) -> Self {
        Self::MissingParameters { rule: rule.into() }
    }

    /// Create an unknown-field-reference error.
    pub fn unknown_field_reference(field: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnknownFieldReference {
            field: field.into(),
            target: target.into(),
        }
    }
}

// ============================================================================
// Result Type
// ============================================================================

/// Result type for validator configuration operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let error = ValidationError::unknown_rule("bogus");
        assert!(error.to_string().contains("bogus"));

        let error = ValidationError::unknown_field_reference("confirm", "password");
        assert!(error.to_string().contains("confirm"));
        assert!(error.to_string().contains("password"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ValidationError::bad_argument("empty name").code(),
            "RULES:BAD_ARGUMENT"
        );
        assert_eq!(
            ValidationError::missing_parameters("max").code(),
            "RULES:MISSING_PARAMS"
        );
    }
}
