#![forbid(unsafe_code)]

//! Primitive validators.
//!
//! [`matches`] and [`describe`] are the two pure entry points used by fields:
//! the first answers "is this value acceptable", the second returns the
//! registry message when it is not. The [`Validator`] trait and its built-in
//! implementations carry the extra checks used by form schemas (required
//! values, length caps, numeric ranges, fixed choices).

use std::collections::HashMap;
use std::fmt;

use crate::choices::Choice;
use crate::pattern::PatternKey;

// ---------------------------------------------------------------------------
// Error Codes
// ---------------------------------------------------------------------------

/// Error code for a missing required value.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for a registry pattern violation.
pub const ERROR_CODE_PATTERN: &str = "pattern";
/// Error code for a value outside a fixed set of choices.
pub const ERROR_CODE_CHOICE: &str = "choice";
/// Error code for maximum length validation.
pub const ERROR_CODE_MAX_LENGTH: &str = "too_long";
/// Error code for numeric range validation.
pub const ERROR_CODE_RANGE: &str = "range";
/// Error code for a cross-field disagreement.
pub const ERROR_CODE_MISMATCH: &str = "mismatch";

/// Message used by [`Required`] when none is given.
pub const DEFAULT_REQUIRED_MESSAGE: &str = "Este campo es requerido";

// ---------------------------------------------------------------------------
// Primitive operations
// ---------------------------------------------------------------------------

/// Returns `true` iff `value` is non-empty and fully matches the pattern for `key`.
///
/// The empty guard applies to every key, including ones whose expression
/// could match zero-width input.
#[must_use]
pub fn matches(value: &str, key: PatternKey) -> bool {
    !value.is_empty() && key.entry().is_match(value)
}

/// Returns `None` when [`matches`] holds, otherwise the registry message for `key`.
#[must_use]
pub fn describe(value: &str, key: PatternKey) -> Option<&'static str> {
    if matches(value, key) {
        None
    } else {
        Some(key.message())
    }
}

// ---------------------------------------------------------------------------
// ValidationError
// ---------------------------------------------------------------------------

/// A validation error with code, message, and interpolation parameters.
///
/// The `code` field is a stable identifier for programmatic handling.
/// The `message` field is a human-readable message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Stable error code.
    pub code: &'static str,
    /// Human-readable error message template.
    pub message: String,
    /// Parameters for message interpolation.
    pub params: HashMap<String, String>,
}

impl ValidationError {
    /// Create a new validation error with the given code and message.
    #[must_use]
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            params: HashMap::new(),
        }
    }

    /// Add a parameter for message interpolation.
    ///
    /// Parameters are substituted in the message using `{key}` syntax.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(key.into(), value.to_string());
        self
    }

    /// Format the message with parameter substitution.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut result = self.message.clone();
        for (key, value) in &self.params {
            result = result.replace(&format!("{{{key}}}"), value);
        }
        result
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_message())
    }
}

impl std::error::Error for ValidationError {}

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The result of a validation operation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValidationResult {
    /// The value is valid.
    #[default]
    Valid,
    /// The value is invalid with an error.
    Invalid(ValidationError),
}

impl ValidationResult {
    /// Returns `true` if the result is `Valid`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns `true` if the result is `Invalid`.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid(_))
    }

    /// Returns the error if the result is `Invalid`, otherwise `None`.
    #[must_use]
    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            Self::Valid => None,
            Self::Invalid(e) => Some(e),
        }
    }

    /// Returns the formatted error message if the result is `Invalid`.
    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.error().map(ValidationError::format_message)
    }

    /// Combine two results, returning the first error if any.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::Valid => other,
            Self::Invalid(_) => self,
        }
    }
}

impl From<Option<&'static str>> for ValidationResult {
    fn from(message: Option<&'static str>) -> Self {
        match message {
            None => Self::Valid,
            Some(message) => Self::Invalid(ValidationError::new(ERROR_CODE_PATTERN, message)),
        }
    }
}

// ---------------------------------------------------------------------------
// Validator Trait
// ---------------------------------------------------------------------------

/// A trait for validating values of type `T`.
pub trait Validator<T: ?Sized>: Send + Sync {
    /// Validate the given value.
    fn validate(&self, value: &T) -> ValidationResult;

    /// Return the default error message for this validator.
    fn error_message(&self) -> &str;
}

impl Validator<str> for PatternKey {
    fn validate(&self, value: &str) -> ValidationResult {
        describe(value, *self).into()
    }

    fn error_message(&self) -> &str {
        self.message()
    }
}

// ---------------------------------------------------------------------------
// Built-in Validators
// ---------------------------------------------------------------------------

/// Validates that a string is not empty.
///
/// Whitespace counts as content; only the empty string is missing.
#[derive(Debug, Clone, Copy)]
pub struct Required {
    /// Message reported for an empty value.
    pub message: &'static str,
}

impl Required {
    /// Create a `Required` validator with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: DEFAULT_REQUIRED_MESSAGE,
        }
    }

    /// Create a `Required` validator with a field-specific message.
    #[must_use]
    pub fn with_message(message: &'static str) -> Self {
        Self { message }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<str> for Required {
    fn validate(&self, value: &str) -> ValidationResult {
        if value.is_empty() {
            ValidationResult::Invalid(ValidationError::new(ERROR_CODE_REQUIRED, self.message))
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        self.message
    }
}

/// Validates that a string has at most `max` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxLength {
    /// Maximum number of characters allowed.
    pub max: usize,
    /// Message template; `{max}` is substituted.
    pub message: &'static str,
}

impl MaxLength {
    /// Create a new `MaxLength` validator.
    #[must_use]
    pub fn new(max: usize, message: &'static str) -> Self {
        Self { max, message }
    }
}

impl Validator<str> for MaxLength {
    fn validate(&self, value: &str) -> ValidationResult {
        let len = value.chars().count();
        if len > self.max {
            ValidationResult::Invalid(
                ValidationError::new(ERROR_CODE_MAX_LENGTH, self.message)
                    .with_param("max", self.max)
                    .with_param("actual", len),
            )
        } else {
            ValidationResult::Valid
        }
    }

    fn error_message(&self) -> &str {
        self.message
    }
}

/// Validates that a string is a decimal integer inside `min..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// Minimum value (inclusive).
    pub min: i64,
    /// Maximum value (inclusive).
    pub max: i64,
    /// Message when the value is below `min`.
    pub below: &'static str,
    /// Message when the value is above `max`.
    pub above: &'static str,
}

/// Message used by [`Range`] when the value is not an integer.
pub const NOT_A_NUMBER_MESSAGE: &str = "Debe ser un número entero";

impl Range {
    /// Create a new `Range` validator.
    #[must_use]
    pub fn new(min: i64, max: i64, below: &'static str, above: &'static str) -> Self {
        Self {
            min,
            max,
            below,
            above,
        }
    }
}

impl Validator<str> for Range {
    fn validate(&self, value: &str) -> ValidationResult {
        let Ok(number) = value.trim().parse::<i64>() else {
            return ValidationResult::Invalid(ValidationError::new(
                ERROR_CODE_RANGE,
                NOT_A_NUMBER_MESSAGE,
            ));
        };
        let message = if number < self.min {
            self.below
        } else if number > self.max {
            self.above
        } else {
            return ValidationResult::Valid;
        };
        ValidationResult::Invalid(
            ValidationError::new(ERROR_CODE_RANGE, message)
                .with_param("min", self.min)
                .with_param("max", self.max)
                .with_param("actual", number),
        )
    }

    fn error_message(&self) -> &str {
        self.below
    }
}

/// Validates exact membership in a fixed set of choices.
#[derive(Debug, Clone, Copy)]
pub struct OneOf(pub Choice);

impl Validator<str> for OneOf {
    fn validate(&self, value: &str) -> ValidationResult {
        if self.0.contains(value) {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(ValidationError::new(
                ERROR_CODE_CHOICE,
                self.0.message(),
            ))
        }
    }

    fn error_message(&self) -> &str {
        self.0.message()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
