#![forbid(unsafe_code)]

//! Field validation for BookSmart forms.
//!
//! # Role in BookSmart
//! `booksmart-validate` is the leaf of the workspace. It owns the closed table
//! of field patterns and their messages, the two primitive checks built on
//! it, and the declarative schemas that compose those checks per form.
//! Nothing here holds mutable state; the form state machines live in
//! `booksmart-forms` and the application store in `booksmart-store`.
//!
//! # Example
//!
//! ```rust
//! use booksmart_validate::{PatternKey, describe, matches};
//!
//! assert!(matches("Juan", PatternKey::Name));
//! assert!(!matches("juan", PatternKey::Name));
//! assert_eq!(describe("5512345678", PatternKey::Phone), None);
//! assert_eq!(describe("", PatternKey::Phone), Some(PatternKey::Phone.message()));
//! ```

pub mod choices;
pub mod format;
pub mod pattern;
pub mod schema;
mod validators;

use std::fmt;

pub use choices::Choice;
pub use format::Formatter;
pub use pattern::{PatternEntry, PatternKey, PatternRegistry};
pub use schema::{
    Check, FieldErrors, FieldRule, FieldValues, MISMATCH_MESSAGE, Payload, Relation, Rule, Schema,
    SchemaName, run_schema, run_schema_named,
};
pub use validators::{
    DEFAULT_REQUIRED_MESSAGE, ERROR_CODE_CHOICE, ERROR_CODE_MAX_LENGTH, ERROR_CODE_MISMATCH,
    ERROR_CODE_PATTERN, ERROR_CODE_RANGE, ERROR_CODE_REQUIRED, MaxLength, NOT_A_NUMBER_MESSAGE,
    OneOf, Range, Required, ValidationError, ValidationResult, Validator, describe, matches,
};

/// Which closed identifier set a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// [`PatternKey`] identifiers.
    Pattern,
    /// [`SchemaName`] identifiers.
    Schema,
    /// Field names declared by a [`Schema`].
    Field,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pattern => f.write_str("pattern"),
            Self::Schema => f.write_str("schema"),
            Self::Field => f.write_str("field"),
        }
    }
}

/// An identifier outside a closed set: pattern keys, schema names, or the
/// fields a schema declares.
///
/// This is a caller bug, not bad user input. It is never folded into a
/// validity verdict.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} key `{name}`")]
pub struct UnknownKey {
    /// The identifier set that was searched.
    pub kind: KeyKind,
    /// The identifier as given.
    pub name: String,
}

impl UnknownKey {
    pub(crate) fn pattern(name: &str) -> Self {
        tracing::warn!(name, "unknown pattern key");
        Self {
            kind: KeyKind::Pattern,
            name: name.to_string(),
        }
    }

    pub(crate) fn schema(name: &str) -> Self {
        tracing::warn!(name, "unknown schema name");
        Self {
            kind: KeyKind::Schema,
            name: name.to_string(),
        }
    }

    /// A field name the schema `schema` does not declare.
    #[must_use]
    pub fn field(schema: &str, name: &str) -> Self {
        tracing::warn!(schema, name, "undeclared form field");
        Self {
            kind: KeyKind::Field,
            name: name.to_string(),
        }
    }
}
