#![forbid(unsafe_code)]

//! Field and form validation state for BookSmart.
//!
//! Every input moves through the same small state machine: untouched until
//! its first blur, then re-validated on each change. [`FieldValidation`]
//! checks one input against a registry pattern; [`FormValidation`] checks a
//! whole form against a schema and keeps cross-field rules in sync.
//!
//! ```rust
//! use booksmart_forms::FormValidation;
//! use booksmart_validate::SchemaName;
//!
//! let mut form = FormValidation::for_schema(SchemaName::Login);
//! form.on_change("email", "admin@booksmart.com").unwrap();
//! form.on_change("password", "password").unwrap();
//! assert!(form.submit().is_ok());
//! ```

pub mod field;
pub mod form;
pub mod group;

pub use field::{FieldEvent, FieldPhase, FieldState, FieldValidation, FormattedField};
pub use form::{FieldView, FormValidation};
pub use group::{DocumentFields, ShelfLocationFields};
