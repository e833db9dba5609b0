#![forbid(unsafe_code)]

//! BookSmart public facade crate.
//!
//! Re-exports the validation engine, the form state machines and, with the
//! default `store` feature, the application store. The [`prelude`] covers
//! day-to-day use.
//!
//! ```
//! use booksmart::prelude::*;
//!
//! let mut form = FormValidation::for_schema(SchemaName::Login);
//! form.on_change("email", "admin@booksmart.com")?;
//! form.on_change("password", "password")?;
//! assert!(form.submit().is_ok());
//! assert!(matches("5512345678", PatternKey::Phone));
//! # Ok::<(), booksmart::Error>(())
//! ```

// --- Validation re-exports -------------------------------------------------

pub use booksmart_validate::{
    Check, Choice, FieldErrors, FieldRule, FieldValues, Formatter, KeyKind, Payload, PatternKey,
    Relation, Rule, Schema, SchemaName, UnknownKey, describe, matches, run_schema,
    run_schema_named,
};

// --- Form re-exports -------------------------------------------------------

pub use booksmart_forms::{
    DocumentFields, FieldEvent, FieldPhase, FieldState, FieldValidation, FieldView,
    FormValidation, FormattedField, ShelfLocationFields,
};

// --- Store re-exports ------------------------------------------------------

#[cfg(feature = "store")]
pub use booksmart_store::{
    Action, ApiResponse, AppState, AppStore, BlockingRunner, Cmd, ConfigError, Model,
    Notification, NotificationKind, RegisterData, StoreConfig, StoreSimulator, User,
};

#[cfg(feature = "logging")]
pub mod logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for BookSmart applications.
///
/// Invalid user input is never an `Error`; it is reported as
/// [`FieldErrors`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A pattern key, schema name or form field outside the closed sets.
    #[error(transparent)]
    UnknownKey(#[from] UnknownKey),
    /// Store configuration could not be loaded.
    #[cfg(feature = "store")]
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A log filter directive did not parse.
    #[cfg(feature = "logging")]
    #[error("invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    /// The global subscriber could not be installed.
    #[cfg(feature = "logging")]
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Standard result type for BookSmart APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FieldErrors, FieldEvent, FieldPhase, FieldValidation, FieldValues,
        FormValidation, Formatter, Payload, PatternKey, Result, SchemaName, describe, matches,
        run_schema,
    };

    #[cfg(feature = "store")]
    pub use crate::{Action, AppStore, Notification, RegisterData, StoreConfig, StoreSimulator};

    pub use crate::{forms, validate};

    #[cfg(feature = "store")]
    pub use crate::store;
}

pub use booksmart_forms as forms;
#[cfg(feature = "store")]
pub use booksmart_store as store;
pub use booksmart_validate as validate;
