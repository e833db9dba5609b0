#![forbid(unsafe_code)]

//! Application store for BookSmart.
//!
//! # Role in BookSmart
//! Forms certify their input with `booksmart-validate` and then hand the
//! result to this crate. The store is an explicit state container: an
//! [`AppStore`] is changed only through [`Action`]s, and simulated backend
//! latency is returned as [`Cmd::Delay`] for a driver to honour. Nothing in
//! the validation crates depends on it.
//!
//! # Drivers
//! - [`StoreSimulator`] runs on a virtual clock for deterministic tests.
//! - [`BlockingRunner`] sleeps real time on the calling thread.

pub mod config;
pub mod model;
pub mod notification;
pub mod runner;
pub mod simulator;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use model::{AuthUser, NewUser, RegisterData, User, UserId, UserPatch, seed_users};
pub use notification::{ApiResponse, Notification, NotificationKind};
pub use runner::BlockingRunner;
pub use simulator::{CmdRecord, StoreSimulator};
pub use store::{
    Action, AppState, AppStore, Cmd, DUPLICATE_EMAIL_MESSAGE, INVALID_CODE_MESSAGE, Model, Session,
};
