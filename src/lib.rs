//! Client records in a single-file SQLite store.
//!
//! Form input is checked by [`validation`], then persisted through
//! [`db::ClientRepo`] on top of a [`db::RecordStore`] that owns the one
//! open connection.

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod logging;
pub mod models;
pub mod seed;
pub mod selection;
pub mod validation;

pub use db::{ClientRepo, RecordStore, SqlValue, StatementOutcome};
pub use error::{StoreError, StoreResult};
pub use models::{Client, ClientFields, HairColor};
pub use selection::{ClientRef, Selection, SelectionMode};
pub use validation::{ValidationErrors, validate, validate_client};
