use std::path::PathBuf;

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Failures reported by the record store and the client repository.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no client store is open")]
    NotConnected,

    #[error("cannot open client store at {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: sqlx::Error,
    },

    #[error("constraint violated: {0}")]
    IntegrityViolation(String),

    #[error("no client with id {0}")]
    NotFound(i64),

    #[error("client has no id; it was never saved")]
    Unsaved,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Primary SQLite result code shared by every constraint failure.
const SQLITE_CONSTRAINT: i32 = 19;

impl StoreError {
    /// Sorts a raw sqlx error into the store taxonomy. Constraint failures
    /// become `IntegrityViolation` with the engine's message kept verbatim.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            match db.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => {
                    return Self::IntegrityViolation(db.message().to_string());
                }
                _ => {}
            }
            let primary_code = db
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);
            if primary_code == Some(SQLITE_CONSTRAINT) {
                return Self::IntegrityViolation(db.message().to_string());
            }
        }
        Self::Database(err)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Self::IntegrityViolation(_))
    }
}
