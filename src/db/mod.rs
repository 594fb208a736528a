pub mod clients;
pub mod schema;

use std::mem;
use std::path::{Path, PathBuf};

use sqlx::query::Query;
use sqlx::sqlite::{
    SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqliteRow,
};
use sqlx::{ConnectOptions, Connection, Sqlite};
use tokio::runtime::{Builder, Runtime};

use crate::error::{StoreError, StoreResult};

pub use clients::ClientRepo;

pub type Row = SqliteRow;

/// A statement parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Real(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Integer(i64::from(value))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

/// What a mutating statement did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementOutcome {
    pub rows_affected: u64,
    pub last_insert_id: i64,
}

struct Session {
    runtime: Runtime,
    conn: SqliteConnection,
    path: PathBuf,
}

enum State {
    Disconnected,
    Connected(Session),
}

/// Owner of the single connection to a file-backed client store.
///
/// Starts disconnected. Every statement runs to completion on the caller's
/// thread; the async driver is hidden behind a per-connection
/// current-thread runtime, so this type must not be used from inside
/// another tokio runtime.
pub struct RecordStore {
    state: State,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    pub fn new() -> Self {
        Self {
            state: State::Disconnected,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, State::Connected(_))
    }

    /// Path of the open store file, if any.
    pub fn path(&self) -> Option<&Path> {
        match &self.state {
            State::Connected(session) => Some(&session.path),
            State::Disconnected => None,
        }
    }

    /// Opens (creating if needed) the store at `path` and makes sure the
    /// `Clients` table exists. Any previously open connection is closed
    /// first; on failure the store is left disconnected.
    ///
    /// If closing the previous connection fails, that error is returned
    /// and `path` is not opened.
    pub fn open(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref().to_path_buf();

        self.close()?;

        let connection_error = |source: sqlx::Error| StoreError::Connection {
            path: path.clone(),
            source,
        };

        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| connection_error(sqlx::Error::Io(e)))?;

        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Delete);

        let conn = runtime.block_on(async {
            let mut conn = options.connect().await?;
            sqlx::query(schema::CREATE_CLIENTS_TABLE)
                .execute(&mut conn)
                .await?;
            Ok::<_, sqlx::Error>(conn)
        });

        let conn = conn.map_err(connection_error)?;

        tracing::info!(path = %path.display(), "opened client store");
        self.state = State::Connected(Session {
            runtime,
            conn,
            path,
        });
        Ok(())
    }

    /// Releases the connection. A no-op when nothing is open. The store is
    /// disconnected afterwards even if the driver reports a failure, which
    /// is returned once.
    pub fn close(&mut self) -> StoreResult<()> {
        let Session {
            runtime,
            conn,
            path,
        } = match mem::replace(&mut self.state, State::Disconnected) {
            State::Connected(session) => session,
            State::Disconnected => return Ok(()),
        };

        match runtime.block_on(conn.close()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), "closed client store");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to close client store cleanly");
                Err(StoreError::Database(e))
            }
        }
    }

    /// Runs a mutating statement. Each statement commits on its own.
    pub fn execute(&mut self, sql: &str, params: &[SqlValue]) -> StoreResult<StatementOutcome> {
        let Session { runtime, conn, .. } = self.session()?;
        tracing::debug!(sql, params = params.len(), "execute");

        let result = runtime
            .block_on(bind_all(sql, params).execute(&mut *conn))
            .map_err(StoreError::from_sqlx)?;

        Ok(StatementOutcome {
            rows_affected: result.rows_affected(),
            last_insert_id: result.last_insert_rowid(),
        })
    }

    /// Runs a read-only statement and collects every row.
    pub fn query(&mut self, sql: &str, params: &[SqlValue]) -> StoreResult<Vec<Row>> {
        let Session { runtime, conn, .. } = self.session()?;
        tracing::debug!(sql, params = params.len(), "query");

        runtime
            .block_on(bind_all(sql, params).fetch_all(&mut *conn))
            .map_err(StoreError::from_sqlx)
    }

    fn session(&mut self) -> StoreResult<&mut Session> {
        match &mut self.state {
            State::Connected(session) => Ok(session),
            State::Disconnected => Err(StoreError::NotConnected),
        }
    }
}

impl Drop for RecordStore {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

fn bind_all<'q>(sql: &'q str, params: &[SqlValue]) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    params
        .iter()
        .fold(sqlx::query(sql), |query, param| match param {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
        })
}
