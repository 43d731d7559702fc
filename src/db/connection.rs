// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Blocking SQLite work stays off the async executor

use chrono::{DateTime, SecondsFormat, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Get the default database file path
///
/// Path structure: {APP_DATA}/bookshelf/bookshelf.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let bookshelf_dir = app_data_dir.join("bookshelf");

    std::fs::create_dir_all(&bookshelf_dir)?;

    Ok(bookshelf_dir.join("bookshelf.db"))
}

/// Create a file-backed connection pool
///
/// Pool configuration:
/// - SQLite in WAL mode so readers do not block the single writer
/// - Foreign keys enabled
/// - Busy timeout so concurrent writers wait instead of failing
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    let db_path = match &config.path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            path.clone()
        }
        None => get_database_path()?,
    };

    let busy_timeout_ms = config.busy_timeout.as_millis();
    let manager = SqliteConnectionManager::file(&db_path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};
             PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
            busy_timeout_ms
        ))?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    log::info!("Opened database at {}", db_path.display());

    Ok(pool)
}

/// Create a single-connection in-memory pool (for testing)
///
/// Every pooled handle shares the same in-memory database because the
/// pool never holds more than one connection.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory().with_init(|conn| {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(())
    });

    Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Run `f` with a pooled connection on the blocking thread pool.
pub async fn with_connection<T, F>(pool: &Arc<ConnectionPool>, f: F) -> AppResult<T>
where
    F: FnOnce(&Connection) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(pool);
    tokio::task::spawn_blocking(move || {
        let conn = get_connection(&pool)?;
        f(&conn)
    })
    .await?
}

/// Create a standalone connection (for testing)
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

/// Fixed-width RFC 3339 so TEXT ordering matches time ordering
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp inside a row mapper
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Extended result code of a constraint failure, if `err` is one
pub fn constraint_violation(err: &rusqlite::Error) -> Option<i32> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Some(failure.extended_code)
        }
        _ => None,
    }
}

pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        constraint_violation(err),
        Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) | Some(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
    )
}

pub fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    constraint_violation(err) == Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}
