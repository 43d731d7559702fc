// src/db/migrations.rs
//
// Schema versioning
//
// RULES:
// - Migrations are an ordered list; each runs once inside its own transaction
// - A database newer than the binary is refused, never downgraded
// - `initialize_database` is idempotent

use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// (version, SQL) in ascending order
const MIGRATIONS: &[(i32, &str)] = &[(1, include_str!("../../schema.sql"))];

fn latest_version() -> i32 {
    MIGRATIONS.last().map(|(version, _)| *version).unwrap_or(0)
}

/// Bring the schema up to the latest version
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();

    if current > latest {
        return Err(AppError::Other(format!(
            "Database schema version {} is newer than supported version {}",
            current, latest
        )));
    }

    for (version, sql) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        apply_migration(conn, *version, sql)?;
        log::info!("Applied database schema version {}", version);
    }

    Ok(())
}

/// 0 on a fresh database
fn schema_version(conn: &Connection) -> AppResult<i32> {
    let has_table = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
            [],
            |_| Ok(()),
        )
        .optional()?
        .is_some();
    if !has_table {
        return Ok(0);
    }

    let version: Option<i32> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(version.unwrap_or(0))
}

fn apply_migration(conn: &Connection, version: i32, sql: &str) -> AppResult<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql).map_err(|e| {
        AppError::Other(format!("Failed to apply schema version {}: {}", version, e))
    })?;
    record_version(&tx, version)?;
    tx.commit()?;
    Ok(())
}

fn record_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Fails unless SQLite's integrity check reports "ok"
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let report: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
    if report != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            report
        )));
    }
    Ok(())
}

/// Size and row counts reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStats {
    pub size_bytes: i64,
    pub schema_version: i32,
    pub book_count: i64,
    pub imported_book_count: i64,
    pub review_count: i64,
    pub user_count: i64,
}

pub fn get_database_stats(conn: &Connection) -> AppResult<DatabaseStats> {
    let scalar = |sql: &str| -> AppResult<i64> { Ok(conn.query_row(sql, [], |row| row.get(0))?) };

    Ok(DatabaseStats {
        size_bytes: scalar("PRAGMA page_count")? * scalar("PRAGMA page_size")?,
        schema_version: schema_version(conn)?,
        book_count: scalar("SELECT COUNT(*) FROM books")?,
        imported_book_count: scalar("SELECT COUNT(*) FROM books WHERE external_id IS NOT NULL")?,
        review_count: scalar("SELECT COUNT(*) FROM reviews")?,
        user_count: scalar("SELECT COUNT(*) FROM users")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    fn table_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_fresh_database_gets_latest_schema() {
        let conn = create_test_connection().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);

        initialize_database(&conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), latest_version());
        let tables = table_names(&conn);
        for table in ["books", "reviews", "schema_version", "sessions", "users"] {
            assert!(tables.iter().any(|t| t == table), "missing table {}", table);
        }
    }

    #[test]
    fn test_initialize_twice_is_harmless() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();
        record_version(&conn, latest_version() + 1).unwrap();

        assert!(initialize_database(&conn).is_err());
    }

    #[test]
    fn test_review_requires_existing_book() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let result = conn.execute(
            "INSERT INTO reviews (id, book_id, user_id, rating, comment, created_at)
             VALUES ('r1', 'missing-book', 'missing-user', 4, 'a fine comment', datetime('now'))",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_external_id_index_is_unique() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        let unique: i64 = conn
            .query_row(
                "SELECT \"unique\" FROM pragma_index_list('books') WHERE name = 'idx_books_external_id'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(unique, 1);
    }

    #[test]
    fn test_stats_and_integrity_on_empty_database() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
        let stats = get_database_stats(&conn).unwrap();
        assert!(stats.size_bytes > 0);
        assert_eq!(stats.schema_version, 1);
        assert_eq!(stats.book_count, 0);
        assert_eq!(stats.review_count, 0);
    }
}
