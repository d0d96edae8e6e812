//! Pooled SQLite connections for request-scoped access.
//!
//! # Responsibility
//! - Migrate the database file once, then hand out configured connections.
//!
//! # Invariants
//! - A connection is held by exactly one caller until its guard is dropped.
//! - Every pooled connection runs `configure_connection` before first use.

use super::open::{configure_connection, open_db, BUSY_TIMEOUT};
use super::DbResult;
use log::info;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

/// Shared handle passed to every request handler.
pub type DbPool = r2d2::Pool<SqliteConnectionManager>;

/// Opens (and migrates) the database at `path` and builds a pool of at most
/// `max_size` connections.
///
/// # Errors
/// - Migration or bootstrap failures from [`open_db`].
/// - Pool construction failures when no connection can be established.
pub fn open_pool(path: impl AsRef<Path>, max_size: u32) -> DbResult<DbPool> {
    let path = path.as_ref();

    let conn = open_db(path)?;
    conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
    drop(conn);

    let manager = SqliteConnectionManager::file(path).with_init(|conn| configure_connection(conn));
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .connection_timeout(BUSY_TIMEOUT)
        .build(manager)?;

    info!(
        "event=db_pool module=db status=ok path={} max_size={}",
        path.display(),
        max_size
    );
    Ok(pool)
}
