//! Shared application state and request-scoped store access.
//!
//! # Invariants
//! - Each request holds at most one pooled connection, acquired inside the
//!   blocking task and returned to the pool when the task ends.
//! - SQLite work never runs on the async executor threads.

use crate::error::ApiError;
use actix_web::web;
use addressbook_core::db::DbPool;
use addressbook_core::{ContactService, ServiceResult, SqliteContactRepository};
use log::error;

/// Explicitly constructed store handle, injected into handlers as
/// `web::Data<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Runs one use case against a freshly acquired connection.
    ///
    /// A pool timeout is reported as `StoreUnavailable`.
    pub async fn with_service<F, T>(&self, use_case: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ContactService<SqliteContactRepository<'_>>) -> ServiceResult<T>
            + Send
            + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        web::block(move || -> Result<T, ApiError> {
            let conn = pool.get().map_err(|err| {
                error!("event=db_acquire module=http status=error error={err}");
                ApiError::StoreUnavailable(err.to_string())
            })?;
            let service = ContactService::new(SqliteContactRepository::new(&conn));
            Ok(use_case(&service)?)
        })
        .await?
    }
}
