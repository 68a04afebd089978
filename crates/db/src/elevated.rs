//! Scoped acquisition of the `leader` database role.
//!
//! Leader-authorized mutations run under an elevated role distinct from
//! the default connection role, enforcing leader-only row access at the
//! storage layer in addition to the application-level identity check.
//! `SET LOCAL ROLE` is transaction-scoped: the role is released on
//! commit, rollback, and drop alike, so elevation can never leak past
//! the statement group it was acquired for.

use sqlx::{PgPool, Postgres, Transaction};
use teammate_core::error::CoreError;

use crate::error::StoreError;

/// Begin a transaction running as the `leader` role.
///
/// Failure to acquire the role is a [`CoreError::PermissionDenied`],
/// never a generic database error.
pub async fn begin_as_leader(pool: &PgPool) -> Result<Transaction<'static, Postgres>, StoreError> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET LOCAL ROLE leader")
        .execute(&mut *tx)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "failed to acquire leader role");
            CoreError::PermissionDenied(format!("failed to acquire leader role: {err}"))
        })?;
    Ok(tx)
}

/// Map a storage error raised inside the elevated window.
///
/// Anything the database refuses while running as `leader` is treated
/// as a permission failure, matching the error contract of the
/// privilege-elevation window.
pub fn elevated_error(err: sqlx::Error) -> StoreError {
    tracing::warn!(error = %err, "statement failed under leader role");
    CoreError::PermissionDenied(format!("leader-privileged statement failed: {err}")).into()
}
