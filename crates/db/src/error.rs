use teammate_core::error::CoreError;

/// Error type for engine-level store operations.
///
/// Wraps the domain taxonomy for rule violations (not found, permission,
/// conflict) and raw sqlx errors for everything else. The API layer
/// flattens both into HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// True when `err` is a unique-constraint violation on the named
/// constraint (PostgreSQL error code 23505).
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
