use crate::domain::repositories::StoreError;

/// Name of the unique constraint on `urls.short_key`.
pub const SHORT_KEY_CONSTRAINT: &str = "urls_short_key_key";

/// Returns true if `e` is a unique violation on the short key constraint.
pub fn is_unique_violation_on_short_key(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_KEY_CONSTRAINT) | None)
}

/// Classifies a sqlx error for the repository layer.
pub fn map_store_error(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_short_key(&e) {
        StoreError::UniqueViolation
    } else {
        StoreError::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_unique_violations() {
        assert!(!is_unique_violation_on_short_key(&sqlx::Error::RowNotFound));
        assert!(matches!(
            map_store_error(sqlx::Error::PoolTimedOut),
            StoreError::Database(_)
        ));
    }
}
