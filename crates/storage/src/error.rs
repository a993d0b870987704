use thiserror::Error;

pub use sqlx::Error as DatabaseError;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Missing reference: {0}")]
    MissingReference(String),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23505")
        )
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Database(sqlx::Error::Database(e))
                if e.code().as_deref() == Some("23503")
        )
    }

    /// True for any duplicate-key failure, whichever store produced it.
    pub fn is_conflict(&self) -> bool {
        matches!(self, StorageError::ConstraintViolation(_)) || self.is_unique_violation()
    }

    /// Turns raw PostgreSQL key violations into the store-neutral variants.
    pub(crate) fn classify(self, duplicate: impl FnOnce() -> String) -> Self {
        if self.is_unique_violation() {
            StorageError::ConstraintViolation(duplicate())
        } else if self.is_foreign_key_violation() {
            StorageError::MissingReference(self.to_string())
        } else {
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_is_conflict() {
        let err = StorageError::ConstraintViolation("cpf".to_string());
        assert!(err.is_conflict());
        assert!(!StorageError::NotFound.is_conflict());
    }

    #[test]
    fn test_classify_leaves_other_errors_alone() {
        let err = StorageError::Database(sqlx::Error::RowNotFound).classify(|| "dup".to_string());
        assert!(matches!(err, StorageError::Database(sqlx::Error::RowNotFound)));
    }
}
