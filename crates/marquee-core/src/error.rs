use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input rejected before any write was attempted.
    #[error("invalid {entity}: {message}")]
    Validation {
        entity: &'static str,
        message: String,
    },

    /// A write was attempted and rolled back.
    #[error("{entity} could not be saved: {message}")]
    ConstraintViolation {
        entity: &'static str,
        message: String,
    },

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    pub(crate) fn validation(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            entity,
            message: message.into(),
        }
    }

    pub(crate) fn constraint(entity: &'static str, message: impl Into<String>) -> Self {
        Self::ConstraintViolation {
            entity,
            message: message.into(),
        }
    }

    /// A lookup by id found nothing.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
