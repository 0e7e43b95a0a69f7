use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        LedgerError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn constraint(msg: impl Into<String>) -> Self {
        LedgerError::ConstraintViolation(msg.into())
    }
}
