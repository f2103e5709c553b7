use crate::types::DbId;

/// Domain error taxonomy shared by every layer.
///
/// `NotFound` carries the entity name and id so the API layer can render a
/// consistent message without re-deriving context. Ownership mismatches on
/// protected resources are deliberately reported as `NotFound` as well, so
/// callers cannot distinguish "does not exist" from "not yours".
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the most common variant.
    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }
}
