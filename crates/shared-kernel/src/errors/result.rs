// crates/shared-kernel/src/errors/result.rs

use crate::errors::{AppError, DomainError};

/// RESULT DU DOMAINE (Interne)
/// Utilisé par : agrégats, use cases, repositories (ports).
pub type Result<T> = std::result::Result<T, DomainError>;

/// RESULT D'APPLICATION (Exécutable)
/// Utilisé par : workers (outbox), API, binaires.
pub type AppResult<T> = std::result::Result<T, AppError>;

/// Helper pour les erreurs internes rapides
pub fn internal_err(msg: impl Into<String>) -> DomainError {
    DomainError::Internal(msg.into())
}
