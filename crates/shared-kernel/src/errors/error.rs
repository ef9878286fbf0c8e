// crates/shared-kernel/src/errors/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed for field '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{entity} not found with id '{id}'")]
    NotFound { entity: &'static str, id: String },

    /// Conflit avec l'état existant (ex: identifiant déjà pris, écriture concurrente)
    #[error("Conflict: {reason}")]
    Conflict { reason: String },

    /// Erreur liée à l'infrastructure (DB, sink, réseau)
    #[error("Infrastructure failure: {0}")]
    Infrastructure(String),

    /// Erreur interne (invariant cassé, downcast raté)
    #[error("Internal domain error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
