// crates/shared-kernel/src/errors/app_error.rs

use crate::errors::{DomainError, ErrorCode};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Serialize, Clone)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl From<DomainError> for AppError {
    fn from(error: DomainError) -> Self {
        match error {
            // 1. Cas : Validation (400) - le champ fautif voyage dans les détails
            DomainError::Validation { field, reason } => Self {
                code: ErrorCode::ValidationFailed,
                message: format!("Validation failed for {field}"),
                details: Some(serde_json::json!({ "field": field, "reason": reason })),
            },

            // 2. Cas : Ressource introuvable (404)
            DomainError::NotFound { entity, id } => Self {
                code: ErrorCode::NotFound,
                message: format!("{entity} with id '{id}' not found"),
                details: Some(serde_json::json!({ "resource": entity, "id": id })),
            },

            // 3. Cas : Conflit d'état (409)
            DomainError::Conflict { reason } => Self {
                code: ErrorCode::Conflict,
                message: "Request conflicts with the current state".into(),
                details: Some(serde_json::json!({ "reason": reason })),
            },

            // 4. Cas : Erreurs techniques (500)
            // La cause réelle part dans les logs, jamais chez le client
            DomainError::Infrastructure(cause) => {
                tracing::error!("Infrastructure error: {}", cause);
                Self::new(
                    ErrorCode::InfrastructureFailure,
                    "An unexpected error occurred. Please try again later.",
                )
            }
            DomainError::Internal(cause) => {
                tracing::error!("Internal error: {}", cause);
                Self::new(
                    ErrorCode::InternalError,
                    "An unexpected error occurred. Please try again later.",
                )
            }
        }
    }
}

// Pour transformer les erreurs SQL (sqlx) en AppError
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database infrastructure error: {:?}", err);

        Self::new(ErrorCode::InfrastructureFailure, "A database error occurred")
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
