// crates/shared-kernel/src/infrastructure/postgres/mappers/postgres_error_mapper.rs

use crate::domain::entities::EntityMetadata;
use crate::errors::DomainError;
use sqlx::postgres::PgDatabaseError;

pub trait SqlxErrorExt<T> {
    /// Traduction contextuelle : l'entité fournit le mapping
    /// contrainte -> champ métier.
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError>;

    /// Traduction brute en erreur d'infrastructure
    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError>;
}

impl<T> SqlxErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError> {
        self.map_err(|e| {
            match e {
                sqlx::Error::RowNotFound => DomainError::NotFound {
                    entity: E::entity_name(),
                    id: "unknown".into(),
                },
                sqlx::Error::Database(db_err) => {
                    // 1. Violation d'unicité (code Postgres 23505)
                    if db_err.code().map(|c| c == "23505").unwrap_or(false) {
                        let mut field = "unique_constraint";

                        if let Some(constraint) = db_err
                            .try_downcast_ref::<PgDatabaseError>()
                            .and_then(|pg| pg.constraint())
                        {
                            field = E::map_constraint_to_field(constraint);
                        }

                        return DomainError::Conflict {
                            reason: format!("duplicate_{field}"),
                        };
                    }

                    // 2. Échec de sérialisation (code Postgres 40001)
                    if db_err.code().map(|c| c == "40001").unwrap_or(false) {
                        return DomainError::Conflict {
                            reason: format!("concurrent_update_{}", E::entity_name()),
                        };
                    }

                    DomainError::Infrastructure(db_err.message().into())
                }
                _ => DomainError::Infrastructure(e.to_string()),
            }
        })
    }

    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::Infrastructure(format!("{context}: {e}")))
    }
}
