// crates/shared-kernel/src/domain/entities/entity.rs

use crate::errors::{DomainError, Result};
use std::fmt::Display;

/// Métadonnées statiques d'une entité, consommées par le mapping d'erreurs SQL.
pub trait EntityMetadata {
    fn entity_name() -> &'static str;

    /// Traduit un nom de contrainte Postgres en champ métier
    fn map_constraint_to_field(constraint: &str) -> &'static str {
        let _ = constraint;
        "unique_constraint"
    }
}

pub trait EntityOptionExt<T> {
    fn ok_or_not_found(self, id: &dyn Display) -> Result<T>;
}

impl<T: EntityMetadata> EntityOptionExt<T> for Option<T> {
    fn ok_or_not_found(self, id: &dyn Display) -> Result<T> {
        self.ok_or_else(|| DomainError::NotFound {
            entity: T::entity_name(),
            id: id.to_string(),
        })
    }
}
