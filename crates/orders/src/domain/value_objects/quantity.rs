// crates/orders/src/domain/value_objects/quantity.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

/// Entier strictement positif. Le constructeur accepte le nombre brut
/// du JSON (flottant) pour pouvoir refuser 2.5, NaN ou l'infini.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub fn try_new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Self::invalid("Quantity must be a finite number"));
        }
        if value.fract() != 0.0 {
            return Err(Self::invalid("Quantity must be an integer"));
        }
        if value <= 0.0 {
            return Err(Self::invalid("Quantity must be strictly positive"));
        }
        if value > f64::from(u32::MAX) {
            return Err(Self::invalid("Quantity is out of range"));
        }

        Ok(Self(value as u32))
    }

    /// Reconstruction depuis la DB
    pub fn from_raw(value: u32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Addition saturante : une quantité ne déborde jamais
    pub fn add(&self, other: Quantity) -> Quantity {
        Self(self.0.saturating_add(other.0))
    }

    fn invalid(reason: &str) -> DomainError {
        DomainError::Validation {
            field: "quantity",
            reason: reason.into(),
        }
    }
}

impl ValueObject for Quantity {
    fn validate(&self) -> Result<()> {
        if self.0 == 0 {
            return Err(Self::invalid("Quantity must be strictly positive"));
        }
        Ok(())
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
