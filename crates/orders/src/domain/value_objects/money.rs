// crates/orders/src/domain/value_objects/money.rs

use crate::domain::value_objects::Currency;
use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

/// Montant fini et non négatif, lié à une devise. Le zéro est accepté
/// ici : c'est l'agrégat qui refuse les prix unitaires nuls.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Money {
    amount: f64,
    currency: Currency,
}

impl Money {
    pub fn try_new(amount: f64, currency: Currency) -> Result<Self> {
        let money = Self { amount, currency };
        money.validate()?;
        Ok(money)
    }

    pub fn zero(currency: Currency) -> Self {
        Self {
            amount: 0.0,
            currency,
        }
    }

    /// Reconstruction depuis la DB, sans re-validation
    pub fn from_raw(amount: f64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0.0
    }

    /// Addition stricte : refuse les devises différentes
    pub fn add(&self, other: &Money) -> Result<Money> {
        if self.currency != other.currency {
            return Err(DomainError::Validation {
                field: "currency",
                reason: format!(
                    "Cannot add {} to {}",
                    other.currency.code(),
                    self.currency.code()
                ),
            });
        }

        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        })
    }

    pub fn multiply(&self, factor: f64) -> Result<Money> {
        if !factor.is_finite() {
            return Err(DomainError::Validation {
                field: "factor",
                reason: "Multiplication factor must be finite".into(),
            });
        }
        if factor < 0.0 {
            return Err(DomainError::Validation {
                field: "factor",
                reason: "Multiplication factor cannot be negative".into(),
            });
        }

        Ok(Self {
            amount: self.amount * factor,
            currency: self.currency,
        })
    }
}

impl ValueObject for Money {
    fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() {
            return Err(DomainError::Validation {
                field: "amount",
                reason: "Amount must be a finite number".into(),
            });
        }
        if self.amount < 0.0 {
            return Err(DomainError::Validation {
                field: "amount",
                reason: "Amount cannot be negative".into(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:.2}", self.currency.symbol(), self.amount)
    }
}
