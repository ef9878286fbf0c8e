// crates/orders/src/domain/value_objects/order_id.rs

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

const BASE36_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderId {
    inner: String,
}

impl OrderId {
    /// Constructeur validant (API / Domaine) : trim puis refus du vide
    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let id = Self {
            inner: value.into().trim().to_string(),
        };
        id.validate()?;
        Ok(id)
    }

    /// Reconstruction depuis la DB, sans re-validation
    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    /// Génère `ORD-<timestamp base36>-<7 caractères base36>`.
    /// Deux générations dans la même milliseconde sont départagées par
    /// le suffixe aléatoire.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let suffix: String = (0..7)
            .map(|_| BASE36_ALPHABET[rng.random_range(0..BASE36_ALPHABET.len())] as char)
            .collect();

        Self {
            inner: format!(
                "ORD-{}-{}",
                to_base36(Utc::now().timestamp_millis()),
                suffix
            ),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

fn to_base36(value: i64) -> String {
    let mut remaining = value.max(0) as u64;
    if remaining == 0 {
        return "0".into();
    }

    let mut digits = Vec::new();
    while remaining > 0 {
        digits.push(BASE36_ALPHABET[(remaining % 36) as usize]);
        remaining /= 36;
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}

impl ValueObject for OrderId {
    fn validate(&self) -> Result<()> {
        if self.inner.is_empty() {
            return Err(DomainError::Validation {
                field: "order_id",
                reason: "Order id cannot be empty".into(),
            });
        }
        Ok(())
    }
}

// --- CONVERSIONS ---

impl TryFrom<String> for OrderId {
    type Error = DomainError;
    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<OrderId> for String {
    fn from(id: OrderId) -> Self {
        id.inner
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}
