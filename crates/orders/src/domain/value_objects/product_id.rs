// crates/orders/src/domain/value_objects/product_id.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::ValueObject;
use shared_kernel::errors::{DomainError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId {
    inner: String,
}

impl ProductId {
    pub fn try_new(value: impl Into<String>) -> Result<Self> {
        let id = Self {
            inner: value.into().trim().to_string(),
        };
        id.validate()?;
        Ok(id)
    }

    pub fn from_raw(value: impl Into<String>) -> Self {
        Self {
            inner: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl ValueObject for ProductId {
    fn validate(&self) -> Result<()> {
        if self.inner.is_empty() {
            return Err(DomainError::Validation {
                field: "product_id",
                reason: "Product id cannot be empty".into(),
            });
        }
        Ok(())
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;
    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.inner
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.inner)
    }
}
