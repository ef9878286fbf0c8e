// crates/orders/src/domain/value_objects/currency.rs

use serde::{Deserialize, Serialize};
use shared_kernel::errors::{DomainError, Result};

/// Ensemble fermé de devises supportées. Chaque code porte son symbole
/// d'affichage et son nom, tirés d'une table statique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Jpy,
    Mxn,
    Ars,
    Clp,
}

impl Currency {
    /// Normalise en majuscules. Pas de trim : un code entouré
    /// d'espaces ne matche rien et est rejeté.
    pub fn try_new(value: &str) -> Result<Self> {
        match value.to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "EUR" => Ok(Self::Eur),
            "GBP" => Ok(Self::Gbp),
            "JPY" => Ok(Self::Jpy),
            "MXN" => Ok(Self::Mxn),
            "ARS" => Ok(Self::Ars),
            "CLP" => Ok(Self::Clp),
            other => Err(DomainError::Validation {
                field: "currency",
                reason: format!("Unsupported currency code '{other}'"),
            }),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Jpy => "JPY",
            Self::Mxn => "MXN",
            Self::Ars => "ARS",
            Self::Clp => "CLP",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
            Self::Mxn => "MX$",
            Self::Ars => "AR$",
            Self::Clp => "CLP$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Usd => "US Dollar",
            Self::Eur => "Euro",
            Self::Gbp => "British Pound",
            Self::Jpy => "Japanese Yen",
            Self::Mxn => "Mexican Peso",
            Self::Ars => "Argentine Peso",
            Self::Clp => "Chilean Peso",
        }
    }
}

impl TryFrom<String> for Currency {
    type Error = DomainError;
    fn try_from(value: String) -> Result<Self> {
        Self::try_new(&value)
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
