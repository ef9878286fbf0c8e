use crate::errors::Result;

/// Contrat commun des valeurs du domaine. La validation est rejouable
/// à volonté : les reconstructions `from_raw` peuvent être re-vérifiées
/// après coup.
pub trait ValueObject: PartialEq + Clone {
    fn validate(&self) -> Result<()>;
}
