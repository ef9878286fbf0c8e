use crate::domain::value_objects::{Currency, Money};
use shared_kernel::errors::DomainError;

#[test]
fn test_money_accepts_zero_and_positive_amounts() {
    assert!(Money::try_new(0.0, Currency::Usd).is_ok());
    assert!(Money::try_new(19.99, Currency::Eur).is_ok());
}

#[test]
fn test_money_rejects_negative_and_non_finite() {
    for amount in [-0.01, -100.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let result = Money::try_new(amount, Currency::Usd);
        assert!(
            matches!(result, Err(DomainError::Validation { field, .. }) if field == "amount"),
            "Devrait être rejeté : {amount}"
        );
    }
}

#[test]
fn test_money_addition_same_currency() {
    let a = Money::try_new(10.50, Currency::Usd).unwrap();
    let b = Money::try_new(4.50, Currency::Usd).unwrap();

    let sum = a.add(&b).unwrap();
    assert!((sum.amount() - 15.0).abs() < 1e-9);
    assert_eq!(sum.currency(), Currency::Usd);
}

#[test]
fn test_money_addition_rejects_currency_mismatch() {
    let usd = Money::try_new(10.0, Currency::Usd).unwrap();
    let eur = Money::try_new(10.0, Currency::Eur).unwrap();

    let result = usd.add(&eur);
    assert!(matches!(
        result,
        Err(DomainError::Validation { field: "currency", .. })
    ));
}

#[test]
fn test_money_multiply_happy_path() {
    let price = Money::try_new(1299.99, Currency::Usd).unwrap();
    let total = price.multiply(2.0).unwrap();
    assert!((total.amount() - 2599.98).abs() < 1e-9);
}

#[test]
fn test_money_multiply_rejects_bad_factors() {
    let price = Money::try_new(10.0, Currency::Usd).unwrap();
    for factor in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(price.multiply(factor).is_err(), "Facteur invalide : {factor}");
    }
    // Zéro est un facteur valide
    assert!(price.multiply(0.0).unwrap().is_zero());
}

#[test]
fn test_money_display_uses_symbol_and_two_decimals() {
    let price = Money::try_new(10.5, Currency::Usd).unwrap();
    assert_eq!(price.to_string(), "$10.50");

    let euros = Money::try_new(7.0, Currency::Eur).unwrap();
    assert_eq!(euros.to_string(), "€7.00");
}

#[test]
fn test_money_json_shape() {
    let price = Money::try_new(1299.99, Currency::Usd).unwrap();
    let json = serde_json::to_value(price).unwrap();
    assert_eq!(json, serde_json::json!({ "amount": 1299.99, "currency": "USD" }));
}
