// backend/services/orders/api/src/view.rs

use chrono::SecondsFormat;
use orders::domain::entities::Order;
use orders::domain::value_objects::{Currency, Money};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MoneyView {
    pub amount: f64,
    pub currency: &'static str,
}

impl From<Money> for MoneyView {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount(),
            currency: money.currency().code(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: MoneyView,
    pub subtotal: MoneyView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub order_id: String,
    pub items: Vec<OrderItemView>,
    pub total: MoneyView,
    pub created_at: String,
}

impl OrderView {
    pub fn from_order(order: &Order) -> Self {
        let items = order
            .items()
            .iter()
            .map(|item| OrderItemView {
                product_id: item.product_id().as_str().to_string(),
                quantity: item.quantity().value(),
                unit_price: item.unit_price().into(),
                subtotal: item
                    .subtotal()
                    .unwrap_or_else(|_| Money::zero(item.unit_price().currency()))
                    .into(),
            })
            .collect();

        // Total incalculable (commande vide, devises mixtes) : 0 USD
        let total = order
            .calculate_total()
            .unwrap_or_else(|_| Money::zero(Currency::Usd));

        Self {
            order_id: order.order_id().as_str().to_string(),
            items,
            total: total.into(),
            created_at: order
                .created_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
