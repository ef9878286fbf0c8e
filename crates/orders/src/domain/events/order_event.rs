// crates/orders/src/domain/events/order_event.rs

use crate::domain::value_objects::{Money, OrderId, ProductId, Quantity};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Value, json};
use shared_kernel::domain::events::DomainEvent;
use std::borrow::Cow;

/// Faits métier émis par l'agrégat Commande. Le type et le nom
/// d'agrégat sont des champs explicites du variant, jamais dérivés du
/// nom Rust.
#[derive(Debug, Clone)]
pub enum OrderEvent {
    OrderCreated {
        order_id: OrderId,
        occurred_at: DateTime<Utc>,
    },
    OrderItemAdded {
        order_id: OrderId,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
        occurred_at: DateTime<Utc>,
    },
    OrderItemQuantityIncreased {
        order_id: OrderId,
        product_id: ProductId,
        previous_quantity: Quantity,
        new_quantity: Quantity,
        occurred_at: DateTime<Utc>,
    },
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> Cow<'_, str> {
        let name = match self {
            Self::OrderCreated { .. } => "OrderCreated",
            Self::OrderItemAdded { .. } => "OrderItemAdded",
            Self::OrderItemQuantityIncreased { .. } => "OrderItemQuantityIncreased",
        };
        Cow::Borrowed(name)
    }

    fn aggregate_type(&self) -> Cow<'_, str> {
        Cow::Borrowed("Order")
    }

    fn aggregate_id(&self) -> String {
        match self {
            Self::OrderCreated { order_id, .. }
            | Self::OrderItemAdded { order_id, .. }
            | Self::OrderItemQuantityIncreased { order_id, .. } => order_id.to_string(),
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::OrderCreated { occurred_at, .. }
            | Self::OrderItemAdded { occurred_at, .. }
            | Self::OrderItemQuantityIncreased { occurred_at, .. } => *occurred_at,
        }
    }

    /// Forme de fil : `{aggregateId, occurredAt, data}` en camelCase
    fn payload(&self) -> Value {
        let data = match self {
            Self::OrderCreated { order_id, .. } => json!({
                "orderId": order_id.as_str(),
            }),
            Self::OrderItemAdded {
                order_id,
                product_id,
                quantity,
                unit_price,
                ..
            } => json!({
                "orderId": order_id.as_str(),
                "productId": product_id.as_str(),
                "quantity": quantity.value(),
                "unitPrice": {
                    "amount": unit_price.amount(),
                    "currency": unit_price.currency().code(),
                },
            }),
            Self::OrderItemQuantityIncreased {
                order_id,
                product_id,
                previous_quantity,
                new_quantity,
                ..
            } => json!({
                "orderId": order_id.as_str(),
                "productId": product_id.as_str(),
                "previousQuantity": previous_quantity.value(),
                "newQuantity": new_quantity.value(),
            }),
        };

        json!({
            "aggregateId": self.aggregate_id(),
            "occurredAt": self
                .occurred_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            "data": data,
        })
    }
}
