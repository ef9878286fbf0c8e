// crates/orders/src/domain/entities/order.rs

use crate::domain::entities::OrderItem;
use crate::domain::events::OrderEvent;
use crate::domain::value_objects::{Currency, Money, OrderId, ProductId, Quantity};
use chrono::{DateTime, Utc};
use shared_kernel::domain::entities::EntityMetadata;
use shared_kernel::domain::events::{AggregateMetadata, AggregateRoot};
use shared_kernel::errors::{DomainError, Result};
use std::collections::BTreeMap;

/// Agrégat racine Commande.
///
/// Seul mutateur du domaine : chaque mutation réussie émet un événement
/// dans le tampon, drainé par le use case vers l'outbox. Les lignes
/// gardent leur ordre d'insertion et partagent toutes la même devise.
#[derive(Debug, Clone)]
pub struct Order {
    id: OrderId,
    created_at: DateTime<Utc>,
    items: Vec<OrderItem>,
    metadata: AggregateMetadata,
}

impl Order {
    /// Création d'une commande neuve : émet `OrderCreated`
    pub fn create(id: OrderId) -> Self {
        let created_at = Utc::now();
        let mut order = Self {
            id: id.clone(),
            created_at,
            items: Vec::new(),
            metadata: AggregateMetadata::new(),
        };

        order.add_event(Box::new(OrderEvent::OrderCreated {
            order_id: id,
            occurred_at: created_at,
        }));

        order
    }

    /// Restauration depuis le stockage : n'émet RIEN
    pub fn reconstitute(id: OrderId, items: Vec<OrderItem>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            created_at,
            items,
            metadata: AggregateMetadata::new(),
        }
    }

    // --- GETTERS ---

    pub fn order_id(&self) -> &OrderId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    // --- MUTATION ---

    /// L'ordre des vérifications est contractuel :
    /// prix nul, puis cohérence de devise, puis fusion ou ajout.
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        quantity: Quantity,
        unit_price: Money,
    ) -> Result<()> {
        // 1. Prix unitaire nul interdit
        if unit_price.is_zero() {
            return Err(DomainError::Validation {
                field: "unit_price",
                reason: format!("Unit price for product '{product_id}' cannot be zero"),
            });
        }

        // 2. La devise de référence est celle de la première ligne
        if let Some(first) = self.items.first() {
            let expected = first.unit_price().currency();
            if unit_price.currency() != expected {
                return Err(DomainError::Validation {
                    field: "currency",
                    reason: format!(
                        "Order is priced in {}; cannot add an item priced in {}",
                        expected.code(),
                        unit_price.currency().code()
                    ),
                });
            }
        }

        let occurred_at = Utc::now();

        // 3. Produit déjà présent : fusion des quantités.
        //    Le prix unitaire stocké n'est jamais remplacé.
        if let Some(position) = self
            .items
            .iter()
            .position(|item| item.product_id() == &product_id)
        {
            let previous_quantity = self.items[position].quantity();
            let merged = self.items[position].increment(quantity);
            let new_quantity = merged.quantity();
            self.items[position] = merged;

            self.add_event(Box::new(OrderEvent::OrderItemQuantityIncreased {
                order_id: self.id.clone(),
                product_id,
                previous_quantity,
                new_quantity,
                occurred_at,
            }));

            return Ok(());
        }

        // 4. Nouvelle ligne
        self.items
            .push(OrderItem::new(product_id.clone(), quantity, unit_price));

        self.add_event(Box::new(OrderEvent::OrderItemAdded {
            order_id: self.id.clone(),
            product_id,
            quantity,
            unit_price,
            occurred_at,
        }));

        Ok(())
    }

    // --- CALCULS ---

    /// Totaux par devise. Une ligne dont la multiplication échoue est
    /// ignorée silencieusement.
    pub fn totals_by_currency(&self) -> BTreeMap<Currency, Money> {
        let mut totals: BTreeMap<Currency, Money> = BTreeMap::new();

        for item in &self.items {
            let Ok(subtotal) = item.subtotal() else {
                continue;
            };
            let entry = totals
                .entry(subtotal.currency())
                .or_insert_with(|| Money::zero(subtotal.currency()));
            if let Ok(sum) = entry.add(&subtotal) {
                *entry = sum;
            }
        }

        totals
    }

    /// Total unique de la commande. Échoue sans ligne ou si plusieurs
    /// devises cohabitent (commande reconstituée d'un état ancien).
    pub fn calculate_total(&self) -> Result<Money> {
        if self.items.is_empty() {
            return Err(DomainError::Validation {
                field: "items",
                reason: "Cannot total an order without items".into(),
            });
        }

        let totals = self.totals_by_currency();
        if totals.len() > 1 {
            return Err(DomainError::Validation {
                field: "currency",
                reason: format!("Order spans {} currencies", totals.len()),
            });
        }

        totals
            .into_values()
            .next()
            .ok_or_else(|| DomainError::Internal("Totals vanished for a non-empty order".into()))
    }

    // --- REQUÊTES ---

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.items
            .iter()
            .map(|item| item.quantity().value())
            .fold(0, u32::saturating_add)
    }

    pub fn has_product(&self, product_id: &ProductId) -> bool {
        self.items
            .iter()
            .any(|item| item.product_id() == product_id)
    }
}

impl EntityMetadata for Order {
    fn entity_name() -> &'static str {
        "Order"
    }

    fn map_constraint_to_field(constraint: &str) -> &'static str {
        match constraint {
            "orders_pkey" => "order_id",
            "order_items_quantity_check" => "quantity",
            _ => "unique_constraint",
        }
    }
}

impl AggregateRoot for Order {
    fn id(&self) -> String {
        self.id.to_string()
    }
    fn metadata(&self) -> &AggregateMetadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut AggregateMetadata {
        &mut self.metadata
    }
}
