// crates/orders/src/application/add_item_to_order/add_item_to_order_command.rs

/// La quantité arrive telle quelle du JSON (flottant) pour que le
/// domaine puisse refuser les non-entiers.
#[derive(Debug, Clone)]
pub struct AddItemToOrderCommand {
    pub order_id: String,
    pub product_id: String,
    pub quantity: f64,
}
