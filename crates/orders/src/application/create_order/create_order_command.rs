// crates/orders/src/application/create_order/create_order_command.rs

/// Entrée brute du endpoint : la validation appartient au use case.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderCommand {
    pub order_id: Option<String>,
}
