mod postgres_order_item_row;
mod postgres_order_row;

pub use postgres_order_item_row::PostgresOrderItemRow;
pub use postgres_order_row::PostgresOrderRow;
