mod add_item_to_order_command;
mod add_item_to_order_use_case;


pub use add_item_to_order_command::AddItemToOrderCommand;
pub use add_item_to_order_use_case::AddItemToOrderUseCase;
