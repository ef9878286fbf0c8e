mod create_order_command;
mod create_order_use_case;

#[cfg(test)]
mod create_order_use_case_test;

pub use create_order_command::CreateOrderCommand;
pub use create_order_use_case::CreateOrderUseCase;
