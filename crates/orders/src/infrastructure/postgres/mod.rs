pub mod repositories;
pub mod rows;

pub use repositories::PostgresOrderRepository;
