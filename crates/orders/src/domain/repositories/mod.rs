mod order_repository;
mod order_repository_stub;

pub use order_repository::OrderRepository;
pub use order_repository_stub::OrderRepositoryStub;
