//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::menu::{Coffee, Menu};
pub use entity::order::{Order, OrderDetails, OrderOwner};
pub use repository::OrderRepository;
