//! Infrastructure Layer

pub mod menu_file;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod postgres;

pub use menu_file::load_menu;
#[cfg(any(test, feature = "memory"))]
pub use memory::InMemoryOrderRepository;
pub use postgres::PgOrderRepository;
