//! Order Backend Module
//!
//! Coffee orders and the static menu. Orders are attributed to the user
//! resolved by `auth::with_identity`, or recorded as guest orders.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::{Menu, Order, OrderOwner, OrderRepository};
pub use error::{OrderError, OrderResult};
pub use infra::{PgOrderRepository, load_menu};
pub use presentation::router::{order_router, order_router_generic};

#[cfg(any(test, feature = "memory"))]
pub use infra::memory::InMemoryOrderRepository;
