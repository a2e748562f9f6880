//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::OrderAppState;
pub use router::{order_router, order_router_generic};
