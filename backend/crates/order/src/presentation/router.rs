//! Order Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::entity::menu::Menu;
use crate::domain::repository::OrderRepository;
use crate::infra::postgres::PgOrderRepository;
use crate::presentation::handlers::{self, OrderAppState};

/// Create the Order router with PostgreSQL repository
pub fn order_router(repo: Arc<PgOrderRepository>, menu: Arc<Menu>) -> Router {
    order_router_generic(repo, menu)
}

/// Create a generic Order router for any repository implementation
pub fn order_router_generic<R>(repo: Arc<R>, menu: Arc<Menu>) -> Router
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let state = OrderAppState { repo, menu };

    Router::new()
        .route("/order", post(handlers::create_order::<R>))
        .route("/coffees", get(handlers::list_coffees::<R>))
        .with_state(state)
}
