//! HTTP Handlers

use std::sync::Arc;

use auth::Identity;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::application::CreateOrderUseCase;
use crate::domain::entity::menu::{Coffee, Menu};
use crate::domain::entity::order::OrderOwner;
use crate::domain::repository::OrderRepository;
use crate::error::{OrderError, OrderResult};
use crate::presentation::dto::{CreateOrderRequest, StatusResponse};

#[derive(Clone)]
pub struct OrderAppState<R>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub menu: Arc<Menu>,
}

/// POST /api/order
///
/// Attributed to the resolved user when there is one, otherwise a guest order.
pub async fn create_order<R>(
    State(state): State<OrderAppState<R>>,
    identity: Identity,
    body: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> OrderResult<Json<StatusResponse>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = body.map_err(|_| OrderError::Validation("Invalid order".to_string()))?;

    let use_case = CreateOrderUseCase::new(state.repo.clone());
    use_case
        .execute(OrderOwner::from_identity(&identity), req.into())
        .await?;

    Ok(Json(StatusResponse { status: "ok" }))
}

/// GET /api/coffees
pub async fn list_coffees<R>(State(state): State<OrderAppState<R>>) -> Json<Vec<Coffee>>
where
    R: OrderRepository + Clone + Send + Sync + 'static,
{
    Json(state.menu.coffees.clone())
}
