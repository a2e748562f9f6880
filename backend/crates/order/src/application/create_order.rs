//! Create Order Use Case

use std::sync::Arc;

use kernel::id::OrderId;

use crate::domain::entity::order::{Order, OrderDetails, OrderOwner};
use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;

pub struct CreateOrderUseCase<R>
where
    R: OrderRepository,
{
    order_repo: Arc<R>,
}

impl<R> CreateOrderUseCase<R>
where
    R: OrderRepository,
{
    pub fn new(order_repo: Arc<R>) -> Self {
        Self { order_repo }
    }

    /// Validate, then persist. Nothing is written for invalid input.
    pub async fn execute(&self, owner: OrderOwner, details: OrderDetails) -> OrderResult<OrderId> {
        let order = Order::new(owner, details)?;
        self.order_repo.create(&order).await?;

        match order.owner {
            OrderOwner::Owned(user_id) => tracing::info!(
                order_id = %order.order_id,
                user_id = %user_id,
                coffee_id = order.coffee_id,
                quantity = order.quantity,
                "Order placed"
            ),
            OrderOwner::Guest => tracing::info!(
                order_id = %order.order_id,
                coffee_id = order.coffee_id,
                quantity = order.quantity,
                "Guest order placed"
            ),
        }

        Ok(order.order_id)
    }
}
