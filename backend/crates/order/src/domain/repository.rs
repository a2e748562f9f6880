//! Repository Traits

use kernel::id::OrderId;

use crate::domain::entity::order::Order;
use crate::error::OrderResult;

/// Order repository trait
#[trait_variant::make(OrderRepository: Send)]
pub trait LocalOrderRepository {
    /// Persist a new order
    async fn create(&self, order: &Order) -> OrderResult<()>;

    /// Find order by ID
    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>>;
}
