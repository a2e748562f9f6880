//! In-Memory Repository

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::OrderId;
use tokio::sync::RwLock;

use crate::domain::entity::order::Order;
use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;

#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored orders, oldest first
    pub async fn all(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = self.orders.read().await.values().cloned().collect();
        orders.sort_by_key(|o| o.created_at);
        orders
    }
}

impl OrderRepository for InMemoryOrderRepository {
    async fn create(&self, order: &Order) -> OrderResult<()> {
        self.orders
            .write()
            .await
            .insert(order.order_id, order.clone());
        Ok(())
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>> {
        Ok(self.orders.read().await.get(order_id).cloned())
    }
}
