//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::order::{Order, OrderOwner};
use crate::domain::repository::OrderRepository;
use crate::error::OrderResult;

#[derive(Clone)]
pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for PgOrderRepository {
    async fn create(&self, order: &Order) -> OrderResult<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, name, email, coffee_id, notes, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.order_id.as_uuid())
        .bind(order.owner.user_id().map(UserId::into_uuid))
        .bind(&order.name)
        .bind(&order.email)
        .bind(order.coffee_id)
        .bind(&order.notes)
        .bind(order.quantity)
        .bind(order.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, order_id: &OrderId) -> OrderResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, user_id, name, email, coffee_id, notes, quantity, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(OrderRow::into_order))
    }
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    user_id: Option<Uuid>,
    name: String,
    email: String,
    coffee_id: i32,
    notes: String,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Order {
        let owner = match self.user_id {
            Some(user_id) => OrderOwner::Owned(UserId::from_uuid(user_id)),
            None => OrderOwner::Guest,
        };

        Order {
            order_id: OrderId::from_uuid(self.id),
            owner,
            name: self.name,
            email: self.email,
            coffee_id: self.coffee_id,
            notes: self.notes,
            quantity: self.quantity,
            created_at: self.created_at,
        }
    }
}
