//! Order Entity

use auth::Identity;
use chrono::{DateTime, Utc};
use kernel::id::{OrderId, UserId};

use crate::error::{OrderError, OrderResult};

/// Who placed the order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOwner {
    Owned(UserId),
    Guest,
}

impl OrderOwner {
    /// Attribute to the resolved user, if any
    pub fn from_identity(identity: &Identity) -> Self {
        match identity.user() {
            Some(user) => OrderOwner::Owned(user.user_id),
            None => OrderOwner::Guest,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            OrderOwner::Owned(user_id) => Some(*user_id),
            OrderOwner::Guest => None,
        }
    }
}

/// Unvalidated order fields as submitted
#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    pub name: String,
    pub email: String,
    pub coffee_id: i32,
    pub notes: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub owner: OrderOwner,
    pub name: String,
    pub email: String,
    pub coffee_id: i32,
    pub notes: String,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Validate `details` and build a new order.
    ///
    /// Name and email must be non-blank; coffee id and quantity must be
    /// positive. Notes are free text.
    pub fn new(owner: OrderOwner, details: OrderDetails) -> OrderResult<Self> {
        let name = details.name.trim();
        let email = details.email.trim();

        if name.is_empty() || email.is_empty() || details.coffee_id == 0 || details.quantity == 0 {
            return Err(OrderError::Validation("Missing fields".to_string()));
        }
        if details.coffee_id < 0 {
            return Err(OrderError::Validation("Invalid coffee selection".to_string()));
        }
        if details.quantity < 0 {
            return Err(OrderError::Validation("Quantity must be positive".to_string()));
        }

        Ok(Self {
            order_id: OrderId::new(),
            owner,
            name: name.to_string(),
            email: email.to_string(),
            coffee_id: details.coffee_id,
            notes: details.notes,
            quantity: details.quantity,
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> OrderDetails {
        OrderDetails {
            name: "Bob".to_string(),
            email: "b@x.com".to_string(),
            coffee_id: 1,
            notes: String::new(),
            quantity: 2,
        }
    }

    #[test]
    fn test_valid_order() {
        let order = Order::new(OrderOwner::Guest, details()).unwrap();
        assert_eq!(order.owner, OrderOwner::Guest);
        assert_eq!(order.quantity, 2);
    }

    #[test]
    fn test_required_fields() {
        let cases = [
            OrderDetails { name: "  ".into(), ..details() },
            OrderDetails { email: String::new(), ..details() },
            OrderDetails { coffee_id: 0, ..details() },
            OrderDetails { quantity: 0, ..details() },
            OrderDetails { quantity: -1, ..details() },
            OrderDetails { coffee_id: -3, ..details() },
        ];

        for case in cases {
            assert!(matches!(
                Order::new(OrderOwner::Guest, case),
                Err(OrderError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_owner_from_identity() {
        assert_eq!(OrderOwner::from_identity(&Identity::Anonymous), OrderOwner::Guest);
        assert_eq!(OrderOwner::Guest.user_id(), None);

        let user_id = UserId::new();
        assert_eq!(OrderOwner::Owned(user_id).user_id(), Some(user_id));
    }
}
