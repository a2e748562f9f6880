//! API DTOs

use serde::{Deserialize, Serialize};

use crate::domain::entity::order::OrderDetails;

/// `POST /order` body. Absent fields become zero values and fail validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub name: String,
    pub email: String,
    pub coffee_id: i32,
    pub notes: String,
    pub quantity: i32,
}

impl From<CreateOrderRequest> for OrderDetails {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            coffee_id: req.coffee_id,
            notes: req.notes,
            quantity: req.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}
