//! Coffee Menu
//!
//! Static data served as-is; orders are not checked against it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coffee {
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    pub coffees: Vec<Coffee>,
}

impl Menu {
    pub fn new(coffees: Vec<Coffee>) -> Self {
        Self { coffees }
    }

    pub fn is_empty(&self) -> bool {
        self.coffees.is_empty()
    }
}
