//! Entity Module

pub mod menu;
pub mod order;
