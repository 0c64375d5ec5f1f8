//! HTTP handlers, one module per resource.

pub mod boxes;
pub mod coffee_logs;
pub mod debts;
pub mod health;
pub mod payments;
pub mod users;
