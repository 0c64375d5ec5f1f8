//! Core business logic - framework-agnostic inventory, logging and accounting.
//!
//! Both presentation adapters (the REST API and the chat bot) call into these
//! modules and never touch the entities directly.

/// Box registration, inventory figures and deactivation
pub mod coffee_box;
/// The coffee logging workflow
pub mod coffee;
/// Debt calculation and payment records
pub mod payment;
/// Per-user reports and text formatting
pub mod report;
/// User registration and lookup
pub mod user;
