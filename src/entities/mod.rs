//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod coffee_box;
pub mod coffee_log;
pub mod payment;
pub mod user;

// Re-export specific types to avoid conflicts (`Box` would shadow the prelude)
pub use coffee_box::{Column as CoffeeBoxColumn, Entity as CoffeeBox, Model as CoffeeBoxModel};
pub use coffee_log::{Column as CoffeeLogColumn, Entity as CoffeeLog, Model as CoffeeLogModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
