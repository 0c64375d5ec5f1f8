//! User entity - A person known to the chat platform.
//!
//! Users are created on first contact and their name fields are refreshed on
//! every subsequent contact. Users are never hard-deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Chat platform user ID (e.g. Discord snowflake), unique across users
    #[sea_orm(unique)]
    pub external_id: String,
    /// Platform username
    pub username: String,
    /// Optional display name shown instead of the username
    pub display_name: Option<String>,
    /// Whether the user currently participates
    pub is_active: bool,
    /// Soft delete flag - if true, the user is hidden but history is preserved
    pub is_deleted: bool,
    /// When the user was first seen
    pub created_at: DateTimeUtc,
    /// When the user's name fields were last refreshed
    pub updated_at: DateTimeUtc,
}

impl Model {
    /// Name to show in replies: the display name if set, else the username.
    #[must_use]
    pub fn shown_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Defines relationships between User and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One user has many coffee logs
    #[sea_orm(has_many = "super::coffee_log::Entity")]
    CoffeeLogs,
    /// One user has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::coffee_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CoffeeLogs.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
