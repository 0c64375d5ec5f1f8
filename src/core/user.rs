//! User business logic - Registration and lookup of chat-platform users.
//!
//! Users are identified by their external (chat platform) ID. Every inbound
//! chat command calls [`upsert_user`] first, so a user exists before any
//! coffee can be logged for them.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, instrument};

/// Creates the user on first contact, or refreshes their name fields.
///
/// A soft-deleted user who comes back is left deleted; their names are still
/// refreshed so history shows the current name.
///
/// # Errors
/// Returns an error if the external ID or username is blank, or if the
/// database operation fails.
#[instrument(skip(db))]
pub async fn upsert_user(
    db: &DatabaseConnection,
    external_id: &str,
    username: &str,
    display_name: Option<String>,
) -> Result<user::Model> {
    if external_id.trim().is_empty() {
        return Err(Error::invalid("User external ID cannot be empty"));
    }
    if username.trim().is_empty() {
        return Err(Error::invalid("Username cannot be empty"));
    }

    let now = chrono::Utc::now();
    let existing = User::find()
        .filter(user::Column::ExternalId.eq(external_id))
        .one(db)
        .await?;

    if let Some(existing) = existing {
        let mut active: user::ActiveModel = existing.into();
        active.username = Set(username.to_string());
        active.display_name = Set(display_name);
        active.updated_at = Set(now);
        return active.update(db).await.map_err(Into::into);
    }

    debug!("Registering new user");
    let new_user = user::ActiveModel {
        external_id: Set(external_id.to_string()),
        username: Set(username.to_string()),
        display_name: Set(display_name),
        is_active: Set(true),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    new_user.insert(db).await.map_err(Into::into)
}

/// Finds a non-deleted user by their chat platform ID.
pub async fn get_user_by_external_id(
    db: &DatabaseConnection,
    external_id: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::ExternalId.eq(external_id))
        .filter(user::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a non-deleted user by internal ID.
pub async fn get_user_by_id<C>(db: &C, user_id: i64) -> Result<Option<user::Model>>
where
    C: ConnectionTrait,
{
    User::find_by_id(user_id)
        .filter(user::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all active, non-deleted users ordered by username.
pub async fn get_all_active_users(db: &DatabaseConnection) -> Result<Vec<user::Model>> {
    User::find()
        .filter(user::Column::IsActive.eq(true))
        .filter(user::Column::IsDeleted.eq(false))
        .order_by_asc(user::Column::Username)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_upsert_user_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = upsert_user(&db, "  ", "alice", None).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        let result = upsert_user(&db, "1001", "", None).await;
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));

        Ok(())
    }

    #[tokio::test]
    async fn test_upsert_user_creates_then_refreshes() -> Result<()> {
        let db = setup_test_db().await?;

        let created = upsert_user(&db, "1001", "alice", None).await?;
        assert_eq!(created.external_id, "1001");
        assert!(created.is_active);
        assert!(!created.is_deleted);
        assert_eq!(created.shown_name(), "alice");

        let refreshed = upsert_user(&db, "1001", "alice_b", Some("Alice".to_string())).await?;
        assert_eq!(refreshed.id, created.id);
        assert_eq!(refreshed.username, "alice_b");
        assert_eq!(refreshed.shown_name(), "Alice");

        // Still exactly one row for this external ID
        assert_eq!(get_all_active_users(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_user_lookups() -> Result<()> {
        let db = setup_test_db().await?;
        let alice = create_test_user(&db, "1001", "alice").await?;

        let by_external = get_user_by_external_id(&db, "1001").await?.unwrap();
        assert_eq!(by_external.id, alice.id);

        let by_id = get_user_by_id(&db, alice.id).await?.unwrap();
        assert_eq!(by_id.external_id, "1001");

        assert!(get_user_by_external_id(&db, "9999").await?.is_none());
        assert!(get_user_by_id(&db, 9999).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_active_users_ordered_and_filtered() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "2", "zoe").await?;
        create_test_user(&db, "1", "adam").await?;
        let gone = create_test_user(&db, "3", "mallory").await?;

        let mut gone: user::ActiveModel = gone.into();
        gone.is_deleted = Set(true);
        gone.update(&db).await?;

        let users = get_all_active_users(&db).await?;
        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["adam", "zoe"]);
        Ok(())
    }
}
