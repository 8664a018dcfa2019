//! User CRUD and group membership operations.

use sqlx::SqlitePool;

use crate::error::{LedgerError, Result};
use crate::models::{Group, User};

/// Insert a user, or update their details if already known.
///
/// Users are created/updated on every observed interaction and never
/// deleted.
pub async fn upsert_user(pool: &SqlitePool, user: &User) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO users (user_id, username, first_name, last_name)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id) DO UPDATE SET
            username = excluded.username,
            first_name = excluded.first_name,
            last_name = excluded.last_name
        "#,
    )
    .bind(user.user_id)
    .bind(&user.username)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a user by id.
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<User> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT user_id, username, first_name, last_name
        FROM users
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| LedgerError::NotFound {
        entity: "User",
        id: user_id.to_string(),
    })
}

/// Record that a user was seen in a group.
///
/// Membership is discovered opportunistically from group messages, so the
/// association is idempotent.
pub async fn associate_user_with_group(
    pool: &SqlitePool,
    user_id: i64,
    group_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT OR IGNORE INTO user_groups (user_id, group_id)
        VALUES (?, ?)
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Check whether a user is a known member of a group.
pub async fn is_user_in_group(pool: &SqlitePool, user_id: i64, group_id: i64) -> Result<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM user_groups
        WHERE user_id = ? AND group_id = ?
        "#,
    )
    .bind(user_id)
    .bind(group_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// List the groups a user is known to belong to.
pub async fn user_groups(pool: &SqlitePool, user_id: i64) -> Result<Vec<Group>> {
    let groups = sqlx::query_as::<_, Group>(
        r#"
        SELECT g.group_id, g.group_name, g.group_type
        FROM groups g
        JOIN user_groups ug ON ug.group_id = g.group_id
        WHERE ug.user_id = ?
        ORDER BY g.group_name
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::upsert_group;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        db
    }

    fn user(id: i64, username: &str) -> User {
        User {
            user_id: id,
            username: Some(username.to_string()),
            first_name: Some("Test".to_string()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_updates_in_place() {
        let db = test_db().await;
        upsert_user(db.pool(), &user(1, "alice")).await.unwrap();
        upsert_user(db.pool(), &user(1, "alice_renamed")).await.unwrap();

        let fetched = get_user(db.pool(), 1).await.unwrap();
        assert_eq!(fetched.username.as_deref(), Some("alice_renamed"));
    }

    #[tokio::test]
    async fn test_membership_discovery_is_idempotent() {
        let db = test_db().await;
        upsert_user(db.pool(), &user(1, "alice")).await.unwrap();
        let group = Group {
            group_id: -100123,
            group_name: "Lunch Crew".to_string(),
            group_type: "supergroup".to_string(),
        };
        upsert_group(db.pool(), &group).await.unwrap();

        assert!(!is_user_in_group(db.pool(), 1, -100123).await.unwrap());

        associate_user_with_group(db.pool(), 1, -100123).await.unwrap();
        associate_user_with_group(db.pool(), 1, -100123).await.unwrap();

        assert!(is_user_in_group(db.pool(), 1, -100123).await.unwrap());
        let groups = user_groups(db.pool(), 1).await.unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].group_name, "Lunch Crew");
    }

    #[tokio::test]
    async fn test_unknown_user_has_no_groups() {
        let db = test_db().await;
        let groups = user_groups(db.pool(), 404).await.unwrap();
        assert!(groups.is_empty());
    }
}
