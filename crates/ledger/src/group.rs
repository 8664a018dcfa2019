//! Group CRUD operations.

use sqlx::SqlitePool;

use crate::error::{LedgerError, Result};
use crate::models::Group;

/// Insert a group, or update its details if already known.
pub async fn upsert_group(pool: &SqlitePool, group: &Group) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO groups (group_id, group_name, group_type)
        VALUES (?, ?, ?)
        ON CONFLICT (group_id) DO UPDATE SET
            group_name = excluded.group_name,
            group_type = excluded.group_type
        "#,
    )
    .bind(group.group_id)
    .bind(&group.group_name)
    .bind(&group.group_type)
    .execute(pool)
    .await?;

    Ok(())
}

/// Get a group by id.
pub async fn get_group(pool: &SqlitePool, group_id: i64) -> Result<Group> {
    sqlx::query_as::<_, Group>(
        r#"
        SELECT group_id, group_name, group_type
        FROM groups
        WHERE group_id = ?
        "#,
    )
    .bind(group_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| LedgerError::NotFound {
        entity: "Group",
        id: group_id.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    #[tokio::test]
    async fn test_group_upsert_and_fetch() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        let group = Group {
            group_id: -100123,
            group_name: "Lunch Crew".to_string(),
            group_type: "supergroup".to_string(),
        };
        upsert_group(db.pool(), &group).await.unwrap();

        let renamed = Group {
            group_name: "Dinner Crew".to_string(),
            ..group.clone()
        };
        upsert_group(db.pool(), &renamed).await.unwrap();

        let fetched = get_group(db.pool(), -100123).await.unwrap();
        assert_eq!(fetched.group_name, "Dinner Crew");

        let missing = get_group(db.pool(), 0).await;
        assert!(matches!(missing, Err(LedgerError::NotFound { .. })));
    }
}
