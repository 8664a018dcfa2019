//! Debt list operations: creation, lifecycle transitions, queries.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{LedgerError, Result};
use crate::models::{DebtList, NewDebt};

/// Create a pending debt list together with its entries.
///
/// The list row and every entry are written in one transaction, so a crash
/// can never leave entries without a parent. Duplicate identities in
/// `entries` collapse via the upsert: the last one wins.
pub async fn create_debt_list(
    pool: &SqlitePool,
    user_id: i64,
    debt_name: &str,
    phone_number: &str,
    entries: &[NewDebt],
) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let list_id = sqlx::query(
        r#"
        INSERT INTO debt_lists (user_id, debt_name, phone_number, last_updated)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(debt_name)
    .bind(phone_number)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO debts (list_id, owed_by, amount_cents)
            VALUES (?, ?, ?)
            ON CONFLICT (list_id, owed_by) DO UPDATE SET
                amount_cents = excluded.amount_cents,
                paid = 0
            "#,
        )
        .bind(list_id)
        .bind(&entry.owed_by)
        .bind(entry.amount_cents)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(list_id, user_id, entries = entries.len(), "created debt list");
    Ok(list_id)
}

/// Get a debt list by id.
pub async fn get_debt_list(pool: &SqlitePool, list_id: i64) -> Result<DebtList> {
    sqlx::query_as::<_, DebtList>(
        r#"
        SELECT list_id, user_id, group_id, debt_name, phone_number,
               is_pending, chat_id, message_id, last_updated
        FROM debt_lists
        WHERE list_id = ?
        "#,
    )
    .bind(list_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| LedgerError::NotFound {
        entity: "DebtList",
        id: list_id.to_string(),
    })
}

/// Transition a list from pending to confirmed.
///
/// The update is conditional on `is_pending`, so a double-confirmation (or
/// a stale button) fails with `NotFound` instead of re-applying.
pub async fn confirm_pending(pool: &SqlitePool, list_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE debt_lists
        SET is_pending = 0
        WHERE list_id = ? AND is_pending = 1
        "#,
    )
    .bind(list_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound {
            entity: "pending DebtList",
            id: list_id.to_string(),
        });
    }

    Ok(())
}

/// Record the destination group of a routed list.
pub async fn assign_group(pool: &SqlitePool, list_id: i64, group_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE debt_lists
        SET group_id = ?
        WHERE list_id = ?
        "#,
    )
    .bind(group_id)
    .bind(list_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound {
            entity: "DebtList",
            id: list_id.to_string(),
        });
    }

    Ok(())
}

/// Record where the list's message is currently posted.
///
/// Does not touch `last_updated`: reposting is not a content change.
pub async fn set_message_location(
    pool: &SqlitePool,
    list_id: i64,
    chat_id: i64,
    message_id: i64,
) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE debt_lists
        SET chat_id = ?, message_id = ?
        WHERE list_id = ?
        "#,
    )
    .bind(chat_id)
    .bind(message_id)
    .bind(list_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound {
            entity: "DebtList",
            id: list_id.to_string(),
        });
    }

    Ok(())
}

/// Forget the list's posted message location.
pub async fn clear_message_location(pool: &SqlitePool, list_id: i64) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE debt_lists
        SET chat_id = NULL, message_id = NULL
        WHERE list_id = ?
        "#,
    )
    .bind(list_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(LedgerError::NotFound {
            entity: "DebtList",
            id: list_id.to_string(),
        });
    }

    Ok(())
}

/// List all debt lists owned by a user, oldest first.
pub async fn lists_owned_by(pool: &SqlitePool, user_id: i64) -> Result<Vec<DebtList>> {
    let lists = sqlx::query_as::<_, DebtList>(
        r#"
        SELECT list_id, user_id, group_id, debt_name, phone_number,
               is_pending, chat_id, message_id, last_updated
        FROM debt_lists
        WHERE user_id = ?
        ORDER BY list_id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(lists)
}

/// List every debt list with a posted message, regardless of owner.
pub async fn posted_lists(pool: &SqlitePool) -> Result<Vec<DebtList>> {
    let lists = sqlx::query_as::<_, DebtList>(
        r#"
        SELECT list_id, user_id, group_id, debt_name, phone_number,
               is_pending, chat_id, message_id, last_updated
        FROM debt_lists
        WHERE chat_id IS NOT NULL AND message_id IS NOT NULL
        ORDER BY list_id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(lists)
}

/// Delete every debt list a user owns, cascading to the entries.
///
/// Returns the number of lists removed.
pub async fn delete_lists_owned_by(pool: &SqlitePool, user_id: i64) -> Result<u64> {
    let result = sqlx::query(
        r#"
        DELETE FROM debt_lists
        WHERE user_id = ?
        "#,
    )
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debt::debts_for_list;
    use crate::models::User;
    use crate::user::upsert_user;
    use crate::Database;

    async fn test_db() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();
        upsert_user(
            db.pool(),
            &User {
                user_id: 1,
                username: Some("owner".to_string()),
                first_name: None,
                last_name: None,
            },
        )
        .await
        .unwrap();
        db
    }

    fn entries() -> Vec<NewDebt> {
        vec![
            NewDebt {
                owed_by: "alice".to_string(),
                amount_cents: 1000,
            },
            NewDebt {
                owed_by: "bob".to_string(),
                amount_cents: 500,
            },
        ]
    }

    #[tokio::test]
    async fn test_create_starts_pending_and_unrouted() {
        let db = test_db().await;
        let list_id = create_debt_list(db.pool(), 1, "Lunch", "98765432", &entries())
            .await
            .unwrap();

        let list = get_debt_list(db.pool(), list_id).await.unwrap();
        assert!(list.is_pending);
        assert_eq!(list.group_id, None);
        assert_eq!(list.message_location(), None);
        assert_eq!(debts_for_list(db.pool(), list_id).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_confirm_rejects_replay() {
        let db = test_db().await;
        let list_id = create_debt_list(db.pool(), 1, "Lunch", "98765432", &entries())
            .await
            .unwrap();

        confirm_pending(db.pool(), list_id).await.unwrap();
        assert!(!get_debt_list(db.pool(), list_id).await.unwrap().is_pending);

        // second confirmation must fail, not re-apply
        let replay = confirm_pending(db.pool(), list_id).await;
        assert!(matches!(replay, Err(LedgerError::NotFound { .. })));

        // so must confirming a list that never existed
        let missing = confirm_pending(db.pool(), 404).await;
        assert!(matches!(missing, Err(LedgerError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_cascade_delete_removes_entries() {
        let db = test_db().await;
        let list_id = create_debt_list(db.pool(), 1, "Lunch", "98765432", &entries())
            .await
            .unwrap();

        let deleted = delete_lists_owned_by(db.pool(), 1).await.unwrap();
        assert_eq!(deleted, 1);

        assert!(debts_for_list(db.pool(), list_id).await.unwrap().is_empty());
        let list = get_debt_list(db.pool(), list_id).await;
        assert!(matches!(list, Err(LedgerError::NotFound { .. })));

        // nothing left to clear
        assert_eq!(delete_lists_owned_by(db.pool(), 1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_posted_lists_tracks_message_location() {
        let db = test_db().await;
        let list_id = create_debt_list(db.pool(), 1, "Lunch", "98765432", &entries())
            .await
            .unwrap();

        assert!(posted_lists(db.pool()).await.unwrap().is_empty());

        set_message_location(db.pool(), list_id, -100123, 55).await.unwrap();
        let posted = posted_lists(db.pool()).await.unwrap();
        assert_eq!(posted.len(), 1);
        assert_eq!(posted[0].message_location(), Some((-100123, 55)));

        clear_message_location(db.pool(), list_id).await.unwrap();
        assert!(posted_lists(db.pool()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_message_location_does_not_touch_last_updated() {
        let db = test_db().await;
        let list_id = create_debt_list(db.pool(), 1, "Lunch", "98765432", &entries())
            .await
            .unwrap();

        let before = get_debt_list(db.pool(), list_id).await.unwrap().last_updated;
        set_message_location(db.pool(), list_id, -100123, 55).await.unwrap();
        clear_message_location(db.pool(), list_id).await.unwrap();
        let after = get_debt_list(db.pool(), list_id).await.unwrap().last_updated;

        assert_eq!(before, after);
    }
}
