//! Debt entry operations.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{LedgerError, Result};
use crate::models::Debt;

/// Insert a debt entry, or replace the existing one for the same
/// `(list, identity)` pair.
///
/// Re-entering a participant resets their entry: new amount, unpaid. The
/// parent list's `last_updated` is refreshed in the same transaction.
pub async fn upsert_debt(
    pool: &SqlitePool,
    list_id: i64,
    owed_by: &str,
    amount_cents: i64,
) -> Result<()> {
    let mut tx = pool.begin().await?;

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
    .bind(owed_by)
    .bind(amount_cents)
    .execute(&mut *tx)
    .await?;

    touch_list(&mut tx, list_id).await?;

    tx.commit().await?;
    Ok(())
}

/// Get the debt entry for an identity within a list.
pub async fn get_debt(pool: &SqlitePool, list_id: i64, owed_by: &str) -> Result<Debt> {
    sqlx::query_as::<_, Debt>(
        r#"
        SELECT debt_id, list_id, owed_by, amount_cents, paid
        FROM debts
        WHERE list_id = ? AND owed_by = ?
        "#,
    )
    .bind(list_id)
    .bind(owed_by)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| LedgerError::NotFound {
        entity: "Debt",
        id: format!("{}/{}", list_id, owed_by),
    })
}

/// List a debt list's entries in persisted insertion order.
pub async fn debts_for_list(pool: &SqlitePool, list_id: i64) -> Result<Vec<Debt>> {
    let debts = sqlx::query_as::<_, Debt>(
        r#"
        SELECT debt_id, list_id, owed_by, amount_cents, paid
        FROM debts
        WHERE list_id = ?
        ORDER BY debt_id
        "#,
    )
    .bind(list_id)
    .fetch_all(pool)
    .await?;

    Ok(debts)
}

/// Set the paid flag of one entry, identified by `(list, identity)`.
///
/// The read-check-write runs in one transaction, so the idempotence check
/// holds under concurrent callbacks:
///
/// - no matching entry -> `NotFound` (the activating identity is not a
///   participant of that list)
/// - flag already has the requested value -> `AlreadyInState`
/// - otherwise the flag flips and the parent's `last_updated` is
///   refreshed before commit
pub async fn set_paid(pool: &SqlitePool, list_id: i64, owed_by: &str, paid: bool) -> Result<()> {
    let mut tx = pool.begin().await?;

    let current = sqlx::query_scalar::<_, bool>(
        r#"
        SELECT paid FROM debts
        WHERE list_id = ? AND owed_by = ?
        "#,
    )
    .bind(list_id)
    .bind(owed_by)
    .fetch_optional(&mut *tx)
    .await?;

    match current {
        None => {
            return Err(LedgerError::NotFound {
                entity: "Debt",
                id: format!("{}/{}", list_id, owed_by),
            });
        }
        Some(state) if state == paid => {
            return Err(LedgerError::AlreadyInState {
                list_id,
                identity: owed_by.to_string(),
                paid,
            });
        }
        Some(_) => {}
    }

    sqlx::query(
        r#"
        UPDATE debts
        SET paid = ?
        WHERE list_id = ? AND owed_by = ?
        "#,
    )
    .bind(paid)
    .bind(list_id)
    .bind(owed_by)
    .execute(&mut *tx)
    .await?;

    touch_list(&mut tx, list_id).await?;

    tx.commit().await?;
    Ok(())
}

async fn touch_list(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    list_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE debt_lists
        SET last_updated = ?
        WHERE list_id = ?
        "#,
    )
    .bind(Utc::now())
    .bind(list_id)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
