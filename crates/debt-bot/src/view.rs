//! Rendering glue: ledger rows to display strings and keyboards.

use sqlx::SqlitePool;

use ledger::models::{Debt, DebtList, Group};
use telegram_api::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracker_core::{render_debt_list, Action, Amount, DebtDraft, EntryLine, ListSnapshot};

use crate::error::BotError;
use crate::texts;

/// Build a renderer snapshot from persisted rows.
pub fn snapshot(list: &DebtList, debts: &[Debt]) -> ListSnapshot {
    ListSnapshot {
        debt_name: list.debt_name.clone(),
        phone_number: list.phone_number.clone(),
        entries: debts
            .iter()
            .map(|debt| EntryLine {
                identity: debt.owed_by.clone(),
                amount: Amount::from_cents(debt.amount_cents),
                paid: debt.paid,
            })
            .collect(),
        last_updated: list.last_updated,
    }
}

/// Fetch a list with its entries and render the canonical display string.
pub async fn render_list(pool: &SqlitePool, list_id: i64) -> Result<String, BotError> {
    let list = ledger::debt_list::get_debt_list(pool, list_id).await?;
    let debts = ledger::debt::debts_for_list(pool, list_id).await?;
    Ok(render_debt_list(&snapshot(&list, &debts)))
}

/// The draft echo shown to the owner before confirmation.
pub fn draft_summary(draft: &DebtDraft) -> String {
    let mut out = String::from("Here's the debt list you entered:\n\n");
    for entry in &draft.entries {
        out.push_str(&format!("@{} - {}\n", entry.identity, entry.amount));
    }
    out.push('\n');
    out.push_str(texts::CONFIRM_PROMPT);
    out
}

/// Drop the last line of a message (used to retire inline affordances).
pub fn without_last_line(text: &str) -> &str {
    match text.rfind('\n') {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}

/// The "Confirm ✅" button under a freshly created draft.
pub fn confirm_keyboard(list_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single(InlineKeyboardButton::callback(
        "Confirm ✅",
        Action::ConfirmInput { list_id }.to_string(),
    ))
}

/// One button per group, for routing a confirmed list.
pub fn group_choice_keyboard(groups: &[Group], list_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::column(
        groups
            .iter()
            .map(|group| {
                InlineKeyboardButton::callback(
                    group.group_name.clone(),
                    Action::SendToGroup {
                        group_id: group.group_id,
                        list_id,
                    }
                    .to_string(),
                )
            })
            .collect(),
    )
}

/// The pay/unpay buttons under a posted group message.
pub fn pay_unpay_keyboard(list_id: i64) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("✅", Action::Pay { list_id }.to_string()),
        InlineKeyboardButton::callback("❌", Action::Unpay { list_id }.to_string()),
    ]])
}

/// The "Confirm ✅" button under the /clear prompt.
pub fn clear_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single(InlineKeyboardButton::callback(
        "Confirm ✅",
        Action::ConfirmClear.to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracker_core::DraftEntry;

    #[test]
    fn test_draft_summary_lists_entries_with_markers() {
        let draft = DebtDraft {
            debt_name: "Lunch".to_string(),
            phone_number: "98765432".to_string(),
            entries: vec![
                DraftEntry {
                    identity: "alice".to_string(),
                    amount: Amount::from_cents(1000),
                },
                DraftEntry {
                    identity: "bob".to_string(),
                    amount: Amount::from_cents(500),
                },
            ],
        };
        let summary = draft_summary(&draft);
        assert!(summary.contains("@alice - 10\n"));
        assert!(summary.contains("@bob - 5\n"));
        assert!(summary.ends_with(texts::CONFIRM_PROMPT));
    }

    #[test]
    fn test_without_last_line() {
        assert_eq!(without_last_line("a\nb\nc"), "a\nb");
        assert_eq!(without_last_line("a\n\nc"), "a");
        assert_eq!(without_last_line("single"), "single");
    }

    #[test]
    fn test_keyboards_carry_decodable_actions() {
        let keyboard = pay_unpay_keyboard(7);
        let actions: Vec<Action> = keyboard
            .callback_data()
            .map(|data| data.parse().unwrap())
            .collect();
        assert_eq!(
            actions,
            vec![Action::Pay { list_id: 7 }, Action::Unpay { list_id: 7 }]
        );

        let confirm = confirm_keyboard(3);
        assert_eq!(
            confirm.callback_data().next().unwrap().parse::<Action>().unwrap(),
            Action::ConfirmInput { list_id: 3 }
        );
    }
}
