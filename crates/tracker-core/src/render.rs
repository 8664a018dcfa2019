//! Canonical rendering of a debt list's state.

use chrono::{DateTime, FixedOffset, Utc};

use crate::amount::Amount;

/// Offset applied to the stored UTC instant at render time (UTC+8).
///
/// The instant itself is stored canonically in UTC; only the display
/// converts.
const DISPLAY_UTC_OFFSET_HOURS: i32 = 8;

/// One rendered line: who owes what, and whether it is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    /// Handle without the "@" marker.
    pub identity: String,
    pub amount: Amount,
    pub paid: bool,
}

/// Everything the renderer needs about a list, in persisted insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub debt_name: String,
    pub phone_number: String,
    pub entries: Vec<EntryLine>,
    pub last_updated: DateTime<Utc>,
}

/// Render a debt list into its canonical display string.
///
/// Unpaid entries carry the "@" marker and a ❌; paid entries drop the
/// marker and get a ✅, visually distinguishing settled lines. Entry order
/// follows the snapshot (persisted insertion order), and the function is
/// pure: the timestamp comes from the snapshot, never from a clock.
pub fn render_debt_list(snapshot: &ListSnapshot) -> String {
    let mut out = format!(
        "{}\nPay to: {}\n\n",
        snapshot.debt_name, snapshot.phone_number
    );

    for entry in &snapshot.entries {
        if entry.paid {
            out.push_str(&format!("{} - {} ✅\n", entry.identity, entry.amount));
        } else {
            out.push_str(&format!("@{} - {} ❌\n", entry.identity, entry.amount));
        }
    }

    let local = snapshot.last_updated.with_timezone(&display_offset());
    out.push_str(&format!(
        "\nMessage last updated at {}",
        local.format("%Y-%m-%d %H:%M:%S")
    ));

    out
}

fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_UTC_OFFSET_HOURS * 3600).expect("valid fixed offset")
}
