//! Free-text debt list parsing.

use thiserror::Error;

use crate::amount::Amount;

/// Why an input message was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Need a debt name, a phone number, and at least one entry.
    #[error("Input must have at least three lines: a debt name, a phone number, and one debt entry")]
    TooFewLines,

    /// Line 1 must be all decimal digits.
    #[error("Phone number must contain only numbers")]
    InvalidPhoneNumber,

    /// A debt line did not match `@handle <amount>`.
    #[error("Failed to parse debt entry: '{0}'")]
    MalformedEntry(String),
}

/// One parsed debt entry: who owes how much.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftEntry {
    /// Handle without the "@" marker.
    pub identity: String,
    pub amount: Amount,
}

/// A validated draft of a debt list, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtDraft {
    pub debt_name: String,
    pub phone_number: String,
    pub entries: Vec<DraftEntry>,
}

/// Parse a raw multi-line message into a debt list draft.
///
/// Expected shape:
///
/// ```text
/// Lunch
/// 98765432
/// @alice 10
/// @bob 5.5
/// ```
///
/// Lines are trimmed and blank lines ignored. The first line is the debt
/// name (verbatim), the second the payee phone number (digits only), and
/// every remaining line a debt entry. Duplicate identities are kept in
/// order; the ledger's upsert makes the last one win at persistence time.
pub fn parse_debt_list(input: &str) -> Result<DebtDraft, ParseError> {
    let lines: Vec<&str> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < 3 {
        return Err(ParseError::TooFewLines);
    }

    let debt_name = lines[0].to_string();

    let phone_number = lines[1];
    if !phone_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseError::InvalidPhoneNumber);
    }

    let mut entries = Vec::with_capacity(lines.len() - 2);
    for line in &lines[2..] {
        entries.push(parse_entry(line)?);
    }

    Ok(DebtDraft {
        debt_name,
        phone_number: phone_number.to_string(),
        entries,
    })
}

fn parse_entry(line: &str) -> Result<DraftEntry, ParseError> {
    let err = || ParseError::MalformedEntry(line.to_string());

    let rest = line.strip_prefix('@').ok_or_else(err)?;
    let (identity, amount_text) = rest.split_once(char::is_whitespace).ok_or_else(err)?;
    let amount_text = amount_text.trim();

    // Exactly two fields: a handle and an amount.
    if identity.is_empty() || amount_text.is_empty() || amount_text.contains(char::is_whitespace) {
        return Err(err());
    }

    let amount: Amount = amount_text.parse().map_err(|_| err())?;

    Ok(DraftEntry {
        identity: identity.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_input() {
        let draft = parse_debt_list("Lunch\n98765432\n@alice 10\n@bob 5").unwrap();
        assert_eq!(draft.debt_name, "Lunch");
        assert_eq!(draft.phone_number, "98765432");
        assert_eq!(draft.entries.len(), 2);
        assert_eq!(draft.entries[0].identity, "alice");
        assert_eq!(draft.entries[0].amount.cents(), 1000);
        assert_eq!(draft.entries[1].identity, "bob");
        assert_eq!(draft.entries[1].amount.cents(), 500);
    }

    #[test]
    fn test_parse_preserves_input_order_and_duplicates() {
        let draft =
            parse_debt_list("Dinner\n91234567\n@carol 3.5\n@alice 1\n@carol 9").unwrap();
        let identities: Vec<_> = draft.entries.iter().map(|e| e.identity.as_str()).collect();
        assert_eq!(identities, vec!["carol", "alice", "carol"]);
    }

    #[test]
    fn test_parse_skips_blank_lines_and_trims() {
        let draft = parse_debt_list("  Kopi  \n\n98765432\n\n  @dan 2.4  \n").unwrap();
        assert_eq!(draft.debt_name, "Kopi");
        assert_eq!(draft.entries.len(), 1);
        assert_eq!(draft.entries[0].identity, "dan");
        assert_eq!(draft.entries[0].amount.cents(), 240);
    }

    #[test]
    fn test_too_few_lines() {
        assert_eq!(
            parse_debt_list("Lunch\n98765432"),
            Err(ParseError::TooFewLines)
        );
        assert_eq!(parse_debt_list(""), Err(ParseError::TooFewLines));
    }

    #[test]
    fn test_invalid_phone_number() {
        assert_eq!(
            parse_debt_list("Lunch\n+6598765432\n@alice 10"),
            Err(ParseError::InvalidPhoneNumber)
        );
        assert_eq!(
            parse_debt_list("Lunch\nnot a number\n@alice 10"),
            Err(ParseError::InvalidPhoneNumber)
        );
    }

    #[test]
    fn test_malformed_entries() {
        // missing the @ marker
        assert_eq!(
            parse_debt_list("Lunch\n98765432\nalice 10"),
            Err(ParseError::MalformedEntry("alice 10".to_string()))
        );
        // missing the amount
        assert_eq!(
            parse_debt_list("Lunch\n98765432\n@alice"),
            Err(ParseError::MalformedEntry("@alice".to_string()))
        );
        // non-numeric amount is an error, not a silent zero
        assert_eq!(
            parse_debt_list("Lunch\n98765432\n@alice ten"),
            Err(ParseError::MalformedEntry("@alice ten".to_string()))
        );
        // too many fields
        assert_eq!(
            parse_debt_list("Lunch\n98765432\n@alice 1 2"),
            Err(ParseError::MalformedEntry("@alice 1 2".to_string()))
        );
    }
}
