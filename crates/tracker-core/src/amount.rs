//! Fixed-point money amounts.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The amount text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid amount: '{0}'")]
pub struct AmountParseError(pub String);

/// A non-negative money amount with two decimal places, stored as cents.
///
/// Floating point never touches the money path: parsing goes straight from
/// decimal text to integer cents, and rendering back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(i64);

impl Amount {
    /// Build an amount from integer cents.
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in integer cents.
    pub fn cents(&self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = AmountParseError;

    /// Parse decimal text: digits with at most one `.` and at most two
    /// fractional digits. `"10"`, `"9.6"`, `"3.25"` are valid; `"1.2.3"`,
    /// `"1e3"`, `"-5"`, and `"1.234"` are not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AmountParseError(s.to_string());

        let (units_part, frac_part) = match s.split_once('.') {
            Some((units, frac)) => (units, frac),
            None => (s, ""),
        };

        if units_part.is_empty() && frac_part.is_empty() {
            return Err(err());
        }
        if frac_part.contains('.') || frac_part.len() > 2 {
            return Err(err());
        }
        if !units_part.chars().all(|c| c.is_ascii_digit())
            || !frac_part.chars().all(|c| c.is_ascii_digit())
        {
            return Err(err());
        }

        let units: i64 = if units_part.is_empty() {
            0
        } else {
            units_part.parse().map_err(|_| err())?
        };
        let frac_cents: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().map_err(|_| err())? * 10,
            _ => frac_part.parse().map_err(|_| err())?,
        };

        units
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Amount)
            .ok_or_else(err)
    }
}

impl fmt::Display for Amount {
    /// Render with trailing zeros trimmed: `10`, `9.6`, `3.25`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{}", units)
        } else if frac % 10 == 0 {
            write!(f, "{}.{}", units, frac / 10)
        } else {
            write!(f, "{}.{:02}", units, frac)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_and_fractional() {
        assert_eq!("10".parse::<Amount>().unwrap().cents(), 1000);
        assert_eq!("9.6".parse::<Amount>().unwrap().cents(), 960);
        assert_eq!("3.25".parse::<Amount>().unwrap().cents(), 325);
        assert_eq!("0".parse::<Amount>().unwrap().cents(), 0);
        assert_eq!(".5".parse::<Amount>().unwrap().cents(), 50);
        assert_eq!("7.".parse::<Amount>().unwrap().cents(), 700);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", ".", "1.2.3", "1e3", "-5", "1.234", "12a", "1. 2", "NaN"] {
            assert!(bad.parse::<Amount>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_display_trims_trailing_zeros() {
        assert_eq!(Amount::from_cents(1000).to_string(), "10");
        assert_eq!(Amount::from_cents(960).to_string(), "9.6");
        assert_eq!(Amount::from_cents(325).to_string(), "3.25");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
        assert_eq!(Amount::from_cents(0).to_string(), "0");
    }

    #[test]
    fn test_round_trip() {
        for text in ["10", "9.6", "3.25", "0.05"] {
            let amount: Amount = text.parse().unwrap();
            assert_eq!(amount.to_string(), text);
        }
    }
}
