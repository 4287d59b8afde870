use std::fmt;

use serde::{Deserialize, Serialize};

/// Amounts are whole currency units. Balances are signed:
/// negative means the user owes the friend, positive means the friend owes the user.
pub type Amount = i64;

/// Format an amount with a dollar sign.
/// Example: 20 -> "$20", -7 -> "-$7"
pub fn format_amount(amount: Amount) -> String {
    let sign = if amount < 0 { "-" } else { "" };
    format!("{}${}", sign, amount.unsigned_abs())
}

/// Parse user input into an amount.
/// Example: "100" -> 100, " $40 " -> 40, "-7" -> -7
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    let (sign, rest) = match input.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", input),
    };
    let digits = rest.strip_prefix('$').unwrap_or(rest);

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ParseAmountError::InvalidFormat);
    }

    format!("{}{}", sign, digits)
        .parse()
        .map_err(|_| ParseAmountError::OutOfRange)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    InvalidFormat,
    OutOfRange,
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::InvalidFormat => write!(f, "invalid amount, expected a whole number"),
            ParseAmountError::OutOfRange => write!(f, "amount is out of range"),
        }
    }
}

impl std::error::Error for ParseAmountError {}

/// Where a balance leaves the user relative to one friend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status", content = "amount")]
pub enum BalanceStatus {
    /// The user owes the friend this much
    YouOwe(u64),
    /// The friend owes the user this much
    OwesYou(u64),
    Even,
}

impl BalanceStatus {
    pub fn from_balance(balance: Amount) -> Self {
        match balance {
            0 => BalanceStatus::Even,
            b if b < 0 => BalanceStatus::YouOwe(b.unsigned_abs()),
            b => BalanceStatus::OwesYou(b.unsigned_abs()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BalanceStatus::YouOwe(_) => "you_owe",
            BalanceStatus::OwesYou(_) => "owes_you",
            BalanceStatus::Even => "even",
        }
    }

    /// The sentence shown next to a friend in the list.
    pub fn describe(&self, name: &str) -> String {
        match self {
            BalanceStatus::YouOwe(amount) => format!("You owe {} ${}", name, amount),
            BalanceStatus::OwesYou(amount) => format!("{} owes you ${}", name, amount),
            BalanceStatus::Even => format!("You and {} are even", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(20), "$20");
        assert_eq!(format_amount(0), "$0");
        assert_eq!(format_amount(-7), "-$7");
        assert_eq!(format_amount(i64::MIN), "-$9223372036854775808");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Ok(100));
        assert_eq!(parse_amount(" 40 "), Ok(40));
        assert_eq!(parse_amount("$40"), Ok(40));
        assert_eq!(parse_amount("-7"), Ok(-7));
        assert_eq!(parse_amount("0"), Ok(0));
        assert_eq!(parse_amount("-$7"), Ok(-7));
        assert_eq!(parse_amount("-9223372036854775808"), Ok(i64::MIN));
    }

    #[test]
    fn test_parse_amount_invalid() {
        assert_eq!(parse_amount(""), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("abc"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("12.50"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("-"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("--7"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(parse_amount("-$-7"), Err(ParseAmountError::InvalidFormat));
        assert_eq!(
            parse_amount("99999999999999999999"),
            Err(ParseAmountError::OutOfRange)
        );
    }

    #[test]
    fn test_balance_status() {
        assert_eq!(BalanceStatus::from_balance(-7), BalanceStatus::YouOwe(7));
        assert_eq!(BalanceStatus::from_balance(20), BalanceStatus::OwesYou(20));
        assert_eq!(BalanceStatus::from_balance(0), BalanceStatus::Even);
    }

    #[test]
    fn test_balance_status_at_the_limits() {
        assert_eq!(
            BalanceStatus::from_balance(i64::MIN).describe("Ravi"),
            "You owe Ravi $9223372036854775808"
        );
        assert_eq!(
            BalanceStatus::from_balance(i64::MAX).describe("Rahul"),
            "Rahul owes you $9223372036854775807"
        );
    }

    #[test]
    fn test_balance_sentences() {
        assert_eq!(
            BalanceStatus::from_balance(-7).describe("Ravi"),
            "You owe Ravi $7"
        );
        assert_eq!(
            BalanceStatus::from_balance(20).describe("Rahul"),
            "Rahul owes you $20"
        );
        assert_eq!(
            BalanceStatus::from_balance(0).describe("Durgesh"),
            "You and Durgesh are even"
        );
    }
}
