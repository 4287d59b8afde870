use serde::{Deserialize, Serialize};

use super::Amount;

/// Who covered the friend's share of the bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl Payer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Payer::User => "user",
            Payer::Friend => "friend",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" | "you" | "me" => Some(Payer::User),
            "friend" | "them" => Some(Payer::Friend),
            _ => None,
        }
    }
}

impl std::fmt::Display for Payer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Payer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Payer::from_str(s).ok_or_else(|| format!("unknown payer '{}' (use you or friend)", s))
    }
}

/// The split-bill form: total bill, the user's own expense, and who paid.
///
/// Fields start unset. An incomplete form has no delta and settles nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitBill {
    bill: Option<Amount>,
    paid_by_user: Option<Amount>,
    payer: Payer,
}

impl SplitBill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bill(mut self, bill: Amount) -> Self {
        self.set_bill(bill);
        self
    }

    pub fn with_paid_by_user(mut self, paid: Amount) -> Self {
        self.set_paid_by_user(paid);
        self
    }

    pub fn with_payer(mut self, payer: Payer) -> Self {
        self.payer = payer;
        self
    }

    pub fn set_bill(&mut self, bill: Amount) {
        self.bill = Some(bill);
    }

    /// Record the user's expense. Refused (previous value kept) when negative
    /// or larger than the bill; an unset bill allows only zero.
    pub fn set_paid_by_user(&mut self, paid: Amount) -> bool {
        if paid < 0 || paid > self.bill.unwrap_or(0) {
            return false;
        }
        self.paid_by_user = Some(paid);
        true
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    pub fn bill(&self) -> Option<Amount> {
        self.bill
    }

    pub fn paid_by_user(&self) -> Option<Amount> {
        self.paid_by_user
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    /// The friend's expense, derived from the bill.
    pub fn paid_by_friend(&self) -> Option<Amount> {
        self.bill
            .map(|bill| bill - self.paid_by_user.unwrap_or(0))
    }

    /// The change to apply to the friend's balance, or `None` if the form is
    /// incomplete (no positive bill, or no positive user expense within it).
    /// A zero expense counts as unset.
    ///
    /// When the user pays, the friend now owes their share: the balance rises
    /// by the friend's expense. When the friend pays, the user owes theirs:
    /// the balance falls by the user's expense.
    pub fn delta(&self) -> Option<Amount> {
        let bill = self.bill.filter(|bill| *bill > 0)?;
        let paid = self.paid_by_user.filter(|paid| (1..=bill).contains(paid))?;

        match self.payer {
            Payer::User => Some(bill - paid),
            Payer::Friend => Some(-paid),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_when_user_pays() {
        let form = SplitBill::new()
            .with_bill(100)
            .with_paid_by_user(40)
            .with_payer(Payer::User);
        assert_eq!(form.paid_by_friend(), Some(60));
        assert_eq!(form.delta(), Some(60));
    }

    #[test]
    fn test_delta_when_friend_pays() {
        let form = SplitBill::new()
            .with_bill(100)
            .with_paid_by_user(40)
            .with_payer(Payer::Friend);
        assert_eq!(form.delta(), Some(-40));
    }

    #[test]
    fn test_zero_user_expense_counts_as_unset() {
        let form = SplitBill::new().with_bill(100).with_paid_by_user(0);
        assert_eq!(form.paid_by_user(), Some(0));
        assert_eq!(form.delta(), None);
        assert_eq!(form.with_payer(Payer::Friend).delta(), None);

        let form = form.with_paid_by_user(100);
        assert_eq!(form.delta(), Some(0));
    }

    #[test]
    fn test_incomplete_forms_have_no_delta() {
        assert_eq!(SplitBill::new().delta(), None);
        assert_eq!(SplitBill::new().with_bill(100).delta(), None);
        assert_eq!(SplitBill::new().with_bill(0).with_paid_by_user(0).delta(), None);
        assert_eq!(SplitBill::new().with_bill(-10).delta(), None);
    }

    #[test]
    fn test_paid_cannot_exceed_bill() {
        let mut form = SplitBill::new().with_bill(100);
        assert!(form.set_paid_by_user(40));
        assert!(!form.set_paid_by_user(140));
        assert_eq!(form.paid_by_user(), Some(40));
        assert!(!form.set_paid_by_user(-1));
        assert_eq!(form.paid_by_user(), Some(40));
    }

    #[test]
    fn test_paid_before_bill_only_allows_zero() {
        let mut form = SplitBill::new();
        assert!(!form.set_paid_by_user(10));
        assert!(form.set_paid_by_user(0));
        assert_eq!(form.paid_by_friend(), None);
    }

    #[test]
    fn test_lowering_bill_below_paid_invalidates_delta() {
        let mut form = SplitBill::new().with_bill(100).with_paid_by_user(80);
        form.set_bill(50);
        assert_eq!(form.paid_by_user(), Some(80));
        assert_eq!(form.delta(), None);
    }

    #[test]
    fn test_payer_parsing() {
        assert_eq!(Payer::from_str("you"), Some(Payer::User));
        assert_eq!(Payer::from_str("USER"), Some(Payer::User));
        assert_eq!(Payer::from_str("friend"), Some(Payer::Friend));
        assert_eq!(Payer::from_str("bank"), None);
        assert_eq!(Payer::default(), Payer::User);
    }
}
