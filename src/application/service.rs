use uuid::Uuid;

use crate::domain::{
    Amount, DEFAULT_AVATAR_BASE, Friend, FriendId, Ledger, Payer, SelectionEvent, Settlement,
    SortCriterion, SplitBill, avatar_url,
};

use super::AppError;

/// Application service in front of the [`Ledger`].
///
/// The ledger quietly declines bad input; this is the caller that checks the
/// preconditions first and names what went wrong. It is the primary interface
/// for the shell and for tests.
pub struct LedgerService {
    ledger: Ledger,
    avatar_base: String,
}

/// Result of a successful split
#[derive(Debug, Clone)]
pub struct SplitResult {
    pub settlement: Settlement,
    pub friend: Friend,
    pub form: SplitBill,
}

impl LedgerService {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            ledger,
            avatar_base: DEFAULT_AVATAR_BASE.to_string(),
        }
    }

    pub fn with_avatar_base(mut self, base: impl Into<String>) -> Self {
        self.avatar_base = base.into();
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn avatar_base(&self) -> &str {
        &self.avatar_base
    }

    // ========================
    // Friend operations
    // ========================

    /// Add a friend. Without an image, an avatar URL is generated from the
    /// configured base.
    pub fn add_friend(&mut self, name: &str, image: Option<&str>) -> Result<Friend, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::EmptyName);
        }

        let image = match image {
            Some(image) if image.trim().is_empty() => return Err(AppError::EmptyImage),
            Some(image) => image.trim().to_string(),
            None => avatar_url(&self.avatar_base, Uuid::new_v4()),
        };

        self.ledger
            .add_friend(name.trim(), &image)
            .cloned()
            .ok_or(AppError::EmptyName)
    }

    /// Resolve a friend by full id or by name (case-insensitive).
    pub fn find_friend(&self, query: &str) -> Result<&Friend, AppError> {
        if let Ok(id) = Uuid::parse_str(query.trim()) {
            if let Some(friend) = self.ledger.get(id) {
                return Ok(friend);
            }
        }

        let matches = self.ledger.find_by_name(query);
        match matches.as_slice() {
            [] => Err(AppError::FriendNotFound(query.to_string())),
            [friend] => Ok(*friend),
            _ => Err(AppError::AmbiguousFriend {
                query: query.to_string(),
                matches: matches.len(),
            }),
        }
    }

    /// Toggle selection on the friend named by `query`.
    pub fn select_friend(&mut self, query: &str) -> Result<SelectionEvent, AppError> {
        let id = self.find_friend(query)?.id;
        Ok(self.ledger.select_friend(id))
    }

    /// Toggle selection by id. Unknown ids are passed through and come back as
    /// [`SelectionEvent::Ignored`].
    pub fn select_friend_by_id(&mut self, id: FriendId) -> SelectionEvent {
        self.ledger.select_friend(id)
    }

    pub fn friends(&self) -> &[Friend] {
        self.ledger.friends()
    }

    pub fn sorted_friends(&self, criterion: SortCriterion) -> Vec<&Friend> {
        self.ledger.sorted(criterion)
    }

    pub fn current_selection(&self) -> Option<&Friend> {
        self.ledger.current_selection()
    }

    // ========================
    // Split operations
    // ========================

    /// Split a bill with the selected friend.
    ///
    /// `bill` and `paid_by_user` are the raw form inputs; `None` means the
    /// field was left empty.
    pub fn split_bill(
        &mut self,
        bill: Option<Amount>,
        paid_by_user: Option<Amount>,
        payer: Payer,
    ) -> Result<SplitResult, AppError> {
        let selected = self.current_selection().ok_or(AppError::NoSelection)?;
        let (friend_id, friend_name) = (selected.id, selected.name.clone());

        let bill = match bill {
            None | Some(0) => {
                return Err(AppError::IncompleteBill("bill value is required".to_string()));
            }
            Some(bill) if bill < 0 => {
                return Err(AppError::InvalidAmount("bill cannot be negative".to_string()));
            }
            Some(bill) => bill,
        };
        let paid = match paid_by_user {
            None | Some(0) => {
                return Err(AppError::IncompleteBill("your expense is required".to_string()));
            }
            Some(paid) if paid < 0 => {
                return Err(AppError::InvalidAmount(
                    "your expense cannot be negative".to_string(),
                ));
            }
            Some(paid) if paid > bill => return Err(AppError::PaidExceedsBill { paid, bill }),
            Some(paid) => paid,
        };

        let form = SplitBill::new()
            .with_bill(bill)
            .with_paid_by_user(paid)
            .with_payer(payer);

        let settlement = self
            .ledger
            .settle(friend_id, &form)
            .ok_or(AppError::BalanceOverflow(friend_name))?;
        let friend = self
            .ledger
            .get(friend_id)
            .cloned()
            .ok_or_else(|| AppError::FriendNotFound(friend_id.to_string()))?;

        Ok(SplitResult {
            settlement,
            friend,
            form,
        })
    }
}
