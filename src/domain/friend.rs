use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Amount, BalanceStatus};

pub type FriendId = Uuid;

/// Default avatar service used when a friend is added without an image.
pub const DEFAULT_AVATAR_BASE: &str = "https://i.pravatar.cc/48";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    /// Avatar URL, carried for display only
    pub image: String,
    /// Negative: the user owes this friend. Positive: this friend owes the user.
    pub balance: Amount,
    pub added_at: DateTime<Utc>,
}

impl Friend {
    /// Create a settled friend with a fresh id.
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            image: image.into(),
            balance: 0,
            added_at: Utc::now(),
        }
    }

    pub fn with_balance(mut self, balance: Amount) -> Self {
        self.balance = balance;
        self
    }

    pub fn status(&self) -> BalanceStatus {
        BalanceStatus::from_balance(self.balance)
    }

    pub fn is_settled(&self) -> bool {
        self.balance == 0
    }
}

/// Build a per-friend avatar URL by appending a cache-busting token to the base.
pub fn avatar_url(base: &str, token: Uuid) -> String {
    format!("{}?={}", base.trim_end_matches('?'), token)
}

/// A starting roster for demos: Ravi, Rahul and Durgesh.
pub fn demo_friends() -> Vec<Friend> {
    [("Ravi", 118836, -7), ("Rahul", 933372, 20), ("Durgesh", 499476, 0)]
        .into_iter()
        .map(|(name, avatar, balance)| {
            Friend::new(name, format!("{}?u={}", DEFAULT_AVATAR_BASE, avatar))
                .with_balance(balance)
        })
        .collect()
}
