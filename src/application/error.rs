use thiserror::Error;

use crate::domain::Amount;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Friend name cannot be empty")]
    EmptyName,

    #[error("Friend image cannot be empty")]
    EmptyImage,

    #[error("Friend not found: {0}")]
    FriendNotFound(String),

    #[error("'{query}' matches {matches} friends, use the friend id instead")]
    AmbiguousFriend { query: String, matches: usize },

    #[error("No friend selected, select one before splitting a bill")]
    NoSelection,

    #[error("Incomplete bill: {0}")]
    IncompleteBill(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Your expense ({paid}) cannot exceed the bill ({bill})")]
    PaidExceedsBill { paid: Amount, bill: Amount },

    #[error("Balance of {0} would overflow")]
    BalanceOverflow(String),

    #[error("The add-friend panel is closed, open it with 'panel' first")]
    AddFriendPanelClosed,
}
