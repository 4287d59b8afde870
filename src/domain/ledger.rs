use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{Amount, Friend, FriendId, SortCriterion, SplitBill, sorted_view};

/// What a call to [`Ledger::select_friend`] did to the selection.
///
/// The ledger has no notion of UI panels; callers react to these events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Selected(FriendId),
    /// The friend was already selected and has been deselected
    Cleared(FriendId),
    /// No friend with this id; nothing changed
    Ignored(FriendId),
}

/// Receipt of an applied split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub friend_id: FriendId,
    pub friend_name: String,
    pub previous_balance: Amount,
    pub delta: Amount,
    pub balance: Amount,
    pub recorded_at: DateTime<Utc>,
}

/// The friends, their balances and the current selection.
///
/// All mutation goes through the methods below. Guards never fail loudly:
/// a declined operation leaves the ledger untouched and returns `None`.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    friends: Vec<Friend>,
    selected: Option<FriendId>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from an existing roster. Friends whose id is already
    /// present are skipped.
    pub fn with_friends(friends: impl IntoIterator<Item = Friend>) -> Self {
        let mut ledger = Self::new();
        for friend in friends {
            if ledger.get(friend.id).is_some() {
                warn!(id = %friend.id, name = %friend.name, "skipping friend with duplicate id");
                continue;
            }
            ledger.friends.push(friend);
        }
        ledger
    }

    /// Append a settled friend. Declined when the name or image is blank.
    pub fn add_friend(&mut self, name: &str, image: &str) -> Option<&Friend> {
        if name.trim().is_empty() || image.trim().is_empty() {
            debug!("add friend declined: blank name or image");
            return None;
        }

        let mut friend = Friend::new(name, image);
        // ids stay unique even on a v4 collision
        while self.get(friend.id).is_some() {
            friend.id = uuid::Uuid::new_v4();
        }

        debug!(id = %friend.id, name = %friend.name, "friend added");
        self.friends.push(friend);
        self.friends.last()
    }

    /// Toggle the selection on `id`.
    pub fn select_friend(&mut self, id: FriendId) -> SelectionEvent {
        if self.selected == Some(id) {
            self.selected = None;
            debug!(%id, "selection cleared");
            return SelectionEvent::Cleared(id);
        }

        if self.get(id).is_none() {
            debug!(%id, "select ignored: unknown friend");
            return SelectionEvent::Ignored(id);
        }

        self.selected = Some(id);
        debug!(%id, "friend selected");
        SelectionEvent::Selected(id)
    }

    /// Add `delta` to the selected friend's balance and clear the selection.
    ///
    /// Declined when `selected_id` is not the current selection, or when the
    /// new balance would overflow.
    pub fn split_bill(&mut self, selected_id: FriendId, delta: Amount) -> Option<Settlement> {
        if self.selected != Some(selected_id) {
            debug!(id = %selected_id, "split declined: friend is not selected");
            return None;
        }

        let friend = self.friends.iter_mut().find(|f| f.id == selected_id)?;
        let Some(balance) = friend.balance.checked_add(delta) else {
            debug!(id = %selected_id, delta, "split declined: balance overflow");
            return None;
        };

        let previous_balance = friend.balance;
        friend.balance = balance;
        let settlement = Settlement {
            friend_id: friend.id,
            friend_name: friend.name.clone(),
            previous_balance,
            delta,
            balance,
            recorded_at: Utc::now(),
        };
        self.selected = None;

        debug!(
            id = %selected_id,
            previous_balance,
            delta,
            balance,
            "bill split applied"
        );
        Some(settlement)
    }

    /// Settle a split form with the selected friend. An incomplete form
    /// changes nothing, selection included.
    pub fn settle(&mut self, selected_id: FriendId, form: &SplitBill) -> Option<Settlement> {
        let Some(delta) = form.delta() else {
            debug!(id = %selected_id, ?form, "split declined: incomplete form");
            return None;
        };
        self.split_bill(selected_id, delta)
    }

    /// Friends in insertion order.
    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn sorted(&self, criterion: SortCriterion) -> Vec<&Friend> {
        sorted_view(&self.friends, criterion)
    }

    pub fn current_selection(&self) -> Option<&Friend> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn get(&self, id: FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| f.id == id)
    }

    /// Friends whose name matches exactly, ignoring case and surrounding whitespace.
    pub fn find_by_name(&self, name: &str) -> Vec<&Friend> {
        let needle = name.trim().to_lowercase();
        self.friends
            .iter()
            .filter(|f| f.name.trim().to_lowercase() == needle)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }
}
