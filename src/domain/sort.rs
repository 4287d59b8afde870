use std::cmp::{Ordering, Reverse};

use serde::{Deserialize, Serialize};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::Friend;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortCriterion {
    /// By name, accents and case folded
    #[default]
    Alphabetical,
    /// Most negative balance first: whoever the user owes the most
    YouHaveToPay,
    /// Most positive balance first: whoever owes the user the most
    TheyHaveToPay,
    /// Settled friends ahead of friends the user owes; nothing else is ordered
    ZeroAndYouHaveToPay,
}

impl SortCriterion {
    pub const ALL: [SortCriterion; 4] = [
        SortCriterion::Alphabetical,
        SortCriterion::YouHaveToPay,
        SortCriterion::TheyHaveToPay,
        SortCriterion::ZeroAndYouHaveToPay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Alphabetical => "alphabetical",
            SortCriterion::YouHaveToPay => "youHaveToPay",
            SortCriterion::TheyHaveToPay => "theyHaveToPay",
            SortCriterion::ZeroAndYouHaveToPay => "zeroAndYouHaveToPay",
        }
    }

    /// Accepts the camelCase names in any case, with or without `-`/`_`.
    pub fn from_str(s: &str) -> Option<Self> {
        let folded: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "alphabetical" => Some(SortCriterion::Alphabetical),
            "youhavetopay" => Some(SortCriterion::YouHaveToPay),
            "theyhavetopay" => Some(SortCriterion::TheyHaveToPay),
            "zeroandyouhavetopay" => Some(SortCriterion::ZeroAndYouHaveToPay),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortCriterion::Alphabetical => "Alphabetical",
            SortCriterion::YouHaveToPay => "You Have to Pay",
            SortCriterion::TheyHaveToPay => "They Have to Pay",
            SortCriterion::ZeroAndYouHaveToPay => "0 and You Have to Pay",
        }
    }
}

impl std::fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortCriterion::from_str(s).ok_or_else(|| {
            let valid: Vec<&str> = SortCriterion::ALL.iter().map(|c| c.as_str()).collect();
            format!("unknown sort criterion '{}' (valid: {})", s, valid.join(", "))
        })
    }
}

/// Order friends for display. The input slice is never reordered.
pub fn sorted_view(friends: &[Friend], criterion: SortCriterion) -> Vec<&Friend> {
    let mut view: Vec<&Friend> = friends.iter().collect();

    match criterion {
        SortCriterion::Alphabetical => view.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortCriterion::YouHaveToPay => view.sort_by_key(|f| f.balance),
        SortCriterion::TheyHaveToPay => view.sort_by_key(|f| Reverse(f.balance)),
        SortCriterion::ZeroAndYouHaveToPay => settled_before_owed(&mut view),
    }

    view
}

/// Collation key: canonical decomposition, combining marks dropped, lowercased.
fn collation_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Stable pass that moves every settled friend to just before the first
/// friend they owe money to, if one comes earlier. Nothing else moves.
fn settled_before_owed(view: &mut Vec<&Friend>) {
    for i in 0..view.len() {
        if view[i].balance != 0 {
            continue;
        }
        if let Some(first_owed) = view[..i].iter().position(|f| f.balance < 0) {
            let settled = view.remove(i);
            view.insert(first_owed, settled);
        }
    }
}
