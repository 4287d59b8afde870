// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use evenly::application::LedgerService;
use evenly::cli::{Flow, Session, SessionConfig};
use evenly::domain::{Amount, Friend, Ledger, demo_friends};

/// Service seeded with Ravi (-7), Rahul (20) and Durgesh (0)
pub fn demo_service() -> LedgerService {
    LedgerService::new(Ledger::with_friends(demo_friends()))
}

/// Session seeded with the demo friends
pub fn demo_session() -> Session {
    Session::new(SessionConfig {
        demo: true,
        ..SessionConfig::default()
    })
}

/// Run one shell line and return what it printed
pub fn run(session: &mut Session, line: &str) -> Result<String> {
    let mut out = Vec::new();
    let flow = session.execute(line, &mut out)?;
    assert_eq!(flow, Flow::Continue, "'{}' should not end the session", line);
    Ok(String::from_utf8(out)?)
}

/// Names of friends in the given order
pub fn names<'a>(friends: impl IntoIterator<Item = &'a Friend>) -> Vec<String> {
    friends.into_iter().map(|f| f.name.clone()).collect()
}

/// Name/balance pairs in the given order
pub fn balances<'a>(friends: impl IntoIterator<Item = &'a Friend>) -> Vec<(String, Amount)> {
    friends
        .into_iter()
        .map(|f| (f.name.clone(), f.balance))
        .collect()
}
