mod common;

use std::collections::HashSet;

use anyhow::Result;
use common::{balances, demo_service, names};
use evenly::application::AppError;
use evenly::domain::{
    FriendId, Ledger, Payer, SelectionEvent, SortCriterion, SplitBill, demo_friends, sorted_view,
};
use uuid::Uuid;

#[test]
fn test_added_friends_have_unique_ids_and_zero_balance() -> Result<()> {
    let mut service = demo_service();

    for name in ["Priya", "Priya", "Arjun", "Meera"] {
        let friend = service.add_friend(name, None)?;
        assert_eq!(friend.balance, 0);
    }

    let ids: HashSet<FriendId> = service.friends().iter().map(|f| f.id).collect();
    assert_eq!(ids.len(), 7);
    assert_eq!(
        names(service.friends()),
        vec!["Ravi", "Rahul", "Durgesh", "Priya", "Priya", "Arjun", "Meera"]
    );

    Ok(())
}

#[test]
fn test_split_changes_exactly_the_selected_friend() -> Result<()> {
    let mut service = demo_service();
    let before = service.friends().to_vec();

    service.select_friend("Durgesh")?;
    let result = service.split_bill(Some(100), Some(40), Payer::User)?;
    assert_eq!(result.settlement.delta, 60);

    for (old, new) in before.iter().zip(service.friends()) {
        if old.name == "Durgesh" {
            assert_eq!(new.balance, old.balance + 60);
            assert_eq!(new.id, old.id);
        } else {
            assert_eq!(old, new);
        }
    }

    Ok(())
}

#[test]
fn test_friend_paying_lowers_balance() -> Result<()> {
    let mut service = demo_service();

    service.select_friend("Rahul")?;
    let result = service.split_bill(Some(100), Some(40), Payer::Friend)?;

    assert_eq!(result.settlement.previous_balance, 20);
    assert_eq!(result.settlement.delta, -40);
    assert_eq!(result.friend.balance, -20);

    Ok(())
}

#[test]
fn test_select_twice_clears_selection() -> Result<()> {
    let mut service = demo_service();

    let first = service.select_friend("Ravi")?;
    let second = service.select_friend("Ravi")?;

    assert!(matches!(first, SelectionEvent::Selected(_)));
    assert!(matches!(second, SelectionEvent::Cleared(_)));
    assert!(service.current_selection().is_none());

    Ok(())
}

#[test]
fn test_successful_split_clears_selection() -> Result<()> {
    let mut service = demo_service();

    service.select_friend("Ravi")?;
    service.split_bill(Some(30), Some(10), Payer::Friend)?;
    assert!(service.current_selection().is_none());

    // A second split needs a new selection
    assert_eq!(
        service.split_bill(Some(30), Some(10), Payer::Friend).unwrap_err(),
        AppError::NoSelection
    );

    Ok(())
}

#[test]
fn test_zero_bill_changes_nothing() -> Result<()> {
    let mut service = demo_service();
    service.select_friend("Ravi")?;
    let before = service.friends().to_vec();

    let result = service.split_bill(Some(0), Some(0), Payer::User);

    assert!(matches!(result, Err(AppError::IncompleteBill(_))));
    assert_eq!(service.friends(), before.as_slice());
    assert_eq!(
        service.current_selection().map(|f| f.name.as_str()),
        Some("Ravi")
    );

    Ok(())
}

#[test]
fn test_ledger_guards_are_silent() {
    let mut ledger = Ledger::with_friends(demo_friends());
    let before = ledger.friends().to_vec();

    let stranger = Uuid::new_v4();
    assert_eq!(ledger.select_friend(stranger), SelectionEvent::Ignored(stranger));
    assert!(ledger.split_bill(stranger, 10).is_none());
    assert!(ledger.add_friend("", "img").is_none());

    let ravi = ledger.friends()[0].id;
    ledger.select_friend(ravi);
    assert!(ledger.settle(ravi, &SplitBill::new().with_bill(0)).is_none());

    assert_eq!(ledger.friends(), before.as_slice());
    assert_eq!(ledger.current_selection().map(|f| f.id), Some(ravi));
}

#[test]
fn test_delta_examples() {
    let form = SplitBill::new().with_bill(100).with_paid_by_user(40);
    assert_eq!(form.with_payer(Payer::User).delta(), Some(60));
    assert_eq!(form.with_payer(Payer::Friend).delta(), Some(-40));
}

#[test]
fn test_sorted_views_over_demo_roster() {
    let friends = demo_friends();

    assert_eq!(
        names(sorted_view(&friends, SortCriterion::Alphabetical)),
        vec!["Durgesh", "Rahul", "Ravi"]
    );
    assert_eq!(
        balances(sorted_view(&friends, SortCriterion::YouHaveToPay)),
        vec![
            ("Ravi".to_string(), -7),
            ("Durgesh".to_string(), 0),
            ("Rahul".to_string(), 20)
        ]
    );
    assert_eq!(
        names(sorted_view(&friends, SortCriterion::TheyHaveToPay)),
        vec!["Rahul", "Durgesh", "Ravi"]
    );
    assert_eq!(
        names(sorted_view(&friends, SortCriterion::ZeroAndYouHaveToPay)),
        vec!["Durgesh", "Ravi", "Rahul"]
    );

    // Insertion order is untouched by any view
    assert_eq!(names(&friends), vec!["Ravi", "Rahul", "Durgesh"]);
}

#[test]
fn test_sorted_view_follows_balance_changes() -> Result<()> {
    let mut service = demo_service();

    service.select_friend("Durgesh")?;
    service.split_bill(Some(200), Some(50), Payer::Friend)?;

    assert_eq!(
        balances(service.sorted_friends(SortCriterion::YouHaveToPay)),
        vec![
            ("Durgesh".to_string(), -50),
            ("Ravi".to_string(), -7),
            ("Rahul".to_string(), 20)
        ]
    );

    Ok(())
}

#[test]
fn test_settled_friends_list_before_owing_ones() -> Result<()> {
    let mut service = demo_service();
    service.add_friend("Priya", None)?;

    // Rahul joins Ravi below zero; Durgesh and Priya stay settled
    service.select_friend("Rahul")?;
    service.split_bill(Some(100), Some(40), Payer::Friend)?;

    let view = service.sorted_friends(SortCriterion::ZeroAndYouHaveToPay);
    assert_eq!(names(view.iter().copied()), vec!["Durgesh", "Priya", "Ravi", "Rahul"]);

    let last_settled = view.iter().rposition(|f| f.balance == 0);
    let first_owed = view.iter().position(|f| f.balance < 0);
    assert!(last_settled < first_owed);

    Ok(())
}
