// Integration tests for friend commands

use clubnet_core::model::{EdgeDirection, NewUser};
use clubnet_core::{ExErrorKind, Session};
use clubnet_core_types::Sensitive;
use clubnet_engine::commands::{accounts, social};
use clubnet_store::Repository;

fn setup_test_repo() -> Repository {
    Repository::open_in_memory().expect("Failed to open in-memory repository")
}

fn signed_in(repo: &Repository, name: &str) -> Session {
    let email = format!("{}@example.com", name.to_lowercase());
    accounts::register(repo, &NewUser::new(name, email.as_str(), "pw")).unwrap();
    accounts::login(repo, &email, &Sensitive::from("pw")).unwrap()
}

#[test]
fn test_request_accept_makes_friends() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");

    social::send_friend_request(&repo, &ana, bo.user_id()).unwrap();
    let pending = social::pending_requests(&repo, &bo).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].counterpart_name, "Ana");

    social::accept_friend_request(&repo, &bo, ana.user_id()).unwrap();
    assert!(social::is_friend(&repo, &ana, bo.user_id()).unwrap());
    assert!(social::is_friend(&repo, &bo, ana.user_id()).unwrap());

    let friends = social::friends(&repo, &bo).unwrap();
    assert_eq!(friends.len(), 1);
    assert_eq!(friends[0].direction, EdgeDirection::Incoming);
}

#[test]
fn test_accept_missing_request_not_found() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");

    let err = social::accept_friend_request(&repo, &bo, ana.user_id()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    let err = social::reject_friend_request(&repo, &bo, ana.user_id()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_request_to_unknown_user_not_found() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let err = social::send_friend_request(&repo, &ana, 999).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_reject_then_block() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");

    social::send_friend_request(&repo, &ana, bo.user_id()).unwrap();
    social::reject_friend_request(&repo, &bo, ana.user_id()).unwrap();
    assert!(social::pending_requests(&repo, &bo).unwrap().is_empty());

    social::block_user(&repo, &bo, ana.user_id()).unwrap();
    assert!(!social::is_friend(&repo, &ana, bo.user_id()).unwrap());
    assert_eq!(
        social::block_user(&repo, &bo, bo.user_id()).unwrap_err().kind(),
        ExErrorKind::InvalidInput
    );
}
