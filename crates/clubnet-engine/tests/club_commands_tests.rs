// Integration tests for club, event, review and media commands

use chrono::{NaiveDate, NaiveTime};
use clubnet_core::model::{
    AttendanceStatus, MediaType, NewClub, NewEvent, NewMedia, NewReview, NewUser,
};
use clubnet_core::{ExErrorKind, Session};
use clubnet_core_types::Sensitive;
use clubnet_engine::commands::{accounts, clubs, events, media, reviews};
use clubnet_store::Repository;

fn setup_test_repo() -> Repository {
    Repository::open_in_memory().expect("Failed to open in-memory repository")
}

fn signed_in(repo: &Repository, name: &str) -> Session {
    let email = format!("{}@example.com", name.to_lowercase());
    accounts::register(repo, &NewUser::new(name, email.as_str(), "pw")).unwrap();
    accounts::login(repo, &email, &Sensitive::from("pw")).unwrap()
}

fn new_event(club_id: i64, host_id: i64) -> NewEvent {
    NewEvent {
        club_id,
        host_id,
        title: "Hill repeats".into(),
        description: None,
        date: NaiveDate::from_ymd_opt(2031, 4, 2).unwrap(),
        time: NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        latitude: 51.9,
        longitude: -8.47,
        max_participants: 15,
    }
}

#[test]
fn test_create_club_for_another_user_forbidden() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");

    let err = clubs::create_club(
        &repo,
        &ana,
        &NewClub::new("Rebels", "hurling", 51.9, -8.47, bo.user_id()),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
    assert!(clubs::list_clubs(&repo).unwrap().is_empty());
}

#[test]
fn test_show_missing_club_is_not_found() {
    let repo = setup_test_repo();
    let err = clubs::show_club(&repo, 404).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.entity_id(), Some("404"));
}

#[test]
fn test_only_owner_deletes_club() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");
    let club = clubs::create_club(
        &repo,
        &ana,
        &NewClub::new("Rebels", "hurling", 51.9, -8.47, ana.user_id()),
    )
    .unwrap();

    let err = clubs::delete_club(&repo, &bo, club).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    clubs::delete_club(&repo, &ana, club).unwrap();
    assert_eq!(
        clubs::show_club(&repo, club).unwrap_err().kind(),
        ExErrorKind::NotFound
    );
}

#[test]
fn test_event_flow() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");
    let club = clubs::create_club(
        &repo,
        &ana,
        &NewClub::new("Rebels", "hurling", 51.9, -8.47, ana.user_id()),
    )
    .unwrap();

    // Hosting on someone else's behalf is refused
    let err = events::create_event(&repo, &bo, &new_event(club, ana.user_id())).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let event = events::create_event(&repo, &ana, &new_event(club, ana.user_id())).unwrap();
    let attendance = events::join_event(&repo, &bo, event, AttendanceStatus::Interested).unwrap();
    assert_eq!(attendance.user_id, bo.user_id());
    assert_eq!(attendance.status, AttendanceStatus::Interested);

    let upcoming =
        events::upcoming_events(&repo, NaiveDate::from_ymd_opt(2031, 1, 1)).unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].current_participants, 1);
    assert_eq!(events::my_events(&repo, &bo).unwrap().len(), 1);
    assert_eq!(events::club_events(&repo, club).unwrap().len(), 1);
    assert_eq!(events::event_attendance(&repo, event).unwrap().len(), 1);

    assert!(events::leave_event(&repo, &bo, event).unwrap());
    assert!(!events::leave_event(&repo, &bo, event).unwrap());

    assert_eq!(
        events::cancel_event(&repo, &bo, event).unwrap_err().kind(),
        ExErrorKind::Forbidden
    );
    events::cancel_event(&repo, &ana, event).unwrap();
    assert_eq!(
        events::show_event(&repo, event).unwrap_err().kind(),
        ExErrorKind::NotFound
    );
}

#[test]
fn test_event_for_missing_club_not_found() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let err = events::create_event(&repo, &ana, &new_event(77, ana.user_id())).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(
        events::join_event(&repo, &ana, 77, AttendanceStatus::Joined)
            .unwrap_err()
            .kind(),
        ExErrorKind::NotFound
    );
}

#[test]
fn test_review_commands() {
    let mut repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let club = clubs::create_club(
        &repo,
        &ana,
        &NewClub::new("Rebels", "hurling", 51.9, -8.47, ana.user_id()),
    )
    .unwrap();

    let err = reviews::add_review(&mut repo, &ana, &NewReview::new(club, ana.user_id(), 6), None)
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);

    reviews::add_review(
        &mut repo,
        &ana,
        &NewReview::new(club, ana.user_id(), 4).with_media_url("/m/pitch.jpg"),
        Some(MediaType::Photo),
    )
    .unwrap();

    let listed = reviews::club_reviews(&repo, club).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].author_name, "Ana");
    assert_eq!(reviews::club_rating(&repo, club).unwrap(), 4.0);
    assert_eq!(media::my_media(&repo, &ana).unwrap().len(), 1);

    let err = reviews::club_reviews(&repo, club + 1).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_media_ownership() {
    let repo = setup_test_repo();
    let ana = signed_in(&repo, "Ana");
    let bo = signed_in(&repo, "Bo");

    let err = media::save_media(&repo, &ana, &NewMedia::new(bo.user_id(), MediaType::Photo, "/m/x.jpg"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let err = media::save_media(
        &repo,
        &ana,
        &NewMedia::new(ana.user_id(), MediaType::Photo, "/m/x.jpg").for_event(5),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);

    let id = media::save_media(&repo, &ana, &NewMedia::new(ana.user_id(), MediaType::Audio, "/m/a.m4a"))
        .unwrap();
    assert_eq!(media::media_by_type(&repo, MediaType::Audio).unwrap().len(), 1);
    assert_eq!(
        media::delete_media(&repo, &bo, id).unwrap_err().kind(),
        ExErrorKind::Forbidden
    );
    media::delete_media(&repo, &ana, id).unwrap();
    assert_eq!(
        media::delete_media(&repo, &ana, id).unwrap_err().kind(),
        ExErrorKind::NotFound
    );
}
