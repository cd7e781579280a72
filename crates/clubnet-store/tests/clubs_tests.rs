// Integration tests for clubs: aggregates, search, proximity and cascades

use chrono::{NaiveDate, NaiveTime};
use clubnet_core::model::{NewClub, NewEvent, NewReview, NewUser};
use clubnet_store::Repository;

fn setup_test_repo() -> (Repository, i64) {
    let repo = Repository::open_in_memory().expect("Failed to open in-memory repository");
    let owner = repo
        .create_user(&NewUser::new("Owner", "owner@example.com", "pw"))
        .unwrap();
    (repo, owner)
}

fn club_at(repo: &Repository, owner: i64, name: &str, lat: f64, long: f64) -> i64 {
    repo.create_club(&NewClub::new(name, "running", lat, long, owner))
        .unwrap()
}

#[test]
fn test_club_without_reviews_has_zero_aggregates() {
    let (repo, owner) = setup_test_repo();
    let id = repo
        .create_club(
            &NewClub::new("Harbour Runners", "running", 53.34, -6.26, owner)
                .with_description("Tuesday intervals"),
        )
        .unwrap();

    let clubs = repo.list_clubs().unwrap();
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].id, id);
    assert_eq!(clubs[0].member_count, 0);
    assert_eq!(clubs[0].rating, 0.0);
    assert_eq!(clubs[0].description.as_deref(), Some("Tuesday intervals"));
    assert_eq!(repo.club_average_rating(id).unwrap(), 0.0);
}

#[test]
fn test_aggregates_count_distinct_reviewers() {
    let (repo, owner) = setup_test_repo();
    let club = club_at(&repo, owner, "Harbour Runners", 53.34, -6.26);
    let ana = repo
        .create_user(&NewUser::new("Ana", "ana@example.com", "pw"))
        .unwrap();

    repo.add_review(&NewReview::new(club, ana, 4)).unwrap();
    repo.add_review(&NewReview::new(club, ana, 2)).unwrap();
    repo.add_review(&NewReview::new(club, owner, 3)).unwrap();

    let club = repo.get_club(club).unwrap().unwrap();
    assert_eq!(club.member_count, 2);
    assert!((club.rating - 3.0).abs() < f64::EPSILON);
    assert!((repo.club_average_rating(club.id).unwrap() - 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_list_clubs_ordered_by_id() {
    let (repo, owner) = setup_test_repo();
    let a = club_at(&repo, owner, "Zeta", 1.0, 1.0);
    let b = club_at(&repo, owner, "Alpha", 2.0, 2.0);
    let ids: Vec<_> = repo.list_clubs().unwrap().into_iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![a, b]);
}

#[test]
fn test_search_by_name_or_sport_case_insensitive() {
    let (repo, owner) = setup_test_repo();
    let tennis = repo
        .create_club(&NewClub::new("Riverside", "Tennis", 1.0, 1.0, owner))
        .unwrap();
    let named = repo
        .create_club(&NewClub::new("Tennis Friends", "padel", 1.0, 1.0, owner))
        .unwrap();
    repo.create_club(&NewClub::new("Harbour", "rowing", 1.0, 1.0, owner))
        .unwrap();

    let ids: Vec<_> = repo
        .search_clubs("tennis")
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![tennis, named]);
}

#[test]
fn test_search_wildcards_are_literal() {
    let (repo, owner) = setup_test_repo();
    let percent = club_at(&repo, owner, "100% Effort", 1.0, 1.0);
    club_at(&repo, owner, "Full Effort", 1.0, 1.0);

    let found = repo.search_clubs("0%").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, percent);
    assert!(repo.search_clubs("_").unwrap().is_empty());
}

#[test]
fn test_search_folds_ascii_case_only() {
    let (repo, owner) = setup_test_repo();
    let id = club_at(&repo, owner, "Öland Orienteering", 56.7, 16.6);

    let found = |text: &str| -> Vec<i64> {
        repo.search_clubs(text)
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect()
    };
    assert_eq!(found("ORIENTEERING"), vec![id]);
    assert_eq!(found("Öland"), vec![id]);
    // LIKE folds ASCII letters only
    assert!(found("öland").is_empty());
}

#[test]
fn test_clubs_near_uses_bounding_box() {
    let (repo, owner) = setup_test_repo();
    // Box half-width for 10 km at the equator: 10 / 111 = 0.0901 degrees
    let close = club_at(&repo, owner, "Close", 0.05, 0.05); // ~7.9 km
    let east_edge = club_at(&repo, owner, "East", 0.0, 0.085); // ~9.4 km
    let corner = club_at(&repo, owner, "Corner", 0.085, -0.085); // ~13.3 km, still in box
    club_at(&repo, owner, "North", 0.1, 0.0); // ~11.1 km
    club_at(&repo, owner, "West", 0.0, -0.2); // ~22.2 km
    club_at(&repo, owner, "Far", 53.34, -6.26);

    let ids: Vec<_> = repo
        .clubs_near(0.0, 0.0, 10.0)
        .unwrap()
        .into_iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![close, east_edge, corner]);
}

#[test]
fn test_clubs_near_zero_radius_matches_exact_point() {
    let (repo, owner) = setup_test_repo();
    let here = club_at(&repo, owner, "Here", 10.0, 20.0);
    club_at(&repo, owner, "There", 10.001, 20.0);

    let found = repo.clubs_near(10.0, 20.0, 0.0).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, here);
}

#[test]
fn test_clubs_by_sport_is_exact() {
    let (repo, owner) = setup_test_repo();
    let run = club_at(&repo, owner, "Runners", 1.0, 1.0);
    repo.create_club(&NewClub::new("Trail", "trail running", 1.0, 1.0, owner))
        .unwrap();

    let clubs = repo.clubs_by_sport("running").unwrap();
    assert_eq!(clubs.len(), 1);
    assert_eq!(clubs[0].id, run);
}

#[test]
fn test_delete_club_cascades_to_events_and_reviews() {
    let (repo, owner) = setup_test_repo();
    let club = club_at(&repo, owner, "Harbour Runners", 53.34, -6.26);
    let event = repo
        .create_event(&NewEvent {
            club_id: club,
            host_id: owner,
            title: "Sunday long run".into(),
            description: None,
            date: NaiveDate::from_ymd_opt(2030, 1, 6).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            latitude: 53.34,
            longitude: -6.26,
            max_participants: 12,
        })
        .unwrap();
    repo.add_review(&NewReview::new(club, owner, 5)).unwrap();

    assert!(repo.delete_club(club).unwrap());
    assert!(repo.get_club(club).unwrap().is_none());
    assert!(repo.get_event(event).unwrap().is_none());
    assert!(repo.reviews_for_club(club).unwrap().is_empty());
}

#[test]
fn test_deleting_owner_keeps_club_without_owner() {
    let (repo, owner) = setup_test_repo();
    let club = club_at(&repo, owner, "Harbour Runners", 53.34, -6.26);

    assert!(repo.delete_user(owner).unwrap());
    let club = repo.get_club(club).unwrap().unwrap();
    assert_eq!(club.owner_id, None);
}
