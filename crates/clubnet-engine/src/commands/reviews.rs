//! Review commands

use clubnet_core::errors::Result;
use clubnet_core::model::{ClubId, MediaType, NewReview, ReviewId, ReviewWithAuthor};
use clubnet_core::Session;
use clubnet_store::Repository;

use super::{not_found, require_self, run_logged};

/// Review a club as the logged-in user
///
/// With `media_type` given and a media URL on the review, the review and a
/// matching media row are stored together or not at all.
///
/// ## Errors
///
/// - `Forbidden`: `review.user_id` is not the session's user
/// - `NotFound`: the club does not exist
/// - `ConstraintViolation`: rating outside 1..=5
pub fn add_review(
    repo: &mut Repository,
    session: &Session,
    review: &NewReview,
    media_type: Option<MediaType>,
) -> Result<ReviewId> {
    run_logged("add_review", Some(session.user_id()), || {
        require_self(session, review.user_id, "review")?;
        if repo.get_club(review.club_id)?.is_none() {
            return Err(not_found("club", review.club_id));
        }
        match media_type {
            Some(_) => repo.add_review_with_media(review, media_type),
            None => repo.add_review(review),
        }
    })
}

/// Reviews of a club, newest first
pub fn club_reviews(repo: &Repository, club_id: ClubId) -> Result<Vec<ReviewWithAuthor>> {
    run_logged("club_reviews", None, || {
        if repo.get_club(club_id)?.is_none() {
            return Err(not_found("club", club_id));
        }
        repo.reviews_for_club(club_id)
    })
}

/// Mean rating of a club, 0.0 before its first review
pub fn club_rating(repo: &Repository, club_id: ClubId) -> Result<f64> {
    run_logged("club_rating", None, || repo.club_average_rating(club_id))
}
