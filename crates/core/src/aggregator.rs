//! Rating aggregation
//!
//! Folds one submission at a time into a cafe's running mean. The update only
//! needs the previous `(mean, count)`, never the review history. Division is
//! done in full precision and the displayed rating is rounded once per update.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{
    check_category_score, Cafe, Rating, Review, ReviewDraft, Submission, MAX_STARS, MIN_STARS,
};

/// Round to one decimal place, halves away from zero
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean of every category score in a rating
pub fn category_average(rating: &Rating) -> Result<f64> {
    if rating.is_empty() {
        return Err(Error::InvalidInput(
            "A rating needs at least one category score".to_string(),
        ));
    }
    let mut total = 0u32;
    for (category, score) in rating.iter() {
        check_category_score(category, score)?;
        total += u32::from(score);
    }
    Ok(f64::from(total) / rating.len() as f64)
}

/// Collapse a submission to the scalar that gets averaged
pub fn submission_value(submission: &Submission) -> Result<f64> {
    match submission {
        Submission::Stars(stars) => {
            if !(MIN_STARS..=MAX_STARS).contains(stars) {
                return Err(Error::InvalidInput(format!(
                    "Star rating must be between {MIN_STARS} and {MAX_STARS}, got {stars}"
                )));
            }
            Ok(f64::from(*stars))
        }
        Submission::Categories(rating) => category_average(rating),
    }
}

/// Running mean of a cafe's rating
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingState {
    pub mean: f64,
    pub count: u32,
}

impl RatingState {
    pub const EMPTY: RatingState = RatingState {
        mean: 0.0,
        count: 0,
    };

    pub fn of(cafe: &Cafe) -> Self {
        Self {
            mean: cafe.rating_mean,
            count: cafe.rating_count,
        }
    }

    /// Fold one more value into the mean
    pub fn fold(self, value: f64) -> Self {
        let count = self.count + 1;
        let mean = (self.mean * f64::from(self.count) + value) / f64::from(count);
        Self { mean, count }
    }

    /// Batch mean over a full review history
    pub fn from_history(reviews: &[Review]) -> Result<Self> {
        if reviews.is_empty() {
            return Ok(Self::EMPTY);
        }
        let mut total = 0.0;
        for review in reviews {
            total += submission_value(&review.submission)?;
        }
        Ok(Self {
            mean: total / reviews.len() as f64,
            count: reviews.len() as u32,
        })
    }

    /// Displayed rating
    pub fn rating(&self) -> f64 {
        round1(self.mean)
    }
}

/// Fold a review draft into a cafe, returning the updated cafe
///
/// The input cafe is left untouched; on error nothing changes.
pub fn fold_submission(cafe: &Cafe, draft: ReviewDraft, now: DateTime<Utc>) -> Result<Cafe> {
    let value = submission_value(&draft.submission)?;
    let state = RatingState::of(cafe).fold(value);

    let mut updated = cafe.clone();
    updated.rating_mean = state.mean;
    updated.rating_count = state.count;
    updated.rating = state.rating();
    updated.reviews.push(Review::from_draft(draft, now));

    debug!(
        cafe_id = %cafe.id,
        value,
        rating = updated.rating,
        rating_count = updated.rating_count,
        "Folded rating submission"
    );

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CafeId, Category, NewCafe, SchemaVersion};
    use chrono::TimeZone;

    fn make_cafe() -> Cafe {
        Cafe::new(
            CafeId(1),
            NewCafe::new("The Study Brew", "123 College Ave", vec!["Quiet Zone".into()]),
        )
    }

    fn uniform(score: u8) -> Rating {
        Rating::from_scores(
            SchemaVersion::CURRENT
                .categories()
                .into_iter()
                .map(|c| (c, score)),
        )
        .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(7.04), 7.0);
        assert_eq!(round1(7.06), 7.1);
        assert_eq!(round1(4.25), 4.3);
        assert_eq!(round1(0.0), 0.0);
    }

    #[test]
    fn test_category_average() {
        let mut rating = Rating::new(SchemaVersion::V1);
        rating.set(Category::Ambience, 10).unwrap();
        rating.set(Category::Vibes, 8).unwrap();
        rating.set(Category::LightStudy, 6).unwrap();
        rating.set(Category::FocusedStudy, 4).unwrap();
        assert_eq!(category_average(&rating).unwrap(), 7.0);
    }

    #[test]
    fn test_empty_rating_is_invalid() {
        assert!(matches!(
            category_average(&Rating::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_out_of_range_category_is_invalid() {
        let rating: Rating = serde_json::from_str(r#"{"vibes": 11, "ambience": 5}"#).unwrap();
        let err = fold_submission(
            &make_cafe(),
            ReviewDraft::new(Submission::Categories(rating)),
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_stars_out_of_range() {
        for stars in [0, 6] {
            assert!(matches!(
                submission_value(&Submission::Stars(stars)),
                Err(Error::InvalidInput(_))
            ));
        }
        assert_eq!(submission_value(&Submission::Stars(5)).unwrap(), 5.0);
    }

    #[test]
    fn test_first_submission_sets_mean_exactly() {
        let cafe = make_cafe().with_seed_rating(4.8);
        let updated = fold_submission(
            &cafe,
            ReviewDraft::new(Submission::Categories(uniform(9))),
            now(),
        )
        .unwrap();
        assert_eq!(updated.rating, 9.0);
        assert_eq!(updated.rating_count, 1);
        assert_eq!(updated.reviews.len(), 1);
        assert_eq!(updated.reviews[0].timestamp, now().timestamp_millis());
    }

    #[test]
    fn test_example_scenario() {
        let mut cafe = make_cafe();
        for (score, expected) in [(8, 8.0), (6, 7.0), (7, 7.0)] {
            cafe = fold_submission(
                &cafe,
                ReviewDraft::new(Submission::Categories(uniform(score))),
                now(),
            )
            .unwrap();
            assert_eq!(cafe.rating, expected);
        }
        assert_eq!(cafe.rating_count, 3);
        assert_eq!(cafe.reviews.len(), 3);
    }

    #[test]
    fn test_star_submissions() {
        let mut cafe = make_cafe();
        for stars in [5, 4, 4] {
            cafe = fold_submission(&cafe, ReviewDraft::new(Submission::Stars(stars)), now())
                .unwrap();
        }
        assert_eq!(cafe.rating, 4.3);
        assert_eq!(cafe.rating_count, 3);
    }

    #[test]
    fn test_rounding_does_not_compound() {
        // 105/14 = 7.5 and 99/14 = 7.0714.., the second would round to 7.1
        let categories = SchemaVersion::CURRENT.categories();
        let mut high = Rating::new(SchemaVersion::CURRENT);
        let mut low = Rating::new(SchemaVersion::CURRENT);
        for (i, category) in categories.into_iter().enumerate() {
            high.set(category, if i % 2 == 0 { 8 } else { 7 }).unwrap();
            low.set(category, if i == 0 { 8 } else { 7 }).unwrap();
        }
        let mut cafe = make_cafe();
        let mut values = Vec::new();
        for rating in [&high, &low, &high, &low, &high] {
            values.push(category_average(rating).unwrap());
            cafe = fold_submission(
                &cafe,
                ReviewDraft::new(Submission::Categories(rating.clone())),
                now(),
            )
            .unwrap();
        }
        assert_eq!(cafe.rating, 7.3);
        let batch = values.iter().sum::<f64>() / values.len() as f64;
        assert!((cafe.rating_mean - batch).abs() < 1e-9);
        assert_eq!(cafe.rating, round1(batch));
    }

    #[test]
    fn test_from_history_matches_incremental() {
        let mut cafe = make_cafe();
        for score in [3, 9, 10, 2] {
            cafe = fold_submission(
                &cafe,
                ReviewDraft::new(Submission::Categories(uniform(score))),
                now(),
            )
            .unwrap();
        }
        let batch = RatingState::from_history(&cafe.reviews).unwrap();
        assert_eq!(batch.count, cafe.rating_count);
        assert!((batch.mean - cafe.rating_mean).abs() < 1e-9);
        assert_eq!(batch.rating(), cafe.rating);
    }

    #[test]
    fn test_failed_fold_leaves_cafe_untouched() {
        let cafe = make_cafe();
        let before = cafe.clone();
        let _ = fold_submission(&cafe, ReviewDraft::new(Submission::Stars(9)), now());
        assert_eq!(cafe, before);
    }
}
