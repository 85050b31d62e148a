//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use crate::aggregator::{round1, RatingState};
use crate::models::Cafe;

/// Validate that a cafe's rating fields agree with each other
pub fn assert_cafe_invariants(cafe: &Cafe) {
    debug_assert!(
        !cafe.name.trim().is_empty(),
        "Cafe {} has empty name",
        cafe.id
    );

    debug_assert!(
        cafe.rating_count as usize == cafe.reviews.len(),
        "Cafe {} has rating_count {} but {} reviews",
        cafe.id,
        cafe.rating_count,
        cafe.reviews.len()
    );

    debug_assert!(
        cafe.rating == round1(cafe.rating_mean),
        "Cafe {} displays {} but its mean rounds to {}",
        cafe.id,
        cafe.rating,
        round1(cafe.rating_mean)
    );

    debug_assert!(
        (0.0..=10.0).contains(&cafe.rating_mean),
        "Cafe {} mean {} is out of range",
        cafe.id,
        cafe.rating_mean
    );
}

/// Validate that the running mean matches a replay of the review history
pub fn assert_mean_matches_history(cafe: &Cafe) {
    if cafe.reviews.is_empty() {
        return;
    }
    if let Ok(batch) = RatingState::from_history(&cafe.reviews) {
        debug_assert!(
            (batch.mean - cafe.rating_mean).abs() < 1e-6,
            "Cafe {} running mean {} drifted from history mean {}",
            cafe.id,
            cafe.rating_mean,
            batch.mean
        );
    }
}
