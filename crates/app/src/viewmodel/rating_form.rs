//! Rating form view model
//!
//! One slider per category (1..=10, starting at 5), review and tips text, and
//! purpose tag checkboxes. Submission is disabled while the device is inside
//! the cooldown window for the cafe.

use std::collections::BTreeSet;

use cafe_core::{
    Category, Eligibility, Error, PurposeTag, Rating, ReviewDraft, SchemaVersion, Submission,
};

use super::cafes::format_date;

#[derive(Debug, Clone)]
pub struct RatingForm {
    schema: SchemaVersion,
    ratings: Rating,
    stars: Option<u8>,
    pub review: String,
    pub tips: String,
    tags: BTreeSet<PurposeTag>,
    eligibility: Eligibility,
}

impl RatingForm {
    pub fn new(schema: SchemaVersion, eligibility: Eligibility) -> Self {
        Self {
            schema,
            ratings: Rating::new(schema),
            stars: None,
            review: String::new(),
            tips: String::new(),
            tags: BTreeSet::new(),
            eligibility,
        }
    }

    /// Slider rows: category, current value
    pub fn sliders(&self) -> Vec<(Category, u8)> {
        self.ratings.iter().collect()
    }

    pub fn set_score(&mut self, category: Category, score: u8) -> Result<(), Error> {
        if !self.schema.contains(category) {
            return Err(Error::InvalidInput(format!(
                "{} is not rated in schema v{}",
                category.label(),
                u8::from(self.schema)
            )));
        }
        self.ratings.set(category, score)
    }

    /// Parse `category=value`, e.g. `wifiPower=8`
    pub fn set_score_str(&mut self, entry: &str) -> Result<(), Error> {
        let (key, value) = entry.split_once('=').ok_or_else(|| {
            Error::InvalidInput(format!("expected CATEGORY=VALUE, got '{entry}'"))
        })?;
        let category = Category::from_key(key.trim())
            .ok_or_else(|| Error::InvalidInput(format!("unknown category '{}'", key.trim())))?;
        let score = value
            .trim()
            .parse::<u8>()
            .map_err(|_| Error::InvalidInput(format!("'{}' is not a score", value.trim())))?;
        self.set_score(category, score)
    }

    /// Switch to the simple star rating
    pub fn set_stars(&mut self, stars: u8) {
        self.stars = Some(stars);
    }

    pub fn toggle_tag(&mut self, tag: PurposeTag) {
        if !self.tags.remove(&tag) {
            self.tags.insert(tag);
        }
    }

    pub fn toggle_tag_id(&mut self, id: &str) -> Result<(), Error> {
        let tag = PurposeTag::from_id(id.trim())
            .ok_or_else(|| Error::InvalidInput(format!("unknown tag '{}'", id.trim())))?;
        self.toggle_tag(tag);
        Ok(())
    }

    pub fn tags(&self) -> &BTreeSet<PurposeTag> {
        &self.tags
    }

    pub fn submit_enabled(&self) -> bool {
        self.eligibility.is_allowed()
    }

    /// Notice shown in place of the submit button when rating is blocked
    pub fn notice(&self) -> Option<String> {
        match self.eligibility {
            Eligibility::Allowed => None,
            Eligibility::Denied { next_eligible, .. } => Some(format!(
                "You've already rated this cafe. You can rate it again on {}.",
                format_date(next_eligible)
            )),
        }
    }

    pub fn into_draft(self) -> ReviewDraft {
        let submission = match self.stars {
            Some(stars) => Submission::Stars(stars),
            None => Submission::Categories(self.ratings),
        };
        ReviewDraft {
            submission,
            review: self.review,
            tips: self.tips,
            tags: self.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_sliders_start_at_five() {
        let form = RatingForm::new(SchemaVersion::CURRENT, Eligibility::Allowed);
        let sliders = form.sliders();
        assert_eq!(sliders.len(), 14);
        assert!(sliders.iter().all(|(_, v)| *v == 5));
        assert_eq!(sliders[0].0, Category::Aesthetics);
    }

    #[test]
    fn test_set_score_str() {
        let mut form = RatingForm::new(SchemaVersion::CURRENT, Eligibility::Allowed);
        form.set_score_str("wifiPower=9").unwrap();
        assert!(form.set_score_str("wifiPower=11").is_err());
        assert!(form.set_score_str("parking=3").is_err());
        assert!(form.set_score_str("vibes").is_err());

        match form.into_draft().submission {
            Submission::Categories(rating) => assert_eq!(rating.get(Category::WifiPower), Some(9)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_old_schema_rejects_new_category() {
        let mut form = RatingForm::new(SchemaVersion::V1, Eligibility::Allowed);
        assert_eq!(form.sliders().len(), 4);
        assert!(form.set_score(Category::Bathroom, 7).is_err());
    }

    #[test]
    fn test_toggle_tags() {
        let mut form = RatingForm::new(SchemaVersion::CURRENT, Eligibility::Allowed);
        form.toggle_tag_id("solo-study").unwrap();
        form.toggle_tag_id("networking").unwrap();
        form.toggle_tag_id("solo-study").unwrap();
        assert_eq!(form.tags().len(), 1);
        assert!(form.tags().contains(&PurposeTag::Networking));
        assert!(form.toggle_tag_id("karaoke").is_err());
    }

    #[test]
    fn test_denied_form_is_disabled() {
        let last = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let form = RatingForm::new(
            SchemaVersion::CURRENT,
            Eligibility::Denied {
                last_submission: last,
                next_eligible: last + chrono::Duration::days(7),
            },
        );
        assert!(!form.submit_enabled());
        assert!(form.notice().unwrap().contains("2024-05-08"));
    }

    #[test]
    fn test_stars_mode() {
        let mut form = RatingForm::new(SchemaVersion::CURRENT, Eligibility::Allowed);
        form.set_stars(4);
        form.review = "Nice".into();
        let draft = form.into_draft();
        assert_eq!(draft.submission, Submission::Stars(4));
        assert_eq!(draft.review, "Nice");
    }
}
