//! Directory search
//!
//! Case-insensitive substring matching over every text field a user can see
//! on a cafe card. Results keep directory order.

use crate::models::Cafe;

const PET_FRIENDLY_PHRASE: &str = "pet friendly";

/// Does any searchable field of `cafe` contain `query`?
///
/// An empty query matches everything.
pub fn matches(cafe: &Cafe, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    hit(&cafe.name)
        || hit(&cafe.address)
        || cafe.features.iter().any(|f| hit(f))
        || (cafe.pet_friendly && PET_FRIENDLY_PHRASE.contains(needle.as_str()))
        || cafe.hours.iter().any(|(day, hours)| hit(day) || hit(hours))
        || cafe.reviews.iter().any(|r| hit(&r.review) || hit(&r.tips))
}

/// Cafes matching `query`, in their original order
pub fn filter<'a, I>(cafes: I, query: &str) -> Vec<&'a Cafe>
where
    I: IntoIterator<Item = &'a Cafe>,
{
    cafes.into_iter().filter(|c| matches(c, query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CafeId, NewCafe, OpeningHours, Review, ReviewDraft, Submission,
    };
    use chrono::{TimeZone, Utc, Weekday};

    fn cafe(id: u64, name: &str, features: &[&str], pet_friendly: bool) -> Cafe {
        let mut listing = NewCafe::new(
            name,
            "1 Campus Rd",
            features.iter().map(|f| f.to_string()).collect(),
        )
        .pet_friendly(pet_friendly);
        listing.hours = Some(OpeningHours::uniform("7am - 10pm"));
        Cafe::new(CafeId(id), listing)
    }

    #[test]
    fn test_pet_and_quiet_queries() {
        let cafes = vec![
            cafe(1, "The Study Brew", &["Quiet Zone"], false),
            cafe(2, "Pet Place", &[], true),
        ];

        let pet: Vec<_> = filter(&cafes, "pet").iter().map(|c| c.id).collect();
        assert_eq!(pet, vec![CafeId(2)]);

        let quiet: Vec<_> = filter(&cafes, "quiet").iter().map(|c| c.id).collect();
        assert_eq!(quiet, vec![CafeId(1)]);
    }

    #[test]
    fn test_pet_phrase_only_when_pet_friendly() {
        let dogs = cafe(1, "Bark & Brew", &[], true);
        let plain = cafe(2, "Bean Counter", &[], false);
        assert!(matches(&dogs, "friendly"));
        assert!(matches(&dogs, "PET FRIENDLY"));
        assert!(!matches(&plain, "friendly"));
        // The phrase must contain the query, not the other way round
        assert!(!matches(&dogs, "pet friendly cafe"));
    }

    #[test]
    fn test_case_insensitive_name_and_address() {
        let c = cafe(1, "Focus & Grind", &["Study Music"], false);
        assert!(matches(&c, "GRIND"));
        assert!(matches(&c, "campus"));
        assert!(matches(&c, "music"));
        assert!(!matches(&c, "karaoke"));
    }

    #[test]
    fn test_matches_hours() {
        let mut c = cafe(1, "Night Owl", &[], false);
        c.hours.set(Weekday::Sun, "Closed");
        assert!(matches(&c, "closed"));
        assert!(matches(&c, "sunday"));
        assert!(matches(&c, "10pm"));
    }

    #[test]
    fn test_matches_review_text_and_tips() {
        let mut c = cafe(1, "Corner Cup", &[], false);
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        c.reviews.push(Review::from_draft(
            ReviewDraft::new(Submission::Stars(4))
                .with_review("Lovely oat latte")
                .with_tips("Window booth is best"),
            at,
        ));
        assert!(matches(&c, "oat"));
        assert!(matches(&c, "booth"));
    }

    #[test]
    fn test_empty_query_keeps_order() {
        let cafes = vec![
            cafe(3, "C", &[], false),
            cafe(1, "A", &[], false),
            cafe(2, "B", &[], false),
        ];
        let ids: Vec<_> = filter(&cafes, "  ").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![CafeId(3), CafeId(1), CafeId(2)]);
    }
}
