//! Cafe card and detail view models

use cafe_core::{Cafe, CafeId, Review, Submission};
use chrono::{DateTime, Utc};

/// What a cafe card shows in the directory grid
#[derive(Debug, Clone, PartialEq)]
pub struct CafeCard {
    pub id: CafeId,
    pub name: String,
    pub address: String,
    pub rating_label: String,
    pub features: Vec<String>,
    pub pet_friendly: bool,
    pub review_count: usize,
}

impl CafeCard {
    pub fn from_cafe(cafe: &Cafe) -> Self {
        Self {
            id: cafe.id,
            name: cafe.name.clone(),
            address: cafe.address.clone(),
            rating_label: format!("{:.1}", cafe.rating),
            features: cafe.features.clone(),
            pet_friendly: cafe.pet_friendly,
            review_count: cafe.reviews.len(),
        }
    }

    /// One line per card for list views
    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "[{}] {}  ★ {}  ({} reviews)  {}",
            self.id, self.name, self.rating_label, self.review_count, self.address
        );
        if !self.features.is_empty() {
            line.push_str(&format!("  | {}", self.features.join(", ")));
        }
        if self.pet_friendly {
            line.push_str("  | Pet Friendly");
        }
        line
    }
}

/// Render a list of cafes, or a hint when there are none
pub fn render_list(cafes: &[Cafe]) -> String {
    if cafes.is_empty() {
        return "No cafes found.".to_string();
    }
    cafes
        .iter()
        .map(|c| CafeCard::from_cafe(c).summary_line())
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn review_lines(review: &Review) -> Vec<String> {
    let date = review
        .created_at()
        .map(format_date)
        .unwrap_or_else(|| "unknown date".to_string());

    let mut lines = match &review.submission {
        Submission::Stars(stars) => vec![format!("  - {date}: {stars}/5 stars")],
        Submission::Categories(rating) => {
            let average = cafe_core::aggregator::category_average(rating)
                .map(|a| format!("{a:.1}"))
                .unwrap_or_else(|_| "-".to_string());
            let breakdown: Vec<String> = rating
                .iter()
                .map(|(category, score)| format!("{} {}", category.label(), score))
                .collect();
            vec![
                format!("  - {date}: {average}/10 average"),
                format!("      {}", breakdown.join(", ")),
            ]
        }
    };
    if !review.tags.is_empty() {
        let tags: Vec<&str> = review.tags.iter().map(|t| t.label()).collect();
        lines.push(format!("      Good for: {}", tags.join(", ")));
    }
    if !review.review.trim().is_empty() {
        lines.push(format!("      \"{}\"", review.review.trim()));
    }
    if !review.tips.trim().is_empty() {
        lines.push(format!("      Tip: {}", review.tips.trim()));
    }
    lines
}

/// Full cafe view: header, hours, and review history
pub fn render_detail(cafe: &Cafe) -> String {
    let card = CafeCard::from_cafe(cafe);
    let mut lines = vec![
        format!("{} (#{})", card.name, card.id),
        card.address.clone(),
        format!(
            "Rating {} from {} ratings",
            card.rating_label, cafe.rating_count
        ),
    ];
    if !card.features.is_empty() {
        lines.push(format!("Features: {}", card.features.join(", ")));
    }
    if card.pet_friendly {
        lines.push("Pet Friendly".to_string());
    }
    lines.push("Hours:".to_string());
    lines.extend(
        cafe.hours
            .iter()
            .map(|(day, hours)| format!("  {day:<10} {hours}")),
    );

    if cafe.reviews.is_empty() {
        lines.push("No reviews yet.".to_string());
    } else {
        lines.push("Reviews:".to_string());
        lines.extend(cafe.reviews.iter().flat_map(review_lines));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe_core::{NewCafe, PurposeTag, ReviewDraft};
    use chrono::TimeZone;

    fn make_cafe() -> Cafe {
        Cafe::new(
            CafeId(2),
            NewCafe::new(
                "Creative Corner Café",
                "456 Innovation St",
                vec!["Group Space".into(), "Late Hours".into()],
            )
            .pet_friendly(true),
        )
        .with_seed_rating(4.6)
    }

    #[test]
    fn test_card_summary() {
        let line = CafeCard::from_cafe(&make_cafe()).summary_line();
        assert!(line.starts_with("[2] Creative Corner Café"));
        assert!(line.contains("★ 4.6"));
        assert!(line.contains("Group Space, Late Hours"));
        assert!(line.contains("Pet Friendly"));
    }

    #[test]
    fn test_rating_label_has_one_decimal() {
        let mut cafe = make_cafe();
        cafe.rating = 7.0;
        assert_eq!(CafeCard::from_cafe(&cafe).rating_label, "7.0");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(render_list(&[]), "No cafes found.");
    }

    #[test]
    fn test_detail_includes_reviews() {
        let mut cafe = make_cafe();
        let at = Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap();
        cafe.reviews.push(Review::from_draft(
            ReviewDraft::new(Submission::Stars(4))
                .with_review("Cozy")
                .with_tips("Upstairs is quieter")
                .with_tag(PurposeTag::GroupMeetups),
            at,
        ));
        let detail = render_detail(&cafe);
        assert!(detail.contains("2024-03-02: 4/5 stars"));
        assert!(detail.contains("Good for: Group Meetups"));
        assert!(detail.contains("Tip: Upstairs is quieter"));
        assert!(detail.contains("Sunday"));
    }
}
