//! Cafe model - a directory entry

use std::collections::BTreeMap;
use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::Review;
use crate::error::{Error, Result};

/// Image shown for cafes without an uploaded picture
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
/// Hours shown for each day until the cafe's real hours are known
pub const PLACEHOLDER_HOURS: &str = "Hours not listed";

/// Client-assigned, sequential cafe identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CafeId(pub u64);

impl fmt::Display for CafeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Opening hours, one display string per weekday
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct OpeningHours {
    days: [String; 7],
}

impl OpeningHours {
    /// The same hours every day
    pub fn uniform(hours: impl Into<String>) -> Self {
        let hours = hours.into();
        Self {
            days: std::array::from_fn(|_| hours.clone()),
        }
    }

    pub fn get(&self, day: Weekday) -> &str {
        &self.days[day.num_days_from_monday() as usize]
    }

    pub fn set(&mut self, day: Weekday, hours: impl Into<String>) {
        self.days[day.num_days_from_monday() as usize] = hours.into();
    }

    /// `(day name, hours)` pairs, Monday first
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        DAY_NAMES
            .iter()
            .copied()
            .zip(self.days.iter().map(String::as_str))
    }
}

impl Default for OpeningHours {
    fn default() -> Self {
        Self::uniform(PLACEHOLDER_HOURS)
    }
}

impl TryFrom<BTreeMap<String, String>> for OpeningHours {
    type Error = String;

    fn try_from(map: BTreeMap<String, String>) -> std::result::Result<Self, Self::Error> {
        let mut days: [Option<String>; 7] = Default::default();
        for (day, hours) in map {
            let index = DAY_NAMES
                .iter()
                .position(|name| name.eq_ignore_ascii_case(&day))
                .ok_or_else(|| format!("unknown day '{day}'"))?;
            days[index] = Some(hours);
        }

        let mut out: [String; 7] = Default::default();
        for (index, hours) in days.into_iter().enumerate() {
            out[index] = hours.ok_or_else(|| format!("missing hours for {}", DAY_NAMES[index]))?;
        }
        Ok(Self { days: out })
    }
}

impl From<OpeningHours> for BTreeMap<String, String> {
    fn from(hours: OpeningHours) -> Self {
        DAY_NAMES
            .iter()
            .map(|d| d.to_string())
            .zip(hours.days)
            .collect()
    }
}

/// A study cafe listed in the directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    pub id: CafeId,
    pub name: String,
    pub address: String,
    pub features: Vec<String>,
    pub image_url: String,
    pub hours: OpeningHours,
    pub pet_friendly: bool,
    /// Displayed rating, one decimal place
    pub rating: f64,
    /// Number of submissions folded into `rating`
    pub rating_count: u32,
    /// Full-precision running mean behind `rating`
    pub rating_mean: f64,
    pub reviews: Vec<Review>,
}

impl Cafe {
    /// Create an unrated cafe from a validated listing
    pub fn new(id: CafeId, listing: NewCafe) -> Self {
        Self {
            id,
            name: listing.name,
            address: listing.address,
            features: listing.features,
            image_url: listing
                .image_url
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            hours: listing.hours.unwrap_or_default(),
            pet_friendly: listing.pet_friendly,
            rating: 0.0,
            rating_count: 0,
            rating_mean: 0.0,
            reviews: Vec::new(),
        }
    }

    /// Set an initial displayed rating that carries no weight
    pub fn with_seed_rating(mut self, rating: f64) -> Self {
        self.rating = crate::aggregator::round1(rating);
        self.rating_mean = rating;
        self
    }
}

/// Fields entered in the add-cafe form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewCafe {
    pub name: String,
    pub address: String,
    pub features: Vec<String>,
    pub pet_friendly: bool,
    pub image_url: Option<String>,
    pub hours: Option<OpeningHours>,
}

impl NewCafe {
    pub fn new(name: impl Into<String>, address: impl Into<String>, features: Vec<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            features,
            ..Default::default()
        }
    }

    pub fn pet_friendly(mut self, pet_friendly: bool) -> Self {
        self.pet_friendly = pet_friendly;
        self
    }

    /// Split a comma-separated feature list, trimming entries and dropping blanks
    pub fn parse_features(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Trim text fields and check that every required field is present
    pub fn validate(mut self) -> Result<Self> {
        self.name = self.name.trim().to_string();
        self.address = self.address.trim().to_string();
        self.features = self
            .features
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();

        if self.name.is_empty() {
            return Err(Error::Validation("Cafe name is required".to_string()));
        }
        if self.address.is_empty() {
            return Err(Error::Validation("Address is required".to_string()));
        }
        if self.features.is_empty() {
            return Err(Error::Validation(
                "At least one feature is required".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_features_trims() {
        let features = NewCafe::parse_features(" Quiet Zone, Fast Wi-Fi ,,Power Outlets ");
        assert_eq!(features, vec!["Quiet Zone", "Fast Wi-Fi", "Power Outlets"]);
    }

    #[test]
    fn test_validate_requires_fields() {
        let missing_name = NewCafe::new("  ", "1 Main St", vec!["Wi-Fi".into()]);
        assert!(matches!(missing_name.validate(), Err(Error::Validation(_))));

        let missing_address = NewCafe::new("Bean There", "", vec!["Wi-Fi".into()]);
        assert!(matches!(missing_address.validate(), Err(Error::Validation(_))));

        let missing_features = NewCafe::new("Bean There", "1 Main St", vec![" ".into()]);
        assert!(matches!(missing_features.validate(), Err(Error::Validation(_))));

        let ok = NewCafe::new(" Bean There ", "1 Main St", vec![" Wi-Fi ".into()])
            .validate()
            .unwrap();
        assert_eq!(ok.name, "Bean There");
        assert_eq!(ok.features, vec!["Wi-Fi"]);
    }

    #[test]
    fn test_new_cafe_defaults() {
        let cafe = Cafe::new(CafeId(1), NewCafe::new("A", "B", vec!["C".into()]));
        assert_eq!(cafe.rating, 0.0);
        assert_eq!(cafe.rating_count, 0);
        assert!(cafe.reviews.is_empty());
        assert_eq!(cafe.image_url, PLACEHOLDER_IMAGE);
        assert_eq!(cafe.hours.iter().count(), 7);
        assert!(cafe.hours.iter().all(|(_, h)| h == PLACEHOLDER_HOURS));
    }

    #[test]
    fn test_hours_serialize_by_day_name() {
        let mut hours = OpeningHours::uniform("8am - 8pm");
        hours.set(Weekday::Sun, "Closed");
        let json = serde_json::to_value(&hours).unwrap();
        assert_eq!(json["Sunday"], "Closed");
        assert_eq!(json["Monday"], "8am - 8pm");

        let back: OpeningHours = serde_json::from_value(json).unwrap();
        assert_eq!(back.get(Weekday::Sun), "Closed");
    }

    #[test]
    fn test_hours_require_all_days() {
        let json = r#"{"Monday": "9-5"}"#;
        assert!(serde_json::from_str::<OpeningHours>(json).is_err());
    }

    #[test]
    fn test_cafe_serializes_camel_case() {
        let cafe = Cafe::new(CafeId(7), NewCafe::new("A", "B", vec!["C".into()]));
        let json = serde_json::to_value(&cafe).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json.get("ratingCount").is_some());
        assert!(json.get("petFriendly").is_some());
        assert!(json.get("imageUrl").is_some());
    }
}
