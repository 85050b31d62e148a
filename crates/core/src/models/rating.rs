//! Rating categories, the versioned category schema, and submissions

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Lowest score a category slider can produce
pub const MIN_CATEGORY_SCORE: u8 = 1;
/// Highest score a category slider can produce
pub const MAX_CATEGORY_SCORE: u8 = 10;
/// Initial slider position for every category
pub const DEFAULT_CATEGORY_SCORE: u8 = 5;
/// Lowest value of the simple star rating
pub const MIN_STARS: u8 = 1;
/// Highest value of the simple star rating
pub const MAX_STARS: u8 = 5;

/// A rating category
///
/// Declaration order is display order, so a `BTreeMap<Category, _>` iterates
/// the same way the rating form lays out its sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Aesthetics,
    Ambience,
    Vibes,
    LightStudy,
    FocusedStudy,
    SocialAtmosphere,
    CreativeEnvironment,
    WifiPower,
    CoffeeQuality,
    SeatingComfort,
    NoiseLevel,
    Lighting,
    Accessibility,
    Bathroom,
}

impl Category {
    /// Every category, in display order
    pub const ALL: [Category; 14] = [
        Category::Aesthetics,
        Category::Ambience,
        Category::Vibes,
        Category::LightStudy,
        Category::FocusedStudy,
        Category::SocialAtmosphere,
        Category::CreativeEnvironment,
        Category::WifiPower,
        Category::CoffeeQuality,
        Category::SeatingComfort,
        Category::NoiseLevel,
        Category::Lighting,
        Category::Accessibility,
        Category::Bathroom,
    ];

    /// Key used in serialized ratings
    pub fn key(&self) -> &'static str {
        match self {
            Category::Aesthetics => "aesthetics",
            Category::Ambience => "ambience",
            Category::Vibes => "vibes",
            Category::LightStudy => "lightStudy",
            Category::FocusedStudy => "focusedStudy",
            Category::SocialAtmosphere => "socialAtmosphere",
            Category::CreativeEnvironment => "creativeEnvironment",
            Category::WifiPower => "wifiPower",
            Category::CoffeeQuality => "coffeeQuality",
            Category::SeatingComfort => "seatingComfort",
            Category::NoiseLevel => "noiseLevel",
            Category::Lighting => "lighting",
            Category::Accessibility => "accessibility",
            Category::Bathroom => "bathroom",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Aesthetics => "Aesthetics",
            Category::Ambience => "Ambience",
            Category::Vibes => "Vibes",
            Category::LightStudy => "Light Study",
            Category::FocusedStudy => "Focused Study",
            Category::SocialAtmosphere => "Social Atmosphere",
            Category::CreativeEnvironment => "Creative Environment",
            Category::WifiPower => "Wi-Fi and Power",
            Category::CoffeeQuality => "Coffee Quality",
            Category::SeatingComfort => "Seating Comfort",
            Category::NoiseLevel => "Noise Level",
            Category::Lighting => "Lighting",
            Category::Accessibility => "Accessibility",
            Category::Bathroom => "Bathroom",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::Aesthetics => "Visual appeal and Instagram-worthiness",
            Category::Ambience => "How comfortable and conducive the environment is",
            Category::Vibes => "Overall mood or energy of the space",
            Category::LightStudy => "Suitability for casual study sessions",
            Category::FocusedStudy => "Quietness and ability to concentrate",
            Category::SocialAtmosphere => "Good for socializing or group work",
            Category::CreativeEnvironment => "Sparks creativity and brainstorming",
            Category::WifiPower => "Remote work/study convenience",
            Category::CoffeeQuality => "Quality of drinks",
            Category::SeatingComfort => "Comfort of seats and table availability",
            Category::NoiseLevel => "From very quiet to very loud",
            Category::Lighting => "Brightness for long study hours",
            Category::Accessibility => "Ease of access and navigation",
            Category::Bathroom => "Cleanliness and availability of restrooms",
        }
    }

    /// Schema version that introduced this category
    pub fn introduced_in(&self) -> SchemaVersion {
        match self {
            Category::Ambience
            | Category::Vibes
            | Category::LightStudy
            | Category::FocusedStudy => SchemaVersion::V1,
            Category::SocialAtmosphere
            | Category::CreativeEnvironment
            | Category::WifiPower
            | Category::CoffeeQuality
            | Category::SeatingComfort => SchemaVersion::V2,
            Category::NoiseLevel
            | Category::Lighting
            | Category::Accessibility
            | Category::Bathroom => SchemaVersion::V3,
            Category::Aesthetics => SchemaVersion::V4,
        }
    }

    /// Look up a category by its serialized key (case-insensitive)
    pub fn from_key(key: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Version of the rating category set
///
/// Each version is a superset of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum SchemaVersion {
    V1 = 1,
    V2 = 2,
    V3 = 3,
    V4 = 4,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V4;

    /// Categories rated under this version, in display order
    pub fn categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| c.introduced_in() <= *self)
            .collect()
    }

    pub fn contains(&self, category: Category) -> bool {
        category.introduced_in() <= *self
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl TryFrom<u8> for SchemaVersion {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(SchemaVersion::V1),
            2 => Ok(SchemaVersion::V2),
            3 => Ok(SchemaVersion::V3),
            4 => Ok(SchemaVersion::V4),
            other => Err(format!("unknown rating schema version {other}")),
        }
    }
}

impl From<SchemaVersion> for u8 {
    fn from(version: SchemaVersion) -> Self {
        version as u8
    }
}

/// A multi-category rating: one score in 1..=10 per category
///
/// Serialized as a flat `{category: score}` object. The schema version is not
/// stored; it is inferred from the keys present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating {
    scores: BTreeMap<Category, u8>,
}

impl Rating {
    /// A rating with every category of `schema` at the default score
    pub fn new(schema: SchemaVersion) -> Self {
        Self {
            scores: schema
                .categories()
                .into_iter()
                .map(|c| (c, DEFAULT_CATEGORY_SCORE))
                .collect(),
        }
    }

    /// Build a rating from explicit scores, rejecting out-of-range values
    pub fn from_scores<I>(scores: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Category, u8)>,
    {
        let mut rating = Self::default();
        for (category, score) in scores {
            rating.set(category, score)?;
        }
        Ok(rating)
    }

    /// Set one category score
    pub fn set(&mut self, category: Category, score: u8) -> Result<()> {
        check_category_score(category, score)?;
        self.scores.insert(category, score);
        Ok(())
    }

    pub fn get(&self, category: Category) -> Option<u8> {
        self.scores.get(&category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u8)> + '_ {
        self.scores.iter().map(|(c, s)| (*c, *s))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Smallest schema version containing every category in this rating
    pub fn schema(&self) -> Option<SchemaVersion> {
        self.scores.keys().map(|c| c.introduced_in()).max()
    }
}

/// Reject a category score outside 1..=10
pub(crate) fn check_category_score(category: Category, score: u8) -> Result<()> {
    if !(MIN_CATEGORY_SCORE..=MAX_CATEGORY_SCORE).contains(&score) {
        return Err(Error::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            category.label(),
            MIN_CATEGORY_SCORE,
            MAX_CATEGORY_SCORE,
            score
        )));
    }
    Ok(())
}

/// What a user submits when rating a cafe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Submission {
    /// Simple star rating, 1..=5
    Stars(u8),
    /// Full category breakdown
    #[serde(rename = "ratings")]
    Categories(Rating),
}
