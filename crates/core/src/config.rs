//! Directory configuration
//!
//! Loaded from a TOML file. Every section is optional; a missing file gives
//! the defaults (seven-day cooldown, current rating schema, featured cafes).
//!
//! ```toml
//! [eligibility]
//! cooldown_days = 7
//!
//! [ratings]
//! schema = 4
//!
//! [[cafes]]
//! name = "The Study Brew"
//! address = "123 College Ave, Campus District"
//! features = ["Quiet Zone", "Fast Wi-Fi", "Power Outlets"]
//! rating = 4.8
//! ```

use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::eligibility::DEFAULT_COOLDOWN_DAYS;
use crate::models::{Cafe, CafeId, NewCafe, OpeningHours, SchemaVersion};

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub eligibility: EligibilitySection,
    pub ratings: RatingsSection,
    /// Cafes listed at startup
    pub cafes: Vec<CafeSeed>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilitySection {
    /// Days a device must wait between ratings of the same cafe
    pub cooldown_days: i64,
}

impl Default for EligibilitySection {
    fn default() -> Self {
        Self {
            cooldown_days: DEFAULT_COOLDOWN_DAYS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingsSection {
    /// Category set offered by the rating form
    pub schema: SchemaVersion,
}

/// A pre-seeded cafe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CafeSeed {
    pub name: String,
    pub address: String,
    pub features: Vec<String>,
    /// Displayed until the first rating arrives
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub pet_friendly: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub hours: Option<OpeningHours>,
}

impl CafeSeed {
    fn new(name: &str, address: &str, features: &[&str], rating: f64) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            features: features.iter().map(|f| f.to_string()).collect(),
            rating,
            pet_friendly: false,
            image_url: None,
            hours: None,
        }
    }

    /// Build the directory entry for this seed
    pub fn to_cafe(&self, id: CafeId) -> Result<Cafe, ConfigError> {
        let listing = NewCafe {
            name: self.name.clone(),
            address: self.address.clone(),
            features: self.features.clone(),
            pet_friendly: self.pet_friendly,
            image_url: self.image_url.clone(),
            hours: self.hours.clone(),
        }
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("seed cafe '{}': {}", self.name, e)))?;

        Ok(Cafe::new(id, listing).with_seed_rating(self.rating))
    }
}

/// The cafes featured on a fresh directory
pub fn featured_cafes() -> Vec<CafeSeed> {
    vec![
        CafeSeed::new(
            "The Study Brew",
            "123 College Ave, Campus District",
            &["Quiet Zone", "Fast Wi-Fi", "Power Outlets"],
            4.8,
        ),
        CafeSeed::new(
            "Creative Corner Café",
            "456 Innovation St, Tech Hub",
            &["Group Space", "Great Coffee", "Late Hours"],
            4.6,
        ),
        CafeSeed::new(
            "Focus & Grind",
            "789 Productivity Lane, Downtown",
            &["Private Booths", "Premium Coffee", "Study Music"],
            4.9,
        ),
    ]
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            eligibility: EligibilitySection::default(),
            ratings: RatingsSection::default(),
            cafes: featured_cafes(),
        }
    }
}

impl DirectoryConfig {
    /// Load from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!(
            path = %path.display(),
            cafes = config.cafes.len(),
            cooldown_days = config.eligibility.cooldown_days,
            "Loaded config"
        );
        Ok(config)
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: DirectoryConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.eligibility.cooldown_days < 1 {
            return Err(ConfigError::Invalid(format!(
                "cooldown_days must be at least 1, got {}",
                self.eligibility.cooldown_days
            )));
        }
        for seed in &self.cafes {
            if !(0.0..=10.0).contains(&seed.rating) {
                return Err(ConfigError::Invalid(format!(
                    "seed cafe '{}' has rating {} outside 0..=10",
                    seed.name, seed.rating
                )));
            }
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::days(self.eligibility.cooldown_days)
    }
}
