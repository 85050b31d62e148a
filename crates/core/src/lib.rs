//! Cafe Directory Core Library
//!
//! Cafe models, rating aggregation, the rating eligibility gate, search, and
//! storage for the study cafe directory.

pub mod aggregator;
pub mod clock;
pub mod config;
pub mod directory;
pub mod eligibility;
pub mod error;
pub mod invariants;
pub mod models;
pub mod search;
pub mod storage;

pub use aggregator::{round1, RatingState};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ConfigError, DirectoryConfig};
pub use directory::CafeDirectory;
pub use eligibility::{Eligibility, EligibilityGate};
pub use error::{Error, Result};
pub use models::*;
pub use storage::{Database, DirectoryRepository, LocalStorage, MemoryDirectory, MemoryStorage};
