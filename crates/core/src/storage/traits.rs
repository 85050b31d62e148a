//! Storage traits
//!
//! The directory and the eligibility store are reached only through these
//! traits, so the controller can run against SQLite, in-memory stores, or test
//! fakes.

use crate::error::Result;
use crate::models::{Cafe, CafeId};

/// Cafe directory operations
pub trait DirectoryRepository {
    /// Insert a new cafe at the end of the directory
    fn insert_cafe(&mut self, cafe: Cafe) -> Result<()>;

    /// Find cafe by ID
    fn find_cafe(&self, id: CafeId) -> Result<Option<Cafe>>;

    /// Replace a stored cafe with an updated copy
    fn update_cafe(&mut self, cafe: Cafe) -> Result<()>;

    /// All cafes in insertion order
    fn list_cafes(&self) -> Result<Vec<Cafe>>;

    /// Next unused sequential ID
    fn next_cafe_id(&self) -> Result<CafeId>;
}

/// Device-local string key/value store
pub trait LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove_item(&mut self, key: &str) -> Result<()>;
}
