//! In-memory stores
//!
//! `MemoryDirectory` is the production directory: listings live only for the
//! lifetime of the process. `MemoryStorage` backs the eligibility gate in
//! tests.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{Cafe, CafeId};
use crate::storage::{DirectoryRepository, LocalStorage};

/// Ordered, in-memory cafe directory
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    cafes: Vec<Cafe>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cafes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cafes.is_empty()
    }
}

impl DirectoryRepository for MemoryDirectory {
    fn insert_cafe(&mut self, cafe: Cafe) -> Result<()> {
        if self.cafes.iter().any(|c| c.id == cafe.id) {
            return Err(Error::Validation(format!(
                "Cafe id {} is already in use",
                cafe.id
            )));
        }
        self.cafes.push(cafe);
        Ok(())
    }

    fn find_cafe(&self, id: CafeId) -> Result<Option<Cafe>> {
        Ok(self.cafes.iter().find(|c| c.id == id).cloned())
    }

    fn update_cafe(&mut self, cafe: Cafe) -> Result<()> {
        let slot = self
            .cafes
            .iter_mut()
            .find(|c| c.id == cafe.id)
            .ok_or_else(|| Error::NotFound(format!("Cafe {}", cafe.id)))?;
        *slot = cafe;
        Ok(())
    }

    fn list_cafes(&self) -> Result<Vec<Cafe>> {
        Ok(self.cafes.clone())
    }

    fn next_cafe_id(&self) -> Result<CafeId> {
        let max = self.cafes.iter().map(|c| c.id.0).max().unwrap_or(0);
        Ok(CafeId(max + 1))
    }
}

/// `LocalStorage` held in a hash map
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewCafe;

    fn make_cafe(id: u64, name: &str) -> Cafe {
        Cafe::new(CafeId(id), NewCafe::new(name, "Somewhere", vec!["Wi-Fi".into()]))
    }

    #[test]
    fn test_directory_keeps_insertion_order() {
        let mut dir = MemoryDirectory::new();
        dir.insert_cafe(make_cafe(2, "B")).unwrap();
        dir.insert_cafe(make_cafe(1, "A")).unwrap();

        let names: Vec<_> = dir.list_cafes().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(dir.next_cafe_id().unwrap(), CafeId(3));
    }

    #[test]
    fn test_directory_rejects_duplicate_id() {
        let mut dir = MemoryDirectory::new();
        dir.insert_cafe(make_cafe(1, "A")).unwrap();
        assert!(dir.insert_cafe(make_cafe(1, "Again")).is_err());
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn test_directory_update() {
        let mut dir = MemoryDirectory::new();
        assert_eq!(dir.next_cafe_id().unwrap(), CafeId(1));
        dir.insert_cafe(make_cafe(1, "A")).unwrap();

        let mut cafe = dir.find_cafe(CafeId(1)).unwrap().unwrap();
        cafe.rating = 4.5;
        dir.update_cafe(cafe).unwrap();
        assert_eq!(dir.find_cafe(CafeId(1)).unwrap().unwrap().rating, 4.5);

        assert!(matches!(
            dir.update_cafe(make_cafe(9, "Missing")),
            Err(Error::NotFound(_))
        ));
        assert!(dir.find_cafe(CafeId(9)).unwrap().is_none());
    }

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "1").unwrap();
        storage.set_item("k", "2").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), Some("2".to_string()));
        storage.remove_item("k").unwrap();
        assert_eq!(storage.get_item("k").unwrap(), None);
    }
}
