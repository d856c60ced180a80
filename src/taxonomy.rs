//! Taxonomy - Category Identifiers to Genre Tags
//!
//! Each category maps to exactly one genre tag. Several categories may share
//! a tag (a genre label and a narrower sub-genre label); resolving either
//! one yields the same tag set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel meaning "no genre restriction".
pub const ALL_CATEGORY: &str = "all";

pub type GenreSet = BTreeSet<String>;

/// One selectable category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    pub genre: String,
}

impl Category {
    pub fn new(id: impl Into<String>, label: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            genre: genre.into(),
        }
    }
}

/// Category registry, kept in registration order.
#[derive(Debug, Clone, Default)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self { categories: vec![] }
    }

    /// Add a category. A later entry with the same id replaces the earlier one.
    pub fn register(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => self.categories.push(category),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Selectable entries for a category bar: the sentinel, then the registry.
    pub fn list(&self) -> Vec<Category> {
        std::iter::once(Category::new(ALL_CATEGORY, "All", ""))
            .chain(self.categories.iter().cloned())
            .collect()
    }

    /// Resolve a category id to its genre tags.
    ///
    /// The sentinel, an empty id and unknown ids all resolve to the empty
    /// set, which means "no restriction".
    pub fn resolve(&self, id: &str) -> GenreSet {
        let id = id.trim();
        if id.is_empty() || id == ALL_CATEGORY {
            return GenreSet::new();
        }

        match self.get(id) {
            Some(category) => GenreSet::from([category.genre.clone()]),
            None => {
                tracing::warn!(category = id, "unknown category, not restricting genres");
                GenreSet::new()
            }
        }
    }

    /// The category id that stands for `genre`: the first one registered
    /// with that tag.
    pub fn canonical_id(&self, genre: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.genre == genre)
            .map(|c| c.id.as_str())
    }

    /// Every category id that resolves to `genre`.
    pub fn aliases_of(&self, genre: &str) -> Vec<&str> {
        self.categories
            .iter()
            .filter(|c| c.genre == genre)
            .map(|c| c.id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CategoryRegistry {
        let mut registry = CategoryRegistry::new();
        registry.register(Category::new("mystery", "Mystery", "Mystery"));
        registry.register(Category::new("crime", "Crime", "Mystery"));
        registry.register(Category::new("fantasy", "Fantasy", "Fantasy"));
        registry
    }

    #[test]
    fn test_aliases_resolve_identically() {
        let registry = registry();
        assert_eq!(registry.resolve("mystery"), registry.resolve("crime"));
        assert_eq!(registry.resolve("crime"), GenreSet::from(["Mystery".to_string()]));
    }

    #[test]
    fn test_sentinel_and_unknown_are_unrestricted() {
        let registry = registry();
        assert!(registry.resolve(ALL_CATEGORY).is_empty());
        assert!(registry.resolve("").is_empty());
        assert!(registry.resolve("  ").is_empty());
        assert!(registry.resolve("romance").is_empty());
    }

    #[test]
    fn test_canonical_id_is_first_registered() {
        let registry = registry();
        assert_eq!(registry.canonical_id("Mystery"), Some("mystery"));
        assert_eq!(registry.aliases_of("Mystery"), vec!["mystery", "crime"]);
        assert_eq!(registry.canonical_id("Horror"), None);
    }

    #[test]
    fn test_list_starts_with_sentinel() {
        let list = registry().list();
        assert_eq!(list.len(), 4);
        assert_eq!(list[0].id, ALL_CATEGORY);
        assert_eq!(list[1].id, "mystery");
    }
}
