//! Catalog - Immutable Works Loaded Once
//!
//! The catalog document carries the works together with the taxonomy and
//! rating scale they are filtered against. It is validated on load and
//! never mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::rating::RatingScale;
use crate::taxonomy::{Category, CategoryRegistry, ALL_CATEGORY};
use crate::ENGINE_VERSION;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid version {0}: {1}")]
    InvalidVersion(String, semver::Error),

    #[error("Catalog requires engine >= {0}, current is {1}")]
    EngineVersionMismatch(String, String),

    #[error("Duplicate work id: {0}")]
    DuplicateWork(WorkId),

    #[error("Work {0} has no genre tag")]
    MissingGenre(WorkId),

    #[error("Work {0} has rating {1:?} which is not on the rating scale")]
    UnknownRating(WorkId, String),

    #[error("Rating scale lists {0:?} more than once")]
    DuplicateRating(String),

    #[error("Category id {0:?} is reserved")]
    ReservedCategory(String),

    #[error("Duplicate category id: {0}")]
    DuplicateCategory(String),
}

/// Stable work identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub u32);

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(WorkId)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[serde(alias = "Ongoing")]
    Ongoing,
    #[serde(alias = "Completed")]
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkType {
    #[serde(alias = "Series")]
    Series,
    #[serde(alias = "Standalone", alias = "One-shot", alias = "one-shot")]
    Standalone,
}

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Work {
    pub id: WorkId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(rename = "genre", deserialize_with = "genre_tags")]
    pub genres: Vec<String>,
    #[serde(default)]
    pub language: Option<String>,
    pub status: Status,
    #[serde(default)]
    pub cover: Option<String>,
    #[serde(rename = "type")]
    pub work_type: WorkType,
    #[serde(rename = "ageRating")]
    pub rating: String,
    #[serde(default)]
    pub chapter: Option<u32>,
    pub price: String,
}

impl Work {
    /// Numeric price, 0 when the display string is unparseable.
    pub fn price_amount(&self) -> f64 {
        crate::price::parse_price(&self.price)
    }

    pub fn has_genre(&self, tag: &str) -> bool {
        self.genres.iter().any(|g| g == tag)
    }
}

/// Accepts `"Fantasy, Action"` or `["Fantasy", "Action"]`.
fn genre_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum GenreField {
        Joined(String),
        List(Vec<String>),
    }

    let raw = match GenreField::deserialize(deserializer)? {
        GenreField::Joined(joined) => joined.split(',').map(str::to_string).collect(),
        GenreField::List(list) => list,
    };

    Ok(raw
        .into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect())
}

/// On-disk catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDocument {
    pub catalog_version: String,
    pub engine_min_version: String,
    #[serde(default)]
    pub rating_scale: RatingScale,
    #[serde(default)]
    pub categories: Vec<Category>,
    pub works: Vec<Work>,
}

/// Validated, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    version: String,
    works: Vec<Work>,
    taxonomy: CategoryRegistry,
    rating_scale: RatingScale,
}

impl Catalog {
    /// Validate a document and freeze it into a catalog.
    pub fn from_document(doc: CatalogDocument) -> Result<Self, CatalogError> {
        check_engine_version(&doc.engine_min_version)?;
        semver::Version::parse(&doc.catalog_version)
            .map_err(|e| CatalogError::InvalidVersion(doc.catalog_version.clone(), e))?;

        if let Some(dup) = doc.rating_scale.first_duplicate() {
            return Err(CatalogError::DuplicateRating(dup.to_string()));
        }

        let mut seen = HashSet::new();
        for work in &doc.works {
            if !seen.insert(work.id) {
                return Err(CatalogError::DuplicateWork(work.id));
            }
            if work.genres.is_empty() {
                return Err(CatalogError::MissingGenre(work.id));
            }
            if !doc.rating_scale.contains(&work.rating) {
                return Err(CatalogError::UnknownRating(work.id, work.rating.clone()));
            }
        }

        let mut taxonomy = CategoryRegistry::new();
        for category in doc.categories {
            if category.id.is_empty() || category.id == ALL_CATEGORY {
                return Err(CatalogError::ReservedCategory(category.id));
            }
            if taxonomy.get(&category.id).is_some() {
                return Err(CatalogError::DuplicateCategory(category.id));
            }
            taxonomy.register(category);
        }

        tracing::debug!(
            version = %doc.catalog_version,
            works = doc.works.len(),
            categories = taxonomy.len(),
            "catalog loaded"
        );

        Ok(Self {
            version: doc.catalog_version,
            works: doc.works,
            taxonomy,
            rating_scale: doc.rating_scale,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    pub fn load_from_path(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The studio's launch catalog, compiled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn works(&self) -> &[Work] {
        &self.works
    }

    pub fn len(&self) -> usize {
        self.works.len()
    }

    pub fn is_empty(&self) -> bool {
        self.works.is_empty()
    }

    pub fn taxonomy(&self) -> &CategoryRegistry {
        &self.taxonomy
    }

    pub fn rating_scale(&self) -> &RatingScale {
        &self.rating_scale
    }

    pub fn get(&self, id: WorkId) -> Option<&Work> {
        self.works.iter().find(|w| w.id == id)
    }

    /// Previous work in catalog order, `None` at the first work.
    pub fn prev_id(&self, id: WorkId) -> Option<WorkId> {
        let pos = self.position(id)?;
        pos.checked_sub(1).map(|p| self.works[p].id)
    }

    /// Next work in catalog order, `None` at the last work.
    pub fn next_id(&self, id: WorkId) -> Option<WorkId> {
        let pos = self.position(id)?;
        self.works.get(pos + 1).map(|w| w.id)
    }

    /// Every genre tag, in order of first appearance.
    pub fn genres(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for tag in self.works.iter().flat_map(|w| w.genres.iter()) {
            if !tags.contains(&tag.as_str()) {
                tags.push(tag);
            }
        }
        tags
    }

    fn position(&self, id: WorkId) -> Option<usize> {
        self.works.iter().position(|w| w.id == id)
    }
}

fn check_engine_version(min_version: &str) -> Result<(), CatalogError> {
    let engine = semver::Version::parse(ENGINE_VERSION)
        .map_err(|e| CatalogError::InvalidVersion(ENGINE_VERSION.to_string(), e))?;
    let min = semver::Version::parse(min_version)
        .map_err(|e| CatalogError::InvalidVersion(min_version.to_string(), e))?;

    if engine < min {
        return Err(CatalogError::EngineVersionMismatch(
            min_version.to_string(),
            ENGINE_VERSION.to_string(),
        ));
    }

    Ok(())
}
