//! Facet State - The User's Filter and Sort Intent
//!
//! One value object with a single canonical unrestricted default, shared by
//! every view that browses the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Status, WorkType};
use crate::pipeline::PipelineError;
use crate::price::PriceRange;
use crate::taxonomy::GenreSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Price,
    /// Keep catalog order.
    Catalog,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Title, SortKey::Author, SortKey::Price, SortKey::Catalog];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Price => "price",
            SortKey::Catalog => "catalog",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PipelineError::UnknownSortKey(s.to_string()))
    }
}

/// Two checkboxes over a two-valued dimension.
///
/// Neither checked and both checked are the same: unrestricted.
fn binary_allows(first_checked: bool, second_checked: bool, value_is_first: bool) -> bool {
    match (first_checked, second_checked) {
        (true, false) => value_is_first,
        (false, true) => !value_is_first,
        _ => true,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusToggles {
    pub ongoing: bool,
    pub completed: bool,
}

impl StatusToggles {
    pub fn allows(&self, status: Status) -> bool {
        binary_allows(self.ongoing, self.completed, status == Status::Ongoing)
    }

    pub fn toggle(&mut self, status: Status) {
        match status {
            Status::Ongoing => self.ongoing = !self.ongoing,
            Status::Completed => self.completed = !self.completed,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.ongoing == self.completed
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeToggles {
    pub series: bool,
    pub standalone: bool,
}

impl TypeToggles {
    pub fn allows(&self, work_type: WorkType) -> bool {
        binary_allows(self.series, self.standalone, work_type == WorkType::Series)
    }

    pub fn toggle(&mut self, work_type: WorkType) {
        match work_type {
            WorkType::Series => self.series = !self.series,
            WorkType::Standalone => self.standalone = !self.standalone,
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.series == self.standalone
    }
}

/// Current filter and sort intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FacetState {
    /// Free-text query; blank means no text restriction.
    pub query: String,
    /// Whether the query also matches genre tags.
    pub search_genres: bool,
    /// Selected genre tags; empty means no genre restriction.
    pub genres: GenreSet,
    pub price: PriceRange,
    /// Minimum content rating, if any.
    pub min_rating: Option<String>,
    pub status: StatusToggles,
    #[serde(rename = "type")]
    pub work_type: TypeToggles,
    pub sort: SortKey,
}

impl Default for FacetState {
    fn default() -> Self {
        Self {
            query: String::new(),
            search_genres: true,
            genres: GenreSet::new(),
            price: PriceRange::unrestricted(),
            min_rating: None,
            status: StatusToggles::default(),
            work_type: TypeToggles::default(),
            sort: SortKey::default(),
        }
    }
}

impl FacetState {
    /// Add the tag if absent, remove it if present.
    pub fn toggle_genre(&mut self, tag: &str) {
        if !self.genres.remove(tag) {
            self.genres.insert(tag.to_string());
        }
    }

    /// True when no facet narrows the result set.
    pub fn is_unrestricted(&self) -> bool {
        self.query.trim().is_empty()
            && self.genres.is_empty()
            && self.price == PriceRange::unrestricted()
            && self.min_rating.is_none()
            && self.status.is_unrestricted()
            && self.work_type.is_unrestricted()
    }
}
