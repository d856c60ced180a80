//! Studio Catalog - Filtering & Master-Detail Navigation Engine
//!
//! # Ground Rules
//! 1. The catalog is immutable once loaded
//! 2. Facets are one explicit value, with one unrestricted default
//! 3. Filtering is pure: same catalog and facets, same ordered results
//! 4. Bad data degrades, caller bugs fail
//! 5. Selection follows a work, not a position

pub mod catalog;
pub mod taxonomy;
pub mod rating;
pub mod price;
pub mod facets;
pub mod predicate;
pub mod sort;
pub mod pipeline;
pub mod selection;
pub mod link;
pub mod browser;
pub mod hashing;
pub mod observability;

pub use catalog::{Catalog, CatalogDocument, CatalogError, Status, Work, WorkId, WorkType};
pub use taxonomy::{Category, CategoryRegistry, GenreSet, ALL_CATEGORY};
pub use rating::RatingScale;
pub use price::{parse_price, PriceRange, PriceRangeError};
pub use facets::{FacetState, SortKey, StatusToggles, TypeToggles};
pub use predicate::{compile, CompiledFilter, FacetRule};
pub use sort::sort_works;
pub use pipeline::{FilterPipeline, OrderedResults, PipelineError, Rejection, SearchReport};
pub use selection::{NavigationError, Selection, SelectionState};
pub use link::{from_link, to_link, CATEGORY_PARAM};
pub use browser::CatalogBrowser;
pub use hashing::{canonical_json, facets_hash, results_fingerprint};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
