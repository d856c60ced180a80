//! Filter Pipeline - Single Entry Point
//!
//! `(catalog, facets) -> ordered results`: compile the facet rules, keep the
//! works every rule accepts, then sort. Pure and cheap enough to rerun on
//! every keystroke.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::catalog::{Catalog, Work, WorkId};
use crate::facets::FacetState;
use crate::hashing::{facets_hash, results_fingerprint};
use crate::predicate::compile;
use crate::sort::sort_works;
use crate::ENGINE_VERSION;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Minimum rating {0:?} is not on the rating scale")]
    UnknownRating(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Filtered, sorted view over a catalog.
///
/// Holds positions into the shared catalog rather than copies of the works.
#[derive(Debug, Clone)]
pub struct OrderedResults {
    catalog: Arc<Catalog>,
    positions: Vec<usize>,
    fingerprint: String,
}

impl OrderedResults {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Work> {
        self.positions
            .get(index)
            .map(|&pos| &self.catalog.works()[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Work> + '_ {
        self.positions.iter().map(|&pos| &self.catalog.works()[pos])
    }

    pub fn ids(&self) -> Vec<WorkId> {
        self.iter().map(|w| w.id).collect()
    }

    /// Index of the work with `id`, if it is in the results.
    pub fn position_of(&self, id: WorkId) -> Option<usize> {
        self.iter().position(|w| w.id == id)
    }

    /// Changes whenever the id sequence changes.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn to_vec(&self) -> Vec<Work> {
        self.iter().cloned().collect()
    }
}

impl PartialEq for OrderedResults {
    fn eq(&self, other: &Self) -> bool {
        self.ids() == other.ids()
    }
}

/// A work the filter dropped, with the first rule that refused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub id: WorkId,
    pub rule: String,
}

/// A pipeline run packaged for hosts that log or cache results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub id: String,
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub catalog_version: String,
    pub facets: FacetState,
    pub facets_hash: String,
    pub results_fingerprint: String,
    pub total: usize,
    pub matched: usize,
    pub results: Vec<Work>,
    pub rejected_by: Vec<Rejection>,
}

/// The filter pipeline over one catalog.
#[derive(Debug, Clone)]
pub struct FilterPipeline {
    catalog: Arc<Catalog>,
}

impl FilterPipeline {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Filter and sort the catalog for `facets`.
    pub fn run(&self, facets: &FacetState) -> Result<OrderedResults, PipelineError> {
        let filter = compile(facets, self.catalog.rating_scale())?;

        let kept: Vec<&Work> = self
            .catalog
            .works()
            .iter()
            .filter(|w| filter.matches(w))
            .collect();
        let sorted = sort_works(&kept, facets.sort);

        let positions: Vec<usize> = sorted
            .iter()
            .filter_map(|w| self.catalog.works().iter().position(|c| c.id == w.id))
            .collect();
        let fingerprint = results_fingerprint(sorted.iter().map(|w| w.id));

        tracing::debug!(
            query = %facets.query,
            sort = %facets.sort,
            matched = positions.len(),
            total = self.catalog.len(),
            "pipeline run"
        );

        Ok(OrderedResults {
            catalog: Arc::clone(&self.catalog),
            positions,
            fingerprint,
        })
    }

    /// Every work `facets` filters out, in catalog order.
    pub fn rejections(&self, facets: &FacetState) -> Result<Vec<Rejection>, PipelineError> {
        let filter = compile(facets, self.catalog.rating_scale())?;

        Ok(self
            .catalog
            .works()
            .iter()
            .filter_map(|w| {
                filter.rejected_by(w).map(|rule| Rejection {
                    id: w.id,
                    rule: rule.to_string(),
                })
            })
            .collect())
    }

    /// Run the pipeline and package the outcome.
    pub fn report(&self, facets: &FacetState) -> Result<SearchReport, PipelineError> {
        let results = self.run(facets)?;

        Ok(SearchReport {
            id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            catalog_version: self.catalog.version().to_string(),
            facets: facets.clone(),
            facets_hash: facets_hash(facets)?,
            results_fingerprint: results.fingerprint().to_string(),
            total: self.catalog.len(),
            matched: results.len(),
            results: results.to_vec(),
            rejected_by: self.rejections(facets)?,
        })
    }
}
