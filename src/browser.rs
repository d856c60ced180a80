//! Catalog Browser - One Page's Browsing Session
//!
//! Owns the facet state, the current ordered results and the detail-view
//! selection. Every facet mutator reruns the pipeline and revalidates the
//! selection, so the presentation layer only ever reads consistent state.

use std::sync::Arc;

use crate::catalog::{Catalog, Status, Work, WorkId, WorkType};
use crate::facets::{FacetState, SortKey};
use crate::link;
use crate::pipeline::{FilterPipeline, OrderedResults, PipelineError};
use crate::price::PriceRange;
use crate::selection::{NavigationError, Selection, SelectionState};
use crate::taxonomy::GenreSet;

pub struct CatalogBrowser {
    pipeline: FilterPipeline,
    facets: FacetState,
    results: OrderedResults,
    selection: Selection,
}

impl CatalogBrowser {
    pub fn new(catalog: Arc<Catalog>) -> Result<Self, PipelineError> {
        Self::with_facets(catalog, FacetState::default())
    }

    pub fn with_facets(catalog: Arc<Catalog>, facets: FacetState) -> Result<Self, PipelineError> {
        let pipeline = FilterPipeline::new(catalog);
        let results = pipeline.run(&facets)?;
        Ok(Self {
            pipeline,
            facets,
            results,
            selection: Selection::new(),
        })
    }

    /// Start from a page's `category` link parameter.
    pub fn from_link(catalog: Arc<Catalog>, param: Option<&str>) -> Result<Self, PipelineError> {
        let facets = link::from_link(&FacetState::default(), catalog.taxonomy(), param);
        Self::with_facets(catalog, facets)
    }

    // --- Reads ---

    pub fn catalog(&self) -> &Catalog {
        self.pipeline.catalog()
    }

    pub fn facets(&self) -> &FacetState {
        &self.facets
    }

    pub fn results(&self) -> &OrderedResults {
        &self.results
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.state(&self.results)
    }

    pub fn selected(&self) -> Option<&Work> {
        self.selection.selected(&self.results)
    }

    pub fn selected_id(&self) -> Option<WorkId> {
        self.selection.selected_id()
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_open(&self.results)
    }

    /// Whether the detail view can step back.
    pub fn has_prev(&self) -> bool {
        self.selection.has_prev(&self.results)
    }

    /// Whether the detail view can step forward.
    pub fn has_next(&self) -> bool {
        self.selection.has_next(&self.results)
    }

    /// The `category` value to publish for the current genre facet.
    pub fn category_link(&self) -> Option<String> {
        link::to_link(&self.facets, self.catalog().taxonomy())
    }

    // --- Facet mutators ---

    pub fn set_query(&mut self, query: &str) -> Result<(), PipelineError> {
        self.update(|f| f.query = query.to_string())
    }

    pub fn set_search_genres(&mut self, enabled: bool) -> Result<(), PipelineError> {
        self.update(|f| f.search_genres = enabled)
    }

    pub fn toggle_genre(&mut self, tag: &str) -> Result<(), PipelineError> {
        self.update(|f| f.toggle_genre(tag))
    }

    pub fn set_genres(&mut self, genres: GenreSet) -> Result<(), PipelineError> {
        self.update(|f| f.genres = genres)
    }

    pub fn set_price_range(&mut self, range: PriceRange) -> Result<(), PipelineError> {
        self.update(|f| f.price = range)
    }

    pub fn set_min_rating(&mut self, rating: Option<&str>) -> Result<(), PipelineError> {
        self.update(|f| f.min_rating = rating.map(str::to_string))
    }

    pub fn toggle_status(&mut self, status: Status) -> Result<(), PipelineError> {
        self.update(|f| f.status.toggle(status))
    }

    pub fn toggle_type(&mut self, work_type: WorkType) -> Result<(), PipelineError> {
        self.update(|f| f.work_type.toggle(work_type))
    }

    pub fn set_sort(&mut self, key: SortKey) -> Result<(), PipelineError> {
        self.update(|f| f.sort = key)
    }

    /// Apply an incoming `category` parameter.
    pub fn apply_link(&mut self, param: Option<&str>) -> Result<(), PipelineError> {
        let catalog = Arc::clone(self.pipeline.catalog());
        self.update(|f| link::apply_link(f, catalog.taxonomy(), param))
    }

    /// Back to the unrestricted default.
    pub fn reset(&mut self) -> Result<(), PipelineError> {
        self.update(|f| *f = FacetState::default())
    }

    // --- Navigation ---

    pub fn open(&mut self, index: usize) -> Result<bool, NavigationError> {
        self.selection.open(&self.results, index)
    }

    pub fn open_work(&mut self, id: WorkId) -> bool {
        self.selection.open_work(&self.results, id)
    }

    pub fn next(&mut self) -> bool {
        self.selection.next(&self.results)
    }

    pub fn prev(&mut self) -> bool {
        self.selection.prev(&self.results)
    }

    pub fn close(&mut self) {
        self.selection.close();
    }

    /// Apply `change` and recompute. On error the previous state is kept.
    fn update(&mut self, change: impl FnOnce(&mut FacetState)) -> Result<(), PipelineError> {
        let mut facets = self.facets.clone();
        change(&mut facets);

        let results = self.pipeline.run(&facets)?;
        let changed = results.fingerprint() != self.results.fingerprint();

        self.facets = facets;
        self.results = results;
        if changed {
            self.selection.revalidate(&self.results);
        }
        Ok(())
    }
}
