//! Selection / Navigation Controller
//!
//! The open detail view is held by work id. Its index is derived from the
//! current results on demand, so a stale position can never be exposed.

use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Work, WorkId};
use crate::pipeline::OrderedResults;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Cannot open a selection: the result list is empty")]
    EmptyResults,
}

/// What the presentation layer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "index", rename_all = "camelCase")]
pub enum SelectionState {
    Closed,
    OpenAt(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    open: Option<WorkId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// The held work id.
    ///
    /// This can name a work that has since left the results until
    /// [`Selection::revalidate`] runs. Use [`Selection::is_open`] or
    /// [`Selection::state`] for what is actually shown.
    pub fn selected_id(&self) -> Option<WorkId> {
        self.open
    }

    /// True when the held work is present in `results`.
    pub fn is_open(&self, results: &OrderedResults) -> bool {
        self.index(results).is_some()
    }

    /// Whether `prev` would move.
    pub fn has_prev(&self, results: &OrderedResults) -> bool {
        self.index(results).is_some_and(|i| i > 0)
    }

    /// Whether `next` would move.
    pub fn has_next(&self, results: &OrderedResults) -> bool {
        self.index(results).is_some_and(|i| i + 1 < results.len())
    }

    /// Current index into `results`, if open and still present.
    pub fn index(&self, results: &OrderedResults) -> Option<usize> {
        self.open.and_then(|id| results.position_of(id))
    }

    pub fn state(&self, results: &OrderedResults) -> SelectionState {
        match self.index(results) {
            Some(i) => SelectionState::OpenAt(i),
            None => SelectionState::Closed,
        }
    }

    pub fn selected<'r>(&self, results: &'r OrderedResults) -> Option<&'r Work> {
        self.index(results).and_then(|i| results.get(i))
    }

    /// Open the detail view at `index`.
    ///
    /// Opening on an empty list is a caller bug. An index past the end of a
    /// non-empty list is ignored and returns `Ok(false)`.
    pub fn open(&mut self, results: &OrderedResults, index: usize) -> Result<bool, NavigationError> {
        if results.is_empty() {
            return Err(NavigationError::EmptyResults);
        }
        match results.get(index) {
            Some(work) => {
                self.open = Some(work.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Open the work with `id` if it is in `results`.
    pub fn open_work(&mut self, results: &OrderedResults, id: WorkId) -> bool {
        if results.position_of(id).is_some() {
            self.open = Some(id);
            true
        } else {
            false
        }
    }

    /// Step forward; stops at the last index.
    pub fn next(&mut self, results: &OrderedResults) -> bool {
        self.step(results, |i| i.checked_add(1))
    }

    /// Step back; stops at index 0.
    pub fn prev(&mut self, results: &OrderedResults) -> bool {
        self.step(results, |i| i.checked_sub(1))
    }

    pub fn close(&mut self) {
        self.open = None;
    }

    /// Close if the open work is no longer in `results`.
    ///
    /// Returns true when this closed the view.
    pub fn revalidate(&mut self, results: &OrderedResults) -> bool {
        match self.open {
            Some(id) if results.position_of(id).is_none() => {
                tracing::info!(work = %id, "selected work left the results, closing detail view");
                self.open = None;
                true
            }
            _ => false,
        }
    }

    fn step(&mut self, results: &OrderedResults, advance: impl Fn(usize) -> Option<usize>) -> bool {
        let Some(current) = self.index(results) else {
            return false;
        };
        match advance(current).and_then(|i| results.get(i)) {
            Some(work) => {
                self.open = Some(work.id);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::facets::FacetState;
    use crate::pipeline::FilterPipeline;
    use std::sync::Arc;

    fn results(query: &str) -> OrderedResults {
        let pipeline = FilterPipeline::new(Arc::new(Catalog::builtin().unwrap()));
        let facets = FacetState {
            query: query.to_string(),
            ..Default::default()
        };
        pipeline.run(&facets).unwrap()
    }

    #[test]
    fn test_hard_stops_at_both_ends() {
        let all = results("");
        let mut selection = Selection::new();
        selection.open(&all, 0).unwrap();
        assert!(!selection.prev(&all));
        assert_eq!(selection.state(&all), SelectionState::OpenAt(0));

        let last = all.len() - 1;
        selection.open(&all, last).unwrap();
        assert!(!selection.next(&all));
        assert_eq!(selection.state(&all), SelectionState::OpenAt(last));
    }

    #[test]
    fn test_step_through() {
        let all = results("");
        let mut selection = Selection::new();
        selection.open(&all, 2).unwrap();
        assert!(selection.next(&all));
        assert_eq!(selection.index(&all), Some(3));
        assert!(selection.prev(&all));
        assert!(selection.prev(&all));
        assert_eq!(selection.index(&all), Some(1));
    }

    #[test]
    fn test_open_on_empty_is_error() {
        let none = results("no such work anywhere");
        let mut selection = Selection::new();
        assert_eq!(selection.open(&none, 0), Err(NavigationError::EmptyResults));
        assert!(!selection.is_open(&none));
    }

    #[test]
    fn test_open_past_end_is_noop() {
        let all = results("");
        let mut selection = Selection::new();
        assert_eq!(selection.open(&all, all.len()), Ok(false));
        assert_eq!(selection.state(&all), SelectionState::Closed);
    }

    #[test]
    fn test_navigation_while_closed_is_noop() {
        let all = results("");
        let mut selection = Selection::new();
        assert!(!selection.next(&all));
        assert!(!selection.prev(&all));
        assert_eq!(selection.selected(&all), None);
    }

    #[test]
    fn test_revalidate_closes_when_work_filtered_out() {
        let all = results("");
        let mut selection = Selection::new();
        selection.open(&all, all.len() - 1).unwrap();
        let dune = results("dune");
        assert!(selection.revalidate(&dune));
        assert_eq!(selection.state(&dune), SelectionState::Closed);
    }

    #[test]
    fn test_stale_id_does_not_read_as_open() {
        let all = results("");
        let mut selection = Selection::new();
        selection.open(&all, all.len() - 1).unwrap();
        let held = selection.selected_id();

        let dune = results("dune");
        assert!(!selection.is_open(&dune));
        assert_eq!(selection.state(&dune), SelectionState::Closed);
        assert_eq!(selection.selected_id(), held);

        selection.revalidate(&dune);
        assert_eq!(selection.selected_id(), None);
    }

    #[test]
    fn test_has_prev_and_has_next_track_the_ends() {
        let all = results("");
        let mut selection = Selection::new();
        assert!(!selection.has_prev(&all));
        assert!(!selection.has_next(&all));

        selection.open(&all, 0).unwrap();
        assert!(!selection.has_prev(&all));
        assert!(selection.has_next(&all));

        selection.open(&all, 1).unwrap();
        assert!(selection.has_prev(&all));
        assert!(selection.has_next(&all));

        selection.open(&all, all.len() - 1).unwrap();
        assert!(selection.has_prev(&all));
        assert!(!selection.has_next(&all));

        let dune = results("dune");
        let mut single = Selection::new();
        single.open(&dune, 0).unwrap();
        assert!(!single.has_prev(&dune));
        assert!(!single.has_next(&dune));
    }

    #[test]
    fn test_selection_follows_work_to_new_index() {
        let all = results("");
        let mut selection = Selection::new();
        let dune_at = all.position_of(WorkId(4)).unwrap();
        selection.open(&all, dune_at).unwrap();

        let dune = results("dune");
        assert!(!selection.revalidate(&dune));
        assert_eq!(selection.state(&dune), SelectionState::OpenAt(0));
        assert_eq!(selection.selected(&dune).unwrap().title, "Dune");
    }
}
