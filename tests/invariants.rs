//! Contract Invariant Tests
//!
//! These tests pin the filtering and navigation guarantees.

use std::sync::Arc;

use serde_json::json;
use studio_catalog::{
    from_link, Catalog, FacetState, FilterPipeline, GenreSet, PriceRange, Selection,
    SelectionState, SortKey, Status, StatusToggles, TypeToggles, WorkId, WorkType,
};

fn work(
    id: u32,
    title: &str,
    author: &str,
    genre: &str,
    status: &str,
    work_type: &str,
    rating: &str,
    price: &str,
) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "author": author,
        "genre": genre,
        "status": status,
        "type": work_type,
        "ageRating": rating,
        "price": price,
    })
}

fn create_test_catalog() -> Arc<Catalog> {
    let doc = json!({
        "catalogVersion": "1.0.0",
        "engineMinVersion": "1.0.0",
        "ratingScale": ["13+", "16+", "18+"],
        "categories": [
            { "id": "mystery", "label": "Mystery", "genre": "Mystery" },
            { "id": "crime", "label": "Crime", "genre": "Mystery" },
            { "id": "fantasy", "label": "Fantasy", "genre": "Fantasy" },
            { "id": "sci-fi", "label": "Sci-Fi", "genre": "Sci-Fi" },
        ],
        "works": [
            work(1, "Mystic Shadows", "Elena Moreau", "Fantasy", "Ongoing", "Series", "13+", "$24.99"),
            work(2, "The Silent Patient", "Alex Michaelides", "Mystery", "Completed", "One-shot", "18+", "$22.50"),
            work(3, "Dune", "Frank Herbert", "Sci-Fi", "Ongoing", "Series", "13+", "$19.99"),
            work(4, "Cozy Clues", "Agatha Lane", "Mystery", "Ongoing", "Series", "13+", "$9.99"),
            work(5, "Archangel's War", "Nalini Singh", "Action, Fantasy", "Completed", "Series", "16+", "$29.99"),
            work(6, "1984", "George Orwell", "Dystopian", "Completed", "One-shot", "16+", "$12.99"),
        ],
    });
    Arc::new(Catalog::from_json(&doc.to_string()).unwrap())
}

fn create_pipeline() -> FilterPipeline {
    FilterPipeline::new(create_test_catalog())
}

fn ids(pipeline: &FilterPipeline, facets: &FacetState) -> Vec<u32> {
    pipeline.run(facets).unwrap().ids().into_iter().map(|id| id.0).collect()
}

#[test]
fn invariant_filter_idempotent() {
    let pipeline = create_pipeline();
    let facets = FacetState {
        query: "e".to_string(),
        sort: SortKey::Price,
        ..Default::default()
    };

    let first = pipeline.run(&facets).unwrap();
    let second = pipeline.run(&facets).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn invariant_empty_facets_is_whole_catalog() {
    let pipeline = create_pipeline();
    let mut result = ids(&pipeline, &FacetState::default());
    assert_eq!(result, vec![6, 5, 4, 3, 1, 2]);
    result.sort();
    assert_eq!(result, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn invariant_alias_equivalence() {
    let pipeline = create_pipeline();
    let taxonomy = pipeline.catalog().taxonomy();

    let by_genre = from_link(&FacetState::default(), taxonomy, Some("mystery"));
    let by_alias = from_link(&FacetState::default(), taxonomy, Some("crime"));

    assert_eq!(ids(&pipeline, &by_genre), ids(&pipeline, &by_alias));
    assert_eq!(ids(&pipeline, &by_genre), vec![4, 2]);
}

#[test]
fn invariant_both_checked_equals_neither() {
    let pipeline = create_pipeline();
    let neither = FacetState::default();

    let both_status = FacetState {
        status: StatusToggles { ongoing: true, completed: true },
        ..Default::default()
    };
    let both_type = FacetState {
        work_type: TypeToggles { series: true, standalone: true },
        ..Default::default()
    };

    assert_eq!(ids(&pipeline, &both_status), ids(&pipeline, &neither));
    assert_eq!(ids(&pipeline, &both_type), ids(&pipeline, &neither));
}

#[test]
fn invariant_single_toggle_restricts() {
    let pipeline = create_pipeline();
    let mut facets = FacetState::default();
    facets.status.toggle(Status::Ongoing);
    facets.work_type.toggle(WorkType::Series);
    assert_eq!(ids(&pipeline, &facets), vec![4, 3, 1]);
}

#[test]
fn invariant_price_range_inclusive() {
    let pipeline = create_pipeline();
    let exact = FacetState {
        price: PriceRange::new(19.99, 22.50).unwrap(),
        sort: SortKey::Price,
        ..Default::default()
    };
    assert_eq!(ids(&pipeline, &exact), vec![3, 2]);

    let narrowed = FacetState {
        price: PriceRange::new(20.00, 22.49).unwrap(),
        ..Default::default()
    };
    assert!(ids(&pipeline, &narrowed).is_empty());
}

#[test]
fn invariant_rating_is_ordinal() {
    let pipeline = create_pipeline();
    let facets = FacetState {
        min_rating: Some("16+".to_string()),
        ..Default::default()
    };
    let result = ids(&pipeline, &facets);
    assert!(result.contains(&2)); // 18+
    assert!(!result.contains(&1)); // 13+
    assert_eq!(result, vec![6, 5, 2]);
}

#[test]
fn invariant_navigation_bounds() {
    let results = create_pipeline().run(&FacetState::default()).unwrap();
    let mut selection = Selection::new();

    selection.open(&results, 0).unwrap();
    selection.prev(&results);
    assert_eq!(selection.state(&results), SelectionState::OpenAt(0));

    let last = results.len() - 1;
    selection.open(&results, last).unwrap();
    selection.next(&results);
    assert_eq!(selection.state(&results), SelectionState::OpenAt(last));
}

#[test]
fn invariant_sort_stable() {
    let pipeline = create_pipeline();
    let facets = FacetState {
        genres: GenreSet::from(["Mystery".to_string(), "Sci-Fi".to_string()]),
        sort: SortKey::Catalog,
        ..Default::default()
    };
    assert_eq!(ids(&pipeline, &facets), vec![2, 3, 4]);

    // Equal authors and equal prices keep catalog order.
    let doc = json!({
        "catalogVersion": "1.0.0",
        "engineMinVersion": "1.0.0",
        "works": [
            work(10, "B", "Same", "X", "Ongoing", "Series", "13+", "$5"),
            work(11, "A", "Same", "X", "Ongoing", "Series", "13+", "$5"),
            work(12, "C", "Same", "X", "Ongoing", "Series", "13+", "$5"),
        ],
    });
    let tied = FilterPipeline::new(Arc::new(Catalog::from_json(&doc.to_string()).unwrap()));
    for key in [SortKey::Author, SortKey::Price] {
        let facets = FacetState { sort: key, ..Default::default() };
        assert_eq!(ids(&tied, &facets), vec![10, 11, 12]);
    }
}

#[test]
fn scenario_mystery_at_least_sixteen() {
    let pipeline = create_pipeline();
    let facets = FacetState {
        genres: GenreSet::from(["Mystery".to_string()]),
        min_rating: Some("16+".to_string()),
        ..Default::default()
    };

    let results = pipeline.run(&facets).unwrap();
    assert_eq!(results.len(), 1);
    let work = results.get(0).unwrap();
    assert_eq!(work.id, WorkId(2));
    assert_eq!(work.price, "$22.50");
}

#[test]
fn invariant_text_search_case_insensitive() {
    let pipeline = create_pipeline();
    let facets = FacetState {
        query: "FANTASY".to_string(),
        sort: SortKey::Catalog,
        ..Default::default()
    };
    assert_eq!(ids(&pipeline, &facets), vec![1, 5]);

    let facets = FacetState {
        search_genres: false,
        ..facets
    };
    assert!(ids(&pipeline, &facets).is_empty());
}

#[test]
fn invariant_unknown_category_is_unrestricted() {
    let pipeline = create_pipeline();
    let taxonomy = pipeline.catalog().taxonomy();
    let facets = from_link(&FacetState::default(), taxonomy, Some("no-such-category"));
    assert_eq!(ids(&pipeline, &facets).len(), 6);
}
