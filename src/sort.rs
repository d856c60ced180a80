//! Sort Stage
//!
//! Stable ordering by the facet's sort key. The input is never reordered in
//! place; callers get a new sequence.

use std::cmp::Ordering;

use crate::catalog::Work;
use crate::facets::SortKey;

/// Compare two works by `key`. `SortKey::Catalog` treats all works as equal.
pub fn compare(a: &Work, b: &Work, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Author => a.author.cmp(&b.author),
        SortKey::Price => a.price_amount().total_cmp(&b.price_amount()),
        SortKey::Catalog => Ordering::Equal,
    }
}

/// Return `works` ordered by `key`; ties keep their input order.
pub fn sort_works<'a>(works: &[&'a Work], key: SortKey) -> Vec<&'a Work> {
    let mut sorted = works.to_vec();
    if key != SortKey::Catalog {
        sorted.sort_by(|a, b| compare(a, b, key));
    }
    sorted
}
