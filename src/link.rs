//! Category Deep-Link Sync
//!
//! Mirrors the genre facet into a single `category` query parameter and
//! back. Only a selection that one category id can express survives the
//! round trip; anything else serialises as "no parameter".

use url::form_urlencoded;

use crate::facets::FacetState;
use crate::taxonomy::{CategoryRegistry, ALL_CATEGORY};

pub const CATEGORY_PARAM: &str = "category";

/// Replace the genre facet with what `param` names.
///
/// `None`, `"all"` and unknown ids clear it. A known id selects its tag
/// alone, dropping any earlier genre selection.
pub fn apply_link(facets: &mut FacetState, registry: &CategoryRegistry, param: Option<&str>) {
    facets.genres = match param {
        Some(id) => registry.resolve(id),
        None => Default::default(),
    };
}

/// Pure form of [`apply_link`].
pub fn from_link(facets: &FacetState, registry: &CategoryRegistry, param: Option<&str>) -> FacetState {
    let mut next = facets.clone();
    apply_link(&mut next, registry, param);
    next
}

/// The `category` value for `facets`, or `None` to omit the parameter.
pub fn to_link(facets: &FacetState, registry: &CategoryRegistry) -> Option<String> {
    let mut genres = facets.genres.iter();
    match (genres.next(), genres.next()) {
        (Some(only), None) => registry.canonical_id(only).map(str::to_string),
        _ => None,
    }
}

/// Read the `category` parameter from a form-encoded query string.
///
/// Values are percent-decoded (`+` reads as a space). An empty value reads
/// as absent.
pub fn read_category(query: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key.as_ref() == CATEGORY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

/// Set or remove the `category` parameter, keeping every other pair.
///
/// `"all"` removes it, like `None`. The result is re-encoded, so reserved
/// characters in any value survive a read back.
pub fn write_category(query: &str, param: Option<&str>) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
        if key != CATEGORY_PARAM {
            out.append_pair(&key, &value);
        }
    }

    if let Some(id) = param.filter(|id| !id.is_empty() && *id != ALL_CATEGORY) {
        out.append_pair(CATEGORY_PARAM, id);
    }

    out.finish()
}
