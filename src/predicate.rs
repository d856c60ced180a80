//! Predicate Compiler - One Rule per Facet
//!
//! Each facet dimension compiles to an independent rule. A work is kept
//! iff every rule accepts it.

use crate::catalog::Work;
use crate::facets::{FacetState, StatusToggles, TypeToggles};
use crate::pipeline::PipelineError;
use crate::price::PriceRange;
use crate::rating::RatingScale;
use crate::taxonomy::GenreSet;

/// Membership test contributed by one facet dimension.
pub trait FacetRule {
    fn name(&self) -> &'static str;
    fn matches(&self, work: &Work) -> bool;
}

// --- Concrete Rules ---

pub struct TextRule {
    needle: Option<String>,
    search_genres: bool,
}

impl TextRule {
    pub fn new(query: &str, search_genres: bool) -> Self {
        let needle = if query.trim().is_empty() {
            None
        } else {
            Some(query.to_lowercase())
        };
        Self { needle, search_genres }
    }
}

impl FacetRule for TextRule {
    fn name(&self) -> &'static str { "text" }

    fn matches(&self, work: &Work) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        work.title.to_lowercase().contains(needle.as_str())
            || work.author.to_lowercase().contains(needle.as_str())
            || (self.search_genres
                && work.genres.iter().any(|g| g.to_lowercase().contains(needle.as_str())))
    }
}

pub struct GenreRule {
    genres: GenreSet,
}

impl FacetRule for GenreRule {
    fn name(&self) -> &'static str { "genre" }

    // Any shared tag is enough.
    fn matches(&self, work: &Work) -> bool {
        self.genres.is_empty() || self.genres.iter().any(|g| work.has_genre(g))
    }
}

pub struct PriceRule {
    range: PriceRange,
}

impl FacetRule for PriceRule {
    fn name(&self) -> &'static str { "price" }

    fn matches(&self, work: &Work) -> bool {
        self.range.contains(work.price_amount())
    }
}

pub struct RatingRule {
    scale: RatingScale,
    threshold: Option<usize>,
}

impl RatingRule {
    pub fn new(scale: &RatingScale, threshold: Option<&str>) -> Result<Self, PipelineError> {
        let threshold = match threshold {
            Some(label) => Some(
                scale
                    .index_of(label)
                    .ok_or_else(|| PipelineError::UnknownRating(label.to_string()))?,
            ),
            None => None,
        };
        Ok(Self {
            scale: scale.clone(),
            threshold,
        })
    }
}

impl FacetRule for RatingRule {
    fn name(&self) -> &'static str { "rating" }

    fn matches(&self, work: &Work) -> bool {
        match self.threshold {
            None => true,
            Some(min) => self
                .scale
                .index_of(&work.rating)
                .is_some_and(|index| index >= min),
        }
    }
}

pub struct StatusRule(StatusToggles);

impl FacetRule for StatusRule {
    fn name(&self) -> &'static str { "status" }

    fn matches(&self, work: &Work) -> bool {
        self.0.allows(work.status)
    }
}

pub struct TypeRule(TypeToggles);

impl FacetRule for TypeRule {
    fn name(&self) -> &'static str { "type" }

    fn matches(&self, work: &Work) -> bool {
        self.0.allows(work.work_type)
    }
}

/// AND of every facet rule.
pub struct CompiledFilter {
    rules: Vec<Box<dyn FacetRule>>,
}

impl CompiledFilter {
    pub fn matches(&self, work: &Work) -> bool {
        self.rules.iter().all(|rule| rule.matches(work))
    }

    /// Name of the first rule that rejects `work`, if any.
    pub fn rejected_by(&self, work: &Work) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| !rule.matches(work))
            .map(|rule| rule.name())
    }
}

/// Build the composite membership test for `facets`.
///
/// Fails only on a minimum rating that is not on `scale`.
pub fn compile(facets: &FacetState, scale: &RatingScale) -> Result<CompiledFilter, PipelineError> {
    let rules: Vec<Box<dyn FacetRule>> = vec![
        Box::new(TextRule::new(&facets.query, facets.search_genres)),
        Box::new(GenreRule {
            genres: facets.genres.clone(),
        }),
        Box::new(PriceRule { range: facets.price }),
        Box::new(RatingRule::new(scale, facets.min_rating.as_deref())?),
        Box::new(StatusRule(facets.status)),
        Box::new(TypeRule(facets.work_type)),
    ];

    Ok(CompiledFilter { rules })
}
