//! Label-overlap similarity ranking.
//!
//! The overlap count is directional and counts every occurrence on the
//! source side: `["x", "x", "x"]` against `["x"]` scores 3, while the reverse
//! scores 1. This is deliberately not a set intersection; callers that want a
//! symmetric measure must not reuse these functions.

use crate::domain::model::LabeledItem;
use std::collections::HashSet;

/// Catalog items need strictly more shared label occurrences than this.
pub const MIN_COMMON_LABELS: usize = 2;

/// Number of entries in `source` whose value occurs anywhere in `other`.
pub fn common_count(source: &[String], other: &[String]) -> usize {
    source.iter().filter(|label| other.contains(*label)).count()
}

/// A catalog item together with its overlap score against the ranked source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored<'a> {
    pub item: &'a LabeledItem,
    pub score: usize,
}

/// Scores every catalog item against `source`, drops those at or below
/// [`MIN_COMMON_LABELS`] and orders the rest by descending score.
///
/// Each item is scored with itself as the counting side, so duplicates in the
/// catalog item's labels count individually. The sort is stable: equal scores
/// keep catalog order.
pub fn rank<'a>(catalog: &'a [LabeledItem], source: &LabeledItem) -> Vec<Scored<'a>> {
    let wanted: HashSet<&str> = source.labels.iter().map(String::as_str).collect();

    let mut scored: Vec<Scored<'a>> = catalog
        .iter()
        .map(|item| Scored {
            item,
            score: item
                .labels
                .iter()
                .filter(|label| wanted.contains(label.as_str()))
                .count(),
        })
        .filter(|candidate| candidate.score > MIN_COMMON_LABELS)
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored
}

/// Catalog items related to `source`, best match first.
pub fn find_related(catalog: &[LabeledItem], source: &LabeledItem) -> Vec<LabeledItem> {
    rank(catalog, source)
        .into_iter()
        .map(|candidate| candidate.item.clone())
        .collect()
}
