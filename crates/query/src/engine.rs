use normalize::CanonicalRecipe;

use crate::types::{CATEGORY_ALL, FilterSpec};


/// Distinct category labels for the filter UI.
///
/// Returns `["All", c1, c2, ...]` where the labels after the sentinel are the
/// distinct cuisine values of the input, in first-seen order. A record whose
/// cuisine literally equals `"All"` counts as a duplicate of the sentinel
/// (the sequence never carries two "All" entries), but the record itself is
/// left untouched for filtering.
pub fn categories(records: &[CanonicalRecipe]) -> Vec<String> {
    let mut labels = vec![CATEGORY_ALL.to_string()];
    for record in records {
        if !labels.iter().any(|seen| seen == &record.cuisine) {
            labels.push(record.cuisine.clone());
        }
    }
    labels
}

/// Records satisfying every active predicate of the spec, input order kept.
///
/// Pure: the same list and spec always produce the same sublist.
pub fn filter(records: &[CanonicalRecipe], spec: &FilterSpec) -> Vec<CanonicalRecipe> {
    records
        .iter()
        .filter(|record| matches_spec(record, spec))
        .cloned()
        .collect()
}

/// Whether a single record satisfies every active predicate of the spec.
pub fn matches_spec(record: &CanonicalRecipe, spec: &FilterSpec) -> bool {
    spec.category().admits(&record.cuisine)
        && matches_text(record, spec)
        && matches_price(record, spec)
}

fn matches_text(record: &CanonicalRecipe, spec: &FilterSpec) -> bool {
    let Some(query) = spec.text() else {
        return true;
    };
    let needle = query.to_lowercase();

    contains_ci(&record.name, &needle)
        || contains_ci(&record.cuisine, &needle)
        || contains_ci(&record.instructions, &needle)
        || record
            .ingredients
            .iter()
            .any(|ingredient| contains_ci(&ingredient.name, &needle))
}

/// Substring match against an already-lowercased needle.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_price(record: &CanonicalRecipe, spec: &FilterSpec) -> bool {
    if !spec.has_price_bound() {
        return true;
    }
    // Closed world: a record without a price never satisfies a price-range
    // query, even `min_price = 0`. Absence of price data is not "free".
    let Some(price) = record.estimated_price else {
        return false;
    };
    spec.min_price().map_or(true, |min| price >= min)
        && spec.max_price().map_or(true, |max| price <= max)
}
