//! Deterministic row ordering.
//!
//! Rows sort by category label (case-insensitive), then by name. Name order
//! compares lowercased text first and raw text second; Hangul syllables are
//! encoded in dictionary order, so code-point comparison matches Korean
//! collation for them. `sort_by` is stable, so full ties keep input order.

use std::cmp::Ordering;

use crate::model::DisplayItem;

/// Sorts a section in place.
pub fn sort_section(rows: &mut [DisplayItem]) {
	rows.sort_by(compare_rows);
}

pub fn compare_rows(a: &DisplayItem, b: &DisplayItem) -> Ordering {
	caseless(&a.label, &b.label).then_with(|| collate(&a.name, &b.name))
}

fn caseless(a: &str, b: &str) -> Ordering {
	a.chars()
		.flat_map(char::to_lowercase)
		.cmp(b.chars().flat_map(char::to_lowercase))
}

/// Name comparison: caseless first, then exact text as tie-break.
pub fn collate(a: &str, b: &str) -> Ordering {
	caseless(a, b).then_with(|| a.cmp(b))
}
