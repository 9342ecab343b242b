//! Aggregation over an already-filtered set of actions.
//!
//! Every function here is pure and total: an empty input produces zero-valued
//! results, never an error.

use std::collections::HashSet;

use crate::model::{ActionRecord, WasteCategory};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// Summary numbers shown in the statistics panel.
pub struct Stats {
    /// Number of actions in the set.
    pub actions: usize,
    /// Sum of total collected weight in kilograms.
    pub total_weight_kg: f64,
    /// Number of distinct location names.
    pub unique_locations: usize,
    /// Sum of participant counts.
    pub participants: u64,
}

impl Stats {
    /// Compute all four summary numbers in one pass over the set.
    #[must_use]
    pub fn compute(records: &[ActionRecord]) -> Self {
        let mut locations: HashSet<&str> = HashSet::new();
        let mut total_weight_kg = 0.0;
        let mut participants: u64 = 0;
        for record in records {
            locations.insert(record.location_name.as_str());
            total_weight_kg += record.total_weight_kg;
            participants += u64::from(record.participants);
        }
        Self {
            actions: records.len(),
            total_weight_kg,
            unique_locations: locations.len(),
            participants,
        }
    }
}

/// Per-category weight sums, always all eight categories in the fixed chart
/// display order, zero-valued when the set is empty.
#[must_use]
pub fn category_totals(records: &[ActionRecord]) -> Vec<(WasteCategory, f64)> {
    WasteCategory::ALL
        .into_iter()
        .map(|category| {
            let total = records
                .iter()
                .map(|record| record.category_weight_kg(category))
                .sum();
            (category, total)
        })
        .collect()
}

/// The `limit` heaviest records by total weight, descending. Ties keep their
/// original relative order; fewer than `limit` records returns all of them.
#[must_use]
pub fn top_by_weight(records: &[ActionRecord], limit: usize) -> Vec<ActionRecord> {
    let mut ranked: Vec<&ActionRecord> = records.iter().collect();
    // sort_by is stable, so equal weights keep input order
    ranked.sort_by(|left, right| right.total_weight_kg.total_cmp(&left.total_weight_kg));
    ranked.into_iter().take(limit).cloned().collect()
}
