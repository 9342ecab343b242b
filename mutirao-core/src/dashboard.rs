//! View coordination: one owner for the record set and the filter state,
//! recomputing every derived view on each filter change.

use crate::aggregate::{Stats, category_totals, top_by_weight};
use crate::filter::filter_records;
use crate::model::{ActionRecord, FilterState, FilterUpdate, WasteCategory};
use crate::visual::{Marker, marker_for};

/// Number of entries in the top-locations ranking.
pub const TOP_LOCATIONS: usize = 3;

#[derive(Debug, Clone, Default)]
/// The immutable result bundle one recomputation produces. Rendering layers
/// consume this and never reach back into the dashboard's state.
pub struct ViewSnapshot {
    /// Summary numbers for the statistics panel.
    pub stats: Stats,
    /// Per-category sums in fixed display order, feeding the chart.
    pub category_totals: Vec<(WasteCategory, f64)>,
    /// The heaviest [`TOP_LOCATIONS`] actions, descending.
    pub top_locations: Vec<ActionRecord>,
    /// Every filtered action, weight-descending, feeding the sidebar list.
    pub ranked: Vec<ActionRecord>,
    /// Every filtered action in original dataset order.
    pub records: Vec<ActionRecord>,
    /// Map markers aligned one-to-one with `records`.
    pub markers: Vec<Marker>,
}

/// Sole owner of the loaded record set and the mutable filter state.
///
/// The record set is loaded once and never changes; each filter interaction
/// merges a [`FilterUpdate`] and synchronously rebuilds the whole
/// [`ViewSnapshot`]. By the time [`Dashboard::apply`] returns, every derived
/// view is up to date; there is no incremental path.
pub struct Dashboard {
    records: Vec<ActionRecord>,
    filter: FilterState,
    snapshot: ViewSnapshot,
}

impl Dashboard {
    /// Create a dashboard over a loaded record set with the all-inclusive
    /// default filter; the initial snapshot covers every record.
    #[must_use]
    pub fn new(records: Vec<ActionRecord>) -> Self {
        let mut dashboard = Self {
            records,
            filter: FilterState::default(),
            snapshot: ViewSnapshot::default(),
        };
        dashboard.recompute();
        dashboard
    }

    /// Merge a partial filter change and recompute every derived view.
    pub fn apply(&mut self, update: FilterUpdate) -> &ViewSnapshot {
        self.filter.merge(update);
        self.recompute();
        &self.snapshot
    }

    /// Restore the default filter state and recompute every derived view.
    pub fn reset(&mut self) -> &ViewSnapshot {
        self.filter = FilterState::default();
        self.recompute();
        &self.snapshot
    }

    /// The derived views as of the latest filter change.
    #[must_use]
    pub fn snapshot(&self) -> &ViewSnapshot {
        &self.snapshot
    }

    /// The current filter selection.
    #[must_use]
    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// The full unfiltered record set.
    #[must_use]
    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    /// Distinct municipalities in first-seen order, for the filter control.
    #[must_use]
    pub fn municipalities(&self) -> Vec<String> {
        distinct(self.records.iter().map(|record| &record.municipality))
    }

    /// Distinct action types in first-seen order, for the filter control.
    #[must_use]
    pub fn action_types(&self) -> Vec<String> {
        distinct(self.records.iter().map(|record| &record.action_type))
    }

    fn recompute(&mut self) {
        let filtered: Vec<ActionRecord> = filter_records(&self.records, &self.filter)
            .into_iter()
            .cloned()
            .collect();

        // Fixed recompute order: statistics, chart data, ranking, list and
        // markers. Each view derives fully from the filtered set.
        let stats = Stats::compute(&filtered);
        let totals = category_totals(&filtered);
        let top_locations = top_by_weight(&filtered, TOP_LOCATIONS);
        let ranked = top_by_weight(&filtered, filtered.len());
        let markers = filtered.iter().map(marker_for).collect();

        self.snapshot = ViewSnapshot {
            stats,
            category_totals: totals,
            top_locations,
            ranked,
            records: filtered,
            markers,
        };
    }
}

fn distinct<'value>(values: impl Iterator<Item = &'value String>) -> Vec<String> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(value) {
            seen.push(value.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, TOP_LOCATIONS};
    use crate::model::testutil::{day, record};
    use crate::model::{ActionRecord, FilterState, FilterUpdate, Selection, WasteCategory};
    use crate::visual::marker_radius;

    fn dataset() -> Vec<ActionRecord> {
        vec![
            record("a1", "Ubatuba", day("2024-01-10"), 1.0),
            record("a2", "Ubatuba", day("2024-02-20"), 5.0),
            record("a3", "Ilhabela", day("2024-03-30"), 3.0),
        ]
    }

    fn ids(records: &[ActionRecord]) -> Vec<&str> {
        records.iter().map(|action| action.id.0.as_str()).collect()
    }

    #[test]
    fn initial_snapshot_covers_every_record() {
        let dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.snapshot();
        assert_eq!(ids(&snapshot.records), ["a1", "a2", "a3"]);
        assert_eq!(snapshot.stats.actions, 3);
        assert_eq!(snapshot.markers.len(), 3);
        assert_eq!(snapshot.category_totals.len(), WasteCategory::ALL.len());
    }

    #[test]
    fn scenario_from_the_field_data() {
        // Weights 1.0 / 5.0 / 3.0 across municipalities A, A, B
        let mut dashboard = Dashboard::new(dataset());

        let snapshot = dashboard.apply(FilterUpdate::municipality(Selection::Only(
            "Ubatuba".to_owned(),
        )));
        assert_eq!(ids(&snapshot.records), ["a1", "a2"]);
        assert_eq!(snapshot.stats.total_weight_kg, 6.0);

        dashboard.reset();
        let top = &dashboard.snapshot().top_locations;
        assert_eq!(
            top.first().map(|action| action.id.0.as_str()),
            Some("a2"),
            "heaviest action leads the ranking"
        );
    }

    #[test]
    fn every_view_updates_together() {
        let mut dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.apply(FilterUpdate::municipality(Selection::Only(
            "Ilhabela".to_owned(),
        )));

        assert_eq!(snapshot.stats.actions, 1);
        assert_eq!(snapshot.stats.total_weight_kg, 3.0);
        assert_eq!(ids(&snapshot.records), ["a3"]);
        assert_eq!(ids(&snapshot.ranked), ["a3"]);
        assert_eq!(snapshot.markers.len(), 1);
        assert!(snapshot.top_locations.len() <= TOP_LOCATIONS);
    }

    #[test]
    fn partial_updates_accumulate() {
        let mut dashboard = Dashboard::new(dataset());
        dashboard.apply(FilterUpdate::municipality(Selection::Only(
            "Ubatuba".to_owned(),
        )));
        let snapshot = dashboard.apply(FilterUpdate::date_from(day("2024-02-01")));
        // Both the earlier municipality choice and the new date bound hold
        assert_eq!(ids(&snapshot.records), ["a2"]);
    }

    #[test]
    fn reset_after_any_changes_restores_the_full_set() {
        let mut dashboard = Dashboard::new(dataset());
        dashboard.apply(FilterUpdate::municipality(Selection::Only(
            "Ubatuba".to_owned(),
        )));
        dashboard.apply(FilterUpdate::date_from(day("2024-12-01")));
        dashboard.apply(FilterUpdate::action_type(Selection::Only(
            "Mergulho".to_owned(),
        )));

        let snapshot = dashboard.reset();
        assert_eq!(ids(&snapshot.records), ["a1", "a2", "a3"]);
        assert_eq!(dashboard.filter_state(), &FilterState::default());
    }

    #[test]
    fn inverted_range_empties_every_view() {
        let mut dashboard = Dashboard::new(dataset());
        dashboard.apply(FilterUpdate::date_from(day("2025-01-01")));
        let snapshot = dashboard.apply(FilterUpdate::date_to(day("2024-01-01")));

        assert!(snapshot.records.is_empty());
        assert!(snapshot.markers.is_empty());
        assert!(snapshot.top_locations.is_empty());
        assert_eq!(snapshot.stats.actions, 0);
        // Chart keeps all eight zero-valued categories
        assert_eq!(snapshot.category_totals.len(), 8);
        assert!(snapshot.category_totals.iter().all(|entry| entry.1 == 0.0));
    }

    #[test]
    fn empty_dataset_is_a_valid_steady_state() {
        let mut dashboard = Dashboard::new(Vec::new());
        assert_eq!(dashboard.snapshot().stats.actions, 0);
        assert!(dashboard.municipalities().is_empty());
        let snapshot = dashboard.apply(FilterUpdate::municipality(Selection::Only(
            "Ubatuba".to_owned(),
        )));
        assert!(snapshot.records.is_empty());
    }

    #[test]
    fn distinct_values_keep_first_seen_order() {
        let dashboard = Dashboard::new(vec![
            record("a1", "Ubatuba", day("2024-01-10"), 1.0),
            record("a2", "Ilhabela", day("2024-02-20"), 5.0),
            record("a3", "Ubatuba", day("2024-03-30"), 3.0),
            record("a4", "São Sebastião", day("2024-04-05"), 2.0),
        ]);
        assert_eq!(
            dashboard.municipalities(),
            ["Ubatuba", "Ilhabela", "São Sebastião"]
        );
        assert_eq!(dashboard.action_types(), ["Limpeza de Praia"]);
    }

    #[test]
    fn markers_carry_the_visual_mapping() {
        let dashboard = Dashboard::new(dataset());
        let snapshot = dashboard.snapshot();
        for (marker, action) in snapshot.markers.iter().zip(&snapshot.records) {
            assert_eq!(marker.id, action.id);
            assert_eq!(marker.radius, marker_radius(action.total_weight_kg));
        }
    }
}
