//! Pure filter engine narrowing the record set to the current selection.

use crate::model::{ActionRecord, FilterState};

/// Apply `state` to `records`, preserving input order.
///
/// A record is kept when the action type and municipality selections both
/// match and its date falls inside the inclusive range. Deterministic and
/// side-effect free; an empty input or an inverted range yields an empty
/// result rather than an error.
#[must_use]
pub fn filter_records<'records>(
    records: &'records [ActionRecord],
    state: &FilterState,
) -> Vec<&'records ActionRecord> {
    records
        .iter()
        .filter(|record| {
            state.action_type.matches(&record.action_type)
                && state.municipality.matches(&record.municipality)
                && state.range.contains(record.date)
        })
        .collect()
}
