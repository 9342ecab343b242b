//! Domain data structures for cleanup actions, waste categories, and filters.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Identifier for a single cleanup action, unique within a dataset.
pub struct ActionId(pub String);

impl fmt::Display for ActionId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Waste categories weighed separately during a cleanup action.
pub enum WasteCategory {
    /// Discarded fishing nets.
    FishingNets,
    /// Plastics of any kind.
    Plastic,
    /// Metal scrap.
    Metal,
    /// Glass.
    Glass,
    /// Paper and cardboard.
    Paper,
    /// Rubber.
    Rubber,
    /// Fabric and textiles.
    Fabric,
    /// Anything not covered by the categories above.
    Other,
}

impl WasteCategory {
    /// All categories in chart display order.
    pub const ALL: [Self; 8] = [
        Self::FishingNets,
        Self::Plastic,
        Self::Metal,
        Self::Glass,
        Self::Paper,
        Self::Rubber,
        Self::Fabric,
        Self::Other,
    ];

    /// Display label as used by the dataset and the chart legend.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FishingNets => "Redes de Pesca",
            Self::Plastic => "Plástico",
            Self::Metal => "Metal",
            Self::Glass => "Vidro",
            Self::Paper => "Papel/Papelão",
            Self::Rubber => "Borracha",
            Self::Fabric => "Tecido",
            Self::Other => "Outros",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// One logged cleanup action. Immutable once parsed; the record set is loaded
/// once per session and never mutated afterwards.
pub struct ActionRecord {
    /// Stable identifier, unique across the dataset.
    pub id: ActionId,
    /// Name of the beach or site.
    pub location_name: String,
    /// Municipality the site belongs to.
    pub municipality: String,
    /// Site latitude in decimal degrees.
    pub latitude: f64,
    /// Site longitude in decimal degrees.
    pub longitude: f64,
    /// Day the action took place.
    pub date: NaiveDate,
    /// Kind of action (open set, e.g. beach cleanup, underwater cleanup).
    pub action_type: String,
    /// Total collected weight in kilograms.
    pub total_weight_kg: f64,
    /// Number of volunteers taking part.
    pub participants: u32,
    /// Fishing net weight in kilograms.
    pub fishing_nets_kg: f64,
    /// Plastic weight in kilograms.
    pub plastic_kg: f64,
    /// Metal weight in kilograms.
    pub metal_kg: f64,
    /// Glass weight in kilograms.
    pub glass_kg: f64,
    /// Paper and cardboard weight in kilograms.
    pub paper_kg: f64,
    /// Rubber weight in kilograms.
    pub rubber_kg: f64,
    /// Fabric weight in kilograms.
    pub fabric_kg: f64,
    /// Weight of everything else in kilograms.
    pub other_kg: f64,
    /// Optional free-text notes from the field team.
    pub observations: Option<String>,
}

impl ActionRecord {
    /// Collected weight for one category. The per-category weights are not
    /// required to sum to [`Self::total_weight_kg`].
    #[must_use]
    pub fn category_weight_kg(&self, category: WasteCategory) -> f64 {
        match category {
            WasteCategory::FishingNets => self.fishing_nets_kg,
            WasteCategory::Plastic => self.plastic_kg,
            WasteCategory::Metal => self.metal_kg,
            WasteCategory::Glass => self.glass_kg,
            WasteCategory::Paper => self.paper_kg,
            WasteCategory::Rubber => self.rubber_kg,
            WasteCategory::Fabric => self.fabric_kg,
            WasteCategory::Other => self.other_kg,
        }
    }
}

/// Parse a `YYYY-MM-DD` date as stored in the dataset and typed into the
/// date-range controls. Both go through this one function so range
/// comparisons always compare values built the same way.
///
/// # Errors
///
/// Returns [`DataError::Date`] on malformed input instead of producing an
/// unordered value.
pub fn parse_date(text: &str) -> Result<NaiveDate, DataError> {
    Ok(NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")?)
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// A categorical filter control: everything, or one specific value.
pub enum Selection {
    /// No restriction.
    #[default]
    All,
    /// Only records with this exact value.
    Only(String),
}

impl Selection {
    /// Whether a record value passes this selection.
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Inclusive date range for the filter controls.
pub struct DateRange {
    /// Start date (inclusive).
    pub start: NaiveDate,
    /// End date (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Whether `date` falls inside the range. An inverted range (`start`
    /// after `end`) contains nothing, which is accepted rather than rejected.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for DateRange {
    /// The widest representable range, so an untouched control never
    /// excludes anything.
    fn default() -> Self {
        Self {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
/// The current filter selection. Owned and mutated only by the
/// [`crate::dashboard::Dashboard`]; defaults to the all-inclusive state.
pub struct FilterState {
    /// Action type restriction.
    pub action_type: Selection,
    /// Municipality restriction.
    pub municipality: Selection,
    /// Inclusive date range restriction.
    pub range: DateRange,
}

impl FilterState {
    /// Merge a partial update into this state, leaving untouched fields as
    /// they are.
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(selection) = update.action_type {
            self.action_type = selection;
        }
        if let Some(selection) = update.municipality {
            self.municipality = selection;
        }
        if let Some(date) = update.date_from {
            self.range.start = date;
        }
        if let Some(date) = update.date_to {
            self.range.end = date;
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Partial change to the filter state, as produced by one control
/// interaction. Fields left as `None` keep their current value.
pub struct FilterUpdate {
    /// New action type selection, if changed.
    pub action_type: Option<Selection>,
    /// New municipality selection, if changed.
    pub municipality: Option<Selection>,
    /// New range start, if changed.
    pub date_from: Option<NaiveDate>,
    /// New range end, if changed.
    pub date_to: Option<NaiveDate>,
}

impl FilterUpdate {
    /// Update only the action type selection.
    #[must_use]
    pub fn action_type(selection: Selection) -> Self {
        Self {
            action_type: Some(selection),
            ..Self::default()
        }
    }

    /// Update only the municipality selection.
    #[must_use]
    pub fn municipality(selection: Selection) -> Self {
        Self {
            municipality: Some(selection),
            ..Self::default()
        }
    }

    /// Update only the range start.
    #[must_use]
    pub fn date_from(date: NaiveDate) -> Self {
        Self {
            date_from: Some(date),
            ..Self::default()
        }
    }

    /// Update only the range end.
    #[must_use]
    pub fn date_to(date: NaiveDate) -> Self {
        Self {
            date_to: Some(date),
            ..Self::default()
        }
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::NaiveDate;

    use super::{ActionId, ActionRecord};

    /// Build a record with the fields the core logic cares about; category
    /// weights default to zero.
    pub(crate) fn record(
        id: &str,
        municipality: &str,
        date: NaiveDate,
        total_weight_kg: f64,
    ) -> ActionRecord {
        ActionRecord {
            id: ActionId(id.to_owned()),
            location_name: format!("Praia {id}"),
            municipality: municipality.to_owned(),
            latitude: -23.57,
            longitude: -45.18,
            date,
            action_type: "Limpeza de Praia".to_owned(),
            total_weight_kg,
            participants: 10,
            fishing_nets_kg: 0.0,
            plastic_kg: 0.0,
            metal_kg: 0.0,
            glass_kg: 0.0,
            paper_kg: 0.0,
            rubber_kg: 0.0,
            fabric_kg: 0.0,
            other_kg: 0.0,
            observations: None,
        }
    }

    pub(crate) fn day(text: &str) -> NaiveDate {
        super::parse_date(text).expect("valid test date")
    }
}
