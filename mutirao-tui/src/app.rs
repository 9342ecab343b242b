use chrono::NaiveDate;
use mutirao_core::{
    dashboard::Dashboard,
    model::{ActionRecord, FilterUpdate, Selection, parse_date},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Control {
    ActionType,
    Municipality,
    DateFrom,
    DateTo,
}

impl Control {
    pub(crate) fn next(self) -> Self {
        match self {
            Self::ActionType => Self::Municipality,
            Self::Municipality => Self::DateFrom,
            Self::DateFrom => Self::DateTo,
            Self::DateTo => Self::ActionType,
        }
    }

    pub(crate) fn previous(self) -> Self {
        match self {
            Self::ActionType => Self::DateTo,
            Self::Municipality => Self::ActionType,
            Self::DateFrom => Self::Municipality,
            Self::DateTo => Self::DateFrom,
        }
    }

    pub(crate) fn is_date(self) -> bool {
        matches!(self, Self::DateFrom | Self::DateTo)
    }
}

pub(crate) struct App {
    pub dashboard: Dashboard,
    pub source_label: String,

    pub focus: Control,
    pub action_types: Vec<String>,
    pub municipalities: Vec<String>,
    pub type_index: usize,
    pub municipality_index: usize,
    pub date_from_input: String,
    pub date_to_input: String,

    pub list_index: usize,
    pub error_message: Option<String>,
}

impl App {
    pub(crate) fn new(dashboard: Dashboard, source_label: String) -> Self {
        let action_types = dashboard.action_types();
        let municipalities = dashboard.municipalities();
        Self {
            dashboard,
            source_label,
            focus: Control::ActionType,
            action_types,
            municipalities,
            type_index: 0,
            municipality_index: 0,
            date_from_input: String::new(),
            date_to_input: String::new(),
            list_index: 0,
            error_message: None,
        }
    }

    /// Cycle the focused select control and apply the resulting filter
    /// change. Date controls only change on submit.
    pub(crate) fn step_focused(&mut self, delta: isize) {
        let update = match self.focus {
            Control::ActionType => {
                self.type_index = step_index(self.type_index, self.action_types.len() + 1, delta);
                Some(FilterUpdate::action_type(selection_at(
                    &self.action_types,
                    self.type_index,
                )))
            }
            Control::Municipality => {
                self.municipality_index = step_index(
                    self.municipality_index,
                    self.municipalities.len() + 1,
                    delta,
                );
                Some(FilterUpdate::municipality(selection_at(
                    &self.municipalities,
                    self.municipality_index,
                )))
            }
            Control::DateFrom | Control::DateTo => None,
        };

        if let Some(update) = update {
            self.error_message = None;
            self.dashboard.apply(update);
            self.clamp_list_index();
        }
    }

    /// Parse both date inputs and apply the range. An empty input means
    /// unbounded on that side; a malformed one is reported and leaves the
    /// current range untouched.
    pub(crate) fn submit_dates(&mut self) {
        let date_from = match parse_bound(&self.date_from_input, NaiveDate::MIN) {
            Ok(date) => date,
            Err(message) => {
                self.error_message = Some(message);
                return;
            }
        };
        let date_to = match parse_bound(&self.date_to_input, NaiveDate::MAX) {
            Ok(date) => date,
            Err(message) => {
                self.error_message = Some(message);
                return;
            }
        };

        self.error_message = None;
        self.dashboard.apply(FilterUpdate {
            date_from: Some(date_from),
            date_to: Some(date_to),
            ..FilterUpdate::default()
        });
        self.clamp_list_index();
    }

    pub(crate) fn reset_filters(&mut self) {
        self.type_index = 0;
        self.municipality_index = 0;
        self.date_from_input.clear();
        self.date_to_input.clear();
        self.error_message = None;
        self.dashboard.reset();
        self.list_index = 0;
    }

    pub(crate) fn move_selection(&mut self, delta: isize) {
        let count = self.dashboard.snapshot().ranked.len();
        if count == 0 {
            self.list_index = 0;
            return;
        }
        if delta < 0 {
            self.list_index = self.list_index.saturating_sub(delta.unsigned_abs());
        } else {
            self.list_index = (self.list_index + delta.unsigned_abs()).min(count - 1);
        }
    }

    pub(crate) fn focused_date_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Control::DateFrom => Some(&mut self.date_from_input),
            Control::DateTo => Some(&mut self.date_to_input),
            Control::ActionType | Control::Municipality => None,
        }
    }

    pub(crate) fn selected_action(&self) -> Option<&ActionRecord> {
        self.dashboard.snapshot().ranked.get(self.list_index)
    }

    fn clamp_list_index(&mut self) {
        let count = self.dashboard.snapshot().ranked.len();
        self.list_index = self.list_index.min(count.saturating_sub(1));
    }
}

/// Wrap-around step through `count` positions (position 0 is "all").
fn step_index(current: usize, count: usize, delta: isize) -> usize {
    if count == 0 {
        return 0;
    }
    let offset = delta.rem_euclid(count.try_into().unwrap_or(isize::MAX)).unsigned_abs();
    (current + offset) % count
}

fn selection_at(values: &[String], index: usize) -> Selection {
    if index == 0 {
        Selection::All
    } else {
        values
            .get(index - 1)
            .cloned()
            .map_or(Selection::All, Selection::Only)
    }
}

fn parse_bound(input: &str, unbounded: NaiveDate) -> Result<NaiveDate, String> {
    if input.trim().is_empty() {
        return Ok(unbounded);
    }
    parse_date(input).map_err(|err| format!("Invalid date {input:?} (use YYYY-MM-DD): {err}"))
}
