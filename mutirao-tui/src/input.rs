use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Action {
    None,
    Quit,
    /// Cycle the focused select control by the given amount.
    StepFocusedControl(isize),
    /// Parse the date inputs and apply the range.
    SubmitDates,
    /// Restore the default all-inclusive filter state.
    ResetFilters,
}

pub(crate) fn handle_key_event(key: KeyEvent, app: &mut App) -> Action {
    use KeyCode::{BackTab, Backspace, Char, Down, Enter, Left, Right, Tab, Up};

    // Global quit shortcuts
    if key.code == Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    if key.code == Char('q') && key.modifiers.is_empty() {
        return Action::Quit;
    }

    match key.code {
        Tab => {
            app.focus = app.focus.next();
            Action::None
        }
        BackTab => {
            app.focus = app.focus.previous();
            Action::None
        }
        Up | Char('k') => {
            app.move_selection(-1);
            Action::None
        }
        Down | Char('j') => {
            app.move_selection(1);
            Action::None
        }
        Left => {
            if app.focus.is_date() {
                Action::None
            } else {
                Action::StepFocusedControl(-1)
            }
        }
        Right => {
            if app.focus.is_date() {
                Action::None
            } else {
                Action::StepFocusedControl(1)
            }
        }
        Enter => {
            if app.focus.is_date() {
                Action::SubmitDates
            } else {
                Action::StepFocusedControl(1)
            }
        }
        Backspace => {
            if let Some(buffer) = app.focused_date_input_mut() {
                buffer.pop();
            }
            Action::None
        }
        Char('r') => Action::ResetFilters,
        Char(character) => {
            // Date inputs only ever contain digits and dashes, which keeps
            // every letter free for shortcuts
            if (character.is_ascii_digit() || character == '-')
                && !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT)
                && let Some(buffer) = app.focused_date_input_mut()
                && buffer.len() < 10
            {
                buffer.push(character);
            }
            Action::None
        }
        _ => Action::None,
    }
}
