//! Terminal dashboard for exploring a CSV dataset of coastal cleanup actions.

mod app;
mod input;
mod ui;

use std::{env, io, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use mutirao_core::{
    dashboard::Dashboard,
    ingest::{CsvFileSource, CsvUrlSource, DatasetSource},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;

use crate::app::App;
use crate::input::Action;

const DEFAULT_DATASET: &str = "base_dados_acoes_limpeza.csv";

#[tokio::main]
async fn main() -> Result<()> {
    // Dataset location: file path or URL, as the first argument
    let location = env::args().nth(1).unwrap_or_else(|| DEFAULT_DATASET.to_owned());

    let source: Box<dyn DatasetSource> =
        if location.starts_with("http://") || location.starts_with("https://") {
            let client = Client::builder().user_agent("mutirao/0.1").build()?;
            Box::new(CsvUrlSource::new(client, location))
        } else {
            Box::new(CsvFileSource::new(location))
        };

    // The one asynchronous step: load and decode before the dashboard runs.
    // A failed load degrades to an empty dataset with a visible message.
    let (records, load_error) = match source.load().await {
        Ok(records) => (records, None),
        Err(err) => (Vec::new(), Some(format!("Failed to load dataset: {err}"))),
    };

    let dashboard = Dashboard::new(records);
    let mut app = App::new(dashboard, source.describe());
    app.error_message = load_error;

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::StepFocusedControl(delta) => app.step_focused(delta),
                Action::SubmitDates => app.submit_dates(),
                Action::ResetFilters => app.reset_filters(),
            }
        }
    }

    Ok(())
}
