use mutirao_core::{
    model::WasteCategory,
    visual::{MAX_RADIUS, Marker, Rgb},
};
use ratatui::{
    prelude::*,
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, List, ListItem, ListState, Paragraph, Wrap,
        canvas::{Canvas, Circle},
    },
};

use crate::app::{App, Control};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let filtered = app.dashboard.snapshot().stats.actions;
    let loaded = app.dashboard.records().len();
    let header = Paragraph::new(format!(
        "mutirão – coastal cleanup actions · {filtered} of {loaded} shown · {}",
        app.source_label
    ))
    .block(Block::default().borders(Borders::ALL).title("Mutirão"));
    frame.render_widget(header, *header_area);

    draw_content(frame, app, *content_area);

    // Status bar
    let nav_hint =
        "Tab focus · ←/→ change filter · Enter apply dates · ↑/↓ list · r reset · q/Ctrl-C quit";
    let status_text = app.error_message.as_ref().map_or_else(
        || nav_hint.to_owned(),
        |message| format!("{message} · {nav_hint}"),
    );
    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });
    frame.render_widget(status, *status_area);
}

fn draw_content(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let column_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(40),
            Constraint::Min(0),
            Constraint::Length(46),
        ])
        .split(area);
    let columns = column_chunks.as_ref();
    let [sidebar_area, map_column_area, right_area] = columns else {
        return;
    };

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(0)])
        .split(*sidebar_area);
    let sidebar = sidebar_chunks.as_ref();
    if let [filters_area, list_area] = sidebar {
        draw_filters(frame, app, *filters_area);
        draw_actions_list(frame, app, *list_area);
    }

    let map_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(*map_column_area);
    let map_column = map_chunks.as_ref();
    if let [map_area, detail_area] = map_column {
        draw_map(frame, app, *map_area);
        draw_detail(frame, app, *detail_area);
    }

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(10),
            Constraint::Length(7),
        ])
        .split(*right_area);
    let right = right_chunks.as_ref();
    if let [stats_area, chart_area, top_area] = right {
        draw_stats(frame, app, *stats_area);
        draw_chart(frame, app, *chart_area);
        draw_top_locations(frame, app, *top_area);
    }
}

fn draw_filters(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let focus_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let row = |label: &str, value: String, control: Control| -> Line<'static> {
        let style = if app.focus == control {
            focus_style
        } else {
            Style::default()
        };
        let prefix = if app.focus == control { "▸ " } else { "  " };
        Line::styled(format!("{prefix}{label}: {value}"), style)
    };

    let date_value = |input: &str, control: Control| -> String {
        if input.is_empty() && app.focus != control {
            "(any)".to_owned()
        } else if app.focus == control {
            format!("{input}_")
        } else {
            input.to_owned()
        }
    };

    let lines = vec![
        row(
            "Type",
            select_label(&app.action_types, app.type_index),
            Control::ActionType,
        ),
        row(
            "Municipality",
            select_label(&app.municipalities, app.municipality_index),
            Control::Municipality,
        ),
        row(
            "From",
            date_value(&app.date_from_input, Control::DateFrom),
            Control::DateFrom,
        ),
        row(
            "To",
            date_value(&app.date_to_input, Control::DateTo),
            Control::DateTo,
        ),
    ];

    let filters = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Filters"));
    frame.render_widget(filters, area);
}

fn draw_actions_list(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = app.dashboard.snapshot();

    let items: Vec<ListItem<'_>> = if snapshot.ranked.is_empty() {
        vec![ListItem::new("No actions match the current filters.")]
    } else {
        snapshot
            .ranked
            .iter()
            .map(|action| {
                let title = Line::from(vec![
                    Span::styled(
                        action.location_name.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(format!("  {} kg", format_kg(action.total_weight_kg))),
                ]);
                let details = Line::styled(
                    format!(
                        "{} · {} · {} volunteers",
                        action.action_type,
                        action.date.format("%Y-%m-%d"),
                        action.participants
                    ),
                    Style::default().fg(Color::DarkGray),
                );
                ListItem::new(Text::from(vec![title, details]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Actions (↑/↓)"))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !snapshot.ranked.is_empty() {
        state.select(Some(app.list_index));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_map(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let snapshot = app.dashboard.snapshot();
    let selected_id = app.selected_action().map(|action| &action.id);

    let ((min_lng, max_lng), (min_lat, max_lat)) = map_bounds(&snapshot.markers);
    let lng_span = max_lng - min_lng;
    let lat_span = max_lat - min_lat;

    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Map"))
        .x_bounds([min_lng, max_lng])
        .y_bounds([min_lat, max_lat])
        .paint(|context| {
            for marker in &snapshot.markers {
                let color = if selected_id == Some(&marker.id) {
                    Color::Yellow
                } else {
                    to_color(marker.color)
                };
                context.draw(&Circle {
                    x: marker.longitude,
                    y: marker.latitude,
                    radius: circle_radius(marker.radius, lng_span.min(lat_span)),
                    color,
                });
            }
        });
    frame.render_widget(canvas, area);
}

fn draw_detail(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Details");

    let Some(action) = app.selected_action() else {
        let paragraph = Paragraph::new("Select an action in the list.")
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::styled(
            action.location_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(format!(
            "{} · {} · {}",
            action.municipality,
            action.date.format("%Y-%m-%d"),
            action.action_type
        )),
        Line::raw(format!(
            "Total {} kg · {} volunteers",
            format_kg(action.total_weight_kg),
            action.participants
        )),
    ];

    let breakdown: Vec<String> = WasteCategory::ALL
        .into_iter()
        .filter_map(|category| {
            let weight = action.category_weight_kg(category);
            (weight > 0.0).then(|| format!("{}: {} kg", category.label(), format_kg(weight)))
        })
        .collect();
    if !breakdown.is_empty() {
        lines.push(Line::styled(
            breakdown.join(" · "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(observations) = &action.observations {
        lines.push(Line::raw(observations.clone()));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_stats(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let stats = app.dashboard.snapshot().stats;
    let lines = vec![
        Line::raw(format!("Actions      {}", stats.actions)),
        Line::raw(format!("Collected    {} kg", format_kg(stats.total_weight_kg))),
        Line::raw(format!("Locations    {}", stats.unique_locations)),
        Line::raw(format!("Volunteers   {}", stats.participants)),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    frame.render_widget(paragraph, area);
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "bar heights are non-negative weights rounded to whole kilograms"
)]
fn draw_chart(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let totals = &app.dashboard.snapshot().category_totals;

    let bars: Vec<Bar<'_>> = totals
        .iter()
        .map(|(category, total)| {
            Bar::default()
                .label(Line::from(chart_label(*category)))
                .value(total.max(0.0).round() as u64)
                .style(Style::default().fg(category_color(*category)))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Waste (kg)"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(4)
        .bar_gap(1);
    frame.render_widget(chart, area);
}

fn draw_top_locations(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let top = &app.dashboard.snapshot().top_locations;
    let items: Vec<ListItem<'_>> = if top.is_empty() {
        vec![ListItem::new("No data for the current filters.")]
    } else {
        top.iter()
            .enumerate()
            .map(|(position, action)| {
                ListItem::new(format!(
                    "{}. {} — {} kg",
                    position + 1,
                    action.location_name,
                    format_kg(action.total_weight_kg)
                ))
            })
            .collect()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Top locations"));
    frame.render_widget(list, area);
}

/// Fixed-locale weight formatting: two decimals, comma separator.
pub(crate) fn format_kg(value: f64) -> String {
    format!("{value:.2}").replace('.', ",")
}

fn select_label(values: &[String], index: usize) -> String {
    if index == 0 {
        "All".to_owned()
    } else {
        values
            .get(index - 1)
            .cloned()
            .unwrap_or_else(|| "All".to_owned())
    }
}

fn to_color(color: Rgb) -> Color {
    Color::Rgb(color.red, color.green, color.blue)
}

/// Scale a pixel radius onto the canvas coordinate space so heavier actions
/// draw visibly larger circles.
fn circle_radius(marker_radius: f64, span: f64) -> f64 {
    span * 0.05 * (marker_radius / MAX_RADIUS)
}

/// Bounds fitted to the filtered markers with a margin; falls back to the
/// dataset's home stretch of coastline when nothing matches.
fn map_bounds(markers: &[Marker]) -> ((f64, f64), (f64, f64)) {
    const HOME: ((f64, f64), (f64, f64)) = ((-45.68, -44.68), (-24.07, -23.07));
    if markers.is_empty() {
        return HOME;
    }

    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;
    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    for marker in markers {
        min_lng = min_lng.min(marker.longitude);
        max_lng = max_lng.max(marker.longitude);
        min_lat = min_lat.min(marker.latitude);
        max_lat = max_lat.max(marker.latitude);
    }

    let lng_margin = ((max_lng - min_lng) * 0.15).max(0.05);
    let lat_margin = ((max_lat - min_lat) * 0.15).max(0.05);
    (
        (min_lng - lng_margin, max_lng + lng_margin),
        (min_lat - lat_margin, max_lat + lat_margin),
    )
}

fn chart_label(category: WasteCategory) -> &'static str {
    match category {
        WasteCategory::FishingNets => "Rede",
        WasteCategory::Plastic => "Plás",
        WasteCategory::Metal => "Met",
        WasteCategory::Glass => "Vid",
        WasteCategory::Paper => "Pap",
        WasteCategory::Rubber => "Bor",
        WasteCategory::Fabric => "Tec",
        WasteCategory::Other => "Out",
    }
}

fn category_color(category: WasteCategory) -> Color {
    match category {
        WasteCategory::FishingNets => Color::Cyan,
        WasteCategory::Plastic => Color::Yellow,
        WasteCategory::Metal => Color::Red,
        WasteCategory::Glass => Color::Blue,
        WasteCategory::Paper => Color::LightYellow,
        WasteCategory::Rubber => Color::LightCyan,
        WasteCategory::Fabric => Color::Magenta,
        WasteCategory::Other => Color::DarkGray,
    }
}
