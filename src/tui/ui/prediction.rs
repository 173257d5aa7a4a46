//! Prediction view: form on the left, result on the right.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::form::{render_form, PredictionFormState};
use super::result::{render_result, ResultState};
use crate::tui::styles::WellnessTheme;

/// Render the prediction view
pub fn render_prediction(
    f: &mut Frame,
    area: Rect,
    form: &PredictionFormState,
    result: &ResultState,
    notice: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Panes
            Constraint::Length(3), // Footer/error
        ])
        .split(area);

    render_prediction_header(f, chunks[0], notice);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_form(f, panes[0], form);
    render_result(f, panes[1], result);
    render_prediction_footer(f, chunks[2], form);
}

fn render_prediction_header(f: &mut Frame, area: Rect, notice: Option<&str>) {
    let mut lines = vec![Line::from(vec![
        Span::styled(" ", WellnessTheme::text()),
        Span::styled("Cyclesense", WellnessTheme::title()),
        Span::styled(
            " │ Mood & Energy Prediction",
            WellnessTheme::text_secondary(),
        ),
    ])];
    if let Some(notice) = notice {
        lines.push(Line::from(vec![
            Span::styled(" ! ", WellnessTheme::warning()),
            Span::styled(notice.to_string(), WellnessTheme::warning()),
        ]));
    }

    let header = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(WellnessTheme::border()),
    );

    f.render_widget(header, area);
}

fn render_prediction_footer(f: &mut Frame, area: Rect, form: &PredictionFormState) {
    let content = if let Some(err) = &form.error_message {
        Line::from(vec![
            Span::styled("! ", WellnessTheme::danger()),
            Span::styled(err.clone(), WellnessTheme::danger()),
        ])
    } else {
        Line::from(vec![
            Span::styled("[↑↓] ", WellnessTheme::key_hint()),
            Span::styled("Navigate ", WellnessTheme::key_desc()),
            Span::styled("[←→] ", WellnessTheme::key_hint()),
            Span::styled("Change ", WellnessTheme::key_desc()),
            Span::styled("[Space] ", WellnessTheme::key_hint()),
            Span::styled("Toggle ", WellnessTheme::key_desc()),
            Span::styled("[Enter] ", WellnessTheme::key_hint()),
            Span::styled("Predict ", WellnessTheme::key_desc()),
            Span::styled("[R] ", WellnessTheme::key_hint()),
            Span::styled("Reset ", WellnessTheme::key_desc()),
            Span::styled("[F2] ", WellnessTheme::key_hint()),
            Span::styled("Benchmarks ", WellnessTheme::key_desc()),
            Span::styled("[Q] ", WellnessTheme::key_hint()),
            Span::styled("Quit", WellnessTheme::key_desc()),
        ])
    };

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(WellnessTheme::border()),
    );

    f.render_widget(footer, area);
}
