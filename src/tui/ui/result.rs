//! Prediction result pane.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::application::Assessment;
use crate::tui::styles::WellnessTheme;

/// Collapsible recommendation section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Foods,
    Exercises,
    Why,
}

impl Panel {
    const ALL: [Panel; 3] = [Panel::Foods, Panel::Exercises, Panel::Why];

    fn title(self) -> &'static str {
        match self {
            Panel::Foods => "Recommended Foods",
            Panel::Exercises => "Recommended Exercises",
            Panel::Why => "Why these recommendations?",
        }
    }

    fn key(self) -> &'static str {
        match self {
            Panel::Foods => "F",
            Panel::Exercises => "E",
            Panel::Why => "W",
        }
    }
}

/// Which panels are expanded. All start collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub foods: bool,
    pub exercises: bool,
    pub why: bool,
}

impl PanelState {
    #[must_use]
    pub fn is_open(&self, panel: Panel) -> bool {
        match panel {
            Panel::Foods => self.foods,
            Panel::Exercises => self.exercises,
            Panel::Why => self.why,
        }
    }

    pub fn toggle(&mut self, panel: Panel) {
        let slot = match panel {
            Panel::Foods => &mut self.foods,
            Panel::Exercises => &mut self.exercises,
            Panel::Why => &mut self.why,
        };
        *slot = !*slot;
    }
}

/// Result pane state
#[derive(Debug, Clone, Default)]
pub enum ResultState {
    /// Nothing submitted since the last change
    #[default]
    Idle,
    /// Completed with result
    Complete {
        assessment: Box<Assessment>,
        panels: PanelState,
    },
    /// Error occurred
    Error { message: String },
}

impl ResultState {
    #[must_use]
    pub fn complete(assessment: Assessment) -> Self {
        Self::Complete {
            assessment: Box::new(assessment),
            panels: PanelState::default(),
        }
    }

    /// Expand or collapse a panel. Returns false when there is no result.
    pub fn toggle_panel(&mut self, panel: Panel) -> bool {
        match self {
            Self::Complete { panels, .. } => {
                panels.toggle(panel);
                true
            }
            _ => false,
        }
    }
}

/// Render the result pane
pub fn render_result(f: &mut Frame, area: Rect, state: &ResultState) {
    match state {
        ResultState::Idle => render_idle(f, area),
        ResultState::Complete { assessment, panels } => {
            render_assessment(f, area, assessment, *panels)
        }
        ResultState::Error { message } => render_error(f, area, message),
    }
}

fn render_idle(f: &mut Frame, area: Rect) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "No prediction yet",
            WellnessTheme::text_secondary(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Fill in the form and press ", WellnessTheme::text_muted()),
            Span::styled("[Enter]", WellnessTheme::key_hint()),
        ]),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Prediction ", WellnessTheme::subtitle()))
            .borders(Borders::ALL)
            .border_style(WellnessTheme::border()),
    );

    f.render_widget(content, area);
}

fn render_assessment(f: &mut Frame, area: Rect, assessment: &Assessment, panels: PanelState) {
    let block = Block::default()
        .title(Span::styled(" Prediction ", WellnessTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(WellnessTheme::border_focused());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Score gauge
            Constraint::Length(3), // Bucket + phase
            Constraint::Min(0),    // Recommendations
            Constraint::Length(1), // Timestamp
        ])
        .margin(1)
        .split(inner);

    let prediction = &assessment.prediction;
    let bucket_style = WellnessTheme::mood_bucket(prediction.bucketed_description);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(Span::styled(" Mood Score ", WellnessTheme::text_secondary()))
                .borders(Borders::ALL)
                .border_style(WellnessTheme::border()),
        )
        .gauge_style(bucket_style)
        .ratio(prediction.ratio())
        .label(prediction.display_score());
    f.render_widget(gauge, chunks[0]);

    let summary = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("You are likely to feel: ", WellnessTheme::text_secondary()),
            Span::styled(
                prediction.bucketed_description.description(),
                bucket_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Detected Phase: ", WellnessTheme::text_secondary()),
            Span::styled(assessment.phase.to_string(), WellnessTheme::phase(assessment.phase)),
        ]),
    ]);
    f.render_widget(summary, chunks[1]);

    let recommendation = assessment.recommendation;
    let mut lines = Vec::new();
    for panel in Panel::ALL {
        let open = panels.is_open(panel);
        let marker = if open { "▼" } else { "▶" };
        lines.push(Line::from(vec![
            Span::styled(format!("{marker} {} ", panel.title()), WellnessTheme::title()),
            Span::styled(format!("[{}]", panel.key()), WellnessTheme::key_hint()),
        ]));
        if open {
            let items = match panel {
                Panel::Foods => recommendation.foods,
                Panel::Exercises => recommendation.exercises,
                Panel::Why => recommendation.rationale,
            };
            lines.extend(
                items
                    .iter()
                    .map(|item| Line::from(Span::styled(format!("  • {item}"), WellnessTheme::text()))),
            );
        }
    }
    let recommendations = Paragraph::new(lines).wrap(Wrap { trim: false });
    f.render_widget(recommendations, chunks[2]);

    let submitted = Paragraph::new(Line::from(Span::styled(
        format!("Submitted {}", assessment.submitted_at.format("%H:%M:%S")),
        WellnessTheme::text_muted(),
    )))
    .alignment(Alignment::Right);
    f.render_widget(submitted, chunks[3]);
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled("! Error", WellnessTheme::danger())),
        Line::from(""),
        Line::from(Span::styled(message, WellnessTheme::text())),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(WellnessTheme::danger()),
    );

    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panels_start_collapsed() {
        let panels = PanelState::default();
        assert!(Panel::ALL.iter().all(|p| !panels.is_open(*p)));
    }

    #[test]
    fn test_toggle_needs_a_result() {
        let mut state = ResultState::Idle;
        assert!(!state.toggle_panel(Panel::Foods));

        let mut state = ResultState::Error {
            message: "x".to_string(),
        };
        assert!(!state.toggle_panel(Panel::Why));
    }

    #[test]
    fn test_panel_toggle_round_trip() {
        let mut panels = PanelState::default();
        panels.toggle(Panel::Exercises);
        assert!(panels.is_open(Panel::Exercises));
        assert!(!panels.is_open(Panel::Foods));
        panels.toggle(Panel::Exercises);
        assert_eq!(panels, PanelState::default());
    }
}
