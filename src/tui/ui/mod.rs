//! UI module: View components for the TUI.

pub mod benchmarks;
pub mod form;
pub mod prediction;
pub mod result;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::tui::styles::WellnessTheme;

pub fn render_disclaimer(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(vec![Span::styled(
            "DISCLAIMER: Predictions are indicative wellness estimates and not medical advice.",
            WellnessTheme::text_muted(),
        )]),
        Line::from(vec![Span::styled(
            "Talk to a healthcare professional about persistent symptoms.",
            WellnessTheme::text_muted(),
        )]),
    ];

    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(WellnessTheme::border());

    let p = Paragraph::new(text).block(block).wrap(Wrap { trim: true });

    f.render_widget(p, area);
}
