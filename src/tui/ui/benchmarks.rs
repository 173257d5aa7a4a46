//! Benchmark view: candidate model comparison.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::domain::{BenchmarkRow, BenchmarkTable};
use crate::tui::styles::WellnessTheme;

/// Bars are integer-valued; metrics are scaled to keep two decimals.
const BAR_SCALE: f64 = 100.0;

fn bar_value(metric: f64) -> u64 {
    (metric * BAR_SCALE).round().max(0.0) as u64
}

/// Benchmark view state
#[derive(Debug, Clone, Default)]
pub struct BenchmarkState {
    pub table: BenchmarkTable,
}

impl BenchmarkState {
    #[must_use]
    pub fn new(table: BenchmarkTable) -> Self {
        Self { table }
    }
}

/// Render the benchmark view
pub fn render_benchmarks(f: &mut Frame, area: Rect, state: &BenchmarkState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Percentage(60), // Chart
            Constraint::Min(0),         // Table
            Constraint::Length(3),      // Footer
        ])
        .split(area);

    render_benchmark_header(f, chunks[0]);
    render_chart(f, chunks[1], &state.table);
    render_table(f, chunks[2], &state.table);
    render_benchmark_footer(f, chunks[3]);
}

fn render_benchmark_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(" ", WellnessTheme::text()),
        Span::styled("Model Benchmarks", WellnessTheme::title()),
        Span::styled(
            " │ Candidate regressors on held-out data",
            WellnessTheme::text_secondary(),
        ),
    ]))
    .block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(WellnessTheme::border()),
    );

    f.render_widget(header, area);
}

fn bar_group(row: &BenchmarkRow) -> BarGroup<'_> {
    let bars = [
        Bar::default()
            .value(bar_value(row.r_squared))
            .text_value(format!("{:.2}", row.r_squared))
            .style(WellnessTheme::series_r_squared())
            .value_style(WellnessTheme::selected()),
        Bar::default()
            .value(bar_value(row.rmse))
            .text_value(format!("{:.2}", row.rmse))
            .style(WellnessTheme::series_rmse())
            .value_style(WellnessTheme::selected()),
    ];

    BarGroup::default()
        .label(Line::from(row.model_name.as_str()))
        .bars(&bars)
}

fn render_chart(f: &mut Frame, area: Rect, table: &BenchmarkTable) {
    let block = Block::default()
        .title(Line::from(vec![
            Span::styled(" R² Score ", WellnessTheme::series_r_squared()),
            Span::styled("■", WellnessTheme::series_r_squared()),
            Span::styled("  RMSE ", WellnessTheme::series_rmse()),
            Span::styled("■ ", WellnessTheme::series_rmse()),
        ]))
        .borders(Borders::ALL)
        .border_style(WellnessTheme::border());

    let mut chart = BarChart::default()
        .block(block)
        .bar_width(6)
        .bar_gap(1)
        .group_gap(3)
        .max(bar_value(table.max_metric()).max(1));

    for row in &table.rows {
        chart = chart.data(bar_group(row));
    }

    f.render_widget(chart, area);
}

fn render_table(f: &mut Frame, area: Rect, table: &BenchmarkTable) {
    let best_r_squared = table.best_by_r_squared().map(|r| r.model_name.as_str());
    let best_rmse = table.best_by_rmse().map(|r| r.model_name.as_str());

    let header = Row::new(vec![
        Cell::from("Model"),
        Cell::from("R_squared"),
        Cell::from("RMSE"),
    ])
    .style(WellnessTheme::subtitle());

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let highlight = |best: Option<&str>| {
                if best == Some(row.model_name.as_str()) {
                    WellnessTheme::success()
                } else {
                    WellnessTheme::text()
                }
            };

            Row::new(vec![
                Cell::from(row.model_name.clone()).style(WellnessTheme::text()),
                Cell::from(format!("{:.3}", row.r_squared)).style(highlight(best_r_squared)),
                Cell::from(format!("{:.2}", row.rmse)).style(highlight(best_rmse)),
            ])
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Metrics ", WellnessTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(WellnessTheme::border());

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(header)
    .block(block);

    f.render_widget(table, area);
}

fn render_benchmark_footer(f: &mut Frame, area: Rect) {
    let content = Line::from(vec![
        Span::styled("[F2] ", WellnessTheme::key_hint()),
        Span::styled("Prediction ", WellnessTheme::key_desc()),
        Span::styled("[Q] ", WellnessTheme::key_hint()),
        Span::styled("Quit", WellnessTheme::key_desc()),
    ]);

    let footer = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(WellnessTheme::border()),
    );

    f.render_widget(footer, area);
}
