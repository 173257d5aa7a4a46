//! Main TUI application state machine.
//!
//! Handles:
//! - Switching between the prediction and benchmark views
//! - Input event handling
//! - Running submissions through the mood service

use std::io;
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use crate::adapters::{CatBoostModel, LoadOptions};
use crate::application::{shared_model, MoodService};
use crate::config::AppConfig;
use crate::domain::BenchmarkTable;
use crate::CyclesenseError;

use super::ui::{
    benchmarks::{render_benchmarks, BenchmarkState},
    form::PredictionFormState,
    prediction::render_prediction,
    render_disclaimer,
    result::{Panel, ResultState},
};

/// Current screen/view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Prediction,
    Benchmarks,
}

/// Main application state
pub struct App {
    /// Current screen
    screen: Screen,

    /// Whether the app should quit
    should_quit: bool,

    /// Scoring pipeline over the shared model
    mood_service: MoodService<CatBoostModel>,

    /// Prediction form state
    form_state: PredictionFormState,

    /// Result of the last submission
    result_state: ResultState,

    /// Benchmark view state
    benchmark_state: BenchmarkState,

    /// Lenient-mode warning about columns the model ignores
    model_notice: Option<String>,
}

impl App {
    /// Create a new application from environment configuration.
    ///
    /// # Errors
    /// Returns error if the model or benchmark table cannot be loaded.
    pub fn new() -> Result<Self> {
        let config = AppConfig::from_env();
        tracing::info!("Loading model from {:?}", config.model_path);

        let options = LoadOptions {
            require_digest: config.require_model_digest,
        };
        let model = shared_model(&config.model_path, &options).map_err(|e| {
            anyhow!(
                "Failed to load model from {:?}: {}. Set CYCLESENSE_MODEL_PATH to a valid artifact.",
                config.model_path,
                e
            )
        })?;

        let mood_service = MoodService::new(model, config.lenient_features)?;
        tracing::info!(
            "Mood service ready ({} model columns)",
            mood_service.feature_count()
        );
        let benchmarks = config.load_benchmarks()?;

        Ok(Self::with_dependencies(mood_service, benchmarks))
    }

    /// Create application with injected dependencies.
    #[must_use]
    pub fn with_dependencies(
        mood_service: MoodService<CatBoostModel>,
        benchmarks: BenchmarkTable,
    ) -> Self {
        let missing = mood_service.missing_columns();
        let model_notice = (!missing.is_empty()).then(|| {
            format!(
                "Lenient mode: model ignores {} ({} column{})",
                missing.join(", "),
                missing.len(),
                if missing.len() == 1 { "" } else { "s" }
            )
        });

        Self {
            screen: Screen::Prediction,
            should_quit: false,
            mood_service,
            form_state: PredictionFormState::default(),
            result_state: ResultState::default(),
            benchmark_state: BenchmarkState::new(benchmarks),
            model_notice,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Run the main application loop.
    ///
    /// # Errors
    /// Returns error if terminal operations fail.
    pub fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.main_loop(&mut terminal);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn main_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    // Windows reports releases too
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code, key.modifiers);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        match self.screen {
            Screen::Prediction => render_prediction(
                f,
                chunks[0],
                &self.form_state,
                &self.result_state,
                self.model_notice.as_deref(),
            ),
            Screen::Benchmarks => render_benchmarks(f, chunks[0], &self.benchmark_state),
        }

        render_disclaimer(f, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) {
        // Global handling
        if key == KeyCode::Char('q') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        if key == KeyCode::F(2) {
            self.toggle_screen();
            return;
        }

        match self.screen {
            Screen::Prediction => self.handle_prediction_key(key),
            Screen::Benchmarks => self.handle_benchmark_key(key),
        }
    }

    fn handle_prediction_key(&mut self, key: KeyCode) {
        let changed = match key {
            KeyCode::Up | KeyCode::BackTab => {
                self.form_state.prev_field();
                false
            }
            KeyCode::Down | KeyCode::Tab => {
                self.form_state.next_field();
                false
            }
            KeyCode::Left => self.form_state.step(-1),
            KeyCode::Right => self.form_state.step(1),
            KeyCode::Char(' ') => self.form_state.toggle(),
            KeyCode::Char(c) if c.is_ascii_digit() => self.form_state.input_char(c),
            KeyCode::Backspace => self.form_state.delete_char(),
            KeyCode::Enter => {
                self.submit_form();
                false
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.form_state.clear_sensitive();
                true
            }
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.result_state.toggle_panel(Panel::Foods);
                false
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                self.result_state.toggle_panel(Panel::Exercises);
                false
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                self.result_state.toggle_panel(Panel::Why);
                false
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                self.toggle_screen();
                false
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                false
            }
            _ => false,
        };

        // A shown result always matches the inputs it was computed from.
        if changed {
            self.result_state = ResultState::Idle;
        }
    }

    fn handle_benchmark_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('v') | KeyCode::Char('V') | KeyCode::Esc => self.toggle_screen(),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn toggle_screen(&mut self) {
        self.form_state.clear_sensitive();
        self.result_state = ResultState::Idle;
        self.screen = match self.screen {
            Screen::Prediction => Screen::Benchmarks,
            Screen::Benchmarks => Screen::Prediction,
        };
        tracing::debug!("Switched to {:?} view", self.screen);
    }

    fn submit_form(&mut self) {
        let (cycle, profile) = self.form_state.to_inputs();

        match self.mood_service.assess(&cycle, &profile) {
            Ok(assessment) => {
                self.form_state.error_message = None;
                self.result_state = ResultState::complete(assessment);
            }
            Err(CyclesenseError::Validation(message)) => {
                self.form_state.error_message = Some(message);
                self.result_state = ResultState::Idle;
            }
            Err(e) => {
                tracing::error!("Prediction failed: {}", e);
                self.result_state = ResultState::Error {
                    message: e.to_string(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Phase;
    use ratatui::backend::TestBackend;
    use std::path::Path;
    use std::sync::Arc;

    fn test_app() -> App {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/mood_model.json");
        let model = CatBoostModel::load(&path).expect("Should load shipped model");
        let service = MoodService::new(Arc::new(model), false).expect("Columns should match");
        App::with_dependencies(service, BenchmarkTable::builtin())
    }

    /// Shipped model with the Headaches column renamed, run leniently.
    fn lenient_app() -> App {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("models/mood_model.json");
        let json = std::fs::read_to_string(&path).expect("Should read shipped model");
        let renamed = json.replace(
            "\"feature_id\": \"Headaches\"",
            "\"feature_id\": \"Legacy_flag\"",
        );
        assert_ne!(json, renamed, "Should rename the Headaches column");
        let model = CatBoostModel::parse(&path, renamed.as_bytes()).expect("Should parse model");
        let service = MoodService::new(Arc::new(model), true).expect("Lenient should accept");
        assert_eq!(service.missing_columns(), ["Headaches".to_string()]);
        App::with_dependencies(service, BenchmarkTable::builtin())
    }

    fn press(app: &mut App, keys: &[KeyCode]) {
        for key in keys {
            app.handle_key(*key, KeyModifiers::NONE);
        }
    }

    fn render_text(app: &App, width: u16, height: u16) -> String {
        let mut terminal =
            Terminal::new(TestBackend::new(width, height)).expect("Should create terminal");
        terminal.draw(|f| app.draw(f)).expect("Should draw");
        terminal
            .backend()
            .buffer()
            .content
            .chunks(usize::from(width))
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Day 3, 6-7 hours sleep, 2-4 hours workout, age 21-30.
    fn enter_scenario(app: &mut App) {
        press(
            app,
            &[
                KeyCode::Backspace,
                KeyCode::Backspace,
                KeyCode::Char('3'),
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Down,
                KeyCode::Right,
                KeyCode::Right,
                KeyCode::Down,
                KeyCode::Right,
                KeyCode::Down,
                KeyCode::Right,
            ],
        );
    }

    #[test]
    fn test_initial_render() {
        let app = test_app();
        let text = render_text(&app, 120, 40);
        assert!(text.contains("Days since last period"));
        assert!(text.contains("Symptoms this week"));
        assert!(text.contains("No prediction yet"));
        assert!(text.contains("DISCLAIMER"));
    }

    #[test]
    fn test_submit_shows_prediction() {
        let mut app = test_app();
        enter_scenario(&mut app);
        press(&mut app, &[KeyCode::Enter]);

        match &app.result_state {
            ResultState::Complete { assessment, .. } => {
                assert_eq!(assessment.phase, Phase::Menstrual);
                assert!((assessment.prediction.score - 7.3).abs() < 1e-9);
            }
            other => panic!("expected a result, got {other:?}"),
        }

        let text = render_text(&app, 120, 40);
        assert!(text.contains("7.3 / 10"));
        assert!(text.contains("High Energy / Positive Mood"));
        assert!(text.contains("Menstrual"));
        assert!(text.contains("Recommended Foods"));
    }

    #[test]
    fn test_panels_expand_on_demand() {
        let mut app = test_app();
        enter_scenario(&mut app);
        press(&mut app, &[KeyCode::Enter]);
        assert!(!render_text(&app, 120, 40).contains("Iron-rich foods"));

        press(&mut app, &[KeyCode::Char('f')]);
        assert!(render_text(&app, 120, 40).contains("Iron-rich foods"));

        press(&mut app, &[KeyCode::Char('F')]);
        assert!(!render_text(&app, 120, 40).contains("Iron-rich foods"));
    }

    #[test]
    fn test_input_change_clears_result() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Enter]);
        assert!(matches!(app.result_state, ResultState::Complete { .. }));

        // Focus moves keep the result.
        press(&mut app, &[KeyCode::Down, KeyCode::Up]);
        assert!(matches!(app.result_state, ResultState::Complete { .. }));

        press(&mut app, &[KeyCode::Right]);
        assert!(matches!(app.result_state, ResultState::Idle));
    }

    #[test]
    fn test_toggle_resets_form() {
        let mut app = test_app();
        enter_scenario(&mut app);
        press(&mut app, &[KeyCode::Enter]);

        app.handle_key(KeyCode::F(2), KeyModifiers::NONE);
        assert_eq!(app.screen(), Screen::Benchmarks);
        assert!(matches!(app.result_state, ResultState::Idle));
        assert_eq!(app.form_state.days_since.value, "10");
        assert_eq!(app.form_state.sleep, 0);

        let text = render_text(&app, 120, 40);
        assert!(text.contains("Model Benchmarks"));
        assert!(text.contains("R_squared"));
        assert!(text.contains("RMSE"));
        assert!(text.contains("CatBoost"));
        assert!(text.contains("1.48"));

        press(&mut app, &[KeyCode::Char('v')]);
        assert_eq!(app.screen(), Screen::Prediction);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = test_app();
        press(&mut app, &[KeyCode::Char('x')]);
        assert!(!app.should_quit);
        app.handle_key(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_key(KeyCode::F(2), KeyModifiers::NONE);
        press(&mut app, &[KeyCode::Char('Q')]);
        assert!(app.should_quit);
    }

    #[test]
    fn test_lenient_mode_shows_ignored_columns() {
        let app = lenient_app();
        let text = render_text(&app, 120, 40);
        assert!(text.contains("Lenient mode: model ignores Headaches (1 column)"));

        // Still scores with the column zero-filled.
        let mut app = app;
        press(&mut app, &[KeyCode::Enter]);
        assert!(matches!(app.result_state, ResultState::Complete { .. }));
    }

    #[test]
    fn test_strict_mode_has_no_notice() {
        let app = test_app();
        assert!(app.model_notice.is_none());
        assert!(!render_text(&app, 120, 40).contains("Lenient mode"));
    }
}
