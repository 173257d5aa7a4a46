//! Cycle and lifestyle input form.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use zeroize::Zeroize;

use crate::domain::cycle::{CYCLE_LENGTH_RANGE, DAYS_SINCE_RANGE, PERIOD_LENGTH_RANGE};
use crate::domain::{
    AgeBand, CycleInput, SleepBand, Symptom, SymptomFlags, UserProfile, WorkoutBand,
};
use crate::tui::styles::WellnessTheme;

/// Widest value any numeric field accepts.
const MAX_DIGITS: usize = 2;

/// Focusable form element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormItem {
    DaysSince,
    PeriodLength,
    CycleLength,
    Sleep,
    Workout,
    Age,
    Symptom(Symptom),
}

impl FormItem {
    /// Items before the symptom checkboxes.
    const LEADING: [FormItem; 6] = [
        FormItem::DaysSince,
        FormItem::PeriodLength,
        FormItem::CycleLength,
        FormItem::Sleep,
        FormItem::Workout,
        FormItem::Age,
    ];

    const COUNT: usize = Self::LEADING.len() + Symptom::ALL.len();

    fn at(index: usize) -> Self {
        Self::LEADING.get(index).copied().unwrap_or_else(|| {
            let offset = (index - Self::LEADING.len()) % Symptom::ALL.len();
            Self::Symptom(Symptom::ALL[offset])
        })
    }
}

/// Numeric stepper with a typed buffer.
#[derive(Debug, Clone)]
pub struct NumberField {
    pub label: &'static str,
    pub hint: &'static str,
    pub value: String,
    pub min: u8,
    pub max: u8,
}

impl NumberField {
    fn new(label: &'static str, hint: &'static str, (min, max): (u8, u8), initial: u8) -> Self {
        Self {
            label,
            hint,
            value: initial.to_string(),
            min,
            max,
        }
    }

    /// Current value clamped into range. An empty buffer reads as the minimum.
    #[must_use]
    pub fn current(&self) -> u8 {
        self.value
            .parse::<u16>()
            .map(|v| v.clamp(u16::from(self.min), u16::from(self.max)) as u8)
            .unwrap_or(self.min)
    }

    /// Rewrite the buffer with the clamped value.
    fn commit(&mut self) {
        let clamped = self.current().to_string();
        if self.value != clamped {
            self.value.zeroize();
            self.value = clamped;
        }
    }

    fn step(&mut self, delta: i8) -> bool {
        let before = self.current();
        let after = if delta < 0 {
            before.saturating_sub(delta.unsigned_abs()).max(self.min)
        } else {
            before.saturating_add(delta.unsigned_abs()).min(self.max)
        };
        let changed = after != before || self.value != before.to_string();
        self.value.zeroize();
        self.value = after.to_string();
        changed
    }
}

/// Prediction form state
#[derive(Debug, Clone)]
pub struct PredictionFormState {
    pub days_since: NumberField,
    pub period_length: NumberField,
    pub cycle_length: NumberField,
    pub sleep: usize,
    pub workout: usize,
    pub age: usize,
    pub symptoms: SymptomFlags,
    pub selected_item: usize,
    pub error_message: Option<String>,
}

impl Default for PredictionFormState {
    fn default() -> Self {
        let defaults = CycleInput::default();
        Self {
            days_since: NumberField::new(
                "Days since last period",
                "days (0-40)",
                DAYS_SINCE_RANGE,
                defaults.days_since_period,
            ),
            period_length: NumberField::new(
                "Period length",
                "days (1-10)",
                PERIOD_LENGTH_RANGE,
                defaults.period_length,
            ),
            cycle_length: NumberField::new(
                "Cycle length",
                "days (21-40)",
                CYCLE_LENGTH_RANGE,
                defaults.cycle_length,
            ),
            sleep: 0,
            workout: 0,
            age: 0,
            symptoms: SymptomFlags::none(),
            selected_item: 0,
            error_message: None,
        }
    }
}

impl PredictionFormState {
    /// Item with focus.
    #[must_use]
    pub fn focused(&self) -> FormItem {
        FormItem::at(self.selected_item)
    }

    fn number_field_mut(&mut self, item: FormItem) -> Option<&mut NumberField> {
        match item {
            FormItem::DaysSince => Some(&mut self.days_since),
            FormItem::PeriodLength => Some(&mut self.period_length),
            FormItem::CycleLength => Some(&mut self.cycle_length),
            _ => None,
        }
    }

    fn commit_focused(&mut self) {
        if let Some(field) = self.number_field_mut(self.focused()) {
            field.commit();
        }
    }

    /// Move to the next item
    pub fn next_field(&mut self) {
        self.commit_focused();
        self.selected_item = (self.selected_item + 1) % FormItem::COUNT;
    }

    /// Move to the previous item
    pub fn prev_field(&mut self) {
        self.commit_focused();
        if self.selected_item == 0 {
            self.selected_item = FormItem::COUNT - 1;
        } else {
            self.selected_item -= 1;
        }
    }

    /// Step a number, cycle a select, or flip a checkbox.
    ///
    /// Returns whether the form changed.
    pub fn step(&mut self, delta: i8) -> bool {
        self.error_message = None;
        let item = self.focused();
        if let Some(field) = self.number_field_mut(item) {
            return field.step(delta);
        }

        let cycle = |index: &mut usize, len: usize| {
            let next = (*index as isize + isize::from(delta)).rem_euclid(len as isize);
            *index = next as usize;
        };

        match item {
            FormItem::Sleep => cycle(&mut self.sleep, SleepBand::ALL.len()),
            FormItem::Workout => cycle(&mut self.workout, WorkoutBand::ALL.len()),
            FormItem::Age => cycle(&mut self.age, AgeBand::ALL.len()),
            FormItem::Symptom(symptom) => self.symptoms.toggle(symptom),
            _ => return false,
        }
        true
    }

    /// Flip the focused checkbox. Returns whether the form changed.
    pub fn toggle(&mut self) -> bool {
        match self.focused() {
            FormItem::Symptom(symptom) => {
                self.symptoms.toggle(symptom);
                self.error_message = None;
                true
            }
            _ => false,
        }
    }

    /// Type a digit into the focused numeric field.
    pub fn input_char(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        let item = self.focused();
        match self.number_field_mut(item) {
            Some(field) if field.value.len() < MAX_DIGITS => {
                // A lone zero is replaced rather than extended.
                if field.value == "0" {
                    field.value.clear();
                }
                field.value.push(c);
                self.error_message = None;
                true
            }
            _ => false,
        }
    }

    /// Delete the last digit of the focused numeric field.
    pub fn delete_char(&mut self) -> bool {
        let item = self.focused();
        match self.number_field_mut(item) {
            Some(field) => {
                let removed = field.value.pop().is_some();
                if removed {
                    self.error_message = None;
                }
                removed
            }
            None => false,
        }
    }

    /// Wipe numeric buffers from memory and restore the defaults.
    pub fn clear_sensitive(&mut self) {
        for field in [
            &mut self.days_since,
            &mut self.period_length,
            &mut self.cycle_length,
        ] {
            field.value.zeroize();
        }
        *self = Self::default();
    }

    #[must_use]
    pub fn sleep_band(&self) -> SleepBand {
        SleepBand::ALL[self.sleep % SleepBand::ALL.len()]
    }

    #[must_use]
    pub fn workout_band(&self) -> WorkoutBand {
        WorkoutBand::ALL[self.workout % WorkoutBand::ALL.len()]
    }

    #[must_use]
    pub fn age_band(&self) -> AgeBand {
        AgeBand::ALL[self.age % AgeBand::ALL.len()]
    }

    /// Clamp every numeric field and read the submission.
    pub fn to_inputs(&mut self) -> (CycleInput, UserProfile) {
        self.days_since.commit();
        self.period_length.commit();
        self.cycle_length.commit();

        let cycle = CycleInput::new(
            self.days_since.current(),
            self.period_length.current(),
            self.cycle_length.current(),
        );
        let profile = UserProfile {
            sleep_band: self.sleep_band(),
            workout_band: self.workout_band(),
            age_band: self.age_band(),
            symptom_flags: self.symptoms,
        };
        (cycle, profile)
    }
}

/// Render the input form
pub fn render_form(f: &mut Frame, area: Rect, state: &PredictionFormState) {
    let block = Block::default()
        .title(Span::styled(" Your Cycle ", WellnessTheme::subtitle()))
        .borders(Borders::ALL)
        .border_style(WellnessTheme::border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let field_height = 3;
    let constraints: Vec<Constraint> = FormItem::LEADING
        .iter()
        .map(|_| Constraint::Length(field_height))
        .chain([
            Constraint::Length(Symptom::ALL.len() as u16 + 2),
            Constraint::Min(0),
        ])
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let focused = state.focused();
    let numbers = [
        (FormItem::DaysSince, &state.days_since),
        (FormItem::PeriodLength, &state.period_length),
        (FormItem::CycleLength, &state.cycle_length),
    ];
    for (i, (item, field)) in numbers.iter().enumerate() {
        render_number(f, chunks[i], field, *item == focused);
    }

    let selects = [
        (FormItem::Sleep, "Sleep this week", state.sleep_band().label()),
        (FormItem::Workout, "Workout this week", state.workout_band().label()),
        (FormItem::Age, "Age group", state.age_band().label()),
    ];
    for (i, (item, label, value)) in selects.iter().enumerate() {
        render_select(f, chunks[numbers.len() + i], label, value, *item == focused);
    }

    render_symptoms(f, chunks[FormItem::LEADING.len()], state, focused);
}

fn field_block(label: &str, is_selected: bool) -> Block<'static> {
    let (border_style, title_style) = if is_selected {
        (WellnessTheme::border_focused(), WellnessTheme::focused())
    } else {
        (WellnessTheme::border(), WellnessTheme::text_secondary())
    };

    Block::default()
        .title(Span::styled(format!(" {label} "), title_style))
        .borders(Borders::ALL)
        .border_style(border_style)
}

fn render_number(f: &mut Frame, area: Rect, field: &NumberField, is_selected: bool) {
    let value_display = if field.value.is_empty() {
        Span::styled(field.hint, WellnessTheme::text_muted())
    } else {
        Span::styled(field.value.as_str(), WellnessTheme::text())
    };

    let content = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        value_display,
        if is_selected {
            Span::styled("▌", WellnessTheme::cursor())
        } else {
            Span::raw("")
        },
        Span::styled(
            format!("  {}-{}", field.min, field.max),
            WellnessTheme::text_muted(),
        ),
    ]))
    .block(field_block(field.label, is_selected));

    f.render_widget(content, area);
}

fn render_select(f: &mut Frame, area: Rect, label: &str, value: &str, is_selected: bool) {
    let arrow_style = if is_selected {
        WellnessTheme::key_hint()
    } else {
        WellnessTheme::text_muted()
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(" ◀ ", arrow_style),
        Span::styled(value.to_string(), WellnessTheme::text()),
        Span::styled(" ▶", arrow_style),
    ]))
    .block(field_block(label, is_selected));

    f.render_widget(content, area);
}

fn render_symptoms(f: &mut Frame, area: Rect, state: &PredictionFormState, focused: FormItem) {
    let focus_in_group = matches!(focused, FormItem::Symptom(_));

    let lines: Vec<Line> = state
        .symptoms
        .iter()
        .map(|(symptom, on)| {
            let mark = if on { "[x]" } else { "[ ]" };
            let style = if focused == FormItem::Symptom(symptom) {
                WellnessTheme::selected()
            } else if on {
                WellnessTheme::text()
            } else {
                WellnessTheme::text_secondary()
            };
            Line::from(Span::styled(format!(" {mark} {} ", symptom.label()), style))
        })
        .collect();

    let content = Paragraph::new(lines).block(field_block("Symptoms this week", focus_in_group));
    f.render_widget(content, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn focus(state: &mut PredictionFormState, item: FormItem) {
        while state.focused() != item {
            state.next_field();
        }
    }

    #[test]
    fn test_defaults() {
        let mut state = PredictionFormState::default();
        let (cycle, profile) = state.to_inputs();
        assert_eq!(cycle, CycleInput::default());
        assert_eq!(profile, UserProfile::default());
        assert_eq!(state.focused(), FormItem::DaysSince);
    }

    #[test]
    fn test_focus_wraps_through_every_item() {
        let mut state = PredictionFormState::default();
        state.prev_field();
        assert_eq!(state.focused(), FormItem::Symptom(Symptom::Fatigue));
        state.next_field();
        assert_eq!(state.focused(), FormItem::DaysSince);

        let mut seen = Vec::new();
        for _ in 0..FormItem::COUNT {
            seen.push(state.focused());
            state.next_field();
        }
        assert_eq!(seen.len(), 13);
        assert_eq!(seen[6], FormItem::Symptom(Symptom::Headaches));
    }

    #[test]
    fn test_typed_value_is_clamped_on_leave() {
        let mut state = PredictionFormState::default();
        focus(&mut state, FormItem::CycleLength);

        assert!(state.delete_char());
        assert!(state.delete_char());
        assert!(!state.delete_char());
        assert!(state.input_char('9'));
        assert!(state.input_char('9'));
        assert!(!state.input_char('9'), "Only two digits fit");
        assert!(!state.input_char('x'));
        assert_eq!(state.cycle_length.value, "99");

        state.next_field();
        assert_eq!(state.cycle_length.value, "40");

        focus(&mut state, FormItem::PeriodLength);
        state.period_length.value.clear();
        let (cycle, _) = state.to_inputs();
        assert_eq!(cycle.period_length, 1);
        assert_eq!(state.period_length.value, "1");
    }

    #[test]
    fn test_leading_zero_replaced() {
        let mut state = PredictionFormState::default();
        state.days_since.value = "0".to_string();
        assert!(state.input_char('7'));
        assert_eq!(state.days_since.value, "7");
    }

    #[test]
    fn test_steppers_stop_at_bounds() {
        let mut state = PredictionFormState::default();
        focus(&mut state, FormItem::PeriodLength);

        for _ in 0..20 {
            state.step(1);
        }
        assert_eq!(state.period_length.value, "10");
        assert!(!state.step(1));
        assert!(state.step(-1));
        assert_eq!(state.period_length.value, "9");
    }

    #[test]
    fn test_selects_cycle_and_checkboxes_toggle() {
        let mut state = PredictionFormState::default();
        focus(&mut state, FormItem::Sleep);
        assert!(state.step(-1));
        assert_eq!(state.sleep_band(), SleepBand::From8To9);
        assert!(state.step(1));
        assert_eq!(state.sleep_band(), SleepBand::LessThan4);
        assert!(!state.toggle(), "Space does nothing on a select");

        focus(&mut state, FormItem::Symptom(Symptom::Cravings));
        assert!(state.toggle());
        assert!(state.symptoms.contains(Symptom::Cravings));
        assert!(state.step(1));
        assert!(!state.symptoms.contains(Symptom::Cravings));
        assert!(!state.input_char('5'), "Digits are ignored on checkboxes");
    }

    #[test]
    fn test_to_inputs_reads_selections() {
        let mut state = PredictionFormState::default();
        state.days_since.value = "3".to_string();
        state.workout = 1;
        state.age = 1;
        state.symptoms.set(Symptom::Fatigue, true);

        let (cycle, profile) = state.to_inputs();
        assert_eq!(cycle, CycleInput::new(3, 5, 28));
        assert_eq!(profile.workout_band, WorkoutBand::From2To4);
        assert_eq!(profile.age_band, AgeBand::From21To30);
        assert!(profile.symptom_flags.contains(Symptom::Fatigue));
    }

    #[test]
    fn test_clear_sensitive_restores_defaults() {
        let mut state = PredictionFormState::default();
        state.days_since.value = "33".to_string();
        state.sleep = 3;
        state.symptoms.set(Symptom::Bloating, true);
        state.selected_item = 8;
        state.error_message = Some("bad".to_string());

        state.clear_sensitive();
        assert_eq!(state.days_since.value, "10");
        assert_eq!(state.sleep, 0);
        assert_eq!(state.symptoms.count(), 0);
        assert_eq!(state.selected_item, 0);
        assert!(state.error_message.is_none());
    }
}
