//! Cycle tracking input and phase classification.
//!
//! The phase is derived from three integers entered on the form; nothing
//! here is stored between submissions.

use serde::{Deserialize, Serialize};

/// Accepted range for days since the last period started.
pub const DAYS_SINCE_RANGE: (u8, u8) = (0, 40);

/// Accepted range for the period length in days.
pub const PERIOD_LENGTH_RANGE: (u8, u8) = (1, 10);

/// Accepted range for the full cycle length in days.
pub const CYCLE_LENGTH_RANGE: (u8, u8) = (21, 40);

/// Length of the luteal phase assumed by the classifier.
const LUTEAL_DAYS: i32 = 14;

/// Width of the ovulation window that precedes the luteal phase.
const OVULATION_WINDOW_DAYS: i32 = 5;

/// Menstrual-cycle stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Phase; 4] = [
        Phase::Menstrual,
        Phase::Follicular,
        Phase::Ovulation,
        Phase::Luteal,
    ];
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Menstrual => write!(f, "Menstrual"),
            Self::Follicular => write!(f, "Follicular"),
            Self::Ovulation => write!(f, "Ovulation"),
            Self::Luteal => write!(f, "Luteal"),
        }
    }
}

/// Classify the cycle phase. First matching rule wins.
///
/// Cycles shorter than 14 days push the luteal start to zero or below, so
/// almost every day classifies as luteal. The form never produces such
/// cycles, but the rule is total and applies it unchanged.
#[must_use]
pub fn classify(days_since: i32, period_len: i32, cycle_len: i32) -> Phase {
    let luteal_start = cycle_len - LUTEAL_DAYS;

    if days_since <= period_len {
        Phase::Menstrual
    } else if days_since >= luteal_start {
        Phase::Luteal
    } else if days_since >= luteal_start - OVULATION_WINDOW_DAYS {
        Phase::Ovulation
    } else {
        Phase::Follicular
    }
}

/// Cycle numbers read from one form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleInput {
    /// Days since the last period started (0-40)
    pub days_since_period: u8,

    /// Period length in days (1-10)
    pub period_length: u8,

    /// Cycle length in days (21-40)
    pub cycle_length: u8,
}

impl Default for CycleInput {
    fn default() -> Self {
        Self {
            days_since_period: 10,
            period_length: 5,
            cycle_length: 28,
        }
    }
}

impl CycleInput {
    /// Create a new cycle input. Ranges are checked by [`CycleInput::validate`].
    #[must_use]
    pub fn new(days_since_period: u8, period_length: u8, cycle_length: u8) -> Self {
        Self {
            days_since_period,
            period_length,
            cycle_length,
        }
    }

    /// Phase for this input.
    #[must_use]
    pub fn phase(&self) -> Phase {
        classify(
            i32::from(self.days_since_period),
            i32::from(self.period_length),
            i32::from(self.cycle_length),
        )
    }

    /// Validate that all values are within the form's declared ranges.
    ///
    /// # Errors
    /// Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let checks = [
            ("Days since period", self.days_since_period, DAYS_SINCE_RANGE),
            ("Period length", self.period_length, PERIOD_LENGTH_RANGE),
            ("Cycle length", self.cycle_length, CYCLE_LENGTH_RANGE),
        ];

        let errors: Vec<String> = checks
            .iter()
            .filter(|(_, value, (min, max))| !(*min..=*max).contains(value))
            .map(|(label, value, (min, max))| {
                format!("{label} {value} out of range [{min}, {max}]")
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
