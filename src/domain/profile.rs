//! Lifestyle profile and symptom flags.
//!
//! Every categorical choice is a closed enum whose model column is looked up
//! in an explicit table rather than assembled from the on-screen label.

use serde::{Deserialize, Serialize};

/// Average nightly sleep this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SleepBand {
    #[default]
    LessThan4,
    From4To5,
    From6To7,
    From6To8,
    From8To9,
}

impl SleepBand {
    pub const ALL: [SleepBand; 5] = [
        SleepBand::LessThan4,
        SleepBand::From4To5,
        SleepBand::From6To7,
        SleepBand::From6To8,
        SleepBand::From8To9,
    ];

    /// Label shown on the form.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::LessThan4 => "Less than 4 hours",
            Self::From4To5 => "4-5 hours",
            Self::From6To7 => "6-7 hours",
            Self::From6To8 => "6-8 hours",
            Self::From8To9 => "8-9 hours",
        }
    }

    /// One-hot column name in the trained model.
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            Self::LessThan4 => "Sleep_Less than 4 hours",
            Self::From4To5 => "Sleep_4-5 hours",
            Self::From6To7 => "Sleep_6-7 hours",
            Self::From6To8 => "Sleep_6-8 hours",
            Self::From8To9 => "Sleep_8-9 hours",
        }
    }
}

/// Total workout time this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkoutBand {
    #[default]
    LessThan2,
    From2To4,
    From5To7,
    From8To10,
    MoreThan10,
}

impl WorkoutBand {
    pub const ALL: [WorkoutBand; 5] = [
        WorkoutBand::LessThan2,
        WorkoutBand::From2To4,
        WorkoutBand::From5To7,
        WorkoutBand::From8To10,
        WorkoutBand::MoreThan10,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::LessThan2 => "Less than 2 hours",
            Self::From2To4 => "2-4 hours",
            Self::From5To7 => "5-7 hours",
            Self::From8To10 => "8-10 hours",
            Self::MoreThan10 => "More than 10 hours",
        }
    }

    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            Self::LessThan2 => "Workout_Less than 2 hours",
            Self::From2To4 => "Workout_2-4 hours",
            Self::From5To7 => "Workout_5-7 hours",
            Self::From8To10 => "Workout_8-10 hours",
            Self::MoreThan10 => "Workout_More than 10 hours",
        }
    }
}

/// Age range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeBand {
    #[default]
    From11To20,
    From21To30,
    From31To40,
    From41To50,
    Over50,
}

impl AgeBand {
    pub const ALL: [AgeBand; 5] = [
        AgeBand::From11To20,
        AgeBand::From21To30,
        AgeBand::From31To40,
        AgeBand::From41To50,
        AgeBand::Over50,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::From11To20 => "11-20",
            Self::From21To30 => "21-30",
            Self::From31To40 => "31-40",
            Self::From41To50 => "41-50",
            Self::Over50 => "51+",
        }
    }

    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            Self::From11To20 => "Age_11-20",
            Self::From21To30 => "Age_21-30",
            Self::From31To40 => "Age_31-40",
            Self::From41To50 => "Age_41-50",
            Self::Over50 => "Age_51+",
        }
    }
}

/// Self-reported symptom. Each maps to one binary model column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symptom {
    Headaches,
    Bloating,
    MoodSwings,
    IncreasedSexDrive,
    Cravings,
    Irritability,
    Fatigue,
}

impl Symptom {
    pub const ALL: [Symptom; 7] = [
        Symptom::Headaches,
        Symptom::Bloating,
        Symptom::MoodSwings,
        Symptom::IncreasedSexDrive,
        Symptom::Cravings,
        Symptom::Irritability,
        Symptom::Fatigue,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Headaches => "Headaches",
            Self::Bloating => "Bloating",
            Self::MoodSwings => "Mood Swings",
            Self::IncreasedSexDrive => "Increased Sex Drive",
            Self::Cravings => "Cravings",
            Self::Irritability => "Irritability",
            Self::Fatigue => "Fatigue",
        }
    }

    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            Self::Headaches => "Headaches",
            Self::Bloating => "Bloating",
            Self::MoodSwings => "Mood_swings",
            Self::IncreasedSexDrive => "Increased_sex_drive",
            Self::Cravings => "Cravings",
            Self::Irritability => "Irritability",
            Self::Fatigue => "Fatigue",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Set of the seven symptom checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymptomFlags(u8);

impl SymptomFlags {
    /// No symptoms selected.
    #[must_use]
    pub fn none() -> Self {
        Self(0)
    }

    #[must_use]
    pub fn contains(&self, symptom: Symptom) -> bool {
        self.0 & symptom.bit() != 0
    }

    pub fn set(&mut self, symptom: Symptom, on: bool) {
        if on {
            self.0 |= symptom.bit();
        } else {
            self.0 &= !symptom.bit();
        }
    }

    pub fn toggle(&mut self, symptom: Symptom) {
        self.0 ^= symptom.bit();
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, symptom: Symptom) -> Self {
        self.set(symptom, true);
        self
    }

    /// Iterate over every symptom paired with its flag.
    pub fn iter(&self) -> impl Iterator<Item = (Symptom, bool)> + '_ {
        Symptom::ALL.iter().map(move |s| (*s, self.contains(*s)))
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }
}

/// Lifestyle answers from one form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub sleep_band: SleepBand,
    pub workout_band: WorkoutBand,
    pub age_band: AgeBand,
    pub symptom_flags: SymptomFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_prefix_labels() {
        for band in SleepBand::ALL {
            assert_eq!(band.column(), format!("Sleep_{}", band.label()));
        }
        for band in WorkoutBand::ALL {
            assert_eq!(band.column(), format!("Workout_{}", band.label()));
        }
        for band in AgeBand::ALL {
            assert_eq!(band.column(), format!("Age_{}", band.label()));
        }
    }

    #[test]
    fn test_symptom_flags() {
        let mut flags = SymptomFlags::none().with(Symptom::Fatigue);
        assert!(flags.contains(Symptom::Fatigue));
        assert!(!flags.contains(Symptom::Headaches));

        flags.toggle(Symptom::Headaches);
        flags.set(Symptom::Fatigue, false);
        assert!(flags.contains(Symptom::Headaches));
        assert!(!flags.contains(Symptom::Fatigue));
        assert_eq!(flags.count(), 1);
        assert_eq!(flags.iter().filter(|(_, on)| *on).count(), 1);
    }

    #[test]
    fn test_symptom_columns_are_distinct() {
        let mut columns: Vec<&str> = Symptom::ALL.iter().map(Symptom::column).collect();
        columns.sort_unstable();
        columns.dedup();
        assert_eq!(columns.len(), 7);
    }
}
