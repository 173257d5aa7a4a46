//! Feature row construction for the mood model.
//!
//! The model declares an ordered list of column names. A row always carries
//! exactly those columns, in that order; anything the form cannot provide is
//! zero.

use std::collections::HashMap;

use super::cycle::CycleInput;
use super::profile::{AgeBand, SleepBand, Symptom, UserProfile, WorkoutBand};

/// Numeric cycle-length column.
pub const CYCLE_LENGTH_COLUMN: &str = "Cycle_length";

/// Ordered numeric row matching a model's declared columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(String, f64)>,
}

impl FeatureRow {
    /// Column names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Values in column order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.columns.iter().map(|(_, v)| *v).collect()
    }

    /// Value of a named column.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Count of columns set to a non-zero value.
    #[must_use]
    pub fn active_columns(&self) -> usize {
        self.columns.iter().filter(|(_, v)| *v != 0.0).count()
    }
}

/// Build the model row for one submission.
///
/// Columns the model does not declare are dropped; declared columns the
/// input does not touch are zero. Never fails: a column missing from the
/// model simply has no effect, so callers validate the mapping once at
/// startup with [`missing_columns`].
#[must_use]
pub fn build(cycle: &CycleInput, profile: &UserProfile, known_feature_names: &[String]) -> FeatureRow {
    let mut values: HashMap<&str, f64> = HashMap::with_capacity(11);

    values.insert(CYCLE_LENGTH_COLUMN, f64::from(cycle.cycle_length));
    values.insert(profile.sleep_band.column(), 1.0);
    values.insert(profile.workout_band.column(), 1.0);
    values.insert(profile.age_band.column(), 1.0);

    for (symptom, on) in profile.symptom_flags.iter() {
        values.insert(symptom.column(), if on { 1.0 } else { 0.0 });
    }

    let columns = known_feature_names
        .iter()
        .map(|name| {
            let value = values.get(name.as_str()).copied().unwrap_or(0.0);
            (name.clone(), value)
        })
        .collect();

    FeatureRow { columns }
}

/// Every column the form can set, in a stable order.
#[must_use]
pub fn expected_columns() -> Vec<&'static str> {
    std::iter::once(CYCLE_LENGTH_COLUMN)
        .chain(SleepBand::ALL.iter().map(SleepBand::column))
        .chain(WorkoutBand::ALL.iter().map(WorkoutBand::column))
        .chain(AgeBand::ALL.iter().map(AgeBand::column))
        .chain(Symptom::ALL.iter().map(Symptom::column))
        .collect()
}

/// Columns the form can set that the model does not declare.
///
/// An empty result means every selection reaches the model.
#[must_use]
pub fn missing_columns(model_feature_names: &[String]) -> Vec<&'static str> {
    expected_columns()
        .into_iter()
        .filter(|col| !model_feature_names.iter().any(|name| name == col))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::SymptomFlags;

    fn model_columns() -> Vec<String> {
        // pandas get_dummies ordering, as the model was trained
        let mut cols: Vec<String> = vec![CYCLE_LENGTH_COLUMN.to_string()];
        cols.extend(Symptom::ALL.iter().map(|s| s.column().to_string()));
        cols.extend(SleepBand::ALL.iter().map(|b| b.column().to_string()));
        cols.extend(WorkoutBand::ALL.iter().map(|b| b.column().to_string()));
        cols.extend(AgeBand::ALL.iter().map(|b| b.column().to_string()));
        cols
    }

    fn scenario_profile() -> UserProfile {
        UserProfile {
            sleep_band: SleepBand::From6To7,
            workout_band: WorkoutBand::From2To4,
            age_band: AgeBand::From21To30,
            symptom_flags: SymptomFlags::none(),
        }
    }

    #[test]
    fn test_build_scenario_row() {
        let cols = model_columns();
        let row = build(&CycleInput::new(3, 5, 28), &scenario_profile(), &cols);

        assert_eq!(row.len(), 23);
        assert_eq!(row.get("Cycle_length"), Some(28.0));
        assert_eq!(row.get("Sleep_6-7 hours"), Some(1.0));
        assert_eq!(row.get("Workout_2-4 hours"), Some(1.0));
        assert_eq!(row.get("Age_21-30"), Some(1.0));
        for symptom in Symptom::ALL {
            assert_eq!(row.get(symptom.column()), Some(0.0));
        }
        assert_eq!(row.get("Sleep_6-8 hours"), Some(0.0));
        assert_eq!(row.active_columns(), 4);
    }

    #[test]
    fn test_build_preserves_declared_order() {
        let mut cols = model_columns();
        cols.reverse();
        cols.push("Unrelated_column".to_string());

        let profile = UserProfile {
            symptom_flags: SymptomFlags::none()
                .with(Symptom::Fatigue)
                .with(Symptom::Cravings),
            ..scenario_profile()
        };
        let row = build(&CycleInput::default(), &profile, &cols);

        let names: Vec<&str> = row.names().collect();
        let expected: Vec<&str> = cols.iter().map(String::as_str).collect();
        assert_eq!(names, expected);
        assert_eq!(row.get("Unrelated_column"), Some(0.0));
        assert_eq!(row.get("Fatigue"), Some(1.0));
        assert_eq!(row.get("Cravings"), Some(1.0));
    }

    #[test]
    fn test_build_drops_undeclared_columns() {
        let cols = vec!["Cycle_length".to_string(), "Fatigue".to_string()];
        let row = build(&CycleInput::default(), &scenario_profile(), &cols);

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("Sleep_6-7 hours"), None);
        assert_eq!(row.values(), vec![28.0, 0.0]);
    }

    #[test]
    fn test_build_cardinality_for_every_band() {
        let cols = model_columns();
        for sleep in SleepBand::ALL {
            for workout in WorkoutBand::ALL {
                for age in AgeBand::ALL {
                    let profile = UserProfile {
                        sleep_band: sleep,
                        workout_band: workout,
                        age_band: age,
                        symptom_flags: SymptomFlags::none().with(Symptom::Bloating),
                    };
                    let row = build(&CycleInput::default(), &profile, &cols);
                    assert_eq!(row.len(), cols.len());
                    // cycle length + three one-hots + one symptom
                    assert_eq!(row.active_columns(), 5);
                }
            }
        }
    }

    #[test]
    fn test_missing_columns() {
        assert!(missing_columns(&model_columns()).is_empty());

        let partial: Vec<String> = model_columns()
            .into_iter()
            .filter(|c| c != "Age_51+" && c != "Headaches")
            .collect();
        assert_eq!(missing_columns(&partial), vec!["Age_51+", "Headaches"]);
    }
}
