//! Phase-based wellness recommendations.

use super::cycle::Phase;

/// Food, exercise and rationale text for one phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub foods: &'static [&'static str],
    pub exercises: &'static [&'static str],
    pub rationale: &'static [&'static str],
}

const MENSTRUAL: Recommendation = Recommendation {
    foods: &[
        "Iron-rich foods: spinach, kunde, beef, liver, beans, ndengu",
        "Vitamin C foods: citrus, pawpaw, strawberries",
        "Hydrating foods: watermelon, soups, coconut water",
    ],
    exercises: &[
        "Light stretching",
        "Yoga (hip opening stretches)",
        "Light walks or light dancing",
        "Meditation and deep breathing exercises",
    ],
    rationale: &[
        "Iron-rich foods support the body during blood loss, while Vitamin C increases iron absorption.",
        "Hydrating foods help prevent headaches and fatigue common in this phase.",
        "Exercises are gentle because energy levels are low and the uterus is contracting, so light movement reduces cramps and improves circulation without strain.",
    ],
};

const FOLLICULAR: Recommendation = Recommendation {
    foods: &[
        "High-energy carbs: sweet potatoes, rice, chapati, oats",
        "Lean proteins: chicken, eggs, beans",
        "B vitamin foods: maize, nduma, njahi, spinach",
        "Healthy fats: avocados, nuts, seeds",
    ],
    exercises: &[
        "Cardio workouts: running, swimming, dance",
        "Cycling",
        "Strength training (lower weights, higher reps)",
        "Pilates",
    ],
    rationale: &[
        "Carbs support rising energy, lean proteins and B vitamins help follicle development, and healthy fats assist hormone production.",
        "Exercises are more energetic because estrogen is increasing, improving endurance, mood, and strength tolerance.",
    ],
};

const OVULATION: Recommendation = Recommendation {
    foods: &[
        "Anti-oxidant foods: berries, greens, ginger, hibiscus tea",
        "Protein-rich foods: fish, chicken, eggs, legumes",
        "Zinc-rich foods: omena, seafood",
        "Healthy fats: avocado, nuts, olive oil",
    ],
    exercises: &[
        "Higher-intensity workouts",
        "HIIT",
        "Strength training (peak performance)",
        "Cardio sessions: running, swimming, cycling",
    ],
    rationale: &[
        "Antioxidants reduce oxidative stress from ovulation, proteins support energy and muscle recovery, zinc aids hormone regulation, and healthy fats prepare the body for progesterone production.",
        "Feel free to take up more intense exercise because this is the phase of peak strength, endurance, and coordination driven by high estrogen and LH levels.",
    ],
};

const LUTEAL: Recommendation = Recommendation {
    foods: &[
        "Complex carbs: sweet potatoes, ugali, brown rice",
        "Magnesium-rich foods: kunde, njahi, spinach, omena",
        "Vitamin B6 foods: matoke, potatoes, bananas",
    ],
    exercises: &[
        "Light cardio: walking, light jogging, swimming, light dancing",
        "Light yoga",
        "Low-intensity workouts",
        "Stretching and relaxation exercises",
    ],
    rationale: &[
        "Complex carbs help regulate PMS irritability, magnesium reduces cramps, and Vitamin B6 supports serotonin and dopamine levels.",
        "Lighter exercises are recommended to accommodate rising progesterone, increased inflammation, and lower energy as the body prepares for menstruation.",
    ],
};

/// Recommendations for a phase.
#[must_use]
pub fn lookup(phase: Phase) -> &'static Recommendation {
    match phase {
        Phase::Menstrual => &MENSTRUAL,
        Phase::Follicular => &FOLLICULAR,
        Phase::Ovulation => &OVULATION,
        Phase::Luteal => &LUTEAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_phase_has_content() {
        for phase in Phase::ALL {
            let rec = lookup(phase);
            for section in [rec.foods, rec.exercises, rec.rationale] {
                assert!(!section.is_empty(), "{phase} has an empty section");
                assert!(section.iter().all(|line| !line.trim().is_empty()));
            }
        }
    }

    #[test]
    fn test_phases_are_distinct() {
        assert_ne!(lookup(Phase::Menstrual), lookup(Phase::Luteal));
        assert_ne!(lookup(Phase::Follicular), lookup(Phase::Ovulation));
    }

    #[test]
    fn test_menstrual_mentions_iron() {
        assert!(lookup(Phase::Menstrual).foods[0].starts_with("Iron-rich"));
    }
}
