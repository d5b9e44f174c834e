use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{MuscleGroup, Weekday};
use crate::utils::leading_set_count;

pub const DEFAULT_MET: f64 = 3.5;
pub const DEFAULT_PLAN_NAME: &str = "Untitled Plan";

/// Working time assumed per set when estimating a day's duration.
const SECONDS_PER_SET: u32 = 45;
/// Sets assumed when a sets description has no leading count.
const DEFAULT_SET_COUNT: u32 = 3;

/// A full program: ordered days plus the weekdays they are scheduled on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    pub name: String,
    pub days: Vec<WorkoutDay>,
    /// Weekday → index into `days`.
    pub weekdays: BTreeMap<Weekday, usize>,
}

impl WorkoutPlan {
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }

    /// The day scheduled on `weekday`, if any.
    pub fn day_for(&self, weekday: Weekday) -> Option<&WorkoutDay> {
        self.weekdays.get(&weekday).and_then(|i| self.days.get(*i))
    }

    /// Weekdays mapped to the day at `index`, in calendar order.
    pub fn weekdays_of(&self, index: usize) -> Vec<Weekday> {
        self.weekdays
            .iter()
            .filter(|(_, i)| **i == index)
            .map(|(d, _)| *d)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDay {
    pub id: String,
    pub name: String,
    pub day_number: u32,
    pub exercises: Vec<ExerciseInstance>,
    pub is_rest_day: bool,
    pub primary_muscle: Option<MuscleGroup>,
    pub secondary_muscle: Option<MuscleGroup>,
    pub estimated_minutes: u32,
}

/// One exercise slot within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseInstance {
    pub exercise_id: String,
    /// Free text such as `3x8` or `4 sets to failure`.
    pub sets: String,
    pub rest_seconds: u32,
}

/// Reusable exercise description, persisted in an exercise store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_id: String,
    pub met: f64,
}

impl ExerciseDefinition {
    /// Definition created on first sight of an exercise name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            image_id: id.clone(),
            id,
            name: name.into(),
            description: None,
            met: DEFAULT_MET,
        }
    }
}

/// Estimated minutes for a list of exercises: every set costs its working
/// time plus the rest that follows it.
pub fn estimate_minutes(exercises: &[ExerciseInstance]) -> u32 {
    let seconds: u64 = exercises
        .iter()
        .map(|e| {
            let sets = leading_set_count(&e.sets).unwrap_or(DEFAULT_SET_COUNT) as u64;
            sets * (SECONDS_PER_SET as u64 + e.rest_seconds as u64)
        })
        .sum();
    u32::try_from(seconds.div_ceil(60)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(sets: &str, rest: u32) -> ExerciseInstance {
        ExerciseInstance {
            exercise_id: "x".into(),
            sets: sets.into(),
            rest_seconds: rest,
        }
    }

    #[test]
    fn duration_estimate() {
        assert_eq!(estimate_minutes(&[]), 0);
        // 3 * (45 + 90) = 405s -> 7 min
        assert_eq!(estimate_minutes(&[instance("3x8", 90)]), 7);
        // defaults to 3 sets: 3 * 45 = 135s -> 3 min
        assert_eq!(estimate_minutes(&[instance("AMRAP", 0)]), 3);
        // 4 * 105 + 2 * 75 = 570s -> 10 min
        assert_eq!(
            estimate_minutes(&[instance("4x10", 60), instance("2x15", 30)]),
            10
        );
    }

    #[test]
    fn new_definition_defaults() {
        let def = ExerciseDefinition::new("bench_press", "Bench Press");
        assert_eq!(def.image_id, "bench_press");
        assert_eq!(def.met, DEFAULT_MET);
        assert!(def.description.is_none());
    }

    #[test]
    fn weekday_lookup() {
        let plan = WorkoutPlan {
            name: "p".into(),
            days: vec![WorkoutDay {
                id: "d1".into(),
                name: "Rest".into(),
                day_number: 1,
                exercises: Vec::new(),
                is_rest_day: true,
                primary_muscle: None,
                secondary_muscle: None,
                estimated_minutes: 0,
            }],
            weekdays: BTreeMap::from([(Weekday::Sunday, 0), (Weekday::Wednesday, 0)]),
        };
        assert_eq!(plan.day_for(Weekday::Sunday).map(|d| d.id.as_str()), Some("d1"));
        assert!(plan.day_for(Weekday::Monday).is_none());
        assert_eq!(plan.weekdays_of(0), vec![Weekday::Wednesday, Weekday::Sunday]);
    }
}
