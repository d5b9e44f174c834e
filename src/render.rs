use std::collections::HashMap;
use std::fmt::Write;

use itertools::Itertools;

use crate::models::WorkoutPlan;

/// Write `plan` back out in the line grammar. `names` maps exercise ids to
/// display names; unknown ids are written as-is.
pub fn render_plan(plan: &WorkoutPlan, names: &HashMap<String, String>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Plan Name: {}", plan.name);

    for (idx, day) in plan.days.iter().enumerate() {
        let _ = writeln!(out);
        let mut header = format!("Day {}:", day.day_number);
        for wd in plan.weekdays_of(idx) {
            let _ = write!(header, " [{}]", wd.short());
        }
        let _ = write!(header, " {}", day.name);

        let muscles = [day.primary_muscle, day.secondary_muscle]
            .into_iter()
            .flatten()
            .map(|m| m.as_str())
            .join(", ");
        if !muscles.is_empty() {
            let _ = write!(header, " {{{muscles}}}");
        }
        let _ = writeln!(out, "{header}");

        if day.is_rest_day {
            let _ = writeln!(out, "- Rest day");
            continue;
        }
        for ex in &day.exercises {
            let name = names
                .get(&ex.exercise_id)
                .map(String::as_str)
                .unwrap_or(&ex.exercise_id);
            let _ = writeln!(out, "- {} | {} | {}s", name, ex.sets, ex.rest_seconds);
        }
    }

    out
}
