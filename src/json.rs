//! JSON plans, converted into the text grammar the parser reads
//!
//! ```json
//! { "planName": "PPL",
//!   "days": [ { "day": "Monday", "label": "Push", "targetMuscles": ["chest"],
//!               "exercises": [ { "name": "Bench Press", "sets": 3, "reps": 8, "rest": "90s" } ] } ] }
//! ```

use std::fmt::Write;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PlanError;
use crate::models::DEFAULT_PLAN_NAME;
use crate::types::Weekday;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonPlan {
    #[serde(default, alias = "plan_name", alias = "name")]
    plan_name: Option<String>,
    days: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonDay {
    #[serde(default, alias = "weekday")]
    day: Option<String>,
    #[serde(default, alias = "name", alias = "title")]
    label: Option<String>,
    #[serde(default, alias = "target_muscles", alias = "muscles")]
    target_muscles: Option<Vec<String>>,
    #[serde(default)]
    exercises: Option<Vec<Value>>,
}

/// Three-letter weekday for `[..]` annotations. Unrecognized labels keep
/// their first three characters.
pub fn normalize_weekday(label: &str) -> String {
    match Weekday::parse(label) {
        Some(d) => d.short().to_string(),
        None => label.trim().chars().take(3).collect(),
    }
}

/// Free text must not break the line grammar.
fn clean(s: &str) -> String {
    s.replace(['|', '\n', '\r'], " ").trim().to_string()
}

/// Header text additionally must not open a weekday or muscle annotation.
fn clean_header(s: &str) -> String {
    clean(s).replace(['[', ']', '{', '}'], " ").trim().to_string()
}

/// Strings and numbers both count; null, empty and other types do not.
fn field_text(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(clean(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn exercise_line(value: &Value, day: usize, exercise: usize) -> Result<String, PlanError> {
    let obj = value.as_object().ok_or_else(|| {
        PlanError::JsonMalformed(format!(
            "day {day}, exercise {exercise}: expected an object"
        ))
    })?;

    let missing = |field| PlanError::JsonMissingField {
        day,
        exercise,
        field,
    };
    let name = field_text(obj, "name").ok_or_else(|| missing("name"))?;
    let sets = field_text(obj, "sets").ok_or_else(|| missing("sets"))?;
    let reps = field_text(obj, "reps").ok_or_else(|| missing("reps"))?;
    let rest = field_text(obj, "rest").unwrap_or_else(|| "0".to_string());

    Ok(format!("- {name} | {sets}x{reps} | {rest}"))
}

/// Convert a JSON plan into plan text.
pub fn json_to_plan_text(json: &str) -> Result<String, PlanError> {
    let plan: JsonPlan =
        serde_json::from_str(json).map_err(|e| PlanError::JsonMalformed(e.to_string()))?;

    let name = plan
        .plan_name
        .as_deref()
        .map(clean)
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string());

    let mut out = String::new();
    let _ = writeln!(out, "Plan Name: {name}");

    for (i, raw_day) in plan.days.iter().enumerate() {
        let day_no = i + 1;
        if !raw_day.is_object() {
            return Err(PlanError::JsonMalformed(format!(
                "day {day_no}: expected an object"
            )));
        }
        let day: JsonDay = serde_json::from_value(raw_day.clone())
            .map_err(|e| PlanError::JsonMalformed(format!("day {day_no}: {e}")))?;

        let label = day.label.as_deref().map(clean_header).unwrap_or_default();

        let mut header = format!("Day {day_no}:");
        if let Some(wd) = day
            .day
            .as_deref()
            .map(|d| normalize_weekday(&clean_header(d)))
            .filter(|w| !w.is_empty())
        {
            let _ = write!(header, " [{wd}]");
        }
        if !label.is_empty() {
            let _ = write!(header, " {label}");
        }
        let muscles: Vec<String> = day
            .target_muscles
            .unwrap_or_default()
            .iter()
            .map(|m| clean_header(m).replace(',', " ").trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if !muscles.is_empty() {
            let _ = write!(header, " {{{}}}", muscles.join(", "));
        }
        if header.ends_with(':') {
            let _ = write!(header, " Day {day_no}");
        }
        let _ = writeln!(out, "{header}");

        let exercises = day.exercises.unwrap_or_default();
        if exercises.is_empty() {
            if label.to_lowercase().contains("rest") {
                let _ = writeln!(out, "- Rest day");
            }
            continue;
        }
        for (j, ex) in exercises.iter().enumerate() {
            let line = exercise_line(ex, day_no, j + 1)?;
            let _ = writeln!(out, "{line}");
        }
    }

    Ok(out)
}
