//! Plan text parser
//!
//! ```text
//! Plan Name: Push Pull Legs
//! // comments and blank lines are ignored
//! Day 1: [Mon] Push {chest, triceps}
//! - Bench Press | 3x8 | 90s
//! - Dips | 3x12 | 60s
//! Day 2: [Tue] Rest
//! ```
//!
//! Single pass, top to bottom. Exercise names are resolved against an
//! [`ExerciseStore`] as they are met; unknown names become new definitions.

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::PlanError;
use crate::models::{
    DEFAULT_PLAN_NAME, ExerciseDefinition, ExerciseInstance, WorkoutDay, WorkoutPlan,
    estimate_minutes,
};
use crate::store::ExerciseStore;
use crate::types::{MuscleGroup, Weekday, best_muscle_suggestion};
use crate::utils::{exercise_id_from_name, parse_rest_seconds};

const PLAN_NAME_PREFIX: &str = "plan name:";

static DAY_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^day\s+(\d+)\s*:(.*)$").expect("day header regex"));
static WEEKDAY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\[\s*(mon|tue|wed|thu|fri|sat|sun)[a-z]*\s*\]").expect("weekday regex")
});
static MUSCLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]*)\}").expect("muscle tag regex"));

/// One classified input line.
#[derive(Debug, PartialEq)]
enum Line<'a> {
    PlanName(&'a str),
    DayHeader { number: u32, text: &'a str },
    Exercise { name: &'a str, sets: &'a str, rest: &'a str },
    RestMarker,
    Orphan,
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn split_exercise(body: &str, line: usize) -> Result<Line<'_>, PlanError> {
    let parts: Vec<&str> = body.split('|').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(PlanError::MalformedExercise {
            line,
            reason: format!(
                "expected `name | sets | rest`, found {} field(s)",
                parts.len()
            ),
        });
    }
    if parts[0].is_empty() {
        return Err(PlanError::MalformedExercise {
            line,
            reason: "exercise name is empty".into(),
        });
    }
    if parts[1].is_empty() {
        return Err(PlanError::MalformedExercise {
            line,
            reason: "sets are empty".into(),
        });
    }
    Ok(Line::Exercise {
        name: parts[0],
        sets: parts[1],
        rest: parts[2],
    })
}

fn classify(line: &str, line_no: usize) -> Result<Line<'_>, PlanError> {
    if let Some(name) = strip_prefix_ci(line, PLAN_NAME_PREFIX) {
        return Ok(Line::PlanName(name.trim()));
    }

    if let Some(caps) = DAY_HEADER.captures(line) {
        let text = caps.get(2).map_or("", |m| m.as_str()).trim();
        if text.is_empty() {
            return Err(PlanError::MalformedDay { line: line_no });
        }
        // `\d+` only fails to parse on overflow.
        let number = caps[1].parse::<u32>().unwrap_or(u32::MAX);
        return Ok(Line::DayHeader { number, text });
    }

    if let Some(body) = line.strip_prefix('-') {
        // Separator rules such as `---`.
        if body.chars().all(|c| c == '-') {
            return Ok(Line::Orphan);
        }
        let body = body.trim();
        if !body.contains('|') {
            let lower = body.to_lowercase();
            if lower == "rest" || lower == "rest day" {
                return Ok(Line::RestMarker);
            }
        }
        return split_exercise(body, line_no);
    }

    if line.contains('|') && line.split('|').count() == 3 {
        return split_exercise(line, line_no);
    }

    Ok(Line::Orphan)
}

/// Only a plan name or a day header may start a plan.
fn opens_plan(line: &str) -> bool {
    strip_prefix_ci(line, PLAN_NAME_PREFIX).is_some() || DAY_HEADER.is_match(line)
}

/// Rest-day test on a lowercased day name. Deliberately literal: "chest"
/// and "rest time" must not count as "rest".
fn looks_like_rest_day(name: &str) -> bool {
    name.contains("rest day")
        || (name.contains("rest") && !name.contains("chest") && !name.contains("rest time"))
}

struct OpenDay {
    number: u32,
    name: String,
    muscles: Vec<MuscleGroup>,
    exercises: Vec<ExerciseInstance>,
    rest_marker: bool,
}

impl OpenDay {
    fn from_header(number: u32, text: &str) -> Self {
        let mut muscles = Vec::new();
        if let Some(caps) = MUSCLE_TAG.captures(text) {
            for raw in caps[1].split(',').map(str::trim).filter(|s| !s.is_empty()) {
                match MuscleGroup::parse(raw) {
                    Some(m) if !muscles.contains(&m) => muscles.push(m),
                    Some(_) => {}
                    None => match best_muscle_suggestion(raw) {
                        Some(sug) => warn!(day = number, muscle = raw, suggestion = sug, "unknown muscle group, did you mean `{sug}`?"),
                        None => warn!(day = number, muscle = raw, "unknown muscle group"),
                    },
                }
            }
        }

        let stripped = WEEKDAY_TAG.replace_all(text, " ");
        let stripped = MUSCLE_TAG.replace_all(&stripped, " ");
        let mut name = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        if name.is_empty() {
            name = format!("Day {number}");
        }

        if muscles.is_empty() {
            muscles = MuscleGroup::detect(&name);
        }

        Self {
            number,
            name,
            muscles,
            exercises: Vec::new(),
            rest_marker: false,
        }
    }

    fn finish(self) -> WorkoutDay {
        let is_rest_day = self.exercises.is_empty()
            && (self.rest_marker || looks_like_rest_day(&self.name.to_lowercase()));
        let estimated_minutes = if is_rest_day {
            0
        } else {
            estimate_minutes(&self.exercises)
        };

        WorkoutDay {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            day_number: self.number,
            exercises: self.exercises,
            is_rest_day,
            primary_muscle: self.muscles.first().copied(),
            secondary_muscle: self.muscles.get(1).copied(),
            estimated_minutes,
        }
    }
}

struct PlanParser<'s, S: ?Sized> {
    store: &'s S,
    name: Option<String>,
    days: Vec<WorkoutDay>,
    weekdays: BTreeMap<Weekday, usize>,
    open: Option<OpenDay>,
    /// lowercased exercise name → resolved id, for this parse only
    resolved: HashMap<String, String>,
}

impl<'s, S: ExerciseStore + ?Sized> PlanParser<'s, S> {
    fn new(store: &'s S) -> Self {
        Self {
            store,
            name: None,
            days: Vec::new(),
            weekdays: BTreeMap::new(),
            open: None,
            resolved: HashMap::new(),
        }
    }

    async fn run(mut self, input: &str) -> Result<WorkoutPlan, PlanError> {
        let mut seen_content = false;

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }

            if !seen_content {
                seen_content = true;
                if !opens_plan(line) {
                    return Err(PlanError::MissingLeadingPlanName { line: line_no });
                }
            }

            let class = classify(line, line_no)?;

            match class {
                Line::PlanName(name) => {
                    if self.name.is_none() && self.open.is_none() && self.days.is_empty() {
                        self.name = Some(name.to_string());
                    } else {
                        debug!(line = line_no, "ignoring repeated plan name");
                    }
                }
                Line::DayHeader { number, text } => {
                    self.close_day();
                    let index = self.days.len();
                    for caps in WEEKDAY_TAG.captures_iter(text) {
                        if let Some(day) = Weekday::parse(&caps[1]) {
                            if let Some(prev) = self.weekdays.insert(day, index) {
                                debug!(weekday = %day, prev, index, "weekday reassigned");
                            }
                        }
                    }
                    let day = OpenDay::from_header(number, text);
                    debug!(line = line_no, day = number, name = %day.name, "day opened");
                    self.open = Some(day);
                }
                Line::Exercise { name, sets, rest } => {
                    if self.open.is_none() {
                        warn!(line = line_no, exercise = name, "exercise outside of any day, skipped");
                        continue;
                    }
                    let exercise_id = self.resolve(name).await?;
                    let instance = ExerciseInstance {
                        exercise_id,
                        sets: sets.to_string(),
                        rest_seconds: parse_rest_seconds(rest),
                    };
                    if let Some(day) = self.open.as_mut() {
                        day.exercises.push(instance);
                    }
                }
                Line::RestMarker => match self.open.as_mut() {
                    Some(day) => day.rest_marker = true,
                    None => debug!(line = line_no, "rest marker outside of any day"),
                },
                Line::Orphan => debug!(line = line_no, "ignoring unrecognized line"),
            }
        }

        if !seen_content {
            return Err(PlanError::EmptyInput);
        }

        self.close_day();
        if self.days.is_empty() {
            return Err(PlanError::NoDaysProduced);
        }

        debug_assert!(self.weekdays.values().all(|i| *i < self.days.len()));

        let name = self
            .name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAN_NAME.to_string());

        Ok(WorkoutPlan {
            name,
            days: self.days,
            weekdays: self.weekdays,
        })
    }

    fn close_day(&mut self) {
        if let Some(day) = self.open.take() {
            self.days.push(day.finish());
        }
    }

    /// Name → store lookup → id lookup → new definition.
    async fn resolve(&mut self, name: &str) -> Result<String, PlanError> {
        let key = name.to_lowercase();
        if let Some(id) = self.resolved.get(&key) {
            return Ok(id.clone());
        }

        let id = match self.store.find_by_name(name).await? {
            Some(def) => def.id,
            None => {
                let mut candidate = exercise_id_from_name(name);
                if candidate.is_empty() {
                    candidate = format!("exercise_{}", Uuid::new_v4().simple());
                }
                match self.store.find_by_id(&candidate).await? {
                    Some(def) => def.id,
                    None => {
                        let def = ExerciseDefinition::new(candidate, name);
                        self.store.insert(&def).await?;
                        info!(id = %def.id, name = %def.name, "created exercise definition");
                        def.id
                    }
                }
            }
        };

        self.resolved.insert(key, id.clone());
        Ok(id)
    }
}

/// Parse a plan written in the line grammar, resolving every exercise
/// against `store`. Definitions inserted before a later failure stay in the
/// store.
pub async fn parse_plan<S>(input: &str, store: &S) -> Result<WorkoutPlan, PlanError>
where
    S: ExerciseStore + ?Sized,
{
    PlanParser::new(store).run(input).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl ExerciseStore for BrokenStore {
        async fn find_by_name(&self, _: &str) -> crate::store::Result<Option<ExerciseDefinition>> {
            Err(StoreError::Backend("disk on fire".into()))
        }
        async fn find_by_id(&self, _: &str) -> crate::store::Result<Option<ExerciseDefinition>> {
            Ok(None)
        }
        async fn insert(&self, _: &ExerciseDefinition) -> crate::store::Result<()> {
            Ok(())
        }
    }

    /// Memory store that fails one operation on demand.
    #[derive(Default)]
    struct FailingStore {
        inner: MemoryStore,
        fail_find_by_id: bool,
        /// `insert` fails for this exercise name.
        fail_insert_of: Option<&'static str>,
    }

    #[async_trait]
    impl ExerciseStore for FailingStore {
        async fn find_by_name(&self, name: &str) -> crate::store::Result<Option<ExerciseDefinition>> {
            self.inner.find_by_name(name).await
        }
        async fn find_by_id(&self, id: &str) -> crate::store::Result<Option<ExerciseDefinition>> {
            if self.fail_find_by_id {
                return Err(StoreError::Backend("index unreadable".into()));
            }
            self.inner.find_by_id(id).await
        }
        async fn insert(&self, def: &ExerciseDefinition) -> crate::store::Result<()> {
            if self.fail_insert_of == Some(def.name.as_str()) {
                return Err(StoreError::Backend("read-only".into()));
            }
            self.inner.insert(def).await
        }
    }

    async fn parse(input: &str) -> Result<WorkoutPlan, PlanError> {
        parse_plan(input, &MemoryStore::new()).await
    }

    #[tokio::test]
    async fn parses_single_push_day() {
        let store = MemoryStore::new();
        let plan = parse_plan(
            "Plan Name: Test\nDay 1: [Mon] Push {chest, triceps}\n- Bench Press | 3x8 | 90s\n",
            &store,
        )
        .await
        .unwrap();

        assert_eq!(plan.name, "Test");
        assert_eq!(plan.days.len(), 1);
        let day = &plan.days[0];
        assert_eq!(day.name, "Push");
        assert_eq!(day.day_number, 1);
        assert!(!day.is_rest_day);
        assert_eq!(day.primary_muscle, Some(MuscleGroup::Chest));
        assert_eq!(day.secondary_muscle, Some(MuscleGroup::Triceps));
        assert_eq!(plan.weekdays.get(&Weekday::Monday), Some(&0));
        assert_eq!(day.exercises.len(), 1);
        assert_eq!(day.exercises[0].exercise_id, "bench_press");
        assert_eq!(day.exercises[0].sets, "3x8");
        assert_eq!(day.exercises[0].rest_seconds, 90);
        assert_eq!(day.estimated_minutes, 7);

        let defs = store.all().await;
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "Bench Press");
        assert_eq!(defs[0].image_id, "bench_press");
    }

    #[tokio::test]
    async fn comments_only_is_empty_input() {
        let err = parse("\n// nothing here\n   \n// still nothing\n").await.unwrap_err();
        assert_eq!(err, PlanError::EmptyInput);
        assert_eq!(parse("").await.unwrap_err(), PlanError::EmptyInput);
    }

    #[tokio::test]
    async fn two_field_exercise_is_malformed() {
        let err = parse("Plan Name: P\nDay 1: Legs\n- Squat | 3x10\n").await.unwrap_err();
        match err {
            PlanError::MalformedExercise { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_name_or_sets_is_malformed() {
        let err = parse("Day 1: Legs\n-  | 3x10 | 60\n").await.unwrap_err();
        assert!(matches!(err, PlanError::MalformedExercise { line: 2, .. }));

        let err = parse("Day 1: Legs\n- Squat |  | 60\n").await.unwrap_err();
        assert!(matches!(err, PlanError::MalformedExercise { line: 2, .. }));
    }

    #[tokio::test]
    async fn day_header_without_name_is_malformed() {
        let err = parse("Plan Name: P\n\nDay 1:   \n").await.unwrap_err();
        assert_eq!(err, PlanError::MalformedDay { line: 3 });
    }

    #[tokio::test]
    async fn leading_garbage_is_rejected() {
        let err = parse("// header\nHello there\nDay 1: Push\n").await.unwrap_err();
        assert_eq!(err, PlanError::MissingLeadingPlanName { line: 2 });
    }

    #[tokio::test]
    async fn plan_name_without_days() {
        let err = parse("Plan Name: Lonely\nsome notes\n").await.unwrap_err();
        assert_eq!(err, PlanError::NoDaysProduced);
    }

    #[tokio::test]
    async fn missing_plan_name_defaults() {
        let plan = parse("Day 1: Pull\n- Row | 3x10 | 60\n").await.unwrap();
        assert_eq!(plan.name, DEFAULT_PLAN_NAME);

        let plan = parse("Plan Name:\nDay 1: Pull\n").await.unwrap();
        assert_eq!(plan.name, DEFAULT_PLAN_NAME);
    }

    #[tokio::test]
    async fn days_follow_header_order() {
        for n in 1..=7u32 {
            let mut input = String::from("Plan Name: Order\n");
            for i in (1..=n).rev() {
                input.push_str(&format!("Day {i}: Session {i}\n- Squat | 3x5 | 120\n"));
            }
            let plan = parse(&input).await.unwrap();
            assert_eq!(plan.days.len(), n as usize);
            let numbers: Vec<u32> = plan.days.iter().map(|d| d.day_number).collect();
            let expected: Vec<u32> = (1..=n).rev().collect();
            assert_eq!(numbers, expected);
        }
    }

    #[tokio::test]
    async fn rest_day_detection() {
        let plan = parse(
            "Plan Name: R\n\
             Day 1: Rest Day\n\
             Day 2: Chest\n\
             Day 3: Active rest\n\
             Day 4: Rest time focus\n\
             Day 5: Chest and rest day\n\
             Day 6: Rest\n\
             - Plank | 3x30s | 30\n",
        )
        .await
        .unwrap();

        let flags: Vec<bool> = plan.days.iter().map(|d| d.is_rest_day).collect();
        assert_eq!(flags, vec![true, false, true, false, true, false]);

        let rest = &plan.days[0];
        assert!(rest.exercises.is_empty());
        assert_eq!(rest.estimated_minutes, 0);
    }

    #[tokio::test]
    async fn chest_day_is_never_rest() {
        for name in ["Chest", "chest & shoulders", "CHEST"] {
            let plan = parse(&format!("Day 1: {name}\n")).await.unwrap();
            assert!(!plan.days[0].is_rest_day, "{name} flagged as rest");
        }
    }

    #[tokio::test]
    async fn rest_marker_line_makes_rest_day() {
        let plan = parse("Day 1: [Sun] Recovery\n- Rest day\nDay 2: Off\n- rest\n")
            .await
            .unwrap();
        assert!(plan.days[0].is_rest_day);
        assert!(plan.days[1].is_rest_day);
        assert_eq!(plan.weekdays.get(&Weekday::Sunday), Some(&0));
    }

    #[tokio::test]
    async fn rest_marker_does_not_override_exercises() {
        let plan = parse("Day 1: Light\n- Rest day\n- Walk | 1x20min | 0\n").await.unwrap();
        assert!(!plan.days[0].is_rest_day);
        assert_eq!(plan.days[0].exercises.len(), 1);
    }

    #[tokio::test]
    async fn same_exercise_resolves_once() {
        let store = MemoryStore::new();
        let plan = parse_plan(
            "Plan Name: Dup\n\
             Day 1: A\n- Bench Press | 3x8 | 90\n- bench press | 2x10 | 60\n\
             Day 2: B\n- BENCH PRESS | 5x5 | 180\n",
            &store,
        )
        .await
        .unwrap();

        let ids: Vec<&str> = plan
            .days
            .iter()
            .flat_map(|d| d.exercises.iter().map(|e| e.exercise_id.as_str()))
            .collect();
        assert_eq!(ids, vec!["bench_press"; 3]);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn resolution_is_stable_across_parses() {
        let store = MemoryStore::new();
        let input = "Day 1: A\n- Lat Pulldown | 3x12 | 60\n";
        let first = parse_plan(input, &store).await.unwrap();
        let second = parse_plan(&input.to_uppercase(), &store).await.unwrap();
        assert_eq!(
            first.days[0].exercises[0].exercise_id,
            second.days[0].exercises[0].exercise_id
        );
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn existing_definitions_are_reused() {
        let mut custom = ExerciseDefinition::new("bp-001", "Barbell Bench");
        custom.met = 6.0;
        let store = MemoryStore::with(vec![
            custom,
            ExerciseDefinition::new("back_squat", "Squat (back)"),
        ]);

        let plan = parse_plan(
            "Day 1: Mixed\n- barbell bench | 3x5 | 120\n- Back Squat | 3x5 | 180\n",
            &store,
        )
        .await
        .unwrap();

        let ids: Vec<_> = plan.days[0].exercises.iter().map(|e| e.exercise_id.clone()).collect();
        // by name, then by derived id
        assert_eq!(ids, vec!["bp-001", "back_squat"]);
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn store_failure_aborts_parse() {
        let err = parse_plan("Day 1: Push\n- Bench | 3x8 | 90\n", &BrokenStore)
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::StoreFailure("disk on fire".into()));
    }

    #[tokio::test]
    async fn find_by_id_failure_aborts_parse() {
        let store = FailingStore {
            fail_find_by_id: true,
            ..Default::default()
        };
        let err = parse_plan("Day 1: Push\n- Bench | 3x8 | 90\n", &store)
            .await
            .unwrap_err();
        assert_eq!(err, PlanError::StoreFailure("index unreadable".into()));
        assert_eq!(store.inner.len().await, 0);
    }

    #[tokio::test]
    async fn insert_failure_keeps_earlier_definitions() {
        let store = FailingStore {
            fail_insert_of: Some("Dips"),
            ..Default::default()
        };
        let input = "Day 1: Push\n- Bench | 3x8 | 90\n- Dips | 3x12 | 60\n- Flyes | 3x15 | 45\n";
        let err = parse_plan(input, &store).await.unwrap_err();
        assert_eq!(err, PlanError::StoreFailure("read-only".into()));

        let names: Vec<String> = store.inner.all().await.into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Bench".to_string()]);
    }

    #[tokio::test]
    async fn malformed_line_keeps_earlier_definitions() {
        let store = MemoryStore::new();
        let err = parse_plan("Day 1: A\n- Bench | 3x8 | 90\n- Bad | 3\n", &store)
            .await
            .unwrap_err();
        assert!(matches!(err, PlanError::MalformedExercise { line: 3, .. }));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn leading_malformed_exercise_reports_missing_plan_name() {
        let err = parse("- Squat | 3x10\nDay 1: Legs\n").await.unwrap_err();
        assert_eq!(err, PlanError::MissingLeadingPlanName { line: 1 });

        let err = parse("// intro\nSquat | 3 | x | y\n").await.unwrap_err();
        assert_eq!(err, PlanError::MissingLeadingPlanName { line: 2 });
    }

    #[tokio::test]
    async fn oversized_day_number_saturates() {
        let plan = parse("Day 99999999999: Legs\n- Squat | 5x5 | 180\n").await.unwrap();
        assert_eq!(plan.days[0].day_number, u32::MAX);
        assert_eq!(plan.days[0].name, "Legs");
    }

    #[tokio::test]
    async fn tolerant_exercise_lines_and_orphans() {
        let plan = parse(
            "Plan Name: Loose\n\
             - Ignored | 1 | 1\n\
             Day 1: Arms\n\
             Curl | 3x12 | 45s\n\
             warm up for ten minutes\n\
             a | b\n\
             ---\n\
             - Skullcrusher | 3x10 | 1 min\n",
        )
        .await
        .unwrap();

        let day = &plan.days[0];
        let sets: Vec<&str> = day.exercises.iter().map(|e| e.sets.as_str()).collect();
        assert_eq!(sets, vec!["3x12", "3x10"]);
        assert_eq!(day.exercises[0].rest_seconds, 45);
        assert_eq!(day.exercises[1].rest_seconds, 1);
    }

    #[tokio::test]
    async fn dashless_line_with_bad_fields_is_still_rejected() {
        let err = parse("Day 1: Arms\n | 3x12 | 45s\n").await.unwrap_err();
        assert!(matches!(err, PlanError::MalformedExercise { line: 2, .. }));
    }

    #[tokio::test]
    async fn unparseable_rest_is_zero() {
        let plan = parse("Day 1: Core\n- Plank | 3 rounds | as needed\n- Crunch | 3x20 |\n")
            .await
            .unwrap();
        assert!(plan.days[0].exercises.iter().all(|e| e.rest_seconds == 0));
    }

    #[tokio::test]
    async fn weekday_and_muscle_annotations() {
        let plan = parse(
            "Plan Name: Week\n\
             Day 1: [Monday] Upper {lats, pecs}\n\
             Day 2: [tue] Leg Day\n\
             Day 3: [Fri] [Sat] Pull and back work\n\
             Day 4: [Sun]\n\
             Day 5: [Mon] Arms {elbows}\n",
        )
        .await
        .unwrap();

        assert_eq!(plan.days[0].name, "Upper");
        assert_eq!(plan.days[0].primary_muscle, Some(MuscleGroup::Back));
        assert_eq!(plan.days[0].secondary_muscle, Some(MuscleGroup::Chest));

        assert_eq!(plan.days[1].name, "Leg Day");
        assert_eq!(plan.days[1].primary_muscle, Some(MuscleGroup::Legs));
        assert_eq!(plan.days[1].secondary_muscle, None);

        assert_eq!(plan.days[2].primary_muscle, Some(MuscleGroup::Back));
        assert_eq!(plan.days[3].name, "Day 4");

        // Unknown group falls back to keyword detection on the name.
        assert_eq!(plan.days[4].primary_muscle, Some(MuscleGroup::Arms));

        assert_eq!(plan.weekdays.get(&Weekday::Monday), Some(&4));
        assert_eq!(plan.weekdays.get(&Weekday::Tuesday), Some(&1));
        assert_eq!(plan.weekdays.get(&Weekday::Friday), Some(&2));
        assert_eq!(plan.weekdays.get(&Weekday::Saturday), Some(&2));
        assert_eq!(plan.weekdays.get(&Weekday::Sunday), Some(&3));
        assert!(plan.weekdays.values().all(|i| *i < plan.days.len()));
    }

    #[test]
    fn classify_lines() {
        assert_eq!(classify("PLAN NAME: X", 1).unwrap(), Line::PlanName("X"));
        assert_eq!(
            classify("day 12 : Legs", 1).unwrap(),
            Line::DayHeader { number: 12, text: "Legs" }
        );
        assert_eq!(classify("- Rest Day", 1).unwrap(), Line::RestMarker);
        assert_eq!(classify("Day one: Legs", 1).unwrap(), Line::Orphan);
        assert!(classify("- Just a note", 4).is_err());
    }
}
