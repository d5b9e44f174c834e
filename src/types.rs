use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Three-letter form used inside `[..]` day annotations.
    pub fn short(self) -> &'static str {
        match self {
            Self::Monday => "Mon",
            Self::Tuesday => "Tue",
            Self::Wednesday => "Wed",
            Self::Thursday => "Thu",
            Self::Friday => "Fri",
            Self::Saturday => "Sat",
            Self::Sunday => "Sun",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Accepts full names, 3-letter forms and the usual abbreviations,
    /// ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        let day = match s.as_str() {
            "mon" | "monday" => Self::Monday,
            "tue" | "tues" | "tuesday" => Self::Tuesday,
            "wed" | "weds" | "wednesday" => Self::Wednesday,
            "thu" | "thur" | "thurs" | "thursday" => Self::Thursday,
            "fri" | "friday" => Self::Friday,
            "sat" | "saturday" => Self::Saturday,
            "sun" | "sunday" => Self::Sunday,
            _ => return None,
        };
        Some(day)
    }
}

impl Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown weekday `{s}`"))
    }
}

impl From<Weekday> for chrono::Weekday {
    fn from(d: Weekday) -> Self {
        match d {
            Weekday::Monday => chrono::Weekday::Mon,
            Weekday::Tuesday => chrono::Weekday::Tue,
            Weekday::Wednesday => chrono::Weekday::Wed,
            Weekday::Thursday => chrono::Weekday::Thu,
            Weekday::Friday => chrono::Weekday::Fri,
            Weekday::Saturday => chrono::Weekday::Sat,
            Weekday::Sunday => chrono::Weekday::Sun,
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(d: chrono::Weekday) -> Self {
        match d {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Biceps,
    Triceps,
    Arms,
    Legs,
    Glutes,
    Core,
    FullBody,
    Cardio,
}

/// Keywords used to guess a day's muscle groups from its name.
/// Order matters: detection reports matches in this order and stops at two.
pub static MUSCLE_KEYWORDS: &[(MuscleGroup, &[&str])] = &[
    (MuscleGroup::Chest, &["chest", "pec", "push"]),
    (MuscleGroup::Back, &["back", "lat", "pull", "row"]),
    (MuscleGroup::Shoulders, &["shoulder", "delt", "overhead"]),
    (MuscleGroup::Biceps, &["bicep", "curl"]),
    (MuscleGroup::Triceps, &["tricep"]),
    (MuscleGroup::Arms, &["arm"]),
    (MuscleGroup::Legs, &["leg", "lower body", "squat", "quad", "hamstring"]),
    (MuscleGroup::Glutes, &["glute", "hip"]),
    (MuscleGroup::Core, &["core", "abs", "abdominal"]),
    (MuscleGroup::FullBody, &["full body", "full-body", "total body"]),
    (MuscleGroup::Cardio, &["cardio", "conditioning", "hiit"]),
];

/// Names accepted inside `{..}` annotations and JSON `targetMuscles`.
static MUSCLE_ALIASES: &[(&str, MuscleGroup)] = &[
    ("chest", MuscleGroup::Chest),
    ("pec", MuscleGroup::Chest),
    ("pecs", MuscleGroup::Chest),
    ("pectorals", MuscleGroup::Chest),
    ("back", MuscleGroup::Back),
    ("lat", MuscleGroup::Back),
    ("lats", MuscleGroup::Back),
    ("traps", MuscleGroup::Back),
    ("upper back", MuscleGroup::Back),
    ("lower back", MuscleGroup::Back),
    ("shoulders", MuscleGroup::Shoulders),
    ("shoulder", MuscleGroup::Shoulders),
    ("delts", MuscleGroup::Shoulders),
    ("deltoids", MuscleGroup::Shoulders),
    ("biceps", MuscleGroup::Biceps),
    ("bicep", MuscleGroup::Biceps),
    ("bis", MuscleGroup::Biceps),
    ("triceps", MuscleGroup::Triceps),
    ("tricep", MuscleGroup::Triceps),
    ("tris", MuscleGroup::Triceps),
    ("arms", MuscleGroup::Arms),
    ("arm", MuscleGroup::Arms),
    ("forearms", MuscleGroup::Arms),
    ("legs", MuscleGroup::Legs),
    ("leg", MuscleGroup::Legs),
    ("quads", MuscleGroup::Legs),
    ("quadriceps", MuscleGroup::Legs),
    ("hamstrings", MuscleGroup::Legs),
    ("calves", MuscleGroup::Legs),
    ("lower body", MuscleGroup::Legs),
    ("glutes", MuscleGroup::Glutes),
    ("glute", MuscleGroup::Glutes),
    ("hips", MuscleGroup::Glutes),
    ("core", MuscleGroup::Core),
    ("abs", MuscleGroup::Core),
    ("abdominals", MuscleGroup::Core),
    ("obliques", MuscleGroup::Core),
    ("full body", MuscleGroup::FullBody),
    ("full-body", MuscleGroup::FullBody),
    ("fullbody", MuscleGroup::FullBody),
    ("full_body", MuscleGroup::FullBody),
    ("total body", MuscleGroup::FullBody),
    ("cardio", MuscleGroup::Cardio),
    ("conditioning", MuscleGroup::Cardio),
    ("hiit", MuscleGroup::Cardio),
];

impl MuscleGroup {
    /// Canonical lowercase name, also the form stored in the database.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Shoulders => "shoulders",
            Self::Biceps => "biceps",
            Self::Triceps => "triceps",
            Self::Arms => "arms",
            Self::Legs => "legs",
            Self::Glutes => "glutes",
            Self::Core => "core",
            Self::FullBody => "full body",
            Self::Cardio => "cardio",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Chest => "Chest",
            Self::Back => "Back",
            Self::Shoulders => "Shoulders",
            Self::Biceps => "Biceps",
            Self::Triceps => "Triceps",
            Self::Arms => "Arms",
            Self::Legs => "Legs",
            Self::Glutes => "Glutes",
            Self::Core => "Core",
            Self::FullBody => "Full Body",
            Self::Cardio => "Cardio",
        }
    }

    /// Resolve a muscle name or synonym, e.g. `lats` → `Back`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        MUSCLE_ALIASES
            .iter()
            .find(|(alias, _)| *alias == s)
            .map(|(_, group)| *group)
    }

    /// Scan a day name for keywords and return at most two groups,
    /// in keyword-table order.
    pub fn detect(day_name: &str) -> Vec<Self> {
        let name = day_name.to_lowercase();
        MUSCLE_KEYWORDS
            .iter()
            .filter(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(group, _)| *group)
            .take(2)
            .collect()
    }
}

impl Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for MuscleGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("unknown muscle group `{s}`"))
    }
}

/// Return the closest muscle alias for `input`
/// if similarity ≥ 0.80 *and* clearly better than the runner-up.
/// Otherwise return `None` (no suggestion shown).
pub fn best_muscle_suggestion(input: &str) -> Option<&'static str> {
    let inp = input.trim().to_ascii_lowercase();
    if inp.is_empty() {
        return None;
    }

    let mut scores: Vec<(&'static str, f64)> = MUSCLE_ALIASES
        .iter()
        .map(|(alias, _)| (*alias, jaro_winkler(&inp, alias)))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (best, best_score) = scores[0];
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFmt {
    Pretty,
    Json,
}

impl OutputFmt {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Pretty }
    }
}

/// Print `data` as JSON or hand over to the pretty printer.
pub fn emit<T: Serialize, F: FnOnce()>(fmt: OutputFmt, data: &T, pretty: F) {
    match fmt {
        OutputFmt::Json => match serde_json::to_string_pretty(data) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("error: cannot serialize output: {e}"),
        },
        OutputFmt::Pretty => pretty(),
    }
}
