use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use sqlx::SqlitePool;

use liftplan::{
    MemoryStore, SqliteExerciseStore, StorageError, WorkoutPlan,
    json::json_to_plan_text,
    parse_plan,
    render::render_plan,
    storage::{PlanRepository, PlanSummary},
    types::{OutputFmt, emit},
    utils::plain_len,
};

use crate::cli::PlanCmd;

/// JSON is picked by extension, or by a leading `{` for anything else.
fn is_json(file: &str, content: &str) -> bool {
    match Path::new(file).extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => true,
        Some(ext) if ext.eq_ignore_ascii_case("txt") => false,
        _ => content.trim_start().starts_with('{'),
    }
}

/// Read a plan file and return it in the text grammar.
async fn read_plan_text(file: &str) -> Result<String> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("reading `{file}`"))?;
    if is_json(file, &content) {
        Ok(json_to_plan_text(&content).with_context(|| format!("converting `{file}`"))?)
    } else {
        Ok(content)
    }
}

async fn exercise_names(pool: &SqlitePool) -> Result<HashMap<String, String>> {
    let defs = SqliteExerciseStore::new(pool.clone()).list().await?;
    Ok(defs.into_iter().map(|d| (d.id, d.name)).collect())
}

fn print_plan(plan: &WorkoutPlan, names: &HashMap<String, String>) {
    println!("{}", plan.name.cyan().bold());

    for (idx, day) in plan.days.iter().enumerate() {
        let weekdays = plan
            .weekdays_of(idx)
            .iter()
            .map(|d| d.short())
            .collect::<Vec<_>>()
            .join(", ");
        let when = if weekdays.is_empty() {
            String::new()
        } else {
            format!(" [{weekdays}]").yellow().to_string()
        };
        let muscles = [day.primary_muscle, day.secondary_muscle]
            .into_iter()
            .flatten()
            .map(|m| m.display_name())
            .collect::<Vec<_>>()
            .join(" / ");

        println!();
        print!(" {} • {}{}", day.day_number.to_string().yellow(), day.name.bold(), when);
        if !muscles.is_empty() {
            print!(" {}", format!("({muscles})").dimmed());
        }
        println!();

        if day.is_rest_day {
            println!("   {}", "rest day".dimmed());
            continue;
        }

        let rows: Vec<(String, String)> = day
            .exercises
            .iter()
            .enumerate()
            .map(|(i, ex)| {
                let name = names.get(&ex.exercise_id).unwrap_or(&ex.exercise_id);
                let connector = if i + 1 == day.exercises.len() { "└─" } else { "├─" };
                (
                    format!("   {} {}", connector, name),
                    format!("{}  rest {}s", ex.sets, ex.rest_seconds),
                )
            })
            .collect();
        let pad = rows.iter().map(|(l, _)| plain_len(l)).max().unwrap_or(0);
        for (l, r) in rows {
            println!("{:<pad$} {} {}", l, "|".blue(), r.dimmed(), pad = pad);
        }
        println!("   {}", format!("~{} min", day.estimated_minutes).dimmed());
    }
}

fn print_list(progs: &[PlanSummary]) {
    if progs.is_empty() {
        println!("{}", "  (no plans found)".dimmed());
        return;
    }

    println!("{}", "Plans:".cyan().bold());
    let idx_w = progs
        .iter()
        .map(|p| p.idx.to_string().len())
        .max()
        .unwrap_or(1);
    for p in progs {
        let idx = format!("{:>width$}", p.idx, width = idx_w).yellow();
        let days = format!("{} day{}", p.days, if p.days == 1 { "" } else { "s" });
        let added = p.created_at.get(..10).unwrap_or(&p.created_at);
        println!(
            " {} • {} {} {}",
            idx,
            p.name.bold(),
            format!("– {days}").dimmed(),
            format!("(added {added})").dimmed()
        );
    }
}

pub async fn handle(cmd: PlanCmd, pool: &SqlitePool, fmt: OutputFmt) -> Result<()> {
    let repo = PlanRepository::new(pool);

    match cmd {
        PlanCmd::Import { files } => {
            if files.is_empty() {
                println!("{} no plan file provided", "warning:".yellow().bold());
            }
            let store = SqliteExerciseStore::new(pool.clone());
            for f in files {
                let text = match read_plan_text(&f).await {
                    Ok(t) => t,
                    Err(e) => {
                        println!("{} {:#}", "error:".red().bold(), e);
                        continue;
                    }
                };
                let plan = match parse_plan(&text, &store).await {
                    Ok(p) => p,
                    Err(e) => {
                        println!("{} `{}`: {}", "error:".red().bold(), f, e);
                        continue;
                    }
                };
                match repo.save(&plan).await {
                    Ok(_) => println!(
                        "{} `{}` ({} days, {} exercises)",
                        "ok:".green().bold(),
                        plan.name,
                        plan.days.len(),
                        plan.exercise_count()
                    ),
                    Err(StorageError::Duplicate(name)) => println!(
                        "{} plan `{}` already exists – skipping",
                        "warning:".yellow().bold(),
                        name
                    ),
                    Err(e) => return Err(e).with_context(|| format!("saving `{f}`")),
                }
            }
        }

        PlanCmd::Check { file } => {
            let text = read_plan_text(&file).await?;
            // Parse against a copy of the known exercises so nothing is written.
            let known = SqliteExerciseStore::new(pool.clone()).list().await?;
            let store = MemoryStore::with(known);
            let plan = parse_plan(&text, &store)
                .await
                .with_context(|| format!("parsing `{file}`"))?;
            let names: HashMap<String, String> =
                store.all().await.into_iter().map(|d| (d.id, d.name)).collect();
            emit(fmt, &plan, || print_plan(&plan, &names));
        }

        PlanCmd::Convert { file } => {
            let content = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("reading `{file}`"))?;
            let text = json_to_plan_text(&content).with_context(|| format!("converting `{file}`"))?;
            print!("{text}");
        }

        PlanCmd::List => {
            let progs = repo.list().await?;
            emit(fmt, &progs, || print_list(&progs));
        }

        PlanCmd::Show { plan } => match repo.find(&plan).await {
            Ok(p) => {
                let names = exercise_names(pool).await?;
                emit(fmt, &p, || print_plan(&p, &names));
            }
            Err(StorageError::NotFound(sel)) => {
                println!("{} no plan matching `{}`", "error:".red().bold(), sel)
            }
            Err(e) => return Err(e.into()),
        },

        PlanCmd::Export { plan } => {
            let p = repo.find(&plan).await?;
            let names = exercise_names(pool).await?;
            print!("{}", render_plan(&p, &names));
        }

        PlanCmd::Delete { plan } => match repo.delete(&plan).await {
            Ok(name) => println!("{} deleted `{}`", "ok:".green().bold(), name),
            Err(StorageError::NotFound(sel)) => {
                println!("{} no plan matching `{}`", "error:".red().bold(), sel)
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_detection() {
        assert!(is_json("plan.json", "Plan Name: x"));
        assert!(is_json("plan.JSON", ""));
        assert!(!is_json("plan.txt", "{ }"));
        assert!(is_json("plan", "  {\"days\": []}"));
        assert!(!is_json("plan.plan", "Plan Name: x"));
    }
}
