use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sqlx::SqlitePool;

use liftplan::{
    ExerciseDefinition, ExerciseStore, SqliteExerciseStore, StoreError,
    types::{OutputFmt, emit},
    utils::{exercise_id_from_name, plain_len},
};

use crate::cli::ExerciseCmd;

#[derive(Serialize)]
struct ExJson {
    idx: usize,
    id: String,
    name: String,
    description: String,
    met: f64,
}

fn pretty_print(exs: &[ExJson]) {
    if exs.is_empty() {
        println!("{}", "  (no exercises found)".dimmed());
        return;
    }

    println!("{}", "Exercises:".cyan().bold());
    let idx_w = exs.len().to_string().len();
    let left: Vec<String> = exs
        .iter()
        .map(|e| {
            let idx = format!("{:>width$}", e.idx, width = idx_w).yellow();
            format!(" {} • {}", idx, e.name.bold())
        })
        .collect();
    let pad_plain = left.iter().map(|s| plain_len(s)).max().unwrap_or(0);

    for (l, e) in left.into_iter().zip(exs) {
        let pad = pad_plain + (l.len() - plain_len(&l));
        let desc = if e.description.is_empty() {
            String::new()
        } else {
            format!(" – {}", e.description)
        };
        println!(
            "{:<pad$} {} {}{}",
            l,
            "|".blue(),
            format!("{} · MET {:.1}", e.id, e.met).dimmed(),
            desc.dimmed(),
            pad = pad
        );
    }
}

pub async fn handle(cmd: ExerciseCmd, pool: &SqlitePool, fmt: OutputFmt) -> Result<()> {
    let store = SqliteExerciseStore::new(pool.clone());

    match cmd {
        ExerciseCmd::Add { name, desc, met } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                println!("{} exercise name must not be empty", "error:".red().bold());
                return Ok(());
            }
            if store.find_by_name(&name).await?.is_some() {
                println!(
                    "{} Exercise \"{}\" already exists — use `ex list` to view all exercises",
                    "warning:".yellow().bold(),
                    name
                );
                return Ok(());
            }

            let mut id = exercise_id_from_name(&name);
            if id.is_empty() || store.find_by_id(&id).await?.is_some() {
                id = format!("exercise_{}", uuid::Uuid::new_v4().simple());
            }
            let mut def = ExerciseDefinition::new(id, name);
            def.description = desc.filter(|d| !d.trim().is_empty());
            if let Some(met) = met {
                def.met = met;
            }

            match store.insert(&def).await {
                Ok(()) => println!(
                    "{} Exercise \"{}\" added as `{}`",
                    "info:".blue().bold(),
                    def.name,
                    def.id
                ),
                Err(e) => {
                    println!("{} {}", "error:".red().bold(), e.to_string().red());
                    return Err(e.into());
                }
            }
        }

        ExerciseCmd::List => {
            let exs: Vec<ExJson> = store
                .list()
                .await?
                .into_iter()
                .enumerate()
                .map(|(i, d)| ExJson {
                    idx: i + 1,
                    id: d.id,
                    name: d.name,
                    description: d.description.unwrap_or_default(),
                    met: d.met,
                })
                .collect();
            emit(fmt, &exs, || pretty_print(&exs));
        }

        ExerciseCmd::Delete { exercise } => match store.delete(&exercise).await {
            Ok(true) => println!("{} deleted `{}`", "ok:".green().bold(), exercise),
            Ok(false) => println!(
                "{} no exercise matching `{}`",
                "warning:".yellow().bold(),
                exercise
            ),
            Err(StoreError::Sqlx(sqlx::Error::Database(db_err)))
                if db_err.is_foreign_key_violation() =>
            {
                println!(
                    "{} `{}` is used by a stored plan – delete the plan first",
                    "error:".red().bold(),
                    exercise
                )
            }
            Err(e) => return Err(e.into()),
        },
    }

    Ok(())
}
