//! Persisted workout plans
//!
//! A plan is spread over four tables: `plans`, `plan_days`, `plan_exercises`
//! and `plan_weekdays`. Plans are addressed either by their exact name or by
//! the 1-based index shown in `plan list` (plans ordered by name).

use std::collections::BTreeMap;

use chrono::Utc;
use serde::Serialize;
use sqlx::{Row, SqlitePool};
use tracing::info;
use uuid::Uuid;

use crate::error::StorageError;
use crate::models::{ExerciseInstance, WorkoutDay, WorkoutPlan};
use crate::types::{MuscleGroup, Weekday};

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Clone, Serialize)]
pub struct PlanSummary {
    pub idx: i64,
    pub id: String,
    pub name: String,
    pub days: i64,
    pub created_at: String,
}

pub struct PlanRepository<'a> {
    pool: &'a SqlitePool,
}

fn corrupt(what: impl Into<String>) -> StorageError {
    StorageError::Corrupt(what.into())
}

fn muscle_column(value: Option<String>) -> Result<Option<MuscleGroup>> {
    value
        .map(|s| MuscleGroup::parse(&s).ok_or_else(|| corrupt(format!("muscle group `{s}`"))))
        .transpose()
}

impl<'a> PlanRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Store `plan` in a single transaction and return its id.
    pub async fn save(&self, plan: &WorkoutPlan) -> Result<String> {
        let mut tx = self.pool.begin().await?;

        let plan_id = Uuid::new_v4().to_string();
        let res = sqlx::query("INSERT INTO plans (id, name, created_at) VALUES (?1, ?2, ?3)")
            .bind(&plan_id)
            .bind(&plan.name)
            .bind(Utc::now().to_rfc3339())
            .execute(&mut *tx)
            .await;

        if let Err(sqlx::Error::Database(db_err)) = &res {
            if db_err.is_unique_violation() {
                tx.rollback().await?;
                return Err(StorageError::Duplicate(plan.name.clone()));
            }
        }
        res?;

        for (position, day) in plan.days.iter().enumerate() {
            sqlx::query(
                r#"INSERT INTO plan_days
                     (id, plan_id, position, day_number, name, is_rest_day,
                      primary_muscle, secondary_muscle, estimated_minutes)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"#,
            )
            .bind(&day.id)
            .bind(&plan_id)
            .bind(position as i64)
            .bind(day.day_number as i64)
            .bind(&day.name)
            .bind(day.is_rest_day)
            .bind(day.primary_muscle.map(MuscleGroup::as_str))
            .bind(day.secondary_muscle.map(MuscleGroup::as_str))
            .bind(day.estimated_minutes as i64)
            .execute(&mut *tx)
            .await?;

            for (order_idx, ex) in day.exercises.iter().enumerate() {
                sqlx::query(
                    r#"INSERT INTO plan_exercises
                         (id, day_id, position, exercise_id, sets, rest_seconds)
                       VALUES (?1, ?2, ?3, ?4, ?5, ?6)"#,
                )
                .bind(Uuid::new_v4().to_string())
                .bind(&day.id)
                .bind(order_idx as i64)
                .bind(&ex.exercise_id)
                .bind(&ex.sets)
                .bind(ex.rest_seconds as i64)
                .execute(&mut *tx)
                .await?;
            }
        }

        for (weekday, day_index) in &plan.weekdays {
            sqlx::query(
                "INSERT INTO plan_weekdays (plan_id, weekday, day_index) VALUES (?1, ?2, ?3)",
            )
            .bind(&plan_id)
            .bind(weekday.short())
            .bind(*day_index as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(plan = %plan.name, id = %plan_id, days = plan.days.len(), "plan saved");
        Ok(plan_id)
    }

    pub async fn list(&self) -> Result<Vec<PlanSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT ROW_NUMBER() OVER (ORDER BY p.name) AS idx,
                   p.id, p.name, p.created_at,
                   (SELECT COUNT(*) FROM plan_days d WHERE d.plan_id = p.id) AS days
            FROM   plans p
            ORDER  BY idx
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| PlanSummary {
                idx: r.get("idx"),
                id: r.get("id"),
                name: r.get("name"),
                days: r.get("days"),
                created_at: r.get("created_at"),
            })
            .collect())
    }

    /// Plan id for an exact name or, failing that, a `plan list` index.
    async fn resolve(&self, selector: &str) -> Result<(String, String)> {
        let by_name = sqlx::query("SELECT id, name FROM plans WHERE name = ?")
            .bind(selector)
            .fetch_optional(self.pool)
            .await?;

        let row = match (by_name, selector.parse::<i64>()) {
            (Some(row), _) => Some(row),
            (None, Ok(idx)) => {
                sqlx::query(
                    r#"
                    SELECT id, name
                    FROM (
                      SELECT id, name, ROW_NUMBER() OVER (ORDER BY name) AS rn
                      FROM plans
                    ) t
                    WHERE t.rn = ?
                    "#,
                )
                .bind(idx)
                .fetch_optional(self.pool)
                .await?
            }
            (None, Err(_)) => None,
        };

        row.map(|r| (r.get("id"), r.get("name")))
            .ok_or_else(|| StorageError::NotFound(selector.to_string()))
    }

    pub async fn find(&self, selector: &str) -> Result<WorkoutPlan> {
        let (plan_id, name) = self.resolve(selector).await?;

        let day_rows = sqlx::query(
            r#"
            SELECT id, day_number, name, is_rest_day,
                   primary_muscle, secondary_muscle, estimated_minutes
            FROM   plan_days
            WHERE  plan_id = ?
            ORDER  BY position
            "#,
        )
        .bind(&plan_id)
        .fetch_all(self.pool)
        .await?;

        let mut days = Vec::with_capacity(day_rows.len());
        for r in &day_rows {
            let day_id: String = r.get("id");
            let ex_rows = sqlx::query(
                r#"
                SELECT exercise_id, sets, rest_seconds
                FROM   plan_exercises
                WHERE  day_id = ?
                ORDER  BY position
                "#,
            )
            .bind(&day_id)
            .fetch_all(self.pool)
            .await?;

            let exercises = ex_rows
                .iter()
                .map(|e| {
                    Ok(ExerciseInstance {
                        exercise_id: e.get("exercise_id"),
                        sets: e.get("sets"),
                        rest_seconds: u32::try_from(e.get::<i64, _>("rest_seconds"))
                            .map_err(|_| corrupt("rest seconds out of range"))?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            days.push(WorkoutDay {
                id: day_id,
                name: r.get("name"),
                day_number: u32::try_from(r.get::<i64, _>("day_number"))
                    .map_err(|_| corrupt("day number out of range"))?,
                exercises,
                is_rest_day: r.get("is_rest_day"),
                primary_muscle: muscle_column(r.get("primary_muscle"))?,
                secondary_muscle: muscle_column(r.get("secondary_muscle"))?,
                estimated_minutes: u32::try_from(r.get::<i64, _>("estimated_minutes"))
                    .map_err(|_| corrupt("duration out of range"))?,
            });
        }

        let wd_rows = sqlx::query("SELECT weekday, day_index FROM plan_weekdays WHERE plan_id = ?")
            .bind(&plan_id)
            .fetch_all(self.pool)
            .await?;

        let mut weekdays = BTreeMap::new();
        for r in &wd_rows {
            let label: String = r.get("weekday");
            let weekday =
                Weekday::parse(&label).ok_or_else(|| corrupt(format!("weekday `{label}`")))?;
            let index = usize::try_from(r.get::<i64, _>("day_index"))
                .ok()
                .filter(|i| *i < days.len())
                .ok_or_else(|| corrupt(format!("day index for {weekday}")))?;
            weekdays.insert(weekday, index);
        }

        Ok(WorkoutPlan {
            name,
            days,
            weekdays,
        })
    }

    /// Delete a plan; returns its name.
    pub async fn delete(&self, selector: &str) -> Result<String> {
        let (plan_id, name) = self.resolve(selector).await?;
        sqlx::query("DELETE FROM plans WHERE id = ?")
            .bind(&plan_id)
            .execute(self.pool)
            .await?;
        info!(plan = %name, "plan deleted");
        Ok(name)
    }
}
