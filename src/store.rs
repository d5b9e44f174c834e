//! Exercise definition stores
//!
//! The plan parser only needs three capabilities from wherever exercise
//! definitions live: look one up by name, look one up by id, insert a new one.
//! [`ExerciseStore`] captures exactly that; [`SqliteExerciseStore`] is the one
//! the CLI uses and [`MemoryStore`] backs tests and dry runs.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::ExerciseDefinition;

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Case-insensitive lookup by exact name.
    async fn find_by_name(&self, name: &str) -> Result<Option<ExerciseDefinition>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<ExerciseDefinition>>;

    async fn insert(&self, def: &ExerciseDefinition) -> Result<()>;
}

/// In-process store, seeded or empty.
#[derive(Debug, Default)]
pub struct MemoryStore {
    defs: Mutex<Vec<ExerciseDefinition>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(defs: Vec<ExerciseDefinition>) -> Self {
        Self {
            defs: Mutex::new(defs),
        }
    }

    pub async fn all(&self) -> Vec<ExerciseDefinition> {
        self.defs.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.defs.lock().await.len()
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<ExerciseDefinition>> {
        let name = name.to_lowercase();
        let defs = self.defs.lock().await;
        Ok(defs.iter().find(|d| d.name.to_lowercase() == name).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ExerciseDefinition>> {
        let defs = self.defs.lock().await;
        Ok(defs.iter().find(|d| d.id == id).cloned())
    }

    async fn insert(&self, def: &ExerciseDefinition) -> Result<()> {
        let mut defs = self.defs.lock().await;
        if defs.iter().any(|d| d.id == def.id) {
            return Err(StoreError::Backend(format!(
                "exercise `{}` already exists",
                def.id
            )));
        }
        defs.push(def.clone());
        Ok(())
    }
}

/// Exercise definitions kept in the `exercises` table.
#[derive(Clone)]
pub struct SqliteExerciseStore {
    pool: SqlitePool,
}

fn row_to_def(r: &SqliteRow) -> ExerciseDefinition {
    ExerciseDefinition {
        id: r.get("id"),
        name: r.get("name"),
        description: r.get("description"),
        image_id: r.get("image_id"),
        met: r.get("met"),
    }
}

impl SqliteExerciseStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All definitions ordered by name.
    pub async fn list(&self) -> Result<Vec<ExerciseDefinition>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, image_id, met
            FROM   exercises
            ORDER  BY name COLLATE NOCASE
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_def).collect())
    }

    /// Remove a definition by id or name. Returns `false` when nothing matched.
    /// Definitions still referenced by a stored plan cannot be deleted.
    pub async fn delete(&self, id_or_name: &str) -> Result<bool> {
        let res = sqlx::query("DELETE FROM exercises WHERE id = ?1 OR lower(name) = lower(?1)")
            .bind(id_or_name)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[async_trait]
impl ExerciseStore for SqliteExerciseStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<ExerciseDefinition>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, image_id, met
            FROM   exercises
            WHERE  lower(name) = lower(?)
            LIMIT  1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_def))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ExerciseDefinition>> {
        let row = sqlx::query(
            "SELECT id, name, description, image_id, met FROM exercises WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_def))
    }

    async fn insert(&self, def: &ExerciseDefinition) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO exercises (id, name, description, image_id, met, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&def.id)
        .bind(&def.name)
        .bind(def.description.as_deref())
        .bind(&def.image_id)
        .bind(def.met)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_db;

    #[tokio::test]
    async fn memory_store_lookups() {
        let store = MemoryStore::with(vec![ExerciseDefinition::new("bench_press", "Bench Press")]);

        assert!(store.find_by_name("BENCH press").await.unwrap().is_some());
        assert!(store.find_by_id("bench_press").await.unwrap().is_some());
        assert!(store.find_by_id("Bench Press").await.unwrap().is_none());

        store.insert(&ExerciseDefinition::new("squat", "Squat")).await.unwrap();
        assert_eq!(store.len().await, 2);
        assert!(store.insert(&ExerciseDefinition::new("squat", "Squat")).await.is_err());
    }

    #[tokio::test]
    async fn sqlite_store_round_trip() {
        let (pool, _dir) = test_db().await;
        let store = SqliteExerciseStore::new(pool);

        let mut def = ExerciseDefinition::new("overhead_press", "Overhead Press");
        def.description = Some("standing barbell press".into());
        def.met = 5.0;
        store.insert(&def).await.unwrap();

        let by_name = store.find_by_name("overhead PRESS").await.unwrap().unwrap();
        assert_eq!(by_name, def);

        let by_id = store.find_by_id("overhead_press").await.unwrap().unwrap();
        assert_eq!(by_id.name, "Overhead Press");

        assert!(store.find_by_name("Press").await.unwrap().is_none());
        assert!(store.find_by_id("nope").await.unwrap().is_none());

        // Primary key violation surfaces as an error.
        assert!(store.insert(&def).await.is_err());
    }

    #[tokio::test]
    async fn sqlite_store_list_and_delete() {
        let (pool, _dir) = test_db().await;
        let store = SqliteExerciseStore::new(pool);

        for (id, name) in [("squat", "Squat"), ("deadlift", "Deadlift"), ("bench", "bench")] {
            store.insert(&ExerciseDefinition::new(id, name)).await.unwrap();
        }

        let names: Vec<_> = store.list().await.unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["bench", "Deadlift", "Squat"]);

        assert!(store.delete("DEADLIFT").await.unwrap());
        assert!(store.delete("squat").await.unwrap());
        assert!(!store.delete("squat").await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
