use std::str::FromStr;

use sqlx::{
    Executor, SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

pub type DB = SqlitePool;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS exercises (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    image_id    TEXT NOT NULL,
    met         REAL NOT NULL DEFAULT 3.5,
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_exercises_name ON exercises(lower(name));

CREATE TABLE IF NOT EXISTS plans (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS plan_days (
    id                TEXT PRIMARY KEY,
    plan_id           TEXT NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
    position          INTEGER NOT NULL,
    day_number        INTEGER NOT NULL,
    name              TEXT NOT NULL,
    is_rest_day       INTEGER NOT NULL,
    primary_muscle    TEXT,
    secondary_muscle  TEXT,
    estimated_minutes INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plan_exercises (
    id           TEXT PRIMARY KEY,
    day_id       TEXT NOT NULL REFERENCES plan_days(id) ON DELETE CASCADE,
    position     INTEGER NOT NULL,
    exercise_id  TEXT NOT NULL REFERENCES exercises(id),
    sets         TEXT NOT NULL,
    rest_seconds INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS plan_weekdays (
    plan_id   TEXT NOT NULL REFERENCES plans(id) ON DELETE CASCADE,
    weekday   TEXT NOT NULL,
    day_index INTEGER NOT NULL,
    PRIMARY KEY (plan_id, weekday)
);
"#;

/// Open (creating if needed) the database at `path` and bring its schema up to date.
pub async fn open(path: &str) -> Result<DB, sqlx::Error> {
    let opts = SqliteConnectOptions::from_str(path)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await?;

    migrate(&pool).await?;
    Ok(pool)
}

pub async fn migrate(pool: &DB) -> Result<(), sqlx::Error> {
    pool.execute(SCHEMA).await?;
    tracing::debug!("database schema ready");
    Ok(())
}

/// Fresh database in a temp dir, for tests.
#[cfg(test)]
pub(crate) async fn test_db() -> (DB, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("test.db");
    let pool = open(path.to_str().unwrap()).await.unwrap();
    (pool, dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let (pool, dir) = test_db().await;
        assert!(dir.path().join("test.db").exists());

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap();
        for t in ["exercises", "plan_days", "plan_exercises", "plan_weekdays", "plans"] {
            assert!(tables.iter().any(|n| n == t), "missing table {t}");
        }

        // Running it again is harmless.
        migrate(&pool).await.unwrap();
    }
}
