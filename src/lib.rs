//! liftplan: workout plans from plain text or JSON
//!
//! The heart of the crate is [`parser::parse_plan`], which turns the line
//! grammar into a [`models::WorkoutPlan`] while resolving exercise names
//! against an [`store::ExerciseStore`]. [`json::json_to_plan_text`] feeds
//! JSON plans into the same parser and [`render::render_plan`] writes plans
//! back out.

pub mod config;
pub mod db;
pub mod error;
pub mod json;
pub mod models;
pub mod parser;
pub mod render;
pub mod storage;
pub mod store;
pub mod types;
pub mod utils;

pub use error::{PlanError, StorageError, StoreError};
pub use models::{ExerciseDefinition, ExerciseInstance, WorkoutDay, WorkoutPlan};
pub use parser::parse_plan;
pub use store::{ExerciseStore, MemoryStore, SqliteExerciseStore};
