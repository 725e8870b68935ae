#![forbid(unsafe_code)]

//! Core domain model and business logic for the diet tracker.
//!
//! This crate provides:
//! - Domain types (weight history, meal log, calorie goal)
//! - Goal calculation (standard weight, target calories)
//! - Meal ledger and weight log operations
//! - Daily calorie summaries
//! - Persistence (single JSON state document)

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod store;
pub mod goal;
pub mod meals;
pub mod weight;
pub mod summary;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use store::StateStore;
pub use goal::{goal_calories, set_goal, standard_weight};
pub use meals::{add_meal, daily_intake, list_meals, remove_meal};
pub use weight::{add_weight, trend, TrendPoint};
pub use summary::{daily_summary, daily_summary_with_default, DailySummary, DEFAULT_GOAL_KCAL};
