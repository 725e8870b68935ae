//! Core domain types for the diet tracker.
//!
//! This module defines the persisted state document and its records:
//! - Weight history samples
//! - Per-day meal entries
//! - The calorie goal
//!
//! Field names are the on-disk names and must stay stable so existing data
//! files keep loading.

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

// ============================================================================
// Records
// ============================================================================

/// A single body-weight sample
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightEntry {
    pub date: NaiveDate,
    /// Body weight in kilograms
    pub weight: f64,
}

/// A meal logged on a given day
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MealEntry {
    pub name: String,
    pub kcal: i64,
}

impl MealEntry {
    pub fn new(name: impl Into<String>, kcal: i64) -> Self {
        Self {
            name: name.into(),
            kcal,
        }
    }
}

/// Calorie goal derived from height and desired weekly loss
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    /// Height in metres
    pub height: f64,
    /// Standard body weight in kilograms
    pub std_weight: f64,
    /// Desired weekly weight loss in kilograms
    pub weekly_loss: f64,
    /// Target daily intake in kcal
    pub goal_kcal: i64,
}

// ============================================================================
// State Document
// ============================================================================

/// The single persisted state document
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct State {
    /// Weight samples in the order they were recorded
    #[serde(default)]
    pub weight_history: Vec<WeightEntry>,

    /// Meals keyed by day, each day in entry order
    #[serde(default)]
    pub meals: BTreeMap<NaiveDate, Vec<MealEntry>>,

    /// Written as `{}` while unset
    #[serde(default, with = "goal_object")]
    pub goal: Option<Goal>,

    /// Reserved for exercise tracking. Carried through untouched.
    #[serde(default)]
    pub exercise: Map<String, Value>,
}

impl State {
    /// Fails on values JSON cannot hold (NaN, infinities)
    pub fn check_finite(&self) -> Result<()> {
        if let Some(entry) = self.weight_history.iter().find(|e| !e.weight.is_finite()) {
            return Err(Error::Validation(format!(
                "weight {} on {} is not a finite number",
                entry.weight, entry.date
            )));
        }

        if let Some(goal) = &self.goal {
            let fields = [
                ("height", goal.height),
                ("std_weight", goal.std_weight),
                ("weekly_loss", goal.weekly_loss),
            ];
            if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
                return Err(Error::Validation(format!(
                    "goal {} {} is not a finite number",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Serde adapter mapping an unset goal to and from an empty object.
mod goal_object {
    use super::Goal;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::{Map, Value};

    pub fn serialize<S>(goal: &Option<Goal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match goal {
            Some(goal) => goal.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Goal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Map<String, Value>>::deserialize(deserializer)? {
            None => Ok(None),
            Some(fields) if fields.is_empty() => Ok(None),
            Some(fields) => serde_json::from_value(Value::Object(fields))
                .map(Some)
                .map_err(D::Error::custom),
        }
    }
}
