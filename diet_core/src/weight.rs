//! Append-only weight log and trend computation.

use crate::{Error, Result, State, WeightEntry};
use chrono::NaiveDate;
use serde::Serialize;

const BAR_CHAR: char = '▇';

/// Bar segments per kg above the lightest sample (plus one)
const BAR_SCALE: f64 = 3.0;

/// One row of the weight trend
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub weight: f64,
    /// Relative bar length; 3 for the lightest sample
    pub bar_len: usize,
}

impl TrendPoint {
    pub fn bar(&self) -> String {
        std::iter::repeat(BAR_CHAR).take(self.bar_len).collect()
    }
}

/// Record a weight sample. Same-day samples are kept side by side.
pub fn add_weight(state: &mut State, date: NaiveDate, weight: f64) {
    state.weight_history.push(WeightEntry { date, weight });
    tracing::info!("Recorded weight {:.1} kg on {}", weight, date);
}

/// Trend rows in recording order, scaled against the lightest sample
pub fn trend(state: &State) -> Result<Vec<TrendPoint>> {
    let min_weight = state
        .weight_history
        .iter()
        .map(|e| e.weight)
        .reduce(f64::min)
        .ok_or_else(|| Error::NotFound("no weight entries recorded".into()))?;

    let points = state
        .weight_history
        .iter()
        .map(|e| TrendPoint {
            date: e.date,
            weight: e.weight,
            bar_len: ((e.weight - min_weight + 1.0) * BAR_SCALE).floor() as usize,
        })
        .collect();
    Ok(points)
}
