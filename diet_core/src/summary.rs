//! Daily calorie summary.

use crate::meals::daily_intake;
use crate::State;
use chrono::NaiveDate;
use serde::Serialize;

/// Goal used when none has been set
pub const DEFAULT_GOAL_KCAL: i64 = 2000;

/// Goal, intake and remaining calories for one day
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub goal_kcal: i64,
    pub intake_kcal: i64,
    /// Exercise burn. Not tracked yet, always 0.
    pub burn_kcal: i64,
    pub remaining_kcal: i64,
}

/// Summary for `date`, falling back to [`DEFAULT_GOAL_KCAL`]
pub fn daily_summary(state: &State, date: NaiveDate) -> DailySummary {
    daily_summary_with_default(state, date, DEFAULT_GOAL_KCAL)
}

/// Summary for `date` with a caller-supplied fallback goal
pub fn daily_summary_with_default(
    state: &State,
    date: NaiveDate,
    default_goal_kcal: i64,
) -> DailySummary {
    let goal_kcal = state
        .goal
        .as_ref()
        .map_or(default_goal_kcal, |goal| goal.goal_kcal);
    let intake_kcal = daily_intake(state, date);
    let burn_kcal = 0;

    DailySummary {
        date,
        goal_kcal,
        intake_kcal,
        burn_kcal,
        remaining_kcal: goal_kcal - intake_kcal + burn_kcal,
    }
}
