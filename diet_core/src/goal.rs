//! Standard-weight and goal-calorie calculation.
//!
//! Standard weight uses a BMI of 22. The daily goal is 30 kcal per kg of
//! standard weight, reduced by 7 kcal per kg of desired weekly loss.

use crate::{Goal, State, WeightEntry};
use chrono::NaiveDate;

const STANDARD_BMI: f64 = 22.0;
const KCAL_PER_STD_KG: f64 = 30.0;
const KCAL_PER_WEEKLY_LOSS_KG: f64 = 7.0;

/// Standard body weight in kg for a height in metres
pub fn standard_weight(height_m: f64) -> f64 {
    height_m.powi(2) * STANDARD_BMI
}

/// Target daily intake, truncated toward zero
pub fn goal_calories(std_weight_kg: f64, weekly_loss_kg: f64) -> i64 {
    (std_weight_kg * KCAL_PER_STD_KG - weekly_loss_kg * KCAL_PER_WEEKLY_LOSS_KG) as i64
}

impl Goal {
    /// Build a goal whose derived fields are consistent with its inputs
    pub fn new(height_m: f64, weekly_loss_kg: f64) -> Self {
        let std_weight = standard_weight(height_m);
        Self {
            height: height_m,
            std_weight,
            weekly_loss: weekly_loss_kg,
            goal_kcal: goal_calories(std_weight, weekly_loss_kg),
        }
    }
}

/// Replace the goal and record the current weight for `today`
///
/// Both changes land in the same state mutation; callers save once after.
pub fn set_goal(
    state: &mut State,
    today: NaiveDate,
    height_m: f64,
    current_weight_kg: f64,
    weekly_loss_kg: f64,
) -> Goal {
    let goal = Goal::new(height_m, weekly_loss_kg);

    state.goal = Some(goal.clone());
    state.weight_history.push(WeightEntry {
        date: today,
        weight: current_weight_kg,
    });

    tracing::info!(
        "Goal set: std weight {:.2} kg, {} kcal/day",
        goal.std_weight,
        goal.goal_kcal
    );
    goal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_weight() {
        assert!((standard_weight(1.7) - 63.58).abs() < 1e-9);
        assert!((standard_weight(1.6) - 56.32).abs() < 1e-9);
        assert_eq!(standard_weight(0.0), 0.0);
    }

    #[test]
    fn test_goal_calories_for_170cm() {
        let std_weight = standard_weight(1.7);
        assert_eq!(goal_calories(std_weight, 0.5), 1903);
    }

    #[test]
    fn test_goal_calories_truncates_toward_zero() {
        assert_eq!(goal_calories(60.0, 0.1), 1799); // 1799.3
        assert_eq!(goal_calories(60.0, -0.1), 1800); // 1800.7
        assert_eq!(goal_calories(0.0, 0.1), 0); // -0.7
        assert_eq!(goal_calories(0.0, 1.0), -7);
    }

    #[test]
    fn test_goal_calories_is_deterministic() {
        let first = goal_calories(standard_weight(1.82), 0.75);
        for _ in 0..10 {
            assert_eq!(goal_calories(standard_weight(1.82), 0.75), first);
        }
    }

    #[test]
    fn test_goal_new_is_consistent() {
        let goal = Goal::new(1.7, 0.5);
        assert_eq!(goal.height, 1.7);
        assert_eq!(goal.weekly_loss, 0.5);
        assert_eq!(goal.goal_kcal, goal_calories(goal.std_weight, goal.weekly_loss));
    }

    #[test]
    fn test_set_goal_replaces_goal_and_records_weight() {
        let today: NaiveDate = "2024-03-01".parse().unwrap();
        let mut state = State::default();

        set_goal(&mut state, today, 1.7, 75.0, 0.5);
        let second = set_goal(&mut state, today, 1.6, 74.2, 1.0);

        assert_eq!(state.goal, Some(second));
        assert_eq!(state.goal.as_ref().unwrap().height, 1.6);
        assert_eq!(state.weight_history.len(), 2);
        assert_eq!(
            state.weight_history[1],
            WeightEntry {
                date: today,
                weight: 74.2
            }
        );
    }
}
