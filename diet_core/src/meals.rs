//! Per-day meal ledger.

use crate::{Error, MealEntry, Result, State};
use chrono::NaiveDate;

/// Append a meal to `date`, creating the day if needed
///
/// Any `kcal` value is accepted, including negative corrections.
pub fn add_meal(state: &mut State, date: NaiveDate, name: impl Into<String>, kcal: i64) {
    let entry = MealEntry::new(name, kcal);
    tracing::info!("Adding meal {:?} ({} kcal) on {}", entry.name, kcal, date);
    state.meals.entry(date).or_default().push(entry);
}

/// Remove the meal at 0-based `index` on `date`
///
/// Fails without touching the state when the index is out of range. The day
/// itself is kept even when its last meal is removed.
pub fn remove_meal(state: &mut State, date: NaiveDate, index: usize) -> Result<MealEntry> {
    let meals = state
        .meals
        .get_mut(&date)
        .filter(|meals| index < meals.len())
        .ok_or_else(|| {
            Error::Validation(format!("no meal number {} on {}", index + 1, date))
        })?;

    let removed = meals.remove(index);
    tracing::info!("Removed meal {:?} from {}", removed.name, date);
    Ok(removed)
}

/// Meals logged on `date`, in entry order
pub fn list_meals(state: &State, date: NaiveDate) -> &[MealEntry] {
    state.meals.get(&date).map(Vec::as_slice).unwrap_or(&[])
}

/// Total kcal logged on `date`
pub fn daily_intake(state: &State, date: NaiveDate) -> i64 {
    list_meals(state, date).iter().map(|m| m.kcal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_add_and_sum() {
        let day = date("2024-03-01");
        let mut state = State::default();
        assert_eq!(daily_intake(&state, day), 0);

        add_meal(&mut state, day, "rice", 300);
        add_meal(&mut state, day, "egg", 80);

        assert_eq!(daily_intake(&state, day), 380);
        assert_eq!(
            list_meals(&state, day),
            &[MealEntry::new("rice", 300), MealEntry::new("egg", 80)]
        );
    }

    #[test]
    fn test_days_are_independent() {
        let mut state = State::default();
        add_meal(&mut state, date("2024-03-01"), "rice", 300);
        add_meal(&mut state, date("2024-03-02"), "soup", 150);

        assert_eq!(daily_intake(&state, date("2024-03-01")), 300);
        assert_eq!(daily_intake(&state, date("2024-03-02")), 150);
        assert!(list_meals(&state, date("2024-03-03")).is_empty());
    }

    #[test]
    fn test_negative_kcal_accepted() {
        let day = date("2024-03-01");
        let mut state = State::default();
        add_meal(&mut state, day, "cake", 500);
        add_meal(&mut state, day, "correction", -120);

        assert_eq!(daily_intake(&state, day), 380);
    }

    #[test]
    fn test_remove_meal_returns_entry() {
        let day = date("2024-03-01");
        let mut state = State::default();
        add_meal(&mut state, day, "rice", 300);
        add_meal(&mut state, day, "egg", 80);
        add_meal(&mut state, day, "kimchi", 20);

        let removed = remove_meal(&mut state, day, 1).unwrap();
        assert_eq!(removed, MealEntry::new("egg", 80));
        assert_eq!(
            list_meals(&state, day),
            &[MealEntry::new("rice", 300), MealEntry::new("kimchi", 20)]
        );
    }

    #[test]
    fn test_remove_out_of_range_leaves_list_unchanged() {
        let day = date("2024-03-01");
        let mut state = State::default();
        add_meal(&mut state, day, "rice", 300);
        let before = state.clone();

        let result = remove_meal(&mut state, day, 1);
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_remove_from_absent_day_fails() {
        let mut state = State::default();
        let result = remove_meal(&mut state, date("2024-03-01"), 0);

        assert!(matches!(result, Err(Error::Validation(_))));
        assert!(state.meals.is_empty());
    }

    #[test]
    fn test_removing_last_meal_keeps_empty_day() {
        let day = date("2024-03-01");
        let mut state = State::default();
        add_meal(&mut state, day, "rice", 300);

        remove_meal(&mut state, day, 0).unwrap();
        assert_eq!(state.meals.get(&day), Some(&vec![]));
        assert_eq!(daily_intake(&state, day), 0);
    }
}
