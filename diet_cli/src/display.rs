//! Plain-text rendering shared by subcommands and the interactive menu.

use chrono::NaiveDate;
use diet_core::{DailySummary, Goal, MealEntry, TrendPoint};
use std::io::{self, Write};

pub fn meals(out: &mut impl Write, date: NaiveDate, meals: &[MealEntry]) -> io::Result<()> {
    if meals.is_empty() {
        return writeln!(out, "No meals logged for {}.", date);
    }
    for meal in meals {
        writeln!(out, "- {} : {}kcal", meal.name, meal.kcal)?;
    }
    Ok(())
}

/// Meals with the 1-based numbers used for removal
pub fn numbered_meals(out: &mut impl Write, meals: &[MealEntry]) -> io::Result<()> {
    for (idx, meal) in meals.iter().enumerate() {
        writeln!(out, "{}. {} - {}kcal", idx + 1, meal.name, meal.kcal)?;
    }
    Ok(())
}

pub fn trend(out: &mut impl Write, points: &[TrendPoint]) -> io::Result<()> {
    writeln!(out, "Weight trend:")?;
    for point in points {
        writeln!(out, "{} {:.1}kg {}", point.date, point.weight, point.bar())?;
    }
    Ok(())
}

pub fn summary(out: &mut impl Write, summary: &DailySummary) -> io::Result<()> {
    writeln!(out, "Calorie summary for {}", summary.date)?;
    writeln!(out, "  Goal:      {}kcal", summary.goal_kcal)?;
    writeln!(out, "  Intake:    {}kcal", summary.intake_kcal)?;
    writeln!(out, "  Burned:    {}kcal", summary.burn_kcal)?;
    writeln!(out, "  Remaining: {}kcal", summary.remaining_kcal)
}

pub fn goal(out: &mut impl Write, goal: &Goal) -> io::Result<()> {
    writeln!(
        out,
        "Standard weight: {:.2}kg / Goal intake: {}kcal",
        goal.std_weight, goal.goal_kcal
    )
}
