//! Interactive numbered menu.
//!
//! Every change goes through [`StateStore::update`], so edits made by other
//! `diet` processes while the menu is open are never overwritten. Views
//! reload the document first. All operations act on `today`.

use crate::display;
use crate::input::parse_finite;
use chrono::NaiveDate;
use diet_core::{
    add_meal, add_weight, daily_summary_with_default, list_meals, remove_meal, set_goal, trend,
    Error, Result, State, StateStore,
};
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Whether the session should keep going after an action
enum Flow {
    Stay,
    Quit,
}

pub struct Menu<'a, R, W> {
    store: &'a StateStore,
    state: State,
    today: NaiveDate,
    default_goal_kcal: i64,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(
        store: &'a StateStore,
        state: State,
        today: NaiveDate,
        default_goal_kcal: i64,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            state,
            today,
            default_goal_kcal,
            input,
            output,
        }
    }

    /// Run until the user picks `0` or input ends
    pub fn run(mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n[Diet Tracker]")?;
            writeln!(self.output, "1. Meal management")?;
            writeln!(self.output, "2. Weight / calorie management")?;
            writeln!(self.output, "3. Set calorie / weight goal")?;
            writeln!(self.output, "0. Exit")?;

            let Some(choice) = self.read_line("Select: ")? else {
                return Ok(());
            };
            let flow = match choice.as_str() {
                "1" => self.meal_menu()?,
                "2" => self.weight_menu()?,
                "3" => self.guard(Self::set_goal)?,
                "0" => Flow::Quit,
                _ => self.invalid_choice()?,
            };
            if let Flow::Quit = flow {
                return Ok(());
            }
        }
    }

    fn meal_menu(&mut self) -> Result<Flow> {
        loop {
            writeln!(self.output, "\n[Meal management]")?;
            writeln!(self.output, "1. Add a meal for today")?;
            writeln!(self.output, "2. Remove a meal from today")?;
            writeln!(self.output, "3. Show today's meals")?;
            writeln!(self.output, "0. Back")?;

            let Some(choice) = self.read_line("Select: ")? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice.as_str() {
                "1" => self.guard(Self::add_meal)?,
                "2" => self.guard(Self::remove_meal)?,
                "3" => self.show_meals()?,
                "0" => return Ok(Flow::Stay),
                _ => self.invalid_choice()?,
            };
            if let Flow::Quit = flow {
                return Ok(Flow::Quit);
            }
        }
    }

    fn weight_menu(&mut self) -> Result<Flow> {
        loop {
            writeln!(self.output, "\n[Weight / calorie management]")?;
            writeln!(self.output, "1. Record weight")?;
            writeln!(self.output, "2. Weight trend")?;
            writeln!(self.output, "3. Today's calorie summary")?;
            writeln!(self.output, "0. Back")?;

            let Some(choice) = self.read_line("Select: ")? else {
                return Ok(Flow::Quit);
            };
            let flow = match choice.as_str() {
                "1" => self.guard(Self::add_weight)?,
                "2" => self.guard(Self::show_trend)?,
                "3" => self.show_summary()?,
                "0" => return Ok(Flow::Stay),
                _ => self.invalid_choice()?,
            };
            if let Flow::Quit = flow {
                return Ok(Flow::Quit);
            }
        }
    }

    /// Report recoverable errors and return to the menu
    fn guard(&mut self, action: fn(&mut Self) -> Result<Flow>) -> Result<Flow> {
        match action(self) {
            Err(e @ (Error::Validation(_) | Error::NotFound(_))) => {
                tracing::debug!("Menu action rejected: {}", e);
                writeln!(self.output, "{}", e)?;
                Ok(Flow::Stay)
            }
            other => other,
        }
    }

    fn invalid_choice(&mut self) -> Result<Flow> {
        writeln!(self.output, "Invalid choice.")?;
        Ok(Flow::Stay)
    }

    fn add_meal(&mut self) -> Result<Flow> {
        let Some(name) = self.read_line("Food name: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(kcal) = self.read_parsed::<i64>("Calories: ")? else {
            return Ok(Flow::Quit);
        };

        let today = self.today;
        self.commit(|state| {
            add_meal(state, today, name, kcal);
            Ok(())
        })?;
        writeln!(self.output, "Meal added.")?;
        Ok(Flow::Stay)
    }

    fn remove_meal(&mut self) -> Result<Flow> {
        self.refresh()?;
        let meals = list_meals(&self.state, self.today);
        if meals.is_empty() {
            writeln!(self.output, "No meals logged today.")?;
            return Ok(Flow::Stay);
        }
        display::numbered_meals(&mut self.output, meals)?;

        let Some(number) = self.read_parsed::<usize>("Number to remove: ")? else {
            return Ok(Flow::Quit);
        };
        let index = number
            .checked_sub(1)
            .ok_or_else(|| Error::Validation("meal numbers start at 1".into()))?;

        let today = self.today;
        let removed = self.commit(|state| remove_meal(state, today, index))?;
        writeln!(self.output, "{} removed.", removed.name)?;
        Ok(Flow::Stay)
    }

    fn show_meals(&mut self) -> Result<Flow> {
        self.refresh()?;
        display::meals(
            &mut self.output,
            self.today,
            list_meals(&self.state, self.today),
        )?;
        Ok(Flow::Stay)
    }

    fn add_weight(&mut self) -> Result<Flow> {
        let Some(weight) = self.read_number("Current weight (kg): ")? else {
            return Ok(Flow::Quit);
        };

        let today = self.today;
        self.commit(|state| {
            add_weight(state, today, weight);
            Ok(())
        })?;
        writeln!(self.output, "Weight recorded.")?;
        Ok(Flow::Stay)
    }

    fn show_trend(&mut self) -> Result<Flow> {
        self.refresh()?;
        let points = trend(&self.state)?;
        display::trend(&mut self.output, &points)?;
        Ok(Flow::Stay)
    }

    fn show_summary(&mut self) -> Result<Flow> {
        self.refresh()?;
        let summary = daily_summary_with_default(&self.state, self.today, self.default_goal_kcal);
        display::summary(&mut self.output, &summary)?;
        Ok(Flow::Stay)
    }

    fn set_goal(&mut self) -> Result<Flow> {
        let Some(height_cm) = self.read_number("Height (cm): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(weight) = self.read_number("Current weight (kg): ")? else {
            return Ok(Flow::Quit);
        };
        let Some(weekly_loss) = self.read_number("Weekly loss target (kg): ")? else {
            return Ok(Flow::Quit);
        };

        let today = self.today;
        let goal = self.commit(|state| {
            Ok(set_goal(state, today, height_cm / 100.0, weight, weekly_loss))
        })?;
        display::goal(&mut self.output, &goal)?;
        Ok(Flow::Stay)
    }

    /// Apply `f` to the stored document under the store lock
    ///
    /// The in-memory copy only changes once the save succeeded.
    fn commit<T>(&mut self, f: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
        let (state, output) = self.store.update(f)?;
        self.state = state;
        Ok(output)
    }

    fn refresh(&mut self) -> Result<()> {
        self.state = self.store.load()?;
        Ok(())
    }

    /// Prompt and read one trimmed line; `None` at end of input
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn read_parsed<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>> {
        match self.read_line(prompt)? {
            None => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| Error::Validation(format!("{:?} is not a number", raw))),
        }
    }

    /// Like `read_parsed`, but refuses NaN and infinities
    fn read_number(&mut self, prompt: &str) -> Result<Option<f64>> {
        self.read_line(prompt)?
            .map(|raw| parse_finite(&raw))
            .transpose()
    }
}
