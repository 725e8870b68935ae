mod display;
mod input;
mod menu;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use diet_core::*;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diet")]
#[command(about = "Personal diet tracker for meals, weight and calorie goals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive menu (default)
    Menu,

    /// Manage the meal log
    Meal {
        #[command(subcommand)]
        action: MealAction,
    },

    /// Record weight and show the trend
    Weight {
        #[command(subcommand)]
        action: WeightAction,
    },

    /// Show goal, intake and remaining calories for a day
    Summary {
        /// Day to summarize (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the calorie goal and record the current weight
    Goal {
        /// Height in centimetres
        #[arg(long, allow_negative_numbers = true, value_parser = input::parse_finite)]
        height_cm: f64,

        /// Current weight in kg
        #[arg(long, allow_negative_numbers = true, value_parser = input::parse_finite)]
        weight: f64,

        /// Desired weekly loss in kg
        #[arg(long, allow_negative_numbers = true, value_parser = input::parse_finite)]
        weekly_loss: f64,
    },
}

#[derive(Subcommand)]
enum MealAction {
    /// Log a meal
    Add {
        name: String,

        #[arg(allow_negative_numbers = true)]
        kcal: i64,

        /// Day to log on (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Remove a meal by its number in `meal list`
    Remove {
        number: usize,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// List the meals for a day
    List {
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WeightAction {
    /// Record a weight sample in kg
    Add {
        #[arg(allow_negative_numbers = true, value_parser = input::parse_finite)]
        weight: f64,

        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show every sample with a bar relative to the lightest one
    Trend {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    diet_core::logging::init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data_dir) = cli.data_dir {
        config.data.data_dir = data_dir;
    }
    let store = StateStore::new(config.state_path());
    let today = Local::now().date_naive();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => cmd_menu(&store, today, &config),
        Commands::Meal { action } => cmd_meal(&store, action, today),
        Commands::Weight { action } => cmd_weight(&store, action, today),
        Commands::Summary { date, json } => {
            cmd_summary(&store, date.unwrap_or(today), json, &config)
        }
        Commands::Goal {
            height_cm,
            weight,
            weekly_loss,
        } => cmd_goal(&store, today, height_cm, weight, weekly_loss),
    }
}

fn cmd_menu(store: &StateStore, today: NaiveDate, config: &Config) -> Result<()> {
    let state = store.load()?;
    let stdin = io::stdin();
    menu::Menu::new(
        store,
        state,
        today,
        config.summary.default_goal_kcal,
        stdin.lock(),
        io::stdout(),
    )
    .run()
}

fn cmd_meal(store: &StateStore, action: MealAction, today: NaiveDate) -> Result<()> {
    let mut out = io::stdout().lock();

    match action {
        MealAction::Add { name, kcal, date } => {
            let date = date.unwrap_or(today);
            let (_, entry) = store.update(|state| {
                add_meal(state, date, name.as_str(), kcal);
                Ok(MealEntry::new(name.as_str(), kcal))
            })?;
            writeln!(out, "✓ Added {} ({}kcal) on {}", entry.name, entry.kcal, date)?;
        }
        MealAction::Remove { number, date } => {
            let date = date.unwrap_or(today);
            let index = number
                .checked_sub(1)
                .ok_or_else(|| Error::Validation("meal numbers start at 1".into()))?;
            let (_, removed) = store.update(|state| remove_meal(state, date, index))?;
            writeln!(out, "✓ Removed {} ({}kcal) from {}", removed.name, removed.kcal, date)?;
        }
        MealAction::List { date, json } => {
            let date = date.unwrap_or(today);
            let state = store.load()?;
            let meals = list_meals(&state, date);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(meals)?)?;
            } else if meals.is_empty() {
                display::meals(&mut out, date, meals)?;
            } else {
                display::numbered_meals(&mut out, meals)?;
                writeln!(out, "Total: {}kcal", daily_intake(&state, date))?;
            }
        }
    }

    Ok(())
}

fn cmd_weight(store: &StateStore, action: WeightAction, today: NaiveDate) -> Result<()> {
    let mut out = io::stdout().lock();

    match action {
        WeightAction::Add { weight, date } => {
            let date = date.unwrap_or(today);
            store.update(|state| {
                add_weight(state, date, weight);
                Ok(())
            })?;
            writeln!(out, "✓ Recorded {:.1}kg on {}", weight, date)?;
        }
        WeightAction::Trend { json } => {
            let state = store.load()?;
            let points = trend(&state)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&points)?)?;
            } else {
                display::trend(&mut out, &points)?;
            }
        }
    }

    Ok(())
}

fn cmd_summary(store: &StateStore, date: NaiveDate, json: bool, config: &Config) -> Result<()> {
    let state = store.load()?;
    let summary = daily_summary_with_default(&state, date, config.summary.default_goal_kcal);

    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        display::summary(&mut out, &summary)?;
    }
    Ok(())
}

fn cmd_goal(
    store: &StateStore,
    today: NaiveDate,
    height_cm: f64,
    weight: f64,
    weekly_loss: f64,
) -> Result<()> {
    let (_, goal) =
        store.update(|state| Ok(set_goal(state, today, height_cm / 100.0, weight, weekly_loss)))?;

    let mut out = io::stdout().lock();
    display::goal(&mut out, &goal)?;
    Ok(())
}
