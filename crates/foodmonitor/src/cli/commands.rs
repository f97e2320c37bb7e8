//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::forms::{DietForm, FoodForm};

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// JSON output
    Json,
}

/// Shared `--format` flag.
#[derive(Debug, Clone, Copy, Args)]
pub struct FormatArg {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Food inventory commands.
#[derive(Debug, Subcommand)]
pub enum FoodCommand {
    /// List food items with expiry status
    List(FormatArg),

    /// Add a food item
    Add(FoodAddArgs),

    /// Remove a food item by id
    Remove {
        /// Item id
        id: String,
    },
}

/// Fields of a new food item.
///
/// Every field is required; missing ones are reported by name.
#[derive(Debug, Default, Args)]
pub struct FoodAddArgs {
    /// Food name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Category (Dairy, Meat, Vegetables, ...)
    #[arg(long)]
    pub category: Option<String>,

    /// Expiry date (YYYY-MM-DD or RFC 3339)
    #[arg(short, long, value_name = "DATE")]
    pub expires: Option<String>,

    /// Storage location (Refrigerator, Freezer, Pantry, Counter)
    #[arg(short, long)]
    pub location: Option<String>,

    /// Quantity
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Option<String>,

    /// Unit (kg, g, L, mL, pcs, oz, lb)
    #[arg(short, long)]
    pub unit: Option<String>,
}

impl From<FoodAddArgs> for FoodForm {
    fn from(args: FoodAddArgs) -> Self {
        Self {
            name: args.name.unwrap_or_default(),
            category: args.category.unwrap_or_default(),
            expiry_date: args.expires.unwrap_or_default(),
            location: args.location.unwrap_or_default(),
            quantity: args.quantity.unwrap_or_default(),
            unit: args.unit.unwrap_or_default(),
        }
    }
}

/// Temperature zone commands.
#[derive(Debug, Subcommand)]
pub enum ZoneCommand {
    /// List zones with their status
    List(FormatArg),

    /// Change zone readings and limits
    Set(ZoneSetArgs),
}

/// Field edits for one zone.
#[derive(Debug, Args)]
pub struct ZoneSetArgs {
    /// Zone id
    pub id: String,

    /// Current reading
    #[arg(long, allow_negative_numbers = true)]
    pub current: Option<f64>,

    /// Target temperature
    #[arg(long, allow_negative_numbers = true)]
    pub target: Option<f64>,

    /// Lowest allowed temperature
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Highest allowed temperature
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,
}

/// Hygiene checklist commands.
#[derive(Debug, Subcommand)]
pub enum HygieneCommand {
    /// Show the checklist and completion score
    List(FormatArg),

    /// Mark a task done or not done
    Toggle {
        /// Task id
        id: String,
    },
}

/// Diet tracker commands.
#[derive(Debug, Subcommand)]
pub enum DietCommand {
    /// Show today's totals and recent entries
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,

        /// Number of entries to show (defaults to the configured value)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Log a meal
    Add(DietAddArgs),

    /// Delete a diet entry by id
    Remove {
        /// Entry id
        id: String,
    },
}

/// Fields of a new diet entry.
#[derive(Debug, Default, Args)]
pub struct DietAddArgs {
    /// Meal type (Breakfast, Lunch, Dinner, Snack)
    #[arg(short, long)]
    pub meal: Option<String>,

    /// What was eaten
    #[arg(long)]
    pub food: Option<String>,

    /// Energy in kcal
    #[arg(long, allow_negative_numbers = true)]
    pub calories: Option<String>,

    /// Protein in grams
    #[arg(long, allow_negative_numbers = true)]
    pub protein: Option<String>,

    /// Carbohydrates in grams
    #[arg(long, allow_negative_numbers = true)]
    pub carbs: Option<String>,

    /// Fats in grams
    #[arg(long, allow_negative_numbers = true)]
    pub fats: Option<String>,
}

impl From<DietAddArgs> for DietForm {
    fn from(args: DietAddArgs) -> Self {
        Self {
            meal_type: args.meal.unwrap_or_default(),
            food_name: args.food.unwrap_or_default(),
            calories: args.calories.unwrap_or_default(),
            protein: args.protein.unwrap_or_default(),
            carbs: args.carbs.unwrap_or_default(),
            fats: args.fats.unwrap_or_default(),
        }
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_food_args_into_form() {
        let args = FoodAddArgs {
            name: Some("Rice".to_string()),
            unit: Some("kg".to_string()),
            ..FoodAddArgs::default()
        };
        let form = FoodForm::from(args);

        assert_eq!(form.name, "Rice");
        assert_eq!(form.unit, "kg");
        assert!(form.category.is_empty());
        assert!(form.expiry_date.is_empty());
    }

    #[test]
    fn test_missing_food_args_fail_validation() {
        let form = FoodForm::from(FoodAddArgs {
            name: Some("Rice".to_string()),
            ..FoodAddArgs::default()
        });
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("category"));
    }

    #[test]
    fn test_diet_args_into_form() {
        let args = DietAddArgs {
            meal: Some("Snack".to_string()),
            food: Some("Apple".to_string()),
            calories: Some("95".to_string()),
            protein: Some("0.5".to_string()),
            carbs: Some("25".to_string()),
            fats: Some("0.3".to_string()),
        };
        let form = DietForm::from(args);
        assert_eq!(form.food_name, "Apple");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }
}
