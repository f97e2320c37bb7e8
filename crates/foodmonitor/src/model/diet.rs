//! Diet log entries and nutrition totals.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::error::Error;

/// Which meal an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    /// Morning meal.
    Breakfast,
    /// Midday meal.
    Lunch,
    /// Evening meal.
    Dinner,
    /// Anything in between.
    Snack,
}

impl MealType {
    /// All meal types in form order.
    pub const ALL: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snack];

    /// The display and storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Breakfast => "Breakfast",
            Self::Lunch => "Lunch",
            Self::Dinner => "Dinner",
            Self::Snack => "Snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MealType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_field("meal type", format!("unknown meal type: {s}")))
    }
}

/// One logged food.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DietEntry {
    /// Unique id.
    pub id: String,
    /// Meal the food was part of.
    pub meal_type: MealType,
    /// What was eaten.
    pub food_name: String,
    /// Energy in kcal.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub calories: f64,
    /// Protein in grams.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub protein: f64,
    /// Carbohydrates in grams.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub carbs: f64,
    /// Fats in grams.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub fats: f64,
    /// When the entry was logged.
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Summed nutrition over a set of entries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct NutritionTotals {
    /// Total kcal.
    pub calories: f64,
    /// Total protein grams.
    pub protein: f64,
    /// Total carbohydrate grams.
    pub carbs: f64,
    /// Total fat grams.
    pub fats: f64,
}

impl NutritionTotals {
    /// Add one entry's values.
    pub fn add(&mut self, entry: &DietEntry) {
        self.calories += entry.calories;
        self.protein += entry.protein;
        self.carbs += entry.carbs;
        self.fats += entry.fats;
    }
}

impl<'a> FromIterator<&'a DietEntry> for NutritionTotals {
    fn from_iter<I: IntoIterator<Item = &'a DietEntry>>(iter: I) -> Self {
        let mut totals = Self::default();
        for entry in iter {
            totals.add(entry);
        }
        totals
    }
}

impl Record for DietEntry {
    const KEY: &'static str = "dietEntries";
    const NAME: &'static str = "diet entry";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(now: DateTime<Utc>) -> Vec<Self> {
        vec![Self {
            id: "1".to_string(),
            meal_type: MealType::Breakfast,
            food_name: "Oatmeal with Berries".to_string(),
            calories: 320.0,
            protein: 12.0,
            carbs: 54.0,
            fats: 7.0,
            timestamp: now,
        }]
    }
}
