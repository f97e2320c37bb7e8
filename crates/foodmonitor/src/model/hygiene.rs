//! Hygiene checklist tasks.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;

/// Grouping shown next to each task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HygieneCategory {
    /// Safe handling and storage of food.
    #[serde(rename = "Food Safety")]
    FoodSafety,
    /// Surface and room cleaning.
    Cleaning,
    /// Handwashing and similar.
    #[serde(rename = "Personal Hygiene")]
    PersonalHygiene,
    /// Appliance checks and maintenance.
    Equipment,
}

impl fmt::Display for HygieneCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FoodSafety => "Food Safety",
            Self::Cleaning => "Cleaning",
            Self::PersonalHygiene => "Personal Hygiene",
            Self::Equipment => "Equipment",
        })
    }
}

/// A recurring hygiene task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HygieneTask {
    /// Unique id.
    pub id: String,
    /// What needs doing.
    pub title: String,
    /// Task grouping.
    pub category: HygieneCategory,
    /// Whether the task is currently checked off.
    pub completed: bool,
    /// Free-text cadence such as "Daily" or "Always".
    pub frequency: String,
}

/// Flip `completed` on the task with the given id.
///
/// Returns the new completion state, or `None` if no task has that id.
pub fn toggle(tasks: &mut [HygieneTask], id: &str) -> Option<bool> {
    let task = tasks.iter_mut().find(|t| t.id == id)?;
    task.completed = !task.completed;
    Some(task.completed)
}

impl Record for HygieneTask {
    const KEY: &'static str = "hygieneTasks";
    const NAME: &'static str = "hygiene task";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_now: DateTime<Utc>) -> Vec<Self> {
        let task = |id: &str,
                    title: &str,
                    category: HygieneCategory,
                    completed: bool,
                    frequency: &str| Self {
            id: id.to_string(),
            title: title.to_string(),
            category,
            completed,
            frequency: frequency.to_string(),
        };
        vec![
            task(
                "1",
                "Sanitize food preparation surfaces",
                HygieneCategory::FoodSafety,
                true,
                "Daily",
            ),
            task(
                "2",
                "Check refrigerator temperature",
                HygieneCategory::Equipment,
                true,
                "Daily",
            ),
            task(
                "3",
                "Wash hands before food handling",
                HygieneCategory::PersonalHygiene,
                false,
                "Always",
            ),
            task(
                "4",
                "Deep clean refrigerator shelves",
                HygieneCategory::Cleaning,
                false,
                "Weekly",
            ),
            task(
                "5",
                "Check expiry dates",
                HygieneCategory::FoodSafety,
                false,
                "Daily",
            ),
            task(
                "6",
                "Clean kitchen floor",
                HygieneCategory::Cleaning,
                false,
                "Daily",
            ),
        ]
    }
}
