//! Plain-text rendering of dashboard screens.
//!
//! Each view borrows what it shows and renders through [`fmt::Display`].

use std::fmt;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};

use crate::dashboard::Collections;
use crate::metrics::{self, DashboardMetrics, Thresholds};
use crate::model::{DietEntry, FoodItem, HygieneTask, NutritionTotals, TemperatureZone};

/// Shown when the inventory is empty.
pub const EMPTY_FOOD_MESSAGE: &str = "No food items yet. Add your first item!";

const EMPTY_DIET_MESSAGE: &str = "No diet entries yet.";

/// Expiry date pattern used when none is configured or the configured one
/// is unusable.
pub const DEFAULT_DATE_FORMAT: &str = "%b %d, %Y";

/// Check that `pattern` is a non-empty `strftime` pattern chrono can render.
#[must_use]
pub fn is_valid_date_format(pattern: &str) -> bool {
    !pattern.trim().is_empty()
        && !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Headline figures followed by zone statuses and the checklist.
#[derive(Debug)]
pub struct DashboardView<'a> {
    /// Snapshot to render.
    pub collections: &'a Collections,
    /// Figures computed from the same snapshot.
    pub metrics: &'a DashboardMetrics,
    /// Thresholds used for zone status.
    pub thresholds: &'a Thresholds,
}

impl fmt::Display for DashboardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.metrics;
        writeln!(f, "Food Monitor Dashboard")?;
        writeln!(f, "======================")?;
        writeln!(f, "Food Items:          {}", m.food_items)?;
        writeln!(f, "Temperature Alerts:  {}", m.temperature_alerts)?;
        writeln!(f, "Expiring Soon:       {}", m.expiring_soon)?;
        writeln!(f, "Hygiene Score:       {}%", m.hygiene_score)?;
        writeln!(f)?;
        writeln!(f, "Temperature Zones")?;
        writeln!(f, "-----------------")?;
        write!(
            f,
            "{}",
            ZonesView {
                zones: &self.collections.temperature_zones,
                warning_delta: self.thresholds.warning_delta,
            }
        )?;
        writeln!(f)?;
        writeln!(f, "Hygiene Checklist")?;
        writeln!(f, "-----------------")?;
        write!(
            f,
            "{}",
            ChecklistView {
                tasks: &self.collections.hygiene_tasks,
            }
        )
    }
}

/// The food inventory with expiry status.
#[derive(Debug)]
pub struct FoodListView<'a> {
    /// Items in stored order.
    pub items: &'a [FoodItem],
    /// Reference time for status.
    pub now: DateTime<Utc>,
    /// Expiring-soon window in days.
    pub window_days: i64,
    /// `strftime` pattern for the expiry date. An invalid pattern renders
    /// with [`DEFAULT_DATE_FORMAT`] instead.
    pub date_format: &'a str,
}

impl fmt::Display for FoodListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            return writeln!(f, "{EMPTY_FOOD_MESSAGE}");
        }
        let date_format = if is_valid_date_format(self.date_format) {
            self.date_format
        } else {
            DEFAULT_DATE_FORMAT
        };
        for item in self.items {
            let status = item.status(self.now, self.window_days);
            writeln!(f, "[{}] {} ({})", item.id, item.name, item.category)?;
            writeln!(
                f,
                "    {}, {} {}, expires {}: {}",
                item.location,
                item.quantity,
                item.unit,
                item.expiry_date.format(date_format),
                status
            )?;
        }
        Ok(())
    }
}

/// Zone readings with status.
#[derive(Debug)]
pub struct ZonesView<'a> {
    /// Zones in stored order.
    pub zones: &'a [TemperatureZone],
    /// Degrees from target before a warning.
    pub warning_delta: f64,
}

impl fmt::Display for ZonesView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zones.is_empty() {
            return writeln!(f, "No temperature zones.");
        }
        for zone in self.zones {
            let u = zone.unit;
            writeln!(
                f,
                "[{}] {:<14} {:>6.1}{u}  target {:.1}{u}, range {:.1}{u} to {:.1}{u}  {}",
                zone.id,
                zone.name,
                zone.current_temp,
                zone.target_temp,
                zone.min_temp,
                zone.max_temp,
                zone.status(self.warning_delta)
            )?;
        }
        Ok(())
    }
}

/// Checklist with completion percentage.
#[derive(Debug)]
pub struct ChecklistView<'a> {
    /// Tasks in stored order.
    pub tasks: &'a [HygieneTask],
}

impl fmt::Display for ChecklistView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let done = self.tasks.iter().filter(|t| t.completed).count();
        writeln!(
            f,
            "Completed {done} of {} ({}%)",
            self.tasks.len(),
            metrics::hygiene_score(self.tasks)
        )?;
        for task in self.tasks {
            let mark = if task.completed { 'x' } else { ' ' };
            writeln!(
                f,
                "[{mark}] {}. {} ({}, {})",
                task.id, task.title, task.category, task.frequency
            )?;
        }
        Ok(())
    }
}

/// Today's nutrition summary followed by the most recent entries.
#[derive(Debug)]
pub struct DietView<'a, Tz: TimeZone> {
    /// Entries, newest first.
    pub entries: &'a [DietEntry],
    /// Reference time; its zone defines "today" and entry times.
    pub now: &'a DateTime<Tz>,
    /// Maximum entries to list.
    pub limit: usize,
}

impl<Tz: TimeZone> fmt::Display for DietView<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let totals = metrics::daily_totals(self.entries, self.now);
        writeln!(f, "Today")?;
        write!(f, "{}", TotalsView(&totals))?;
        writeln!(f)?;

        if self.entries.is_empty() {
            return writeln!(f, "{EMPTY_DIET_MESSAGE}");
        }
        let tz = self.now.timezone();
        for entry in self.entries.iter().take(self.limit) {
            writeln!(
                f,
                "[{}] {} {}: {}",
                entry.id,
                entry.timestamp.with_timezone(&tz).format("%Y-%m-%d %H:%M"),
                entry.meal_type,
                entry.food_name
            )?;
            writeln!(
                f,
                "    {} kcal, P {}g, C {}g, F {}g",
                entry.calories, entry.protein, entry.carbs, entry.fats
            )?;
        }
        let hidden = self.entries.len().saturating_sub(self.limit);
        if hidden > 0 {
            writeln!(f, "... and {hidden} older entries")?;
        }
        Ok(())
    }
}

struct TotalsView<'a>(&'a NutritionTotals);

impl fmt::Display for TotalsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = self.0;
        writeln!(f, "  Calories: {} kcal", t.calories)?;
        writeln!(f, "  Protein:  {}g", t.protein)?;
        writeln!(f, "  Carbs:    {}g", t.carbs)?;
        writeln!(f, "  Fats:     {}g", t.fats)
    }
}
