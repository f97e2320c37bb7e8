//! Dashboard aggregates.
//!
//! Every function here is pure: it reads a snapshot of the collections and
//! an explicit `now`, and never consults the system clock.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::model::food::DEFAULT_EXPIRING_SOON_DAYS;
use crate::model::zone::DEFAULT_WARNING_DELTA;
use crate::model::{DietEntry, FoodItem, HygieneTask, NutritionTotals, TemperatureZone};

/// Tunable limits used when classifying items and zones.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Items expiring within this many whole days count as expiring soon.
    pub expiring_soon_days: i64,
    /// Distance from target beyond which an in-range zone is a warning.
    pub warning_delta: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
            warning_delta: DEFAULT_WARNING_DELTA,
        }
    }
}

/// Number of zones whose reading is outside their allowed range.
#[must_use]
pub fn temperature_alert_count(zones: &[TemperatureZone]) -> usize {
    zones.iter().filter(|z| z.is_out_of_range()).count()
}

/// Number of items that have not expired but will within the window.
#[must_use]
pub fn expiring_soon_count(
    items: &[FoodItem],
    now: DateTime<Utc>,
    thresholds: &Thresholds,
) -> usize {
    items
        .iter()
        .filter(|item| {
            let days = item.days_until_expiry(now);
            (0..=thresholds.expiring_soon_days).contains(&days)
        })
        .count()
}

/// Percentage of tasks completed, rounded half up.
///
/// An empty checklist scores 0.
#[must_use]
pub fn hygiene_score(tasks: &[HygieneTask]) -> u32 {
    let total = tasks.len();
    if total == 0 {
        return 0;
    }
    let completed = tasks.iter().filter(|t| t.completed).count();
    let score = (200 * completed + total) / (2 * total);
    u32::try_from(score).unwrap_or(100)
}

/// Entries logged on the same calendar day as `now`, in `now`'s time zone.
pub fn todays_entries<'a, Tz: TimeZone>(
    entries: &'a [DietEntry],
    now: &DateTime<Tz>,
) -> impl Iterator<Item = &'a DietEntry> {
    let tz = now.timezone();
    let today = now.date_naive();
    entries
        .iter()
        .filter(move |e| e.timestamp.with_timezone(&tz).date_naive() == today)
}

/// Nutrition totals for entries logged today.
#[must_use]
pub fn daily_totals<Tz: TimeZone>(entries: &[DietEntry], now: &DateTime<Tz>) -> NutritionTotals {
    todays_entries(entries, now).collect()
}

/// The headline figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DashboardMetrics {
    /// Items in the inventory.
    pub food_items: usize,
    /// Zones outside their range.
    pub temperature_alerts: usize,
    /// Items expiring soon.
    pub expiring_soon: usize,
    /// Checklist completion percentage.
    pub hygiene_score: u32,
    /// Today's nutrition.
    pub today: NutritionTotals,
}

impl DashboardMetrics {
    /// Compute all headline figures at once.
    #[must_use]
    pub fn compute<Tz: TimeZone>(
        food_items: &[FoodItem],
        zones: &[TemperatureZone],
        tasks: &[HygieneTask],
        diet: &[DietEntry],
        now: &DateTime<Tz>,
        thresholds: &Thresholds,
    ) -> Self {
        let now_utc = now.with_timezone(&Utc);
        Self {
            food_items: food_items.len(),
            temperature_alerts: temperature_alert_count(zones),
            expiring_soon: expiring_soon_count(food_items, now_utc, thresholds),
            hygiene_score: hygiene_score(tasks),
            today: daily_totals(diet, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HygieneCategory, MealType, Record, StorageLocation, TempUnit, Unit};
    use chrono::{Duration, FixedOffset};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn food(id: &str, expiry: DateTime<Utc>) -> FoodItem {
        FoodItem {
            id: id.to_string(),
            name: format!("item {id}"),
            category: "Other".to_string(),
            expiry_date: expiry,
            location: StorageLocation::Pantry,
            quantity: 1.0,
            unit: Unit::Pieces,
        }
    }

    fn zone(current: f64, min: f64, max: f64) -> TemperatureZone {
        TemperatureZone {
            id: "z".to_string(),
            name: "Zone".to_string(),
            current_temp: current,
            target_temp: current,
            min_temp: min,
            max_temp: max,
            unit: TempUnit::C,
        }
    }

    fn tasks(completed: usize, total: usize) -> Vec<HygieneTask> {
        (0..total)
            .map(|i| HygieneTask {
                id: i.to_string(),
                title: format!("task {i}"),
                category: HygieneCategory::Cleaning,
                completed: i < completed,
                frequency: "Daily".to_string(),
            })
            .collect()
    }

    fn meal(calories: f64, timestamp: DateTime<Utc>) -> DietEntry {
        DietEntry {
            id: timestamp.timestamp_millis().to_string(),
            meal_type: MealType::Snack,
            food_name: "Toast".to_string(),
            calories,
            protein: 1.0,
            carbs: 2.0,
            fats: 3.0,
            timestamp,
        }
    }

    #[test]
    fn test_temperature_alert_count() {
        let zones = vec![
            zone(4.0, 0.0, 5.0),
            zone(-18.0, 0.0, 5.0),
            zone(30.0, 15.0, 25.0),
        ];
        assert_eq!(temperature_alert_count(&zones), 2);
        assert_eq!(temperature_alert_count(&[]), 0);
    }

    #[test]
    fn test_expiring_soon_excludes_expired_and_fresh() {
        let items = vec![
            food("expired", now() - Duration::days(1)),
            food("today", now() + Duration::hours(3)),
            food("two", now() + Duration::days(2)),
            food("three", now() + Duration::days(3)),
            food("ten", now() + Duration::days(10)),
        ];
        assert_eq!(expiring_soon_count(&items, now(), &Thresholds::default()), 3);
    }

    #[test]
    fn test_expiring_soon_custom_window() {
        let items = vec![food("five", now() + Duration::days(5))];
        let wide = Thresholds {
            expiring_soon_days: 7,
            ..Thresholds::default()
        };
        assert_eq!(expiring_soon_count(&items, now(), &Thresholds::default()), 0);
        assert_eq!(expiring_soon_count(&items, now(), &wide), 1);
    }

    #[test]
    fn test_hygiene_score() {
        assert_eq!(hygiene_score(&tasks(3, 6)), 50);
        assert_eq!(hygiene_score(&tasks(2, 6)), 33);
        assert_eq!(hygiene_score(&tasks(6, 6)), 100);
        assert_eq!(hygiene_score(&tasks(0, 6)), 0);
    }

    #[test]
    fn test_hygiene_score_rounds_half_up() {
        // 1 of 8 is 12.5%
        assert_eq!(hygiene_score(&tasks(1, 8)), 13);
        // 2 of 3 is 66.67%
        assert_eq!(hygiene_score(&tasks(2, 3)), 67);
    }

    #[test]
    fn test_hygiene_score_empty_is_zero() {
        assert_eq!(hygiene_score(&[]), 0);
    }

    #[test]
    fn test_daily_totals_calendar_day() {
        let entries = vec![
            meal(100.0, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
            meal(200.0, Utc.with_ymd_and_hms(2024, 3, 1, 11, 59, 0).unwrap()),
            // Yesterday 23:59, less than 24 hours old.
            meal(999.0, Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 0).unwrap()),
        ];
        let totals = daily_totals(&entries, &now());

        assert_eq!(totals.calories, 300.0);
        assert_eq!(totals.protein, 2.0);
        assert_eq!(totals.carbs, 4.0);
        assert_eq!(totals.fats, 6.0);
    }

    #[test]
    fn test_daily_totals_uses_callers_time_zone() {
        // 22:00 UTC on Feb 29 is already Mar 1 in UTC+3.
        let plus_three = FixedOffset::east_opt(3 * 3600).unwrap();
        let now_local = plus_three.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let entries = vec![
            meal(150.0, Utc.with_ymd_and_hms(2024, 2, 29, 22, 0, 0).unwrap()),
            meal(80.0, Utc.with_ymd_and_hms(2024, 2, 29, 20, 0, 0).unwrap()),
        ];

        let totals = daily_totals(&entries, &now_local);
        assert_eq!(totals.calories, 150.0);

        // The same instant seen from UTC is still Feb 29 for the first entry.
        let totals_utc = daily_totals(&entries, &now_local.with_timezone(&Utc));
        assert_eq!(totals_utc.calories, 0.0);
    }

    #[test]
    fn test_todays_entries_preserves_order() {
        let entries = vec![
            meal(1.0, now()),
            meal(2.0, now() - Duration::days(1)),
            meal(3.0, now() - Duration::hours(1)),
        ];
        let today: Vec<f64> = todays_entries(&entries, &now()).map(|e| e.calories).collect();
        assert_eq!(today, vec![1.0, 3.0]);
    }

    #[test]
    fn test_dashboard_metrics_on_seed() {
        let metrics = DashboardMetrics::compute(
            &FoodItem::seed(now()),
            &TemperatureZone::seed(now()),
            &HygieneTask::seed(now()),
            &DietEntry::seed(now()),
            &now(),
            &Thresholds::default(),
        );

        assert_eq!(metrics.food_items, 2);
        assert_eq!(metrics.temperature_alerts, 0);
        assert_eq!(metrics.expiring_soon, 1);
        assert_eq!(metrics.hygiene_score, 33);
        assert_eq!(metrics.today.calories, 320.0);
    }
}
