//! Food inventory records and expiry classification.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::error::Error;

/// Milliseconds in one day.
pub const MS_PER_DAY: i64 = 86_400_000;

/// Items with this many days or fewer left are expiring soon.
pub const DEFAULT_EXPIRING_SOON_DAYS: i64 = 3;

/// Categories offered by the food entry form.
///
/// The stored category is free text; these are only suggestions.
pub const SUGGESTED_CATEGORIES: &[&str] = &[
    "Dairy",
    "Meat",
    "Vegetables",
    "Fruits",
    "Grains",
    "Beverages",
    "Frozen",
    "Other",
];

/// Where a food item is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageLocation {
    /// Chilled storage.
    Refrigerator,
    /// Frozen storage.
    Freezer,
    /// Dry storage.
    Pantry,
    /// Room temperature, out in the open.
    Counter,
}

impl StorageLocation {
    /// All locations in form order.
    pub const ALL: [Self; 4] = [
        Self::Refrigerator,
        Self::Freezer,
        Self::Pantry,
        Self::Counter,
    ];

    /// The display and storage name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Refrigerator => "Refrigerator",
            Self::Freezer => "Freezer",
            Self::Pantry => "Pantry",
            Self::Counter => "Counter",
        }
    }
}

impl fmt::Display for StorageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageLocation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::invalid_field("location", format!("unknown location: {s}")))
    }
}

/// Unit of measure for a food quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Kilograms.
    #[serde(rename = "kg")]
    Kilogram,
    /// Grams.
    #[serde(rename = "g")]
    Gram,
    /// Litres.
    #[serde(rename = "L")]
    Litre,
    /// Millilitres.
    #[serde(rename = "mL")]
    Millilitre,
    /// Pieces.
    #[serde(rename = "pcs")]
    Pieces,
    /// Ounces.
    #[serde(rename = "oz")]
    Ounce,
    /// Pounds.
    #[serde(rename = "lb")]
    Pound,
}

impl Unit {
    /// All units in form order.
    pub const ALL: [Self; 7] = [
        Self::Kilogram,
        Self::Gram,
        Self::Litre,
        Self::Millilitre,
        Self::Pieces,
        Self::Ounce,
        Self::Pound,
    ];

    /// The unit's symbol as shown and stored.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kilogram => "kg",
            Self::Gram => "g",
            Self::Litre => "L",
            Self::Millilitre => "mL",
            Self::Pieces => "pcs",
            Self::Ounce => "oz",
            Self::Pound => "lb",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        // Exact match first so "L" and "mL" are never confused.
        Self::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|u| u.as_str().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| Error::invalid_field("unit", format!("unknown unit: {s}")))
    }
}

/// Freshness of a food item relative to a moment in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// The expiry date has passed.
    Expired,
    /// Expires within the warning window (inclusive).
    ExpiringSoon,
    /// Expires later than the warning window.
    Fresh,
}

impl ExpiryStatus {
    /// Classify a whole-day count against the warning window.
    #[must_use]
    pub fn classify(days_until_expiry: i64, window_days: i64) -> Self {
        if days_until_expiry < 0 {
            Self::Expired
        } else if days_until_expiry <= window_days {
            Self::ExpiringSoon
        } else {
            Self::Fresh
        }
    }

    /// Label shown in listings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::ExpiringSoon => "Expiring Soon",
            Self::Fresh => "Fresh",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole days from `now` until `expiry`, rounded up.
///
/// Anything less than a full day in the future counts as one day; anything
/// less than a full day in the past counts as zero.
#[must_use]
pub fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let ms = (expiry - now).num_milliseconds();
    -(-ms).div_euclid(MS_PER_DAY)
}

/// A stored food item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
    /// Unique id within the inventory.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-text category.
    pub category: String,
    /// When the item expires.
    #[serde(with = "super::timestamp")]
    pub expiry_date: DateTime<Utc>,
    /// Where it is kept.
    pub location: StorageLocation,
    /// Amount on hand.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub quantity: f64,
    /// Unit for `quantity`.
    pub unit: Unit,
}

impl FoodItem {
    /// Whole days until this item expires.
    #[must_use]
    pub fn days_until_expiry(&self, now: DateTime<Utc>) -> i64 {
        days_until(self.expiry_date, now)
    }

    /// Freshness of this item at `now`.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>, window_days: i64) -> ExpiryStatus {
        ExpiryStatus::classify(self.days_until_expiry(now), window_days)
    }
}

impl Record for FoodItem {
    const KEY: &'static str = "foodItems";
    const NAME: &'static str = "food item";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(now: DateTime<Utc>) -> Vec<Self> {
        vec![
            Self {
                id: "1".to_string(),
                name: "Fresh Milk".to_string(),
                category: "Dairy".to_string(),
                expiry_date: now + Duration::days(2),
                location: StorageLocation::Refrigerator,
                quantity: 1.0,
                unit: Unit::Litre,
            },
            Self {
                id: "2".to_string(),
                name: "Chicken Breast".to_string(),
                category: "Meat".to_string(),
                expiry_date: now + Duration::days(5),
                location: StorageLocation::Freezer,
                quantity: 500.0,
                unit: Unit::Gram,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn item_expiring_at(expiry: DateTime<Utc>) -> FoodItem {
        FoodItem {
            id: "x".to_string(),
            name: "Yogurt".to_string(),
            category: "Dairy".to_string(),
            expiry_date: expiry,
            location: StorageLocation::Refrigerator,
            quantity: 2.0,
            unit: Unit::Pieces,
        }
    }

    #[test]
    fn test_days_until_rounds_up() {
        assert_eq!(days_until(now(), now()), 0);
        assert_eq!(days_until(now() + Duration::milliseconds(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(1), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(25), now()), 2);
    }

    #[test]
    fn test_days_until_past() {
        assert_eq!(days_until(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until(now() - Duration::days(1), now()), -1);
        assert_eq!(days_until(now() - Duration::hours(36), now()), -1);
        assert_eq!(days_until(now() - Duration::hours(49), now()), -2);
    }

    #[test]
    fn test_status_examples() {
        let soon = item_expiring_at(now() + Duration::days(2));
        let expired = item_expiring_at(now() - Duration::days(1));
        let fresh = item_expiring_at(now() + Duration::days(10));

        assert_eq!(soon.status(now(), 3), ExpiryStatus::ExpiringSoon);
        assert_eq!(expired.status(now(), 3), ExpiryStatus::Expired);
        assert_eq!(fresh.status(now(), 3), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(ExpiryStatus::classify(-1, 3), ExpiryStatus::Expired);
        assert_eq!(ExpiryStatus::classify(0, 3), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::classify(3, 3), ExpiryStatus::ExpiringSoon);
        assert_eq!(ExpiryStatus::classify(4, 3), ExpiryStatus::Fresh);
    }

    #[test]
    fn test_status_label() {
        assert_eq!(ExpiryStatus::ExpiringSoon.to_string(), "Expiring Soon");
        assert_eq!(ExpiryStatus::Expired.to_string(), "Expired");
        assert_eq!(ExpiryStatus::Fresh.to_string(), "Fresh");
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(
            "freezer".parse::<StorageLocation>().unwrap(),
            StorageLocation::Freezer
        );
        assert_eq!(
            " Counter ".parse::<StorageLocation>().unwrap(),
            StorageLocation::Counter
        );
        let err = "Garage".parse::<StorageLocation>().unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_unit_parse() {
        assert_eq!("L".parse::<Unit>().unwrap(), Unit::Litre);
        assert_eq!("mL".parse::<Unit>().unwrap(), Unit::Millilitre);
        assert_eq!("ml".parse::<Unit>().unwrap(), Unit::Millilitre);
        assert_eq!("KG".parse::<Unit>().unwrap(), Unit::Kilogram);
        assert!("stone".parse::<Unit>().is_err());
    }

    #[test]
    fn test_serialized_layout() {
        let item = item_expiring_at(now());
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["expiryDate"], "2024-03-01T12:00:00.000Z");
        assert_eq!(json["location"], "Refrigerator");
        assert_eq!(json["unit"], "pcs");
        assert_eq!(json["quantity"], 2.0);
    }

    #[test]
    fn test_deserialize_browser_record() {
        let json = r#"{
            "id": "1709294400000",
            "name": "Fresh Milk",
            "category": "Dairy",
            "expiryDate": "2024-03-03T12:00:00.000Z",
            "location": "Refrigerator",
            "quantity": 1,
            "unit": "L"
        }"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();

        assert_eq!(item.unit, Unit::Litre);
        assert_eq!(item.days_until_expiry(now()), 2);
    }

    #[test]
    fn test_null_quantity_loads_as_nan() {
        let json = r#"{"id":"1","name":"Rice","category":"Grains",
            "expiryDate":"2024-04-01T00:00:00.000Z","location":"Pantry",
            "quantity":null,"unit":"kg"}"#;
        let item: FoodItem = serde_json::from_str(json).unwrap();
        assert!(item.quantity.is_nan());
    }

    #[test]
    fn test_seed() {
        let seed = FoodItem::seed(now());
        assert_eq!(seed.len(), 2);
        assert_eq!(seed[0].name, "Fresh Milk");
        assert_eq!(seed[0].status(now(), 3), ExpiryStatus::ExpiringSoon);
        assert_eq!(seed[1].status(now(), 3), ExpiryStatus::Fresh);
    }
}
