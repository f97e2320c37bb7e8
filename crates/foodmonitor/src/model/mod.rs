//! Domain records tracked by the dashboard.
//!
//! Each of the four collections is a flat `Vec` of one record type. Records
//! serialize with camelCase field names so a persisted collection is a plain
//! JSON array of objects.

pub mod diet;
pub mod food;
pub mod hygiene;
pub mod zone;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use diet::{DietEntry, MealType, NutritionTotals};
pub use food::{ExpiryStatus, FoodItem, StorageLocation, Unit};
pub use hygiene::{HygieneCategory, HygieneTask};
pub use zone::{TempUnit, TemperatureZone, ZoneField, ZoneStatus};

/// A record that lives in one of the persisted collections.
pub trait Record: Serialize + DeserializeOwned + Clone {
    /// Storage key of the collection holding this record type.
    const KEY: &'static str;

    /// Human-readable record name used in messages.
    const NAME: &'static str;

    /// The record's identity within its collection.
    fn id(&self) -> &str;

    /// The collection returned when nothing has been persisted yet.
    fn seed(now: DateTime<Utc>) -> Vec<Self>;
}

/// Generate an id that is not yet used in `records`.
///
/// Ids are the creation time in epoch milliseconds; when that value is taken
/// the next free millisecond is used instead.
#[must_use]
pub fn fresh_id<R: Record>(records: &[R], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !records.iter().any(|r| r.id() == id) {
            return id;
        }
        candidate += 1;
    }
}

/// Remove the record with the given id, keeping the order of the rest.
///
/// Returns the removed record, or `None` when no record has that id.
pub fn remove_by_id<R: Record>(records: &mut Vec<R>, id: &str) -> Option<R> {
    let index = records.iter().position(|r| r.id() == id)?;
    Some(records.remove(index))
}

/// Serde helpers for date-time fields.
///
/// Dates are written as ISO-8601 text with millisecond precision and a `Z`
/// suffix, e.g. `2024-03-01T09:30:00.000Z`. A stored `null` (an invalid
/// date saved by the browser dashboard) loads as the Unix epoch.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        match Option::<DateTime<Utc>>::deserialize(deserializer)? {
            Some(value) => Ok(value),
            None => {
                // DateTime<Utc>::default() is the Unix epoch.
                let epoch = DateTime::<Utc>::default();
                warn!("Stored date is null, using {epoch}");
                Ok(epoch)
            }
        }
    }
}

/// Serde helper for numeric fields that may have been stored as `null`.
///
/// Non-finite numbers serialize as `null`; they load back as NaN.
pub(crate) mod number {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}
