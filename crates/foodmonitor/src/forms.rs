//! Entry forms and the zone settings editor.
//!
//! Forms hold raw text exactly as typed. Submitting a form checks that every
//! field is filled in, parses the text into typed values, and on success
//! clears the form and hands back a record that only lacks its id.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};
use crate::model::{
    DietEntry, FoodItem, MealType, Record, StorageLocation, TemperatureZone, Unit, ZoneField,
};

/// Text input for a new food item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodForm {
    /// Food name.
    pub name: String,
    /// Category, free text.
    pub category: String,
    /// Expiry date as `YYYY-MM-DD` or an RFC 3339 timestamp.
    pub expiry_date: String,
    /// Storage location name.
    pub location: String,
    /// Quantity as decimal text.
    pub quantity: String,
    /// Unit symbol.
    pub unit: String,
}

/// A validated food item that has not been assigned an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodItem {
    /// Food name.
    pub name: String,
    /// Category.
    pub category: String,
    /// Expiry moment.
    pub expiry_date: DateTime<Utc>,
    /// Storage location.
    pub location: StorageLocation,
    /// Quantity, always positive.
    pub quantity: f64,
    /// Unit of `quantity`.
    pub unit: Unit,
}

impl NewFoodItem {
    /// Attach an id to produce a stored item.
    #[must_use]
    pub fn into_item(self, id: String) -> FoodItem {
        FoodItem {
            id,
            name: self.name,
            category: self.category,
            expiry_date: self.expiry_date,
            location: self.location,
            quantity: self.quantity,
            unit: self.unit,
        }
    }
}

impl FoodForm {
    /// Check and parse the form without clearing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for the first empty field, or
    /// [`Error::InvalidField`] when a value cannot be interpreted.
    pub fn validate(&self) -> Result<NewFoodItem> {
        let name = required(&self.name, "name")?;
        let category = required(&self.category, "category")?;
        let expiry_date = required(&self.expiry_date, "expiry date")?;
        let location = required(&self.location, "location")?;
        let quantity = required(&self.quantity, "quantity")?;
        let unit = required(&self.unit, "unit")?;

        let quantity = parse_number(quantity, "quantity")?;
        if quantity <= 0.0 {
            return Err(Error::invalid_field(
                "quantity",
                format!("must be positive, got {quantity}"),
            ));
        }

        Ok(NewFoodItem {
            name: name.to_string(),
            category: category.to_string(),
            expiry_date: parse_date(expiry_date, "expiry date")?,
            location: location.parse()?,
            quantity,
            unit: unit.parse()?,
        })
    }

    /// Validate, then clear the form.
    ///
    /// On error the form keeps its contents.
    ///
    /// # Errors
    ///
    /// See [`FoodForm::validate`].
    pub fn submit(&mut self) -> Result<NewFoodItem> {
        let item = self.validate()?;
        self.reset();
        Ok(item)
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Text input for a new diet entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DietForm {
    /// Meal type name.
    pub meal_type: String,
    /// What was eaten.
    pub food_name: String,
    /// kcal as decimal text.
    pub calories: String,
    /// Protein grams as decimal text.
    pub protein: String,
    /// Carbohydrate grams as decimal text.
    pub carbs: String,
    /// Fat grams as decimal text.
    pub fats: String,
}

/// A validated diet entry that has not been assigned an id or timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDietEntry {
    /// Meal type.
    pub meal_type: MealType,
    /// What was eaten.
    pub food_name: String,
    /// kcal.
    pub calories: f64,
    /// Protein grams.
    pub protein: f64,
    /// Carbohydrate grams.
    pub carbs: f64,
    /// Fat grams.
    pub fats: f64,
}

impl NewDietEntry {
    /// Attach an id and creation time to produce a stored entry.
    #[must_use]
    pub fn into_entry(self, id: String, timestamp: DateTime<Utc>) -> DietEntry {
        DietEntry {
            id,
            meal_type: self.meal_type,
            food_name: self.food_name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fats: self.fats,
            timestamp,
        }
    }
}

impl DietForm {
    /// Check and parse the form without clearing it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for the first empty field, or
    /// [`Error::InvalidField`] when a value cannot be interpreted or a
    /// nutrition value is negative.
    pub fn validate(&self) -> Result<NewDietEntry> {
        let meal_type = required(&self.meal_type, "meal type")?;
        let food_name = required(&self.food_name, "food name")?;
        let calories = required(&self.calories, "calories")?;
        let protein = required(&self.protein, "protein")?;
        let carbs = required(&self.carbs, "carbs")?;
        let fats = required(&self.fats, "fats")?;

        Ok(NewDietEntry {
            meal_type: meal_type.parse()?,
            food_name: food_name.to_string(),
            calories: parse_amount(calories, "calories")?,
            protein: parse_amount(protein, "protein")?,
            carbs: parse_amount(carbs, "carbs")?,
            fats: parse_amount(fats, "fats")?,
        })
    }

    /// Validate, then clear the form.
    ///
    /// # Errors
    ///
    /// See [`DietForm::validate`].
    pub fn submit(&mut self) -> Result<NewDietEntry> {
        let entry = self.validate()?;
        self.reset();
        Ok(entry)
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Draft copy of the zone list being edited in settings.
///
/// Edits touch only the draft; the owner swaps the whole list in on save.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneSettings {
    zones: Vec<TemperatureZone>,
}

impl ZoneSettings {
    /// Start editing a copy of `zones`.
    #[must_use]
    pub fn new(zones: &[TemperatureZone]) -> Self {
        Self {
            zones: zones.to_vec(),
        }
    }

    /// Change one field of one zone in the draft.
    ///
    /// Min/max ordering is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] for a non-finite value and
    /// [`Error::NotFound`] if no zone has `id`.
    pub fn set(&mut self, id: &str, field: ZoneField, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::invalid_field(
                field.as_str(),
                format!("not a finite number: {value}"),
            ));
        }
        let zone = self
            .zones
            .iter_mut()
            .find(|z| z.id == id)
            .ok_or_else(|| Error::not_found(TemperatureZone::NAME, id))?;
        zone.set_field(field, value);
        Ok(())
    }

    /// The draft as edited so far.
    #[must_use]
    pub fn zones(&self) -> &[TemperatureZone] {
        &self.zones
    }

    /// Finish editing and take the draft.
    #[must_use]
    pub fn into_zones(self) -> Vec<TemperatureZone> {
        self.zones
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::missing_field(field))
    } else {
        Ok(value)
    }
}

fn parse_number(value: &str, field: &'static str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(Error::invalid_field(
            field,
            format!("not a number: {value}"),
        )),
    }
}

fn parse_amount(value: &str, field: &'static str) -> Result<f64> {
    let n = parse_number(value, field)?;
    if n < 0.0 {
        return Err(Error::invalid_field(
            field,
            format!("cannot be negative, got {n}"),
        ));
    }
    Ok(n)
}

/// Parse a date-only value as midnight UTC, or a full RFC 3339 timestamp.
fn parse_date(value: &str, field: &'static str) -> Result<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Error::invalid_field(field, format!("not a date: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TempUnit;
    use chrono::TimeZone;

    fn filled_food_form() -> FoodForm {
        FoodForm {
            name: "Greek Yogurt".to_string(),
            category: "Dairy".to_string(),
            expiry_date: "2024-03-04".to_string(),
            location: "Refrigerator".to_string(),
            quantity: "0.5".to_string(),
            unit: "kg".to_string(),
        }
    }

    fn filled_diet_form() -> DietForm {
        DietForm {
            meal_type: "Lunch".to_string(),
            food_name: "Lentil soup".to_string(),
            calories: "410".to_string(),
            protein: "18.5".to_string(),
            carbs: "60".to_string(),
            fats: "9".to_string(),
        }
    }

    #[test]
    fn test_food_form_valid() {
        let item = filled_food_form().validate().unwrap();

        assert_eq!(item.name, "Greek Yogurt");
        assert_eq!(
            item.expiry_date,
            Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap()
        );
        assert_eq!(item.location, StorageLocation::Refrigerator);
        assert_eq!(item.quantity, 0.5);
        assert_eq!(item.unit, Unit::Kilogram);
    }

    #[test]
    fn test_food_form_submit_resets() {
        let mut form = filled_food_form();
        form.submit().unwrap();
        assert_eq!(form, FoodForm::default());
    }

    #[test]
    fn test_food_form_missing_field_blocks() {
        let mut form = filled_food_form();
        form.location = "  ".to_string();

        let err = form.submit().unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "location" }));
        // Nothing was cleared.
        assert_eq!(form.name, "Greek Yogurt");
    }

    #[test]
    fn test_food_form_empty_reports_first_field() {
        let err = FoodForm::default().validate().unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "name" }));
    }

    #[test]
    fn test_food_form_rejects_malformed_quantity() {
        for bad in ["abc", "NaN", "inf", "-1", "0"] {
            let mut form = filled_food_form();
            form.quantity = bad.to_string();
            let err = form.validate().unwrap_err();
            assert!(
                matches!(err, Error::InvalidField { field: "quantity", .. }),
                "accepted quantity {bad}"
            );
        }
    }

    #[test]
    fn test_food_form_rejects_bad_date() {
        let mut form = filled_food_form();
        form.expiry_date = "2024-02-30".to_string();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "expiry date", .. }));
    }

    #[test]
    fn test_food_form_accepts_rfc3339() {
        let mut form = filled_food_form();
        form.expiry_date = "2024-03-04T18:30:00+02:00".to_string();
        let item = form.validate().unwrap();
        assert_eq!(
            item.expiry_date,
            Utc.with_ymd_and_hms(2024, 3, 4, 16, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_food_form_rejects_unknown_unit() {
        let mut form = filled_food_form();
        form.unit = "cups".to_string();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "unit", .. }));
    }

    #[test]
    fn test_new_food_item_into_item() {
        let item = filled_food_form()
            .validate()
            .unwrap()
            .into_item("42".to_string());
        assert_eq!(item.id, "42");
        assert_eq!(item.category, "Dairy");
    }

    #[test]
    fn test_diet_form_valid() {
        let entry = filled_diet_form().validate().unwrap();
        assert_eq!(entry.meal_type, MealType::Lunch);
        assert_eq!(entry.protein, 18.5);
    }

    #[test]
    fn test_diet_form_zero_allowed_negative_rejected() {
        let mut form = filled_diet_form();
        form.fats = "0".to_string();
        assert!(form.validate().is_ok());

        form.fats = "-2".to_string();
        let err = form.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "fats", .. }));
    }

    #[test]
    fn test_diet_form_missing_field() {
        let mut form = filled_diet_form();
        form.carbs.clear();
        let err = form.submit().unwrap_err();
        assert!(matches!(err, Error::MissingField { field: "carbs" }));
        assert_eq!(form.food_name, "Lentil soup");
    }

    #[test]
    fn test_diet_form_submit_resets() {
        let mut form = filled_diet_form();
        form.submit().unwrap();
        assert_eq!(form, DietForm::default());
    }

    #[test]
    fn test_diet_into_entry_stamps_time() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 7, 45, 0).unwrap();
        let entry = filled_diet_form()
            .validate()
            .unwrap()
            .into_entry("7".to_string(), ts);
        assert_eq!(entry.timestamp, ts);
        assert_eq!(entry.id, "7");
    }

    fn zones() -> Vec<TemperatureZone> {
        vec![
            TemperatureZone {
                id: "1".to_string(),
                name: "Fridge".to_string(),
                current_temp: 4.0,
                target_temp: 4.0,
                min_temp: 0.0,
                max_temp: 5.0,
                unit: TempUnit::C,
            },
            TemperatureZone {
                id: "2".to_string(),
                name: "Cellar".to_string(),
                current_temp: 55.0,
                target_temp: 55.0,
                min_temp: 50.0,
                max_temp: 60.0,
                unit: TempUnit::F,
            },
        ]
    }

    #[test]
    fn test_zone_settings_edits_draft_only() {
        let original = zones();
        let mut draft = ZoneSettings::new(&original);
        draft.set("1", ZoneField::Current, 9.0).unwrap();

        assert_eq!(original[0].current_temp, 4.0);
        assert_eq!(draft.zones()[0].current_temp, 9.0);
        assert_eq!(draft.zones()[1], original[1]);
    }

    #[test]
    fn test_zone_settings_allows_inverted_range() {
        let mut draft = ZoneSettings::new(&zones());
        draft.set("1", ZoneField::Min, 10.0).unwrap();
        let edited = draft.into_zones();
        assert!(edited[0].min_temp > edited[0].max_temp);
    }

    #[test]
    fn test_zone_settings_unknown_id() {
        let mut draft = ZoneSettings::new(&zones());
        let err = draft.set("9", ZoneField::Target, 1.0).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(draft.zones(), zones().as_slice());
    }

    #[test]
    fn test_zone_settings_rejects_nan() {
        let mut draft = ZoneSettings::new(&zones());
        let err = draft.set("1", ZoneField::Max, f64::NAN).unwrap_err();
        assert!(err.is_validation_error());
    }
}
