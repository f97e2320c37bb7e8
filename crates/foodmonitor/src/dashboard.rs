//! The dashboard state and the operations that change it.
//!
//! [`Collections`] holds the four record lists and applies mutations in
//! memory. [`Dashboard`] owns a `Collections` together with the store and
//! writes back exactly the collection a mutation touched, after the change.

use std::fmt;

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::forms::{DietForm, FoodForm, NewDietEntry, NewFoodItem, ZoneSettings};
use crate::metrics::{DashboardMetrics, Thresholds};
use crate::model::{
    fresh_id, hygiene, remove_by_id, DietEntry, FoodItem, HygieneTask, Record, TemperatureZone,
};
use crate::storage::Storage;

/// Short confirmation shown after a successful change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A food item was added.
    FoodAdded,
    /// A food item was removed.
    FoodRemoved,
    /// A diet entry was added.
    DietAdded,
    /// A diet entry was deleted.
    DietDeleted,
    /// The zone settings were saved.
    ZonesUpdated,
}

impl Notice {
    /// The message text.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::FoodAdded => "Food item added successfully!",
            Self::FoodRemoved => "Food item removed!",
            Self::DietAdded => "Diet entry added!",
            Self::DietDeleted => "Diet entry deleted!",
            Self::ZonesUpdated => "Temperature settings updated!",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// The four record collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collections {
    /// Inventory, oldest first.
    pub food_items: Vec<FoodItem>,
    /// Monitored zones.
    pub temperature_zones: Vec<TemperatureZone>,
    /// Checklist tasks.
    pub hygiene_tasks: Vec<HygieneTask>,
    /// Diet log, newest first.
    pub diet_entries: Vec<DietEntry>,
}

impl Collections {
    /// The first-run contents.
    #[must_use]
    pub fn seed(now: DateTime<Utc>) -> Self {
        Self {
            food_items: FoodItem::seed(now),
            temperature_zones: TemperatureZone::seed(now),
            hygiene_tasks: HygieneTask::seed(now),
            diet_entries: DietEntry::seed(now),
        }
    }

    /// Append a food item with a fresh id.
    pub fn add_food(&mut self, item: NewFoodItem, now: DateTime<Utc>) -> &FoodItem {
        let id = fresh_id(&self.food_items, now);
        let index = self.food_items.len();
        self.food_items.push(item.into_item(id));
        &self.food_items[index]
    }

    /// Remove a food item by id.
    pub fn remove_food(&mut self, id: &str) -> Option<FoodItem> {
        remove_by_id(&mut self.food_items, id)
    }

    /// Flip one task's completion; `None` if the id is unknown.
    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        hygiene::toggle(&mut self.hygiene_tasks, id)
    }

    /// Put a diet entry stamped with `now` at the front of the log.
    pub fn add_diet(&mut self, entry: NewDietEntry, now: DateTime<Utc>) -> &DietEntry {
        let id = fresh_id(&self.diet_entries, now);
        self.diet_entries.insert(0, entry.into_entry(id, now));
        &self.diet_entries[0]
    }

    /// Remove a diet entry by id.
    pub fn remove_diet(&mut self, id: &str) -> Option<DietEntry> {
        remove_by_id(&mut self.diet_entries, id)
    }

    /// Swap in a complete zone list.
    pub fn replace_zones(&mut self, zones: Vec<TemperatureZone>) {
        self.temperature_zones = zones;
    }

    /// Headline figures for this snapshot.
    #[must_use]
    pub fn metrics<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        thresholds: &Thresholds,
    ) -> DashboardMetrics {
        DashboardMetrics::compute(
            &self.food_items,
            &self.temperature_zones,
            &self.hygiene_tasks,
            &self.diet_entries,
            now,
            thresholds,
        )
    }
}

/// Live dashboard backed by a store.
#[derive(Debug)]
pub struct Dashboard {
    collections: Collections,
    storage: Storage,
    thresholds: Thresholds,
}

impl Dashboard {
    /// Open the configured database and load every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or a stored
    /// collection cannot be decoded.
    pub fn open(config: &Config, now: DateTime<Utc>) -> Result<Self> {
        let storage = Storage::open(config.database_path())?;
        Self::new(storage, config.thresholds(), now)
    }

    /// Load every collection from `storage`, seeding the ones never saved.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or seeding fails.
    pub fn new(storage: Storage, thresholds: Thresholds, now: DateTime<Utc>) -> Result<Self> {
        let now = now.trunc_subsecs(3);
        let collections = Collections {
            food_items: storage.load_or_seed(now)?,
            temperature_zones: storage.load_or_seed(now)?,
            hygiene_tasks: storage.load_or_seed(now)?,
            diet_entries: storage.load_or_seed(now)?,
        };
        debug!(
            "Loaded {} food items, {} zones, {} tasks, {} diet entries",
            collections.food_items.len(),
            collections.temperature_zones.len(),
            collections.hygiene_tasks.len(),
            collections.diet_entries.len()
        );
        Ok(Self {
            collections,
            storage,
            thresholds,
        })
    }

    /// Current in-memory state.
    #[must_use]
    pub fn collections(&self) -> &Collections {
        &self.collections
    }

    /// Thresholds in effect.
    #[must_use]
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The backing store.
    #[must_use]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Submit the food form and persist the inventory.
    ///
    /// # Errors
    ///
    /// Returns a validation error or a storage error. In both cases the form
    /// keeps its contents and the inventory is unchanged.
    pub fn add_food(&mut self, form: &mut FoodForm, now: DateTime<Utc>) -> Result<Notice> {
        let item = form.validate()?;
        let name = item.name.clone();
        let id = self.collections.add_food(item, now.trunc_subsecs(3)).id.clone();
        if let Err(e) = self.storage.save(&self.collections.food_items) {
            self.collections.remove_food(&id);
            return Err(e);
        }
        info!("Added food item {id} ({name})");
        form.reset();
        Ok(Notice::FoodAdded)
    }

    /// Remove a food item. An unknown id changes nothing and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn remove_food(&mut self, id: &str) -> Result<Option<Notice>> {
        let Some(removed) = self.collections.remove_food(id) else {
            debug!("No {} with id {id}", FoodItem::NAME);
            return Ok(None);
        };
        info!("Removed food item {} ({})", removed.id, removed.name);
        self.storage.save(&self.collections.food_items)?;
        Ok(Some(Notice::FoodRemoved))
    }

    /// Toggle a checklist task and return its new state.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn toggle_task(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(completed) = self.collections.toggle_task(id) else {
            debug!("No {} with id {id}", HygieneTask::NAME);
            return Ok(None);
        };
        info!("Hygiene task {id} completed: {completed}");
        self.storage.save(&self.collections.hygiene_tasks)?;
        Ok(Some(completed))
    }

    /// Submit the diet form and persist the log.
    ///
    /// # Errors
    ///
    /// Returns a validation error or a storage error. In both cases the form
    /// keeps its contents and the log is unchanged.
    pub fn add_diet(&mut self, form: &mut DietForm, now: DateTime<Utc>) -> Result<Notice> {
        let entry = form.validate()?;
        let food_name = entry.food_name.clone();
        let id = self.collections.add_diet(entry, now.trunc_subsecs(3)).id.clone();
        if let Err(e) = self.storage.save(&self.collections.diet_entries) {
            self.collections.remove_diet(&id);
            return Err(e);
        }
        info!("Added diet entry {id} ({food_name})");
        form.reset();
        Ok(Notice::DietAdded)
    }

    /// Delete a diet entry. An unknown id changes nothing and returns `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn remove_diet(&mut self, id: &str) -> Result<Option<Notice>> {
        let Some(removed) = self.collections.remove_diet(id) else {
            debug!("No {} with id {id}", DietEntry::NAME);
            return Ok(None);
        };
        info!("Deleted diet entry {} ({})", removed.id, removed.food_name);
        self.storage.save(&self.collections.diet_entries)?;
        Ok(Some(Notice::DietDeleted))
    }

    /// Start editing the zones.
    #[must_use]
    pub fn edit_zones(&self) -> ZoneSettings {
        ZoneSettings::new(&self.collections.temperature_zones)
    }

    /// Replace the zones with an edited draft and persist them.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails.
    pub fn save_zones(&mut self, settings: ZoneSettings) -> Result<Notice> {
        self.collections.replace_zones(settings.into_zones());
        info!(
            "Saved {} temperature zones",
            self.collections.temperature_zones.len()
        );
        self.storage.save(&self.collections.temperature_zones)?;
        Ok(Notice::ZonesUpdated)
    }

    /// Headline figures as of `now`.
    #[must_use]
    pub fn metrics<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> DashboardMetrics {
        self.collections.metrics(now, &self.thresholds)
    }

    /// Drop every stored collection and return to the seed contents.
    ///
    /// The seeds are not written; the next load writes them.
    ///
    /// # Errors
    ///
    /// Returns an error if clearing the store fails.
    pub fn reset(&mut self, now: DateTime<Utc>) -> Result<usize> {
        let removed = self.storage.clear()?;
        self.collections = Collections::seed(now.trunc_subsecs(3));
        Ok(removed)
    }
}
