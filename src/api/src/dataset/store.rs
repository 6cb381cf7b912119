//! Indexed, read-only store over the three reference tables.

use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::error::DatasetError;
use super::loader::{read_drivers, read_laps, read_races};
use super::records::{DriverRecord, LapRecord, RaceRecord};

/// Locations of the three backing CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSources {
    pub races: PathBuf,
    pub laps: PathBuf,
    pub drivers: PathBuf,
}

impl TableSources {
    /// Default file names of the public F1 dataset dump inside `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            races: dir.join("races.csv"),
            laps: dir.join("lap_times.csv"),
            drivers: dir.join("drivers.csv"),
        }
    }

    fn entries(&self) -> [(&'static str, &Path); 3] {
        [
            ("races", self.races.as_path()),
            ("lap_times", self.laps.as_path()),
            ("drivers", self.drivers.as_path()),
        ]
    }
}

/// The three tables plus the indexes the query path needs.
#[derive(Debug, Default)]
pub struct TableStore {
    races: Vec<RaceRecord>,
    laps: Vec<LapRecord>,
    drivers: HashMap<i64, DriverRecord>,
    /// Positions into `laps`, grouped by raceId, in load order.
    laps_by_race: HashMap<i64, Vec<usize>>,
}

impl TableStore {
    /// Build a store from already-typed rows.
    pub fn from_records(
        races: Vec<RaceRecord>,
        laps: Vec<LapRecord>,
        drivers: Vec<DriverRecord>,
    ) -> Self {
        let mut driver_index = HashMap::with_capacity(drivers.len());
        for driver in drivers {
            if driver_index.contains_key(&driver.driver_id) {
                tracing::warn!(
                    driver_id = driver.driver_id,
                    "Duplicate driverId in driver table, keeping the first row"
                );
                continue;
            }
            driver_index.insert(driver.driver_id, driver);
        }

        let mut laps_by_race: HashMap<i64, Vec<usize>> = HashMap::new();
        for (pos, lap) in laps.iter().enumerate() {
            laps_by_race.entry(lap.race_id).or_default().push(pos);
        }

        Self {
            races,
            laps,
            drivers: driver_index,
            laps_by_race,
        }
    }

    /// Races in load order.
    pub fn races(&self) -> &[RaceRecord] {
        &self.races
    }

    /// Lap rows for one race, in load order.
    pub fn laps_for_race(&self, race_id: i64) -> impl Iterator<Item = &LapRecord> + '_ {
        self.laps_by_race
            .get(&race_id)
            .into_iter()
            .flatten()
            .map(move |&pos| &self.laps[pos])
    }

    pub fn driver(&self, driver_id: i64) -> Option<&DriverRecord> {
        self.drivers.get(&driver_id)
    }

    pub fn race_count(&self) -> usize {
        self.races.len()
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    pub fn driver_count(&self) -> usize {
        self.drivers.len()
    }
}

/// Load all three tables, or none.
///
/// Every source is checked for presence before any of them is parsed, so a
/// missing file is reported without reading the others.
pub fn load_tables(sources: &TableSources) -> Result<TableStore, DatasetError> {
    for (table, path) in sources.entries() {
        if !path.is_file() {
            return Err(DatasetError::unavailable(table, path, "file not found"));
        }
    }

    let races = read_races(&sources.races)?;
    let laps = read_laps(&sources.laps)?;
    let drivers = read_drivers(&sources.drivers)?;

    let store = TableStore::from_records(races, laps, drivers);
    tracing::info!(
        races = store.race_count(),
        laps = store.lap_count(),
        drivers = store.driver_count(),
        "Dataset tables loaded"
    );

    Ok(store)
}
