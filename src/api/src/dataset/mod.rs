//! Historical F1 dataset resolution
//!
//! Answers race queries from three static reference tables:
//! - races: one row per race, keyed by raceId and (year, round)
//! - lap_times: one row per driver per lap
//! - drivers: driver reference data
//!
//! Queries either yield a fully populated record or exactly one
//! [`DatasetError`].

pub mod assemble;
pub mod entrants;
pub mod error;
pub mod format;
pub mod loader;
pub mod records;
pub mod resolver;
pub mod selector;
pub mod store;

#[cfg(test)]
pub(crate) mod test_util;

use std::sync::Arc;

pub use assemble::{assemble, FastestLapResult};
pub use entrants::{race_entrants, RaceEntrants, ScheduleEntry, SeasonSchedule};
pub use error::DatasetError;
pub use resolver::{resolve_race, season_schedule};
pub use selector::{resolve_driver, select_fastest_lap};
pub use store::{load_tables, TableSources, TableStore};

/// Fastest lap of the race identified by `year` and `round`.
pub fn fastest_lap(store: &TableStore, year: i32, round: i32) -> Result<FastestLapResult, DatasetError> {
    let race = resolve_race(store.races(), year, round)?;
    let lap = select_fastest_lap(store, race)?;
    let driver = resolve_driver(store, lap)?;
    tracing::debug!(
        race_id = race.race_id,
        driver_id = driver.driver_id,
        milliseconds = lap.milliseconds,
        "Resolved fastest lap"
    );
    Ok(assemble(race, lap, driver))
}

/// Season schedule for `year`.
pub fn schedule(store: &TableStore, year: i32) -> Result<SeasonSchedule, DatasetError> {
    let races = season_schedule(store.races(), year)?
        .into_iter()
        .map(ScheduleEntry::from)
        .collect();
    Ok(SeasonSchedule { year, races })
}

/// Entrants of the race identified by `year` and `round`.
pub fn entrants(store: &TableStore, year: i32, round: i32) -> Result<RaceEntrants, DatasetError> {
    let race = resolve_race(store.races(), year, round)?;
    Ok(RaceEntrants {
        year,
        round,
        race_id: race.race_id,
        race_name: race.name.clone(),
        entrants: race_entrants(store, race)?,
    })
}

/// Access to the reference tables for a query.
#[derive(Debug, Clone)]
pub enum DatasetHandle {
    /// Loaded once at startup and shared read-only.
    Preloaded {
        sources: TableSources,
        store: Arc<TableStore>,
    },
    /// Loaded again for every query.
    PerRequest { sources: TableSources },
}

impl DatasetHandle {
    pub fn preload(sources: TableSources) -> Result<Self, DatasetError> {
        let store = load_tables(&sources)?;
        Ok(Self::Preloaded {
            sources,
            store: Arc::new(store),
        })
    }

    pub fn sources(&self) -> &TableSources {
        match self {
            Self::Preloaded { sources, .. } | Self::PerRequest { sources } => sources,
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Self::Preloaded { .. } => "preloaded",
            Self::PerRequest { .. } => "per_request",
        }
    }

    /// Tables for one query. Blocks on file I/O in per-request mode.
    pub fn tables(&self) -> Result<Arc<TableStore>, DatasetError> {
        match self {
            Self::Preloaded { store, .. } => Ok(Arc::clone(store)),
            Self::PerRequest { sources } => load_tables(sources).map(Arc::new),
        }
    }
}
