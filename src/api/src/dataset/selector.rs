//! Fastest-lap selection and the lap → driver join.

use super::error::{DatasetError, LAP_TIMING_COVERAGE_FROM};
use super::records::{DriverRecord, LapRecord, RaceRecord};
use super::store::TableStore;

/// Pick the minimum-time lap from `laps`.
///
/// Ties go to the first such lap in iteration order.
pub fn fastest_of<'a, I>(laps: I) -> Option<&'a LapRecord>
where
    I: IntoIterator<Item = &'a LapRecord>,
{
    // min_by_key keeps the first of equal minima
    laps.into_iter().min_by_key(|lap| lap.milliseconds)
}

/// The fastest lap of `race` across all drivers.
pub fn select_fastest_lap<'a>(
    store: &'a TableStore,
    race: &RaceRecord,
) -> Result<&'a LapRecord, DatasetError> {
    fastest_of(store.laps_for_race(race.race_id)).ok_or_else(|| no_lap_data(race))
}

/// Join a lap row to its driver.
pub fn resolve_driver<'a>(
    store: &'a TableStore,
    lap: &LapRecord,
) -> Result<&'a DriverRecord, DatasetError> {
    store
        .driver(lap.driver_id)
        .ok_or(DatasetError::DriverNotFound {
            race_id: lap.race_id,
            driver_id: lap.driver_id,
        })
}

pub(crate) fn no_lap_data(race: &RaceRecord) -> DatasetError {
    DatasetError::NoLapData {
        race_id: race.race_id,
        year: race.year,
        round: race.round,
        race_name: race.name.clone(),
        coverage_from: LAP_TIMING_COVERAGE_FROM,
    }
}
