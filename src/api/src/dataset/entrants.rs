//! Per-race entrant listing and season schedule records.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use super::assemble::{DriverSummary, LapSummary};
use super::error::DatasetError;
use super::records::{LapRecord, RaceRecord};
use super::selector::{no_lap_data, resolve_driver};
use super::store::TableStore;

/// One race in a season schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleEntry {
    pub race_id: i64,
    pub round: i32,
    pub name: String,
    pub date: Option<NaiveDate>,
}

impl From<&RaceRecord> for ScheduleEntry {
    fn from(race: &RaceRecord) -> Self {
        Self {
            race_id: race.race_id,
            round: race.round,
            name: race.name.clone(),
            date: race.date,
        }
    }
}

/// Races of one season, ordered by round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonSchedule {
    pub year: i32,
    pub races: Vec<ScheduleEntry>,
}

/// A driver who recorded at least one lap in a race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entrant {
    pub driver: DriverSummary,
    /// Highest lap number recorded for the driver.
    pub laps_completed: u32,
    pub best_lap: LapSummary,
}

/// Entrant listing of one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RaceEntrants {
    pub year: i32,
    pub round: i32,
    pub race_id: i64,
    pub race_name: String,
    pub entrants: Vec<Entrant>,
}

/// Drivers with lap data in `race`, in order of first appearance.
pub fn race_entrants(store: &TableStore, race: &RaceRecord) -> Result<Vec<Entrant>, DatasetError> {
    // highest lap number and fastest lap per driver
    let mut order: Vec<i64> = Vec::new();
    let mut per_driver: HashMap<i64, (u32, &LapRecord)> = HashMap::new();

    for lap in store.laps_for_race(race.race_id) {
        match per_driver.get_mut(&lap.driver_id) {
            Some((highest, best)) => {
                *highest = (*highest).max(lap.lap);
                if lap.milliseconds < best.milliseconds {
                    *best = lap;
                }
            }
            None => {
                order.push(lap.driver_id);
                per_driver.insert(lap.driver_id, (lap.lap, lap));
            }
        }
    }

    if order.is_empty() {
        return Err(no_lap_data(race));
    }

    order
        .into_iter()
        .map(|driver_id| {
            let (laps_completed, best) = per_driver[&driver_id];
            let driver = resolve_driver(store, best)?;
            Ok(Entrant {
                driver: DriverSummary::from(driver),
                laps_completed,
                best_lap: LapSummary::from(best),
            })
        })
        .collect()
}
