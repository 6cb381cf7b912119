//! Output records built from joined rows.

use serde::Serialize;

use super::format::format_ms;
use super::records::{DriverRecord, LapRecord, RaceRecord};

/// Lap time with its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LapSummary {
    pub time_ms: u64,
    pub time_display: String,
    pub lap_number: u32,
}

impl From<&LapRecord> for LapSummary {
    fn from(lap: &LapRecord) -> Self {
        Self {
            time_ms: lap.milliseconds,
            time_display: format_ms(lap.milliseconds),
            lap_number: lap.lap,
        }
    }
}

/// Driver identity as exposed to callers.
///
/// `number` and `code` serialize as `null` when the source row had no value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverSummary {
    pub driver_id: i64,
    pub number: Option<String>,
    pub code: Option<String>,
    pub full_name: String,
}

impl From<&DriverRecord> for DriverSummary {
    fn from(driver: &DriverRecord) -> Self {
        Self {
            driver_id: driver.driver_id,
            number: driver.number.clone(),
            code: driver.code.clone(),
            full_name: driver.full_name(),
        }
    }
}

/// Fastest lap of one race.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FastestLapResult {
    pub year: i32,
    pub round: i32,
    pub race_id: i64,
    pub race_name: String,
    pub lap: LapSummary,
    pub driver: DriverSummary,
}

pub fn assemble(race: &RaceRecord, lap: &LapRecord, driver: &DriverRecord) -> FastestLapResult {
    FastestLapResult {
        year: race.year,
        round: race.round,
        race_id: race.race_id,
        race_name: race.name.clone(),
        lap: LapSummary::from(lap),
        driver: DriverSummary::from(driver),
    }
}
