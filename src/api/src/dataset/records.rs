//! Typed rows of the three reference tables.

use chrono::NaiveDate;

/// One race of a season (`races.csv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceRecord {
    pub race_id: i64,
    pub year: i32,
    pub round: i32,
    pub name: String,
    pub date: Option<NaiveDate>,
}

/// One driver's time for one lap of one race (`lap_times.csv`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LapRecord {
    pub race_id: i64,
    pub driver_id: i64,
    pub lap: u32,
    pub milliseconds: u64,
}

/// Driver reference row (`drivers.csv`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverRecord {
    pub driver_id: i64,
    /// Permanent number; absent for most drivers before 2014.
    pub number: Option<String>,
    /// Three-letter code; absent for many historical drivers.
    pub code: Option<String>,
    pub forename: String,
    pub surname: String,
}

impl DriverRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }
}
