//! CSV ingestion for the reference tables.
//!
//! Every column is read as a string. Integer parsing and the detection of
//! missing-value markers happen here, once, so the rest of the crate only
//! ever sees typed records with real `Option`s.

use chrono::NaiveDate;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader, StringChunked};
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use super::error::DatasetError;
use super::records::{DriverRecord, LapRecord, RaceRecord};

/// Cell values the dataset uses to mean "no value".
const MISSING_MARKERS: [&str; 6] = ["\\N", "nan", "NaN", "null", "NULL", "None"];

/// Returns the trimmed cell, or `None` for empty cells and missing markers.
pub fn present(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty() && !MISSING_MARKERS.contains(v))
}

/// A table file read into memory, all columns as strings.
struct CsvTable<'a> {
    name: &'static str,
    path: &'a Path,
    df: DataFrame,
}

impl<'a> CsvTable<'a> {
    fn read(name: &'static str, path: &'a Path) -> Result<Self, DatasetError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| DatasetError::unavailable(name, path, e))?;

        Ok(Self { name, path, df })
    }

    fn height(&self) -> usize {
        self.df.height()
    }

    fn column(&self, column: &str) -> Result<&StringChunked, DatasetError> {
        self.df
            .column(column)
            .and_then(|c| c.str())
            .map_err(|e| DatasetError::unavailable(self.name, self.path, format!("column `{column}`: {e}")))
    }

    fn optional_column(&self, column: &str) -> Option<&StringChunked> {
        self.df.column(column).ok().and_then(|c| c.str().ok())
    }

    fn bad_row(&self, column: &str, row: usize, detail: impl Display) -> DatasetError {
        DatasetError::unavailable(
            self.name,
            self.path,
            format!("row {}: column `{}` {}", row + 1, column, detail),
        )
    }

    fn text(&self, values: &StringChunked, column: &str, row: usize) -> Result<String, DatasetError> {
        present(values.get(row))
            .map(str::to_string)
            .ok_or_else(|| self.bad_row(column, row, "is missing"))
    }

    fn int<T>(&self, values: &StringChunked, column: &str, row: usize) -> Result<T, DatasetError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = present(values.get(row)).ok_or_else(|| self.bad_row(column, row, "is missing"))?;
        raw.parse::<T>()
            .map_err(|e| self.bad_row(column, row, format!("has invalid integer {raw:?}: {e}")))
    }
}

/// Read `races.csv`: raceId, year, round, name and an optional date.
pub fn read_races(path: &Path) -> Result<Vec<RaceRecord>, DatasetError> {
    let table = CsvTable::read("races", path)?;
    let race_ids = table.column("raceId")?;
    let years = table.column("year")?;
    let rounds = table.column("round")?;
    let names = table.column("name")?;
    let dates = table.optional_column("date");

    (0..table.height())
        .map(|i| {
            let date = match dates.and_then(|d| present(d.get(i))) {
                Some(raw) => Some(
                    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                        .map_err(|e| table.bad_row("date", i, format!("has invalid date {raw:?}: {e}")))?,
                ),
                None => None,
            };

            Ok(RaceRecord {
                race_id: table.int(race_ids, "raceId", i)?,
                year: table.int(years, "year", i)?,
                round: table.int(rounds, "round", i)?,
                name: table.text(names, "name", i)?,
                date,
            })
        })
        .collect()
}

/// Read `lap_times.csv`: raceId, driverId, lap, milliseconds.
pub fn read_laps(path: &Path) -> Result<Vec<LapRecord>, DatasetError> {
    let table = CsvTable::read("lap_times", path)?;
    let race_ids = table.column("raceId")?;
    let driver_ids = table.column("driverId")?;
    let laps = table.column("lap")?;
    let millis = table.column("milliseconds")?;

    (0..table.height())
        .map(|i| {
            let lap: u32 = table.int(laps, "lap", i)?;
            if lap == 0 {
                return Err(table.bad_row("lap", i, "must be >= 1"));
            }
            let milliseconds: u64 = table.int(millis, "milliseconds", i)?;
            if milliseconds == 0 {
                return Err(table.bad_row("milliseconds", i, "must be > 0"));
            }

            Ok(LapRecord {
                race_id: table.int(race_ids, "raceId", i)?,
                driver_id: table.int(driver_ids, "driverId", i)?,
                lap,
                milliseconds,
            })
        })
        .collect()
}

/// Read `drivers.csv`: driverId, number?, code?, forename, surname.
pub fn read_drivers(path: &Path) -> Result<Vec<DriverRecord>, DatasetError> {
    let table = CsvTable::read("drivers", path)?;
    let driver_ids = table.column("driverId")?;
    let numbers = table.column("number")?;
    let codes = table.column("code")?;
    let forenames = table.column("forename")?;
    let surnames = table.column("surname")?;

    (0..table.height())
        .map(|i| {
            Ok(DriverRecord {
                driver_id: table.int(driver_ids, "driverId", i)?,
                number: present(numbers.get(i)).map(str::to_string),
                code: present(codes.get(i)).map(str::to_string),
                forename: table.text(forenames, "forename", i)?,
                surname: table.text(surnames, "surname", i)?,
            })
        })
        .collect()
}
