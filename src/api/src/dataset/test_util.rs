//! Fixture tables shared by the dataset and route tests.

use std::fs;
use tempfile::TempDir;

use super::records::{DriverRecord, LapRecord, RaceRecord};
use super::store::{TableSources, TableStore};

pub fn race(race_id: i64, year: i32, round: i32, name: &str) -> RaceRecord {
    RaceRecord {
        race_id,
        year,
        round,
        name: name.to_string(),
        date: None,
    }
}

pub fn lap(race_id: i64, driver_id: i64, lap: u32, milliseconds: u64) -> LapRecord {
    LapRecord {
        race_id,
        driver_id,
        lap,
        milliseconds,
    }
}

pub fn driver(
    driver_id: i64,
    number: Option<&str>,
    code: Option<&str>,
    forename: &str,
    surname: &str,
) -> DriverRecord {
    DriverRecord {
        driver_id,
        number: number.map(str::to_string),
        code: code.map(str::to_string),
        forename: forename.to_string(),
        surname: surname.to_string(),
    }
}

/// In-memory equivalent of [`write_dataset`].
///
/// - 2021 round 5 (raceId 10): two laps, fastest is Hamilton's lap 30.
/// - 2021 round 6 (raceId 11): one lap each for Fangio and Hamilton.
/// - 1950 round 1 (raceId 833): no lap data.
pub fn sample_store() -> TableStore {
    TableStore::from_records(
        vec![
            race(10, 2021, 5, "Example GP"),
            race(11, 2021, 6, "Second GP"),
            race(833, 1950, 1, "British Grand Prix"),
        ],
        vec![
            lap(10, 1, 12, 91234),
            lap(10, 2, 30, 90999),
            lap(11, 3, 1, 100000),
            lap(11, 2, 1, 101000),
        ],
        vec![
            driver(1, Some("33"), Some("VER"), "Max", "Verstappen"),
            driver(2, Some("44"), Some("HAM"), "Lewis", "Hamilton"),
            driver(3, None, None, "Juan Manuel", "Fangio"),
        ],
    )
}

/// Write the [`sample_store`] tables as CSV files into `dir`.
pub fn write_dataset(dir: &TempDir) -> TableSources {
    let sources = TableSources::in_dir(dir.path());
    fs::write(
        &sources.races,
        "raceId,year,round,circuitId,name,date\n\
         10,2021,5,1,Example GP,2021-05-09\n\
         11,2021,6,2,Second GP,2021-05-23\n\
         833,1950,1,9,British Grand Prix,\\N\n",
    )
    .unwrap();
    fs::write(
        &sources.laps,
        "raceId,driverId,lap,position,time,milliseconds\n\
         10,1,12,2,1:31.234,91234\n\
         10,2,30,1,1:30.999,90999\n\
         11,3,1,1,1:40.000,100000\n\
         11,2,1,2,1:41.000,101000\n",
    )
    .unwrap();
    fs::write(
        &sources.drivers,
        "driverId,driverRef,number,code,forename,surname\n\
         1,max_verstappen,33,VER,Max,Verstappen\n\
         2,hamilton,44,HAM,Lewis,Hamilton\n\
         3,fangio,\\N,\\N,Juan Manuel,Fangio\n",
    )
    .unwrap();
    sources
}
