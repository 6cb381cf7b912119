//! Classified errors for dataset queries.

use std::path::PathBuf;

/// Earliest season for which the historical dataset carries lap-level timing.
pub const LAP_TIMING_COVERAGE_FROM: i32 = 1996;

/// Errors raised while loading the reference tables or resolving a query.
///
/// Every variant is terminal for the query that produced it. Callers map
/// them to transport-specific codes via [`DatasetError::kind`].
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("{table} table unavailable ({}): {reason}", .path.display())]
    DatasetUnavailable {
        table: &'static str,
        path: PathBuf,
        reason: String,
    },

    #[error("No race found for {year} round {round}")]
    RaceNotFound { year: i32, round: i32 },

    #[error("No races found for the {year} season")]
    SeasonNotFound { year: i32 },

    #[error(
        "No lap timing data for {year} round {round} ({race_name}, raceId {race_id}). \
         The historical dataset only has sparse lap-level coverage, with lap times \
         recorded from the {coverage_from} season onward."
    )]
    NoLapData {
        race_id: i64,
        year: i32,
        round: i32,
        race_name: String,
        coverage_from: i32,
    },

    #[error("Lap data for raceId {race_id} references driverId {driver_id}, which is missing from the driver table")]
    DriverNotFound { race_id: i64, driver_id: i64 },
}

impl DatasetError {
    pub(crate) fn unavailable(
        table: &'static str,
        path: impl Into<PathBuf>,
        reason: impl ToString,
    ) -> Self {
        DatasetError::DatasetUnavailable {
            table,
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable snake_case tag for this error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DatasetError::DatasetUnavailable { .. } => "dataset_unavailable",
            DatasetError::RaceNotFound { .. } => "race_not_found",
            DatasetError::SeasonNotFound { .. } => "season_not_found",
            DatasetError::NoLapData { .. } => "no_lap_data",
            DatasetError::DriverNotFound { .. } => "driver_not_found",
        }
    }
}
