//! Maps a (year, round) key, or a season, to race rows.

use super::error::DatasetError;
use super::records::RaceRecord;

/// Find the race for `year` and `round`.
///
/// Both fields must match exactly. If the table holds more than one match the
/// first in load order wins.
pub fn resolve_race(races: &[RaceRecord], year: i32, round: i32) -> Result<&RaceRecord, DatasetError> {
    races
        .iter()
        .find(|r| r.year == year && r.round == round)
        .ok_or(DatasetError::RaceNotFound { year, round })
}

/// All races of `year`, ordered by round. Equal rounds keep load order.
pub fn season_schedule(races: &[RaceRecord], year: i32) -> Result<Vec<&RaceRecord>, DatasetError> {
    let mut season: Vec<&RaceRecord> = races.iter().filter(|r| r.year == year).collect();
    if season.is_empty() {
        return Err(DatasetError::SeasonNotFound { year });
    }
    season.sort_by_key(|r| r.round);
    Ok(season)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_util::race;

    #[test]
    fn test_resolve_exact_match() {
        let races = vec![
            race(1, 2021, 4, "Fourth"),
            race(2, 2021, 5, "Fifth"),
            race(3, 2020, 5, "Other Season"),
        ];

        let found = resolve_race(&races, 2021, 5).unwrap();
        assert_eq!(found.race_id, 2);
    }

    #[test]
    fn test_resolve_missing_is_race_not_found() {
        let races = vec![race(1, 2021, 4, "Fourth")];

        let err = resolve_race(&races, 2021, 5).unwrap_err();
        assert!(matches!(err, DatasetError::RaceNotFound { year: 2021, round: 5 }));

        // year alone or round alone is not a match
        assert!(resolve_race(&races, 2020, 4).is_err());
        assert!(resolve_race(&races, 2021, 40).is_err());
    }

    #[test]
    fn test_resolve_duplicate_takes_first_row() {
        let races = vec![
            race(7, 2019, 3, "First Copy"),
            race(8, 2019, 3, "Second Copy"),
        ];

        for _ in 0..3 {
            assert_eq!(resolve_race(&races, 2019, 3).unwrap().race_id, 7);
        }
    }

    #[test]
    fn test_season_schedule_sorted_by_round() {
        let races = vec![
            race(3, 2021, 3, "Third"),
            race(1, 2021, 1, "First"),
            race(9, 2020, 1, "Last Year"),
            race(2, 2021, 2, "Second"),
        ];

        let schedule = season_schedule(&races, 2021).unwrap();
        let ids: Vec<i64> = schedule.iter().map(|r| r.race_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_season_schedule_unknown_year() {
        let races = vec![race(1, 2021, 1, "First")];
        assert!(matches!(
            season_schedule(&races, 1949),
            Err(DatasetError::SeasonNotFound { year: 1949 })
        ));
    }
}
