// Target NRR band for a desired finishing position.

use crate::team::{PointsTable, Team};
use thiserror::Error;

/// The NRR interval a team must land in to reach (or better) a position.
///
/// `min` is the NRR of the team currently holding the desired position and
/// `max` that of the team directly above it. At position 1 there is no team
/// above, so the band collapses to a single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NrrBand {
    pub min: f64,
    pub max: f64,
}

impl NrrBand {
    pub fn new(min: f64, max: f64) -> Self {
        NrrBand { min, max }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandError {
    #[error("desired position must be 1 or higher, got {desired}")]
    NotPositive { desired: i64 },

    #[error("desired position {desired} is below the current position {current}")]
    BelowCurrentRank { desired: i64, current: u32 },

    #[error("desired position {desired} is outside the {len}-team table")]
    BeyondTable { desired: i64, len: usize },
}

/// Resolve the NRR band for `desired_rank`.
///
/// Valid ranks run from 1 up to `my_team.rank` (staying put is allowed) and
/// may not exceed the table length.
pub fn resolve_band(
    desired_rank: i64,
    my_team: &Team,
    table: &PointsTable,
) -> Result<NrrBand, BandError> {
    if desired_rank <= 0 {
        return Err(BandError::NotPositive {
            desired: desired_rank,
        });
    }
    if desired_rank > i64::from(my_team.rank) {
        return Err(BandError::BelowCurrentRank {
            desired: desired_rank,
            current: my_team.rank,
        });
    }
    let beyond = || BandError::BeyondTable {
        desired: desired_rank,
        len: table.len(),
    };
    let rank = u32::try_from(desired_rank).map_err(|_| beyond())?;
    let holder = table.team_at_rank(rank).ok_or_else(beyond)?;

    let nrr_min = holder.nrr;
    let nrr_max = match table.team_at_rank(rank - 1) {
        Some(above) => above.nrr,
        None => nrr_min,
    };

    Ok(NrrBand::new(nrr_min, nrr_max))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overs::Overs;

    fn team(acronym: &str, rank: u32, nrr: f64) -> Team {
        Team {
            name: acronym.to_string(),
            acronym: acronym.to_string(),
            rank,
            runs_scored: 1000,
            overs_faced: Overs::complete(100),
            runs_conceded: 1000,
            overs_bowled: Overs::complete(100),
            nrr,
        }
    }

    fn table() -> PointsTable {
        PointsTable::new(vec![
            team("AAA", 1, 1.25),
            team("BBB", 2, 0.7),
            team("CCC", 3, 0.5),
            team("DDD", 4, -0.1),
        ])
        .unwrap()
    }

    #[test]
    fn band_spans_holder_and_team_above() {
        let table = table();
        let me = table.find_by_acronym("DDD").unwrap();
        let band = resolve_band(3, me, &table).unwrap();
        assert_eq!(band, NrrBand::new(0.5, 0.7));
    }

    #[test]
    fn rank_one_collapses_band() {
        let table = table();
        let me = table.find_by_acronym("CCC").unwrap();
        let band = resolve_band(1, me, &table).unwrap();
        assert_eq!(band.min, 1.25);
        assert_eq!(band.max, band.min);
    }

    #[test]
    fn staying_at_current_rank_is_valid() {
        let table = table();
        let me = table.find_by_acronym("CCC").unwrap();
        let band = resolve_band(3, me, &table).unwrap();
        assert_eq!(band, NrrBand::new(0.5, 0.7));
    }

    #[test]
    fn zero_nrr_above_is_not_treated_as_missing() {
        let table = PointsTable::new(vec![team("AAA", 1, 0.0), team("BBB", 2, -0.4)]).unwrap();
        let me = table.find_by_acronym("BBB").unwrap();
        let band = resolve_band(2, me, &table).unwrap();
        assert_eq!(band, NrrBand::new(-0.4, 0.0));
    }

    #[test]
    fn rejects_zero_and_negative() {
        let table = table();
        let me = table.find_by_acronym("DDD").unwrap();
        assert_eq!(
            resolve_band(0, me, &table),
            Err(BandError::NotPositive { desired: 0 })
        );
        assert_eq!(
            resolve_band(-2, me, &table),
            Err(BandError::NotPositive { desired: -2 })
        );
    }

    #[test]
    fn rejects_position_below_current() {
        let table = table();
        let me = table.find_by_acronym("BBB").unwrap();
        assert_eq!(
            resolve_band(3, me, &table),
            Err(BandError::BelowCurrentRank {
                desired: 3,
                current: 2
            })
        );
    }

    #[test]
    fn rejects_position_beyond_table() {
        // A team record whose rank exceeds the table it is checked against.
        let table = PointsTable::new(vec![team("AAA", 1, 1.0), team("BBB", 2, 0.5)]).unwrap();
        let outsider = team("ZZZ", 5, -1.0);
        assert_eq!(
            resolve_band(4, &outsider, &table),
            Err(BandError::BeyondTable { desired: 4, len: 2 })
        );
    }
}
