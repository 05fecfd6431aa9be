// Back-solving match targets from a target NRR band.
//
// Batting first, the team's run rate for the match is known and the engine
// solves for how many runs the opposition may score. Bowling first, the
// opposition total is known and the engine solves for how quickly the team
// must chase it down.

use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::band::NrrBand;
use crate::overs::Overs;
use crate::team::Team;

/// Overs credited to the bowling side for a full innings. Also used as the
/// overs the opposition is assumed to bat when the team bats first.
pub const FULL_INNINGS_OVERS: u32 = 20;

/// Values this close to an integer are treated as that integer before
/// flooring or ceiling, so 724.9999999 does not cost a run.
const INTEGER_SNAP_TOLERANCE: f64 = 1e-9;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Which innings the team played first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toss {
    Bat,
    Bowl,
}

impl Toss {
    /// Parse `bat` / `bowl`, ignoring case and surrounding whitespace.
    pub fn from_str_toss(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "bat" => Some(Toss::Bat),
            "bowl" => Some(Toss::Bowl),
            _ => None,
        }
    }

    pub fn display_str(&self) -> &'static str {
        match self {
            Toss::Bat => "bat",
            Toss::Bowl => "bowl",
        }
    }
}

impl fmt::Display for Toss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A team's cumulative tournament figures with overs in decimal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TournamentFigures {
    pub runs_scored: u32,
    pub overs_faced: f64,
    pub runs_conceded: u32,
    pub overs_bowled: f64,
}

impl From<&Team> for TournamentFigures {
    fn from(team: &Team) -> Self {
        TournamentFigures {
            runs_scored: team.runs_scored,
            overs_faced: team.overs_faced.to_decimal(),
            runs_conceded: team.runs_conceded,
            overs_bowled: team.overs_bowled.to_decimal(),
        }
    }
}

/// Runs and overs for the innings the user supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchInput {
    pub runs: u32,
    pub overs: Overs,
}

/// A solved range and the NRR interval it produces.
///
/// `revised_nrr_low` is the NRR at the least favourable end of the range
/// and `revised_nrr_high` at the most favourable end. Both are rounded to
/// three decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioResult<B> {
    pub low_bound: B,
    pub high_bound: B,
    pub revised_nrr_low: f64,
    pub revised_nrr_high: f64,
}

/// Runs the opposition may score, inclusive.
pub type RestrictionResult = ScenarioResult<i64>;

impl RestrictionResult {
    /// True when no whole-run total lands strictly inside the band, so only
    /// the upper limit on runs conceded matters.
    pub fn is_ceiling_only(&self) -> bool {
        self.low_bound > self.high_bound
    }
}

/// Decimal overs within which the chase must finish.
pub type ChaseResult = ScenarioResult<f64>;

/// Whether a solved range is achievable on the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feasibility {
    Attainable,
    Unattainable(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScenarioError {
    #[error("{quantity} is zero, so the rate cannot be computed")]
    ZeroDenominator { quantity: &'static str },

    #[error("{quantity} is not a finite number")]
    NonFinite { quantity: &'static str },
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Solves the batting-first and bowling-first scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioEngine {
    full_innings_overs: u32,
}

impl Default for ScenarioEngine {
    fn default() -> Self {
        ScenarioEngine::new(FULL_INNINGS_OVERS)
    }
}

impl ScenarioEngine {
    pub fn new(full_innings_overs: u32) -> Self {
        ScenarioEngine { full_innings_overs }
    }

    /// Team batted first and scored `batting.runs` in `batting.overs`.
    ///
    /// Returns the inclusive range of runs the opposition must be held to
    /// for the team's NRR to land in `band`. The opposition is assumed to
    /// bat the full allowance of overs.
    pub fn solve_restriction_range(
        &self,
        figures: &TournamentFigures,
        batting: &MatchInput,
        band: NrrBand,
    ) -> Result<RestrictionResult, ScenarioError> {
        let t1 = post_match_run_rate(figures, batting)?;
        let overs_bowled = figures.overs_bowled + f64::from(self.full_innings_overs);
        let conceded = f64::from(figures.runs_conceded);
        debug!(run_rate = t1, overs_bowled, "solving restriction range");

        let max_runs = to_whole(
            snap_to_integer((t1 - band.min) * overs_bowled - conceded).floor(),
            "maximum runs conceded",
        )?;
        let min_runs = to_whole(
            snap_to_integer((t1 - band.max) * overs_bowled - conceded).ceil(),
            "minimum runs conceded",
        )?;

        let revised_at = |runs: i64| {
            checked_div(conceded + runs as f64, overs_bowled, "total overs bowled")
                .map(|economy| round3(t1 - economy))
        };

        // A narrow band can fall between two whole-run totals. Conceding
        // `max_runs` or fewer still clears `band.min`.
        let best_case = min_runs.min(max_runs);

        Ok(ScenarioResult {
            low_bound: min_runs,
            high_bound: max_runs,
            revised_nrr_low: finite(revised_at(max_runs)?, "revised NRR")?,
            revised_nrr_high: finite(revised_at(best_case)?, "revised NRR")?,
        })
    }

    /// Team bowled first and conceded `bowling.runs` in `bowling.overs`.
    ///
    /// Returns the window of decimal overs in which the team must chase
    /// down the target for its NRR to land in `band`.
    pub fn solve_chase_range(
        &self,
        figures: &TournamentFigures,
        bowling: &MatchInput,
        band: NrrBand,
    ) -> Result<ChaseResult, ScenarioError> {
        let t2 = post_match_economy(figures, bowling)?;
        let target = f64::from(chase_target(figures, bowling));
        debug!(economy = t2, target, "solving chase range");

        let overs_max = checked_div(target, band.min + t2, "the lower NRR bound plus economy")?
            - figures.overs_faced;
        let overs_min = checked_div(target, band.max + t2, "the upper NRR bound plus economy")?
            - figures.overs_faced;

        let revised_at = |overs: f64| {
            checked_div(target, figures.overs_faced + overs, "total overs faced")
                .map(|rate| round3(rate - t2))
        };

        Ok(ScenarioResult {
            low_bound: finite(overs_min, "minimum chase overs")?,
            high_bound: finite(overs_max, "maximum chase overs")?,
            revised_nrr_low: finite(revised_at(overs_max)?, "revised NRR")?,
            revised_nrr_high: finite(revised_at(overs_min)?, "revised NRR")?,
        })
    }

    /// A restriction is out of reach only when even a total of zero is too
    /// many. An empty run range still reaches the position by conceding at
    /// most `high_bound`.
    pub fn assess_restriction(&self, result: &RestrictionResult) -> Feasibility {
        if result.high_bound < 0 {
            Feasibility::Unattainable(
                "the opposition would have to score fewer than zero runs".into(),
            )
        } else {
            Feasibility::Attainable
        }
    }

    /// A chase is out of reach when the slowest acceptable finish is at or
    /// before the first ball.
    pub fn assess_chase(&self, result: &ChaseResult) -> Feasibility {
        if result.high_bound <= 0.0 {
            Feasibility::Unattainable(
                "the target would have to be reached before a ball is bowled".into(),
            )
        } else {
            Feasibility::Attainable
        }
    }
}

// ---------------------------------------------------------------------------
// Rate helpers
// ---------------------------------------------------------------------------

/// Run rate over the tournament including the match innings (T1).
pub fn post_match_run_rate(
    figures: &TournamentFigures,
    batting: &MatchInput,
) -> Result<f64, ScenarioError> {
    checked_div(
        f64::from(figures.runs_scored) + f64::from(batting.runs),
        figures.overs_faced + batting.overs.to_decimal(),
        "overs faced",
    )
}

/// Runs conceded per over including the match innings (T2).
pub fn post_match_economy(
    figures: &TournamentFigures,
    bowling: &MatchInput,
) -> Result<f64, ScenarioError> {
    checked_div(
        f64::from(figures.runs_conceded) + f64::from(bowling.runs),
        figures.overs_bowled + bowling.overs.to_decimal(),
        "overs bowled",
    )
}

/// The aggregate the team must reach when chasing: tournament runs scored
/// plus one more than the opposition's total.
pub fn chase_target(figures: &TournamentFigures, bowling: &MatchInput) -> u32 {
    figures
        .runs_scored
        .saturating_add(bowling.runs)
        .saturating_add(1)
}

fn checked_div(numerator: f64, denominator: f64, quantity: &'static str) -> Result<f64, ScenarioError> {
    if denominator == 0.0 {
        return Err(ScenarioError::ZeroDenominator { quantity });
    }
    finite(numerator / denominator, quantity)
}

fn finite(value: f64, quantity: &'static str) -> Result<f64, ScenarioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScenarioError::NonFinite { quantity })
    }
}

fn to_whole(value: f64, quantity: &'static str) -> Result<i64, ScenarioError> {
    let value = finite(value, quantity)?;
    if value.abs() > i64::MAX as f64 {
        return Err(ScenarioError::NonFinite { quantity });
    }
    Ok(value as i64)
}

fn snap_to_integer(value: f64) -> f64 {
    let nearest = value.round();
    if (value - nearest).abs() < INTEGER_SNAP_TOLERANCE {
        nearest
    } else {
        value
    }
}

/// Three-decimal rounding. Adding zero turns `-0.0` into `0.0`.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0 + 0.0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
