// Interactive question-and-answer session.
//
// Prompts run in a fixed order: team, opposition, toss, runs, overs,
// desired position. Each prompt repeats until its answer validates, then
// the scenario is solved and reported once.

use std::io::{BufRead, Write};

use thiserror::Error;
use tracing::{info, warn};

use nrr_core::{
    resolve_band, BandError, Feasibility, MatchInput, NrrBand, Overs, OversError, PointsTable,
    ScenarioEngine, ScenarioError, Team, Toss, TournamentFigures,
};

use crate::report::Report;

/// Acronyms listed as examples in the team prompts.
const PROMPT_EXAMPLE_TEAMS: usize = 5;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// A rejected answer. The prompt is asked again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("Invalid team acronym: {0}")]
    UnknownTeam(String),

    #[error("Opposition team cannot be the same as your team")]
    SameTeam,

    #[error("Invalid toss answer `{0}`: enter 'bat' or 'bowl'")]
    InvalidToss(String),

    #[error("Invalid runs `{0}`: expected a whole number of runs")]
    InvalidRuns(String),

    #[error("Invalid desired position `{0}`: expected a whole number")]
    InvalidRank(String),

    #[error("{0}")]
    Overs(#[from] OversError),

    #[error("Invalid desired position: {0}")]
    Band(#[from] BandError),
}

/// Ends the session without a result.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("input closed before the calculation was complete")]
    InputClosed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("calculation failed: {0}")]
    Computation(#[from] ScenarioError),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

pub struct Session<'a, R, W> {
    input: R,
    output: W,
    table: &'a PointsTable,
    engine: ScenarioEngine,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(input: R, output: W, table: &'a PointsTable, engine: ScenarioEngine) -> Self {
        Session {
            input,
            output,
            table,
            engine,
        }
    }

    /// Run one query end to end and write the report.
    pub fn run(&mut self) -> Result<Report, SessionError> {
        let table = self.table;
        let hint = table.acronym_hint(PROMPT_EXAMPLE_TEAMS);

        let my_team = self.ask(
            &format!("Enter your team acronym (e.g., {hint}): "),
            |answer| find_team(table, answer),
        )?;
        writeln!(self.output, "Your team is: {}", my_team.name)?;
        info!("Team selected: {} (rank {})", my_team.acronym, my_team.rank);

        let opposition = self.ask(
            &format!(
                "Enter opposition team acronym which should be different from your team (e.g., {hint}): "
            ),
            |answer| {
                let team = find_team(table, answer)?;
                if team.acronym == my_team.acronym {
                    return Err(InputError::SameTeam);
                }
                Ok(team)
            },
        )?;
        writeln!(self.output, "Your opposition team is: {}", opposition.name)?;
        info!("Opposition selected: {}", opposition.acronym);

        let toss = self.ask(
            "Did your team bat first or bowl first? (Enter 'bat' or 'bowl'): ",
            |answer| Toss::from_str_toss(answer).ok_or_else(|| InputError::InvalidToss(answer.into())),
        )?;
        info!("Toss: team chose to {}", toss);

        let figures = TournamentFigures::from(my_team);
        let report = match toss {
            Toss::Bat => {
                let batting = self.ask_innings(
                    "Enter runs scored by your team: ",
                    "Enter overs faced by your team (e.g., 14.0, 14.5): ",
                )?;
                let band = self.ask_band(my_team)?;
                let result = self
                    .engine
                    .solve_restriction_range(&figures, &batting, band)
                    .map_err(|e| self.computation_failed(e))?;
                let feasibility = self.engine.assess_restriction(&result);
                info!(
                    "Restriction range {}..={} runs, revised NRR {:.3}..{:.3}",
                    result.low_bound,
                    result.high_bound,
                    result.revised_nrr_low,
                    result.revised_nrr_high
                );
                Report::restriction(my_team, opposition, batting, result, feasibility)
            }
            Toss::Bowl => {
                let bowling = self.ask_innings(
                    "Enter runs conceded by your team: ",
                    "Enter overs bowled by your team (e.g., 14.0, 14.5): ",
                )?;
                let band = self.ask_band(my_team)?;
                let result = self
                    .engine
                    .solve_chase_range(&figures, &bowling, band)
                    .map_err(|e| self.computation_failed(e))?;
                let feasibility = self.engine.assess_chase(&result);
                info!(
                    "Chase window {:.3}..{:.3} overs, revised NRR {:.3}..{:.3}",
                    result.low_bound,
                    result.high_bound,
                    result.revised_nrr_low,
                    result.revised_nrr_high
                );
                Report::chase(my_team, opposition, bowling, result, feasibility)
            }
        };

        if let Feasibility::Unattainable(reason) = report.feasibility() {
            warn!("Requested position is out of reach: {}", reason);
        }

        for line in report.lines() {
            writeln!(self.output, "{line}")?;
        }
        self.output.flush()?;

        Ok(report)
    }

    fn ask_innings(
        &mut self,
        runs_prompt: &str,
        overs_prompt: &str,
    ) -> Result<MatchInput, SessionError> {
        let runs = self.ask(runs_prompt, parse_runs)?;
        let overs = self.ask(overs_prompt, |answer| {
            answer.parse::<Overs>().map_err(InputError::from)
        })?;
        Ok(MatchInput { runs, overs })
    }

    fn ask_band(&mut self, my_team: &Team) -> Result<NrrBand, SessionError> {
        let table = self.table;
        let band = self.ask("Enter the desired position for your team: ", |answer| {
            let desired: i64 = answer
                .parse()
                .map_err(|_| InputError::InvalidRank(answer.into()))?;
            Ok(resolve_band(desired, my_team, table)?)
        })?;
        info!("Target NRR band {:.3}..{:.3}", band.min, band.max);
        Ok(band)
    }

    /// Prompt until `parse` accepts the trimmed answer. Rejections are
    /// reported and the same prompt is shown again.
    fn ask<T>(
        &mut self,
        message: &str,
        mut parse: impl FnMut(&str) -> Result<T, InputError>,
    ) -> Result<T, SessionError> {
        loop {
            let answer = self.read_answer(message)?;
            match parse(answer.trim()) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Rejected answer {:?}: {}", answer.trim(), e);
                    writeln!(self.output, "{e}. Please try again.")?;
                }
            }
        }
    }

    /// Show `message` and read one answer line. Bytes that are not UTF-8
    /// become replacement characters and fail validation like any other
    /// bad answer.
    fn read_answer(&mut self, message: &str) -> Result<String, SessionError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&line).into_owned())
    }

    fn computation_failed(&mut self, error: ScenarioError) -> SessionError {
        warn!("Scenario could not be computed: {}", error);
        match writeln!(self.output, "Unable to compute a result: {error}.") {
            Ok(()) => SessionError::Computation(error),
            Err(io) => SessionError::Io(io),
        }
    }
}

// ---------------------------------------------------------------------------
// Answer parsing
// ---------------------------------------------------------------------------

fn find_team<'t>(table: &'t PointsTable, answer: &str) -> Result<&'t Team, InputError> {
    table
        .find_by_acronym(answer)
        .ok_or_else(|| InputError::UnknownTeam(answer.into()))
}

fn parse_runs(answer: &str) -> Result<u32, InputError> {
    answer
        .parse()
        .map_err(|_| InputError::InvalidRuns(answer.into()))
}
