// Team records and the ranked points table.
//
// The table is read once at startup from a JSON (`{ "teams": [...] }`) or
// CSV file and never modified afterwards.

use crate::overs::Overs;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// One row of the points table: cumulative tournament figures for a team.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Team {
    pub name: String,
    pub acronym: String,
    /// Current position, 1 = best.
    pub rank: u32,
    pub runs_scored: u32,
    pub overs_faced: Overs,
    pub runs_conceded: u32,
    pub overs_bowled: Overs,
    pub nrr: f64,
}

/// The ranked table of teams, sorted by rank ascending.
///
/// Ranks are dense (1..=N) and acronyms are unique ignoring case; both are
/// checked when the table is built.
#[derive(Debug, Clone)]
pub struct PointsTable {
    teams: Vec<Team>,
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("unsupported points table format: {path} (expected .json or .csv)")]
    UnsupportedFormat { path: String },

    #[error("points table has no teams")]
    Empty,

    #[error("invalid acronym `{0}`: expected 2-5 ASCII letters")]
    InvalidAcronym(String),

    #[error("duplicate acronym `{0}`")]
    DuplicateAcronym(String),

    #[error("ranks must run 1..={len} without gaps: expected rank {expected}, found {found}")]
    RankGap {
        len: usize,
        expected: u32,
        found: u32,
    },

    #[error("team `{acronym}` has a non-finite NRR")]
    NonFiniteNrr { acronym: String },
}

// ---------------------------------------------------------------------------
// PointsTable
// ---------------------------------------------------------------------------

impl PointsTable {
    /// Validate and sort a list of teams into a table.
    pub fn new(mut teams: Vec<Team>) -> Result<Self, TableError> {
        if teams.is_empty() {
            return Err(TableError::Empty);
        }

        let mut seen = HashSet::new();
        for team in &teams {
            let acronym = team.acronym.trim();
            if !(2..=5).contains(&acronym.len())
                || !acronym.chars().all(|c| c.is_ascii_alphabetic())
            {
                return Err(TableError::InvalidAcronym(team.acronym.clone()));
            }
            if !seen.insert(acronym.to_ascii_uppercase()) {
                return Err(TableError::DuplicateAcronym(team.acronym.clone()));
            }
            if !team.nrr.is_finite() {
                return Err(TableError::NonFiniteNrr {
                    acronym: team.acronym.clone(),
                });
            }
        }

        teams.sort_by_key(|t| t.rank);
        let len = teams.len();
        for (expected, team) in (1u32..).zip(&teams) {
            if team.rank != expected {
                return Err(TableError::RankGap {
                    len,
                    expected,
                    found: team.rank,
                });
            }
        }

        for team in &mut teams {
            team.acronym = team.acronym.trim().to_ascii_uppercase();
        }

        Ok(PointsTable { teams })
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Case-insensitive exact match on acronym. Surrounding whitespace in
    /// the query is ignored.
    pub fn find_by_acronym(&self, acronym: &str) -> Option<&Team> {
        let wanted = acronym.trim();
        self.teams
            .iter()
            .find(|t| t.acronym.eq_ignore_ascii_case(wanted))
    }

    /// The team currently holding `rank`, if any.
    pub fn team_at_rank(&self, rank: u32) -> Option<&Team> {
        let index = usize::try_from(rank.checked_sub(1)?).ok()?;
        self.teams.get(index)
    }

    /// Comma-separated acronyms of the top `limit` teams, for prompts.
    pub fn acronym_hint(&self, limit: usize) -> String {
        self.teams
            .iter()
            .take(limit)
            .map(|t| t.acronym.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ---------------------------------------------------------------------------
// Raw file structs (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct PointsTableFile {
    teams: Vec<Team>,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (private, enable testing without temp files)
// ---------------------------------------------------------------------------

fn load_json_from_reader<R: Read>(rdr: R) -> Result<Vec<Team>, serde_json::Error> {
    let file: PointsTableFile = serde_json::from_reader(rdr)?;
    Ok(file.teams)
}

fn load_csv_from_reader<R: Read>(rdr: R) -> Result<Vec<Team>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(rdr);
    let mut teams = Vec::new();
    for result in reader.deserialize::<Team>() {
        match result {
            Ok(team) => teams.push(team),
            Err(e) => {
                warn!("skipping malformed points table row: {}", e);
            }
        }
    }
    Ok(teams)
}

// ---------------------------------------------------------------------------
// Public path-based loader
// ---------------------------------------------------------------------------

/// Load and validate a points table. The format follows the file extension.
pub fn load_points_table(path: &Path) -> Result<PointsTable, TableError> {
    let path_str = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let open = || {
        std::fs::File::open(path).map_err(|e| TableError::Io {
            path: path_str.clone(),
            source: e,
        })
    };

    let teams = match extension.as_deref() {
        Some("json") => load_json_from_reader(open()?).map_err(|e| TableError::Json {
            path: path_str.clone(),
            source: e,
        })?,
        Some("csv") => load_csv_from_reader(open()?).map_err(|e| TableError::Csv {
            path: path_str.clone(),
            source: e,
        })?,
        _ => {
            return Err(TableError::UnsupportedFormat {
                path: path.display().to_string(),
            })
        }
    };

    let table = PointsTable::new(teams)?;
    info!("Loaded points table with {} teams from {}", table.len(), path_str);
    Ok(table)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
