// Net run rate model: over notation, the ranked points table, target NRR
// bands and the two scenario solvers.

pub mod band;
pub mod overs;
pub mod scenario;
pub mod team;

pub use band::{resolve_band, BandError, NrrBand};
pub use overs::{Overs, OversError};
pub use scenario::{
    ChaseResult, Feasibility, MatchInput, RestrictionResult, ScenarioEngine, ScenarioError,
    ScenarioResult, Toss, TournamentFigures, FULL_INNINGS_OVERS,
};
pub use team::{load_points_table, PointsTable, TableError, Team};
