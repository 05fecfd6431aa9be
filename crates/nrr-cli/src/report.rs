// Human-readable rendering of a solved scenario.

use nrr_core::{ChaseResult, Feasibility, MatchInput, Overs, RestrictionResult, Team};

/// Everything needed to describe one solved query.
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    /// Team batted first; the opposition must be held to a run range.
    Restriction {
        team: String,
        opposition: String,
        batting: MatchInput,
        result: RestrictionResult,
        feasibility: Feasibility,
    },
    /// Team bowled first; the chase must finish inside an overs window.
    Chase {
        team: String,
        opposition: String,
        bowling: MatchInput,
        result: ChaseResult,
        feasibility: Feasibility,
    },
}

impl Report {
    pub fn restriction(
        team: &Team,
        opposition: &Team,
        batting: MatchInput,
        result: RestrictionResult,
        feasibility: Feasibility,
    ) -> Self {
        Report::Restriction {
            team: team.name.clone(),
            opposition: opposition.name.clone(),
            batting,
            result,
            feasibility,
        }
    }

    pub fn chase(
        team: &Team,
        opposition: &Team,
        bowling: MatchInput,
        result: ChaseResult,
        feasibility: Feasibility,
    ) -> Self {
        Report::Chase {
            team: team.name.clone(),
            opposition: opposition.name.clone(),
            bowling,
            result,
            feasibility,
        }
    }

    pub fn feasibility(&self) -> &Feasibility {
        match self {
            Report::Restriction { feasibility, .. } | Report::Chase { feasibility, .. } => {
                feasibility
            }
        }
    }

    /// The range line, the revised NRR line, and a note when the range
    /// cannot be achieved.
    pub fn lines(&self) -> Vec<String> {
        let (mut lines, feasibility) = match self {
            Report::Restriction {
                team,
                opposition,
                batting,
                result,
                feasibility,
            } => (
                vec![
                    restriction_line(team, opposition, batting, result),
                    revised_line(team, result.revised_nrr_low, result.revised_nrr_high),
                ],
                feasibility,
            ),
            Report::Chase {
                team,
                opposition,
                bowling,
                result,
                feasibility,
            } => (
                vec![
                    format!(
                        "If {opposition} scores {} runs in {} overs, {team} must chase the target in between {} and {} overs.",
                        bowling.runs,
                        bowling.overs,
                        format_decimal_overs(result.low_bound),
                        format_decimal_overs(result.high_bound)
                    ),
                    revised_line(team, result.revised_nrr_low, result.revised_nrr_high),
                ],
                feasibility,
            ),
        };

        if let Feasibility::Unattainable(reason) = feasibility {
            lines.push(format!("Note: this outcome is not achievable: {reason}."));
        }
        lines
    }
}

fn restriction_line(
    team: &str,
    opposition: &str,
    batting: &MatchInput,
    result: &RestrictionResult,
) -> String {
    let prefix = format!(
        "If {team} scores {} runs in {} overs, they need to restrict {opposition}",
        batting.runs, batting.overs
    );
    if result.is_ceiling_only() {
        format!("{prefix} to at most {} runs.", result.high_bound)
    } else {
        format!(
            "{prefix} between {} to {} runs.",
            result.low_bound, result.high_bound
        )
    }
}

fn revised_line(team: &str, low: f64, high: f64) -> String {
    format!("Revised NRR of {team} will be between {low:.3} and {high:.3}.")
}

/// Base-6 notation for a solved overs value. Windows that open before the
/// first ball are shown from 0.0.
fn format_decimal_overs(value: f64) -> String {
    Overs::from_decimal(value.max(0.0))
        .map(|o| o.to_string())
        .unwrap_or_else(|_| format!("{value:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nrr_core::ScenarioResult;

    fn team(name: &str, acronym: &str) -> Team {
        Team {
            name: name.into(),
            acronym: acronym.into(),
            rank: 1,
            runs_scored: 0,
            overs_faced: Overs::complete(0),
            runs_conceded: 0,
            overs_bowled: Overs::complete(0),
            nrr: 0.0,
        }
    }

    #[test]
    fn restriction_lines() {
        let report = Report::restriction(
            &team("Chennai Super Kings", "CSK"),
            &team("Mumbai Indians", "MI"),
            MatchInput {
                runs: 180,
                overs: Overs::complete(20),
            },
            ScenarioResult {
                low_bound: 153,
                high_bound: 175,
                revised_nrr_low: 0.5,
                revised_nrr_high: 0.7,
            },
            Feasibility::Attainable,
        );
        assert_eq!(
            report.lines(),
            vec![
                "If Chennai Super Kings scores 180 runs in 20.0 overs, they need to restrict Mumbai Indians between 153 to 175 runs.".to_string(),
                "Revised NRR of Chennai Super Kings will be between 0.500 and 0.700.".to_string(),
            ]
        );
    }

    #[test]
    fn band_between_whole_runs_reads_as_a_ceiling() {
        let report = Report::restriction(
            &team("Chennai Super Kings", "CSK"),
            &team("Mumbai Indians", "MI"),
            MatchInput {
                runs: 180,
                overs: Overs::complete(20),
            },
            ScenarioResult {
                low_bound: 93,
                high_bound: 92,
                revised_nrr_low: 1.255,
                revised_nrr_high: 1.255,
            },
            Feasibility::Attainable,
        );
        assert_eq!(
            report.lines(),
            vec![
                "If Chennai Super Kings scores 180 runs in 20.0 overs, they need to restrict Mumbai Indians to at most 92 runs.".to_string(),
                "Revised NRR of Chennai Super Kings will be between 1.255 and 1.255.".to_string(),
            ]
        );
    }

    #[test]
    fn chase_lines_use_base6_overs() {
        let report = Report::chase(
            &team("Chennai Super Kings", "CSK"),
            &team("Mumbai Indians", "MI"),
            MatchInput {
                runs: 165,
                overs: Overs::new(19, 4).unwrap(),
            },
            ScenarioResult {
                low_bound: 16.5,
                high_bound: 18.999,
                revised_nrr_low: -0.0504,
                revised_nrr_high: 0.25,
            },
            Feasibility::Attainable,
        );
        let lines = report.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            "If Mumbai Indians scores 165 runs in 19.4 overs, Chennai Super Kings must chase the target in between 16.3 and 19.0 overs."
        );
        assert_eq!(
            lines[1],
            "Revised NRR of Chennai Super Kings will be between -0.050 and 0.250."
        );
    }

    #[test]
    fn unattainable_adds_note() {
        let report = Report::chase(
            &team("Chennai Super Kings", "CSK"),
            &team("Mumbai Indians", "MI"),
            MatchInput {
                runs: 165,
                overs: Overs::complete(20),
            },
            ScenarioResult {
                low_bound: -30.0,
                high_bound: -17.0,
                revised_nrr_low: 4.0,
                revised_nrr_high: 5.0,
            },
            Feasibility::Unattainable("too fast".into()),
        );
        let lines = report.lines();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("between 0.0 and 0.0 overs"));
        assert_eq!(lines[2], "Note: this outcome is not achievable: too fast.");
    }
}
