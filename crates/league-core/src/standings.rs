//! League table computation.
//!
//! A pure fold over match records: every team seen on either side of a
//! match gets a row, resolved matches add to the row totals, and the rows
//! are ranked by points. Ties keep the order in which teams were first
//! seen.

use crate::config::Scoring;
use crate::matches::{Match, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsRow {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points: u32,
}

impl StandingsRow {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            wins: 0,
            losses: 0,
            draws: 0,
            points: 0,
        }
    }
}

/// Build the standings table from `matches`, in input order.
///
/// Unresolved matches register both teams but add nothing. A decided match
/// whose winner names neither side is registered and otherwise ignored.
/// An empty input yields an empty table. Point totals saturate at
/// `u32::MAX`.
pub fn aggregate(matches: &[Match], scoring: &Scoring) -> Vec<StandingsRow> {
    let mut rows: Vec<StandingsRow> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for m in matches {
        let team = sighted(&mut rows, &mut index, &m.team);
        let opponent = sighted(&mut rows, &mut index, &m.opponent);

        match &m.outcome {
            Outcome::Pending => {}
            Outcome::Draw => {
                for side in [team, opponent] {
                    rows[side].draws += 1;
                    rows[side].points = rows[side].points.saturating_add(scoring.draw);
                }
            }
            Outcome::Decided { winner, .. } => {
                let (won, lost) = if *winner == m.team {
                    (team, opponent)
                } else if *winner == m.opponent {
                    (opponent, team)
                } else {
                    continue;
                };
                rows[won].wins += 1;
                rows[won].points = rows[won].points.saturating_add(scoring.win);
                rows[lost].losses += 1;
                rows[lost].points = rows[lost].points.saturating_add(scoring.loss);
            }
        }
    }

    // Stable: equal points keep first-sighting order.
    rows.sort_by(|a, b| b.points.cmp(&a.points));
    rows
}

fn sighted<'a>(
    rows: &mut Vec<StandingsRow>,
    index: &mut HashMap<&'a str, usize>,
    team: &'a str,
) -> usize {
    *index.entry(team).or_insert_with(|| {
        rows.push(StandingsRow::new(team));
        rows.len() - 1
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
