use crate::error::{LeagueError, Result};
use crate::names;
use crate::store::RecordStore;
use crate::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Table label for a match that has not been reported.
pub const PENDING_LABEL: &str = "N/A";
/// Table label for a match that ended level.
pub const DRAW_LABEL: &str = "DNP";

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Scheduled, no result yet.
    Pending,
    /// No contest: equal scores.
    Draw,
    Decided { winner: String, loser: String },
}

impl Outcome {
    /// Higher score wins; equal scores are a draw.
    pub fn from_scores(team: &str, opponent: &str, team_score: u32, opponent_score: u32) -> Self {
        use std::cmp::Ordering;
        match team_score.cmp(&opponent_score) {
            Ordering::Greater => Outcome::Decided {
                winner: team.to_string(),
                loser: opponent.to_string(),
            },
            Ordering::Less => Outcome::Decided {
                winner: opponent.to_string(),
                loser: team.to_string(),
            },
            Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Outcome::Pending)
    }

    pub fn winner(&self) -> &str {
        match self {
            Outcome::Pending => PENDING_LABEL,
            Outcome::Draw => DRAW_LABEL,
            Outcome::Decided { winner, .. } => winner,
        }
    }

    pub fn loser(&self) -> &str {
        match self {
            Outcome::Pending => PENDING_LABEL,
            Outcome::Draw => DRAW_LABEL,
            Outcome::Decided { loser, .. } => loser,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.winner())
    }
}

// ---------------------------------------------------------------------------
// Pairing / MatchReport
// ---------------------------------------------------------------------------

/// One side of a pairing, identified by team name and optional owner.
#[derive(Debug, Clone)]
pub struct Side {
    pub name: String,
    pub owner: Option<String>,
}

impl Side {
    fn is(&self, name: &str, owner: Option<&str>) -> bool {
        if names::same_name(&self.name, name) {
            return true;
        }
        match (self.owner.as_deref(), owner) {
            (Some(a), Some(b)) => names::same_name(a, b),
            _ => false,
        }
    }
}

impl From<&Team> for Side {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            owner: team.owner.clone(),
        }
    }
}

/// The two teams a report refers to, in the reporter's order.
#[derive(Debug, Clone)]
pub struct Pairing {
    pub team: Side,
    pub opponent: Side,
}

/// Scores as given by the reporter, relative to `Pairing::team`.
#[derive(Debug, Clone)]
pub struct MatchReport {
    pub team_score: u32,
    pub opponent_score: u32,
    pub reported_by: String,
}

/// Record-store predicates over matches.
#[derive(Debug, Clone)]
pub enum MatchQuery {
    All,
    /// Case-insensitive exact match on week, team, opponent, or either owner.
    Search(String),
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Match {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week: Option<String>,
    pub team: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_owner: Option<String>,
    pub opponent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent_owner: Option<String>,
    #[serde(default)]
    pub team_score: u32,
    #[serde(default)]
    pub opponent_score: u32,
    pub outcome: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_by: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reported_at: Option<DateTime<Utc>>,
}

impl Match {
    /// An unresolved placeholder in the schedule.
    pub fn scheduled(week: impl Into<String>, team: Side, opponent: Side) -> Self {
        Self {
            id: Uuid::new_v4(),
            week: Some(week.into()),
            team: team.name,
            team_owner: team.owner,
            opponent: opponent.name,
            opponent_owner: opponent.owner,
            team_score: 0,
            opponent_score: 0,
            outcome: Outcome::Pending,
            reported_by: None,
            created_at: Utc::now(),
            reported_at: None,
        }
    }

    /// A match created with its result already known.
    pub fn resolved(pairing: Pairing, report: MatchReport) -> Self {
        let outcome = Outcome::from_scores(
            &pairing.team.name,
            &pairing.opponent.name,
            report.team_score,
            report.opponent_score,
        );
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            week: None,
            team: pairing.team.name,
            team_owner: pairing.team.owner,
            opponent: pairing.opponent.name,
            opponent_owner: pairing.opponent.owner,
            team_score: report.team_score,
            opponent_score: report.opponent_score,
            outcome,
            reported_by: Some(report.reported_by),
            created_at: now,
            reported_at: Some(now),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.outcome.is_resolved()
    }

    /// True when this is an unresolved match between the paired teams, in
    /// either orientation.
    pub fn awaits_report(&self, pairing: &Pairing) -> bool {
        !self.is_resolved() && self.orientation(pairing).is_some()
    }

    /// `Some(false)` when stored in the reporter's order, `Some(true)` when
    /// reversed, `None` when the pairing does not refer to this match.
    fn orientation(&self, pairing: &Pairing) -> Option<bool> {
        let team_owner = self.team_owner.as_deref();
        let opponent_owner = self.opponent_owner.as_deref();
        if pairing.team.is(&self.team, team_owner)
            && pairing.opponent.is(&self.opponent, opponent_owner)
        {
            Some(false)
        } else if pairing.team.is(&self.opponent, opponent_owner)
            && pairing.opponent.is(&self.team, team_owner)
        {
            Some(true)
        } else {
            None
        }
    }

    /// Fill in the result of an unresolved match. Scores are mapped onto the
    /// stored sides. Returns `false` and leaves the match untouched if it is
    /// already resolved or belongs to other teams.
    pub fn apply_report(&mut self, pairing: &Pairing, report: &MatchReport) -> bool {
        if self.is_resolved() {
            return false;
        }
        let Some(reversed) = self.orientation(pairing) else {
            return false;
        };
        let (team_score, opponent_score) = if reversed {
            (report.opponent_score, report.team_score)
        } else {
            (report.team_score, report.opponent_score)
        };
        self.team_score = team_score;
        self.opponent_score = opponent_score;
        self.outcome = Outcome::from_scores(&self.team, &self.opponent, team_score, opponent_score);
        self.reported_by = Some(report.reported_by.clone());
        self.reported_at = Some(Utc::now());
        true
    }

    pub fn matches(&self, query: &MatchQuery) -> bool {
        let text = match query {
            MatchQuery::All => return true,
            MatchQuery::Search(text) => text,
        };
        [
            self.week.as_deref(),
            Some(self.team.as_str()),
            Some(self.opponent.as_str()),
            self.team_owner.as_deref(),
            self.opponent_owner.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| names::same_name(field, text))
    }

    fn search_order(&self) -> (Option<&str>, &str, &str) {
        (self.week.as_deref(), &self.team, &self.opponent)
    }

    /// Score cell for tables: `N/A`, `DNP`, or `a - b`.
    pub fn score_label(&self) -> String {
        match self.outcome {
            Outcome::Pending => PENDING_LABEL.to_string(),
            Outcome::Draw => DRAW_LABEL.to_string(),
            Outcome::Decided { .. } => format!("{} - {}", self.team_score, self.opponent_score),
        }
    }

    // ---------------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------------

    /// Add an unresolved match to the schedule.
    pub fn schedule(
        store: &dyn RecordStore,
        week: &str,
        team: &str,
        team_owner: &str,
        opponent: &str,
        opponent_owner: &str,
    ) -> Result<Self> {
        let week = week.trim();
        let team = names::title_case(team);
        let opponent = names::title_case(opponent);
        let team_owner = names::handle(team_owner);
        let opponent_owner = names::handle(opponent_owner);
        if [
            week,
            team.as_str(),
            opponent.as_str(),
            team_owner.as_str(),
            opponent_owner.as_str(),
        ]
        .iter()
        .any(|s| s.is_empty())
        {
            return Err(LeagueError::ScheduleFieldsEmpty);
        }
        if names::same_name(&team, &opponent) {
            return Err(LeagueError::SelfMatch);
        }

        let scheduled = Self::scheduled(
            week,
            Side {
                name: team,
                owner: Some(team_owner),
            },
            Side {
                name: opponent,
                owner: Some(opponent_owner),
            },
        );
        store.insert_match(&scheduled)?;
        info!(week, team = %scheduled.team, opponent = %scheduled.opponent, "match scheduled");
        Ok(scheduled)
    }

    /// Report the result of a scheduled match. Exactly one report succeeds
    /// per scheduled match; later ones are rejected.
    pub fn report(
        store: &dyn RecordStore,
        reporter: &str,
        team: &str,
        opponent: &str,
        team_score: &str,
        opponent_score: &str,
    ) -> Result<Self> {
        let (pairing, report) =
            prepare_report(store, reporter, team, opponent, team_score, opponent_score)?;
        let reported = store
            .report_pending(&pairing, &report)?
            .ok_or(LeagueError::NotScheduled)?;
        info!(
            team = %reported.team,
            opponent = %reported.opponent,
            winner = %reported.outcome,
            reported_by = reporter,
            "match reported"
        );
        Ok(reported)
    }

    /// Record a match that was never scheduled, resolved on creation.
    pub fn record(
        store: &dyn RecordStore,
        reporter: &str,
        team: &str,
        opponent: &str,
        team_score: &str,
        opponent_score: &str,
    ) -> Result<Self> {
        let (pairing, report) =
            prepare_report(store, reporter, team, opponent, team_score, opponent_score)?;
        let recorded = Self::resolved(pairing, report);
        store.insert_match(&recorded)?;
        info!(
            team = %recorded.team,
            opponent = %recorded.opponent,
            winner = %recorded.outcome,
            reported_by = reporter,
            "match recorded"
        );
        Ok(recorded)
    }

    /// Matches whose week, team, or owner equals `text`, ordered by
    /// week, team, then opponent.
    pub fn search(store: &dyn RecordStore, text: &str) -> Result<Vec<Self>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LeagueError::EmptySearch);
        }
        let mut found = store.find_matches(&MatchQuery::Search(text.to_string()))?;
        found.sort_by(|a, b| a.search_order().cmp(&b.search_order()));
        Ok(found)
    }

    /// Every match in store order.
    pub fn list(store: &dyn RecordStore) -> Result<Vec<Self>> {
        store.find_matches(&MatchQuery::All)
    }
}

/// Parse a score argument: an integer that is not negative.
pub fn parse_score(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    let value: i64 = raw
        .parse()
        .map_err(|_| LeagueError::InvalidScore(raw.to_string()))?;
    if value < 0 {
        return Err(LeagueError::NegativeScore);
    }
    u32::try_from(value).map_err(|_| LeagueError::InvalidScore(raw.to_string()))
}

/// Shared validation for scheduled and direct reports.
fn prepare_report(
    store: &dyn RecordStore,
    reporter: &str,
    team: &str,
    opponent: &str,
    team_score: &str,
    opponent_score: &str,
) -> Result<(Pairing, MatchReport)> {
    let team_score = parse_score(team_score)?;
    let opponent_score = parse_score(opponent_score)?;
    let (team, opponent) = (team.trim(), opponent.trim());
    if team.is_empty() || opponent.is_empty() {
        return Err(LeagueError::TeamNamesEmpty);
    }
    if names::same_name(team, opponent) {
        return Err(LeagueError::SelfMatch);
    }

    let team = Team::resolve(store, team)?;
    let opponent = Team::resolve(store, opponent)?;
    // A name and an owner handle can point at the same team.
    if team.id == opponent.id {
        return Err(LeagueError::SelfMatch);
    }

    let pairing = Pairing {
        team: Side::from(&team),
        opponent: Side::from(&opponent),
    };
    let report = MatchReport {
        team_score,
        opponent_score,
        reported_by: reporter.to_string(),
    };
    Ok((pairing, report))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LeagueConfig;
    use crate::store::MemoryStore;

    fn league() -> MemoryStore {
        let store = MemoryStore::new();
        let config = LeagueConfig::new("test league");
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();
        Team::create(&store, &config, "Water Works", "misty").unwrap();
        Team::create(&store, &config, "Rock Solid", "brock").unwrap();
        store
    }

    #[test]
    fn parse_score_rules() {
        assert_eq!(parse_score(" 3 ").unwrap(), 3);
        assert_eq!(parse_score("0").unwrap(), 0);
        assert!(matches!(parse_score("-1"), Err(LeagueError::NegativeScore)));
        assert!(matches!(parse_score("three"), Err(LeagueError::InvalidScore(_))));
        assert!(matches!(parse_score("99999999999"), Err(LeagueError::InvalidScore(_))));
    }

    #[test]
    fn outcome_from_scores() {
        assert_eq!(
            Outcome::from_scores("A", "B", 3, 1),
            Outcome::Decided {
                winner: "A".into(),
                loser: "B".into()
            }
        );
        assert_eq!(Outcome::from_scores("A", "B", 0, 2).winner(), "B");
        assert_eq!(Outcome::from_scores("A", "B", 2, 2), Outcome::Draw);
        assert_eq!(Outcome::Pending.loser(), PENDING_LABEL);
    }

    #[test]
    fn schedule_normalizes_and_starts_pending() {
        let store = league();
        let m = Match::schedule(&store, "1", "fire squad", "ASH", "water works", "Misty").unwrap();
        assert_eq!(m.team, "Fire Squad");
        assert_eq!(m.opponent_owner.as_deref(), Some("misty"));
        assert_eq!(m.outcome, Outcome::Pending);
        assert_eq!((m.team_score, m.opponent_score), (0, 0));
        assert!(m.reported_by.is_none());
        assert_eq!(m.score_label(), PENDING_LABEL);
    }

    #[test]
    fn schedule_rejects_self_match_and_blanks() {
        let store = league();
        assert!(matches!(
            Match::schedule(&store, "1", "Fire Squad", "ash", "FIRE SQUAD", "ash"),
            Err(LeagueError::SelfMatch)
        ));
        assert!(matches!(
            Match::schedule(&store, " ", "Fire Squad", "ash", "Water Works", "misty"),
            Err(LeagueError::ScheduleFieldsEmpty)
        ));
    }

    #[test]
    fn report_resolves_scheduled_match_once() {
        let store = league();
        Match::schedule(&store, "1", "Fire Squad", "ash", "Water Works", "misty").unwrap();

        let m = Match::report(&store, "ash", "Fire Squad", "Water Works", "3", "1").unwrap();
        assert_eq!(m.outcome.winner(), "Fire Squad");
        assert_eq!(m.outcome.loser(), "Water Works");
        assert_eq!(m.reported_by.as_deref(), Some("ash"));
        assert_eq!(m.score_label(), "3 - 1");

        let err =
            Match::report(&store, "misty", "Fire Squad", "Water Works", "0", "5").unwrap_err();
        assert!(matches!(err, LeagueError::NotScheduled));
        assert_eq!(Match::list(&store).unwrap().len(), 1);
    }

    #[test]
    fn report_in_reverse_order_maps_scores_to_stored_sides() {
        let store = league();
        Match::schedule(&store, "2", "Fire Squad", "ash", "Water Works", "misty").unwrap();

        let m = Match::report(&store, "misty", "water works", "fire squad", "4", "2").unwrap();
        assert_eq!(m.team, "Fire Squad");
        assert_eq!((m.team_score, m.opponent_score), (2, 4));
        assert_eq!(m.outcome.winner(), "Water Works");
    }

    #[test]
    fn report_accepts_owner_handles() {
        let store = league();
        Match::schedule(&store, "1", "Fire Squad", "ash", "Water Works", "misty").unwrap();
        let m = Match::report(&store, "ash", "ASH", "misty", "1", "1").unwrap();
        assert_eq!(m.outcome, Outcome::Draw);
        assert_eq!(m.score_label(), DRAW_LABEL);
    }

    #[test]
    fn report_tolerates_repeated_spaces_in_names() {
        let store = league();
        Match::schedule(&store, "1", "Fire Squad", "ash", "Water Works", "misty").unwrap();
        let m = Match::report(&store, "ash", "Fire  Squad", "water   works", "2", "0").unwrap();
        assert_eq!(m.outcome.winner(), "Fire Squad");
    }

    #[test]
    fn report_without_schedule_is_rejected() {
        let store = league();
        let err = Match::report(&store, "ash", "Fire Squad", "Rock Solid", "2", "0").unwrap_err();
        assert!(matches!(err, LeagueError::NotScheduled));
    }

    #[test]
    fn report_validation_order() {
        let store = league();
        assert!(matches!(
            Match::report(&store, "ash", "Fire Squad", "Water Works", "x", "1"),
            Err(LeagueError::InvalidScore(_))
        ));
        assert!(matches!(
            Match::report(&store, "ash", "Fire Squad", "Water Works", "-2", "1"),
            Err(LeagueError::NegativeScore)
        ));
        assert!(matches!(
            Match::report(&store, "ash", "", "Water Works", "2", "1"),
            Err(LeagueError::TeamNamesEmpty)
        ));
        assert!(matches!(
            Match::report(&store, "ash", "fire squad", "Fire Squad", "2", "1"),
            Err(LeagueError::SelfMatch)
        ));
        assert!(matches!(
            Match::report(&store, "ash", "ash", "Fire Squad", "2", "1"),
            Err(LeagueError::SelfMatch)
        ));
        assert!(matches!(
            Match::report(&store, "ash", "Fire Squad", "Ghosts", "2", "1"),
            Err(LeagueError::TeamOrUserNotFound(name)) if name == "Ghosts"
        ));
    }

    #[test]
    fn record_creates_resolved_match() {
        let store = league();
        let m = Match::record(&store, "brock", "rock solid", "Fire Squad", "0", "2").unwrap();
        assert!(m.week.is_none());
        assert_eq!(m.team, "Rock Solid");
        assert_eq!(m.outcome.winner(), "Fire Squad");
        assert!(m.reported_at.is_some());
    }

    #[test]
    fn search_is_exact_and_sorted() {
        let store = league();
        Match::schedule(&store, "2", "Water Works", "misty", "Rock Solid", "brock").unwrap();
        Match::schedule(&store, "1", "Fire Squad", "ash", "Water Works", "misty").unwrap();
        Match::schedule(&store, "1", "Fire Squad", "ash", "Rock Solid", "brock").unwrap();

        let found = Match::search(&store, "WATER WORKS").unwrap();
        let weeks: Vec<_> = found.iter().map(|m| m.week.as_deref().unwrap()).collect();
        assert_eq!(weeks, ["1", "2"]);

        let week_one = Match::search(&store, "1").unwrap();
        assert_eq!(week_one.len(), 2);
        assert_eq!(week_one[0].opponent, "Rock Solid");
        assert_eq!(week_one[1].opponent, "Water Works");

        assert!(Match::search(&store, "Water").unwrap().is_empty());
        assert!(Match::search(&store, ".*").unwrap().is_empty());
        assert!(matches!(Match::search(&store, "  "), Err(LeagueError::EmptySearch)));
    }
}
