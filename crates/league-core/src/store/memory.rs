use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::RecordStore;
use crate::error::{LeagueError, Result};
use crate::matches::{Match, MatchQuery, MatchReport, Pairing};
use crate::team::{Team, TeamPatch, TeamQuery};

#[derive(Default)]
struct Records {
    teams: Vec<Team>,
    matches: Vec<Match>,
}

/// In-process store. Nothing survives the process.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|_| LeagueError::Store("memory store lock poisoned".into()))
    }
}

impl RecordStore for MemoryStore {
    fn find_team(&self, query: &TeamQuery) -> Result<Option<Team>> {
        let records = self.lock()?;
        Ok(records.teams.iter().find(|t| t.matches(query)).cloned())
    }

    fn list_teams(&self) -> Result<Vec<Team>> {
        Ok(self.lock()?.teams.clone())
    }

    fn insert_team(&self, team: &Team) -> Result<()> {
        debug!(team = %team.name, "insert team");
        self.lock()?.teams.push(team.clone());
        Ok(())
    }

    fn update_team(&self, name: &str, patch: &TeamPatch) -> Result<Option<Team>> {
        let mut records = self.lock()?;
        let query = TeamQuery::Name(name.to_string());
        Ok(records
            .teams
            .iter_mut()
            .find(|t| t.matches(&query))
            .map(|team| {
                team.apply(patch);
                team.clone()
            }))
    }

    fn delete_all_teams(&self) -> Result<usize> {
        let mut records = self.lock()?;
        let removed = records.teams.len();
        records.teams.clear();
        Ok(removed)
    }

    fn insert_match(&self, record: &Match) -> Result<()> {
        debug!(team = %record.team, opponent = %record.opponent, "insert match");
        self.lock()?.matches.push(record.clone());
        Ok(())
    }

    fn find_matches(&self, query: &MatchQuery) -> Result<Vec<Match>> {
        let records = self.lock()?;
        Ok(records
            .matches
            .iter()
            .filter(|m| m.matches(query))
            .cloned()
            .collect())
    }

    fn report_pending(&self, pairing: &Pairing, report: &MatchReport) -> Result<Option<Match>> {
        let mut records = self.lock()?;
        Ok(records
            .matches
            .iter_mut()
            .find(|m| m.awaits_report(pairing))
            .and_then(|m| m.apply_report(pairing, report).then(|| m.clone())))
    }
}
