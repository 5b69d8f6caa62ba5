use crate::config::LeagueConfig;
use crate::error::{LeagueError, Result};
use crate::names;
use crate::store::RecordStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// RosterEntry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub points: u32,
}

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Goes negative if the roster costs more than the league allows.
    pub budget: i64,
    #[serde(default)]
    pub roster: Vec<RosterEntry>,
    pub created_at: DateTime<Utc>,
}

/// Lookup predicates over teams. All comparisons are case-insensitive.
#[derive(Debug, Clone)]
pub enum TeamQuery {
    Name(String),
    /// Matches a team whose name or owner equals the key.
    NameOrOwner(String),
    /// Matches a team holding either the given name or the given owner.
    Conflicts { name: String, owner: String },
}

/// Single-document updates applied by the store.
#[derive(Debug, Clone)]
pub enum TeamPatch {
    AddRosterEntry(RosterEntry),
    ResetRoster { budget: i64 },
}

impl Team {
    pub fn new(name: impl Into<String>, owner: Option<String>, budget: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            owner,
            budget,
            roster: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn matches(&self, query: &TeamQuery) -> bool {
        let owner_is = |key: &str| {
            self.owner
                .as_deref()
                .is_some_and(|owner| names::same_name(owner, key))
        };
        match query {
            TeamQuery::Name(name) => names::same_name(&self.name, name),
            TeamQuery::NameOrOwner(key) => names::same_name(&self.name, key) || owner_is(key),
            TeamQuery::Conflicts { name, owner } => {
                names::same_name(&self.name, name) || owner_is(owner)
            }
        }
    }

    pub fn apply(&mut self, patch: &TeamPatch) {
        match patch {
            TeamPatch::AddRosterEntry(entry) => {
                self.budget -= i64::from(entry.points);
                self.roster.push(entry.clone());
            }
            TeamPatch::ResetRoster { budget } => {
                self.roster.clear();
                self.budget = *budget;
            }
        }
    }

    // ---------------------------------------------------------------------------
    // Operations
    // ---------------------------------------------------------------------------

    /// Register a team. The name is title-cased and the owner lowercased
    /// before the uniqueness check.
    pub fn create(
        store: &dyn RecordStore,
        config: &LeagueConfig,
        name: &str,
        owner: &str,
    ) -> Result<Self> {
        let name = names::title_case(name);
        let owner = names::handle(owner);
        if name.is_empty() || owner.is_empty() {
            return Err(LeagueError::TeamFieldsEmpty);
        }

        let conflict = TeamQuery::Conflicts {
            name: name.clone(),
            owner: owner.clone(),
        };
        if store.find_team(&conflict)?.is_some() {
            return Err(LeagueError::TeamExists { name, owner });
        }

        let team = Self::new(name, Some(owner), config.initial_budget);
        store.insert_team(&team)?;
        info!(team = %team.name, budget = team.budget, "team added");
        Ok(team)
    }

    pub fn load(store: &dyn RecordStore, name: &str) -> Result<Self> {
        let name = names::title_case(name);
        store
            .find_team(&TeamQuery::Name(name.clone()))?
            .ok_or(LeagueError::TeamNotFound(name))
    }

    /// Resolve a team from either its name or its owner's handle.
    pub fn resolve(store: &dyn RecordStore, key: &str) -> Result<Self> {
        store
            .find_team(&TeamQuery::NameOrOwner(key.trim().to_string()))?
            .ok_or_else(|| LeagueError::TeamOrUserNotFound(key.trim().to_string()))
    }

    pub fn list(store: &dyn RecordStore) -> Result<Vec<Self>> {
        store.list_teams()
    }

    /// Append a roster entry and charge its cost against the budget.
    ///
    /// `points` is the raw argument text; it must parse as a non-negative
    /// integer.
    pub fn add_roster_entry(
        store: &dyn RecordStore,
        team_name: &str,
        entry_name: &str,
        points: &str,
    ) -> Result<Self> {
        let team_name = names::title_case(team_name);
        let entry_name = names::title_case(entry_name);
        let points = points.trim();
        if team_name.is_empty() || entry_name.is_empty() || points.is_empty() {
            return Err(LeagueError::RosterFieldsEmpty);
        }
        let points: u32 = points
            .parse()
            .map_err(|_| LeagueError::InvalidPointValue(points.to_string()))?;

        let entry = RosterEntry {
            name: entry_name,
            points,
        };
        let team = store
            .update_team(&team_name, &TeamPatch::AddRosterEntry(entry))?
            .ok_or(LeagueError::TeamNotFound(team_name))?;

        if team.budget < 0 {
            warn!(team = %team.name, budget = team.budget, "roster exceeds budget");
        }
        info!(team = %team.name, points, "roster entry added");
        Ok(team)
    }

    /// Empty the roster and restore the league's starting budget.
    pub fn clear_roster(
        store: &dyn RecordStore,
        config: &LeagueConfig,
        team_name: &str,
    ) -> Result<Self> {
        let team_name = names::title_case(team_name);
        let patch = TeamPatch::ResetRoster {
            budget: config.initial_budget,
        };
        let team = store
            .update_team(&team_name, &patch)?
            .ok_or(LeagueError::TeamNotFound(team_name))?;
        info!(team = %team.name, "roster cleared");
        Ok(team)
    }

    pub fn delete_all(store: &dyn RecordStore) -> Result<usize> {
        let removed = store.delete_all_teams()?;
        info!(removed, "all teams deleted");
        Ok(removed)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn setup() -> (MemoryStore, LeagueConfig) {
        (MemoryStore::new(), LeagueConfig::new("test league"))
    }

    #[test]
    fn create_normalizes_and_sets_budget() {
        let (store, config) = setup();
        let team = Team::create(&store, &config, "fire  squad", "Ash").unwrap();
        assert_eq!(team.name, "Fire Squad");
        assert_eq!(team.owner.as_deref(), Some("ash"));
        assert_eq!(team.budget, 180);
        assert!(team.roster.is_empty());
    }

    #[test]
    fn create_rejects_empty_fields() {
        let (store, config) = setup();
        let err = Team::create(&store, &config, "  ", "ash").unwrap_err();
        assert!(matches!(err, LeagueError::TeamFieldsEmpty));
        let err = Team::create(&store, &config, "Fire", "").unwrap_err();
        assert!(matches!(err, LeagueError::TeamFieldsEmpty));
    }

    #[test]
    fn create_rejects_duplicate_name_or_owner() {
        let (store, config) = setup();
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();

        let err = Team::create(&store, &config, "FIRE SQUAD", "misty").unwrap_err();
        assert!(matches!(err, LeagueError::TeamExists { .. }));

        let err = Team::create(&store, &config, "Water Works", "ASH").unwrap_err();
        assert!(matches!(err, LeagueError::TeamExists { .. }));

        assert_eq!(Team::list(&store).unwrap().len(), 1);
    }

    #[test]
    fn roster_entry_decrements_budget_and_may_go_negative() {
        let (store, config) = setup();
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();

        let team = Team::add_roster_entry(&store, "fire squad", "charizard", "150").unwrap();
        assert_eq!(team.budget, 30);
        assert_eq!(
            team.roster,
            vec![RosterEntry {
                name: "Charizard".into(),
                points: 150
            }]
        );

        let team = Team::add_roster_entry(&store, "Fire Squad", "Mewtwo", "100").unwrap();
        assert_eq!(team.budget, -70);
        assert_eq!(team.roster.len(), 2);
    }

    #[test]
    fn roster_entry_rejects_bad_points() {
        let (store, config) = setup();
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();

        for bad in ["-5", "ten", "1.5", "3, 4"] {
            let err = Team::add_roster_entry(&store, "Fire Squad", "Pikachu", bad).unwrap_err();
            assert!(
                matches!(err, LeagueError::InvalidPointValue(_)),
                "expected invalid point value for {bad:?}"
            );
        }
        let err = Team::add_roster_entry(&store, "Fire Squad", "", "5").unwrap_err();
        assert!(matches!(err, LeagueError::RosterFieldsEmpty));
    }

    #[test]
    fn roster_entry_requires_existing_team() {
        let (store, _config) = setup();
        let err = Team::add_roster_entry(&store, "Ghost Team", "Gengar", "20").unwrap_err();
        assert!(matches!(err, LeagueError::TeamNotFound(name) if name == "Ghost Team"));
    }

    #[test]
    fn clear_roster_restores_budget() {
        let (store, config) = setup();
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();
        Team::add_roster_entry(&store, "Fire Squad", "Charizard", "150").unwrap();

        let team = Team::clear_roster(&store, &config, "FIRE squad").unwrap();
        assert!(team.roster.is_empty());
        assert_eq!(team.budget, 180);

        let err = Team::clear_roster(&store, &config, "Nobody").unwrap_err();
        assert!(matches!(err, LeagueError::TeamNotFound(_)));
    }

    #[test]
    fn resolve_by_name_or_owner() {
        let (store, config) = setup();
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();
        assert_eq!(Team::resolve(&store, "ASH").unwrap().name, "Fire Squad");
        assert_eq!(Team::resolve(&store, "fire squad").unwrap().name, "Fire Squad");
        assert_eq!(Team::resolve(&store, " Fire   squad ").unwrap().name, "Fire Squad");
        assert!(matches!(
            Team::resolve(&store, "brock").unwrap_err(),
            LeagueError::TeamOrUserNotFound(_)
        ));
    }

    #[test]
    fn delete_all_reports_count() {
        let (store, config) = setup();
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();
        Team::create(&store, &config, "Water Works", "misty").unwrap();
        assert_eq!(Team::delete_all(&store).unwrap(), 2);
        assert!(Team::list(&store).unwrap().is_empty());
    }
}
