use league_core::config::LeagueConfig;
use league_core::store::RecordStore;
use league_core::team::Team;
use league_core::Result;

use crate::render;

pub fn add_team(
    store: &dyn RecordStore,
    config: &LeagueConfig,
    name: &str,
    owner: &str,
) -> Result<String> {
    let team = Team::create(store, config, name, owner)?;
    let owner = team.owner.as_deref().unwrap_or_default();
    Ok(format!(
        "{owner} has added '{}' to the league successfully!",
        team.name
    ))
}

pub fn show_all_teams(store: &dyn RecordStore) -> Result<String> {
    let teams = Team::list(store)?;
    if teams.is_empty() {
        return Ok("No teams found in the league.".to_string());
    }
    Ok(render::fenced(&render::teams_table(&teams)))
}

pub fn add_roster_entry(
    store: &dyn RecordStore,
    team: &str,
    entry: &str,
    points: &str,
) -> Result<String> {
    let team = Team::add_roster_entry(store, team, entry, points)?;
    // The handler only sees the updated team; the new entry is the last one.
    let added = team.roster.last().map(|e| e.name.as_str()).unwrap_or_default();
    Ok(format!(
        "Added {added} to {}'s roster! Remaining budget: {}",
        team.name, team.budget
    ))
}

pub fn show_roster(store: &dyn RecordStore, team: &str) -> Result<String> {
    let team = Team::load(store, team)?;
    if team.roster.is_empty() {
        return Ok(format!("{} has no entries in their roster.", team.name));
    }
    Ok(format!(
        "{}'s roster (budget {}):\n{}",
        team.name,
        team.budget,
        render::fenced(&render::roster_table(&team))
    ))
}

pub fn clear_roster(store: &dyn RecordStore, config: &LeagueConfig, team: &str) -> Result<String> {
    let team = Team::clear_roster(store, config, team)?;
    Ok(format!(
        "{}'s roster has been cleared and the budget reset to {}.",
        team.name, team.budget
    ))
}

pub fn delete_all_teams(store: &dyn RecordStore) -> Result<String> {
    let removed = Team::delete_all(store)?;
    Ok(match removed {
        0 => "No teams found in the league.".to_string(),
        1 => "Deleted 1 team from the league.".to_string(),
        n => format!("Deleted {n} teams from the league."),
    })
}
