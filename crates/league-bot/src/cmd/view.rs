use super::open_league;
use crate::output::print_json;
use anyhow::Context;
use league_bot::render;
use league_core::{matches::Match, standings, team::Team};
use std::path::Path;

pub fn standings(root: &Path, json: bool) -> anyhow::Result<()> {
    let league = open_league(root)?;
    let matches = Match::list(&league.store).context("failed to list matches")?;
    let rows = standings::aggregate(&matches, &league.config.scoring);

    if json {
        return print_json(&rows);
    }
    if rows.is_empty() {
        println!("No match results found.");
    } else {
        println!("{}", render::standings_table(&rows));
    }
    Ok(())
}

pub fn teams(root: &Path, json: bool) -> anyhow::Result<()> {
    let league = open_league(root)?;
    let teams = Team::list(&league.store).context("failed to list teams")?;

    if json {
        return print_json(&teams);
    }
    if teams.is_empty() {
        println!("No teams found in the league.");
    } else {
        println!("{}", render::teams_table(&teams));
    }
    Ok(())
}

pub fn roster(root: &Path, team: &str, json: bool) -> anyhow::Result<()> {
    let league = open_league(root)?;
    let team = Team::load(&league.store, team)?;

    if json {
        return print_json(&team);
    }
    println!("{} (budget {})", team.name, team.budget);
    if team.roster.is_empty() {
        println!("No entries in the roster.");
    } else {
        println!("{}", render::roster_table(&team));
    }
    Ok(())
}

pub fn matches(root: &Path, search: Option<&str>, json: bool) -> anyhow::Result<()> {
    let league = open_league(root)?;
    let found = match search {
        Some(text) => Match::search(&league.store, text)?,
        None => Match::list(&league.store).context("failed to list matches")?,
    };

    if json {
        return print_json(&found);
    }
    if found.is_empty() {
        println!("No matches found.");
    } else {
        println!("{}", render::matches_table(&found));
    }
    Ok(())
}
