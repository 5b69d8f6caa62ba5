use league_core::config::LeagueConfig;
use league_core::matches::Match;
use league_core::standings;
use league_core::store::RecordStore;
use league_core::Result;

use super::command::ScoreArgs;
use crate::render;

pub fn schedule_match(
    store: &dyn RecordStore,
    week: &str,
    team: &str,
    team_owner: &str,
    opponent: &str,
    opponent_owner: &str,
) -> Result<String> {
    Match::schedule(store, week, team, team_owner, opponent, opponent_owner)?;
    Ok("Match added to schedule successfully!".to_string())
}

pub fn report_match(store: &dyn RecordStore, reporter: &str, args: &ScoreArgs) -> Result<String> {
    Match::report(
        store,
        reporter,
        &args.team,
        &args.opponent,
        &args.team_score,
        &args.opponent_score,
    )?;
    Ok("Match result reported successfully!".to_string())
}

pub fn record_match(store: &dyn RecordStore, reporter: &str, args: &ScoreArgs) -> Result<String> {
    let recorded = Match::record(
        store,
        reporter,
        &args.team,
        &args.opponent,
        &args.team_score,
        &args.opponent_score,
    )?;
    Ok(format!("Match recorded: {}", render::match_line(&recorded)))
}

pub fn show_matches(store: &dyn RecordStore, search: &str) -> Result<String> {
    let found = Match::search(store, search)?;
    if found.is_empty() {
        return Ok(format!(
            "'{}' not found. Please try again with a week number, team name, \
             or opponent team name featured in the schedule.",
            search.trim()
        ));
    }
    Ok(render::fenced(&render::matches_table(&found)))
}

pub fn view_matches(store: &dyn RecordStore) -> Result<String> {
    let all = Match::list(store)?;
    if all.is_empty() {
        return Ok("No match results found.".to_string());
    }
    let lines: Vec<String> = all.iter().map(render::match_line).collect();
    Ok(lines.join("\n"))
}

pub fn show_standings(store: &dyn RecordStore, config: &LeagueConfig) -> Result<String> {
    let rows = standings::aggregate(&Match::list(store)?, &config.scoring);
    if rows.is_empty() {
        return Ok("No match results found.".to_string());
    }
    Ok(render::fenced(&render::standings_table(&rows)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use league_core::store::MemoryStore;
    use league_core::team::Team;

    fn league() -> (MemoryStore, LeagueConfig) {
        let store = MemoryStore::new();
        let config = LeagueConfig::new("test league");
        Team::create(&store, &config, "Fire Squad", "ash").unwrap();
        Team::create(&store, &config, "Water Works", "misty").unwrap();
        (store, config)
    }

    fn score(team: &str, opponent: &str, a: &str, b: &str) -> ScoreArgs {
        ScoreArgs {
            team: team.into(),
            opponent: opponent.into(),
            team_score: a.into(),
            opponent_score: b.into(),
        }
    }

    #[test]
    fn schedule_then_report_once() {
        let (store, _config) = league();
        assert_eq!(
            schedule_match(&store, "1", "fire squad", "ash", "water works", "misty").unwrap(),
            "Match added to schedule successfully!"
        );
        assert_eq!(
            report_match(&store, "ash", &score("Fire Squad", "Water Works", "3", "1")).unwrap(),
            "Match result reported successfully!"
        );
        let err = report_match(&store, "misty", &score("Water Works", "Fire Squad", "5", "0"))
            .unwrap_err();
        assert!(err.to_string().starts_with("Match not in schedule or is already reported."));
    }

    #[test]
    fn record_match_reply() {
        let (store, _config) = league();
        assert_eq!(
            record_match(&store, "ash", &score("ash", "misty", "2", "2")).unwrap(),
            "Match recorded: Fire Squad vs Water Works | Score: 2 - 2 | Winner: DNP"
        );
    }

    #[test]
    fn show_matches_search() {
        let (store, _config) = league();
        schedule_match(&store, "1", "Fire Squad", "ash", "Water Works", "misty").unwrap();

        let table = show_matches(&store, "MISTY").unwrap();
        assert!(table.contains("| 1    | Fire Squad          | Water Works          | N/A   |"));

        assert_eq!(
            show_matches(&store, "Rock Solid").unwrap(),
            "'Rock Solid' not found. Please try again with a week number, team name, \
             or opponent team name featured in the schedule."
        );
        assert!(show_matches(&store, " ").is_err());
    }

    #[test]
    fn view_matches_lines() {
        let (store, _config) = league();
        assert_eq!(view_matches(&store).unwrap(), "No match results found.");

        schedule_match(&store, "1", "Fire Squad", "ash", "Water Works", "misty").unwrap();
        record_match(&store, "misty", &score("Water Works", "Fire Squad", "4", "1")).unwrap();
        assert_eq!(
            view_matches(&store).unwrap(),
            "Fire Squad vs Water Works | Score: 0 - 0 | Winner: N/A\n\
             Water Works vs Fire Squad | Score: 4 - 1 | Winner: Water Works"
        );
    }

    #[test]
    fn standings_empty_and_filled() {
        let (store, config) = league();
        assert_eq!(show_standings(&store, &config).unwrap(), "No match results found.");

        record_match(&store, "ash", &score("Fire Squad", "Water Works", "3", "0")).unwrap();
        let table = show_standings(&store, &config).unwrap();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[3], "| Fire Squad          |  1   |   0    |  0  |   3    |");
        assert_eq!(lines[4], "| Water Works         |  0   |   1    |  0  |   1    |");
    }
}
